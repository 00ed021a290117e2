/// dest ^= src. Payload combination for XOR-based fountain codes.
#[inline]
pub fn xor_into(dest: &mut [u8], src: &[u8]) {
    for (d, s) in dest.iter_mut().zip(src.iter()) {
        *d ^= *s;
    }
}
