/// Primitive polynomial x^8 + x^4 + x^3 + x + 1 (0x11B).
pub const POLY: u16 = 0x11B;

/// Generator of the multiplicative group.
pub const GENERATOR: u8 = 0x03;

pub struct GfTables {
    pub exp: [u8; 512], // Doubled so log sums never need a modulo
    pub log: [u8; 256],
}

/// Builds the antilog/log tables by repeated multiplication with 3.
/// 3 generates the multiplicative group of GF(2^8) mod 0x11B (2 does not).
const fn gen_tables() -> GfTables {
    let mut exp = [0u8; 512];
    let mut log = [0u8; 256];
    let mut x = 1u16; // 3^0
    let mut i = 0;

    while i < 255 {
        exp[i] = x as u8;
        exp[i + 255] = x as u8;
        log[x as usize] = i as u8;

        // x * 3 = xtime(x) ^ x
        let double_x = x << 1;
        let reduced = if double_x & 0x100 != 0 {
            double_x ^ POLY
        } else {
            double_x
        };

        x = reduced ^ x;
        i += 1;
    }

    exp[510] = exp[0];
    exp[511] = exp[1];

    GfTables { exp, log }
}

/// Lives in .rodata, shared by every thread without locking.
pub static TABLES: GfTables = gen_tables();

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_inverts_exp() {
        for i in 0..255usize {
            assert_eq!(TABLES.log[TABLES.exp[i] as usize] as usize, i);
        }
    }

    #[test]
    fn exp_is_a_permutation_of_nonzero_elements() {
        let mut seen = [false; 256];
        for i in 0..255usize {
            let v = TABLES.exp[i] as usize;
            assert_ne!(v, 0);
            assert!(!seen[v], "alpha^{} repeats", i);
            seen[v] = true;
        }
    }
}
