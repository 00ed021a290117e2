use dnafec_core::{FecError, FecResult, MAX_CODEWORD_LEN};

/// Reed-Solomon (n, k): codeword length and message length in symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RsParams {
    pub n: usize,
    pub k: usize,
}

impl Default for RsParams {
    /// RS(255, 223): 32 parity symbols, 16 correctable errors.
    fn default() -> Self {
        Self { n: 255, k: 223 }
    }
}

impl RsParams {
    pub const fn new(n: usize, k: usize) -> Self {
        Self { n, k }
    }

    pub fn validate(&self) -> FecResult<()> {
        if self.n == 0 || self.n > MAX_CODEWORD_LEN || self.k >= self.n {
            return Err(FecError::InvalidParameters { n: self.n, k: self.k });
        }
        Ok(())
    }

    /// Number of parity symbols, n - k.
    pub const fn parity(&self) -> usize {
        self.n - self.k
    }

    /// Error-correction radius t = floor((n - k) / 2).
    pub const fn capacity(&self) -> usize {
        self.parity() / 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_rs_255_223() {
        let params = RsParams::default();
        assert_eq!(params.parity(), 32);
        assert_eq!(params.capacity(), 16);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn rejects_out_of_range_parameters() {
        assert!(RsParams::new(0, 0).validate().is_err());
        assert!(RsParams::new(256, 10).validate().is_err());
        assert!(RsParams::new(10, 10).validate().is_err());
        assert!(RsParams::new(10, 11).validate().is_err());
        assert!(RsParams::new(1, 0).validate().is_ok());
        assert!(RsParams::new(255, 254).validate().is_ok());
    }

    #[test]
    fn odd_parity_rounds_capacity_down() {
        assert_eq!(RsParams::new(15, 10).capacity(), 2);
        assert_eq!(RsParams::new(15, 14).capacity(), 0);
    }
}
