use dnafec_reedsolomon::ReedSolomon;
use proptest::prelude::*;

/// (n, k, message) for short codes, keeping the exhaustive root search cheap.
fn code_and_message() -> impl Strategy<Value = (usize, usize, Vec<u8>)> {
    (1usize..=64)
        .prop_flat_map(|n| (Just(n), 0..n))
        .prop_flat_map(|(n, k)| (Just(n), Just(k), proptest::collection::vec(any::<u8>(), k)))
}

/// A code, a message, and exactly t distinct error positions with non-zero values.
fn corrupted_codeword() -> impl Strategy<Value = (usize, usize, Vec<u8>, Vec<usize>, Vec<u8>)> {
    code_and_message().prop_flat_map(|(n, k, message)| {
        let t = (n - k) / 2;
        (
            Just(n),
            Just(k),
            Just(message),
            proptest::sample::subsequence((0..n).collect::<Vec<_>>(), t),
            proptest::collection::vec(1u8..=255, t),
        )
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn roundtrip_without_errors((n, k, message) in code_and_message()) {
        let rs = ReedSolomon::new(n, k).unwrap();
        let codeword = rs.encode(&message).unwrap();
        prop_assert_eq!(codeword.len(), n);
        prop_assert!(rs.verify(&codeword));

        let decoded = rs.decode(&codeword).unwrap();
        prop_assert_eq!(decoded.message, message);
        prop_assert!(decoded.corrected.is_empty());
    }

    #[test]
    fn corrects_up_to_capacity((n, k, message, positions, magnitudes) in corrupted_codeword()) {
        let rs = ReedSolomon::new(n, k).unwrap();
        let mut received = rs.encode(&message).unwrap();
        for (&pos, &magnitude) in positions.iter().zip(&magnitudes) {
            received[pos] ^= magnitude;
        }
        if !positions.is_empty() {
            prop_assert!(!rs.verify(&received));
        }

        let decoded = rs.decode_checked(&received).unwrap();
        prop_assert_eq!(decoded.message, message);
        prop_assert_eq!(decoded.corrected, positions);
    }
}
