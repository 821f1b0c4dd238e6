use crate::ff3::length_bounds;
use crate::numeral;
use crate::Ff3;
use proptest::{collection::vec, prelude::*};

const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

fn arb_key_hex() -> impl Strategy<Value = String> {
    prop_oneof![Just(16usize), Just(24), Just(32)]
        .prop_flat_map(|len| vec(any::<u8>(), len))
        .prop_map(hex::encode)
}

fn arb_tweak_hex() -> impl Strategy<Value = String> {
    prop_oneof![Just(7usize), Just(8)]
        .prop_flat_map(|len| vec(any::<u8>(), len))
        .prop_map(hex::encode)
}

/// A radix together with a message of valid length over its alphabet.
fn arb_message() -> impl Strategy<Value = (u32, String)> {
    (2u32..=36).prop_flat_map(|radix| {
        let (min_len, max_len) = length_bounds(radix).expect("radix is in range");
        let cap = max_len.min(min_len + 18);
        vec(0..radix, min_len..=cap).prop_map(move |digits| {
            let message = digits
                .iter()
                .map(|&d| ALPHABET[d as usize] as char)
                .collect();
            (radix, message)
        })
    })
}

proptest! {
    #[test]
    fn test_round_trip(
        (radix, plaintext) in arb_message(),
        key in arb_key_hex(),
        tweak in arb_tweak_hex(),
    ) {
        let ff3 = Ff3::new(&key, &tweak, radix).unwrap();
        let ciphertext = ff3.encrypt(&plaintext).unwrap();
        // Length and alphabet are preserved.
        prop_assert_eq!(ciphertext.len(), plaintext.len());
        for symbol in ciphertext.chars() {
            prop_assert!(numeral::digit_value(symbol, radix).is_ok());
        }
        // Decryption inverts encryption exactly.
        prop_assert_eq!(&ff3.decrypt(&ciphertext).unwrap(), &plaintext);
        // Identical inputs give identical output.
        prop_assert_eq!(&ff3.encrypt(&plaintext).unwrap(), &ciphertext);
    }

    #[test]
    fn test_tweak_override_matches_dedicated_context(
        (radix, plaintext) in arb_message(),
        key in arb_key_hex(),
        context_tweak in arb_tweak_hex(),
        call_tweak in arb_tweak_hex(),
    ) {
        let base = Ff3::new(&key, &context_tweak, radix).unwrap();
        let dedicated = Ff3::new(&key, &call_tweak, radix).unwrap();
        let ciphertext = base.encrypt_with_tweak(&plaintext, &call_tweak).unwrap();
        prop_assert_eq!(&ciphertext, &dedicated.encrypt(&plaintext).unwrap());
        prop_assert_eq!(
            &base.decrypt_with_tweak(&ciphertext, &call_tweak).unwrap(),
            &plaintext
        );
    }
}
