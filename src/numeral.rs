use num_bigint::BigUint;
use num_traits::Zero;

use crate::error::Error;

/// The fixed digit alphabet; a radix uses its first `radix` symbols.
const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// How many digits we accumulate into a `u64` before folding into the big
/// integer. 36^10 still fits comfortably in 64 bits.
const CHUNK_DIGITS: u32 = 10;

/// Map one symbol to its digit value, checking it against the radix.
pub fn digit_value(symbol: char, radix: u32) -> Result<u32, Error> {
    let value = match symbol {
        '0'..='9' => symbol as u32 - '0' as u32,
        'a'..='z' => symbol as u32 - 'a' as u32 + 10,
        _ => return Err(Error::InvalidDigitForRadix(symbol, radix)),
    };
    if value >= radix {
        return Err(Error::InvalidDigitForRadix(symbol, radix));
    }
    Ok(value)
}

/// Interpret a digit string, most-significant digit first, as a nonnegative
/// integer in the given radix.
///
/// Digits are gathered into fixed-size chunks in native arithmetic and folded
/// in via `acc = acc * radix^chunk + chunk`, so no large power of the radix
/// is ever computed in floating point.
pub fn to_integer(digits: &str, radix: u32) -> Result<BigUint, Error> {
    let mut acc = BigUint::zero();
    let mut chunk: u64 = 0;
    let mut chunk_len: u32 = 0;
    for symbol in digits.chars() {
        chunk = chunk * u64::from(radix) + u64::from(digit_value(symbol, radix)?);
        chunk_len += 1;
        if chunk_len == CHUNK_DIGITS {
            acc = acc * u64::from(radix).pow(CHUNK_DIGITS) + chunk;
            chunk = 0;
            chunk_len = 0;
        }
    }
    if chunk_len > 0 {
        acc = acc * u64::from(radix).pow(chunk_len) + chunk;
    }
    Ok(acc)
}

/// Render a nonnegative integer in the given radix, left-padded with the
/// zero symbol to exactly `len` characters.
pub fn to_digit_string(value: &BigUint, radix: u32, len: usize) -> Result<String, Error> {
    let mut out = vec![ALPHABET[0]; len];
    let chunk_base = BigUint::from(u64::from(radix).pow(CHUNK_DIGITS));
    let mut value = value.clone();
    let mut pos = len;
    while !value.is_zero() {
        let remainder = &value % &chunk_base;
        value /= &chunk_base;
        let mut chunk = remainder.to_u64_digits().first().copied().unwrap_or(0);
        let take = if value.is_zero() {
            chunk_digit_count(chunk, radix)
        } else {
            CHUNK_DIGITS as usize
        };
        if take > pos {
            return Err(Error::ValueTooLarge(len));
        }
        for _ in 0..take {
            pos -= 1;
            out[pos] = ALPHABET[(chunk % u64::from(radix)) as usize];
            chunk /= u64::from(radix);
        }
    }
    Ok(out.iter().map(|&b| b as char).collect())
}

/// How many digits the most-significant chunk contributes.
fn chunk_digit_count(chunk: u64, radix: u32) -> usize {
    let mut count = 1;
    let mut rest = chunk / u64::from(radix);
    while rest > 0 {
        count += 1;
        rest /= u64::from(radix);
    }
    count
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_digit_value_bounds() {
        assert_eq!(digit_value('0', 10), Ok(0));
        assert_eq!(digit_value('9', 10), Ok(9));
        assert_eq!(digit_value('z', 36), Ok(35));
        assert_eq!(
            digit_value('a', 10),
            Err(Error::InvalidDigitForRadix('a', 10))
        );
        // The alphabet is lowercase only.
        assert_eq!(
            digit_value('A', 36),
            Err(Error::InvalidDigitForRadix('A', 36))
        );
        assert_eq!(
            digit_value('!', 16),
            Err(Error::InvalidDigitForRadix('!', 16))
        );
    }

    #[test]
    fn test_to_integer_small() {
        assert_eq!(to_integer("255", 10).unwrap(), BigUint::from(255u32));
        assert_eq!(to_integer("ff", 16).unwrap(), BigUint::from(255u32));
        assert_eq!(to_integer("zz", 36).unwrap(), BigUint::from(1295u32));
        assert_eq!(to_integer("0000", 2).unwrap(), BigUint::zero());
    }

    #[test]
    fn test_to_integer_crosses_chunk_boundary() {
        // 23 decimal digits forces two full chunks plus a partial one.
        let digits = "12345678901234567890123";
        let expected = "12345678901234567890123"
            .parse::<num_bigint::BigUint>()
            .unwrap();
        assert_eq!(to_integer(digits, 10).unwrap(), expected);
    }

    #[test]
    fn test_to_digit_string_pads() {
        assert_eq!(
            to_digit_string(&BigUint::from(255u32), 10, 6).unwrap(),
            "000255"
        );
        assert_eq!(to_digit_string(&BigUint::zero(), 26, 4).unwrap(), "0000");
        assert_eq!(
            to_digit_string(&BigUint::from(1295u32), 36, 2).unwrap(),
            "zz"
        );
    }

    #[test]
    fn test_to_digit_string_overflow() {
        assert_eq!(
            to_digit_string(&BigUint::from(1000u32), 10, 3),
            Err(Error::ValueTooLarge(3))
        );
    }

    #[test]
    fn test_round_trip_long_string() {
        let digits = "3141592653589793238462643383279502884197";
        let value = to_integer(digits, 10).unwrap();
        assert_eq!(to_digit_string(&value, 10, digits.len()).unwrap(), digits);
    }
}
