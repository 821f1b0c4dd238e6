use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use zeroize::Zeroize;

use crate::error::Error;
use crate::numeral;
use crate::oracle::{BlockOracle, BLOCK_SIZE};

/// The Feistel schedule is fixed at eight rounds.
const ROUNDS: usize = 8;
/// The domain must hold at least this many messages, which bounds the
/// minimum message length from below.
const DOMAIN_MIN: u64 = 1_000_000;
/// Canonical tweak length in bytes.
const TWEAK_LEN: usize = 8;
/// The shortened 56-bit tweak variant, expanded to the canonical form.
const TWEAK_LEN_SHORT: usize = 7;

#[derive(Clone, Copy)]
enum Direction {
    Encrypt,
    Decrypt,
}

/// A format-preserving cipher context in the FF3/FF3-1 family.
///
/// A context is immutable once built: it owns an AES oracle keyed for one
/// key, a radix in 2..=36, the message-length bounds derived from that
/// radix, and an 8-byte tweak. Plaintexts and ciphertexts are strings over
/// the first `radix` symbols of `0-9a-z`; encryption preserves both the
/// length and the alphabet of its input.
///
/// All methods take `&self`, so one context can serve many concurrent calls.
pub struct Ff3 {
    oracle: BlockOracle,
    radix: u32,
    min_len: usize,
    max_len: usize,
    tweak: [u8; TWEAK_LEN],
}

impl Ff3 {
    /// Build a context from a hex key, a hex tweak, and a radix.
    ///
    /// The key must decode to 16, 24, or 32 bytes; the tweak to 7 or 8
    /// bytes. A 7-byte tweak is expanded to the canonical 8-byte layout.
    pub fn new(key_hex: &str, tweak_hex: &str, radix: u32) -> Result<Self, Error> {
        check_radix(radix)?;
        let (min_len, max_len) = length_bounds(radix)?;

        // The FF3 construction keys the block cipher with the byte-reversed
        // key; the official test vectors are only reproducible this way.
        let mut key = hex::decode(key_hex)?;
        key.reverse();
        let oracle = BlockOracle::new(&key);
        key.zeroize();
        let oracle = oracle?;

        let tweak = expand_tweak(&hex::decode(tweak_hex)?)?;

        Ok(Ff3 {
            oracle,
            radix,
            min_len,
            max_len,
            tweak,
        })
    }

    /// The radix this context operates over.
    pub fn radix(&self) -> u32 {
        self.radix
    }

    /// The shortest message this context accepts.
    pub fn min_len(&self) -> usize {
        self.min_len
    }

    /// The longest message this context accepts. Longer inputs must be
    /// segmented by the caller.
    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// Encrypt a digit string, yielding a ciphertext of the same length
    /// over the same alphabet.
    pub fn encrypt(&self, plaintext: &str) -> Result<String, Error> {
        self.cipher(plaintext, &self.tweak, Direction::Encrypt)
    }

    /// Invert [`Ff3::encrypt`].
    pub fn decrypt(&self, ciphertext: &str) -> Result<String, Error> {
        self.cipher(ciphertext, &self.tweak, Direction::Decrypt)
    }

    /// Encrypt under a one-off tweak, leaving the context's own tweak
    /// untouched. Safe to call concurrently with any other method.
    pub fn encrypt_with_tweak(&self, plaintext: &str, tweak_hex: &str) -> Result<String, Error> {
        let tweak = expand_tweak(&hex::decode(tweak_hex)?)?;
        self.cipher(plaintext, &tweak, Direction::Encrypt)
    }

    /// Decrypt under a one-off tweak.
    pub fn decrypt_with_tweak(&self, ciphertext: &str, tweak_hex: &str) -> Result<String, Error> {
        let tweak = expand_tweak(&hex::decode(tweak_hex)?)?;
        self.cipher(ciphertext, &tweak, Direction::Decrypt)
    }

    fn cipher(
        &self,
        input: &str,
        tweak: &[u8; TWEAK_LEN],
        direction: Direction,
    ) -> Result<String, Error> {
        let symbols: Vec<char> = input.chars().collect();
        let n = symbols.len();
        check_message_length(n, self.min_len, self.max_len)?;
        // Reject out-of-alphabet symbols before any cryptographic work, so
        // a failure never leaves a partial transform behind.
        for &symbol in &symbols {
            numeral::digit_value(symbol, self.radix)?;
        }

        let u = (n + 1) / 2;
        let v = n - u;
        let mut a: String = symbols[..u].iter().collect();
        let mut b: String = symbols[u..].iter().collect();

        let (tl, tr) = split_tweak(tweak);

        match direction {
            Direction::Encrypt => {
                for i in 0..ROUNDS {
                    let (w, m) = if i % 2 == 0 { (tr, u) } else { (tl, v) };
                    let c = self.round(i, w, &b, &a, m, direction)?;
                    a = std::mem::replace(&mut b, c);
                }
            }
            Direction::Decrypt => {
                for i in (0..ROUNDS).rev() {
                    let (w, m) = if i % 2 == 0 { (tr, u) } else { (tl, v) };
                    let c = self.round(i, w, &a, &b, m, direction)?;
                    b = std::mem::replace(&mut a, c);
                }
            }
        }

        a.push_str(&b);
        Ok(a)
    }

    /// One Feistel round: build the oracle's input block from the round
    /// index, a tweak half, and the source half, then fold the oracle's
    /// output into the other half modulo radix^m.
    fn round(
        &self,
        i: usize,
        w: [u8; 4],
        source: &str,
        other: &str,
        m: usize,
        direction: Direction,
    ) -> Result<String, Error> {
        let mut block = [0u8; BLOCK_SIZE];
        block[..4].copy_from_slice(&w);
        block[3] ^= i as u8;

        // The numeric convention reads halves right-to-left, so the source
        // half is digit-reversed before interpretation. Its value is bounded
        // by radix^m <= 2^96 and always fits the remaining 12 bytes.
        let reversed: String = source.chars().rev().collect();
        let value = numeral::to_integer(&reversed, self.radix)?;
        let bytes = value.to_bytes_be();
        block[BLOCK_SIZE - bytes.len()..].copy_from_slice(&bytes);

        // The oracle runs in the opposite byte orientation: reverse the
        // block going in and the result coming out.
        block.reverse();
        let mut s = self.oracle.encrypt_block(block);
        s.reverse();
        let y = BigUint::from_bytes_be(&s);

        let reversed: String = other.chars().rev().collect();
        let x = numeral::to_integer(&reversed, self.radix)?;
        let modulus = BigInt::from(BigUint::from(self.radix).pow(m as u32));
        let c = match direction {
            Direction::Encrypt => BigInt::from(x) + BigInt::from(y),
            Direction::Decrypt => BigInt::from(x) - BigInt::from(y),
        };
        // Subtraction can go negative, so the reduction has to be the
        // floored (always-nonnegative) remainder.
        let c = c.mod_floor(&modulus);

        let rendered = numeral::to_digit_string(c.magnitude(), self.radix, m)?;
        Ok(rendered.chars().rev().collect())
    }
}

fn check_radix(radix: u32) -> Result<(), Error> {
    if !(2..=36).contains(&radix) {
        return Err(Error::InvalidRadix(radix));
    }
    Ok(())
}

fn check_message_length(n: usize, min_len: usize, max_len: usize) -> Result<(), Error> {
    if n < min_len || n > max_len {
        return Err(Error::InvalidMessageLength {
            len: n,
            min_len,
            max_len,
        });
    }
    Ok(())
}

/// Derive the valid message-length range from the radix.
///
/// min_len is the smallest m with radix^m >= DOMAIN_MIN, max_len twice the
/// largest k with radix^k <= 2^96. Both are computed in exact integer
/// arithmetic; floating-point logs would be off by one near the boundaries.
pub(crate) fn length_bounds(radix: u32) -> Result<(usize, usize), Error> {
    let mut min_len = 0;
    let mut capacity: u64 = 1;
    while capacity < DOMAIN_MIN {
        capacity *= u64::from(radix);
        min_len += 1;
    }

    let limit: u128 = 1 << 96;
    let mut half_max = 0;
    let mut capacity: u128 = 1;
    loop {
        match capacity.checked_mul(u128::from(radix)) {
            Some(next) if next <= limit => {
                capacity = next;
                half_max += 1;
            }
            _ => break,
        }
    }
    let max_len = 2 * half_max;

    if min_len < 2 || max_len < min_len {
        return Err(Error::InvalidDomainBounds {
            radix,
            min_len,
            max_len,
        });
    }
    Ok((min_len, max_len))
}

/// Canonicalize a tweak to 8 bytes.
///
/// The 56-bit variant spreads its fourth byte across two nibble positions:
/// the high nibble stays in byte 3, the low nibble moves to the high nibble
/// of byte 7. All 56 original bits survive; the freed nibbles are zero.
fn expand_tweak(tweak: &[u8]) -> Result<[u8; TWEAK_LEN], Error> {
    match tweak.len() {
        TWEAK_LEN => {
            let mut out = [0u8; TWEAK_LEN];
            out.copy_from_slice(tweak);
            Ok(out)
        }
        TWEAK_LEN_SHORT => {
            let mut out = [0u8; TWEAK_LEN];
            out[..3].copy_from_slice(&tweak[..3]);
            out[3] = tweak[3] & 0xF0;
            out[4..7].copy_from_slice(&tweak[4..7]);
            out[7] = (tweak[3] & 0x0F) << 4;
            Ok(out)
        }
        n => Err(Error::InvalidTweakLength(n)),
    }
}

/// Tl is the first four tweak bytes, Tr the last four.
fn split_tweak(tweak: &[u8; TWEAK_LEN]) -> ([u8; 4], [u8; 4]) {
    let mut tl = [0u8; 4];
    let mut tr = [0u8; 4];
    tl.copy_from_slice(&tweak[..4]);
    tr.copy_from_slice(&tweak[4..]);
    (tl, tr)
}
