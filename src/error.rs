use thiserror::Error;

/// Everything that can go wrong when building a context or running the transform.
///
/// All of these are caller input defects, detected before any cryptographic
/// work happens. Nothing here is transient, and no partial output is ever
/// produced alongside an error.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum Error {
    /// The key must be 16, 24, or 32 bytes (AES-128/192/256).
    #[error("invalid key length {0}, expected 16, 24, or 32 bytes")]
    InvalidKeyLength(usize),
    /// The radix must lie in 2..=36.
    #[error("invalid radix {0}, expected a value in 2..=36")]
    InvalidRadix(u32),
    /// The radix yields a message-length range too small to be usable.
    #[error("radix {radix} yields unusable length bounds {min_len}..={max_len}")]
    InvalidDomainBounds {
        radix: u32,
        min_len: usize,
        max_len: usize,
    },
    /// The tweak must be 7 or 8 bytes.
    #[error("invalid tweak length {0}, expected 7 or 8 bytes")]
    InvalidTweakLength(usize),
    /// The message length falls outside the radix-derived range.
    #[error("invalid message length {len}, expected {min_len}..={max_len} symbols")]
    InvalidMessageLength {
        len: usize,
        min_len: usize,
        max_len: usize,
    },
    /// A symbol is not one of the first `radix` characters of `0-9a-z`.
    #[error("symbol {0:?} is not a digit in radix {1}")]
    InvalidDigitForRadix(char, u32),
    /// A value needs more digits than the requested rendering length.
    #[error("value does not fit in {0} digits")]
    ValueTooLarge(usize),
    /// The key or tweak was not valid hex.
    #[error("invalid hex input: {0}")]
    InvalidHex(#[from] hex::FromHexError),
}
