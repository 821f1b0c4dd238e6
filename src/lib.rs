//! Format-preserving encryption in the FF3/FF3-1 family.
//!
//! An [`Ff3`] context is a tweakable, length-preserving permutation over
//! strings of digits in a radix between 2 and 36, built from an eight-round
//! Feistel network with AES as its round oracle.
//!
//! ```
//! use ff3_fpe::Ff3;
//!
//! let ff3 = Ff3::new("EF4359D8D580AA4F7F036D6F04FC6A94", "D8E7920AFA330A73", 10)?;
//! let ciphertext = ff3.encrypt("890121234567890000")?;
//! assert_eq!(ciphertext, "750918814058654607");
//! assert_eq!(ff3.decrypt(&ciphertext)?, "890121234567890000");
//! # Ok::<(), ff3_fpe::Error>(())
//! ```
mod error;
mod ff3;
mod numeral;
mod oracle;
// For much heavier tests.
#[cfg(test)]
mod test;

pub use crate::error::Error;
pub use crate::ff3::Ff3;
