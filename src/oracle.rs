use aes::cipher::{generic_array::GenericArray, BlockEncrypt, KeyInit};
use aes::{Aes128, Aes192, Aes256};

use crate::error::Error;

/// The number of bytes in one block of our keyed permutation.
pub const BLOCK_SIZE: usize = 16;

/// A fixed-block keyed permutation: AES in single-block ECB mode.
///
/// The Feistel rounds treat this as a pseudorandom-permutation oracle, a
/// pure function of (key, block). The key schedule is computed once at
/// construction; `encrypt_block` takes `&self`, so a single oracle can be
/// shared across rounds and across concurrent calls with no state bleeding
/// from one block operation into the next.
pub enum BlockOracle {
    Aes128(Aes128),
    Aes192(Aes192),
    Aes256(Aes256),
}

impl BlockOracle {
    /// Build an oracle from raw key bytes, picking the AES variant by length.
    pub fn new(key: &[u8]) -> Result<Self, Error> {
        match key.len() {
            16 => Ok(Self::Aes128(Aes128::new(GenericArray::from_slice(key)))),
            24 => Ok(Self::Aes192(Aes192::new(GenericArray::from_slice(key)))),
            32 => Ok(Self::Aes256(Aes256::new(GenericArray::from_slice(key)))),
            n => Err(Error::InvalidKeyLength(n)),
        }
    }

    /// Encrypt a single block: no padding, no chaining, no IV.
    pub fn encrypt_block(&self, block: [u8; BLOCK_SIZE]) -> [u8; BLOCK_SIZE] {
        let mut block = GenericArray::from(block);
        match self {
            Self::Aes128(cipher) => cipher.encrypt_block(&mut block),
            Self::Aes192(cipher) => cipher.encrypt_block(&mut block),
            Self::Aes256(cipher) => cipher.encrypt_block(&mut block),
        }
        block.into()
    }
}
