use aes::cipher::{AsyncStreamCipher, KeyIvInit};
use rand::RngCore;

use crate::error::PersistenceError;

type Aes256CfbEnc = cfb_mode::Encryptor<aes::Aes256>;
type Aes256CfbDec = cfb_mode::Decryptor<aes::Aes256>;

pub const BLOCK_SIZE: usize = 16;
const KEY_SIZE: usize = 32;

/// AES-256-CFB with a fresh random IV written in front of the ciphertext.
pub fn encrypt(key: &[u8], payload: &[u8]) -> Result<Vec<u8>, PersistenceError> {
    check_key(key)?;

    let mut iv = [0u8; BLOCK_SIZE];
    rand::thread_rng().fill_bytes(&mut iv);

    let mut out = Vec::with_capacity(BLOCK_SIZE + payload.len());
    out.extend_from_slice(&iv);
    out.extend_from_slice(payload);

    let encryptor = Aes256CfbEnc::new_from_slices(key, &iv).map_err(|_| PersistenceError::InvalidKey(key.len()))?;
    encryptor.encrypt(&mut out[BLOCK_SIZE..]);
    Ok(out)
}

pub fn decrypt(key: &[u8], data: &[u8]) -> Result<Vec<u8>, PersistenceError> {
    check_key(key)?;

    if data.len() < BLOCK_SIZE {
        return Err(PersistenceError::TooShort(data.len()));
    }

    let (iv, body) = data.split_at(BLOCK_SIZE);
    let mut plain = body.to_vec();
    let decryptor = Aes256CfbDec::new_from_slices(key, iv).map_err(|_| PersistenceError::InvalidKey(key.len()))?;
    decryptor.decrypt(&mut plain);
    Ok(plain)
}

fn check_key(key: &[u8]) -> Result<(), PersistenceError> {
    if key.len() != KEY_SIZE {
        return Err(PersistenceError::InvalidKey(key.len()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &[u8; 32] = b"0123456789abcdef0123456789abcdef";

    #[test]
    fn iv_is_prepended_and_fresh() {
        let payload = b"high scores";
        let first = encrypt(KEY, payload).unwrap();
        let second = encrypt(KEY, payload).unwrap();

        assert_eq!(first.len(), BLOCK_SIZE + payload.len());
        assert_ne!(first[..BLOCK_SIZE], second[..BLOCK_SIZE]);
        assert_ne!(&first[BLOCK_SIZE..], payload);
        assert_eq!(decrypt(KEY, &first).unwrap(), payload);
        assert_eq!(decrypt(KEY, &second).unwrap(), payload);
    }

    #[test]
    fn short_input_is_corrupt() {
        assert!(matches!(decrypt(KEY, &[0u8; BLOCK_SIZE - 1]), Err(PersistenceError::TooShort(15))));
        assert_eq!(decrypt(KEY, &[0u8; BLOCK_SIZE]).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn wrong_key_size_is_rejected() {
        assert!(matches!(encrypt(b"short", b"x"), Err(PersistenceError::InvalidKey(5))));
        assert!(matches!(decrypt(b"short", &[0u8; 32]), Err(PersistenceError::InvalidKey(5))));
    }
}
