// RSA Block Encryption / Decryption
// Splits UTF-8 plaintext into block_size chunks and exponentiates each one

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::{CryptoError, CryptoResult};
use crate::math;

use super::keygen::RsaKeyPair;

impl RsaKeyPair {
    /// Encrypt UTF-8 text block by block, returning base64.
    ///
    /// Each chunk of `block_size` bytes is read as a big-endian integer m,
    /// raised to e mod n, and written as a full-width ciphertext block.
    /// Empty plaintext encrypts to an empty payload. Deterministic: textbook
    /// RSA has no per-call randomness.
    pub fn encrypt(&self, plaintext: &str) -> String {
        let bytes = plaintext.as_bytes();
        let width = self.cipher_block_size();

        let mut payload = Vec::with_capacity(bytes.len() / self.block_size * width + width);
        for chunk in bytes.chunks(self.block_size) {
            let m = math::from_bytes_be(chunk);
            let c = math::mod_pow(&m, &self.e, &self.n);
            payload.extend_from_slice(&math::to_bytes_be_padded(&c, width));
        }

        STANDARD.encode(payload)
    }

    /// Decrypt a base64 payload produced by `encrypt`.
    ///
    /// The payload must divide into full-width ciphertext blocks; each block
    /// is raised to d mod n and the recovered plaintext chunks are rejoined
    /// as UTF-8.
    pub fn decrypt(&self, ciphertext: &str) -> CryptoResult<String> {
        let bytes = STANDARD.decode(ciphertext)?;
        let width = self.cipher_block_size();

        if bytes.len() % width != 0 {
            return Err(CryptoError::Decode(format!(
                "ciphertext length {} is not a multiple of the {}-byte block width",
                bytes.len(),
                width
            )));
        }

        let mut plaintext = Vec::new();
        for chunk in bytes.chunks(width) {
            let c = math::from_bytes_be(chunk);
            let m = math::mod_pow(&c, &self.d, &self.n);
            plaintext.extend_from_slice(&math::to_bytes_be(&m));
        }

        Ok(String::from_utf8(plaintext)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let key = RsaKeyPair::generate(512).unwrap();
        let message = "Hello, RSA!";

        let ciphertext = key.encrypt(message);
        let decrypted = key.decrypt(&ciphertext).unwrap();

        assert_eq!(decrypted, message);
    }

    #[test]
    fn test_round_trip_multiple_blocks() {
        let key = RsaKeyPair::generate(512).unwrap();
        // Longer than one block at any supported key size
        let message = "The quick brown fox jumps over the lazy dog, \
                       then does it again, and once more for good measure.";
        assert!(message.len() > key.block_size);

        let ciphertext = key.encrypt(message);
        assert_eq!(key.decrypt(&ciphertext).unwrap(), message);
    }

    #[test]
    fn test_round_trip_non_ascii() {
        let key = RsaKeyPair::generate(512).unwrap();
        let message = "grüße aus München, ѱ, 密码学";

        let ciphertext = key.encrypt(message);
        assert_eq!(key.decrypt(&ciphertext).unwrap(), message);
    }

    #[test]
    fn test_empty_plaintext() {
        let key = RsaKeyPair::generate(512).unwrap();

        let ciphertext = key.encrypt("");
        assert_eq!(ciphertext, "");
        assert_eq!(key.decrypt(&ciphertext).unwrap(), "");
    }

    #[test]
    fn test_encryption_is_deterministic() {
        let key = RsaKeyPair::generate(512).unwrap();
        let message = "same input, same output";

        assert_eq!(key.encrypt(message), key.encrypt(message));
    }

    #[test]
    fn test_decrypt_rejects_bad_base64() {
        let key = RsaKeyPair::generate(512).unwrap();
        let result = key.decrypt("not$valid$base64");
        assert!(matches!(result, Err(CryptoError::Decode(_))));
    }

    #[test]
    fn test_decrypt_rejects_misaligned_payload() {
        let key = RsaKeyPair::generate(512).unwrap();
        // Three bytes can never divide into full-width blocks
        let payload = STANDARD.encode([1u8, 2, 3]);
        let result = key.decrypt(&payload);
        assert!(matches!(result, Err(CryptoError::Decode(_))));
    }
}
