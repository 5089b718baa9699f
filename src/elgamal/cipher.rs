// ElGamal Encryption / Decryption
// One-shot: the whole plaintext is a single integer m < p, masked by y^k

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use num_bigint::BigUint;

use crate::error::{CryptoError, CryptoResult};
use crate::math;

use super::keygen::ElGamalKeyPair;

impl ElGamalKeyPair {
    /// Encrypt UTF-8 text as one integer, returning base64 of c1 || c2.
    ///
    /// A fresh ephemeral k is drawn per call, so repeated encryptions of the
    /// same plaintext differ. Fails with `MessageTooLarge` when the integer
    /// encoding of the plaintext reaches the modulus.
    pub fn encrypt(&self, plaintext: &str) -> CryptoResult<String> {
        let m = math::from_bytes_be(plaintext.as_bytes());
        if m >= self.p {
            return Err(CryptoError::MessageTooLarge);
        }

        let two = BigUint::from(2u8);
        let k = math::random_in_range(&two, &(&self.p - 2u8));

        let c1 = math::mod_pow(&self.g, &k, &self.p);
        let c2 = (&m * math::mod_pow(&self.y, &k, &self.p)) % &self.p;

        let width = self.element_width();
        let mut payload = math::to_bytes_be_padded(&c1, width);
        payload.extend_from_slice(&math::to_bytes_be_padded(&c2, width));

        Ok(STANDARD.encode(payload))
    }

    /// Decrypt a base64 payload produced by `encrypt`: split at the midpoint
    /// into c1 and c2, strip the mask with c1^x, decode the integer as UTF-8.
    pub fn decrypt(&self, ciphertext: &str) -> CryptoResult<String> {
        let bytes = STANDARD.decode(ciphertext)?;
        if bytes.is_empty() || bytes.len() % 2 != 0 {
            return Err(CryptoError::Decode(format!(
                "ciphertext of {} bytes cannot split into two equal halves",
                bytes.len()
            )));
        }

        let (c1_bytes, c2_bytes) = bytes.split_at(bytes.len() / 2);
        let c1 = math::from_bytes_be(c1_bytes);
        let c2 = math::from_bytes_be(c2_bytes);

        let s = math::mod_pow(&c1, &self.x, &self.p);
        let m = (&c2 * math::mod_inverse(&s, &self.p)?) % &self.p;

        Ok(String::from_utf8(math::to_bytes_be(&m))?)
    }
}
