// RSA Signatures
// Textbook hash-and-exponentiate: s = SHA-256(message)^d mod n, no padding

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use num_bigint::BigUint;
use sha2::{Digest, Sha256};

use crate::error::CryptoResult;
use crate::math;

use super::keygen::RsaKeyPair;

/// SHA-256 digest of the message read as a big-endian integer.
fn message_hash(message: &str) -> BigUint {
    let digest = Sha256::digest(message.as_bytes());
    BigUint::from_bytes_be(&digest)
}

impl RsaKeyPair {
    /// Sign a message with the private exponent. Returns base64 of the
    /// minimal big-endian encoding of s = h^d mod n.
    pub fn sign(&self, message: &str) -> String {
        let h = message_hash(message);
        let s = math::mod_pow(&h, &self.d, &self.n);
        STANDARD.encode(math::to_bytes_be(&s))
    }

    /// Verify a signature by re-exposing the digest with the public exponent
    /// and comparing. A mismatch is `Ok(false)`, never an error; only a
    /// malformed base64 payload fails.
    pub fn verify_signature(&self, message: &str, signature: &str) -> CryptoResult<bool> {
        let s = math::from_bytes_be(&STANDARD.decode(signature)?);
        let recovered = math::mod_pow(&s, &self.e, &self.n);
        Ok(recovered == message_hash(message))
    }
}
