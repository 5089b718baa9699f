// ElGamal Signatures
// Classical scheme: r = g^k, s = k^-1 (h - x r) mod (p-1), checked as y^r r^s = g^h

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use num_bigint::BigUint;
use num_traits::{One, Zero};
use sha2::{Digest, Sha256};

use crate::error::{CryptoError, CryptoResult};
use crate::math;

use super::keygen::ElGamalKeyPair;

/// SHA-256 digest of the message as a big-endian integer, reduced mod p.
fn message_hash(message: &str, p: &BigUint) -> BigUint {
    let digest = Sha256::digest(message.as_bytes());
    BigUint::from_bytes_be(&digest) % p
}

impl ElGamalKeyPair {
    /// Sign a message. Returns base64 of r || s, each serialized to the
    /// full element width.
    ///
    /// The ephemeral k is resampled until gcd(k, p-1) = 1, so the inverse
    /// mod p-1 always exists; that loop never surfaces as an error.
    pub fn sign(&self, message: &str) -> CryptoResult<String> {
        let p_minus_1 = &self.p - 1u8;
        let p_minus_2 = &self.p - 2u8;
        let two = BigUint::from(2u8);

        let mut k = math::random_in_range(&two, &p_minus_2);
        while !math::gcd(&k, &p_minus_1).is_one() {
            k = math::random_in_range(&two, &p_minus_2);
        }

        let r = math::mod_pow(&self.g, &k, &self.p);
        let k_inv = math::mod_inverse(&k, &p_minus_1)?;

        // s = k^-1 (h - x r) mod (p-1), with the subtraction kept non-negative
        let h = message_hash(message, &self.p) % &p_minus_1;
        let x_r = (&self.x * &r) % &p_minus_1;
        let diff = if h >= x_r {
            &h - &x_r
        } else {
            &p_minus_1 - &x_r + &h
        };
        let s = (k_inv * diff) % &p_minus_1;

        let width = self.element_width();
        let mut payload = math::to_bytes_be_padded(&r, width);
        payload.extend_from_slice(&math::to_bytes_be_padded(&s, width));

        Ok(STANDARD.encode(payload))
    }

    /// Verify a signature: split at the midpoint into r and s, reject r
    /// outside (0, p), then check y^r * r^s ≡ g^h (mod p). A failed check is
    /// `Ok(false)`; only a malformed payload is an error.
    pub fn verify_signature(&self, message: &str, signature: &str) -> CryptoResult<bool> {
        let bytes = STANDARD.decode(signature)?;
        if bytes.is_empty() || bytes.len() % 2 != 0 {
            return Err(CryptoError::Decode(format!(
                "signature of {} bytes cannot split into two equal halves",
                bytes.len()
            )));
        }

        let (r_bytes, s_bytes) = bytes.split_at(bytes.len() / 2);
        let r = math::from_bytes_be(r_bytes);
        let s = math::from_bytes_be(s_bytes);

        if r.is_zero() || r >= self.p {
            return Ok(false);
        }

        let h = message_hash(message, &self.p);
        let v1 = math::mod_pow(&self.g, &h, &self.p);
        let v2 = (math::mod_pow(&self.y, &r, &self.p) * math::mod_pow(&r, &s, &self.p)) % &self.p;

        Ok(v1 == v2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_and_verify() {
        let key = ElGamalKeyPair::generate(256).unwrap();
        let message = "attest to this";

        let signature = key.sign(message).unwrap();
        assert!(key.verify_signature(message, &signature).unwrap());
    }

    #[test]
    fn test_verify_rejects_tampered_message() {
        let key = ElGamalKeyPair::generate(256).unwrap();
        let signature = key.sign("original message").unwrap();

        assert!(!key.verify_signature("original messagE", &signature).unwrap());
    }

    #[test]
    fn test_verify_rejects_out_of_range_r() {
        let key = ElGamalKeyPair::generate(256).unwrap();
        let width = key.element_width();

        // r = 0 is rejected before the congruence check
        let zeroed = STANDARD.encode(vec![0u8; width * 2]);
        assert!(!key.verify_signature("anything", &zeroed).unwrap());
    }

    #[test]
    fn test_verify_rejects_foreign_signature() {
        let key = ElGamalKeyPair::generate(256).unwrap();
        let other = ElGamalKeyPair::generate(256).unwrap();

        let signature = other.sign("shared message").unwrap();
        assert!(!key.verify_signature("shared message", &signature).unwrap());
    }

    #[test]
    fn test_verify_odd_payload_is_decode_error() {
        let key = ElGamalKeyPair::generate(256).unwrap();
        let payload = STANDARD.encode([9u8, 9, 9]);

        let result = key.verify_signature("msg", &payload);
        assert!(matches!(result, Err(CryptoError::Decode(_))));
    }
}
