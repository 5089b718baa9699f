// Service Boundary
// Algorithm-tag dispatch over the two engines, with the JSON envelope shapes
// the HTTP layer marshals

use std::str::FromStr;

use log::{debug, info};
use serde::Serialize;

use crate::elgamal::{ElGamalKeyPair, DEFAULT_PRIME_BITS};
use crate::error::{CryptoError, CryptoResult};
use crate::rsa::{RsaKeyPair, DEFAULT_MODULUS_BITS};

/// The two cryptosystems mounted side by side, selected per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    Rsa,
    ElGamal,
}

impl FromStr for Algorithm {
    type Err = CryptoError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag {
            "rsa" => Ok(Algorithm::Rsa),
            "elgamal" => Ok(Algorithm::ElGamal),
            other => Err(CryptoError::InvalidAlgorithm(other.to_string())),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EncryptResponse {
    pub encrypted_message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecryptResponse {
    pub decrypted_message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignResponse {
    pub signature: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyResponse {
    pub is_valid: bool,
}

/// Owns one immutable key pair per cryptosystem for the process lifetime.
/// Every field is read-only after construction, so a shared reference can be
/// handed to any number of concurrent request handlers.
pub struct CryptoService {
    rsa: RsaKeyPair,
    elgamal: ElGamalKeyPair,
}

impl CryptoService {
    /// Generate both key pairs at the production sizes. Runs once at startup,
    /// before the boundary accepts requests.
    pub fn new() -> CryptoResult<Self> {
        info!("generating service key material");
        Ok(CryptoService {
            rsa: RsaKeyPair::generate(DEFAULT_MODULUS_BITS)?,
            elgamal: ElGamalKeyPair::generate(DEFAULT_PRIME_BITS)?,
        })
    }

    /// Assemble a service around already-generated key pairs.
    pub fn with_keys(rsa: RsaKeyPair, elgamal: ElGamalKeyPair) -> Self {
        CryptoService { rsa, elgamal }
    }

    pub fn encrypt(&self, algorithm: &str, message: &str) -> CryptoResult<EncryptResponse> {
        debug!("encrypt request for {:?}", algorithm);
        let encrypted_message = match algorithm.parse::<Algorithm>()? {
            Algorithm::Rsa => self.rsa.encrypt(message),
            Algorithm::ElGamal => self.elgamal.encrypt(message)?,
        };
        Ok(EncryptResponse { encrypted_message })
    }

    pub fn decrypt(&self, algorithm: &str, cipher_text: &str) -> CryptoResult<DecryptResponse> {
        debug!("decrypt request for {:?}", algorithm);
        let decrypted_message = match algorithm.parse::<Algorithm>()? {
            Algorithm::Rsa => self.rsa.decrypt(cipher_text)?,
            Algorithm::ElGamal => self.elgamal.decrypt(cipher_text)?,
        };
        Ok(DecryptResponse { decrypted_message })
    }

    pub fn sign(&self, algorithm: &str, message: &str) -> CryptoResult<SignResponse> {
        debug!("sign request for {:?}", algorithm);
        let signature = match algorithm.parse::<Algorithm>()? {
            Algorithm::Rsa => self.rsa.sign(message),
            Algorithm::ElGamal => self.elgamal.sign(message)?,
        };
        Ok(SignResponse { signature })
    }

    pub fn verify_signature(
        &self,
        algorithm: &str,
        message: &str,
        signature: &str,
    ) -> CryptoResult<VerifyResponse> {
        debug!("verify request for {:?}", algorithm);
        let is_valid = match algorithm.parse::<Algorithm>()? {
            Algorithm::Rsa => self.rsa.verify_signature(message, signature)?,
            Algorithm::ElGamal => self.elgamal.verify_signature(message, signature)?,
        };
        Ok(VerifyResponse { is_valid })
    }
}
