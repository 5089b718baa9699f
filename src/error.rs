// Crate-wide error type
// Every fallible operation in the core and at the boundary returns one of these

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CryptoError {
    /// Unrecognized algorithm tag at the service boundary. Client-caused.
    #[error("invalid algorithm: {0:?}")]
    InvalidAlgorithm(String),

    /// Key generation was asked for an unsupported bit size.
    #[error("invalid key size: {0}")]
    InvalidKeySize(String),

    /// No modular inverse exists: gcd(a, m) != 1.
    #[error("no modular inverse: operand is not coprime with the modulus")]
    NoInverse,

    /// Malformed base64, a payload that does not divide into blocks, or
    /// decrypted bytes that are not valid UTF-8.
    #[error("decode error: {0}")]
    Decode(String),

    /// ElGamal plaintext whose integer encoding is >= the modulus p.
    #[error("message too large: integer encoding must be smaller than the modulus")]
    MessageTooLarge,

    /// The external certificate tool chain failed.
    #[error("certificate tool failure: {0}")]
    ExternalTool(String),
}

impl CryptoError {
    /// True for errors the caller provoked with bad input, as opposed to
    /// internal failures. The boundary maps these to client-error responses.
    pub fn is_client_error(&self) -> bool {
        matches!(self, CryptoError::InvalidAlgorithm(_))
    }
}

impl From<base64::DecodeError> for CryptoError {
    fn from(e: base64::DecodeError) -> Self {
        CryptoError::Decode(format!("invalid base64: {}", e))
    }
}

impl From<std::string::FromUtf8Error> for CryptoError {
    fn from(e: std::string::FromUtf8Error) -> Self {
        CryptoError::Decode(format!("decrypted bytes are not valid UTF-8: {}", e))
    }
}

/// Result alias used throughout the crate.
pub type CryptoResult<T> = Result<T, CryptoError>;
