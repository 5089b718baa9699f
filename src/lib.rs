// crypto-service library root
// Textbook RSA and ElGamal cryptosystems behind a small service boundary.
// Educational arithmetic: unpadded, not side-channel hardened, keys live for
// the process lifetime only.

pub mod cert;
pub mod elgamal;
pub mod error;
pub mod math;
pub mod rsa;
pub mod service;

pub use cert::{generate_certificate, CertificateRequest, CertificateResponse};
pub use elgamal::ElGamalKeyPair;
pub use error::{CryptoError, CryptoResult};
pub use rsa::RsaKeyPair;
pub use service::{Algorithm, CryptoService};
