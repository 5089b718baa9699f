// RSA Module - Main module file
// Textbook RSA: keypair generation, block encryption, hash-and-exponentiate signatures

pub mod cipher;
pub mod keygen;
pub mod signature;

pub use keygen::{RsaKeyPair, DEFAULT_MODULUS_BITS};
