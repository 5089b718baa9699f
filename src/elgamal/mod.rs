// ElGamal Module - Main module file
// Classical ElGamal over Z_p*: single-integer encryption and the textbook signature scheme

pub mod cipher;
pub mod keygen;
pub mod signature;

pub use keygen::{ElGamalKeyPair, DEFAULT_PRIME_BITS};
