// ElGamal Key Generation
// Draws a probable prime p, a base g and a private exponent x; publishes y = g^x mod p

use log::{debug, info};
use num_bigint::BigUint;

use crate::error::{CryptoError, CryptoResult};
use crate::math;

/// Prime size used by the service composition root.
pub const DEFAULT_PRIME_BITS: u32 = 512;

const MIN_PRIME_BITS: u32 = 128;

/// ElGamal domain parameters and key pair, generated once and immutable
/// thereafter. The public part is (p, g, y), the private part is x.
///
/// g is drawn uniformly from [2, p-1] with no multiplicative-order check;
/// it is a generator-like base, not a verified generator.
#[derive(Debug, Clone)]
pub struct ElGamalKeyPair {
    pub p: BigUint,
    pub g: BigUint,
    pub x: BigUint,
    pub y: BigUint,
}

impl ElGamalKeyPair {
    /// Generate parameters and a key pair over a prime of approximately
    /// `prime_bits` bits.
    ///
    /// Fails with `InvalidKeySize` if `prime_bits` is below the supported
    /// minimum.
    pub fn generate(prime_bits: u32) -> CryptoResult<Self> {
        if prime_bits < MIN_PRIME_BITS {
            return Err(CryptoError::InvalidKeySize(format!(
                "ElGamal prime must be at least {} bits, got {}",
                MIN_PRIME_BITS, prime_bits
            )));
        }

        debug!("searching for a {}-bit probable prime", prime_bits);
        let p = math::random_prime(prime_bits);

        let two = BigUint::from(2u8);
        let g = math::random_in_range(&two, &(&p - 1u8));
        let x = math::random_in_range(&two, &(&p - 2u8));
        let y = math::mod_pow(&g, &x, &p);

        info!("generated ElGamal key pair: {}-bit prime", p.bits());

        Ok(ElGamalKeyPair { p, g, x, y })
    }

    /// Width of one serialized group element on the wire: c1/c2 and r/s are
    /// each written as exactly ceil(bits(p)/8) bytes so the midpoint split on
    /// the receiving side is exact.
    pub(crate) fn element_width(&self) -> usize {
        ((self.p.bits() + 7) / 8) as usize
    }
}
