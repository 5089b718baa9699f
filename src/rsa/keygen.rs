// RSA Key Generation
// Draws two probable primes, a random coprime public exponent and its inverse

use log::{debug, info};
use num_bigint::BigUint;
use num_traits::One;

use crate::error::{CryptoError, CryptoResult};
use crate::math;

/// Modulus size used by the service composition root.
pub const DEFAULT_MODULUS_BITS: u32 = 1024;

/// Smallest modulus the generator accepts. The modulus must stay wider than
/// the 256-bit SHA-256 digest: signatures are verified against the unreduced
/// hash, so a digest >= n would fail verification after signing.
const MIN_MODULUS_BITS: u32 = 512;

/// RSA key pair, generated once and immutable thereafter.
/// Holds both halves; the public part is (n, e), the private part is d.
#[derive(Debug, Clone)]
pub struct RsaKeyPair {
    pub p: BigUint,
    pub q: BigUint,
    pub n: BigUint,
    pub phi: BigUint,
    pub e: BigUint,
    pub d: BigUint,
    /// Plaintext bytes consumed per encrypted block: floor(bits(n)/8) - 1.
    pub block_size: usize,
}

impl RsaKeyPair {
    /// Generate a key pair with a modulus of approximately `modulus_bits` bits.
    ///
    /// The public exponent is drawn uniformly from [2, phi-1] and resampled
    /// until it is coprime with phi.
    ///
    /// Fails with `InvalidKeySize` if `modulus_bits` is odd or below the
    /// supported minimum.
    pub fn generate(modulus_bits: u32) -> CryptoResult<Self> {
        if modulus_bits < MIN_MODULUS_BITS {
            return Err(CryptoError::InvalidKeySize(format!(
                "RSA modulus must be at least {} bits, got {}",
                MIN_MODULUS_BITS, modulus_bits
            )));
        }
        if modulus_bits % 2 != 0 {
            return Err(CryptoError::InvalidKeySize(format!(
                "RSA modulus bit length must be even (p and q get equal bit lengths), got {}",
                modulus_bits
            )));
        }

        let half_bits = modulus_bits / 2;
        debug!("searching for two {}-bit probable primes", half_bits);

        let p = math::random_prime(half_bits);
        let mut q = math::random_prime(half_bits);
        while q == p {
            q = math::random_prime(half_bits);
        }

        let n = &p * &q;
        let phi = (&p - 1u8) * (&q - 1u8);

        // Uniform public exponent, resampled until coprime with phi
        let two = BigUint::from(2u8);
        let e_upper = &phi - 1u8;
        let mut e = math::random_in_range(&two, &e_upper);
        while !math::gcd(&e, &phi).is_one() {
            e = math::random_in_range(&two, &e_upper);
        }

        let d = math::mod_inverse(&e, &phi)?;
        let block_size = (n.bits() / 8 - 1) as usize;

        info!(
            "generated RSA key pair: {}-bit modulus, {}-byte plaintext blocks",
            n.bits(),
            block_size
        );

        Ok(RsaKeyPair {
            p,
            q,
            n,
            phi,
            e,
            d,
            block_size,
        })
    }

    /// Width of one encrypted block on the wire: every ciphertext residue is
    /// serialized to exactly ceil(bits(n)/8) bytes so the decrypt side can
    /// stride without ambiguity.
    pub(crate) fn cipher_block_size(&self) -> usize {
        ((self.n.bits() + 7) / 8) as usize
    }
}
