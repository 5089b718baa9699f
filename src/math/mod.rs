// Big Integer Modular Arithmetic Toolkit
// Wrapper around num-bigint shared by the RSA and ElGamal engines

use num_bigint::{BigInt, BigUint, RandBigInt};
use num_integer::Integer;
use num_traits::{One, Zero};
use rand::thread_rng;

use crate::error::{CryptoError, CryptoResult};

/// Create a big integer from big-endian bytes. An empty slice is zero.
pub fn from_bytes_be(bytes: &[u8]) -> BigUint {
    BigUint::from_bytes_be(bytes)
}

/// Convert a big integer to its minimal big-endian byte sequence:
/// no leading zero byte, and zero itself encodes as the empty sequence.
pub fn to_bytes_be(n: &BigUint) -> Vec<u8> {
    if n.is_zero() {
        Vec::new()
    } else {
        n.to_bytes_be()
    }
}

/// Convert a big integer to exactly `width` big-endian bytes, left-padded
/// with zeros. The value must already fit in `width` bytes.
pub fn to_bytes_be_padded(n: &BigUint, width: usize) -> Vec<u8> {
    let bytes = to_bytes_be(n);
    let mut result = vec![0u8; width];
    let start = width.saturating_sub(bytes.len());
    result[start..].copy_from_slice(&bytes);
    result
}

/// Modular exponentiation: base^exp mod modulus
/// Uses square-and-multiply
pub fn mod_pow(base: &BigUint, exp: &BigUint, modulus: &BigUint) -> BigUint {
    if modulus.is_one() {
        return BigUint::zero();
    }

    let mut result = BigUint::one();
    let mut base = base % modulus;
    let mut exp = exp.clone();

    while !exp.is_zero() {
        if exp.is_odd() {
            result = (&result * &base) % modulus;
        }
        base = (&base * &base) % modulus;
        exp >>= 1;
    }

    result
}

/// Extended Euclidean Algorithm over signed integers
/// Returns (gcd, x, y) such that a*x + b*y = gcd(a, b)
fn extended_gcd(a: &BigInt, b: &BigInt) -> (BigInt, BigInt, BigInt) {
    if b.is_zero() {
        return (a.clone(), BigInt::one(), BigInt::zero());
    }

    let (gcd, x1, y1) = extended_gcd(b, &(a % b));
    let x = y1.clone();
    let y = x1 - (a / b) * y1;

    (gcd, x, y)
}

/// Compute the modular inverse a^(-1) mod m.
/// Fails with `NoInverse` when gcd(a, m) != 1.
pub fn mod_inverse(a: &BigUint, m: &BigUint) -> CryptoResult<BigUint> {
    let a_signed = BigInt::from(a.clone());
    let m_signed = BigInt::from(m.clone());
    let (gcd, x, _) = extended_gcd(&a_signed, &m_signed);

    if !gcd.is_one() {
        return Err(CryptoError::NoInverse);
    }

    // mod_floor keeps the result in [0, m)
    let inverse = x.mod_floor(&m_signed);
    Ok(inverse.magnitude().clone())
}

/// Greatest common divisor
pub fn gcd(a: &BigUint, b: &BigUint) -> BigUint {
    a.gcd(b)
}

/// Miller-Rabin primality test
/// Returns true if n is probably prime
pub fn is_probable_prime(n: &BigUint, iterations: u32) -> bool {
    if n < &BigUint::from(2u8) {
        return false;
    }
    if n == &BigUint::from(2u8) || n == &BigUint::from(3u8) {
        return true;
    }
    if n.is_even() {
        return false;
    }

    // Write n-1 as d * 2^s with d odd
    let mut d = n.clone() - 1u8;
    let mut s = 0u32;
    while d.is_even() {
        d >>= 1;
        s += 1;
    }

    // Witness loop
    let mut rng = thread_rng();
    let two = BigUint::from(2u8);
    let n_minus_two = n - &two;

    for _ in 0..iterations {
        let a = rng.gen_biguint_range(&two, &n_minus_two);
        let mut x = mod_pow(&a, &d, n);

        if x.is_one() || x == n - 1u8 {
            continue;
        }

        let mut witnessed = false;
        for _ in 1..s {
            x = mod_pow(&x, &two, n);
            if x == n - 1u8 {
                witnessed = true;
                break;
            }
        }

        if !witnessed {
            // Composite
            return false;
        }
    }

    true
}

/// Number of Miller-Rabin witnesses used for key generation.
pub const PRIME_TEST_ROUNDS: u32 = 10;

/// Generate a random probable prime of the given bit length
pub fn random_prime(bit_length: u32) -> BigUint {
    let mut rng = thread_rng();
    let lower = BigUint::one() << (bit_length - 1);
    let upper = (BigUint::one() << bit_length) - 1u8;

    loop {
        let mut candidate = rng.gen_biguint_range(&lower, &upper);

        // Make it odd
        if candidate.is_even() {
            candidate += 1u8;
        }

        if is_probable_prime(&candidate, PRIME_TEST_ROUNDS) {
            return candidate;
        }
    }
}

/// Draw a uniformly random integer in the inclusive range [low, high]
pub fn random_in_range(low: &BigUint, high: &BigUint) -> BigUint {
    let mut rng = thread_rng();
    rng.gen_biguint_range(low, &(high + 1u8))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn big(n: u64) -> BigUint {
        BigUint::from(n)
    }

    #[test]
    fn test_mod_pow() {
        // 3^5 mod 7 = 243 mod 7 = 5
        assert_eq!(mod_pow(&big(3), &big(5), &big(7)), big(5));
        // Anything mod 1 is 0
        assert_eq!(mod_pow(&big(12), &big(34), &big(1)), big(0));
        // x^0 = 1
        assert_eq!(mod_pow(&big(9), &big(0), &big(13)), big(1));
    }

    #[test]
    fn test_mod_inverse() {
        // 3 * 5 = 15 ≡ 1 mod 7
        let inv = mod_inverse(&big(3), &big(7)).unwrap();
        assert_eq!(inv, big(5));
        assert_eq!((big(3) * inv) % big(7), big(1));
    }

    #[test]
    fn test_mod_inverse_missing() {
        // gcd(6, 9) = 3, no inverse
        let result = mod_inverse(&big(6), &big(9));
        assert!(matches!(result, Err(CryptoError::NoInverse)));
    }

    #[test]
    fn test_gcd() {
        assert_eq!(gcd(&big(12), &big(18)), big(6));
        assert_eq!(gcd(&big(17), &big(31)), big(1));
    }

    #[test]
    fn test_is_probable_prime() {
        assert!(is_probable_prime(&big(2), 5));
        assert!(is_probable_prime(&big(3), 5));
        assert!(is_probable_prime(&big(97), 5));
        assert!(!is_probable_prime(&big(1), 5));
        assert!(!is_probable_prime(&big(4), 5));
        assert!(!is_probable_prime(&big(561), 5)); // Carmichael number
    }

    #[test]
    fn test_random_prime_bit_length() {
        let p = random_prime(64);
        assert_eq!(p.bits(), 64);
        assert!(is_probable_prime(&p, 10));
    }

    #[test]
    fn test_random_in_range_inclusive() {
        // Degenerate range can only produce its single member
        assert_eq!(random_in_range(&big(7), &big(7)), big(7));
        for _ in 0..50 {
            let v = random_in_range(&big(2), &big(5));
            assert!(v >= big(2) && v <= big(5));
        }
    }

    #[test]
    fn test_byte_conversion() {
        let n = big(0x01_02_03);
        assert_eq!(to_bytes_be(&n), vec![1, 2, 3]);
        assert_eq!(from_bytes_be(&[1, 2, 3]), n);

        // Zero encodes minimally as no bytes at all
        assert_eq!(to_bytes_be(&big(0)), Vec::<u8>::new());
        assert_eq!(from_bytes_be(&[]), big(0));
    }

    #[test]
    fn test_padded_conversion() {
        let n = big(0x01_02);
        assert_eq!(to_bytes_be_padded(&n, 4), vec![0, 0, 1, 2]);
        assert_eq!(to_bytes_be_padded(&big(0), 3), vec![0, 0, 0]);
    }
}
