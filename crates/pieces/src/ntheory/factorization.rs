//! Integer factorization.
//!
//! Factorization maps a positive integer to its prime powers, ascending by
//! prime. [`Canon`](super::canon::Canon) wraps the same map with arithmetic.
//!
//! ```
//! use std::collections::BTreeMap;
//! use pieces::ntheory::{defactorize, factorize};
//!
//! let pp = factorize(72)?;
//! assert_eq!(pp, BTreeMap::from([(2, 3), (3, 2)]));
//! assert_eq!(defactorize(&pp)?, 72);
//! # Ok::<(), pieces::NtheoryError>(())
//! ```
//!
//! Trial division uses the process-wide prime table, extending it to
//! `sqrt(n)`. Extension recomputes the whole table, so factorizing many
//! numbers is faster after one explicit extension:
//!
//! ```
//! use pieces::ntheory::{extend_prime_table, factorize};
//!
//! extend_prime_table(1000)?; // enough for every n <= 1_000_000
//! let count = (1..2000u64)
//!     .filter(|&n| factorize(n).map_or(false, |pp| pp.len() == 1))
//!     .count();
//! assert!(count > 0);
//! # Ok::<(), pieces::NtheoryError>(())
//! ```

use std::collections::BTreeMap;

use crate::checks::{check_bounds, check_positive};
use crate::error::{NtheoryError, Result};

use super::primes::primes;

/// Prime → power, ascending by prime
pub type PrimePowers = BTreeMap<u64, u32>;

/// Trial divisors beyond this bound are not taken from the prime table
const TABLE_DIVISOR_LIMIT: u64 = 1 << 20;

/// Largest `k` such that `p^k` divides `a`
///
/// ```
/// assert_eq!(pieces::ntheory::pvaluation(2u64.pow(3) * 35, 2).unwrap(), 3);
/// ```
pub fn pvaluation(a: u64, p: u64) -> Result<u32> {
    check_positive(a)?;
    check_bounds(p, 2, u64::MAX)?;
    Ok(div_max_power(a, p).1)
}

/// `(a / p^k, k)` for the largest such `k`
fn div_max_power(mut a: u64, p: u64) -> (u64, u32) {
    let mut k = 0;
    while a % p == 0 {
        k += 1;
        a /= p;
    }
    (a, k)
}

/// Prime powers of `n`. `1` has none; `0` is an error.
pub fn factorize(n: u64) -> Result<PrimePowers> {
    check_positive(n)?;

    let mut rest = n;
    let mut powers = PrimePowers::new();
    let root = isqrt(n);

    for p in primes(root.min(TABLE_DIVISOR_LIMIT))? {
        if p * p > rest {
            break;
        }
        let (q, k) = div_max_power(rest, p);
        if k > 0 {
            powers.insert(p, k);
            rest = q;
        }
    }

    // Odd trial divisors past the table for very large n
    if root > TABLE_DIVISOR_LIMIT {
        let mut d = TABLE_DIVISOR_LIMIT + 1;
        while d.checked_mul(d).is_some_and(|sq| sq <= rest) {
            let (q, k) = div_max_power(rest, d);
            if k > 0 {
                powers.insert(d, k);
                rest = q;
            }
            d += 2;
        }
    }

    if rest > 1 {
        powers.insert(rest, 1);
    }
    Ok(powers)
}

/// Inverse of [`factorize`]: the product of `p^k`
pub fn defactorize(prime_powers: &PrimePowers) -> Result<u64> {
    prime_powers.iter().try_fold(1u64, |acc, (&p, &k)| {
        p.checked_pow(k)
            .and_then(|pk| acc.checked_mul(pk))
            .ok_or_else(|| NtheoryError::Overflow {
                what: format!("defactorize({prime_powers:?})"),
            })
    })
}

/// Floor of the square root
pub(crate) fn isqrt(n: u64) -> u64 {
    let mut r = (n as f64).sqrt() as u64;
    while r.checked_mul(r).map_or(true, |sq| sq > n) {
        r -= 1;
    }
    while (r + 1).checked_mul(r + 1).is_some_and(|sq| sq <= n) {
        r += 1;
    }
    r
}
