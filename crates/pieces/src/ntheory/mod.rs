//! Elementary number theory.
//!
//! ```
//! use pieces::ntheory::{init_session, factorize, pi};
//!
//! init_session(None)?;
//! assert_eq!(pi(1000.0)?, 168);
//! assert_eq!(factorize(999_983 * 7)?.len(), 2);
//! # Ok::<(), pieces::NtheoryError>(())
//! ```

pub mod canon;
pub mod factorization;
pub mod functions;
pub mod primes;

pub use canon::{normalize, Canon};
pub use factorization::{defactorize, factorize, pvaluation, PrimePowers};
pub use functions::{
    big_omega, d, divisors, gcd, identity, lcm, liouville, little_omega, mangoldt, mobius,
    natural, power, sigma, sigma_k, tau, totient, totient_inverse, unit, ArithmeticFunction,
    Category, Function, EQ_SIZE,
};
pub use primes::{
    extend_prime_table, is_prime, pi, prime_table_limit, primes, reset_prime_table, sieve,
    PrimeTable, MAX_TABLE_LIMIT,
};

use crate::error::Result;

/// Table size used by [`init_session`] when no bound is given
pub const DEFAULT_SESSION_LIMIT: u64 = 1000;

/// Pre-extend the process-wide prime table to `max_number`, or to
/// [`DEFAULT_SESSION_LIMIT`].
///
/// Factorizing anything up to `max_number²` then needs no recalculation.
pub fn init_session(max_number: Option<u64>) -> Result<()> {
    extend_prime_table(max_number.unwrap_or(DEFAULT_SESSION_LIMIT))
}
