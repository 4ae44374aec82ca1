//! Prime tables.
//!
//! A prime table holds every prime not exceeding its `limit`. It grows on
//! demand: every query first extends the table up to the queried number.
//! The table never grows past [`MAX_TABLE_LIMIT`]; queries above it return
//! `OutOfBounds`.
//!
//! ```
//! use pieces::ntheory::primes::{is_prime, pi, primes};
//!
//! assert_eq!(primes(10)?, vec![2, 3, 5, 7]);
//! assert!(is_prime(5)?);
//! assert_eq!(pi(10.0)?, 4);
//! assert!(is_prime(u64::MAX).is_err());
//! # Ok::<(), pieces::NtheoryError>(())
//! ```

use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::info;

use crate::checks::check_bounds;
use crate::error::{NtheoryError, Result};

/// Largest table limit; the sieve holds one byte per number up to it
pub const MAX_TABLE_LIMIT: u64 = 1 << 28;

/// Primes not exceeding `limit`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrimeTable {
    limit: u64,
    primes: Vec<u64>,
}

impl PrimeTable {
    /// Empty table
    pub const fn new() -> Self {
        Self {
            limit: 0,
            primes: Vec::new(),
        }
    }

    /// Every prime `<= limit` is in the table
    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// Extend the table to cover `n`. Smaller `n` leave it untouched.
    ///
    /// # Errors
    /// `OutOfBounds` when `n` exceeds [`MAX_TABLE_LIMIT`].
    pub fn extend(&mut self, n: u64) -> Result<()> {
        if n > self.limit {
            let primes = sieve(n)?;
            info!(limit = n, "Recalculate prime table");
            self.primes = primes;
            self.limit = n;
        }
        Ok(())
    }

    pub fn reset(&mut self) {
        self.limit = 0;
        self.primes.clear();
    }

    /// Primes not exceeding `n`
    pub fn primes(&mut self, n: u64) -> Result<Vec<u64>> {
        self.extend(n)?;
        let end = self.primes.partition_point(|&p| p <= n);
        Ok(self.primes[..end].to_vec())
    }

    /// Prime-counting function: number of primes `<= x`
    ///
    /// Negative `x` counts no primes.
    pub fn pi(&mut self, x: f64) -> Result<usize> {
        let n = if x.is_nan() || x < 0.0 {
            0
        } else {
            // saturates, so infinity lands above the table limit
            x.floor() as u64
        };
        self.extend(n)?;
        Ok(self.primes.partition_point(|&p| p <= n))
    }

    pub fn is_prime(&mut self, n: u64) -> Result<bool> {
        self.extend(n)?;
        Ok(self.primes.binary_search(&n).is_ok())
    }
}

/// Sieve of Eratosthenes: primes not exceeding `n`, ascending.
///
/// ```
/// assert_eq!(pieces::ntheory::primes::sieve(10)?, vec![2, 3, 5, 7]);
/// assert!(pieces::ntheory::primes::sieve(1)?.is_empty());
/// # Ok::<(), pieces::NtheoryError>(())
/// ```
///
/// # Errors
/// `OutOfBounds` when `n` exceeds [`MAX_TABLE_LIMIT`].
pub fn sieve(n: u64) -> Result<Vec<u64>> {
    check_bounds(n, 0, MAX_TABLE_LIMIT)?;
    if n < 2 {
        return Ok(Vec::new());
    }
    let len = usize::try_from(n)
        .ok()
        .and_then(|n| n.checked_add(1))
        .ok_or_else(|| NtheoryError::Overflow {
            what: format!("sieve length for {n}"),
        })?;
    let mut marks = vec![true; len];
    marks[0] = false;
    marks[1] = false;

    let mut p = 2usize;
    while p * p < len {
        if marks[p] {
            // odd multiples of an odd p: even ones were struck by 2
            let step = if p == 2 { 2 } else { 2 * p };
            let mut i = p * p;
            while i < len {
                marks[i] = false;
                i += step;
            }
        }
        p += 1;
    }

    Ok(marks
        .iter()
        .enumerate()
        .filter(|(_, &prime)| prime)
        .map(|(i, _)| i as u64)
        .collect())
}

static TABLE: Mutex<PrimeTable> = Mutex::new(PrimeTable::new());

fn table() -> MutexGuard<'static, PrimeTable> {
    TABLE.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Primes not exceeding `n`, from the process-wide table
pub fn primes(n: u64) -> Result<Vec<u64>> {
    table().primes(n)
}

/// Number of primes not exceeding `x`, from the process-wide table
pub fn pi(x: f64) -> Result<usize> {
    table().pi(x)
}

pub fn is_prime(n: u64) -> Result<bool> {
    table().is_prime(n)
}

pub fn extend_prime_table(n: u64) -> Result<()> {
    table().extend(n)
}

pub fn reset_prime_table() {
    table().reset();
}

/// Current limit of the process-wide table
pub fn prime_table_limit() -> u64 {
    table().limit()
}
