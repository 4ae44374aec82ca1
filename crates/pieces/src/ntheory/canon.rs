//! Numbers in canonical form.
//!
//! A [`Canon`] stores a positive integer as its prime powers. Products,
//! powers, divisibility and divisors work on the powers directly, so values
//! far past `u64::MAX` are fine. Products and powers fail with `Overflow`
//! only when an exponent leaves `u32`; [`Canon::value`] fails when the
//! integer leaves `u64`.
//!
//! ```
//! use pieces::ntheory::Canon;
//!
//! let a = Canon::factorize(12)?;
//! let b = Canon::factorize(18)?;
//! assert_eq!(a.checked_mul(&b)?.value()?, 216);
//! assert_eq!(a.get(2), 2);
//! assert!(Canon::factorize(36)?.is_divisible_by(&a));
//! # Ok::<(), pieces::NtheoryError>(())
//! ```

use std::cmp::Ordering;
use std::fmt;

use crate::error::{NtheoryError, Result};

use super::factorization::{defactorize, factorize, PrimePowers};

/// Keep entries with `prime > 1` and `power > 0`, ascending by prime
pub fn normalize(prime_powers: impl IntoIterator<Item = (u64, u32)>) -> PrimePowers {
    prime_powers
        .into_iter()
        .filter(|&(p, k)| p > 1 && k > 0)
        .collect()
}

/// Positive integer as prime powers
///
/// Keys are expected to be primes. Two values are equal when their prime
/// powers are equal; ordering follows the integer value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Canon {
    prime_powers: PrimePowers,
}

impl Canon {
    pub fn new(prime_powers: impl IntoIterator<Item = (u64, u32)>) -> Self {
        Self {
            prime_powers: normalize(prime_powers),
        }
    }

    /// The number 1
    pub fn unit() -> Self {
        Self::default()
    }

    pub fn factorize(n: u64) -> Result<Self> {
        Ok(Self {
            prime_powers: factorize(n)?,
        })
    }

    /// Power of `prime`, 0 when absent
    pub fn get(&self, prime: u64) -> u32 {
        self.prime_powers.get(&prime).copied().unwrap_or(0)
    }

    pub fn contains(&self, prime: u64) -> bool {
        self.prime_powers.contains_key(&prime)
    }

    pub fn primes(&self) -> impl Iterator<Item = u64> + '_ {
        self.prime_powers.keys().copied()
    }

    /// Powers in the order of [`Canon::primes`]
    pub fn powers(&self) -> impl Iterator<Item = u32> + '_ {
        self.prime_powers.values().copied()
    }

    pub fn prime_powers(&self) -> &PrimePowers {
        &self.prime_powers
    }

    /// Integer value, or `Overflow` past `u64::MAX`
    pub fn value(&self) -> Result<u64> {
        defactorize(&self.prime_powers)
    }

    /// All divisors, the power of the first prime varying slowest
    ///
    /// ```
    /// use pieces::ntheory::Canon;
    ///
    /// let values: Vec<u64> = Canon::factorize(12)?
    ///     .divisors()
    ///     .iter()
    ///     .map(|d| d.value())
    ///     .collect::<Result<_, _>>()?;
    /// assert_eq!(values, vec![1, 3, 2, 6, 4, 12]);
    /// # Ok::<(), pieces::NtheoryError>(())
    /// ```
    pub fn divisors(&self) -> Vec<Canon> {
        let mut divisors = vec![Canon::unit()];
        for (&p, &k) in self.prime_powers.iter().rev() {
            divisors = (0..=k)
                .flat_map(|j| {
                    divisors.iter().map(move |d| {
                        let mut pp = d.prime_powers.clone();
                        if j > 0 {
                            pp.insert(p, j);
                        }
                        Canon { prime_powers: pp }
                    })
                })
                .collect();
        }
        divisors
    }

    pub fn is_unit(&self) -> bool {
        self.prime_powers.is_empty()
    }

    pub fn is_prime_power(&self) -> bool {
        self.prime_powers.len() == 1
    }

    pub fn is_prime(&self) -> bool {
        self.is_prime_power() && self.powers().all(|k| k == 1)
    }

    pub fn is_composite(&self) -> bool {
        !self.is_unit() && !self.is_prime()
    }

    pub fn is_divisible_by(&self, divisor: &Canon) -> bool {
        divisor
            .prime_powers
            .iter()
            .all(|(&p, &k)| self.get(p) >= k)
    }

    /// `self * rhs`, or `Overflow` when an exponent passes `u32::MAX`
    pub fn checked_mul(&self, rhs: &Canon) -> Result<Canon> {
        let mut prime_powers = self.prime_powers.clone();
        for (&p, &k) in &rhs.prime_powers {
            let e = prime_powers.entry(p).or_insert(0);
            *e = e.checked_add(k).ok_or_else(|| exponent_overflow(p))?;
        }
        Ok(Canon { prime_powers })
    }

    /// `self^k`, or `Overflow` when an exponent passes `u32::MAX`
    pub fn pow(&self, k: u32) -> Result<Canon> {
        let mut prime_powers = PrimePowers::new();
        for (&p, &e) in &self.prime_powers {
            let power = e.checked_mul(k).ok_or_else(|| exponent_overflow(p))?;
            prime_powers.insert(p, power);
        }
        Ok(Canon::new(prime_powers))
    }

    /// `self / divisor`, or `NotDivisible`
    pub fn checked_div(&self, divisor: &Canon) -> Result<Canon> {
        if !self.is_divisible_by(divisor) {
            return Err(NtheoryError::NotDivisible {
                dividend: self.to_string(),
                divisor: divisor.to_string(),
            });
        }
        Ok(self.cofactor(divisor))
    }

    /// `self / divisor` for a known divisor
    pub(crate) fn cofactor(&self, divisor: &Canon) -> Canon {
        Canon::new(
            self.prime_powers
                .iter()
                .map(|(&p, &k)| (p, k.saturating_sub(divisor.get(p)))),
        )
    }

    /// Combine the powers of every prime in either operand
    pub(crate) fn merge(&self, other: &Canon, f: impl Fn(u32, u32) -> u32) -> Canon {
        let primes = self.primes().chain(other.primes());
        Canon::new(primes.map(|p| (p, f(self.get(p), other.get(p)))))
    }

    /// Exact value when it fits in 128 bits
    fn wide_value(&self) -> Option<u128> {
        self.prime_powers
            .iter()
            .try_fold(1u128, |acc, (&p, &k)| {
                (p as u128).checked_pow(k).and_then(|pk| acc.checked_mul(pk))
            })
    }

    fn ln(&self) -> f64 {
        self.prime_powers
            .iter()
            .map(|(&p, &k)| k as f64 * (p as f64).ln())
            .sum()
    }
}

impl Ord for Canon {
    fn cmp(&self, other: &Self) -> Ordering {
        let by_value = match (self.wide_value(), other.wide_value()) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.ln().total_cmp(&other.ln()),
        };
        // ties only arise from non-prime keys
        by_value.then_with(|| self.prime_powers.iter().cmp(other.prime_powers.iter()))
    }
}

impl PartialOrd for Canon {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn exponent_overflow(prime: u64) -> NtheoryError {
    NtheoryError::Overflow {
        what: format!("exponent of {prime}"),
    }
}

impl FromIterator<(u64, u32)> for Canon {
    fn from_iter<I: IntoIterator<Item = (u64, u32)>>(iter: I) -> Self {
        Canon::new(iter)
    }
}

impl fmt::Display for Canon {
    /// `2^3 * 3^2`, or `1` for the unit
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unit() {
            return f.write_str("1");
        }
        for (i, (p, k)) in self.prime_powers.iter().enumerate() {
            if i > 0 {
                f.write_str(" * ")?;
            }
            if *k == 1 {
                write!(f, "{p}")?;
            } else {
                write!(f, "{p}^{k}")?;
            }
        }
        Ok(())
    }
}
