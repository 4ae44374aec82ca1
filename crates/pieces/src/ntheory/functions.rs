//! Arithmetic functions.
//!
//! An arithmetic function maps positive integers to numbers. [`Function`] is
//! a cheap, cloneable handle over any [`ArithmeticFunction`] and carries the
//! algebra:
//!
//! - `f * g` is the Dirichlet product `(f * g)(n) = Σ f(d) g(n/d)` over `d | n`
//! - [`Function::pointwise`] is the usual product `f(n) g(n)`
//! - [`Function::inverse`] is the Dirichlet inverse, with [`identity`] as unit
//! - [`Function::pow`] takes integer powers, negative ones through the inverse
//!
//! Two functions compare equal when they agree on `1..EQ_SIZE`.
//!
//! ```
//! use pieces::ntheory::{identity, mobius, tau, totient, totient_inverse, unit};
//!
//! assert_eq!(totient().call(10)?, 4.0);
//! assert_eq!(mobius().formula(), "μ");
//! assert!(mobius() * unit() == identity());
//! assert!(unit() * unit() == tau());
//! assert!(totient().inverse()? == totient_inverse());
//! # Ok::<(), pieces::NtheoryError>(())
//! ```

use std::collections::HashMap;
use std::fmt;
use std::ops::Mul;
use std::sync::Arc;

use crate::checks::check_positive;
use crate::error::{NtheoryError, Result};

use super::canon::Canon;

/// Equality compares values on `1..EQ_SIZE`
pub const EQ_SIZE: u64 = 100;

const TOLERANCE: f64 = 1e-9;

/// How a function behaves on coprime arguments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// `f(mn) = f(m) f(n)` for coprime `m`, `n`
    Multiplicative,
    /// `f(mn) = f(m) + f(n)` for coprime `m`, `n`
    Additive,
    /// `f(mn) = f(m) f(n)` for all `m`, `n`
    CompletelyMultiplicative,
    /// `f(mn) = f(m) + f(n)` for all `m`, `n`
    CompletelyAdditive,
    Neither,
}

impl Category {
    pub fn is_multiplicative(self) -> bool {
        matches!(self, Self::Multiplicative | Self::CompletelyMultiplicative)
    }

    pub fn is_additive(self) -> bool {
        matches!(self, Self::Additive | Self::CompletelyAdditive)
    }

    pub fn is_completely_multiplicative(self) -> bool {
        self == Self::CompletelyMultiplicative
    }

    pub fn is_completely_additive(self) -> bool {
        self == Self::CompletelyAdditive
    }
}

/// An arithmetic function
///
/// Implementors provide values on canonical forms; [`Function`] adds the
/// algebra on top.
pub trait ArithmeticFunction: Send + Sync {
    /// Symbolic formula, e.g. `φ` or `(μ * u)`
    fn formula(&self) -> String;

    fn category(&self) -> Category {
        Category::Neither
    }

    fn call_on_canon(&self, n: &Canon) -> f64;

    fn call_on_int(&self, n: u64) -> Result<f64> {
        Ok(self.call_on_canon(&Canon::factorize(n)?))
    }

    /// Closed-form Dirichlet inverse, when one is known
    fn dirichlet_inverse(&self) -> Result<Option<Function>> {
        Ok(None)
    }

    /// True only for the unit of the Dirichlet product
    fn is_dirichlet_identity(&self) -> bool {
        false
    }
}

/// Shared handle to an arithmetic function
#[derive(Clone)]
pub struct Function(Arc<dyn ArithmeticFunction>);

impl Function {
    pub fn new(f: impl ArithmeticFunction + 'static) -> Self {
        Self(Arc::new(f))
    }

    pub fn formula(&self) -> String {
        self.0.formula()
    }

    pub fn category(&self) -> Category {
        self.0.category()
    }

    pub fn is_multiplicative(&self) -> bool {
        self.category().is_multiplicative()
    }

    pub fn is_additive(&self) -> bool {
        self.category().is_additive()
    }

    pub fn is_completely_multiplicative(&self) -> bool {
        self.category().is_completely_multiplicative()
    }

    pub fn is_completely_additive(&self) -> bool {
        self.category().is_completely_additive()
    }

    /// Value at `n`; `0` is an error
    pub fn call(&self, n: u64) -> Result<f64> {
        self.0.call_on_int(n)
    }

    pub fn call_canon(&self, n: &Canon) -> f64 {
        self.0.call_on_canon(n)
    }

    /// Dirichlet product `self * g`
    pub fn dirichlet(&self, g: &Function) -> Function {
        if self.0.is_dirichlet_identity() {
            return g.clone();
        }
        if g.0.is_dirichlet_identity() {
            return self.clone();
        }
        Function::new(DirichletProduct {
            f: self.clone(),
            g: g.clone(),
        })
    }

    /// Pointwise product `n ↦ self(n) g(n)`
    pub fn pointwise(&self, g: &Function) -> Function {
        Function::new(PointwiseProduct {
            f: self.clone(),
            g: g.clone(),
        })
    }

    /// Dirichlet inverse
    ///
    /// Closed forms are used where known. A completely multiplicative `f`
    /// inverts to `μ·f`. Anything else gets the recursive inverse, which
    /// exists only when `f(1) ≠ 0`.
    ///
    /// ```
    /// use pieces::ntheory::{little_omega, mobius, unit};
    ///
    /// assert!(unit().inverse()? == mobius());
    /// assert!(little_omega().inverse().is_err());
    /// # Ok::<(), pieces::NtheoryError>(())
    /// ```
    pub fn inverse(&self) -> Result<Function> {
        if let Some(inverse) = self.0.dirichlet_inverse()? {
            return Ok(inverse);
        }
        if self.is_completely_multiplicative() {
            return Ok(mobius().pointwise(self));
        }
        if self.call_canon(&Canon::unit()) == 0.0 {
            return Err(NtheoryError::NotInvertible {
                function: self.formula(),
            });
        }
        Ok(Function::new(DirichletInverse { f: self.clone() }))
    }

    /// Dirichlet power; `f^0` is [`identity`]
    pub fn pow(&self, k: i32) -> Result<Function> {
        let base = if k < 0 { self.inverse()? } else { self.clone() };
        let steps = 0..k.unsigned_abs();
        Ok(steps.fold(identity(), |acc, _| acc.dirichlet(&base)))
    }

    /// Agreement on `1..EQ_SIZE`
    pub fn equals(&self, other: &Function) -> bool {
        if Arc::ptr_eq(&self.0, &other.0) {
            return true;
        }
        (1..EQ_SIZE).all(|n| match (self.call(n), other.call(n)) {
            (Ok(a), Ok(b)) => approx_eq(a, b),
            _ => false,
        })
    }
}

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= TOLERANCE * a.abs().max(b.abs()).max(1.0)
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl Mul for Function {
    type Output = Function;

    fn mul(self, rhs: Function) -> Function {
        self.dirichlet(&rhs)
    }
}

impl Mul<&Function> for &Function {
    type Output = Function;

    fn mul(self, rhs: &Function) -> Function {
        self.dirichlet(rhs)
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.formula())
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Function").field(&self.formula()).finish()
    }
}

struct DirichletProduct {
    f: Function,
    g: Function,
}

impl ArithmeticFunction for DirichletProduct {
    fn formula(&self) -> String {
        format!("({} * {})", self.f, self.g)
    }

    fn category(&self) -> Category {
        if self.f.is_multiplicative() && self.g.is_multiplicative() {
            Category::Multiplicative
        } else {
            Category::Neither
        }
    }

    fn call_on_canon(&self, n: &Canon) -> f64 {
        n.divisors()
            .iter()
            .map(|d| self.f.call_canon(d) * self.g.call_canon(&n.cofactor(d)))
            .sum()
    }

    fn dirichlet_inverse(&self) -> Result<Option<Function>> {
        Ok(Some(self.f.inverse()?.dirichlet(&self.g.inverse()?)))
    }
}

struct PointwiseProduct {
    f: Function,
    g: Function,
}

impl ArithmeticFunction for PointwiseProduct {
    fn formula(&self) -> String {
        format!("({} · {})", self.f, self.g)
    }

    fn category(&self) -> Category {
        let (f, g) = (self.f.category(), self.g.category());
        if f.is_completely_multiplicative() && g.is_completely_multiplicative() {
            Category::CompletelyMultiplicative
        } else if f.is_multiplicative() && g.is_multiplicative() {
            Category::Multiplicative
        } else {
            Category::Neither
        }
    }

    fn call_on_canon(&self, n: &Canon) -> f64 {
        self.f.call_canon(n) * self.g.call_canon(n)
    }

    fn call_on_int(&self, n: u64) -> Result<f64> {
        Ok(self.f.call(n)? * self.g.call(n)?)
    }
}

/// Recursive inverse: `f⁻¹(1) = 1/f(1)`,
/// `f⁻¹(n) = -1/f(1) Σ f(n/d) f⁻¹(d)` over proper divisors `d`
struct DirichletInverse {
    f: Function,
}

impl DirichletInverse {
    fn invert(&self, n: &Canon, f1: f64, memo: &mut HashMap<Canon, f64>) -> f64 {
        if n.is_unit() {
            return 1.0 / f1;
        }
        if let Some(value) = memo.get(n) {
            return *value;
        }
        let sum: f64 = n
            .divisors()
            .iter()
            .filter(|d| *d != n)
            .map(|d| self.f.call_canon(&n.cofactor(d)) * self.invert(d, f1, memo))
            .sum();
        let value = -sum / f1;
        memo.insert(n.clone(), value);
        value
    }
}

impl ArithmeticFunction for DirichletInverse {
    fn formula(&self) -> String {
        format!("{}^-1", self.f)
    }

    fn category(&self) -> Category {
        if self.f.is_multiplicative() {
            Category::Multiplicative
        } else {
            Category::Neither
        }
    }

    fn call_on_canon(&self, n: &Canon) -> f64 {
        let f1 = self.f.call_canon(&Canon::unit());
        self.invert(n, f1, &mut HashMap::new())
    }

    fn dirichlet_inverse(&self) -> Result<Option<Function>> {
        Ok(Some(self.f.clone()))
    }
}

/// Function given by its values on prime powers `p^k`, `k > 0`.
///
/// Multiplicative kinds take the product over the factorization, additive
/// kinds the sum.
struct PrimePowerFunction {
    symbol: &'static str,
    category: Category,
    on_prime_power: fn(u64, u32) -> f64,
    inverse: Option<fn() -> Function>,
}

impl ArithmeticFunction for PrimePowerFunction {
    fn formula(&self) -> String {
        self.symbol.to_string()
    }

    fn category(&self) -> Category {
        self.category
    }

    fn call_on_canon(&self, n: &Canon) -> f64 {
        let values = n
            .prime_powers()
            .iter()
            .map(|(&p, &k)| (self.on_prime_power)(p, k));
        if self.category.is_additive() {
            values.sum()
        } else {
            values.product()
        }
    }

    fn dirichlet_inverse(&self) -> Result<Option<Function>> {
        Ok(self.inverse.map(|inverse| inverse()))
    }
}

struct PowerFunction {
    k: u32,
}

impl ArithmeticFunction for PowerFunction {
    fn formula(&self) -> String {
        if self.k == 1 {
            "N".to_string()
        } else {
            format!("N^{}", self.k)
        }
    }

    fn category(&self) -> Category {
        Category::CompletelyMultiplicative
    }

    fn call_on_canon(&self, n: &Canon) -> f64 {
        n.prime_powers()
            .iter()
            .map(|(&p, &e)| (p as f64).powf(f64::from(e) * f64::from(self.k)))
            .product()
    }

    fn call_on_int(&self, n: u64) -> Result<f64> {
        check_positive(n)?;
        Ok((n as f64).powf(f64::from(self.k)))
    }
}

struct DivisorSum {
    k: u32,
}

impl ArithmeticFunction for DivisorSum {
    fn formula(&self) -> String {
        if self.k == 1 {
            "σ".to_string()
        } else {
            format!("σ_{}", self.k)
        }
    }

    fn category(&self) -> Category {
        Category::Multiplicative
    }

    fn call_on_canon(&self, n: &Canon) -> f64 {
        n.prime_powers()
            .iter()
            .map(|(&p, &a)| {
                let pk = (p as f64).powf(f64::from(self.k));
                (0..=a).map(|j| pk.powf(f64::from(j))).sum::<f64>()
            })
            .product()
    }

    fn dirichlet_inverse(&self) -> Result<Option<Function>> {
        let twisted = mobius().pointwise(&power(self.k));
        Ok(Some(twisted.dirichlet(&mobius())))
    }
}

struct Identity;

impl ArithmeticFunction for Identity {
    fn formula(&self) -> String {
        "I".to_string()
    }

    fn category(&self) -> Category {
        Category::CompletelyMultiplicative
    }

    fn call_on_canon(&self, n: &Canon) -> f64 {
        if n.is_unit() {
            1.0
        } else {
            0.0
        }
    }

    fn call_on_int(&self, n: u64) -> Result<f64> {
        check_positive(n)?;
        Ok(if n == 1 { 1.0 } else { 0.0 })
    }

    fn dirichlet_inverse(&self) -> Result<Option<Function>> {
        Ok(Some(identity()))
    }

    fn is_dirichlet_identity(&self) -> bool {
        true
    }
}

struct Unit;

impl ArithmeticFunction for Unit {
    fn formula(&self) -> String {
        "u".to_string()
    }

    fn category(&self) -> Category {
        Category::CompletelyMultiplicative
    }

    fn call_on_canon(&self, _: &Canon) -> f64 {
        1.0
    }

    fn call_on_int(&self, n: u64) -> Result<f64> {
        check_positive(n)?;
        Ok(1.0)
    }

    fn dirichlet_inverse(&self) -> Result<Option<Function>> {
        Ok(Some(mobius()))
    }
}

struct Mangoldt;

impl ArithmeticFunction for Mangoldt {
    fn formula(&self) -> String {
        "Λ".to_string()
    }

    fn call_on_canon(&self, n: &Canon) -> f64 {
        match n.primes().next() {
            Some(p) if n.is_prime_power() => (p as f64).ln(),
            _ => 0.0,
        }
    }
}

/// Möbius function μ: `μ(p) = -1`, `μ(p^k) = 0` for `k > 1`
///
/// ```
/// assert_eq!(pieces::ntheory::mobius().call(10).unwrap(), 1.0);
/// ```
pub fn mobius() -> Function {
    Function::new(PrimePowerFunction {
        symbol: "μ",
        category: Category::Multiplicative,
        on_prime_power: |_, k| if k > 1 { 0.0 } else { -1.0 },
        inverse: Some(unit),
    })
}

/// Euler's totient φ: `φ(p^k) = p^k - p^(k-1)`
pub fn totient() -> Function {
    Function::new(PrimePowerFunction {
        symbol: "φ",
        category: Category::Multiplicative,
        on_prime_power: |p, k| (p as f64).powf(f64::from(k - 1)) * (p as f64 - 1.0),
        inverse: Some(totient_inverse),
    })
}

/// Dirichlet inverse of φ: `p^k ↦ 1 - p`
pub fn totient_inverse() -> Function {
    Function::new(PrimePowerFunction {
        symbol: "φ^-1",
        category: Category::Multiplicative,
        on_prime_power: |p, _| 1.0 - p as f64,
        inverse: Some(totient),
    })
}

/// Distinct prime divisors ω
///
/// ```
/// assert_eq!(pieces::ntheory::little_omega().call(2u64.pow(5) * 9 * 7).unwrap(), 3.0);
/// ```
pub fn little_omega() -> Function {
    Function::new(PrimePowerFunction {
        symbol: "ω",
        category: Category::Additive,
        on_prime_power: |_, _| 1.0,
        inverse: None,
    })
}

/// Prime divisors with multiplicity Ω
///
/// ```
/// assert_eq!(pieces::ntheory::big_omega().call(8 * 25).unwrap(), 5.0);
/// ```
pub fn big_omega() -> Function {
    Function::new(PrimePowerFunction {
        symbol: "Ω",
        category: Category::CompletelyAdditive,
        on_prime_power: |_, k| f64::from(k),
        inverse: None,
    })
}

/// Unit of the Dirichlet product: `I(1) = 1`, else 0
pub fn identity() -> Function {
    Function::new(Identity)
}

/// Constant 1
pub fn unit() -> Function {
    Function::new(Unit)
}

/// `n ↦ n^k`
pub fn power(k: u32) -> Function {
    Function::new(PowerFunction { k })
}

/// `n ↦ n`
pub fn natural() -> Function {
    power(1)
}

/// Number of divisors τ
pub fn tau() -> Function {
    Function::new(PrimePowerFunction {
        symbol: "τ",
        category: Category::Multiplicative,
        on_prime_power: |_, k| f64::from(k) + 1.0,
        inverse: Some(|| mobius() * mobius()),
    })
}

/// Alias of [`tau`]
pub fn d() -> Function {
    tau()
}

/// Sum of divisors σ
///
/// ```
/// assert_eq!(pieces::ntheory::sigma().call(6).unwrap(), 12.0);
/// ```
pub fn sigma() -> Function {
    Function::new(DivisorSum { k: 1 })
}

/// Sum of `k`-th powers of divisors; `k` must be positive
pub fn sigma_k(k: u32) -> Result<Function> {
    Ok(Function::new(DivisorSum {
        k: check_positive(k)?,
    }))
}

/// Liouville λ: `(-1)^Ω(n)`
pub fn liouville() -> Function {
    Function::new(PrimePowerFunction {
        symbol: "λ",
        category: Category::CompletelyMultiplicative,
        on_prime_power: |_, k| if k % 2 == 0 { 1.0 } else { -1.0 },
        inverse: None,
    })
}

/// von Mangoldt Λ: `ln p` on prime powers, else 0
pub fn mangoldt() -> Function {
    Function::new(Mangoldt)
}

/// Divisors of `n`, ascending
///
/// ```
/// assert_eq!(pieces::ntheory::divisors(12).unwrap(), vec![1, 2, 3, 4, 6, 12]);
/// ```
pub fn divisors(n: u64) -> Result<Vec<u64>> {
    let mut values = Canon::factorize(n)?
        .divisors()
        .iter()
        .map(Canon::value)
        .collect::<Result<Vec<_>>>()?;
    values.sort_unstable();
    Ok(values)
}

/// Greatest common divisor of canonical forms
///
/// ```
/// use pieces::ntheory::{gcd, Canon};
///
/// let g = gcd(&Canon::factorize(18)?, &Canon::factorize(12)?);
/// assert_eq!(g.value()?, 6);
/// # Ok::<(), pieces::NtheoryError>(())
/// ```
pub fn gcd(a: &Canon, b: &Canon) -> Canon {
    a.merge(b, u32::min)
}

/// Least common multiple of canonical forms
pub fn lcm(a: &Canon, b: &Canon) -> Canon {
    a.merge(b, u32::max)
}
