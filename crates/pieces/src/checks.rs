//! Argument checks.
//!
//! Each check returns its argument unchanged so it can be used inline:
//!
//! ```
//! use pieces::checks::check_positive;
//!
//! let k = check_positive(3u32)?;
//! assert_eq!(k, 3);
//! assert!(check_positive(0u32).is_err());
//! # Ok::<(), pieces::NtheoryError>(())
//! ```

use crate::error::{NtheoryError, Result};

/// `lower <= n <= upper`
pub fn check_bounds<T>(n: T, lower: T, upper: T) -> Result<T>
where
    T: Into<i128> + Copy,
{
    let (v, lo, hi) = (n.into(), lower.into(), upper.into());
    if lo <= v && v <= hi {
        Ok(n)
    } else {
        Err(NtheoryError::OutOfBounds {
            n: v,
            lower: lo,
            upper: hi,
        })
    }
}

/// `n > 0`
pub fn check_positive<T>(n: T) -> Result<T>
where
    T: Into<i128> + Copy,
{
    let v = n.into();
    if v > 0 {
        Ok(n)
    } else {
        Err(NtheoryError::NotPositive { n: v })
    }
}

/// `n >= 0`
pub fn check_non_negative<T>(n: T) -> Result<T>
where
    T: Into<i128> + Copy,
{
    let v = n.into();
    if v >= 0 {
        Ok(n)
    } else {
        Err(NtheoryError::Negative { n: v })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds() {
        assert_eq!(check_bounds(5i64, 1, 10), Ok(5));
        assert_eq!(check_bounds(1i64, 1, 1), Ok(1));
        assert_eq!(
            check_bounds(11i64, 1, 10),
            Err(NtheoryError::OutOfBounds {
                n: 11,
                lower: 1,
                upper: 10
            })
        );
    }

    #[test]
    fn test_positive() {
        assert_eq!(check_positive(1u64), Ok(1));
        assert_eq!(
            check_positive(-3i64),
            Err(NtheoryError::NotPositive { n: -3 })
        );
        assert!(check_positive(0i32).is_err());
    }

    #[test]
    fn test_non_negative() {
        assert_eq!(check_non_negative(0i64), Ok(0));
        let err = check_non_negative(-1i64).unwrap_err();
        assert_eq!(err.to_string(), "expected -1 >= 0");
    }
}
