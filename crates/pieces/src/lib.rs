//! # Pieces
//!
//! Small, exact pieces of elementary number theory.
//!
//! - [`checks`]: argument checks shared by the rest of the crate
//! - [`ntheory`]: prime tables, factorization, canonical forms and
//!   arithmetic functions with their Dirichlet algebra
//!
//! ```
//! use pieces::ntheory::{factorize, mobius, totient, unit, identity};
//!
//! assert_eq!(factorize(72).unwrap().into_iter().collect::<Vec<_>>(), vec![(2, 3), (3, 2)]);
//! assert_eq!(totient().call(10).unwrap(), 4.0);
//! assert!(mobius() * unit() == identity());
//! ```

pub mod checks;
pub mod error;
pub mod ntheory;

pub use error::{NtheoryError, Result};
