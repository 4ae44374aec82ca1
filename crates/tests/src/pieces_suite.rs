//! `pieces` test suite: primes, factorization and arithmetic functions
//! through the public API.

mod primes {
    use pieces::ntheory::{is_prime, pi, primes, sieve};

    const LIMIT: u64 = 30;
    const PREPARED: [u64; 10] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29];

    #[test]
    fn test_pi() {
        for x in 1..=LIMIT {
            assert_eq!(pi(x as f64).unwrap(), primes(x).unwrap().len());
        }
    }

    #[test]
    fn test_sieve() {
        assert_eq!(sieve(LIMIT).unwrap(), PREPARED);
    }

    #[test]
    fn test_primes() {
        assert_eq!(primes(LIMIT).unwrap(), PREPARED);
    }

    #[test]
    fn test_is_prime() {
        for x in 1..=LIMIT {
            assert_eq!(is_prime(x).unwrap(), PREPARED.contains(&x), "x = {x}");
        }
    }

    #[test]
    fn test_unbounded_queries_are_rejected() {
        assert!(pi(f64::INFINITY).is_err());
        assert!(is_prime(u64::MAX).is_err());
        assert!(primes(u64::MAX).is_err());
    }
}

mod factorization {
    use pieces::ntheory::{defactorize, factorize, pvaluation, Canon};

    #[test]
    fn test_pvaluation() {
        assert_eq!(pvaluation(2u64.pow(3) * 35, 2).unwrap(), 3);
    }

    #[test]
    fn test_defactorize_factorize() {
        for k in 1..100 {
            assert_eq!(defactorize(&factorize(k).unwrap()).unwrap(), k);
        }
    }

    #[test]
    fn test_canon_matches_factorize() {
        for k in 1..100 {
            let canon = Canon::factorize(k).unwrap();
            assert_eq!(canon.prime_powers(), &factorize(k).unwrap());
            assert_eq!(canon.value().unwrap(), k);
        }
    }
}

mod functions {
    use pieces::ntheory::{
        big_omega, identity, little_omega, mobius, natural, sigma, tau, totient,
        totient_inverse, unit, Function,
    };

    fn assert_values(f: &Function, cases: &[(u64, f64)]) {
        for &(k, expected) in cases {
            assert_eq!(f.call(k).unwrap(), expected, "{f}({k})");
        }
    }

    mod totient_fn {
        use super::*;

        #[test]
        fn test_values() {
            assert_values(
                &totient(),
                &[
                    (1, 1.),
                    (2, 1.),
                    (3, 2.),
                    (4, 2.),
                    (5, 4.),
                    (6, 2.),
                    (7, 6.),
                    (8, 4.),
                    (9, 6.),
                    (10, 4.),
                ],
            );
        }

        #[test]
        fn test_formula() {
            assert_eq!(totient().formula(), "φ");
        }

        #[test]
        fn test_equality() {
            assert!(totient().pow(-1).unwrap() == totient_inverse());
            assert!(totient() * totient_inverse() == identity());
        }
    }

    mod mobius_fn {
        use super::*;

        #[test]
        fn test_values() {
            assert_values(
                &mobius(),
                &[
                    (1, 1.),
                    (2, -1.),
                    (3, -1.),
                    (4, 0.),
                    (5, -1.),
                    (6, 1.),
                    (7, -1.),
                    (8, 0.),
                    (9, 0.),
                    (10, 1.),
                ],
            );
        }

        #[test]
        fn test_formula() {
            assert_eq!(mobius().formula(), "μ");
        }

        #[test]
        fn test_equality() {
            assert!(mobius().pow(-1).unwrap() == unit());
            assert!(mobius() * unit() == identity());
        }
    }

    mod little_omega_fn {
        use super::*;

        #[test]
        fn test_values() {
            assert_values(
                &little_omega(),
                &[
                    (1, 0.),
                    (2 * 3 * 5, 3.),
                    (2u64.pow(2) * 3u64.pow(3) * 5u64.pow(4), 3.),
                ],
            );
        }

        #[test]
        fn test_formula() {
            assert_eq!(little_omega().formula(), "ω");
        }
    }

    mod big_omega_fn {
        use super::*;

        #[test]
        fn test_values() {
            assert_values(
                &big_omega(),
                &[
                    (1, 0.),
                    (2 * 3 * 5, 3.),
                    (2u64.pow(2) * 3u64.pow(3) * 5u64.pow(4), 9.),
                ],
            );
        }

        #[test]
        fn test_formula() {
            assert_eq!(big_omega().formula(), "Ω");
        }
    }

    mod identity_fn {
        use super::*;

        #[test]
        fn test_values() {
            assert_eq!(identity().call(1).unwrap(), 1.0);
            for k in 2..100 {
                assert_eq!(identity().call(k).unwrap(), 0.0);
            }
        }

        #[test]
        fn test_formula() {
            assert_eq!(identity().formula(), "I");
        }

        #[test]
        fn test_inverse() {
            assert!(identity().pow(-1).unwrap() == identity());
            assert!(identity() * identity() == identity());
        }
    }

    mod natural_fn {
        use super::*;

        #[test]
        fn test_values() {
            for k in 1..100 {
                assert_eq!(natural().call(k).unwrap(), k as f64);
            }
        }

        #[test]
        fn test_formula() {
            assert_eq!(natural().formula(), "N");
        }

        #[test]
        fn test_inverse() {
            assert!(natural() * natural().pow(-1).unwrap() == identity());
        }
    }

    mod unit_fn {
        use super::*;

        #[test]
        fn test_values() {
            for k in 1..100 {
                assert_eq!(unit().call(k).unwrap(), 1.0);
            }
        }

        #[test]
        fn test_formula() {
            assert_eq!(unit().formula(), "u");
        }

        #[test]
        fn test_inverse() {
            assert!(unit().pow(-1).unwrap() == mobius());
            assert!(unit() * mobius() == identity());
        }
    }

    mod tau_fn {
        use super::*;

        #[test]
        fn test_values() {
            assert_values(
                &tau(),
                &[
                    (1, 1.),
                    (2, 2.),
                    (3, 2.),
                    (4, 3.),
                    (5, 2.),
                    (6, 4.),
                    (7, 2.),
                    (8, 4.),
                    (9, 3.),
                    (10, 4.),
                ],
            );
        }

        #[test]
        fn test_is_unit_squared() {
            assert!(tau() == unit() * unit());
        }

        #[test]
        fn test_formula() {
            assert_eq!(tau().formula(), "τ");
        }
    }

    mod sigma_fn {
        use super::*;

        #[test]
        fn test_is_natural_times_unit() {
            assert!(sigma() == natural() * unit());
            assert_eq!(sigma().call(28).unwrap(), 56.0);
        }
    }
}
