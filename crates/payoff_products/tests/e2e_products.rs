//! End-to-end tests for the product family.
//!
//! These tests drive products the way a simulation engine does: allocate a
//! scenario from the dataline, fill it, and collect payoffs per path.
//!
//! # Test Coverage
//!
//! - Concurrent evaluation across rayon workers
//! - Pathwise sensitivities through `Dual64`
//! - Scenario exchange via serde_json
//! - Consistency between related products

use approx::assert_relative_eq;
use payoff_products::{
    allocate_path, ContingentBond, European, Europeans, Product, ProductTrait, Scenario, Uoc,
};
use rayon::prelude::*;

/// Deterministic path whose spots follow `spot(i, t)`.
fn path_with<F>(product: &Product, spot: F) -> Scenario<f64>
where
    F: Fn(usize, f64) -> f64,
{
    let mut path = allocate_path::<f64>(product.dataline());
    for (i, (entry, &t)) in path.iter_mut().zip(product.timeline()).enumerate() {
        let s = spot(i, t);
        for f in entry.forwards.iter_mut() {
            *f = s;
        }
        for d in entry.discounts.iter_mut() {
            *d = 0.98;
        }
        for l in entry.libors.iter_mut() {
            *l = 0.03;
        }
        entry.numeraire = 1.0 + 0.02 * t;
    }
    path
}

fn book() -> Vec<Product> {
    vec![
        European::new(100.0, 1.0, 1.25).unwrap().into(),
        Europeans::new(vec![(1.0, vec![90.0, 100.0, 110.0]), (2.0, vec![100.0])])
            .unwrap()
            .into(),
        Uoc::new(100.0, 115.0, 1.0, 1.0 / 12.0, 0.01).unwrap().into(),
        ContingentBond::new(3.0, 0.01, 0.25, 0.001).unwrap().into(),
    ]
}

// ============================================================================
// Concurrency
// ============================================================================

#[test]
fn e2e_concurrent_matches_sequential() {
    for product in book() {
        let paths: Vec<Scenario<f64>> = (0..256)
            .map(|k| {
                path_with(&product, |i, _| {
                    100.0 + 12.0 * ((k as f64) * 0.11 + (i as f64) * 0.7).sin()
                })
            })
            .collect();

        let width = product.payoff_width();
        let sequential: Vec<Vec<f64>> = paths
            .iter()
            .map(|p| {
                let mut out = vec![0.0; width];
                product.payoffs(p, &mut out);
                out
            })
            .collect();

        let concurrent: Vec<Vec<f64>> = paths
            .par_iter()
            .map_with(product.clone(), |worker, p| {
                let mut out = vec![0.0; width];
                worker.payoffs(p, &mut out);
                out
            })
            .collect();

        assert_eq!(sequential, concurrent, "{}", product.type_name());
    }
}

#[test]
fn e2e_shared_reference_across_threads() {
    let product = Product::from(Uoc::new(100.0, 115.0, 1.0, 0.25, 0.02).unwrap());
    let path = path_with(&product, |i, _| 100.0 + 4.0 * i as f64);

    let mut expected = vec![0.0; 2];
    product.payoffs(&path, &mut expected);

    let results: Vec<Vec<f64>> = (0..64)
        .into_par_iter()
        .map(|_| {
            let mut out = vec![0.0; 2];
            product.payoffs(&path, &mut out);
            out
        })
        .collect();

    assert!(results.iter().all(|r| *r == expected));
}

// ============================================================================
// Pathwise sensitivities
// ============================================================================

#[cfg(feature = "num-dual-mode")]
mod sensitivities {
    use super::*;
    use num_dual::Dual64;
    use payoff_products::ScenarioEntry;

    /// Lifts a real path to dual numbers with every spot scaled by `1 + eps`.
    fn spot_bumped(path: &Scenario<f64>) -> Scenario<Dual64> {
        path.iter()
            .map(|entry| ScenarioEntry {
                forwards: entry.forwards.iter().map(|&f| Dual64::new(f, f)).collect(),
                discounts: entry.discounts.iter().map(|&d| Dual64::new(d, 0.0)).collect(),
                libors: entry.libors.iter().map(|&l| Dual64::new(l, 0.0)).collect(),
                numeraire: Dual64::new(entry.numeraire, 0.0),
            })
            .collect()
    }

    fn bumped(path: &Scenario<f64>, h: f64) -> Scenario<f64> {
        let mut out = path.clone();
        for entry in out.iter_mut() {
            for f in entry.forwards.iter_mut() {
                *f *= 1.0 + h;
            }
        }
        out
    }

    /// Dual derivative agrees with a central finite difference away from kinks
    /// and outside the smoothing bands.
    #[test]
    fn e2e_dual_matches_finite_difference() {
        let h = 1e-6;
        for product in book() {
            let path = path_with(&product, |i, _| 103.0 + 3.0 * ((i as f64) * 0.9).sin());
            let width = product.payoff_width();

            let mut dual = vec![Dual64::new(0.0, 0.0); width];
            product.payoffs(&spot_bumped(&path), &mut dual);

            let mut up = vec![0.0; width];
            let mut down = vec![0.0; width];
            product.payoffs(&bumped(&path, h), &mut up);
            product.payoffs(&bumped(&path, -h), &mut down);

            for k in 0..width {
                let fd = (up[k] - down[k]) / (2.0 * h);
                assert_relative_eq!(dual[k].eps, fd, epsilon = 1e-4, max_relative = 1e-4);
            }
        }
    }

    /// Dual values equal plain values.
    #[test]
    fn e2e_dual_value_matches_plain() {
        for product in book() {
            let path = path_with(&product, |i, _| 98.0 + 2.5 * i as f64);
            let width = product.payoff_width();

            let mut plain = vec![0.0; width];
            product.payoffs(&path, &mut plain);
            let mut dual = vec![Dual64::new(0.0, 0.0); width];
            product.payoffs(&spot_bumped(&path), &mut dual);

            for k in 0..width {
                assert_relative_eq!(dual[k].re, plain[k], epsilon = 1e-12);
            }
        }
    }

    /// Touching the barrier exactly still yields a finite delta.
    #[test]
    fn e2e_uoc_delta_finite_at_barrier() {
        let product = Product::from(Uoc::new(100.0, 115.0, 1.0, 0.25, 0.01).unwrap());
        let path = path_with(&product, |i, _| if i == 2 { 115.0 } else { 105.0 });

        let mut dual = vec![Dual64::new(0.0, 0.0); 2];
        product.payoffs(&spot_bumped(&path), &mut dual);

        assert!(dual[0].eps.is_finite());
        assert!(dual[0].re > 0.0 && dual[0].re < dual[1].re);
    }
}

// ============================================================================
// Scenario exchange and product consistency
// ============================================================================

#[cfg(feature = "serde")]
#[test]
fn e2e_scenario_from_json() {
    let product = Product::from(European::at_exercise(100.0, 1.0).unwrap());
    let json = r#"[{"forwards": [112.0], "discounts": [1.0], "numeraire": 1.2}]"#;
    let path: Scenario<f64> = serde_json::from_str(json).unwrap();

    let mut payoffs = vec![0.0];
    product.evaluate(&path, &mut payoffs).unwrap();
    assert_relative_eq!(payoffs[0], 10.0, epsilon = 1e-12);
}

#[test]
fn e2e_europeans_match_single_europeans() {
    let strip = Europeans::new(vec![(1.0, vec![90.0, 110.0]), (2.0, vec![100.0])]).unwrap();
    let strip = Product::from(strip);
    let path = path_with(&strip, |i, _| 104.0 + i as f64);

    let mut batched = vec![0.0; 3];
    strip.payoffs(&path, &mut batched);

    let singles = [(1.0, 90.0, 0), (1.0, 110.0, 0), (2.0, 100.0, 1)];
    for (k, &(maturity, strike, node)) in singles.iter().enumerate() {
        let call = European::at_exercise(strike, maturity).unwrap();
        let mut single_path = allocate_path::<f64>(call.dataline());
        single_path[0].forwards[0] = path[node].forwards[0];
        single_path[0].discounts[0] = 1.0;
        single_path[0].numeraire = path[node].numeraire;

        let mut single = vec![0.0];
        call.payoffs(&single_path, &mut single);
        assert_relative_eq!(batched[k], single[0], epsilon = 1e-12);
    }
}

#[test]
fn e2e_uoc_never_exceeds_vanilla() {
    let product = Product::from(Uoc::new(100.0, 115.0, 1.0, 1.0 / 12.0, 0.02).unwrap());
    for k in 0..100 {
        let path = path_with(&product, |i, _| 100.0 + (k as f64 * 0.2) * i as f64);
        let mut payoffs = vec![0.0; 2];
        product.payoffs(&path, &mut payoffs);
        assert!(payoffs[0] >= 0.0);
        assert!(payoffs[0] <= payoffs[1] + 1e-12);
    }
}

#[test]
fn e2e_contingent_bond_bounds() {
    // Monotone up path pays every coupon; monotone down path pays none
    let product = Product::from(ContingentBond::new(2.0, 0.01, 0.5, 0.001).unwrap());
    let up = path_with(&product, |i, _| 100.0 + 5.0 * i as f64);
    let down = path_with(&product, |i, _| 100.0 - 5.0 * i as f64);

    let mut paid = vec![0.0];
    let mut unpaid = vec![0.0];
    product.payoffs(&up, &mut paid);
    product.payoffs(&down, &mut unpaid);

    assert_relative_eq!(unpaid[0], 1.0 / 1.04, epsilon = 1e-12);
    let coupons: f64 = [0.5, 1.0, 1.5, 2.0]
        .iter()
        .map(|&t| 0.04 * 0.5 / (1.0 + 0.02 * t))
        .sum();
    assert_relative_eq!(paid[0], coupons + 1.0 / 1.04, epsilon = 1e-12);
}
