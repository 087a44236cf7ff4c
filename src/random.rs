//! Global pseudorandom stream utilities.
//!
//! Every weighted sampling, coin flip, and temperature-adjusted choice in the
//! system draws from a single explicit `Rng` threaded through `Coderack`,
//! `Slipnet`, and `Workspace` -- there is no hidden ambient RNG.

use crate::Probability;
use rand::distr::weighted::WeightedIndex;
use rand::distr::Distribution;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

pub type Stream = SmallRng;

/// construct the run's single PRNG stream; `seed` makes a run reproducible.
pub fn stream(seed: Option<u64>) -> Stream {
    match seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_os_rng(),
    }
}

/// an unbiased coin flip with the given probability of heads.
pub fn flip_coin(rng: &mut Stream, probability: Probability) -> bool {
    if probability <= 0.0 {
        return false;
    }
    if probability >= 1.0 {
        return true;
    }
    rng.random_range(0.0..1.0) < probability
}

/// pick an index from `weights` with probability proportional to its weight.
/// returns `None` if every weight is zero (nothing to choose between).
pub fn weighted_index(rng: &mut Stream, weights: &[f64]) -> Option<usize> {
    if weights.is_empty() || weights.iter().all(|&w| w <= 0.0) {
        return None;
    }
    let distribution = WeightedIndex::new(weights).ok()?;
    Some(distribution.sample(rng))
}

/// pick one of `items` with probability proportional to the matching `weights` entry.
pub fn weighted_select<T>(rng: &mut Stream, weights: &[f64], items: Vec<T>) -> Option<T> {
    let index = weighted_index(rng, weights)?;
    items.into_iter().nth(index)
}

/// uniform pick among equally-weighted items.
pub fn uniform_select<T>(rng: &mut Stream, items: &[T]) -> Option<&T> {
    if items.is_empty() {
        return None;
    }
    let index = rng.random_range(0..items.len());
    items.get(index)
}

pub fn average(a: f64, b: f64) -> f64 {
    (a + b) / 2.0
}

/// weighted average of `values` under `weights`; falls back to the plain
/// average of `values` when every weight is zero.
pub fn weighted_average(weights: &[f64], values: &[f64]) -> f64 {
    debug_assert_eq!(weights.len(), values.len());
    let total: f64 = weights.iter().sum();
    if total <= 0.0 {
        return values.iter().sum::<f64>() / values.len().max(1) as f64;
    }
    weights
        .iter()
        .zip(values.iter())
        .map(|(w, v)| w * v)
        .sum::<f64>()
        / total
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coin_flip_extremes_are_deterministic() {
        let mut rng = stream(Some(1));
        assert!(!flip_coin(&mut rng, 0.0));
        assert!(flip_coin(&mut rng, 1.0));
    }

    #[test]
    fn weighted_select_never_picks_zero_weight() {
        let mut rng = stream(Some(42));
        for _ in 0..200 {
            let choice = weighted_select(&mut rng, &[0.0, 1.0, 0.0], vec!["a", "b", "c"]);
            assert_eq!(choice, Some("b"));
        }
    }

    #[test]
    fn weighted_average_matches_plain_average_when_unweighted() {
        let avg = weighted_average(&[0.0, 0.0], &[10.0, 20.0]);
        assert!((avg - 15.0).abs() < 1e-9);
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut a = stream(Some(7));
        let mut b = stream(Some(7));
        let draws_a: Vec<bool> = (0..50).map(|_| flip_coin(&mut a, 0.5)).collect();
        let draws_b: Vec<bool> = (0..50).map(|_| flip_coin(&mut b, 0.5)).collect();
        assert_eq!(draws_a, draws_b);
    }
}
