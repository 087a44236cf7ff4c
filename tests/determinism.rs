//! Same-seed repeatability across the public entry points.

use copycat::{run, run_many, Config};

#[test]
fn same_seed_reproduces_a_single_run_bitwise() {
    let config = Config { seed: Some(2024), max_steps: 400, ..Config::default() };
    let a = run("abc", "abd", "ijk", &config).unwrap();
    let b = run("abc", "abd", "ijk", &config).unwrap();
    assert_eq!(a.answer, b.answer);
    assert_eq!(a.steps, b.steps);
    assert!((a.temperature - b.temperature).abs() < 1e-9);
}

#[test]
fn same_seed_reproduces_an_aggregated_histogram() {
    let config = Config { seed: Some(99), max_steps: 300, ..Config::default() };
    let a = run_many("abc", "abd", "ijk", 20, &config).unwrap();
    let b = run_many("abc", "abd", "ijk", 20, &config).unwrap();
    assert_eq!(a.total(), b.total());
    for (answer, stats) in a.iter() {
        let other = b.get(answer).expect("same seed must produce the same answer set");
        assert_eq!(stats.count, other.count);
        assert!((stats.avg_temperature() - other.avg_temperature()).abs() < 1e-9);
    }
}

#[test]
fn different_seeds_need_not_agree() {
    let low = Config { seed: Some(1), max_steps: 300, ..Config::default() };
    let high = Config { seed: Some(2), max_steps: 300, ..Config::default() };
    let a = run("abc", "abd", "kji", &low).unwrap();
    let b = run("abc", "abd", "kji", &high).unwrap();
    // not an equality assertion either way -- just confirms both streams ran
    // to completion under the same configuration modulo seed.
    assert!(a.steps <= 300 && b.steps <= 300);
}

#[test]
fn an_unset_seed_still_produces_a_bounded_run() {
    let config = Config { seed: None, max_steps: 300, ..Config::default() };
    let result = run("abc", "abd", "ijk", &config).unwrap();
    assert!(result.steps <= 300);
    assert!((0.0..=100.0).contains(&result.temperature));
}
