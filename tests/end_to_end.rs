//! The scenario table: each problem run for many iterations under
//! a fixed seed, asserting the aggregated modal answer.

use copycat::{run_many, Config};

fn config() -> Config {
    Config { seed: Some(20260101), max_steps: 2000, ..Config::default() }
}

#[test]
fn abc_abd_ijk_yields_ijl() {
    let histogram = run_many("abc", "abd", "ijk", 120, &config()).unwrap();
    assert_eq!(histogram.modal_answer(), Some("ijl"));
}

#[test]
fn abc_abd_iijjkk_yields_iijjll() {
    let histogram = run_many("abc", "abd", "iijjkk", 120, &config()).unwrap();
    assert_eq!(histogram.modal_answer(), Some("iijjll"));
}

#[test]
fn abc_abd_kji_dominated_by_lji_or_kjh() {
    let histogram = run_many("abc", "abd", "kji", 120, &config()).unwrap();
    let modal = histogram.modal_answer().expect("some answer must dominate");
    assert!(modal == "lji" || modal == "kjh", "unexpected modal answer {modal:?}");
}

#[test]
fn abc_abd_mrrjjj_yields_mrrjjjj() {
    let histogram = run_many("abc", "abd", "mrrjjj", 120, &config()).unwrap();
    assert_eq!(histogram.modal_answer(), Some("mrrjjjj"));
}

#[test]
fn aabc_aabd_ijkk_yields_ijll() {
    let histogram = run_many("aabc", "aabd", "ijkk", 120, &config()).unwrap();
    assert_eq!(histogram.modal_answer(), Some("ijll"));
}

#[test]
fn abc_abd_xyz_is_a_snag_with_elevated_temperature() {
    let histogram = run_many("abc", "abd", "xyz", 120, &config()).unwrap();
    let modal = histogram.modal_answer().expect("some answer must dominate");
    assert!(modal == "xyd" || modal == "wyz", "unexpected modal answer {modal:?}");
    let stats = histogram.get(modal).expect("modal answer must be in the histogram");
    assert!(stats.avg_temperature() > 40.0, "avg_temperature {} not elevated", stats.avg_temperature());
}
