//! Every registered temperature formula wires through the public `Config`
//! boundary; the
//! formulas' own pointwise identities are unit-tested in
//! `src/temperature.rs` directly, since they're private free functions.

use copycat::temperature::{FORMULA_NAMES, LAW_COMPLIANT_FORMULAS};
use copycat::{run, Config};

#[test]
fn every_registered_formula_name_is_accepted_by_config() {
    for &name in FORMULA_NAMES {
        let config = Config { temperature_formula: name.to_string(), max_steps: 50, seed: Some(1), ..Config::default() };
        let result = run("abc", "abd", "ijk", &config);
        assert!(result.is_ok(), "formula {name:?} was rejected by run()");
    }
}

#[test]
fn law_compliant_formulas_are_a_subset_of_the_registry() {
    for &name in LAW_COMPLIANT_FORMULAS {
        assert!(FORMULA_NAMES.contains(&name), "{name:?} isn't registered");
    }
}

#[test]
fn an_unregistered_formula_name_is_rejected() {
    let config = Config { temperature_formula: "not-a-real-formula".to_string(), ..Config::default() };
    let err = run("abc", "abd", "ijk", &config).unwrap_err();
    assert!(matches!(err, copycat::CopycatError::UnknownFormula(_)));
}
