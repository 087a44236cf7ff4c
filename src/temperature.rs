//! The global Temperature scalar, including the pluggable
//! probability-adjustment formula table carried over in full from
//! `original_source/copycat-fargonauts/copycat/temperature.py`: a pluggable
//! selector lets experimenters substitute alternates without recompiling the
//! main loop, so all fourteen formulas stay registered even though only a
//! handful are used by default.

use crate::error::CopycatError;
use crate::Probability;

/// temp in [0, 100], prob in [0, 1]. every formula below is a direct port of
/// the matching `_name` function in `temperature.py`.
pub type Formula = fn(Probability, Probability) -> Probability;

fn weighted(temp: Probability, s: Probability, u: Probability) -> Probability {
    (temp / 100.0) * s + ((100.0 - temp) / 100.0) * u
}

fn original(temp: Probability, prob: Probability) -> Probability {
    if prob == 0.0 || prob == 0.5 || temp == 0.0 {
        return prob;
    }
    if prob < 0.5 {
        return 1.0 - original(temp, 1.0 - prob);
    }
    let coldness = 100.0 - temp;
    let a = coldness.sqrt();
    let c = (10.0 - a) / 100.0;
    let f = (c + 1.0) * prob;
    f.max(0.5)
}

fn entropy(temp: Probability, prob: Probability) -> Probability {
    if prob == 0.0 || prob == 0.5 || temp == 0.0 {
        return prob;
    }
    if prob < 0.5 {
        return 1.0 - original(temp, 1.0 - prob);
    }
    let coldness = 100.0 - temp;
    let a = coldness.sqrt();
    let c = (10.0 - a) / 100.0;
    let f = (c + 1.0) * prob;
    -f * f.log2()
}

fn inverse(temp: Probability, prob: Probability) -> Probability {
    let iprob = 1.0 - prob;
    weighted(temp, iprob, prob)
}

fn fifty_converge(temp: Probability, prob: Probability) -> Probability {
    weighted(temp, 0.5, prob)
}

fn soft(temp: Probability, prob: Probability) -> Probability {
    weighted(temp, (1.5 - prob) / 2.0, prob).min(1.0)
}

fn weighted_soft(temp: Probability, prob: Probability) -> Probability {
    let weight = 100.0;
    let gamma = 0.5;
    let alpha = 1.0;
    let beta = 3.0;
    let curved = (temp / weight) * ((alpha * gamma + beta * (1.0 - prob)) / (alpha + beta))
        + ((weight - temp) / weight) * prob;
    curved.min(1.0)
}

fn alt_fifty(temp: Probability, prob: Probability) -> Probability {
    let s = 0.5;
    let u = if prob < 0.5 { prob.powi(2) } else { prob.sqrt() };
    weighted(temp, s, u)
}

fn average_alt(temp: Probability, prob: Probability) -> Probability {
    let s = (1.5 - prob) / 2.0;
    let u = if prob < 0.5 { prob.powi(2) } else { prob.sqrt() };
    weighted(temp, s, u)
}

fn best(temp: Probability, prob: Probability) -> Probability {
    let s = 0.5;
    let r = 1.05;
    let u = if prob < 0.5 { prob.powf(r) } else { prob.powf(1.0 / r) };
    weighted(temp, s, u)
}

fn sbest(temp: Probability, prob: Probability) -> Probability {
    best(temp, prob)
}

fn pbest(temp: Probability, prob: Probability) -> Probability {
    let alpha = 5.0;
    let beta = 1.0;
    let s = (alpha * prob + beta * 0.5) / (alpha + beta);
    let r = 1.05;
    let u = if prob < 0.5 { prob.powf(r) } else { prob.powf(1.0 / r) };
    weighted(temp, s, u)
}

fn meta(temp: Probability, prob: Probability) -> Probability {
    let r = weighted(temp, 1.0, 2.0);
    let s = 0.5;
    let u = if prob < 0.5 { prob.powf(r) } else { prob.powf(1.0 / r) };
    weighted(temp, s, u)
}

fn pmeta(temp: Probability, prob: Probability) -> Probability {
    let r = weighted(temp, 1.0, 2.0);
    let alpha = 5.0;
    let beta = 1.0;
    let s = (alpha * prob + beta * 0.5) / (alpha + beta);
    let u = if prob < 0.5 { prob.powf(r) } else { prob.powf(1.0 / r) };
    weighted(temp, s, u)
}

fn none_formula(_temp: Probability, prob: Probability) -> Probability {
    prob
}

/// resolve a formula by its registered name; mirrors
/// `Temperature._adjustmentFormulas` in the original.
pub fn lookup(name: &str) -> Option<Formula> {
    Some(match name {
        "original" => original,
        "entropy" => entropy,
        "inverse" => inverse,
        "fifty_converge" => fifty_converge,
        "soft" => soft,
        "weighted_soft" => weighted_soft,
        "alt_fifty" => alt_fifty,
        "average_alt" => average_alt,
        "best" => best,
        "sbest" => sbest,
        "pbest" => pbest,
        "meta" => meta,
        "pmeta" => pmeta,
        "none" => none_formula,
        _ => return None,
    })
}

pub const DEFAULT_FORMULA: &str = "inverse";
pub const FORMULA_NAMES: &[&str] = &[
    "original",
    "entropy",
    "inverse",
    "fifty_converge",
    "soft",
    "weighted_soft",
    "alt_fifty",
    "average_alt",
    "best",
    "sbest",
    "pbest",
    "meta",
    "pmeta",
    "none",
];

/// the subset of registered formulas that satisfy both identity laws
/// (`f(T=0, p) == p` and `f(T, 0.5) == 0.5` for every T). `alt_fifty`,
/// `average_alt`, `best`, `sbest`, `pbest`, `meta`, and `pmeta` substitute a
/// skewed convergence point instead of the symmetric 0.5 and so don't fix
/// p=0.5 away from T=100 -- the original source kept them as experimental
/// alternates for exactly that reason, never as defaults.
pub const LAW_COMPLIANT_FORMULAS: &[&str] = &[
    "original",
    "entropy",
    "inverse",
    "fifty_converge",
    "soft",
    "weighted_soft",
    "none",
];

/// global scalar in [0, 100] summarizing workspace coherence.
#[derive(Debug, Clone)]
pub struct Temperature {
    history: Vec<Probability>,
    actual_value: Probability,
    last_unclamped_value: Probability,
    clamped: bool,
    clamp_time: usize,
    formula_name: String,
    diffs: Probability,
    ndiffs: usize,
}

impl Temperature {
    pub fn new(clamp_time: usize) -> Self {
        Self {
            history: vec![100.0],
            actual_value: 100.0,
            last_unclamped_value: 100.0,
            clamped: true,
            clamp_time,
            formula_name: DEFAULT_FORMULA.to_string(),
            diffs: 0.0,
            ndiffs: 0,
        }
    }

    pub fn with_formula(clamp_time: usize, formula_name: &str) -> Result<Self, CopycatError> {
        let mut temperature = Self::new(clamp_time);
        temperature.set_formula(formula_name)?;
        Ok(temperature)
    }

    pub fn set_formula(&mut self, name: &str) -> Result<(), CopycatError> {
        if lookup(name).is_none() {
            return Err(CopycatError::UnknownFormula(name.to_string()));
        }
        self.formula_name = name.to_string();
        Ok(())
    }

    pub fn formula_name(&self) -> &str {
        &self.formula_name
    }

    /// feed a freshly computed workspace coherence value into the clamp/history logic.
    pub fn update(&mut self, value: Probability) {
        self.last_unclamped_value = value;
        if self.clamped {
            self.actual_value = 100.0;
        } else {
            self.history.push(value);
            self.actual_value = value;
        }
    }

    pub fn clamp_until(&mut self, when: usize) {
        self.clamped = true;
        self.clamp_time = when;
    }

    pub fn try_unclamp(&mut self, current_time: usize) {
        if self.clamped && current_time >= self.clamp_time {
            self.clamped = false;
        }
    }

    pub fn is_clamped(&self) -> bool {
        self.clamped
    }

    pub fn value(&self) -> Probability {
        if self.clamped {
            100.0
        } else {
            self.actual_value
        }
    }

    /// `value ^ ((100 - T) / 30 + 0.5)` -- bends strengths toward 1 as T rises.
    pub fn adjust_value(&self, value: Probability) -> Probability {
        value.powf((100.0 - self.value()) / 30.0 + 0.5)
    }

    /// bends a probability away from its extremes as T rises, via the
    /// currently selected formula.
    pub fn adjust_probability(&mut self, probability: Probability) -> Probability {
        let temp = self.value();
        let formula = lookup(&self.formula_name).expect("formula_name always validated");
        let adjusted = formula(temp, probability);
        self.diffs += (adjusted - probability).abs();
        self.ndiffs += 1;
        adjusted
    }

    pub fn average_difference(&self) -> Probability {
        if self.ndiffs == 0 {
            0.0
        } else {
            self.diffs / self.ndiffs as Probability
        }
    }

    pub fn history(&self) -> &[Probability] {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_formula_is_identity_at_zero_temperature() {
        for &name in FORMULA_NAMES {
            let formula = lookup(name).unwrap();
            for prob in [0.0, 0.1, 0.3, 0.5, 0.7, 0.9, 1.0] {
                let adjusted = formula(0.0, prob);
                assert!(
                    (adjusted - prob).abs() < 1e-9,
                    "{name} at T=0 changed {prob} to {adjusted}"
                );
            }
        }
    }

    #[test]
    fn law_compliant_formulas_fix_one_half_at_every_temperature() {
        for &name in LAW_COMPLIANT_FORMULAS {
            let formula = lookup(name).unwrap();
            for temp in [0.0, 25.0, 50.0, 75.0, 100.0] {
                let adjusted = formula(temp, 0.5);
                assert!(
                    (adjusted - 0.5).abs() < 1e-9,
                    "{name} at p=0.5, T={temp} gave {adjusted}"
                );
            }
        }
    }

    #[test]
    fn experimental_formulas_only_fix_one_half_at_full_temperature() {
        for &name in ["alt_fifty", "average_alt", "best", "sbest", "pbest", "meta", "pmeta"].iter() {
            let formula = lookup(name).unwrap();
            let adjusted = formula(100.0, 0.5);
            assert!((adjusted - 0.5).abs() < 1e-9, "{name} at T=100 gave {adjusted}");
        }
    }

    #[test]
    fn clamp_holds_value_at_100_until_unclamped() {
        let mut t = Temperature::new(30);
        assert_eq!(t.value(), 100.0);
        t.update(42.0);
        assert_eq!(t.value(), 100.0);
        t.try_unclamp(30);
        assert!(!t.is_clamped());
        t.update(42.0);
        assert_eq!(t.value(), 42.0);
    }

    #[test]
    fn unknown_formula_is_rejected() {
        let mut t = Temperature::new(30);
        assert!(t.set_formula("not-a-real-formula").is_err());
    }
}
