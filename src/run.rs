//! The main loop: wires Slipnet + Workspace + Coderack through
//! Temperature, step by step, until a built Rule translates to an answer or
//! `max_steps` is exhausted.

use crate::codelets::{run_codelet, CodeletKind, CodeletOutcome, StructureCategory};
use crate::coderack::Coderack;
use crate::error::CopycatError;
use crate::random;
use crate::report::AnswerHistogram;
use crate::slipnet::Slipnet;
use crate::temperature::{self, Temperature};
use crate::workspace::Workspace;
use crate::{
    Probability, CODERACK_AGE_PERIOD, DEFAULT_CLAMP_TIME, DEFAULT_CODERACK_UPDATE_PERIOD,
    DEFAULT_MAX_STEPS, DEFAULT_SLIPNET_UPDATE_PERIOD, DEFAULT_TEMPERATURE_UPDATE_PERIOD,
    MAX_STRING_LENGTH,
};

/// Every tunable knob of the main loop, with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    pub seed: Option<u64>,
    pub max_steps: usize,
    pub clamp_time: usize,
    pub slipnet_update_period: usize,
    pub temperature_update_period: usize,
    pub coderack_update_period: usize,
    pub temperature_formula: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: None,
            max_steps: DEFAULT_MAX_STEPS,
            clamp_time: DEFAULT_CLAMP_TIME,
            slipnet_update_period: DEFAULT_SLIPNET_UPDATE_PERIOD,
            temperature_update_period: DEFAULT_TEMPERATURE_UPDATE_PERIOD,
            coderack_update_period: DEFAULT_CODERACK_UPDATE_PERIOD,
            temperature_formula: temperature::DEFAULT_FORMULA.to_string(),
        }
    }
}

/// The outcome of a run: either a constructed answer string or
/// the `"no-answer"` sentinel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Found(String),
    NoAnswer,
}

impl Answer {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Found(answer) => answer.as_str(),
            Self::NoAnswer => "no-answer",
        }
    }

    pub fn is_answer(&self) -> bool {
        matches!(self, Self::Found(_))
    }
}

impl std::fmt::Display for Answer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct RunResult {
    pub answer: Answer,
    pub temperature: Probability,
    pub steps: usize,
}

fn validate(which: &'static str, text: &str) -> Result<(), CopycatError> {
    if text.is_empty() {
        return Err(CopycatError::EmptyString(which));
    }
    let length = text.chars().count();
    if length > MAX_STRING_LENGTH {
        return Err(CopycatError::StringTooLong { which, length });
    }
    if let Some(ch) = text.chars().find(|ch| !ch.is_ascii_alphabetic()) {
        return Err(CopycatError::InvalidCharacter { which, ch });
    }
    Ok(())
}

/// Reposts the bottom-up bootstrap cohort. Bottom-up
/// scouts don't repost themselves when they fizzle or complete, so this
/// cohort is replenished every `coderack_update_period` steps rather than
/// posted once -- the one real use the `coderack_update_period` knob has,
/// since the coderack otherwise has no periodic maintenance of its own
/// beyond aging.
fn post_bootstrap(coderack: &mut Coderack, time: usize) {
    coderack.post_batch(
        vec![
            (CodeletKind::BondBottomUpScout, 50.0),
            (CodeletKind::BondBottomUpScout, 50.0),
            (CodeletKind::GroupBottomUpScout, 40.0),
            (CodeletKind::GroupBottomUpScout, 40.0),
            (CodeletKind::SingleLetterGroupScout, 20.0),
            (CodeletKind::DescriptionBottomUpScout, 30.0),
            (CodeletKind::DescriptionBottomUpScout, 30.0),
            (CodeletKind::CorrespondenceBottomUpScout, 30.0),
            (CodeletKind::CorrespondenceBottomUpScout, 30.0),
            (CodeletKind::RuleScout, 40.0),
            (CodeletKind::BondBreaker, 10.0),
            (CodeletKind::GroupBreaker, 10.0),
            (CodeletKind::CorrespondenceBreaker, 10.0),
            (CodeletKind::RuleBreaker, 10.0),
        ],
        time,
    );
}

/// top-down posts proportional to activation.
fn post_top_down(coderack: &mut Coderack, slipnet: &Slipnet, time: usize) {
    for id in slipnet.node_ids() {
        if !slipnet.is_active(id) {
            continue;
        }
        for template in slipnet.node(id).codelets.clone() {
            let urgency = template.base_urgency * (slipnet.activation(id) as f64 / 100.0);
            coderack.post(template.kind, urgency, time);
        }
    }
}

/// one independent run of the main loop.
pub fn run(initial: &str, modified: &str, target: &str, config: &Config) -> Result<RunResult, CopycatError> {
    validate("initial", initial)?;
    validate("modified", modified)?;
    validate("target", target)?;

    let mut rng = random::stream(config.seed);
    let (mut slipnet, platonic) = Slipnet::build();
    slipnet.clamp_initial_nodes();
    let mut workspace = Workspace::new(initial, modified, target, &platonic);
    let mut coderack = Coderack::new();
    let mut temperature = Temperature::with_formula(config.clamp_time, &config.temperature_formula)?;

    log::info!("starting run: {initial} : {modified} :: {target} : ?");
    post_bootstrap(&mut coderack, 0);

    for step in 1..=config.max_steps {
        workspace.update_saliences();

        if step % config.slipnet_update_period == 0 {
            slipnet.update(&mut rng);
            post_top_down(&mut coderack, &slipnet, step);
        }
        if step % config.temperature_update_period == 0 {
            let input = workspace.temperature_input(&slipnet);
            temperature.update(input);
        }
        temperature.try_unclamp(step);
        if step % config.coderack_update_period == 0 {
            post_bootstrap(&mut coderack, step);
        }
        if step % CODERACK_AGE_PERIOD == 0 {
            coderack.age_tick(&mut rng, step);
        }

        if let Some(kind) = coderack.choose(&mut rng, temperature.value()) {
            match run_codelet(kind, &mut rng, &mut slipnet, &mut workspace, &mut temperature) {
                CodeletOutcome::Fizzle => {}
                CodeletOutcome::Posted(follow_ups) => coderack.post_batch(follow_ups, step),
            }
            workspace.check_invariants()?;
        }

        if workspace.has_built_rule() {
            if let Some(answer) = workspace.translate_rule(&slipnet) {
                coderack.clear_category(StructureCategory::Rule);
                log::info!("run found {answer:?} in {step} steps at temperature {:.1}", temperature.value());
                return Ok(RunResult { answer: Answer::Found(answer), temperature: temperature.value(), steps: step });
            }
        }
    }

    log::info!("run exhausted {} steps with no answer", config.max_steps);
    Ok(RunResult { answer: Answer::NoAnswer, temperature: temperature.value(), steps: config.max_steps })
}

/// Runs `run` repeatedly and aggregates the outcomes into a histogram keyed
/// by answer string. Per-iteration seeds are derived from `config.seed` with
/// a splitmix64-style mix so the aggregate stays reproducible under a fixed
/// seed while each iteration still draws an independent stream; an unset
/// seed draws fresh OS entropy every iteration.
pub fn run_many(
    initial: &str,
    modified: &str,
    target: &str,
    iterations: usize,
    config: &Config,
) -> Result<AnswerHistogram, CopycatError> {
    let mut histogram = AnswerHistogram::default();
    for i in 0..iterations {
        let mut iteration_config = config.clone();
        iteration_config.seed = config.seed.map(|seed| splitmix64(seed, i as u64));
        let result = run(initial, modified, target, &iteration_config)?;
        histogram.record(&result);
    }
    Ok(histogram)
}

fn splitmix64(seed: u64, index: u64) -> u64 {
    let mut z = seed.wrapping_add(index.wrapping_mul(0x9E3779B97F4A7C15));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_string() {
        let config = Config::default();
        let err = run("", "abd", "ijk", &config).unwrap_err();
        assert_eq!(err, CopycatError::EmptyString("initial"));
    }

    #[test]
    fn rejects_non_alphabetic_string() {
        let config = Config::default();
        let err = run("ab1", "abd", "ijk", &config).unwrap_err();
        assert!(matches!(err, CopycatError::InvalidCharacter { which: "initial", ch: '1' }));
    }

    #[test]
    fn rejects_too_long_string() {
        let config = Config::default();
        let long = "a".repeat(MAX_STRING_LENGTH + 1);
        let err = run(&long, "abd", "ijk", &config).unwrap_err();
        assert!(matches!(err, CopycatError::StringTooLong { which: "initial", .. }));
    }

    #[test]
    fn rejects_unknown_formula() {
        let config = Config { temperature_formula: "not-a-formula".to_string(), ..Config::default() };
        let err = run("abc", "abd", "ijk", &config).unwrap_err();
        assert!(matches!(err, CopycatError::UnknownFormula(_)));
    }

    #[test]
    fn same_seed_gives_bitwise_identical_runs() {
        let config = Config { seed: Some(42), max_steps: 300, ..Config::default() };
        let a = run("abc", "abd", "ijk", &config).unwrap();
        let b = run("abc", "abd", "ijk", &config).unwrap();
        assert_eq!(a.answer, b.answer);
        assert!((a.temperature - b.temperature).abs() < 1e-9);
        assert_eq!(a.steps, b.steps);
    }

    #[test]
    fn a_run_always_terminates_with_some_answer() {
        let config = Config { seed: Some(7), max_steps: 500, ..Config::default() };
        let result = run("abc", "abd", "ijk", &config).unwrap();
        assert!(result.temperature >= 0.0 && result.temperature <= 100.0);
        assert!(result.steps <= 500);
    }

    #[test]
    fn run_many_aggregates_every_iteration() {
        let config = Config { seed: Some(1), max_steps: 200, ..Config::default() };
        let histogram = run_many("abc", "abd", "ijk", 5, &config).unwrap();
        assert_eq!(histogram.total(), 5);
    }
}
