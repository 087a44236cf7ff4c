//! Answer-histogram aggregation and table rendering (`run()`'s
//! return type: `Mapping[answer_string, {count, avg_temperature}]`), kept as
//! plain data plus a `Display`-free render method rather than reaching for a
//! table-formatting crate.

use crate::run::RunResult;
use crate::Probability;
use std::collections::BTreeMap;

/// the aggregate over every run that produced a given answer string.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnswerStats {
    pub count: usize,
    total_temperature: Probability,
}

impl AnswerStats {
    fn record(&mut self, temperature: Probability) {
        self.count += 1;
        self.total_temperature += temperature;
    }

    pub fn avg_temperature(&self) -> Probability {
        if self.count == 0 {
            0.0
        } else {
            self.total_temperature / self.count as Probability
        }
    }
}

/// `run(initial, modified, target, iterations) -> Mapping[...]`,
/// keyed by answer string (including the `"no-answer"` sentinel, ).
#[derive(Debug, Clone, Default)]
pub struct AnswerHistogram(BTreeMap<String, AnswerStats>);

impl AnswerHistogram {
    pub fn record(&mut self, result: &RunResult) {
        self.0.entry(result.answer.to_string()).or_default().record(result.temperature);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AnswerStats)> {
        self.0.iter().map(|(answer, stats)| (answer.as_str(), stats))
    }

    pub fn total(&self) -> usize {
        self.0.values().map(|stats| stats.count).sum()
    }

    pub fn get(&self, answer: &str) -> Option<&AnswerStats> {
        self.0.get(answer)
    }

    /// the most frequent answer, ties broken by lexicographic order of the
    /// answer string (`BTreeMap` iteration order) -- good enough since the
    /// scenario table only ever asserts a dominant mode, never an
    /// exact tie-break.
    pub fn modal_answer(&self) -> Option<&str> {
        self.0.iter().max_by_key(|(_, stats)| stats.count).map(|(answer, _)| answer.as_str())
    }

    /// the CLI driver's table.
    pub fn render_table(&self) -> String {
        let mut out = format!("{:<16} {:>8} {:>16}\n", "answer", "count", "avg_temperature");
        for (answer, stats) in self.iter() {
            out.push_str(&format!("{:<16} {:>8} {:>16.2}\n", answer, stats.count, stats.avg_temperature()));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::run::Answer;

    fn result(answer: Answer, temperature: f64) -> RunResult {
        RunResult { answer, temperature, steps: 1 }
    }

    #[test]
    fn records_and_averages_per_answer() {
        let mut histogram = AnswerHistogram::default();
        histogram.record(&result(Answer::Found("ijl".to_string()), 20.0));
        histogram.record(&result(Answer::Found("ijl".to_string()), 40.0));
        histogram.record(&result(Answer::NoAnswer, 90.0));

        assert_eq!(histogram.total(), 3);
        let ijl = histogram.get("ijl").unwrap();
        assert_eq!(ijl.count, 2);
        assert!((ijl.avg_temperature() - 30.0).abs() < 1e-9);
        assert_eq!(histogram.modal_answer(), Some("ijl"));
    }

    #[test]
    fn empty_histogram_has_no_modal_answer() {
        assert_eq!(AnswerHistogram::default().modal_answer(), None);
    }
}
