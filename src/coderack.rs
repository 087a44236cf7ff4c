//! The codelet scheduler: "a priority queue of codelets that
//! uses urgency buckets rather than a heap." Concretely this is a flat
//! `Vec<Entry>` sampled by effective urgency each step -- the weighting, not
//! the storage shape, is what matters here.
//!
//! Dispatch (actually running a sampled codelet against `Workspace` +
//! `Slipnet` + `Temperature`) lives in `codelets::run`, not here: the
//! coderack only ever owns the posted-codelet list and the aging clock, so it
//! stays ignorant of the three subsystems a codelet transaction touches.

use crate::codelets::{CodeletKind, StructureCategory};
use crate::random::{self, Stream};
use crate::Urgency;

#[derive(Debug, Clone)]
struct Entry {
    kind: CodeletKind,
    urgency: Urgency,
    birthdate: usize,
}

/// the posted-codelet pool.
#[derive(Debug, Clone)]
pub struct Coderack {
    entries: Vec<Entry>,
}

impl Default for Coderack {
    fn default() -> Self {
        Self::new()
    }
}

impl Coderack {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `post(codelet, urgency)`. Urgency is clamped to a minimum of 1 so a
    /// zero or negative urgency never removes a codelet from consideration
    /// entirely.
    pub fn post(&mut self, kind: CodeletKind, urgency: Urgency, birthdate: usize) {
        self.entries.push(Entry { kind, urgency: urgency.max(1.0), birthdate });
    }

    /// `post_batch(list_of_(codelet, urgency))`.
    pub fn post_batch(&mut self, batch: Vec<(CodeletKind, Urgency)>, birthdate: usize) {
        for (kind, urgency) in batch {
            self.post(kind, urgency, birthdate);
        }
    }

    /// `effective(u) = u^((110 - T) / 15)`: at low temperature
    /// high-urgency codelets dominate; at high temperature sampling flattens.
    fn effective_urgency(urgency: Urgency, temperature: f64) -> f64 {
        urgency.max(1.0).powf((110.0 - temperature) / 15.0)
    }

    /// samples one codelet weighted by effective urgency and removes it from
    /// the pool, returning it for the caller to execute and re-post any
    /// follow-ups from. Returns `None` when the
    /// rack is empty.
    pub fn choose(&mut self, rng: &mut Stream, temperature: f64) -> Option<CodeletKind> {
        if self.entries.is_empty() {
            return None;
        }
        let weights: Vec<f64> =
            self.entries.iter().map(|e| Self::effective_urgency(e.urgency, temperature)).collect();
        let index = random::weighted_index(rng, &weights)?;
        Some(self.entries.remove(index).kind)
    }

    /// `clear_category(kind)`: drop every codelet contributing to a
    /// structure category once that category is recognised as done (e.g. the
    /// rule category, once a rule is built).
    pub fn clear_category(&mut self, category: StructureCategory) {
        self.entries.retain(|e| e.kind.structure_category() != category);
    }

    /// `age_tick()`: probabilistically evict codelets whose age has grown
    /// large, run every `CODERACK_AGE_PERIOD` steps from the main loop. The
    /// eviction curve asymptotes well below 1 so a codelet is never evicted
    /// with certainty just for being old.
    pub fn age_tick(&mut self, rng: &mut Stream, current_time: usize) {
        self.entries.retain(|entry| {
            let age = current_time.saturating_sub(entry.birthdate) as f64;
            let eviction_probability = (age / (age + 200.0)).min(0.75);
            !random::flip_coin(rng, eviction_probability)
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codelets::CodeletKind;

    #[test]
    fn empty_rack_chooses_nothing() {
        let mut rack = Coderack::new();
        let mut rng = random::stream(Some(1));
        assert!(rack.choose(&mut rng, 50.0).is_none());
    }

    #[test]
    fn choose_removes_the_posted_entry() {
        let mut rack = Coderack::new();
        rack.post(CodeletKind::BondBottomUpScout, 50.0, 0);
        let mut rng = random::stream(Some(1));
        let chosen = rack.choose(&mut rng, 50.0);
        assert!(matches!(chosen, Some(CodeletKind::BondBottomUpScout)));
        assert!(rack.is_empty());
    }

    #[test]
    fn clear_category_drops_only_that_category() {
        let mut rack = Coderack::new();
        rack.post(CodeletKind::BondBottomUpScout, 10.0, 0);
        rack.post(CodeletKind::GroupBottomUpScout, 10.0, 0);
        rack.clear_category(StructureCategory::Bond);
        assert_eq!(rack.len(), 1);
        let mut rng = random::stream(Some(1));
        assert!(matches!(rack.choose(&mut rng, 50.0), Some(CodeletKind::GroupBottomUpScout)));
    }

    #[test]
    fn zero_urgency_still_stays_choosable() {
        let mut rack = Coderack::new();
        rack.post(CodeletKind::BondBottomUpScout, 0.0, 0);
        let mut rng = random::stream(Some(1));
        assert!(rack.choose(&mut rng, 50.0).is_some());
    }

    #[test]
    fn aging_never_evicts_a_brand_new_codelet() {
        let mut rack = Coderack::new();
        rack.post(CodeletKind::BondBottomUpScout, 10.0, 100);
        let mut rng = random::stream(Some(1));
        rack.age_tick(&mut rng, 100);
        assert_eq!(rack.len(), 1);
    }
}
