use super::stability::StabilityClassifier;
use super::{Candidate, Locator, LocatorCategory, SelectorEngine};
use crate::dom::NodeId;

impl<C: StabilityClassifier> SelectorEngine<'_, C> {
    /// First candidate, by category priority, that still selects only
    /// `target`.
    ///
    /// If none does, the highest-scoring candidate is returned with
    /// `unique: false`. `None` only for an empty list.
    pub fn pick_best(&self, candidates: &[Candidate], target: NodeId) -> Option<Locator> {
        for category in LocatorCategory::PRIORITY {
            let verified = candidates
                .iter()
                .filter(|candidate| candidate.category == category)
                .find(|candidate| self.resolves_uniquely_to(&candidate.expression, target));

            if let Some(candidate) = verified {
                return Some(Locator {
                    expression: candidate.expression.clone(),
                    category: candidate.category,
                    unique: true,
                });
            }
        }

        let fallback = candidates
            .iter()
            .fold(None, |best: Option<&Candidate>, candidate| match best {
                Some(best) if best.score >= candidate.score => Some(best),
                _ => Some(candidate),
            })?;
        log::debug!(
            "No candidate selects only the target, falling back to '{}'",
            fallback.expression
        );
        Some(Locator {
            expression: fallback.expression.clone(),
            category: fallback.category,
            unique: false,
        })
    }
}
