//! Phase enums with a fixed transition table.

use super::ValidationError;

/// An enum whose values move along a fixed set of edges.
///
/// `CyclePhase` is the implementor: an analysis cycle walks
/// `Idle -> Windowing -> PerContextAggregation -> ThresholdCheck` and ends in
/// `InsightEmitted` or back in `Idle`.
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    fn can_transition_to(&self, target: &Self) -> bool;

    /// Every phase reachable in one step.
    fn valid_transitions(&self) -> Vec<Self>;

    /// `target` if the edge exists.
    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if !self.can_transition_to(&target) {
            return Err(ValidationError::invalid_format(
                "phase",
                format!("no edge {:?} -> {:?}", self, target),
            ));
        }
        Ok(target)
    }

    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}
