//! Action registry: three ordered queues, one per tier.

use crate::types::{Action, ActionError, CommandLine, Tier};

/// Accumulates actions during analysis.
///
/// Insertion order is kept within each tier; iteration always yields
/// `Safe`, then `Warning`, then `Unsafe`.
#[derive(Debug, Default, Clone)]
pub struct ActionRegistry {
    safe: Vec<Action>,
    warning: Vec<Action>,
    unsafe_: Vec<Action>,
}

impl ActionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and append an action to the queue of its tier.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError`] when the action fails validation (blank reason
    /// on a non-safe tier, or empty program). The registry is unchanged.
    pub fn enqueue(
        &mut self,
        tier: Tier,
        name: impl Into<String>,
        command: CommandLine,
        reason: Option<String>,
    ) -> Result<(), ActionError> {
        let action = Action::new(tier, name, command, reason)?;
        tracing::debug!(tier = %tier, name = action.name(), "queued action");
        self.queue_mut(tier).push(action);
        Ok(())
    }

    /// Number of actions queued under `tier`.
    pub fn count_by_tier(&self, tier: Tier) -> usize {
        self.tier(tier).len()
    }

    /// Actions of a single tier, in insertion order.
    pub fn tier(&self, tier: Tier) -> &[Action] {
        match tier {
            Tier::Safe => &self.safe,
            Tier::Warning => &self.warning,
            Tier::Unsafe => &self.unsafe_,
        }
    }

    /// Every action grouped by tier: safe first, then warning, then unsafe.
    pub fn all_actions(&self) -> impl Iterator<Item = &Action> {
        self.safe
            .iter()
            .chain(self.warning.iter())
            .chain(self.unsafe_.iter())
    }

    /// Total number of queued actions.
    pub fn len(&self) -> usize {
        self.safe.len() + self.warning.len() + self.unsafe_.len()
    }

    /// True when nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn queue_mut(&mut self, tier: Tier) -> &mut Vec<Action> {
        match tier {
            Tier::Safe => &mut self.safe,
            Tier::Warning => &mut self.warning,
            Tier::Unsafe => &mut self.unsafe_,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cmd(name: &str) -> CommandLine {
        CommandLine::new("echo", [name])
    }

    #[test]
    fn test_all_actions_grouped_by_tier() {
        let mut registry = ActionRegistry::new();
        registry
            .enqueue(Tier::Unsafe, "u1", cmd("u1"), Some("risky".into()))
            .unwrap();
        registry
            .enqueue(Tier::Warning, "w1", cmd("w1"), Some("careful".into()))
            .unwrap();
        registry.enqueue(Tier::Safe, "s1", cmd("s1"), None).unwrap();
        registry
            .enqueue(Tier::Warning, "w2", cmd("w2"), Some("careful".into()))
            .unwrap();
        registry.enqueue(Tier::Safe, "s2", cmd("s2"), None).unwrap();

        let names: Vec<_> = registry.all_actions().map(Action::name).collect();
        assert_eq!(names, ["s1", "s2", "w1", "w2", "u1"]);
        assert_eq!(registry.len(), 5);
    }

    #[test]
    fn test_count_by_tier() {
        let mut registry = ActionRegistry::new();
        registry.enqueue(Tier::Safe, "a", cmd("a"), None).unwrap();
        registry.enqueue(Tier::Safe, "b", cmd("b"), None).unwrap();
        registry
            .enqueue(Tier::Unsafe, "c", cmd("c"), Some("why".into()))
            .unwrap();

        assert_eq!(registry.count_by_tier(Tier::Safe), 2);
        assert_eq!(registry.count_by_tier(Tier::Warning), 0);
        assert_eq!(registry.count_by_tier(Tier::Unsafe), 1);
    }

    #[test]
    fn test_rejects_missing_reason_regardless_of_contents() {
        let mut registry = ActionRegistry::new();
        assert!(
            registry
                .enqueue(Tier::Warning, "w", cmd("w"), Some(String::new()))
                .is_err()
        );

        registry.enqueue(Tier::Safe, "s", cmd("s"), None).unwrap();
        registry
            .enqueue(Tier::Warning, "ok", cmd("ok"), Some("fine".into()))
            .unwrap();
        assert!(registry.enqueue(Tier::Unsafe, "u", cmd("u"), None).is_err());
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_empty_registry() {
        let registry = ActionRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.all_actions().count(), 0);
    }
}
