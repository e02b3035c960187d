use super::access_tier::AccessTier;

/// Decides whether an object still needs to move to the target tier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierPolicy {
    target: AccessTier,
}

impl TierPolicy {
    pub fn new(target: AccessTier) -> Self {
        Self { target }
    }

    pub fn target(&self) -> &AccessTier {
        &self.target
    }

    /// True only for a known state equal to the target. An unknown state is
    /// never at target.
    pub fn is_already_at_target(&self, state: Option<&AccessTier>) -> bool {
        state == Some(&self.target)
    }

    /// Warm: known, not archived, and not yet at target. Archived objects
    /// are never picked up, whatever the target.
    pub fn is_eligible(&self, state: Option<&AccessTier>) -> bool {
        match state {
            None | Some(AccessTier::Archive) => false,
            Some(_) => !self.is_already_at_target(state),
        }
    }
}

impl Default for TierPolicy {
    fn default() -> Self {
        Self::new(AccessTier::Archive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_states() -> Vec<Option<AccessTier>> {
        vec![
            None,
            Some(AccessTier::Hot),
            Some(AccessTier::Cool),
            Some(AccessTier::Cold),
            Some(AccessTier::Archive),
            Some(AccessTier::Custom("P10".to_string())),
        ]
    }

    #[test]
    fn test_only_known_target_is_at_target() {
        let policy = TierPolicy::default();
        for state in all_states() {
            let expected = state == Some(AccessTier::Archive);
            assert_eq!(policy.is_already_at_target(state.as_ref()), expected);
        }
    }

    #[test]
    fn test_unknown_is_not_at_target_and_not_eligible() {
        let policy = TierPolicy::default();
        assert!(!policy.is_already_at_target(None));
        assert!(!policy.is_eligible(None));
    }

    #[test]
    fn test_eligibility_follows_target() {
        let policy = TierPolicy::new(AccessTier::Cool);
        assert!(policy.is_eligible(Some(&AccessTier::Hot)));
        assert!(policy.is_eligible(Some(&AccessTier::Cold)));
        assert!(!policy.is_eligible(Some(&AccessTier::Cool)));
    }

    #[test]
    fn test_archived_is_never_eligible() {
        for target in [
            AccessTier::Hot,
            AccessTier::Cool,
            AccessTier::Cold,
            AccessTier::Archive,
        ] {
            let policy = TierPolicy::new(target);
            assert!(!policy.is_eligible(Some(&AccessTier::Archive)));
        }
    }

    #[test]
    fn test_decision_is_repeatable() {
        let policy = TierPolicy::default();
        for state in all_states() {
            let first = policy.is_already_at_target(state.as_ref());
            let second = policy.is_already_at_target(state.as_ref());
            assert_eq!(first, second);
        }
    }
}
