//! Health state machine.
//!
//! # States
//! - Healthy: the gate accepts connections
//! - Unhealthy: the gate is closed
//!
//! # State Transitions
//! ```text
//! Unhealthy → Healthy: success count >= healthy_threshold
//! Healthy → Unhealthy: failure count >= unhealthy_threshold
//! ```
//!
//! # Design Decisions
//! - Hysteresis prevents flapping on noisy single samples
//! - A counter is cleared only by a result that reinforces the current
//!   state, never on every disagreeing result
//! - Transitions are reported exactly once, by `observe`'s return value

/// Current health of the upstream target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthState {
    Unhealthy,
    Healthy,
}

impl std::fmt::Display for HealthState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HealthState::Unhealthy => write!(f, "unhealthy"),
            HealthState::Healthy => write!(f, "healthy"),
        }
    }
}

/// Folds raw check results into a debounced [`HealthState`].
///
/// Starts unhealthy. The probe loop is the sole owner, so no synchronization
/// is needed here.
#[derive(Debug)]
pub struct HealthTracker {
    state: HealthState,
    success_count: u32,
    failure_count: u32,
    healthy_threshold: u32,
    unhealthy_threshold: u32,
}

impl HealthTracker {
    pub fn new(healthy_threshold: u32, unhealthy_threshold: u32) -> Self {
        Self {
            state: HealthState::Unhealthy,
            success_count: 0,
            failure_count: 0,
            healthy_threshold,
            unhealthy_threshold,
        }
    }

    /// Current debounced state.
    pub fn state(&self) -> HealthState {
        self.state
    }

    /// Fold one check result into the state machine.
    ///
    /// Returns the new state when this result caused a transition, `None`
    /// otherwise.
    pub fn observe(&mut self, ok: bool) -> Option<HealthState> {
        if ok {
            self.success_count += 1;
        } else {
            self.failure_count += 1;
        }

        let mut transition = None;
        if self.state != HealthState::Healthy && self.success_count >= self.healthy_threshold {
            self.state = HealthState::Healthy;
            transition = Some(HealthState::Healthy);
        } else if self.state != HealthState::Unhealthy
            && self.failure_count >= self.unhealthy_threshold
        {
            self.state = HealthState::Unhealthy;
            transition = Some(HealthState::Unhealthy);
        }

        // Decay: a result that reinforces the (possibly just entered) state
        // clears the opposing streak. A disagreeing result leaves it intact.
        if ok && self.state == HealthState::Healthy {
            self.failure_count = 0;
        }
        if !ok && self.state == HealthState::Unhealthy {
            self.success_count = 0;
        }

        transition
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Feed a scripted result sequence, collecting reported transitions.
    fn drive(tracker: &mut HealthTracker, results: &[bool]) -> Vec<HealthState> {
        results.iter().filter_map(|&ok| tracker.observe(ok)).collect()
    }

    #[test]
    fn starts_unhealthy() {
        let tracker = HealthTracker::new(3, 3);
        assert_eq!(tracker.state(), HealthState::Unhealthy);
    }

    #[test]
    fn healthy_after_threshold_successes() {
        let mut tracker = HealthTracker::new(3, 3);
        assert_eq!(tracker.observe(true), None);
        assert_eq!(tracker.observe(true), None);
        assert_eq!(tracker.observe(true), Some(HealthState::Healthy));
        assert_eq!(tracker.state(), HealthState::Healthy);
    }

    #[test]
    fn single_probe_flips_state_with_thresholds_of_one() {
        let mut tracker = HealthTracker::new(1, 1);
        assert_eq!(tracker.observe(true), Some(HealthState::Healthy));
        assert_eq!(tracker.observe(false), Some(HealthState::Unhealthy));
        assert_eq!(tracker.observe(true), Some(HealthState::Healthy));
    }

    #[test]
    fn transition_reported_only_once() {
        let mut tracker = HealthTracker::new(2, 2);
        let transitions = drive(&mut tracker, &[true, true, true, true, true]);
        assert_eq!(transitions, vec![HealthState::Healthy]);
    }

    #[test]
    fn no_two_consecutive_transitions_to_same_state() {
        let mut tracker = HealthTracker::new(2, 2);
        let script = [true, true, false, false, true, true, false, false];
        let transitions = drive(&mut tracker, &script);
        assert_eq!(
            transitions,
            vec![
                HealthState::Healthy,
                HealthState::Unhealthy,
                HealthState::Healthy,
                HealthState::Unhealthy,
            ]
        );
        for pair in transitions.windows(2) {
            assert_ne!(pair[0], pair[1]);
        }
    }

    #[test]
    fn success_while_healthy_clears_failure_streak() {
        let mut tracker = HealthTracker::new(1, 3);
        assert_eq!(tracker.observe(true), Some(HealthState::Healthy));

        // Two failures, then a reinforcing success: the streak is gone, so
        // two further failures still stay under the threshold.
        assert_eq!(drive(&mut tracker, &[false, false, true, false, false]), vec![]);
        assert_eq!(tracker.state(), HealthState::Healthy);

        // A third consecutive failure trips it.
        assert_eq!(tracker.observe(false), Some(HealthState::Unhealthy));
    }

    #[test]
    fn failure_while_unhealthy_clears_success_streak() {
        let mut tracker = HealthTracker::new(3, 1);
        assert_eq!(drive(&mut tracker, &[true, true, false, true, true]), vec![]);
        assert_eq!(tracker.state(), HealthState::Unhealthy);
        assert_eq!(tracker.observe(true), Some(HealthState::Healthy));
    }

    #[test]
    fn failure_streak_does_not_leak_across_states() {
        // Failures accumulated while unhealthy must not count toward a later
        // unhealthy evaluation once the target has recovered.
        let mut tracker = HealthTracker::new(2, 2);
        assert_eq!(drive(&mut tracker, &[false, false, false]), vec![]);
        assert_eq!(drive(&mut tracker, &[true, true]), vec![HealthState::Healthy]);
        // One failure is under the threshold; the old streak is gone.
        assert_eq!(tracker.observe(false), None);
        assert_eq!(tracker.state(), HealthState::Healthy);
    }
}
