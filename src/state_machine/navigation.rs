use std::sync::Mutex;

/// Navigation lifecycle per robot platform. The core only observes this
/// state; reacting to it (replanning, announcing arrival) is the
/// action/LLM layer's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationState {
    Idle,
    Planning,
    Executing,
    Succeeded,
    Aborted,
}

/// Tracks navigation state transitions reported by an ingest-style
/// Provider (a goal-pose publish, an action-server status update).
pub struct NavigationStateTracker {
    state: Mutex<NavigationState>,
}

impl NavigationStateTracker {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(NavigationState::Idle),
        }
    }

    pub fn current_state(&self) -> NavigationState {
        *self.state.lock().unwrap()
    }

    /// A new goal pose was published.
    pub fn on_goal_pose_published(&self) {
        *self.state.lock().unwrap() = NavigationState::Planning;
    }

    /// An action-server status update arrived; `is_active` distinguishes
    /// an in-progress update from a terminal one.
    pub fn on_status_update(&self, is_active: bool, succeeded: bool) {
        let mut state = self.state.lock().unwrap();
        *state = if is_active {
            NavigationState::Executing
        } else if succeeded {
            NavigationState::Succeeded
        } else {
            NavigationState::Aborted
        };
    }
}

impl Default for NavigationStateTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn goal_pose_enters_planning() {
        let tracker = NavigationStateTracker::new();
        tracker.on_goal_pose_published();
        assert_eq!(tracker.current_state(), NavigationState::Planning);
    }

    #[test]
    fn active_status_enters_executing_then_terminal_status_resolves() {
        let tracker = NavigationStateTracker::new();
        tracker.on_goal_pose_published();
        tracker.on_status_update(true, false);
        assert_eq!(tracker.current_state(), NavigationState::Executing);

        tracker.on_status_update(false, true);
        assert_eq!(tracker.current_state(), NavigationState::Succeeded);
    }

    #[test]
    fn terminal_failure_is_aborted() {
        let tracker = NavigationStateTracker::new();
        tracker.on_status_update(false, false);
        assert_eq!(tracker.current_state(), NavigationState::Aborted);
    }
}
