//! Poll outcome types and user narratives.

/// Why the poller was started; selects the timeout narrative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollAction {
    Start,
    Scale,
}

/// Terminal state of a poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// The requested number of instances reported running.
    Running(u32),
    /// The deadline passed first; the cluster may still converge.
    TimedOut,
    /// The cluster cannot place the requested instances.
    PlacementFailed,
}

impl PollOutcome {
    #[must_use]
    pub fn is_running(self) -> bool {
        matches!(self, Self::Running(_))
    }
}

/// Headline printed when a poll times out.
#[must_use]
pub fn timeout_headline(action: PollAction) -> &'static str {
    match action {
        PollAction::Start => "Timed out waiting for the container to come up.",
        PollAction::Scale => "Timed out waiting for the container to scale.",
    }
}

/// Guidance lines printed after the timeout headline.
#[must_use]
pub fn timeout_guidance(action: PollAction, app_name: &str) -> Vec<String> {
    let mut lines = match action {
        PollAction::Start => vec![
            "This typically happens because docker layers can take time to download.".to_string(),
            "Lattice is still downloading your application in the background.".to_string(),
        ],
        PollAction::Scale => {
            vec!["Lattice is still scaling your application in the background.".to_string()]
        }
    };
    lines.push(format!("To view logs:\n\tltc logs {app_name}"));
    lines.push(format!("To view status:\n\tltc status {app_name}"));
    lines
}
