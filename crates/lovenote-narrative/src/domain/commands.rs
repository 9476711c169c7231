//! User commands for the narrative and their outcomes.

/// A user action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneCommand {
    /// Continue to the next scene.
    Advance,
    /// Press the decline control on the decision scene.
    Decline,
    /// Press the accept control on the decision scene.
    Accept,
}

/// Why a command had no effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoredReason {
    /// The active scene is still revealing.
    StillRevealing,
    /// The decision scene only responds to accept and decline.
    AwaitingDecision,
    /// Accept and decline only apply on the decision scene.
    NotAtDecision,
    /// The final scene has been reached.
    Finished,
}

/// The result of handling a command. Commands never fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The command changed the narrative.
    Applied,
    /// The command did not apply in the current state.
    Ignored(IgnoredReason),
}
