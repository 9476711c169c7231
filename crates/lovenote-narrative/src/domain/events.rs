//! Domain events published by the scene sequencer.

use lovenote_core::event::{DomainEvent, EventMetadata};
use serde::{Deserialize, Serialize};

use super::scene::RevealSlot;

/// Emitted when a scene becomes active.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneEntered {
    /// The scene that became active.
    pub scene_index: usize,
}

/// Emitted on every reveal tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevealProgressed {
    /// The active scene.
    pub scene_index: usize,
    /// Which reveal ticked.
    pub slot: RevealSlot,
    /// Cells visible after the tick.
    pub revealed: usize,
    /// Content-bearing cells in the target.
    pub total: usize,
}

/// Emitted once per reveal, after its settle delay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevealCompleted {
    /// The active scene.
    pub scene_index: usize,
    /// Which reveal completed.
    pub slot: RevealSlot,
}

/// Emitted when the active scene can be left.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneReady {
    /// The active scene.
    pub scene_index: usize,
}

/// Emitted each time the decline control dodges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecoyMoved {
    /// The decision scene.
    pub scene_index: usize,
    /// Horizontal displacement.
    pub x: f64,
    /// Vertical displacement.
    pub y: f64,
}

/// Emitted when the proposal is accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProposalAccepted {
    /// The decision scene.
    pub scene_index: usize,
}

/// Event payload variants for the narrative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NarrativeEventKind {
    /// A scene became active.
    SceneEntered(SceneEntered),
    /// A reveal ticked.
    RevealProgressed(RevealProgressed),
    /// A reveal completed.
    RevealCompleted(RevealCompleted),
    /// The active scene can be left.
    SceneReady(SceneReady),
    /// The decline control dodged.
    DecoyMoved(DecoyMoved),
    /// The proposal was accepted.
    ProposalAccepted(ProposalAccepted),
}

/// Domain event envelope for the narrative.
#[derive(Debug, Clone)]
pub struct NarrativeEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event-specific payload.
    pub kind: NarrativeEventKind,
}

impl NarrativeEventKind {
    /// The event type name for this payload.
    #[must_use]
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::SceneEntered(_) => "narrative.scene_entered",
            Self::RevealProgressed(_) => "narrative.reveal_progressed",
            Self::RevealCompleted(_) => "narrative.reveal_completed",
            Self::SceneReady(_) => "narrative.scene_ready",
            Self::DecoyMoved(_) => "narrative.decoy_moved",
            Self::ProposalAccepted(_) => "narrative.proposal_accepted",
        }
    }
}

impl DomainEvent for NarrativeEvent {
    fn event_type(&self) -> &'static str {
        self.kind.event_type()
    }

    fn to_payload(&self) -> serde_json::Value {
        // Serialization of derived Serialize types to Value is infallible.
        serde_json::to_value(&self.kind).expect("NarrativeEventKind serialization is infallible")
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }
}
