//! Narrative state owned by the sequencer for the lifetime of a session.

use lovenote_core::rng::DeterministicRng;
use serde::Serialize;

use super::scene::RevealSlot;

/// Sub-state of the active scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenePhase {
    /// At least one reveal is still running.
    Revealing,
    /// Every reveal has completed.
    Ready,
}

/// Displacement of the decline control from its resting position, in layout
/// units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DecoyOffset {
    /// Horizontal displacement.
    pub x: f64,
    /// Vertical displacement.
    pub y: f64,
}

impl DecoyOffset {
    /// The resting position.
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    /// A new offset with each axis drawn uniformly from `[-bound, bound)`.
    #[must_use]
    pub fn random(rng: &mut dyn DeterministicRng, bound: f64) -> Self {
        let x = rng.next_f64().mul_add(2.0, -1.0) * bound;
        let y = rng.next_f64().mul_add(2.0, -1.0) * bound;
        Self { x, y }
    }

    /// Whether both axes lie within `bound` of the origin.
    #[must_use]
    pub fn within(&self, bound: f64) -> bool {
        self.x.abs() <= bound && self.y.abs() <= bound
    }
}

/// Result of marking a reveal slot complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotCompletion {
    /// Other reveals are still running.
    Pending,
    /// That was the last one; the scene is now ready.
    SceneReady,
    /// The slot was not outstanding (already complete, or not part of the
    /// scene).
    Ignored,
}

/// Everything that changes while the reader moves through the script.
#[derive(Debug, Clone, PartialEq)]
pub struct NarrativeState {
    scene_index: usize,
    phase: ScenePhase,
    outstanding: Vec<RevealSlot>,
    decoy: DecoyOffset,
    decoy_moves: u32,
    accepted: bool,
}

impl NarrativeState {
    /// Fresh state at scene 0, revealing. The sequencer calls
    /// [`NarrativeState::enter_scene`] immediately to bind the first scene's
    /// reveals.
    #[must_use]
    pub fn new() -> Self {
        Self {
            scene_index: 0,
            phase: ScenePhase::Revealing,
            outstanding: Vec::new(),
            decoy: DecoyOffset::ORIGIN,
            decoy_moves: 0,
            accepted: false,
        }
    }

    /// Makes `index` the active scene with the given reveals outstanding and
    /// resets per-scene state. Returns the resulting phase.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if `index` would move the narrative backwards.
    pub fn enter_scene(&mut self, index: usize, reveals: &[RevealSlot]) -> ScenePhase {
        debug_assert!(
            index >= self.scene_index,
            "scene index must not decrease: {} -> {index}",
            self.scene_index
        );
        self.scene_index = index;
        self.outstanding = reveals.to_vec();
        self.decoy = DecoyOffset::ORIGIN;
        self.decoy_moves = 0;
        self.phase = if self.outstanding.is_empty() {
            ScenePhase::Ready
        } else {
            ScenePhase::Revealing
        };
        self.phase
    }

    /// Marks one reveal of the active scene complete.
    pub fn complete_reveal(&mut self, slot: RevealSlot) -> SlotCompletion {
        let Some(position) = self.outstanding.iter().position(|s| *s == slot) else {
            return SlotCompletion::Ignored;
        };
        self.outstanding.remove(position);
        if self.outstanding.is_empty() {
            self.phase = ScenePhase::Ready;
            SlotCompletion::SceneReady
        } else {
            SlotCompletion::Pending
        }
    }

    /// Records a new decoy position.
    pub fn move_decoy(&mut self, offset: DecoyOffset) {
        self.decoy = offset;
        self.decoy_moves += 1;
    }

    /// Records that the proposal was accepted.
    pub fn mark_accepted(&mut self) {
        self.accepted = true;
    }

    /// The active scene.
    #[must_use]
    pub fn scene_index(&self) -> usize {
        self.scene_index
    }

    /// Sub-state of the active scene.
    #[must_use]
    pub fn phase(&self) -> ScenePhase {
        self.phase
    }

    /// Reveals of the active scene that have not completed.
    #[must_use]
    pub fn outstanding(&self) -> &[RevealSlot] {
        &self.outstanding
    }

    /// Current decoy displacement.
    #[must_use]
    pub fn decoy(&self) -> DecoyOffset {
        self.decoy
    }

    /// How many times the decoy has moved in the active scene.
    #[must_use]
    pub fn decoy_moves(&self) -> u32 {
        self.decoy_moves
    }

    /// Whether the proposal has been accepted.
    #[must_use]
    pub fn accepted(&self) -> bool {
        self.accepted
    }
}

impl Default for NarrativeState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use lovenote_test_support::SequenceRng;

    use super::*;

    #[test]
    fn test_scene_becomes_ready_after_last_outstanding_reveal() {
        // Arrange
        let mut state = NarrativeState::new();
        state.enter_scene(0, &[RevealSlot::Text, RevealSlot::Artwork]);

        // Act
        let first = state.complete_reveal(RevealSlot::Artwork);
        let second = state.complete_reveal(RevealSlot::Text);

        // Assert
        assert_eq!(first, SlotCompletion::Pending);
        assert_eq!(second, SlotCompletion::SceneReady);
        assert_eq!(state.phase(), ScenePhase::Ready);
    }

    #[test]
    fn test_repeated_completion_is_ignored() {
        let mut state = NarrativeState::new();
        state.enter_scene(0, &[RevealSlot::Text]);

        assert_eq!(
            state.complete_reveal(RevealSlot::Text),
            SlotCompletion::SceneReady
        );
        assert_eq!(
            state.complete_reveal(RevealSlot::Text),
            SlotCompletion::Ignored
        );
        assert_eq!(
            state.complete_reveal(RevealSlot::Artwork),
            SlotCompletion::Ignored
        );
    }

    #[test]
    fn test_scene_without_reveals_is_ready_on_entry() {
        let mut state = NarrativeState::new();

        let phase = state.enter_scene(5, &[]);

        assert_eq!(phase, ScenePhase::Ready);
        assert_eq!(state.scene_index(), 5);
    }

    #[test]
    fn test_entering_a_scene_resets_the_decoy() {
        // Arrange
        let mut state = NarrativeState::new();
        state.enter_scene(5, &[]);
        state.move_decoy(DecoyOffset { x: 40.0, y: -12.5 });

        // Act
        state.enter_scene(6, &[]);

        // Assert
        assert_eq!(state.decoy(), DecoyOffset::ORIGIN);
        assert_eq!(state.decoy_moves(), 0);
    }

    #[test]
    fn test_random_decoy_offset_spans_the_bound() {
        let mut rng = SequenceRng::new(vec![0.0, 0.5, 0.75, 0.25]);

        let first = DecoyOffset::random(&mut rng, 100.0);
        let second = DecoyOffset::random(&mut rng, 100.0);

        assert_eq!(first, DecoyOffset { x: -100.0, y: 0.0 });
        assert_eq!(second, DecoyOffset { x: 50.0, y: -50.0 });
        assert!(first.within(100.0));
        assert!(second.within(100.0));
    }
}
