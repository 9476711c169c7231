//! The scene sequencer.
//!
//! Owns the narrative state, both reveal animators of the active scene and
//! the outbound event and notice channels. It is driven from a single task:
//! user commands go through [`SceneSequencer::handle`], reveal signals through
//! [`SceneSequencer::process_next_reveal`]. The only work that leaves that
//! task is the response submission, which is spawned once on accept and
//! reports back through the notice channel.

use std::sync::Arc;
use std::time::Duration;

use lovenote_core::clock::Clock;
use lovenote_core::effects::{Intensity, Origin, ParticleEffect};
use lovenote_core::event::EventMetadata;
use lovenote_core::rng::DeterministicRng;
use lovenote_core::submission::ResponseSubmitter;
use lovenote_reveal::application::animator::{RevealAnimator, RevealSignal};
use lovenote_reveal::domain::cadence::RevealCadence;
use lovenote_reveal::domain::target::{GridCell, RevealTarget};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time;
use tracing::{debug, info, instrument, trace, warn};
use uuid::Uuid;

use crate::domain::commands::{CommandOutcome, IgnoredReason, SceneCommand};
use crate::domain::events::{
    DecoyMoved, NarrativeEvent, NarrativeEventKind, ProposalAccepted, RevealCompleted,
    RevealProgressed, SceneEntered, SceneReady,
};
use crate::domain::notice::{Notice, NoticeLevel};
use crate::domain::scene::{RevealSlot, Scene, Transition};
use crate::domain::script::Script;
use crate::domain::state::{DecoyOffset, NarrativeState, ScenePhase, SlotCompletion};

/// Tunables for a session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SequencerConfig {
    /// Cadence of the typewriter line.
    pub text_cadence: RevealCadence,
    /// Cadence of the pixel-art picture.
    pub artwork_cadence: RevealCadence,
    /// Largest decoy displacement on either axis.
    pub decoy_bound: f64,
    /// How long shutdown waits for an in-flight submission.
    pub submission_grace: Duration,
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self {
            text_cadence: RevealCadence::TYPEWRITER,
            artwork_cadence: RevealCadence::PIXEL_ART,
            decoy_bound: 100.0,
            submission_grace: Duration::from_secs(2),
        }
    }
}

/// Everything the sequencer talks to.
pub struct Collaborators {
    /// Stores the response on accept.
    pub submitter: Arc<dyn ResponseSubmitter>,
    /// Celebration surface.
    pub effects: Arc<dyn ParticleEffect>,
    /// Timestamps for narrative events.
    pub clock: Arc<dyn Clock>,
    /// Decoy motion.
    pub rng: Box<dyn DeterministicRng>,
}

/// Receiving ends of the sequencer's outbound channels.
#[derive(Debug)]
pub struct SequencerFeeds {
    /// Every narrative event, in emission order.
    pub events: mpsc::UnboundedReceiver<NarrativeEvent>,
    /// Notices for the reader.
    pub notices: mpsc::UnboundedReceiver<Notice>,
}

/// Read-only snapshot of the active scene for rendering.
#[derive(Debug)]
pub struct SceneView<'a> {
    /// The active scene.
    pub scene: &'a Scene,
    /// Whether the scene may be left.
    pub phase: ScenePhase,
    /// Typewriter prefix visible so far.
    pub text: Option<&'a str>,
    /// Artwork cells visible so far, in reveal order.
    pub cells: Vec<GridCell>,
    /// Current decline control displacement.
    pub decoy: DecoyOffset,
    /// Whether the proposal has been accepted.
    pub accepted: bool,
}

/// Drives the reader through a script.
pub struct SceneSequencer {
    script: Arc<Script>,
    config: SequencerConfig,
    state: NarrativeState,
    text: RevealAnimator,
    artwork: RevealAnimator,
    text_target: Option<RevealTarget>,
    artwork_target: Option<RevealTarget>,
    submitter: Arc<dyn ResponseSubmitter>,
    effects: Arc<dyn ParticleEffect>,
    clock: Arc<dyn Clock>,
    rng: Box<dyn DeterministicRng>,
    session_id: Uuid,
    sequence: i64,
    events: mpsc::UnboundedSender<NarrativeEvent>,
    notices: mpsc::UnboundedSender<Notice>,
    submission: Option<JoinHandle<()>>,
}

impl SceneSequencer {
    /// Creates a sequencer and enters the first scene.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime, since entering the first
    /// scene starts its reveals.
    pub fn new(
        script: Arc<Script>,
        collaborators: Collaborators,
        config: SequencerConfig,
    ) -> (Self, SequencerFeeds) {
        let (events, events_rx) = mpsc::unbounded_channel();
        let (notices, notices_rx) = mpsc::unbounded_channel();
        let mut sequencer = Self {
            script,
            config,
            state: NarrativeState::new(),
            text: RevealAnimator::new(config.text_cadence),
            artwork: RevealAnimator::new(config.artwork_cadence),
            text_target: None,
            artwork_target: None,
            submitter: collaborators.submitter,
            effects: collaborators.effects,
            clock: collaborators.clock,
            rng: collaborators.rng,
            session_id: Uuid::new_v4(),
            sequence: 0,
            events,
            notices,
            submission: None,
        };
        info!(session_id = %sequencer.session_id, scenes = sequencer.script.len(), "session started");
        sequencer.enter_scene(0);
        (
            sequencer,
            SequencerFeeds {
                events: events_rx,
                notices: notices_rx,
            },
        )
    }

    /// Applies a user command. Commands that do not fit the current state
    /// are ignored, never rejected.
    #[instrument(skip(self), fields(scene_index = self.state.scene_index()))]
    pub fn handle(&mut self, command: SceneCommand) -> CommandOutcome {
        let outcome = match command {
            SceneCommand::Advance => self.advance(),
            SceneCommand::Decline => self.decline(),
            SceneCommand::Accept => self.accept(),
        };
        if let CommandOutcome::Ignored(reason) = outcome {
            debug!(?reason, "command ignored");
        }
        outcome
    }

    /// Waits for the next reveal signal of the active scene and applies it.
    ///
    /// Never resolves while no reveal is running. Cancel-safe, so it can sit
    /// in a `tokio::select!` next to the command source.
    pub async fn process_next_reveal(&mut self) -> (RevealSlot, RevealSignal) {
        let (slot, signal) = tokio::select! {
            signal = self.text.next_signal() => (RevealSlot::Text, signal),
            signal = self.artwork.next_signal() => (RevealSlot::Artwork, signal),
        };
        self.on_reveal(slot, signal);
        (slot, signal)
    }

    /// Runs the session until `commands` closes, then shuts down.
    pub async fn run(mut self, mut commands: mpsc::Receiver<SceneCommand>) {
        loop {
            tokio::select! {
                command = commands.recv() => match command {
                    Some(command) => {
                        self.handle(command);
                    }
                    None => break,
                },
                _ = self.process_next_reveal() => {}
            }
        }
        self.shutdown().await;
    }

    /// Stops both reveals and gives an in-flight submission up to
    /// `submission_grace` to settle before aborting it.
    pub async fn shutdown(&mut self) {
        self.text.cancel();
        self.artwork.cancel();
        if let Some(mut submission) = self.submission.take() {
            match time::timeout(self.config.submission_grace, &mut submission).await {
                Ok(Ok(())) => {}
                Ok(Err(error)) => warn!(%error, "response submission task failed"),
                Err(_) => {
                    submission.abort();
                    warn!(
                        grace_ms = self.config.submission_grace.as_millis(),
                        "response submission abandoned at shutdown"
                    );
                }
            }
        }
        info!(session_id = %self.session_id, "session ended");
    }

    /// Reveal ticker tasks that are still alive, across both animators.
    #[must_use]
    pub fn live_tickers(&self) -> usize {
        self.text.live_tickers() + self.artwork.live_tickers()
    }

    /// Snapshot of the active scene.
    ///
    /// # Panics
    ///
    /// Panics if the active index lies outside the script, which the
    /// sequencer never allows.
    #[must_use]
    pub fn view(&self) -> SceneView<'_> {
        let scene = self
            .script
            .scene(self.state.scene_index())
            .expect("active scene index is always within the script");
        SceneView {
            scene,
            phase: self.state.phase(),
            text: self
                .text_target
                .as_ref()
                .and_then(|target| target.visible_text(self.text.revealed())),
            cells: self
                .artwork_target
                .as_ref()
                .map(|target| target.visible_cells(self.artwork.revealed()).collect())
                .unwrap_or_default(),
            decoy: self.state.decoy(),
            accepted: self.state.accepted(),
        }
    }

    /// The narrative state.
    #[must_use]
    pub fn state(&self) -> &NarrativeState {
        &self.state
    }

    /// The script being played.
    #[must_use]
    pub fn script(&self) -> &Script {
        &self.script
    }

    /// Identifier stamped on every event of this session.
    #[must_use]
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    fn advance(&mut self) -> CommandOutcome {
        let index = self.state.scene_index();
        match self.script.transition_at(index) {
            Transition::Terminal => CommandOutcome::Ignored(IgnoredReason::Finished),
            Transition::Decision => CommandOutcome::Ignored(IgnoredReason::AwaitingDecision),
            Transition::AdvanceWhenRevealed if self.state.phase() != ScenePhase::Ready => {
                CommandOutcome::Ignored(IgnoredReason::StillRevealing)
            }
            Transition::AdvanceWhenRevealed => {
                self.enter_scene(index + 1);
                CommandOutcome::Applied
            }
        }
    }

    fn decline(&mut self) -> CommandOutcome {
        let index = self.state.scene_index();
        match self.script.transition_at(index) {
            Transition::Decision => {
                let offset = DecoyOffset::random(self.rng.as_mut(), self.config.decoy_bound);
                self.state.move_decoy(offset);
                debug!(
                    x = offset.x,
                    y = offset.y,
                    moves = self.state.decoy_moves(),
                    "decoy moved"
                );
                self.emit(NarrativeEventKind::DecoyMoved(DecoyMoved {
                    scene_index: index,
                    x: offset.x,
                    y: offset.y,
                }));
                CommandOutcome::Applied
            }
            Transition::Terminal => CommandOutcome::Ignored(IgnoredReason::Finished),
            Transition::AdvanceWhenRevealed => {
                CommandOutcome::Ignored(IgnoredReason::NotAtDecision)
            }
        }
    }

    fn accept(&mut self) -> CommandOutcome {
        let index = self.state.scene_index();
        match self.script.transition_at(index) {
            Transition::Decision if !self.state.accepted() => {
                self.state.mark_accepted();
                info!(scene_index = index, "proposal accepted");
                self.effects.celebrate(Intensity::Fireworks, Origin::CENTER);
                // The celebration must be queued before the submission can
                // report, so its outcome is the notice left on screen.
                let notice = self.script.notices().accepted.at(NoticeLevel::Celebration);
                self.notify(notice);
                self.spawn_submission();
                self.emit(NarrativeEventKind::ProposalAccepted(ProposalAccepted {
                    scene_index: index,
                }));
                self.enter_scene(self.script.final_index());
                CommandOutcome::Applied
            }
            Transition::Decision | Transition::Terminal => {
                CommandOutcome::Ignored(IgnoredReason::Finished)
            }
            Transition::AdvanceWhenRevealed => {
                CommandOutcome::Ignored(IgnoredReason::NotAtDecision)
            }
        }
    }

    fn spawn_submission(&mut self) {
        let submitter = Arc::clone(&self.submitter);
        let notices = self.notices.clone();
        let saved = self.script.notices().saved.at(NoticeLevel::Info);
        let failed = self.script.notices().failed.at(NoticeLevel::Warning);
        self.submission = Some(tokio::spawn(async move {
            let notice = match submitter.submit(true).await {
                Ok(id) => {
                    info!(response_id = %id, "response saved");
                    saved
                }
                Err(error) => {
                    warn!(%error, "response could not be saved");
                    failed
                }
            };
            if notices.send(notice).is_err() {
                trace!("no notice subscriber");
            }
        }));
    }

    fn enter_scene(&mut self, index: usize) {
        self.text.cancel();
        self.artwork.cancel();
        self.text_target = None;
        self.artwork_target = None;

        let script = Arc::clone(&self.script);
        let Some(scene) = script.scene(index) else {
            warn!(scene_index = index, "no scene at index");
            return;
        };
        let reveals = scene.reveal_targets();
        let slots: Vec<RevealSlot> = reveals.iter().map(|(slot, _)| *slot).collect();
        let phase = self.state.enter_scene(index, &slots);
        info!(scene_index = index, reveals = slots.len(), "scene entered");
        self.emit(NarrativeEventKind::SceneEntered(SceneEntered {
            scene_index: index,
        }));

        for (slot, target) in reveals {
            match slot {
                RevealSlot::Text => {
                    self.text.start(&target);
                    self.text_target = Some(target);
                }
                RevealSlot::Artwork => {
                    self.artwork.start(&target);
                    self.artwork_target = Some(target);
                }
            }
        }

        if phase == ScenePhase::Ready {
            self.emit(NarrativeEventKind::SceneReady(SceneReady {
                scene_index: index,
            }));
        }
    }

    fn on_reveal(&mut self, slot: RevealSlot, signal: RevealSignal) {
        let scene_index = self.state.scene_index();
        match signal {
            RevealSignal::Progress { revealed, total } => {
                self.emit(NarrativeEventKind::RevealProgressed(RevealProgressed {
                    scene_index,
                    slot,
                    revealed,
                    total,
                }));
            }
            RevealSignal::Completed => {
                self.emit(NarrativeEventKind::RevealCompleted(RevealCompleted {
                    scene_index,
                    slot,
                }));
                if self.state.complete_reveal(slot) == SlotCompletion::SceneReady {
                    info!(scene_index, "scene ready");
                    let has_artwork = self
                        .script
                        .scene(scene_index)
                        .and_then(Scene::artwork)
                        .is_some();
                    if has_artwork {
                        self.effects
                            .celebrate(Intensity::Sparkle, Origin::BELOW_ARTWORK);
                    }
                    self.emit(NarrativeEventKind::SceneReady(SceneReady { scene_index }));
                }
            }
        }
    }

    fn notify(&self, notice: Notice) {
        if self.notices.send(notice).is_err() {
            trace!("no notice subscriber");
        }
    }

    fn emit(&mut self, kind: NarrativeEventKind) {
        self.sequence += 1;
        let event = NarrativeEvent {
            metadata: EventMetadata {
                event_id: Uuid::new_v4(),
                event_type: kind.event_type().to_owned(),
                session_id: self.session_id,
                sequence_number: self.sequence,
                occurred_at: self.clock.now(),
            },
            kind,
        };
        if self.events.send(event).is_err() {
            trace!("no narrative event subscriber");
        }
    }
}
