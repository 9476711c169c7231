//! The player loop: keys in, frames out.

use std::io::{self, Write};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::{Stream, StreamExt};
use lovenote_core::event::DomainEvent;
use lovenote_narrative::application::sequencer::{SceneSequencer, SequencerFeeds};
use lovenote_narrative::domain::commands::SceneCommand;
use lovenote_narrative::domain::notice::Notice;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info, instrument};

use crate::confetti::TerminalConfetti;
use crate::error::PlayerError;
use crate::render::{Frame, Renderer};

const FRAME_INTERVAL: Duration = Duration::from_millis(33);
const NOTICE_TTL: Duration = Duration::from_secs(5);

/// What a key press means to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// Forward a command to the sequencer.
    Command(SceneCommand),
    /// Leave the player.
    Quit,
    /// Not bound.
    Unbound,
}

/// Maps a key press to an [`Input`].
#[must_use]
pub fn input_for(key: &KeyEvent) -> Input {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Input::Quit,
        KeyCode::Char('q' | 'Q') | KeyCode::Esc => Input::Quit,
        KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Right => {
            Input::Command(SceneCommand::Advance)
        }
        KeyCode::Char('y' | 'Y' | 's' | 'S') => Input::Command(SceneCommand::Accept),
        KeyCode::Char('n' | 'N') => Input::Command(SceneCommand::Decline),
        _ => Input::Unbound,
    }
}

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerSummary {
    /// The scene on screen when the player quit.
    pub scene_index: usize,
    /// Whether the proposal was accepted.
    pub accepted: bool,
}

struct ShownNotice {
    notice: Notice,
    until: Instant,
}

/// Owns the sequencer, confetti and renderer for one session.
pub struct Player<W: Write> {
    sequencer: SceneSequencer,
    feeds: SequencerFeeds,
    confetti: Arc<TerminalConfetti>,
    renderer: Renderer<W>,
    notice: Option<ShownNotice>,
    size: (u16, u16),
    decoy_bound: f64,
}

impl<W: Write> Player<W> {
    /// Assembles a player. `confetti` must be the effect the sequencer
    /// celebrates on.
    pub fn new(
        sequencer: SceneSequencer,
        feeds: SequencerFeeds,
        confetti: Arc<TerminalConfetti>,
        renderer: Renderer<W>,
        size: (u16, u16),
        decoy_bound: f64,
    ) -> Self {
        Self {
            sequencer,
            feeds,
            confetti,
            renderer,
            notice: None,
            size,
            decoy_bound,
        }
    }

    /// Runs until a quit key arrives or `input` ends.
    ///
    /// # Errors
    ///
    /// Returns `PlayerError::Io` if the terminal cannot be read or drawn to.
    #[instrument(skip_all, fields(session_id = %self.sequencer.session_id()))]
    pub async fn run<S>(mut self, mut input: S) -> Result<PlayerSummary, PlayerError>
    where
        S: Stream<Item = io::Result<Event>> + Unpin,
    {
        let mut frames = time::interval(FRAME_INTERVAL);
        frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                event = input.next() => match event {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        match input_for(&key) {
                            Input::Quit => break,
                            Input::Command(command) => {
                                let outcome = self.sequencer.handle(command);
                                debug!(?command, ?outcome, "key handled");
                            }
                            Input::Unbound => {}
                        }
                    }
                    Some(Ok(Event::Resize(width, height))) => self.size = (width, height),
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(e.into()),
                    None => break,
                },
                _ = self.sequencer.process_next_reveal() => {}
                Some(notice) = self.feeds.notices.recv() => {
                    info!(title = %notice.title, level = ?notice.level, "notice");
                    self.notice = Some(ShownNotice {
                        notice,
                        until: Instant::now() + NOTICE_TTL,
                    });
                }
                _ = frames.tick() => self.draw()?,
            }
            self.log_events();
        }

        self.sequencer.shutdown().await;
        let state = self.sequencer.state();
        Ok(PlayerSummary {
            scene_index: state.scene_index(),
            accepted: state.accepted(),
        })
    }

    /// Gives back the renderer's writer.
    pub fn into_writer(self) -> W {
        self.renderer.into_inner()
    }

    fn draw(&mut self) -> io::Result<()> {
        let now = Instant::now();
        if self.notice.as_ref().is_some_and(|shown| shown.until <= now) {
            self.notice = None;
        }
        let sparks = self.confetti.sparks(now, self.size.0, self.size.1);
        let frame = Frame {
            view: self.sequencer.view(),
            sparks: &sparks,
            notice: self.notice.as_ref().map(|shown| &shown.notice),
            size: self.size,
            decoy_bound: self.decoy_bound,
        };
        self.renderer.draw(&frame)
    }

    fn log_events(&mut self) {
        while let Ok(event) = self.feeds.events.try_recv() {
            debug!(
                event_type = event.event_type(),
                sequence = event.metadata().sequence_number,
                payload = %event.to_payload(),
                "narrative event"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crossterm::event::KeyEventState;
    use lovenote_core::clock::Clock;
    use lovenote_narrative::application::sequencer::{Collaborators, SequencerConfig};
    use lovenote_narrative::domain::script::Script;
    use lovenote_reveal::domain::artwork::ArtworkLibrary;
    use lovenote_test_support::{FixedClock, MockRng, RecordingSubmitter};
    use tokio::sync::mpsc;

    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn player(submitter: Arc<RecordingSubmitter>) -> Player<Vec<u8>> {
        let library = ArtworkLibrary::builtin();
        let script = Arc::new(Script::builtin(&library).unwrap());
        let confetti = Arc::new(TerminalConfetti::new(Box::new(MockRng)));
        let clock: Arc<dyn Clock> = Arc::new(FixedClock::valentines());
        let (sequencer, feeds) = SceneSequencer::new(
            script,
            Collaborators {
                submitter,
                effects: confetti.clone(),
                clock,
                rng: Box::new(MockRng),
            },
            SequencerConfig::default(),
        );
        let renderer = Renderer::new(Vec::new(), library.get("heart").unwrap().clone());
        Player::new(sequencer, feeds, confetti, renderer, (100, 40), 100.0)
    }

    fn key_stream(
        keys: mpsc::UnboundedReceiver<KeyEvent>,
    ) -> impl Stream<Item = io::Result<Event>> + Unpin {
        Box::pin(futures::stream::unfold(keys, |mut keys| async move {
            let key = keys.recv().await?;
            Some((Ok(Event::Key(key)), keys))
        }))
    }

    #[test]
    fn test_keys_map_to_commands() {
        assert_eq!(
            input_for(&key(KeyCode::Enter)),
            Input::Command(SceneCommand::Advance)
        );
        assert_eq!(
            input_for(&key(KeyCode::Char(' '))),
            Input::Command(SceneCommand::Advance)
        );
        assert_eq!(
            input_for(&key(KeyCode::Right)),
            Input::Command(SceneCommand::Advance)
        );
        assert_eq!(
            input_for(&key(KeyCode::Char('s'))),
            Input::Command(SceneCommand::Accept)
        );
        assert_eq!(
            input_for(&key(KeyCode::Char('y'))),
            Input::Command(SceneCommand::Accept)
        );
        assert_eq!(
            input_for(&key(KeyCode::Char('n'))),
            Input::Command(SceneCommand::Decline)
        );
        assert_eq!(input_for(&key(KeyCode::Char('x'))), Input::Unbound);
    }

    #[test]
    fn test_quit_keys() {
        let ctrl_c = KeyEvent {
            modifiers: KeyModifiers::CONTROL,
            ..key(KeyCode::Char('c'))
        };

        assert_eq!(input_for(&key(KeyCode::Char('q'))), Input::Quit);
        assert_eq!(input_for(&key(KeyCode::Esc)), Input::Quit);
        assert_eq!(input_for(&ctrl_c), Input::Quit);
        assert_eq!(input_for(&key(KeyCode::Char('c'))), Input::Unbound);
    }

    #[tokio::test(start_paused = true)]
    async fn test_quit_before_anything_happens() {
        // Arrange
        let submitter = Arc::new(RecordingSubmitter::new());
        let (keys, keys_rx) = mpsc::unbounded_channel();
        keys.send(key(KeyCode::Char('q'))).unwrap();

        // Act
        let summary = player(submitter.clone())
            .run(key_stream(keys_rx))
            .await
            .unwrap();

        // Assert
        assert_eq!(
            summary,
            PlayerSummary {
                scene_index: 0,
                accepted: false
            }
        );
        assert!(submitter.calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_playing_through_to_yes() {
        // Arrange
        let submitter = Arc::new(RecordingSubmitter::new());
        let (keys, keys_rx) = mpsc::unbounded_channel();
        let session = tokio::spawn(player(submitter.clone()).run(key_stream(keys_rx)));

        // Act
        for _ in 0..5 {
            time::sleep(Duration::from_secs(10)).await;
            keys.send(key(KeyCode::Enter)).unwrap();
        }
        time::sleep(Duration::from_secs(1)).await;
        keys.send(key(KeyCode::Char('n'))).unwrap();
        keys.send(key(KeyCode::Char('s'))).unwrap();
        time::sleep(Duration::from_secs(1)).await;
        keys.send(key(KeyCode::Char('q'))).unwrap();
        let summary = session.await.unwrap().unwrap();

        // Assert
        assert_eq!(
            summary,
            PlayerSummary {
                scene_index: 6,
                accepted: true
            }
        );
        assert_eq!(submitter.calls(), vec![true]);
    }
}
