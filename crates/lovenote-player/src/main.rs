//! Lovenote terminal player entry point.

use std::fs::File;
use std::io::{self, IsTerminal, Write};
use std::panic;
use std::sync::{Arc, Mutex};

use crossterm::event::EventStream;
use crossterm::terminal::{
    self, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use crossterm::{cursor, execute};
use lovenote_core::clock::SystemClock;
use lovenote_core::rng::{DeterministicRng, SystemRng};
use lovenote_narrative::application::sequencer::{
    Collaborators, SceneSequencer, SequencerConfig,
};
use lovenote_narrative::domain::scene::SceneContent;
use lovenote_narrative::domain::script::Script;
use lovenote_player::app::Player;
use lovenote_player::confetti::TerminalConfetti;
use lovenote_player::config::PlayerConfig;
use lovenote_player::error::PlayerError;
use lovenote_player::http::HttpResponseSubmitter;
use lovenote_player::render::Renderer;
use lovenote_reveal::domain::artwork::ArtworkLibrary;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), PlayerError> {
    let config = PlayerConfig::from_env()?;
    init_logging(&config)?;

    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        return Err(PlayerError::Config(
            "lovenote needs an interactive terminal (TTY)".to_string(),
        ));
    }

    let library = ArtworkLibrary::builtin();
    let script = match &config.script_path {
        Some(path) => Script::load(path, &library)?,
        None => Script::builtin(&library)?,
    };
    let farewell = script
        .scene(script.final_index())
        .and_then(|scene| match scene.content() {
            SceneContent::Finale { caption, .. } if !caption.is_empty() => Some(caption.clone()),
            _ => None,
        });
    let heart = library
        .get("heart")
        .cloned()
        .ok_or_else(|| PlayerError::Config("built-in heart artwork is missing".to_string()))?;
    let submitter = Arc::new(HttpResponseSubmitter::new(&config.api_url)?);
    info!(
        api = submitter.endpoint(),
        scenes = script.len(),
        seed = ?config.seed,
        "starting player"
    );

    let rng = || -> Box<dyn DeterministicRng> {
        match config.seed {
            Some(seed) => Box::new(SystemRng::seeded(seed)),
            None => Box::new(SystemRng::from_os()),
        }
    };
    let confetti = Arc::new(TerminalConfetti::new(rng()));
    let sequencer_config = SequencerConfig::default();
    let decoy_bound = sequencer_config.decoy_bound;
    let (sequencer, feeds) = SceneSequencer::new(
        Arc::new(script),
        Collaborators {
            submitter,
            effects: confetti.clone(),
            clock: Arc::new(SystemClock),
            rng: rng(),
        },
        sequencer_config,
    );

    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
    let size = terminal::size()?;

    let player = Player::new(
        sequencer,
        feeds,
        confetti,
        Renderer::new(stdout, heart),
        size,
        decoy_bound,
    );
    let result = player.run(EventStream::new()).await;

    restore_terminal()?;
    let summary = result?;
    info!(scene_index = summary.scene_index, accepted = summary.accepted, "player closed");
    if let (true, Some(farewell)) = (summary.accepted, farewell) {
        println!("\n\x1b[35m♥\x1b[0m {farewell}\n");
    }
    Ok(())
}

fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, cursor::Show, LeaveAlternateScreen)?;
    stdout.flush()
}

/// Logs go to `LOVENOTE_LOG_FILE` as JSON; the terminal belongs to the
/// player, so nothing is logged without it.
fn init_logging(config: &PlayerConfig) -> Result<(), PlayerError> {
    let Some(path) = &config.log_file else {
        return Ok(());
    };
    let file = File::create(path)?;
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(Mutex::new(file)),
        )
        .init();
    Ok(())
}
