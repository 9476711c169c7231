//! The narrative script: scenes and notice text, loaded from YAML and
//! validated before a session starts.

use std::path::{Path, PathBuf};

use lovenote_reveal::domain::artwork::ArtworkLibrary;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

use super::notice::NoticeText;
use super::scene::{Scene, SceneContent, Transition};

const DEFAULT_SCRIPT: &str = include_str!("../../script/default.yaml");

/// Errors raised while loading a script. All of them are startup errors.
#[derive(Debug, Error)]
pub enum ScriptError {
    /// The script file could not be read.
    #[error("failed to read script {path}: {source}")]
    Io {
        /// The file that was requested.
        path: PathBuf,
        /// The underlying error.
        source: std::io::Error,
    },

    /// The YAML is malformed or does not match the script shape.
    #[error("invalid script: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// The script needs at least one story, a decision and a finale.
    #[error("script has {0} scenes; at least 3 are required")]
    TooShort(usize),

    /// A scene of the wrong kind sits at the given position.
    #[error("scene {index} must be a {expected} scene, found {found}")]
    UnexpectedScene {
        /// Zero-based scene index.
        index: usize,
        /// Kind required at that position.
        expected: &'static str,
        /// Kind found at that position.
        found: &'static str,
    },

    /// A scene names a picture the library does not have.
    #[error("scene {index} references unknown artwork '{artwork}'")]
    UnknownArtwork {
        /// Zero-based scene index.
        index: usize,
        /// The unresolved identifier.
        artwork: String,
    },
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ScriptDocument {
    scenes: Vec<SceneDocument>,
    notices: ScriptNotices,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum SceneDocument {
    Story {
        text: String,
        #[serde(default)]
        artwork: Option<String>,
    },
    Decision {
        prompt: String,
        accept_label: String,
        decline_label: String,
    },
    Finale {
        headline: String,
        caption: String,
    },
}

impl SceneDocument {
    fn kind(&self) -> &'static str {
        match self {
            Self::Story { .. } => "story",
            Self::Decision { .. } => "decision",
            Self::Finale { .. } => "finale",
        }
    }
}

/// Notice text shown around the decision.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScriptNotices {
    /// Shown the moment the proposal is accepted.
    pub accepted: NoticeText,
    /// Shown once the backend has stored the response.
    pub saved: NoticeText,
    /// Shown if the response could not be stored.
    pub failed: NoticeText,
}

/// A validated script.
///
/// Invariants: at least one story scene, every story scene before the
/// decision scene, exactly one decision scene immediately followed by the
/// finale, which is last. Every artwork reference is resolved.
#[derive(Debug, Clone)]
pub struct Script {
    scenes: Vec<Scene>,
    notices: ScriptNotices,
}

impl Script {
    /// The script that ships with the greeting.
    ///
    /// # Errors
    ///
    /// Returns `ScriptError` if the embedded script does not validate
    /// against `library`.
    pub fn builtin(library: &ArtworkLibrary) -> Result<Self, ScriptError> {
        Self::from_yaml(DEFAULT_SCRIPT, library)
    }

    /// Loads and validates a script file.
    ///
    /// # Errors
    ///
    /// Returns `ScriptError::Io` if the file cannot be read, otherwise the
    /// same errors as [`Script::from_yaml`].
    pub fn load(path: &Path, library: &ArtworkLibrary) -> Result<Self, ScriptError> {
        let yaml = std::fs::read_to_string(path).map_err(|source| ScriptError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), "loading narrative script");
        Self::from_yaml(&yaml, library)
    }

    /// Parses and validates a script.
    ///
    /// # Errors
    ///
    /// Returns `ScriptError::Parse` for malformed YAML, `TooShort` or
    /// `UnexpectedScene` when the scene order is wrong, and `UnknownArtwork`
    /// when a picture cannot be resolved.
    pub fn from_yaml(yaml: &str, library: &ArtworkLibrary) -> Result<Self, ScriptError> {
        let document: ScriptDocument = serde_yaml::from_str(yaml)?;
        let count = document.scenes.len();
        if count < 3 {
            return Err(ScriptError::TooShort(count));
        }

        let mut scenes = Vec::with_capacity(count);
        for (index, scene) in document.scenes.into_iter().enumerate() {
            let expected = if index == count - 1 {
                "finale"
            } else if index == count - 2 {
                "decision"
            } else {
                "story"
            };
            if scene.kind() != expected {
                return Err(ScriptError::UnexpectedScene {
                    index,
                    expected,
                    found: scene.kind(),
                });
            }

            let content = match scene {
                SceneDocument::Story { text, artwork } => {
                    let artwork = artwork
                        .map(|id| {
                            library
                                .get(&id)
                                .cloned()
                                .ok_or(ScriptError::UnknownArtwork { index, artwork: id })
                        })
                        .transpose()?;
                    SceneContent::Story { text, artwork }
                }
                SceneDocument::Decision {
                    prompt,
                    accept_label,
                    decline_label,
                } => SceneContent::Decision {
                    prompt,
                    accept_label,
                    decline_label,
                },
                SceneDocument::Finale { headline, caption } => {
                    SceneContent::Finale { headline, caption }
                }
            };
            scenes.push(Scene::new(index, content));
        }

        debug!(scenes = scenes.len(), "narrative script validated");
        Ok(Self {
            scenes,
            notices: document.notices,
        })
    }

    /// All scenes, in order.
    #[must_use]
    pub fn scenes(&self) -> &[Scene] {
        &self.scenes
    }

    /// The scene at `index`.
    #[must_use]
    pub fn scene(&self, index: usize) -> Option<&Scene> {
        self.scenes.get(index)
    }

    /// Number of scenes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    /// Always `false`: a valid script has at least three scenes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    /// Index of the decision scene.
    #[must_use]
    pub fn decision_index(&self) -> usize {
        self.scenes.len() - 2
    }

    /// Index of the finale.
    #[must_use]
    pub fn final_index(&self) -> usize {
        self.scenes.len() - 1
    }

    /// Notice text.
    #[must_use]
    pub fn notices(&self) -> &ScriptNotices {
        &self.notices
    }

    /// Transition of the scene at `index`; indices past the end are terminal.
    #[must_use]
    pub fn transition_at(&self, index: usize) -> Transition {
        self.scene(index)
            .map_or(Transition::Terminal, Scene::transition)
    }
}
