//! Scenes: one step of the narrative each.

use lovenote_reveal::domain::artwork::Artwork;
use lovenote_reveal::domain::target::RevealTarget;
use serde::{Deserialize, Serialize};

/// Which of a scene's two reveal animations a signal belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevealSlot {
    /// The typewriter line.
    Text,
    /// The pixel-art picture.
    Artwork,
}

/// How a scene is left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The reader continues once every reveal has completed.
    AdvanceWhenRevealed,
    /// Accept moves on; decline never does.
    Decision,
    /// Nothing follows.
    Terminal,
}

/// What a scene shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneContent {
    /// Typewriter text with an optional picture.
    Story {
        /// The line to type out.
        text: String,
        /// The resolved picture, if any.
        artwork: Option<Artwork>,
    },
    /// The accept/decline question.
    Decision {
        /// The question.
        prompt: String,
        /// Label of the accept control.
        accept_label: String,
        /// Label of the decline control.
        decline_label: String,
    },
    /// The closing screen.
    Finale {
        /// Large text inside the heart.
        headline: String,
        /// Line under the heart.
        caption: String,
    },
}

/// One validated scene.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scene {
    index: usize,
    content: SceneContent,
}

impl Scene {
    pub(crate) fn new(index: usize, content: SceneContent) -> Self {
        Self { index, content }
    }

    /// Position in the script.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// What the scene shows.
    #[must_use]
    pub fn content(&self) -> &SceneContent {
        &self.content
    }

    /// How the scene is left.
    #[must_use]
    pub fn transition(&self) -> Transition {
        match self.content {
            SceneContent::Story { .. } => Transition::AdvanceWhenRevealed,
            SceneContent::Decision { .. } => Transition::Decision,
            SceneContent::Finale { .. } => Transition::Terminal,
        }
    }

    /// The picture, for story scenes that have one.
    #[must_use]
    pub fn artwork(&self) -> Option<&Artwork> {
        match &self.content {
            SceneContent::Story { artwork, .. } => artwork.as_ref(),
            _ => None,
        }
    }

    /// The typewriter target, for story scenes.
    #[must_use]
    pub fn text_target(&self) -> Option<RevealTarget> {
        match &self.content {
            SceneContent::Story { text, .. } => Some(RevealTarget::text(text.as_str())),
            _ => None,
        }
    }

    /// The pixel-art target, for story scenes with a picture.
    #[must_use]
    pub fn artwork_target(&self) -> Option<RevealTarget> {
        self.artwork().map(Artwork::reveal_target)
    }

    /// Every reveal the scene runs on entry, tagged with its slot.
    #[must_use]
    pub fn reveal_targets(&self) -> Vec<(RevealSlot, RevealTarget)> {
        let text = self.text_target().map(|target| (RevealSlot::Text, target));
        let artwork = self
            .artwork_target()
            .map(|target| (RevealSlot::Artwork, target));
        text.into_iter().chain(artwork).collect()
    }
}

#[cfg(test)]
mod tests {
    use lovenote_reveal::domain::artwork::ArtworkLibrary;

    use super::*;

    #[test]
    fn test_story_scene_with_artwork_has_two_reveals() {
        let library = ArtworkLibrary::builtin();
        let scene = Scene::new(
            0,
            SceneContent::Story {
                text: "hola".to_owned(),
                artwork: library.get("bear").cloned(),
            },
        );

        let slots: Vec<RevealSlot> = scene
            .reveal_targets()
            .into_iter()
            .map(|(slot, _)| slot)
            .collect();

        assert_eq!(slots, vec![RevealSlot::Text, RevealSlot::Artwork]);
        assert_eq!(scene.transition(), Transition::AdvanceWhenRevealed);
    }

    #[test]
    fn test_decision_and_finale_have_no_reveals() {
        let decision = Scene::new(
            5,
            SceneContent::Decision {
                prompt: "?".to_owned(),
                accept_label: "sí".to_owned(),
                decline_label: "no".to_owned(),
            },
        );
        let finale = Scene::new(
            6,
            SceneContent::Finale {
                headline: "TE AMO".to_owned(),
                caption: String::new(),
            },
        );

        assert!(decision.reveal_targets().is_empty());
        assert!(finale.reveal_targets().is_empty());
        assert_eq!(decision.transition(), Transition::Decision);
        assert_eq!(finale.transition(), Transition::Terminal);
    }
}
