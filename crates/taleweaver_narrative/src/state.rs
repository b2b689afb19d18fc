//! The running narrative buffer.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Accumulated story text and the most recent generated segment.
///
/// Segments are trimmed on entry. `last_segment` never carries surrounding
/// whitespace; `story_so_far` starts with a space only when a continuation
/// was appended to an idle story.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Getters)]
pub struct NarrativeState {
    /// Every segment so far, joined by single spaces
    story_so_far: String,
    /// The newest segment on its own
    last_segment: String,
}

impl NarrativeState {
    /// An empty narrative.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a story is in progress.
    pub fn is_active(&self) -> bool {
        !self.story_so_far.is_empty()
    }

    /// Discards the accumulated story. The last segment is kept until a new
    /// one replaces it.
    pub fn reset(&mut self) {
        self.story_so_far.clear();
    }

    /// Seeds the story with an opening segment.
    ///
    /// # Examples
    ///
    /// ```
    /// use taleweaver_narrative::NarrativeState;
    ///
    /// let mut state = NarrativeState::new();
    /// state.begin("  The keeper lit the lamp.\n");
    /// assert_eq!(state.story_so_far(), "The keeper lit the lamp.");
    /// assert_eq!(state.story_so_far(), state.last_segment());
    /// ```
    pub fn begin(&mut self, segment: &str) {
        let segment = segment.trim();
        self.story_so_far = segment.to_string();
        self.last_segment = segment.to_string();
    }

    /// Appends a continuation, separated from the existing story by one space.
    ///
    /// The separator is written even when no story is in progress, so the
    /// story always ends with `" "` followed by the newest segment.
    ///
    /// # Examples
    ///
    /// ```
    /// use taleweaver_narrative::NarrativeState;
    ///
    /// let mut state = NarrativeState::new();
    /// state.begin("The keeper lit the lamp.");
    /// state.append("A ship emerged from the fog.");
    /// assert_eq!(
    ///     state.story_so_far(),
    ///     "The keeper lit the lamp. A ship emerged from the fog."
    /// );
    /// assert_eq!(state.last_segment(), "A ship emerged from the fog.");
    /// ```
    pub fn append(&mut self, segment: &str) {
        let segment = segment.trim();
        self.story_so_far.push(' ');
        self.story_so_far.push_str(segment);
        self.last_segment = segment.to_string();
    }

    /// Copies the current fields out.
    pub fn snapshot(&self) -> StorySnapshot {
        StorySnapshot {
            story_so_far: self.story_so_far.clone(),
            last_segment: self.last_segment.clone(),
        }
    }
}

/// The story as returned to callers after an operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Getters)]
pub struct StorySnapshot {
    /// Full accumulated story
    story_so_far: String,
    /// Segment produced by the operation
    last_segment: String,
}

impl StorySnapshot {
    /// Splits into `(story_so_far, last_segment)`.
    pub fn into_parts(self) -> (String, String) {
        (self.story_so_far, self.last_segment)
    }
}
