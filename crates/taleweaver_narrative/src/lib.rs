//! Narrative state and story operations for Taleweaver.
//!
//! A story is opened with [`StoryTeller::start`] and extended with
//! [`StoryTeller::continue_story`]. Each call renders one of the fixed
//! [`StoryPrompt`] templates, asks the completion backend for a segment and
//! folds it into the session's [`NarrativeState`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod prompt;
mod session;
mod state;
mod teller;

pub use prompt::{PromptTemplate, PromptVariables, STORY_SO_FAR, StoryPrompt, USER_INPUT};
pub use session::{
    DEFAULT_MAX_SESSIONS, MAX_SESSION_KEY_LEN, SessionHandle, SessionKey, StoryStore,
};
pub use state::{NarrativeState, StorySnapshot};
pub use teller::{StoryTeller, continue_story, narrate, start_story};
