//! Story operations: open a story, then keep extending it.
//!
//! Each operation formats a prompt, makes one backend call and updates the
//! narrative. A failed call leaves the narrative as it was before the call
//! (after the reset, for [`start_story`]).

use crate::prompt::{PromptVariables, STORY_SO_FAR, StoryPrompt, USER_INPUT};
use crate::{NarrativeState, SessionKey, StorySnapshot, StoryStore};
use taleweaver_core::GenerateRequest;
use taleweaver_error::{GenerationError, TaleweaverErrorKind, TaleweaverResult};
use taleweaver_interface::TaleweaverDriver;
use tracing::{debug, error, info, instrument, warn};

/// Renders `prompt` and asks the backend for one trimmed segment.
///
/// Prompt errors are returned before any backend call. Backend failures and
/// blank output become [`GenerationError`].
#[instrument(skip(driver, vars), fields(provider = driver.provider_name(), model = driver.model_name()))]
pub async fn narrate<D>(
    driver: &D,
    prompt: StoryPrompt,
    vars: &PromptVariables<'_>,
) -> TaleweaverResult<String>
where
    D: TaleweaverDriver + ?Sized,
{
    let text = prompt.format(vars)?;
    debug!(prompt_len = text.len(), "Requesting segment");

    let response = driver
        .generate(&GenerateRequest::prompt(text))
        .await
        .map_err(|e| {
            let cause = match e.kind() {
                TaleweaverErrorKind::Gemini(gemini) if gemini.kind.is_authentication() => {
                    error!(error = %e, "Completion backend rejected the credentials");
                    gemini.kind.summary()
                }
                TaleweaverErrorKind::Gemini(gemini) => {
                    warn!(error = %e, "Completion backend failed");
                    gemini.kind.summary()
                }
                _ => {
                    warn!(error = %e, "Completion backend failed");
                    "completion backend failed"
                }
            };
            GenerationError::new(cause)
        })?;

    let segment = response.joined_text().trim().to_string();
    if segment.is_empty() {
        warn!("Completion backend returned blank text");
        return Err(GenerationError::new("completion backend returned no text").into());
    }

    debug!(segment_len = segment.len(), "Received segment");
    Ok(segment)
}

/// Resets `state` and seeds it with a freshly generated opening.
pub async fn start_story<D>(
    driver: &D,
    state: &mut NarrativeState,
    user_input: &str,
) -> TaleweaverResult<StorySnapshot>
where
    D: TaleweaverDriver + ?Sized,
{
    state.reset();
    let vars = PromptVariables::from([(USER_INPUT, user_input)]);
    let segment = narrate(driver, StoryPrompt::Opening, &vars).await?;
    state.begin(&segment);
    Ok(state.snapshot())
}

/// Extends `state` with a continuation guided by `user_input`.
///
/// An idle narrative is continued from an empty context.
pub async fn continue_story<D>(
    driver: &D,
    state: &mut NarrativeState,
    user_input: &str,
) -> TaleweaverResult<StorySnapshot>
where
    D: TaleweaverDriver + ?Sized,
{
    if !state.is_active() {
        debug!("Continuing a story that was never started");
    }
    let segment = {
        let vars = PromptVariables::from([
            (STORY_SO_FAR, state.story_so_far().as_str()),
            (USER_INPUT, user_input),
        ]);
        narrate(driver, StoryPrompt::Continuation, &vars).await?
    };
    state.append(&segment);
    Ok(state.snapshot())
}

/// Runs story operations against sessions in a [`StoryStore`].
///
/// Operations on one session are serialized by that session's lock, which
/// is held across the backend call.
#[derive(Debug)]
pub struct StoryTeller<D> {
    driver: D,
    store: StoryStore,
}

impl<D: TaleweaverDriver> StoryTeller<D> {
    /// Creates a teller backed by `driver`.
    pub fn new(driver: D, store: StoryStore) -> Self {
        Self { driver, store }
    }

    /// The completion backend.
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// The session registry.
    pub fn store(&self) -> &StoryStore {
        &self.store
    }

    /// Starts a new story in `session`, discarding any story in progress.
    #[instrument(skip(self, user_input), fields(session = %session, input_len = user_input.len()))]
    pub async fn start(
        &self,
        session: &SessionKey,
        user_input: &str,
    ) -> TaleweaverResult<StorySnapshot> {
        let handle = self.store.session(session);
        let mut state = handle.lock().await;
        let snapshot = start_story(&self.driver, &mut state, user_input).await?;
        info!(
            story_len = snapshot.story_so_far().len(),
            "Story started"
        );
        Ok(snapshot)
    }

    /// Continues the story in `session`.
    #[instrument(skip(self, user_input), fields(session = %session, input_len = user_input.len()))]
    pub async fn continue_story(
        &self,
        session: &SessionKey,
        user_input: &str,
    ) -> TaleweaverResult<StorySnapshot> {
        let handle = self.store.session(session);
        let mut state = handle.lock().await;
        let snapshot = continue_story(&self.driver, &mut state, user_input).await?;
        info!(
            story_len = snapshot.story_so_far().len(),
            segment_len = snapshot.last_segment().len(),
            "Story continued"
        );
        Ok(snapshot)
    }

    /// Current story in `session`; empty if the session does not exist.
    pub async fn snapshot(&self, session: &SessionKey) -> StorySnapshot {
        match self.store.existing(session) {
            Some(handle) => handle.lock().await.snapshot(),
            None => StorySnapshot::default(),
        }
    }
}
