//! Prompt templates for opening and continuing a story.
//!
//! Templates use `{name}` placeholders. `{{` and `}}` produce literal braces.
//! Substituted values are inserted verbatim and never re-scanned, so reader
//! text containing braces cannot inject further placeholders.

use std::collections::HashMap;
use taleweaver_error::{PromptError, PromptErrorKind};
use tracing::debug;

/// Variable holding the reader's latest input.
pub const USER_INPUT: &str = "user_input";

/// Variable holding the accumulated narrative.
pub const STORY_SO_FAR: &str = "story_so_far";

/// Named values substituted into a template.
pub type PromptVariables<'a> = HashMap<&'a str, &'a str>;

const OPENING: &str = "\
You are a skilled storyteller across all genres.
Based solely on the reader's input, infer:
1. The likely genre.
2. The setting (place, time, atmosphere).
3. The tone.

Then write a vivid and immersive opening scene for the story.
- Keep it under 200 words.
- Do not explicitly label the genre, setting, or tone; let the prose show them.
- Output only the story text.

Reader's input: {user_input}

Opening scene:";

const CONTINUATION: &str = "\
You are continuing a story that is already in progress.

Story so far:
{story_so_far}

The reader wants this to happen next: {user_input}

Continue the story from exactly where it leaves off.
- Keep the established voice, tense, point of view and style.
- Stay consistent with every established character, fact and event. Never contradict them.
- Weave in the reader's direction and advance at least one narrative thread.
- Write one to three paragraphs and no more than twelve sentences.
- End on an open moment that invites the next turn. Do not force a cliffhanger.
- Output only the new story text, with no titles, summaries or commentary about the story.

Continuation:";

/// A named template with its declared variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PromptTemplate {
    name: &'static str,
    template: &'static str,
    input_variables: &'static [&'static str],
}

impl PromptTemplate {
    /// Declares a template.
    pub const fn new(
        name: &'static str,
        template: &'static str,
        input_variables: &'static [&'static str],
    ) -> Self {
        Self {
            name,
            template,
            input_variables,
        }
    }

    /// Template name used in errors and logs.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Raw template text.
    pub fn template(&self) -> &'static str {
        self.template
    }

    /// Variables the template requires.
    pub fn input_variables(&self) -> &'static [&'static str] {
        self.input_variables
    }

    /// Placeholder names in order of appearance, escapes excluded.
    pub fn placeholders(&self) -> Vec<&'static str> {
        let template = self.template;
        let mut names = Vec::new();
        let mut rest = 0;
        while let Some(offset) = template[rest..].find(['{', '}']) {
            let at = rest + offset;
            let doubled = template[at + 1..].starts_with(&template[at..at + 1]);
            if doubled {
                rest = at + 2;
                continue;
            }
            if &template[at..at + 1] == "}" {
                rest = at + 1;
                continue;
            }
            match template[at + 1..].find('}') {
                Some(len) => {
                    names.push(&template[at + 1..at + 1 + len]);
                    rest = at + 2 + len;
                }
                None => break,
            }
        }
        names
    }

    /// Renders the template with the given variables.
    ///
    /// Every declared variable must be present, otherwise the first missing
    /// one is reported as [`PromptErrorKind::MissingVariable`].
    ///
    /// # Examples
    ///
    /// ```
    /// use taleweaver_narrative::{PromptTemplate, PromptVariables};
    ///
    /// let greeting = PromptTemplate::new("greeting", "Hello, {name}! {{braces}}", &["name"]);
    /// let vars = PromptVariables::from([("name", "{reader}")]);
    ///
    /// assert_eq!(greeting.format(&vars).unwrap(), "Hello, {reader}! {braces}");
    /// assert!(greeting.format(&PromptVariables::new()).is_err());
    /// ```
    pub fn format(&self, vars: &PromptVariables<'_>) -> Result<String, PromptError> {
        if let Some(missing) = self
            .input_variables
            .iter()
            .find(|name| !vars.contains_key(*name))
        {
            return Err(self.missing(missing));
        }

        let template = self.template;
        let extra: usize = vars.values().map(|value| value.len()).sum();
        let mut rendered = String::with_capacity(template.len() + extra);
        let mut rest = 0;

        while let Some(offset) = template[rest..].find(['{', '}']) {
            let at = rest + offset;
            rendered.push_str(&template[rest..at]);
            let brace = &template[at..at + 1];

            if template[at + 1..].starts_with(brace) {
                rendered.push_str(brace);
                rest = at + 2;
                continue;
            }
            if brace == "}" {
                rendered.push('}');
                rest = at + 1;
                continue;
            }

            let len = template[at + 1..].find('}').ok_or_else(|| {
                PromptError::new(PromptErrorKind::UnterminatedPlaceholder {
                    template: self.name.to_string(),
                })
            })?;
            let name = &template[at + 1..at + 1 + len];
            let value = vars.get(name).ok_or_else(|| self.missing(name))?;
            rendered.push_str(value);
            rest = at + 2 + len;
        }
        rendered.push_str(&template[rest..]);

        debug!(template = self.name, length = rendered.len(), "Rendered prompt");
        Ok(rendered)
    }

    #[track_caller]
    fn missing(&self, variable: &str) -> PromptError {
        PromptError::new(PromptErrorKind::MissingVariable {
            template: self.name.to_string(),
            variable: variable.to_string(),
        })
    }
}

/// The two fixed story prompts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum StoryPrompt {
    /// Opens a new story from the reader's premise.
    #[display("opening")]
    Opening,
    /// Extends an existing story with the reader's direction.
    #[display("continuation")]
    Continuation,
}

impl StoryPrompt {
    /// The template behind this prompt.
    pub fn template(self) -> PromptTemplate {
        match self {
            StoryPrompt::Opening => PromptTemplate::new("opening", OPENING, &[USER_INPUT]),
            StoryPrompt::Continuation => {
                PromptTemplate::new("continuation", CONTINUATION, &[STORY_SO_FAR, USER_INPUT])
            }
        }
    }

    /// Shorthand for `self.template().format(vars)`.
    pub fn format(self, vars: &PromptVariables<'_>) -> Result<String, PromptError> {
        self.template().format(vars)
    }
}
