//! Form state of the translator and the transitions that mutate it.
//!
//! Nothing here performs I/O. A request is driven in two steps: a `begin_*`
//! transition that validates, flips the loading flag and hands back a
//! [`Ticket`], and a `finish_*` transition that applies the service result
//! for that ticket. Results for any ticket other than the outstanding one are
//! discarded.

use crate::language::Language;
use crate::translate::{DiagnosticSample, TranslateError, TranslationRequest, TranslationResponse};

pub const VALIDATION_MESSAGE: &str = "Please enter some text to translate";
pub const TRANSLATE_FALLBACK_MESSAGE: &str = "Translation failed. Please try again.";
pub const SELF_TEST_FAILED_MESSAGE: &str = "Test failed. Make sure the API is running.";

/// Identifies one request attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ticket(u64);

impl Ticket {
    pub fn id(self) -> u64 {
        self.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Translate,
    SelfTest,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Submitting { ticket: Ticket, action: Action },
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum UiError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Request(String),
    #[error("a request is already in progress")]
    Busy,
}

/// What a `finish_*` transition did with a result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Completion {
    Applied,
    Failed(String),
    Stale,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UiState {
    input_text: String,
    source_language: Language,
    target_language: Language,
    output_text: String,
    error: Option<String>,
    phase: Phase,
    next_ticket: u64,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            input_text: String::new(),
            source_language: Language::DEFAULT_SOURCE,
            target_language: Language::DEFAULT_TARGET,
            output_text: String::new(),
            error: None,
            phase: Phase::Idle,
            next_ticket: 0,
        }
    }
}

impl UiState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input_text(&self) -> &str {
        &self.input_text
    }

    pub fn output_text(&self) -> &str {
        &self.output_text
    }

    pub fn source_language(&self) -> Language {
        self.source_language
    }

    pub fn target_language(&self) -> Language {
        self.target_language
    }

    /// Message shown under the controls, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::Submitting { .. })
    }

    pub fn char_count(&self) -> usize {
        self.input_text.chars().count()
    }

    /// Enabled state of the translate control.
    pub fn can_submit(&self) -> bool {
        !self.is_loading() && !self.input_text.trim().is_empty()
    }

    /// Enabled state of the self-test control.
    pub fn can_run_test(&self) -> bool {
        !self.is_loading()
    }

    /// The copy control is only offered once there is output.
    pub fn can_copy(&self) -> bool {
        !self.output_text.is_empty()
    }

    pub fn set_input_text<S: Into<String>>(&mut self, text: S) {
        self.input_text = text.into();
    }

    pub fn push_input_line(&mut self, line: &str) {
        if !self.input_text.is_empty() {
            self.input_text.push('\n');
        }
        self.input_text.push_str(line);
    }

    pub fn set_source_language(&mut self, language: Language) {
        self.source_language = language;
    }

    pub fn set_target_language(&mut self, language: Language) {
        self.target_language = language;
    }

    /// Exchanges both the language pair and the text panes, so the previous
    /// output can be translated back without retyping it.
    pub fn swap_languages(&mut self) {
        std::mem::swap(&mut self.source_language, &mut self.target_language);
        std::mem::swap(&mut self.input_text, &mut self.output_text);
    }

    pub fn clear(&mut self) {
        self.input_text.clear();
        self.output_text.clear();
        self.error = None;
    }

    pub fn begin_translate(&mut self) -> Result<(Ticket, TranslationRequest), UiError> {
        if self.is_loading() {
            return Err(UiError::Busy);
        }
        if self.input_text.trim().is_empty() {
            self.error = Some(VALIDATION_MESSAGE.to_owned());
            return Err(UiError::Validation(VALIDATION_MESSAGE.to_owned()));
        }

        let ticket = self.start(Action::Translate);
        let request = TranslationRequest {
            text: self.input_text.clone(),
            input_language: self.source_language,
            output_language: self.target_language,
        };
        Ok((ticket, request))
    }

    pub fn finish_translate(
        &mut self,
        ticket: Ticket,
        result: Result<TranslationResponse, TranslateError>,
    ) -> Completion {
        if !self.settle(ticket) {
            return Completion::Stale;
        }
        match result {
            Ok(response) => {
                self.output_text = response.translated_text;
                Completion::Applied
            }
            Err(e) => {
                let message = e
                    .detail()
                    .map(str::to_owned)
                    .unwrap_or_else(|| TRANSLATE_FALLBACK_MESSAGE.to_owned());
                self.error = Some(message.clone());
                Completion::Failed(message)
            }
        }
    }

    pub fn begin_self_test(&mut self) -> Result<Ticket, UiError> {
        if self.is_loading() {
            return Err(UiError::Busy);
        }
        Ok(self.start(Action::SelfTest))
    }

    pub fn finish_self_test(
        &mut self,
        ticket: Ticket,
        result: Result<DiagnosticSample, TranslateError>,
    ) -> Completion {
        if !self.settle(ticket) {
            return Completion::Stale;
        }
        match result {
            Ok(sample) => {
                self.input_text = sample.test_input;
                self.output_text = sample.test_output;
                self.source_language = Language::DEFAULT_SOURCE;
                self.target_language = Language::DEFAULT_TARGET;
                Completion::Applied
            }
            Err(_) => {
                self.error = Some(SELF_TEST_FAILED_MESSAGE.to_owned());
                Completion::Failed(SELF_TEST_FAILED_MESSAGE.to_owned())
            }
        }
    }

    /// Drops the loading flag for `ticket` without applying a result, for a
    /// request whose future was dropped. No-op if `ticket` is not outstanding.
    pub fn abandon(&mut self, ticket: Ticket) -> bool {
        self.settle(ticket)
    }

    fn start(&mut self, action: Action) -> Ticket {
        let ticket = Ticket(self.next_ticket);
        self.next_ticket += 1;
        self.error = None;
        self.phase = Phase::Submitting { ticket, action };
        ticket
    }

    fn settle(&mut self, ticket: Ticket) -> bool {
        match self.phase {
            Phase::Submitting { ticket: current, .. } if current == ticket => {
                self.phase = Phase::Idle;
                true
            }
            _ => {
                tracing::debug!(ticket = ticket.id(), "discarding stale completion");
                false
            }
        }
    }
}
