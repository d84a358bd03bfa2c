use crate::clipboard::Clipboard;
use crate::language::Language;
use crate::translate::{ServiceStatus, TranslateError, TranslationService};
use crate::ui::state::{Completion, Ticket, UiError, UiState};

/// Clears the loading flag if the request future is dropped before it
/// completes. After a `finish_*` transition the drop is a no-op.
struct InFlight<'a> {
    state: &'a mut UiState,
    ticket: Ticket,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.state.abandon(self.ticket) {
            tracing::debug!(ticket = self.ticket.id(), "request dropped before completion");
        }
    }
}

/// The translator form: owns its state and performs the one network call
/// each action needs.
pub struct TranslatorApp<S, C> {
    service: S,
    clipboard: C,
    state: UiState,
}

impl<S, C> TranslatorApp<S, C>
where
    S: TranslationService,
    C: Clipboard,
{
    pub fn new(service: S, clipboard: C) -> Self {
        Self {
            service,
            clipboard,
            state: UiState::new(),
        }
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn set_input_text<T: Into<String>>(&mut self, text: T) {
        self.state.set_input_text(text);
    }

    pub fn push_input_line(&mut self, line: &str) {
        self.state.push_input_line(line);
    }

    pub fn set_source_language(&mut self, language: Language) {
        self.state.set_source_language(language);
    }

    pub fn set_target_language(&mut self, language: Language) {
        self.state.set_target_language(language);
    }

    pub fn swap_languages(&mut self) {
        self.state.swap_languages();
    }

    pub fn clear(&mut self) {
        self.state.clear();
    }

    /// Translates the input text. On failure the error is also left in the
    /// state for rendering.
    pub async fn submit(&mut self) -> Result<(), UiError> {
        let (ticket, request) = self.state.begin_translate()?;
        let guard = InFlight {
            state: &mut self.state,
            ticket,
        };

        let result = self.service.translate(request).await;
        if let Err(e) = &result {
            tracing::warn!(error = %e, "translation failed");
        }
        settle(guard.state.finish_translate(ticket, result))
    }

    /// Fetches the diagnostic sample pair and loads it into the form.
    pub async fn run_self_test(&mut self) -> Result<(), UiError> {
        let ticket = self.state.begin_self_test()?;
        let guard = InFlight {
            state: &mut self.state,
            ticket,
        };

        let result = self.service.self_test().await;
        if let Err(e) = &result {
            tracing::warn!(error = %e, "self-test failed");
        }
        settle(guard.state.finish_self_test(ticket, result))
    }

    /// Liveness ping. Does not touch the form state.
    pub async fn check_status(&self) -> Result<ServiceStatus, TranslateError> {
        self.service.status().await
    }

    /// Best effort: returns whether the output reached the clipboard.
    pub fn copy_output(&mut self) -> bool {
        if !self.state.can_copy() {
            return false;
        }
        match self.clipboard.set_text(self.state.output_text()) {
            Ok(()) => true,
            Err(e) => {
                tracing::debug!(error = %e, "copy to clipboard failed");
                false
            }
        }
    }
}

fn settle(completion: Completion) -> Result<(), UiError> {
    match completion {
        Completion::Applied | Completion::Stale => Ok(()),
        Completion::Failed(message) => Err(UiError::Request(message)),
    }
}
