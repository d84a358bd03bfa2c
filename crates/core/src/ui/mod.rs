mod component;
pub mod state;
pub mod view;

pub use component::TranslatorApp;
pub use state::{Action, Completion, Phase, Ticket, UiError, UiState};
