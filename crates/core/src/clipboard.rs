use std::sync::{Arc, Mutex};

#[derive(thiserror::Error, Debug)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),
}

/// Destination of the copy-output action.
pub trait Clipboard: Send {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// The desktop clipboard. Opened lazily on each copy so a headless session
/// without a display still starts.
#[cfg(feature = "system-clipboard")]
#[derive(Clone, Debug, Default)]
pub struct SystemClipboard;

#[cfg(feature = "system-clipboard")]
impl Clipboard for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        use cli_clipboard::{ClipboardContext, ClipboardProvider};

        let mut ctx =
            ClipboardContext::new().map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
        ctx.set_contents(text.to_owned())
            .map_err(|e| ClipboardError::Unavailable(e.to_string()))
    }
}

/// Keeps the last copied text in memory. Clones share the same slot.
#[derive(Clone, Debug, Default)]
pub struct MemoryClipboard {
    contents: Arc<Mutex<Option<String>>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> Option<String> {
        self.contents.lock().ok().and_then(|c| c.clone())
    }
}

impl Clipboard for MemoryClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let mut slot = self
            .contents
            .lock()
            .map_err(|_| ClipboardError::Unavailable("poisoned".to_owned()))?;
        *slot = Some(text.to_owned());
        Ok(())
    }
}

/// Always fails; stands in for a session with no clipboard at all.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoClipboard;

impl Clipboard for NoClipboard {
    fn set_text(&mut self, _text: &str) -> Result<(), ClipboardError> {
        Err(ClipboardError::Unavailable("no clipboard".to_owned()))
    }
}
