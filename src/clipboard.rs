use clipboard::{ClipboardContext, ClipboardProvider};
use tracing::{debug, instrument};

use crate::err::{Error, Result};

// Traits

#[cfg_attr(test, mockall::automock)]
pub trait Clipboard {
    fn write(&self, text: &str) -> Result<()>;
}

// SystemClipboard

/// Best-effort write to the system clipboard. A fresh context is opened per write.
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    #[instrument(skip(self, text))]
    fn write(&self, text: &str) -> Result {
        let mut ctx: ClipboardContext =
            ClipboardProvider::new().map_err(|err| Error::Clipboard(err.to_string()))?;
        ctx.set_contents(text.to_string())
            .map_err(|err| Error::Clipboard(err.to_string()))?;
        debug!("password written to clipboard");
        Ok(())
    }
}
