use std::path::PathBuf;

use anyhow::Result;
use log::*;

use crate::model::Field;
use crate::process::{self, StatusPolicy};

const NOTIFY_SOURCE: &str = "Passbolt";

/// xclip for the clipboard, notify-send to tell the user it happened.
#[derive(Debug, Clone)]
pub struct Clipboard {
    pub xclip: PathBuf,
    pub notify_send: PathBuf,
}

impl Clipboard {
    pub fn new(xclip: PathBuf, notify_send: PathBuf) -> Clipboard {
        Clipboard { xclip, notify_send }
    }

    pub fn publish(&self, value: &str, field: Field) -> Result<()> {
        self.copy_to_clipboard(value)?;
        info!("{} copied to clipboard", field);
        self.notify(&format!("{} copied to clipboard", field))
    }

    fn copy_to_clipboard(&self, value: &str) -> Result<()> {
        process::run_detached(&self.xclip, &["-selection", "clipboard"], value.as_bytes(), StatusPolicy::STANDARD)?;
        Ok(())
    }

    fn notify(&self, message: &str) -> Result<()> {
        process::run(&self.notify_send, &["-u", "low", NOTIFY_SOURCE, message], b"", StatusPolicy::STANDARD)?;
        Ok(())
    }
}
