use std::path::PathBuf;

use anyhow::Result;
use itertools::Itertools;
use log::*;

use crate::process::{self, StatusPolicy};

/// The menu binary plus whatever arguments the user wants it started with.
#[derive(Debug, Clone)]
pub struct Dmenu {
    pub program: PathBuf,
    pub args: Vec<String>,
}

impl Dmenu {
    pub fn new(program: PathBuf, args: Vec<String>) -> Dmenu {
        Dmenu { program, args }
    }

    /// Lets the user pick one of `options`.
    ///
    /// dmenu prints whatever was typed when nothing matched, so anything
    /// that is not exactly one of the options counts as cancelled.
    pub fn choose<S: AsRef<str>>(&self, options: &[S]) -> Result<Option<String>> {
        let input = options.iter().map(AsRef::as_ref).join("\n");
        let output = process::run(&self.program, &self.args, input.as_bytes(), StatusPolicy::STANDARD)?;
        let choice = String::from_utf8_lossy(&output.stdout);
        let choice = choice.trim_end();
        if options.iter().any(|o| o.as_ref() == choice) {
            Ok(Some(choice.to_owned()))
        } else {
            info!("Menu cancelled");
            Ok(None)
        }
    }
}
