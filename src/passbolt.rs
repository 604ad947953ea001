use std::path::PathBuf;

use anyhow::{Context, Result};
use log::*;

use crate::model::ResourceIndex;
use crate::process::{self, StatusPolicy};

#[derive(Debug, Clone)]
pub struct Passbolt {
    pub program: PathBuf,
}

impl Passbolt {
    pub fn new(program: PathBuf) -> Passbolt {
        Passbolt { program }
    }

    /// Every resource the current user can see
    pub fn resources(&self) -> Result<ResourceIndex> {
        let output = self.command(&["find", "--json"])?;
        let json = String::from_utf8(output)
            .with_context(|| "passbolt resource list is not valid UTF-8")?;
        let index = ResourceIndex::from_json(&json)?;
        debug!("Loaded {} resources", index.len());
        Ok(index)
    }

    /// Encrypted secret of one resource, exactly as passbolt prints it
    pub fn ciphertext(&self, uuid: &str) -> Result<Vec<u8>> {
        self.command(&["get", uuid])
    }

    fn command(&self, args: &[&str]) -> Result<Vec<u8>> {
        Ok(process::run(&self.program, args, b"", StatusPolicy::STANDARD)?.stdout)
    }
}
