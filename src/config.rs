use std::env;
use std::ffi::OsStr;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::*;
use serde::{Deserialize, Serialize};

pub const CONFIG_PATH: &str = "~/.config/passbolt-dmenu/config.json";
pub const CONFIG_ENV: &str = "PASSBOLT_DMENU_CONFIG";

pub const DMENU: &str = "dmenu";
pub const PASSBOLT: &str = "passbolt";
pub const GPG: &str = "gpg";
pub const XCLIP: &str = "xclip";
pub const NOTIFY_SEND: &str = "notify-send";

/// Optional overrides read from the config file.
#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub dmenu: Option<String>,
    pub passbolt: Option<String>,
    pub gpg: Option<String>,
    pub xclip: Option<String>,
    pub notify_send: Option<String>,
    /// Put in front of the arguments given on the command line
    pub dmenu_args: Vec<String>,
}

/// Where every external program lives, decided once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct Tools {
    pub dmenu: PathBuf,
    pub passbolt: PathBuf,
    pub gpg: PathBuf,
    pub xclip: PathBuf,
    pub notify_send: PathBuf,
    pub dmenu_args: Vec<String>,
}

impl Tools {
    /// `dmenu` is whatever the command line or config settled on; the
    /// caller decides what to do when neither found one.
    pub fn resolve(dmenu: PathBuf, file: FileConfig, search_path: Option<&OsStr>) -> Result<Tools> {
        let pick = |configured: Option<String>, name: &str| -> Result<PathBuf> {
            match configured {
                Some(p) => expand(&p),
                // Bare name: a missing tool fails when it is first started
                None => Ok(find_program(name, search_path).unwrap_or_else(|| PathBuf::from(name))),
            }
        };
        Ok(Tools {
            dmenu,
            passbolt: pick(file.passbolt, PASSBOLT)?,
            gpg: pick(file.gpg, GPG)?,
            xclip: pick(file.xclip, XCLIP)?,
            notify_send: pick(file.notify_send, NOTIFY_SEND)?,
            dmenu_args: file.dmenu_args,
        })
    }
}

/// First executable called `name` in a `PATH`-style list.
pub fn find_program(name: &str, search_path: Option<&OsStr>) -> Option<PathBuf> {
    let search_path = search_path?;
    env::split_paths(search_path)
        .map(|dir| dir.join(name))
        .find(|candidate| is_executable(candidate))
}

/// dmenu as given in the config file, falling back to `PATH`
pub fn default_dmenu(file: &FileConfig, search_path: Option<&OsStr>) -> Result<Option<PathBuf>> {
    match &file.dmenu {
        Some(p) => Ok(Some(expand(p)?)),
        None => Ok(find_program(DMENU, search_path)),
    }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

pub fn expand(path: &str) -> Result<PathBuf> {
    let expanded = shellexpand::full(path)
        .with_context(|| format!("Path {} is invalid", path))?;
    Ok(PathBuf::from(expanded.as_ref()))
}

fn read_if_found(path: &Path) -> Result<Option<String>> {
    match std::fs::read_to_string(&path) {
        Ok(c) => Ok(Some(c)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into())
    }
}

pub fn config_path() -> Result<PathBuf> {
    match env::var(CONFIG_ENV) {
        Ok(p) if !p.is_empty() => expand(&p),
        _ => expand(CONFIG_PATH),
    }
}

/// Reads the config file, a missing file means no overrides
pub fn read(path: &Path) -> Result<FileConfig> {
    let config = match read_if_found(path)
        .with_context(|| format!("Error reading config file {:?}", path))? {
        Some(c) => c,
        None => {
            debug!("No config file at {:?}", path);
            return Ok(FileConfig::default());
        }
    };
    serde_json::from_str(&config)
        .with_context(|| format!("Error de-serialising config file {:?}", path))
}
