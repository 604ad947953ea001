pub mod args;
pub mod clipboard;
pub mod config;
pub mod dmenu;
pub mod gpg;
pub mod model;
pub mod passbolt;
pub mod process;

#[cfg(all(test, unix))]
mod testutil;

use anyhow::Result;
use itertools::Itertools;
use log::*;

pub use clipboard::Clipboard;
pub use config::Tools;
pub use dmenu::Dmenu;
pub use gpg::Gpg;
pub use model::{Field, Resource, ResourceIndex};
pub use passbolt::Passbolt;
pub use process::{StatusPolicy, ToolFailure};

/// How a run ended when nothing went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The user dismissed one of the menus
    Aborted,
    Copied(Field),
}

/// One full pass: pick a resource, pick a field, put it on the clipboard.
pub struct App {
    pub dmenu: Dmenu,
    pub passbolt: Passbolt,
    pub gpg: Gpg,
    pub clipboard: Clipboard,
}

impl App {
    /// `menu_args` come after the ones from the config file
    pub fn new(tools: Tools, menu_args: Vec<String>) -> App {
        let dmenu_args = tools.dmenu_args.into_iter().chain(menu_args).collect_vec();
        App {
            dmenu: Dmenu::new(tools.dmenu, dmenu_args),
            passbolt: Passbolt::new(tools.passbolt),
            gpg: Gpg::new(tools.gpg),
            clipboard: Clipboard::new(tools.xclip, tools.notify_send),
        }
    }

    pub fn run(&self) -> Result<Outcome> {
        let resources = self.passbolt.resources()?;

        let choice = match self.dmenu.choose(&resources.labels())? {
            Some(c) => c,
            None => return Ok(Outcome::Aborted),
        };
        let resource = match resources.resolve_label(&choice) {
            Some(r) => r,
            None => {
                warn!("Selection does not name a known resource");
                return Ok(Outcome::Aborted);
            }
        };
        debug!("Selected resource {}", resource.uuid);

        let field = match self.dmenu.choose(&Field::options())? {
            Some(c) => Field::from_option(&c),
            None => None,
        };
        let field = match field {
            Some(f) => f,
            None => return Ok(Outcome::Aborted),
        };

        self.publish(resource, field)?;
        Ok(Outcome::Copied(field))
    }

    fn publish(&self, resource: &Resource, field: Field) -> Result<()> {
        match resource.plain(field) {
            Some(value) => self.clipboard.publish(value, field),
            None => {
                let ciphertext = self.passbolt.ciphertext(&resource.uuid)?;
                let password = self.gpg.decrypt(&ciphertext)?;
                self.clipboard.publish(&password, field)
            }
        }
    }
}
