use std::env;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::Result;
use log::*;
use structopt::clap::{self, Arg, ErrorKind};
use structopt::StructOpt;

use passbolt_dmenu::args::split_args;
use passbolt_dmenu::{config, App, Outcome, Tools};

/// A dmenu frontend to passbolt.
///
/// All arguments not listed below are passed to dmenu. If you need to pass
/// arguments to dmenu which conflict with the options below, place them
/// after --. Copies with xclip and notifies with notify-send.
#[derive(Debug, StructOpt)]
#[structopt(name = "passbolt-dmenu")]
struct Opts {}

const DMENU_MISSING: &str = "Cannot find a default path to dmenu, you must provide --dmenu.";

fn main() {
    pretty_env_logger::init();
    match run() {
        Ok(Outcome::Aborted) => debug!("Aborted"),
        Ok(Outcome::Copied(field)) => debug!("Done, {} copied", field),
        Err(e) => {
            eprintln!("{:#}", e);
            process::exit(1);
        }
    }
}

fn dmenu_help(default_dmenu: Option<&Path>) -> String {
    match default_dmenu {
        Some(p) => format!("The path to the dmenu binary. Defaults to {}", p.display()),
        None => "The path to the dmenu binary. Required, no dmenu was found on PATH".to_owned(),
    }
}

/// Parses our own flags, exiting for `--help`, `--version` and usage errors
fn parse_dmenu_flag(own: &[String], default_dmenu: Option<&Path>) -> Option<PathBuf> {
    let help = dmenu_help(default_dmenu);
    let mut app = Opts::clap()
        .arg(Arg::with_name("dmenu")
            .short("D")
            .long("dmenu")
            .value_name("dmenu")
            .takes_value(true)
            .help(&help));
    if default_dmenu.is_none() {
        app = app.after_help(DMENU_MISSING);
    }
    app.get_matches_from(own)
        .value_of_os("dmenu")
        .map(PathBuf::from)
}

fn run() -> Result<Outcome> {
    let split = split_args(env::args());
    let search_path = env::var_os("PATH");

    // A broken config file must not get in the way of --help
    let file = config::config_path().and_then(|p| config::read(&p));
    let default_dmenu = match &file {
        Ok(f) => config::default_dmenu(f, search_path.as_deref()),
        Err(_) => Ok(config::find_program(config::DMENU, search_path.as_deref())),
    };
    let flag = parse_dmenu_flag(&split.own, default_dmenu.as_ref().ok().and_then(Option::as_deref));
    let file = file?;
    let default_dmenu = default_dmenu?;

    let dmenu = match flag.or(default_dmenu) {
        Some(d) => d,
        None => clap::Error::with_description(DMENU_MISSING, ErrorKind::MissingRequiredArgument).exit(),
    };
    debug!("Using dmenu at {:?}", dmenu);

    let tools = Tools::resolve(dmenu, file, search_path.as_deref())?;
    App::new(tools, split.dmenu).run()
}
