/// Command line split into our own flags and the arguments meant for dmenu.
#[derive(Debug, Default, PartialEq)]
pub struct SplitArgs {
    /// Starts with the program name, ready for structopt
    pub own: Vec<String>,
    pub dmenu: Vec<String>,
}

const VALUE_FLAGS: [&str; 2] = ["-D", "--dmenu"];
const SWITCHES: [&str; 4] = ["-h", "--help", "-V", "--version"];

/// Pulls out the flags this program understands and forwards everything
/// else to dmenu untouched. After the first `--` nothing is interpreted.
pub fn split_args<I: IntoIterator<Item = String>>(argv: I) -> SplitArgs {
    let mut argv = argv.into_iter();
    let mut split = SplitArgs::default();
    split.own.extend(argv.next());

    while let Some(arg) = argv.next() {
        if arg == "--" {
            split.dmenu.extend(argv.by_ref());
            break;
        }
        if VALUE_FLAGS.contains(&arg.as_str()) {
            split.own.push(arg);
            split.own.extend(argv.next());
        } else if SWITCHES.contains(&arg.as_str())
            || arg.starts_with("--dmenu=")
            || (arg.starts_with("-D") && arg.len() > 2)
        {
            split.own.push(arg);
        } else {
            split.dmenu.push(arg);
        }
    }
    split
}
