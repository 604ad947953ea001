use std::io::{self, ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::process::{ChildStdin, Command, ExitStatus, Output, Stdio};
use std::thread;

use anyhow::{Context, Error, Result};
use itertools::Itertools;
use log::*;
use thiserror::Error;

/// Which exit codes an external tool may return without failing the run.
///
/// Codes in `soft` are only tolerated while the tool's stderr stays empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusPolicy {
    pub accepted: &'static [i32],
    pub soft: &'static [i32],
}

impl StatusPolicy {
    /// dmenu, passbolt, xclip and notify-send
    pub const STANDARD: StatusPolicy = StatusPolicy {
        accepted: &[0, 1],
        soft: &[1],
    };

    /// gpg also exits 2 when it merely complains about the keyring
    pub const DECRYPT: StatusPolicy = StatusPolicy {
        accepted: &[0, 1, 2],
        soft: &[1],
    };

    pub fn allows(&self, code: Option<i32>, stderr: &[u8]) -> bool {
        match code {
            None => false,
            Some(c) if !self.accepted.contains(&c) => false,
            Some(c) if self.soft.contains(&c) => stderr.is_empty(),
            Some(_) => true,
        }
    }
}

#[derive(Debug, Error)]
#[error("'{} {}' returned {} and error:\n{}", .program.display(), .args.join(" "), describe_code(.code), .stderr)]
pub struct ToolFailure {
    pub program: PathBuf,
    pub args: Vec<String>,
    /// None when the tool was killed by a signal
    pub code: Option<i32>,
    pub stderr: String,
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        None => "no exit code (terminated by signal)".to_owned(),
        Some(c) => c.to_string(),
    }
}

#[derive(Debug)]
pub struct Captured {
    pub status: ExitStatus,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

/// Runs `program` to completion, feeding it `input` on stdin.
///
/// Blocks until the child exits. Any exit the policy does not allow turns
/// into a [`ToolFailure`].
pub fn run<S: AsRef<str>>(program: &Path, args: &[S], input: &[u8], policy: StatusPolicy) -> Result<Captured> {
    exchange(program, args, input, policy, Mode::Capture)
}

/// Like [`run`] but with stdout discarded and stderr kept in a temp file.
///
/// xclip forks a child that owns the selection and keeps any inherited
/// pipes open, so waiting for end of output would never finish.
pub fn run_detached<S: AsRef<str>>(program: &Path, args: &[S], input: &[u8], policy: StatusPolicy) -> Result<ExitStatus> {
    Ok(exchange(program, args, input, policy, Mode::Detach)?.status)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Capture,
    Detach,
}

fn exchange<S: AsRef<str>>(program: &Path, args: &[S], input: &[u8], policy: StatusPolicy, mode: Mode) -> Result<Captured> {
    let mut stderr_file = match mode {
        Mode::Capture => None,
        Mode::Detach => Some(tempfile::tempfile()
            .with_context(|| format!("Unable to create stderr file for {}", program.display()))?),
    };
    let mut command = Command::new(program);
    command.args(args.iter().map(AsRef::as_ref))
        .stdin(Stdio::piped());
    match &stderr_file {
        None => command.stdout(Stdio::piped()).stderr(Stdio::piped()),
        Some(f) => command.stdout(Stdio::null()).stderr(Stdio::from(f.try_clone()?)),
    };
    debug!("Command {:?}", command);
    let mut process = command.spawn()
        .with_context(|| format!("Unable to start {}", program.display()))?;

    // Stdin must be fed while stdout is drained, a child echoing its
    // input would otherwise block on a full pipe.
    let stdin = process.stdin.take();
    let mut output = thread::scope(|scope| -> Result<Output> {
        let writer = scope.spawn(move || feed(stdin, input));
        debug!("Waiting for process to finish");
        let output = process.wait_with_output()
            .with_context(|| format!("Error waiting for {}", program.display()))?;
        match writer.join() {
            Ok(Ok(())) => {}
            Ok(Err(e)) if e.kind() == ErrorKind::BrokenPipe => {
                // Child quit without reading, let its exit status speak
                debug!("{} closed stdin early", program.display());
            }
            Ok(Err(e)) => {
                return Err(e).with_context(|| format!("Error writing to stdin of {}", program.display()));
            }
            Err(_) => return Err(Error::msg(format!("Writer for {} panicked", program.display()))),
        }
        Ok(output)
    })?;
    debug!("{} exited with {:?}", program.display(), output.status.code());

    if let Some(f) = stderr_file.as_mut() {
        f.seek(SeekFrom::Start(0))?;
        f.read_to_end(&mut output.stderr)?;
    }

    if !policy.allows(output.status.code(), &output.stderr) {
        return Err(ToolFailure {
            program: program.to_owned(),
            args: args.iter().map(|a| a.as_ref().to_owned()).collect_vec(),
            code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).trim_end().to_owned(),
        }.into());
    }

    Ok(Captured {
        status: output.status,
        stdout: output.stdout,
        stderr: output.stderr,
    })
}

fn feed(stdin: Option<ChildStdin>, input: &[u8]) -> io::Result<()> {
    match stdin {
        // dropped at the end, closing the pipe
        Some(mut stdin) => stdin.write_all(input),
        None => Ok(()),
    }
}
