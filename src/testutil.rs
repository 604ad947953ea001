use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use tempfile::TempDir;

// Writing a script while another test thread forks can leave the file
// open in that child and make exec fail with ETXTBSY.
static SERIAL: Mutex<()> = Mutex::new(());

/// A temp directory of executable shell scripts standing in for real tools.
pub struct FakeBin {
    dir: TempDir,
    _serial: MutexGuard<'static, ()>,
}

impl FakeBin {
    pub fn new() -> FakeBin {
        let serial = SERIAL.lock().unwrap_or_else(|e| e.into_inner());
        FakeBin {
            dir: TempDir::new().unwrap(),
            _serial: serial,
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn script(&self, name: &str, body: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }
}
