use std::path::PathBuf;

use anyhow::{Error, Result};
use zeroize::{Zeroize, Zeroizing};

use crate::process::{self, StatusPolicy};

#[derive(Debug, Clone)]
pub struct Gpg {
    pub program: PathBuf,
}

impl Gpg {
    pub fn new(program: PathBuf) -> Gpg {
        Gpg { program }
    }

    pub fn decrypt(&self, ciphertext: &[u8]) -> Result<Zeroizing<String>> {
        let output = process::run(&self.program, &["-q"], ciphertext, StatusPolicy::DECRYPT)?;
        // Never echo the bytes, they may be most of a password
        let plaintext = String::from_utf8(output.stdout)
            .map_err(|e| {
                e.into_bytes().zeroize();
                Error::msg("gpg output is not valid UTF-8")
            })?;
        Ok(Zeroizing::new(plaintext))
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::testutil::FakeBin;

    #[test]
    fn passes_ciphertext_through() {
        let bin = FakeBin::new();
        let gpg = bin.script("gpg", r#"[ "$1" = -q ] || exit 3; cat"#);
        let plaintext = Gpg::new(gpg).decrypt(b"hunter2\n").unwrap();
        assert_eq!(plaintext.as_str(), "hunter2\n");
    }

    #[test]
    fn keyring_warning_exit_is_accepted() {
        let bin = FakeBin::new();
        let gpg = bin.script("gpg", "cat; echo 'gpg: WARNING: unsafe permissions' >&2; exit 2");
        assert_eq!(Gpg::new(gpg).decrypt(b"s3cret").unwrap().as_str(), "s3cret");
    }

    #[test]
    fn decryption_failure_is_fatal() {
        let bin = FakeBin::new();
        let gpg = bin.script("gpg", "cat >/dev/null; echo 'gpg: decryption failed: No secret key' >&2; exit 1");
        let err = Gpg::new(gpg).decrypt(b"x").unwrap_err();
        assert!(err.to_string().contains("No secret key"));
    }

    #[test]
    fn binary_output_is_rejected_without_echo() {
        let bin = FakeBin::new();
        let gpg = bin.script("gpg", r#"cat >/dev/null; printf 'ab\377'"#);
        let err = Gpg::new(gpg).decrypt(b"x").unwrap_err();
        assert!(!err.to_string().contains("ab"));
    }
}
