//! Hermetic sandbox for running the `typeahead` binary in tests.
//!
//! - Points `HOME` and `XDG_CONFIG_HOME` at private directories so the user's real
//!   config file is never read
//! - Clears the `TYPEAHEAD_*` environment and disables colors
//!
//! Everything lives under an `assert_fs::TempDir` and is cleaned up on drop.

use assert_cmd::Command;
use assert_fs::fixture::PathChild;
use assert_fs::TempDir;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

pub struct Sandbox {
    root: TempDir,
    pub home: PathBuf,
    pub config_home: PathBuf,
}

impl Default for Sandbox {
    fn default() -> Self {
        Self::new()
    }
}

impl Sandbox {
    pub fn new() -> Self {
        let root = TempDir::new().expect("create sandbox TempDir");
        let home = root.child("home").to_path_buf();
        let config_home = root.child("config").to_path_buf();

        fs::create_dir_all(&home).expect("create home dir");
        fs::create_dir_all(&config_home).expect("create config dir");

        Self {
            root,
            home,
            config_home,
        }
    }

    pub fn root_path(&self) -> &Path {
        self.root.path()
    }

    /// Write/overwrite a file relative to the sandbox root; returns its absolute path
    pub fn write<P: AsRef<Path>, S: AsRef<[u8]>>(&self, rel: P, contents: S) -> PathBuf {
        let p = self.root_path().join(rel);
        if let Some(parent) = p.parent() {
            fs::create_dir_all(parent).expect("create parent dir");
        }
        fs::write(&p, contents).expect("write file");
        p
    }

    /// Command for a binary of the current workspace with the sandbox environment applied
    pub fn cmd<I, S>(&self, program: &str, args: I) -> Command
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut cmd = Command::cargo_bin(program).expect("binary built by cargo");
        cmd.args(args)
            .current_dir(self.root_path())
            .env("HOME", &self.home)
            .env("XDG_CONFIG_HOME", &self.config_home)
            .env("NO_COLOR", "1")
            .env_remove("TYPEAHEAD_API_URL")
            .env_remove("TYPEAHEAD_TOKEN")
            .env_remove("RUST_LOG");
        cmd
    }
}
