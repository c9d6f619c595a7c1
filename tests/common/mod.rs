//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

/// The two-row charge scenario with known output.
pub const TWO_CHARGES_CSV: &str = "Time,Power\n09:00,50\n09:30,50\n";
/// Expected output for [`TWO_CHARGES_CSV`].
pub const TWO_CHARGES_OUTPUT: &str = "Time,Power,SOC\n09:00,50,0.53\n09:30,50,0.25\n";

/// Scratch directory removed on drop.
pub struct Scratch {
    dir: PathBuf,
}

impl Scratch {
    /// Creates an empty directory unique to this process and `name`.
    pub fn new(name: &str) -> Self {
        let dir = env::temp_dir().join(format!("soc-trace-{}-{name}", process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).expect("scratch directory should be creatable");
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        &self.dir
    }

    /// Writes `contents` to `file` inside the scratch directory.
    pub fn write(&self, file: &str, contents: &str) -> PathBuf {
        let path = self.dir.join(file);
        fs::write(&path, contents).expect("fixture should be writable");
        path
    }
}

impl Drop for Scratch {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.dir);
    }
}

/// Path of the sample input shipped in `data/`.
pub fn sample_input() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("data/power_over_time.csv")
}

/// Path of the sample configuration shipped in `data/`.
pub fn sample_config() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("data/soc-trace.toml")
}
