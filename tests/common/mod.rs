//! Shared testing utilities for srcds-sync CLI tests.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// Testing harness providing an isolated server directory and home.
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
    work_dir: PathBuf,
    home_dir: PathBuf,
}

#[allow(dead_code)]
impl TestContext {
    /// Create an isolated environment with `work/maps`, `work/cfg` and a home
    /// directory, mirroring a deployed server layout.
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        let work_dir = root.path().join("work");
        let home_dir = root.path().join("home");
        fs::create_dir_all(work_dir.join("maps")).expect("Failed to create maps directory");
        fs::create_dir_all(work_dir.join("cfg")).expect("Failed to create cfg directory");
        fs::create_dir_all(&home_dir).expect("Failed to create home directory");

        Self { root, work_dir, home_dir }
    }

    /// Path to the server working directory used for CLI invocations.
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Absolute path to the emulated `$HOME` directory.
    pub fn home(&self) -> &Path {
        &self.home_dir
    }

    /// Write the static fallback manifest into the emulated home.
    pub fn write_static_manifest(&self, content: &str) {
        fs::write(self.home_dir.join("manifest.json"), content)
            .expect("Failed to write static manifest");
    }

    /// Build a command for invoking the compiled `srcds-sync` binary against
    /// the given object-store endpoint.
    pub fn cli(&self, endpoint: &str) -> Command {
        let mut cmd =
            Command::cargo_bin("srcds-sync").expect("Failed to locate srcds-sync binary");
        cmd.current_dir(&self.work_dir)
            .env("HOME", &self.home_dir)
            .env("OBJECT_STORE_ENDPOINT", endpoint);
        cmd
    }

    /// Assert a synced file exists with the given content.
    pub fn assert_file(&self, relative: &str, content: &[u8]) {
        let path = self.work_dir.join(relative);
        assert!(path.exists(), "{} should exist", path.display());
        assert_eq!(fs::read(&path).expect("Failed to read synced file"), content);
    }
}

/// bzip2-compress a payload, as map archives are stored remotely.
#[allow(dead_code)]
pub fn bz2(data: &[u8]) -> Vec<u8> {
    let mut encoder = bzip2::read::BzEncoder::new(data, bzip2::Compression::best());
    let mut out = Vec::new();
    encoder.read_to_end(&mut out).expect("Failed to compress fixture");
    out
}

/// A single-page ListObjectsV2 document for the given keys.
#[allow(dead_code)]
pub fn listing_page(keys: &[&str]) -> String {
    let contents: String =
        keys.iter().map(|key| format!("<Contents><Key>{key}</Key></Contents>")).collect();

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
        <ListBucketResult>
            <IsTruncated>false</IsTruncated>
            {contents}
        </ListBucketResult>"#
    )
}
