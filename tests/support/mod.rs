#![allow(dead_code)]

use anyhow::{Context, Result, bail};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Isolated langm home plus a scratch area for fake runtime directories.
pub struct Sandbox {
    temp: TempDir,
}

impl Sandbox {
    pub fn new() -> Result<Self> {
        Ok(Self {
            temp: TempDir::new().context("failed to allocate sandbox")?,
        })
    }

    pub fn home(&self) -> PathBuf {
        self.temp.path().join("langm-home")
    }

    pub fn config_file(&self) -> PathBuf {
        self.home().join("config.json")
    }

    pub fn current_link(&self) -> PathBuf {
        self.home().join("current")
    }

    /// Create `runtimes/<name>/bin/<marker>` for each marker.
    pub fn runtime(&self, name: &str, markers: &[&str]) -> Result<PathBuf> {
        let dir = self.temp.path().join("runtimes").join(name);
        fs::create_dir_all(dir.join("bin"))?;
        for marker in markers {
            fs::write(dir.join("bin").join(marker), "#!/bin/sh\n")?;
        }
        Ok(dir.canonicalize()?)
    }

    pub fn langm(&self) -> Command {
        let mut cmd = Command::new(langm_binary());
        cmd.env("LANGM_HOME", self.home())
            .env_remove("LANGM_LOG")
            .current_dir(self.temp.path());
        cmd
    }

    pub fn run(&self, args: &[&str]) -> Result<Output> {
        self.langm()
            .args(args)
            .output()
            .with_context(|| format!("failed to execute langm {args:?}"))
    }

    pub fn run_ok(&self, args: &[&str]) -> Result<String> {
        let output = self.run(args)?;
        if !output.status.success() {
            bail!(
                "langm {args:?} failed with {:?}\nstdout:\n{}\nstderr:\n{}",
                output.status.code(),
                String::from_utf8_lossy(&output.stdout),
                String::from_utf8_lossy(&output.stderr)
            );
        }
        String::from_utf8(output.stdout).context("stdout utf-8")
    }

    pub fn config_json(&self) -> Result<serde_json::Value> {
        let data = fs::read_to_string(self.config_file())
            .with_context(|| format!("reading {}", self.config_file().display()))?;
        Ok(serde_json::from_str(&data)?)
    }
}

pub fn langm_binary() -> &'static Path {
    Path::new(env!("CARGO_BIN_EXE_langm"))
}

pub fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
