use crate::error::{CheckError, Result};
use std::ffi::OsString;
use std::process::Command;

/// Where pool names and raw `zpool status` text come from.
pub trait ZpoolSource {
    fn list_pools(&self) -> Result<Vec<String>>;
    fn pool_status(&self, pool: &str) -> Result<String>;
}

/// Runs the real `zpool` binary.
#[derive(Debug, Clone)]
pub struct ZpoolCommand {
    program: OsString,
}

impl ZpoolCommand {
    pub fn new(program: impl Into<OsString>) -> Self {
        Self { program: program.into() }
    }

    fn run(&self, args: &[&str]) -> Result<String> {
        let command = format!("{} {}", self.program.to_string_lossy(), args.join(" "));
        tracing::debug!(%command, "running");

        let out = Command::new(&self.program)
            .args(args)
            .output()
            .map_err(|source| CheckError::Spawn { command: command.clone(), source })?;

        if !out.status.success() {
            return Err(CheckError::CommandFailed {
                command,
                status: out.status,
                stderr: String::from_utf8_lossy(&out.stderr).trim().to_string(),
            });
        }

        let text = String::from_utf8_lossy(&out.stdout).into_owned();
        tracing::trace!(%command, output = %text, "output");
        Ok(text)
    }
}

impl Default for ZpoolCommand {
    fn default() -> Self {
        Self::new("zpool")
    }
}

impl ZpoolSource for ZpoolCommand {
    fn list_pools(&self) -> Result<Vec<String>> {
        // -H: no header, tab separated
        let text = self.run(&["list", "-H", "-o", "name"])?;
        Ok(split_pool_names(&text))
    }

    fn pool_status(&self, pool: &str) -> Result<String> {
        self.run(&["status", pool])
    }
}

/// One pool name per non-blank line, in listing order.
pub fn split_pool_names(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}
