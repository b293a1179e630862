use std::process::ExitStatus;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CheckError {
    #[error("-w SECONDS must be smaller than -c SECONDS. -w {warning} > -c {critical}")]
    InvalidThresholds { warning: u64, critical: u64 },

    #[error("Unknown pool '{pool}'. Available pools: {}", quoted(.available))]
    UnknownPool { pool: String, available: Vec<String> },

    #[error("invalid timespan '{input}': cannot interpret '{token}'")]
    InvalidTimespan { input: String, token: String },

    #[error("failed to run '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{command}' exited with {status}: {stderr}")]
    CommandFailed { command: String, status: ExitStatus, stderr: String },

    #[error("config: {0:#}")]
    Config(#[from] anyhow::Error),
}

fn quoted(names: &[String]) -> String {
    names.iter()
        .map(|n| format!("'{}'", n))
        .collect::<Vec<_>>()
        .join(", ")
}

pub type Result<T> = std::result::Result<T, CheckError>;
