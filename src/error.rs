//! Launcher failures and the exit codes reported for them.

use std::fmt;
use std::path::PathBuf;

use crate::platform::PlatformKey;

/// The platform has no pre-built server.
pub const EXIT_UNSUPPORTED_PLATFORM: i32 = 125;
/// The server executable was found but could not be started.
pub const EXIT_EXECUTION_FAILURE: i32 = 126;
/// The server executable is not installed (and could not be downloaded).
pub const EXIT_NOT_INSTALLED: i32 = 127;
/// Any other launcher failure.
pub const EXIT_FAILURE: i32 = 1;

/// Fatal launcher errors. A non-zero exit of the server itself is not one of these.
#[derive(Debug)]
pub enum LaunchError {
    UnsupportedPlatform {
        key: PlatformKey,
    },
    ArtifactNotInstalled {
        file_name: String,
        attempted: Vec<PathBuf>,
    },
    DownloadFailed {
        url: String,
        source: anyhow::Error,
    },
    ExecutionFailure {
        path: PathBuf,
        source: anyhow::Error,
    },
}

impl LaunchError {
    pub fn exit_code(&self) -> i32 {
        match self {
            LaunchError::UnsupportedPlatform { .. } => EXIT_UNSUPPORTED_PLATFORM,
            LaunchError::ArtifactNotInstalled { .. } | LaunchError::DownloadFailed { .. } => {
                EXIT_NOT_INSTALLED
            }
            LaunchError::ExecutionFailure { .. } => EXIT_EXECUTION_FAILURE,
        }
    }
}

impl fmt::Display for LaunchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LaunchError::UnsupportedPlatform { key } => {
                write!(
                    f,
                    "Unsupported platform: {} (os '{}', architecture '{}'). \
                     Pre-built kubernetes-mcp-server binaries exist for darwin, linux and win32 on x64 and arm64.",
                    key, key.os, key.arch
                )
            }
            LaunchError::ArtifactNotInstalled {
                file_name,
                attempted,
            } => {
                write!(f, "Could not find {}. Looked in:", file_name)?;
                for path in attempted {
                    write!(f, "\n  - {}", path.display())?;
                }
                write!(
                    f,
                    "\nReinstall the package without --no-optional, or set KUBERNETES_MCP_SERVER_DOWNLOAD=1 to fetch the release binary."
                )
            }
            LaunchError::DownloadFailed { url, source } => {
                write!(f, "Failed to download {}: {:#}", url, source)
            }
            LaunchError::ExecutionFailure { path, source } => {
                write!(f, "Failed to execute {}: {:#}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for LaunchError {}

/// Exit code for a launcher error, falling back to [`EXIT_FAILURE`].
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<LaunchError>()
        .map(LaunchError::exit_code)
        .unwrap_or(EXIT_FAILURE)
}
