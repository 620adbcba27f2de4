//! Handing control over to the resolved server executable.

use anyhow::{Context, Result};
use log::{debug, warn};
use std::ffi::OsString;
use std::path::Path;
use std::process::{ExitStatus, Stdio};

use super::RealRuntime;

impl RealRuntime {
    #[tracing::instrument(skip(self, args))]
    pub(crate) async fn run_executable_impl(
        &self,
        program: &Path,
        args: &[OsString],
    ) -> Result<i32> {
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;

            debug!("Replacing launcher process with {:?}", program);
            // exec only returns if the new image could not be loaded
            let err = std::process::Command::new(program).args(args).exec();
            Err(err.into())
        }
        #[cfg(not(unix))]
        {
            spawn_and_wait(program, args).await
        }
    }
}

/// Spawn `program` with inherited stdio and wait for it to exit.
///
/// Ctrl-C is swallowed while waiting: the console delivers it to the child too,
/// and the launcher must outlive the child to report its exit code.
#[cfg_attr(unix, allow(dead_code))]
pub(crate) async fn spawn_and_wait(program: &Path, args: &[OsString]) -> Result<i32> {
    let mut child = tokio::process::Command::new(program)
        .args(args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()?;

    loop {
        tokio::select! {
            status = child.wait() => {
                let status = status.context("Failed to wait for the server process")?;
                return Ok(exit_code(status));
            }
            signal = tokio::signal::ctrl_c() => match signal {
                Ok(()) => debug!("Interrupt received, waiting for the server to exit"),
                Err(e) => {
                    warn!("Unable to listen for Ctrl-C ({}), waiting for the server to exit", e);
                    break;
                }
            }
        }
    }

    let status = child
        .wait()
        .await
        .context("Failed to wait for the server process")?;
    Ok(exit_code(status))
}

/// Exit code to report for a finished child; `128 + signal` when killed by a signal.
pub(crate) fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    1
}
