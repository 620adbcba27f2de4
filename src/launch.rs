//! Resolving the server for this platform and handing control to it.

use anyhow::Result;
use log::{debug, info};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::download::download_artifact;
use crate::error::LaunchError;
use crate::http::HttpClient;
use crate::platform::{
    ArtifactDescriptor, DefaultPlatformDetector, PlatformDetector, lookup_descriptor,
};
use crate::resolve::{default_locators, launcher_dir, resolve_executable_path};
use crate::runtime::Runtime;

/// Launch the server for the current platform with `args`.
///
/// Returns the server's exit code. On Unix a successful launch replaces the
/// current process and never returns.
pub async fn run<R: Runtime>(runtime: R, args: Vec<OsString>) -> Result<i32> {
    launch(&runtime, &DefaultPlatformDetector, &args).await
}

#[tracing::instrument(skip(runtime, detector, args))]
pub async fn launch<R: Runtime, D: PlatformDetector>(
    runtime: &R,
    detector: &D,
    args: &[OsString],
) -> Result<i32> {
    let descriptor = resolve_descriptor(detector)?;
    let config = Config::from_env(runtime)?;
    let path = locate_executable(runtime, &config, descriptor).await?;
    execute(runtime, &path, args).await
}

/// Artifact for the detected platform; fails before touching the filesystem.
pub fn resolve_descriptor<D: PlatformDetector>(
    detector: &D,
) -> Result<&'static ArtifactDescriptor, LaunchError> {
    let key = detector.detect();
    let descriptor = lookup_descriptor(&key)
        .ok_or_else(|| LaunchError::UnsupportedPlatform { key: key.clone() })?;
    debug!("Platform {} uses {}", key, descriptor.name);
    Ok(descriptor)
}

/// Find the installed server, downloading it when enabled and nothing is installed.
#[tracing::instrument(skip(runtime, config))]
pub async fn locate_executable<R: Runtime>(
    runtime: &R,
    config: &Config,
    descriptor: &ArtifactDescriptor,
) -> Result<PathBuf> {
    let launcher_dir = launcher_dir(runtime)?;
    let locators = default_locators(config);

    match resolve_executable_path(runtime, &launcher_dir, descriptor, &locators) {
        Ok(path) => Ok(path),
        Err(err) => match (&config.cache_root, &config.client) {
            (Some(cache_root), Some(client)) if config.download => {
                debug!("{}", err);
                let http_client = HttpClient::new(client.clone());
                download_artifact(
                    runtime,
                    &http_client,
                    &config.releases_url,
                    &config.version,
                    cache_root,
                    descriptor,
                )
                .await
            }
            _ => Err(err.into()),
        },
    }
}

/// Run the server at `path`, returning its exit code.
#[tracing::instrument(skip(runtime, args))]
pub async fn execute<R: Runtime>(runtime: &R, path: &Path, args: &[OsString]) -> Result<i32> {
    info!("Starting {:?} with {} argument(s)", path, args.len());
    let code = runtime
        .run_executable(path, args)
        .await
        .map_err(|source| LaunchError::ExecutionFailure {
            path: path.to_path_buf(),
            source,
        })?;
    debug!("Server exited with code {}", code);
    Ok(code)
}
