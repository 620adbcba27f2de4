//! Fetching a release binary into the local cache.

use anyhow::{Context, Result, anyhow};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};

use crate::error::LaunchError;
use crate::http::HttpClient;
use crate::platform::ArtifactDescriptor;
use crate::resolve::cache_path;
use crate::runtime::Runtime;

/// Download URL of `file_name` for a release, `latest` or a version number.
pub fn release_url(releases_url: &str, version: &str, file_name: &str) -> String {
    let base = releases_url.trim_end_matches('/');
    if version == "latest" {
        format!("{}/latest/download/{}", base, file_name)
    } else {
        let version = version.strip_prefix('v').unwrap_or(version);
        format!("{}/download/v{}/{}", base, version, file_name)
    }
}

/// Downloads the release artifact into `<cache_root>/bin/<version>/` and
/// returns the path of the executable.
///
/// The body is streamed into a uniquely named `.part` file beside the
/// destination, made executable, then renamed into place. Concurrent
/// launchers each write their own file, and an interrupted download never
/// looks installed.
#[tracing::instrument(skip(runtime, http_client))]
pub async fn download_artifact<R: Runtime>(
    runtime: &R,
    http_client: &HttpClient,
    releases_url: &str,
    version: &str,
    cache_root: &Path,
    descriptor: &ArtifactDescriptor,
) -> Result<PathBuf> {
    let destination = cache_path(cache_root, version, descriptor);
    let url = release_url(releases_url, version, &descriptor.file_name());

    fetch(runtime, http_client, &url, &destination)
        .await
        .map_err(|source| LaunchError::DownloadFailed { url, source })?;

    Ok(destination)
}

async fn fetch<R: Runtime>(
    runtime: &R,
    http_client: &HttpClient,
    url: &str,
    destination: &Path,
) -> Result<()> {
    let dir = destination
        .parent()
        .ok_or_else(|| anyhow!("Invalid cache path {:?}", destination))?;
    let file_name = destination
        .file_name()
        .ok_or_else(|| anyhow!("Invalid cache path {:?}", destination))?;
    runtime
        .create_dir_all(dir)
        .with_context(|| format!("Failed to create cache directory {:?}", dir))?;

    let part = runtime.create_temp_file(dir, &format!(".{}.", file_name.to_string_lossy()))?;

    if let Err(e) = install_part(runtime, http_client, url, &part, destination).await {
        if let Err(cleanup) = runtime.remove_file(&part) {
            debug!("Failed to remove partial download {:?}: {:#}", part, cleanup);
        }
        return Err(e);
    }

    info!("Installed {:?}", destination);
    Ok(())
}

async fn install_part<R: Runtime>(
    runtime: &R,
    http_client: &HttpClient,
    url: &str,
    part: &Path,
    destination: &Path,
) -> Result<()> {
    warn!("Downloading {}...", url);
    http_client
        .download_file(url, || {
            runtime
                .create_file(part)
                .with_context(|| format!("Failed to create temporary file at {:?}", part))
        })
        .await?;

    // Executable before it becomes visible under its final name
    runtime.set_permissions(part, 0o755)?;

    if let Err(e) = runtime.rename(part, destination) {
        // Another launcher installed the same release first
        if runtime.is_file(destination) {
            debug!("{:?} appeared concurrently ({:#}), using it", destination, e);
            if let Err(cleanup) = runtime.remove_file(part) {
                debug!("Failed to remove partial download {:?}: {:#}", part, cleanup);
            }
            return Ok(());
        }
        return Err(e.context(format!("Failed to move download into {:?}", destination)));
    }

    Ok(())
}
