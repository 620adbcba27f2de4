use anyhow::Result;
use log::debug;
use reqwest::Client;
use std::path::PathBuf;

use crate::runtime::Runtime;

/// Version of this launcher, derived from git tags at build time.
pub const LAUNCHER_VERSION: &str = env!("LAUNCHER_VERSION");

pub const DEFAULT_RELEASES_URL: &str = "https://github.com/manusa/kubernetes-mcp-server/releases";

pub const ENV_DOWNLOAD: &str = "KUBERNETES_MCP_SERVER_DOWNLOAD";
pub const ENV_VERSION: &str = "KUBERNETES_MCP_SERVER_VERSION";
pub const ENV_RELEASES_URL: &str = "KUBERNETES_MCP_SERVER_RELEASES_URL";
pub const ENV_HOME: &str = "KUBERNETES_MCP_SERVER_HOME";
pub const ENV_NODE_PATH: &str = "NODE_PATH";

/// Launcher settings, read from the environment.
pub struct Config {
    /// HTTP client for release downloads, only built when downloads are enabled
    pub client: Option<Client>,
    /// Fall back to a cached release download when nothing is installed
    pub download: bool,
    /// Release to download: `latest` or a version number
    pub version: String,
    pub releases_url: String,
    /// Root of the download cache, `None` when no home directory is known
    pub cache_root: Option<PathBuf>,
    /// Extra module lookup folders, as Node reads them from `NODE_PATH`
    pub node_path: Vec<PathBuf>,
}

impl Config {
    pub fn from_env<R: Runtime>(runtime: &R) -> Result<Self> {
        let download = runtime
            .env_var(ENV_DOWNLOAD)
            .map(|v| is_truthy(&v))
            .unwrap_or(false);

        let version = match runtime.env_var(ENV_VERSION) {
            Ok(v) if !v.trim().is_empty() => {
                let v = v.trim();
                v.strip_prefix('v').unwrap_or(v).to_string()
            }
            _ => download_version(LAUNCHER_VERSION),
        };

        let releases_url = runtime
            .env_var(ENV_RELEASES_URL)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_RELEASES_URL.to_string());

        let cache_root = match runtime.env_var(ENV_HOME) {
            Ok(v) if !v.is_empty() => Some(PathBuf::from(v)),
            _ => runtime
                .home_dir()
                .map(|home| home.join(".kubernetes-mcp-server")),
        };

        let node_path: Vec<PathBuf> = runtime
            .env_var(ENV_NODE_PATH)
            .map(|v| {
                std::env::split_paths(&v)
                    .filter(|p| !p.as_os_str().is_empty())
                    .collect()
            })
            .unwrap_or_default();

        debug!(
            "Launcher {} (download: {}, version: {}, cache: {:?})",
            LAUNCHER_VERSION, download, version, cache_root
        );

        let client = if download {
            Some(
                Client::builder()
                    .user_agent(format!("kubernetes-mcp-server-launcher/{}", LAUNCHER_VERSION))
                    .build()?,
            )
        } else {
            None
        };

        Ok(Self {
            client,
            download,
            version,
            releases_url,
            cache_root,
            node_path,
        })
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Release version matching a launcher build; development builds track `latest`.
pub fn download_version(launcher_version: &str) -> String {
    let version = launcher_version.strip_prefix('v').unwrap_or(launcher_version);
    let is_release = version.starts_with(|c: char| c.is_ascii_digit())
        && !version.contains('-')
        && version != "0.0.0";
    if is_release {
        version.to_string()
    } else {
        "latest".to_string()
    }
}
