pub mod config;
pub mod download;
pub mod error;
pub mod http;
pub mod launch;
pub mod platform;
pub mod resolve;
pub mod runtime;

/// Test utilities for cross-platform path handling.
#[cfg(test)]
pub mod test_utils {
    use crate::config::{Config, DEFAULT_RELEASES_URL};
    use crate::runtime::MockRuntime;
    use std::path::PathBuf;

    /// Returns a test home directory path based on the platform.
    /// - Unix: `/home/user`
    /// - Windows: `C:\Users\user`
    pub fn test_home() -> PathBuf {
        #[cfg(not(windows))]
        {
            PathBuf::from("/home/user")
        }
        #[cfg(windows)]
        {
            PathBuf::from(r"C:\Users\user")
        }
    }

    /// Returns the installed launcher package directory,
    /// `<home>/project/node_modules/kubernetes-mcp-server`.
    pub fn test_package_dir() -> PathBuf {
        test_home()
            .join("project")
            .join("node_modules")
            .join("kubernetes-mcp-server")
    }

    /// Returns the directory holding the launcher executable, `<package>/bin`.
    pub fn test_launcher_dir() -> PathBuf {
        test_package_dir().join("bin")
    }

    /// Configuration with every optional feature off.
    pub fn test_config() -> Config {
        Config {
            client: None,
            download: false,
            version: "latest".to_string(),
            releases_url: DEFAULT_RELEASES_URL.to_string(),
            cache_root: None,
            node_path: Vec::new(),
        }
    }

    /// Configure a mock runtime with common defaults for tests.
    /// - launcher executable in [`test_launcher_dir`]
    /// - canonicalize is a no-op passthrough
    /// - no environment variables set
    /// - home dir set to [`test_home`]
    pub fn configure_mock_runtime_basics(runtime: &mut MockRuntime) {
        runtime
            .expect_current_exe()
            .returning(|| Ok(test_launcher_dir().join("kubernetes-mcp-server")));

        runtime
            .expect_canonicalize()
            .returning(|p| Ok(p.to_path_buf()));

        runtime
            .expect_env_var()
            .returning(|_| Err(std::env::VarError::NotPresent));

        runtime.expect_home_dir().returning(|| Some(test_home()));
    }
}
