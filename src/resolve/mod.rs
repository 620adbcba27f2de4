//! Locating the server executable on disk.
//!
//! Resolution walks an ordered list of [`Locator`]s. Each one reports either
//! the file it found or every location it checked; the first hit wins and
//! later locators are never consulted.

mod node_modules;

use anyhow::{Result, anyhow};
use log::{debug, warn};
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::LaunchError;
use crate::platform::ArtifactDescriptor;
use crate::runtime::Runtime;

pub use node_modules::{module_file_candidates, module_lookup_paths};

/// Outcome of a single locator.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup {
    Found(PathBuf),
    NotFound(Vec<PathBuf>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Locator {
    /// The platform package installed as an optional npm dependency:
    /// `<name>/bin/<name><suffix>`, resolved like Node's `require.resolve`.
    OptionalDependency { node_path: Vec<PathBuf> },
    /// `<launcher_dir>/../<name><suffix>`
    Adjacent,
    /// A previously downloaded release: `<root>/bin/<version>/<name><suffix>`
    Cache { root: PathBuf, version: String },
}

impl Locator {
    /// Every path this locator would check, in order.
    pub fn candidates(&self, launcher_dir: &Path, descriptor: &ArtifactDescriptor) -> Vec<PathBuf> {
        let file_name = descriptor.file_name();
        match self {
            Locator::OptionalDependency { node_path } => module_file_candidates(
                launcher_dir,
                node_path,
                descriptor.name,
                &Path::new("bin").join(&file_name),
            ),
            Locator::Adjacent => {
                vec![launcher_dir.parent().unwrap_or(launcher_dir).join(&file_name)]
            }
            Locator::Cache { root, version } => vec![cache_path(root, version, descriptor)],
        }
    }

    pub fn locate<R: Runtime>(
        &self,
        runtime: &R,
        launcher_dir: &Path,
        descriptor: &ArtifactDescriptor,
    ) -> Lookup {
        let mut attempted = Vec::new();
        for candidate in self.candidates(launcher_dir, descriptor) {
            if runtime.is_file(&candidate) {
                return Lookup::Found(candidate);
            }
            attempted.push(candidate);
        }
        Lookup::NotFound(attempted)
    }
}

/// Where a downloaded release of `descriptor` is kept.
pub fn cache_path(root: &Path, version: &str, descriptor: &ArtifactDescriptor) -> PathBuf {
    root.join("bin").join(version).join(descriptor.file_name())
}

/// Locators to try for the given configuration, in order.
pub fn default_locators(config: &Config) -> Vec<Locator> {
    let mut locators = vec![
        Locator::OptionalDependency {
            node_path: config.node_path.clone(),
        },
        Locator::Adjacent,
    ];

    if config.download {
        if let Some(root) = &config.cache_root {
            locators.push(Locator::Cache {
                root: root.clone(),
                version: config.version.clone(),
            });
        }
    }

    locators
}

/// Directory the running launcher is installed in, with symlinks resolved.
#[tracing::instrument(skip(runtime))]
pub fn launcher_dir<R: Runtime>(runtime: &R) -> Result<PathBuf> {
    let exe = runtime.current_exe()?;
    let exe = match runtime.canonicalize(&exe) {
        Ok(path) => path,
        Err(e) => {
            warn!("Using unresolved launcher path {:?}: {:#}", exe, e);
            exe
        }
    };

    exe.parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| anyhow!("Launcher path {:?} has no parent directory", exe))
}

/// Find the server executable for `descriptor`, trying `locators` in order.
#[tracing::instrument(skip(runtime, locators))]
pub fn resolve_executable_path<R: Runtime>(
    runtime: &R,
    launcher_dir: &Path,
    descriptor: &ArtifactDescriptor,
    locators: &[Locator],
) -> Result<PathBuf, LaunchError> {
    let mut attempted = Vec::new();

    for locator in locators {
        match locator.locate(runtime, launcher_dir, descriptor) {
            Lookup::Found(path) => {
                debug!("Found {} via {:?}: {:?}", descriptor.name, locator, path);
                return Ok(path);
            }
            Lookup::NotFound(paths) => {
                debug!("{:?} did not find {}", locator, descriptor.name);
                attempted.extend(paths);
            }
        }
    }

    Err(LaunchError::ArtifactNotInstalled {
        file_name: descriptor.file_name(),
        attempted,
    })
}
