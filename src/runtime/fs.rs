//! File system operations (lookup, write, rename, permissions).

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use super::RealRuntime;

impl RealRuntime {
    #[tracing::instrument(skip(self))]
    pub(crate) fn is_file_impl(&self, path: &Path) -> bool {
        path.is_file()
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn create_dir_all_impl(&self, path: &Path) -> Result<()> {
        fs::create_dir_all(path).context("Failed to create directory")?;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn create_file_impl(&self, path: &Path) -> Result<Box<dyn std::io::Write + Send>> {
        let file = fs::File::create(path).context("Failed to create file")?;
        Ok(Box::new(file))
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn create_temp_file_impl(&self, dir: &Path, prefix: &str) -> Result<PathBuf> {
        let (_file, path) = tempfile::Builder::new()
            .prefix(prefix)
            .suffix(".part")
            .tempfile_in(dir)
            .with_context(|| format!("Failed to create temporary file in {:?}", dir))?
            .keep()
            .context("Failed to keep temporary file")?;
        Ok(path)
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn rename_impl(&self, from: &Path, to: &Path) -> Result<()> {
        fs::rename(from, to).context("Failed to rename file")?;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn remove_file_impl(&self, path: &Path) -> Result<()> {
        fs::remove_file(path).context("Failed to remove file")?;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn canonicalize_impl(&self, path: &Path) -> Result<PathBuf> {
        fs::canonicalize(path).with_context(|| format!("Failed to canonicalize {:?}", path))
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn set_permissions_impl(&self, path: &Path, mode: u32) -> Result<()> {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = fs::Permissions::from_mode(mode);
            fs::set_permissions(path, permissions).context("Failed to set permissions")?;
        }
        #[cfg(not(unix))]
        {
            let _ = (path, mode); // Suppress unused warnings on non-Unix
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::runtime::{RealRuntime, Runtime};
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_real_runtime_file_ops() {
        let runtime = RealRuntime;
        let dir = tempdir().unwrap();
        let nested = dir.path().join("a").join("b");

        runtime.create_dir_all(&nested).unwrap();
        assert!(nested.is_dir());
        // A directory is not a file
        assert!(!runtime.is_file(&nested));

        let part = nested.join("server.part");
        {
            let mut file = runtime.create_file(&part).unwrap();
            file.write_all(b"#!/bin/sh\n").unwrap();
        }
        assert!(runtime.is_file(&part));

        let target = nested.join("server");
        runtime.rename(&part, &target).unwrap();
        assert!(!runtime.is_file(&part));
        assert!(runtime.is_file(&target));

        runtime.set_permissions(&target, 0o755).unwrap();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = std::fs::metadata(&target).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o755);
        }

        runtime.remove_file(&target).unwrap();
        assert!(!runtime.is_file(&target));
    }

    #[test]
    fn test_real_runtime_temp_files_are_unique_and_kept() {
        let runtime = RealRuntime;
        let dir = tempdir().unwrap();

        let first = runtime.create_temp_file(dir.path(), ".server").unwrap();
        let second = runtime.create_temp_file(dir.path(), ".server").unwrap();

        assert_ne!(first, second);
        for path in [&first, &second] {
            assert_eq!(path.parent(), Some(dir.path()));
            assert!(runtime.is_file(path));
            let name = path.file_name().unwrap().to_string_lossy().into_owned();
            assert!(name.starts_with(".server"));
            assert!(name.ends_with(".part"));
        }
    }

    #[test]
    fn test_real_runtime_canonicalize() {
        let runtime = RealRuntime;
        let dir = tempdir().unwrap();
        let sub = dir.path().join("sub");
        runtime.create_dir_all(&sub).unwrap();

        let dotted = sub.join("..").join("sub");
        let canonical = runtime.canonicalize(&dotted).unwrap();
        assert_eq!(canonical, runtime.canonicalize(&sub).unwrap());

        assert!(runtime.canonicalize(&dir.path().join("missing")).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_real_runtime_canonicalize_follows_symlink() {
        let runtime = RealRuntime;
        let dir = tempdir().unwrap();
        let real = dir.path().join("real");
        runtime.create_dir_all(&real).unwrap();
        let link = dir.path().join("link");
        std::os::unix::fs::symlink(&real, &link).unwrap();

        assert_eq!(
            runtime.canonicalize(&link).unwrap(),
            runtime.canonicalize(&real).unwrap()
        );
    }
}
