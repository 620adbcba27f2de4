use super::PlatformKey;

/// A platform-specific distributable server executable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArtifactDescriptor {
    /// Artifact base name, also the name of the optional npm package shipping it
    pub name: &'static str,
    /// `""` on POSIX targets, `".exe"` on Windows
    pub suffix: &'static str,
}

impl ArtifactDescriptor {
    /// File name of the executable, `<name><suffix>`.
    pub fn file_name(&self) -> String {
        format!("{}{}", self.name, self.suffix)
    }
}

/// Every supported platform, keyed by canonical `(os, arch)`.
pub const ARTIFACTS: &[((&str, &str), ArtifactDescriptor)] = &[
    (
        ("darwin", "x64"),
        ArtifactDescriptor {
            name: "kubernetes-mcp-server-darwin-amd64",
            suffix: "",
        },
    ),
    (
        ("darwin", "arm64"),
        ArtifactDescriptor {
            name: "kubernetes-mcp-server-darwin-arm64",
            suffix: "",
        },
    ),
    (
        ("linux", "x64"),
        ArtifactDescriptor {
            name: "kubernetes-mcp-server-linux-amd64",
            suffix: "",
        },
    ),
    (
        ("linux", "arm64"),
        ArtifactDescriptor {
            name: "kubernetes-mcp-server-linux-arm64",
            suffix: "",
        },
    ),
    (
        ("win32", "x64"),
        ArtifactDescriptor {
            name: "kubernetes-mcp-server-windows-amd64",
            suffix: ".exe",
        },
    ),
    (
        ("win32", "arm64"),
        ArtifactDescriptor {
            name: "kubernetes-mcp-server-windows-arm64",
            suffix: ".exe",
        },
    ),
];

/// Look up the artifact published for `key`.
///
/// Returns `None` for platforms without a pre-built server.
pub fn lookup_descriptor(key: &PlatformKey) -> Option<&'static ArtifactDescriptor> {
    ARTIFACTS
        .iter()
        .find(|((os, arch), _)| *os == key.os && *arch == key.arch)
        .map(|(_, descriptor)| descriptor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_artifact_names_are_unique() {
        let names: HashSet<_> = ARTIFACTS.iter().map(|(_, d)| d.name).collect();
        assert_eq!(names.len(), ARTIFACTS.len());
    }

    #[test]
    fn test_keys_are_canonical_and_unique() {
        let keys: HashSet<_> = ARTIFACTS.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys.len(), ARTIFACTS.len());

        for ((os, arch), _) in ARTIFACTS {
            let key = PlatformKey::new(os, arch);
            assert_eq!(key.os, *os);
            assert_eq!(key.arch, *arch);
        }
    }

    #[test]
    fn test_every_entry_is_reachable_by_lookup() {
        for ((os, arch), descriptor) in ARTIFACTS {
            let found = lookup_descriptor(&PlatformKey::new(os, arch)).unwrap();
            assert_eq!(found, descriptor);
        }
    }

    #[test]
    fn test_suffix_matches_os() {
        for ((os, arch), _) in ARTIFACTS {
            let key = PlatformKey::new(os, arch);
            let descriptor = lookup_descriptor(&key).unwrap();
            if key.is_windows() {
                assert_eq!(descriptor.suffix, ".exe", "{}", key);
            } else {
                assert_eq!(descriptor.suffix, "", "{}", key);
            }
        }
    }

    #[test]
    fn test_lookup_with_aliases() {
        let descriptor = lookup_descriptor(&PlatformKey::new("linux", "x86_64")).unwrap();
        assert_eq!(descriptor.name, "kubernetes-mcp-server-linux-amd64");

        let descriptor = lookup_descriptor(&PlatformKey::new("macos", "aarch64")).unwrap();
        assert_eq!(descriptor.name, "kubernetes-mcp-server-darwin-arm64");

        let descriptor = lookup_descriptor(&PlatformKey::new("windows", "amd64")).unwrap();
        assert_eq!(descriptor.file_name(), "kubernetes-mcp-server-windows-amd64.exe");
    }

    #[test]
    fn test_lookup_unsupported() {
        assert!(lookup_descriptor(&PlatformKey::new("freebsd", "mips")).is_none());
        assert!(lookup_descriptor(&PlatformKey::new("linux", "x86")).is_none());
        assert!(lookup_descriptor(&PlatformKey::new("linux", "riscv64")).is_none());
    }

    #[test]
    fn test_current_platform_is_supported() {
        #[cfg(all(
            any(target_os = "linux", target_os = "macos", target_os = "windows"),
            any(target_arch = "x86_64", target_arch = "aarch64")
        ))]
        assert!(lookup_descriptor(&PlatformKey::detect()).is_some());
    }
}
