use std::fmt;

/// Operating system and CPU architecture of the running launcher.
///
/// Values are always canonical: `darwin`, `linux` or `win32` for the OS and
/// `x64` or `arm64` for the architecture. Anything else is kept lower-cased
/// so that it fails the artifact lookup visibly.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlatformKey {
    pub os: String,
    pub arch: String,
}

impl PlatformKey {
    /// Build a key from raw platform names, normalizing known aliases.
    pub fn new(os: &str, arch: &str) -> Self {
        Self {
            os: normalize_os(os),
            arch: normalize_arch(arch),
        }
    }

    /// Detect the current platform
    pub fn detect() -> Self {
        Self::new(std::env::consts::OS, std::env::consts::ARCH)
    }

    pub fn is_windows(&self) -> bool {
        self.os == "win32"
    }
}

impl fmt::Display for PlatformKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.os, self.arch)
    }
}

fn normalize_os(os: &str) -> String {
    let os = os.to_lowercase();
    match os.as_str() {
        "macos" | "darwin" => "darwin".to_string(),
        "windows" | "win32" => "win32".to_string(),
        _ => os,
    }
}

fn normalize_arch(arch: &str) -> String {
    let arch = arch.to_lowercase();
    match arch.as_str() {
        "x86_64" | "amd64" | "x64" => "x64".to_string(),
        "aarch64" | "arm64" => "arm64".to_string(),
        // 32-bit x86; never an alias for x64
        "x86" | "i386" | "i686" | "ia32" => "ia32".to_string(),
        _ => arch,
    }
}

/// Trait for platform detection (useful for testing)
pub trait PlatformDetector: Send + Sync {
    fn detect(&self) -> PlatformKey;
}

/// Default platform detector using the target the launcher was built for
pub struct DefaultPlatformDetector;

impl PlatformDetector for DefaultPlatformDetector {
    fn detect(&self) -> PlatformKey {
        PlatformKey::detect()
    }
}
