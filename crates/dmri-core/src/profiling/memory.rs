//! Process memory introspection.
//!
//! Reading resident memory is platform dependent, so it sits behind the
//! [`MemoryProbe`] trait. [`default_probe`] picks the best implementation
//! for the current target and falls back to [`UnavailableProbe`].

use std::fs;
use std::path::PathBuf;
use tracing::debug;

/// Message reported when no probe can read memory.
pub const UNAVAILABLE_MESSAGE: &str = "Memory monitoring unavailable";

/// Source of the current process's resident set size.
pub trait MemoryProbe: Send + Sync {
    /// Resident memory in bytes, or `None` if it cannot be determined.
    fn resident_bytes(&self) -> Option<u64>;
}

/// Reads `VmRSS` from a Linux `/proc/<pid>/status` file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcStatusProbe {
    path: PathBuf,
}

impl ProcStatusProbe {
    /// Probe for the calling process.
    pub fn new() -> Self {
        Self::with_path("/proc/self/status")
    }

    /// Probe reading an arbitrary status file.
    pub fn with_path<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }
}

impl Default for ProcStatusProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryProbe for ProcStatusProbe {
    fn resident_bytes(&self) -> Option<u64> {
        let status = match fs::read_to_string(&self.path) {
            Ok(s) => s,
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "cannot read process status");
                return None;
            }
        };
        parse_vm_rss(&status)
    }
}

/// Probe for platforms without memory introspection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UnavailableProbe;

impl MemoryProbe for UnavailableProbe {
    fn resident_bytes(&self) -> Option<u64> {
        None
    }
}

/// The probe suited to the compilation target.
pub fn default_probe() -> Box<dyn MemoryProbe> {
    #[cfg(target_os = "linux")]
    {
        Box::new(ProcStatusProbe::new())
    }
    #[cfg(not(target_os = "linux"))]
    {
        Box::new(UnavailableProbe)
    }
}

/// Human-readable resident memory of the current process.
///
/// Returns `"Memory usage: <MB> MB"`, or [`UNAVAILABLE_MESSAGE`] when the
/// platform offers no way to read it. Never fails.
pub fn memory_usage() -> String {
    memory_usage_with(default_probe().as_ref())
}

/// Like [`memory_usage`] with an explicit probe.
pub fn memory_usage_with(probe: &dyn MemoryProbe) -> String {
    match probe.resident_bytes() {
        Some(bytes) => format!("Memory usage: {:.1} MB", bytes as f64 / 1024.0 / 1024.0),
        None => UNAVAILABLE_MESSAGE.to_string(),
    }
}

/// Extracts `VmRSS` (reported in kB) as bytes.
fn parse_vm_rss(status: &str) -> Option<u64> {
    let line = status.lines().find(|l| l.starts_with("VmRSS:"))?;
    let mut fields = line["VmRSS:".len()..].split_whitespace();
    let value: u64 = fields.next()?.parse().ok()?;
    match fields.next() {
        Some("kB") | None => Some(value * 1024),
        Some(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedProbe(Option<u64>);

    impl MemoryProbe for FixedProbe {
        fn resident_bytes(&self) -> Option<u64> {
            self.0
        }
    }

    #[test]
    fn test_parse_vm_rss() {
        let status = "Name:\tdmri\nVmPeak:\t  9000 kB\nVmRSS:\t    2048 kB\nThreads:\t1\n";
        assert_eq!(parse_vm_rss(status), Some(2048 * 1024));
        assert_eq!(parse_vm_rss("Name:\tdmri\n"), None);
        assert_eq!(parse_vm_rss("VmRSS:\tlots kB\n"), None);
    }

    #[test]
    fn test_memory_usage_formatting() {
        let probe = FixedProbe(Some(3 * 1024 * 1024 + 512 * 1024));
        assert_eq!(memory_usage_with(&probe), "Memory usage: 3.5 MB");
    }

    #[test]
    fn test_unavailable_placeholder() {
        assert_eq!(memory_usage_with(&UnavailableProbe), UNAVAILABLE_MESSAGE);
        assert_eq!(memory_usage_with(&FixedProbe(None)), UNAVAILABLE_MESSAGE);
    }

    #[test]
    fn test_missing_status_file() {
        let probe = ProcStatusProbe::with_path("/nonexistent/dmri/status");
        assert_eq!(probe.resident_bytes(), None);
        assert_eq!(memory_usage_with(&probe), UNAVAILABLE_MESSAGE);
    }

    #[test]
    fn test_default_probe_never_fails() {
        let report = memory_usage();
        assert!(report.starts_with("Memory usage: ") || report == UNAVAILABLE_MESSAGE);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_proc_status_on_linux() {
        assert!(ProcStatusProbe::new().resident_bytes().unwrap_or(0) > 0);
    }
}
