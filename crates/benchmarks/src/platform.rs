//! Host platform detection for result metadata.

use crate::process::{CommandSpec, ProcessRunner};
use crate::result::PlatformInfo;
use sysinfo::System;
use tracing::debug;

/// Value recorded when a field cannot be determined.
pub const UNKNOWN: &str = "unknown";

impl PlatformInfo {
    /// Describe the current host.
    ///
    /// `python` is the interpreter whose version is recorded; it is queried
    /// through `runner` with `--version`.
    pub fn detect(runner: &dyn ProcessRunner, python: &str) -> Self {
        let mut system = System::new();
        system.refresh_cpu();
        let processor = system
            .cpus()
            .first()
            .map(|cpu| cpu.brand().trim().to_string())
            .unwrap_or_default();

        Self {
            system: os_family(std::env::consts::OS).to_string(),
            release: System::kernel_version().unwrap_or_else(|| UNKNOWN.to_string()),
            machine: std::env::consts::ARCH.to_string(),
            processor,
            python_version: python_version(runner, python),
        }
    }
}

/// Conventional OS family name for a Rust target OS identifier.
pub fn os_family(os: &str) -> &str {
    match os {
        "linux" => "Linux",
        "macos" => "Darwin",
        "windows" => "Windows",
        "freebsd" => "FreeBSD",
        other => other,
    }
}

/// Version string reported by `<python> --version`, e.g. `3.12.1`.
pub fn python_version(runner: &dyn ProcessRunner, python: &str) -> String {
    let command = CommandSpec::new(python).args(["--version"]);
    match runner.run(&command) {
        Ok(output) if output.success => {
            // Older interpreters print the version on stderr.
            let text = if output.stdout.trim().is_empty() {
                &output.stderr
            } else {
                &output.stdout
            };
            parse_python_version(text).unwrap_or_else(|| UNKNOWN.to_string())
        }
        Ok(output) => {
            debug!(exit_code = ?output.exit_code, "python version query failed");
            UNKNOWN.to_string()
        }
        Err(e) => {
            debug!(error = %e, "python interpreter not available");
            UNKNOWN.to_string()
        }
    }
}

fn parse_python_version(text: &str) -> Option<String> {
    let version = text.trim().strip_prefix("Python")?.trim();
    (!version.is_empty()).then(|| version.to_string())
}
