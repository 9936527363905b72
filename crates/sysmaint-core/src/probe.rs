//! Read-only inspection of the running system.
//!
//! The [`SystemProbe`] trait is the seam between analysis and the machine:
//! [`DpkgProbe`] queries `uname` and `dpkg-query`, tests substitute fakes.

use crate::kernel::is_kernel_image;
use std::process::Command;

/// Format string passed to `dpkg-query -W -f`.
pub const DPKG_QUERY_FORMAT: &str = "${db:Status-Abbrev}\t${Package}\n";

/// Errors raised while reading system state.
#[derive(thiserror::Error, Debug)]
pub enum ProbeError {
    /// The required tool is not on `PATH`.
    #[error("'{0}' not found in PATH")]
    ToolMissing(String),

    /// The tool could not be started.
    #[error("failed to run '{program}': {source}")]
    Spawn {
        /// Program that failed to start.
        program: String,
        /// Underlying OS error.
        #[source]
        source: std::io::Error,
    },

    /// The tool ran but exited unsuccessfully.
    #[error("'{program}' exited with {status}: {stderr}")]
    Failed {
        /// Program that failed.
        program: String,
        /// Exit status description.
        status: String,
        /// Trimmed standard error.
        stderr: String,
    },

    /// The tool produced no usable output.
    #[error("{0} returned no output")]
    Empty(&'static str),
}

/// One row of the package database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledPackage {
    /// Package name.
    pub name: String,
    /// Two-letter dpkg status abbreviation (`ii`, `rc`, ...).
    pub status: String,
}

impl InstalledPackage {
    /// Fully installed (`ii`).
    pub fn is_installed(&self) -> bool {
        self.status == "ii"
    }

    /// Removed with configuration files left behind (`rc`).
    pub fn is_residual_config(&self) -> bool {
        self.status == "rc"
    }
}

/// Read-only view of the package database at analysis time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageSnapshot {
    packages: Vec<InstalledPackage>,
}

impl PackageSnapshot {
    /// Wrap a list of package rows.
    pub fn new(packages: Vec<InstalledPackage>) -> Self {
        Self { packages }
    }

    /// Parse `dpkg-query` output produced with [`DPKG_QUERY_FORMAT`].
    ///
    /// Malformed lines are skipped.
    pub fn parse(output: &str) -> Self {
        let packages = output
            .lines()
            .filter_map(|line| {
                let (status, name) = line.split_once('\t')?;
                let status = status.trim().get(..2)?;
                let name = name.trim();
                if name.is_empty() {
                    return None;
                }
                Some(InstalledPackage {
                    name: name.to_string(),
                    status: status.to_string(),
                })
            })
            .collect();
        Self { packages }
    }

    /// All rows.
    pub fn packages(&self) -> &[InstalledPackage] {
        &self.packages
    }

    /// Installed versioned kernel image packages, in database order.
    pub fn kernel_images(&self) -> Vec<&str> {
        self.packages
            .iter()
            .filter(|p| p.is_installed() && is_kernel_image(&p.name))
            .map(|p| p.name.as_str())
            .collect()
    }

    /// Packages in the `rc` state, in database order.
    pub fn residual_configs(&self) -> Vec<&str> {
        self.packages
            .iter()
            .filter(|p| p.is_residual_config())
            .map(|p| p.name.as_str())
            .collect()
    }
}

/// Read-only access to kernel and package state.
pub trait SystemProbe {
    /// Release string of the running kernel (as printed by `uname -r`).
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError`] when the release cannot be determined.
    fn running_kernel(&self) -> Result<String, ProbeError>;

    /// Current contents of the package database.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError`] when the package manager cannot be queried.
    fn package_snapshot(&self) -> Result<PackageSnapshot, ProbeError>;
}

/// Probe backed by `uname` and `dpkg-query`.
#[derive(Debug, Default, Clone, Copy)]
pub struct DpkgProbe;

impl DpkgProbe {
    fn capture(program: &str, args: &[&str]) -> Result<String, ProbeError> {
        let path = which::which(program).map_err(|_| ProbeError::ToolMissing(program.to_string()))?;
        tracing::debug!(program, ?args, "probing");

        let output = Command::new(path)
            .args(args)
            .output()
            .map_err(|source| ProbeError::Spawn {
                program: program.to_string(),
                source,
            })?;

        if !output.status.success() {
            return Err(ProbeError::Failed {
                program: program.to_string(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl SystemProbe for DpkgProbe {
    fn running_kernel(&self) -> Result<String, ProbeError> {
        let release = Self::capture("uname", &["-r"])?;
        let release = release.trim();
        if release.is_empty() {
            return Err(ProbeError::Empty("uname -r"));
        }
        Ok(release.to_string())
    }

    fn package_snapshot(&self) -> Result<PackageSnapshot, ProbeError> {
        let output = Self::capture("dpkg-query", &["-W", "-f", DPKG_QUERY_FORMAT])?;
        Ok(PackageSnapshot::parse(&output))
    }
}
