//! Kernel retirement rules.
//!
//! Decides which installed `linux-image-*` packages belong to kernels other
//! than the one currently running, and how risky removing them is.

use crate::types::Tier;
use regex::Regex;
use std::sync::OnceLock;

/// Reason attached when the removal list still mentions the running kernel.
pub const CURRENT_KERNEL_CONFLICT: &str = "current kernel detected in removal list";

fn kernel_image_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^linux-image-[0-9]").expect("static regex is valid"))
}

/// Base form of a kernel release: the release with a single trailing
/// hyphenated, purely alphabetic flavor token removed.
///
/// `5.15.0-91-generic` becomes `5.15.0-91`. Releases whose last token is not
/// purely alphabetic (`6.1.0-13-amd64`, `5.15.0-91`) are returned unchanged.
pub fn kernel_base(release: &str) -> &str {
    let release = release.trim();
    match release.rsplit_once('-') {
        Some((base, flavor))
            if !base.is_empty()
                && !flavor.is_empty()
                && flavor.chars().all(|c| c.is_ascii_alphabetic()) =>
        {
            base
        }
        _ => release,
    }
}

/// True for versioned kernel image packages (`linux-image-<digit>...`).
///
/// Meta packages such as `linux-image-generic` do not match.
pub fn is_kernel_image(package: &str) -> bool {
    kernel_image_pattern().is_match(package)
}

/// Installed kernel images that do not belong to the running kernel.
///
/// A candidate is kept unless its name contains the base of `current`, so an
/// empty `current` retires nothing. Order of `installed` is preserved.
pub fn old_kernels<'a, I>(current: &str, installed: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let base = kernel_base(current);
    installed
        .into_iter()
        .filter(|name| is_kernel_image(name))
        .filter(|name| !name.contains(base))
        .map(str::to_string)
        .collect()
}

/// Outcome of classifying a kernel removal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KernelVerdict {
    /// `Warning` normally, `Unsafe` when the running kernel is implicated.
    pub tier: Tier,
    /// Human-readable justification.
    pub reason: String,
}

/// Classify removing `old` while `current` is running.
///
/// Returns `None` when there is nothing to remove.
pub fn classify_removal(current: &str, old: &[String]) -> Option<KernelVerdict> {
    if old.is_empty() {
        return None;
    }

    let current = current.trim();
    if !current.is_empty() && old.iter().any(|name| name.contains(current)) {
        return Some(KernelVerdict {
            tier: Tier::Unsafe,
            reason: CURRENT_KERNEL_CONFLICT.to_string(),
        });
    }

    Some(KernelVerdict {
        tier: Tier::Warning,
        reason: format!("removes old kernel packages: {}", old.join(", ")),
    })
}
