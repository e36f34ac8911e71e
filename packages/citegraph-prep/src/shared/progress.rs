//! Advisory progress reporting for long batch passes

use tracing::info;

/// Logs `label: done/total` every `every` items when enabled
#[derive(Debug, Clone)]
pub struct ProgressReporter {
    label: &'static str,
    enabled: bool,
    every: usize,
}

impl ProgressReporter {
    pub fn new(label: &'static str, enabled: bool, every: usize) -> Self {
        Self {
            label,
            enabled,
            every: every.max(1),
        }
    }

    /// Disabled reporter
    pub fn silent(label: &'static str) -> Self {
        Self::new(label, false, 1)
    }

    /// Call once per processed item with its zero-based position
    #[inline]
    pub fn tick(&self, position: usize, total: usize) {
        if self.enabled && (position + 1) % self.every == 0 {
            info!("{}: {}/{}", self.label, position + 1, total);
        }
    }
}
