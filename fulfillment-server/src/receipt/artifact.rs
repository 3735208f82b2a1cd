//! Receipt artifacts
//!
//! A rendered receipt lives in a transient file scoped to a single
//! fulfillment call; the caller discards it once the notification attempt
//! has finished, success or not.

use std::path::{Path, PathBuf};

/// Deterministic attachment/file name for an order's receipt
pub fn receipt_filename(order_key: &str) -> String {
    format!("receipt-{}.txt", order_key)
}

/// Handle to a rendered receipt file
///
/// Ownership of the lifetime rests with the fulfillment call that requested
/// the rendering, not with the renderer.
#[derive(Debug)]
pub struct ReceiptArtifact {
    path: PathBuf,
    filename: String,
}

impl ReceiptArtifact {
    pub fn new(path: PathBuf, filename: String) -> Self {
        Self { path, filename }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Delete the underlying file
    ///
    /// Best effort: a failed delete is logged, never propagated, so the
    /// fulfillment outcome is not affected by cleanup.
    pub fn discard(self) {
        if let Err(e) = std::fs::remove_file(&self.path) {
            tracing::warn!(
                path = %self.path.display(),
                error = %e,
                "Failed to delete receipt artifact"
            );
        }
    }
}
