//! Focus-point merge
//!
//! Overrides are additive annotations, not patches: they are appended after
//! the base records with no deduplication or key-based replacement.

use crate::datasets::FocusPoint;

/// Base points followed by overrides, each side in its original order.
pub fn merge_focus_points(base: &[FocusPoint], overrides: Vec<FocusPoint>) -> Vec<FocusPoint> {
    let mut merged = Vec::with_capacity(base.len() + overrides.len());
    merged.extend_from_slice(base);
    merged.extend(overrides);
    merged
}
