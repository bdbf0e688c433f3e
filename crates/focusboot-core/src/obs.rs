//! Structured lifecycle events for the bootstrap.
//!
//! Every event carries an `event` field so log pipelines can filter on it:
//! `boot.datasets_loaded`, `boot.override_accepted`, `boot.override_absent`,
//! `boot.runtime_started`, `boot.failed`.

use crate::overrides::AbsenceReason;
use tracing::info;

/// Span covering one bootstrap, tagged with its variant.
///
/// The bootstrap suspends at the override fetch, so the span is attached
/// with `tracing::Instrument` rather than held entered across the await:
///
/// ```ignore
/// launcher_future.instrument(boot_span("overrides")).await
/// ```
pub fn boot_span(variant: &str) -> tracing::Span {
    tracing::info_span!("focusboot.boot", variant = %variant)
}

pub fn emit_datasets_loaded(names: usize, focus_points: usize) {
    info!(
        event = "boot.datasets_loaded",
        names = names,
        focus_points = focus_points
    );
}

/// Override document found and parsed.
pub fn emit_override_accepted(status: u16, count: usize) {
    info!(event = "boot.override_accepted", status = status, count = count);
}

/// No override document; expected when none is deployed.
pub fn emit_override_absent(status: u16, reason: &AbsenceReason) {
    match reason {
        AbsenceReason::MissingContentType => tracing::warn!(
            event = "boot.override_absent",
            status = status,
            reason = %reason,
        ),
        _ => info!(event = "boot.override_absent", status = status, reason = %reason),
    }
}

pub fn emit_runtime_started(mount_id: &str, width: u32, height: u32, focus_points: usize) {
    info!(
        event = "boot.runtime_started",
        mount_id = %mount_id,
        window_width = width,
        window_height = height,
        focus_points = focus_points,
    );
}

/// Bootstrap aborted before or during runtime start.
pub fn emit_boot_failed(error: &dyn std::fmt::Display) {
    tracing::error!(event = "boot.failed", error = %error);
}
