//! focusboot-core: application bootstrap
//!
//! Assembles the initialization payload for an application runtime and hands
//! it over exactly once:
//!
//! 1. [`datasets`] - bundled names and base focus points
//! 2. [`overrides`] - one request for `/focus-point-overrides.json`, classified
//!    as override records or "no overrides"
//! 3. [`merge`] - base points followed by overrides
//! 4. [`launcher`] - viewport snapshot, mount lookup and runtime start
//!
//! The runtime itself sits behind [`runtime::AppRuntime`].

pub mod config;
pub mod datasets;
pub mod error;
pub mod fakes;
pub mod launcher;
pub mod merge;
pub mod obs;
pub mod overrides;
pub mod runtime;
pub mod telemetry;

pub use config::{BootConfig, DEFAULT_BASE_URL, DEFAULT_MOUNT_ID};
pub use datasets::{FocusPoint, NameEntry, StaticDatasets};
pub use error::BootError;
pub use launcher::{LaunchReport, Launcher};
pub use merge::merge_focus_points;
pub use overrides::{
    classify, is_json_media_type, AbsenceReason, HttpTransport, OverrideDecision, OverrideFetcher,
    OverrideResponse, OverrideTransport, OVERRIDES_PATH,
};
pub use runtime::{
    resolve_mount, AppRuntime, FixedViewport, Handoff, HostDocument, HtmlShell, InitFlags,
    JsonHandoffRuntime, MountPoint, Viewport, WindowSize,
};

/// Result type for bootstrap operations
pub type Result<T> = std::result::Result<T, BootError>;
