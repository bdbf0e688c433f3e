//! Runtime handoff seam
//!
//! The application runtime is opaque: it accepts a mount point and an
//! [`InitFlags`] payload and takes over from there. This module holds that
//! narrow interface plus the viewport and host-document lookups the launcher
//! needs to build the payload.

use crate::datasets::{FocusPoint, NameEntry};
use crate::error::BootError;
use crate::Result;
use async_trait::async_trait;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Viewport dimensions at one instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowSize {
    pub width: u32,
    pub height: u32,
}

impl WindowSize {
    pub fn new(width: u32, height: u32) -> Self {
        WindowSize { width, height }
    }
}

/// Source of the current viewport size
pub trait Viewport: Send + Sync {
    /// Size right now; callers must not cache it.
    fn current_size(&self) -> WindowSize;
}

/// Viewport with a size fixed at creation (CLI flags, headless hosts)
#[derive(Debug, Clone, Copy)]
pub struct FixedViewport(pub WindowSize);

impl Viewport for FixedViewport {
    fn current_size(&self) -> WindowSize {
        self.0
    }
}

/// One-shot configuration payload handed to the runtime
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitFlags {
    pub window_width: u32,
    pub window_height: u32,
    pub names: Vec<NameEntry>,
    pub focus_points: Vec<FocusPoint>,
}

impl InitFlags {
    pub fn new(size: WindowSize, names: Vec<NameEntry>, focus_points: Vec<FocusPoint>) -> Self {
        InitFlags {
            window_width: size.width,
            window_height: size.height,
            names,
            focus_points,
        }
    }
}

/// Resolved attachment point in the host document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MountPoint {
    pub id: String,
}

/// Document hosting the application
pub trait HostDocument: Send + Sync {
    /// Number of elements carrying `id`.
    fn count_elements_with_id(&self, id: &str) -> usize;
}

/// Find the single element with `id`.
pub fn resolve_mount(document: &dyn HostDocument, id: &str) -> Result<MountPoint> {
    match document.count_elements_with_id(id) {
        0 => Err(BootError::MountNotFound(id.to_string())),
        1 => Ok(MountPoint { id: id.to_string() }),
        count => Err(BootError::AmbiguousMount {
            id: id.to_string(),
            count,
        }),
    }
}

/// HTML shell (usually `index.html`) scanned for `id` attributes
#[derive(Debug, Clone)]
pub struct HtmlShell {
    source: String,
}

impl HtmlShell {
    pub fn new(source: impl Into<String>) -> Self {
        HtmlShell {
            source: source.into(),
        }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        Ok(Self::new(std::fs::read_to_string(path)?))
    }
}

fn comment_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?s)<!--.*?-->").expect("comment pattern compiles"))
}

fn start_tag_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"<[A-Za-z][^>]*>").expect("start tag pattern compiles"))
}

/// `id` attribute inside a start tag; the value lands in group 1, 2 or 3
/// depending on quoting.
fn id_attribute_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"\s(?i:id)\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`/]+))"#)
            .expect("id attribute pattern compiles")
    })
}

impl HostDocument for HtmlShell {
    /// Counts start tags whose `id` value equals `id` exactly. Attribute
    /// names are case-insensitive, values are not; comments are skipped.
    fn count_elements_with_id(&self, id: &str) -> usize {
        let source = comment_pattern().replace_all(&self.source, "");
        start_tag_pattern()
            .find_iter(&source)
            .filter(|tag| {
                id_attribute_pattern()
                    .captures_iter(tag.as_str())
                    .any(|caps| {
                        let value = caps.get(1).or_else(|| caps.get(2)).or_else(|| caps.get(3));
                        value.map(|m| m.as_str()) == Some(id)
                    })
            })
            .count()
    }
}

/// The external application runtime
#[async_trait]
pub trait AppRuntime: Send + Sync {
    /// Attach at `mount` and take over with `flags`.
    async fn start(&self, mount: MountPoint, flags: InitFlags) -> Result<()>;
}

/// Document written by [`JsonHandoffRuntime`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Handoff {
    pub mount: String,
    pub flags: InitFlags,
}

/// Runtime that serializes the handoff as JSON, for a host process (or a
/// templating step) that starts the real application.
#[derive(Debug, Clone, Default)]
pub struct JsonHandoffRuntime {
    out: Option<PathBuf>,
}

impl JsonHandoffRuntime {
    /// Write to stdout
    pub fn stdout() -> Self {
        Self::default()
    }

    /// Write to a file
    pub fn to_file(path: impl Into<PathBuf>) -> Self {
        JsonHandoffRuntime {
            out: Some(path.into()),
        }
    }
}

#[async_trait]
impl AppRuntime for JsonHandoffRuntime {
    async fn start(&self, mount: MountPoint, flags: InitFlags) -> Result<()> {
        let handoff = Handoff {
            mount: mount.id,
            flags,
        };
        let rendered = serde_json::to_string_pretty(&handoff)?;

        match &self.out {
            Some(path) => std::fs::write(path, rendered + "\n")?,
            None => {
                let mut stdout = std::io::stdout().lock();
                writeln!(stdout, "{}", rendered)?;
            }
        }
        Ok(())
    }
}
