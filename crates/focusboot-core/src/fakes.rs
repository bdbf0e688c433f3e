//! In-memory fakes for the bootstrap seams (testing only)
//!
//! Provides `StubTransport`, `SharedViewport`, `MemoryDocument` and
//! `RecordingRuntime`, which satisfy the trait contracts without a network,
//! a window or a real application runtime.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::BootError;
use crate::overrides::{OverrideResponse, OverrideTransport};
use crate::runtime::{AppRuntime, HostDocument, InitFlags, MountPoint, Viewport, WindowSize};
use crate::Result;

// ---------------------------------------------------------------------------
// StubTransport
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
enum StubReply {
    Respond(OverrideResponse),
    Fail(String),
}

/// Transport answering every request with the same canned reply.
#[derive(Debug)]
pub struct StubTransport {
    reply: StubReply,
    requests: Mutex<Vec<String>>,
}

impl StubTransport {
    pub fn responding(response: OverrideResponse) -> Self {
        StubTransport {
            reply: StubReply::Respond(response),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Simulates a request that never completes (connection refused etc.)
    pub fn failing(message: &str) -> Self {
        StubTransport {
            reply: StubReply::Fail(message.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Paths requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl OverrideTransport for StubTransport {
    async fn get(&self, path: &str) -> Result<OverrideResponse> {
        self.requests.lock().unwrap().push(path.to_string());
        match &self.reply {
            StubReply::Respond(response) => Ok(response.clone()),
            StubReply::Fail(message) => Err(BootError::Http(message.clone())),
        }
    }
}

// ---------------------------------------------------------------------------
// SharedViewport
// ---------------------------------------------------------------------------

/// Resizable viewport that counts reads.
#[derive(Debug)]
pub struct SharedViewport {
    size: Mutex<WindowSize>,
    reads: Mutex<usize>,
}

impl SharedViewport {
    pub fn new(width: u32, height: u32) -> Self {
        SharedViewport {
            size: Mutex::new(WindowSize::new(width, height)),
            reads: Mutex::new(0),
        }
    }

    pub fn resize(&self, width: u32, height: u32) {
        *self.size.lock().unwrap() = WindowSize::new(width, height);
    }

    pub fn reads(&self) -> usize {
        *self.reads.lock().unwrap()
    }
}

impl Viewport for SharedViewport {
    fn current_size(&self) -> WindowSize {
        *self.reads.lock().unwrap() += 1;
        *self.size.lock().unwrap()
    }
}

// ---------------------------------------------------------------------------
// MemoryDocument
// ---------------------------------------------------------------------------

/// Host document described by the list of element ids it contains.
#[derive(Debug, Default, Clone)]
pub struct MemoryDocument {
    ids: Vec<String>,
}

impl MemoryDocument {
    pub fn with_ids(ids: &[&str]) -> Self {
        MemoryDocument {
            ids: ids.iter().map(|id| id.to_string()).collect(),
        }
    }
}

impl HostDocument for MemoryDocument {
    fn count_elements_with_id(&self, id: &str) -> usize {
        self.ids.iter().filter(|candidate| *candidate == id).count()
    }
}

// ---------------------------------------------------------------------------
// RecordingRuntime
// ---------------------------------------------------------------------------

/// Runtime that records every start call.
#[derive(Debug, Default)]
pub struct RecordingRuntime {
    starts: Mutex<Vec<(MountPoint, InitFlags)>>,
    refuse: Option<String>,
}

impl RecordingRuntime {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runtime whose start call fails after being recorded.
    pub fn refusing(message: &str) -> Self {
        RecordingRuntime {
            starts: Mutex::new(Vec::new()),
            refuse: Some(message.to_string()),
        }
    }

    pub fn start_count(&self) -> usize {
        self.starts.lock().unwrap().len()
    }

    /// Flags passed to the most recent start call.
    pub fn last_flags(&self) -> Option<InitFlags> {
        self.starts
            .lock()
            .unwrap()
            .last()
            .map(|(_, flags)| flags.clone())
    }

    pub fn last_mount(&self) -> Option<MountPoint> {
        self.starts
            .lock()
            .unwrap()
            .last()
            .map(|(mount, _)| mount.clone())
    }
}

#[async_trait]
impl AppRuntime for RecordingRuntime {
    async fn start(&self, mount: MountPoint, flags: InitFlags) -> Result<()> {
        self.starts.lock().unwrap().push((mount, flags));
        match &self.refuse {
            Some(message) => Err(BootError::RuntimeStart(message.clone())),
            None => Ok(()),
        }
    }
}
