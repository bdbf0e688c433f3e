//! End-to-end launcher tests against in-memory fakes.

use async_trait::async_trait;
use focusboot_core::fakes::{MemoryDocument, RecordingRuntime, SharedViewport, StubTransport};
use focusboot_core::{
    BootConfig, BootError, FocusPoint, Launcher, NameEntry, OverrideFetcher, OverrideResponse,
    OverrideTransport, StaticDatasets, WindowSize, OVERRIDES_PATH,
};
use serde_json::json;
use std::sync::Arc;

fn base_datasets() -> StaticDatasets {
    StaticDatasets::new(
        vec![NameEntry(json!({"name": "Ada"}))],
        vec![FocusPoint(json!({"id": 1}))],
    )
}

struct Harness {
    viewport: Arc<SharedViewport>,
    runtime: Arc<RecordingRuntime>,
}

impl Harness {
    fn new() -> Self {
        Harness {
            viewport: Arc::new(SharedViewport::new(1024, 768)),
            runtime: Arc::new(RecordingRuntime::new()),
        }
    }

    fn launcher(&self, document: MemoryDocument) -> Launcher {
        Launcher::new(
            BootConfig::new("http://localhost:3000"),
            base_datasets(),
            Arc::new(document),
            self.viewport.clone(),
            self.runtime.clone(),
        )
    }

    fn launcher_with_root(&self) -> Launcher {
        self.launcher(MemoryDocument::with_ids(&["root"]))
    }
}

fn fetcher(transport: Arc<StubTransport>) -> OverrideFetcher {
    OverrideFetcher::new(transport)
}

/// Scenario A: JSON override records are appended after the base
#[tokio::test]
async fn test_json_overrides_are_appended() {
    let harness = Harness::new();
    let transport = Arc::new(StubTransport::responding(OverrideResponse::json(
        r#"[{"id":2}]"#,
    )));

    let report = harness
        .launcher_with_root()
        .launch(&fetcher(transport.clone()))
        .await
        .expect("launch failed");

    let flags = harness.runtime.last_flags().expect("runtime not started");
    assert_eq!(
        flags.focus_points,
        vec![FocusPoint(json!({"id": 1})), FocusPoint(json!({"id": 2}))]
    );
    assert_eq!(report.base_focus_points, 1);
    assert_eq!(report.override_focus_points, 1);
    assert_eq!(report.total_focus_points(), 2);
    assert_eq!(transport.requests(), vec![OVERRIDES_PATH.to_string()]);
}

/// Scenario B: the HTML fallback document means "no overrides"
#[tokio::test]
async fn test_html_fallback_keeps_base_only() {
    let harness = Harness::new();
    let transport = Arc::new(StubTransport::responding(OverrideResponse::html(
        "<html><body><div id=\"root\"></div></body></html>",
    )));

    harness
        .launcher_with_root()
        .launch(&fetcher(transport))
        .await
        .expect("launch failed");

    let flags = harness.runtime.last_flags().expect("runtime not started");
    assert_eq!(flags.focus_points, vec![FocusPoint(json!({"id": 1}))]);
    assert_eq!(harness.runtime.start_count(), 1);
}

#[tokio::test]
async fn test_empty_json_override_keeps_base_only() {
    let harness = Harness::new();
    let transport = Arc::new(StubTransport::responding(OverrideResponse::json("[]")));

    let report = harness
        .launcher_with_root()
        .launch(&fetcher(transport))
        .await
        .expect("launch failed");

    let flags = harness.runtime.last_flags().expect("runtime not started");
    assert_eq!(flags.focus_points, base_datasets().focus_points);
    assert_eq!(report.override_focus_points, 0);
}

#[tokio::test]
async fn test_not_found_status_keeps_base_only() {
    let harness = Harness::new();
    let transport = Arc::new(StubTransport::responding(OverrideResponse::new(
        404,
        Some("text/plain"),
        "Not Found",
    )));

    harness
        .launcher_with_root()
        .launch(&fetcher(transport))
        .await
        .expect("launch failed");

    let flags = harness.runtime.last_flags().expect("runtime not started");
    assert_eq!(flags.focus_points, base_datasets().focus_points);
}

#[tokio::test]
async fn test_malformed_json_never_starts_runtime() {
    let harness = Harness::new();
    let transport = Arc::new(StubTransport::responding(OverrideResponse::json(
        "[{\"id\": 2",
    )));

    let err = harness
        .launcher_with_root()
        .launch(&fetcher(transport))
        .await
        .unwrap_err();

    assert!(matches!(err, BootError::MalformedOverrides(_)));
    assert_eq!(harness.runtime.start_count(), 0);
    assert_eq!(harness.viewport.reads(), 0);
}

#[tokio::test]
async fn test_transport_failure_never_starts_runtime() {
    let harness = Harness::new();
    let transport = Arc::new(StubTransport::failing("connection refused"));

    let err = harness
        .launcher_with_root()
        .launch(&fetcher(transport))
        .await
        .unwrap_err();

    assert!(matches!(err, BootError::Http(_)));
    assert_eq!(harness.runtime.start_count(), 0);
}

#[tokio::test]
async fn test_missing_mount_never_starts_runtime() {
    let harness = Harness::new();
    let transport = Arc::new(StubTransport::responding(OverrideResponse::json("[]")));

    let err = harness
        .launcher(MemoryDocument::with_ids(&["app"]))
        .launch(&fetcher(transport))
        .await
        .unwrap_err();

    assert!(matches!(err, BootError::MountNotFound(_)));
    assert_eq!(harness.runtime.start_count(), 0);
}

#[tokio::test]
async fn test_runtime_receives_resolved_mount() {
    let harness = Harness::new();
    let launcher = Launcher::new(
        BootConfig::new("http://localhost:3000").with_mount_id("app"),
        base_datasets(),
        Arc::new(MemoryDocument::with_ids(&["root", "app"])),
        harness.viewport.clone(),
        harness.runtime.clone(),
    );

    launcher.launch_static().await.expect("launch failed");

    assert_eq!(harness.runtime.last_mount().unwrap().id, "app");
}

#[tokio::test]
async fn test_runtime_refusal_propagates() {
    let runtime = Arc::new(RecordingRuntime::refusing("boom"));
    let launcher = Launcher::new(
        BootConfig::new("http://localhost:3000"),
        base_datasets(),
        Arc::new(MemoryDocument::with_ids(&["root"])),
        Arc::new(SharedViewport::new(10, 10)),
        runtime.clone(),
    );

    let err = launcher.launch_static().await.unwrap_err();
    assert!(matches!(err, BootError::RuntimeStart(msg) if msg == "boom"));
    assert_eq!(runtime.start_count(), 1);
}

#[tokio::test]
async fn test_repeated_fetches_do_not_start_runtime() {
    let harness = Harness::new();
    let transport = Arc::new(StubTransport::responding(OverrideResponse::json(
        r#"[{"id":2}]"#,
    )));
    let fetcher = fetcher(transport.clone());

    fetcher.fetch().await.unwrap();
    fetcher.fetch().await.unwrap();
    harness
        .launcher_with_root()
        .launch(&fetcher)
        .await
        .expect("launch failed");

    assert_eq!(transport.requests().len(), 3);
    assert_eq!(harness.runtime.start_count(), 1);
}

/// Resizes the viewport while the override request is in flight.
struct ResizingTransport {
    viewport: Arc<SharedViewport>,
    inner: StubTransport,
}

#[async_trait]
impl OverrideTransport for ResizingTransport {
    async fn get(&self, path: &str) -> focusboot_core::Result<OverrideResponse> {
        self.viewport.resize(1920, 1080);
        self.inner.get(path).await
    }
}

#[tokio::test]
async fn test_viewport_is_read_when_flags_are_built() {
    let harness = Harness::new();
    let transport = Arc::new(ResizingTransport {
        viewport: harness.viewport.clone(),
        inner: StubTransport::responding(OverrideResponse::json("[]")),
    });

    let report = harness
        .launcher_with_root()
        .launch(&OverrideFetcher::new(transport))
        .await
        .expect("launch failed");

    // Later resizes are not reflected in the handed-off payload.
    harness.viewport.resize(640, 480);

    let flags = harness.runtime.last_flags().unwrap();
    assert_eq!((flags.window_width, flags.window_height), (1920, 1080));
    assert_eq!(report.window, WindowSize::new(1920, 1080));
    assert_eq!(harness.viewport.reads(), 1);
}

#[tokio::test]
async fn test_static_variant_uses_base_set_without_fetching() {
    let harness = Harness::new();

    let report = harness
        .launcher_with_root()
        .launch_static()
        .await
        .expect("launch failed");

    let flags = harness.runtime.last_flags().unwrap();
    assert_eq!(flags.focus_points, base_datasets().focus_points);
    assert_eq!(flags.names, base_datasets().names);
    assert_eq!((flags.window_width, flags.window_height), (1024, 768));
    assert_eq!(report.override_focus_points, 0);
}

#[tokio::test]
async fn test_bundled_datasets_launch() {
    let runtime = Arc::new(RecordingRuntime::new());
    let bundled = StaticDatasets::bundled().unwrap();
    let launcher = Launcher::new(
        BootConfig::new("http://localhost:3000"),
        bundled.clone(),
        Arc::new(MemoryDocument::with_ids(&["root"])),
        Arc::new(SharedViewport::new(800, 600)),
        runtime.clone(),
    );
    let transport = Arc::new(StubTransport::responding(OverrideResponse::json(
        r#"[{"id": 99, "label": "Override"}]"#,
    )));

    launcher.launch(&fetcher(transport)).await.unwrap();

    let flags = runtime.last_flags().unwrap();
    assert_eq!(flags.focus_points.len(), bundled.focus_points.len() + 1);
    assert_eq!(
        &flags.focus_points[..bundled.focus_points.len()],
        bundled.focus_points.as_slice()
    );
    assert_eq!(
        flags.focus_points.last(),
        Some(&FocusPoint(json!({"id": 99, "label": "Override"})))
    );
}
