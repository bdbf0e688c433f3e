//! Bootstrap orchestration
//!
//! Datasets -> override fetch -> merge -> mount lookup -> viewport snapshot
//! -> runtime start. [`Launcher::launch`] and [`Launcher::launch_static`]
//! consume the launcher, so a runtime is started at most once per launcher.
//! Any failure aborts before the runtime sees partial data.

use crate::config::BootConfig;
use crate::datasets::{FocusPoint, StaticDatasets};
use crate::merge::merge_focus_points;
use crate::obs;
use crate::overrides::OverrideFetcher;
use crate::runtime::{
    resolve_mount, AppRuntime, HostDocument, InitFlags, MountPoint, Viewport, WindowSize,
};
use crate::Result;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::Instrument;

/// Summary of a completed launch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchReport {
    pub mount: MountPoint,
    pub window: WindowSize,
    pub names: usize,
    pub base_focus_points: usize,
    pub override_focus_points: usize,
}

impl LaunchReport {
    pub fn total_focus_points(&self) -> usize {
        self.base_focus_points + self.override_focus_points
    }
}

/// One-shot bootstrap
pub struct Launcher {
    config: BootConfig,
    datasets: StaticDatasets,
    document: Arc<dyn HostDocument>,
    viewport: Arc<dyn Viewport>,
    runtime: Arc<dyn AppRuntime>,
}

impl Launcher {
    pub fn new(
        config: BootConfig,
        datasets: StaticDatasets,
        document: Arc<dyn HostDocument>,
        viewport: Arc<dyn Viewport>,
        runtime: Arc<dyn AppRuntime>,
    ) -> Self {
        Launcher {
            config,
            datasets,
            document,
            viewport,
            runtime,
        }
    }

    /// Fetch overrides once, merge them after the base points, start the
    /// runtime.
    pub async fn launch(self, fetcher: &OverrideFetcher) -> Result<LaunchReport> {
        let result = self
            .run_with_overrides(fetcher)
            .instrument(obs::boot_span("overrides"))
            .await;
        if let Err(err) = &result {
            obs::emit_boot_failed(err);
        }
        result
    }

    /// Start the runtime with the bundled datasets only.
    pub async fn launch_static(self) -> Result<LaunchReport> {
        let span = obs::boot_span("static");
        span.in_scope(|| {
            obs::emit_datasets_loaded(self.datasets.names.len(), self.datasets.focus_points.len())
        });
        let result = self.start(Vec::new()).instrument(span).await;
        if let Err(err) = &result {
            obs::emit_boot_failed(err);
        }
        result
    }

    async fn run_with_overrides(self, fetcher: &OverrideFetcher) -> Result<LaunchReport> {
        obs::emit_datasets_loaded(self.datasets.names.len(), self.datasets.focus_points.len());
        let overrides = fetcher.fetch().await?.into_points();
        self.start(overrides).await
    }

    async fn start(self, overrides: Vec<FocusPoint>) -> Result<LaunchReport> {
        let Launcher {
            config,
            datasets,
            document,
            viewport,
            runtime,
        } = self;

        let base_focus_points = datasets.focus_points.len();
        let override_focus_points = overrides.len();
        let focus_points = merge_focus_points(&datasets.focus_points, overrides);

        let mount = resolve_mount(document.as_ref(), &config.mount_id)?;

        let window = viewport.current_size();
        let flags = InitFlags::new(window, datasets.names, focus_points);
        let names = flags.names.len();

        runtime.start(mount.clone(), flags).await?;
        obs::emit_runtime_started(
            &mount.id,
            window.width,
            window.height,
            base_focus_points + override_focus_points,
        );

        Ok(LaunchReport {
            mount,
            window,
            names,
            base_focus_points,
            override_focus_points,
        })
    }
}
