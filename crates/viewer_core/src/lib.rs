//! Presentation-state orchestrator for the single-screen resume viewer.
//!
//! Owns four observable state values: the document load state, the latest
//! location sample, and the display customization scalars. A rendering
//! layer subscribes through [`tokio::sync::watch`] receivers and invokes
//! the mutation operations; it never writes state directly.

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc, Mutex, PoisonError,
};

use futures::StreamExt;
use geolocation::{GeoSample, LocationStreamProvider};
use resume_source::ResumeSource;
use shared::domain::{Resume, Rgba};
use tokio::{sync::watch, task::JoinHandle};
use tracing::{debug, info, warn};

pub const DEFAULT_FONT_SIZE: f32 = 18.0;
pub const DEFAULT_FONT_COLOR: Rgba = Rgba::BLACK;
pub const DEFAULT_BACKGROUND_COLOR: Rgba = Rgba::LIGHT_CYAN;

/// Advisory slider range for the font size control. The setters do not
/// clamp; input widgets are expected to stay within this range.
pub const MIN_FONT_SIZE: f32 = 12.0;
pub const MAX_FONT_SIZE: f32 = 28.0;

/// Lifecycle of the document fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    Loading,
    Loaded(Resume),
    Failed(String),
}

/// Latest known device position.
///
/// `Failed` makes location stream errors observable instead of silently
/// terminating the subscription.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationState {
    Unknown,
    Sample(GeoSample),
    Failed(String),
}

/// Construction parameters: which document to fetch and the starting
/// customization values.
#[derive(Debug, Clone)]
pub struct ViewerConfig {
    pub document_name: String,
    pub font_size: f32,
    pub font_color: Rgba,
    pub background_color: Rgba,
}

impl ViewerConfig {
    pub fn for_document(document_name: impl Into<String>) -> Self {
        Self {
            document_name: document_name.into(),
            font_size: DEFAULT_FONT_SIZE,
            font_color: DEFAULT_FONT_COLOR,
            background_color: DEFAULT_BACKGROUND_COLOR,
        }
    }
}

pub struct ViewerOrchestrator {
    source: Arc<dyn ResumeSource>,
    locations: Arc<dyn LocationStreamProvider>,
    load_state: watch::Sender<LoadState>,
    location: watch::Sender<LocationState>,
    font_size: watch::Sender<f32>,
    font_color: watch::Sender<Rgba>,
    background_color: watch::Sender<Rgba>,
    fetch_epoch: Arc<AtomicU64>,
    fetch_task: Mutex<Option<JoinHandle<()>>>,
    location_task: Mutex<Option<JoinHandle<()>>>,
}

impl ViewerOrchestrator {
    /// Builds the orchestrator and immediately starts fetching the document
    /// named in `config`. Must be called from within a Tokio runtime.
    pub fn new(
        source: Arc<dyn ResumeSource>,
        locations: Arc<dyn LocationStreamProvider>,
        config: ViewerConfig,
    ) -> Arc<Self> {
        let (load_state, _) = watch::channel(LoadState::Loading);
        let (location, _) = watch::channel(LocationState::Unknown);
        let (font_size, _) = watch::channel(config.font_size);
        let (font_color, _) = watch::channel(config.font_color);
        let (background_color, _) = watch::channel(config.background_color);

        let orchestrator = Arc::new(Self {
            source,
            locations,
            load_state,
            location,
            font_size,
            font_color,
            background_color,
            fetch_epoch: Arc::new(AtomicU64::new(0)),
            fetch_task: Mutex::new(None),
            location_task: Mutex::new(None),
        });

        orchestrator.fetch_document(&config.document_name);
        orchestrator
    }

    /// Starts a fetch for `name`, superseding any fetch still in flight.
    ///
    /// `Loading` is published synchronously before the request is issued.
    /// The superseded request keeps running; the epoch guard discards its
    /// eventual result instead of racing the newer one.
    pub fn fetch_document(&self, name: &str) {
        let epoch = self.fetch_epoch.fetch_add(1, Ordering::SeqCst) + 1;
        self.load_state.send_replace(LoadState::Loading);
        info!(name, epoch, "fetching resume document");

        let source = Arc::clone(&self.source);
        let load_state = self.load_state.clone();
        let current_epoch = Arc::clone(&self.fetch_epoch);
        let name = name.to_string();
        let task = tokio::spawn(async move {
            let outcome = match source.fetch_resume(&name).await {
                Ok(response) => match response.resume.filter(|_| response.success) {
                    Some(resume) => LoadState::Loaded(resume),
                    None => LoadState::Failed("Failed to fetch data".to_string()),
                },
                Err(err) => LoadState::Failed(format!("Error: {err}")),
            };

            // The epoch check must happen inside the channel's critical
            // section so it serializes against a newer invocation's epoch
            // bump and `Loading` publish (and against `shutdown`'s bump).
            let published = load_state.send_if_modified(|state| {
                if current_epoch.load(Ordering::SeqCst) == epoch {
                    *state = outcome;
                    true
                } else {
                    false
                }
            });
            if !published {
                debug!(epoch, "discarding superseded fetch result");
            }
        });

        let mut guard = self
            .fetch_task
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        *guard = Some(task);
    }

    /// Opens the location subscription. Callers confirm device-location
    /// authorization first; the orchestrator subscribes unconditionally.
    ///
    /// A duplicate call while the subscription task is still alive is a
    /// logged no-op, so at most one subscription exists per orchestrator.
    pub fn start_location_updates(&self) {
        let mut guard = self
            .location_task
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if guard.as_ref().is_some_and(|task| !task.is_finished()) {
            warn!("location updates already active; ignoring duplicate start");
            return;
        }

        let provider = Arc::clone(&self.locations);
        let location = self.location.clone();
        let task = tokio::spawn(async move {
            let mut stream = match provider.subscribe().await {
                Ok(stream) => stream,
                Err(err) => {
                    warn!(error = %err, "location subscription failed");
                    location.send_replace(LocationState::Failed(err.to_string()));
                    return;
                }
            };

            while let Some(item) = stream.next().await {
                match item {
                    Ok(sample) => {
                        location.send_replace(LocationState::Sample(sample));
                    }
                    Err(err) => {
                        warn!(error = %err, "location stream failed");
                        location.send_replace(LocationState::Failed(err.to_string()));
                        return;
                    }
                }
            }
            debug!("location stream ended");
        });
        *guard = Some(task);
    }

    pub fn set_font_size(&self, size: f32) {
        self.font_size.send_replace(size);
    }

    pub fn set_font_color(&self, color: Rgba) {
        self.font_color.send_replace(color);
    }

    pub fn set_background_color(&self, color: Rgba) {
        self.background_color.send_replace(color);
    }

    pub fn subscribe_load_state(&self) -> watch::Receiver<LoadState> {
        self.load_state.subscribe()
    }

    pub fn subscribe_location(&self) -> watch::Receiver<LocationState> {
        self.location.subscribe()
    }

    pub fn subscribe_font_size(&self) -> watch::Receiver<f32> {
        self.font_size.subscribe()
    }

    pub fn subscribe_font_color(&self) -> watch::Receiver<Rgba> {
        self.font_color.subscribe()
    }

    pub fn subscribe_background_color(&self) -> watch::Receiver<Rgba> {
        self.background_color.subscribe()
    }

    pub fn current_load_state(&self) -> LoadState {
        self.load_state.borrow().clone()
    }

    pub fn current_location(&self) -> LocationState {
        self.location.borrow().clone()
    }

    /// Tears down the session: invalidates any in-flight fetch so a
    /// completion that slips past the abort cannot publish, then aborts the
    /// fetch and location tasks.
    pub fn shutdown(&self) {
        self.fetch_epoch.fetch_add(1, Ordering::SeqCst);
        if let Some(task) = self
            .fetch_task
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            task.abort();
        }
        if let Some(task) = self
            .location_task
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            task.abort();
        }
        info!("viewer orchestrator shut down");
    }
}

impl Drop for ViewerOrchestrator {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
