//! # Recognizer Port
//!
//! The barcode recognition library owns the camera, image processing and
//! decoding. This module describes what the controller needs from it.
//!
//! ## Callback Delivery
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Recognizer → Controller                             │
//! │                                                                         │
//! │   library frame loop                                                    │
//! │        │                                                                │
//! │        ├── on_detected(sink)  ──► RecognizerEvent::Detected  ──┐        │
//! │        └── on_processed(sink) ──► RecognizerEvent::Processed ──┤        │
//! │                                                                ▼        │
//! │                               mpsc channel (one per session)            │
//! │                                                                │        │
//! │                                   ScannerController::next_confirmed     │
//! │                                                                         │
//! │   Every event carries the session id it was registered for. A new      │
//! │   channel is created on each start, so a sink kept by a torn-down      │
//! │   session can no longer reach the controller.                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::error::RecognizerError;
use warehouse_core::FacingMode;

// =============================================================================
// Configuration
// =============================================================================

/// Decoders enabled, in the order the library tries them.
pub const READERS: [&str; 6] = ["code_128", "ean", "ean_8", "code_39", "upc", "upc_e"];

/// Background decode workers.
pub const NUM_WORKERS: usize = 2;

/// Decode attempts per second.
pub const SCAN_FREQUENCY: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

/// Camera request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VideoConstraints {
    pub min: Resolution,
    pub ideal: Resolution,
    pub facing: FacingMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PatchSize {
    XSmall,
    Small,
    Medium,
    Large,
    XLarge,
}

/// Barcode locator tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LocatorSettings {
    pub patch_size: PatchSize,
    pub half_sample: bool,
}

/// Everything passed to [`Recognizer::init`]. Not user-configurable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecognizerConfig {
    pub readers: Vec<&'static str>,
    pub constraints: VideoConstraints,
    pub locator: LocatorSettings,
    pub locate: bool,
    pub num_workers: usize,
    pub frequency: u32,
}

impl RecognizerConfig {
    pub fn for_facing(facing: FacingMode) -> Self {
        RecognizerConfig {
            readers: READERS.to_vec(),
            constraints: VideoConstraints {
                min: Resolution {
                    width: 640,
                    height: 480,
                },
                ideal: Resolution {
                    width: 1280,
                    height: 720,
                },
                facing,
            },
            locator: LocatorSettings {
                patch_size: PatchSize::Medium,
                half_sample: true,
            },
            locate: true,
            num_workers: NUM_WORKERS,
            frequency: SCAN_FREQUENCY,
        }
    }
}

// =============================================================================
// Events
// =============================================================================

/// Axis-aligned region in overlay pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

/// Per-frame processing result.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameResult {
    /// Region the locator is tracking, if any.
    pub bounding_box: Option<Rect>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RecognizerEvent {
    /// A decode candidate. Either field may be missing.
    Detected {
        session: Uuid,
        code: Option<String>,
        format: Option<String>,
    },
    /// A frame was processed (fires whether or not anything decoded).
    Processed { session: Uuid, frame: FrameResult },
}

impl RecognizerEvent {
    pub fn session(&self) -> Uuid {
        match self {
            RecognizerEvent::Detected { session, .. } | RecognizerEvent::Processed { session, .. } => {
                *session
            }
        }
    }
}

/// Callback handle given to the recognizer for one session.
#[derive(Debug, Clone)]
pub struct EventSink {
    session: Uuid,
    tx: mpsc::UnboundedSender<RecognizerEvent>,
}

impl EventSink {
    pub(crate) fn new(session: Uuid, tx: mpsc::UnboundedSender<RecognizerEvent>) -> Self {
        EventSink { session, tx }
    }

    pub fn session(&self) -> Uuid {
        self.session
    }

    /// Reports a decode candidate. Returns false once the session is gone.
    pub fn detected(&self, code: Option<String>, format: Option<String>) -> bool {
        self.send(RecognizerEvent::Detected {
            session: self.session,
            code,
            format,
        })
    }

    /// Reports a processed frame. Returns false once the session is gone.
    pub fn processed(&self, frame: FrameResult) -> bool {
        self.send(RecognizerEvent::Processed {
            session: self.session,
            frame,
        })
    }

    pub(crate) fn send(&self, event: RecognizerEvent) -> bool {
        self.tx.send(event).is_ok()
    }
}

// =============================================================================
// Traits
// =============================================================================

/// Stroke style for overlay drawing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: &'static str,
    pub width: f64,
}

/// 2D overlay drawn on top of the camera preview.
pub trait DrawingSurface: Send {
    fn width(&self) -> f64;
    fn height(&self) -> f64;
    fn clear(&mut self);
    fn stroke_rect(&mut self, rect: Rect, stroke: Stroke);
    fn stroke_line(&mut self, from: Point, to: Point, stroke: Stroke);
    fn stroke_circle(&mut self, center: Point, radius: f64, stroke: Stroke);
}

/// External barcode recognition library.
///
/// `init` acquires the camera. `stop` releases it and may fail if the
/// library was never fully started; callers swallow that.
#[async_trait]
pub trait Recognizer: Send {
    async fn init(&mut self, config: &RecognizerConfig) -> Result<(), RecognizerError>;
    fn start(&mut self) -> Result<(), RecognizerError>;
    fn stop(&mut self) -> Result<(), RecognizerError>;

    fn on_detected(&mut self, sink: EventSink);
    fn off_detected(&mut self);
    fn on_processed(&mut self, sink: EventSink);
    fn off_processed(&mut self);

    /// Overlay canvas, when the host renders one.
    fn overlay(&mut self) -> Option<&mut dyn DrawingSurface>;
}

// =============================================================================
// Test Fakes
// =============================================================================

#[cfg(test)]
pub(crate) mod fake {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Records draw calls as strings.
    #[derive(Debug, Clone, Default)]
    pub struct RecordingSurface {
        pub ops: Arc<Mutex<Vec<String>>>,
    }

    impl RecordingSurface {
        pub fn ops(&self) -> Vec<String> {
            self.ops.lock().unwrap().clone()
        }
    }

    impl DrawingSurface for RecordingSurface {
        fn width(&self) -> f64 {
            640.0
        }

        fn height(&self) -> f64 {
            480.0
        }

        fn clear(&mut self) {
            self.ops.lock().unwrap().push("clear".into());
        }

        fn stroke_rect(&mut self, rect: Rect, stroke: Stroke) {
            self.ops.lock().unwrap().push(format!(
                "rect {},{} {}x{} {} {}",
                rect.x, rect.y, rect.width, rect.height, stroke.color, stroke.width
            ));
        }

        fn stroke_line(&mut self, from: Point, to: Point, stroke: Stroke) {
            self.ops.lock().unwrap().push(format!(
                "line {},{}-{},{} {} {}",
                from.x, from.y, to.x, to.y, stroke.color, stroke.width
            ));
        }

        fn stroke_circle(&mut self, center: Point, radius: f64, stroke: Stroke) {
            self.ops.lock().unwrap().push(format!(
                "circle {},{} r{} {} {}",
                center.x, center.y, radius, stroke.color, stroke.width
            ));
        }
    }

    #[derive(Debug, Default)]
    pub struct FakeState {
        pub log: Vec<String>,
        pub configs: Vec<RecognizerConfig>,
        pub detected: Option<EventSink>,
        pub processed: Option<EventSink>,
        pub fail_init: bool,
        pub fail_stop: bool,
    }

    /// Scripted recognizer. Tests keep a [`FakeHandle`] to push events and
    /// inspect the call log.
    pub struct FakeRecognizer {
        state: Arc<Mutex<FakeState>>,
        surface: RecordingSurface,
    }

    #[derive(Clone)]
    pub struct FakeHandle {
        pub state: Arc<Mutex<FakeState>>,
        pub surface: RecordingSurface,
    }

    pub fn fake_recognizer() -> (FakeRecognizer, FakeHandle) {
        let state = Arc::new(Mutex::new(FakeState::default()));
        let surface = RecordingSurface::default();
        (
            FakeRecognizer {
                state: state.clone(),
                surface: surface.clone(),
            },
            FakeHandle { state, surface },
        )
    }

    impl FakeHandle {
        pub fn log(&self) -> Vec<String> {
            self.state.lock().unwrap().log.clone()
        }

        pub fn clear_log(&self) {
            self.state.lock().unwrap().log.clear();
        }

        pub fn fail_init(&self, fail: bool) {
            self.state.lock().unwrap().fail_init = fail;
        }

        pub fn fail_stop(&self, fail: bool) {
            self.state.lock().unwrap().fail_stop = fail;
        }

        pub fn last_config(&self) -> Option<RecognizerConfig> {
            self.state.lock().unwrap().configs.last().cloned()
        }

        /// The currently attached detection sink.
        pub fn detected_sink(&self) -> Option<EventSink> {
            self.state.lock().unwrap().detected.clone()
        }

        /// Delivers a candidate through the attached callback, if any.
        pub fn detect(&self, code: &str, format: &str) -> bool {
            match self.detected_sink() {
                Some(sink) => sink.detected(Some(code.to_string()), Some(format.to_string())),
                None => false,
            }
        }

        pub fn detect_nothing(&self) -> bool {
            match self.detected_sink() {
                Some(sink) => sink.detected(None, None),
                None => false,
            }
        }

        pub fn process(&self, frame: FrameResult) -> bool {
            let sink = self.state.lock().unwrap().processed.clone();
            match sink {
                Some(sink) => sink.processed(frame),
                None => false,
            }
        }
    }

    #[async_trait]
    impl Recognizer for FakeRecognizer {
        async fn init(&mut self, config: &RecognizerConfig) -> Result<(), RecognizerError> {
            let mut state = self.state.lock().unwrap();
            state.log.push(format!("init {}", config.constraints.facing));
            state.configs.push(config.clone());
            if state.fail_init {
                return Err(RecognizerError::CameraUnavailable("NotFoundError".into()));
            }
            Ok(())
        }

        fn start(&mut self) -> Result<(), RecognizerError> {
            self.state.lock().unwrap().log.push("start".into());
            Ok(())
        }

        fn stop(&mut self) -> Result<(), RecognizerError> {
            let mut state = self.state.lock().unwrap();
            state.log.push("stop".into());
            if state.fail_stop {
                return Err(RecognizerError::Teardown("stream already ended".into()));
            }
            Ok(())
        }

        fn on_detected(&mut self, sink: EventSink) {
            let mut state = self.state.lock().unwrap();
            state.log.push("on_detected".into());
            state.detected = Some(sink);
        }

        fn off_detected(&mut self) {
            let mut state = self.state.lock().unwrap();
            state.log.push("off_detected".into());
            state.detected = None;
        }

        fn on_processed(&mut self, sink: EventSink) {
            let mut state = self.state.lock().unwrap();
            state.log.push("on_processed".into());
            state.processed = Some(sink);
        }

        fn off_processed(&mut self) {
            let mut state = self.state.lock().unwrap();
            state.log.push("off_processed".into());
            state.processed = None;
        }

        fn overlay(&mut self) -> Option<&mut dyn DrawingSurface> {
            Some(&mut self.surface)
        }
    }
}
