//! # Scanner Session Controller
//!
//! Owns the recognizer and the current [`ScanSession`]. Every device call
//! goes through here, so at most one session holds the camera.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        ScannerController                                │
//! │                                                                         │
//! │  start()                                                                │
//! │    ├─ active session? ──► stop() first (callbacks off, device released) │
//! │    ├─ new ScanSession + new event channel                               │
//! │    ├─ recognizer.init(config) ── Err ──► Stopped, CameraUnavailable     │
//! │    └─ on_detected / on_processed ──► recognizer.start()                 │
//! │                                                                         │
//! │  next_confirmed()                                                       │
//! │    ├─ Processed ──► draw overlay                                        │
//! │    ├─ Detected  ──► session.offer() ── Accepted ──► return code         │
//! │    └─ stale session id ──► dropped                                      │
//! │                                                                         │
//! │  finish_detection()  redraw frames for 800ms ──► stop()                 │
//! │  switch_camera()     toggle facing ──► stop() ──► sleep 500ms ──► start │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{ScanError, ScanResult};
use crate::overlay::draw_frame_feedback;
use crate::recognizer::{EventSink, Recognizer, RecognizerConfig, RecognizerEvent};
use warehouse_core::{
    BarcodeFormat, CandidateOutcome, DetectedCode, FacingMode, ScanPhase, ScanSession,
};

/// How long a detected code stays on screen before the scanner closes.
pub const DETECTION_DISPLAY_DELAY: Duration = Duration::from_millis(800);

/// Pause between releasing one camera and opening the other.
pub const CAMERA_SWITCH_DELAY: Duration = Duration::from_millis(500);

pub struct ScannerController {
    recognizer: Box<dyn Recognizer>,
    facing: FacingMode,
    session: Option<ScanSession>,
    events: Option<mpsc::UnboundedReceiver<RecognizerEvent>>,
}

impl ScannerController {
    /// Creates a controller using the rear camera.
    pub fn new(recognizer: Box<dyn Recognizer>) -> Self {
        Self::with_facing(recognizer, FacingMode::default())
    }

    pub fn with_facing(recognizer: Box<dyn Recognizer>, facing: FacingMode) -> Self {
        ScannerController {
            recognizer,
            facing,
            session: None,
            events: None,
        }
    }

    pub fn facing(&self) -> FacingMode {
        self.facing
    }

    /// Phase of the current session, `Idle` before the first start.
    pub fn phase(&self) -> ScanPhase {
        self.session
            .as_ref()
            .map(ScanSession::phase)
            .unwrap_or(ScanPhase::Idle)
    }

    pub fn session_id(&self) -> Option<Uuid> {
        self.session.as_ref().map(ScanSession::id)
    }

    pub fn is_active(&self) -> bool {
        self.session.as_ref().is_some_and(ScanSession::is_active)
    }

    /// Code that ended the current session, kept after stop.
    pub fn captured(&self) -> Option<&DetectedCode> {
        self.session.as_ref().and_then(ScanSession::captured)
    }

    /// Opens the camera and starts decoding.
    ///
    /// Any active session is stopped first. On failure the new session ends
    /// in `Stopped` and the error is returned for the caller to offer
    /// manual entry.
    pub async fn start(&mut self) -> ScanResult<()> {
        if self.is_active() {
            debug!("Scanner already active, stopping previous session");
            self.stop();
        }

        let mut session = ScanSession::new(self.facing);
        session.begin_init()?;
        let session_id = session.id();

        let (tx, rx) = mpsc::unbounded_channel();
        let sink = EventSink::new(session_id, tx);
        self.session = Some(session);
        self.events = Some(rx);

        info!(session = %session_id, facing = %self.facing, "Starting scanner");
        let config = RecognizerConfig::for_facing(self.facing);

        if let Err(e) = self.recognizer.init(&config).await {
            warn!(session = %session_id, error = %e, "Scanner initialization failed");
            self.events = None;
            if let Some(session) = self.session.as_mut() {
                session.init_failed()?;
            }
            return Err(e.into());
        }

        if let Some(session) = self.session.as_mut() {
            session.init_succeeded()?;
        }

        self.recognizer.on_detected(sink.clone());
        self.recognizer.on_processed(sink);

        if let Err(e) = self.recognizer.start() {
            warn!(session = %session_id, error = %e, "Scanner failed to start");
            self.stop();
            return Err(e.into());
        }

        debug!(session = %session_id, "Scanner running");
        Ok(())
    }

    /// Waits for the first valid code of the current session.
    ///
    /// Draws overlay feedback for every processed frame while waiting.
    /// Invalid candidates are dropped without changing state.
    pub async fn next_confirmed(&mut self) -> ScanResult<DetectedCode> {
        loop {
            let event = match self.events.as_mut() {
                Some(events) => events.recv().await,
                None => None,
            };
            let Some(event) = event else {
                return Err(ScanError::SessionClosed);
            };

            if let Some(detected) = self.handle_event(event)? {
                return Ok(detected);
            }
        }
    }

    /// Leaves the detected code on screen briefly, then closes the scanner.
    ///
    /// Both callbacks stay attached during the delay: frames keep redrawing
    /// the overlay and further candidates hit the guard.
    pub async fn finish_detection(&mut self) {
        let delay = tokio::time::sleep(DETECTION_DISPLAY_DELAY);
        tokio::pin!(delay);

        loop {
            let Some(events) = self.events.as_mut() else {
                break;
            };
            let event = tokio::select! {
                _ = &mut delay => break,
                event = events.recv() => event,
            };
            let Some(event) = event else {
                break;
            };
            if let Err(e) = self.handle_event(event) {
                debug!(error = %e, "Ignoring event during display delay");
            }
        }

        if !delay.is_elapsed() {
            delay.await;
        }
        self.stop();
    }

    /// Applies one recognizer event to the current session.
    ///
    /// Returns the code when this event is the one that passed the guard.
    fn handle_event(&mut self, event: RecognizerEvent) -> ScanResult<Option<DetectedCode>> {
        let Some(session) = self.session.as_mut() else {
            return Err(ScanError::SessionClosed);
        };
        if event.session() != session.id() {
            debug!(stale = %event.session(), "Dropping event from previous session");
            return Ok(None);
        }

        match event {
            RecognizerEvent::Processed { frame, .. } => {
                if let Some(surface) = self.recognizer.overlay() {
                    draw_frame_feedback(surface, &frame);
                }
            }
            RecognizerEvent::Detected { code, format, .. } => {
                let format = format
                    .as_deref()
                    .map(BarcodeFormat::from_tag)
                    .unwrap_or(BarcodeFormat::Unknown);

                match session.offer(code.as_deref(), format) {
                    CandidateOutcome::Accepted(detected) => {
                        info!(
                            session = %session.id(),
                            code = %detected.code,
                            format = %detected.format,
                            "Barcode detected"
                        );
                        return Ok(Some(detected));
                    }
                    CandidateOutcome::Invalid => {
                        debug!(code = ?code, "Ignoring invalid candidate");
                    }
                    CandidateOutcome::Ignored => {}
                }
            }
        }
        Ok(None)
    }

    /// Stops the current session. Safe to call at any time, repeatedly.
    ///
    /// Callbacks are detached before the device is stopped, and teardown
    /// errors are logged and dropped.
    pub fn stop(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if session.phase() == ScanPhase::Stopped {
            return;
        }

        self.recognizer.off_detected();
        self.recognizer.off_processed();
        self.events = None;

        let outcome = session.stop();
        if outcome.release_device {
            if let Err(e) = self.recognizer.stop() {
                debug!(error = %e, "Ignoring scanner teardown error");
            }
        }

        info!(session = %session.id(), previous = %outcome.previous, "Scanner stopped");
    }

    /// Switches between front and rear camera and restarts the scanner.
    pub async fn switch_camera(&mut self) -> ScanResult<FacingMode> {
        self.facing = match self.session.as_mut() {
            Some(session) => session.toggle_facing(),
            None => self.facing.toggled(),
        };
        info!(facing = %self.facing, "Switching camera");

        self.stop();
        tokio::time::sleep(CAMERA_SWITCH_DELAY).await;
        self.start().await?;
        Ok(self.facing)
    }
}

impl Drop for ScannerController {
    fn drop(&mut self) {
        self.stop();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
