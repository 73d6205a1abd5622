//! # Scan Session State Machine
//!
//! Pure transition table for one camera session. The controller in
//! `warehouse-scan` drives it and performs the device I/O; this module only
//! decides what is allowed.
//!
//! ## States
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Scan Session Lifecycle                             │
//! │                                                                         │
//! │  ┌──────┐ begin_init ┌──────────────┐ init_succeeded ┌──────────┐       │
//! │  │ Idle │──────────► │ Initializing │ ─────────────► │ Scanning │◄─┐    │
//! │  └──────┘            └──────┬───────┘                └────┬─────┘  │    │
//! │                             │ init_failed                 │ offer  │    │
//! │                             ▼                     valid   │ invalid│    │
//! │                       ┌──────────┐              ┌─────────▼┐───────┘    │
//! │                       │ Stopped  │◄─── stop ────│ Detected │            │
//! │                       └──────────┘  (any state) └──────────┘            │
//! │                                                                         │
//! │  Detected is terminal for candidates: the first valid code wins and     │
//! │  every later offer is ignored.                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::types::{BarcodeFormat, DetectedCode, FacingMode};
use crate::validation::validate_barcode;

/// Phase of a scan session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ScanPhase {
    Idle,
    Initializing,
    Scanning,
    Detected,
    Stopped,
}

impl std::fmt::Display for ScanPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScanPhase::Idle => write!(f, "idle"),
            ScanPhase::Initializing => write!(f, "initializing"),
            ScanPhase::Scanning => write!(f, "scanning"),
            ScanPhase::Detected => write!(f, "detected"),
            ScanPhase::Stopped => write!(f, "stopped"),
        }
    }
}

/// What the session did with a decode candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CandidateOutcome {
    /// First valid code of the session; the session is now Detected.
    Accepted(DetectedCode),
    /// Candidate failed the barcode validator.
    Invalid,
    /// Session is not scanning (already detected, stopped, or starting).
    Ignored,
}

/// Result of a stop request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StopOutcome {
    /// The device was acquired and must now be released.
    pub release_device: bool,
    /// Phase the session was in before stopping.
    pub previous: ScanPhase,
}

/// One lifecycle of camera acquisition through release.
#[derive(Debug, Clone)]
pub struct ScanSession {
    id: Uuid,
    phase: ScanPhase,
    facing: FacingMode,
    running: bool,
    initialized: bool,
    captured: Option<DetectedCode>,
}

impl ScanSession {
    /// Creates an idle session for the given camera.
    pub fn new(facing: FacingMode) -> Self {
        ScanSession {
            id: Uuid::new_v4(),
            phase: ScanPhase::Idle,
            facing,
            running: false,
            initialized: false,
            captured: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn phase(&self) -> ScanPhase {
        self.phase
    }

    pub fn facing(&self) -> FacingMode {
        self.facing
    }

    /// True while candidates are being accepted.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// True once the recognizer reported a successful init and until stop.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// The code that ended the session, if any.
    pub fn captured(&self) -> Option<&DetectedCode> {
        self.captured.as_ref()
    }

    /// True while the session may hold the device.
    pub fn is_active(&self) -> bool {
        matches!(
            self.phase,
            ScanPhase::Initializing | ScanPhase::Scanning | ScanPhase::Detected
        )
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// Idle → Initializing.
    pub fn begin_init(&mut self) -> CoreResult<()> {
        self.expect_phase(ScanPhase::Idle, "begin_init")?;
        self.phase = ScanPhase::Initializing;
        self.running = true;
        Ok(())
    }

    /// Initializing → Scanning.
    ///
    /// Fails if the session was stopped while the recognizer was starting;
    /// the caller must then release the device it just acquired.
    pub fn init_succeeded(&mut self) -> CoreResult<()> {
        self.expect_phase(ScanPhase::Initializing, "init_succeeded")?;
        self.phase = ScanPhase::Scanning;
        self.initialized = true;
        Ok(())
    }

    /// Initializing → Stopped.
    pub fn init_failed(&mut self) -> CoreResult<()> {
        self.expect_phase(ScanPhase::Initializing, "init_failed")?;
        self.phase = ScanPhase::Stopped;
        self.running = false;
        self.initialized = false;
        Ok(())
    }

    /// Offers a decode candidate.
    ///
    /// Only the first valid candidate while Scanning is accepted; everything
    /// after it is ignored, so overlapping callbacks cannot replace the
    /// captured code.
    pub fn offer(&mut self, code: Option<&str>, format: BarcodeFormat) -> CandidateOutcome {
        if self.phase != ScanPhase::Scanning || !self.running {
            return CandidateOutcome::Ignored;
        }

        let Some(raw) = code else {
            return CandidateOutcome::Invalid;
        };

        match validate_barcode(raw) {
            Ok(code) => {
                let detected = DetectedCode::new(code, format);
                self.phase = ScanPhase::Detected;
                self.running = false;
                self.captured = Some(detected.clone());
                CandidateOutcome::Accepted(detected)
            }
            Err(_) => CandidateOutcome::Invalid,
        }
    }

    /// Any → Stopped. Idempotent.
    pub fn stop(&mut self) -> StopOutcome {
        let outcome = StopOutcome {
            release_device: self.initialized,
            previous: self.phase,
        };
        self.phase = ScanPhase::Stopped;
        self.running = false;
        self.initialized = false;
        outcome
    }

    /// Flips the requested camera and returns the new facing.
    ///
    /// Only the facing changes; the caller restarts the device.
    pub fn toggle_facing(&mut self) -> FacingMode {
        self.facing = self.facing.toggled();
        self.facing
    }

    fn expect_phase(&self, expected: ScanPhase, event: &'static str) -> CoreResult<()> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(CoreError::InvalidTransition {
                from: self.phase,
                event,
            })
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
