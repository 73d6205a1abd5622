//! # Terminal Host Pieces
//!
//! A USB keyboard-wedge scanner types the barcode followed by Enter, so in a
//! terminal a "scan" is just a line on stdin. The same line source feeds the
//! confirmation prompts once the scanner is closed.
//!
//! ```text
//!   stdin ──► Lines ──┬──► KeyboardWedge (while scanning) ──► EventSink
//!                     └──► prompts      (scanner closed)
//!
//!   Ctrl-C ──► Interrupt (one handler for the whole command)
//! ```

use async_trait::async_trait;
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{mpsc, watch, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use warehouse_core::validation::is_valid_barcode;
use warehouse_core::{BoxId, ItemForm, PendingItem};
use warehouse_scan::{
    DrawingSurface, EventSink, Recognizer, RecognizerConfig, RecognizerError, ScanView,
    ScannerStatus,
};

// =============================================================================
// Line Source
// =============================================================================

/// Lines typed on stdin. Cloning shares the same source; each line is
/// delivered once.
#[derive(Clone)]
pub struct Lines {
    rx: Arc<Mutex<mpsc::UnboundedReceiver<String>>>,
}

impl Lines {
    /// Starts reading stdin in the background.
    pub fn stdin() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(async move {
            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            loop {
                match lines.next_line().await {
                    Ok(Some(line)) => {
                        if tx.send(line).is_err() {
                            break;
                        }
                    }
                    Ok(None) => break,
                    Err(e) => {
                        warn!(error = %e, "Failed to read stdin");
                        break;
                    }
                }
            }
            debug!("stdin closed");
        });
        Self::from_receiver(rx)
    }

    pub fn from_receiver(rx: mpsc::UnboundedReceiver<String>) -> Self {
        Lines {
            rx: Arc::new(Mutex::new(rx)),
        }
    }

    /// Next line, or `None` at end of input.
    pub async fn next(&self) -> Option<String> {
        self.rx.lock().await.recv().await
    }

    /// Next line, unless input ends or Ctrl-C comes first.
    pub async fn read(&self, interrupt: &Interrupt) -> Input {
        tokio::select! {
            biased;
            _ = interrupt.wait() => Input::Interrupted,
            line = self.next() => match line {
                Some(line) => Input::Line(line),
                None => Input::Closed,
            },
        }
    }
}

/// Result of reading one prompt answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Line(String),
    /// End of input.
    Closed,
    Interrupted,
}

// =============================================================================
// Interrupt
// =============================================================================

/// Ctrl-C, latched once pressed.
///
/// Installed once per command and shared by the scanner wait and every
/// prompt, so an interrupt is seen whichever of them is waiting.
#[derive(Clone)]
pub struct Interrupt {
    rx: watch::Receiver<bool>,
}

impl Interrupt {
    /// Starts listening for Ctrl-C.
    pub fn ctrl_c() -> Self {
        let (tx, rx) = watch::channel(false);
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    debug!("Ctrl-C received");
                    let _ = tx.send(true);
                }
                Err(e) => warn!(error = %e, "Failed to listen for Ctrl-C"),
            }
        });
        Self::from_receiver(rx)
    }

    pub fn from_receiver(rx: watch::Receiver<bool>) -> Self {
        Interrupt { rx }
    }

    pub fn is_set(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolves once Ctrl-C has been pressed. Never resolves if the
    /// listener could not be installed.
    pub async fn wait(&self) {
        let mut rx = self.rx.clone();
        if rx.wait_for(|set| *set).await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}

/// Prints a prompt without a trailing newline.
pub fn prompt(text: &str) -> std::io::Result<()> {
    let mut out = std::io::stdout();
    write!(out, "{}", text)?;
    out.flush()
}

// =============================================================================
// Keyboard Wedge Recognizer
// =============================================================================

/// Recognizer backed by a keyboard-wedge scanner.
///
/// Every line read while running is reported as a candidate; the controller
/// validates it like any camera decode. Reading stops after the first valid
/// line, so anything typed while the code is on screen is left for the
/// prompts. There is no overlay.
pub struct KeyboardWedge {
    lines: Lines,
    sink: Option<EventSink>,
    reader: Option<JoinHandle<()>>,
}

impl KeyboardWedge {
    pub fn new(lines: Lines) -> Self {
        KeyboardWedge {
            lines,
            sink: None,
            reader: None,
        }
    }

    fn abort_reader(&mut self) {
        if let Some(reader) = self.reader.take() {
            reader.abort();
        }
    }
}

#[async_trait]
impl Recognizer for KeyboardWedge {
    async fn init(&mut self, config: &RecognizerConfig) -> Result<(), RecognizerError> {
        debug!(readers = ?config.readers, "Keyboard wedge ready");
        Ok(())
    }

    fn start(&mut self) -> Result<(), RecognizerError> {
        let sink = self
            .sink
            .take()
            .ok_or_else(|| RecognizerError::Device("no detection callback registered".into()))?;
        let lines = self.lines.clone();

        self.abort_reader();
        self.reader = Some(tokio::spawn(async move {
            while let Some(line) = lines.next().await {
                let accepted = is_valid_barcode(&line);
                if !sink.detected(Some(line), Some("keyboard".to_string())) || accepted {
                    break;
                }
            }
        }));
        Ok(())
    }

    fn stop(&mut self) -> Result<(), RecognizerError> {
        self.abort_reader();
        Ok(())
    }

    fn on_detected(&mut self, sink: EventSink) {
        self.sink = Some(sink);
    }

    fn off_detected(&mut self) {
        self.sink = None;
        self.abort_reader();
    }

    // No frames to report.
    fn on_processed(&mut self, _sink: EventSink) {}

    fn off_processed(&mut self) {}

    fn overlay(&mut self) -> Option<&mut dyn DrawingSurface> {
        None
    }
}

// =============================================================================
// Terminal View
// =============================================================================

/// Prints workflow updates. Alerts go to stderr.
pub struct TerminalView;

impl ScanView for TerminalView {
    fn scanner_status(&self, status: &ScannerStatus) {
        println!("» {}", status);
    }

    fn show_pending(&self, pending: &PendingItem) {
        let origin = if pending.known_product {
            "existing product"
        } else {
            "new product"
        };
        println!("  Product:  {} ({})", pending.product_name, origin);
        println!("  Barcode:  {}", pending.barcode);
        println!("  Quantity: {}", pending.quantity);
    }

    fn hide_pending(&self) {}

    fn show_item_form(&self, form: &ItemForm) {
        println!("  New item with barcode {}", form.barcode);
    }

    fn show_manual_entry(&self) {
        println!("Type the barcode and press Enter.");
    }

    fn show_message(&self, message: &str) {
        println!("  {}", message);
    }

    fn show_alert(&self, message: &str) {
        eprintln!("! {}", message);
    }

    fn refresh_box(&self, box_id: BoxId) {
        println!("  Saved to box {}.", box_id);
    }
}

// =============================================================================
// Prompt Parsing
// =============================================================================

/// Answer to the confirmation prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmAnswer {
    /// Enter or `y`: keep the shown quantity.
    Accept,
    /// A number: use it as the quantity.
    Quantity(i64),
    Cancel,
    Invalid,
}

pub fn parse_confirm_answer(input: &str) -> ConfirmAnswer {
    let answer = input.trim();
    if answer.is_empty() || answer.eq_ignore_ascii_case("y") {
        return ConfirmAnswer::Accept;
    }
    if ["n", "c", "cancel"]
        .iter()
        .any(|word| answer.eq_ignore_ascii_case(word))
    {
        return ConfirmAnswer::Cancel;
    }
    match answer.parse::<i64>() {
        Ok(quantity) => ConfirmAnswer::Quantity(quantity),
        Err(_) => ConfirmAnswer::Invalid,
    }
}
