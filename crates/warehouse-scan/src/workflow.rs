//! # Scan Workflow
//!
//! Sequences a scan from camera to item line.
//!
//! ## Modes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                            ScanWorkflow                                 │
//! │                                                                         │
//! │  open_scanner(mode) ──► controller.start()                              │
//! │        │                   └─ camera error ──► show_manual_entry        │
//! │        ▼                                                                │
//! │  await_scan() ──► next_confirmed ──► Detected (800ms) ──► stop          │
//! │                                                        │                │
//! │  submit_manual(text) ──► validate ─────────────────────┤                │
//! │                                                        ▼                │
//! │          ┌──────────────── mode ───────────────────────┐                │
//! │          ▼                                             ▼                │
//! │   Standalone                                      FillField             │
//! │   lookup(box, code)                               ItemForm with barcode │
//! │   PendingItem ──► show_pending                    show_item_form        │
//! │        │                                                                │
//! │        ├─ confirm_pending ──► create item ──► refresh_box               │
//! │        │                         └─ error ──► alert, form stays open    │
//! │        └─ cancel_pending ──► hide                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Lookup failures look exactly like "not found": the placeholder name is
//! used and nothing is shown to the user.

use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

use crate::controller::ScannerController;
use crate::error::{ScanError, ScanResult};
use crate::view::{ScanView, ScannerStatus};
use warehouse_client::{ItemSubmitter, ProductLookup};
use warehouse_core::validation::{
    validate_barcode, validate_product_name, validate_quantity,
};
use warehouse_core::{
    BarcodeFormat, BoxId, DetectedCode, FacingMode, ItemDraft, ItemForm, PendingItem, ScanMode,
    ValidationError,
};

/// Pause before the scanner reopens after the item form is hidden.
pub const SCANNER_REOPEN_DELAY: Duration = Duration::from_millis(300);

pub const MSG_ENTER_BARCODE: &str = "Enter a barcode";
pub const MSG_INVALID_BARCODE: &str = "Invalid barcode format";
pub const MSG_FILL_ALL_FIELDS: &str = "Please fill in all fields";

/// What the scan is for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanContext {
    /// Box new items go into. Lookups are skipped without one.
    pub box_id: Option<BoxId>,
}

/// Where a confirmed code ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    /// Standalone mode: confirmation form opened.
    Pending(PendingItem),
    /// Fill-field mode: item form opened with the barcode filled in.
    FilledField(ItemForm),
}

pub struct ScanWorkflow {
    controller: ScannerController,
    lookup: Arc<dyn ProductLookup>,
    submitter: Arc<dyn ItemSubmitter>,
    view: Arc<dyn ScanView>,
    context: ScanContext,
    mode: ScanMode,
    pending: Option<PendingItem>,
}

impl ScanWorkflow {
    pub fn new(
        controller: ScannerController,
        lookup: Arc<dyn ProductLookup>,
        submitter: Arc<dyn ItemSubmitter>,
        view: Arc<dyn ScanView>,
    ) -> Self {
        ScanWorkflow {
            controller,
            lookup,
            submitter,
            view,
            context: ScanContext::default(),
            mode: ScanMode::default(),
            pending: None,
        }
    }

    pub fn with_context(mut self, context: ScanContext) -> Self {
        self.context = context;
        self
    }

    pub fn set_context(&mut self, context: ScanContext) {
        self.context = context;
    }

    pub fn context(&self) -> ScanContext {
        self.context
    }

    pub fn mode(&self) -> ScanMode {
        self.mode
    }

    pub fn pending(&self) -> Option<&PendingItem> {
        self.pending.as_ref()
    }

    pub fn controller(&self) -> &ScannerController {
        &self.controller
    }

    // =========================================================================
    // Scanner
    // =========================================================================

    /// Opens the scanner in `mode`.
    ///
    /// Returns `false` when the camera could not be started; manual entry
    /// has then been offered and the workflow stays usable.
    pub async fn open_scanner(&mut self, mode: ScanMode) -> ScanResult<bool> {
        self.mode = mode;
        self.view.scanner_status(&ScannerStatus::Starting);

        match self.controller.start().await {
            Ok(()) => {
                self.view.scanner_status(&ScannerStatus::Scanning);
                Ok(true)
            }
            Err(e) if e.is_camera_unavailable() => {
                warn!(error = %e, "Camera unavailable, offering manual entry");
                self.camera_unavailable(&e);
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    /// Reopens the scanner after the item form was hidden.
    pub async fn reopen_scanner(&mut self) -> ScanResult<bool> {
        tokio::time::sleep(SCANNER_REOPEN_DELAY).await;
        self.open_scanner(self.mode).await
    }

    /// Waits for a camera detection and routes it by mode.
    pub async fn await_scan(&mut self) -> ScanResult<ScanOutcome> {
        let code = self.controller.next_confirmed().await?;
        self.view
            .scanner_status(&ScannerStatus::Detected(code.code.clone()));
        self.controller.finish_detection().await;
        self.view.scanner_status(&ScannerStatus::Stopped);
        self.handle_code(code).await
    }

    /// Handles text typed into the manual fallback.
    ///
    /// Returns `None` when the input was rejected; the user has been told
    /// why and nothing else changed.
    pub async fn submit_manual(&mut self, input: &str) -> ScanResult<Option<ScanOutcome>> {
        let code = match validate_barcode(input) {
            Ok(code) => code,
            Err(ValidationError::Required { .. }) => {
                self.view.show_message(MSG_ENTER_BARCODE);
                return Ok(None);
            }
            Err(e) => {
                debug!(input, reason = %e, "Manual barcode rejected");
                self.view.show_message(MSG_INVALID_BARCODE);
                return Ok(None);
            }
        };

        if self.controller.is_active() {
            self.close_scanner();
        }
        let outcome = self
            .handle_code(DetectedCode::new(code, BarcodeFormat::Manual))
            .await?;
        Ok(Some(outcome))
    }

    /// Closes the scanning surface.
    pub fn close_scanner(&mut self) {
        self.controller.stop();
        self.view.scanner_status(&ScannerStatus::Stopped);
    }

    pub async fn switch_camera(&mut self) -> ScanResult<FacingMode> {
        match self.controller.switch_camera().await {
            Ok(facing) => {
                self.view.scanner_status(&ScannerStatus::Scanning);
                Ok(facing)
            }
            Err(e) => {
                if e.is_camera_unavailable() {
                    self.camera_unavailable(&e);
                }
                Err(e)
            }
        }
    }

    fn camera_unavailable(&self, err: &ScanError) {
        let reason = match err {
            ScanError::Recognizer(inner) => inner.to_string(),
            other => other.to_string(),
        };
        self.view
            .scanner_status(&ScannerStatus::CameraUnavailable(reason));
        self.view.show_manual_entry();
    }

    async fn handle_code(&mut self, code: DetectedCode) -> ScanResult<ScanOutcome> {
        match self.mode {
            ScanMode::Standalone => {
                let box_id = self.context.box_id;
                let existing = self.lookup.lookup(box_id, &code.code).await;
                if existing.is_none() {
                    debug!(code = %code.code, "Product not found in box, using placeholder name");
                }

                let pending = PendingItem::from_lookup(code.code, existing.as_ref(), box_id);
                self.view.show_pending(&pending);
                self.pending = Some(pending.clone());
                Ok(ScanOutcome::Pending(pending))
            }
            ScanMode::FillField => {
                let form = ItemForm::with_barcode(code.code);
                self.view.show_item_form(&form);
                Ok(ScanOutcome::FilledField(form))
            }
        }
    }

    // =========================================================================
    // Confirmation
    // =========================================================================

    /// Replaces the pending item with the user's edits.
    pub fn edit_pending(&mut self, edited: PendingItem) -> ScanResult<()> {
        let pending = self.pending.as_mut().ok_or(ScanError::NoPendingItem)?;
        *pending = edited;
        Ok(())
    }

    /// Submits the pending item.
    ///
    /// On failure the form stays open with the same values.
    pub async fn confirm_pending(&mut self) -> ScanResult<()> {
        let pending = self.pending.as_ref().ok_or(ScanError::NoPendingItem)?;

        let draft = match checked_draft(pending) {
            Ok(draft) => draft,
            Err(e) => {
                debug!(reason = %e, "Pending item incomplete");
                self.view.show_alert(MSG_FILL_ALL_FIELDS);
                return Err(e.into());
            }
        };

        match self.submitter.create_item(&draft).await {
            Ok(()) => {
                info!(box_id = %draft.box_id, quantity = draft.quantity, "Scanned item added");
                self.pending = None;
                self.view.hide_pending();
                self.view.refresh_box(draft.box_id);
                Ok(())
            }
            Err(e) => {
                error!(box_id = %draft.box_id, error = %e, "Failed to add scanned item");
                self.view.show_alert(&e.user_message());
                Err(e.into())
            }
        }
    }

    /// Drops the pending item without a request.
    pub fn cancel_pending(&mut self) {
        if self.pending.take().is_some() {
            debug!("Pending item cancelled");
        }
        self.view.hide_pending();
    }
}

/// Every field of the confirmation form is required.
fn checked_draft(pending: &PendingItem) -> Result<ItemDraft, ValidationError> {
    validate_product_name(&pending.product_name)?;
    validate_barcode(&pending.barcode)?;
    validate_quantity(pending.quantity)?;
    pending.to_draft().ok_or_else(|| ValidationError::Required {
        field: "box".to_string(),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recognizer::fake::{fake_recognizer, FakeHandle};
    use async_trait::async_trait;
    use std::sync::Mutex;
    use tokio::time::Instant;
    use warehouse_client::{ClientError, ClientResult};
    use warehouse_core::{ItemId, ProductInfo, ScanPhase};

    #[derive(Default)]
    struct RecordingView {
        events: Mutex<Vec<String>>,
    }

    impl RecordingView {
        fn push(&self, event: String) {
            self.events.lock().unwrap().push(event);
        }

        fn events(&self) -> Vec<String> {
            self.events.lock().unwrap().clone()
        }

        fn alerts(&self) -> Vec<String> {
            self.events()
                .into_iter()
                .filter(|e| e.starts_with("alert"))
                .collect()
        }
    }

    impl ScanView for RecordingView {
        fn scanner_status(&self, status: &ScannerStatus) {
            let tag = match status {
                ScannerStatus::Starting => "starting".to_string(),
                ScannerStatus::Scanning => "scanning".to_string(),
                ScannerStatus::Detected(code) => format!("detected {}", code),
                ScannerStatus::CameraUnavailable(_) => "camera unavailable".to_string(),
                ScannerStatus::Stopped => "stopped".to_string(),
            };
            self.push(format!("status {}", tag));
        }

        fn show_pending(&self, pending: &PendingItem) {
            self.push(format!("pending {} x{}", pending.product_name, pending.quantity));
        }

        fn hide_pending(&self) {
            self.push("hide pending".into());
        }

        fn show_item_form(&self, form: &ItemForm) {
            self.push(format!("item form {}", form.barcode));
        }

        fn show_manual_entry(&self) {
            self.push("manual entry".into());
        }

        fn show_message(&self, message: &str) {
            self.push(format!("message {}", message));
        }

        fn show_alert(&self, message: &str) {
            self.push(format!("alert {}", message));
        }

        fn refresh_box(&self, box_id: BoxId) {
            self.push(format!("refresh {}", box_id));
        }
    }

    /// Lookup returning a fixed answer. Records whether the device had been
    /// released when it was called.
    struct FakeLookup {
        answer: Option<ProductInfo>,
        device: Option<FakeHandle>,
        calls: Mutex<Vec<(Option<BoxId>, String, bool)>>,
    }

    impl FakeLookup {
        fn new(answer: Option<ProductInfo>, device: Option<FakeHandle>) -> Self {
            FakeLookup {
                answer,
                device,
                calls: Mutex::default(),
            }
        }

        fn calls(&self) -> Vec<(Option<BoxId>, String, bool)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ProductLookup for FakeLookup {
        async fn lookup(&self, box_id: Option<BoxId>, barcode: &str) -> Option<ProductInfo> {
            let released = self
                .device
                .as_ref()
                .is_some_and(|d| d.log().last().map(String::as_str) == Some("stop"));
            self.calls
                .lock()
                .unwrap()
                .push((box_id, barcode.to_string(), released));
            self.answer.clone()
        }
    }

    #[derive(Default)]
    struct FakeSubmitter {
        fail_status: Option<u16>,
        drafts: Mutex<Vec<ItemDraft>>,
    }

    impl FakeSubmitter {
        fn drafts(&self) -> Vec<ItemDraft> {
            self.drafts.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ItemSubmitter for FakeSubmitter {
        async fn create_item(&self, draft: &ItemDraft) -> ClientResult<()> {
            self.drafts.lock().unwrap().push(draft.clone());
            match self.fail_status {
                Some(status) => Err(ClientError::Status {
                    operation: "add item",
                    status,
                }),
                None => Ok(()),
            }
        }
    }

    struct Harness {
        workflow: ScanWorkflow,
        device: FakeHandle,
        lookup: Arc<FakeLookup>,
        submitter: Arc<FakeSubmitter>,
        view: Arc<RecordingView>,
    }

    fn harness(answer: Option<ProductInfo>, submitter: FakeSubmitter) -> Harness {
        let (recognizer, device) = fake_recognizer();
        let lookup = Arc::new(FakeLookup::new(answer, Some(device.clone())));
        let submitter = Arc::new(submitter);
        let view = Arc::new(RecordingView::default());
        let workflow = ScanWorkflow::new(
            ScannerController::new(Box::new(recognizer)),
            lookup.clone(),
            submitter.clone(),
            view.clone(),
        )
        .with_context(ScanContext {
            box_id: Some(BoxId(7)),
        });

        Harness {
            workflow,
            device,
            lookup,
            submitter,
            view,
        }
    }

    fn bolts() -> ProductInfo {
        ProductInfo {
            id: Some(ItemId(3)),
            product_name: "Hex bolts M8".into(),
            barcode: Some("4006381333931".into()),
            quantity: Some(40),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_standalone_unknown_product_gets_placeholder() {
        let mut h = harness(None, FakeSubmitter::default());
        assert!(h.workflow.open_scanner(ScanMode::Standalone).await.unwrap());

        h.device.detect("ab", "code_128");
        h.device.detect("4006381333931", "ean_13");
        let before = Instant::now();
        let outcome = h.workflow.await_scan().await.unwrap();

        assert!(before.elapsed() >= crate::controller::DETECTION_DISPLAY_DELAY);
        let ScanOutcome::Pending(pending) = outcome else {
            panic!("expected a pending item");
        };
        assert!(pending.product_name.contains("4006381333931"));
        assert_eq!(pending.quantity, 1);
        assert_eq!(pending.box_id, Some(BoxId(7)));

        // The camera was released before the lookup ran.
        assert_eq!(
            h.lookup.calls(),
            vec![(Some(BoxId(7)), "4006381333931".to_string(), true)]
        );
        assert_eq!(h.workflow.controller().phase(), ScanPhase::Stopped);
        assert_eq!(
            h.view.events(),
            vec![
                "status starting",
                "status scanning",
                "status detected 4006381333931",
                "status stopped",
                "pending Item 4006381333931 x1",
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_standalone_known_product_keeps_name() {
        let mut h = harness(Some(bolts()), FakeSubmitter::default());
        h.workflow.open_scanner(ScanMode::Standalone).await.unwrap();
        h.device.detect("4006381333931", "ean_13");

        h.workflow.await_scan().await.unwrap();

        let pending = h.workflow.pending().unwrap();
        assert_eq!(pending.product_name, "Hex bolts M8");
        assert!(pending.known_product);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fill_field_skips_lookup() {
        let mut h = harness(Some(bolts()), FakeSubmitter::default());
        h.workflow.open_scanner(ScanMode::FillField).await.unwrap();
        h.device.detect("CODE-39 $1", "code_39");

        let outcome = h.workflow.await_scan().await.unwrap();

        assert_eq!(outcome, ScanOutcome::FilledField(ItemForm::with_barcode("CODE-39 $1")));
        assert!(h.lookup.calls().is_empty());
        assert!(h.workflow.pending().is_none());
        assert!(h.view.events().contains(&"item form CODE-39 $1".to_string()));
    }

    #[tokio::test]
    async fn test_manual_entry_rejections_change_nothing() {
        let mut h = harness(None, FakeSubmitter::default());

        assert!(h.workflow.submit_manual("   ").await.unwrap().is_none());
        assert!(h.workflow.submit_manual("ab").await.unwrap().is_none());
        assert!(h.workflow.submit_manual("12345_678").await.unwrap().is_none());

        assert_eq!(
            h.view.events(),
            vec![
                "message Enter a barcode",
                "message Invalid barcode format",
                "message Invalid barcode format",
            ]
        );
        assert!(h.lookup.calls().is_empty());
        assert!(h.workflow.pending().is_none());
        assert_eq!(h.workflow.controller().phase(), ScanPhase::Idle);
    }

    #[tokio::test]
    async fn test_manual_entry_follows_active_mode() {
        let mut h = harness(None, FakeSubmitter::default());
        h.workflow.open_scanner(ScanMode::Standalone).await.unwrap();

        let outcome = h.workflow.submit_manual(" 4006381333931 ").await.unwrap();

        let Some(ScanOutcome::Pending(pending)) = outcome else {
            panic!("expected a pending item");
        };
        assert_eq!(pending.barcode, "4006381333931");
        assert_eq!(h.workflow.controller().phase(), ScanPhase::Stopped);
        assert_eq!(h.lookup.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_camera_unavailable_offers_manual_entry() {
        let mut h = harness(None, FakeSubmitter::default());
        h.device.fail_init(true);

        let live = h.workflow.open_scanner(ScanMode::Standalone).await.unwrap();

        assert!(!live);
        assert_eq!(
            h.view.events(),
            vec!["status starting", "status camera unavailable", "manual entry"]
        );
        assert!(h.workflow.submit_manual("4006381333931").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_confirm_posts_and_refreshes() {
        let mut h = harness(None, FakeSubmitter::default());
        h.workflow.submit_manual("4006381333931").await.unwrap();

        let mut edited = h.workflow.pending().cloned().unwrap();
        edited.quantity = 5;
        h.workflow.edit_pending(edited).unwrap();
        h.workflow.confirm_pending().await.unwrap();

        assert_eq!(
            h.submitter.drafts(),
            vec![ItemDraft {
                product_name: "Item 4006381333931".into(),
                barcode: Some("4006381333931".into()),
                quantity: 5,
                box_id: BoxId(7),
            }]
        );
        assert!(h.workflow.pending().is_none());
        let events = h.view.events();
        assert_eq!(&events[events.len() - 2..], ["hide pending", "refresh 7"]);
    }

    #[tokio::test]
    async fn test_confirm_failure_keeps_form_open() {
        let mut h = harness(
            None,
            FakeSubmitter {
                fail_status: Some(500),
                ..Default::default()
            },
        );
        h.workflow.submit_manual("4006381333931").await.unwrap();

        let err = h.workflow.confirm_pending().await.unwrap_err();

        assert!(matches!(err, ScanError::Client(_)));
        assert!(h.workflow.pending().is_some());
        assert_eq!(h.view.alerts(), vec!["alert Failed to add item"]);
        assert!(!h.view.events().iter().any(|e| e.starts_with("refresh")));
    }

    #[tokio::test]
    async fn test_incomplete_pending_is_not_sent() {
        let mut h = harness(None, FakeSubmitter::default());
        h.workflow.submit_manual("4006381333931").await.unwrap();

        let mut edited = h.workflow.pending().cloned().unwrap();
        edited.quantity = 0;
        h.workflow.edit_pending(edited).unwrap();
        assert!(h.workflow.confirm_pending().await.is_err());

        let mut edited = h.workflow.pending().cloned().unwrap();
        edited.quantity = 2;
        edited.product_name = "  ".into();
        h.workflow.edit_pending(edited).unwrap();
        assert!(h.workflow.confirm_pending().await.is_err());

        assert!(h.submitter.drafts().is_empty());
        assert_eq!(
            h.view.alerts(),
            vec!["alert Please fill in all fields", "alert Please fill in all fields"]
        );
    }

    #[tokio::test]
    async fn test_no_box_means_no_submit() {
        let mut h = harness(None, FakeSubmitter::default());
        h.workflow.set_context(ScanContext::default());
        h.workflow.submit_manual("4006381333931").await.unwrap();

        assert_eq!(h.lookup.calls()[0].0, None);
        assert!(h.workflow.confirm_pending().await.is_err());
        assert!(h.submitter.drafts().is_empty());
    }

    #[tokio::test]
    async fn test_confirm_without_pending() {
        let mut h = harness(None, FakeSubmitter::default());
        assert!(matches!(
            h.workflow.confirm_pending().await,
            Err(ScanError::NoPendingItem)
        ));
        assert!(matches!(
            h.workflow.edit_pending(PendingItem::from_lookup("123", None, None)),
            Err(ScanError::NoPendingItem)
        ));
    }

    #[tokio::test]
    async fn test_cancel_drops_pending() {
        let mut h = harness(None, FakeSubmitter::default());
        h.workflow.submit_manual("4006381333931").await.unwrap();
        h.workflow.cancel_pending();

        assert!(h.workflow.pending().is_none());
        assert!(h.submitter.drafts().is_empty());
    }

    #[tokio::test]
    async fn test_close_scanner_releases_device() {
        let mut h = harness(None, FakeSubmitter::default());
        h.workflow.open_scanner(ScanMode::Standalone).await.unwrap();
        h.workflow.close_scanner();
        h.workflow.close_scanner();

        let log = h.device.log();
        assert_eq!(log.iter().filter(|c| *c == "stop").count(), 1);
        assert_eq!(h.view.events().last().map(String::as_str), Some("status stopped"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_reopen_waits_before_starting() {
        let mut h = harness(None, FakeSubmitter::default());
        h.workflow.open_scanner(ScanMode::FillField).await.unwrap();
        h.workflow.close_scanner();

        let before = Instant::now();
        assert!(h.workflow.reopen_scanner().await.unwrap());

        assert!(before.elapsed() >= SCANNER_REOPEN_DELAY);
        assert_eq!(h.workflow.mode(), ScanMode::FillField);
        assert_eq!(h.workflow.controller().phase(), ScanPhase::Scanning);
    }

    #[tokio::test(start_paused = true)]
    async fn test_switch_camera_reports_scanning() {
        let mut h = harness(None, FakeSubmitter::default());
        h.workflow.open_scanner(ScanMode::Standalone).await.unwrap();

        assert_eq!(h.workflow.switch_camera().await.unwrap(), FacingMode::User);
        assert_eq!(h.view.events().last().map(String::as_str), Some("status scanning"));
    }

    /// Runs the workflow against the real client and a stub service whose
    /// lookup endpoint fails.
    #[tokio::test]
    async fn test_lookup_server_error_behaves_like_not_found() {
        use axum::http::StatusCode;
        use axum::routing::get;
        use axum::Router;
        use warehouse_client::{ApiSettings, InventoryClient};

        let router = Router::new().route(
            "/api/check_product",
            get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        let client = Arc::new(
            InventoryClient::new(&ApiSettings {
                base_url: format!("http://{}", addr),
                timeout_secs: 5,
            })
            .unwrap(),
        );

        let (recognizer, _device) = fake_recognizer();
        let view = Arc::new(RecordingView::default());
        let mut workflow = ScanWorkflow::new(
            ScannerController::new(Box::new(recognizer)),
            client.clone(),
            client,
            view.clone(),
        )
        .with_context(ScanContext {
            box_id: Some(BoxId(7)),
        });

        let outcome = workflow.submit_manual("4006381333931").await.unwrap();

        let Some(ScanOutcome::Pending(pending)) = outcome else {
            panic!("expected a pending item");
        };
        assert_eq!(pending.product_name, "Item 4006381333931");
        assert!(!pending.known_product);
        assert!(view.alerts().is_empty());
    }
}
