//! # Inventory Client
//!
//! Thin typed wrapper over the inventory service's REST API.
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         InventoryClient                                 │
//! │                                                                         │
//! │  Draft ──► validate (warehouse-core) ──► JSON body ──► reqwest ──►     │
//! │                                                                         │
//! │  ◄── status check ◄── response                                         │
//! │       2xx  → Ok (create reads `{"id": ..}` from the body)              │
//! │       else → ClientError::Status { operation, status }                 │
//! │                                                                         │
//! │  Endpoints                                                              │
//! │   POST/PUT/DELETE  api/zones[/{id}]                                     │
//! │   POST/PUT/DELETE  api/boxes[/{id}]                                     │
//! │   POST/PUT/DELETE  api/box_items[/{id}]                                 │
//! │   GET              api/check_product?box_id=..&barcode=..               │
//! │   GET              api/export_*                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Success is judged by status code only. Nothing is retried.

use chrono::{NaiveDate, Utc};
use reqwest::{RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use url::Url;

use crate::config::{ApiSettings, ClientConfig};
use crate::error::{ClientError, ClientResult};
use crate::export::{ExportFile, ExportKind};
use warehouse_core::validation::{validate_entity_name, validate_product_name, validate_quantity};
use warehouse_core::{
    BoxDraft, BoxId, BoxUpdate, ItemDraft, ItemId, ItemUpdate, ProductInfo, ZoneDraft, ZoneId,
};

/// Body of `api/check_product`.
///
/// The service answers 200 with `exists: false` and an `error` message when
/// the lookup itself failed on its side.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductCheck {
    pub exists: bool,
    #[serde(default)]
    pub product: Option<ProductInfo>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ProductCheck {
    /// The product, when the service says it exists.
    pub fn found(self) -> Option<ProductInfo> {
        if self.exists {
            self.product
        } else {
            None
        }
    }
}

#[derive(Debug, Deserialize)]
struct Created {
    #[serde(default)]
    id: Option<i64>,
}

/// HTTP client for the inventory service.
#[derive(Debug, Clone)]
pub struct InventoryClient {
    http: reqwest::Client,
    base: Url,
}

impl InventoryClient {
    /// Builds a client for the given service.
    pub fn new(settings: &ApiSettings) -> ClientResult<Self> {
        let mut raw = settings.base_url.trim().to_string();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        let base = Url::parse(&raw)?;

        let http = reqwest::Client::builder()
            .timeout(settings.timeout())
            .build()
            .map_err(|e| ClientError::InvalidConfig(e.to_string()))?;

        debug!(base = %base, timeout_secs = settings.timeout_secs, "Inventory client ready");
        Ok(InventoryClient { http, base })
    }

    pub fn from_config(config: &ClientConfig) -> ClientResult<Self> {
        Self::new(&config.api)
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, path: &str) -> ClientResult<Url> {
        Ok(self.base.join(path)?)
    }

    async fn send(&self, request: RequestBuilder, operation: &'static str) -> ClientResult<Response> {
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status {
                operation,
                status: status.as_u16(),
            });
        }
        Ok(response)
    }

    async fn create(&self, path: &str, body: &impl Serialize, operation: &'static str) -> ClientResult<i64> {
        let url = self.endpoint(path)?;
        let response = self.send(self.http.post(url).json(body), operation).await?;
        let created: Created = response.json().await?;
        created
            .id
            .ok_or_else(|| ClientError::Decode(format!("{}: response has no id", operation)))
    }

    async fn update(&self, path: &str, body: &impl Serialize, operation: &'static str) -> ClientResult<()> {
        let url = self.endpoint(path)?;
        self.send(self.http.put(url).json(body), operation).await?;
        Ok(())
    }

    async fn delete(&self, path: &str, operation: &'static str) -> ClientResult<()> {
        let url = self.endpoint(path)?;
        self.send(self.http.delete(url), operation).await?;
        Ok(())
    }

    // =========================================================================
    // Zones
    // =========================================================================

    pub async fn create_zone(&self, draft: &ZoneDraft) -> ClientResult<ZoneId> {
        validate_entity_name("zone name", &draft.name)?;
        let id = self.create("api/zones", draft, "save zone").await?;
        info!(zone_id = id, name = %draft.name, "Zone created");
        Ok(ZoneId(id))
    }

    pub async fn update_zone(&self, id: ZoneId, draft: &ZoneDraft) -> ClientResult<()> {
        validate_entity_name("zone name", &draft.name)?;
        self.update(&format!("api/zones/{}", id), draft, "save zone").await?;
        info!(zone_id = %id, "Zone updated");
        Ok(())
    }

    /// Deletes a zone. The service refuses zones that still hold boxes.
    pub async fn delete_zone(&self, id: ZoneId) -> ClientResult<()> {
        self.delete(&format!("api/zones/{}", id), "delete zone").await?;
        info!(zone_id = %id, "Zone deleted");
        Ok(())
    }

    // =========================================================================
    // Boxes
    // =========================================================================

    pub async fn create_box(&self, draft: &BoxDraft) -> ClientResult<BoxId> {
        validate_entity_name("box name", &draft.name)?;
        let id = self.create("api/boxes", draft, "save box").await?;
        info!(box_id = id, zone_id = %draft.zone_id, "Box created");
        Ok(BoxId(id))
    }

    pub async fn update_box(&self, id: BoxId, update: &BoxUpdate) -> ClientResult<()> {
        validate_entity_name("box name", &update.name)?;
        self.update(&format!("api/boxes/{}", id), update, "save box").await?;
        info!(box_id = %id, "Box updated");
        Ok(())
    }

    pub async fn delete_box(&self, id: BoxId) -> ClientResult<()> {
        self.delete(&format!("api/boxes/{}", id), "delete box").await?;
        info!(box_id = %id, "Box deleted");
        Ok(())
    }

    // =========================================================================
    // Items
    // =========================================================================

    /// Adds an item line. A barcode already present in the box is merged
    /// into the existing line by the service.
    pub async fn create_item(&self, draft: &ItemDraft) -> ClientResult<()> {
        validate_product_name(&draft.product_name)?;
        validate_quantity(draft.quantity)?;

        let url = self.endpoint("api/box_items")?;
        self.send(self.http.post(url).json(draft), "add item").await?;
        info!(
            box_id = %draft.box_id,
            barcode = draft.barcode.as_deref().unwrap_or(""),
            quantity = draft.quantity,
            "Item added"
        );
        Ok(())
    }

    pub async fn update_item(&self, id: ItemId, update: &ItemUpdate) -> ClientResult<()> {
        validate_product_name(&update.product_name)?;
        validate_quantity(update.quantity)?;
        self.update(&format!("api/box_items/{}", id), update, "save item").await?;
        info!(item_id = %id, quantity = update.quantity, "Item updated");
        Ok(())
    }

    pub async fn delete_item(&self, id: ItemId) -> ClientResult<()> {
        self.delete(&format!("api/box_items/{}", id), "delete item").await?;
        info!(item_id = %id, "Item deleted");
        Ok(())
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    /// Asks whether `barcode` already has a line in the box.
    pub async fn check_product(&self, box_id: BoxId, barcode: &str) -> ClientResult<ProductCheck> {
        let mut url = self.endpoint("api/check_product")?;
        url.query_pairs_mut()
            .append_pair("box_id", &box_id.to_string())
            .append_pair("barcode", barcode);

        let response = self.send(self.http.get(url), "check product").await?;
        let check: ProductCheck = response.json().await?;
        debug!(box_id = %box_id, barcode, exists = check.exists, "Product checked");
        Ok(check)
    }

    // =========================================================================
    // Exports
    // =========================================================================

    /// Downloads a report, named with today's UTC date.
    pub async fn export(&self, kind: ExportKind) -> ClientResult<ExportFile> {
        self.export_on(kind, Utc::now().date_naive()).await
    }

    /// Downloads a report, naming it as if downloaded on `today`.
    pub async fn export_on(&self, kind: ExportKind, today: NaiveDate) -> ClientResult<ExportFile> {
        let mut url = self.endpoint(kind.path())?;
        for (key, value) in kind.query() {
            url.query_pairs_mut().append_pair(key, &value);
        }

        let response = self.send(self.http.get(url), kind.operation()).await?;
        let bytes = response.bytes().await?.to_vec();
        let file = ExportFile {
            file_name: kind.file_name(today),
            bytes,
        };
        info!(file = %file.file_name, bytes = file.bytes.len(), "Export downloaded");
        Ok(file)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
