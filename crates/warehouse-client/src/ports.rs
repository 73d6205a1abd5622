//! # Ports Used by the Scan Workflow
//!
//! The workflow in `warehouse-scan` only sees these two traits, so it can be
//! driven by fakes in tests and by [`InventoryClient`] in the app.
//!
//! ```text
//!   ScanWorkflow ──► ProductLookup ──► InventoryClient::check_product
//!                └─► ItemSubmitter ──► InventoryClient::create_item
//! ```

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::client::InventoryClient;
use crate::error::ClientResult;
use warehouse_core::{BoxId, ItemDraft, ProductInfo};

/// Finds an existing product line for a scanned barcode.
///
/// Never fails: a transport error, a non-success status and "does not exist"
/// all come back as `None`. Implementations log the failure instead.
#[async_trait]
pub trait ProductLookup: Send + Sync {
    async fn lookup(&self, box_id: Option<BoxId>, barcode: &str) -> Option<ProductInfo>;
}

/// Creates item lines from confirmed scans.
#[async_trait]
pub trait ItemSubmitter: Send + Sync {
    async fn create_item(&self, draft: &ItemDraft) -> ClientResult<()>;
}

#[async_trait]
impl ProductLookup for InventoryClient {
    async fn lookup(&self, box_id: Option<BoxId>, barcode: &str) -> Option<ProductInfo> {
        let Some(box_id) = box_id else {
            debug!(barcode, "No box selected, skipping product lookup");
            return None;
        };

        match self.check_product(box_id, barcode).await {
            Ok(check) => {
                if let Some(error) = &check.error {
                    warn!(box_id = %box_id, barcode, error = %error, "Service reported lookup error");
                }
                check.found()
            }
            Err(e) => {
                warn!(box_id = %box_id, barcode, error = %e, "Product lookup failed, treating as not found");
                None
            }
        }
    }
}

#[async_trait]
impl ItemSubmitter for InventoryClient {
    async fn create_item(&self, draft: &ItemDraft) -> ClientResult<()> {
        InventoryClient::create_item(self, draft).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::tests::{stub_client, unreachable_client};
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_lookup_found() {
        let router = Router::new().route(
            "/api/check_product",
            get(|| async {
                Json(json!({
                    "exists": true,
                    "product": {"id": 3, "product_name": "Hex bolts M8", "barcode": "4006381333931", "quantity": 40}
                }))
            }),
        );
        let client = stub_client(router).await;

        let info = client.lookup(Some(BoxId(7)), "4006381333931").await.unwrap();
        assert_eq!(info.product_name, "Hex bolts M8");
    }

    #[tokio::test]
    async fn test_lookup_server_error_is_not_found() {
        let router = Router::new().route(
            "/api/check_product",
            get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        );
        let client = stub_client(router).await;

        assert!(client.lookup(Some(BoxId(7)), "4006381333931").await.is_none());
    }

    #[tokio::test]
    async fn test_lookup_service_side_error_is_not_found() {
        let router = Router::new().route(
            "/api/check_product",
            get(|| async { Json(json!({"exists": false, "error": "database is locked"})) }),
        );
        let client = stub_client(router).await;

        assert!(client.lookup(Some(BoxId(7)), "4006381333931").await.is_none());
    }

    #[tokio::test]
    async fn test_lookup_unreachable_is_not_found() {
        let client = unreachable_client().await;
        assert!(client.lookup(Some(BoxId(7)), "4006381333931").await.is_none());
    }

    #[tokio::test]
    async fn test_lookup_without_box_makes_no_request() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let router = Router::new().route(
            "/api/check_product",
            get(move || {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Json(json!({"exists": false}))
                }
            }),
        );
        let client = stub_client(router).await;

        assert!(client.lookup(None, "4006381333931").await.is_none());
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }
}
