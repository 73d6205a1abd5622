//! # Domain Types
//!
//! Core domain types used throughout the warehouse scanner.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Zone       │ 1 │   StorageBox    │ 1 │      Item       │       │
//! │  │  ─────────────  │──►│  ─────────────  │──►│  ─────────────  │       │
//! │  │  id (ZoneId)    │ * │  id (BoxId)     │ * │  id (ItemId)    │       │
//! │  │  name           │   │  zone_id        │   │  box_id         │       │
//! │  │  description    │   │  name           │   │  product_name   │       │
//! │  └─────────────────┘   └─────────────────┘   │  barcode        │       │
//! │                                              │  quantity       │       │
//! │                                              └─────────────────┘       │
//! │                                                                         │
//! │  Scan workflow values (transient, never persisted):                    │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  DetectedCode   │──►│  ProductInfo?   │──►│  PendingItem    │       │
//! │  │  code + format  │   │  (lookup)       │   │  (confirm form) │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Identifiers are the integer keys handed out by the inventory service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::DEFAULT_QUANTITY;

// =============================================================================
// Identifiers
// =============================================================================

macro_rules! integer_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
        #[ts(export)]
        pub struct $name(pub i64);

        impl $name {
            /// Returns the raw integer key.
            #[inline]
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse().map($name)
            }
        }
    };
}

integer_id!(
    /// Identifier of a storage zone.
    ZoneId
);
integer_id!(
    /// Identifier of a box inside a zone.
    BoxId
);
integer_id!(
    /// Identifier of an item line inside a box.
    ItemId
);

// =============================================================================
// Zone
// =============================================================================

/// A top-level storage area containing boxes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Zone {
    pub id: ZoneId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Body of a zone create/update request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ZoneDraft {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

// =============================================================================
// Storage Box
// =============================================================================

/// A container within a zone that holds items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StorageBox {
    pub id: BoxId,
    pub zone_id: ZoneId,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Body of a box create request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BoxDraft {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub zone_id: ZoneId,
}

/// Body of a box update request. A box never moves between zones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BoxUpdate {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

// =============================================================================
// Item
// =============================================================================

/// A product line inside a box.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Item {
    pub id: ItemId,
    pub box_id: BoxId,
    pub product_name: String,
    pub barcode: Option<String>,
    pub quantity: i64,
}

/// Body of an item create request.
///
/// Posting a barcode that already exists in the box adds `quantity` to the
/// existing line instead of creating a second one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ItemDraft {
    pub product_name: String,
    pub barcode: Option<String>,
    pub quantity: i64,
    pub box_id: BoxId,
}

/// Body of an item update request. The barcode of a line is fixed once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ItemUpdate {
    pub product_name: String,
    pub quantity: i64,
}

/// Product metadata reported by the lookup endpoint for a box/barcode pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductInfo {
    #[serde(default)]
    pub id: Option<ItemId>,
    pub product_name: String,
    #[serde(default)]
    pub barcode: Option<String>,
    #[serde(default)]
    pub quantity: Option<i64>,
}

// =============================================================================
// Scanning
// =============================================================================

/// Symbology a code was decoded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum BarcodeFormat {
    Code128,
    Ean13,
    Ean8,
    Code39,
    UpcA,
    UpcE,
    /// Typed by a keyboard-wedge (USB HID) scanner.
    Keyboard,
    /// Entered by hand in the manual fallback.
    Manual,
    Unknown,
}

impl BarcodeFormat {
    /// Maps the format tag reported by the recognition library.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "code_128" | "code128" => BarcodeFormat::Code128,
            "ean_13" | "ean13" | "ean" => BarcodeFormat::Ean13,
            "ean_8" | "ean8" => BarcodeFormat::Ean8,
            "code_39" | "code39" => BarcodeFormat::Code39,
            "upc_a" | "upca" | "upc" => BarcodeFormat::UpcA,
            "upc_e" | "upce" => BarcodeFormat::UpcE,
            "keyboard" => BarcodeFormat::Keyboard,
            "manual" => BarcodeFormat::Manual,
            _ => BarcodeFormat::Unknown,
        }
    }
}

impl std::fmt::Display for BarcodeFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tag = match self {
            BarcodeFormat::Code128 => "code_128",
            BarcodeFormat::Ean13 => "ean_13",
            BarcodeFormat::Ean8 => "ean_8",
            BarcodeFormat::Code39 => "code_39",
            BarcodeFormat::UpcA => "upc_a",
            BarcodeFormat::UpcE => "upc_e",
            BarcodeFormat::Keyboard => "keyboard",
            BarcodeFormat::Manual => "manual",
            BarcodeFormat::Unknown => "unknown",
        };
        f.write_str(tag)
    }
}

/// A code that passed validation. Invalid candidates never become one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DetectedCode {
    pub code: String,
    pub format: BarcodeFormat,
}

impl DetectedCode {
    pub fn new(code: impl Into<String>, format: BarcodeFormat) -> Self {
        DetectedCode {
            code: code.into(),
            format,
        }
    }
}

/// Which camera the scanner asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum FacingMode {
    /// Rear camera.
    #[default]
    Environment,
    /// Front camera.
    User,
}

impl FacingMode {
    /// The other camera.
    pub fn toggled(self) -> Self {
        match self {
            FacingMode::Environment => FacingMode::User,
            FacingMode::User => FacingMode::Environment,
        }
    }
}

impl std::fmt::Display for FacingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FacingMode::Environment => write!(f, "environment"),
            FacingMode::User => write!(f, "user"),
        }
    }
}

/// What happens to a confirmed code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ScanMode {
    /// Look the code up and open the quantity confirmation form.
    #[default]
    Standalone,
    /// Write the code into the item form's barcode field.
    FillField,
}

// =============================================================================
// Pending Item
// =============================================================================

/// The in-progress confirmation record built after a valid scan.
///
/// ## Lifecycle
/// ```text
/// valid code ──► lookup ──► PendingItem ──► confirm ──► create request
///                                 │
///                                 └────────► cancel ──► dropped
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PendingItem {
    pub barcode: String,
    pub product_name: String,
    pub quantity: i64,
    pub box_id: Option<BoxId>,
    /// Whether the name came from an existing line in the box.
    pub known_product: bool,
}

impl PendingItem {
    /// Builds the record from the lookup outcome.
    ///
    /// Unknown products get a placeholder name containing the barcode.
    pub fn from_lookup(
        barcode: impl Into<String>,
        existing: Option<&ProductInfo>,
        box_id: Option<BoxId>,
    ) -> Self {
        let barcode = barcode.into();
        let (product_name, known_product) = match existing {
            Some(info) => (info.product_name.clone(), true),
            None => (placeholder_name(&barcode), false),
        };

        PendingItem {
            barcode,
            product_name,
            quantity: DEFAULT_QUANTITY,
            box_id,
            known_product,
        }
    }

    /// Converts the confirmed record into a create request body.
    ///
    /// Returns `None` when the target box is unknown.
    pub fn to_draft(&self) -> Option<ItemDraft> {
        let box_id = self.box_id?;
        Some(ItemDraft {
            product_name: self.product_name.trim().to_string(),
            barcode: Some(self.barcode.trim().to_string()),
            quantity: self.quantity,
            box_id,
        })
    }
}

/// Name given to a product the box has never seen.
pub fn placeholder_name(barcode: &str) -> String {
    format!("Item {}", barcode)
}

/// State of the item-creation form opened by fill-field scanning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ItemForm {
    pub product_name: String,
    pub barcode: String,
    pub quantity: i64,
}

impl ItemForm {
    /// Blank "add item" form.
    pub fn new() -> Self {
        ItemForm {
            quantity: DEFAULT_QUANTITY,
            ..Default::default()
        }
    }

    /// Blank form with the barcode field filled in.
    pub fn with_barcode(barcode: impl Into<String>) -> Self {
        ItemForm {
            barcode: barcode.into(),
            ..Self::new()
        }
    }

    /// Create request for the form's values. A blank barcode is sent as none.
    pub fn to_draft(&self, box_id: BoxId) -> ItemDraft {
        let barcode = self.barcode.trim();
        ItemDraft {
            product_name: self.product_name.trim().to_string(),
            barcode: (!barcode.is_empty()).then(|| barcode.to_string()),
            quantity: self.quantity,
            box_id,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
