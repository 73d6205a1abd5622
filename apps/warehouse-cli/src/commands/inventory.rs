//! Lookup and zone/box/item mutations.

use crate::cli::{BoxAction, ItemAction, NameArgs, ZoneAction};
use crate::error::CliResult;
use warehouse_client::InventoryClient;
use warehouse_core::validation::validate_barcode;
use warehouse_core::{
    placeholder_name, BoxDraft, BoxId, BoxUpdate, ItemDraft, ItemUpdate, ZoneDraft,
};

pub async fn lookup(client: &InventoryClient, box_id: BoxId, barcode: &str) -> CliResult<()> {
    let barcode = validate_barcode(barcode)?;
    let check = client.check_product(box_id, &barcode).await?;

    if let Some(error) = &check.error {
        eprintln!("! Service reported: {}", error);
    }
    match check.found() {
        Some(product) => {
            let quantity = product
                .quantity
                .map(|q| q.to_string())
                .unwrap_or_else(|| "?".to_string());
            println!("{} (qty {}) in box {}", product.product_name, quantity, box_id);
        }
        None => println!(
            "Not in box {}. A scan would add \"{}\".",
            box_id,
            placeholder_name(&barcode)
        ),
    }
    Ok(())
}

fn zone_draft(fields: NameArgs) -> ZoneDraft {
    ZoneDraft {
        name: fields.name,
        description: fields.description,
    }
}

pub async fn zone(client: &InventoryClient, action: ZoneAction) -> CliResult<()> {
    match action {
        ZoneAction::Add(fields) => {
            let id = client.create_zone(&zone_draft(fields)).await?;
            println!("Created zone {}", id);
        }
        ZoneAction::Edit { id, fields } => {
            client.update_zone(id, &zone_draft(fields)).await?;
            println!("Updated zone {}", id);
        }
        ZoneAction::Delete { id } => {
            client.delete_zone(id).await?;
            println!("Deleted zone {}", id);
        }
    }
    Ok(())
}

pub async fn storage_box(client: &InventoryClient, action: BoxAction) -> CliResult<()> {
    match action {
        BoxAction::Add { zone_id, fields } => {
            let draft = BoxDraft {
                name: fields.name,
                description: fields.description,
                zone_id,
            };
            let id = client.create_box(&draft).await?;
            println!("Created box {} in zone {}", id, zone_id);
        }
        BoxAction::Edit { id, fields } => {
            let update = BoxUpdate {
                name: fields.name,
                description: fields.description,
            };
            client.update_box(id, &update).await?;
            println!("Updated box {}", id);
        }
        BoxAction::Delete { id } => {
            client.delete_box(id).await?;
            println!("Deleted box {}", id);
        }
    }
    Ok(())
}

pub async fn item(client: &InventoryClient, action: ItemAction) -> CliResult<()> {
    match action {
        ItemAction::Add {
            box_id,
            name,
            barcode,
            qty,
        } => {
            let barcode = barcode.map(|b| validate_barcode(&b)).transpose()?;
            let draft = ItemDraft {
                product_name: name,
                barcode,
                quantity: qty,
                box_id,
            };
            client.create_item(&draft).await?;
            println!("Added {} x{} to box {}", draft.product_name, qty, box_id);
        }
        ItemAction::Edit { id, name, qty } => {
            let update = ItemUpdate {
                product_name: name,
                quantity: qty,
            };
            client.update_item(id, &update).await?;
            println!("Updated item {}", id);
        }
        ItemAction::Delete { id } => {
            client.delete_item(id).await?;
            println!("Deleted item {}", id);
        }
    }
    Ok(())
}
