//! # Scan Command
//!
//! Continuous scanning into one box.
//!
//! ```text
//!   open scanner ──► wait for a line ──► Detected ──► scanner closed
//!        ▲                                                │
//!        │                    standalone: confirm quantity, post item
//!        │                    fill-field: ask for a name, post item
//!        └──────────── reopen after 300ms ◄───────────────┘
//! ```
//!
//! Ctrl-C or end of input ends the loop, whether the scanner or a prompt is
//! waiting.

use std::ops::ControlFlow;
use std::sync::Arc;
use tracing::{debug, info};

use crate::error::CliResult;
use crate::terminal::{
    parse_confirm_answer, prompt, ConfirmAnswer, Input, Interrupt, KeyboardWedge, Lines,
    TerminalView,
};
use warehouse_client::InventoryClient;
use warehouse_core::{BoxId, ItemForm, ScanMode};
use warehouse_scan::{ScanContext, ScanError, ScanOutcome, ScanWorkflow, ScannerController};

pub async fn run(client: InventoryClient, box_id: BoxId, fill_field: bool) -> CliResult<()> {
    let interrupt = Interrupt::ctrl_c();
    let client = Arc::new(client);
    let lines = Lines::stdin();
    let controller = ScannerController::new(Box::new(KeyboardWedge::new(lines.clone())));
    let mut workflow = ScanWorkflow::new(
        controller,
        client.clone(),
        client.clone(),
        Arc::new(TerminalView),
    )
    .with_context(ScanContext {
        box_id: Some(box_id),
    });

    let mode = if fill_field {
        ScanMode::FillField
    } else {
        ScanMode::Standalone
    };
    info!(box_id = %box_id, ?mode, "Scan session started");
    println!("Scanning into box {}. Ctrl-C to finish.", box_id);

    let mut live = workflow.open_scanner(mode).await?;
    loop {
        let outcome = if live {
            let scanned = tokio::select! {
                result = workflow.await_scan() => Some(result),
                _ = interrupt.wait() => None,
            };
            match scanned {
                None | Some(Err(ScanError::SessionClosed)) => break,
                Some(result) => result?,
            }
        } else {
            let Input::Line(line) = lines.read(&interrupt).await else {
                break;
            };
            match workflow.submit_manual(&line).await? {
                Some(outcome) => outcome,
                None => continue,
            }
        };

        let flow = match outcome {
            ScanOutcome::Pending(_) => confirm(&mut workflow, &lines, &interrupt).await?,
            ScanOutcome::FilledField(form) => {
                fill_item_form(&client, box_id, form, &lines, &interrupt).await?
            }
        };
        if flow.is_break() || interrupt.is_set() {
            break;
        }

        live = workflow.reopen_scanner().await?;
    }

    workflow.close_scanner();
    info!(box_id = %box_id, "Scan session finished");
    Ok(())
}

/// Confirmation prompt. Stays open until the item is saved or cancelled.
///
/// Breaks when input ends or Ctrl-C is pressed; the pending item is dropped.
async fn confirm(
    workflow: &mut ScanWorkflow,
    lines: &Lines,
    interrupt: &Interrupt,
) -> CliResult<ControlFlow<()>> {
    while let Some(pending) = workflow.pending().cloned() {
        prompt(&format!(
            "Quantity [{}] (Enter to add, n to cancel): ",
            pending.quantity
        ))?;
        let Input::Line(answer) = lines.read(interrupt).await else {
            workflow.cancel_pending();
            return Ok(ControlFlow::Break(()));
        };

        match parse_confirm_answer(&answer) {
            ConfirmAnswer::Accept => {}
            ConfirmAnswer::Quantity(quantity) => {
                let mut edited = pending;
                edited.quantity = quantity;
                workflow.edit_pending(edited)?;
            }
            ConfirmAnswer::Cancel => {
                workflow.cancel_pending();
                break;
            }
            ConfirmAnswer::Invalid => {
                println!("  Enter a quantity, y or n.");
                continue;
            }
        }

        if let Err(e) = workflow.confirm_pending().await {
            debug!(error = %e, "Item not saved, confirmation stays open");
        }
    }
    Ok(ControlFlow::Continue(()))
}

/// Item form opened by fill-field scanning.
async fn fill_item_form(
    client: &InventoryClient,
    box_id: BoxId,
    mut form: ItemForm,
    lines: &Lines,
    interrupt: &Interrupt,
) -> CliResult<ControlFlow<()>> {
    prompt(&format!("Product name for {} (empty to skip): ", form.barcode))?;
    let Input::Line(name) = lines.read(interrupt).await else {
        return Ok(ControlFlow::Break(()));
    };
    if name.trim().is_empty() {
        println!("  Skipped.");
        return Ok(ControlFlow::Continue(()));
    }
    form.product_name = name;

    prompt(&format!("Quantity [{}]: ", form.quantity))?;
    let Input::Line(answer) = lines.read(interrupt).await else {
        return Ok(ControlFlow::Break(()));
    };
    if let ConfirmAnswer::Quantity(quantity) = parse_confirm_answer(&answer) {
        form.quantity = quantity;
    }

    let draft = form.to_draft(box_id);
    match client.create_item(&draft).await {
        Ok(()) => println!("  Added {} x{}.", draft.product_name, draft.quantity),
        Err(e) => eprintln!("! {}", e.user_message()),
    }
    Ok(ControlFlow::Continue(()))
}
