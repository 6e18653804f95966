//! Handlers for `entry`, `exit` and `quote`
//!
//! These run the lifecycle manager directly against the configured store, so
//! they are only meaningful with a durable backend (file or sqlite).

use super::HandlerContext;
use crate::cli::OutputFormatter;
use crate::config::{Config, StorageBackend};
use crate::core::ExitReceipt;
use crate::error::Result;

/// Handler for the `entry` command
///
/// # Errors
///
/// Returns an error if the inputs are blank, the plate is already parked, or
/// the store fails.
pub async fn handle_entry_command(
    plate: &str,
    parking_lot: &str,
    config: Config,
    output: &OutputFormatter,
) -> Result<()> {
    warn_if_ephemeral(&config, output);
    let ctx = HandlerContext::new(config).await?;
    let ticket_id = ctx.manager.record_entry(plate, parking_lot).await?;

    if output.is_json() {
        output.print_json(&serde_json::json!({ "ticketId": ticket_id.to_string() }))?;
    } else {
        output.success(&format!("Issued ticket for {plate} at {parking_lot}"));
        output.info(&format!("Ticket: {ticket_id}"));
    }
    Ok(())
}

/// Handler for the `exit` command
pub async fn handle_exit_command(
    ticket_id: &str,
    config: Config,
    output: &OutputFormatter,
) -> Result<()> {
    warn_if_ephemeral(&config, output);
    let ctx = HandlerContext::new(config).await?;
    let receipt = ctx.manager.record_exit(ticket_id).await?;

    if output.is_json() {
        output.print_json(&receipt)?;
    } else {
        output.success(&format!("Ticket {} redeemed", receipt.ticket_id));
        print_receipt(&receipt, output);
    }
    Ok(())
}

/// Handler for the `quote` command
pub async fn handle_quote_command(
    ticket_id: &str,
    config: Config,
    output: &OutputFormatter,
) -> Result<()> {
    let ctx = HandlerContext::new(config).await?;
    let receipt = ctx.manager.quote(ticket_id).await?;

    if output.is_json() {
        output.print_json(&receipt)?;
    } else {
        output.info(&format!("Ticket {} (still parked)", receipt.ticket_id));
        print_receipt(&receipt, output);
    }
    Ok(())
}

fn print_receipt(receipt: &ExitReceipt, output: &OutputFormatter) {
    output.info(&format!("  Plate:  {}", receipt.plate));
    output.info(&format!("  Lot:    {}", receipt.parking_lot));
    output.info(&format!("  Parked: {} min", receipt.parked_minutes));
    output.info(&format!("  Fee:    {:.2}", receipt.fee));
}

fn warn_if_ephemeral(config: &Config, output: &OutputFormatter) {
    if config.storage.backend == StorageBackend::Memory {
        output.warning("storage.backend is 'memory'; tickets will not outlive this command");
    }
}
