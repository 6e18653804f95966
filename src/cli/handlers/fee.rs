use crate::cli::OutputFormatter;
use crate::config::Config;
use crate::core::PricingPolicy;
use crate::error::Result;
use rust_decimal::prelude::ToPrimitive;

/// Handler for the `fee` command
///
/// Prices a stay of `minutes` whole minutes at the configured rate without
/// touching any store.
pub fn handle_fee_command(minutes: u32, config: &Config, output: &OutputFormatter) -> Result<()> {
    let policy = PricingPolicy::new(config.pricing.hourly_rate)?;
    let quote = policy.fee_for_minutes(i64::from(minutes));

    if output.is_json() {
        output.print_json(&serde_json::json!({
            "parkedTimeMinutes": quote.parked_minutes,
            "fee": quote.fee.to_f64(),
            "hourlyRate": policy.hourly_rate().to_f64(),
        }))?;
    } else {
        output.info(&format!(
            "{} min at {:.2}/h: {:.2}",
            quote.parked_minutes,
            policy.hourly_rate(),
            quote.fee
        ));
    }
    Ok(())
}
