use crate::cli::OutputFormatter;
use crate::config::Config;
use crate::error::{ParkingError, Result};

/// Handler for `config show`
pub fn handle_config_show(config: &Config, output: &OutputFormatter) -> Result<()> {
    if output.is_json() {
        output.print_json(config)?;
    } else {
        let yaml = serde_yaml::to_string(config)
            .map_err(|e| ParkingError::Serialization(e.to_string()))?;
        output.info(yaml.trim_end());
    }
    Ok(())
}
