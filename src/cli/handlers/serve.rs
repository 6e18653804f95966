use crate::api;
use crate::cli::OutputFormatter;
use crate::config::Config;
use crate::error::Result;
use super::HandlerContext;

/// Handler for the `serve` command
///
/// Runs the HTTP service until interrupted. `host` and `port` override the
/// configured listener address.
pub async fn handle_serve_command(
    mut config: Config,
    host: Option<String>,
    port: Option<u16>,
    output: &OutputFormatter,
) -> Result<()> {
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    let addr = config.bind_address();
    let ctx = HandlerContext::new(config).await?;

    if !output.is_json() {
        output.info(&format!(
            "Serving on http://{addr} ({} store)",
            ctx.manager.store().backend_name()
        ));
    }
    api::serve(&addr, ctx.manager).await
}
