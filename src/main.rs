use anyhow::Context;
use course_chat::{
    api::HttpQueryClient,
    config::load_config,
    logging::init_logging,
    ui::run_ui,
};
use log::info;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = load_config().context("failed to load configuration")?;
    let _logger = init_logging(&config).context("failed to start logging")?;

    let client = HttpQueryClient::new(&config).context("failed to build query client")?;
    info!("querying {}", client.endpoint());

    run_ui(&config, Arc::new(client))
        .await
        .context("terminal UI exited with an error")?;

    Ok(())
}
