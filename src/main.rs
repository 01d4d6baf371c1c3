use travel_site_api::{server, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::from_env()?;
    server::init_tracing(&config.log_filter);

    server::start_server(config).await
}
