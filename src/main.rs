use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize core
    wxreport_core::init()?;

    let (config, validation) = wxreport_core::Config::load_validated()?;
    tracing::info!(
        "Configuration loaded ({} warnings), upstream {}",
        validation.warnings.len(),
        config.weather.base_url
    );

    if let Err(e) = wxreport_server::run_server(&config).await {
        tracing::error!("{}: {}", e.user_message(), e);
        return Err(e.into());
    }

    Ok(())
}
