use fluxgen::{
    error::TOKEN_SETUP_INSTRUCTIONS,
    logger::{self, LoggerConfig},
    Config, ImageGenError,
};

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env before reading any configuration
    let dotenv_loaded = dotenv::dotenv().is_ok();

    logger::init_with_config(LoggerConfig::from_env())?;

    if dotenv_loaded {
        log::info!("✅ .env file loaded successfully");
    } else {
        log::warn!("⚠️  No .env file found, using system environment variables");
    }

    let config = Config::from_env();

    if let Err(e) = config.validate() {
        log::error!("❌ {}", e);
        if matches!(e, ImageGenError::MissingCredential) {
            for line in TOKEN_SETUP_INSTRUCTIONS.lines() {
                log::info!("{}", line);
            }
        }
        return Err(e.into());
    }

    logger::log_startup_info(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"), &config);

    fluxgen::server::run(config).await?;

    log::info!("👋 Server stopped");
    Ok(())
}
