use std::error::Error;
use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use estate_engine::api::{create_router, AppState};
use estate_engine::config::ConfigLoader;
use estate_engine::presentation::Locale;

#[derive(Parser, Debug)]
#[command(name = "estate-engine", about = "Estate distribution HTTP service", version)]
struct Cli {
    /// Directory holding the scheme's YAML files
    #[arg(long, env = "ESTATE_CONFIG", default_value = "./config/faraid")]
    config: PathBuf,
    /// Address to listen on
    #[arg(long, env = "ESTATE_BIND", default_value = "127.0.0.1:3000")]
    bind: SocketAddr,
    /// Locale used when a request does not name a supported one (en, id)
    #[arg(long, env = "ESTATE_LOCALE", default_value = "en")]
    locale: Locale,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();

    let loader = ConfigLoader::load(&cli.config)?;
    info!(
        scheme = %loader.scheme().code,
        version = %loader.scheme().version,
        roles = loader.catalog().role_count(),
        locales = ?loader.messages().locales(),
        "scheme loaded"
    );

    let state = AppState::new(loader).with_default_locale(cli.locale);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(cli.bind).await?;
    info!(
        "estate-engine v{} listening on {}",
        env!("CARGO_PKG_VERSION"),
        cli.bind
    );
    axum::serve(listener, app).await?;

    Ok(())
}
