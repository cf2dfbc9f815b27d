use clap::Parser;
use log::{info, warn};
use tokio::net::TcpListener;

use miniwiki::logger::Logger;
use miniwiki::{create_router, AppState, Config, FileService, WikiConfig, WikiError};

#[tokio::main]
async fn main() -> Result<(), WikiError> {
    let config = Config::parse();
    if let Err(e) = Logger::init() {
        eprintln!("logger already initialized: {e}");
    }

    let wiki = WikiConfig::from_config(&config)?;
    FileService::new(wiki.dir.clone()).ensure_dir()?;

    if !wiki.editable() {
        warn!("No password was given (with --pass or MINIWIKI_PASS), therefore page editing is disabled.");
    }

    let app = create_router(AppState::new(wiki));

    let addr = config.listen_addr();
    let listener = TcpListener::bind(addr.as_str()).await?;
    info!("Wiki '{}' serving {:?}, listening on http://{}", config.name, config.dir, addr);
    axum::serve(listener, app).await.map_err(WikiError::from)
}
