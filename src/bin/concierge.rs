#[path = "concierge/app/mod.rs"]
mod app;
#[path = "concierge/args.rs"]
mod args;
#[path = "concierge/config/mod.rs"]
mod config;
#[path = "concierge/logging.rs"]
mod logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    app::run().await
}
