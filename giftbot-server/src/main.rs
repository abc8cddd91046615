use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use giftbot_common::Error;
use giftbot_core::Database;
use giftbot_core::platforms::wos::{WosClient, WosConfig};
use giftbot_core::repositories::postgres::player::PlayerRepository;
use giftbot_core::services::redemption_service::RedemptionService;
use giftbot_core::services::roster_service::RosterService;

mod routes;
use routes::{AppState, build_router};

#[derive(Parser, Debug, Clone)]
#[command(name = "giftbot")]
#[command(author, version, about = "GiftBot - roster-wide gift code redemption service")]
struct Args {
    /// Address to which the HTTP server will bind
    #[arg(long, default_value = "0.0.0.0:5000")]
    server_addr: String,

    /// Postgres connection URL.
    #[arg(long, default_value = "postgres://giftbot@localhost:5432/giftbot")]
    db_path: String,

    /// Base URL of the vendor's gift-code API
    #[arg(long, default_value = "https://wos-giftcode-api.centurygame.com/api")]
    api_base: String,

    /// Shared secret appended to every signed vendor request
    #[arg(long, env = "WOS_SIGN_SECRET", default_value = "tB87#kPtkxqOS2")]
    sign_secret: String,

    /// World/state id an account must belong to before registration is accepted
    #[arg(long, env = "WOS_HOME_STATE")]
    home_state: i64,
}

fn init_tracing() {
    let filter = EnvFilter::from_default_env()
        .add_directive("giftbot=info".parse().unwrap_or_default());
    let sub = fmt().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(sub)
        .expect("Failed to set global subscriber");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    init_tracing();
    let args = Args::parse();
    info!(
        "GiftBot starting. addr={}, home_state={}",
        args.server_addr, args.home_state
    );

    if let Err(e) = run_server(args).await {
        error!("Server error: {:?}", e);
    }
    info!("Main finished. Goodbye!");
    Ok(())
}

async fn run_server(args: Args) -> Result<(), Error> {
    info!("Using Postgres DB URL: {}", args.db_path);
    let db = Database::new(&args.db_path).await?;
    db.migrate().await?;

    let wos_config = WosConfig {
        api_base: args.api_base.clone(),
        sign_secret: args.sign_secret.clone(),
    };

    let redemption = RedemptionService::new(
        WosClient::new(wos_config.clone())?,
        PlayerRepository::new(db.pool().clone()),
    );
    let roster = RosterService::new(
        WosClient::new(wos_config)?,
        PlayerRepository::new(db.pool().clone()),
        args.home_state,
    );

    let state = AppState {
        redemption: Arc::new(redemption),
        roster: Arc::new(roster),
    };
    let app = build_router(state);

    let addr: SocketAddr = args.server_addr.parse()?;
    info!("HTTP server listening on http://{addr}");

    let handle = axum_server::Handle::new();
    let shutdown_handle = handle.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl-C: {:?}", e);
        }
        info!("Ctrl-C detected; shutting down HTTP server...");
        shutdown_handle.graceful_shutdown(None);
    });

    axum_server::Server::bind(addr)
        .handle(handle)
        .serve(app.into_make_service())
        .await?;

    Ok(())
}
