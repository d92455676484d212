// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Hoist tower crane sales site server binary.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use hoist_server::{create_app_state, create_router, locale_routing_layer, version};
use hoist_server_config::LogFormat;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Hoist server - HTTP server for the tower crane sales site.
#[derive(Parser, Debug)]
#[command(name = "hoist-server", about = "Hoist tower crane sales site server", version)]
struct Args {
	/// Config file to load instead of /etc/hoist/server.toml
	#[arg(long, env = "HOIST_SERVER_CONFIG")]
	config: Option<PathBuf>,

	#[command(subcommand)]
	command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Show version and build information
	Version,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	// Load .env before clap so HOIST_SERVER_CONFIG can come from it
	dotenvy::dotenv().ok();

	let args = Args::parse();

	if let Some(Command::Version) = args.command {
		println!("{}", version::format_version_info());
		return Ok(());
	}

	let config = match &args.config {
		Some(path) => hoist_server_config::load_config_with_file(path)?,
		None => hoist_server_config::load_config()?,
	};

	let json = config.logging.format == LogFormat::Json;
	tracing_subscriber::registry()
		.with(
			tracing_subscriber::EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| config.logging.level.clone().into()),
		)
		.with(json.then(|| tracing_subscriber::fmt::layer().json()))
		.with((!json).then(tracing_subscriber::fmt::layer))
		.init();

	tracing::info!(
		host = %config.http.host,
		port = config.http.port,
		base_url = %config.http.base_url,
		database = %config.database.url,
		"starting hoist-server"
	);

	let pool = hoist_server::db::create_pool(&config.database.url).await?;
	hoist_server::db::run_migrations(&pool).await?;

	tokio::fs::create_dir_all(&config.uploads.dir).await?;

	let state = create_app_state(pool, &config)?;
	let sweeper = state
		.limiter
		.spawn_sweeper(config.rate_limit.sweep_interval());

	let app = create_router(state, locale_routing_layer(&config.locale))
		.layer(TraceLayer::new_for_http());

	let addr = config.socket_addr();
	tracing::info!("listening on {}", addr);
	let listener = tokio::net::TcpListener::bind(&addr).await?;

	let result = axum::serve(
		listener,
		app.into_make_service_with_connect_info::<SocketAddr>(),
	)
	.with_graceful_shutdown(async {
		if let Err(e) = tokio::signal::ctrl_c().await {
			tracing::error!(error = %e, "failed to listen for shutdown signal");
		}
		tracing::info!("received shutdown signal");
	})
	.await;

	tracing::info!("stopping rate limit sweeper");
	sweeper.shutdown().await;

	if let Err(e) = result {
		tracing::error!(error = %e, "server error");
		return Err(e.into());
	}

	tracing::info!("server shutdown complete");
	Ok(())
}
