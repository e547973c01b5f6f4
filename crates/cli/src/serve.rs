use axum::Router;
use axum::http::StatusCode;
use clap::Args;
use pkglink_core::Assets;
use pkglink_core::config::{CollectionConfig, Config};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    /// JSON configuration file; relative paths inside it are resolved
    /// against its directory
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
    /// URL signature (first path segment of every asset URL)
    #[arg(long)]
    pub signature: Option<String>,
    /// Address to listen on
    #[arg(long, value_name = "ADDR")]
    pub bind: Option<String>,
    /// Extra components directory, as NAME=PATH (repeatable)
    #[arg(long = "components", value_name = "NAME=PATH", value_parser = parse_component)]
    pub components: Vec<(String, PathBuf)>,
}

/// Parse a `NAME=PATH` collection argument.
pub fn parse_component(value: &str) -> Result<(String, PathBuf), String> {
    match value.split_once('=') {
        Some((name, path)) if !name.is_empty() && !path.is_empty() => {
            Ok((name.to_string(), PathBuf::from(path)))
        }
        _ => Err(format!("expected NAME=PATH, got {value:?}")),
    }
}

/// The configuration file (if any) with command-line overrides applied,
/// plus the directory its relative paths are resolved against.
pub(crate) fn resolve_config(args: &ServeArgs) -> Result<(Config, PathBuf), Box<dyn std::error::Error>> {
    let (mut config, base_dir) = match &args.config {
        Some(path) => {
            let config = Config::from_file(path)?;
            let base_dir = path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_default();
            (config, base_dir)
        }
        None => (Config::default(), std::env::current_dir()?),
    };

    if let Some(signature) = &args.signature {
        config.signature = signature.clone();
    }
    if let Some(bind) = &args.bind {
        config.bind = bind.clone();
    }
    for (name, path) in &args.components {
        config.collections.push(CollectionConfig {
            name: name.clone(),
            path: std::path::absolute(path)?,
        });
    }

    Ok((config, base_dir))
}

pub async fn run(args: ServeArgs) -> Result<(), Box<dyn std::error::Error>> {
    let (config, base_dir) = resolve_config(&args)?;
    if config.collections.is_empty() {
        return Err("no collections configured; pass --config or --components NAME=PATH".into());
    }

    let assets = Arc::new(Assets::from_config(&config, &base_dir)?);
    let fallback = Router::new().fallback(|| async { StatusCode::NOT_FOUND });
    let app = pkglink_http::publisher(fallback, assets.clone());

    let listener = tokio::net::TcpListener::bind(&config.bind).await?;
    info!(
        "Serving {} under /{}/ on {}",
        assets.collection_names().join(", "),
        assets.signature(),
        listener.local_addr()?
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutting down");
        })
        .await?;
    Ok(())
}
