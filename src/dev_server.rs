use anyhow::Context;
use axum::Router;
use icon_catalog::config::Config;
use icon_catalog::preferences::FilePreferenceStore;
use icon_catalog::server::{router, AppState};
use icon_catalog::variant::VARIANTS;
use icon_catalog::{FsResolver, Library, Variant};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;
    let resolver = FsResolver::new(&config.asset_root);
    println!("🔍 Indexing icons under: {}", resolver.root().display());

    let library = Library::index(&resolver)?;
    for warning in library.warnings() {
        eprintln!("  ⚠️  {warning}");
    }
    for variant in VARIANTS {
        println!("  📄 {}: {} icons", variant.directory, library.icon_count(variant));
    }

    let preferences = Arc::new(FilePreferenceStore::new(&config.preferences_path));
    let default_variant = Variant::from_slug(&config.default_variant);
    let state = AppState::new(&library, default_variant, preferences).context("loading page templates")?;

    let mut app: Router = router(Arc::new(state));
    if let Some(dir) = &config.static_dir {
        app = app.nest_service("/static", ServeDir::new(dir));
    }
    let app = app.layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(&config.bind)
        .await
        .with_context(|| format!("binding {}", config.bind))?;
    println!("🚀 Icon catalog running on http://{}", config.bind);

    axum::serve(listener, app).await?;
    Ok(())
}
