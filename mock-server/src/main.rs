use anyhow::Context;
use mock_server::Db;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

/// Parses `Name:#color,Name2` into seeded categories.
fn seed_from_env(db: &mut Db) {
    let Ok(raw) = std::env::var("MOCK_SEED_CATEGORIES") else {
        return;
    };
    for entry in raw.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let (name, color) = match entry.split_once(':') {
            Some((name, color)) => (name, Some(color)),
            None => (entry, None),
        };
        let category = db.seed_category(name, color);
        tracing::info!(id = category.id, name = %category.name, "seeded category");
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let port = std::env::var("PORT").unwrap_or_else(|_| "8000".to_string());
    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;

    let mut db = Db::new();
    seed_from_env(&mut db);

    tracing::info!("listening on {addr}");
    mock_server::run_with(listener, db).await?;
    Ok(())
}
