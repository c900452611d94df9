use std::sync::Arc;

use redis::Connection;
use secrecy::ExposeSecret;
use servicedesk_adapters::config::{PostgresSettings, RedisSettings};
use sqlx::{PgPool, postgres::PgPoolOptions};
use tokio::sync::RwLock;

/// Connects to Postgres and applies pending migrations.
pub async fn configure_postgresql(settings: &PostgresSettings) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .connect(settings.url.expose_secret())
        .await?;

    sqlx::migrate!().run(&pool).await?;

    Ok(pool)
}

pub fn redis_connection(settings: &RedisSettings) -> redis::RedisResult<Arc<RwLock<Connection>>> {
    let client = redis::Client::open(format!("redis://{}/", settings.host_name))?;
    Ok(Arc::new(RwLock::new(client.get_connection()?)))
}
