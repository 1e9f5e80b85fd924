use std::sync::Arc;

use chrono::Utc;
use photocomp_api_rest::RestServer;
use photocomp_common::{
    error::Error,
    image_entry::{ImageEntryPatch, ImageEntryStatus},
    state::{DatabaseTrait, ImageEntryDbTrait, InMemoryStateDb},
};
use photocomp_migration::{Migrator, MigratorTrait};
use photocomp_persistence_pg::PostgresStateDb;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::{config::ServerConfig, schema::FixtureFile, seed::seed};

async fn connect(config: &ServerConfig) -> Result<PostgresStateDb, Error> {
    let url = config
        .database_url
        .as_deref()
        .ok_or_else(|| Error::Config("DATABASE_URL is not set".to_string()))?;

    let db = PostgresStateDb::new(url).await?;
    if config.run_migrations {
        migrate_db(&db).await?;
    }

    Ok(db)
}

async fn migrate_db(db: &PostgresStateDb) -> Result<(), Error> {
    Migrator::up(db.connection(), None)
        .await
        .map_err(|e| Error::Database(format!("Migration failed: {e}")))?;
    info!("Database schema is up to date");
    Ok(())
}

/// Postgres when a url is configured, the in-memory store otherwise.
pub async fn open_database(config: &ServerConfig) -> Result<Arc<dyn DatabaseTrait>, Error> {
    if config.database_url.is_none() {
        warn!("No database configured, using the in-memory store");
        return Ok(Arc::new(InMemoryStateDb::new()));
    }

    Ok(Arc::new(connect(config).await?))
}

pub async fn serve(config: ServerConfig, fixtures: Option<FixtureFile>) -> Result<(), Error> {
    config.validate()?;

    let db = open_database(&config).await?;
    if let Some(fixtures) = fixtures {
        seed(db.as_ref(), fixtures, Utc::now()).await?;
    }

    let server = RestServer::new(db, config.rest, &config.listen_addr)?;
    let server_handle = server.serve().await?;

    info!("Serving photo competition API on {}", server.listen_addr());

    tokio::select! {
        res = server_handle => {
            error!(ok = res.is_ok(), "REST server task exited");
        }

        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl-C, shutting down server");
        }
    }

    Ok(())
}

pub async fn migrate(config: ServerConfig) -> Result<(), Error> {
    let url = config
        .database_url
        .as_deref()
        .ok_or_else(|| Error::Config("DATABASE_URL is not set".to_string()))?;

    let db = PostgresStateDb::new(url).await?;
    migrate_db(&db).await
}

pub async fn import(config: ServerConfig, fixtures: FixtureFile) -> Result<(), Error> {
    let db = connect(&config).await?;
    seed(&db, fixtures, Utc::now()).await?;
    Ok(())
}

pub async fn moderate(
    config: ServerConfig,
    image_id: &str,
    status: &str,
) -> Result<(), Error> {
    let image_id = Uuid::parse_str(image_id)
        .map_err(|_| Error::InvalidInput(format!("imageId [{image_id}] is not valid")))?;
    let status: ImageEntryStatus = status
        .parse()
        .map_err(|_| Error::InvalidInput(format!("Unknown image entry status [{status}]")))?;

    let db = connect(&config).await?;
    let patch = ImageEntryPatch {
        status: Some(status),
        ..Default::default()
    };
    let entry = db.patch_image_entry(image_id, &patch).await?;

    info!(%image_id, status = %entry.status, "image entry moderated");
    Ok(())
}
