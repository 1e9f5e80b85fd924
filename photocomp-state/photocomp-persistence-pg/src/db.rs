use photocomp_common::error::Error;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;

#[derive(Debug, Clone)]
pub struct PostgresStateDb {
    pub(crate) conn: DatabaseConnection,
}

impl PostgresStateDb {
    pub async fn new(db_url: &str) -> Result<Self, Error> {
        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.sqlx_logging(false);

        let conn = Database::connect(opt)
            .await
            .map_err(|e| Error::Database(format!("Failed to connect to database: {e}")))?;

        info!("Connected to postgres");

        Ok(Self { conn })
    }

    /// Raw connection, used by the migrator.
    pub fn connection(&self) -> &DatabaseConnection {
        &self.conn
    }
}
