use std::{net::SocketAddr, sync::Arc};

use axum::{
    Router,
    routing::{get, post},
};
use chrono::{DateTime, Utc};
use photocomp_common::{
    common::{
        pagination::{DEFAULT_LIMIT, MAX_LIMIT},
        random_order::RandomOrderTokenFactory,
    },
    error::Error,
    state::DatabaseTrait,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, task::JoinHandle};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{error, info};

use crate::handlers::{competitions, healthcheck, image_entries, votes};

pub const DEFAULT_IMAGE_WIDTH: u64 = 700;

/// Settings of the public REST surface.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RestConfig {
    /// First path segment of every route, e.g. `v1`.
    pub api_version: String,
    pub default_limit: u64,
    pub max_limit: u64,
    /// Exposes personal data and non-verified entries.
    pub include_restricted_data: bool,
    pub image_base_url: Option<String>,
    pub default_image_width: u64,
}

impl Default for RestConfig {
    fn default() -> Self {
        Self {
            api_version: "v1".to_string(),
            default_limit: DEFAULT_LIMIT,
            max_limit: MAX_LIMIT,
            include_restricted_data: false,
            image_base_url: None,
            default_image_width: DEFAULT_IMAGE_WIDTH,
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<dyn DatabaseTrait>,
    pub config: Arc<RestConfig>,
    pub token_factory: RandomOrderTokenFactory,
}

impl AppState {
    pub fn new(db: Arc<dyn DatabaseTrait>, config: RestConfig) -> Self {
        Self {
            db,
            config: Arc::new(config),
            token_factory: RandomOrderTokenFactory::new(),
        }
    }

    pub fn with_token_factory(mut self, token_factory: RandomOrderTokenFactory) -> Self {
        self.token_factory = token_factory;
        self
    }

    /// Current time as seen by the token factory, so tests can pin it.
    pub fn now(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.token_factory.now(), 0).unwrap_or_else(Utc::now)
    }
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route("/competitions", get(competitions::list))
        .route("/competitions/{id}", get(competitions::get))
        .route("/competitions/{id}/stats", get(competitions::stats))
        .route("/imageEntries", get(image_entries::list))
        .route("/imageEntries/{id}", get(image_entries::get))
        .route("/imageEntriesWithScore", get(image_entries::list_with_score))
        .route("/votes", post(votes::create))
        .route("/healthcheck", get(healthcheck::check));

    Router::new()
        .nest(&format!("/{}", state.config.api_version), api)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

pub struct RestServer {
    state: AppState,
    listen_addr: SocketAddr,
}

impl RestServer {
    pub fn new(
        db: Arc<dyn DatabaseTrait>,
        config: RestConfig,
        listen_addr: &str,
    ) -> Result<Self, Error> {
        let listen_addr: SocketAddr = listen_addr.parse().map_err(|e| {
            Error::Config(format!(
                "Failed to parse listen address for REST server: {}",
                e
            ))
        })?;

        Ok(Self {
            state: AppState::new(db, config),
            listen_addr,
        })
    }

    pub fn listen_addr(&self) -> SocketAddr {
        self.listen_addr
    }

    pub async fn serve(&self) -> Result<JoinHandle<()>, Error> {
        let listener = TcpListener::bind(self.listen_addr).await.map_err(|e| {
            Error::Internal(format!(
                "Failed to bind REST listener on {}: {}",
                self.listen_addr, e
            ))
        })?;

        let app = router(self.state.clone());
        let listen_addr = self.listen_addr;

        let handle = tokio::spawn(async move {
            info!(%listen_addr, "REST API listening");

            let service = app.into_make_service_with_connect_info::<SocketAddr>();
            if let Err(e) = axum::serve(listener, service).await {
                error!(error = %e, "REST server encountered an error");
            } else {
                info!("REST server stopped gracefully");
            }
        });

        Ok(handle)
    }
}
