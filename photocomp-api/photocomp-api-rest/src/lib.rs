mod error;
mod extract;
mod handlers;
mod params;
mod response;
mod server;
mod view;

pub use error::ApiError;
pub use server::{AppState, RestConfig, RestServer, router};
