pub mod api_error;
pub mod auth;
pub mod cli;
pub mod error;
pub mod events;
pub mod health;
pub mod logger;
pub mod routes;
pub mod server_state;

#[cfg(test)]
mod tests;

pub use api_error::{ApiError, Result as ApiResult};
pub use auth::BasicCredentials;
pub use cli::Cli;
pub use error::{Result as ServerErrorResult, ServerError};
pub use routes::{RouterOptions, build_router};
pub use server_state::ServerState;
