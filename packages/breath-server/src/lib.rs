pub mod cli;
pub mod config;
pub mod error;
pub mod handlers;
pub mod output;
pub mod router;
pub mod state;

pub use config::ServerConfig;
pub use error::ApiError;
pub use router::create_router;
pub use state::ServerState;
