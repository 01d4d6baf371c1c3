// Main library file for the travel site API

// Static data, filtering and the response envelope
pub mod dataset;
pub mod envelope;
pub mod filter;

// Mock backends and the HTTP surface
pub mod config;
pub mod error;
pub mod mocks;
pub mod routes;
pub mod server;
pub mod state;

// Re-export key types for convenience
pub use config::ServerConfig;
pub use dataset::{Accommodation, AccommodationType, Dataset, Package};
pub use envelope::{ApiResponse, ErrorBody, ErrorCode};
pub use error::{ApiError, ConfigError, DatasetError};
pub use filter::{find_by_id, first_values, non_empty, AccommodationFilter, PriceBound};
pub use mocks::{Clock, PaymentGateway, PaymentResponse, SeatSource};
pub use routes::router;
pub use server::{app, start_server};
pub use state::AppState;
