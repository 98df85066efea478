pub mod auth;
pub mod client;
pub mod error;
pub mod types;

pub use auth::{ClientCredentials, TokenProvider, TokenSource};
pub use client::{VehicleHistoryClient, VehicleLookup};
pub use error::{AuthError, DvsaError};
pub use types::{MotTest, TokenResponse, VehicleHistory};
