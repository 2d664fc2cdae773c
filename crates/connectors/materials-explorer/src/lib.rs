pub mod bridge;
pub mod error;
pub mod export;
pub mod routes;
pub mod state;
