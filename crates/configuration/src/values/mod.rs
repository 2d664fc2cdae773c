mod connection_uri;
mod pool_settings;
mod secret;

pub use connection_uri::ConnectionUri;
pub use pool_settings::PoolSettings;
pub use secret::{Secret, Variable};
