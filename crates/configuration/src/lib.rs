pub mod bridge_settings;
pub mod configuration;
pub mod connection_settings;
pub mod environment;
pub mod error;
pub mod to_runtime_configuration;
pub mod values;
pub mod version1;

pub use bridge_settings::BridgeSettings;
pub use configuration::{Backend, Configuration};
pub use connection_settings::DatabaseConnectionSettings;
pub use values::{ConnectionUri, PoolSettings, Secret};
pub use version1::{parse_configuration, write_parsed_configuration, ParsedConfiguration};

pub use to_runtime_configuration::make_runtime_configuration;
