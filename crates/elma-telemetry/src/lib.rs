pub mod loader;
pub mod subscriber;

pub use loader::{load_config, ConfigFormat};
pub use subscriber::{init_subscriber, TelemetryConfig};
