// Infrastructure layer (shared components)
pub mod infrastructure;

pub use infrastructure::config;
pub use infrastructure::error;
pub use infrastructure::metrics;

// Domain layer
pub mod notification;
pub mod session;

// Application layer
pub mod api;
pub mod server;
pub mod sse;

// Supporting modules
pub mod shutdown;
pub mod telemetry;
