pub mod models;
pub mod network;
pub mod subnet;

// Re-export key types
pub use models::{Assignment, Value};
pub use network::{BayesNet, NetworkError};
pub use subnet::Subnet;
