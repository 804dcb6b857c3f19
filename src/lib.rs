pub mod graph;
pub mod inference;
pub mod scenarios;
pub mod setup;

// Re-export key types
pub use graph::models::{Assignment, Value};
pub use graph::network::{BayesNet, NetworkError};
pub use inference::InferenceError;
pub use scenarios::ScenarioMakerFactory;
