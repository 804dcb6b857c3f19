pub mod engine;
pub mod givens;
pub mod structure;
pub mod traversal;

use thiserror::Error;

/// Errors surfaced by the probability engine.
///
/// An unsatisfiable hypothesis is not an error: marginalizing over an empty
/// completion set yields probability zero. Failures are never retried; each
/// one propagates directly to the caller.
#[derive(Error, Debug)]
pub enum InferenceError {
    /// The network has no stored probability for the query, either because
    /// the givens could not be reduced to the variable's parents or because
    /// the table holds no entry for that value combination.
    #[error("no probability stored for '{variable}' under the supplied givens")]
    LookupFailure { variable: String },

    /// The conditioning event itself has probability zero, so the
    /// conditional is undefined.
    #[error("conditioning event has probability zero")]
    ZeroDenominator,
}

// Re-export the engine's public operations for easy access
pub use engine::{
    is_independent, marginal_table, probability, probability_conditional, probability_joint,
    probability_lookup, probability_marginal,
};
pub use givens::simplify_givens;
pub use structure::{is_structurally_independent, number_of_parameters};
pub use traversal::{ancestors, descendants, nondescendants};
