pub mod alarm;
pub mod chain;
pub mod factory;
pub mod student;

use crate::graph::models::{Assignment, Value};
use crate::graph::network::{BayesNet, NetworkError};

// Re-export the factory for easy access
pub use factory::ScenarioMakerFactory;

/// Builds a named, ready-to-query example network.
pub trait ScenarioMaker {
    fn setup_scenario(&self) -> Result<BayesNet, NetworkError>;
}

/// Fill in both CPT entries of a boolean variable from the probability of
/// `true` per parent row.
pub(crate) fn bernoulli_rows(
    net: &mut BayesNet,
    variable: &str,
    rows: &[(Assignment, f64)],
) -> Result<(), NetworkError> {
    for (parent_row, p_true) in rows {
        net.set_probability(variable, Value::Boolean(true), parent_row, *p_true)?;
        net.set_probability(variable, Value::Boolean(false), parent_row, 1.0 - p_true)?;
    }
    Ok(())
}
