use crate::graph::models::{Assignment, Value, assignment};
use crate::graph::network::{BayesNet, NetworkError};
use crate::scenarios::{ScenarioMaker, bernoulli_rows};

/// Cloudy -> Rain -> WetGrass, all boolean.
///
/// The numbers are chosen so the interesting marginals come out round:
/// P(Rain=true) = 0.5 and P(WetGrass=true) = 0.5.
pub struct WetChain {}

impl ScenarioMaker for WetChain {
    fn setup_scenario(&self) -> Result<BayesNet, NetworkError> {
        let mut net = BayesNet::new();
        let booleans = vec![Value::Boolean(false), Value::Boolean(true)];

        net.add_variable("Cloudy", booleans.clone())?;
        net.add_variable("Rain", booleans.clone())?;
        net.add_variable("WetGrass", booleans)?;
        net.add_edge("Cloudy", "Rain")?;
        net.add_edge("Rain", "WetGrass")?;

        bernoulli_rows(&mut net, "Cloudy", &[(Assignment::new(), 0.5)])?;
        bernoulli_rows(
            &mut net,
            "Rain",
            &[
                (assignment(&[("Cloudy", Value::Boolean(true))]), 0.8),
                (assignment(&[("Cloudy", Value::Boolean(false))]), 0.2),
            ],
        )?;
        bernoulli_rows(
            &mut net,
            "WetGrass",
            &[
                (assignment(&[("Rain", Value::Boolean(true))]), 0.9),
                (assignment(&[("Rain", Value::Boolean(false))]), 0.1),
            ],
        )?;

        net.validate()?;
        Ok(net)
    }
}
