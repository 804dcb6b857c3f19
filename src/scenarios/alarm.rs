use crate::graph::models::{Assignment, Value, assignment};
use crate::graph::network::{BayesNet, NetworkError};
use crate::scenarios::{ScenarioMaker, bernoulli_rows};

/// Pearl's burglar-alarm network.
///
/// Burglary and Earthquake are independent causes of Alarm; JohnCalls and
/// MaryCalls each depend only on Alarm. Every CPT entry is strictly
/// positive, which makes this net a good fixture for comparing structural
/// against numerical independence.
pub struct Alarm {}

impl ScenarioMaker for Alarm {
    fn setup_scenario(&self) -> Result<BayesNet, NetworkError> {
        let mut net = BayesNet::new();
        let booleans = vec![Value::Boolean(false), Value::Boolean(true)];

        for name in ["Burglary", "Earthquake", "Alarm", "JohnCalls", "MaryCalls"] {
            net.add_variable(name, booleans.clone())?;
        }
        net.add_edge("Burglary", "Alarm")?;
        net.add_edge("Earthquake", "Alarm")?;
        net.add_edge("Alarm", "JohnCalls")?;
        net.add_edge("Alarm", "MaryCalls")?;

        bernoulli_rows(&mut net, "Burglary", &[(Assignment::new(), 0.001)])?;
        bernoulli_rows(&mut net, "Earthquake", &[(Assignment::new(), 0.002)])?;
        bernoulli_rows(
            &mut net,
            "Alarm",
            &[
                (
                    assignment(&[
                        ("Burglary", Value::Boolean(true)),
                        ("Earthquake", Value::Boolean(true)),
                    ]),
                    0.95,
                ),
                (
                    assignment(&[
                        ("Burglary", Value::Boolean(true)),
                        ("Earthquake", Value::Boolean(false)),
                    ]),
                    0.94,
                ),
                (
                    assignment(&[
                        ("Burglary", Value::Boolean(false)),
                        ("Earthquake", Value::Boolean(true)),
                    ]),
                    0.29,
                ),
                (
                    assignment(&[
                        ("Burglary", Value::Boolean(false)),
                        ("Earthquake", Value::Boolean(false)),
                    ]),
                    0.001,
                ),
            ],
        )?;
        bernoulli_rows(
            &mut net,
            "JohnCalls",
            &[
                (assignment(&[("Alarm", Value::Boolean(true))]), 0.9),
                (assignment(&[("Alarm", Value::Boolean(false))]), 0.05),
            ],
        )?;
        bernoulli_rows(
            &mut net,
            "MaryCalls",
            &[
                (assignment(&[("Alarm", Value::Boolean(true))]), 0.7),
                (assignment(&[("Alarm", Value::Boolean(false))]), 0.01),
            ],
        )?;

        net.validate()?;
        Ok(net)
    }
}
