use crate::graph::models::{Assignment, Value, assignment};
use crate::graph::network::{BayesNet, NetworkError};
use crate::scenarios::{ScenarioMaker, bernoulli_rows};

/// The student network of Koller & Friedman.
///
/// Difficulty and Intelligence feed Grade (a three-valued variable, 1 being
/// the best grade), Intelligence alone feeds SAT, and Grade alone feeds
/// Letter. Exercises a non-binary domain.
pub struct Student {}

impl ScenarioMaker for Student {
    fn setup_scenario(&self) -> Result<BayesNet, NetworkError> {
        let mut net = BayesNet::new();
        let booleans = vec![Value::Boolean(false), Value::Boolean(true)];
        let grades = vec![Value::Integer(1), Value::Integer(2), Value::Integer(3)];

        net.add_variable("Difficulty", booleans.clone())?;
        net.add_variable("Intelligence", booleans.clone())?;
        net.add_variable("Grade", grades)?;
        net.add_variable("SAT", booleans.clone())?;
        net.add_variable("Letter", booleans)?;
        net.add_edge("Difficulty", "Grade")?;
        net.add_edge("Intelligence", "Grade")?;
        net.add_edge("Intelligence", "SAT")?;
        net.add_edge("Grade", "Letter")?;

        bernoulli_rows(&mut net, "Difficulty", &[(Assignment::new(), 0.4)])?;
        bernoulli_rows(&mut net, "Intelligence", &[(Assignment::new(), 0.3)])?;

        // Grade rows: (intelligence, difficulty) -> distribution over 1..3
        let grade_rows: [(bool, bool, [f64; 3]); 4] = [
            (false, false, [0.3, 0.4, 0.3]),
            (false, true, [0.05, 0.25, 0.7]),
            (true, false, [0.9, 0.08, 0.02]),
            (true, true, [0.5, 0.3, 0.2]),
        ];
        for (intelligent, difficult, distribution) in grade_rows {
            let row = assignment(&[
                ("Intelligence", Value::Boolean(intelligent)),
                ("Difficulty", Value::Boolean(difficult)),
            ]);
            for (index, p) in distribution.into_iter().enumerate() {
                net.set_probability("Grade", Value::Integer(index as i64 + 1), &row, p)?;
            }
        }

        bernoulli_rows(
            &mut net,
            "SAT",
            &[
                (assignment(&[("Intelligence", Value::Boolean(true))]), 0.8),
                (assignment(&[("Intelligence", Value::Boolean(false))]), 0.05),
            ],
        )?;
        bernoulli_rows(
            &mut net,
            "Letter",
            &[
                (assignment(&[("Grade", Value::Integer(1))]), 0.9),
                (assignment(&[("Grade", Value::Integer(2))]), 0.6),
                (assignment(&[("Grade", Value::Integer(3))]), 0.01),
            ],
        )?;

        net.validate()?;
        Ok(net)
    }
}
