#[cfg(test)]
mod test_probability {
    use beliefnet::graph::models::{Assignment, Value, assignment};
    use beliefnet::graph::network::BayesNet;
    use beliefnet::inference::engine::{
        marginal_table, probability, probability_joint, probability_lookup, probability_marginal,
    };
    use beliefnet::inference::givens::simplify_givens;
    use beliefnet::inference::InferenceError;
    use beliefnet::scenarios::ScenarioMakerFactory;

    fn build(name: &str) -> BayesNet {
        ScenarioMakerFactory::new_shared(name)
            .unwrap()
            .setup_scenario()
            .unwrap()
    }

    fn close(left: f64, right: f64) -> bool {
        (left - right).abs() < 1e-9
    }

    #[test]
    fn test_chain_joint_probability() {
        let net = build("wet_chain");
        let all_true = assignment(&[
            ("Cloudy", Value::Boolean(true)),
            ("Rain", Value::Boolean(true)),
            ("WetGrass", Value::Boolean(true)),
        ]);
        // 0.5 * 0.8 * 0.9
        assert!(close(probability_joint(&net, &all_true).unwrap(), 0.36));
    }

    #[test]
    fn test_chain_marginals() {
        let net = build("wet_chain");
        let rain = assignment(&[("Rain", Value::Boolean(true))]);
        let wet = assignment(&[("WetGrass", Value::Boolean(true))]);
        assert!(close(probability_marginal(&net, &rain).unwrap(), 0.5));
        assert!(close(probability_marginal(&net, &wet).unwrap(), 0.5));
        // Marginalizing over everything sums the whole joint to one
        assert!(close(
            probability_marginal(&net, &Assignment::new()).unwrap(),
            1.0
        ));
    }

    #[test]
    fn test_chain_conditional_inverts_the_edge() {
        let net = build("wet_chain");
        let cloudy = assignment(&[("Cloudy", Value::Boolean(true))]);
        let rain = assignment(&[("Rain", Value::Boolean(true))]);
        // P(Cloudy | Rain) = 0.5 * 0.8 / 0.5
        assert!(close(
            probability(&net, &cloudy, Some(&rain)).unwrap(),
            0.8
        ));
    }

    #[test]
    fn test_chain_rule_consistency_on_full_assignments() {
        let net = build("wet_chain");
        for completion in net.completions(&Assignment::new()) {
            let expected = probability_joint(&net, &completion).unwrap();

            // Multiply the factors out by hand, conditioning each variable
            // on its topological predecessors
            let mut product = 1.0;
            let mut predecessors = Assignment::new();
            for variable in net.topological_sort() {
                let value = completion[&variable].clone();
                let single = Assignment::from([(variable.clone(), value.clone())]);
                product *= probability_lookup(&net, &single, Some(&predecessors)).unwrap();
                predecessors.insert(variable, value);
            }
            assert!(close(product, expected));
        }
    }

    #[test]
    fn test_sum_over_free_variable_matches_marginal() {
        let net = build("wet_chain");
        let partial = assignment(&[
            ("Cloudy", Value::Boolean(true)),
            ("Rain", Value::Boolean(true)),
        ]);
        let mut summed = 0.0;
        for value in [false, true] {
            let mut full = partial.clone();
            full.insert("WetGrass".to_string(), Value::Boolean(value));
            summed += probability_joint(&net, &full).unwrap();
        }
        assert!(close(
            summed,
            probability_marginal(&net, &partial).unwrap()
        ));
    }

    #[test]
    fn test_conflicting_givens_give_zero_without_failing() {
        let net = build("wet_chain");
        let hypothesis = assignment(&[("Rain", Value::Boolean(true))]);
        let givens = assignment(&[("Rain", Value::Boolean(false))]);
        assert_eq!(probability(&net, &hypothesis, Some(&givens)).unwrap(), 0.0);
    }

    #[test]
    fn test_simplify_keeps_only_parents() {
        let net = build("wet_chain");
        let givens = assignment(&[
            ("Cloudy", Value::Boolean(false)),
            ("Rain", Value::Boolean(true)),
        ]);
        let simplified = simplify_givens(&net, "WetGrass", Some(&givens)).unwrap();
        assert_eq!(simplified, assignment(&[("Rain", Value::Boolean(true))]));
    }

    #[test]
    fn test_lookup_fails_when_givens_cannot_be_simplified() {
        let net = build("wet_chain");
        let hypothesis = assignment(&[("WetGrass", Value::Boolean(true))]);
        // Cloudy is neither WetGrass's parent nor droppable without one
        let givens = assignment(&[("Cloudy", Value::Boolean(true))]);
        assert!(matches!(
            probability_lookup(&net, &hypothesis, Some(&givens)),
            Err(InferenceError::LookupFailure { .. })
        ));
    }

    #[test]
    fn test_unsatisfiable_hypothesis_has_zero_marginal() {
        let net = build("wet_chain");
        let impossible = assignment(&[("Cloudy", Value::Integer(3))]);
        assert_eq!(probability_marginal(&net, &impossible).unwrap(), 0.0);
    }

    #[test]
    fn test_conditioning_on_impossible_event_fails() {
        let mut net = BayesNet::new();
        let booleans = vec![Value::Boolean(false), Value::Boolean(true)];
        net.add_variable("Sure", booleans.clone()).unwrap();
        net.add_variable("Coin", booleans).unwrap();
        let empty = Assignment::new();
        net.set_probability("Sure", Value::Boolean(true), &empty, 1.0)
            .unwrap();
        net.set_probability("Sure", Value::Boolean(false), &empty, 0.0)
            .unwrap();
        net.set_probability("Coin", Value::Boolean(true), &empty, 0.5)
            .unwrap();
        net.set_probability("Coin", Value::Boolean(false), &empty, 0.5)
            .unwrap();

        let hypothesis = assignment(&[("Coin", Value::Boolean(true))]);
        let givens = assignment(&[("Sure", Value::Boolean(false))]);
        assert!(matches!(
            probability(&net, &hypothesis, Some(&givens)),
            Err(InferenceError::ZeroDenominator)
        ));
    }

    #[test]
    fn test_student_marginals() {
        let net = build("student");
        let best_grade = assignment(&[("Grade", Value::Integer(1))]);
        let strong_letter = assignment(&[("Letter", Value::Boolean(true))]);
        let good_sat = assignment(&[("SAT", Value::Boolean(true))]);
        assert!(close(probability_marginal(&net, &best_grade).unwrap(), 0.362));
        assert!(close(
            probability_marginal(&net, &strong_letter).unwrap(),
            0.502336
        ));
        assert!(close(probability_marginal(&net, &good_sat).unwrap(), 0.275));
    }

    #[test]
    fn test_student_conditional() {
        let net = build("student");
        let intelligent = assignment(&[("Intelligence", Value::Boolean(true))]);
        let good_sat = assignment(&[("SAT", Value::Boolean(true))]);
        // P(I | S) = 0.3 * 0.8 / 0.275
        assert!(close(
            probability(&net, &intelligent, Some(&good_sat)).unwrap(),
            0.24 / 0.275
        ));
    }

    #[test]
    fn test_marginal_table_covers_every_value() {
        let net = build("wet_chain");
        let table = marginal_table(&net).unwrap();
        assert_eq!(table.len(), 3);
        assert!(close(table["Rain"]["true"], 0.5));
        assert!(close(table["Rain"]["false"], 0.5));
        for distribution in table.values() {
            let total: f64 = distribution.values().sum();
            assert!(close(total, 1.0));
        }
    }
}
