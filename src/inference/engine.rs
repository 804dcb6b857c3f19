use crate::graph::models::{Assignment, merged};
use crate::graph::network::BayesNet;
use crate::inference::InferenceError;
use crate::inference::givens::simplify_givens;
use std::collections::BTreeMap;

/// Two probabilities closer than this are treated as equal by
/// [`is_independent`].
const INDEPENDENCE_TOLERANCE: f64 = 1e-10;

/// Look up P(hypothesis | givens) directly in the network's tables.
///
/// The hypothesis must name exactly one variable. The givens are first
/// reduced via [`simplify_givens`]; if the network still cannot answer,
/// this fails with [`InferenceError::LookupFailure`].
pub fn probability_lookup(
    net: &BayesNet,
    hypothesis: &Assignment,
    givens: Option<&Assignment>,
) -> Result<f64, InferenceError> {
    let mut entries = hypothesis.iter();
    let (variable, value) = match (entries.next(), entries.next()) {
        (Some(entry), None) => entry,
        _ => {
            let mut names: Vec<&str> = hypothesis.keys().map(String::as_str).collect();
            names.sort_unstable();
            return Err(InferenceError::LookupFailure {
                variable: names.join(", "),
            });
        }
    };
    let simplified = simplify_givens(net, variable, givens);
    net.probability_entry(variable, value, simplified.as_ref())
        .ok_or_else(|| InferenceError::LookupFailure {
            variable: variable.clone(),
        })
}

/// P(hypothesis) by the chain rule.
///
/// Walks the variables in topological order, conditioning each hypothesis
/// entry on the entries already emitted. Topological order guarantees that
/// whenever a variable is reached, any of its parents contained in the
/// hypothesis are already in the accumulated givens, so each factor
/// collapses to P(variable | parents).
pub fn probability_joint(net: &BayesNet, hypothesis: &Assignment) -> Result<f64, InferenceError> {
    let mut conditioned = Assignment::new();
    let mut product = 1.0;
    for variable in net.topological_sort() {
        if let Some(value) = hypothesis.get(&variable) {
            let single = Assignment::from([(variable.clone(), value.clone())]);
            product *= probability_lookup(net, &single, Some(&conditioned))?;
            conditioned.insert(variable, value.clone());
        }
    }
    Ok(product)
}

/// P(hypothesis) as a sum of joint probabilities over every completion of
/// the hypothesis. An unsatisfiable hypothesis has probability zero.
pub fn probability_marginal(
    net: &BayesNet,
    hypothesis: &Assignment,
) -> Result<f64, InferenceError> {
    let mut total = 0.0;
    for completion in net.completions(hypothesis) {
        total += probability_joint(net, &completion)?;
    }
    Ok(total)
}

/// P(hypothesis | givens) as a ratio of marginals.
///
/// A hypothesis that contradicts the givens on a shared variable has
/// probability exactly zero, with no marginalization performed. A
/// conditioning event of probability zero is reported as
/// [`InferenceError::ZeroDenominator`] rather than dividing through.
pub fn probability_conditional(
    net: &BayesNet,
    hypothesis: &Assignment,
    givens: Option<&Assignment>,
) -> Result<f64, InferenceError> {
    let Some(givens) = givens else {
        return probability_marginal(net, hypothesis);
    };
    for (variable, value) in hypothesis {
        if givens.get(variable).is_some_and(|given| given != value) {
            return Ok(0.0);
        }
    }
    let denominator = probability_marginal(net, givens)?;
    if denominator == 0.0 {
        return Err(InferenceError::ZeroDenominator);
    }
    let numerator = probability_marginal(net, &merged(givens, hypothesis))?;
    Ok(numerator / denominator)
}

/// Compute any probability the network can express. Public entry point;
/// delegates to [`probability_conditional`].
pub fn probability(
    net: &BayesNet,
    hypothesis: &Assignment,
    givens: Option<&Assignment>,
) -> Result<f64, InferenceError> {
    probability_conditional(net, hypothesis, givens)
}

/// Numerical conditional independence of two variables.
///
/// True iff P(v1, v2 | givens) = P(v1 | givens) * P(v2 | givens) for every
/// pair of values in the two domains, to within a small tolerance.
pub fn is_independent(
    net: &BayesNet,
    var1: &str,
    var2: &str,
    givens: Option<&Assignment>,
) -> Result<bool, InferenceError> {
    for value1 in net.domain(var1) {
        for value2 in net.domain(var2) {
            let single1 = Assignment::from([(var1.to_string(), value1.clone())]);
            let single2 = Assignment::from([(var2.to_string(), value2.clone())]);
            let pair = merged(&single1, &single2);
            let joint = probability(net, &pair, givens)?;
            let split = probability(net, &single1, givens)? * probability(net, &single2, givens)?;
            if (joint - split).abs() > INDEPENDENCE_TOLERANCE {
                return Ok(false);
            }
        }
    }
    Ok(true)
}

/// The marginal distribution of every variable, keyed by variable name and
/// then by rendered value.
pub fn marginal_table(net: &BayesNet) -> Result<BTreeMap<String, BTreeMap<String, f64>>, InferenceError> {
    let mut table = BTreeMap::new();
    for variable in net.variables() {
        let mut distribution = BTreeMap::new();
        for value in net.domain(variable) {
            let single = Assignment::from([(variable.clone(), value.clone())]);
            distribution.insert(value.to_string(), probability_marginal(net, &single)?);
        }
        table.insert(variable.clone(), distribution);
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::models::{Value, assignment};

    fn single_coin() -> BayesNet {
        let mut net = BayesNet::new();
        net.add_variable("Coin", vec![Value::Boolean(false), Value::Boolean(true)])
            .unwrap();
        net.set_probability("Coin", Value::Boolean(true), &Assignment::new(), 0.25)
            .unwrap();
        net.set_probability("Coin", Value::Boolean(false), &Assignment::new(), 0.75)
            .unwrap();
        net
    }

    #[test]
    fn test_lookup_single_variable() {
        let net = single_coin();
        let hypothesis = assignment(&[("Coin", Value::Boolean(true))]);
        assert_eq!(probability_lookup(&net, &hypothesis, None).unwrap(), 0.25);
        // An empty accumulated givens map behaves like no givens at all
        let empty = Assignment::new();
        assert_eq!(
            probability_lookup(&net, &hypothesis, Some(&empty)).unwrap(),
            0.25
        );
    }

    #[test]
    fn test_lookup_rejects_multi_variable_hypotheses() {
        let mut net = single_coin();
        net.add_variable("Other", vec![Value::Boolean(false), Value::Boolean(true)])
            .unwrap();
        let hypothesis = assignment(&[
            ("Coin", Value::Boolean(true)),
            ("Other", Value::Boolean(true)),
        ]);
        assert!(matches!(
            probability_lookup(&net, &hypothesis, None),
            Err(InferenceError::LookupFailure { .. })
        ));
    }

    #[test]
    fn test_marginal_of_empty_hypothesis_is_one() {
        let net = single_coin();
        let total = probability_marginal(&net, &Assignment::new()).unwrap();
        assert!((total - 1.0).abs() < 1e-12);
    }
}
