use crate::graph::models::Assignment;
use crate::graph::network::BayesNet;
use crate::inference::traversal::ancestors;
use log::debug;
use std::collections::HashSet;

/// Structural conditional independence of two variables.
///
/// A purely graphical criterion, equivalent to d-separation: take the
/// subgraph induced by the two variables, the givens and all their
/// ancestors; marry every pair of co-parents; forget edge directions;
/// delete the given variables. The variables are independent exactly when
/// no path connects them in what remains.
///
/// Only the keys of `givens` matter here; the observed values are
/// irrelevant to the graph criterion. All mutation happens on a private
/// subnet copy, so the shared network is untouched.
pub fn is_structurally_independent(
    net: &BayesNet,
    var1: &str,
    var2: &str,
    givens: Option<&Assignment>,
) -> bool {
    let mut seeds: HashSet<String> = HashSet::from([var1.to_string(), var2.to_string()]);
    if let Some(givens) = givens {
        seeds.extend(givens.keys().cloned());
    }

    // Ancestral closure of the seed set
    let mut retained = seeds.clone();
    for variable in &seeds {
        retained.extend(ancestors(net, variable));
    }
    let mut subnet = net.subnet(&retained);
    debug!(
        "independence check for '{}' and '{}' over {} retained variables",
        var1,
        var2,
        subnet.variables().len()
    );

    // Moralize: connect every pair of co-parents. Snapshot the parent sets
    // first so freshly added moral edges do not feed back into the walk.
    let parent_rows: Vec<Vec<String>> = subnet
        .variables()
        .iter()
        .map(|variable| subnet.parents(variable).into_iter().collect())
        .collect();
    for parents in &parent_rows {
        for (index, left) in parents.iter().enumerate() {
            for right in &parents[index + 1..] {
                subnet.link(left, right);
            }
        }
    }

    // Disorient, then condition out the givens
    subnet.make_bidirectional();
    if let Some(givens) = givens {
        for variable in givens.keys() {
            subnet.remove_variable(variable);
        }
    }

    subnet.find_path(var1, var2).is_none()
}

/// The minimum number of free parameters needed to specify the network.
///
/// Each CPT row over a variable with a domain of size d carries d - 1 free
/// entries, and there is one row per assignment of the parents.
pub fn number_of_parameters(net: &BayesNet) -> usize {
    net.variables()
        .iter()
        .map(|variable| {
            let rows: usize = net
                .parents(variable)
                .iter()
                .map(|parent| net.domain(parent).len())
                .product();
            (net.domain(variable).len() - 1) * rows.max(1)
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::models::Value;

    #[test]
    fn test_parameters_of_edgeless_binary_net() {
        let mut net = BayesNet::new();
        for name in ["A", "B", "C", "D"] {
            net.add_variable(name, vec![Value::Boolean(false), Value::Boolean(true)])
                .unwrap();
        }
        // One free parameter per variable
        assert_eq!(number_of_parameters(&net), 4);
    }

    #[test]
    fn test_parameters_count_parent_rows() {
        let mut net = BayesNet::new();
        net.add_variable("A", vec![Value::Boolean(false), Value::Boolean(true)])
            .unwrap();
        net.add_variable("B", vec![Value::Integer(1), Value::Integer(2), Value::Integer(3)])
            .unwrap();
        net.add_variable("C", vec![Value::Boolean(false), Value::Boolean(true)])
            .unwrap();
        net.add_edge("A", "C").unwrap();
        net.add_edge("B", "C").unwrap();
        // A: 1, B: 2, C: (2 - 1) * (2 * 3) = 6
        assert_eq!(number_of_parameters(&net), 9);
    }
}
