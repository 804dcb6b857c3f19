use crate::graph::network::BayesNet;
use std::collections::{BTreeSet, HashSet};

/// All variables reachable from `variable` by repeatedly following parent
/// edges, excluding `variable` itself. Empty for names not in the network.
pub fn ancestors(net: &BayesNet, variable: &str) -> HashSet<String> {
    walk(net, variable, BayesNet::parents)
}

/// All variables reachable from `variable` by repeatedly following child
/// edges, excluding `variable` itself. Empty for names not in the network.
pub fn descendants(net: &BayesNet, variable: &str) -> HashSet<String> {
    walk(net, variable, BayesNet::children)
}

/// Every variable that is neither `variable` itself nor one of its
/// descendants.
pub fn nondescendants(net: &BayesNet, variable: &str) -> HashSet<String> {
    let below = descendants(net, variable);
    net.variables()
        .iter()
        .filter(|name| *name != variable && !below.contains(*name))
        .cloned()
        .collect()
}

// Worklist reachability; bounded because the graph is finite and acyclic.
fn walk(
    net: &BayesNet,
    variable: &str,
    neighbors: fn(&BayesNet, &str) -> BTreeSet<String>,
) -> HashSet<String> {
    let mut reached = HashSet::new();
    let mut pending: Vec<String> = neighbors(net, variable).into_iter().collect();
    while let Some(current) = pending.pop() {
        if reached.insert(current.clone()) {
            pending.extend(neighbors(net, &current));
        }
    }
    reached
}
