use crate::graph::models::Assignment;
use crate::graph::network::BayesNet;
use crate::inference::traversal::descendants;
use log::debug;

/// Reduce a conditioning set to the smallest equivalent one for `variable`.
///
/// When every parent of `variable` is given and no descendant is given, the
/// local Markov property lets us drop every non-parent entry: `variable` is
/// conditionally independent of its non-descendants given its parents. If
/// that precondition does not hold the givens are returned unchanged, and a
/// later table lookup may legitimately fail.
///
/// The caller's map is never modified.
pub fn simplify_givens(
    net: &BayesNet,
    variable: &str,
    givens: Option<&Assignment>,
) -> Option<Assignment> {
    let givens = givens?;
    let below = descendants(net, variable);
    let parents = net.parents(variable);
    let conditioned_on_descendant = givens.keys().any(|name| below.contains(name));
    let all_parents_given = parents.iter().all(|parent| givens.contains_key(parent));
    if conditioned_on_descendant || !all_parents_given {
        return Some(givens.clone());
    }
    let simplified: Assignment = givens
        .iter()
        .filter(|(name, _)| parents.contains(*name))
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect();
    if simplified.len() < givens.len() {
        debug!(
            "dropped {} non-parent givens for '{}'",
            givens.len() - simplified.len(),
            variable
        );
    }
    Some(simplified)
}
