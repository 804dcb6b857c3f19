use crate::graph::models::{Assignment, Value};
use crate::graph::subnet::Subnet;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use thiserror::Error;

/// Errors raised while constructing or validating a network.
#[derive(Error, Debug)]
pub enum NetworkError {
    #[error("variable '{0}' is already defined")]
    DuplicateVariable(String),

    #[error("unknown variable '{0}'")]
    UnknownVariable(String),

    #[error("variable '{0}' must have a non-empty domain")]
    EmptyDomain(String),

    #[error("domain of '{variable}' repeats the value {value}")]
    DuplicateValue { variable: String, value: Value },

    #[error("edge {0} -> {0} would be a self-loop")]
    SelfLoop(String),

    #[error("edge {parent} -> {child} would create a cycle")]
    CycleDetected { parent: String, child: String },

    #[error("value {value} is not in the domain of '{variable}'")]
    ValueNotInDomain { variable: String, value: Value },

    #[error("CPT row for '{variable}' must assign exactly its parents {parents:?}")]
    ParentMismatch {
        variable: String,
        parents: Vec<String>,
    },

    #[error("probability {0} is outside [0, 1]")]
    InvalidProbability(f64),

    #[error("CPT for '{variable}' is missing an entry for row {row:?}")]
    IncompleteCpt {
        variable: String,
        row: Vec<(String, Value)>,
    },

    #[error("CPT row {row:?} for '{variable}' sums to {sum} instead of 1")]
    UnnormalizedCpt {
        variable: String,
        row: Vec<(String, Value)>,
        sum: f64,
    },

    #[error("unknown scenario '{0}'")]
    UnknownScenario(String),
}

/// Tolerance used when checking that a CPT row sums to one.
const ROW_SUM_TOLERANCE: f64 = 1e-9;

/// A CPT row is keyed by the variable's own value plus a canonical
/// (sorted) assignment of its parents.
type CptKey = (Value, BTreeMap<String, Value>);

#[derive(Debug, Clone)]
struct VariableNode {
    domain: Vec<Value>,
    parents: BTreeSet<String>,
    children: BTreeSet<String>,
    cpt: HashMap<CptKey, f64>,
}

/// A discrete Bayesian network: a DAG of named variables, each owning a
/// conditional probability table over its parents.
///
/// Acyclicity is a construction invariant: `add_edge` refuses any edge that
/// would close a cycle, so `topological_sort` never fails. The network is
/// read-only once built as far as the inference layer is concerned.
#[derive(Debug, Clone, Default)]
pub struct BayesNet {
    nodes: HashMap<String, VariableNode>,
    /// Insertion order; keeps iteration and enumeration deterministic.
    order: Vec<String>,
}

impl BayesNet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new variable with the given domain of possible values.
    pub fn add_variable(&mut self, name: &str, domain: Vec<Value>) -> Result<(), NetworkError> {
        if self.nodes.contains_key(name) {
            return Err(NetworkError::DuplicateVariable(name.to_string()));
        }
        if domain.is_empty() {
            return Err(NetworkError::EmptyDomain(name.to_string()));
        }
        let mut seen = HashSet::new();
        for value in &domain {
            if !seen.insert(value) {
                return Err(NetworkError::DuplicateValue {
                    variable: name.to_string(),
                    value: value.clone(),
                });
            }
        }
        self.nodes.insert(
            name.to_string(),
            VariableNode {
                domain,
                parents: BTreeSet::new(),
                children: BTreeSet::new(),
                cpt: HashMap::new(),
            },
        );
        self.order.push(name.to_string());
        Ok(())
    }

    /// Add a directed edge from `parent` to `child`.
    ///
    /// Fails if either endpoint is unknown, the edge is a self-loop, or the
    /// edge would close a cycle.
    pub fn add_edge(&mut self, parent: &str, child: &str) -> Result<(), NetworkError> {
        if !self.nodes.contains_key(parent) {
            return Err(NetworkError::UnknownVariable(parent.to_string()));
        }
        if !self.nodes.contains_key(child) {
            return Err(NetworkError::UnknownVariable(child.to_string()));
        }
        if parent == child {
            return Err(NetworkError::SelfLoop(parent.to_string()));
        }
        // The new edge closes a cycle exactly when `parent` is already
        // reachable from `child` along child edges.
        if self.reachable_via_children(child, parent) {
            return Err(NetworkError::CycleDetected {
                parent: parent.to_string(),
                child: child.to_string(),
            });
        }
        self.nodes
            .get_mut(parent)
            .expect("checked above")
            .children
            .insert(child.to_string());
        self.nodes
            .get_mut(child)
            .expect("checked above")
            .parents
            .insert(parent.to_string());
        Ok(())
    }

    fn reachable_via_children(&self, from: &str, target: &str) -> bool {
        let mut seen = HashSet::new();
        let mut stack = vec![from.to_string()];
        while let Some(current) = stack.pop() {
            if current == target {
                return true;
            }
            if seen.insert(current.clone()) {
                if let Some(node) = self.nodes.get(&current) {
                    stack.extend(node.children.iter().cloned());
                }
            }
        }
        false
    }

    /// Store one CPT entry: P(`variable` = `value` | `parent_row`).
    ///
    /// `parent_row` must assign exactly the variable's parents.
    pub fn set_probability(
        &mut self,
        variable: &str,
        value: Value,
        parent_row: &Assignment,
        probability: f64,
    ) -> Result<(), NetworkError> {
        if !(0.0..=1.0).contains(&probability) {
            return Err(NetworkError::InvalidProbability(probability));
        }
        let node = self
            .nodes
            .get(variable)
            .ok_or_else(|| NetworkError::UnknownVariable(variable.to_string()))?;
        if !node.domain.contains(&value) {
            return Err(NetworkError::ValueNotInDomain {
                variable: variable.to_string(),
                value,
            });
        }
        let given: BTreeSet<String> = parent_row.keys().cloned().collect();
        if given != node.parents {
            return Err(NetworkError::ParentMismatch {
                variable: variable.to_string(),
                parents: node.parents.iter().cloned().collect(),
            });
        }
        for (parent, parent_value) in parent_row {
            let parent_node = self
                .nodes
                .get(parent)
                .ok_or_else(|| NetworkError::UnknownVariable(parent.clone()))?;
            if !parent_node.domain.contains(parent_value) {
                return Err(NetworkError::ValueNotInDomain {
                    variable: parent.clone(),
                    value: parent_value.clone(),
                });
            }
        }
        let key = (value, parent_row.iter().map(|(k, v)| (k.clone(), v.clone())).collect());
        self.nodes
            .get_mut(variable)
            .expect("checked above")
            .cpt
            .insert(key, probability);
        Ok(())
    }

    /// Check that every variable's CPT is complete and that each row is a
    /// probability distribution over the variable's domain.
    pub fn validate(&self) -> Result<(), NetworkError> {
        for variable in &self.order {
            let node = &self.nodes[variable];
            for row in self.parent_rows(&node.parents) {
                let mut sum = 0.0;
                for value in &node.domain {
                    let key = (value.clone(), row.clone());
                    match node.cpt.get(&key) {
                        Some(p) => sum += p,
                        None => {
                            return Err(NetworkError::IncompleteCpt {
                                variable: variable.clone(),
                                row: row.into_iter().collect(),
                            });
                        }
                    }
                }
                if (sum - 1.0).abs() > ROW_SUM_TOLERANCE {
                    return Err(NetworkError::UnnormalizedCpt {
                        variable: variable.clone(),
                        row: row.into_iter().collect(),
                        sum,
                    });
                }
            }
        }
        Ok(())
    }

    /// Every assignment of values to the given parent set, in domain order.
    fn parent_rows(&self, parents: &BTreeSet<String>) -> Vec<BTreeMap<String, Value>> {
        let mut rows = vec![BTreeMap::new()];
        for parent in parents {
            let domain = &self.nodes[parent].domain;
            let mut extended = Vec::with_capacity(rows.len() * domain.len());
            for row in &rows {
                for value in domain {
                    let mut next = row.clone();
                    next.insert(parent.clone(), value.clone());
                    extended.push(next);
                }
            }
            rows = extended;
        }
        rows
    }

    /// All variable names, in insertion order.
    pub fn variables(&self) -> &[String] {
        &self.order
    }

    pub fn contains(&self, variable: &str) -> bool {
        self.nodes.contains_key(variable)
    }

    /// The domain of a variable; empty for unknown names.
    pub fn domain(&self, variable: &str) -> &[Value] {
        self.nodes
            .get(variable)
            .map(|node| node.domain.as_slice())
            .unwrap_or(&[])
    }

    /// The direct parents of a variable; empty for unknown names.
    pub fn parents(&self, variable: &str) -> BTreeSet<String> {
        self.nodes
            .get(variable)
            .map(|node| node.parents.clone())
            .unwrap_or_default()
    }

    /// The direct children of a variable; empty for unknown names.
    pub fn children(&self, variable: &str) -> BTreeSet<String> {
        self.nodes
            .get(variable)
            .map(|node| node.children.clone())
            .unwrap_or_default()
    }

    /// A sequence of all variables in which every parent precedes each of
    /// its children. Deterministic: ties are broken by insertion order.
    pub fn topological_sort(&self) -> Vec<String> {
        let mut indegree: HashMap<&String, usize> = self
            .order
            .iter()
            .map(|name| (name, self.nodes[name].parents.len()))
            .collect();
        let mut sorted = Vec::with_capacity(self.order.len());
        let mut emitted: HashSet<&String> = HashSet::new();
        while sorted.len() < self.order.len() {
            for name in &self.order {
                if !emitted.contains(name) && indegree[name] == 0 {
                    emitted.insert(name);
                    sorted.push(name.clone());
                    for child in &self.nodes[name].children {
                        if let Some(count) = indegree.get_mut(child) {
                            *count -= 1;
                        }
                    }
                }
            }
        }
        sorted
    }

    /// Look up a stored CPT entry for P(`variable` = `value` | `givens`).
    ///
    /// Answers only when the givens assign exactly the variable's parents;
    /// `None` is the "no such probability" signal.
    pub fn probability_entry(
        &self,
        variable: &str,
        value: &Value,
        givens: Option<&Assignment>,
    ) -> Option<f64> {
        let node = self.nodes.get(variable)?;
        let row: BTreeMap<String, Value> = match givens {
            Some(givens) => givens.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
            None => BTreeMap::new(),
        };
        let given_names: BTreeSet<String> = row.keys().cloned().collect();
        if given_names != node.parents {
            return None;
        }
        node.cpt.get(&(value.clone(), row)).copied()
    }

    /// Lazily enumerate every full assignment to all variables that agrees
    /// with `partial` on the variables it fixes.
    ///
    /// The enumeration is empty when `partial` names an unknown variable or
    /// an out-of-domain value: such a hypothesis is unsatisfiable.
    pub fn completions(&self, partial: &Assignment) -> Completions<'_> {
        let satisfiable = partial
            .iter()
            .all(|(variable, value)| self.domain(variable).contains(value));
        let free: Vec<String> = self
            .order
            .iter()
            .filter(|name| !partial.contains_key(*name))
            .cloned()
            .collect();
        Completions {
            net: self,
            indices: vec![0; free.len()],
            free,
            fixed: partial.clone(),
            exhausted: !satisfiable,
        }
    }

    /// The subgraph induced by `keep`: those variables plus every original
    /// edge whose endpoints both survive. The result is an independent copy.
    pub fn subnet(&self, keep: &HashSet<String>) -> Subnet {
        let retained: Vec<String> = self
            .order
            .iter()
            .filter(|name| keep.contains(*name))
            .cloned()
            .collect();
        let mut subnet = Subnet::new(retained.clone());
        for name in &retained {
            for child in &self.nodes[name].children {
                if keep.contains(child) {
                    subnet.link(name, child);
                }
            }
        }
        subnet
    }
}

/// Iterator over the full assignments consistent with a partial one.
///
/// Works like an odometer over the free variables' domains; restartable by
/// calling [`BayesNet::completions`] again.
pub struct Completions<'a> {
    net: &'a BayesNet,
    free: Vec<String>,
    indices: Vec<usize>,
    fixed: Assignment,
    exhausted: bool,
}

impl Iterator for Completions<'_> {
    type Item = Assignment;

    fn next(&mut self) -> Option<Assignment> {
        if self.exhausted {
            return None;
        }
        let mut full = self.fixed.clone();
        for (name, &index) in self.free.iter().zip(self.indices.iter()) {
            full.insert(name.clone(), self.net.domain(name)[index].clone());
        }
        // Advance the odometer, least-significant position last.
        let mut position = self.free.len();
        loop {
            if position == 0 {
                self.exhausted = true;
                break;
            }
            position -= 1;
            self.indices[position] += 1;
            if self.indices[position] < self.net.domain(&self.free[position]).len() {
                break;
            }
            self.indices[position] = 0;
        }
        Some(full)
    }
}
