//! Dependency resolution for a selection of variables.
//!
//! The resolver decides which variables take part in a model,
//! how each input of each process is read and in which order the variables are computed.
//!
//! # Activity
//!
//! A variable with a toggle is active only while the boolean external parameter of that name is
//! `true`. A disabled variable with a fallback value still takes part in the model
//! as a static constant equal to the fallback. A disabled variable without a fallback is pruned.
//! Static variables are never disabled.
//!
//! # Inputs
//!
//! Each input name of an active process is resolved as follows:
//!
//! | Refers to | Read from | Ordering edge |
//! |---|---|---|
//! | dynamic variable | timestep being computed | yes |
//! | state variable, including itself | previous timestep | no |
//! | static variable or fallback constant | previous timestep (constant) | no |
//! | external parameter | parameter namespace | no |
//! | pruned variable | [`ClearwaterError::InactiveDependency`] | |
//! | anything else | [`ClearwaterError::UnresolvedDependency`] | |
//!
//! A variable shadows an external parameter with the same name.
//!
//! # Order
//!
//! Variables are sorted topologically over the same-timestep edges.
//! Among the variables that are ready to be computed, statics come before dynamics,
//! dynamics before states, and otherwise declaration order is kept.
//! The order is therefore fully deterministic for a given declaration order.

use crate::errors::{ClearwaterError, ClearwaterResult};
use crate::parameters::Parameters;
use crate::variable::{Usage, VariableDescriptor};
use indexmap::IndexMap;
use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Graph of same-timestep dependencies
///
/// Nodes are variable names and edges point from producer to consumer,
/// labelled with the name of the input.
pub type DependencyGraph = DiGraph<String, String>;

/// Where a process input is read from
#[derive(Debug, Clone, PartialEq)]
pub enum InputRef {
    /// A dynamic variable computed earlier in the same timestep
    Current(String),
    /// A state or static variable at the previous timestep
    Previous(String),
    /// An external parameter
    External { name: String, value: f64 },
}

impl InputRef {
    pub fn name(&self) -> &str {
        match self {
            InputRef::Current(name) | InputRef::Previous(name) => name,
            InputRef::External { name, .. } => name,
        }
    }
}

/// A variable taking part in a model
#[derive(Debug, Clone)]
pub struct ResolvedVariable {
    descriptor: Arc<VariableDescriptor>,
    usage: Usage,
    inputs: Vec<InputRef>,
    active: bool,
}

impl ResolvedVariable {
    pub fn name(&self) -> &str {
        self.descriptor.name()
    }

    pub fn descriptor(&self) -> &Arc<VariableDescriptor> {
        &self.descriptor
    }

    /// Usage within the model
    ///
    /// Disabled variables with a fallback are static regardless of their declared usage.
    pub fn usage(&self) -> Usage {
        self.usage
    }

    /// Resolved process inputs in declared order, empty for statics
    pub fn inputs(&self) -> &[InputRef] {
        &self.inputs
    }

    /// Whether the variable is enabled
    ///
    /// `false` for disabled variables that are replaced by their fallback value.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Constant value used while the variable is disabled
    pub fn fallback(&self) -> Option<f64> {
        match self.active {
            true => None,
            false => self.descriptor.fallback(),
        }
    }
}

/// Result of resolving the dependencies of a selection of variables
#[derive(Debug, Clone)]
pub struct Resolution {
    order: Vec<ResolvedVariable>,
    pruned: IndexMap<String, String>,
    graph: DependencyGraph,
}

impl Resolution {
    /// Participating variables in computation order
    pub fn order(&self) -> &[ResolvedVariable] {
        &self.order
    }

    pub fn into_parts(self) -> (Vec<ResolvedVariable>, DependencyGraph) {
        (self.order, self.graph)
    }

    /// Names of the pruned variables and the toggles that disabled them
    pub fn pruned(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pruned
            .iter()
            .map(|(name, toggle)| (name.as_str(), toggle.as_str()))
    }

    pub fn graph(&self) -> &DependencyGraph {
        &self.graph
    }
}

enum Activity {
    Active,
    Fallback,
    Pruned(String),
}

fn activity(
    descriptor: &VariableDescriptor,
    parameters: &Parameters,
) -> ClearwaterResult<Activity> {
    let toggle = match (descriptor.usage(), descriptor.toggle()) {
        (Usage::Static, _) | (_, None) => return Ok(Activity::Active),
        (_, Some(toggle)) => toggle,
    };

    match parameters.flag(toggle) {
        Some(true) => Ok(Activity::Active),
        Some(false) if descriptor.fallback().is_some() => Ok(Activity::Fallback),
        Some(false) => Ok(Activity::Pruned(toggle.to_string())),
        None => Err(ClearwaterError::UnknownToggle {
            variable: descriptor.name().to_string(),
            toggle: toggle.to_string(),
        }),
    }
}

/// Resolve the participating variables and their computation order
///
/// `model_type` only labels errors.
pub fn resolve(
    model_type: &str,
    descriptors: &[Arc<VariableDescriptor>],
    parameters: &Parameters,
) -> ClearwaterResult<Resolution> {
    let mut graph = DependencyGraph::new();
    // name -> (node, usage within the model, active)
    let mut participants: IndexMap<String, (NodeIndex, Usage, bool)> = IndexMap::new();
    let mut pruned: IndexMap<String, String> = IndexMap::new();
    let mut selected: Vec<&Arc<VariableDescriptor>> = Vec::new();

    for descriptor in descriptors {
        let name = descriptor.name();
        if participants.contains_key(name) || pruned.contains_key(name) {
            return Err(ClearwaterError::DuplicateName {
                model_type: model_type.to_string(),
                name: name.to_string(),
            });
        }

        let (usage, active) = match activity(descriptor, parameters)? {
            Activity::Active => (descriptor.usage(), true),
            Activity::Fallback => (Usage::Static, false),
            Activity::Pruned(toggle) => {
                pruned.insert(name.to_string(), toggle);
                continue;
            }
        };

        if parameters.contains(name) {
            warn!(
                variable = %name,
                model_type,
                "Variable shadows an external parameter with the same name"
            );
        }

        let node = graph.add_node(name.to_string());
        participants.insert(name.to_string(), (node, usage, active));
        selected.push(descriptor);
    }

    let mut resolved = Vec::with_capacity(selected.len());
    for descriptor in selected {
        let name = descriptor.name();
        let (node, usage, active) = participants[name];

        let mut inputs = Vec::new();
        if usage != Usage::Static {
            for &input in descriptor.inputs() {
                let input_ref = match participants.get(input) {
                    Some(&(producer, Usage::Dynamic, _)) => {
                        graph.add_edge(producer, node, input.to_string());
                        InputRef::Current(input.to_string())
                    }
                    Some(_) => InputRef::Previous(input.to_string()),
                    None => {
                        if let Some(toggle) = pruned.get(input) {
                            return Err(ClearwaterError::InactiveDependency {
                                variable: name.to_string(),
                                input: input.to_string(),
                                toggle: toggle.clone(),
                            });
                        }
                        let value = parameters.get(input).ok_or_else(|| {
                            ClearwaterError::UnresolvedDependency {
                                variable: name.to_string(),
                                input: input.to_string(),
                            }
                        })?;
                        InputRef::External {
                            name: input.to_string(),
                            value: value.as_f64(),
                        }
                    }
                };
                inputs.push(input_ref);
            }
        }

        resolved.push(Some(ResolvedVariable {
            descriptor: Arc::clone(descriptor),
            usage,
            inputs,
            active,
        }));
    }

    check_cycles(&graph)?;

    let order: Vec<ResolvedVariable> = topological_order(&graph, &participants)
        .into_iter()
        .filter_map(|node| resolved[node.index()].take())
        .collect();

    debug!(
        model_type,
        variables = order.len(),
        pruned = pruned.len(),
        "Resolved computation order"
    );

    Ok(Resolution {
        order,
        pruned,
        graph,
    })
}

/// Report every variable which is part of a dependency cycle
fn check_cycles(graph: &DependencyGraph) -> ClearwaterResult<()> {
    let mut cyclic: Vec<NodeIndex> = tarjan_scc(graph)
        .into_iter()
        .filter(|component| {
            component.len() > 1 || graph.contains_edge(component[0], component[0])
        })
        .flatten()
        .collect();

    if cyclic.is_empty() {
        return Ok(());
    }

    // Node indices follow declaration order
    cyclic.sort();
    Err(ClearwaterError::CyclicDependency {
        variables: cyclic.into_iter().map(|node| graph[node].clone()).collect(),
    })
}

/// Kahn's algorithm preferring lower usage rank then earlier declaration
fn topological_order(
    graph: &DependencyGraph,
    participants: &IndexMap<String, (NodeIndex, Usage, bool)>,
) -> Vec<NodeIndex> {
    let usage_of = |node: NodeIndex| participants[graph[node].as_str()].1;

    let mut in_degree: Vec<usize> = graph
        .node_indices()
        .map(|node| graph.edges_directed(node, Direction::Incoming).count())
        .collect();

    let mut ready: BinaryHeap<Reverse<(Usage, NodeIndex)>> = graph
        .node_indices()
        .filter(|node| in_degree[node.index()] == 0)
        .map(|node| Reverse((usage_of(node), node)))
        .collect();

    let mut order = Vec::with_capacity(graph.node_count());
    while let Some(Reverse((_, node))) = ready.pop() {
        order.push(node);
        for edge in graph.edges(node) {
            let target = edge.target();
            in_degree[target.index()] -= 1;
            if in_degree[target.index()] == 0 {
                ready.push(Reverse((usage_of(target), target)));
            }
        }
    }
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process;
    use crate::variable::Args;
    use proptest::prelude::*;

    fn arc(descriptor: VariableDescriptor) -> Arc<VariableDescriptor> {
        Arc::new(descriptor)
    }

    fn parameters(toggles: &[(&str, bool)]) -> Parameters {
        let mut parameters = Parameters::new();
        parameters.insert("dt", 1.0);
        for (name, value) in toggles {
            parameters.insert(*name, *value);
        }
        parameters
    }

    fn names(resolution: &Resolution) -> Vec<&str> {
        resolution.order().iter().map(|v| v.name()).collect()
    }

    /// Declared with consumers before producers
    fn decay_model() -> Vec<Arc<VariableDescriptor>> {
        vec![
            arc(VariableDescriptor::state(
                "C",
                process!(|C, dCdt, dt| C + dCdt * dt),
            )),
            arc(VariableDescriptor::dynamic("dCdt", process!(|loss| -loss))),
            arc(VariableDescriptor::dynamic(
                "loss",
                process!(|k_tc, C| k_tc * C),
            )),
            arc(VariableDescriptor::dynamic(
                "k_tc",
                process!(|k, theta, T| k * theta.powf(T - 20.0)),
            )),
            arc(VariableDescriptor::new_static("k")),
            arc(VariableDescriptor::new_static("theta")),
            arc(VariableDescriptor::new_static("T")),
        ]
    }

    #[test]
    fn orders_producers_before_consumers() {
        let resolution = resolve("decay", &decay_model(), &parameters(&[])).unwrap();

        assert_eq!(
            names(&resolution),
            vec!["k", "theta", "T", "k_tc", "loss", "dCdt", "C"]
        );
        let state = &resolution.order()[6];
        assert_eq!(
            state.inputs(),
            &[
                InputRef::Previous("C".to_string()),
                InputRef::Current("dCdt".to_string()),
                InputRef::External {
                    name: "dt".to_string(),
                    value: 1.0
                },
            ]
        );
        assert_eq!(resolution.graph().edge_count(), 3);
    }

    #[test]
    fn order_is_deterministic() {
        let first = resolve("decay", &decay_model(), &parameters(&[])).unwrap();
        for _ in 0..10 {
            let again = resolve("decay", &decay_model(), &parameters(&[])).unwrap();
            assert_eq!(names(&first), names(&again));
        }
    }

    #[test]
    fn unresolved_input() {
        let descriptors = vec![arc(VariableDescriptor::dynamic(
            "loss",
            process!(|k, C| k * C),
        ))];
        let err = resolve("decay", &descriptors, &parameters(&[])).unwrap_err();
        assert_eq!(
            err,
            ClearwaterError::UnresolvedDependency {
                variable: "loss".to_string(),
                input: "k".to_string()
            }
        );
    }

    #[test]
    fn cycles_list_every_member() {
        let descriptors = vec![
            arc(VariableDescriptor::new_static("k")),
            arc(VariableDescriptor::dynamic("a", process!(|b, k| b * k))),
            arc(VariableDescriptor::dynamic("b", process!(|c| c))),
            arc(VariableDescriptor::dynamic("c", process!(|a| a))),
            arc(VariableDescriptor::dynamic("d", process!(|a| a))),
        ];
        let err = resolve("cycle", &descriptors, &parameters(&[])).unwrap_err();
        assert_eq!(
            err,
            ClearwaterError::CyclicDependency {
                variables: vec!["a".to_string(), "b".to_string(), "c".to_string()]
            }
        );
    }

    #[test]
    fn dynamic_self_reference_is_a_cycle() {
        let descriptors = vec![arc(VariableDescriptor::dynamic(
            "a",
            process!(|a, dt| a * dt),
        ))];
        let err = resolve("cycle", &descriptors, &parameters(&[])).unwrap_err();
        assert_eq!(
            err,
            ClearwaterError::CyclicDependency {
                variables: vec!["a".to_string()]
            }
        );
    }

    #[test]
    fn states_read_previous_values() {
        // Two states reading each other never form a cycle
        let descriptors = vec![
            arc(VariableDescriptor::state("x", process!(|x, y, dt| x + y * dt))),
            arc(VariableDescriptor::state("y", process!(|y, x, dt| y - x * dt))),
        ];
        let resolution = resolve("oscillator", &descriptors, &parameters(&[])).unwrap();
        assert_eq!(names(&resolution), vec!["x", "y"]);
        assert_eq!(resolution.graph().edge_count(), 0);
    }

    #[test]
    fn disabled_variables_are_pruned() {
        let descriptors = vec![
            arc(VariableDescriptor::new_static("k")),
            arc(VariableDescriptor::dynamic("loss", process!(|k| k)).enabled_by("use_loss")),
            arc(VariableDescriptor::dynamic("report", process!(|k| 2.0 * k))),
        ];

        let enabled = resolve("m", &descriptors, &parameters(&[("use_loss", true)])).unwrap();
        assert_eq!(names(&enabled), vec!["k", "loss", "report"]);

        let disabled = resolve("m", &descriptors, &parameters(&[("use_loss", false)])).unwrap();
        assert_eq!(names(&disabled), vec!["k", "report"]);
        assert_eq!(
            disabled.pruned().collect::<Vec<_>>(),
            vec![("loss", "use_loss")]
        );
    }

    #[test]
    fn reading_a_pruned_variable_fails() {
        let descriptors = vec![
            arc(VariableDescriptor::dynamic("loss", process!(|dt| dt)).enabled_by("use_loss")),
            arc(VariableDescriptor::dynamic("report", process!(|loss| loss))),
        ];
        let err = resolve("m", &descriptors, &parameters(&[("use_loss", false)])).unwrap_err();
        assert_eq!(
            err,
            ClearwaterError::InactiveDependency {
                variable: "report".to_string(),
                input: "loss".to_string(),
                toggle: "use_loss".to_string()
            }
        );
    }

    #[test]
    fn fallback_replaces_disabled_variable() {
        let descriptors = vec![
            arc(VariableDescriptor::dynamic("report", process!(|loss| loss))),
            arc(VariableDescriptor::dynamic("loss", process!(|dt| dt))
                .enabled_by("use_loss")
                .with_fallback(0.0)),
        ];
        let resolution =
            resolve("m", &descriptors, &parameters(&[("use_loss", false)])).unwrap();

        assert_eq!(names(&resolution), vec!["loss", "report"]);
        let loss = &resolution.order()[0];
        assert_eq!(loss.usage(), Usage::Static);
        assert!(!loss.is_active());
        assert_eq!(loss.fallback(), Some(0.0));
        assert!(loss.inputs().is_empty());
        assert_eq!(
            resolution.order()[1].inputs(),
            &[InputRef::Previous("loss".to_string())]
        );
    }

    #[test]
    fn unknown_toggle() {
        let descriptors =
            vec![arc(VariableDescriptor::dynamic("loss", process!(|dt| dt)).enabled_by("use_loss"))];
        let err = resolve("m", &descriptors, &parameters(&[])).unwrap_err();
        assert_eq!(
            err,
            ClearwaterError::UnknownToggle {
                variable: "loss".to_string(),
                toggle: "use_loss".to_string()
            }
        );

        // Numeric parameters are not toggles
        let err = resolve("m", &descriptors, &{
            let mut p = parameters(&[]);
            p.insert("use_loss", 1.0);
            p
        })
        .unwrap_err();
        assert!(matches!(err, ClearwaterError::UnknownToggle { .. }));
    }

    #[test]
    fn statics_ignore_toggles() {
        let descriptors = vec![arc(VariableDescriptor::new_static("k").enabled_by("use_k"))];
        let resolution = resolve("m", &descriptors, &parameters(&[])).unwrap();
        assert_eq!(names(&resolution), vec!["k"]);
    }

    #[test]
    fn variables_shadow_parameters() {
        let descriptors = vec![
            arc(VariableDescriptor::new_static("dt")),
            arc(VariableDescriptor::dynamic("twice", process!(|dt| 2.0 * dt))),
        ];
        let resolution = resolve("m", &descriptors, &parameters(&[])).unwrap();
        assert_eq!(
            resolution.order()[1].inputs(),
            &[InputRef::Previous("dt".to_string())]
        );
    }

    #[test]
    fn duplicate_descriptors() {
        let descriptors = vec![
            arc(VariableDescriptor::new_static("k")),
            arc(VariableDescriptor::new_static("k")),
        ];
        let err = resolve("m", &descriptors, &parameters(&[])).unwrap_err();
        assert!(matches!(err, ClearwaterError::DuplicateName { .. }));
    }

    const NAMES: [&str; 12] = [
        "v0", "v1", "v2", "v3", "v4", "v5", "v6", "v7", "v8", "v9", "v10", "v11",
    ];

    fn zero(_: &Args<'_>) -> f64 {
        0.0
    }

    proptest! {
        #[test]
        fn dynamic_inputs_precede_consumers(
            size in 1usize..12,
            edges in prop::collection::vec(any::<bool>(), 66),
        ) {
            // Variable i may read any variable j < i, declared in reverse order
            let mut descriptors = Vec::new();
            let mut edge = edges.iter();
            let mut reads: Vec<Vec<&'static str>> = Vec::new();
            for i in 0..size {
                let inputs: Vec<&'static str> = (0..i)
                    .filter(|_| *edge.next().unwrap_or(&false))
                    .map(|j| NAMES[j])
                    .collect();
                reads.push(inputs);
            }
            for i in (0..size).rev() {
                let inputs: &'static [&'static str] = Box::leak(reads[i].clone().into_boxed_slice());
                descriptors.push(arc(VariableDescriptor::dynamic(
                    NAMES[i],
                    crate::variable::Process::elementwise(inputs, zero),
                )));
            }

            let resolution = resolve("random", &descriptors, &Parameters::new()).unwrap();
            let position: IndexMap<&str, usize> = resolution
                .order()
                .iter()
                .enumerate()
                .map(|(index, variable)| (variable.name(), index))
                .collect();

            prop_assert_eq!(position.len(), size);
            for (i, inputs) in reads.iter().enumerate() {
                for input in inputs {
                    prop_assert!(position[input] < position[NAMES[i]]);
                }
            }
        }
    }
}
