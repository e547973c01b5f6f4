//! Dependency ordering over installed packages.

use super::PackageRegistry;
use crate::error::{PkgLinkError, Result};
use petgraph::algo::{kosaraju_scc, toposort};
use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::{HashMap, HashSet};

impl PackageRegistry {
    /// Package names, every package after all of its dependencies.
    ///
    /// Fails if a manifest names a dependency that is not installed or if
    /// the dependency graph has a cycle.
    pub fn dependency_order(&self) -> Result<Vec<String>> {
        let names = self.names();
        // Edge direction: dependency -> dependent
        let mut graph: DiGraph<&str, ()> = DiGraph::with_capacity(names.len(), names.len());
        let mut nodes: HashMap<&str, NodeIndex> = HashMap::with_capacity(names.len());

        for &name in &names {
            nodes.insert(name, graph.add_node(name));
        }

        for &name in &names {
            let Some(package) = self.packages.get(name) else {
                continue;
            };
            for dependency in package.dependencies() {
                let from = nodes.get(dependency.as_str()).copied().ok_or_else(|| {
                    PkgLinkError::UnknownDependency {
                        package: name.to_string(),
                        dependency: dependency.clone(),
                    }
                })?;
                graph.add_edge(from, nodes[name], ());
            }
        }

        match toposort(&graph, None) {
            Ok(order) => Ok(order.into_iter().map(|idx| graph[idx].to_string()).collect()),
            Err(cycle) => {
                let culprit = cycle.node_id();
                let members: HashSet<NodeIndex> = kosaraju_scc(&graph)
                    .into_iter()
                    .find(|component| component.contains(&culprit))
                    .unwrap_or_else(|| vec![culprit])
                    .into_iter()
                    .collect();
                let start = members
                    .iter()
                    .copied()
                    .min_by_key(|&idx| graph[idx])
                    .unwrap_or(culprit);
                let chain: Vec<&str> = cycle_from(&graph, start, &members)
                    .into_iter()
                    .map(|idx| graph[idx])
                    .collect();
                Err(PkgLinkError::DependencyCycle(chain.join(" -> ")))
            }
        }
    }
}

/// A cycle through `start` inside one strongly connected component, in
/// "depends on" direction, ending with `start` again.
fn cycle_from(
    graph: &DiGraph<&str, ()>,
    start: NodeIndex,
    members: &HashSet<NodeIndex>,
) -> Vec<NodeIndex> {
    let mut path = vec![start];
    let mut visited = HashSet::from([start]);
    if walk_cycle(graph, start, start, members, &mut visited, &mut path) {
        path.push(start);
    }
    path
}

fn walk_cycle(
    graph: &DiGraph<&str, ()>,
    node: NodeIndex,
    start: NodeIndex,
    members: &HashSet<NodeIndex>,
    visited: &mut HashSet<NodeIndex>,
    path: &mut Vec<NodeIndex>,
) -> bool {
    // Incoming edges lead to this node's dependencies
    let mut next: Vec<NodeIndex> = graph
        .neighbors_directed(node, Direction::Incoming)
        .filter(|idx| members.contains(idx))
        .collect();
    next.sort_by_key(|&idx| graph[idx]);

    for idx in next {
        if idx == start {
            return true;
        }
        if visited.insert(idx) {
            path.push(idx);
            if walk_cycle(graph, idx, start, members, visited, path) {
                return true;
            }
            path.pop();
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Package;
    use std::path::PathBuf;

    fn registry(packages: Vec<(&str, Vec<&str>)>) -> PackageRegistry {
        PackageRegistry::from_packages(
            PathBuf::from("/components"),
            packages.into_iter().map(|(name, deps)| {
                Package::new(
                    PathBuf::from("/components").join(name),
                    name,
                    "1.0.0",
                    format!("{name}.js"),
                    deps.into_iter().map(str::to_string).collect(),
                )
            }),
        )
        .unwrap()
    }

    fn position(order: &[String], name: &str) -> usize {
        order.iter().position(|p| p == name).unwrap()
    }

    #[test]
    fn test_order_empty() {
        assert!(registry(vec![]).dependency_order().unwrap().is_empty());
    }

    #[test]
    fn test_order_diamond() {
        // app -> left -> base
        //     -> right -> base
        let order = registry(vec![
            ("app", vec!["left", "right"]),
            ("left", vec!["base"]),
            ("right", vec!["base"]),
            ("base", vec![]),
        ])
        .dependency_order()
        .unwrap();

        assert_eq!(order.len(), 4);
        assert!(position(&order, "base") < position(&order, "left"));
        assert!(position(&order, "base") < position(&order, "right"));
        assert!(position(&order, "left") < position(&order, "app"));
        assert!(position(&order, "right") < position(&order, "app"));
    }

    #[test]
    fn test_order_unknown_dependency() {
        let err = registry(vec![("app", vec!["missing"])])
            .dependency_order()
            .unwrap_err();
        assert!(matches!(
            err,
            PkgLinkError::UnknownDependency { ref package, ref dependency }
                if package == "app" && dependency == "missing"
        ));
    }

    #[test]
    fn test_order_cycle() {
        let err = registry(vec![("a", vec!["b"]), ("b", vec!["a"]), ("c", vec![])])
            .dependency_order()
            .unwrap_err();
        match err {
            PkgLinkError::DependencyCycle(chain) => assert_eq!(chain, "a -> b -> a"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_order_cycle_follows_edges() {
        // a -> c -> b -> a, listed so that name order differs from edge order
        let err = registry(vec![
            ("a", vec!["c"]),
            ("b", vec!["a"]),
            ("c", vec!["b"]),
            ("d", vec!["a"]),
        ])
        .dependency_order()
        .unwrap_err();
        match err {
            PkgLinkError::DependencyCycle(chain) => assert_eq!(chain, "a -> c -> b -> a"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_order_self_dependency() {
        let err = registry(vec![("a", vec!["a"])]).dependency_order().unwrap_err();
        match err {
            PkgLinkError::DependencyCycle(chain) => assert_eq!(chain, "a -> a"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
