//! Cycle detection for the stage graph

use std::collections::{BTreeMap, HashSet};

use crate::error::DefinitionError;

/// Detect circular dependencies using DFS.
///
/// Returns a [`DefinitionError::Cycle`] carrying the cycle path if one
/// exists.
pub fn detect_cycles(
    quest: &str,
    deps: &BTreeMap<String, Vec<String>>,
) -> Result<(), DefinitionError> {
    let mut visited = HashSet::new();
    let mut rec_stack = HashSet::new();
    let mut path = Vec::new();

    for name in deps.keys() {
        if !visited.contains(name.as_str()) {
            if let Some(cycle) = dfs_detect_cycle(deps, name, &mut visited, &mut rec_stack, &mut path)
            {
                return Err(DefinitionError::Cycle {
                    quest: quest.to_string(),
                    cycle,
                });
            }
        }
    }

    Ok(())
}

/// DFS helper, returns the cycle path when one is found.
fn dfs_detect_cycle(
    deps: &BTreeMap<String, Vec<String>>,
    name: &str,
    visited: &mut HashSet<String>,
    rec_stack: &mut HashSet<String>,
    path: &mut Vec<String>,
) -> Option<Vec<String>> {
    visited.insert(name.to_string());
    rec_stack.insert(name.to_string());
    path.push(name.to_string());

    if let Some(stage_deps) = deps.get(name) {
        for dep in stage_deps {
            if !visited.contains(dep) {
                if let Some(cycle) = dfs_detect_cycle(deps, dep, visited, rec_stack, path) {
                    return Some(cycle);
                }
            } else if rec_stack.contains(dep) {
                // found a cycle - reconstruct it from the path
                let mut cycle = vec![dep.clone()];
                for p in path.iter().rev() {
                    cycle.push(p.clone());
                    if p == dep {
                        break;
                    }
                }
                cycle.reverse();
                return Some(cycle);
            }
        }
    }

    path.pop();
    rec_stack.remove(name);
    None
}
