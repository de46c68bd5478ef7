// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Inheritance cycle detection.
//!
//! Every class has at most one parent, so a depth-first walk from a class is
//! just the chain of parent links. The walk keeps an explicit path and an
//! on-path marker per node instead of recursing, which keeps stack usage flat
//! however deep the hierarchy is.

use super::{ClassId, Node};

/// Finds every inheritance cycle among `nodes`.
///
/// Starting points are taken in registration order. Each returned cycle lists
/// its members in parent-link order, beginning with the class at which the
/// walk re-entered its own path. That first entry is where the error is
/// attributed.
/// A cycle is reported once no matter how many classes lead into it.
pub(super) fn find_cycles(nodes: &[Node]) -> Vec<Vec<ClassId>> {
    let mut visited = vec![false; nodes.len()];
    let mut on_path = vec![false; nodes.len()];
    let mut path: Vec<ClassId> = Vec::new();
    let mut cycles = Vec::new();

    for node in nodes {
        if visited[node.id().index()] {
            continue;
        }

        let mut current = Some(node.id());
        while let Some(id) = current {
            let index = id.index();
            if on_path[index] {
                if let Some(start) = path.iter().position(|&member| member == id) {
                    cycles.push(path[start..].to_vec());
                }
                break;
            }
            if visited[index] {
                break;
            }
            visited[index] = true;
            on_path[index] = true;
            path.push(id);
            current = nodes[index].parent();
        }

        for id in path.drain(..) {
            on_path[id.index()] = false;
        }
    }

    cycles
}
