//! Removal of blocks nobody can reach.
//!
//! A block survives when it is listed or when a surviving block depends on
//! it, directly or through other dependencies. The survivor set is computed
//! as everything reachable from listed blocks, which makes pruning
//! idempotent. Categories left without blocks are dropped.

use std::collections::{HashMap, HashSet};

use crate::manifest::{Block, Category};

/// Drop unlisted, unreferenced blocks and then empty categories.
///
/// Order of categories and of blocks within them is preserved.
pub fn prune(categories: Vec<Category>) -> Vec<Category> {
    let keep = reachable_from_listed(&categories);

    categories
        .into_iter()
        .filter_map(|mut category| {
            category.blocks.retain(|b| keep.contains(&b.specifier()));
            (!category.blocks.is_empty()).then_some(category)
        })
        .collect()
}

fn reachable_from_listed(categories: &[Category]) -> HashSet<String> {
    let by_specifier: HashMap<String, &Block> = categories
        .iter()
        .flat_map(|c| c.blocks.iter())
        .map(|b| (b.specifier(), b))
        .collect();

    let mut keep: HashSet<String> = HashSet::new();
    let mut to_visit: Vec<String> = by_specifier
        .iter()
        .filter(|(_, b)| b.list)
        .map(|(s, _)| s.clone())
        .collect();

    while let Some(current) = to_visit.pop() {
        if !keep.insert(current.clone()) {
            continue;
        }
        if let Some(block) = by_specifier.get(&current) {
            for dep in &block.local_dependencies {
                if !keep.contains(dep) {
                    to_visit.push(dep.clone());
                }
            }
        }
    }

    keep
}
