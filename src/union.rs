//! Union graphs
//!
//! A union graph is a virtual, read-only graph whose content is the set
//! union of its member graphs. No triples are stored under a union's name;
//! reads are intercepted and fanned out over the members at query time.
//! Members may themselves be unions; resolution flattens the membership
//! tree down to concrete leaf graphs, deduplicated.

use indexmap::IndexMap;

use crate::error::{ErrorCode, SemError, SemResult};
use crate::store::GraphId;

/// Registry of union graph definitions
#[derive(Debug, Default)]
pub struct UnionRegistry {
    unions: IndexMap<GraphId, Vec<GraphId>>,
}

impl UnionRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Define a union graph over the given members
    pub fn create(&mut self, name: GraphId, members: Vec<GraphId>) -> SemResult<()> {
        if self.unions.contains_key(&name) {
            return Err(SemError::new(
                ErrorCode::DuplicateUnion,
                format!("union graph {} is already defined", name),
            ));
        }
        for member in &members {
            if *member == name || self.reaches(member, &name) {
                return Err(SemError::cyclic_union(name.as_str())
                    .with_context("member", member.as_str()));
            }
        }
        self.unions.insert(name, members);
        Ok(())
    }

    /// Remove a union definition
    pub fn remove(&mut self, name: &GraphId) -> SemResult<()> {
        if self.unions.shift_remove(name).is_none() {
            return Err(SemError::new(
                ErrorCode::UnknownUnion,
                format!("no union graph named {}", name),
            ));
        }
        Ok(())
    }

    /// Whether the name is a defined union graph
    pub fn is_union(&self, name: &GraphId) -> bool {
        self.unions.contains_key(name)
    }

    /// Direct members of a union, if defined
    pub fn members(&self, name: &GraphId) -> Option<&[GraphId]> {
        self.unions.get(name).map(|m| m.as_slice())
    }

    /// Flatten a union to its concrete leaf graphs, deduplicated, in
    /// first-encounter order. Non-union names resolve to themselves.
    pub fn resolve_members(&self, name: &GraphId) -> Vec<GraphId> {
        let mut leaves = Vec::new();
        self.collect_leaves(name, &mut leaves);
        leaves
    }

    fn collect_leaves(&self, name: &GraphId, leaves: &mut Vec<GraphId>) {
        match self.unions.get(name) {
            Some(members) => {
                for member in members {
                    self.collect_leaves(member, leaves);
                }
            }
            None => {
                if !leaves.contains(name) {
                    leaves.push(name.clone());
                }
            }
        }
    }

    /// Whether `from` reaches `target` through union membership
    fn reaches(&self, from: &GraphId, target: &GraphId) -> bool {
        if from == target {
            return true;
        }
        match self.unions.get(from) {
            Some(members) => members.iter().any(|m| self.reaches(m, target)),
            None => false,
        }
    }
}
