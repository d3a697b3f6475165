//! # Family trees: flat ancestor nodes and their client-side reconstruction
//!
//! The backend answers `GET /horses/{id}/familytree?generations=n` with a flat
//! list of [`HorseFamilyTree`] nodes. Edges are not nested; every node carries
//! the ids of its mother and father, and the client rebuilds the tree by
//! looking those ids up in the same result set.
//!
//! - [`GenerationLimit`]: the positive depth bound, parsed from the
//!   `generations` query parameter with a default of 5.
//! - [`FamilyTree`]: the flat node set indexed by id.
//! - [`Ancestor`]: the nested, render-ready view produced by
//!   [`FamilyTree::ancestry`]. References to ids missing from the set end the
//!   branch. A horse already on the current path is never expanded again, so
//!   cyclic data cannot recurse forever.

use std::collections::HashMap;
use std::num::NonZeroU32;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::horse::{HorseId, Sex};

/// A flattened horse as used for family trees.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HorseFamilyTree {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<HorseId>,
    pub name: String,
    pub date_of_birth: NaiveDate,
    pub sex: Sex,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mother_id: Option<HorseId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub father_id: Option<HorseId>,
}

/// Maximum number of generations to request, root included.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GenerationLimit(NonZeroU32);

impl GenerationLimit {
    pub const DEFAULT: u32 = 5;

    /// `None` for zero.
    pub fn new(generations: u32) -> Option<Self> {
        NonZeroU32::new(generations).map(Self)
    }

    /// Parse the `generations` query value. Missing, empty, zero and
    /// non-numeric values fall back to `default`.
    pub fn from_query(value: Option<&str>, default: u32) -> Self {
        value
            .and_then(|v| v.trim().parse::<u32>().ok())
            .and_then(Self::new)
            .or_else(|| Self::new(default))
            .unwrap_or_default()
    }

    pub fn get(&self) -> u32 {
        self.0.get()
    }
}

impl Default for GenerationLimit {
    fn default() -> Self {
        Self(NonZeroU32::MIN.saturating_add(Self::DEFAULT - 1))
    }
}

impl std::fmt::Display for GenerationLimit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parse a route segment into a horse id. Non-numeric ids yield `None`.
pub fn parse_horse_id(segment: &str) -> Option<HorseId> {
    segment.trim().parse().ok()
}

/// A horse and its known parents, nested.
#[derive(Clone, Debug, PartialEq)]
pub struct Ancestor {
    pub horse: HorseFamilyTree,
    pub mother: Option<Box<Ancestor>>,
    pub father: Option<Box<Ancestor>>,
}

impl Ancestor {
    /// Number of generations in this subtree, the node itself included.
    pub fn depth(&self) -> usize {
        let mother = self.mother.as_ref().map_or(0, |m| m.depth());
        let father = self.father.as_ref().map_or(0, |f| f.depth());
        1 + mother.max(father)
    }

    /// Ids in depth-first order, mother before father.
    pub fn ids(&self) -> Vec<HorseId> {
        let mut ids = Vec::new();
        self.collect_ids(&mut ids);
        ids
    }

    fn collect_ids(&self, ids: &mut Vec<HorseId>) {
        if let Some(id) = self.horse.id {
            ids.push(id);
        }
        if let Some(mother) = &self.mother {
            mother.collect_ids(ids);
        }
        if let Some(father) = &self.father {
            father.collect_ids(ids);
        }
    }
}

/// The flat node set of one family-tree response.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FamilyTree {
    nodes: Vec<HorseFamilyTree>,
    index: HashMap<HorseId, usize>,
}

impl FamilyTree {
    pub fn new(nodes: Vec<HorseFamilyTree>) -> Self {
        let mut index = HashMap::with_capacity(nodes.len());
        for (pos, node) in nodes.iter().enumerate() {
            if let Some(id) = node.id {
                index.entry(id).or_insert(pos);
            }
        }
        Self { nodes, index }
    }

    pub fn nodes(&self) -> &[HorseFamilyTree] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: HorseId) -> Option<&HorseFamilyTree> {
        self.index.get(&id).map(|&pos| &self.nodes[pos])
    }

    pub fn mother_of(&self, node: &HorseFamilyTree) -> Option<&HorseFamilyTree> {
        node.mother_id.and_then(|id| self.get(id))
    }

    pub fn father_of(&self, node: &HorseFamilyTree) -> Option<&HorseFamilyTree> {
        node.father_id.and_then(|id| self.get(id))
    }

    /// Rebuild the nested ancestry starting at `root`.
    pub fn ancestry(&self, root: HorseId) -> Option<Ancestor> {
        let mut path = Vec::new();
        self.build(root, &mut path)
    }

    fn build(&self, id: HorseId, path: &mut Vec<HorseId>) -> Option<Ancestor> {
        if path.contains(&id) {
            return None;
        }
        let horse = self.get(id)?.clone();
        path.push(id);
        let mother = horse
            .mother_id
            .and_then(|m| self.build(m, path))
            .map(Box::new);
        let father = horse
            .father_id
            .and_then(|f| self.build(f, path))
            .map(Box::new);
        path.pop();
        Some(Ancestor {
            horse,
            mother,
            father,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: HorseId, sex: Sex, mother: Option<HorseId>, father: Option<HorseId>) -> HorseFamilyTree {
        HorseFamilyTree {
            id: Some(id),
            name: format!("Horse {id}"),
            date_of_birth: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
            sex,
            mother_id: mother,
            father_id: father,
        }
    }

    #[test]
    fn test_generation_limit_defaults() {
        assert_eq!(GenerationLimit::from_query(None, 5).get(), 5);
        assert_eq!(GenerationLimit::from_query(Some(""), 5).get(), 5);
        assert_eq!(GenerationLimit::from_query(Some("0"), 5).get(), 5);
        assert_eq!(GenerationLimit::from_query(Some("abc"), 5).get(), 5);
        assert_eq!(GenerationLimit::from_query(Some("-2"), 5).get(), 5);
        assert_eq!(GenerationLimit::from_query(Some("3"), 5).get(), 3);
        assert_eq!(GenerationLimit::default().get(), 5);
    }

    #[test]
    fn test_parse_horse_id() {
        assert_eq!(parse_horse_id("42"), Some(42));
        assert_eq!(parse_horse_id("forty-two"), None);
        assert_eq!(parse_horse_id(""), None);
    }

    #[test]
    fn test_ancestry_follows_references() {
        let tree = FamilyTree::new(vec![
            node(1, Sex::Female, Some(2), Some(3)),
            node(2, Sex::Female, Some(4), None),
            node(4, Sex::Female, None, None),
            node(3, Sex::Male, None, None),
        ]);

        let root = tree.ancestry(1).unwrap();
        assert_eq!(root.depth(), 3);
        assert_eq!(root.ids(), vec![1, 2, 4, 3]);
        assert_eq!(tree.mother_of(tree.get(1).unwrap()).unwrap().id, Some(2));
        assert_eq!(tree.father_of(tree.get(1).unwrap()).unwrap().id, Some(3));
    }

    #[test]
    fn test_missing_parent_ends_branch() {
        // Father 3 lies outside the requested generations.
        let tree = FamilyTree::new(vec![node(1, Sex::Male, None, Some(3))]);
        let root = tree.ancestry(1).unwrap();
        assert!(root.father.is_none());
        assert_eq!(root.depth(), 1);
    }

    #[test]
    fn test_unknown_root() {
        let tree = FamilyTree::new(vec![node(1, Sex::Male, None, None)]);
        assert!(tree.ancestry(9).is_none());
        assert!(FamilyTree::default().is_empty());
    }

    #[test]
    fn test_cycle_is_not_followed() {
        let tree = FamilyTree::new(vec![
            node(1, Sex::Female, Some(2), None),
            node(2, Sex::Female, Some(1), None),
        ]);
        let root = tree.ancestry(1).unwrap();
        assert_eq!(root.ids(), vec![1, 2]);
    }

    #[test]
    fn test_node_json_shape() {
        let json = r#"[{"id":1,"name":"A","dateOfBirth":"1999-03-03","sex":"FEMALE","motherId":2,"fatherId":3,"generations":5}]"#;
        let nodes: Vec<HorseFamilyTree> = serde_json::from_str(json).unwrap();
        assert_eq!(nodes[0].mother_id, Some(2));
        assert_eq!(nodes[0].father_id, Some(3));
    }
}
