//! Arena-backed food web tree with a navigation cursor.

use generational_arena::{Arena, Index};
use itertools::Itertools;
use tracing::{debug, instrument, warn};

use crate::domain::entities::{NameMatch, OrganismNode, PreyKind, Slot};
use crate::domain::error::{DomainResult, FoodWebError};

/// Returned by [`OrganismTree::list_all_plants`] when the cursor subtree has no plants.
pub const NO_PLANTS_FOUND: &str = "No plants found supporting the cursor.";

/// Food web rooted at an apex predator.
///
/// All nodes are owned by the arena; parents refer to prey through arena
/// handles, so every node has exactly one owning slot. The cursor is a handle
/// as well and always points at a node reachable from the root: it only moves
/// to a direct prey or back to the root, and removal only ever detaches prey
/// *below* the cursor.
#[derive(Debug)]
pub struct OrganismTree {
    arena: Arena<OrganismNode>,
    root: Index,
    cursor: Index,
    removal_match: NameMatch,
}

impl OrganismTree {
    /// Builds a tree whose root and cursor are `apex`.
    #[instrument(level = "debug", skip(apex), fields(apex = %apex))]
    pub fn new(apex: OrganismNode) -> DomainResult<Self> {
        if apex.is_plant() {
            return Err(FoodWebError::IsPlant);
        }
        let mut arena = Arena::new();
        let root = arena.insert(apex);
        Ok(Self {
            arena,
            root,
            cursor: root,
            removal_match: NameMatch::default(),
        })
    }

    /// Sets how [`OrganismTree::remove_child`] compares names.
    pub fn with_removal_match(mut self, removal_match: NameMatch) -> Self {
        self.removal_match = removal_match;
        self
    }

    pub fn removal_match(&self) -> NameMatch {
        self.removal_match
    }

    pub fn root(&self) -> &OrganismNode {
        &self.arena[self.root]
    }

    pub fn cursor(&self) -> &OrganismNode {
        &self.arena[self.cursor]
    }

    pub fn node(&self, idx: Index) -> Option<&OrganismNode> {
        self.arena.get(idx)
    }

    /// Direct prey of `node` in slot order.
    pub fn prey_of<'a>(&'a self, node: &'a OrganismNode) -> impl Iterator<Item = &'a OrganismNode> + 'a {
        node.prey_slots().filter_map(move |(_, idx)| self.arena.get(idx))
    }

    /// Number of organisms in the whole tree, root included.
    pub fn organism_count(&self) -> usize {
        self.arena.len()
    }

    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        self.calculate_depth(self.root)
    }

    fn calculate_depth(&self, idx: Index) -> usize {
        match self.arena.get(idx) {
            Some(node) => {
                1 + node
                    .prey_slots()
                    .map(|(_, child)| self.calculate_depth(child))
                    .max()
                    .unwrap_or(0)
            }
            None => 0,
        }
    }

    #[instrument(level = "debug", skip(self))]
    pub fn reset_cursor(&mut self) {
        self.cursor = self.root;
    }

    /// Moves the cursor to the direct prey called exactly `name`.
    #[instrument(level = "debug", skip(self))]
    pub fn move_cursor(&mut self, name: &str) -> DomainResult<()> {
        let (slot, idx) = self
            .find_prey(name, NameMatch::Exact)
            .ok_or_else(|| FoodWebError::NotFound(name.to_string()))?;
        debug!(%slot, "cursor moved");
        self.cursor = idx;
        Ok(())
    }

    /// True iff all three prey slots of the cursor are occupied.
    pub fn is_full(&self) -> bool {
        self.cursor().is_full()
    }

    /// First direct prey of the cursor whose name matches under `policy`.
    pub fn find_prey(&self, name: &str, policy: NameMatch) -> Option<(Slot, Index)> {
        self.cursor()
            .prey_slots()
            .find(|(_, idx)| policy.matches(self.arena[*idx].name(), name))
    }

    pub fn has_prey_named(&self, name: &str) -> bool {
        self.find_prey(name, NameMatch::Exact).is_some()
    }

    /// Reports whether prey of `kind` could currently be added at the cursor.
    pub fn check_cursor_accepts(&self, kind: PreyKind) -> DomainResult<Slot> {
        self.cursor().check_prey_kind(kind)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn add_animal_child(
        &mut self,
        name: &str,
        is_herbivore: bool,
        is_carnivore: bool,
    ) -> DomainResult<Slot> {
        self.attach(OrganismNode::animal(name, is_herbivore, is_carnivore))
    }

    #[instrument(level = "debug", skip(self))]
    pub fn add_plant_child(&mut self, name: &str) -> DomainResult<Slot> {
        self.attach(OrganismNode::plant(name))
    }

    fn attach(&mut self, prey: OrganismNode) -> DomainResult<Slot> {
        if self.has_prey_named(prey.name()) {
            return Err(FoodWebError::DuplicateName(prey.name().to_string()));
        }
        let prey_idx = self.arena.insert(prey);
        let attached = match self.arena.get2_mut(self.cursor, prey_idx) {
            (Some(predator), Some(prey)) => predator.add_prey(prey, prey_idx),
            _ => Err(FoodWebError::CursorDetached),
        };
        match attached {
            Ok(slot) => debug!(%slot, "prey attached"),
            Err(_) => {
                self.arena.remove(prey_idx);
            }
        }
        attached
    }

    /// Removes the matching direct prey of the cursor together with its subtree.
    ///
    /// Remaining prey are shifted left so the slots stay gap-free.
    /// Returns the stored name of the removed prey.
    #[instrument(level = "debug", skip(self))]
    pub fn remove_child(&mut self, name: &str) -> DomainResult<String> {
        let (slot, idx) = self
            .find_prey(name, self.removal_match)
            .ok_or_else(|| FoodWebError::NotFound(name.to_string()))?;
        let removed = self.arena[idx].name().to_string();
        self.arena[self.cursor].remove_prey(slot);

        let subtree: Vec<Index> = self.iter_from(idx).map(|(i, _)| i).collect();
        for i in &subtree {
            self.arena.remove(*i);
        }
        debug!(%slot, freed = subtree.len(), "prey removed");
        Ok(removed)
    }

    /// `"<cursor> -> a, b, c"`, or just the cursor name when it has no prey.
    #[instrument(level = "debug", skip(self))]
    pub fn list_prey(&self) -> DomainResult<String> {
        let cursor = self.cursor();
        if cursor.is_plant() {
            return Err(FoodWebError::IsPlant);
        }
        let prey = self.prey_of(cursor).map(OrganismNode::name).join(", ");
        if prey.is_empty() {
            Ok(cursor.name().to_string())
        } else {
            Ok(format!("{} -> {}", cursor.name(), prey))
        }
    }

    /// Names from the apex predator down to the cursor, inclusive.
    pub fn food_chain(&self) -> DomainResult<Vec<&str>> {
        let mut path = Vec::new();
        if self.search_path(self.root, self.cursor, &mut path) {
            Ok(path)
        } else {
            warn!("cursor not reachable from root");
            Err(FoodWebError::CursorDetached)
        }
    }

    /// Depth-first search (left, middle, right) for `target`, keeping `path` in sync.
    fn search_path<'a>(&'a self, idx: Index, target: Index, path: &mut Vec<&'a str>) -> bool {
        let Some(node) = self.arena.get(idx) else {
            return false;
        };
        path.push(node.name());
        if idx == target {
            return true;
        }
        for (_, child) in node.prey_slots() {
            if self.search_path(child, target, path) {
                return true;
            }
        }
        path.pop();
        false
    }

    #[instrument(level = "debug", skip(self))]
    pub fn list_food_chain(&self) -> DomainResult<String> {
        Ok(self.food_chain()?.join(" -> "))
    }

    /// Plants in the cursor subtree in pre-order.
    pub fn plants_supporting_cursor(&self) -> Vec<&str> {
        self.iter_from(self.cursor)
            .filter(|(_, node)| node.is_plant())
            .map(|(_, node)| node.name())
            .collect()
    }

    #[instrument(level = "debug", skip(self))]
    pub fn list_all_plants(&self) -> String {
        let plants = self.plants_supporting_cursor();
        if plants.is_empty() {
            NO_PLANTS_FOUND.to_string()
        } else {
            plants.join(",")
        }
    }

    /// Outline of the cursor subtree, one tab per level.
    pub fn render_organism_tree(&self) -> String {
        self.render_outline("\t")
    }

    /// Outline of the cursor subtree with a custom indent unit.
    ///
    /// Animals render as `|- name`, plants as `-name`.
    #[instrument(level = "debug", skip(self))]
    pub fn render_outline(&self, indent: &str) -> String {
        let mut out = String::new();
        self.render_node(self.cursor, indent, 0, &mut out);
        out
    }

    fn render_node(&self, idx: Index, indent: &str, level: usize, out: &mut String) {
        let Some(node) = self.arena.get(idx) else {
            return;
        };
        out.push_str(&indent.repeat(level));
        if node.is_plant() {
            out.push('-');
            out.push_str(node.name());
            out.push('\n');
            return;
        }
        out.push_str("|- ");
        out.push_str(node.name());
        out.push('\n');
        for (_, child) in node.prey_slots() {
            self.render_node(child, indent, level + 1, out);
        }
    }

    /// Pre-order iterator over the whole tree.
    pub fn iter(&self) -> PreOrderIterator<'_> {
        self.iter_from(self.root)
    }

    /// Pre-order iterator over the cursor and everything below it.
    pub fn iter_cursor(&self) -> PreOrderIterator<'_> {
        self.iter_from(self.cursor)
    }

    pub(crate) fn iter_from(&self, start: Index) -> PreOrderIterator<'_> {
        PreOrderIterator {
            tree: self,
            stack: vec![start],
        }
    }

    pub(crate) fn cursor_index(&self) -> Index {
        self.cursor
    }
}

pub struct PreOrderIterator<'a> {
    tree: &'a OrganismTree,
    stack: Vec<Index>,
}

impl<'a> Iterator for PreOrderIterator<'a> {
    type Item = (Index, &'a OrganismNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current) = self.stack.pop() {
            if let Some(node) = self.tree.arena.get(current) {
                // Push in reverse so left is visited first
                for (_, child) in node.prey_slots().rev() {
                    self.stack.push(child);
                }
                return Some((current, node));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Diet;

    fn lion() -> OrganismTree {
        OrganismTree::new(OrganismNode::with_diet("Lion", Diet::Carnivore)).unwrap()
    }

    #[test]
    fn given_plant_apex_when_constructing_then_fails_with_is_plant() {
        let result = OrganismTree::new(OrganismNode::plant("Oak"));
        assert_eq!(result.err(), Some(FoodWebError::IsPlant));
    }

    #[test]
    fn given_failed_add_when_counting_then_no_node_was_left_in_arena() {
        let mut tree = lion();

        let result = tree.add_plant_child("Grass");

        assert_eq!(result, Err(FoodWebError::DietMismatch));
        assert_eq!(tree.organism_count(), 1);
    }

    #[test]
    fn given_removed_subtree_when_counting_then_descendants_are_freed() {
        let mut tree = lion();
        tree.add_animal_child("Hyena", false, true).unwrap();
        tree.move_cursor("Hyena").unwrap();
        tree.add_animal_child("Jackal", true, true).unwrap();
        tree.move_cursor("Jackal").unwrap();
        tree.add_plant_child("Berries").unwrap();
        tree.reset_cursor();
        assert_eq!(tree.organism_count(), 4);

        tree.remove_child("hyena").unwrap();

        assert_eq!(tree.organism_count(), 1);
        assert_eq!(tree.iter().count(), 1);
    }

    #[test]
    fn given_branching_tree_when_iterating_then_visits_in_pre_order() {
        let mut tree = OrganismTree::new(OrganismNode::with_diet("Bear", Diet::Omnivore)).unwrap();
        tree.add_animal_child("Salmon", false, true).unwrap();
        tree.add_plant_child("Berries").unwrap();
        tree.move_cursor("Salmon").unwrap();
        tree.add_animal_child("Shrimp", true, false).unwrap();
        tree.reset_cursor();

        let names: Vec<&str> = tree.iter().map(|(_, n)| n.name()).collect();

        assert_eq!(names, vec!["Bear", "Salmon", "Shrimp", "Berries"]);
        assert_eq!(tree.depth(), 3);
    }
}
