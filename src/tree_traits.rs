//! Conversion of the food web into `termtree` for box-drawing display.

use generational_arena::Index;
use termtree::Tree;
use tracing::instrument;

use crate::domain::{OrganismTree, PreyKind};

pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

// Renders the subtree at the cursor, the same scope as the outline view.
impl TreeNodeConvert for OrganismTree {
    #[instrument(level = "debug", skip(self))]
    fn to_tree_string(&self) -> Tree<String> {
        fn build_tree(tree: &OrganismTree, idx: Index) -> Tree<String> {
            match tree.node(idx) {
                Some(node) => {
                    let label = match (node.kind(), node.diet()) {
                        (PreyKind::Plant, _) => format!("{} (plant)", node.name()),
                        (PreyKind::Animal, Some(diet)) => format!("{} ({})", node.name(), diet),
                        (PreyKind::Animal, None) => node.name().to_string(),
                    };
                    let leaves: Vec<_> = node
                        .prey_slots()
                        .map(|(_, child)| build_tree(tree, child))
                        .collect();
                    Tree::new(label).with_leaves(leaves)
                }
                None => Tree::new("?".to_string()),
            }
        }

        build_tree(self, self.cursor_index())
    }
}
