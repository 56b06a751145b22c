//! Conversion of the garden into a printable `termtree`.

use termtree::Tree;
use tracing::instrument;

use crate::domain::{Garden, NodeId};

pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

impl TreeNodeConvert for Garden {
    #[instrument(level = "debug", skip(self))]
    fn to_tree_string(&self) -> Tree<String> {
        fn build_tree(garden: &Garden, node_idx: NodeId, parent_tree: &mut Tree<String>) {
            for &child_idx in garden.children(node_idx) {
                if let Some(child) = garden.component(child_idx) {
                    let mut child_tree = Tree::new(child.to_string());
                    build_tree(garden, child_idx, &mut child_tree);
                    parent_tree.push(child_tree);
                }
            }
        }

        let root_idx = self.root();
        let label = self
            .component(root_idx)
            .map(|c| c.to_string())
            .unwrap_or_else(|| "Empty garden".to_string());
        let mut tree = Tree::new(label);
        build_tree(self, root_idx, &mut tree);
        tree
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LowSunlight, LowWaterLoss, Plant, Section};

    #[test]
    fn test_render_lists_sections_and_plants() {
        let mut garden = Garden::new("greenhouse");
        let root = garden.root();
        let herbs = garden.add(root, Section::new("herbs")).unwrap();
        garden
            .add(herbs, Plant::new("basil", 4.0, Box::new(LowWaterLoss), Box::new(LowSunlight)))
            .unwrap();

        let rendered = garden.to_tree_string().to_string();
        assert!(rendered.starts_with("greenhouse/"));
        assert!(rendered.contains("herbs/"));
        assert!(rendered.contains("basil [seedling]"));
    }
}
