use std::fmt;

use generational_arena::{Arena, Index};
use tracing::{debug, instrument};

use crate::domain::error::{GardenError, GardenResult};
use crate::domain::iter::{LevelOrderIter, PlantIter, SectionIter};
use crate::domain::plant::Plant;

/// Handle of a node in the garden arena.
///
/// A handle of a removed node never resolves again.
pub type NodeId = Index;

/// Composite node holding an ordered list of children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    name: String,
    children: Vec<NodeId>,
}

impl Section {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Children in insertion order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/", self.name)
    }
}

/// Any node of the garden: a section or a plant.
#[derive(Debug)]
pub enum Component {
    Section(Section),
    Plant(Plant),
}

impl Component {
    pub fn is_leaf(&self) -> bool {
        matches!(self, Component::Plant(_))
    }

    pub fn name(&self) -> &str {
        match self {
            Component::Section(section) => section.name(),
            Component::Plant(plant) => plant.name(),
        }
    }

    pub fn as_plant(&self) -> Option<&Plant> {
        match self {
            Component::Plant(plant) => Some(plant),
            Component::Section(_) => None,
        }
    }

    pub fn as_plant_mut(&mut self) -> Option<&mut Plant> {
        match self {
            Component::Plant(plant) => Some(plant),
            Component::Section(_) => None,
        }
    }

    pub fn as_section(&self) -> Option<&Section> {
        match self {
            Component::Section(section) => Some(section),
            Component::Plant(_) => None,
        }
    }

    pub fn into_plant(self) -> Option<Plant> {
        match self {
            Component::Plant(plant) => Some(plant),
            Component::Section(_) => None,
        }
    }

    /// Children of this node; empty for plants.
    pub fn children(&self) -> &[NodeId] {
        match self {
            Component::Section(section) => section.children(),
            Component::Plant(_) => &[],
        }
    }
}

impl From<Plant> for Component {
    fn from(plant: Plant) -> Self {
        Component::Plant(plant)
    }
}

impl From<Section> for Component {
    fn from(section: Section) -> Self {
        Component::Section(section)
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Component::Section(section) => section.fmt(f),
            Component::Plant(plant) => plant.fmt(f),
        }
    }
}

/// Tree node in the arena-based garden.
#[derive(Debug)]
pub struct GardenNode {
    pub component: Component,
    /// Index of parent node in the arena, None for the root
    pub parent: Option<NodeId>,
}

/// Arena-based composite tree of sections and plants.
///
/// Every node except the root has exactly one parent: children are created
/// by [`Garden::add`], which takes the component by value, so a node can never
/// be attached twice. Removing a node releases its whole subtree.
#[derive(Debug)]
pub struct Garden {
    arena: Arena<GardenNode>,
    root: NodeId,
}

impl Garden {
    pub fn new(root_name: impl Into<String>) -> Self {
        let mut arena = Arena::new();
        let root = arena.insert(GardenNode {
            component: Component::Section(Section::new(root_name)),
            parent: None,
        });
        Self { arena, root }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of live nodes, root included.
    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.arena.contains(id)
    }

    pub fn get_node(&self, id: NodeId) -> Option<&GardenNode> {
        self.arena.get(id)
    }

    pub fn component(&self, id: NodeId) -> Option<&Component> {
        self.arena.get(id).map(|node| &node.component)
    }

    pub fn plant(&self, id: NodeId) -> Option<&Plant> {
        self.component(id).and_then(Component::as_plant)
    }

    pub fn plant_mut(&mut self, id: NodeId) -> Option<&mut Plant> {
        self.arena
            .get_mut(id)
            .and_then(|node| node.component.as_plant_mut())
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.arena.get(id).and_then(|node| node.parent)
    }

    /// True when `id` is reachable from the root.
    pub fn is_attached(&self, id: NodeId) -> bool {
        let mut current = id;
        loop {
            if current == self.root {
                return true;
            }
            match self.parent(current) {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }

    pub fn is_leaf(&self, id: NodeId) -> GardenResult<bool> {
        Ok(self.node(id)?.component.is_leaf())
    }

    /// Append a child to a section.
    #[instrument(level = "trace", skip(self, child))]
    pub fn add(&mut self, parent: NodeId, child: impl Into<Component>) -> GardenResult<NodeId> {
        self.section_mut(parent, "add a child")?;
        let child = child.into();
        if child.name().is_empty() {
            return Err(GardenError::invalid("cannot add a component with an empty name"));
        }

        debug!("add: '{}' under {:?}", child.name(), parent);
        let child_idx = self.arena.insert(GardenNode {
            component: child,
            parent: Some(parent),
        });
        self.section_mut(parent, "add a child")?
            .children
            .push(child_idx);
        Ok(child_idx)
    }

    /// Detach a direct child and hand its component back.
    ///
    /// Descendants of a detached section are released. Returns `None` when
    /// `child` is not a direct child of `parent`.
    #[instrument(level = "trace", skip(self))]
    pub fn detach(&mut self, parent: NodeId, child: NodeId) -> GardenResult<Option<Component>> {
        let section = self.section_mut(parent, "remove a child")?;
        let Some(pos) = section.children.iter().position(|&c| c == child) else {
            return Ok(None);
        };
        section.children.remove(pos);
        Ok(self.release(child))
    }

    /// Remove a direct child and its subtree. No-op when absent.
    pub fn remove(&mut self, parent: NodeId, child: NodeId) -> GardenResult<bool> {
        Ok(self.detach(parent, child)?.is_some())
    }

    pub fn get_child(&self, id: NodeId, index: usize) -> GardenResult<NodeId> {
        match &self.node(id)?.component {
            Component::Section(section) => {
                section
                    .children
                    .get(index)
                    .copied()
                    .ok_or(GardenError::OutOfRange {
                        index,
                        len: section.children.len(),
                    })
            }
            Component::Plant(plant) => Err(GardenError::leaf("get a child", plant.name())),
        }
    }

    /// Children in insertion order; empty for plants and unknown handles.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.component(id).map(Component::children).unwrap_or(&[])
    }

    /// Depth-first plant iterator rooted at a section.
    pub fn create_iterator(&self, id: NodeId) -> GardenResult<PlantIter<'_>> {
        match &self.node(id)?.component {
            Component::Section(_) => Ok(PlantIter::new(self, id)),
            Component::Plant(plant) => Err(GardenError::leaf("create an iterator", plant.name())),
        }
    }

    pub fn plants(&self, from: NodeId) -> PlantIter<'_> {
        PlantIter::new(self, from)
    }

    pub fn sections(&self, from: NodeId) -> SectionIter<'_> {
        SectionIter::new(self, from)
    }

    pub fn level_order(&self, from: NodeId) -> LevelOrderIter<'_> {
        LevelOrderIter::new(self, from)
    }

    /// Sellable iff a sellable plant, or a non-empty section of sellable children.
    pub fn can_sell(&self, id: NodeId) -> GardenResult<bool> {
        match &self.node(id)?.component {
            Component::Plant(plant) => Ok(plant.can_sell()),
            Component::Section(section) => {
                if section.children.is_empty() {
                    return Ok(false);
                }
                for &child in &section.children {
                    if !self.can_sell(child)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
        }
    }

    #[instrument(level = "debug", skip(self))]
    pub fn water(&mut self, id: NodeId) -> GardenResult<()> {
        self.broadcast(id, |plant| plant.water())
    }

    #[instrument(level = "debug", skip(self))]
    pub fn expose_to_sunlight(&mut self, id: NodeId) -> GardenResult<()> {
        self.broadcast(id, |plant| plant.expose_to_sunlight())
    }

    #[instrument(level = "debug", skip(self))]
    pub fn lose_water(&mut self, id: NodeId) -> GardenResult<()> {
        self.broadcast(id, |plant| plant.lose_water())
    }

    #[instrument(level = "debug", skip(self))]
    pub fn grow(&mut self, id: NodeId) -> GardenResult<()> {
        self.broadcast(id, |plant| plant.grow())
    }

    /// Gated growth for every plant below `id`; returns how many grew.
    #[instrument(level = "debug", skip(self))]
    pub fn try_grow(&mut self, id: NodeId) -> GardenResult<usize> {
        let mut grown = 0;
        self.broadcast(id, |plant| {
            if plant.try_grow() {
                grown += 1;
            }
        })?;
        Ok(grown)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn advance_age(&mut self, id: NodeId, days: u32) -> GardenResult<()> {
        self.broadcast(id, |plant| plant.advance_age(days))
    }

    /// Depth of the tree, counting the root as level 1.
    pub fn depth(&self) -> usize {
        self.calculate_depth(self.root)
    }

    fn calculate_depth(&self, node_idx: NodeId) -> usize {
        1 + self
            .children(node_idx)
            .iter()
            .map(|&child| self.calculate_depth(child))
            .max()
            .unwrap_or(0)
    }

    fn node(&self, id: NodeId) -> GardenResult<&GardenNode> {
        self.arena
            .get(id)
            .ok_or_else(|| GardenError::invalid(format!("unknown node {id:?}")))
    }

    fn section_mut(&mut self, id: NodeId, operation: &'static str) -> GardenResult<&mut Section> {
        let node = self
            .arena
            .get_mut(id)
            .ok_or_else(|| GardenError::invalid(format!("unknown node {id:?}")))?;
        match &mut node.component {
            Component::Section(section) => Ok(section),
            Component::Plant(plant) => Err(GardenError::leaf(operation, plant.name())),
        }
    }

    /// Apply `f` to every plant below `from`, in depth-first insertion order.
    fn broadcast<F>(&mut self, from: NodeId, mut f: F) -> GardenResult<()>
    where
        F: FnMut(&mut Plant),
    {
        self.node(from)?;
        let targets: Vec<NodeId> = self.plants(from).map(|(idx, _)| idx).collect();
        for idx in targets {
            if let Some(plant) = self.plant_mut(idx) {
                f(plant);
            }
        }
        Ok(())
    }

    /// Drop `id` and all of its descendants from the arena.
    fn release(&mut self, id: NodeId) -> Option<Component> {
        let descendants: Vec<NodeId> = self
            .level_order(id)
            .skip(1)
            .map(|(idx, _)| idx)
            .collect();
        for idx in descendants {
            self.arena.remove(idx);
        }
        let mut node = self.arena.remove(id)?;
        if let Component::Section(section) = &mut node.component {
            section.children.clear();
        }
        Some(node.component)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::strategy::{LowSunlight, LowWaterLoss};

    fn plant(name: &str) -> Plant {
        Plant::new(name, 5.0, Box::new(LowWaterLoss), Box::new(LowSunlight))
    }

    #[test]
    fn test_new_garden_has_only_root() {
        let garden = Garden::new("greenhouse");
        assert_eq!(garden.node_count(), 1);
        assert_eq!(garden.depth(), 1);
        assert!(garden.parent(garden.root()).is_none());
    }

    #[test]
    fn test_release_drops_subtree() {
        let mut garden = Garden::new("greenhouse");
        let root = garden.root();
        let herbs = garden.add(root, Section::new("herbs")).unwrap();
        let basil = garden.add(herbs, plant("basil")).unwrap();
        assert_eq!(garden.node_count(), 3);

        assert!(garden.remove(root, herbs).unwrap());
        assert_eq!(garden.node_count(), 1);
        assert!(!garden.contains(basil));
    }

    #[test]
    fn test_is_attached_follows_parents() {
        let mut garden = Garden::new("greenhouse");
        let root = garden.root();
        let a = garden.add(root, Section::new("a")).unwrap();
        let b = garden.add(a, Section::new("b")).unwrap();
        assert!(garden.is_attached(b));
        garden.remove(root, a).unwrap();
        assert!(!garden.is_attached(b));
    }
}
