//! Nursery registry
//!
//! Name-indexed facade over the garden tree: section lookup and creation,
//! plant routing via the catalog, lookup, removal and dead-plant cleanup.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::application::services::PlantFactory;
use crate::application::ApplicationResult;
use crate::domain::{Component, Garden, GardenError, NodeId, Plant, Section};
use crate::infrastructure::traits::PlantCatalog;

/// Default name of the root section.
pub const DEFAULT_ROOT_NAME: &str = "greenhouse";

/// Registry over a garden tree.
///
/// Every indexed section is reachable from the root. Sections added through
/// [`Nursery::garden_mut`] bypass the index; they are picked up lazily by
/// [`Nursery::find_section`] or eagerly by [`Nursery::reconcile`].
pub struct Nursery {
    garden: Garden,
    root_name: String,
    section_index: HashMap<String, NodeId>,
    catalog: Arc<dyn PlantCatalog>,
}

impl Nursery {
    pub fn new(root_name: impl Into<String>, catalog: Arc<dyn PlantCatalog>) -> Self {
        let root_name = root_name.into();
        let garden = Garden::new(root_name.clone());
        let mut section_index = HashMap::new();
        section_index.insert(root_name.clone(), garden.root());
        Self {
            garden,
            root_name,
            section_index,
            catalog,
        }
    }

    pub fn garden(&self) -> &Garden {
        &self.garden
    }

    /// Direct access to the tree, e.g. for maintenance broadcasts.
    pub fn garden_mut(&mut self) -> &mut Garden {
        &mut self.garden
    }

    pub fn root(&self) -> NodeId {
        self.garden.root()
    }

    pub fn root_name(&self) -> &str {
        &self.root_name
    }

    pub fn plant(&self, id: NodeId) -> Option<&Plant> {
        self.garden.plant(id)
    }

    /// Create (or return the existing) section `name` under the root.
    pub fn add_section(&mut self, name: &str) -> ApplicationResult<NodeId> {
        let root_name = self.root_name.clone();
        self.add_section_under(name, &root_name)
    }

    /// Create (or return the existing) section `name` under `parent`.
    ///
    /// An empty `parent` means the root.
    #[instrument(level = "debug", skip(self))]
    pub fn add_section_under(&mut self, name: &str, parent: &str) -> ApplicationResult<NodeId> {
        if name.is_empty() {
            return Err(GardenError::invalid("section name cannot be empty").into());
        }
        let parent_idx = self.find_section(parent).ok_or_else(|| {
            GardenError::invalid(format!("parent section '{parent}' does not exist"))
        })?;

        if let Some(existing) = self.find_section(name) {
            debug!("add_section: '{}' already exists", name);
            return Ok(existing);
        }

        let section_idx = self.garden.add(parent_idx, Section::new(name))?;
        self.section_index.insert(name.to_string(), section_idx);
        Ok(section_idx)
    }

    /// Resolve a section by name; an empty name means the root.
    ///
    /// Stale index entries are purged; sections missing from the index are
    /// searched in the tree and indexed when found.
    pub fn find_section(&mut self, name: &str) -> Option<NodeId> {
        if name.is_empty() {
            return Some(self.garden.root());
        }
        if let Some(&idx) = self.section_index.get(name) {
            if self.is_live_section(idx, name) {
                return Some(idx);
            }
            debug!("find_section: purging stale index entry '{}'", name);
            self.section_index.remove(name);
        }

        let found = self
            .garden
            .sections(self.garden.root())
            .find(|(_, component)| component.name() == name)
            .map(|(idx, _)| idx);
        if let Some(idx) = found {
            debug!("find_section: indexing unregistered section '{}'", name);
            self.section_index.insert(name.to_string(), idx);
        }
        found
    }

    /// Rebuild the index from the tree. The first section of a name in
    /// depth-first order wins over later duplicates.
    pub fn reconcile(&mut self) {
        let stale: Vec<String> = self
            .section_index
            .iter()
            .filter(|(name, &idx)| !self.is_live_section(idx, name))
            .map(|(name, _)| name.clone())
            .collect();
        for name in stale {
            self.section_index.remove(&name);
        }

        let reachable: Vec<(String, NodeId)> = self
            .garden
            .sections(self.garden.root())
            .map(|(idx, component)| (component.name().to_string(), idx))
            .collect();
        for (name, idx) in reachable {
            self.section_index.entry(name).or_insert(idx);
        }
    }

    /// Names of the indexed sections, sorted.
    pub fn section_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.section_index.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// True when every indexed section is reachable from the root and every
    /// reachable section name is indexed.
    pub fn is_consistent(&self) -> bool {
        let indexed_live = self
            .section_index
            .iter()
            .all(|(name, &idx)| self.is_live_section(idx, name));
        let reachable_indexed = self
            .garden
            .sections(self.garden.root())
            .all(|(_, component)| self.section_index.contains_key(component.name()));
        indexed_live && reachable_indexed
    }

    /// Insert a plant into the section its catalog entry names.
    ///
    /// Plants unknown to the catalog go to the root.
    #[instrument(level = "debug", skip(self, plant), fields(plant = %plant.name()))]
    pub fn add_plant(&mut self, plant: Plant) -> ApplicationResult<NodeId> {
        let target = match self.catalog.section_for(plant.name()) {
            Some(section) => self.add_section(&section)?,
            None => self.garden.root(),
        };
        Ok(self.garden.add(target, plant)?)
    }

    /// Create and insert plants for a `name -> count` selection.
    pub fn stock(
        &mut self,
        factory: &PlantFactory,
        selection: &BTreeMap<String, u32>,
    ) -> ApplicationResult<usize> {
        let mut added = 0;
        for (name, &count) in selection {
            for _ in 0..count {
                let plant = factory.create(name)?;
                self.add_plant(plant)?;
                added += 1;
            }
        }
        info!("stocked {} plants", added);
        Ok(added)
    }

    /// First plant named `name` in depth-first order.
    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.find_where(name, |_| true)
    }

    /// First mature plant named `name` in depth-first order.
    pub fn find_mature(&self, name: &str) -> Option<NodeId> {
        self.find_where(name, Plant::is_mature)
    }

    fn find_where(&self, name: &str, keep: fn(&Plant) -> bool) -> Option<NodeId> {
        self.garden
            .plants(self.garden.root())
            .find(|(_, component)| {
                component
                    .as_plant()
                    .is_some_and(|plant| plant.name() == name && keep(plant))
            })
            .map(|(idx, _)| idx)
    }

    /// Remove a plant from whichever section holds it.
    pub fn remove_plant(&mut self, id: NodeId) -> bool {
        if self.garden.plant(id).is_none() {
            return false;
        }
        let Some(parent) = self.garden.parent(id) else {
            return false;
        };
        self.garden.remove(parent, id).unwrap_or(false)
    }

    pub fn remove_plant_by_name(&mut self, name: &str) -> bool {
        if name.is_empty() {
            return false;
        }
        match self.find(name) {
            Some(id) => self.remove_plant(id),
            None => false,
        }
    }

    /// Detach the first mature plant named `name` and hand it over.
    #[instrument(level = "debug", skip(self))]
    pub fn take_mature(&mut self, name: &str) -> Option<Plant> {
        let id = self.find_mature(name)?;
        let parent = self.garden.parent(id)?;
        self.garden
            .detach(parent, id)
            .ok()
            .flatten()
            .and_then(Component::into_plant)
    }

    /// Remove every dead plant; returns how many were removed.
    #[instrument(level = "debug", skip(self))]
    pub fn clear_all_dead(&mut self) -> usize {
        let dead: Vec<NodeId> = self
            .garden
            .plants(self.garden.root())
            .filter(|(_, component)| component.as_plant().is_some_and(Plant::is_dead))
            .map(|(idx, _)| idx)
            .collect();
        let removed = dead
            .into_iter()
            .filter(|&idx| self.remove_plant(idx))
            .count();
        if removed > 0 {
            info!("cleared {} dead plants", removed);
        }
        removed
    }

    fn is_live_section(&self, idx: NodeId, name: &str) -> bool {
        self.garden
            .component(idx)
            .is_some_and(|c| !c.is_leaf() && c.name() == name)
            && self.garden.is_attached(idx)
    }
}

impl std::fmt::Debug for Nursery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Nursery")
            .field("root_name", &self.root_name)
            .field("sections", &self.section_names())
            .field("nodes", &self.garden.node_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::traits::BuiltinCatalog;

    #[test]
    fn test_root_is_indexed() {
        let mut nursery = Nursery::new(DEFAULT_ROOT_NAME, Arc::new(BuiltinCatalog::new()));
        let root = nursery.root();
        assert_eq!(nursery.find_section(DEFAULT_ROOT_NAME), Some(root));
        assert_eq!(nursery.find_section(""), Some(root));
        assert!(nursery.is_consistent());
    }
}
