//! Read-only traversals over the garden tree.
//!
//! Depth-first iterators are stack based: children are pushed in reverse so
//! they are visited left-to-right. The level-order iterator is queue based.
//! For a fixed tree the order depends only on child insertion order.

use std::collections::VecDeque;

use tracing::instrument;

use crate::domain::garden::{Component, Garden, NodeId};

/// Explicit traversal protocol on top of [`Iterator`].
///
/// `first()` discards any traversal state, reseeds from the root and returns
/// the first match. `next()` continues from there. Once exhausted, the
/// traversal only restarts through `first()`.
pub trait Traversal: Iterator {
    fn first(&mut self) -> Option<Self::Item>;

    /// True once no further item will be yielded; `next()` then returns `None`.
    fn is_done(&self) -> bool;
}

/// Pre-order depth-first walk shared by the filtered iterators.
///
/// The next match is looked up one step ahead, so `is_done` turns true as
/// soon as the last match has been handed out.
#[derive(Debug)]
struct DepthFirst<'a> {
    garden: &'a Garden,
    root: NodeId,
    keep: fn(&Component) -> bool,
    stack: Vec<NodeId>,
    upcoming: Option<(NodeId, &'a Component)>,
}

impl<'a> DepthFirst<'a> {
    fn new(garden: &'a Garden, root: NodeId, keep: fn(&Component) -> bool) -> Self {
        let mut walk = Self {
            garden,
            root,
            keep,
            stack: Vec::new(),
            upcoming: None,
        };
        walk.reset();
        walk
    }

    fn reset(&mut self) {
        self.stack.clear();
        if self.garden.contains(self.root) {
            self.stack.push(self.root);
        }
        self.upcoming = self.seek();
    }

    fn seek(&mut self) -> Option<(NodeId, &'a Component)> {
        let garden = self.garden;
        while let Some(current_idx) = self.stack.pop() {
            let Some(component) = garden.component(current_idx) else {
                continue;
            };
            // Push children in reverse order for left-to-right traversal
            for &child in component.children().iter().rev() {
                self.stack.push(child);
            }
            if (self.keep)(component) {
                return Some((current_idx, component));
            }
        }
        None
    }

    fn advance(&mut self) -> Option<(NodeId, &'a Component)> {
        let current = self.upcoming.take()?;
        self.upcoming = self.seek();
        Some(current)
    }

    fn is_done(&self) -> bool {
        self.upcoming.is_none()
    }
}

/// Yields plants only, descending through sections.
#[derive(Debug)]
pub struct PlantIter<'a> {
    walk: DepthFirst<'a>,
}

impl<'a> PlantIter<'a> {
    pub fn new(garden: &'a Garden, root: NodeId) -> Self {
        Self {
            walk: DepthFirst::new(garden, root, Component::is_leaf),
        }
    }
}

impl<'a> Iterator for PlantIter<'a> {
    type Item = (NodeId, &'a Component);

    #[instrument(level = "trace", skip(self))]
    fn next(&mut self) -> Option<Self::Item> {
        self.walk.advance()
    }
}

impl Traversal for PlantIter<'_> {
    fn first(&mut self) -> Option<Self::Item> {
        self.walk.reset();
        self.next()
    }

    fn is_done(&self) -> bool {
        self.walk.is_done()
    }
}

/// Yields sections only, still descending into their children.
#[derive(Debug)]
pub struct SectionIter<'a> {
    walk: DepthFirst<'a>,
}

impl<'a> SectionIter<'a> {
    pub fn new(garden: &'a Garden, root: NodeId) -> Self {
        Self {
            walk: DepthFirst::new(garden, root, is_section),
        }
    }
}

fn is_section(component: &Component) -> bool {
    !component.is_leaf()
}

impl<'a> Iterator for SectionIter<'a> {
    type Item = (NodeId, &'a Component);

    #[instrument(level = "trace", skip(self))]
    fn next(&mut self) -> Option<Self::Item> {
        self.walk.advance()
    }
}

impl Traversal for SectionIter<'_> {
    fn first(&mut self) -> Option<Self::Item> {
        self.walk.reset();
        self.next()
    }

    fn is_done(&self) -> bool {
        self.walk.is_done()
    }
}

/// Breadth-first walk yielding every node, root included.
#[derive(Debug)]
pub struct LevelOrderIter<'a> {
    garden: &'a Garden,
    root: NodeId,
    queue: VecDeque<NodeId>,
    exhausted: bool,
}

impl<'a> LevelOrderIter<'a> {
    pub fn new(garden: &'a Garden, root: NodeId) -> Self {
        let mut iter = Self {
            garden,
            root,
            queue: VecDeque::new(),
            exhausted: false,
        };
        iter.reset();
        iter
    }

    fn reset(&mut self) {
        self.queue.clear();
        self.exhausted = false;
        if self.garden.contains(self.root) {
            self.queue.push_back(self.root);
        }
    }
}

impl<'a> Iterator for LevelOrderIter<'a> {
    type Item = (NodeId, &'a Component);

    #[instrument(level = "trace", skip(self))]
    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.queue.pop_front() {
            if let Some(component) = self.garden.component(current_idx) {
                self.queue.extend(component.children().iter().copied());
                return Some((current_idx, component));
            }
        }
        self.exhausted = true;
        None
    }
}

impl Traversal for LevelOrderIter<'_> {
    fn first(&mut self) -> Option<Self::Item> {
        self.reset();
        self.next()
    }

    fn is_done(&self) -> bool {
        self.exhausted || self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::garden::Section;

    #[test]
    fn test_empty_section_yields_no_plants() {
        let garden = Garden::new("greenhouse");
        let mut iter = garden.plants(garden.root());
        assert!(iter.is_done());
        assert!(iter.first().is_none());
        assert!(iter.is_done());
    }

    #[test]
    fn test_section_iter_includes_root() {
        let mut garden = Garden::new("greenhouse");
        let root = garden.root();
        garden.add(root, Section::new("herbs")).unwrap();
        let names: Vec<&str> = garden.sections(root).map(|(_, c)| c.name()).collect();
        assert_eq!(names, vec!["greenhouse", "herbs"]);
    }
}
