use std::collections::{HashMap, HashSet};
use std::fmt;

use generational_arena::{Arena, Index};
use termtree::Tree;
use tracing::{instrument, warn};
use uuid::Uuid;

use crate::color::Color;
use crate::errors::{StoreError, StoreResult};
use crate::tag::Tag;

/// Tree node in the arena-based tag hierarchy.
#[derive(Debug)]
pub struct TagNode {
    /// Tag payload for this node
    pub tag: Tag,
    /// Index of the parent node in the arena, None for root tags
    pub parent: Option<Index>,
    /// Indices of child nodes in the arena, in append order
    pub children: Vec<Index>,
}

/// Arena-based store holding every tag of a session.
///
/// Uses a generational arena for memory-safe node references. `lookup`
/// is the authoritative name index, `data` keeps root tags in creation
/// order, and `used_colors` tracks every color handed out by
/// [`generate_color`](TagStore::generate_color).
#[derive(Debug)]
pub struct TagStore {
    arena: Arena<TagNode>,
    lookup: HashMap<String, Index>,
    data: Vec<Index>,
    used_colors: HashSet<Color>,
}

impl Default for TagStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TagStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tag store. Holds {} tag(s)", self.lookup.len())
    }
}

impl TagStore {
    /// Element name used when tags are written to the XML task file.
    /// The persistence format itself lives outside this crate.
    pub const XML_TAG: &str = "tag";

    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            lookup: HashMap::new(),
            data: Vec::new(),
            used_colors: HashSet::new(),
        }
    }

    /// Get a tag by name.
    #[instrument(level = "trace", skip(self))]
    pub fn get(&self, name: &str) -> StoreResult<&Tag> {
        self.lookup
            .get(name)
            .and_then(|&idx| self.arena.get(idx))
            .map(|node| &node.tag)
            .ok_or_else(|| StoreError::NotFound(name.to_string()))
    }

    /// Mutable access for icon/color/actionable edits.
    #[instrument(level = "trace", skip(self))]
    pub fn get_mut(&mut self, name: &str) -> StoreResult<&mut Tag> {
        self.lookup
            .get(name)
            .copied()
            .and_then(|idx| self.arena.get_mut(idx))
            .map(|node| &mut node.tag)
            .ok_or_else(|| StoreError::NotFound(name.to_string()))
    }

    #[instrument(level = "trace", skip(self))]
    pub fn get_by_id(&self, id: Uuid) -> Option<&Tag> {
        self.index_by_id(id)
            .and_then(|idx| self.arena.get(idx))
            .map(|node| &node.tag)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lookup.contains_key(name)
    }

    /// Create a new tag and add it to the store.
    ///
    /// Idempotent by name: an existing tag is returned unchanged, same
    /// id, no mutation. A fresh tag is registered in the lookup table
    /// and attached to `parent`'s children, or to the root list when no
    /// parent is given. An unknown parent id degrades to root placement;
    /// the operation never fails.
    #[instrument(level = "debug", skip(self))]
    pub fn new_tag(&mut self, name: &str, parent: Option<Uuid>) -> &Tag {
        if let Some(&idx) = self.lookup.get(name) {
            return &self.arena[idx].tag;
        }

        let parent_idx = parent.and_then(|id| {
            let found = self.index_by_id(id);
            if found.is_none() {
                warn!("unknown parent id {id}, creating '{name}' as root tag");
            }
            found
        });

        let node = TagNode {
            tag: Tag::new(Uuid::new_v4(), name),
            parent: parent_idx,
            children: Vec::new(),
        };
        let node_idx = self.arena.insert(node);
        self.lookup.insert(name.to_string(), node_idx);

        if let Some(p) = parent_idx {
            if let Some(parent_node) = self.arena.get_mut(p) {
                parent_node.children.push(node_idx);
            }
        } else {
            self.data.push(node_idx);
        }

        &self.arena[node_idx].tag
    }

    /// Count tags: root-level only, or every registered tag.
    #[instrument(level = "trace", skip(self))]
    pub fn count(&self, root_only: bool) -> usize {
        if root_only {
            self.data.len()
        } else {
            self.lookup.len()
        }
    }

    /// Direct children of the named tag, in append order.
    pub fn children_of(&self, name: &str) -> StoreResult<Vec<&Tag>> {
        let idx = self.index_of(name)?;
        let node = self
            .arena
            .get(idx)
            .ok_or_else(|| StoreError::NotFound(name.to_string()))?;
        Ok(node
            .children
            .iter()
            .filter_map(|&child| self.arena.get(child))
            .map(|child| &child.tag)
            .collect())
    }

    /// Parent of the named tag, None for root tags.
    pub fn parent_of(&self, name: &str) -> StoreResult<Option<&Tag>> {
        let idx = self.index_of(name)?;
        Ok(self
            .arena
            .get(idx)
            .and_then(|node| node.parent)
            .and_then(|p| self.arena.get(p))
            .map(|node| &node.tag))
    }

    /// Move `child` under `parent`, detaching it from its current
    /// position. Rejects self-parenting and descendant parents.
    #[instrument(level = "debug", skip(self))]
    pub fn set_parent(&mut self, child: &str, parent: &str) -> StoreResult<()> {
        let child_idx = self.index_of(child)?;
        let parent_idx = self.index_of(parent)?;

        if child_idx == parent_idx || self.has_ancestor(parent_idx, child_idx) {
            return Err(StoreError::Cycle {
                child: child.to_string(),
                parent: parent.to_string(),
            });
        }

        self.detach(child_idx);
        if let Some(parent_node) = self.arena.get_mut(parent_idx) {
            parent_node.children.push(child_idx);
        }
        if let Some(child_node) = self.arena.get_mut(child_idx) {
            child_node.parent = Some(parent_idx);
        }
        Ok(())
    }

    /// Move `child` to the root list. No-op when already a root.
    #[instrument(level = "debug", skip(self))]
    pub fn unparent(&mut self, child: &str) -> StoreResult<()> {
        let idx = self.index_of(child)?;
        if self.arena.get(idx).and_then(|node| node.parent).is_none() {
            return Ok(());
        }

        self.detach(idx);
        if let Some(node) = self.arena.get_mut(idx) {
            node.parent = None;
        }
        self.data.push(idx);
        Ok(())
    }

    /// Remove the named tag and its whole subtree. Returns the removed
    /// tag.
    #[instrument(level = "debug", skip(self))]
    pub fn remove(&mut self, name: &str) -> StoreResult<Tag> {
        let root_idx = self.index_of(name)?;
        self.detach(root_idx);

        let mut removed = None;
        let mut stack = vec![root_idx];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.arena.remove(current) {
                stack.extend(node.children.iter().copied());
                self.lookup.remove(node.tag.name());
                if current == root_idx {
                    removed = Some(node.tag);
                }
            }
        }

        removed.ok_or_else(|| StoreError::NotFound(name.to_string()))
    }

    /// Rename a tag, re-keying the lookup table. The id is unchanged.
    #[instrument(level = "debug", skip(self))]
    pub fn rename(&mut self, old: &str, new: &str) -> StoreResult<()> {
        if old == new {
            return Ok(());
        }
        if self.lookup.contains_key(new) {
            return Err(StoreError::Duplicate(new.to_string()));
        }

        let idx = self
            .lookup
            .remove(old)
            .ok_or_else(|| StoreError::NotFound(old.to_string()))?;
        if let Some(node) = self.arena.get_mut(idx) {
            node.tag.set_name(new);
        }
        self.lookup.insert(new.to_string(), idx);
        Ok(())
    }

    /// Preorder iteration over every tag, roots first, children in
    /// append order.
    #[instrument(level = "trace", skip(self))]
    pub fn iter(&self) -> TagIter<'_> {
        TagIter::new(self)
    }

    /// Print the store summary and a flat line per tag.
    pub fn print_list(&self) {
        println!("{self}");

        for tag in self.iter() {
            println!("- \"@{}\" with id \"{}\"", tag.name(), tag.id());
        }
    }

    /// Print the store summary and every root as an indented tree.
    pub fn print_tree(&self) {
        println!("{self}");
        for line in self.tree_string().lines() {
            println!("{line}");
        }
    }

    /// Render all root trees depth-first, parent before children.
    pub fn tree_string(&self) -> String {
        self.data
            .iter()
            .map(|&root| {
                let rendered = self.subtree(root).to_string();
                rendered.trim_end_matches('\n').to_string()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn subtree(&self, idx: Index) -> Tree<String> {
        match self.arena.get(idx) {
            Some(node) => {
                let leaves: Vec<_> = node
                    .children
                    .iter()
                    .map(|&child| self.subtree(child))
                    .collect();
                Tree::new(node.tag.to_string()).with_leaves(leaves)
            }
            None => Tree::new(String::new()),
        }
    }

    /// Generate a random color that isn't already used and register it.
    ///
    /// At least one candidate is always drawn; redraws happen only on
    /// collision with a previously returned color.
    #[instrument(level = "debug", skip(self))]
    pub fn generate_color(&mut self) -> Color {
        let mut rng = rand::thread_rng();

        let mut color = Color::random(&mut rng);
        while self.used_colors.contains(&color) {
            color = Color::random(&mut rng);
        }

        self.used_colors.insert(color);
        color
    }

    fn index_of(&self, name: &str) -> StoreResult<Index> {
        self.lookup
            .get(name)
            .copied()
            .ok_or_else(|| StoreError::NotFound(name.to_string()))
    }

    fn index_by_id(&self, id: Uuid) -> Option<Index> {
        self.arena
            .iter()
            .find(|(_, node)| node.tag.id() == id)
            .map(|(idx, _)| idx)
    }

    /// True when `ancestor` appears on the parent chain of `start`.
    fn has_ancestor(&self, start: Index, ancestor: Index) -> bool {
        let mut current = self.arena.get(start).and_then(|node| node.parent);
        while let Some(idx) = current {
            if idx == ancestor {
                return true;
            }
            current = self.arena.get(idx).and_then(|node| node.parent);
        }
        false
    }

    /// Unhook a node from its parent's child list or the root list.
    fn detach(&mut self, idx: Index) {
        let parent = self.arena.get(idx).and_then(|node| node.parent);
        match parent {
            Some(p) => {
                if let Some(parent_node) = self.arena.get_mut(p) {
                    parent_node.children.retain(|&child| child != idx);
                }
            }
            None => self.data.retain(|&root| root != idx),
        }
    }
}

pub struct TagIter<'a> {
    store: &'a TagStore,
    stack: Vec<Index>,
}

impl<'a> TagIter<'a> {
    fn new(store: &'a TagStore) -> Self {
        let stack = store.data.iter().rev().copied().collect();
        Self { store, stack }
    }
}

impl<'a> Iterator for TagIter<'a> {
    type Item = &'a Tag;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.store.arena.get(current_idx) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children.iter().rev() {
                    self.stack.push(child);
                }
                return Some(&node.tag);
            }
        }
        None
    }
}
