// crates/spaces-layout/src/lib.rs

use spaces_core::{
    Anchor, ChangeListener, Result, SpaceChanges, SpaceId, SpaceKind, SpaceNode, SpaceProps,
    SpacesError,
};
use std::collections::HashMap;
use tracing::{debug, warn};

pub mod recalc;
pub mod resolve;

pub use resolve::*;

/// Registry of every space belonging to one layout root.
///
/// The store owns all nodes; parents and children refer to each other by id.
#[derive(Debug, Default)]
pub struct SpaceStore {
    spaces: HashMap<SpaceId, SpaceNode>,
    /// Parentless spaces in registration order
    roots: Vec<SpaceId>,
    next_id: u64,
}

impl SpaceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.spaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spaces.is_empty()
    }

    pub fn get_space(&self, id: &str) -> Option<&SpaceNode> {
        self.spaces.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.spaces.contains_key(id)
    }

    pub fn spaces(&self) -> impl Iterator<Item = &SpaceNode> {
        self.spaces.values()
    }

    pub fn roots(&self) -> &[SpaceId] {
        &self.roots
    }

    /// Direct children of `parent` in insertion order
    pub fn children<'a>(&'a self, parent: &SpaceNode) -> impl Iterator<Item = &'a SpaceNode> + 'a {
        let ids = parent.children.clone();
        ids.into_iter().filter_map(move |id| self.spaces.get(&id))
    }

    /// Anchored children of `parent` docked to `anchor` on layer `z_index`,
    /// in insertion order. Ordering by `order` is left to the caller.
    pub fn anchored_children(&self, parent: &SpaceNode, anchor: Anchor, z_index: i32) -> Vec<&SpaceNode> {
        parent
            .children
            .iter()
            .filter_map(|id| self.spaces.get(id))
            .filter(|space| space.is_anchored_to(anchor, z_index))
            .collect()
    }

    /// Generate an identifier not yet tracked by this store
    pub fn generate_id(&mut self) -> SpaceId {
        loop {
            self.next_id += 1;
            let id = SpaceId::new(format!("s{}", self.next_id));
            if !self.spaces.contains_key(&id) {
                return id;
            }
        }
    }

    /// Build a detached space. Nothing is registered until [`SpaceStore::add_space`].
    pub fn create_space(
        &mut self,
        on_change: Option<ChangeListener>,
        parent: Option<&SpaceId>,
        id: Option<SpaceId>,
        props: &SpaceProps,
    ) -> Result<SpaceNode> {
        let id = match id {
            Some(id) => id,
            None => self.generate_id(),
        };

        if props.kind == SpaceKind::Anchored && props.anchor.is_none() {
            return Err(SpacesError::MissingAnchor(id));
        }

        let mut space = SpaceNode::new(id, parent.cloned(), props);
        space.set_listener(on_change);
        Ok(space)
    }

    /// Register a space and, when it has a parent, attach it and recalculate the siblings
    pub fn add_space(&mut self, space: SpaceNode) -> Result<()> {
        if self.spaces.contains_key(&space.id) {
            warn!("Rejected duplicate space id {}", space.id);
            return Err(SpacesError::DuplicateId(space.id));
        }

        let id = space.id.clone();
        match space.parent.clone() {
            Some(parent_id) => {
                let parent = self
                    .spaces
                    .get_mut(&parent_id)
                    .ok_or_else(|| SpacesError::UnknownParent(parent_id.clone()))?;
                parent.children.push(id.clone());
                self.spaces.insert(id.clone(), space);
                debug!("Added space {} under {}", id, parent_id);
                self.recalculate(&parent_id);
            }
            None => {
                self.spaces.insert(id.clone(), space);
                self.roots.push(id.clone());
                debug!("Added root space {}", id);
            }
        }

        Ok(())
    }

    /// Re-declare an existing space. Notifies its owner and recalculates its
    /// siblings only when something actually changed.
    pub fn update_space(&mut self, id: &SpaceId, props: &SpaceProps) -> Result<SpaceChanges> {
        if props.kind == SpaceKind::Anchored && props.anchor.is_none() {
            return Err(SpacesError::MissingAnchor(id.clone()));
        }

        let space = self
            .spaces
            .get_mut(id)
            .ok_or_else(|| SpacesError::UnknownSpace(id.clone()))?;

        let changes = space.apply(props);
        if changes.is_empty() {
            return Ok(changes);
        }

        debug!("Updated space {}: {:?}", id, changes);
        space.notify_changed();

        if let Some(parent_id) = space.parent.clone() {
            self.recalculate(&parent_id);
        }

        Ok(changes)
    }

    /// Remove a space and its whole subtree.
    ///
    /// Returns the removed node itself, or `None` if the id was not tracked.
    pub fn remove_space(&mut self, id: &SpaceId) -> Option<SpaceNode> {
        let Some(space) = self.spaces.remove(id) else {
            debug!("Ignoring removal of unknown space {}", id);
            return None;
        };

        let mut pending = space.children.clone();
        let mut purged = 0;
        while let Some(child_id) = pending.pop() {
            if let Some(child) = self.spaces.remove(&child_id) {
                pending.extend(child.children.iter().cloned());
                purged += 1;
            }
        }

        match &space.parent {
            Some(parent_id) => {
                if let Some(parent) = self.spaces.get_mut(parent_id) {
                    parent.children.retain(|child| child != id);
                }
                debug!("Removed space {} from {} ({} descendants)", id, parent_id, purged);
                self.recalculate(parent_id);
            }
            None => {
                self.roots.retain(|root| root != id);
                debug!("Removed root space {} ({} descendants)", id, purged);
            }
        }

        Some(space)
    }
}
