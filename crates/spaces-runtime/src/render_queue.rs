// crates/spaces-runtime/src/render_queue.rs
use spaces_core::{ChangeListener, SpaceId, SpaceNode};
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

/// Ids of spaces whose geometry changed since the last drain.
///
/// Cloning shares the underlying queue, so every listener handed out by
/// [`RenderQueue::listener`] feeds the same list.
#[derive(Debug, Clone, Default)]
pub struct RenderQueue {
    pending: Rc<RefCell<Vec<SpaceId>>>,
}

impl RenderQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn queue_render(&self, id: SpaceId) {
        self.pending.borrow_mut().push(id);
    }

    /// Observer that queues the notified space
    pub fn listener(&self) -> ChangeListener {
        let queue = self.clone();
        Box::new(move |space: &SpaceNode| queue.queue_render(space.id.clone()))
    }

    pub fn len(&self) -> usize {
        self.pending.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.borrow().is_empty()
    }

    /// Take every queued id in notification order, keeping only the first
    /// occurrence of each
    pub fn drain(&self) -> Vec<SpaceId> {
        let pending: Vec<_> = self.pending.borrow_mut().drain(..).collect();
        let mut seen = HashSet::new();
        pending.into_iter().filter(|id| seen.insert(id.clone())).collect()
    }
}
