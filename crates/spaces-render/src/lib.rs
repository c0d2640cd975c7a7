// crates/spaces-render/src/lib.rs

use spaces_core::{SpaceId, SpaceNode};
use spaces_layout::SpaceStore;

pub mod css;
pub mod tree;
pub mod snapshot;

pub use css::*;
pub use tree::*;
pub use snapshot::*;

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Space not found while rendering: {0}")]
    SpaceNotFound(SpaceId),
    #[error("Formatting failed: {0}")]
    Format(#[from] std::fmt::Error),
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

pub type RenderResult<T> = std::result::Result<T, RenderError>;

/// Visitor over a store's spaces in tree order
pub trait SpaceRenderer {
    /// Called once before the spaces of each store
    fn begin_store(&mut self, _store: &SpaceStore) -> RenderResult<()> {
        Ok(())
    }

    /// Render a single space. `depth` is 0 for roots.
    fn render_space(&mut self, space: &SpaceNode, depth: usize, is_last: bool) -> RenderResult<()>;
}

/// Walk every root of `store` depth-first, children in insertion order
pub fn render_store<R: SpaceRenderer + ?Sized>(store: &SpaceStore, renderer: &mut R) -> RenderResult<()> {
    renderer.begin_store(store)?;

    let roots = store.roots();
    for (index, root) in roots.iter().enumerate() {
        render_subtree(store, renderer, root, 0, index + 1 == roots.len())?;
    }
    Ok(())
}

fn render_subtree<R: SpaceRenderer + ?Sized>(
    store: &SpaceStore,
    renderer: &mut R,
    id: &SpaceId,
    depth: usize,
    is_last: bool,
) -> RenderResult<()> {
    let space = store
        .get_space(id.as_str())
        .ok_or_else(|| RenderError::SpaceNotFound(id.clone()))?;

    renderer.render_space(space, depth, is_last)?;

    let child_count = space.children.len();
    for (i, child_id) in space.children.iter().enumerate() {
        render_subtree(store, renderer, child_id, depth + 1, i + 1 == child_count)?;
    }
    Ok(())
}
