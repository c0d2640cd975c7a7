// crates/spaces-layout/src/resolve.rs
//! Pixel preview of a store: evaluates the emitted edge expressions against
//! a container size. Diagnostics only; a browser remains the real layout engine.

use crate::SpaceStore;
use glam::Vec2;
use spaces_core::{Edge, EdgeMetric, SpaceId, SpaceNode};
use std::collections::HashMap;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedRect {
    /// Absolute position of the top-left corner
    pub position: Vec2,
    pub size: Vec2,
}

#[derive(Debug, Clone, Default)]
pub struct ResolvedLayout {
    pub rects: HashMap<SpaceId, ResolvedRect>,
}

impl ResolvedLayout {
    pub fn get(&self, id: &str) -> Option<&ResolvedRect> {
        self.rects.get(id)
    }

    pub fn extend(&mut self, other: ResolvedLayout) {
        self.rects.extend(other.rects);
    }
}

/// Sum of the declared size and every adjustment, in pixels.
///
/// `None` when the edge is unset or any term cannot be resolved.
pub fn edge_pixels(edge: &EdgeMetric, container: f32) -> Option<f32> {
    if edge.size.is_none() && edge.adjusted.is_empty() {
        return None;
    }

    edge.size
        .iter()
        .chain(edge.adjusted.iter())
        .map(|term| term.to_pixels(container))
        .sum::<Option<f32>>()
        .map(|total| total + edge.resized)
}

/// Place one axis from its two insets and its extent
fn place_axis(start: Option<f32>, end: Option<f32>, extent: Option<f32>, container: f32) -> (f32, f32) {
    let (offset, length) = match (start, end, extent) {
        (Some(start), _, Some(extent)) => (start, extent),
        (Some(start), Some(end), None) => (start, container - start - end),
        (None, Some(end), Some(extent)) => (container - end - extent, extent),
        (None, None, Some(extent)) => (0.0, extent),
        (Some(start), None, None) => (start, container - start),
        (None, Some(end), None) => (0.0, container - end),
        (None, None, None) => (0.0, container),
    };
    (offset, length.max(0.0))
}

fn resolve_node(space: &SpaceNode, origin: Vec2, container: Vec2) -> ResolvedRect {
    let pixels = |edge: Edge| {
        let axis = if edge.is_horizontal() { container.x } else { container.y };
        edge_pixels(space.edge(edge), axis)
    };

    let (x, width) = place_axis(pixels(Edge::Left), pixels(Edge::Right), pixels(Edge::Width), container.x);
    let (y, height) = place_axis(pixels(Edge::Top), pixels(Edge::Bottom), pixels(Edge::Height), container.y);

    ResolvedRect {
        position: origin + Vec2::new(x, y),
        size: Vec2::new(width, height),
    }
}

impl SpaceStore {
    /// Resolve every space reachable from the store's roots.
    ///
    /// Roots are placed inside a container of `container` size at `origin`;
    /// children resolve against their parent's rectangle.
    pub fn resolve(&self, origin: Vec2, container: Vec2) -> ResolvedLayout {
        let mut layout = ResolvedLayout::default();
        let mut pending: Vec<(&SpaceId, Vec2, Vec2)> =
            self.roots.iter().map(|id| (id, origin, container)).collect();

        while let Some((id, origin, container)) = pending.pop() {
            let Some(space) = self.spaces.get(id) else {
                continue;
            };

            let rect = resolve_node(space, origin, container);
            for child in &space.children {
                pending.push((child, rect.position, rect.size));
            }
            layout.rects.insert(id.clone(), rect);
        }

        debug!("Resolved {} spaces in a {}x{} container", layout.rects.len(), container.x, container.y);
        layout
    }
}
