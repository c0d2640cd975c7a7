// crates/spaces-render/src/snapshot.rs

use crate::{RenderError, RenderResult};
use serde::Serialize;
use spaces_core::{Anchor, CssPosition, Edge, SpaceId, SpaceKind};
use spaces_layout::{ResolvedLayout, SpaceStore};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RectSnapshot {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Serializable view of one space and its subtree
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpaceSnapshot {
    pub id: SpaceId,
    pub kind: SpaceKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchor: Option<Anchor>,
    pub order: i32,
    pub z_index: i32,
    pub position: CssPosition,
    /// Emitted CSS value of each edge that has one
    pub edges: BTreeMap<Edge, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rect: Option<RectSnapshot>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SpaceSnapshot>,
}

pub fn snapshot_store(store: &SpaceStore, layout: Option<&ResolvedLayout>) -> RenderResult<Vec<SpaceSnapshot>> {
    store
        .roots()
        .iter()
        .map(|root| snapshot_space(store, layout, root))
        .collect()
}

fn snapshot_space(store: &SpaceStore, layout: Option<&ResolvedLayout>, id: &SpaceId) -> RenderResult<SpaceSnapshot> {
    let space = store
        .get_space(id.as_str())
        .ok_or_else(|| RenderError::SpaceNotFound(id.clone()))?;

    let edges = Edge::ALL
        .into_iter()
        .filter_map(|edge| space.edge(edge).css().map(|value| (edge, value)))
        .collect();

    let rect = layout
        .and_then(|layout| layout.get(id.as_str()))
        .map(|rect| RectSnapshot {
            x: rect.position.x,
            y: rect.position.y,
            width: rect.size.x,
            height: rect.size.y,
        });

    let children = space
        .children
        .iter()
        .map(|child| snapshot_space(store, layout, child))
        .collect::<RenderResult<Vec<_>>>()?;

    Ok(SpaceSnapshot {
        id: space.id.clone(),
        kind: space.kind,
        anchor: space.anchor,
        order: space.order(),
        z_index: space.z_index(),
        position: space.position,
        edges,
        rect,
        children,
    })
}

/// Pretty-printed JSON of a set of snapshots
pub fn snapshots_to_json(snapshots: &[SpaceSnapshot]) -> RenderResult<String> {
    Ok(serde_json::to_string_pretty(snapshots)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use spaces_core::SpaceProps;

    fn store() -> SpaceStore {
        let mut store = SpaceStore::new();
        for (parent, id, props) in [
            (None, "root", SpaceProps::viewport(None, None, None, None)),
            (Some("root"), "bar", SpaceProps::right(100)),
            (Some("root"), "main", SpaceProps::fill()),
        ] {
            let parent = parent.map(SpaceId::from);
            let space = store
                .create_space(None, parent.as_ref(), Some(SpaceId::from(id)), &props)
                .unwrap();
            store.add_space(space).unwrap();
        }
        store
    }

    #[test]
    fn test_snapshot_tree_shape() {
        let snapshots = snapshot_store(&store(), None).unwrap();
        assert_eq!(snapshots.len(), 1);

        let root = &snapshots[0];
        assert_eq!(root.kind, SpaceKind::ViewPort);
        assert_eq!(root.children.len(), 2);

        let main = &root.children[1];
        assert_eq!(main.edges.get(&Edge::Right).map(String::as_str), Some("calc(0px + 100px)"));
        assert_eq!(main.edges.get(&Edge::Width), None);
        assert!(main.rect.is_none());
    }

    #[test]
    fn test_snapshot_json() {
        let store = store();
        let layout = store.resolve(Vec2::ZERO, Vec2::new(400.0, 300.0));
        let snapshots = snapshot_store(&store, Some(&layout)).unwrap();
        let json: serde_json::Value = serde_json::from_str(&snapshots_to_json(&snapshots).unwrap()).unwrap();

        let bar = &json[0]["children"][0];
        assert_eq!(bar["id"], "bar");
        assert_eq!(bar["kind"], "Anchored");
        assert_eq!(bar["anchor"], "right");
        assert_eq!(bar["position"], "absolute");
        assert_eq!(bar["edges"]["width"], "calc(100px)");
        assert_eq!(bar["rect"]["x"], 300.0);
        assert_eq!(bar["rect"]["width"], 100.0);
        assert!(bar.get("children").is_none());
    }
}
