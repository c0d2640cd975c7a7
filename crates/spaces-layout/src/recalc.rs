// crates/spaces-layout/src/recalc.rs

use crate::SpaceStore;
use spaces_core::{Anchor, SizeUnit, SpaceId, SpaceKind, SpaceNode};
use std::cmp::Ordering;
use tracing::{debug, trace};

/// New sibling offsets computed for one child
#[derive(Debug, Clone, PartialEq)]
enum Adjustment {
    /// One contribution list per anchor, in `Anchor::ALL` order
    Fill([Vec<SizeUnit>; 4]),
    /// Contributions for the edge an anchored space is docked to
    Edge(Vec<SizeUnit>),
}

/// Declared thicknesses of `spaces`, skipping those with nothing to offset by
fn contributions<'a>(spaces: impl IntoIterator<Item = &'a SpaceNode>) -> Vec<SizeUnit> {
    spaces
        .into_iter()
        .filter_map(SpaceNode::thickness)
        .filter(|size| !size.is_blank())
        .cloned()
        .collect()
}

impl SpaceStore {
    fn plan_adjustment(&self, parent: &SpaceNode, child: &SpaceNode) -> Option<Adjustment> {
        match child.kind {
            SpaceKind::Fill => {
                let z_index = child.z_index();
                Some(Adjustment::Fill(
                    Anchor::ALL.map(|anchor| contributions(self.anchored_children(parent, anchor, z_index))),
                ))
            }
            SpaceKind::Anchored => {
                let anchor = child.anchor?;
                let siblings = self.anchored_children(parent, anchor, child.z_index());
                let position = siblings.iter().position(|sibling| sibling.id == child.id);

                // Lower order stacks first; equal orders stack in insertion order
                let stacked = siblings.iter().enumerate().filter_map(|(index, sibling)| {
                    let before = match sibling.order().cmp(&child.order()) {
                        Ordering::Less => true,
                        Ordering::Equal => position.is_some_and(|position| index < position),
                        Ordering::Greater => false,
                    };
                    (before && sibling.id != child.id).then_some(*sibling)
                });
                Some(Adjustment::Edge(contributions(stacked)))
            }
            SpaceKind::ViewPort | SpaceKind::Fixed => None,
        }
    }

    /// Recompute the sibling adjustments of every child of `parent_id`.
    ///
    /// Children are visited in insertion order. A child whose edges moved is
    /// notified immediately; its own children are left for its next update.
    /// Returns how many children changed.
    pub fn recalculate(&mut self, parent_id: &SpaceId) -> usize {
        let plans: Vec<(SpaceId, Adjustment)> = match self.spaces.get(parent_id) {
            Some(parent) => parent
                .children
                .iter()
                .filter_map(|id| self.spaces.get(id))
                .filter_map(|child| {
                    self.plan_adjustment(parent, child)
                        .map(|adjustment| (child.id.clone(), adjustment))
                })
                .collect(),
            None => return 0,
        };

        let mut changed = 0;
        for (id, adjustment) in plans {
            let Some(child) = self.spaces.get_mut(&id) else {
                continue;
            };

            let moved = match adjustment {
                Adjustment::Fill(edges) => {
                    let mut moved = false;
                    for (anchor, adjusted) in Anchor::ALL.into_iter().zip(edges) {
                        moved |= child.adjust(anchor, adjusted);
                    }
                    moved
                }
                Adjustment::Edge(adjusted) => child.adjust_edge(adjusted),
            };

            if moved {
                trace!("Space {} moved: left={:?} top={:?} right={:?} bottom={:?}",
                    id, child.left.adjusted, child.top.adjusted, child.right.adjusted, child.bottom.adjusted);
                child.notify_changed();
                changed += 1;
            }
        }

        debug!("Recalculated children of {}: {} changed", parent_id, changed);
        changed
    }
}

#[cfg(test)]
mod tests {
    use crate::SpaceStore;
    use spaces_core::{ChangeListener, SizeUnit, SpaceId, SpaceNode, SpaceProps};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn store_with_root() -> SpaceStore {
        let mut store = SpaceStore::new();
        let root = store
            .create_space(None, None, Some(SpaceId::from("root")), &SpaceProps::viewport(None, None, None, None))
            .unwrap();
        store.add_space(root).unwrap();
        store
    }

    fn add(store: &mut SpaceStore, id: &str, props: SpaceProps) {
        add_with(store, id, props, None);
    }

    fn add_with(store: &mut SpaceStore, id: &str, props: SpaceProps, listener: Option<ChangeListener>) {
        let space = store
            .create_space(listener, Some(&SpaceId::from("root")), Some(SpaceId::from(id)), &props)
            .unwrap();
        store.add_space(space).unwrap();
    }

    fn space<'a>(store: &'a SpaceStore, id: &str) -> &'a SpaceNode {
        store.get_space(id).unwrap()
    }

    fn assert_fill_insets(store: &SpaceStore) {
        let fill = space(store, "fill");
        assert_eq!(fill.left.adjusted, vec![SizeUnit::px(10.0)]);
        assert_eq!(fill.top.adjusted, vec![SizeUnit::px(20.0)]);
        assert_eq!(fill.right.adjusted, vec![SizeUnit::px(30.0)]);
        assert_eq!(fill.bottom.adjusted, vec![SizeUnit::px(40.0)]);
        assert_eq!(fill.left.css().as_deref(), Some("calc(0px + 10px)"));
        assert_eq!(fill.bottom.css().as_deref(), Some("calc(0px + 40px)"));
    }

    #[test]
    fn test_fill_inset_from_every_edge() {
        let mut store = store_with_root();
        add(&mut store, "fill", SpaceProps::fill());
        add(&mut store, "left", SpaceProps::left(10));
        add(&mut store, "top", SpaceProps::top(20));
        add(&mut store, "right", SpaceProps::right(30));
        add(&mut store, "bottom", SpaceProps::bottom(40));
        assert_fill_insets(&store);
    }

    #[test]
    fn test_fill_inset_independent_of_insertion_order() {
        let mut store = store_with_root();
        add(&mut store, "bottom", SpaceProps::bottom(40));
        add(&mut store, "right", SpaceProps::right(30));
        add(&mut store, "left", SpaceProps::left(10));
        add(&mut store, "fill", SpaceProps::fill());
        add(&mut store, "top", SpaceProps::top(20));
        assert_fill_insets(&store);
    }

    #[test]
    fn test_fill_stacks_every_anchored_sibling_regardless_of_order() {
        let mut store = store_with_root();
        add(&mut store, "a", SpaceProps::left("10px").with_order(3));
        add(&mut store, "b", SpaceProps::left("20px").with_order(1));
        add(&mut store, "fill", SpaceProps::fill());

        let fill = space(&store, "fill");
        assert_eq!(fill.left.adjusted, vec![SizeUnit::length("10px"), SizeUnit::length("20px")]);
        assert_eq!(fill.left.css().as_deref(), Some("calc(0px + 10px + 20px)"));
    }

    #[test]
    fn test_anchored_stacking_by_order() {
        let mut store = store_with_root();
        add(&mut store, "a", SpaceProps::left("10px").with_order(0));
        add(&mut store, "b", SpaceProps::left("20px").with_order(1));

        assert!(space(&store, "a").left.adjusted.is_empty());
        assert_eq!(space(&store, "b").left.adjusted, vec![SizeUnit::length("10px")]);
    }

    #[test]
    fn test_anchored_stacking_ignores_insertion_sequence() {
        let mut store = store_with_root();
        add(&mut store, "b", SpaceProps::left("20px").with_order(1));
        add(&mut store, "a", SpaceProps::left("10px").with_order(0));

        assert!(space(&store, "a").left.adjusted.is_empty());
        assert_eq!(space(&store, "b").left.adjusted, vec![SizeUnit::length("10px")]);
    }

    #[test]
    fn test_equal_order_stacks_by_insertion() {
        let mut store = store_with_root();
        add(&mut store, "a", SpaceProps::top(10));
        add(&mut store, "b", SpaceProps::top(20));
        add(&mut store, "c", SpaceProps::top(30).with_order(0));

        assert!(space(&store, "a").top.adjusted.is_empty());
        assert_eq!(space(&store, "b").top.adjusted, vec![SizeUnit::px(10.0)]);
        assert_eq!(space(&store, "c").top.adjusted, vec![SizeUnit::px(10.0), SizeUnit::px(20.0)]);
    }

    #[test]
    fn test_lower_order_declared_later_still_stacks_first() {
        let mut store = store_with_root();
        add(&mut store, "late", SpaceProps::bottom(10).with_order(2));
        add(&mut store, "tie", SpaceProps::bottom(20).with_order(2));
        add(&mut store, "first", SpaceProps::bottom(30).with_order(1));

        assert!(space(&store, "first").bottom.adjusted.is_empty());
        assert_eq!(space(&store, "late").bottom.adjusted, vec![SizeUnit::px(30.0)]);
        assert_eq!(space(&store, "tie").bottom.adjusted, vec![SizeUnit::px(10.0), SizeUnit::px(30.0)]);
    }

    #[test]
    fn test_re_anchored_strip_drops_old_offsets() {
        let mut store = store_with_root();
        add(&mut store, "a", SpaceProps::left(10).with_order(0));
        add(&mut store, "b", SpaceProps::left(20).with_order(1));
        add(&mut store, "c", SpaceProps::top(5).with_order(0));
        assert_eq!(space(&store, "b").left.css().as_deref(), Some("calc(0px + 10px)"));

        store.update_space(&SpaceId::from("b"), &SpaceProps::top(20).with_order(1)).unwrap();

        let b = space(&store, "b");
        assert!(b.left.adjusted.is_empty());
        assert_eq!(b.left.css().as_deref(), Some("0"));
        assert_eq!(b.top.adjusted, vec![SizeUnit::px(5.0)]);
    }

    #[test]
    fn test_anchored_only_sees_its_own_edge() {
        let mut store = store_with_root();
        add(&mut store, "left", SpaceProps::left(10).with_order(0));
        add(&mut store, "right", SpaceProps::right(30).with_order(5));
        add(&mut store, "top", SpaceProps::top(20).with_order(5));

        assert!(space(&store, "right").right.adjusted.is_empty());
        assert!(space(&store, "top").top.adjusted.is_empty());
    }

    #[test]
    fn test_z_index_isolation() {
        let mut store = store_with_root();
        add(&mut store, "base", SpaceProps::left(10).with_order(0));
        add(&mut store, "overlay", SpaceProps::left(50).with_order(0).with_z_index(1));
        add(&mut store, "stacked", SpaceProps::left(20).with_order(1));
        add(&mut store, "fill", SpaceProps::fill());
        add(&mut store, "overlay_fill", SpaceProps::fill().with_z_index(1));

        assert_eq!(space(&store, "stacked").left.adjusted, vec![SizeUnit::px(10.0)]);
        assert_eq!(space(&store, "fill").left.adjusted, vec![SizeUnit::px(10.0), SizeUnit::px(20.0)]);
        assert_eq!(space(&store, "overlay_fill").left.adjusted, vec![SizeUnit::px(50.0)]);
    }

    #[test]
    fn test_blank_thickness_contributes_nothing() {
        let mut store = store_with_root();
        add(&mut store, "empty", SpaceProps::left(0));
        add(&mut store, "fill", SpaceProps::fill());

        assert!(space(&store, "fill").left.adjusted.is_empty());
    }

    #[test]
    fn test_recalculate_is_idempotent() {
        let mut store = store_with_root();
        add(&mut store, "left", SpaceProps::left(10));
        add(&mut store, "fill", SpaceProps::fill());

        let root = SpaceId::from("root");
        assert_eq!(store.recalculate(&root), 0);
        assert_eq!(store.recalculate(&root), 0);
    }

    #[test]
    fn test_only_moved_children_are_notified() {
        let mut store = store_with_root();
        let notified = Rc::new(RefCell::new(Vec::new()));

        for (id, props) in [
            ("left", SpaceProps::left(10)),
            ("top", SpaceProps::top(20)),
            ("fill", SpaceProps::fill()),
        ] {
            let log = notified.clone();
            add_with(&mut store, id, props, Some(Box::new(move |space: &SpaceNode| {
                log.borrow_mut().push(space.id.to_string());
            })));
        }
        notified.borrow_mut().clear();

        store.update_space(&SpaceId::from("top"), &SpaceProps::top(25)).unwrap();
        assert_eq!(*notified.borrow(), vec!["top".to_string(), "fill".to_string()]);
    }

    #[test]
    fn test_recalculate_unknown_parent_is_noop() {
        let mut store = store_with_root();
        assert_eq!(store.recalculate(&SpaceId::from("missing")), 0);
    }
}
