// crates/spaces-core/src/space.rs
use crate::{Edge, EdgeMetric, PositionalProps, SizeUnit, SpaceProps};
use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Identifier of a space, unique within its store
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpaceId(String);

impl SpaceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SpaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for SpaceId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SpaceId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for SpaceId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpaceKind {
    /// Pinned to the containing viewport
    ViewPort,
    /// Explicit width and height, flows in its parent
    Fixed,
    /// Takes whatever its anchored siblings leave over
    Fill,
    /// Docked to one edge with a declared thickness
    Anchored,
}

impl SpaceKind {
    pub fn css_position(&self) -> CssPosition {
        match self {
            SpaceKind::ViewPort => CssPosition::Fixed,
            SpaceKind::Fixed => CssPosition::Relative,
            SpaceKind::Fill | SpaceKind::Anchored => CssPosition::Absolute,
        }
    }

    /// Kinds that open a store of their own
    pub fn is_root(&self) -> bool {
        matches!(self, SpaceKind::ViewPort | SpaceKind::Fixed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CssPosition {
    Fixed,
    Relative,
    Absolute,
}

impl CssPosition {
    pub fn as_str(&self) -> &'static str {
        match self {
            CssPosition::Fixed => "fixed",
            CssPosition::Relative => "relative",
            CssPosition::Absolute => "absolute",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Anchor {
    Left,
    Top,
    Right,
    Bottom,
}

impl Anchor {
    pub const ALL: [Anchor; 4] = [Anchor::Left, Anchor::Top, Anchor::Right, Anchor::Bottom];

    pub fn orientation(&self) -> Orientation {
        match self {
            Anchor::Top | Anchor::Bottom => Orientation::Vertical,
            Anchor::Left | Anchor::Right => Orientation::Horizontal,
        }
    }

    /// The positional edge this anchor pushes
    pub fn edge(&self) -> Edge {
        match self {
            Anchor::Left => Edge::Left,
            Anchor::Top => Edge::Top,
            Anchor::Right => Edge::Right,
            Anchor::Bottom => Edge::Bottom,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    /// Unanchored spaces count as horizontal
    pub fn of(anchor: Option<Anchor>) -> Self {
        anchor.map_or(Orientation::Horizontal, |anchor| anchor.orientation())
    }

    /// The edge measuring a docked space's thickness
    pub fn thickness_edge(&self) -> Edge {
        match self {
            Orientation::Vertical => Edge::Height,
            Orientation::Horizontal => Edge::Width,
        }
    }
}

bitflags! {
    /// Fields an update actually changed
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct SpaceChanges: u16 {
        const KIND = 1 << 0;
        const ANCHOR = 1 << 1;
        const LEFT = 1 << 2;
        const TOP = 1 << 3;
        const RIGHT = 1 << 4;
        const BOTTOM = 1 << 5;
        const WIDTH = 1 << 6;
        const HEIGHT = 1 << 7;
        const ORDER = 1 << 8;
        const Z_INDEX = 1 << 9;

        const EDGES = Self::LEFT.bits()
            | Self::TOP.bits()
            | Self::RIGHT.bits()
            | Self::BOTTOM.bits()
            | Self::WIDTH.bits()
            | Self::HEIGHT.bits();
    }
}

impl SpaceChanges {
    fn for_edge(edge: Edge) -> Self {
        match edge {
            Edge::Left => SpaceChanges::LEFT,
            Edge::Top => SpaceChanges::TOP,
            Edge::Right => SpaceChanges::RIGHT,
            Edge::Bottom => SpaceChanges::BOTTOM,
            Edge::Width => SpaceChanges::WIDTH,
            Edge::Height => SpaceChanges::HEIGHT,
        }
    }
}

/// Observer invoked synchronously whenever a space's own geometry changed
pub type ChangeListener = Box<dyn FnMut(&SpaceNode)>;

/// One rectangular region of the layout tree
pub struct SpaceNode {
    pub id: SpaceId,
    pub kind: SpaceKind,
    pub anchor: Option<Anchor>,
    pub orientation: Orientation,
    order: Option<i32>,
    z_index: Option<i32>,
    pub position: CssPosition,

    pub parent: Option<SpaceId>,
    pub children: Vec<SpaceId>,

    pub left: EdgeMetric,
    pub top: EdgeMetric,
    pub right: EdgeMetric,
    pub bottom: EdgeMetric,
    pub width: EdgeMetric,
    pub height: EdgeMetric,

    on_change: Option<ChangeListener>,
}

impl SpaceNode {
    /// Build a detached node with every edge seeded from the declared position
    pub fn new(id: SpaceId, parent: Option<SpaceId>, props: &SpaceProps) -> Self {
        let position = props.position.clone().unwrap_or_default();
        Self {
            id,
            kind: props.kind,
            anchor: props.anchor,
            orientation: Orientation::of(props.anchor),
            order: props.order,
            z_index: props.z_index,
            position: props.kind.css_position(),
            parent,
            children: Vec::new(),
            left: EdgeMetric::new(position.left),
            top: EdgeMetric::new(position.top),
            right: EdgeMetric::new(position.right),
            bottom: EdgeMetric::new(position.bottom),
            width: EdgeMetric::new(position.width),
            height: EdgeMetric::new(position.height),
            on_change: None,
        }
    }

    pub fn with_listener(mut self, listener: ChangeListener) -> Self {
        self.on_change = Some(listener);
        self
    }

    pub fn set_listener(&mut self, listener: Option<ChangeListener>) {
        self.on_change = listener;
    }

    /// Effective stacking order, unset counts as 0
    pub fn order(&self) -> i32 {
        self.order.unwrap_or(0)
    }

    /// Effective layer, unset counts as 0
    pub fn z_index(&self) -> i32 {
        self.z_index.unwrap_or(0)
    }

    pub fn declared_order(&self) -> Option<i32> {
        self.order
    }

    pub fn declared_z_index(&self) -> Option<i32> {
        self.z_index
    }

    pub fn is_anchored_to(&self, anchor: Anchor, z_index: i32) -> bool {
        self.kind == SpaceKind::Anchored && self.anchor == Some(anchor) && self.z_index() == z_index
    }

    pub fn edge(&self, edge: Edge) -> &EdgeMetric {
        match edge {
            Edge::Left => &self.left,
            Edge::Top => &self.top,
            Edge::Right => &self.right,
            Edge::Bottom => &self.bottom,
            Edge::Width => &self.width,
            Edge::Height => &self.height,
        }
    }

    pub fn edge_mut(&mut self, edge: Edge) -> &mut EdgeMetric {
        match edge {
            Edge::Left => &mut self.left,
            Edge::Top => &mut self.top,
            Edge::Right => &mut self.right,
            Edge::Bottom => &mut self.bottom,
            Edge::Width => &mut self.width,
            Edge::Height => &mut self.height,
        }
    }

    /// Declared thickness along the docking axis, if any
    pub fn thickness(&self) -> Option<&SizeUnit> {
        self.edge(self.orientation.thickness_edge()).size.as_ref()
    }

    pub fn adjust_left(&mut self, adjusted: Vec<SizeUnit>) -> bool {
        self.left.adjust(adjusted)
    }

    pub fn adjust_top(&mut self, adjusted: Vec<SizeUnit>) -> bool {
        self.top.adjust(adjusted)
    }

    pub fn adjust_right(&mut self, adjusted: Vec<SizeUnit>) -> bool {
        self.right.adjust(adjusted)
    }

    pub fn adjust_bottom(&mut self, adjusted: Vec<SizeUnit>) -> bool {
        self.bottom.adjust(adjusted)
    }

    pub fn adjust(&mut self, anchor: Anchor, adjusted: Vec<SizeUnit>) -> bool {
        match anchor {
            Anchor::Left => self.adjust_left(adjusted),
            Anchor::Top => self.adjust_top(adjusted),
            Anchor::Right => self.adjust_right(adjusted),
            Anchor::Bottom => self.adjust_bottom(adjusted),
        }
    }

    /// Adjust the edge this space is docked to. Only anchored spaces have one.
    pub fn adjust_edge(&mut self, adjusted: Vec<SizeUnit>) -> bool {
        match (self.kind, self.anchor) {
            (SpaceKind::Anchored, Some(anchor)) => self.adjust(anchor, adjusted),
            _ => false,
        }
    }

    /// Bring the node in line with a fresh declaration, returning what changed
    pub fn apply(&mut self, props: &SpaceProps) -> SpaceChanges {
        let mut changes = SpaceChanges::empty();

        if self.kind != props.kind {
            self.kind = props.kind;
            self.position = props.kind.css_position();
            changes |= SpaceChanges::KIND;
        }

        if self.anchor != props.anchor {
            self.anchor = props.anchor;
            self.orientation = Orientation::of(props.anchor);
            changes |= SpaceChanges::ANCHOR;
        }

        // Sibling offsets belong to the old docking; recalculation rebuilds them
        if changes.intersects(SpaceChanges::KIND | SpaceChanges::ANCHOR) {
            for anchor in Anchor::ALL {
                self.edge_mut(anchor.edge()).adjusted.clear();
            }
        }

        let position = props.position.as_ref();
        for edge in Edge::ALL {
            let size = position.and_then(|position| declared(position, edge));
            if self.edge_mut(edge).set_size(size) {
                changes |= SpaceChanges::for_edge(edge);
            }
        }

        if self.order != props.order {
            self.order = props.order;
            changes |= SpaceChanges::ORDER;
        }

        if self.z_index != props.z_index {
            self.z_index = props.z_index;
            changes |= SpaceChanges::Z_INDEX;
        }

        changes
    }

    /// Tell the owner this node needs to be re-rendered
    pub fn notify_changed(&mut self) {
        if let Some(mut listener) = self.on_change.take() {
            listener(&*self);
            self.on_change = Some(listener);
        }
    }
}

fn declared(position: &PositionalProps, edge: Edge) -> Option<SizeUnit> {
    match edge {
        Edge::Left => position.left.clone(),
        Edge::Top => position.top.clone(),
        Edge::Right => position.right.clone(),
        Edge::Bottom => position.bottom.clone(),
        Edge::Width => position.width.clone(),
        Edge::Height => position.height.clone(),
    }
}

impl fmt::Debug for SpaceNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpaceNode")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("anchor", &self.anchor)
            .field("order", &self.order)
            .field("z_index", &self.z_index)
            .field("parent", &self.parent)
            .field("children", &self.children)
            .field("left", &self.left)
            .field("top", &self.top)
            .field("right", &self.right)
            .field("bottom", &self.bottom)
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}
