// crates/spaces-core/src/props.rs
use crate::{Anchor, SizeUnit, SpaceKind};
use serde::{Deserialize, Serialize};

/// Declared edge sizes of a space. Absent edges stay unset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PositionalProps {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<SizeUnit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<SizeUnit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<SizeUnit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottom: Option<SizeUnit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<SizeUnit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<SizeUnit>,
}

/// Everything a caller declares for one space on one pass
#[derive(Debug, Clone, PartialEq)]
pub struct SpaceProps {
    pub kind: SpaceKind,
    pub anchor: Option<Anchor>,
    pub order: Option<i32>,
    pub z_index: Option<i32>,
    pub position: Option<PositionalProps>,
}

fn zero() -> Option<SizeUnit> {
    Some(SizeUnit::px(0.0))
}

impl SpaceProps {
    pub fn new(kind: SpaceKind) -> Self {
        Self {
            kind,
            anchor: None,
            order: None,
            z_index: None,
            position: None,
        }
    }

    /// Full-window root; every inset defaults to 0
    pub fn viewport(
        left: Option<SizeUnit>,
        top: Option<SizeUnit>,
        right: Option<SizeUnit>,
        bottom: Option<SizeUnit>,
    ) -> Self {
        Self::new(SpaceKind::ViewPort).with_position(PositionalProps {
            left: left.or_else(zero),
            top: top.or_else(zero),
            right: right.or_else(zero),
            bottom: bottom.or_else(zero),
            ..Default::default()
        })
    }

    pub fn fixed(width: Option<SizeUnit>, height: SizeUnit) -> Self {
        Self::new(SpaceKind::Fixed).with_position(PositionalProps {
            width,
            height: Some(height),
            ..Default::default()
        })
    }

    pub fn fill() -> Self {
        Self::new(SpaceKind::Fill).with_position(PositionalProps {
            left: zero(),
            top: zero(),
            right: zero(),
            bottom: zero(),
            ..Default::default()
        })
    }

    /// Docked strip with the stock insets for its edge
    pub fn anchored(anchor: Anchor, size: impl Into<SizeUnit>) -> Self {
        let size = Some(size.into());
        let position = match anchor {
            Anchor::Left => PositionalProps {
                left: zero(),
                top: zero(),
                bottom: zero(),
                width: size,
                ..Default::default()
            },
            Anchor::Top => PositionalProps {
                left: zero(),
                top: zero(),
                right: zero(),
                height: size,
                ..Default::default()
            },
            Anchor::Right => PositionalProps {
                bottom: zero(),
                top: zero(),
                right: zero(),
                width: size,
                ..Default::default()
            },
            Anchor::Bottom => PositionalProps {
                bottom: zero(),
                left: zero(),
                right: zero(),
                height: size,
                ..Default::default()
            },
        };

        let mut props = Self::new(SpaceKind::Anchored).with_position(position);
        props.anchor = Some(anchor);
        props
    }

    pub fn left(size: impl Into<SizeUnit>) -> Self {
        Self::anchored(Anchor::Left, size)
    }

    pub fn top(size: impl Into<SizeUnit>) -> Self {
        Self::anchored(Anchor::Top, size)
    }

    pub fn right(size: impl Into<SizeUnit>) -> Self {
        Self::anchored(Anchor::Right, size)
    }

    pub fn bottom(size: impl Into<SizeUnit>) -> Self {
        Self::anchored(Anchor::Bottom, size)
    }

    pub fn with_order(mut self, order: i32) -> Self {
        self.order = Some(order);
        self
    }

    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = Some(z_index);
        self
    }

    pub fn with_position(mut self, position: PositionalProps) -> Self {
        self.position = Some(position);
        self
    }
}
