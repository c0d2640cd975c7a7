// crates/spaces-core/src/document.rs
//! JSON layout documents: a declared region tree the runtime applies to stores.

use crate::{Anchor, PositionalProps, SizeUnit, SpaceId, SpaceKind, SpaceProps, SpacesError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutDocument {
    #[serde(default)]
    pub regions: Vec<RegionDecl>,
}

/// Shorthand region types, one per declarative building block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionType {
    Viewport,
    Fixed,
    Fill,
    Left,
    Top,
    Right,
    Bottom,
    /// Raw anchored space; anchor and position are spelled out
    Anchored,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegionDecl {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<SpaceId>,
    #[serde(rename = "type")]
    pub region: RegionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchor: Option<Anchor>,
    /// Thickness of a docked strip
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<SizeUnit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z_index: Option<i32>,
    /// Layer applied to every descendant, overriding their own z-index
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layer: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<PositionalProps>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<RegionDecl>,
}

impl RegionDecl {
    pub fn new(region: RegionType) -> Self {
        Self {
            id: None,
            region,
            anchor: None,
            size: None,
            order: None,
            z_index: None,
            layer: None,
            position: None,
            children: Vec::new(),
        }
    }

    pub fn kind(&self) -> SpaceKind {
        match self.region {
            RegionType::Viewport => SpaceKind::ViewPort,
            RegionType::Fixed => SpaceKind::Fixed,
            RegionType::Fill => SpaceKind::Fill,
            RegionType::Left
            | RegionType::Top
            | RegionType::Right
            | RegionType::Bottom
            | RegionType::Anchored => SpaceKind::Anchored,
        }
    }

    fn describe(&self) -> String {
        match &self.id {
            Some(id) => format!("{:?} region '{}'", self.region, id),
            None => format!("{:?} region", self.region),
        }
    }

    fn required_size(&self) -> crate::Result<SizeUnit> {
        self.size
            .clone()
            .ok_or_else(|| SpacesError::InvalidDocument(format!("{} requires a size", self.describe())))
    }

    /// Translate the declaration into store properties.
    ///
    /// `layer` is the layer inherited from an enclosing region; when present it
    /// wins over the region's own z-index.
    pub fn props(&self, layer: Option<i32>) -> crate::Result<SpaceProps> {
        let position = self.position.clone().unwrap_or_default();

        let mut props = match self.region {
            RegionType::Viewport => {
                SpaceProps::viewport(position.left, position.top, position.right, position.bottom)
            }
            RegionType::Fixed => {
                let height = position.height.or_else(|| self.size.clone()).ok_or_else(|| {
                    SpacesError::InvalidDocument(format!("{} requires a height", self.describe()))
                })?;
                SpaceProps::fixed(position.width, height)
            }
            RegionType::Fill => SpaceProps::fill(),
            RegionType::Left => SpaceProps::left(self.required_size()?),
            RegionType::Top => SpaceProps::top(self.required_size()?),
            RegionType::Right => SpaceProps::right(self.required_size()?),
            RegionType::Bottom => SpaceProps::bottom(self.required_size()?),
            RegionType::Anchored => {
                let mut props = SpaceProps::new(SpaceKind::Anchored).with_position(position);
                props.anchor = self.anchor;
                props
            }
        };

        props.order = self.order;
        props.z_index = Some(layer.or(self.z_index).unwrap_or(0));
        Ok(props)
    }
}

impl LayoutDocument {
    pub fn from_json(source: &str) -> crate::Result<Self> {
        let document: LayoutDocument = serde_json::from_str(source)?;
        debug!("Parsed layout document with {} top-level regions", document.regions.len());
        Ok(document)
    }

    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

pub fn load_layout_file(path: impl AsRef<Path>) -> crate::Result<LayoutDocument> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path)?;
    debug!("Loaded layout file {}", path.display());
    LayoutDocument::from_json(&source)
}
