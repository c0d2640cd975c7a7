// crates/spaces-render/src/css.rs

use crate::{render_store, RenderResult, SpaceRenderer};
use spaces_core::{Edge, SpaceNode};
use spaces_layout::SpaceStore;
use std::fmt;

/// Positional declarations of a space, in emission order
pub fn style_declarations(space: &SpaceNode) -> Vec<String> {
    let mut declarations = vec![
        format!("position: {};", space.position.as_str()),
        "box-sizing: border-box;".to_string(),
    ];

    for edge in Edge::ALL {
        if let Some(value) = space.edge(edge).css() {
            declarations.push(format!("{}: {};", edge.as_str(), value));
        }
    }

    if space.z_index() != 0 {
        declarations.push(format!("z-index: {};", space.z_index()));
    }

    declarations
}

/// Scoped style rule keyed by the space's id
pub fn style_rule(space: &SpaceNode) -> String {
    format!("#{} {{ {} }}", space.id, style_declarations(space).join(" "))
}

/// Style rules of one or more stores, in tree order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleSheet {
    rules: Vec<String>,
}

impl StyleSheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_store(store: &SpaceStore) -> RenderResult<Self> {
        let mut sheet = Self::new();
        render_store(store, &mut sheet)?;
        Ok(sheet)
    }

    pub fn rules(&self) -> &[String] {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl SpaceRenderer for StyleSheet {
    fn render_space(&mut self, space: &SpaceNode, _depth: usize, _is_last: bool) -> RenderResult<()> {
        self.rules.push(style_rule(space));
        Ok(())
    }
}

impl fmt::Display for StyleSheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rule in &self.rules {
            writeln!(f, "{}", rule)?;
        }
        Ok(())
    }
}
