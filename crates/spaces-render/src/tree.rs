// crates/spaces-render/src/tree.rs

use crate::{render_store, RenderResult, SpaceRenderer};
use spaces_core::{Edge, SpaceKind, SpaceNode};
use spaces_layout::{ResolvedLayout, SpaceStore};
use std::fmt::Write;

/// Box-drawing dump of a store, one line per space
#[derive(Debug, Default)]
pub struct TreeRenderer<'a> {
    output: String,
    layout: Option<&'a ResolvedLayout>,
    show_edges: bool,
}

impl<'a> TreeRenderer<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append resolved pixel rectangles to each line
    pub fn with_layout(mut self, layout: &'a ResolvedLayout) -> Self {
        self.layout = Some(layout);
        self
    }

    /// List every emitted edge under each space
    pub fn with_edges(mut self, show_edges: bool) -> Self {
        self.show_edges = show_edges;
        self
    }

    pub fn render(mut self, store: &SpaceStore) -> RenderResult<String> {
        render_store(store, &mut self)?;
        Ok(self.output)
    }
}

fn describe(space: &SpaceNode) -> String {
    match (space.kind, space.anchor) {
        (SpaceKind::Anchored, Some(anchor)) => format!("{:?}", anchor),
        (kind, _) => format!("{:?}", kind),
    }
}

impl SpaceRenderer for TreeRenderer<'_> {
    fn render_space(&mut self, space: &SpaceNode, depth: usize, is_last: bool) -> RenderResult<()> {
        let tree_char = if depth == 0 {
            ""
        } else if is_last {
            "└── "
        } else {
            "├── "
        };

        let indent = if depth == 0 {
            String::new()
        } else {
            "│   ".repeat(depth - 1) + tree_char
        };

        write!(self.output, "{}{} #{}", indent, describe(space), space.id)?;

        if space.kind == SpaceKind::Anchored {
            write!(self.output, " order:{}", space.order())?;
        }
        if space.z_index() != 0 {
            write!(self.output, " z:{}", space.z_index())?;
        }

        if let Some(rect) = self.layout.and_then(|layout| layout.get(space.id.as_str())) {
            write!(
                self.output,
                " pos:({:.0},{:.0}) size:({:.0},{:.0})",
                rect.position.x, rect.position.y, rect.size.x, rect.size.y
            )?;
        }
        self.output.push('\n');

        if self.show_edges {
            let prop_indent = "│   ".repeat(depth) + "    ";
            for edge in Edge::ALL {
                if let Some(value) = space.edge(edge).css() {
                    writeln!(self.output, "{}• {}: {}", prop_indent, edge.as_str(), value)?;
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use spaces_core::{SpaceId, SpaceProps};

    fn store() -> SpaceStore {
        let mut store = SpaceStore::new();
        for (parent, id, props) in [
            (None, "app", SpaceProps::viewport(None, None, None, None)),
            (Some("app"), "sidebar", SpaceProps::left(200)),
            (Some("app"), "body", SpaceProps::fill()),
            (Some("body"), "header", SpaceProps::top(60).with_order(1)),
            (Some("body"), "content", SpaceProps::fill()),
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
    fn test_tree_dump() {
        let output = TreeRenderer::new().render(&store()).unwrap();
        insta::assert_snapshot!(output.trim_end(), @r###"
        ViewPort #app
        ├── Left #sidebar order:0
        └── Fill #body
        │   ├── Top #header order:1
        │   └── Fill #content
        "###);
    }

    #[test]
    fn test_tree_dump_with_layout() {
        let store = store();
        let layout = store.resolve(Vec2::ZERO, Vec2::new(1000.0, 500.0));
        let output = TreeRenderer::new().with_layout(&layout).render(&store).unwrap();

        assert!(output.contains("Fill #body pos:(200,0) size:(800,500)"));
        assert!(output.contains("Fill #content pos:(200,60) size:(800,440)"));
    }

    #[test]
    fn test_tree_dump_with_edges() {
        let output = TreeRenderer::new().with_edges(true).render(&store()).unwrap();
        assert!(output.contains("    • left: calc(0px + 200px)\n"));
        assert!(output.contains("• width: calc(200px)\n"));
    }
}
