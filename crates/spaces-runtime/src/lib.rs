// crates/spaces-runtime/src/lib.rs

use anyhow::{bail, Context, Result};
use glam::Vec2;
use spaces_core::{
    load_layout_file, LayoutDocument, RegionDecl, SpaceId, SpaceKind, SpaceNode, SpaceProps,
    SpacesError,
};
use spaces_layout::{ResolvedLayout, SpaceStore};
use spaces_render::{render_store, RenderResult, SpaceRenderer, StyleSheet};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::{debug, info, warn};

pub mod render_queue;

pub use render_queue::*;

/// One store and the root space that opened it
#[derive(Debug)]
pub struct LayoutRoot {
    pub root: SpaceId,
    /// Space of the enclosing layout this root is declared inside, if any
    pub host: Option<SpaceId>,
    pub store: SpaceStore,
}

/// Where a declared region currently lives
#[derive(Debug, Clone)]
struct Placement {
    id: SpaceId,
    /// Root id of the owning layout
    layout: SpaceId,
    /// Parent inside the owning store, or the host for layout roots
    parent: Option<SpaceId>,
    depth: usize,
}

/// Declaration context handed down while walking a document
#[derive(Debug, Clone, Default)]
struct Scope {
    path: String,
    layout: Option<SpaceId>,
    parent: Option<SpaceId>,
    layer: Option<i32>,
    depth: usize,
}

/// Applies layout documents pass after pass, keeping one store per
/// viewport or fixed region and queueing every space that needs a re-render.
#[derive(Debug, Default)]
pub struct SpacesApp {
    layouts: Vec<LayoutRoot>,
    placements: HashMap<String, Placement>,
    renders: RenderQueue,
}

impl SpacesApp {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_document(document: &LayoutDocument) -> Result<Self> {
        let mut app = Self::new();
        app.apply(document)?;
        Ok(app)
    }

    /// Load a layout file and apply it
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let document = load_layout_file(path)
            .with_context(|| format!("Failed to load layout file {}", path.display()))?;
        self.apply(&document)
    }

    pub fn layouts(&self) -> &[LayoutRoot] {
        &self.layouts
    }

    pub fn layout(&self, root: &str) -> Option<&LayoutRoot> {
        self.layouts.iter().find(|layout| layout.root.as_str() == root)
    }

    /// Look a space up across every store
    pub fn get_space(&self, id: &str) -> Option<&SpaceNode> {
        self.layouts.iter().find_map(|layout| layout.store.get_space(id))
    }

    /// Id assigned to the region declared at `path`, e.g. `"/0/1"` for the
    /// second child of the first top-level region, or `"#id"` for explicit ids
    pub fn region_id(&self, path: &str) -> Option<&SpaceId> {
        self.placements.get(path).map(|placement| &placement.id)
    }

    pub fn space_count(&self) -> usize {
        self.layouts.iter().map(|layout| layout.store.len()).sum()
    }

    /// Ids of every space that changed since the last call, first notification first
    pub fn drain_renders(&mut self) -> Vec<SpaceId> {
        self.renders.drain()
    }

    /// Run one declarative pass: create new regions, update surviving ones
    /// and remove the ones the document no longer declares.
    pub fn apply(&mut self, document: &LayoutDocument) -> Result<()> {
        let mut previous = std::mem::take(&mut self.placements);
        let mut seen = HashSet::new();

        if let Err(err) = self.apply_regions(&document.regions, &Scope::default(), &mut previous, &mut seen) {
            // Regions the failed pass never reached keep their placements
            self.placements.extend(previous);
            return Err(err);
        }

        let mut stale: Vec<Placement> = previous.into_values().collect();
        stale.sort_by(|a, b| b.depth.cmp(&a.depth));
        for placement in stale {
            self.remove_placement(&placement);
        }

        self.layouts.retain(|layout| layout.store.contains(layout.root.as_str()));
        debug!(
            "Applied layout document: {} layouts, {} spaces",
            self.layouts.len(),
            self.space_count()
        );
        Ok(())
    }

    fn apply_regions(
        &mut self,
        regions: &[RegionDecl],
        scope: &Scope,
        previous: &mut HashMap<String, Placement>,
        seen: &mut HashSet<String>,
    ) -> Result<()> {
        for (index, region) in regions.iter().enumerate() {
            let key = match &region.id {
                Some(id) => format!("#{}", id),
                None => format!("{}/{}", scope.path, index),
            };
            if !seen.insert(key.clone()) {
                bail!("Region '{}' is declared more than once", key);
            }

            let props = region
                .props(scope.layer)
                .with_context(|| format!("Invalid region at {}", key))?;

            let placement = if region.kind().is_root() {
                self.place_root(region, &props, scope, previous.remove(&key))?
            } else {
                self.place_child(region, &props, scope, previous.remove(&key))
                    .with_context(|| format!("Failed to place region {}", key))?
            };

            let child_scope = Scope {
                path: key.clone(),
                layout: Some(placement.layout.clone()),
                parent: Some(placement.id.clone()),
                layer: region.layer.or(scope.layer),
                depth: scope.depth + 1,
            };
            self.placements.insert(key, placement);

            self.apply_regions(&region.children, &child_scope, previous, seen)?;
        }
        Ok(())
    }

    fn place_root(
        &mut self,
        region: &RegionDecl,
        props: &SpaceProps,
        scope: &Scope,
        existing: Option<Placement>,
    ) -> Result<Placement> {
        if let Some(existing) = existing {
            match self.layout_index(&existing.layout) {
                Some(index) if existing.layout == existing.id => {
                    let layout = &mut self.layouts[index];
                    layout.host = scope.parent.clone();
                    layout.store.update_space(&existing.id, props)?;
                    return Ok(Placement {
                        parent: scope.parent.clone(),
                        depth: scope.depth,
                        ..existing
                    });
                }
                _ => self.remove_placement(&existing),
            }
        }

        let mut store = SpaceStore::new();
        let id = match &region.id {
            Some(id) => self.claim_explicit_id(id)?,
            None => loop {
                let id = store.generate_id();
                if !self.is_taken(&id) {
                    break id;
                }
            },
        };

        let space = store.create_space(Some(self.renders.listener()), None, Some(id.clone()), props)?;
        store.add_space(space)?;
        self.renders.queue_render(id.clone());

        info!("Opened layout {} ({:?})", id, region.kind());
        self.layouts.push(LayoutRoot {
            root: id.clone(),
            host: scope.parent.clone(),
            store,
        });

        Ok(Placement {
            layout: id.clone(),
            id,
            parent: scope.parent.clone(),
            depth: scope.depth,
        })
    }

    fn place_child(
        &mut self,
        region: &RegionDecl,
        props: &SpaceProps,
        scope: &Scope,
        existing: Option<Placement>,
    ) -> Result<Placement> {
        let Some(layout_root) = scope.layout.clone() else {
            bail!("{:?} region must be declared inside a viewport or fixed region", region.region);
        };
        let index = self
            .layout_index(&layout_root)
            .with_context(|| format!("Layout {} is gone", layout_root))?;

        if let Some(existing) = existing {
            let reusable = existing.layout == layout_root
                && existing.parent == scope.parent
                && existing.id != existing.layout
                && self.layouts[index].store.contains(existing.id.as_str());

            if reusable {
                self.layouts[index].store.update_space(&existing.id, props)?;
                return Ok(Placement {
                    depth: scope.depth,
                    ..existing
                });
            }
            self.remove_placement(&existing);
        }

        // The removal above may have dropped a layout and shifted the rest
        let index = self
            .layout_index(&layout_root)
            .with_context(|| format!("Layout {} is gone", layout_root))?;

        let id = match &region.id {
            Some(id) => self.claim_explicit_id(id)?,
            None => self.fresh_id(index),
        };

        let listener = self.renders.listener();
        let store = &mut self.layouts[index].store;
        let space = store.create_space(Some(listener), scope.parent.as_ref(), Some(id.clone()), props)?;
        store.add_space(space)?;
        self.renders.queue_render(id.clone());

        Ok(Placement {
            id,
            layout: layout_root,
            parent: scope.parent.clone(),
            depth: scope.depth,
        })
    }

    fn remove_placement(&mut self, placement: &Placement) {
        let Some(index) = self.layout_index(&placement.layout) else {
            return;
        };

        if self.layouts[index].store.remove_space(&placement.id).is_some() {
            debug!("Removed region {} from layout {}", placement.id, placement.layout);
        }
        if placement.id == placement.layout {
            self.layouts.remove(index);
        }
    }

    fn layout_index(&self, root: &SpaceId) -> Option<usize> {
        self.layouts.iter().position(|layout| &layout.root == root)
    }

    fn is_taken(&self, id: &SpaceId) -> bool {
        self.layouts.iter().any(|layout| layout.store.contains(id.as_str()))
    }

    /// Explicit ids must be unique across every layout, not just their own store
    fn claim_explicit_id(&self, id: &SpaceId) -> Result<SpaceId> {
        if self.is_taken(id) {
            warn!("Rejected explicit id {}: already tracked by another region", id);
            bail!(SpacesError::DuplicateId(id.clone()));
        }
        Ok(id.clone())
    }

    /// Generate an id from the store at `index` that no other store tracks either
    fn fresh_id(&mut self, index: usize) -> SpaceId {
        loop {
            let id = self.layouts[index].store.generate_id();
            if !self.is_taken(&id) {
                return id;
            }
        }
    }

    /// Pixel preview of every layout inside a `viewport` sized window.
    ///
    /// Viewport roots cover the window; fixed roots flow inside the space
    /// hosting them.
    pub fn resolve(&self, viewport: Vec2) -> ResolvedLayout {
        let mut resolved = ResolvedLayout::default();
        let mut pending: Vec<&LayoutRoot> = self.layouts.iter().collect();

        loop {
            let before = pending.len();
            pending.retain(|layout| {
                let root_kind = layout.store.get_space(layout.root.as_str()).map(|space| space.kind);
                let frame = match (&layout.host, root_kind) {
                    (None, _) | (_, Some(SpaceKind::ViewPort)) => Some((Vec2::ZERO, viewport)),
                    (Some(host), _) => resolved
                        .get(host.as_str())
                        .map(|rect| (rect.position, rect.size)),
                };

                match frame {
                    Some((origin, container)) => {
                        resolved.extend(layout.store.resolve(origin, container));
                        false
                    }
                    None => true,
                }
            });

            if pending.is_empty() || pending.len() == before {
                break;
            }
        }

        for layout in pending {
            warn!("Skipped layout {}: its host was never resolved", layout.root);
        }
        resolved
    }

    /// Walk every store in layout order
    pub fn render_all<R: SpaceRenderer + ?Sized>(&self, renderer: &mut R) -> RenderResult<()> {
        for layout in &self.layouts {
            render_store(&layout.store, renderer)?;
        }
        Ok(())
    }

    pub fn style_sheet(&self) -> RenderResult<StyleSheet> {
        let mut sheet = StyleSheet::new();
        self.render_all(&mut sheet)?;
        Ok(sheet)
    }
}
