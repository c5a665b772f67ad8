#![forbid(unsafe_code)]

//! Headless recording surface.
//!
//! # Design
//!
//! A [`Surface`] owns a tree of regions. Region `0` is the root and every
//! other region is created through [`SurfaceHandle::region`], so parents are
//! always allocated before their children and ids are dense.
//!
//! # Invariants
//!
//! 1. Region ids are indices into the region table and are never reused.
//! 2. Draw operations are appended in call order and never reordered.
//! 3. All handles of one surface share the same state; the surface is `!Send`
//!    because layout and rendering are single-threaded.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use trellis_core::geometry::Rect;

#[cfg(feature = "tracing")]
use tracing::trace;

/// Identifier of a region within one [`Surface`].
pub type RegionId = usize;

/// A recorded draw operation.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawOp {
    /// Region the operation was recorded against.
    pub region: RegionId,
    /// Bounds in surface coordinates.
    pub bounds: Rect,
    /// Free-form label supplied by the drawing component.
    pub label: String,
}

#[derive(Debug)]
struct Region {
    parent: Option<RegionId>,
    label: String,
    children: Vec<RegionId>,
}

#[derive(Debug)]
struct Scene {
    regions: Vec<Region>,
    ops: Vec<DrawOp>,
}

impl Scene {
    fn new(root_label: String) -> Self {
        Self {
            regions: vec![Region {
                parent: None,
                label: root_label,
                children: Vec::new(),
            }],
            ops: Vec::new(),
        }
    }

    fn add_region(&mut self, parent: RegionId, label: String) -> RegionId {
        let id = self.regions.len();
        self.regions.push(Region {
            parent: Some(parent),
            label,
            children: Vec::new(),
        });
        self.regions[parent].children.push(id);
        id
    }
}

/// Owner of a region tree and its draw log.
#[derive(Clone)]
pub struct Surface {
    scene: Rc<RefCell<Scene>>,
}

impl fmt::Debug for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scene = self.scene.borrow();
        f.debug_struct("Surface")
            .field("regions", &scene.regions.len())
            .field("ops", &scene.ops.len())
            .finish()
    }
}

impl Surface {
    /// Root region id.
    pub const ROOT: RegionId = 0;

    /// Create a surface whose root region carries `label`.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            scene: Rc::new(RefCell::new(Scene::new(label.into()))),
        }
    }

    /// Handle to the root region.
    #[must_use]
    pub fn root(&self) -> SurfaceHandle {
        SurfaceHandle {
            scene: Rc::clone(&self.scene),
            region: Self::ROOT,
        }
    }

    /// Number of regions, root included.
    pub fn region_count(&self) -> usize {
        self.scene.borrow().regions.len()
    }

    /// Label of a region.
    pub fn label(&self, region: RegionId) -> Option<String> {
        self.scene
            .borrow()
            .regions
            .get(region)
            .map(|r| r.label.clone())
    }

    /// Parent of a region; `None` for the root or unknown ids.
    pub fn parent(&self, region: RegionId) -> Option<RegionId> {
        self.scene.borrow().regions.get(region).and_then(|r| r.parent)
    }

    /// Direct children of a region, in creation order.
    pub fn children(&self, region: RegionId) -> Vec<RegionId> {
        self.scene
            .borrow()
            .regions
            .get(region)
            .map(|r| r.children.clone())
            .unwrap_or_default()
    }

    /// Slash-separated labels from the root down to `region`.
    pub fn path(&self, region: RegionId) -> Option<String> {
        let scene = self.scene.borrow();
        let mut labels = Vec::new();
        let mut cursor = Some(region);
        while let Some(id) = cursor {
            let node = scene.regions.get(id)?;
            labels.push(node.label.as_str());
            cursor = node.parent;
        }
        labels.reverse();
        Some(labels.join("/"))
    }

    /// Snapshot of the draw log.
    pub fn ops(&self) -> Vec<DrawOp> {
        self.scene.borrow().ops.clone()
    }

    /// Discard recorded draw operations, keeping the region tree.
    pub fn clear_ops(&self) {
        self.scene.borrow_mut().ops.clear();
    }
}

/// A component's view of one region of a [`Surface`].
#[derive(Clone)]
pub struct SurfaceHandle {
    scene: Rc<RefCell<Scene>>,
    region: RegionId,
}

impl fmt::Debug for SurfaceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SurfaceHandle")
            .field("region", &self.region)
            .finish()
    }
}

impl SurfaceHandle {
    /// Region this handle draws into.
    #[inline]
    pub fn region_id(&self) -> RegionId {
        self.region
    }

    /// Create a child region and return a handle to it.
    #[must_use]
    pub fn region(&self, label: impl Into<String>) -> SurfaceHandle {
        let label = label.into();
        let id = self.scene.borrow_mut().add_region(self.region, label);

        #[cfg(feature = "tracing")]
        trace!(parent = self.region, region = id, "surface region created");

        SurfaceHandle {
            scene: Rc::clone(&self.scene),
            region: id,
        }
    }

    /// Record a draw operation.
    pub fn draw(&self, bounds: Rect, label: impl Into<String>) {
        self.scene.borrow_mut().ops.push(DrawOp {
            region: self.region,
            bounds,
            label: label.into(),
        });
    }

    /// True when both handles point at the same region of the same surface.
    pub fn same_region(&self, other: &SurfaceHandle) -> bool {
        Rc::ptr_eq(&self.scene, &other.scene) && self.region == other.region
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_exists_on_creation() {
        let surface = Surface::new("screen");
        assert_eq!(surface.region_count(), 1);
        assert_eq!(surface.label(Surface::ROOT).as_deref(), Some("screen"));
        assert_eq!(surface.parent(Surface::ROOT), None);
    }

    #[test]
    fn nested_regions_build_a_tree() {
        let surface = Surface::new("screen");
        let grid = surface.root().region("grid");
        let a = grid.region("a");
        let b = grid.region("b");

        assert_eq!(surface.children(Surface::ROOT), vec![grid.region_id()]);
        assert_eq!(
            surface.children(grid.region_id()),
            vec![a.region_id(), b.region_id()]
        );
        assert_eq!(surface.parent(b.region_id()), Some(grid.region_id()));
        assert_eq!(surface.path(b.region_id()).as_deref(), Some("screen/grid/b"));
    }

    #[test]
    fn draw_ops_are_recorded_in_order() {
        let surface = Surface::new("screen");
        let root = surface.root();
        let child = root.region("child");
        child.draw(Rect::new(0.0, 0.0, 2.0, 2.0), "first");
        root.draw(Rect::new(1.0, 1.0, 3.0, 3.0), "second");

        let ops = surface.ops();
        assert_eq!(ops.len(), 2);
        assert_eq!(ops[0].label, "first");
        assert_eq!(ops[0].region, child.region_id());
        assert_eq!(ops[1].label, "second");
        assert_eq!(ops[1].region, Surface::ROOT);

        surface.clear_ops();
        assert!(surface.ops().is_empty());
        assert_eq!(surface.region_count(), 2);
    }

    #[test]
    fn unknown_region_queries_are_empty() {
        let surface = Surface::new("screen");
        assert!(surface.label(42).is_none());
        assert!(surface.children(42).is_empty());
        assert!(surface.path(42).is_none());
    }

    #[test]
    fn same_region_distinguishes_surfaces() {
        let a = Surface::new("a");
        let b = Surface::new("b");
        assert!(a.root().same_region(&a.root()));
        assert!(!a.root().same_region(&b.root()));
    }
}
