use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use kiss3d::resource::Mesh;
use kiss3d::scene::SceneNode;
use kiss3d::window::Window;
use nalgebra::{Point3, Translation3, UnitQuaternion, Vector3};

use crate::model::BodyRef;
use crate::scene::{AnnulusMesh, Appearance, InfoPayload, NodeHandle, SceneBackend, UiSink};

const ORBIT_PATH_COLOR: (f32, f32, f32) = (0.23, 0.29, 0.36);

/// The kiss3d side of the rendering collaborator. Every handle maps to a
/// group node under a single scene root; the scene layer only ever inserts
/// nodes and updates transforms, so nothing here is ever removed.
pub struct WindowBackend {
    root: SceneNode,
    nodes: Vec<SceneNode>,
}

impl WindowBackend {
    pub fn new(window: &mut Window) -> Self {
        WindowBackend {
            root: window.add_group(),
            nodes: Vec::new(),
        }
    }

    fn push(&mut self, node: SceneNode) -> NodeHandle {
        self.nodes.push(node);
        NodeHandle(self.nodes.len() - 1)
    }

    /// Textures are loaded best-effort: a missing file degrades to the
    /// body's flat fallback color instead of failing the scene.
    fn apply_surface(node: &mut SceneNode, texture: &str, fallback: Point3<f32>) {
        let path = Path::new(texture);
        if path.is_file() {
            node.set_texture_from_file(path, texture);
        } else {
            log::warn!("texture {:?} not found, using flat color", texture);
            node.set_color(fallback.x, fallback.y, fallback.z);
        }
    }

    fn kiss3d_mesh(mesh: &AnnulusMesh) -> Rc<RefCell<Mesh>> {
        Rc::new(RefCell::new(Mesh::new(
            mesh.coords.clone(),
            mesh.faces.clone(),
            None,
            Some(mesh.uvs.clone()),
            false,
        )))
    }
}

impl SceneBackend for WindowBackend {
    fn add_body(&mut self, radius: f32, look: &Appearance) -> NodeHandle {
        // A group per body: children (the sphere, any ring) don't inherit
        // the sphere node's radius scaling, and spin applies to the group.
        let mut group = self.root.add_group();
        let mut sphere = group.add_sphere(radius);
        Self::apply_surface(&mut sphere, look.texture, look.color);
        // The default material has no emissive term. The scene light rides
        // the camera, so a self-luminous body is always front-lit anyway.
        let _ = look.emissive;
        self.push(group)
    }

    fn add_ring(&mut self, parent: NodeHandle, mesh: &AnnulusMesh, texture: &str) -> NodeHandle {
        let Some(parent) = self.nodes.get_mut(parent.0) else {
            log::warn!("add_ring: unknown parent {:?}", parent);
            return NodeHandle(usize::MAX);
        };
        let mut node = parent.add_mesh(Self::kiss3d_mesh(mesh), Vector3::new(1.0, 1.0, 1.0));
        node.enable_backface_culling(false);
        Self::apply_surface(&mut node, texture, Point3::new(0.8, 0.75, 0.6));
        self.push(node)
    }

    fn add_orbit_path(&mut self, mesh: &AnnulusMesh) -> NodeHandle {
        let mut node = self
            .root
            .add_mesh(Self::kiss3d_mesh(mesh), Vector3::new(1.0, 1.0, 1.0));
        node.enable_backface_culling(false);
        let (r, g, b) = ORBIT_PATH_COLOR;
        node.set_color(r, g, b);
        self.push(node)
    }

    fn set_position(&mut self, node: NodeHandle, position: Point3<f32>) {
        if let Some(node) = self.nodes.get_mut(node.0) {
            node.set_local_translation(Translation3::from(position.coords));
        }
    }

    fn set_spin(&mut self, node: NodeHandle, angle: f32) {
        if let Some(node) = self.nodes.get_mut(node.0) {
            node.set_local_rotation(UnitQuaternion::from_axis_angle(&Vector3::y_axis(), angle));
        }
    }
}

/// Buffered UI state for the overlay: the scene layer writes label and
/// info-panel state here each frame, and the window shell draws it as text
/// once the frame's world positions are final.
#[derive(Default)]
pub struct Overlay {
    labels: Vec<(BodyRef, String, bool)>,
    info: Option<InfoPayload>,
}

impl Overlay {
    pub fn begin_frame(&mut self) {
        self.labels.clear();
    }

    pub fn labels(&self) -> impl Iterator<Item = (BodyRef, &str, bool)> {
        self.labels
            .iter()
            .map(|(body, text, visible)| (*body, text.as_str(), *visible))
    }

    pub fn info(&self) -> Option<&InfoPayload> {
        self.info.as_ref()
    }
}

impl UiSink for Overlay {
    fn label(&mut self, body: BodyRef, text: &str, visible: bool) {
        self.labels.push((body, text.to_owned(), visible));
    }

    fn show_info(&mut self, info: &InfoPayload) {
        self.info = Some(info.clone());
    }

    fn close_info(&mut self) {
        self.info = None;
    }
}
