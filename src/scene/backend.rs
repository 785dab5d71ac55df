use std::f32::consts::TAU;

use nalgebra::{Point2, Point3};

use crate::model::{BodyRef, FactSheet};

/// Opaque handle to a renderable node owned by the rendering collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeHandle(pub usize);

/// How a body sphere should be shaded.
#[derive(Debug, Clone)]
pub struct Appearance<'a> {
    pub texture: &'a str,
    /// Used when the texture is missing or still loading.
    pub color: Point3<f32>,
    /// Self-luminous; unaffected by the scene light.
    pub emissive: bool,
}

/// A flat triangulated ring in the XZ plane, with explicit per-vertex
/// texture coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnulusMesh {
    pub coords: Vec<Point3<f32>>,
    pub uvs: Vec<Point2<f32>>,
    pub faces: Vec<Point3<u16>>,
}

/// Builds an annulus between `inner` and `outer`.
///
/// The V texture coordinate is remapped per vertex so it runs linearly with
/// radial distance, 1 at the inner edge down to 0 at the outer edge. This
/// keeps a ring texture's radial gradient aligned with the geometry no
/// matter the annulus proportions; the default planar mapping would not.
pub fn annulus(inner: f32, outer: f32, segments: u16) -> AnnulusMesh {
    assert!(segments >= 3, "annulus needs at least 3 segments");
    assert!(inner < outer, "annulus inner radius must be below outer");

    let mut coords = Vec::with_capacity(2 * (segments as usize + 1));
    let mut uvs = Vec::with_capacity(coords.capacity());
    for i in 0..=segments {
        let theta = TAU * f32::from(i) / f32::from(segments);
        let (sin, cos) = theta.sin_cos();
        coords.push(Point3::new(inner * cos, 0.0, inner * sin));
        uvs.push(Point2::new(0.0, 1.0));
        coords.push(Point3::new(outer * cos, 0.0, outer * sin));
        uvs.push(Point2::new(0.0, 0.0));
    }

    let mut faces = Vec::with_capacity(2 * segments as usize);
    for i in 0..segments {
        let inner0 = 2 * i;
        let outer0 = 2 * i + 1;
        let inner1 = 2 * i + 2;
        let outer1 = 2 * i + 3;
        faces.push(Point3::new(inner0, outer0, inner1));
        faces.push(Point3::new(outer0, outer1, inner1));
    }

    AnnulusMesh { coords, uvs, faces }
}

/// The rendering collaborator. The scene layer only ever inserts nodes and
/// updates their transforms; it never removes anything.
pub trait SceneBackend {
    /// Insert a sphere at the scene root.
    fn add_body(&mut self, radius: f32, look: &Appearance) -> NodeHandle;

    /// Insert a textured ring as a child of `parent`, following its
    /// transform.
    fn add_ring(&mut self, parent: NodeHandle, mesh: &AnnulusMesh, texture: &str) -> NodeHandle;

    /// Insert an untextured orbit-path indicator at the scene root.
    fn add_orbit_path(&mut self, mesh: &AnnulusMesh) -> NodeHandle;

    fn set_position(&mut self, node: NodeHandle, position: Point3<f32>);

    /// Rotation about the node's vertical axis, in radians.
    fn set_spin(&mut self, node: NodeHandle, angle: f32);
}

/// What the info panel shows for a selected body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoPayload {
    pub name: String,
    pub diameter: String,
    pub distance: String,
    pub orbit_period: String,
    pub rotation_period: String,
    pub description: String,
}

impl InfoPayload {
    pub fn new(name: &str, facts: &FactSheet) -> Self {
        InfoPayload {
            name: name.to_owned(),
            diameter: facts.diameter.to_owned(),
            distance: facts.distance.to_owned(),
            orbit_period: facts.orbit_period.to_owned(),
            rotation_period: facts.rotation_period.to_owned(),
            description: facts.description.to_owned(),
        }
    }
}

/// The UI collaborator. Receives label state every frame and info-panel
/// updates on selection changes.
pub trait UiSink {
    /// Emitted for every body every frame; at most one body is `visible`.
    fn label(&mut self, body: BodyRef, text: &str, visible: bool);

    fn show_info(&mut self, info: &InfoPayload);

    fn close_info(&mut self);
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::HashMap;

    use super::*;

    /// Records backend calls so tests can assert on scene mutations without
    /// a window.
    #[derive(Default)]
    pub struct RecordingBackend {
        pub bodies: Vec<f32>,
        pub rings: Vec<(NodeHandle, AnnulusMesh)>,
        pub orbit_paths: Vec<AnnulusMesh>,
        pub positions: HashMap<NodeHandle, Point3<f32>>,
        pub spins: HashMap<NodeHandle, f32>,
        next: usize,
    }

    impl RecordingBackend {
        fn next_handle(&mut self) -> NodeHandle {
            let handle = NodeHandle(self.next);
            self.next += 1;
            handle
        }
    }

    impl SceneBackend for RecordingBackend {
        fn add_body(&mut self, radius: f32, _look: &Appearance) -> NodeHandle {
            self.bodies.push(radius);
            self.next_handle()
        }

        fn add_ring(
            &mut self,
            parent: NodeHandle,
            mesh: &AnnulusMesh,
            _texture: &str,
        ) -> NodeHandle {
            self.rings.push((parent, mesh.clone()));
            self.next_handle()
        }

        fn add_orbit_path(&mut self, mesh: &AnnulusMesh) -> NodeHandle {
            self.orbit_paths.push(mesh.clone());
            self.next_handle()
        }

        fn set_position(&mut self, node: NodeHandle, position: Point3<f32>) {
            self.positions.insert(node, position);
        }

        fn set_spin(&mut self, node: NodeHandle, angle: f32) {
            self.spins.insert(node, angle);
        }
    }

    /// Collects UI events for assertions.
    #[derive(Default)]
    pub struct RecordingUi {
        pub labels: Vec<(BodyRef, String, bool)>,
        pub info: Option<InfoPayload>,
        pub closes: usize,
    }

    impl UiSink for RecordingUi {
        fn label(&mut self, body: BodyRef, text: &str, visible: bool) {
            self.labels.push((body, text.to_owned(), visible));
        }

        fn show_info(&mut self, info: &InfoPayload) {
            self.info = Some(info.clone());
        }

        fn close_info(&mut self) {
            self.closes += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn annulus_v_runs_linearly_with_radius() {
        let mesh = annulus(2.0, 6.0, 64);
        for (coord, uv) in mesh.coords.iter().zip(&mesh.uvs) {
            let r = (coord.x * coord.x + coord.z * coord.z).sqrt();
            let expected_v = 1.0 - (r - 2.0) / (6.0 - 2.0);
            approx::assert_relative_eq!(uv.y, expected_v, epsilon = 1e-5);
            assert_eq!(uv.x, 0.0);
            assert_eq!(coord.y, 0.0);
        }
    }

    #[test]
    fn annulus_face_indices_are_in_bounds() {
        let mesh = annulus(1.0, 2.0, 16);
        let n = mesh.coords.len() as u16;
        assert_eq!(mesh.faces.len(), 32);
        for face in &mesh.faces {
            assert!(face.x < n && face.y < n && face.z < n);
        }
    }
}
