use nalgebra::Point3;

/// Index of a body in the registry's declaration order.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct BodyId(pub usize);

/// A pickable, focusable object in the scene. A moon is addressed through
/// its parent body rather than by a derived key.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum BodyRef {
    Planet(BodyId),
    Moon(BodyId),
}

impl BodyRef {
    pub fn body_id(self) -> BodyId {
        match self {
            BodyRef::Planet(id) | BodyRef::Moon(id) => id,
        }
    }
}

/// Display-only text shown in the info panel.
#[derive(Debug, Clone)]
pub struct FactSheet {
    pub diameter: &'static str,
    pub distance: &'static str,
    pub orbit_period: &'static str,
    pub rotation_period: &'static str,
    pub description: &'static str,
}

/// Circular orbit in the horizontal plane.
#[derive(Debug, Clone, Copy)]
pub struct OrbitSpec {
    pub radius: f32,
    /// Angular speed multiplier; the simulator scales this by its phase rate.
    pub speed: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct RingSpec {
    pub inner: f32,
    pub outer: f32,
    pub texture: &'static str,
}

#[derive(Debug, Clone)]
pub struct MoonSpec {
    pub name: &'static str,
    pub radius: f32,
    pub texture: &'static str,
    pub color: Point3<f32>,
    pub orbit: OrbitSpec,
    pub spin_speed: f64,
    pub facts: FactSheet,
}

/// All the immutable info about a body. Built once at startup, never mutated.
#[derive(Debug, Clone)]
pub struct BodyDescriptor {
    pub key: &'static str,
    pub name: &'static str,
    pub radius: f32,
    pub texture: &'static str,
    /// Fallback when the texture is missing or still loading.
    pub color: Point3<f32>,
    pub position: Point3<f32>,
    /// `None` exactly for the central body.
    pub orbit: Option<OrbitSpec>,
    pub spin_speed: f64,
    pub ring: Option<RingSpec>,
    pub moon: Option<MoonSpec>,
    /// Self-luminous (the sun).
    pub emissive: bool,
    pub facts: FactSheet,
}
