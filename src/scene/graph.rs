use nalgebra::{Point3, Vector3};

use crate::model::{BodyId, BodyRef, Registry};

use super::backend::{annulus, Appearance, NodeHandle, SceneBackend};

const PATH_SEGMENTS: u16 = 128;
const RING_SEGMENTS: u16 = 128;
const PATH_HALF_WIDTH: f32 = 0.15;

/// Mutable per-moon state. Owned by the parent body's runtime state; the
/// parent/child relation lives in the type, not in a key convention.
#[derive(Debug)]
pub struct MoonRuntime {
    pub node: NodeHandle,
    pub radius: f32,
    /// The parent's position as of the last simulation tick.
    pub pivot: Point3<f32>,
    pub position: Point3<f32>,
    pub spin: f64,
}

/// Mutable per-body state, created during scene-graph build.
#[derive(Debug)]
pub struct BodyRuntime {
    pub id: BodyId,
    pub node: NodeHandle,
    pub radius: f32,
    pub position: Point3<f32>,
    pub spin: f64,
    pub moon: Option<MoonRuntime>,
}

/// Renderable handles plus runtime state for every body in the registry.
#[derive(Debug)]
pub struct SceneGraph {
    bodies: Vec<BodyRuntime>,
}

impl SceneGraph {
    /// Builds the scene: one sphere per body, rings as children of their
    /// planet, moons as direct scene children (so a planet's spin never
    /// drags its moon around), and an orbit-path indicator per orbiting
    /// body. Insertion only; deterministic for a given registry.
    pub fn build(registry: &Registry, backend: &mut dyn SceneBackend) -> Self {
        let mut bodies = Vec::with_capacity(registry.len());

        for (id, desc) in registry.bodies() {
            let node = backend.add_body(
                desc.radius,
                &Appearance {
                    texture: desc.texture,
                    color: desc.color,
                    emissive: desc.emissive,
                },
            );
            backend.set_position(node, desc.position);

            if let Some(orbit) = &desc.orbit {
                backend.add_orbit_path(&annulus(
                    orbit.radius - PATH_HALF_WIDTH,
                    orbit.radius + PATH_HALF_WIDTH,
                    PATH_SEGMENTS,
                ));
            }

            if let Some(ring) = &desc.ring {
                backend.add_ring(
                    node,
                    &annulus(ring.inner, ring.outer, RING_SEGMENTS),
                    ring.texture,
                );
            }

            let moon = desc.moon.as_ref().map(|spec| {
                let moon_node = backend.add_body(
                    spec.radius,
                    &Appearance {
                        texture: spec.texture,
                        color: spec.color,
                        emissive: false,
                    },
                );
                let position = desc.position + Vector3::new(spec.orbit.radius, 0.0, 0.0);
                backend.set_position(moon_node, position);
                MoonRuntime {
                    node: moon_node,
                    radius: spec.radius,
                    pivot: desc.position,
                    position,
                    spin: 0.0,
                }
            });

            bodies.push(BodyRuntime {
                id,
                node,
                radius: desc.radius,
                position: desc.position,
                spin: 0.0,
                moon,
            });
        }

        SceneGraph { bodies }
    }

    pub fn bodies(&self) -> impl Iterator<Item = &BodyRuntime> {
        self.bodies.iter()
    }

    pub fn bodies_mut(&mut self) -> impl Iterator<Item = &mut BodyRuntime> {
        self.bodies.iter_mut()
    }

    pub fn get(&self, id: BodyId) -> Option<&BodyRuntime> {
        self.bodies.get(id.0)
    }

    /// Current world-space bounding sphere of a body or moon.
    pub fn sphere_of(&self, body: BodyRef) -> Option<(Point3<f32>, f32)> {
        let runtime = self.get(body.body_id())?;
        match body {
            BodyRef::Planet(_) => Some((runtime.position, runtime.radius)),
            BodyRef::Moon(_) => {
                let moon = runtime.moon.as_ref()?;
                Some((moon.position, moon.radius))
            }
        }
    }
}
