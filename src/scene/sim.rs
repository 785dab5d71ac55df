use std::f64::consts::TAU;

use nalgebra::Vector3;

use crate::model::Registry;

use super::backend::SceneBackend;
use super::graph::SceneGraph;

/// Orbital phase advances at one tenth of a radian per second of global
/// clock per unit of orbit speed.
const DEFAULT_PHASE_RATE: f64 = 0.1;

/// Advances orbital phase and self-rotation from an injected clock. Phase
/// is derived from total elapsed time rather than accumulated deltas, so
/// variable frame rates never make orbits drift.
#[derive(Debug, Clone, Copy)]
pub struct Simulator {
    phase_rate: f64,
}

impl Default for Simulator {
    fn default() -> Self {
        Simulator {
            phase_rate: DEFAULT_PHASE_RATE,
        }
    }
}

impl Simulator {
    pub fn new(phase_rate: f64) -> Self {
        Simulator { phase_rate }
    }

    /// One tick. `elapsed` is the monotonic global clock in seconds; `dt`
    /// is the time since the previous tick. With `dt = 0` and an unchanged
    /// clock this is a no-op.
    ///
    /// Each body is updated before its moon, so a moon's pivot always
    /// matches its parent's position from the same tick.
    pub fn advance(
        &self,
        graph: &mut SceneGraph,
        registry: &Registry,
        backend: &mut dyn SceneBackend,
        elapsed: f64,
        dt: f64,
    ) {
        for body in graph.bodies_mut() {
            let Some(desc) = registry.get(body.id) else {
                log::warn!("simulator: no descriptor for {:?}, skipping", body.id);
                continue;
            };

            body.spin = wrap_angle(body.spin + desc.spin_speed * dt);
            backend.set_spin(body.node, body.spin as f32);

            if let Some(orbit) = &desc.orbit {
                let phase = elapsed * self.phase_rate * orbit.speed;
                body.position.x = orbit.radius * phase.cos() as f32;
                body.position.z = orbit.radius * phase.sin() as f32;
                // y keeps its authored value; orbits stay in the horizontal
                // plane. The central body never moves at all.
                backend.set_position(body.node, body.position);
            }

            let parent_position = body.position;
            if let (Some(moon), Some(spec)) = (body.moon.as_mut(), desc.moon.as_ref()) {
                moon.pivot = parent_position;
                let phase = elapsed * self.phase_rate * spec.orbit.speed;
                moon.position = moon.pivot
                    + Vector3::new(
                        spec.orbit.radius * phase.cos() as f32,
                        0.0,
                        spec.orbit.radius * phase.sin() as f32,
                    );
                moon.spin = wrap_angle(moon.spin + spec.spin_speed * dt);
                backend.set_position(moon.node, moon.position);
                backend.set_spin(moon.node, moon.spin as f32);
            }
        }
    }
}

fn wrap_angle(angle: f64) -> f64 {
    angle.rem_euclid(TAU)
}

#[cfg(test)]
mod tests {
    use nalgebra::Point3;

    use super::*;
    use crate::model::{
        BodyDescriptor, FactSheet, MoonSpec, OrbitSpec, Registry,
    };
    use crate::scene::backend::testing::RecordingBackend;

    fn facts() -> FactSheet {
        FactSheet {
            diameter: "",
            distance: "",
            orbit_period: "",
            rotation_period: "",
            description: "",
        }
    }

    fn sun() -> BodyDescriptor {
        BodyDescriptor {
            key: "sun",
            name: "Sun",
            radius: 20.0,
            texture: "sun.jpg",
            color: Point3::new(1.0, 1.0, 0.0),
            position: Point3::origin(),
            orbit: None,
            spin_speed: 0.5,
            ring: None,
            moon: None,
            emissive: true,
            facts: facts(),
        }
    }

    fn earth_with_moon() -> BodyDescriptor {
        BodyDescriptor {
            key: "earth",
            name: "Earth",
            radius: 6.0,
            texture: "earth.jpg",
            color: Point3::new(0.0, 0.0, 1.0),
            position: Point3::new(100.0, 2.0, 0.0),
            orbit: Some(OrbitSpec {
                radius: 100.0,
                speed: 1.0,
            }),
            spin_speed: 0.5,
            ring: None,
            moon: Some(MoonSpec {
                name: "Moon",
                radius: 1.6,
                texture: "moon.jpg",
                color: Point3::new(0.5, 0.5, 0.5),
                orbit: OrbitSpec {
                    radius: 10.0,
                    speed: 2.0,
                },
                spin_speed: 0.25,
                facts: facts(),
            }),
            emissive: false,
            facts: facts(),
        }
    }

    fn setup() -> (Registry, SceneGraph, RecordingBackend) {
        let registry = Registry::new(vec![sun(), earth_with_moon()]);
        let mut backend = RecordingBackend::default();
        let graph = SceneGraph::build(&registry, &mut backend);
        (registry, graph, backend)
    }

    // Unit phase rate makes orbital phase equal elapsed * orbit speed.
    fn simulator() -> Simulator {
        Simulator::new(1.0)
    }

    #[test]
    fn zero_dt_and_clock_is_a_noop() {
        let (registry, mut graph, mut backend) = setup();
        let sim = simulator();
        sim.advance(&mut graph, &registry, &mut backend, 1.5, 0.5);

        let before: Vec<_> = graph
            .bodies()
            .map(|b| (b.position, b.spin, b.moon.as_ref().map(|m| (m.position, m.spin))))
            .collect();
        sim.advance(&mut graph, &registry, &mut backend, 1.5, 0.0);
        let after: Vec<_> = graph
            .bodies()
            .map(|b| (b.position, b.spin, b.moon.as_ref().map(|m| (m.position, m.spin))))
            .collect();
        assert_eq!(before, after);
    }

    #[test]
    fn central_body_only_spins() {
        let (registry, mut graph, mut backend) = setup();
        simulator().advance(&mut graph, &registry, &mut backend, 3.0, 1.0);

        let sun = graph.get(registry.lookup("sun").unwrap()).unwrap();
        assert_eq!(sun.position, Point3::origin());
        approx::assert_relative_eq!(sun.spin, 0.5);
    }

    #[test]
    fn spin_wraps_without_changing_orientation() {
        let (registry, mut graph, mut backend) = setup();
        let sim = simulator();
        // Spin speed 0.5 for 20 s of delta pushes the angle past 2π.
        for i in 0..20 {
            sim.advance(&mut graph, &registry, &mut backend, i as f64, 1.0);
        }

        let earth = graph.get(registry.lookup("earth").unwrap()).unwrap();
        assert!(earth.spin >= 0.0 && earth.spin < TAU);
        // 0.5 rad/s * 20 s, wrapped.
        approx::assert_relative_eq!(earth.spin, 10.0 - TAU, epsilon = 1e-9);
        approx::assert_relative_eq!(earth.spin.cos(), 10.0_f64.cos(), epsilon = 1e-9);
        approx::assert_relative_eq!(earth.spin.sin(), 10.0_f64.sin(), epsilon = 1e-9);
    }

    #[test]
    fn moon_pivot_tracks_parent_for_any_tick_sequence() {
        let (registry, mut graph, mut backend) = setup();
        let sim = simulator();
        let earth_id = registry.lookup("earth").unwrap();

        let mut elapsed = 0.0;
        for dt in [0.016, 0.7, 0.0, 0.033, 2.5, 0.016] {
            elapsed += dt;
            sim.advance(&mut graph, &registry, &mut backend, elapsed, dt);

            let earth = graph.get(earth_id).unwrap();
            let moon = earth.moon.as_ref().unwrap();
            assert_eq!(moon.pivot, earth.position);
            approx::assert_relative_eq!((moon.position - moon.pivot).norm(), 10.0, epsilon = 1e-4);
        }
    }

    #[test]
    fn orbit_keeps_authored_height() {
        let (registry, mut graph, mut backend) = setup();
        simulator().advance(&mut graph, &registry, &mut backend, 2.0, 1.0);

        let earth = graph.get(registry.lookup("earth").unwrap()).unwrap();
        approx::assert_relative_eq!(earth.position.y, 2.0);
        approx::assert_relative_eq!(
            (earth.position.x * earth.position.x + earth.position.z * earth.position.z).sqrt(),
            100.0,
            epsilon = 1e-4
        );
    }
}
