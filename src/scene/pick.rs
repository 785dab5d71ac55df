use nalgebra::Point2;

use crate::model::BodyRef;

use super::graph::SceneGraph;
use super::rig::CameraRig;

/// Resolves a pointer position (NDC, both axes in [-1, 1]) to the body or
/// moon under it, if any. Only body and moon spheres are hit-testable;
/// rings and orbit-path indicators never intercept the ray. On multiple
/// hits the one nearest the camera wins.
///
/// A moon resolves to itself, not to its parent: it is an independently
/// hoverable and selectable body with its own label and fact sheet.
pub fn resolve_at(ndc: Point2<f32>, rig: &CameraRig, graph: &SceneGraph) -> Option<BodyRef> {
    let ray = rig.ray_through(ndc);

    let mut nearest: Option<(f32, BodyRef)> = None;
    let mut consider = |toi: f32, hit: BodyRef| {
        if nearest.map_or(true, |(best, _)| toi < best) {
            nearest = Some((toi, hit));
        }
    };

    for body in graph.bodies() {
        if let Some(toi) = ray.sphere_toi(&body.position, body.radius) {
            consider(toi, BodyRef::Planet(body.id));
        }
        if let Some(moon) = &body.moon {
            if let Some(toi) = ray.sphere_toi(&moon.position, moon.radius) {
                consider(toi, BodyRef::Moon(body.id));
            }
        }
    }

    nearest.map(|(_, hit)| hit)
}
