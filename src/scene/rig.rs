use nalgebra::{Point2, Point3, Vector3};

use crate::math::easing::{lerp_point, Easing};
use crate::math::ray::Ray;

/// Fly-to duration in seconds.
pub const FLY_TIME: f32 = 2.0;
/// Camera standoff from a focused body, in body radii.
pub const FOCUS_STANDOFF: f32 = 4.0;

/// A timed interpolation of one camera property. Clamps exactly to its end
/// value on completion; no overshoot.
#[derive(Debug, Clone, Copy)]
pub struct Transition {
    from: Point3<f32>,
    to: Point3<f32>,
    duration: f32,
    elapsed: f32,
    easing: Easing,
}

impl Transition {
    pub fn new(from: Point3<f32>, to: Point3<f32>, duration: f32, easing: Easing) -> Self {
        Transition {
            from,
            to,
            duration,
            elapsed: 0.0,
            easing,
        }
    }

    pub fn advance(&mut self, dt: f32) {
        self.elapsed = (self.elapsed + dt).min(self.duration);
    }

    pub fn finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    pub fn value(&self) -> Point3<f32> {
        if self.finished() {
            return self.to;
        }
        let t = self.easing.apply(self.elapsed / self.duration);
        lerp_point(&self.from, &self.to, t)
    }

    pub fn end(&self) -> Point3<f32> {
        self.to
    }
}

/// Camera state: position, look-at target, and at most one in-flight
/// transition per property. Starting a new transition supersedes the old
/// one, picking up from the current interpolated value.
#[derive(Debug)]
pub struct CameraRig {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    fovy: f32,
    aspect: f32,
    home_position: Point3<f32>,
    home_target: Point3<f32>,
    position_path: Option<Transition>,
    target_path: Option<Transition>,
}

impl CameraRig {
    pub fn new(aspect: f32) -> Self {
        let home_position = Point3::new(0.0, 250.0, 350.0);
        let home_target = Point3::origin();
        CameraRig {
            position: home_position,
            target: home_target,
            fovy: 75.0_f32.to_radians(),
            aspect,
            home_position,
            home_target,
            position_path: None,
            target_path: None,
        }
    }

    pub fn fovy(&self) -> f32 {
        self.fovy
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
    }

    /// Fly toward a body: stand off along x and z by four radii and along y
    /// by two, looking at the body's position at the time of the call.
    pub fn focus(&mut self, body_position: Point3<f32>, radius: f32) {
        let offset = radius * FOCUS_STANDOFF;
        let end = body_position + Vector3::new(offset, offset / 2.0, offset);
        self.fly_to(end, body_position);
    }

    /// Fly back to the home view. Valid (and still animated) when nothing
    /// is focused.
    pub fn unfocus(&mut self) {
        let (position, target) = (self.home_position, self.home_target);
        self.fly_to(position, target);
    }

    fn fly_to(&mut self, position: Point3<f32>, target: Point3<f32>) {
        self.position_path = Some(Transition::new(
            self.position,
            position,
            FLY_TIME,
            Easing::CubicInOut,
        ));
        self.target_path = Some(Transition::new(
            self.target,
            target,
            FLY_TIME,
            Easing::CubicInOut,
        ));
    }

    /// Advances active transitions, dropping each once complete.
    pub fn tick(&mut self, dt: f32) {
        if let Some(path) = &mut self.position_path {
            path.advance(dt);
            self.position = path.value();
            if path.finished() {
                self.position_path = None;
            }
        }
        if let Some(path) = &mut self.target_path {
            path.advance(dt);
            self.target = path.value();
            if path.finished() {
                self.target_path = None;
            }
        }
    }

    pub fn in_flight(&self) -> bool {
        self.position_path.is_some() || self.target_path.is_some()
    }

    pub fn position_path(&self) -> Option<&Transition> {
        self.position_path.as_ref()
    }

    pub fn target_path(&self) -> Option<&Transition> {
        self.target_path.as_ref()
    }

    /// Ray from the camera through a normalized device coordinate, both
    /// axes in [-1, 1] with +y up.
    pub fn ray_through(&self, ndc: Point2<f32>) -> Ray {
        let forward = (self.target - self.position).normalize();
        let right = forward.cross(&Vector3::y()).normalize();
        let up = right.cross(&forward);

        let half_height = (self.fovy / 2.0).tan();
        let dir = forward
            + right * (ndc.x * half_height * self.aspect)
            + up * (ndc.y * half_height);
        Ray::new(self.position, dir)
    }
}
