use nalgebra::{Point3, Vector3};

/// A half-line through space, used for pointer picking.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Point3<f32>,
    /// Unit direction.
    pub dir: Vector3<f32>,
}

impl Ray {
    pub fn new(origin: Point3<f32>, dir: Vector3<f32>) -> Self {
        Ray {
            origin,
            dir: dir.normalize(),
        }
    }

    /// Smallest non-negative time of impact against a sphere, or `None` if
    /// the ray misses it or the sphere lies entirely behind the origin.
    pub fn sphere_toi(&self, center: &Point3<f32>, radius: f32) -> Option<f32> {
        let oc = self.origin - center;
        let b = oc.dot(&self.dir);
        let c = oc.norm_squared() - radius * radius;
        let discriminant = b * b - c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrt = discriminant.sqrt();
        let near = -b - sqrt;
        if near >= 0.0 {
            return Some(near);
        }
        // Origin inside the sphere: report the exit point.
        let far = -b + sqrt;
        (far >= 0.0).then_some(far)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn head_on_hit() {
        let ray = Ray::new(Point3::new(0.0, 0.0, 10.0), Vector3::new(0.0, 0.0, -1.0));
        let toi = ray.sphere_toi(&Point3::origin(), 2.0).unwrap();
        approx::assert_relative_eq!(toi, 8.0);
    }

    #[test]
    fn grazing_miss() {
        let ray = Ray::new(Point3::new(0.0, 2.1, 10.0), Vector3::new(0.0, 0.0, -1.0));
        assert_eq!(ray.sphere_toi(&Point3::origin(), 2.0), None);
    }

    #[test]
    fn sphere_behind_origin_is_missed() {
        let ray = Ray::new(Point3::new(0.0, 0.0, 10.0), Vector3::new(0.0, 0.0, 1.0));
        assert_eq!(ray.sphere_toi(&Point3::origin(), 2.0), None);
    }

    #[test]
    fn origin_inside_sphere_reports_exit() {
        let ray = Ray::new(Point3::origin(), Vector3::new(1.0, 0.0, 0.0));
        let toi = ray.sphere_toi(&Point3::origin(), 2.0).unwrap();
        approx::assert_relative_eq!(toi, 2.0);
    }

    #[test]
    fn direction_is_normalized() {
        let ray = Ray::new(Point3::new(0.0, 0.0, 10.0), Vector3::new(0.0, 0.0, -5.0));
        let toi = ray.sphere_toi(&Point3::origin(), 2.0).unwrap();
        approx::assert_relative_eq!(toi, 8.0);
    }
}
