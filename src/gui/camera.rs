use kiss3d::camera::Camera;
use kiss3d::event::WindowEvent;
use kiss3d::resource::ShaderUniform;
use kiss3d::window::Canvas;
use nalgebra::{Isometry3, Matrix4, Perspective3, Point2, Point3, Vector3};

// Matches the scene scale: the farthest orbit path sits at radius ~230.
const Z_NEAR: f32 = 0.1;
const Z_FAR: f32 = 2000.0;

/// A camera with no input handling of its own: the transition rig feeds it
/// an eye and a look-at point every frame. It only listens for framebuffer
/// resizes, which it needs for its aspect ratio and for converting cursor
/// positions to normalized device coordinates.
pub struct DrivenCamera {
    eye: Point3<f32>,
    at: Point3<f32>,
    width: u32,
    height: u32,
    fovy: f32,
}

impl DrivenCamera {
    pub fn new(fovy: f32) -> Self {
        DrivenCamera {
            eye: Point3::new(0.0, 0.0, 1.0),
            at: Point3::origin(),
            width: 800,
            height: 600,
            fovy,
        }
    }

    pub fn look_from(&mut self, eye: Point3<f32>, at: Point3<f32>) {
        self.eye = eye;
        self.at = at;
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Cursor position in pixels to normalized device coordinates,
    /// [-1, 1] on both axes with +y up.
    pub fn ndc(&self, x: f64, y: f64) -> Point2<f32> {
        Point2::new(
            (2.0 * x / f64::from(self.width) - 1.0) as f32,
            (1.0 - 2.0 * y / f64::from(self.height)) as f32,
        )
    }

    /// Projects a world point to pixel coordinates, or `None` when it lies
    /// behind the camera.
    pub fn project(&self, world: &Point3<f32>) -> Option<Point2<f32>> {
        let clip = self.transformation() * world.to_homogeneous();
        if clip.w <= 0.0 {
            return None;
        }
        let ndc = clip / clip.w;
        Some(Point2::new(
            (ndc.x + 1.0) / 2.0 * self.width as f32,
            (1.0 - ndc.y) / 2.0 * self.height as f32,
        ))
    }

    fn projection(&self) -> Perspective3<f32> {
        Perspective3::new(self.aspect(), self.fovy, Z_NEAR, Z_FAR)
    }

    fn projection_matrix(&self) -> Matrix4<f32> {
        self.projection().into_inner()
    }

    fn view_matrix(&self) -> Matrix4<f32> {
        self.view_transform().to_homogeneous()
    }
}

impl Camera for DrivenCamera {
    fn handle_event(&mut self, _canvas: &Canvas, event: &WindowEvent) {
        if let WindowEvent::FramebufferSize(w, h) = *event {
            self.width = w;
            self.height = h;
        }
    }

    fn eye(&self) -> Point3<f32> {
        self.eye
    }

    fn view_transform(&self) -> Isometry3<f32> {
        Isometry3::look_at_rh(&self.eye, &self.at, &Vector3::y())
    }

    fn transformation(&self) -> Matrix4<f32> {
        self.projection_matrix() * self.view_matrix()
    }

    fn inverse_transformation(&self) -> Matrix4<f32> {
        self.transformation().try_inverse().unwrap()
    }

    fn clip_planes(&self) -> (f32, f32) {
        (Z_NEAR, Z_FAR)
    }

    fn update(&mut self, _canvas: &Canvas) {}

    fn upload(
        &self,
        _: usize,
        proj: &mut ShaderUniform<Matrix4<f32>>,
        view: &mut ShaderUniform<Matrix4<f32>>,
    ) {
        proj.upload(&self.projection_matrix());
        view.upload(&self.view_matrix());
    }
}
