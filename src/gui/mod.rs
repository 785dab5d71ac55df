use kiss3d::camera::Camera;
use kiss3d::event::{Action, EventManager, Key, MouseButton, WindowEvent};
use kiss3d::planar_camera::PlanarCamera;
use kiss3d::post_processing::PostProcessingEffect;
use kiss3d::renderer::Renderer;
use kiss3d::window::{State, Window};

use nalgebra::{Point2, Point3, Vector3};
use rand::Rng;

use std::time::Instant;

use self::backend::{Overlay, WindowBackend};
use self::camera::DrivenCamera;
use crate::model::Registry;
use crate::scene::App;

mod backend;
mod camera;

/// Half-side of the cube the star field is scattered in.
const STAR_FIELD_EXTENT: f32 = 1000.0;
/// How far above a body's surface its hover label floats.
const LABEL_LIFT: f32 = 2.0;
const TEXT_SIZE: f32 = 60.0;

pub struct Simulation {
    // Scene state
    app: App,
    backend: WindowBackend,
    overlay: Overlay,
    camera: DrivenCamera,
    stars: Vec<Point3<f32>>,
    // Clock
    started: Instant,
    last_frame: Instant,
    timescale: f64,
}

impl Simulation {
    pub fn new(
        registry: Registry,
        window: &mut Window,
        timescale: f64,
        star_count: usize,
    ) -> Self {
        let mut backend = WindowBackend::new(window);
        let app = App::new(registry, &mut backend, 800.0 / 600.0);
        let camera = DrivenCamera::new(app.rig().fovy());

        let mut rng = rand::thread_rng();
        let stars = (0..star_count)
            .map(|_| {
                Point3::new(
                    rng.gen_range(-STAR_FIELD_EXTENT..STAR_FIELD_EXTENT),
                    rng.gen_range(-STAR_FIELD_EXTENT..STAR_FIELD_EXTENT),
                    rng.gen_range(-STAR_FIELD_EXTENT..STAR_FIELD_EXTENT),
                )
            })
            .collect();

        let now = Instant::now();
        Simulation {
            app,
            backend,
            overlay: Overlay::default(),
            camera,
            stars,
            started: now,
            last_frame: now,
            timescale,
        }
    }

    fn process_user_input(&mut self, mut events: EventManager) {
        for mut event in events.iter() {
            match event.value {
                WindowEvent::CursorPos(x, y, _) => {
                    self.app.pointer_moved(self.camera.ndc(x, y));
                }
                WindowEvent::MouseButton(MouseButton::Button1, Action::Press, _) => {
                    self.app.clicked();
                }
                WindowEvent::Key(Key::Escape, Action::Press, _) => {
                    self.app.deselect();
                    // Escape's default action closes the window.
                    event.inhibited = true;
                }
                _ => {}
            }
        }
    }

    fn draw_stars(&self, window: &mut Window) {
        let color = Point3::new(1.0, 1.0, 1.0);
        for star in &self.stars {
            window.draw_point(star, &color);
        }
    }

    fn draw_labels(&self, window: &mut Window) {
        let font = kiss3d::text::Font::default();
        let color = Point3::new(1.0, 1.0, 1.0);
        for (body, text, visible) in self.overlay.labels() {
            if !visible {
                continue;
            }
            let Some((position, radius)) = self.app.graph().sphere_of(body) else {
                continue;
            };
            let anchor = position + Vector3::new(0.0, radius + LABEL_LIFT, 0.0);
            if let Some(px) = self.camera.project(&anchor) {
                window.draw_text(
                    text,
                    // draw_text wants doubled pixel coordinates on hidpi
                    &Point2::new(px.x * 2.0, px.y * 2.0),
                    TEXT_SIZE,
                    &font,
                    &color,
                );
            }
        }
    }

    fn draw_info(&self, window: &mut Window) {
        let Some(info) = self.overlay.info() else {
            return;
        };
        let font = kiss3d::text::Font::default();
        let color = Point3::new(1.0, 1.0, 1.0);
        let text = format!(
            "{}
Diameter: {}
Distance from Sun: {}
Orbit period: {}
Rotation period: {}

{}",
            info.name,
            info.diameter,
            info.distance,
            info.orbit_period,
            info.rotation_period,
            info.description,
        );
        window.draw_text(&text, &Point2::origin(), TEXT_SIZE, &font, &color);
    }
}

impl State for Simulation {
    fn cameras_and_effect_and_renderer(
        &mut self,
    ) -> (
        Option<&mut dyn Camera>,
        Option<&mut dyn PlanarCamera>,
        Option<&mut dyn Renderer>,
        Option<&mut dyn PostProcessingEffect>,
    ) {
        (Some(&mut self.camera), None, None, None)
    }

    fn step(&mut self, window: &mut Window) {
        self.process_user_input(window.events());

        let now = Instant::now();
        let dt = now.duration_since(self.last_frame).as_secs_f64() * self.timescale;
        let elapsed = now.duration_since(self.started).as_secs_f64() * self.timescale;
        self.last_frame = now;

        self.app.set_aspect(self.camera.aspect());
        self.overlay.begin_frame();
        self.app
            .frame(&mut self.backend, &mut self.overlay, elapsed, dt);

        let rig = self.app.rig();
        self.camera.look_from(rig.position, rig.target);

        self.draw_stars(window);
        self.draw_labels(window);
        self.draw_info(window);
    }
}
