use kiss3d::light::Light;
use kiss3d::window::Window;

use clap::Parser;

use helios::gui::Simulation;
use helios::model::solar_system;

#[derive(Debug, Parser)]
struct Args {
    /// Multiplier applied to both orbital motion and axial spin.
    #[arg(long, default_value_t = 1.0)]
    timescale: f64,

    /// Number of background stars to scatter around the system.
    #[arg(long, default_value_t = 1500)]
    stars: usize,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let registry = solar_system();
    if let Err(err) = registry.validate() {
        log::error!("invalid body registry: {}", err);
        std::process::exit(1);
    }
    log::info!("loaded {} bodies", registry.len());

    let mut window = Window::new("Helios");
    window.set_light(Light::StickToCamera);
    window.set_framerate_limit(Some(60));

    let simulation = Simulation::new(registry, &mut window, args.timescale, args.stars);
    window.render_loop(simulation);
}
