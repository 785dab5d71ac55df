mod backend;
mod frame;
mod graph;
mod pick;
mod rig;
mod sim;

pub use backend::{annulus, AnnulusMesh, Appearance, InfoPayload, NodeHandle, SceneBackend, UiSink};
pub use frame::App;
pub use graph::{BodyRuntime, MoonRuntime, SceneGraph};
pub use pick::resolve_at;
pub use rig::{CameraRig, Transition, FLY_TIME, FOCUS_STANDOFF};
pub use sim::Simulator;
