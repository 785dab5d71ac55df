pub mod gui;
pub mod math;
pub mod model;
pub mod scene;
