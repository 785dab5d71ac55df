pub mod easing;
pub mod ray;
