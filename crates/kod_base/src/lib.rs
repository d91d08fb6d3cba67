pub mod color;
pub mod math;
