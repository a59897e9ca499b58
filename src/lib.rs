mod camera;
pub mod color;
pub mod geometry;
pub mod ray;
mod renderer;
pub mod scene;
mod util;

pub use crate::renderer::{ChunkOutcome, RenderSettings, Renderer, color_to_image};
pub use camera::Camera;
pub use color::Color;
pub use ray::{MarchSettings, Ray};
pub use scene::Scene;
pub use util::Stats;
