mod machinery;
mod pixel;

pub use crate::renderer::machinery::{ChunkOutcome, Renderer};
pub use crate::renderer::pixel::color_to_image;

use std::num::NonZeroUsize;

use crate::{
    color::{BLACK, Color},
    ray::MarchSettings,
};

const DEFAULT_CHUNK_SIZE: NonZeroUsize = NonZeroUsize::new(3000).unwrap();

#[derive(Copy, Clone, Debug)]
pub struct RenderSettings {
    /// Number of pixels traced by a single [`Renderer::run_chunk`] call.
    pub chunk_size: NonZeroUsize,
    /// Initial content of the buffer, and the color a ray returns when it hits nothing.
    pub background: Color,
    /// Marker painted over the chunk that is queued next, `None` leaves the old pixels visible.
    pub pending_color: Option<Color>,
    pub march: MarchSettings,
}

impl Default for RenderSettings {
    fn default() -> Self {
        RenderSettings {
            chunk_size: DEFAULT_CHUNK_SIZE,
            background: BLACK,
            pending_color: Some(Color::new(255.0, 200.0, 220.0)),
            march: MarchSettings::default(),
        }
    }
}
