use std::time::Instant;

use image::RgbImage;
use tracing::{debug, info, trace};

use crate::{
    color::Color,
    geometry::ScreenSize,
    renderer::{
        RenderSettings,
        pixel::{color_to_image, trace_pixel},
    },
    scene::Scene,
    util::Stats,
};

/// Result of a single [`Renderer::run_chunk`] call.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ChunkOutcome {
    /// More chunks remain, the host should schedule another call.
    Pending,
    /// The pass is complete, or no pass was started.
    Finished,
}

#[derive(Copy, Clone, Debug)]
enum PassState {
    Idle,
    Running { next_index: usize, started: Instant },
    Finished,
}

/// Owns the pixel buffer and traces it incrementally.
///
/// A pass is started with [`Renderer::render`] and then advanced one chunk at a time
/// by [`Renderer::run_chunk`], whenever the host decides it has time for it.
/// The buffer can be read between chunks and then contains a mix of finished pixels,
/// the pending marker and whatever was there before the pass.
pub struct Renderer {
    scene: Scene,
    settings: RenderSettings,
    resolution: ScreenSize,

    buffer: Vec<Color>,

    state: PassState,
    stats: Stats,
}

impl Renderer {
    pub fn new(width: u32, height: u32, scene: Scene, settings: RenderSettings) -> Renderer {
        let pixel_count = width as usize * height as usize;
        Renderer {
            scene,
            settings,
            resolution: ScreenSize::new(width, height),
            buffer: vec![settings.background; pixel_count],
            state: PassState::Idle,
            stats: Stats::default(),
        }
    }

    pub fn width(&self) -> u32 {
        self.resolution.x
    }

    pub fn height(&self) -> u32 {
        self.resolution.y
    }

    pub fn resolution(&self) -> ScreenSize {
        self.resolution
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Changes made while a pass is running only affect the chunks traced afterwards.
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    /// Current buffer content, row-major.
    pub fn buffer(&self) -> &[Color] {
        &self.buffer
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.resolution.x || y >= self.resolution.y {
            return None;
        }
        self.buffer
            .get(y as usize * self.resolution.x as usize + x as usize)
            .copied()
    }

    /// Step statistics of the rays traced in the current (or last) pass.
    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    /// Number of pixels traced in the current pass and the total pixel count.
    pub fn progress(&self) -> (usize, usize) {
        let total = self.buffer.len();
        let done = match self.state {
            PassState::Idle => 0,
            PassState::Running { next_index, .. } => next_index,
            PassState::Finished => total,
        };
        (done, total)
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.state, PassState::Finished)
    }

    /// Starts a new pass from the first pixel, abandoning any pass in progress.
    /// No pixels are traced until [`Renderer::run_chunk`] is called.
    pub fn render(&mut self) {
        info!(
            width = self.resolution.x,
            height = self.resolution.y,
            chunk_size = self.settings.chunk_size.get(),
            "starting render pass"
        );
        self.stats = Stats::default();
        self.state = PassState::Running {
            next_index: 0,
            started: Instant::now(),
        };
        self.mark_pending(0);
    }

    /// Traces the next chunk of pixels of the running pass.
    /// Returns [`ChunkOutcome::Finished`] without doing anything if no pass is running.
    pub fn run_chunk(&mut self) -> ChunkOutcome {
        let PassState::Running {
            next_index,
            started,
        } = self.state
        else {
            return ChunkOutcome::Finished;
        };

        let end = self.chunk_end(next_index);
        let mut chunk_stats = Stats::default();
        for index in next_index..end {
            let (color, steps) =
                trace_pixel(&self.scene, &self.settings, &self.resolution, index);
            self.buffer[index] = color;
            chunk_stats.record(steps);
        }
        trace!(first = next_index, end, steps = %chunk_stats, "traced chunk");
        self.stats.absorb(&chunk_stats);

        if end < self.buffer.len() {
            self.state = PassState::Running {
                next_index: end,
                started,
            };
            self.mark_pending(end);
            ChunkOutcome::Pending
        } else {
            self.state = PassState::Finished;
            info!(elapsed = ?started.elapsed(), "render pass finished");
            debug!(steps = %self.stats, "march statistics");
            ChunkOutcome::Finished
        }
    }

    /// Starts a pass and runs it to completion.
    pub fn render_to_end(&mut self) {
        self.render();
        while self.run_chunk() == ChunkOutcome::Pending {}
    }

    /// Traces a single pixel without touching the buffer.
    pub fn trace_pixel(&self, index: usize) -> Color {
        trace_pixel(&self.scene, &self.settings, &self.resolution, index).0
    }

    /// Snapshot of the buffer as an 8 bit image, with channels saturated.
    pub fn export_image(&self) -> RgbImage {
        RgbImage::from_fn(self.resolution.x, self.resolution.y, |x, y| {
            let index = y as usize * self.resolution.x as usize + x as usize;
            color_to_image(self.buffer[index])
        })
    }

    fn chunk_end(&self, start: usize) -> usize {
        start
            .saturating_add(self.settings.chunk_size.get())
            .min(self.buffer.len())
    }

    fn mark_pending(&mut self, start: usize) {
        let Some(color) = self.settings.pending_color else {
            return;
        };
        let end = self.chunk_end(start);
        self.buffer[start..end].fill(color);
    }
}
