use eframe::{App, CreationContext, Frame, egui};
use egui::{CentralPanel, Color32, ColorImage, Image, TextureOptions, TopBottomPanel};
use minimarch::{ChunkOutcome, RenderSettings, Renderer, color_to_image, scene::demo::demo_scene};
use tracing_subscriber::EnvFilter;

const WIDTH: u32 = 300;
const HEIGHT: u32 = 200;

/// Runs one chunk per frame and shows whatever the buffer holds at that moment.
pub struct MinimarchGui {
    renderer: Renderer,
    texture: egui::TextureHandle,
}

impl MinimarchGui {
    pub fn new(mut renderer: Renderer, cc: &CreationContext<'_>) -> Self {
        renderer.render();
        let texture = cc.egui_ctx.load_texture(
            "rendered",
            egui_image(&renderer),
            TextureOptions::NEAREST,
        );

        MinimarchGui { renderer, texture }
    }
}

impl App for MinimarchGui {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        if !self.renderer.is_finished() {
            if self.renderer.run_chunk() == ChunkOutcome::Pending {
                ctx.request_repaint();
            }
            self.texture
                .set(egui_image(&self.renderer), TextureOptions::NEAREST);
        }

        TopBottomPanel::bottom("progress").show(ctx, |ui| {
            let (done, total) = self.renderer.progress();
            ui.label(format!("{done} / {total} pixels, {}", self.renderer.stats()));
        });

        CentralPanel::default().show(ctx, |ui| {
            ui.centered_and_justified(|ui| {
                ui.add(Image::from_texture(&self.texture).shrink_to_fit())
            })
        });
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    eframe::run_native(
        "Minimarch GUI",
        Default::default(),
        Box::new(|cc| {
            let renderer = Renderer::new(WIDTH, HEIGHT, demo_scene(), RenderSettings::default());
            Ok(Box::new(MinimarchGui::new(renderer, cc)))
        }),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))?;

    Ok(())
}

fn egui_image(renderer: &Renderer) -> ColorImage {
    let pixels = renderer
        .buffer()
        .iter()
        .map(|&color| {
            let [r, g, b] = color_to_image(color).0;
            Color32::from_rgb(r, g, b)
        })
        .collect();
    ColorImage {
        size: [renderer.width() as usize, renderer.height() as usize],
        pixels,
    }
}
