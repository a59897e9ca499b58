use crate::{
    color::Color,
    geometry::{ScreenPoint, ScreenSize},
    ray::Ray,
    renderer::RenderSettings,
    scene::Scene,
};

/// Traces the pixel at a row-major buffer index.
/// Returns its color and the number of steps the ray took.
/// A zero width image has no pixels, every index there yields the untouched background.
pub fn trace_pixel(
    scene: &Scene,
    settings: &RenderSettings,
    resolution: &ScreenSize,
    index: usize,
) -> (Color, usize) {
    let width = resolution.x as usize;
    if width == 0 {
        return (settings.background, 0);
    }
    let pixel = ScreenPoint::new((index % width) as u32, (index / width) as u32);
    let mut ray = Ray::for_pixel(&scene.camera, &pixel, resolution, &settings.march)
        .with_background(settings.background);
    let color = ray.trace(scene);
    (color, ray.steps())
}

/// Maps a 0-255 float color to a pixel of the image crate, saturating out of range channels.
pub fn color_to_image(color: Color) -> image::Rgb<u8> {
    image::Rgb([
        color.r.round().clamp(0.0, 255.0) as u8,
        color.g.round().clamp(0.0, 255.0) as u8,
        color.b.round().clamp(0.0, 255.0) as u8,
    ])
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{camera::Camera, color::darken, geometry::WorldPoint, ray::MarchSettings, scene::Entity};

    use assert2::assert;

    #[test]
    fn color_to_image_saturates() {
        let pixel = color_to_image(Color::new(-12.0, 127.6, 400.0));
        assert!(pixel.0 == [0, 128, 255]);
    }

    #[test]
    fn index_maps_to_row_major_pixel() {
        let mut scene = Scene::new(Camera::builder().position(WorldPoint::new(0.0, 0.0, -3.0)).build());
        scene.add(Entity::sphere(WorldPoint::origin(), 1.0));
        let settings = RenderSettings::default();
        let resolution = ScreenSize::new(5, 3);

        let pixel = ScreenPoint::new(3, 2);
        let mut ray = Ray::for_pixel(&scene.camera, &pixel, &resolution, &MarchSettings::default());
        let expected = ray.trace(&scene);

        let (color, steps) = trace_pixel(&scene, &settings, &resolution, 2 * 5 + 3);
        assert!(color == expected);
        assert!(steps == ray.steps());
    }

    #[test]
    fn zero_width_returns_background() {
        let settings = RenderSettings {
            background: Color::new(10.0, 20.0, 30.0),
            ..Default::default()
        };
        let (color, steps) = trace_pixel(&Scene::default(), &settings, &ScreenSize::new(0, 4), 3);
        assert!(color == settings.background);
        assert!(steps == 0);
    }

    #[test]
    fn missed_pixel_is_faded_background() {
        let settings = RenderSettings {
            background: Color::new(200.0, 100.0, 40.0),
            ..Default::default()
        };
        let (color, _) = trace_pixel(&Scene::default(), &settings, &ScreenSize::new(3, 3), 4);
        let expected = darken(settings.background, 0.5);
        assert!((color.r - expected.r).abs() < 1e-3);
        assert!((color.g - expected.g).abs() < 1e-3);
        assert!((color.b - expected.b).abs() < 1e-3);
    }
}
