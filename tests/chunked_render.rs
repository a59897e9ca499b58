use std::num::NonZeroUsize;

use assert2::assert;
use minimarch::{ChunkOutcome, RenderSettings, Renderer, scene::demo::demo_scene};
use proptest::prelude::ProptestConfig;
use test_strategy::proptest;

const WIDTH: u32 = 24;
const HEIGHT: u32 = 16;

fn renderer(chunk_size: usize) -> Renderer {
    let settings = RenderSettings {
        chunk_size: NonZeroUsize::new(chunk_size).unwrap(),
        ..Default::default()
    };
    Renderer::new(WIDTH, HEIGHT, demo_scene(), settings)
}

#[proptest(ProptestConfig { cases: 8, ..ProptestConfig::default() })]
fn chunked_render_matches_per_pixel_trace(#[strategy(1usize..500)] chunk_size: usize) {
    let mut chunked = renderer(chunk_size);
    chunked.render_to_end();

    let reference = renderer(1);
    let expected: Vec<_> = (0..(WIDTH * HEIGHT) as usize)
        .map(|index| reference.trace_pixel(index))
        .collect();

    assert!(chunked.buffer() == expected.as_slice());
}

#[test]
fn demo_scene_shows_something() {
    let mut renderer = renderer(100);
    renderer.render();

    let mut chunks = 1;
    while renderer.run_chunk() == ChunkOutcome::Pending {
        chunks += 1;
    }

    assert!(chunks == (WIDTH * HEIGHT) as usize / 100 + 1);
    assert!(renderer.is_finished());
    let lit = renderer
        .buffer()
        .iter()
        .filter(|color| color.r + color.g + color.b > 0.0)
        .count();
    assert!(lit > 0);
    assert!(renderer.stats().rays == (WIDTH * HEIGHT) as usize);
}
