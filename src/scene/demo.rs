//! The scene the binaries and the benchmark render.

use itertools::iproduct;

use crate::{
    camera::Camera,
    color::{Color, hex_to_color},
    geometry::{WorldPoint, WorldVector},
    scene::{Entity, Scene, VoxelCoord},
};

const VOXEL_GRID: i32 = 10;

/// Two spheres in front of a 10x10 voxel wall with a stepped ramp cut into its middle.
pub fn demo_scene() -> Scene {
    let camera = Camera::builder()
        .direction(WorldVector::new(1.0, 0.5, 4.0).normalize())
        .build();
    let mut scene = Scene::new(camera);

    scene.add(Entity::sphere(WorldPoint::new(0.0, 0.0, 3.5), 1.0));
    scene.add(Entity::sphere(WorldPoint::new(0.6, -0.3, 2.2), 0.6).with_color(hex_to_color("#f58")));

    let mut wall = Entity::voxels(WorldPoint::new(0.0, 0.0, 2.0), VOXEL_GRID as u32, 0.1);
    if let Some(volume) = wall.voxel_volume_mut() {
        for (i, j) in iproduct!(0..VOXEL_GRID, 0..VOXEL_GRID) {
            let color = Color::new((i * 10 + 140) as f32, 40.0, (j * 10 + 140) as f32);
            let in_middle = (4..=6).contains(&i) || (4..=6).contains(&j);
            let depth = if in_middle { i } else { 0 };
            volume.set_voxel(VoxelCoord::new(i, j, depth), color);
        }
    }
    scene.add(wall);

    scene
}
