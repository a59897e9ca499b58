pub mod demo;
mod entity;
mod shape;

pub use entity::Entity;
pub use shape::{Shape, Sphere, Voxel, VoxelCoord, VoxelVolume};

use crate::{
    camera::Camera,
    geometry::{FloatType, WorldVector},
};

/// Everything a ray can see, plus the lighting.
#[derive(Clone, Debug)]
pub struct Scene {
    /// Order only matters for breaking ties between simultaneous hits.
    pub entities: Vec<Entity>,
    pub camera: Camera,
    /// Direction the sunlight travels in. Does not need to be normalized.
    pub sun_direction: WorldVector,
    /// Fraction of light that remains on a surface facing away from the sun, in [0, 1].
    pub ambient: FloatType,
}

impl Default for Scene {
    fn default() -> Self {
        Scene {
            entities: Vec::new(),
            camera: Camera::default(),
            sun_direction: WorldVector::new(1.0, 1.0, 1.0),
            ambient: 0.3,
        }
    }
}

impl Scene {
    pub fn new(camera: Camera) -> Scene {
        Scene {
            camera,
            ..Default::default()
        }
    }

    /// Appends an entity and returns it for further setup.
    pub fn add(&mut self, entity: Entity) -> &mut Entity {
        self.entities.push(entity);
        let last = self.entities.len() - 1;
        &mut self.entities[last]
    }
}
