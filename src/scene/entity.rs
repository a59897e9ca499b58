use nalgebra::distance;

use crate::{
    color::Color,
    geometry::{FloatType, WorldPoint, WorldVector},
    scene::shape::{Shape, Voxel, VoxelVolume},
};

/// Positioned object in the scene.
///
/// An entity without a shape is inert: it never bounds a step and never gets hit.
#[derive(Clone, Debug, PartialEq)]
pub struct Entity {
    pub position: WorldPoint,
    /// Only meaningful for cameras.
    pub direction: WorldVector,
    pub shape: Option<Shape>,
}

impl Default for Entity {
    fn default() -> Self {
        Entity {
            position: WorldPoint::origin(),
            direction: WorldVector::new(0.0, 0.0, 1.0),
            shape: None,
        }
    }
}

impl Entity {
    pub fn new(position: WorldPoint) -> Entity {
        Entity {
            position,
            ..Default::default()
        }
    }

    /// White sphere centered at `position`.
    pub fn sphere(position: WorldPoint, radius: FloatType) -> Entity {
        Entity {
            position,
            shape: Some(Shape::sphere(radius)),
            ..Default::default()
        }
    }

    /// Empty cubic voxel volume of `size` cells per axis, centered at `position`.
    pub fn voxels(position: WorldPoint, size: u32, voxel_size: FloatType) -> Entity {
        Entity {
            position,
            shape: Some(Shape::voxel_volume(size, size, size, voxel_size)),
            ..Default::default()
        }
    }

    /// Sets the color of the attached shape, does nothing for shapeless entities.
    pub fn with_color(mut self, color: Color) -> Entity {
        self.shape = self.shape.map(|shape| shape.with_color(color));
        self
    }

    pub fn voxel_volume(&self) -> Option<&VoxelVolume> {
        match &self.shape {
            Some(Shape::Voxels(volume)) => Some(volume),
            _ => None,
        }
    }

    pub fn voxel_volume_mut(&mut self) -> Option<&mut VoxelVolume> {
        match &mut self.shape {
            Some(Shape::Voxels(volume)) => Some(volume),
            _ => None,
        }
    }

    /// Conservative distance from `point` to this entity's surface, `None` for shapeless entities.
    /// Negative inside the bounding sphere.
    pub fn distance_bound(&self, point: &WorldPoint) -> Option<FloatType> {
        let shape = self.shape.as_ref()?;
        Some(distance(point, &self.position) - shape.size() / 2.0)
    }

    /// Voxel in the grid cell containing a world space point.
    pub fn closest_voxel(&self, point: &WorldPoint) -> Option<&Voxel> {
        self.voxel_volume()?.closest_voxel(&(point - self.position))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{color::WHITE, scene::shape::VoxelCoord};

    use assert2::{assert, let_assert};
    use test_strategy::proptest;

    fn pattern_entity() -> Entity {
        let mut entity = Entity::voxels(WorldPoint::new(1.0, -2.0, 3.0), 10, 0.25);
        let volume = entity.voxel_volume_mut().expect("voxel entity has a volume");
        for x in 0..=10 {
            for y in 0..=10 {
                volume.set_voxel(
                    VoxelCoord::new(x, y, (x + y) % 11),
                    Color::new((x * 20) as f32, (y * 20) as f32, 0.0),
                );
            }
        }
        entity
    }

    #[test]
    fn shapeless_entity_is_inert() {
        let entity = Entity::new(WorldPoint::new(1.0, 2.0, 3.0));
        assert!(entity.distance_bound(&WorldPoint::origin()).is_none());
        assert!(entity.closest_voxel(&WorldPoint::new(1.0, 2.0, 3.0)).is_none());
    }

    #[test]
    fn sphere_distance_bound() {
        let entity = Entity::sphere(WorldPoint::new(0.0, 0.0, 5.0), 2.0);
        let_assert!(Some(bound) = entity.distance_bound(&WorldPoint::origin()));
        assert!(bound == 3.0);
        assert!(entity.voxel_volume().is_none());
    }

    #[test]
    fn voxel_distance_bound_uses_grid_size() {
        let entity = Entity::voxels(WorldPoint::new(0.0, 0.0, 10.0), 4, 0.5);
        assert!(entity.distance_bound(&WorldPoint::origin()) == Some(8.0));
    }

    #[test]
    fn with_color_on_sphere() {
        let red = Color::new(255.0, 0.0, 0.0);
        let entity = Entity::sphere(WorldPoint::origin(), 1.0).with_color(red);
        assert!(entity.shape.map(|s| s.color()) == Some(red));
    }

    #[test]
    fn closest_voxel_is_relative_to_position() {
        let mut entity = Entity::voxels(WorldPoint::new(10.0, 0.0, 0.0), 10, 0.1);
        entity
            .voxel_volume_mut()
            .expect("voxel entity has a volume")
            .set_voxel(VoxelCoord::new(5, 5, 5), WHITE);

        assert!(entity.closest_voxel(&WorldPoint::new(10.05, 0.05, 0.05)).is_some());
        assert!(entity.closest_voxel(&WorldPoint::new(0.05, 0.05, 0.05)).is_none());
    }

    #[proptest]
    fn closest_voxel_is_deterministic_within_a_cell(
        #[strategy(-1.5f32..1.5)] ox: f32,
        #[strategy(-1.5f32..1.5)] oy: f32,
        #[strategy(-1.5f32..1.5)] oz: f32,
        #[strategy(0.0f32..0.2)] dx: f32,
        #[strategy(0.0f32..0.2)] dy: f32,
        #[strategy(0.0f32..0.2)] dz: f32,
    ) {
        let entity = pattern_entity();
        let point = entity.position + WorldVector::new(ox, oy, oz);
        // Snap to the cell corner so that both points share the same floored cell.
        let corner = point.map(|c| (c / 0.25).floor() * 0.25);
        let a = corner + WorldVector::new(0.01, 0.01, 0.01);
        let b = corner + WorldVector::new(dx, dy, dz) + WorldVector::new(0.02, 0.02, 0.02);

        assert!(entity.closest_voxel(&a) == entity.closest_voxel(&b));
    }
}
