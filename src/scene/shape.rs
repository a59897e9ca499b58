use indexmap::IndexMap;
use nalgebra::{Point3, Vector3};

use crate::{
    color::{Color, WHITE},
    geometry::{FloatType, WorldVector},
};

/// Integer cell coordinates inside a voxel volume.
pub type VoxelCoord = Point3<i32>;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Voxel {
    pub coord: VoxelCoord,
    pub color: Color,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Sphere {
    pub radius: FloatType,
    pub color: Color,
}

/// Sparse colored grid.
///
/// Valid cells are `0 ..= dimension` on every axis. The upper bound is inclusive,
/// so a volume created with size 10 accepts 11 distinct values per axis.
#[derive(Clone, Debug, PartialEq)]
pub struct VoxelVolume {
    dimensions: Vector3<u32>,
    /// World space edge length of a single cell
    voxel_size: FloatType,
    pub color: Color,
    voxels: IndexMap<VoxelCoord, Voxel>,
}

/// Everything an entity can be made of.
///
/// `size` is only a coarse bound for step sizing, it is not the real extent of the geometry.
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Sphere(Sphere),
    Voxels(VoxelVolume),
}

impl Shape {
    /// Radius is not validated, zero or negative radii produce degenerate bounds.
    pub fn sphere(radius: FloatType) -> Shape {
        Shape::Sphere(Sphere {
            radius,
            color: WHITE,
        })
    }

    pub fn voxel_volume(sx: u32, sy: u32, sz: u32, voxel_size: FloatType) -> Shape {
        Shape::Voxels(VoxelVolume::new(Vector3::new(sx, sy, sz), voxel_size))
    }

    pub fn size(&self) -> FloatType {
        match self {
            Shape::Sphere(sphere) => 2.0 * sphere.radius,
            Shape::Voxels(volume) => volume.size(),
        }
    }

    pub fn color(&self) -> Color {
        match self {
            Shape::Sphere(sphere) => sphere.color,
            Shape::Voxels(volume) => volume.color,
        }
    }

    pub fn with_color(mut self, color: Color) -> Shape {
        match &mut self {
            Shape::Sphere(sphere) => sphere.color = color,
            Shape::Voxels(volume) => volume.color = color,
        }
        self
    }
}

impl VoxelVolume {
    pub fn new(dimensions: Vector3<u32>, voxel_size: FloatType) -> VoxelVolume {
        VoxelVolume {
            dimensions,
            voxel_size,
            color: WHITE,
            voxels: IndexMap::new(),
        }
    }

    pub fn dimensions(&self) -> Vector3<u32> {
        self.dimensions
    }

    pub fn voxel_size(&self) -> FloatType {
        self.voxel_size
    }

    /// Largest grid dimension, in cells.
    pub fn size(&self) -> FloatType {
        let d = self.dimensions;
        d.x.max(d.y).max(d.z) as FloatType
    }

    pub fn contains(&self, coord: &VoxelCoord) -> bool {
        coord
            .coords
            .iter()
            .zip(self.dimensions.iter())
            .all(|(&c, &limit)| c >= 0 && c as u32 <= limit)
    }

    /// Inserts or replaces a voxel. Out of range coordinates are ignored.
    pub fn set_voxel(&mut self, coord: VoxelCoord, color: Color) {
        if !self.contains(&coord) {
            return;
        }
        self.voxels.insert(coord, Voxel { coord, color });
    }

    pub fn remove_voxel(&mut self, coord: &VoxelCoord) {
        self.voxels.shift_remove(coord);
    }

    pub fn voxel(&self, coord: &VoxelCoord) -> Option<&Voxel> {
        self.voxels.get(coord)
    }

    /// Voxel in the cell containing `relative`, a point relative to the volume center in world units.
    ///
    /// Only the one cell is checked, there is no search for the nearest occupied cell.
    pub fn closest_voxel(&self, relative: &WorldVector) -> Option<&Voxel> {
        let cell = (relative / self.voxel_size).map(|c| c.floor() as i32);
        let half_extent = self.dimensions.map(|s| (s / 2) as i32);
        let coord = cell.zip_map(&half_extent, |c, h| c.saturating_add(h));
        self.voxel(&VoxelCoord::from(coord))
    }

    pub fn len(&self) -> usize {
        self.voxels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voxels.is_empty()
    }

    /// Iterates over voxels in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Voxel> {
        self.voxels.values()
    }
}
