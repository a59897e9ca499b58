//! Sphere tracing of a single ray through a [`Scene`].

use nalgebra::distance;

use crate::{
    camera::Camera,
    color::{BLACK, Color, darken},
    geometry::{EPSILON, FloatType, ScreenPoint, ScreenSize, WorldPoint, WorldVector},
    scene::{Entity, Scene, Shape},
};

/// Voxel volumes are tested against a bounding sphere this many times larger than
/// half their size, so that corner cells are not skipped.
const VOXEL_BOUND_SLACK: FloatType = 1.4;

/// Fraction of the color lost to fog at the end of the ray.
const FOG_DENSITY: FloatType = 0.5;

/// Step sizing policy of the marcher.
///
/// Far from every bounding sphere the ray jumps `adaptive_scale` times the distance
/// to the nearest one; once that distance drops to `adaptive_threshold * step_base`
/// or less it crawls forward in steps of `step_base`.
/// A ray gives up after `max_steps` steps, or as soon as a step no longer moves it.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MarchSettings {
    /// Travel budget of a ray.
    pub max_length: FloatType,
    pub step_base: FloatType,
    pub adaptive_threshold: FloatType,
    pub adaptive_scale: FloatType,
    pub max_steps: usize,
}

impl Default for MarchSettings {
    fn default() -> Self {
        MarchSettings {
            max_length: 5.0,
            step_base: 0.01,
            adaptive_threshold: 2.0,
            adaptive_scale: 1.0,
            max_steps: 1000,
        }
    }
}

impl MarchSettings {
    /// How far to advance when the nearest bounding sphere is `min_distance` away.
    pub fn step_size(&self, min_distance: FloatType) -> FloatType {
        if min_distance > self.adaptive_threshold * self.step_base {
            min_distance * self.adaptive_scale
        } else {
            self.step_base
        }
    }
}

#[derive(Clone, Debug)]
pub struct Ray {
    origin: WorldPoint,
    direction: WorldVector,
    step_position: WorldPoint,
    color: Color,
    alive: bool,
    steps: usize,
    settings: MarchSettings,
}

impl Ray {
    /// Creates a ray starting at `origin`.
    /// A zero `direction` creates a ray that is already terminated and stays black.
    pub fn new(origin: WorldPoint, direction: WorldVector, settings: &MarchSettings) -> Ray {
        let direction = direction.try_normalize(EPSILON);
        Ray {
            origin,
            direction: direction.unwrap_or_else(WorldVector::zeros),
            step_position: origin,
            color: BLACK,
            alive: direction.is_some(),
            steps: 0,
            settings: *settings,
        }
    }

    /// Replaces the color the ray returns when nothing is hit.
    pub fn with_background(mut self, background: Color) -> Ray {
        self.color = background;
        self
    }

    /// Primary ray through a pixel.
    pub fn for_pixel(
        camera: &Camera,
        pixel: &ScreenPoint,
        resolution: &ScreenSize,
        settings: &MarchSettings,
    ) -> Ray {
        Ray::new(
            camera.position,
            camera.ray_direction(pixel, resolution),
            settings,
        )
    }

    pub fn origin(&self) -> WorldPoint {
        self.origin
    }

    pub fn direction(&self) -> WorldVector {
        self.direction
    }

    pub fn step_position(&self) -> WorldPoint {
        self.step_position
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Number of steps taken so far.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Distance between the origin and the current step position.
    pub fn traveled(&self) -> FloatType {
        distance(&self.origin, &self.step_position)
    }

    /// Marches until something is hit or the travel budget runs out, returns the final color.
    /// Also stops after `max_steps` steps or when a step gets lost in float rounding.
    pub fn trace(&mut self, scene: &Scene) -> Color {
        while self.alive
            && self.traveled() < self.settings.max_length
            && self.steps < self.settings.max_steps
        {
            let previous = self.step_position;
            self.step(scene);
            if self.alive && self.step_position == previous {
                break;
            }
        }
        self.color
    }

    /// Single marching iteration. Does nothing once the ray is terminated.
    pub fn step(&mut self, scene: &Scene) {
        if !self.alive {
            return;
        }

        let min_distance = scene
            .entities
            .iter()
            .filter_map(|entity| entity.distance_bound(&self.step_position))
            .fold(self.settings.max_length, FloatType::min);
        self.step_position += self.direction * self.settings.step_size(min_distance);
        self.steps += 1;

        // First entity in scene order wins.
        if let Some(color) = scene
            .entities
            .iter()
            .find_map(|entity| self.hit_color(entity, scene))
        {
            self.alive = false;
            self.color = color;
        }

        let fog = self.traveled() / self.settings.max_length * FOG_DENSITY;
        self.color = darken(self.color, fog);
    }

    /// Shaded color of `entity` if the current step position is inside it.
    fn hit_color(&self, entity: &Entity, scene: &Scene) -> Option<Color> {
        let center_distance = distance(&self.step_position, &entity.position);
        match entity.shape.as_ref()? {
            Shape::Sphere(sphere) => (center_distance <= sphere.radius).then(|| {
                sphere_shadow(
                    sphere.color,
                    &scene.sun_direction,
                    &entity.position,
                    &self.step_position,
                    scene.ambient,
                )
            }),
            Shape::Voxels(volume) => {
                if center_distance > volume.size() / 2.0 * VOXEL_BOUND_SLACK {
                    return None;
                }
                volume
                    .closest_voxel(&(self.step_position - entity.position))
                    .map(|voxel| voxel.color)
            }
        }
    }
}

/// Lambertian-like darkening of a sphere hit.
///
/// Fully lit when the inward normal at `point` points along `sun_direction`,
/// darkened by `1 - ambient` when it faces away.
pub fn sphere_shadow(
    color: Color,
    sun_direction: &WorldVector,
    center: &WorldPoint,
    point: &WorldPoint,
    ambient: FloatType,
) -> Color {
    let normal = (center - point)
        .try_normalize(EPSILON)
        .unwrap_or_else(WorldVector::zeros);
    let sun = sun_direction
        .try_normalize(EPSILON)
        .unwrap_or_else(WorldVector::zeros);
    let facing = normal.dot(&sun).max(0.0);

    darken(color, (1.0 - facing).max(0.0) * (1.0 - ambient))
}
