use bon::bon;

use crate::geometry::{EPSILON, FloatType, ScreenPoint, ScreenSize, WorldPoint, WorldVector};

/// Pinhole camera.
///
/// There is no rotation, per pixel offsets are added to `direction` directly,
/// so the view is only correct for directions close to +Z.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Camera {
    pub position: WorldPoint,
    pub direction: WorldVector,
    /// Width of the view plane at unit distance.
    pub fov: FloatType,
}

#[bon]
impl Camera {
    #[builder]
    pub fn new(
        #[builder(default = WorldPoint::origin())] position: WorldPoint,
        #[builder(default = WorldVector::new(0.0, 0.0, 1.0))] direction: WorldVector,
        #[builder(default = 1.5)] fov: FloatType,
    ) -> Self {
        Camera {
            position,
            direction,
            fov,
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Camera::builder().build()
    }
}

impl Camera {
    /// Normalized direction of the primary ray through a pixel, or zero if the camera
    /// direction cancels the pixel offset out.
    /// Screen Y grows downwards and maps to world +Y.
    pub fn ray_direction(&self, pixel: &ScreenPoint, resolution: &ScreenSize) -> WorldVector {
        let width = resolution.x as FloatType;
        let height = resolution.y as FloatType;
        let u = pixel.x as FloatType / width - 0.5;
        let v = pixel.y as FloatType / height - 0.5;
        let offset = WorldVector::new(u * self.fov, v * self.fov * (height / width), 1.0);

        (self.direction + offset)
            .try_normalize(EPSILON)
            .unwrap_or_else(WorldVector::zeros)
    }
}
