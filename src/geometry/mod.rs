use nalgebra::{Point2, Point3, Vector2, Vector3};

pub type FloatType = f32;

/// Lengths below this are treated as zero when normalizing.
pub const EPSILON: FloatType = 1e-6;

pub type ScreenPoint = Point2<u32>;
pub type ScreenSize = Vector2<u32>;

pub type WorldPoint = Point3<FloatType>;
pub type WorldVector = Vector3<FloatType>;
