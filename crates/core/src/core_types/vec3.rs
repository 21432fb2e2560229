//! Vector type alias for fire positions.

use nalgebra::Vector3;

/// 3D vector type for world positions.
///
/// This is a simple alias for `nalgebra::Vector3<f32>`, used for fire
/// placement and the distances the scheduler derives for spread checks.
pub type Vec3 = Vector3<f32>;
