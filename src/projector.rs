//! Placement of 2D pointer positions in the 3D scene.

use crate::geom::normalized_to_ndc;
use glam::{Mat4, Vec2, Vec3};

/// The renderer's active camera, as far as projection is concerned.
pub trait CameraView {
	/// Camera position in world space.
	fn position(&self) -> Vec3;

	/// Maps normalized device coordinates to world space.
	fn unproject(&self, ndc: Vec3) -> Vec3;
}

/// A right-handed perspective camera looking from `position` towards `target`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PerspectiveCamera {
	pub position: Vec3,
	pub target: Vec3,
	pub up: Vec3,
	/// Vertical field of view in radians.
	pub fov_y: f32,
	pub aspect: f32,
	pub near: f32,
	pub far: f32,
}

impl Default for PerspectiveCamera {
	fn default() -> Self {
		Self {
			position: Vec3::new(0.0, 0.0, 5.0),
			target: Vec3::ZERO,
			up: Vec3::Y,
			fov_y: 60f32.to_radians(),
			aspect: 16.0 / 9.0,
			near: 0.1,
			far: 1000.0,
		}
	}
}

impl PerspectiveCamera {
	pub fn new(position: Vec3, target: Vec3) -> Self {
		Self {
			position,
			target,
			..Default::default()
		}
	}

	pub fn set_viewport(&mut self, width: f32, height: f32) {
		self.aspect = width / height;
	}

	pub fn view_matrix(&self) -> Mat4 {
		Mat4::look_at_rh(self.position, self.target, self.up)
	}

	pub fn projection_matrix(&self) -> Mat4 {
		Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far)
	}

	pub fn view_projection_matrix(&self) -> Mat4 {
		self.projection_matrix() * self.view_matrix()
	}

	pub fn forward(&self) -> Vec3 {
		(self.target - self.position).normalize()
	}
}

impl CameraView for PerspectiveCamera {
	fn position(&self) -> Vec3 {
		self.position
	}

	fn unproject(&self, ndc: Vec3) -> Vec3 {
		self.view_projection_matrix().inverse().project_point3(ndc)
	}
}

#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum ProjectionError {
	#[error("projection produced a non-finite point {0}")]
	NonFinite(Vec3),
}

static_assertions::assert_impl_all!(ProjectionError: std::error::Error, Send, Sync);

/// Places normalized pointer positions at a fixed distance from the camera.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projector {
	depth: f32,
}

impl Projector {
	/// NDC depth used to pick a second point on the pointer ray. Any depth inside the frustum gives
	/// the same ray.
	pub const REFERENCE_DEPTH: f32 = 0.5;

	pub fn new(depth: f32) -> Self {
		Self { depth }
	}

	pub fn depth(&self) -> f32 {
		self.depth
	}

	pub fn project(&self, camera: &impl CameraView, point: Vec2) -> Result<Vec3, ProjectionError> {
		let ndc = normalized_to_ndc(point).extend(Self::REFERENCE_DEPTH);
		let origin = camera.position();
		let direction = (camera.unproject(ndc) - origin).normalize();
		let position = origin + direction * self.depth;
		if position.is_finite() {
			Ok(position)
		} else {
			Err(ProjectionError::NonFinite(position))
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::test::DegenerateCamera;
	use approx::assert_abs_diff_eq;
	use glam::vec2;

	#[test]
	fn center_projects_along_forward() -> anyhow::Result<()> {
		let camera = PerspectiveCamera::default();
		let point = Projector::new(0.5).project(&camera, vec2(0.5, 0.5))?;
		assert_abs_diff_eq!(point.x, 0.0, epsilon = 1e-5);
		assert_abs_diff_eq!(point.y, 0.0, epsilon = 1e-5);
		assert_abs_diff_eq!(point.z, 4.5, epsilon = 1e-5);
		Ok(())
	}

	#[test]
	fn points_lie_at_fixed_distance() -> anyhow::Result<()> {
		let camera = PerspectiveCamera::new(Vec3::new(1.0, 2.0, 3.0), Vec3::new(0.0, 0.5, 0.0));
		let projector = Projector::new(0.75);
		for point in [vec2(0.0, 0.0), vec2(1.0, 0.0), vec2(0.3, 0.9), vec2(1.0, 1.0)] {
			let projected = projector.project(&camera, point)?;
			assert_abs_diff_eq!(projected.distance(camera.position), 0.75, epsilon = 1e-5);
		}
		Ok(())
	}

	#[test]
	fn screen_axes_map_to_world_axes() -> anyhow::Result<()> {
		let camera = PerspectiveCamera::default();
		let projector = Projector::new(0.5);
		let top_left = projector.project(&camera, vec2(0.0, 0.0))?;
		let bottom_right = projector.project(&camera, vec2(1.0, 1.0))?;
		assert!(top_left.x < 0.0 && top_left.y > 0.0);
		assert!(bottom_right.x > 0.0 && bottom_right.y < 0.0);
		assert_abs_diff_eq!(top_left.z, bottom_right.z, epsilon = 1e-5);
		Ok(())
	}

	#[test]
	fn non_finite_unprojection_is_rejected() {
		let result = Projector::new(0.5).project(&DegenerateCamera, vec2(0.5, 0.5));
		assert!(matches!(result, Err(ProjectionError::NonFinite(_))));
	}
}
