use super::scene::Scene;
use super::stroke::StrokeId;
use crate::config::{LineWidth, Tuning};
use glam::Vec3;

/// Proximity eraser: removes whole strokes that pass near the probe.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EraseIndex {
	base_radius: f32,
	radius_per_width: f32,
}

impl EraseIndex {
	pub fn new(tuning: &Tuning) -> Self {
		Self {
			base_radius: tuning.erase_base_radius,
			radius_per_width: tuning.erase_radius_per_width,
		}
	}

	/// Wider brushes erase a wider area.
	pub fn radius(&self, width: LineWidth) -> f32 {
		self.base_radius + width.as_f32() * self.radius_per_width
	}

	/// Removes every stroke with a point strictly within the erase radius of `probe`.
	pub fn erase(&self, scene: &mut Scene, probe: Vec3, width: LineWidth) -> Vec<StrokeId> {
		let radius = self.radius(width);
		let removed = scene.remove_where(|stroke| stroke.is_near(probe, radius));
		if !removed.is_empty() {
			tracing::debug!(?removed, %probe, radius, "erased strokes");
		}
		removed
	}
}

impl Default for EraseIndex {
	fn default() -> Self {
		Self::new(&Tuning::default())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::Style;
	use approx::assert_abs_diff_eq;
	use glam::vec3;

	fn width(value: u32) -> LineWidth {
		LineWidth::new(value).unwrap()
	}

	#[test]
	fn radius_grows_with_width() {
		let index = EraseIndex::default();
		assert_abs_diff_eq!(index.radius(width(2)), 0.014);
		assert_abs_diff_eq!(index.radius(width(8)), 0.026);
		assert_abs_diff_eq!(index.radius(width(60)), 0.13);
	}

	#[test]
	fn removes_only_strokes_within_radius() {
		let probe = vec3(0.1, 0.2, 4.5);
		let mut scene = Scene::new();
		let near = scene
			.commit(
				vec![probe + vec3(0.3, 0.0, 0.0), probe + vec3(0.02, 0.0, 0.0)],
				Style::default(),
			)
			.unwrap();
		let far = scene
			.commit(
				vec![probe + vec3(0.0, 0.05, 0.0), probe + vec3(0.0, 0.5, 0.0)],
				Style::default(),
			)
			.unwrap();

		let removed = EraseIndex::default().erase(&mut scene, probe, width(8));
		assert_eq!(removed, vec![near]);
		assert_eq!(scene.len(), 1);
		assert!(scene.get(far).is_some());
	}

	#[test]
	fn removes_every_matching_stroke() {
		let mut scene = Scene::new();
		for x in [0.0, 0.001, 0.002] {
			scene
				.commit(vec![vec3(x, 0.0, 0.0), vec3(x, 1.0, 0.0)], Style::default())
				.unwrap();
		}
		let removed = EraseIndex::default().erase(&mut scene, vec3(0.001, 0.5, 0.0), width(2));
		assert_eq!(removed.len(), 0);
		let removed = EraseIndex::default().erase(&mut scene, vec3(0.001, 1.0, 0.0), width(2));
		assert_eq!(removed.len(), 3);
		assert!(scene.is_empty());
	}

	#[test]
	fn empty_space_changes_nothing() {
		let mut scene = Scene::new();
		scene
			.commit(vec![Vec3::ZERO, Vec3::X], Style::default())
			.unwrap();
		let removed = EraseIndex::default().erase(&mut scene, vec3(0.0, 1.0, 0.0), width(60));
		assert!(removed.is_empty());
		assert_eq!(scene.len(), 1);
	}
}
