use glam::{Vec2, Vec3};

/// Maps a normalized viewport coordinate (origin top-left, `y` down) to normalized device
/// coordinates (origin centered, `y` up).
pub fn normalized_to_ndc(point: Vec2) -> Vec2 {
	Vec2::new(2.0, -2.0) * (point - 0.5)
}

/// Flips a normalized coordinate horizontally, as seen in a selfie-style preview.
pub fn mirror_x(point: Vec2) -> Vec2 {
	Vec2::new(1.0 - point.x, point.y)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
	min: Vec3,
	max: Vec3,
}

impl Bounds {
	pub fn new(min: Vec3, max: Vec3) -> Self {
		Self { min, max }
	}

	pub fn empty() -> Self {
		Self::new(Vec3::MAX, Vec3::MIN)
	}

	pub fn is_empty(&self) -> bool {
		self.min.cmpgt(self.max).any()
	}

	pub fn min(&self) -> Vec3 {
		self.min
	}

	pub fn max(&self) -> Vec3 {
		self.max
	}

	pub fn expanded_to_contain(self, point: Vec3) -> Self {
		Self::new(self.min.min(point), self.max.max(point))
	}

	pub fn containing(points: impl IntoIterator<Item = Vec3>) -> Self {
		points
			.into_iter()
			.fold(Self::empty(), |b, p| b.expanded_to_contain(p))
	}

	/// Grows the box by `margin` on every side.
	pub fn inflated(self, margin: f32) -> Self {
		if self.is_empty() {
			return self;
		}
		Self::new(self.min - margin, self.max + margin)
	}

	/// Closed containment test: points on the boundary are inside.
	pub fn contains(&self, point: Vec3) -> bool {
		point.cmpge(self.min).all() && point.cmple(self.max).all()
	}
}
