use crate::config::{Color, LineWidth, Style};
use crate::geom::Bounds;
use glam::Vec3;
use itertools::Itertools;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
#[display("stroke-{_0}")]
pub struct StrokeId(u64);

impl StrokeId {
	pub(crate) fn new(value: u64) -> Self {
		Self(value)
	}

	pub fn get(self) -> u64 {
		self.0
	}
}

/// A committed polyline. Strokes are never modified once created, only removed.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
	id: StrokeId,
	points: Box<[Vec3]>,
	style: Style,
	bounds: Bounds,
}

impl Stroke {
	/// Returns `None` for fewer than two points, which would not render as a line.
	pub(crate) fn new(id: StrokeId, points: Vec<Vec3>, style: Style) -> Option<Self> {
		if points.len() < 2 {
			return None;
		}
		let bounds = Bounds::containing(points.iter().copied());
		Some(Self {
			id,
			points: points.into_boxed_slice(),
			style,
			bounds,
		})
	}

	pub fn id(&self) -> StrokeId {
		self.id
	}

	pub fn points(&self) -> &[Vec3] {
		&self.points
	}

	pub fn style(&self) -> Style {
		self.style
	}

	pub fn color(&self) -> Color {
		self.style.color
	}

	pub fn width(&self) -> LineWidth {
		self.style.width
	}

	pub fn bounds(&self) -> Bounds {
		self.bounds
	}

	/// Total polyline length in world units.
	pub fn length(&self) -> f32 {
		self
			.points
			.iter()
			.tuple_windows()
			.map(|(a, b)| a.distance(*b))
			.sum()
	}

	/// Raw vertex data, three `f32`s per point, for upload to a vertex buffer.
	pub fn vertex_bytes(&self) -> &[u8] {
		bytemuck::cast_slice(&self.points[..])
	}

	/// Whether any point lies strictly within `radius` of `probe`.
	pub fn is_near(&self, probe: Vec3, radius: f32) -> bool {
		if !self.bounds.inflated(radius).contains(probe) {
			return false;
		}
		let radius_squared = radius * radius;
		self
			.points
			.iter()
			.any(|point| point.distance_squared(probe) < radius_squared)
	}
}

/// The in-progress path of the current engagement.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActiveStroke {
	points: Vec<Vec3>,
}

impl ActiveStroke {
	pub fn add_point(&mut self, point: Vec3) {
		self.points.push(point);
	}

	pub fn points(&self) -> &[Vec3] {
		&self.points
	}

	pub fn last(&self) -> Option<Vec3> {
		self.points.last().copied()
	}

	pub fn len(&self) -> usize {
		self.points.len()
	}

	pub fn is_empty(&self) -> bool {
		self.points.is_empty()
	}

	pub fn clear(&mut self) {
		self.points.clear();
	}

	/// Empties the buffer, returning its points.
	pub fn take(&mut self) -> Vec<Vec3> {
		std::mem::take(&mut self.points)
	}
}
