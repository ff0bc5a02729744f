use super::machine::{Cursor, StrokeEngine, TickInput, Transition};
use super::scene::{ClearSignal, Scene, SceneEvent};
use super::stroke::Stroke;
use crate::config::{Color, Config, Mode};
use crate::gesture::PointerSample;
use crate::projector::{CameraView, ProjectionError, Projector};
use glam::Vec3;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CursorShape {
	/// A translucent ball in the ink color.
	Sphere(Color),
	/// An outline ring marking the eraser.
	Ring,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CursorIndicator {
	pub position: Vec3,
	/// World-space radius of the indicator.
	pub scale: f32,
	pub shape: CursorShape,
	pub engaged: bool,
}

impl CursorIndicator {
	const IDLE_SCALE: f32 = 0.006;
	const ENGAGED_SCALE: f32 = 0.012;
	/// Line width at which the indicator has its base size.
	const REFERENCE_WIDTH: f32 = 5.0;

	fn new(cursor: Cursor, config: &Config) -> Self {
		let base = if cursor.engaged {
			Self::ENGAGED_SCALE
		} else {
			Self::IDLE_SCALE
		};
		Self {
			position: cursor.position,
			scale: base * config.line_width.as_f32() / Self::REFERENCE_WIDTH,
			shape: match cursor.mode {
				Mode::Drawing => CursorShape::Sphere(config.color),
				Mode::Erasing => CursorShape::Ring,
			},
			engaged: cursor.engaged,
		}
	}
}

/// Everything the renderer needs for one frame.
#[derive(Clone, Copy, Debug)]
pub struct Frame<'a> {
	pub strokes: &'a [Stroke],
	/// The in-progress stroke, once it is long enough to draw as a line.
	pub active: Option<&'a [Vec3]>,
	pub cursor: Option<CursorIndicator>,
}

/// The render-side state: one engine, one scene, one clear counter.
#[derive(Debug, Default)]
pub struct Pipeline {
	engine: StrokeEngine,
	scene: Scene,
	clear: ClearSignal,
}

impl Pipeline {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn scene(&self) -> &Scene {
		&self.scene
	}

	pub fn engine(&self) -> &StrokeEngine {
		&self.engine
	}

	pub fn subscribe(&mut self, observer: impl FnMut(&SceneEvent) + 'static) {
		self.scene.subscribe(observer);
	}

	/// Runs one render tick. A projection failure drops the tick without touching any state.
	pub fn tick(
		&mut self,
		camera: &impl CameraView,
		sample: Option<PointerSample>,
		config: &Config,
		now: Duration,
	) -> Result<Transition, ProjectionError> {
		let projector = Projector::new(config.tuning.drawing_depth);
		let point = sample
			.map(|sample| projector.project(camera, sample.position))
			.transpose()?;
		let input = TickInput {
			point,
			engaged: sample.is_some_and(|sample| sample.engaged),
			mode: config.mode,
		};
		let transition = self.engine.tick(
			&mut self.scene,
			input,
			config.style(),
			&config.tuning,
			now,
		);
		tracing::trace!(?transition);
		Ok(transition)
	}

	/// Empties the scene if `signal` is newer than any seen before.
	#[tracing::instrument(skip(self))]
	pub fn clear(&mut self, signal: u64) -> bool {
		if !self.clear.observe(signal) {
			return false;
		}
		self.engine.reset();
		self.scene.clear();
		tracing::info!("cleared scene");
		true
	}

	pub fn frame(&self, config: &Config) -> Frame<'_> {
		let active = self.engine.active().points();
		Frame {
			strokes: self.scene.strokes(),
			active: (config.mode == Mode::Drawing && active.len() >= 2).then_some(active),
			cursor: self
				.engine
				.cursor()
				.map(|cursor| CursorIndicator::new(cursor, config)),
		}
	}
}
