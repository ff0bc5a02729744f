use super::erase::EraseIndex;
use super::scene::Scene;
use super::stroke::{ActiveStroke, StrokeId};
use crate::config::{Mode, Style, Tuning};
use glam::Vec3;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineState {
	Idle,
	Drawing,
}

/// One render tick's worth of input.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickInput {
	/// The projected pointer, or `None` when no pointer is present.
	pub point: Option<Vec3>,
	pub engaged: bool,
	pub mode: Mode,
}

/// Where the pointer is, for drawing a cursor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cursor {
	pub position: Vec3,
	pub engaged: bool,
	pub mode: Mode,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Finalized {
	Committed(StrokeId),
	/// Fewer than two points; nothing to show.
	TooShort,
	/// A stroke was committed moments ago, so this one is a duplicate signal.
	CoolingDown,
	Empty,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Transition {
	/// No pointer and nothing to finalize.
	Absent,
	/// Pointer present but not engaged.
	Hovering,
	Appended,
	/// Too close to the previous point.
	Decimated,
	Erased {
		removed: Vec<StrokeId>,
		/// An in-progress stroke was dropped because the mode changed under it.
		abandoned: bool,
	},
	Finalized(Finalized),
}

/// The stroke lifecycle: accumulates points while engaged and commits them on release.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StrokeEngine {
	active: ActiveStroke,
	cursor: Option<Cursor>,
	cooldown_until: Option<Duration>,
}

impl StrokeEngine {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn state(&self) -> EngineState {
		if self.active.is_empty() {
			EngineState::Idle
		} else {
			EngineState::Drawing
		}
	}

	pub fn active(&self) -> &ActiveStroke {
		&self.active
	}

	pub fn cursor(&self) -> Option<Cursor> {
		self.cursor
	}

	pub fn tick(
		&mut self,
		scene: &mut Scene,
		input: TickInput,
		style: Style,
		tuning: &Tuning,
		now: Duration,
	) -> Transition {
		let Some(point) = input.point else {
			self.cursor = None;
			return self.release(scene, style, tuning, now, Transition::Absent);
		};

		self.cursor = Some(Cursor {
			position: point,
			engaged: input.engaged,
			mode: input.mode,
		});

		match (input.engaged, input.mode) {
			(false, _) => self.release(scene, style, tuning, now, Transition::Hovering),
			(true, Mode::Erasing) => {
				let abandoned = !self.active.is_empty();
				if abandoned {
					tracing::debug!(points = self.active.len(), "abandoning stroke for eraser");
					self.active.clear();
				}
				let removed = EraseIndex::new(tuning).erase(scene, point, style.width);
				Transition::Erased { removed, abandoned }
			}
			(true, Mode::Drawing) => {
				let spaced = self
					.active
					.last()
					.map_or(true, |last| last.distance(point) >= tuning.decimation_distance);
				if spaced {
					self.active.add_point(point);
					Transition::Appended
				} else {
					Transition::Decimated
				}
			}
		}
	}

	fn release(
		&mut self,
		scene: &mut Scene,
		style: Style,
		tuning: &Tuning,
		now: Duration,
		idle: Transition,
	) -> Transition {
		if self.active.is_empty() {
			idle
		} else {
			Transition::Finalized(self.finalize(scene, style, tuning, now))
		}
	}

	/// Commits the active stroke. The buffer is always emptied, whether or not a stroke results.
	pub fn finalize(
		&mut self,
		scene: &mut Scene,
		style: Style,
		tuning: &Tuning,
		now: Duration,
	) -> Finalized {
		if self.active.is_empty() {
			return Finalized::Empty;
		}
		let points = self.active.take();
		if self.cooldown_until.is_some_and(|until| now < until) {
			tracing::debug!(points = points.len(), "finalize during cooldown, dropping");
			return Finalized::CoolingDown;
		}
		let count = points.len();
		let Some(id) = scene.commit(points, style) else {
			tracing::debug!(points = count, "discarding short stroke");
			return Finalized::TooShort;
		};
		tracing::debug!(%id, points = count, color = %style.color, width = %style.width, "committed stroke");
		self.cooldown_until = Some(now + tuning.finalize_cooldown);
		Finalized::Committed(id)
	}

	/// Drops the active stroke and forgets the cursor.
	pub fn reset(&mut self) {
		self.active.clear();
		self.cursor = None;
	}
}
