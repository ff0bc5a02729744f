use super::stroke::{Stroke, StrokeId};
use crate::config::Style;
use crate::util::Observers;
use glam::Vec3;

/// A change to the committed stroke set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SceneEvent {
	Committed(StrokeId),
	Erased(Vec<StrokeId>),
	Cleared,
}

/// The committed strokes, in commit order.
#[derive(Debug, Default)]
pub struct Scene {
	strokes: Vec<Stroke>,
	next_id: u64,
	observers: Observers<SceneEvent>,
}

impl Scene {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn strokes(&self) -> &[Stroke] {
		&self.strokes
	}

	pub fn get(&self, id: StrokeId) -> Option<&Stroke> {
		self.strokes.iter().find(|stroke| stroke.id() == id)
	}

	pub fn len(&self) -> usize {
		self.strokes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.strokes.is_empty()
	}

	/// Registers a callback for every change that actually alters the stroke set.
	pub fn subscribe(&mut self, observer: impl FnMut(&SceneEvent) + 'static) {
		self.observers.subscribe(observer);
	}

	/// Commits `points` as a new stroke. Paths with fewer than two points are dropped.
	pub(crate) fn commit(&mut self, points: Vec<Vec3>, style: Style) -> Option<StrokeId> {
		let id = StrokeId::new(self.next_id);
		let stroke = Stroke::new(id, points, style)?;
		self.next_id += 1;
		self.strokes.push(stroke);
		self.observers.notify(&SceneEvent::Committed(id));
		Some(id)
	}

	/// Removes every stroke matching `predicate`. Observers hear about it only if something was
	/// removed.
	pub(crate) fn remove_where(&mut self, mut predicate: impl FnMut(&Stroke) -> bool) -> Vec<StrokeId> {
		let mut removed = Vec::new();
		self.strokes.retain(|stroke| {
			let remove = predicate(stroke);
			if remove {
				removed.push(stroke.id());
			}
			!remove
		});
		if !removed.is_empty() {
			self.observers.notify(&SceneEvent::Erased(removed.clone()));
		}
		removed
	}

	/// Removes every stroke. Ids keep counting up, so none is ever reused.
	pub(crate) fn clear(&mut self) {
		self.strokes.clear();
		self.observers.notify(&SceneEvent::Cleared);
	}
}

/// Tracks the externally incremented clear counter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ClearSignal {
	seen: u64,
}

impl ClearSignal {
	/// Returns `true` if `value` is newer than anything observed so far.
	pub fn observe(&mut self, value: u64) -> bool {
		if value > self.seen {
			self.seen = value;
			true
		} else {
			false
		}
	}

	pub fn seen(&self) -> u64 {
		self.seen
	}
}
