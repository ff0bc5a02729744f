use std::{cell::Cell, fmt, rc::Rc};

/// A single slot shared between two loops where each publish replaces the previous value.
///
/// There is no queue: a reader only ever sees the most recent value, and a value published twice
/// before being read is simply overwritten.
pub struct Latest<T>(Rc<Cell<Option<T>>>);

impl<T> Latest<T> {
	pub fn new() -> Self {
		Self(Rc::new(Cell::new(None)))
	}

	pub fn clear(&self) {
		self.0.set(None);
	}
}

impl<T: Copy> Latest<T> {
	pub fn publish(&self, value: T) {
		self.0.set(Some(value));
	}

	pub fn peek(&self) -> Option<T> {
		self.0.get()
	}
}

impl<T> Clone for Latest<T> {
	fn clone(&self) -> Self {
		Self(self.0.clone())
	}
}

impl<T> Default for Latest<T> {
	fn default() -> Self {
		Self::new()
	}
}

impl<T> fmt::Debug for Latest<T> {
	fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
		fmt.write_str("Latest")
	}
}
