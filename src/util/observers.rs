use std::fmt;

/// A list of callbacks notified synchronously, in subscription order.
pub struct Observers<E>(Vec<Box<dyn FnMut(&E)>>);

impl<E> Observers<E> {
	pub fn new() -> Self {
		Self(Vec::new())
	}

	pub fn subscribe(&mut self, observer: impl FnMut(&E) + 'static) {
		self.0.push(Box::new(observer));
	}

	pub fn notify(&mut self, event: &E) {
		for observer in self.0.iter_mut() {
			observer(event);
		}
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl<E> Default for Observers<E> {
	fn default() -> Self {
		Self::new()
	}
}

impl<E> fmt::Debug for Observers<E> {
	fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
		write!(fmt, "Observers({})", self.0.len())
	}
}
