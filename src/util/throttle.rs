use std::time::Duration;

/// Admits at most one call per `interval`, measured against caller-supplied timestamps.
#[derive(Clone, Debug, PartialEq)]
pub struct Throttle {
	interval: Duration,
	last: Option<Duration>,
}

impl Throttle {
	pub fn new(interval: Duration) -> Self {
		Self {
			interval,
			last: None,
		}
	}

	pub fn interval(&self) -> Duration {
		self.interval
	}

	pub fn set_interval(&mut self, interval: Duration) {
		self.interval = interval;
	}

	/// Returns `true` and records `now` if strictly more than `interval` has passed since the last
	/// admitted call.
	pub fn ready(&mut self, now: Duration) -> bool {
		let admitted = match self.last {
			None => true,
			Some(last) => now.saturating_sub(last) > self.interval,
		};
		if admitted {
			self.last = Some(now);
		}
		admitted
	}

	pub fn reset(&mut self) {
		self.last = None;
	}
}
