pub trait ResultExt<T, E> {
	fn ok_or_log(self) -> Option<T>
	where
		E: std::fmt::Display;

	/// Like `ok_or_log` but for faults that are expected to recur every few frames.
	fn ok_or_debug(self) -> Option<T>
	where
		E: std::fmt::Display;
}

impl<T, E> ResultExt<T, E> for Result<T, E> {
	fn ok_or_log(self) -> Option<T>
	where
		E: std::fmt::Display,
	{
		self.inspect_err(|err| tracing::error!("{}", err)).ok()
	}

	fn ok_or_debug(self) -> Option<T>
	where
		E: std::fmt::Display,
	{
		self.inspect_err(|err| tracing::debug!("{}", err)).ok()
	}
}
