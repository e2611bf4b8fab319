// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use crate::error::diagnostic::Diagnostic;

/// Where an internal fault was raised, captured by [`internal_error!`](crate::internal_error).
#[derive(Debug, Clone, Copy)]
pub struct Location {
	pub file: &'static str,
	pub line: u32,
	pub column: u32,
	pub function: &'static str,
	pub module: &'static str,
}

impl Location {
	fn short_file(&self) -> &str {
		let file = self.file.rsplit('/').next().unwrap_or(self.file);
		file.strip_suffix(".rs").unwrap_or(file)
	}
}

/// A broken catalog invariant. Callers never recover from these; the diagnostic carries enough
/// context to be pasted into a bug report.
pub fn internal_at(reason: impl Into<String>, location: Location) -> Diagnostic {
	let tracking_id =
		format!("ERR-{}-{}:{}", chrono::Utc::now().timestamp_millis(), location.short_file(), location.line);

	Diagnostic {
		code: "INTERNAL_ERROR".to_string(),
		statement: None,
		message: format!("Internal error [{}]: {}", tracking_id, reason.into()),
		label: Some(format!("at {}:{}:{}", location.file, location.line, location.column)),
		help: Some(format!(
			"Report this with Error ID {} (strata {}, {} {})",
			tracking_id,
			env!("CARGO_PKG_VERSION"),
			std::env::consts::OS,
			std::env::consts::ARCH
		)),
		notes: vec![
			format!("function: {}", location.function),
			format!("module: {}", location.module),
			"the namespace graph may be inconsistent".to_string(),
		],
		cause: None,
	}
}

#[doc(hidden)]
pub fn function_name<T>(_: T) -> &'static str {
	let name = std::any::type_name::<T>();
	name.strip_suffix("::f").unwrap_or(name)
}

/// Builds an internal error diagnostic at the call site
#[macro_export]
macro_rules! internal_error {
	($reason:expr) => {
		$crate::error::diagnostic::internal::internal_at(
			$reason,
			$crate::error::diagnostic::internal::Location {
				file: file!(),
				line: line!(),
				column: column!(),
				function: {
					fn f() {}
					$crate::error::diagnostic::internal::function_name(f)
				},
				module: module_path!(),
			},
		)
	};
	($fmt:expr, $($arg:tt)*) => {
		$crate::internal_error!(format!($fmt, $($arg)*))
	};
}

/// `Err` of an internal error at the call site
#[macro_export]
macro_rules! internal_err {
	($($arg:tt)*) => {
		Err($crate::error::Error($crate::internal_error!($($arg)*)))
	};
}

/// Returns an internal error from the enclosing function
#[macro_export]
macro_rules! return_internal_error {
	($($arg:tt)*) => {
		return $crate::internal_err!($($arg)*)
	};
}
