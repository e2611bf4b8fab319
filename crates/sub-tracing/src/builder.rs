// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use strata_type::{Diagnostic, Error};
use tracing::debug;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

/// Builds and installs the process wide tracing subscriber.
///
/// The filter falls back to `RUST_LOG` when no explicit level was configured.
#[derive(Debug, Clone)]
pub struct TracingBuilder {
	level: Option<String>,
	json: bool,
	target: bool,
	thread_ids: bool,
}

impl Default for TracingBuilder {
	fn default() -> Self {
		Self::new()
	}
}

impl TracingBuilder {
	pub fn new() -> Self {
		Self {
			level: None,
			json: false,
			target: true,
			thread_ids: false,
		}
	}

	/// Filter directive, e.g. `"debug"` or `"info,strata_catalog=trace"`.
	pub fn with_level(mut self, level: impl Into<String>) -> Self {
		self.level = Some(level.into());
		self
	}

	pub fn with_json(mut self, json: bool) -> Self {
		self.json = json;
		self
	}

	pub fn with_target(mut self, target: bool) -> Self {
		self.target = target;
		self
	}

	pub fn with_thread_ids(mut self, thread_ids: bool) -> Self {
		self.thread_ids = thread_ids;
		self
	}

	pub fn filter(&self) -> Result<EnvFilter> {
		match &self.level {
			Some(level) => EnvFilter::try_new(level).map_err(|err| {
				tracing_error(format!("invalid tracing filter `{}`: {}", level, err))
			}),
			None => Ok(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))),
		}
	}

	/// Installs the subscriber globally. A second call reports an error instead of replacing the first.
	pub fn try_init(self) -> Result<()> {
		let filter = self.filter()?;

		let layer = if self.json {
			tracing_subscriber::fmt::layer()
				.json()
				.with_target(self.target)
				.with_thread_ids(self.thread_ids)
				.boxed()
		} else {
			tracing_subscriber::fmt::layer().with_target(self.target).with_thread_ids(self.thread_ids).boxed()
		};

		tracing_subscriber::registry()
			.with(layer.with_filter(filter))
			.try_init()
			.map_err(|err| tracing_error(format!("tracing subscriber already installed: {}", err)))?;

		debug!(json = self.json, level = self.level.as_deref().unwrap_or("RUST_LOG"), "tracing subscriber installed");
		Ok(())
	}
}

pub type Result<T> = std::result::Result<T, Error>;

fn tracing_error(message: String) -> Error {
	Error(Diagnostic {
		code: "TRACING_001".to_string(),
		statement: None,
		message,
		label: None,
		help: Some("Configure tracing once per process".to_string()),
		notes: vec![],
		cause: None,
	})
}
