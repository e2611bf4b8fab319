// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use strata_core::interface::IdentifierCase;

use crate::DropAction;

pub const DEFAULT_CATALOG_NAME: &str = "DEFAULT";

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
	/// Name of the bootstrap catalog.
	pub name: String,
	pub identifier_case: IdentifierCase,
	/// Makes the bootstrap catalog a system catalog. Single catalog deployments keep this on.
	pub protect_default_catalog: bool,
	/// Drop action used when a statement names neither RESTRICT nor CASCADE.
	pub drop_restrict: bool,
	pub read_only: bool,
}

impl DatabaseConfig {
	pub fn new() -> Self {
		Self {
			name: DEFAULT_CATALOG_NAME.to_string(),
			identifier_case: IdentifierCase::Upper,
			protect_default_catalog: true,
			drop_restrict: true,
			read_only: false,
		}
	}

	pub fn with_name(mut self, name: impl Into<String>) -> Self {
		self.name = name.into();
		self
	}

	pub fn with_identifier_case(mut self, identifier_case: IdentifierCase) -> Self {
		self.identifier_case = identifier_case;
		self
	}

	pub fn with_protect_default_catalog(mut self, protect: bool) -> Self {
		self.protect_default_catalog = protect;
		self
	}

	pub fn with_drop_restrict(mut self, drop_restrict: bool) -> Self {
		self.drop_restrict = drop_restrict;
		self
	}

	pub fn with_read_only(mut self, read_only: bool) -> Self {
		self.read_only = read_only;
		self
	}

	pub fn default_drop_action(&self) -> DropAction {
		if self.drop_restrict {
			DropAction::Restrict
		} else {
			DropAction::Cascade
		}
	}

	/// Name/value pairs as exposed through the `SETTINGS` system view.
	pub fn settings(&self) -> Vec<(String, String)> {
		vec![
			("NAME".to_string(), self.name.clone()),
			("IDENTIFIER_CASE".to_string(), format!("{:?}", self.identifier_case).to_uppercase()),
			("PROTECT_DEFAULT_CATALOG".to_string(), self.protect_default_catalog.to_string()),
			("DROP_RESTRICT".to_string(), self.drop_restrict.to_string()),
			("READ_ONLY".to_string(), self.read_only.to_string()),
		]
	}
}

impl Default for DatabaseConfig {
	fn default() -> Self {
		Self::new()
	}
}
