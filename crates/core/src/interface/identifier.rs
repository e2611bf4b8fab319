// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use serde::{Deserialize, Serialize};

/// How the database spells the identifiers it invents itself, such as `INFORMATION_SCHEMA`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum IdentifierCase {
	#[default]
	Upper,
	Lower,
	Preserve,
}

impl IdentifierCase {
	pub fn apply(&self, identifier: &str) -> String {
		match self {
			IdentifierCase::Upper => identifier.to_uppercase(),
			IdentifierCase::Lower => identifier.to_lowercase(),
			IdentifierCase::Preserve => identifier.to_string(),
		}
	}
}
