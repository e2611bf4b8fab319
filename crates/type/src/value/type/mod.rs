// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// The column types a table can declare.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Type {
	Boolean,
	Int4,
	Int8,
	Utf8,
}

impl Display for Type {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Type::Boolean => f.write_str("BOOLEAN"),
			Type::Int4 => f.write_str("INTEGER"),
			Type::Int8 => f.write_str("BIGINT"),
			Type::Utf8 => f.write_str("VARCHAR"),
		}
	}
}
