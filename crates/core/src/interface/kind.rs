// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Kind of an object living in the namespace graph.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
	Catalog,
	Schema,
	Table,
	View,
	Synonym,
	SystemView,
	User,
}

impl Display for ObjectKind {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			ObjectKind::Catalog => f.write_str("catalog"),
			ObjectKind::Schema => f.write_str("schema"),
			ObjectKind::Table => f.write_str("table"),
			ObjectKind::View => f.write_str("view"),
			ObjectKind::Synonym => f.write_str("synonym"),
			ObjectKind::SystemView => f.write_str("system view"),
			ObjectKind::User => f.write_str("user"),
		}
	}
}
