// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

mod r#type;

pub use r#type::Type;

/// A single column value, represented as a native Rust type.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Value {
	/// Value is not defined (think null in common programming languages)
	Undefined,
	/// A boolean: true or false.
	Boolean(bool),
	/// A 4-byte signed integer
	Int4(i32),
	/// An 8-byte signed integer
	Int8(i64),
	/// A UTF-8 encoded text.
	Utf8(String),
}

impl Value {
	pub fn utf8(value: impl Into<String>) -> Self {
		Value::Utf8(value.into())
	}

	/// The type of this value, `None` for `Undefined` which fits every column.
	pub fn get_type(&self) -> Option<Type> {
		match self {
			Value::Undefined => None,
			Value::Boolean(_) => Some(Type::Boolean),
			Value::Int4(_) => Some(Type::Int4),
			Value::Int8(_) => Some(Type::Int8),
			Value::Utf8(_) => Some(Type::Utf8),
		}
	}
}

impl Display for Value {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Value::Undefined => f.write_str("NULL"),
			Value::Boolean(true) => f.write_str("TRUE"),
			Value::Boolean(false) => f.write_str("FALSE"),
			Value::Int4(value) => Display::fmt(value, f),
			Value::Int8(value) => Display::fmt(value, f),
			Value::Utf8(value) => write!(f, "'{}'", value.replace('\'', "''")),
		}
	}
}
