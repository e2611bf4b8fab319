// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	fmt::{Display, Formatter},
	ops::Deref,
};

use serde::{Deserialize, Serialize};

/// Identifier of an object in the namespace graph.
///
/// Ids handed out by the database allocator are strictly positive and are the only ones that reach the meta store.
/// Zero and negative ids are pre-assigned to built-in objects (the bootstrap catalog, the fixed schemas every
/// catalog carries and the system views) and are never persisted.
#[repr(transparent)]
#[derive(Debug, Copy, Clone, PartialOrd, PartialEq, Ord, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(pub i32);

impl ObjectId {
	pub fn is_persistent(&self) -> bool {
		self.0 > 0
	}
}

impl Deref for ObjectId {
	type Target = i32;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

impl PartialEq<i32> for ObjectId {
	fn eq(&self, other: &i32) -> bool {
		self.0.eq(other)
	}
}

impl From<ObjectId> for i32 {
	fn from(value: ObjectId) -> Self {
		value.0
	}
}

impl Display for ObjectId {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		Display::fmt(&self.0, f)
	}
}

#[repr(transparent)]
#[derive(Debug, Copy, Clone, PartialOrd, PartialEq, Ord, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub u64);

impl Deref for SessionId {
	type Target = u64;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

impl Display for SessionId {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "session:{}", self.0)
	}
}

#[repr(transparent)]
#[derive(Debug, Copy, Clone, PartialOrd, PartialEq, Ord, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u32);

impl Deref for UserId {
	type Target = u32;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

impl Display for UserId {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "user:{}", self.0)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_only_positive_ids_are_persistent() {
		assert!(ObjectId(1).is_persistent());
		assert!(!ObjectId(0).is_persistent());
		assert!(!ObjectId(-1).is_persistent());
	}
}
