// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use strata_core::{
	auth::User,
	interface::{IdentifierCase, ObjectId, ObjectKind, SessionId},
	meta::{MetaLock, MetaLockGuard},
};

use crate::NamespaceObject;

/// The hooks the namespace graph calls on its database.
///
/// Persistence of the rows themselves belongs to the implementor; the catalog only decides when a row is written
/// or removed, and always does so while holding the metadata lock.
pub trait MetaStore: Send + Sync {
	fn meta_lock(&self) -> &MetaLock;

	/// Blocking acquire of the metadata lock, reentrant per session.
	fn lock_meta(&self, session: SessionId) -> MetaLockGuard<'_> {
		self.meta_lock().lock(session)
	}

	/// Durably records `object`. Objects with pre-assigned ids are never recorded.
	fn add_meta(&self, session: SessionId, object: &dyn NamespaceObject) -> crate::Result<()>;

	fn remove_meta(&self, session: SessionId, id: ObjectId) -> crate::Result<()>;

	/// True while the database is still opening and permission metadata is not yet available.
	fn is_starting(&self) -> bool;

	fn check_writing_allowed(&self) -> crate::Result<()>;

	/// The built-in user owning every system object.
	fn system_user(&self) -> Arc<User>;

	fn identifier_case(&self) -> IdentifierCase;

	fn sys_identifier(&self, identifier: &str) -> String {
		self.identifier_case().apply(identifier)
	}
}

/// One persisted directory entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetaRecord {
	pub id: ObjectId,
	pub kind: ObjectKind,
	pub name: String,
	pub parent: Option<ObjectId>,
	pub sql: Option<String>,
}

impl MetaRecord {
	pub fn of(object: &dyn NamespaceObject) -> Self {
		Self {
			id: object.id(),
			kind: object.kind(),
			name: object.name().to_string(),
			parent: object.parent(),
			sql: object.create_sql(),
		}
	}
}
