// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::{Arc, Weak};

use strata_core::{
	auth::User,
	interface::{ObjectId, ObjectKind},
};
use strata_type::{error::diagnostic::transaction::database_closed, return_error};

use crate::{MetaStore, sql::quote_identifier};

/// Anything that lives in the namespace graph.
pub trait NamespaceObject: Send + Sync {
	fn base(&self) -> &ObjectBase;

	fn kind(&self) -> ObjectKind;

	fn id(&self) -> ObjectId {
		self.base().id()
	}

	fn name(&self) -> &str {
		self.base().name()
	}

	/// Id of the containing object, `None` for top level objects.
	fn parent(&self) -> Option<ObjectId> {
		None
	}

	/// Statement that recreates this object, `None` for objects that exist implicitly.
	fn create_sql(&self) -> Option<String>;

	/// Statement that removes this object, `None` for objects that can not be dropped by statement.
	fn drop_sql(&self) -> Option<String>;

	fn sql_name(&self) -> String {
		quote_identifier(self.name())
	}
}

/// Identity shared by every namespace object.
///
/// Owner and database are back references: the user directory owns users and the database owns the catalog tree,
/// so neither keeps the other alive through this struct.
#[derive(Debug)]
pub struct ObjectBase {
	id: ObjectId,
	name: String,
	owner: Weak<User>,
	database: Weak<dyn MetaStore>,
}

impl ObjectBase {
	pub fn new(database: &Arc<dyn MetaStore>, id: ObjectId, name: impl Into<String>, owner: &Arc<User>) -> Self {
		Self {
			id,
			name: name.into(),
			owner: Arc::downgrade(owner),
			database: Arc::downgrade(database),
		}
	}

	pub fn id(&self) -> ObjectId {
		self.id
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn owner(&self) -> Option<Arc<User>> {
		self.owner.upgrade()
	}

	pub fn database(&self) -> crate::Result<Arc<dyn MetaStore>> {
		match self.database.upgrade() {
			Some(database) => Ok(database),
			None => return_error!(database_closed()),
		}
	}
}
