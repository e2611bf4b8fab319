// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::{
	Arc,
	atomic::{AtomicBool, AtomicI32, AtomicU32, AtomicU64, Ordering},
};

use dashmap::{DashMap, mapref::entry::Entry};
use strata_catalog::{
	Catalog, CatalogError, CatalogRegistry, MetaRecord, MetaStore, NamespaceObject, SystemView, SystemViewKind,
};
use strata_core::{
	auth::{AuthError, User},
	interface::{IdentifierCase, ObjectId, ObjectKind, SessionId, UserId},
	meta::MetaLock,
};
use strata_type::{Value, error::diagnostic::transaction::database_read_only, internal_err, return_error};
use tracing::{debug, instrument};

use crate::{DatabaseConfig, MemoryMetaStore, Session};

/// Session id used for work the database does on its own behalf.
pub const SYSTEM_SESSION: SessionId = SessionId(0);

pub(crate) struct SessionEntry {
	pub(crate) user: String,
	pub(crate) in_transaction: Arc<AtomicBool>,
}

/// The database wide object directory.
///
/// Owns the catalog registry, the user directory and the metadata store; every namespace object refers back to it
/// only through a weak handle.
pub struct Database {
	config: DatabaseConfig,
	catalogs: CatalogRegistry,
	default_catalog: String,
	users: DashMap<String, Arc<User>>,
	system_user: Arc<User>,
	meta_lock: MetaLock,
	store: MemoryMetaStore,
	starting: AtomicBool,
	next_object_id: AtomicI32,
	next_user_id: AtomicU32,
	next_session_id: AtomicU64,
	sessions: DashMap<SessionId, SessionEntry>,
}

impl Database {
	/// Opens a database and bootstraps its default catalog.
	#[instrument(name = "engine::database::open", level = "debug", skip(config), fields(name = %config.name))]
	pub fn open(config: DatabaseConfig) -> crate::Result<Arc<Self>> {
		let system_user = Arc::new(User::new(UserId(0), config.identifier_case.apply("DBA"), true));
		let default_catalog = config.identifier_case.apply(&config.name);

		let database = Arc::new(Self {
			config,
			catalogs: CatalogRegistry::new(),
			default_catalog,
			users: DashMap::new(),
			system_user: system_user.clone(),
			meta_lock: MetaLock::new(),
			store: MemoryMetaStore::new(),
			starting: AtomicBool::new(true),
			next_object_id: AtomicI32::new(1),
			next_user_id: AtomicU32::new(1),
			next_session_id: AtomicU64::new(1),
			sessions: DashMap::new(),
		});
		database.users.insert(system_user.name().to_string(), system_user);

		database.bootstrap()?;
		database.starting.store(false, Ordering::Release);
		debug!(catalog = %database.default_catalog, "database opened");
		Ok(database)
	}

	fn bootstrap(self: &Arc<Self>) -> crate::Result<()> {
		let meta: Arc<dyn MetaStore> = self.clone();
		let catalog = Arc::new(Catalog::new(
			&meta,
			ObjectId(0),
			self.default_catalog.clone(),
			&self.system_user,
			self.config.protect_default_catalog,
		));
		self.catalogs.add(self.as_ref(), SYSTEM_SESSION, catalog.clone())?;
		catalog.open();
		Ok(())
	}

	pub fn config(&self) -> &DatabaseConfig {
		&self.config
	}

	pub fn catalogs(&self) -> &CatalogRegistry {
		&self.catalogs
	}

	pub fn meta_store(&self) -> &MemoryMetaStore {
		&self.store
	}

	/// Replayable create statements of every persisted object.
	pub fn script(&self) -> Vec<String> {
		self.store.script()
	}

	pub fn meta_records(&self) -> Vec<MetaRecord> {
		self.store.records()
	}

	pub fn default_catalog_name(&self) -> &str {
		&self.default_catalog
	}

	pub fn default_catalog(&self) -> crate::Result<Arc<Catalog>> {
		match self.catalogs.find(&self.default_catalog) {
			Some(catalog) => Ok(catalog),
			None => internal_err!("default catalog `{}` is not registered", self.default_catalog),
		}
	}

	pub fn find_catalog(&self, name: &str) -> Option<Arc<Catalog>> {
		self.catalogs.find(name)
	}

	pub fn get_catalog(&self, name: &str) -> crate::Result<Arc<Catalog>> {
		self.find_catalog(name).ok_or_else(|| {
			CatalogError::NotFound {
				kind: ObjectKind::Catalog,
				name: name.to_string(),
			}
			.into()
		})
	}

	/// Next id for a persisted object. Ids are positive and never handed out twice.
	pub fn allocate_object_id(&self) -> ObjectId {
		ObjectId(self.next_object_id.fetch_add(1, Ordering::AcqRel))
	}

	#[instrument(name = "engine::database::create_user", level = "debug", skip(self))]
	pub fn create_user(&self, name: &str, admin: bool) -> crate::Result<Arc<User>> {
		match self.users.entry(name.to_string()) {
			Entry::Occupied(_) => Err(CatalogError::AlreadyExists {
				kind: ObjectKind::User,
				name: name.to_string(),
			}
			.into()),
			Entry::Vacant(entry) => {
				let id = UserId(self.next_user_id.fetch_add(1, Ordering::AcqRel));
				let user = Arc::new(User::new(id, name, admin));
				entry.insert(user.clone());
				Ok(user)
			}
		}
	}

	pub fn find_user(&self, name: &str) -> Option<Arc<User>> {
		self.users.get(name).map(|user| user.value().clone())
	}

	pub fn get_user(&self, name: &str) -> crate::Result<Arc<User>> {
		self.find_user(name).ok_or_else(|| {
			AuthError::UserNotFound {
				name: name.to_string(),
			}
			.into()
		})
	}

	/// Users sorted by name.
	pub fn users(&self) -> Vec<Arc<User>> {
		let mut users: Vec<_> = self.users.iter().map(|user| user.value().clone()).collect();
		users.sort_by(|left, right| left.name().cmp(right.name()));
		users
	}

	/// Opens a session for `user_name`.
	pub fn connect(self: &Arc<Self>, user_name: &str) -> crate::Result<Session> {
		let user = self.get_user(user_name)?;
		Ok(Session::new(self.clone(), user))
	}

	pub(crate) fn register_session(&self, user: &User, in_transaction: Arc<AtomicBool>) -> SessionId {
		let id = SessionId(self.next_session_id.fetch_add(1, Ordering::AcqRel));
		self.sessions.insert(
			id,
			SessionEntry {
				user: user.name().to_string(),
				in_transaction,
			},
		);
		id
	}

	pub(crate) fn unregister_session(&self, id: SessionId) {
		self.sessions.remove(&id);
	}

	pub fn session_count(&self) -> usize {
		self.sessions.len()
	}

	/// Tears `catalog` down and removes it from the registry. Callers hold the metadata lock and have already
	/// checked that the drop is allowed.
	pub(crate) fn remove_catalog(&self, session: SessionId, catalog: &Catalog) -> crate::Result<()> {
		catalog.remove_children_and_resources(session)?;
		if self.catalogs.remove(self, session, catalog).is_none() {
			return internal_err!("catalog `{}` vanished while being dropped", catalog.name());
		}
		debug!(catalog = %catalog.name(), "catalog dropped");
		Ok(())
	}

	/// Rows of a system view. Database wide kinds come from here, the rest from the owning catalog.
	pub fn system_rows(&self, view: &SystemView, catalog: &Catalog) -> Vec<Vec<Value>> {
		match view.view_kind() {
			SystemViewKind::Catalogs => self
				.catalogs
				.list()
				.iter()
				.map(|catalog| {
					vec![
						Value::utf8(catalog.name()),
						Value::Int4(*catalog.id()),
						Value::Boolean(catalog.is_system()),
					]
				})
				.collect(),
			SystemViewKind::Users => self
				.users()
				.iter()
				.map(|user| vec![Value::utf8(user.name()), Value::Boolean(user.is_admin())])
				.collect(),
			SystemViewKind::Rights => self
				.users()
				.iter()
				.flat_map(|user| {
					user.grants()
						.into_iter()
						.map(|capability| vec![Value::utf8(user.name()), Value::utf8(capability.to_string())])
						.collect::<Vec<_>>()
				})
				.collect(),
			SystemViewKind::Settings => self
				.config
				.settings()
				.into_iter()
				.map(|(name, value)| vec![Value::utf8(name), Value::utf8(value)])
				.collect(),
			SystemViewKind::Sessions => {
				let mut rows: Vec<_> = self
					.sessions
					.iter()
					.map(|entry| {
						(
							entry.key().0,
							entry.value().user.clone(),
							entry.value().in_transaction.load(Ordering::Acquire),
						)
					})
					.collect();
				rows.sort_by_key(|(id, _, _)| *id);
				rows.into_iter()
					.map(|(id, user, in_transaction)| {
						vec![Value::Int8(id as i64), Value::utf8(user), Value::Boolean(in_transaction)]
					})
					.collect()
			}
			_ => view.rows(catalog),
		}
	}
}

impl MetaStore for Database {
	fn meta_lock(&self) -> &MetaLock {
		&self.meta_lock
	}

	fn add_meta(&self, _session: SessionId, object: &dyn NamespaceObject) -> crate::Result<()> {
		if !object.id().is_persistent() {
			return Ok(());
		}
		self.store.insert(MetaRecord::of(object))
	}

	fn remove_meta(&self, _session: SessionId, id: ObjectId) -> crate::Result<()> {
		if id.is_persistent() {
			self.store.remove(id);
		}
		Ok(())
	}

	fn is_starting(&self) -> bool {
		self.starting.load(Ordering::Acquire)
	}

	fn check_writing_allowed(&self) -> crate::Result<()> {
		if self.config.read_only {
			return_error!(database_read_only());
		}
		Ok(())
	}

	fn system_user(&self) -> Arc<User> {
		self.system_user.clone()
	}

	fn identifier_case(&self) -> IdentifierCase {
		self.config.identifier_case
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::test_utils::create_test_database;

	#[test]
	fn test_open_bootstraps_default_catalog() {
		let database = create_test_database();
		let catalog = database.default_catalog().unwrap();

		assert_eq!(catalog.name(), "DEFAULT");
		assert_eq!(catalog.id(), ObjectId(0));
		assert!(catalog.is_system());
		assert!(catalog.contains_schema("PUBLIC"));
		assert!(catalog.contains_schema("INFORMATION_SCHEMA"));
		assert!(!database.is_starting());
		assert!(database.meta_records().is_empty());
	}

	#[test]
	fn test_identifier_case_applies_to_builtins() {
		let database =
			Database::open(DatabaseConfig::new().with_identifier_case(IdentifierCase::Lower)).unwrap();
		let catalog = database.default_catalog().unwrap();

		assert_eq!(catalog.name(), "default");
		assert!(catalog.contains_schema("public"));
		assert!(catalog.contains_schema("information_schema"));
		assert!(database.find_user("dba").is_some());
	}

	#[test]
	fn test_unprotected_default_catalog() {
		let database = Database::open(DatabaseConfig::new().with_protect_default_catalog(false)).unwrap();
		assert!(database.default_catalog().unwrap().can_drop());
	}

	#[test]
	fn test_object_ids_are_positive_and_unique() {
		let database = create_test_database();
		let first = database.allocate_object_id();
		let second = database.allocate_object_id();

		assert!(first.is_persistent());
		assert!(second > first);
	}

	#[test]
	fn test_users() {
		let database = create_test_database();
		let user = database.create_user("ALICE", false).unwrap();

		assert_eq!(database.get_user("ALICE").unwrap().id(), user.id());
		assert_eq!(database.create_user("ALICE", false).unwrap_err().code, "CA_001");
		assert_eq!(database.get_user("BOB").unwrap_err().code, "AUTH_002");
	}

	#[test]
	fn test_read_only_blocks_writes() {
		let database = Database::open(DatabaseConfig::new().with_read_only(true)).unwrap();
		assert_eq!(database.check_writing_allowed().unwrap_err().code, "TXN_001");
	}

	#[test]
	fn test_sessions_are_tracked() {
		let database = create_test_database();
		let session = database.connect("DBA").unwrap();
		assert_eq!(database.session_count(), 1);
		drop(session);
		assert_eq!(database.session_count(), 0);
	}
}
