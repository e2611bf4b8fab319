// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Users and the capability checks the catalog layer asks about.
//!
//! The catalog never evaluates rules itself; it calls one of the `check_*` methods and either continues or
//! propagates the returned `PermissionDenied`.

use std::{
	collections::BTreeSet,
	fmt::{Display, Formatter},
};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use strata_type::Result;
use tracing::trace;

use crate::interface::UserId;

mod error;

pub use error::AuthError;

/// Capabilities form a chain: `Admin` implies `CatalogAdmin` implies `SchemaAdmin`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Capability {
	SchemaAdmin,
	CatalogAdmin,
	Admin,
}

impl Display for Capability {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Capability::SchemaAdmin => f.write_str("SCHEMA ADMIN"),
			Capability::CatalogAdmin => f.write_str("CATALOG ADMIN"),
			Capability::Admin => f.write_str("ADMIN"),
		}
	}
}

#[derive(Debug)]
pub struct User {
	id: UserId,
	name: String,
	admin: bool,
	grants: RwLock<BTreeSet<Capability>>,
}

impl User {
	pub fn new(id: UserId, name: impl Into<String>, admin: bool) -> Self {
		Self {
			id,
			name: name.into(),
			admin,
			grants: RwLock::new(BTreeSet::new()),
		}
	}

	pub fn id(&self) -> UserId {
		self.id
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn is_admin(&self) -> bool {
		self.admin || self.grants.read().contains(&Capability::Admin)
	}

	pub fn grant(&self, capability: Capability) {
		self.grants.write().insert(capability);
	}

	pub fn revoke(&self, capability: Capability) {
		self.grants.write().remove(&capability);
	}

	/// Explicitly granted capabilities, weakest first.
	pub fn grants(&self) -> Vec<Capability> {
		self.grants.read().iter().copied().collect()
	}

	pub fn has_capability(&self, capability: Capability) -> bool {
		self.admin || self.grants.read().iter().any(|granted| *granted >= capability)
	}

	pub fn check_admin(&self) -> Result<()> {
		self.check(Capability::Admin)
	}

	pub fn check_catalog_admin(&self) -> Result<()> {
		self.check(Capability::CatalogAdmin)
	}

	pub fn check_schema_admin(&self) -> Result<()> {
		self.check(Capability::SchemaAdmin)
	}

	/// Owners may always manage what they own; everybody else needs schema admin.
	pub fn check_owner_or_schema_admin(&self, owner: UserId) -> Result<()> {
		if self.id == owner {
			return Ok(());
		}
		self.check(Capability::SchemaAdmin)
	}

	fn check(&self, capability: Capability) -> Result<()> {
		if self.has_capability(capability) {
			return Ok(());
		}
		trace!(user = %self.name, %capability, "capability check failed");
		Err(AuthError::PermissionDenied {
			user: self.name.clone(),
			capability,
		}
		.into())
	}
}
