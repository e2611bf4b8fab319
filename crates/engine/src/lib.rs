// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

#![cfg_attr(not(debug_assertions), deny(warnings))]

pub use command::{
	Command, DropAction, ObjectName,
	create_catalog::CreateCatalog,
	create_schema::CreateSchema,
	create_synonym::CreateSynonym,
	create_table::CreateTable,
	create_view::CreateView,
	drop_catalog::DropCatalog,
	drop_schema::DropSchema,
	insert::Insert,
};
pub use config::DatabaseConfig;
pub use database::Database;
pub use session::Session;
pub use store::memory::MemoryMetaStore;
pub use strata_type::{Error, Result};

pub mod command;
pub mod config;
pub mod database;
pub mod session;
pub mod store;
pub mod test_utils;
