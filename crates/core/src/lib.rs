// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

#![cfg_attr(not(debug_assertions), deny(warnings))]

pub mod auth;
pub mod interface;
pub mod meta;

pub use strata_type::{Error, Result};
