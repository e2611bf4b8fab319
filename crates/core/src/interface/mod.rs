// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

pub mod id;
pub mod identifier;
pub mod kind;

pub use id::{ObjectId, SessionId, UserId};
pub use identifier::IdentifierCase;
pub use kind::ObjectKind;
