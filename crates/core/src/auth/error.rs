// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use strata_type::{Diagnostic, Error, IntoDiagnostic};

use crate::auth::Capability;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
	#[error("user `{user}` lacks the {capability} capability")]
	PermissionDenied {
		user: String,
		capability: Capability,
	},

	#[error("user `{name}` not found")]
	UserNotFound {
		name: String,
	},
}

impl IntoDiagnostic for AuthError {
	fn into_diagnostic(self) -> Diagnostic {
		let message = self.to_string();
		match self {
			AuthError::PermissionDenied {
				capability,
				..
			} => Diagnostic {
				code: "AUTH_001".to_string(),
				statement: None,
				message,
				label: Some("permission denied".to_string()),
				help: Some(format!("Ask an administrator to grant {} to this user", capability)),
				notes: vec!["ADMIN implies CATALOG ADMIN, which implies SCHEMA ADMIN".to_string()],
				cause: None,
			},
			AuthError::UserNotFound {
				..
			} => Diagnostic {
				code: "AUTH_002".to_string(),
				statement: None,
				message,
				label: None,
				help: Some("Create the user first or check the spelling of the name".to_string()),
				notes: vec![],
				cause: None,
			},
		}
	}
}

impl From<AuthError> for Error {
	fn from(err: AuthError) -> Self {
		Error(err.into_diagnostic())
	}
}
