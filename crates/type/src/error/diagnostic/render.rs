// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::Write;

use crate::error::diagnostic::Diagnostic;

pub struct DefaultRenderer;

impl DefaultRenderer {
	pub fn render_string(diagnostic: &Diagnostic) -> String {
		let mut out = String::new();
		Self::render(&mut out, diagnostic, 0);
		out
	}

	fn render(out: &mut String, diagnostic: &Diagnostic, depth: usize) {
		let indent = "  ".repeat(depth);

		let _ = writeln!(out, "{}Error {}: {}", indent, diagnostic.code, diagnostic.message);

		if let Some(statement) = &diagnostic.statement {
			let _ = writeln!(out, "{}  statement: {}", indent, statement);
		}
		if let Some(label) = &diagnostic.label {
			let _ = writeln!(out, "{}  label: {}", indent, label);
		}
		if let Some(help) = &diagnostic.help {
			let _ = writeln!(out, "{}  help: {}", indent, help);
		}
		for note in &diagnostic.notes {
			let _ = writeln!(out, "{}  note: {}", indent, note);
		}
		if let Some(cause) = &diagnostic.cause {
			let _ = writeln!(out, "{}caused by:", indent);
			Self::render(out, cause, depth + 1);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn diagnostic(code: &str, message: &str) -> Diagnostic {
		Diagnostic {
			code: code.to_string(),
			statement: None,
			message: message.to_string(),
			label: None,
			help: None,
			notes: vec![],
			cause: None,
		}
	}

	#[test]
	fn test_render_plain() {
		let out = DefaultRenderer::render_string(&diagnostic("CA_001", "catalog `x` already exists"));
		assert_eq!(out, "Error CA_001: catalog `x` already exists\n");
	}

	#[test]
	fn test_render_cause_is_indented() {
		let mut outer = diagnostic("OUTER", "outer");
		outer.cause = Some(Box::new(diagnostic("INNER", "inner")));
		outer.notes.push("first note".to_string());

		let out = DefaultRenderer::render_string(&outer);
		assert!(out.contains("  note: first note\n"));
		assert!(out.contains("caused by:\n  Error INNER: inner\n"));
	}
}
