// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

/// Quotes an identifier, doubling embedded quotes.
pub fn quote_identifier(identifier: &str) -> String {
	let mut result = String::with_capacity(identifier.len() + 2);
	result.push('"');
	for c in identifier.chars() {
		if c == '"' {
			result.push('"');
		}
		result.push(c);
	}
	result.push('"');
	result
}

/// Quotes and dot-joins the parts of a qualified name.
pub fn qualified_name(parts: &[&str]) -> String {
	parts.iter().map(|part| quote_identifier(part)).collect::<Vec<_>>().join(".")
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_quote_identifier() {
		assert_eq!(quote_identifier("CATALOG1"), "\"CATALOG1\"");
		assert_eq!(quote_identifier("my\"name"), "\"my\"\"name\"");
	}

	#[test]
	fn test_qualified_name() {
		assert_eq!(qualified_name(&["DBO", "TABLE1"]), "\"DBO\".\"TABLE1\"");
	}
}
