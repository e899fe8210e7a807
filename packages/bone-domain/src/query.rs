use std::collections::HashSet;

/// Splits raw query text into normalized lookup terms.
///
/// Tokens are split on whitespace runs, lowercased, and stripped of leading and
/// trailing non-alphanumeric characters so that punctuation variants collapse
/// onto the same indexed word. Duplicates are removed while preserving
/// first-seen order; index lookups operate on a term set.
pub fn tokenize(query: &str) -> Vec<String> {
	let mut seen = HashSet::new();
	let mut terms = Vec::new();

	for token in query.split_whitespace() {
		let term = token
			.trim_matches(|c: char| !c.is_alphanumeric())
			.to_lowercase();

		if term.is_empty() {
			continue;
		}
		if seen.insert(term.clone()) {
			terms.push(term);
		}
	}

	terms
}
