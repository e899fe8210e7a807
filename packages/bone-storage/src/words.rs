use sqlx::PgExecutor;

use crate::{
	Result,
	models::{RelevanceRow, WordRow},
};

/// Resolves query terms to word IDs in one batched lookup. Terms that are not
/// indexed are simply absent from the result.
pub async fn resolve_terms<'e, E>(executor: E, terms: &[String]) -> Result<Vec<WordRow>>
where
	E: PgExecutor<'e>,
{
	if terms.is_empty() {
		return Ok(Vec::new());
	}

	let rows = sqlx::query_as::<_, WordRow>(
		"\
SELECT
\tid,
\tword
FROM word
WHERE word = ANY($1)",
	)
	.bind(terms)
	.fetch_all(executor)
	.await?;

	Ok(rows)
}

/// Fetches every per-page partial score for the given word IDs in one batched
/// lookup.
pub async fn relevance_for_words<'e, E>(executor: E, word_ids: &[i64]) -> Result<Vec<RelevanceRow>>
where
	E: PgExecutor<'e>,
{
	if word_ids.is_empty() {
		return Ok(Vec::new());
	}

	let rows = sqlx::query_as::<_, RelevanceRow>(
		"\
SELECT
\tpage_id,
\tword_id,
\tscore
FROM word_relevance
WHERE word_id = ANY($1)",
	)
	.bind(word_ids)
	.fetch_all(executor)
	.await?;

	Ok(rows)
}
