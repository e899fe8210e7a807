use bone_storage::{
	db::Db,
	models::{PageRow, RelevanceRow, WordRow},
	pages, words,
};

use crate::{BoxFuture, MetadataStore, RelevanceIndex, TermIndex};

/// Postgres-backed implementation of the index collaborators. Every lookup
/// borrows a connection from the pool for the duration of one batched query.
pub struct PgSearchIndex {
	pub db: Db,
}
impl TermIndex for PgSearchIndex {
	fn lookup<'a>(
		&'a self,
		terms: &'a [String],
	) -> BoxFuture<'a, color_eyre::Result<Vec<WordRow>>> {
		Box::pin(async move { Ok(words::resolve_terms(&self.db.pool, terms).await?) })
	}
}
impl RelevanceIndex for PgSearchIndex {
	fn lookup<'a>(
		&'a self,
		word_ids: &'a [i64],
	) -> BoxFuture<'a, color_eyre::Result<Vec<RelevanceRow>>> {
		Box::pin(async move { Ok(words::relevance_for_words(&self.db.pool, word_ids).await?) })
	}
}
impl MetadataStore for PgSearchIndex {
	fn pages<'a>(
		&'a self,
		page_ids: &'a [i64],
	) -> BoxFuture<'a, color_eyre::Result<Vec<PageRow>>> {
		Box::pin(async move { Ok(pages::pages_by_ids(&self.db.pool, page_ids).await?) })
	}

	fn category<'a>(
		&'a self,
		category_id: i64,
	) -> BoxFuture<'a, color_eyre::Result<Option<String>>> {
		Box::pin(async move { Ok(pages::category_name(&self.db.pool, category_id).await?) })
	}
}
