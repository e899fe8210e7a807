pub mod search;

mod error;
mod index;

use std::{future::Future, pin::Pin, sync::Arc};

pub use error::{Error, Result};
pub use index::PgSearchIndex;
pub use search::{SearchRequest, SearchResponse, SearchResult};

use bone_config::Config;
use bone_storage::{
	db::Db,
	models::{PageRow, RelevanceRow, WordRow},
};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Maps query terms to indexed word IDs.
pub trait TermIndex
where
	Self: Send + Sync,
{
	/// Batched exact-match lookup. Terms with no indexed word are simply
	/// absent from the result.
	fn lookup<'a>(
		&'a self,
		terms: &'a [String],
	) -> BoxFuture<'a, color_eyre::Result<Vec<WordRow>>>;
}

/// Serves per-page partial scores for a set of word IDs.
pub trait RelevanceIndex
where
	Self: Send + Sync,
{
	fn lookup<'a>(
		&'a self,
		word_ids: &'a [i64],
	) -> BoxFuture<'a, color_eyre::Result<Vec<RelevanceRow>>>;
}

/// Serves display metadata for ranked pages.
pub trait MetadataStore
where
	Self: Send + Sync,
{
	fn pages<'a>(
		&'a self,
		page_ids: &'a [i64],
	) -> BoxFuture<'a, color_eyre::Result<Vec<PageRow>>>;

	fn category<'a>(
		&'a self,
		category_id: i64,
	) -> BoxFuture<'a, color_eyre::Result<Option<String>>>;
}

#[derive(Clone)]
pub struct SearchIndex {
	pub terms: Arc<dyn TermIndex>,
	pub relevance: Arc<dyn RelevanceIndex>,
	pub metadata: Arc<dyn MetadataStore>,
}
impl SearchIndex {
	pub fn new(
		terms: Arc<dyn TermIndex>,
		relevance: Arc<dyn RelevanceIndex>,
		metadata: Arc<dyn MetadataStore>,
	) -> Self {
		Self { terms, relevance, metadata }
	}

	pub fn postgres(db: Db) -> Self {
		let index = Arc::new(PgSearchIndex { db });

		Self { terms: index.clone(), relevance: index.clone(), metadata: index }
	}
}

pub struct SearchService {
	pub cfg: Config,
	pub index: SearchIndex,
}
impl SearchService {
	pub fn new(cfg: Config, db: Db) -> Self {
		Self { cfg, index: SearchIndex::postgres(db) }
	}

	pub fn with_index(cfg: Config, index: SearchIndex) -> Self {
		Self { cfg, index }
	}
}
