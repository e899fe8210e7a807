use std::collections::HashMap;

use tracing::warn;

use bone_domain::{display, escape::escape_html, query};
use bone_storage::models::{PageRow, RelevanceRow};

use crate::{Error, Result, SearchService};

/// Placeholder category label emitted when enrichment is unavailable.
const UNKNOWN_CATEGORY: &str = "?";

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SearchRequest {
	pub terms: String,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SearchResult {
	pub title: String,
	pub https: bool,
	pub domain: String,
	pub path: String,
	pub meta_desc: Option<String>,
	pub crawl_date: Option<String>,
	pub category: String,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SearchResponse {
	pub results: Vec<SearchResult>,
}

impl SearchService {
	/// Resolves a free-text query into a ranked, capped list of page records.
	///
	/// Pipeline: tokenize, resolve terms to word IDs in one batch, aggregate
	/// per-page scores across the resolved set, rank, then hydrate the top
	/// pages with display metadata. No state outlives the call.
	pub async fn search(&self, req: SearchRequest) -> Result<SearchResponse> {
		let query_text = req.terms.trim();

		if query_text.is_empty() {
			return Err(Error::InvalidRequest {
				message: "Query terms must be non-empty.".to_string(),
			});
		}

		let terms = query::tokenize(query_text);

		if terms.is_empty() {
			return Err(Error::InvalidRequest {
				message: "Query contains no searchable terms.".to_string(),
			});
		}

		let resolved = self.index.terms.lookup(&terms).await?;

		// A query where nothing resolves is user error, distinct from a query
		// that resolves but matches no pages.
		if resolved.is_empty() {
			return Err(Error::NoResults {
				message: "None of the query terms is indexed.".to_string(),
			});
		}

		// Distinct terms may collapse onto the same word ID; resolution hands
		// the aggregator a set.
		let mut word_ids = resolved.iter().map(|row| row.id).collect::<Vec<_>>();

		word_ids.sort_unstable();
		word_ids.dedup();

		let relevance = self.index.relevance.lookup(&word_ids).await?;
		let scores = aggregate_scores(&relevance);
		let ranked = rank_pages(&scores, self.cfg.search.result_limit as usize);
		let results = self.hydrate(&ranked).await?;

		tracing::debug!(
			terms = terms.len(),
			resolved = word_ids.len(),
			ranked = ranked.len(),
			results = results.len(),
			"Search completed."
		);

		Ok(SearchResponse { results })
	}

	/// Fetches metadata for the ranked pages in one batch and builds result
	/// records in ranking order. Pages with incomplete metadata are dropped
	/// individually; the rest of the batch is unaffected.
	async fn hydrate(&self, page_ids: &[i64]) -> Result<Vec<SearchResult>> {
		if page_ids.is_empty() {
			return Ok(Vec::new());
		}

		let rows = self.index.metadata.pages(page_ids).await?;
		let mut by_id =
			rows.into_iter().map(|row| (row.page_id, row)).collect::<HashMap<_, _>>();
		let mut results = Vec::with_capacity(page_ids.len());

		for &page_id in page_ids {
			let Some(row) = by_id.remove(&page_id) else {
				warn!(page_id, "Page metadata is missing; dropping result.");

				continue;
			};

			if let Some(result) = self.build_result(row).await {
				results.push(result);
			}
		}

		Ok(results)
	}

	async fn build_result(&self, row: PageRow) -> Option<SearchResult> {
		let title = match row.title.as_deref().map(str::trim) {
			Some(title) if !title.is_empty() => title,
			_ => {
				warn!(page_id = row.page_id, "Page has no title; dropping result.");

				return None;
			},
		};

		if row.domain.trim().is_empty() || row.path.trim().is_empty() {
			warn!(page_id = row.page_id, "Page is missing its domain or path; dropping result.");

			return None;
		}

		let category = self.resolve_category(row.page_id, row.category_id).await;

		Some(SearchResult {
			title: escape_html(title),
			https: row.https,
			domain: row.domain.clone(),
			path: row.path.clone(),
			meta_desc: row.meta_desc.as_deref().map(escape_html),
			crawl_date: row.crawl_date.and_then(display::format_crawl_date),
			category,
		})
	}

	/// Category enrichment is best-effort. An absent identifier, a lookup
	/// miss, or a store failure all fall back to the placeholder label; they
	/// never fail the record.
	async fn resolve_category(&self, page_id: i64, category_id: Option<i64>) -> String {
		let Some(category_id) = category_id else {
			return UNKNOWN_CATEGORY.to_string();
		};

		match self.index.metadata.category(category_id).await {
			Ok(Some(name)) => escape_html(&name),
			Ok(None) => UNKNOWN_CATEGORY.to_string(),
			Err(err) => {
				warn!(
					error = %err,
					page_id,
					category_id,
					"Category lookup failed; using placeholder."
				);

				UNKNOWN_CATEGORY.to_string()
			},
		}
	}
}

/// Sums partial scores per page across every resolved word ID.
fn aggregate_scores(rows: &[RelevanceRow]) -> HashMap<i64, i64> {
	let mut scores = HashMap::new();

	for row in rows {
		*scores.entry(row.page_id).or_insert(0_i64) += i64::from(row.score);
	}

	scores
}

/// Orders pages by descending total score, ties broken by ascending page ID so
/// unchanged data always ranks identically, then caps the list at `limit`.
fn rank_pages(scores: &HashMap<i64, i64>, limit: usize) -> Vec<i64> {
	let mut ranked =
		scores.iter().map(|(&page_id, &score)| (page_id, score)).collect::<Vec<_>>();

	ranked.sort_unstable_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
	ranked.truncate(limit);

	ranked.into_iter().map(|(page_id, _)| page_id).collect()
}
