use sqlx::PgExecutor;

use crate::{Result, models::PageRow};

/// Fetches display metadata for a batch of pages, joined with the owning
/// domain. Row order is unspecified; callers reorder by their own ID list.
pub async fn pages_by_ids<'e, E>(executor: E, page_ids: &[i64]) -> Result<Vec<PageRow>>
where
	E: PgExecutor<'e>,
{
	if page_ids.is_empty() {
		return Ok(Vec::new());
	}

	let rows = sqlx::query_as::<_, PageRow>(
		"\
SELECT
\tpage.id AS page_id,
\tdomain.name AS domain,
\tdomain.https,
\tpage.path,
\tpage.title,
\tpage.meta_desc,
\tpage.crawl_date,
\tdomain.category_id
FROM page
JOIN domain ON page.domain_id = domain.id
WHERE page.id = ANY($1)",
	)
	.bind(page_ids)
	.fetch_all(executor)
	.await?;

	Ok(rows)
}

pub async fn category_name<'e, E>(executor: E, category_id: i64) -> Result<Option<String>>
where
	E: PgExecutor<'e>,
{
	let name: Option<(String,)> =
		sqlx::query_as("SELECT name FROM category WHERE id = $1 LIMIT 1")
			.bind(category_id)
			.fetch_optional(executor)
			.await?;

	Ok(name.map(|(name,)| name))
}
