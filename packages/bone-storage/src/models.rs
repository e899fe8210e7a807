use time::OffsetDateTime;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct WordRow {
	pub id: i64,
	pub word: String,
}

#[derive(Debug, Clone, Copy, sqlx::FromRow)]
pub struct RelevanceRow {
	pub page_id: i64,
	pub word_id: i64,
	pub score: i32,
}

/// A page joined with its domain, as consumed by result hydration.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PageRow {
	pub page_id: i64,
	pub domain: String,
	pub https: bool,
	pub path: String,
	pub title: Option<String>,
	pub meta_desc: Option<String>,
	pub crawl_date: Option<OffsetDateTime>,
	pub category_id: Option<i64>,
}
