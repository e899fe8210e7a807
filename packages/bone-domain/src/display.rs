use time::{OffsetDateTime, format_description::BorrowedFormatItem, macros::format_description};

const CRAWL_DATE: &[BorrowedFormatItem<'static>] =
	format_description!("[year]-[month repr:short]-[day]");

/// Formats a crawl timestamp for display, e.g. `2024-Mar-07`.
///
/// Returns `None` when the value cannot be rendered; a missing or broken crawl
/// date is never an error for the caller.
pub fn format_crawl_date(crawl_date: OffsetDateTime) -> Option<String> {
	crawl_date.format(CRAWL_DATE).ok()
}
