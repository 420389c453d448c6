//! List query encoding for the simple-REST dialect the backend speaks.
//!
//! A list request carries three JSON-encoded query parameters:
//! `sort=["id","ASC"]`, `range=[0,24]` (inclusive bounds) and `filter={}`.
//! The total count comes back in a `Content-Range: <from>-<to>/<total>`
//! header.

use serde_json::json;
use url::form_urlencoded;

/// Sort direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortOrder {
	#[default]
	Asc,
	Desc,
}

impl SortOrder {
	fn as_str(self) -> &'static str {
		match self {
			SortOrder::Asc => "ASC",
			SortOrder::Desc => "DESC",
		}
	}
}

/// Sort field and direction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sort {
	pub field: String,
	pub order: SortOrder,
}

impl Sort {
	/// Sort after clicking the `field` column header: a new column starts
	/// ascending, the current one flips direction.
	pub fn toggled(&self, field: &str) -> Sort {
		let order = match (self.field == field, self.order) {
			(true, SortOrder::Asc) => SortOrder::Desc,
			_ => SortOrder::Asc,
		};
		Sort {
			field: field.to_string(),
			order,
		}
	}

	/// Header marker for `field`: an arrow on the sorted column.
	pub fn marker(&self, field: &str) -> &'static str {
		match (self.field == field, self.order) {
			(false, _) => "",
			(true, SortOrder::Asc) => " \u{25b2}",
			(true, SortOrder::Desc) => " \u{25bc}",
		}
	}
}

impl Default for Sort {
	fn default() -> Self {
		Self {
			field: "id".to_string(),
			order: SortOrder::Asc,
		}
	}
}

/// Parameters of a list request.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ListParams {
	pub sort: Sort,
	/// Inclusive record range. `None` asks for everything.
	pub range: Option<(usize, usize)>,
}

impl ListParams {
	/// Sort ascending on `field`, no paging.
	pub fn sorted_by(field: &str) -> Self {
		Self {
			sort: Sort {
				field: field.to_string(),
				order: SortOrder::Asc,
			},
			..Self::default()
		}
	}

	/// Restrict to one page of `per_page` records, pages counted from 1.
	pub fn page(mut self, page: usize, per_page: usize) -> Self {
		let page = page.max(1);
		let start = (page - 1) * per_page;
		self.range = Some((start, (start + per_page).saturating_sub(1)));
		self
	}

	/// Replace the sort.
	pub fn with_sort(mut self, sort: Sort) -> Self {
		self.sort = sort;
		self
	}

	/// Encoded query string, without the leading `?`.
	pub fn to_query(&self) -> String {
		let mut query = form_urlencoded::Serializer::new(String::new());
		query.append_pair(
			"sort",
			&json!([self.sort.field, self.sort.order.as_str()]).to_string(),
		);
		if let Some((start, end)) = self.range {
			query.append_pair("range", &json!([start, end]).to_string());
		}
		query.append_pair("filter", "{}");
		query.finish()
	}
}

/// One page of a list response.
#[derive(Clone, Debug, PartialEq)]
pub struct ListPage<T> {
	pub records: Vec<T>,
	/// Total records on the backend, from `Content-Range` when present.
	pub total: usize,
}

/// Extracts the total from a `Content-Range` header value such as
/// `0-24/319` or `items 0-24/319`.
pub fn parse_content_range(header: &str) -> Option<usize> {
	header.rsplit_once('/')?.1.trim().parse().ok()
}

#[cfg(test)]
mod tests {
	use super::*;

	fn decoded(query: &str) -> Vec<(String, String)> {
		form_urlencoded::parse(query.as_bytes())
			.map(|(k, v)| (k.into_owned(), v.into_owned()))
			.collect()
	}

	#[test]
	fn encodes_sort_and_empty_filter() {
		let pairs = decoded(&ListParams::sorted_by("id").to_query());
		assert_eq!(
			pairs,
			vec![
				("sort".to_string(), r#"["id","ASC"]"#.to_string()),
				("filter".to_string(), "{}".to_string()),
			]
		);
	}

	#[test]
	fn encodes_inclusive_page_range() {
		let params = ListParams::sorted_by("tag").page(2, 25);
		assert_eq!(params.range, Some((25, 49)));
		let pairs = decoded(&params.to_query());
		assert!(pairs.contains(&("range".to_string(), "[25,49]".to_string())));
	}

	#[test]
	fn encodes_descending_sort() {
		let sort = Sort::default().toggled("last_seen").toggled("last_seen");
		let pairs = decoded(&ListParams::default().with_sort(sort).to_query());
		assert!(pairs.contains(&("sort".to_string(), r#"["last_seen","DESC"]"#.to_string())));
	}

	#[test]
	fn header_clicks_cycle_sort_order() {
		let sort = Sort::default();
		let flipped = sort.toggled("id");
		assert_eq!(flipped.order, SortOrder::Desc);
		assert_eq!(flipped.toggled("id").order, SortOrder::Asc);
		let other = flipped.toggled("tag");
		assert_eq!((other.field.as_str(), other.order), ("tag", SortOrder::Asc));
		assert_eq!(other.marker("id"), "");
		assert_eq!(other.marker("tag"), " \u{25b2}");
	}

	#[test]
	fn query_is_url_encoded() {
		let query = ListParams::sorted_by("id").to_query();
		assert!(!query.contains('"'));
		assert!(!query.contains('['));
	}

	#[test]
	fn parses_content_range_totals() {
		assert_eq!(parse_content_range("0-24/319"), Some(319));
		assert_eq!(parse_content_range("items 0-9/10"), Some(10));
		assert_eq!(parse_content_range("0-0/0"), Some(0));
		assert_eq!(parse_content_range("garbage"), None);
		assert_eq!(parse_content_range("0-1/*"), None);
	}
}
