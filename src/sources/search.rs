use crate::logic::query::to_query_pairs;
use crate::state::{ProductPage, QueryDescriptor};
use crate::util::percent_encode;

/// What: Build the paginated retrieval URL for a query.
///
/// Inputs:
/// - `base_url`: API base such as `http://localhost:8080/api`
/// - `query`: Descriptor for the requested page
///
/// Output:
/// - `{base}/products/paginated?page=..&size=..` with percent-encoded values.
#[must_use]
pub fn page_url(base_url: &str, query: &QueryDescriptor) -> String {
    let params = to_query_pairs(query)
        .into_iter()
        .map(|(k, v)| format!("{k}={}", percent_encode(&v)))
        .collect::<Vec<_>>()
        .join("&");
    format!(
        "{}/products/paginated?{params}",
        base_url.trim_end_matches('/')
    )
}

/// What: Decode a page response body.
///
/// Inputs:
/// - `body`: JSON text returned by the paginated endpoint
///
/// Output:
/// - `Ok(ProductPage)`; `Err` when the body is not a page object.
///
/// # Errors
/// - Returns `Err` when the JSON is malformed or misses required product fields
pub fn parse_page(body: &str) -> super::Result<ProductPage> {
    let page: ProductPage = serde_json::from_str(body)?;
    if let Some(total_pages) = page.total_pages {
        tracing::trace!(
            total_pages,
            page = ?page.page,
            items = page.content.len(),
            "page payload decoded"
        );
    }
    Ok(page)
}
