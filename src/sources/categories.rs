use crate::state::CategoryNode;

/// What: Decode the category payload.
///
/// Inputs:
/// - `body`: JSON array of categories, either nested roots or a flat list with `parentId`
///
/// Output:
/// - Category nodes in payload order.
///
/// # Errors
/// - Returns `Err` when the body is not a JSON array of categories
pub fn parse_categories(body: &str) -> super::Result<Vec<CategoryNode>> {
    let nodes: Vec<CategoryNode> = serde_json::from_str(body)?;
    tracing::debug!(roots = nodes.len(), "category payload decoded");
    Ok(nodes)
}
