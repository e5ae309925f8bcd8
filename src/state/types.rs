//! Core value types used by the listing state and the catalog collaborators.

use serde::{Deserialize, Serialize};

/// Stable identifier of a category node.
pub type CategoryId = u64;

/// Stable identifier of a product.
pub type ProductId = u64;

/// Category node as delivered by the category retrieval endpoint.
///
/// The remote service returns roots with nested `children`; flat payloads carry
/// only `parent_id`. Both shapes deserialize into this type.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryNode {
    /// Unique category id.
    pub id: CategoryId,
    /// Display name.
    pub name: String,
    /// Parent id; `None` for roots.
    #[serde(default)]
    pub parent_id: Option<CategoryId>,
    /// Children in display order.
    #[serde(default)]
    pub children: Vec<CategoryNode>,
}

/// Minimal product summary shown in the listing grid.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Product id.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Unit price.
    pub price: f64,
    /// Category the product is filed under.
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    /// Category display name when the service includes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
    /// Long description when the service includes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// One page of products returned by the paginated retrieval endpoint.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    /// Products on this page in server order.
    #[serde(default)]
    pub content: Vec<Product>,
    /// Number of products matching the query across all pages.
    #[serde(default)]
    pub total_elements: u64,
    /// Zero-based page index echoed by the server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u64>,
    /// Page count computed by the server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<u64>,
}

/// Sort order requested from the retrieval service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortOption {
    /// Server default order; no sort key is sent.
    #[default]
    Relevance,
    /// Cheapest first.
    PriceLowHigh,
    /// Most expensive first.
    PriceHighLow,
    /// Name ascending.
    NameAz,
    /// Name descending.
    NameZa,
    /// Highest average rating first.
    RatingHighLow,
}

impl SortOption {
    /// What: Return the wire key sent as the `sort` query parameter.
    ///
    /// Inputs: none
    ///
    /// Output: `Some(key)` for explicit orders; `None` for [`SortOption::Relevance`].
    #[must_use]
    pub const fn as_query_key(self) -> Option<&'static str> {
        match self {
            Self::Relevance => None,
            Self::PriceLowHigh => Some("price-low-high"),
            Self::PriceHighLow => Some("price-high-low"),
            Self::NameAz => Some("name-a-z"),
            Self::NameZa => Some("name-z-a"),
            Self::RatingHighLow => Some("rating-high-low"),
        }
    }

    /// Return the string key used in settings files and on the command line.
    #[must_use]
    pub const fn as_config_key(self) -> &'static str {
        match self.as_query_key() {
            Some(key) => key,
            None => "relevance",
        }
    }

    /// What: Parse a sort option from its settings key or an alias.
    ///
    /// Inputs: `s` config string (case-insensitive, `_` and `-` interchangeable).
    ///
    /// Output: `Some(SortOption)` on recognized value; `None` otherwise.
    #[must_use]
    pub fn from_config_key(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "relevance" | "default" | "none" => Some(Self::Relevance),
            "price-low-high" | "price-asc" | "cheapest" => Some(Self::PriceLowHigh),
            "price-high-low" | "price-desc" => Some(Self::PriceHighLow),
            "name-a-z" | "name-asc" | "alphabetical" => Some(Self::NameAz),
            "name-z-a" | "name-desc" => Some(Self::NameZa),
            "rating-high-low" | "rating" | "top-rated" => Some(Self::RatingHighLow),
            _ => None,
        }
    }
}

/// Flattened request for one page of results.
///
/// Optional fields are `None` when the corresponding filter is inactive so the
/// service can tell "not filtering" apart from "filter at zero".
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QueryDescriptor {
    /// Zero-based page index.
    pub page: u64,
    /// Page size.
    pub size: u64,
    /// Name substring.
    pub name: Option<String>,
    /// Lower price bound.
    pub min_price: Option<f64>,
    /// Upper price bound.
    pub max_price: Option<f64>,
    /// Minimum average rating.
    pub min_rating: Option<u8>,
    /// Comma-joined size list.
    pub sizes: Option<String>,
    /// Every category id whose products match, ascending.
    pub category_ids: Option<Vec<CategoryId>>,
    /// Wire sort key.
    pub sort: Option<&'static str>,
}

/// Listing query sent to the background listing worker.
#[derive(Clone, Debug)]
pub struct QueryInput {
    /// Monotonic identifier used to correlate responses.
    pub id: u64,
    /// Request parameters.
    pub descriptor: QueryDescriptor,
}

/// Response corresponding to a prior [`QueryInput`].
#[derive(Clone, Debug)]
pub struct ListingResults {
    /// Echoed identifier from the originating query.
    pub id: u64,
    /// Page on success; error text on failure.
    pub outcome: Result<ProductPage, String>,
}

/// Rating lookups requested for the products of one page.
#[derive(Clone, Debug)]
pub struct RatingRequest {
    /// Query id of the page the products belong to.
    pub query_id: u64,
    /// Products to look up.
    pub product_ids: Vec<ProductId>,
}

/// Average ratings resolved for a [`RatingRequest`].
#[derive(Clone, Debug)]
pub struct RatingResults {
    /// Echoed query id.
    pub query_id: u64,
    /// One entry per requested product; failed lookups carry `0.0`.
    pub ratings: Vec<(ProductId, f64)>,
}
