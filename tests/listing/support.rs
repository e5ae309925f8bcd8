//! In-memory catalog used by the listing integration tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use vitrine::app::{Channels, SessionOptions, open_listing};
use vitrine::sources::{CatalogSource, Result};
use vitrine::state::{
    CategoryId, CategoryNode, ListingState, Product, ProductId, ProductPage, QueryDescriptor,
};

/// Leaf categories products are spread across.
const LEAVES: [CategoryId; 5] = [3, 4, 6, 7, 8];

/// Catalog that filters, sorts and paginates like the storefront API.
pub struct MemoryCatalog {
    categories: Vec<CategoryNode>,
    products: Mutex<Vec<Product>>,
    ratings: HashMap<ProductId, f64>,
    /// Number of upcoming page requests that fail.
    failing_pages: AtomicUsize,
    /// Queries whose name filter equals the key sleep for the given duration.
    slow_names: HashMap<String, Duration>,
    /// Every page request in arrival order.
    requests: Mutex<Vec<QueryDescriptor>>,
}

impl MemoryCatalog {
    /// Sample tree `Sports(1) -> {Football(2) -> {3, 4}, Tennis(5) -> {6, 7}}` plus `Accessories(8)`,
    /// with `count` products priced `10 * id` and rated for odd ids only.
    #[allow(clippy::cast_precision_loss)]
    pub fn with_products(count: u64) -> Self {
        let products = (1..=count)
            .map(|id| Product {
                id,
                name: format!("Item {id:02}"),
                price: id as f64 * 10.0,
                category_id: Some(LEAVES[usize::try_from(id).unwrap_or(0) % LEAVES.len()]),
                category_name: None,
                description: None,
            })
            .collect();
        let ratings = (1..=count)
            .filter(|id| id % 2 == 1)
            .map(|id| (id, 4.0))
            .collect();
        Self {
            categories: sample_categories(),
            products: Mutex::new(products),
            ratings,
            failing_pages: AtomicUsize::new(0),
            slow_names: HashMap::new(),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Delay responses to queries filtering by `name`.
    pub fn slow_for(mut self, name: &str, delay: Duration) -> Self {
        self.slow_names.insert(name.to_string(), delay);
        self
    }

    /// Make the next `n` page requests fail.
    pub fn fail_next_pages(&self, n: usize) {
        self.failing_pages.store(n, Ordering::SeqCst);
    }

    /// Keep only the first `n` products.
    pub fn shrink_to(&self, n: usize) {
        self.products.lock().expect("products lock").truncate(n);
    }

    /// Page requests received so far.
    pub fn requests(&self) -> Vec<QueryDescriptor> {
        self.requests.lock().expect("requests lock").clone()
    }
}

fn node(id: CategoryId, name: &str, children: Vec<CategoryNode>) -> CategoryNode {
    CategoryNode {
        id,
        name: name.to_string(),
        parent_id: None,
        children,
    }
}

/// Nested category payload shared by the tests.
pub fn sample_categories() -> Vec<CategoryNode> {
    vec![
        node(
            1,
            "Sports",
            vec![
                node(2, "Football", vec![node(3, "Boots", vec![]), node(4, "Balls", vec![])]),
                node(5, "Tennis", vec![node(6, "Rackets", vec![]), node(7, "Strings", vec![])]),
            ],
        ),
        node(8, "Accessories", vec![]),
    ]
}

impl CatalogSource for MemoryCatalog {
    async fn fetch_page(&self, query: &QueryDescriptor) -> Result<ProductPage> {
        self.requests.lock().expect("requests lock").push(query.clone());
        if let Some(delay) = query.name.as_ref().and_then(|n| self.slow_names.get(n)) {
            tokio::time::sleep(*delay).await;
        }
        if self
            .failing_pages
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
        {
            return Err("HTTP 500 for /products/paginated".into());
        }
        let mut matches: Vec<Product> = self
            .products
            .lock()
            .expect("products lock")
            .iter()
            .filter(|p| {
                query.category_ids.as_ref().is_none_or(|ids| {
                    p.category_id.is_some_and(|c| ids.contains(&c))
                })
            })
            .filter(|p| {
                query
                    .name
                    .as_ref()
                    .is_none_or(|n| p.name.to_lowercase().contains(&n.to_lowercase()))
            })
            .filter(|p| query.min_price.is_none_or(|m| p.price >= m))
            .filter(|p| query.max_price.is_none_or(|m| p.price <= m))
            .filter(|p| {
                query
                    .min_rating
                    .is_none_or(|r| self.ratings.get(&p.id).copied().unwrap_or(0.0) >= f64::from(r))
            })
            .cloned()
            .collect();
        match query.sort {
            Some("price-low-high") => matches.sort_by(|a, b| a.price.total_cmp(&b.price)),
            Some("price-high-low") => matches.sort_by(|a, b| b.price.total_cmp(&a.price)),
            Some("name-a-z") => matches.sort_by(|a, b| a.name.cmp(&b.name)),
            Some("name-z-a") => matches.sort_by(|a, b| b.name.cmp(&a.name)),
            _ => {}
        }
        let total = matches.len() as u64;
        let start = usize::try_from(query.page * query.size).unwrap_or(usize::MAX);
        let content = matches
            .into_iter()
            .skip(start)
            .take(usize::try_from(query.size).unwrap_or(usize::MAX))
            .collect();
        Ok(ProductPage {
            content,
            total_elements: total,
            page: Some(query.page),
            total_pages: Some(total.div_ceil(query.size.max(1))),
        })
    }

    async fn fetch_categories(&self) -> Result<Vec<CategoryNode>> {
        Ok(self.categories.clone())
    }

    async fn fetch_rating(&self, id: ProductId) -> Result<f64> {
        self.ratings
            .get(&id)
            .copied()
            .ok_or_else(|| format!("HTTP 404 for rating of {id}").into())
    }

    async fn fetch_max_price(&self) -> Result<Option<f64>> {
        Ok(self
            .products
            .lock()
            .expect("products lock")
            .iter()
            .map(|p| p.price)
            .reduce(f64::max))
    }
}

/// Open a listing session against `catalog` with 12 results per page.
pub async fn open_session(catalog: MemoryCatalog) -> (Arc<MemoryCatalog>, ListingState, Channels) {
    let catalog = Arc::new(catalog);
    let app = open_listing(catalog.as_ref(), &SessionOptions::default())
        .await
        .expect("open listing");
    let channels = Channels::new(Arc::clone(&catalog));
    (catalog, app, channels)
}

/// Upper bound for settling in tests.
pub const SETTLE: Duration = Duration::from_secs(2);
