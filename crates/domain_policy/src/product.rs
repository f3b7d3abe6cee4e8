//! Policy product catalog access
//!
//! The catalog itself (pricing, eligibility, content) is owned by another
//! system; the lifecycle engine only reads the fields purchase needs.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use core_kernel::{DomainPort, Money, PortError, ProductId};

/// A sellable policy product, as read from the external catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyProduct {
    pub id: ProductId,
    pub code: String,
    pub title: String,
    /// Premium charged on purchase
    pub premium: Money,
    /// Default policy term
    pub term_months: u32,
    pub is_active: bool,
}

/// Read port onto the external product catalog
#[async_trait]
pub trait CatalogPort: DomainPort {
    /// Retrieves a product by ID, or NotFound
    async fn get_product(&self, id: ProductId) -> Result<PolicyProduct, PortError>;
}

/// In-memory mock catalog for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    /// In-memory catalog
    #[derive(Debug, Default)]
    pub struct MockCatalogPort {
        products: Arc<RwLock<HashMap<ProductId, PolicyProduct>>>,
    }

    impl MockCatalogPort {
        /// Creates a new mock catalog
        pub fn new() -> Self {
            Self::default()
        }

        /// Adds a product
        pub async fn insert(&self, product: PolicyProduct) {
            self.products.write().await.insert(product.id, product);
        }
    }

    impl DomainPort for MockCatalogPort {}

    #[async_trait]
    impl CatalogPort for MockCatalogPort {
        async fn get_product(&self, id: ProductId) -> Result<PolicyProduct, PortError> {
            self.products
                .read()
                .await
                .get(&id)
                .cloned()
                .ok_or_else(|| PortError::not_found("PolicyProduct", id))
        }
    }
}
