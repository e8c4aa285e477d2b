//! Seller service.

use std::sync::Arc;

use salesdesk_core::{Department, Seller};

use crate::dao::{DaoFactory, SellerDao};
use crate::error::{DataAccessError, DataAccessResult};

/// Front-end entry point for sellers.
#[derive(Clone)]
pub struct SellerService {
    dao: Arc<dyn SellerDao>,
}

impl SellerService {
    pub fn new(dao: Arc<dyn SellerDao>) -> Self {
        SellerService { dao }
    }

    /// Service over the factory's seller DAO.
    pub fn from_factory(factory: &DaoFactory) -> Self {
        SellerService::new(factory.seller_dao())
    }

    pub async fn find_all(&self) -> DataAccessResult<Vec<Seller>> {
        self.dao.find_all().await
    }

    pub async fn find_by_id(&self, id: i64) -> DataAccessResult<Option<Seller>> {
        self.dao.find_by_id(id).await
    }

    pub async fn find_all_by_department(
        &self,
        department: &Department,
    ) -> DataAccessResult<Vec<Seller>> {
        self.dao.find_all_by_department(department).await
    }

    /// Inserts a new seller or updates an existing one, by id presence.
    pub async fn save_or_update(&self, seller: &mut Seller) -> DataAccessResult<()> {
        if seller.id.is_none() {
            self.dao.insert(seller).await
        } else {
            self.dao.update(seller).await
        }
    }

    pub async fn remove(&self, seller: &Seller) -> DataAccessResult<()> {
        let id = seller
            .id
            .ok_or_else(|| DataAccessError::invalid("Seller", "remove requires an id"))?;
        self.dao.delete_by_id(id).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
