//! Per-product write locks.
//!
//! Update and delete both read a product before writing it. Holding the
//! product's lock across that read-then-write keeps two requests for the
//! same product from interleaving, while different products proceed in
//! parallel.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};

use shop_catalog_core::ProductId;

/// Lock table keyed by product ID.
#[derive(Debug, Default)]
pub struct RecordLocks {
    locks: Mutex<HashMap<ProductId, Arc<Mutex<()>>>>,
}

impl RecordLocks {
    /// Create an empty lock table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to one product.
    ///
    /// The returned guard releases the lock when dropped.
    pub async fn acquire(&self, id: ProductId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().await;
            // Entries only the table still holds are idle; drop them so the
            // table tracks in-flight products rather than every product ever written.
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            Arc::clone(locks.entry(id).or_insert_with(|| Arc::new(Mutex::new(()))))
        };
        lock.lock_owned().await
    }

    /// Number of products with a live lock entry.
    pub async fn tracked(&self) -> usize {
        self.locks.lock().await.len()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn test_same_product_is_exclusive() {
        let locks = Arc::new(RecordLocks::new());
        let guard = locks.acquire(ProductId::new(1)).await;

        let contender = {
            let locks = Arc::clone(&locks);
            tokio::spawn(async move {
                let _guard = locks.acquire(ProductId::new(1)).await;
            })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!contender.is_finished());

        drop(guard);
        tokio::time::timeout(Duration::from_secs(1), contender)
            .await
            .expect("contender acquires after release")
            .expect("contender task");
    }

    #[tokio::test]
    async fn test_different_products_do_not_block() {
        let locks = RecordLocks::new();
        let _first = locks.acquire(ProductId::new(1)).await;

        tokio::time::timeout(Duration::from_secs(1), locks.acquire(ProductId::new(2)))
            .await
            .expect("second product is free");
    }

    #[tokio::test]
    async fn test_idle_entries_are_pruned() {
        let locks = RecordLocks::new();
        for id in 1..=5 {
            let _guard = locks.acquire(ProductId::new(id)).await;
        }

        let _guard = locks.acquire(ProductId::new(6)).await;
        assert_eq!(locks.tracked().await, 1);
    }
}
