mod concurrency_tests;

use std::sync::Arc;

use super::RentalService;
use crate::repositories::InMemoryStore;

pub(super) type Engine = RentalService<InMemoryStore, InMemoryStore, InMemoryStore>;

pub(super) fn engine(store: &Arc<InMemoryStore>) -> Engine {
    RentalService::new(store.clone(), store.clone(), store.clone())
}
