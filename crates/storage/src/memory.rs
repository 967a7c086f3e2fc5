//! In-memory job card store.

use std::sync::Arc;
use async_trait::async_trait;
use depot_core::{JobCard, JobCardFilter, JobCardId};
use tokio::sync::RwLock;
use super::{JobCardStore, Result};

/// Insertion-ordered store held in memory.
///
/// Updates keep a card's original position, so listings are stable.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    cards: Arc<RwLock<Vec<JobCard>>>,
}

impl MemoryStorage {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-loaded with cards.
    pub fn with_cards(cards: Vec<JobCard>) -> Self {
        Self {
            cards: Arc::new(RwLock::new(cards)),
        }
    }

    /// Number of stored cards.
    pub async fn len(&self) -> usize {
        self.cards.read().await.len()
    }

    /// Whether the store is empty.
    pub async fn is_empty(&self) -> bool {
        self.cards.read().await.is_empty()
    }
}

#[async_trait]
impl JobCardStore for MemoryStorage {
    async fn save_job_card(&mut self, card: &JobCard) -> Result<()> {
        let mut cards = self.cards.write().await;
        match cards.iter_mut().find(|c| c.id == card.id) {
            Some(existing) => *existing = card.clone(),
            None => cards.push(card.clone()),
        }
        Ok(())
    }

    async fn load_job_card(&self, id: JobCardId) -> Result<Option<JobCard>> {
        Ok(self.cards.read().await.iter().find(|c| c.id == id).cloned())
    }

    async fn list_job_cards(&self, filter: &JobCardFilter) -> Result<Vec<JobCard>> {
        Ok(self
            .cards
            .read()
            .await
            .iter()
            .filter(|c| filter.matches(c))
            .cloned()
            .collect())
    }

    async fn delete_job_card(&mut self, id: JobCardId) -> Result<()> {
        self.cards.write().await.retain(|c| c.id != id);
        Ok(())
    }
}
