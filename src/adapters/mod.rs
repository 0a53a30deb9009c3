// Adapters layer: concrete implementations of the domain ports.

pub mod local;
pub mod memory;
pub mod pow;

use crate::config::Settings;
use crate::core::search::ItemRepo;
use crate::core::services::register_alias;
use crate::domain::model::PostEntity;
use crate::domain::ports::{InsertHandle, SearchCache, SearchDb};
use crate::utils::error::{Result, RibbitError};
use memory::{MemoryCache, MemoryStore};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Repository {
    pub db: MemoryStore,
    pub cache: MemoryCache,
}

impl Repository {
    pub fn new(db: MemoryStore, cache: MemoryCache) -> Self {
        Self { db, cache }
    }

    /// Builds the store described by the settings, loads its snapshot and
    /// registers the configured aliases.
    pub async fn open(settings: &Settings) -> Result<Self> {
        let db = match &settings.storage.snapshot_path {
            Some(path) => MemoryStore::with_snapshot(path),
            None => MemoryStore::new(),
        };
        let cache = MemoryCache::new(
            Duration::from_secs(settings.search.cache_ttl_secs),
            Duration::from_secs(settings.pow.replay_window_secs),
        );
        let repo = Self::new(db, cache);

        let loaded = repo.db.load_snapshot().await?;
        if loaded > 0 {
            tracing::info!("📂 Loaded {} posts from snapshot", loaded);
        }

        for (phrase, tags) in &settings.search.aliases {
            register_alias(&repo, phrase, tags.clone()).await?;
        }

        Ok(repo)
    }
}

impl ItemRepo<String, String, PostEntity, RibbitError> for Repository {
    fn get_cache(&self) -> impl SearchCache<String, RibbitError> {
        self.cache.clone()
    }

    fn get_db(&self) -> impl SearchDb<String, String, PostEntity, RibbitError> {
        self.db.clone()
    }
}

impl InsertHandle<String, String, PostEntity, RibbitError> for Repository {
    async fn insert_tags(&self, tags: Vec<String>, item_ref: String) -> Result<()> {
        self.db.index_tags(tags, item_ref).await;
        self.cache.invalidate().await;
        Ok(())
    }

    async fn insert_item(&self, item: PostEntity) -> Result<()> {
        self.db.insert_post(item).await
    }

    async fn insert_alias(&self, phrase: String, tags: Vec<String>) -> Result<()> {
        self.db.add_alias(phrase, tags).await;
        self.cache.invalidate().await;
        Ok(())
    }
}
