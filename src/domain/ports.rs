use crate::domain::model::CHALLENGE_COUNT;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::future::Future;

/// Remembers the ranked refs of a query for a while.
pub trait SearchCache<ItemRef, DbError>: Sync + Send {
    /// Moves forward every time cached searches are dropped.
    fn generation(&self) -> u64;

    /// Stores `results` unless the cache was invalidated since `generation`
    /// was read, so a search racing a publish cannot cache stale refs.
    fn cache_search(
        &self,
        search_query: &str,
        results: Vec<ItemRef>,
        generation: u64,
    ) -> impl Future<Output = std::result::Result<(), DbError>> + Send;

    /// An empty result means "not cached".
    fn get_cached_search(
        &self,
        search_query: &str,
    ) -> impl Future<Output = std::result::Result<Vec<ItemRef>, DbError>> + Send;
}

pub trait SearchDb<Tag, ItemRef, Item, DbError>: Sync + Send {
    fn get_item_refs_from_tag(
        &self,
        tag: Tag,
    ) -> impl Future<Output = std::result::Result<Vec<ItemRef>, DbError>> + Send;

    fn get_item_from_ref(
        &self,
        item_ref: ItemRef,
    ) -> impl Future<Output = std::result::Result<Item, DbError>> + Send;

    /// Resolves a phrase to its aliased tags, or to the phrase itself.
    fn get_tags_from_phrase(
        &self,
        phrase: &str,
    ) -> impl Future<Output = std::result::Result<Vec<Tag>, DbError>> + Send;
}

pub trait InsertHandle<Tag, ItemRef, Item, DbError>: Sync + Send
where
    ItemRef: Clone,
    Tag: Clone,
{
    fn insert_tags(
        &self,
        tags: Vec<Tag>,
        item_ref: ItemRef,
    ) -> impl Future<Output = std::result::Result<(), DbError>> + Send;

    fn insert_item(&self, item: Item)
        -> impl Future<Output = std::result::Result<(), DbError>> + Send;

    fn insert_alias(
        &self,
        phrase: String,
        tags: Vec<Tag>,
    ) -> impl Future<Output = std::result::Result<(), DbError>> + Send;
}

#[async_trait]
pub trait PowValidator: Send + Sync {
    /// True when every challenge is solved and none was spent before.
    async fn is_valid_pow(&self, challenges: &[String; CHALLENGE_COUNT]) -> bool;
}

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(&self, path: &str, data: &[u8]) -> impl Future<Output = Result<()>> + Send;
}
