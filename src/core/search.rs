use crate::domain::model::normalize_word;
use crate::domain::ports::{SearchCache, SearchDb};
use futures::future::try_join_all;
use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::hash::Hash;

/// Normalized words of a query, at most `word_max` of them.
pub fn query_words(search_query: &str, word_max: usize) -> Vec<String> {
    search_query
        .split_whitespace()
        .map(normalize_word)
        .filter(|w| !w.is_empty())
        .take(word_max)
        .collect()
}

/// Every run of 1..=`phrase_max` consecutive words, with its weight.
/// Longer phrases weigh more: a phrase of `k` words is worth `(10 + k) * k`.
pub fn weighted_phrases(words: &[String], phrase_max: usize) -> Vec<(String, usize)> {
    let mut phrases = Vec::new();
    for start in 0..words.len() {
        let longest = phrase_max.min(words.len() - start);
        for len in 1..=longest {
            phrases.push((words[start..start + len].join(" "), (10 + len) * len));
        }
    }
    phrases
}

pub trait ItemRepo<Tag, ItemRef, Item, DbError>: Sync
where
    ItemRef: Ord + Eq + Hash + Clone + Sync + Send + std::fmt::Debug,
    Item: Send,
    Tag: Clone + Send + std::fmt::Debug,
    DbError: Send,
{
    fn get_cache(&self) -> impl SearchCache<ItemRef, DbError>;
    fn get_db(&self) -> impl SearchDb<Tag, ItemRef, Item, DbError>;

    fn get_item_refs_for_phrase(
        &self,
        phrase: &str,
    ) -> impl Future<Output = Result<Vec<ItemRef>, DbError>> + Send {
        async move {
            let db = self.get_db();
            let tags = db.get_tags_from_phrase(phrase).await?;
            let listings =
                try_join_all(tags.into_iter().map(|tag| db.get_item_refs_from_tag(tag))).await?;
            let unique: HashSet<ItemRef> = listings.into_iter().flatten().collect();

            Ok(unique.into_iter().collect())
        }
    }

    /// Ranks refs by summed phrase weight and keeps the best-scoring ones.
    fn get_item_refs_search_query(
        &self,
        search_query: &str,
        word_max: usize,
        phrase_max: usize,
    ) -> impl Future<Output = Result<Vec<ItemRef>, DbError>> + Send {
        async move {
            let generation = self.get_cache().generation();
            let words = query_words(search_query, word_max);
            let phrases = weighted_phrases(&words, phrase_max);

            let listings = try_join_all(phrases.into_iter().map(|(phrase, weight)| async move {
                let refs = self.get_item_refs_for_phrase(&phrase).await?;
                Ok::<_, DbError>((refs, weight))
            }))
            .await?;

            let mut counter: HashMap<ItemRef, usize> = HashMap::new();
            for (refs, weight) in listings {
                for item_ref in refs {
                    *counter.entry(item_ref).or_insert(0) += weight;
                }
            }

            let max_pertinence = counter.values().copied().max().unwrap_or(0);
            let mut results: Vec<ItemRef> = counter
                .into_iter()
                .filter(|(_, weight)| *weight == max_pertinence)
                .map(|(item_ref, _)| item_ref)
                .collect();
            results.sort();

            self.get_cache()
                .cache_search(search_query, results.clone(), generation)
                .await?;
            Ok(results)
        }
    }

    /// One page of items for a query, plus the total number of matches.
    /// Pages start at 1.
    fn get_items_for_search(
        &self,
        search_query: &str,
        word_max: usize,
        phrase_max: usize,
        result_max: usize,
        page_num: usize,
    ) -> impl Future<Output = Result<(Vec<Item>, usize), DbError>> + Send {
        async move {
            let normalized = query_words(search_query, word_max).join(" ");
            let cached = self.get_cache().get_cached_search(&normalized).await?;
            let results = if cached.is_empty() {
                self.get_item_refs_search_query(&normalized, word_max, phrase_max)
                    .await?
            } else {
                tracing::debug!("Search cache hit for '{}'", normalized);
                cached
            };
            let total_results = results.len();

            // A page too far out to address is simply past the end.
            let Some(offset) = page_num.saturating_sub(1).checked_mul(result_max) else {
                return Ok((Vec::new(), total_results));
            };

            let db = self.get_db();
            let futures = results
                .into_iter()
                .skip(offset)
                .take(result_max)
                .map(|item_ref| db.get_item_from_ref(item_ref))
                .collect::<Vec<_>>();

            Ok((try_join_all(futures).await?, total_results))
        }
    }
}
