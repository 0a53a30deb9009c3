use crate::adapters::local::LocalStorage;
use crate::domain::model::PostEntity;
use crate::domain::ports::{SearchCache, SearchDb, Storage};
use crate::utils::error::{Result, RibbitError};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, RwLock};

#[derive(Debug, Default)]
struct StoreState {
    /// slug -> post
    posts: HashMap<String, PostEntity>,
    /// tag -> slugs
    tags: HashMap<String, BTreeSet<String>>,
    /// phrase -> tags
    aliases: HashMap<String, Vec<String>>,
}

#[derive(Debug, Clone)]
struct Snapshot {
    storage: LocalStorage,
    file_name: String,
}

/// Posts, tag index and aliases, kept in memory and optionally mirrored to a
/// JSON snapshot after every publish.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<RwLock<StoreState>>,
    snapshot: Option<Snapshot>,
    publish_lock: Arc<Mutex<()>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "posts.json".to_string());

        Self {
            snapshot: Some(Snapshot {
                storage: LocalStorage::new(base),
                file_name,
            }),
            ..Self::default()
        }
    }

    /// Loads and re-indexes the snapshot. A missing file is an empty store.
    pub async fn load_snapshot(&self) -> Result<usize> {
        let Some(snapshot) = &self.snapshot else {
            return Ok(0);
        };

        let bytes = match snapshot.storage.read_file(&snapshot.file_name).await {
            Ok(bytes) => bytes,
            Err(RibbitError::IoError(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(
                    "No snapshot at {}, starting empty",
                    snapshot.storage.base_path().join(&snapshot.file_name).display()
                );
                return Ok(0);
            }
            Err(e) => return Err(e),
        };
        let posts: Vec<PostEntity> = serde_json::from_slice(&bytes)?;

        let mut state = self.state.write().await;
        for post in &posts {
            for tag in post.search_tags() {
                state.tags.entry(tag).or_default().insert(post.slug.clone());
            }
            state.posts.insert(post.slug.clone(), post.clone());
        }
        Ok(posts.len())
    }

    async fn write_snapshot(snapshot: &Snapshot, mut posts: Vec<PostEntity>) -> Result<()> {
        posts.sort_by(|a, b| {
            a.published_at
                .cmp(&b.published_at)
                .then_with(|| a.slug.cmp(&b.slug))
        });

        let data = serde_json::to_vec_pretty(&posts)?;
        snapshot
            .storage
            .write_file(&snapshot.file_name, &data)
            .await?;
        tracing::debug!("Snapshot saved with {} posts", posts.len());
        Ok(())
    }

    pub async fn post_count(&self) -> usize {
        self.state.read().await.posts.len()
    }

    /// Fails with `Conflict` when the slug is taken. With a snapshot, the post
    /// only becomes visible once the snapshot holding it is on disk.
    pub async fn insert_post(&self, post: PostEntity) -> Result<()> {
        // 發文依序處理，快照內容永遠等於記憶體內容
        let _guard = self.publish_lock.lock().await;
        let current: Vec<PostEntity> = {
            let state = self.state.read().await;
            if state.posts.contains_key(&post.slug) {
                return Err(RibbitError::Conflict { what: post.slug });
            }
            match self.snapshot {
                Some(_) => state.posts.values().cloned().collect(),
                None => Vec::new(),
            }
        };

        if let Some(snapshot) = &self.snapshot {
            let mut posts = current;
            posts.push(post.clone());
            Self::write_snapshot(snapshot, posts).await?;
        }

        self.state
            .write()
            .await
            .posts
            .insert(post.slug.clone(), post);
        Ok(())
    }

    pub async fn index_tags(&self, tags: Vec<String>, slug: String) {
        let mut state = self.state.write().await;
        for tag in tags {
            state.tags.entry(tag).or_default().insert(slug.clone());
        }
    }

    pub async fn add_alias(&self, phrase: String, tags: Vec<String>) {
        let mut state = self.state.write().await;
        let entry = state.aliases.entry(phrase).or_default();
        for tag in tags {
            if !entry.contains(&tag) {
                entry.push(tag);
            }
        }
    }
}

impl SearchDb<String, String, PostEntity, RibbitError> for MemoryStore {
    async fn get_item_refs_from_tag(&self, tag: String) -> Result<Vec<String>> {
        let state = self.state.read().await;
        Ok(state
            .tags
            .get(&tag)
            .map(|slugs| slugs.iter().cloned().collect())
            .unwrap_or_default())
    }

    async fn get_item_from_ref(&self, slug: String) -> Result<PostEntity> {
        let state = self.state.read().await;
        state
            .posts
            .get(&slug)
            .cloned()
            .ok_or_else(|| RibbitError::not_found(format!("post.{slug}")))
    }

    async fn get_tags_from_phrase(&self, phrase: &str) -> Result<Vec<String>> {
        let state = self.state.read().await;
        match state.aliases.get(phrase) {
            Some(tags) if !tags.is_empty() => Ok(tags.clone()),
            _ => Ok(vec![phrase.to_string()]),
        }
    }
}

/// Search results and spent proof-of-work challenges, both with expiry.
#[derive(Debug, Clone)]
pub struct MemoryCache {
    searches: Arc<RwLock<HashMap<String, (Instant, Vec<String>)>>>,
    /// Bumped under the `searches` write lock.
    generation: Arc<AtomicU64>,
    spent_challenges: Arc<Mutex<HashMap<String, Instant>>>,
    search_ttl: Duration,
    replay_window: Duration,
}

impl MemoryCache {
    pub fn new(search_ttl: Duration, replay_window: Duration) -> Self {
        Self {
            searches: Arc::new(RwLock::new(HashMap::new())),
            generation: Arc::new(AtomicU64::new(0)),
            spent_challenges: Arc::new(Mutex::new(HashMap::new())),
            search_ttl,
            replay_window,
        }
    }

    /// Drops every cached search. Called whenever the index changes.
    pub async fn invalidate(&self) {
        let mut searches = self.searches.write().await;
        searches.clear();
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    pub async fn cached_search_count(&self) -> usize {
        self.searches.read().await.len()
    }

    /// Marks all challenges as spent, unless one of them already is (or
    /// the batch repeats itself), in which case nothing is recorded.
    pub async fn spend_challenges(&self, challenges: &[String]) -> bool {
        let unique: HashSet<&String> = challenges.iter().collect();
        if unique.len() != challenges.len() {
            return false;
        }

        let now = Instant::now();
        let mut spent = self.spent_challenges.lock().await;
        spent.retain(|_, expires_at| *expires_at > now);

        if challenges.iter().any(|c| spent.contains_key(c)) {
            return false;
        }
        for challenge in challenges {
            spent.insert(challenge.clone(), now + self.replay_window);
        }
        true
    }
}

impl SearchCache<String, RibbitError> for MemoryCache {
    fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    async fn cache_search(
        &self,
        search_query: &str,
        results: Vec<String>,
        generation: u64,
    ) -> Result<()> {
        if self.search_ttl.is_zero() || results.is_empty() {
            return Ok(());
        }

        let now = Instant::now();
        let mut searches = self.searches.write().await;
        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!("Index changed during search '{}', not caching", search_query);
            return Ok(());
        }
        searches.retain(|_, (expires_at, _)| *expires_at > now);
        searches.insert(search_query.to_string(), (now + self.search_ttl, results));
        Ok(())
    }

    async fn get_cached_search(&self, search_query: &str) -> Result<Vec<String>> {
        if self.search_ttl.is_zero() {
            return Ok(vec![]);
        }
        let searches = self.searches.read().await;
        Ok(match searches.get(search_query) {
            Some((expires_at, results)) if *expires_at > Instant::now() => results.clone(),
            _ => vec![],
        })
    }
}
