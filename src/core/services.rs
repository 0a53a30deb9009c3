use crate::config::toml_config::SearchSettings;
use crate::core::indexing::insert_and_index_item;
use crate::core::search::ItemRepo;
use crate::domain::model::{AuthorEntity, Page, Post, PostEntity, PublishForm};
use crate::domain::ports::{InsertHandle, SearchDb};
use crate::utils::error::{Result, RibbitError};

pub async fn find_posts(
    repo: &impl ItemRepo<String, String, PostEntity, RibbitError>,
    search: &SearchSettings,
    search_query: &str,
    page_num: usize,
) -> Result<Page<Post>> {
    if page_num == 0 {
        return Err(RibbitError::bad_request("page must be at least 1"));
    }

    let (posts, total_objects) = repo
        .get_items_for_search(
            search_query,
            search.word_max,
            search.phrase_max,
            search.per_page,
            page_num,
        )
        .await?;

    Ok(Page {
        objects: posts
            .into_iter()
            .map(|entity| {
                let author = AuthorEntity::anonymous(entity.author.clone());
                Post::from_store(entity, author)
            })
            .collect(),
        total_objects,
        current_page: page_num,
        per_page: search.per_page,
    })
}

pub async fn find_post(
    db: &impl SearchDb<String, String, PostEntity, RibbitError>,
    slug: &str,
) -> Result<Post> {
    let entity = db.get_item_from_ref(slug.to_string()).await?;
    let author = AuthorEntity::anonymous(entity.author.clone());
    Ok(Post::from_store(entity, author))
}

/// Builds the post from a publish form and indexes it. Returns the stored entity.
pub async fn register_post(
    db: &impl InsertHandle<String, String, PostEntity, RibbitError>,
    form: PublishForm,
) -> Result<PostEntity> {
    if form.title.trim().is_empty() {
        return Err(RibbitError::ValidationError {
            message: "title cannot be empty".to_string(),
        });
    }

    let post = PostEntity::from_form(form);
    if post.slug.is_empty() {
        return Err(RibbitError::ValidationError {
            message: "title must contain at least one letter or digit".to_string(),
        });
    }

    insert_and_index_item(db, post.slug.clone(), post.clone(), post.search_tags()).await?;
    tracing::info!(slug = %post.slug, "📝 Post published");
    Ok(post)
}

pub async fn register_alias(
    db: &impl InsertHandle<String, String, PostEntity, RibbitError>,
    phrase: &str,
    tags: Vec<String>,
) -> Result<()> {
    let phrase = phrase.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase();
    if phrase.is_empty() || tags.is_empty() {
        return Err(RibbitError::ValidationError {
            message: "an alias needs a phrase and at least one tag".to_string(),
        });
    }

    let tags = tags.into_iter().map(|tag| tag.to_lowercase()).collect();
    db.insert_alias(phrase, tags).await
}
