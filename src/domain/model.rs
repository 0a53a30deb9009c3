use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use slug::slugify;

/// Number of proof-of-work challenges a publish request must solve.
pub const CHALLENGE_COUNT: usize = 16;

pub type GroupId = uuid::Uuid;
/// Typically a handle.
pub type AuthorId = String;

/// Lowercased, without surrounding punctuation. Shared by indexing and queries.
pub fn normalize_word(word: &str) -> String {
    word.trim_matches(|c: char| !c.is_alphanumeric())
        .to_lowercase()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorInfo {
    pub name: String,
    pub profile_picture: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorEntity {
    pub author_id: AuthorId,
    pub name: String,
    pub profile_picture: String,
}

impl AuthorEntity {
    /// Stand-in until accounts exist.
    pub fn anonymous(author_id: AuthorId) -> Self {
        Self {
            author_id,
            name: "Anonymous frog".to_string(),
            profile_picture: "/static/frog.png".to_string(),
        }
    }
}

/// A post as readers see it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub title: String,
    pub slug: String,
    pub author: AuthorInfo,
    pub body: String,
    pub published_at: DateTime<Utc>,
    pub can_reply: bool,
}

impl Post {
    pub fn from_store(entity: PostEntity, author: AuthorEntity) -> Self {
        Self {
            title: entity.title,
            slug: entity.slug,
            author: AuthorInfo {
                name: author.name,
                profile_picture: author.profile_picture,
            },
            body: entity.body,
            published_at: entity.published_at,
            can_reply: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostEntity {
    pub title: String,
    pub slug: String,
    pub author: AuthorId,
    pub search_tags: Vec<String>,
    pub body: String,
    /// `None` means public.
    pub space: Option<GroupId>,
    /// `None` inherits from `space`.
    pub reply_scope: Option<GroupId>,
    /// `None` inherits from `space`.
    pub visibility_scope: Option<GroupId>,
    pub published_at: DateTime<Utc>,
}

impl PostEntity {
    /// Lowercased title words followed by the user supplied tags.
    pub fn search_tags(&self) -> Vec<String> {
        self.title
            .split_whitespace()
            .map(normalize_word)
            .filter(|w| !w.is_empty())
            .chain(self.search_tags.iter().cloned())
            .collect()
    }

    pub fn from_form(form: PublishForm) -> Self {
        Self {
            slug: slugify(&form.title),
            title: form.title,
            author: "anonymous".to_string(),
            search_tags: form
                .tags
                .split_whitespace()
                .map(normalize_word)
                .filter(|w| !w.is_empty())
                .collect(),
            body: form.body,
            space: None,
            reply_scope: form.reply_group,
            visibility_scope: form.visibility_group,
            published_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishForm {
    pub title: String,
    pub body: String,
    /// Space separated.
    #[serde(default)]
    pub tags: String,
    #[serde(default)]
    pub visibility_group: Option<GroupId>,
    #[serde(default)]
    pub reply_group: Option<GroupId>,
    pub challenges: [String; CHALLENGE_COUNT],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub objects: Vec<T>,
    pub current_page: usize,
    pub per_page: usize,
    pub total_objects: usize,
}

impl<T> Page<T> {
    pub fn total_pages(&self) -> usize {
        if self.per_page == 0 {
            return 0;
        }
        self.total_objects.div_ceil(self.per_page)
    }

    pub fn has_prev(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(title: &str, tags: &str) -> PublishForm {
        PublishForm {
            title: title.to_string(),
            body: "Some body".to_string(),
            tags: tags.to_string(),
            visibility_group: None,
            reply_group: None,
            challenges: Default::default(),
        }
    }

    #[test]
    fn test_from_form_slugifies_title() {
        let entity = PostEntity::from_form(form("Hello Pond World!", "frogs  Lily"));

        assert_eq!(entity.slug, "hello-pond-world");
        assert_eq!(entity.search_tags, vec!["frogs", "lily"]);
        assert!(entity.space.is_none());
    }

    #[test]
    fn test_search_tags_combine_title_and_tags() {
        let entity = PostEntity::from_form(form("Big  Frog!", "pond"));

        assert_eq!(entity.search_tags(), vec!["big", "frog", "pond"]);
    }

    #[test]
    fn test_page_navigation() {
        let page: Page<u8> = Page {
            objects: vec![],
            current_page: 2,
            per_page: 20,
            total_objects: 41,
        };

        assert_eq!(page.total_pages(), 3);
        assert!(page.has_prev());
        assert!(page.has_next());

        let last = Page::<u8> {
            current_page: 3,
            ..page
        };
        assert!(!last.has_next());
    }

    #[test]
    fn test_publish_form_requires_sixteen_challenges() {
        let json = serde_json::json!({
            "title": "t",
            "body": "b",
            "challenges": ["a", "b"]
        });
        assert!(serde_json::from_value::<PublishForm>(json).is_err());
    }
}
