use crate::domain::model::{Page, Post};
use crate::utils::error::Result;
use crate::view::signup::{SignUpForm, SignUpPage, Title, TITLE_TEXT};
use crate::view::templates;
use handlebars::Handlebars;
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use url::form_urlencoded;

/// Compiled templates, shared by every request.
#[derive(Debug, Clone)]
pub struct Renderer {
    hb: Arc<Handlebars<'static>>,
}

#[derive(Serialize)]
struct ListView<'a> {
    lang: &'a str,
    page_title: String,
    query: &'a str,
    posts: &'a [Post],
    total: usize,
    current_page: usize,
    total_pages: usize,
    prev_href: Option<String>,
    next_href: Option<String>,
}

impl Renderer {
    pub fn new() -> Result<Self> {
        let mut hb = Handlebars::new();
        hb.register_template_string("shell", templates::SHELL_TPL)?;
        hb.register_template_string("title", templates::TITLE_TPL)?;
        hb.register_template_string("signup_form", templates::SIGNUP_FORM_TPL)?;
        hb.register_template_string("signup", templates::SIGNUP_TPL)?;
        hb.register_template_string("home", templates::HOME_TPL)?;
        hb.register_template_string("list", templates::LIST_TPL)?;
        hb.register_template_string("post", templates::POST_TPL)?;
        hb.register_template_string("publish", templates::PUBLISH_TPL)?;

        Ok(Self { hb: Arc::new(hb) })
    }

    pub fn render_title(&self) -> Result<String> {
        Ok(self.hb.render("title", &Title::default())?)
    }

    pub fn render_form(&self) -> Result<String> {
        Ok(self.hb.render("signup_form", &SignUpForm::default())?)
    }

    pub fn render_signup_page(&self, lang: &str) -> Result<String> {
        Ok(self.hb.render("signup", &SignUpPage::new(lang))?)
    }

    pub fn render_home(&self, lang: &str) -> Result<String> {
        let context = json!({
            "lang": lang,
            "page_title": TITLE_TEXT,
            "title": Title::default(),
        });
        Ok(self.hb.render("home", &context)?)
    }

    pub fn render_post(&self, lang: &str, post: &Post) -> Result<String> {
        let context = json!({
            "lang": lang,
            "page_title": format!("{} · {}", post.title, TITLE_TEXT),
            "post": post,
            "published": post.published_at.format("%Y-%m-%d %H:%M UTC").to_string(),
        });
        Ok(self.hb.render("post", &context)?)
    }

    pub fn render_list(&self, lang: &str, query: &str, page: &Page<Post>) -> Result<String> {
        let page_href = |page_num: usize| {
            let encoded: String = form_urlencoded::byte_serialize(query.as_bytes()).collect();
            format!("/{}/search?search={}&page={}", lang, encoded, page_num)
        };

        let view = ListView {
            lang,
            page_title: format!("{} · {}", query, TITLE_TEXT),
            query,
            posts: &page.objects,
            total: page.total_objects,
            current_page: page.current_page,
            total_pages: page.total_pages().max(1),
            prev_href: page
                .has_prev()
                .then(|| page_href(page.current_page - 1)),
            next_href: page
                .has_next()
                .then(|| page_href(page.current_page + 1)),
        };
        Ok(self.hb.render("list", &view)?)
    }

    pub fn render_publish(&self, lang: &str, challenges: &[String]) -> Result<String> {
        let context = json!({
            "lang": lang,
            "page_title": format!("Publish · {}", TITLE_TEXT),
            "challenges": challenges,
        });
        Ok(self.hb.render("publish", &context)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::AuthorInfo;
    use chrono::{TimeZone, Utc};

    fn post(title: &str, body: &str) -> Post {
        Post {
            title: title.to_string(),
            slug: slug::slugify(title),
            author: AuthorInfo {
                name: "Anonymous frog".to_string(),
                profile_picture: String::new(),
            },
            body: body.to_string(),
            published_at: Utc.with_ymd_and_hms(2026, 3, 1, 12, 30, 0).unwrap(),
            can_reply: false,
        }
    }

    #[test]
    fn test_title_component() {
        let renderer = Renderer::new().unwrap();
        let html = renderer.render_title().unwrap();

        assert!(html.starts_with("<h1"));
        assert!(html.contains(">Ribbit</h1>"));
    }

    #[test]
    fn test_form_component() {
        let renderer = Renderer::new().unwrap();
        let html = renderer.render_form().unwrap();

        assert_eq!(html.matches("<input").count(), 4);
        assert_eq!(html.matches("<button").count(), 1);
        assert!(html.contains(r#"type="email" placeholder="Email address""#));
        assert!(html.contains(r#"<button type="button""#));
        assert!(!html.contains("name="));
    }

    #[test]
    fn test_signup_page_sets_lang() {
        let renderer = Renderer::new().unwrap();
        let html = renderer.render_signup_page("fr").unwrap();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(r#"<html lang="fr">"#));
        assert!(html.contains(&renderer.render_title().unwrap()));
        assert!(html.contains(&renderer.render_form().unwrap()));
    }

    #[test]
    fn test_post_body_is_escaped() {
        let renderer = Renderer::new().unwrap();
        let html = renderer
            .render_post("en", &post("Frogs", "<script>alert(1)</script>"))
            .unwrap();

        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("2026-03-01 12:30 UTC"));
    }

    #[test]
    fn test_list_pagination_links_encode_query() {
        let renderer = Renderer::new().unwrap();
        let page = Page {
            objects: vec![post("Green frog", "hi")],
            current_page: 2,
            per_page: 1,
            total_objects: 3,
        };

        let html = renderer.render_list("en", "green frog", &page).unwrap();

        assert!(html.contains(r#"href="/en/post/green-frog""#));
        assert!(html.contains("/en/search?search=green+frog&page=1"));
        assert!(html.contains("/en/search?search=green+frog&page=3"));
        assert!(html.contains("Page 2 of 3"));
    }

    #[test]
    fn test_publish_lists_challenges() {
        let renderer = Renderer::new().unwrap();
        let challenges = vec!["c1".to_string(), "c2".to_string()];

        let html = renderer.render_publish("en", &challenges).unwrap();

        assert!(html.contains(r#"data-challenge="c1""#));
        assert!(html.contains(r#"data-challenge="c2""#));
        assert!(html.contains(r#"data-endpoint="/en/post""#));
    }
}
