mod common;

use common::{publish_body, spawn_accepting_app, spawn_app, test_settings};
use reqwest::{Client, StatusCode};
use ribbit::AppState;
use scraper::{Html, Selector};
use spow::pow::Pow;
use tempfile::TempDir;

async fn publish(
    client: &Client,
    base: &str,
    title: &str,
    body: &str,
    tags: &str,
) -> reqwest::Response {
    client
        .post(format!("{base}/en/post"))
        .json(&publish_body(title, body, tags))
        .send()
        .await
        .unwrap()
}

#[tokio::test]
async fn test_publish_then_search_and_read() {
    let base = spawn_accepting_app(test_settings()).await;
    let client = Client::new();

    let response = publish(&client, &base, "Green Frog Meetup", "Bring flies.", "pond").await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let slug = response.text().await.unwrap();
    assert_eq!(slug, "green-frog-meetup");

    let html = client
        .get(format!("{base}/en/search?search=Frog"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(html.contains(r#"href="/en/post/green-frog-meetup""#));
    assert!(html.contains("1 result(s)"));

    let by_tag = client
        .get(format!("{base}/en/search?search=pond"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(by_tag.contains("green-frog-meetup"));

    let post = client
        .get(format!("{base}/en/post/{slug}"))
        .send()
        .await
        .unwrap();
    assert_eq!(post.status(), StatusCode::OK);
    let post_html = post.text().await.unwrap();
    assert!(post_html.contains("Green Frog Meetup"));
    assert!(post_html.contains("Bring flies."));
}

#[tokio::test]
async fn test_new_posts_show_up_in_cached_searches() {
    let base = spawn_accepting_app(test_settings()).await;
    let client = Client::new();

    publish(&client, &base, "Lily pads", "Soft.", "").await;
    let first = client
        .get(format!("{base}/en/search?search=lily"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(first.contains("1 result(s)"));

    publish(&client, &base, "Lily flowers", "Pretty.", "").await;
    let second = client
        .get(format!("{base}/en/search?search=lily"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(second.contains("2 result(s)"));
}

#[tokio::test]
async fn test_duplicate_title_conflicts() {
    let base = spawn_accepting_app(test_settings()).await;
    let client = Client::new();

    let first = publish(&client, &base, "Same title", "one", "").await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = publish(&client, &base, "same  TITLE", "two", "").await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_blank_title_is_rejected() {
    let base = spawn_accepting_app(test_settings()).await;
    let client = Client::new();

    let response = publish(&client, &base, "   ", "body", "").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = publish(&client, &base, "!!!", "body", "").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unsolved_challenges_are_rejected() {
    let state = AppState::from_settings(test_settings()).await.unwrap();
    let base = spawn_app(state).await;
    let client = Client::new();

    let response = publish(&client, &base, "Sneaky", "no work done", "").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let search = client
        .get(format!("{base}/en/search?search=sneaky"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(search.contains("0 result(s)"));
}

#[tokio::test]
async fn test_proof_of_work_can_be_disabled() {
    let mut settings = test_settings();
    settings.pow.required = false;
    let state = AppState::from_settings(settings).await.unwrap();
    let base = spawn_app(state).await;

    let response = publish(&Client::new(), &base, "Open pond", "anyone", "").await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_publish_form_carries_challenges() {
    let state = AppState::from_settings(test_settings()).await.unwrap();
    let base = spawn_app(state).await;

    let response = reqwest::get(format!("{base}/en/post")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = response.text().await.unwrap();
    assert_eq!(html.matches("data-challenge=").count(), 16);
}

#[tokio::test]
async fn test_solved_challenges_publish_once() {
    let mut settings = test_settings();
    settings.pow.difficulty = 10;
    let state = AppState::from_settings(settings).await.unwrap();
    let base = spawn_app(state).await;
    let client = Client::new();

    let form = client
        .get(format!("{base}/en/post"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    let solved: Vec<String> = {
        let document = Html::parse_document(&form);
        let selector = Selector::parse("li[data-challenge]").unwrap();
        document
            .select(&selector)
            .filter_map(|li| li.value().attr("data-challenge"))
            .map(|challenge| Pow::work(challenge).unwrap())
            .collect()
    };
    assert_eq!(solved.len(), 16);

    let body = |title: &str| {
        serde_json::json!({
            "title": title,
            "body": "Earned it.",
            "challenges": solved,
        })
    };

    let first = client
        .post(format!("{base}/en/post"))
        .json(&body("Hard working frog"))
        .send()
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::CREATED);

    let replay = client
        .post(format!("{base}/en/post"))
        .json(&body("Lazy frog"))
        .send()
        .await
        .unwrap();
    assert_eq!(replay.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_pagination_and_bad_page() {
    let mut settings = test_settings();
    settings.search.per_page = 2;
    let base = spawn_accepting_app(settings).await;
    let client = Client::new();

    for title in ["Toad one", "Toad two", "Toad three"] {
        let response = publish(&client, &base, title, "croak", "").await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let page_two = client
        .get(format!("{base}/en/search?search=toad&page=2"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(page_two.contains("Page 2 of 2"));
    assert!(page_two.contains("/en/post/toad-two"));
    assert!(page_two.contains(r#"rel="prev""#));
    assert!(!page_two.contains(r#"rel="next""#));

    let bad = client
        .get(format!("{base}/en/search?search=toad&page=0"))
        .send()
        .await
        .unwrap();
    assert_eq!(bad.status(), StatusCode::BAD_REQUEST);

    let far = client
        .get(format!("{base}/en/search?search=toad&page=18446744073709551615"))
        .send()
        .await
        .unwrap();
    assert_eq!(far.status(), StatusCode::OK);
    let far_html = far.text().await.unwrap();
    assert!(far_html.contains("3 result(s)"));
    assert!(!far_html.contains("/en/post/toad-"));
}

#[tokio::test]
async fn test_configured_alias_finds_posts() {
    let mut settings = test_settings();
    settings
        .search
        .aliases
        .insert("tree frog".to_string(), vec!["hyla".to_string()]);
    let base = spawn_accepting_app(settings).await;
    let client = Client::new();

    publish(&client, &base, "Hyla arborea", "climbs", "").await;

    let html = client
        .get(format!("{base}/en/search?search=tree+frog"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(html.contains("/en/post/hyla-arborea"));
}

#[tokio::test]
async fn test_unknown_routes_and_posts_are_not_found() {
    let state = AppState::from_settings(test_settings()).await.unwrap();
    let base = spawn_app(state).await;

    for path in ["/en/post/missing", "/nowhere", "/EN/home"] {
        let response = reqwest::get(format!("{base}{path}")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{path}");
    }

    let home = reqwest::get(format!("{base}/pt-BR/home")).await.unwrap();
    assert_eq!(home.status(), StatusCode::OK);
    assert!(home.text().await.unwrap().contains(r#"<html lang="pt-BR">"#));
}

#[tokio::test]
async fn test_posts_survive_restart_with_snapshot() {
    let temp_dir = TempDir::new().unwrap();
    let mut settings = test_settings();
    settings.storage.snapshot_path = Some(
        temp_dir
            .path()
            .join("posts.json")
            .to_string_lossy()
            .into_owned(),
    );

    let base = spawn_accepting_app(settings.clone()).await;
    let response = publish(&Client::new(), &base, "Persistent frog", "still here", "").await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let restarted = spawn_accepting_app(settings).await;
    let post = reqwest::get(format!("{restarted}/en/post/persistent-frog"))
        .await
        .unwrap();
    assert_eq!(post.status(), StatusCode::OK);
    assert!(post.text().await.unwrap().contains("still here"));
}
