use crate::adapters::pow::issue_challenges;
use crate::core::services;
use crate::domain::model::PublishForm;
use crate::utils::error::{Result, RibbitError};
use crate::web::lang::Lang;
use crate::web::AppState;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use axum::Json;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub search: String,
    pub page: Option<String>,
}

impl SearchParams {
    fn page_num(&self) -> Result<usize> {
        match self.page.as_deref().map(str::trim) {
            None | Some("") => Ok(1),
            Some(raw) => match raw.parse::<usize>() {
                Ok(0) | Err(_) => Err(RibbitError::bad_request(format!(
                    "invalid page '{}', expected a number starting at 1",
                    raw
                ))),
                Ok(page) => Ok(page),
            },
        }
    }
}

pub async fn signup(Path(lang): Path<String>, State(state): State<AppState>) -> Result<Html<String>> {
    let lang = Lang::parse(&lang)?;
    Ok(Html(state.renderer.render_signup_page(lang.as_str())?))
}

pub async fn home(Path(lang): Path<String>, State(state): State<AppState>) -> Result<Html<String>> {
    let lang = Lang::parse(&lang)?;
    Ok(Html(state.renderer.render_home(lang.as_str())?))
}

pub async fn search_posts(
    Path(lang): Path<String>,
    Query(params): Query<SearchParams>,
    State(state): State<AppState>,
) -> Result<Html<String>> {
    let lang = Lang::parse(&lang)?;
    let page_num = params.page_num()?;

    let page =
        services::find_posts(&state.repo, &state.settings.search, &params.search, page_num).await?;
    tracing::debug!(
        "Search '{}' page {} -> {} of {} results",
        params.search,
        page_num,
        page.objects.len(),
        page.total_objects
    );

    Ok(Html(
        state
            .renderer
            .render_list(lang.as_str(), params.search.trim(), &page)?,
    ))
}

pub async fn get_post(
    Path((lang, slug)): Path<(String, String)>,
    State(state): State<AppState>,
) -> Result<Html<String>> {
    let lang = Lang::parse(&lang)?;
    let post = services::find_post(&state.repo.db, &slug).await?;
    Ok(Html(state.renderer.render_post(lang.as_str(), &post)?))
}

pub async fn get_challenge_form(
    Path(lang): Path<String>,
    State(state): State<AppState>,
) -> Result<Html<String>> {
    let lang = Lang::parse(&lang)?;
    let challenges = issue_challenges(&state.settings.pow)?;
    Ok(Html(
        state.renderer.render_publish(lang.as_str(), &challenges)?,
    ))
}

pub async fn post_form(
    Path(lang): Path<String>,
    State(state): State<AppState>,
    Json(submit): Json<PublishForm>,
) -> Result<impl IntoResponse> {
    Lang::parse(&lang)?;

    if state.settings.pow.required && !state.pow.is_valid_pow(&submit.challenges).await {
        return Err(RibbitError::InvalidProofOfWork);
    }

    let post = services::register_post(&state.repo, submit).await?;
    Ok((StatusCode::CREATED, post.slug))
}

pub async fn not_found() -> RibbitError {
    RibbitError::not_found("page")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(page: Option<&str>) -> SearchParams {
        SearchParams {
            search: "frog".to_string(),
            page: page.map(str::to_string),
        }
    }

    #[test]
    fn test_page_defaults_to_first() {
        assert_eq!(params(None).page_num().unwrap(), 1);
        assert_eq!(params(Some("")).page_num().unwrap(), 1);
        assert_eq!(params(Some("3")).page_num().unwrap(), 3);
    }

    #[test]
    fn test_bad_pages_are_rejected() {
        for bad in ["0", "-1", "two"] {
            let err = params(Some(bad)).page_num().unwrap_err();
            assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        }
    }
}
