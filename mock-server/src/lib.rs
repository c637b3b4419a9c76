//! In-memory stand-in for the three News API endpoints.
//!
//! Serves a fixed catalogue of sources and articles, checks the
//! `Authorization` header against a single key, and answers failures with the
//! same `{"status","code","message"}` envelope the real API uses.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tracing::{info, warn};

pub const DEFAULT_API_KEY: &str = "test-key";
const DEFAULT_PAGE_SIZE: usize = 20;
const MAX_PAGE_SIZE: usize = 100;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Source {
    pub id: String,
    pub name: String,
    pub description: String,
    pub url: String,
    pub category: String,
    pub language: String,
    pub country: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ArticleSource {
    pub id: Option<String>,
    pub name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub source: ArticleSource,
    pub author: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub url: String,
    pub published_at: String,
}

pub struct Catalogue {
    pub sources: Vec<Source>,
    pub articles: Vec<Article>,
}

struct AppState {
    api_key: String,
    catalogue: Catalogue,
}

type Shared = Arc<AppState>;
type Reply = (StatusCode, Json<Value>);
type Params = HashMap<String, String>;

pub fn app(api_key: &str) -> Router {
    let state = Arc::new(AppState {
        api_key: api_key.to_string(),
        catalogue: Catalogue::sample(),
    });
    Router::new()
        .route("/v2/top-headlines", get(top_headlines))
        .route("/v2/everything", get(everything))
        .route("/v2/sources", get(sources))
        .with_state(state)
}

pub async fn run(listener: TcpListener, api_key: &str) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "mock News API listening");
    }
    axum::serve(listener, app(api_key)).await
}

fn failure(status: StatusCode, code: &str, message: &str) -> Reply {
    warn!(status = status.as_u16(), code, "rejecting request");
    (
        status,
        Json(json!({ "status": "error", "code": code, "message": message })),
    )
}

fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), Reply> {
    match headers.get("authorization").and_then(|v| v.to_str().ok()) {
        None => Err(failure(
            StatusCode::UNAUTHORIZED,
            "apiKeyMissing",
            "Your API key is missing.",
        )),
        Some(key) if key != state.api_key => Err(failure(
            StatusCode::UNAUTHORIZED,
            "apiKeyInvalid",
            "Your API key is invalid or incorrect.",
        )),
        Some(_) => Ok(()),
    }
}

fn parse_number(params: &Params, key: &str, default: usize) -> Result<usize, Reply> {
    match params.get(key) {
        None => Ok(default),
        Some(raw) => raw.parse().map_err(|_| {
            failure(
                StatusCode::BAD_REQUEST,
                "parameterInvalid",
                &format!("The {key} parameter must be a number."),
            )
        }),
    }
}

/// Slice `articles` by `pageSize`/`page` and wrap them in an ok envelope.
fn paged(params: &Params, articles: Vec<&Article>) -> Result<Value, Reply> {
    let page_size = parse_number(params, "pageSize", DEFAULT_PAGE_SIZE)?.min(MAX_PAGE_SIZE);
    let page = parse_number(params, "page", 1)?.max(1);
    let total = articles.len();
    let items: Vec<&Article> = articles
        .into_iter()
        .skip((page - 1).saturating_mul(page_size))
        .take(page_size)
        .collect();
    Ok(json!({ "status": "ok", "totalResults": total, "articles": items }))
}

fn list_contains(list: &str, value: &str) -> bool {
    list.split(',').any(|item| item.trim() == value)
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

impl Article {
    fn host(&self) -> &str {
        let rest = self.url.split("://").nth(1).unwrap_or(&self.url);
        let host = rest.split('/').next().unwrap_or(rest);
        host.strip_prefix("www.").unwrap_or(host)
    }

    fn mentions(&self, q: &str) -> bool {
        contains_ignore_case(&self.title, q)
            || self
                .description
                .as_deref()
                .is_some_and(|d| contains_ignore_case(d, q))
    }
}

impl Catalogue {
    fn source_of(&self, article: &Article) -> Option<&Source> {
        let id = article.source.id.as_deref()?;
        self.sources.iter().find(|s| s.id == id)
    }

    /// Filters shared by top-headlines and everything.
    fn matches(&self, article: &Article, params: &Params) -> bool {
        let source = self.source_of(article);
        let meta = |key: &str, field: fn(&Source) -> &String| {
            params
                .get(key)
                .is_none_or(|wanted| source.is_some_and(|s| field(s) == wanted))
        };

        params.get("q").is_none_or(|q| article.mentions(q))
            && params
                .get("qintitle")
                .is_none_or(|q| contains_ignore_case(&article.title, q))
            && params.get("sources").is_none_or(|list| {
                article
                    .source
                    .id
                    .as_deref()
                    .is_some_and(|id| list_contains(list, id))
            })
            && meta("language", |s| &s.language)
            && meta("country", |s| &s.country)
            && meta("category", |s| &s.category)
    }

    pub fn sample() -> Self {
        let source = |id: &str, name: &str, url: &str, category: &str, language: &str, country: &str| Source {
            id: id.to_string(),
            name: name.to_string(),
            description: format!("News from {name}."),
            url: url.to_string(),
            category: category.to_string(),
            language: language.to_string(),
            country: country.to_string(),
        };
        let article = |source_id: &str, source_name: &str, title: &str, url: &str, published_at: &str| Article {
            source: ArticleSource {
                id: Some(source_id.to_string()),
                name: source_name.to_string(),
            },
            author: None,
            title: title.to_string(),
            description: Some(format!("{title}. Full story at {source_name}.")),
            url: url.to_string(),
            published_at: published_at.to_string(),
        };

        Self {
            sources: vec![
                source("techcrunch", "TechCrunch", "https://techcrunch.com", "technology", "en", "us"),
                source("bbc-news", "BBC News", "https://www.bbc.co.uk/news", "general", "en", "gb"),
                source("engadget", "Engadget", "https://www.engadget.com", "technology", "en", "us"),
                source("der-spiegel", "Der Spiegel", "https://www.spiegel.de", "general", "de", "de"),
            ],
            articles: vec![
                article(
                    "techcrunch",
                    "TechCrunch",
                    "Rust adoption keeps growing in infrastructure",
                    "https://techcrunch.com/2019/09/06/rust-adoption",
                    "2019-09-06T16:17:48Z",
                ),
                article(
                    "bbc-news",
                    "BBC News",
                    "Markets rally as bitcoin recovers",
                    "https://www.bbc.co.uk/news/business-1",
                    "2019-09-05T08:00:00Z",
                ),
                article(
                    "engadget",
                    "Engadget",
                    "Hands-on with the new Rust-powered editor",
                    "https://www.engadget.com/2019/09/04/editor",
                    "2019-09-04T12:30:00Z",
                ),
                article(
                    "der-spiegel",
                    "Der Spiegel",
                    "Bitcoin in Deutschland",
                    "https://www.spiegel.de/wirtschaft/bitcoin",
                    "2019-09-03T09:15:00Z",
                ),
                article(
                    "techcrunch",
                    "TechCrunch",
                    "Startups bet on bitcoin payments",
                    "https://techcrunch.com/2019/09/01/bitcoin-payments",
                    "2019-09-01T18:45:00Z",
                ),
            ],
        }
    }
}

async fn top_headlines(
    State(state): State<Shared>,
    headers: HeaderMap,
    Query(params): Query<Params>,
) -> Reply {
    if let Err(reply) = authorize(&state, &headers) {
        return reply;
    }
    if params.contains_key("sources")
        && (params.contains_key("country") || params.contains_key("category"))
    {
        return failure(
            StatusCode::BAD_REQUEST,
            "parametersIncompatible",
            "You cannot mix the sources parameter with the country or category parameters.",
        );
    }

    let catalogue = &state.catalogue;
    let articles = catalogue
        .articles
        .iter()
        .filter(|a| catalogue.matches(a, &params))
        .collect();
    match paged(&params, articles) {
        Ok(body) => (StatusCode::OK, Json(body)),
        Err(reply) => reply,
    }
}

async fn everything(
    State(state): State<Shared>,
    headers: HeaderMap,
    Query(params): Query<Params>,
) -> Reply {
    if let Err(reply) = authorize(&state, &headers) {
        return reply;
    }
    if !["q", "qintitle", "sources", "domains"]
        .iter()
        .any(|key| params.contains_key(*key))
    {
        return failure(
            StatusCode::BAD_REQUEST,
            "parametersMissing",
            "Required parameters are missing. Please set any of the following parameters and try again: q, qInTitle, sources, domains.",
        );
    }

    let catalogue = &state.catalogue;
    let mut articles: Vec<&Article> = catalogue
        .articles
        .iter()
        .filter(|a| catalogue.matches(a, &params))
        .filter(|a| params.get("domains").is_none_or(|list| list_contains(list, a.host())))
        .filter(|a| {
            params
                .get("excludeDomains")
                .is_none_or(|list| !list_contains(list, a.host()))
        })
        // Canonical date strings order lexicographically; compare on the shared prefix.
        .filter(|a| {
            params
                .get("from")
                .is_none_or(|from| &a.published_at[..from.len().min(a.published_at.len())] >= from.as_str())
        })
        .filter(|a| {
            params
                .get("to")
                .is_none_or(|to| &a.published_at[..to.len().min(a.published_at.len())] <= to.as_str())
        })
        .collect();

    if params.get("sortBy").map(String::as_str) != Some("relevancy") {
        articles.sort_by(|a, b| b.published_at.cmp(&a.published_at));
    }

    match paged(&params, articles) {
        Ok(body) => (StatusCode::OK, Json(body)),
        Err(reply) => reply,
    }
}

async fn sources(
    State(state): State<Shared>,
    headers: HeaderMap,
    Query(params): Query<Params>,
) -> Reply {
    if let Err(reply) = authorize(&state, &headers) {
        return reply;
    }
    let sources: Vec<&Source> = state
        .catalogue
        .sources
        .iter()
        .filter(|s| params.get("category").is_none_or(|c| s.category == *c))
        .filter(|s| params.get("language").is_none_or(|l| s.language == *l))
        .filter(|s| params.get("country").is_none_or(|c| s.country == *c))
        .collect();
    (StatusCode::OK, Json(json!({ "status": "ok", "sources": sources })))
}
