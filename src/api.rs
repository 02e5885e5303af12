// API client module: a small blocking HTTP client for the GeeksPatrol
// content API. Every call is one request and one response; failures come
// back as `ApiError` and the `ui` module decides how to report them.

use crate::config::Config;
use crate::error::ApiError;
use anyhow::{Context, Result};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub const CATEGORIES_PATH: &str = "/api/categories/list.json";
pub const AUTHORS_PATH: &str = "/api/authors/list.json";
pub const CREATE_ARTICLE_PATH: &str = "/api/articles/create.json";

/// Header carrying the API key on every request (`X-API-Key`).
pub const API_KEY_HEADER: &str = "x-api-key";

/// Category slug used in article URLs when the article has no category.
pub const FALLBACK_CATEGORY_SLUG: &str = "blog";

/// Blocking client bound to one base URL. The API key is installed as a
/// default header so every request carries it.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

/// A taxonomy node articles can be tagged with.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Author {
    pub id: serde_json::Value,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// Moderation state of an article. Statuses this client does not know
/// about still parse, as `Unknown`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ArticleStatus {
    Draft,
    Pending,
    Approved,
    Rejected,
    #[serde(other)]
    Unknown,
}

impl ArticleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArticleStatus::Draft => "draft",
            ArticleStatus::Pending => "pending",
            ArticleStatus::Approved => "approved",
            ArticleStatus::Rejected => "rejected",
            ArticleStatus::Unknown => "unknown",
        }
    }
}

/// A cited external reference.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Source {
    pub name: String,
    pub url: String,
}

impl Source {
    pub fn new(name: &str, url: &str) -> Self {
        Source {
            name: name.to_string(),
            url: url.to_string(),
        }
    }
}

/// Payload of the article creation endpoint, sent verbatim. The optional
/// fields are left out of the JSON when unset so the server derives them.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ArticleRequest {
    pub title: String,
    pub content: String,
    pub excerpt: String,
    pub status: ArticleStatus,
    pub cover_image_path: String,
    pub cover_image_alt: String,
    pub category_ids: Vec<i64>,
    pub seo_title: String,
    pub seo_description: String,
    pub seo_keywords: String,
    pub sources: Vec<Source>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reading_time: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_id: Option<String>,
}

impl ArticleRequest {
    /// Fields the server rejects with a 400 when empty. Whitespace counts
    /// as a value, as it does server-side.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.title.is_empty() {
            missing.push("title");
        }
        if self.content.is_empty() {
            missing.push("content");
        }
        missing
    }
}

/// Link row between an article and a category. `category` is null when the
/// category was deleted after the link was made.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ArticleCategory {
    #[serde(default)]
    pub category: Option<Category>,
}

/// Article as stored by the server. `id` stays a raw JSON value since the
/// backend hands out either integers or UUID strings.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ArticleResponse {
    pub id: serde_json::Value,
    pub title: String,
    pub slug: String,
    pub status: ArticleStatus,
    #[serde(default)]
    pub reading_time: Option<u32>,
    #[serde(default)]
    pub article_categories: Option<Vec<ArticleCategory>>,
    #[serde(default)]
    pub sources: Option<Vec<Source>>,
}

impl ArticleResponse {
    /// Names of the attached categories, skipping dangling links.
    pub fn category_names(&self) -> Vec<&str> {
        self.article_categories
            .iter()
            .flatten()
            .filter_map(|ac| ac.category.as_ref())
            .map(|c| c.name.as_str())
            .collect()
    }

    pub fn source_count(&self) -> usize {
        self.sources.as_ref().map_or(0, Vec::len)
    }

    /// Public URL of the article: `{base}/{first category slug}/{slug}`,
    /// with `blog` standing in when there is no first category.
    pub fn display_url(&self, base_url: &str) -> String {
        let category_slug = self
            .article_categories
            .as_ref()
            .and_then(|acs| acs.first())
            .and_then(|ac| ac.category.as_ref())
            .map_or(FALLBACK_CATEGORY_SLUG, |c| c.slug.as_str());
        format!("{}/{}/{}", base_url.trim_end_matches('/'), category_slug, self.slug)
    }
}

#[derive(Deserialize)]
struct CategoryList {
    categories: Vec<Category>,
}

#[derive(Deserialize)]
struct AuthorList {
    authors: Vec<Author>,
}

#[derive(Deserialize)]
struct ArticleEnvelope {
    article: ArticleResponse,
}

/// Error body of the write endpoint. `error` is usually a string but is
/// displayed whatever its JSON type.
#[derive(Deserialize)]
struct ErrorBody {
    error: Option<serde_json::Value>,
    details: Option<serde_json::Value>,
}

impl ApiClient {
    /// Build a client for `config`. Fails only when the key cannot be sent
    /// as a header value or the TLS backend does not initialise.
    pub fn new(config: &Config) -> Result<Self> {
        let mut key = HeaderValue::from_str(&config.api_key)
            .context("API key contains characters not allowed in an HTTP header")?;
        key.set_sensitive(true);
        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, key);

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(ApiClient {
            client,
            base_url: config.base_url.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET the category list. Anything but a 200 is `ApiError::Status`.
    pub fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        let body: CategoryList = self.get_listing(CATEGORIES_PATH)?;
        Ok(body.categories)
    }

    /// GET the author list. Same contract as `list_categories`.
    pub fn list_authors(&self) -> Result<Vec<Author>, ApiError> {
        let body: AuthorList = self.get_listing(AUTHORS_PATH)?;
        Ok(body.authors)
    }

    fn get_listing<T: for<'de> Deserialize<'de>>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.endpoint(path);
        debug!(%url, "GET");
        let res = self.client.get(&url).send()?;
        let status = res.status();
        if status != StatusCode::OK {
            warn!(%url, status = status.as_u16(), "listing request failed");
            return Err(ApiError::Status { status: status.as_u16() });
        }
        let text = res.text()?;
        Ok(serde_json::from_str(&text)?)
    }

    /// POST a new article. Only a 201 counts as success; any other status
    /// is turned into `Rejected` when the body is a JSON error object and
    /// `RawBody` otherwise. A 201 whose body cannot be read is
    /// `CreatedUnreadable`: the article exists but there is nothing to show.
    pub fn create_article(&self, req: &ArticleRequest) -> Result<ArticleResponse, ApiError> {
        let missing = req.missing_fields();
        if !missing.is_empty() {
            return Err(ApiError::Invalid { fields: missing });
        }

        let url = self.endpoint(CREATE_ARTICLE_PATH);
        debug!(%url, title = %req.title, "POST");
        let res = self.client.post(&url).json(req).send()?;
        let status = res.status();
        let text = res.text()?;

        if status == StatusCode::CREATED {
            return match serde_json::from_str::<ArticleEnvelope>(&text) {
                Ok(body) => Ok(body.article),
                Err(source) => {
                    warn!(%url, error = %source, "article created but response unreadable");
                    Err(ApiError::CreatedUnreadable { source })
                }
            };
        }

        warn!(%url, status = status.as_u16(), "article creation failed");
        Err(error_from_body(status.as_u16(), text))
    }
}

fn error_from_body(status: u16, body: String) -> ApiError {
    match serde_json::from_str::<ErrorBody>(&body) {
        Ok(parsed) => ApiError::Rejected {
            status,
            message: parsed
                .error
                .as_ref()
                .map_or_else(|| "Unknown error".into(), json_text),
            details: parsed.details,
        },
        Err(_) => ApiError::RawBody { status, body },
    }
}

/// Render a JSON value for display: strings without their quotes.
pub fn json_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn client_for(server: &mockito::Server) -> ApiClient {
        ApiClient::new(&Config::new(&server.url(), "test-key")).unwrap()
    }

    fn article_json(categories: serde_json::Value) -> serde_json::Value {
        json!({
            "id": 42,
            "title": "Foldables",
            "slug": "foo",
            "status": "draft",
            "reading_time": 4,
            "article_categories": categories,
            "sources": [{"name": "GSMArena", "url": "https://www.gsmarena.com"}]
        })
    }

    fn minimal_request() -> ArticleRequest {
        ArticleRequest {
            title: "Title".into(),
            content: "<p>Body</p>".into(),
            excerpt: String::new(),
            status: ArticleStatus::Draft,
            cover_image_path: String::new(),
            cover_image_alt: String::new(),
            category_ids: vec![2],
            seo_title: String::new(),
            seo_description: String::new(),
            seo_keywords: String::new(),
            sources: vec![],
            slug: None,
            reading_time: None,
            author_id: None,
        }
    }

    #[test]
    fn categories_keep_order_and_fields() {
        let mut server = mockito::Server::new();
        let _m = server
            .mock("GET", CATEGORIES_PATH)
            .match_header("x-api-key", "test-key")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({"success": true, "categories": [
                    {"id": 3, "name": "Tech & Gadgets", "slug": "tech"},
                    {"id": 1, "name": "Gaming", "slug": "gaming", "description": "Jeux"},
                    {"id": 2, "name": "Mobile", "slug": "mobile"}
                ]})
                .to_string(),
            )
            .expect(1)
            .create();

        let categories = client_for(&server).list_categories().unwrap();
        let ids: Vec<i64> = categories.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
        assert_eq!(categories[0].name, "Tech & Gadgets");
        assert_eq!(categories[1].description.as_deref(), Some("Jeux"));
        assert_eq!(categories[2].slug, "mobile");
    }

    #[test]
    fn categories_non_200_is_status_error() {
        let mut server = mockito::Server::new();
        let _m = server
            .mock("GET", CATEGORIES_PATH)
            .with_status(401)
            .with_body(r#"{"error":"Non autorisé"}"#)
            .create();

        let err = client_for(&server).list_categories().unwrap_err();
        assert!(matches!(err, ApiError::Status { status: 401 }));
    }

    #[test]
    fn authors_are_parsed() {
        let mut server = mockito::Server::new();
        let _m = server
            .mock("GET", AUTHORS_PATH)
            .match_header("x-api-key", "test-key")
            .with_status(200)
            .with_body(
                json!({"authors": [
                    {"id": "a1b2", "name": "n8n Bot", "email": null},
                    {"id": "c3d4", "name": "Alice", "email": "alice@geekspatrol.fr"}
                ]})
                .to_string(),
            )
            .create();

        let authors = client_for(&server).list_authors().unwrap();
        assert_eq!(authors.len(), 2);
        assert_eq!(authors[0].email, None);
        assert_eq!(authors[1].email.as_deref(), Some("alice@geekspatrol.fr"));
    }

    #[test]
    fn create_sends_json_with_key() {
        let mut server = mockito::Server::new();
        let m = server
            .mock("POST", CREATE_ARTICLE_PATH)
            .match_header("x-api-key", "test-key")
            .match_header("content-type", "application/json")
            .match_body(mockito::Matcher::PartialJson(json!({
                "title": "Title",
                "status": "draft",
                "category_ids": [2]
            })))
            .with_status(201)
            .with_body(json!({"success": true, "article": article_json(json!(null))}).to_string())
            .expect(1)
            .create();

        let article = client_for(&server).create_article(&minimal_request()).unwrap();
        m.assert();
        assert_eq!(article.id, json!(42));
        assert_eq!(article.status, ArticleStatus::Draft);
        assert_eq!(article.reading_time, Some(4));
        assert_eq!(article.source_count(), 1);
    }

    #[test]
    fn create_json_error_is_rejected() {
        let mut server = mockito::Server::new();
        let _m = server
            .mock("POST", CREATE_ARTICLE_PATH)
            .with_status(400)
            .with_body(r#"{"error":"bad request","details":"title too long"}"#)
            .create();

        match client_for(&server).create_article(&minimal_request()) {
            Err(ApiError::Rejected { status, message, details }) => {
                assert_eq!(status, 400);
                assert_eq!(message, "bad request");
                assert_eq!(details, Some(json!("title too long")));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn create_error_without_message_is_unknown() {
        let mut server = mockito::Server::new();
        let _m = server
            .mock("POST", CREATE_ARTICLE_PATH)
            .with_status(500)
            .with_body(r#"{"details":"boom"}"#)
            .create();

        match client_for(&server).create_article(&minimal_request()) {
            Err(ApiError::Rejected { message, .. }) => assert_eq!(message, "Unknown error"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn create_unparseable_error_keeps_raw_text() {
        let mut server = mockito::Server::new();
        let _m = server
            .mock("POST", CREATE_ARTICLE_PATH)
            .with_status(502)
            .with_body("<html>Bad Gateway</html>")
            .create();

        match client_for(&server).create_article(&minimal_request()) {
            Err(ApiError::RawBody { status, body }) => {
                assert_eq!(status, 502);
                assert_eq!(body, "<html>Bad Gateway</html>");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn create_200_is_not_success() {
        let mut server = mockito::Server::new();
        let _m = server
            .mock("POST", CREATE_ARTICLE_PATH)
            .with_status(200)
            .with_body(json!({"article": article_json(json!(null))}).to_string())
            .create();

        let err = client_for(&server).create_article(&minimal_request()).unwrap_err();
        assert_eq!(err.status(), Some(200));
    }

    #[test]
    fn empty_title_is_refused_before_sending() {
        let mut server = mockito::Server::new();
        let m = server.mock("POST", CREATE_ARTICLE_PATH).expect(0).create();

        let mut req = minimal_request();
        req.title = String::new();
        let err = client_for(&server).create_article(&req).unwrap_err();
        m.assert();
        assert!(matches!(err, ApiError::Invalid { ref fields } if fields == &vec!["title"]));
    }

    #[test]
    fn whitespace_title_is_left_to_the_server() {
        let mut req = minimal_request();
        req.title = "   ".into();
        assert!(req.missing_fields().is_empty());

        req.content = String::new();
        assert_eq!(req.missing_fields(), vec!["content"]);
    }

    #[test]
    fn create_non_string_error_is_rendered() {
        let mut server = mockito::Server::new();
        let _m = server
            .mock("POST", CREATE_ARTICLE_PATH)
            .with_status(400)
            .with_body(r#"{"error":42}"#)
            .create();

        match client_for(&server).create_article(&minimal_request()) {
            Err(ApiError::Rejected { status, message, .. }) => {
                assert_eq!(status, 400);
                assert_eq!(message, "42");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn create_201_with_null_article_keeps_status() {
        let mut server = mockito::Server::new();
        let _m = server
            .mock("POST", CREATE_ARTICLE_PATH)
            .with_status(201)
            .with_body(r#"{"success":true,"article":null}"#)
            .create();

        let err = client_for(&server).create_article(&minimal_request()).unwrap_err();
        assert!(matches!(err, ApiError::CreatedUnreadable { .. }));
        assert_eq!(err.status(), Some(201));
    }

    #[test]
    fn optional_request_fields_are_omitted() {
        let value = serde_json::to_value(minimal_request()).unwrap();
        let obj = value.as_object().unwrap();
        assert!(!obj.contains_key("slug"));
        assert!(!obj.contains_key("reading_time"));
        assert!(!obj.contains_key("author_id"));

        let mut req = minimal_request();
        req.reading_time = Some(7);
        let value = serde_json::to_value(req).unwrap();
        assert_eq!(value["reading_time"], json!(7));
    }

    #[test]
    fn display_url_uses_first_category() {
        let article: ArticleResponse = serde_json::from_value(article_json(json!([
            {"category": {"id": 2, "name": "Mobile", "slug": "mobile"}},
            {"category": {"id": 3, "name": "Tech", "slug": "tech"}}
        ])))
        .unwrap();
        assert_eq!(article.display_url("http://localhost:4321"), "http://localhost:4321/mobile/foo");
        assert_eq!(article.category_names(), vec!["Mobile", "Tech"]);
    }

    #[test]
    fn display_url_falls_back_to_blog() {
        let mut value = article_json(json!(null));
        value.as_object_mut().unwrap().remove("article_categories");
        let article: ArticleResponse = serde_json::from_value(value).unwrap();
        assert_eq!(article.display_url("http://localhost:4321/"), "http://localhost:4321/blog/foo");

        let empty: ArticleResponse = serde_json::from_value(article_json(json!([]))).unwrap();
        assert_eq!(empty.display_url("http://localhost:4321"), "http://localhost:4321/blog/foo");
    }

    #[test]
    fn dangling_category_links_are_skipped() {
        let article: ArticleResponse = serde_json::from_value(article_json(json!([
            {"category": null},
            {"category": {"id": 2, "name": "Mobile", "slug": "mobile"}}
        ])))
        .unwrap();
        assert_eq!(article.category_names(), vec!["Mobile"]);
        assert_eq!(article.display_url("http://x"), "http://x/blog/foo");
    }

    #[test]
    fn unknown_status_still_parses() {
        let status: ArticleStatus = serde_json::from_value(json!("archived")).unwrap();
        assert_eq!(status, ArticleStatus::Unknown);
        let status: ArticleStatus = serde_json::from_value(json!("approved")).unwrap();
        assert_eq!(status.as_str(), "approved");
    }
}
