use std::collections::HashMap;
use std::fs;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    Form, Json, Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use jsgarden::api::{NOW_PLAYING_CACHE_CONTROL, TOP_ITEMS_CACHE_CONTROL};
use jsgarden::config::Config;
use jsgarden::server::{AppState, router};
use jsgarden::spotify::auth::basic_authorization;
use serde_json::{Value, json};
use tempfile::TempDir;
use tokio::net::TcpListener;

const ACCESS_TOKEN: &str = "access-123";

/// How the fake provider answers.
#[derive(Clone)]
struct Upstream {
    token_status: StatusCode,
    now_playing_status: StatusCode,
    now_playing_body: Value,
    top_status: StatusCode,
    top_count: usize,
}

impl Default for Upstream {
    fn default() -> Self {
        Upstream {
            token_status: StatusCode::OK,
            now_playing_status: StatusCode::OK,
            now_playing_body: json!({ "is_playing": true, "item": track_json(0) }),
            top_status: StatusCode::OK,
            top_count: 15,
        }
    }
}

fn track_json(i: usize) -> Value {
    json!({
        "name": format!("Track {i}"),
        "album": {
            "name": format!("Album {i}"),
            "images": [{ "url": format!("https://i.scdn.co/image/album{i}") }]
        },
        "artists": [{ "name": "A" }, { "name": "B" }, { "name": "C" }],
        "external_urls": { "spotify": format!("https://open.spotify.com/track/t{i}") }
    })
}

fn artist_json(i: usize) -> Value {
    json!({
        "name": format!("Artist {i}"),
        "images": [{ "url": format!("https://i.scdn.co/image/artist{i}") }],
        "external_urls": { "spotify": format!("https://open.spotify.com/artist/ar{i}") }
    })
}

fn authorized(headers: &HeaderMap) -> bool {
    let expected = format!("Bearer {ACCESS_TOKEN}");
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        == Some(expected.as_str())
}

async fn token(
    State(upstream): State<Arc<Upstream>>,
    headers: HeaderMap,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    let basic = basic_authorization("id", "secret");
    let valid = headers.get(header::AUTHORIZATION).and_then(|v| v.to_str().ok())
        == Some(basic.as_str())
        && form.get("grant_type").map(String::as_str) == Some("refresh_token")
        && form.get("refresh_token").map(String::as_str) == Some("refresh");

    if !valid {
        return (StatusCode::BAD_REQUEST, Json(json!({ "error": "invalid_grant" }))).into_response();
    }
    if upstream.token_status != StatusCode::OK {
        return (upstream.token_status, Json(json!({ "error": "server_error" }))).into_response();
    }

    Json(json!({
        "access_token": ACCESS_TOKEN,
        "token_type": "Bearer",
        "scope": "user-read-currently-playing user-top-read",
        "expires_in": 3600
    }))
    .into_response()
}

async fn currently_playing(State(upstream): State<Arc<Upstream>>, headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    if upstream.now_playing_status == StatusCode::NO_CONTENT {
        return StatusCode::NO_CONTENT.into_response();
    }
    (
        upstream.now_playing_status,
        Json(upstream.now_playing_body.clone()),
    )
        .into_response()
}

async fn top(upstream: &Upstream, headers: &HeaderMap, items: Vec<Value>) -> Response {
    if !authorized(headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    if upstream.top_status != StatusCode::OK {
        return (
            upstream.top_status,
            Json(json!({ "error": { "status": upstream.top_status.as_u16(), "message": "rate limited" } })),
        )
            .into_response();
    }
    Json(json!({ "items": items, "total": items.len(), "limit": 20, "offset": 0, "next": null }))
        .into_response()
}

async fn top_tracks(State(upstream): State<Arc<Upstream>>, headers: HeaderMap) -> Response {
    let items = (0..upstream.top_count).map(track_json).collect();
    top(&upstream, &headers, items).await
}

async fn top_artists(
    State(upstream): State<Arc<Upstream>>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    if query.get("time_range").map(String::as_str) != Some("short_term") {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": { "status": 400, "message": "expected time_range=short_term" } })),
        )
            .into_response();
    }
    let items = (0..upstream.top_count).map(artist_json).collect();
    top(&upstream, &headers, items).await
}

async fn spawn(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// Running site backed by a fake provider. The temp dir holds the posts.
struct Site {
    addr: SocketAddr,
    http: reqwest::Client,
    _content: TempDir,
}

impl Site {
    async fn start(upstream: Upstream) -> Self {
        let provider = Router::new()
            .route("/api/token", post(token))
            .route("/v1/me/player/currently-playing", get(currently_playing))
            .route("/v1/me/top/tracks", get(top_tracks))
            .route("/v1/me/top/artists", get(top_artists))
            .with_state(Arc::new(upstream));
        let provider_addr = spawn(provider).await;

        let content = TempDir::new().unwrap();
        fs::write(
            content.path().join("hello-world.md"),
            "+++\ntitle = \"Hello world\"\ndate = \"2023-03-04\"\nsummary = \"First post\"\n+++\n\nHi there.\n",
        )
        .unwrap();

        let api_url = format!("http://{provider_addr}/v1");
        let token_url = format!("http://{provider_addr}/api/token");
        let content_dir = content.path().display().to_string();
        let vars: HashMap<&str, String> = HashMap::from([
            ("SPOTIFY_CLIENT_ID", "id".to_string()),
            ("SPOTIFY_CLIENT_SECRET", "secret".to_string()),
            ("SPOTIFY_REFRESH_TOKEN", "refresh".to_string()),
            ("SPOTIFY_API_URL", api_url),
            ("SPOTIFY_API_TOKEN_URL", token_url),
            ("CONTENT_DIR", content_dir),
            ("SITE_URL", "https://jsgarden.co".to_string()),
        ]);
        let config = Config::from_lookup(|name| vars.get(name).cloned()).unwrap();

        let addr = spawn(router(Arc::new(AppState::from_config(config)))).await;

        Site {
            addr,
            http: reqwest::Client::new(),
            _content: content,
        }
    }

    async fn get(&self, path: &str) -> reqwest::Response {
        self.http
            .get(format!("http://{}{}", self.addr, path))
            .send()
            .await
            .unwrap()
    }

    async fn post(&self, path: &str) -> reqwest::Response {
        self.http
            .post(format!("http://{}{}", self.addr, path))
            .send()
            .await
            .unwrap()
    }
}

fn cache_control(res: &reqwest::Response) -> Option<String> {
    res.headers()
        .get(header::CACHE_CONTROL)
        .map(|v| v.to_str().unwrap().to_string())
}

#[tokio::test]
async fn test_health() {
    let site = Site::start(Upstream::default()).await;
    let res = site.get("/health").await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["name"], "jsgarden");
}

#[tokio::test]
async fn test_now_playing_active() {
    let site = Site::start(Upstream::default()).await;
    let res = site.get("/api/spotify/now-playing").await;

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(cache_control(&res).as_deref(), Some(NOW_PLAYING_CACHE_CONTROL));

    let body: Value = res.json().await.unwrap();
    assert_eq!(
        body,
        json!({
            "status": {
                "isPlaying": true,
                "title": "Track 0",
                "artist": "A, B, C",
                "album": "Album 0",
                "albumImageUrl": "https://i.scdn.co/image/album0",
                "songUrl": "https://open.spotify.com/track/t0"
            }
        })
    );
}

async fn assert_idle(upstream: Upstream) {
    let site = Site::start(upstream).await;
    let res = site.get("/api/spotify/now-playing").await;

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(cache_control(&res), None);
    assert_eq!(res.text().await.unwrap(), r#"{"isPlaying":false}"#);
}

#[tokio::test]
async fn test_now_playing_paused() {
    assert_idle(Upstream {
        now_playing_body: json!({ "is_playing": false, "item": track_json(0) }),
        ..Upstream::default()
    })
    .await;
}

#[tokio::test]
async fn test_now_playing_no_content() {
    assert_idle(Upstream {
        now_playing_status: StatusCode::NO_CONTENT,
        ..Upstream::default()
    })
    .await;
}

#[tokio::test]
async fn test_now_playing_upstream_error() {
    assert_idle(Upstream {
        now_playing_status: StatusCode::SERVICE_UNAVAILABLE,
        now_playing_body: json!({ "error": { "status": 503 } }),
        ..Upstream::default()
    })
    .await;
}

#[tokio::test]
async fn test_now_playing_token_failure() {
    assert_idle(Upstream {
        token_status: StatusCode::INTERNAL_SERVER_ERROR,
        ..Upstream::default()
    })
    .await;
}

#[tokio::test]
async fn test_top_tracks() {
    let site = Site::start(Upstream::default()).await;
    let res = site.get("/api/spotify/top-tracks").await;

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(cache_control(&res).as_deref(), Some(TOP_ITEMS_CACHE_CONTROL));

    let body: Value = res.json().await.unwrap();
    let tracks = body["tracks"].as_array().unwrap();
    assert_eq!(tracks.len(), 10);
    for (i, track) in tracks.iter().enumerate() {
        assert_eq!(track["title"], format!("Track {i}"));
        assert_eq!(track["artist"], "A, B, C");
    }
    assert_eq!(tracks[0]["songUrl"], "https://open.spotify.com/track/t0");
    assert_eq!(tracks[0]["image"], "https://i.scdn.co/image/album0");
}

#[tokio::test]
async fn test_top_artists_fields_are_non_empty() {
    let site = Site::start(Upstream::default()).await;
    let res = site.get("/api/spotify/top-artists").await;

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(cache_control(&res).as_deref(), Some(TOP_ITEMS_CACHE_CONTROL));

    let body: Value = res.json().await.unwrap();
    let artists = body["artists"].as_array().unwrap();
    assert_eq!(artists.len(), 10);
    for artist in artists {
        for field in ["artist", "image", "link"] {
            let value = artist[field].as_str().unwrap();
            assert!(!value.is_empty(), "empty {field}");
        }
    }
}

#[tokio::test]
async fn test_top_items_empty() {
    let site = Site::start(Upstream {
        top_count: 0,
        ..Upstream::default()
    })
    .await;

    let body: Value = site.get("/api/spotify/top-tracks").await.json().await.unwrap();
    assert_eq!(body, json!({ "tracks": [] }));
}

#[tokio::test]
async fn test_top_items_pass_upstream_error_through() {
    let site = Site::start(Upstream {
        top_status: StatusCode::TOO_MANY_REQUESTS,
        ..Upstream::default()
    })
    .await;

    let res = site.get("/api/spotify/top-artists").await;
    assert_eq!(res.status(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(cache_control(&res), None);

    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"]["status"], 429);
}

#[tokio::test]
async fn test_api_allows_cross_origin() {
    let site = Site::start(Upstream::default()).await;
    let res = site
        .http
        .get(format!("http://{}/api/views/hello-world", site.addr))
        .header(header::ORIGIN, "https://elsewhere.example")
        .send()
        .await
        .unwrap();

    assert_eq!(
        res.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "*"
    );
}

#[tokio::test]
async fn test_views() {
    let site = Site::start(Upstream::default()).await;

    let body: Value = site.get("/api/views/some-post").await.json().await.unwrap();
    assert_eq!(body, json!({ "total": 0 }));

    let body: Value = site.post("/api/views/some-post").await.json().await.unwrap();
    assert_eq!(body, json!({ "total": 1 }));
    let body: Value = site.post("/api/views/some-post").await.json().await.unwrap();
    assert_eq!(body, json!({ "total": 2 }));

    let body: Value = site.get("/api/views/some-post").await.json().await.unwrap();
    assert_eq!(body, json!({ "total": 2 }));
}

#[tokio::test]
async fn test_views_invalid_slug() {
    let site = Site::start(Upstream::default()).await;

    let res = site.post("/api/views/Not_Valid").await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body: Value = res.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("Not_Valid"));
}

#[tokio::test]
async fn test_blog_pages() {
    let site = Site::start(Upstream::default()).await;

    let res = site.get("/").await;
    assert_eq!(res.status(), StatusCode::OK);
    let html = res.text().await.unwrap();
    assert!(html.contains("href=\"/blog/hello-world\""));

    let res = site.get("/blog/hello-world").await;
    assert_eq!(res.status(), StatusCode::OK);
    let html = res.text().await.unwrap();
    assert!(html.contains("Hello world"));
    assert!(html.contains("March 4, 2023"));
    assert!(html.contains("<p>Hi there.</p>"));

    // the visit is registered in the background
    let mut total = 0;
    for _ in 0..50 {
        let body: Value = site.get("/api/views/hello-world").await.json().await.unwrap();
        total = body["total"].as_u64().unwrap();
        if total > 0 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    assert_eq!(total, 1);
}

#[tokio::test]
async fn test_unknown_pages_are_not_found() {
    let site = Site::start(Upstream::default()).await;

    assert_eq!(site.get("/blog/missing").await.status(), StatusCode::NOT_FOUND);
    assert_eq!(site.get("/blog/Bad_Slug").await.status(), StatusCode::NOT_FOUND);
    assert_eq!(site.get("/nowhere").await.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_spotify_dashboard() {
    let site = Site::start(Upstream::default()).await;
    let html = site.get("/spotify").await.text().await.unwrap();

    assert!(html.contains("My Spotify Dashboard"));
    assert!(html.contains("Track 9"));
    assert!(!html.contains("Track 10"));
    assert!(html.contains("Artist 0"));
}

#[tokio::test]
async fn test_spotify_dashboard_survives_upstream_failure() {
    let site = Site::start(Upstream {
        top_status: StatusCode::SERVICE_UNAVAILABLE,
        ..Upstream::default()
    })
    .await;

    let res = site.get("/spotify").await;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.text().await.unwrap().contains("My Spotify Dashboard"));
}

#[tokio::test]
async fn test_sitemap() {
    let site = Site::start(Upstream::default()).await;
    let res = site.get("/sitemap.xml").await;

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/xml"
    );
    let xml = res.text().await.unwrap();
    assert!(xml.contains("<loc>https://jsgarden.co/spotify</loc>"));
    assert!(xml.contains("<loc>https://jsgarden.co/blog/hello-world</loc>"));
}
