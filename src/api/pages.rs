use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
};

use crate::{
    content::{self, pages, sitemap},
    error::ApiError,
    server::AppState,
    views::ViewCount,
    warning,
};

/// `GET /` and `GET /blog`
pub async fn blog_index(State(state): State<Arc<AppState>>) -> Response {
    match content::load_posts(&state.config.content_dir).await {
        Ok(posts) => Html(pages::index_page(&posts)).into_response(),
        Err(e) => page_error(e),
    }
}

/// `GET /blog/{slug}`
///
/// Registers a view in the background and independently reads the total,
/// so the displayed count may not include this very visit.
pub async fn blog_post(State(state): State<Arc<AppState>>, Path(slug): Path<String>) -> Response {
    let post = match content::load_post(&state.config.content_dir, &slug).await {
        Ok(post) => post,
        Err(e) => return page_error(e),
    };

    let store = Arc::clone(&state.views);
    let registered = post.slug.clone();
    tokio::spawn(async move {
        if let Err(e) = store.register(&registered).await {
            warning!("Cannot register view for {}: {}", registered, e);
        }
    });

    let views = ViewCount::fetch(state.views.as_ref(), &post.slug).await;
    Html(pages::article_page(&post, views)).into_response()
}

/// `GET /spotify`
pub async fn spotify_dashboard(State(state): State<Arc<AppState>>) -> Response {
    let (tracks, artists) = tokio::join!(state.spotify.top_tracks(), state.spotify.top_artists());

    let tracks = tracks
        .inspect_err(|e| warning!("Top tracks unavailable: {}", e))
        .ok();
    let artists = artists
        .inspect_err(|e| warning!("Top artists unavailable: {}", e))
        .ok();

    Html(pages::dashboard_page(tracks.as_ref(), artists.as_ref())).into_response()
}

/// `GET /sitemap.xml`
pub async fn sitemap(State(state): State<Arc<AppState>>) -> Response {
    match content::load_posts(&state.config.content_dir).await {
        Ok(posts) => (
            [(header::CONTENT_TYPE, "application/xml")],
            sitemap::render_sitemap(&state.config.site_url, &posts),
        )
            .into_response(),
        Err(e) => page_error(e),
    }
}

pub async fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Html(pages::not_found_page())).into_response()
}

fn page_error(e: ApiError) -> Response {
    match e {
        ApiError::NotFound(_) | ApiError::InvalidSlug(_) => {
            (StatusCode::NOT_FOUND, Html(pages::not_found_page())).into_response()
        }
        other => other.into_response(),
    }
}
