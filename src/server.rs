use std::sync::Arc;

use axum::{
    Extension, Router,
    http::Method,
    routing::get,
};
use reqwest::Client;
use tokio::{net::TcpListener, sync::Mutex};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
};

use crate::{
    Res, api,
    config::{AuthSetup, Config},
    info,
    spotify::SpotifyClient,
    types::AuthSession,
    views::{MemoryViewStore, RemoteViewStore, ViewStore},
};

/// Shared, read-only state handed to every handler.
///
/// Built once from the process [`Config`]. Nothing in here changes between
/// requests except the counts of a development [`MemoryViewStore`].
pub struct AppState {
    pub config: Config,
    pub spotify: SpotifyClient,
    pub views: Arc<dyn ViewStore>,
}

impl AppState {
    pub fn from_config(config: Config) -> Self {
        let http = Client::new();

        let views: Arc<dyn ViewStore> = match &config.views_api_url {
            Some(url) => Arc::new(RemoteViewStore::new(http.clone(), url.clone())),
            None => Arc::new(MemoryViewStore::new()),
        };

        AppState {
            spotify: SpotifyClient::new(http, config.spotify.clone()),
            config,
            views,
        }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST]);

    let api_routes = Router::new()
        .route("/spotify/now-playing", get(api::now_playing))
        .route("/spotify/top-tracks", get(api::top_tracks))
        .route("/spotify/top-artists", get(api::top_artists))
        .route(
            "/views/{slug}",
            get(api::get_views).post(api::register_view),
        )
        .layer(cors);

    Router::new()
        .route("/health", get(api::health))
        .route("/", get(api::blog_index))
        .route("/blog", get(api::blog_index))
        .route("/blog/{slug}", get(api::blog_post))
        .route("/spotify", get(api::spotify_dashboard))
        .route("/sitemap.xml", get(api::sitemap))
        .nest("/api", api_routes)
        .nest_service("/static", ServeDir::new(&state.config.static_dir))
        .fallback(api::not_found)
        .with_state(state)
}

/// Binds the configured address and serves the site until the process ends.
pub async fn serve(config: Config) -> Res<()> {
    let addr = config.server_addr;

    match &config.views_api_url {
        Some(url) => info!("Relaying view counts to {}", url),
        None => info!("VIEWS_API_URL not set, counting views in memory"),
    }

    let app = router(Arc::new(AppState::from_config(config)));

    let listener = TcpListener::bind(&addr).await?;
    info!("Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}

/// Serves the OAuth callback for the `auth` command.
pub async fn start_auth_server(setup: AuthSetup, session: Arc<Mutex<Option<AuthSession>>>) -> Res<()> {
    let app = Router::new()
        .route("/health", get(api::health))
        .route("/callback", get(api::callback))
        .layer(Extension(session))
        .layer(Extension(Arc::new(setup.clone())));

    let listener = TcpListener::bind(&setup.server_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
