use std::{sync::Arc, time::Duration};

use tokio::sync::Mutex;

use crate::{
    config::AuthSetup,
    error, info,
    server::start_auth_server,
    spotify::auth::{authorize_url, generate_state},
    success,
    types::{AuthSession, TokenResponse},
    warning,
};

const AUTH_TIMEOUT: Duration = Duration::from_secs(120);

/// Runs the authorization-code flow and prints the resulting refresh token.
///
/// 1. Starts the local callback server on `SERVER_ADDRESS`
/// 2. Opens the Spotify authorization URL in the default browser
/// 3. Waits for the callback to exchange the code
/// 4. Prints `SPOTIFY_REFRESH_TOKEN=...` for the `.env` file
///
/// The redirect URI registered for the Spotify application must point at
/// the callback server, e.g. `http://127.0.0.1:3000/callback`.
pub async fn auth() {
    let setup = match AuthSetup::from_env() {
        Ok(setup) => setup,
        Err(e) => error!("Cannot start authorization: {}", e),
    };

    let state = generate_state();
    let session = Arc::new(Mutex::new(Some(AuthSession {
        state: state.clone(),
        token: None,
    })));

    let server_setup = setup.clone();
    let server_session = Arc::clone(&session);
    tokio::spawn(async move {
        if let Err(e) = start_auth_server(server_setup, server_session).await {
            error!("Callback server failed: {}", e);
        }
    });

    let auth_url = authorize_url(&setup, &state);
    if webbrowser::open(&auth_url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }

    info!("Waiting for authorization...");
    match wait_for_token(session).await {
        Some(TokenResponse {
            refresh_token: Some(refresh_token),
            ..
        }) => {
            success!("Authentication successful!");
            println!("\nSPOTIFY_REFRESH_TOKEN={refresh_token}");
        }
        Some(_) => error!("Spotify did not return a refresh token."),
        None => error!("Authentication failed or timed out."),
    }
}

/// Polls the shared session until the callback stored a token or the
/// timeout elapses.
async fn wait_for_token(session: Arc<Mutex<Option<AuthSession>>>) -> Option<TokenResponse> {
    let start = tokio::time::Instant::now();

    while start.elapsed() < AUTH_TIMEOUT {
        {
            let lock = session.lock().await;
            if let Some(token) = lock.as_ref().and_then(|s| s.token.clone()) {
                return Some(token);
            }
        }
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    None
}
