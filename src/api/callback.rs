use std::{collections::HashMap, sync::Arc};

use axum::{Extension, extract::Query, response::Html};
use reqwest::Client;
use tokio::sync::Mutex;

use crate::{config::AuthSetup, spotify::auth::exchange_code, types::AuthSession, warning};

/// Receives the authorization redirect of the `auth` command.
///
/// Checks the `state` parameter against the pending session, exchanges the
/// code and stores the token pair so the waiting command can print it.
pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(shared_session): Extension<Arc<Mutex<Option<AuthSession>>>>,
    Extension(setup): Extension<Arc<AuthSetup>>,
) -> Html<&'static str> {
    if let Some(reason) = params.get("error") {
        warning!("Authorization was denied: {}", reason);
        return Html("<h4>Authorization denied.</h4>");
    }

    let Some(code) = params.get("code") else {
        return Html("<h4>Missing authorization code.</h4>");
    };

    let mut session = shared_session.lock().await;
    let Some(pending) = session.as_mut() else {
        return Html("<h4>No authorization in progress.</h4>");
    };

    if params.get("state") != Some(&pending.state) {
        return Html("<h4>State mismatch, please retry.</h4>");
    }

    match exchange_code(&Client::new(), &setup, code).await {
        Ok(token) => {
            pending.token = Some(token);
            Html("<h2>Authentication successful.</h2><p>You can close this window.</p>")
        }
        Err(e) => {
            warning!("Token exchange failed: {}", e);
            Html("<h4>Login failed.</h4>")
        }
    }
}
