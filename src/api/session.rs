// src/api/session.rs
//! Current-session lookup.
//!
//! `fetch_current_user` is the raw call; `check_session` and `watch_session`
//! never fail: a missing session, a 401, a non-2xx status or a transport
//! error all resolve to "no user" once the request finishes.

use tokio::sync::watch;
use tracing::{error, info};

use crate::core::ServiceClient;
use crate::error::ApiResult;
use crate::types::{SessionState, User};

impl ServiceClient {
    /// `Ok(None)` when the backend answers 401, i.e. nobody is logged in.
    pub async fn fetch_current_user(&self) -> ApiResult<Option<User>> {
        match self.get_json::<User>("Fetch current user", &["me"], &[]).await {
            Ok(user) => Ok(Some(user)),
            Err(err) if err.is_unauthorized() => Ok(None),
            Err(err) => Err(err),
        }
    }
}

/// One request to `/me`, resolved to a final state.
pub async fn check_session(client: &ServiceClient) -> SessionState {
    match client.fetch_current_user().await {
        Ok(Some(user)) => {
            info!(
                "Session belongs to {}",
                user.email.as_deref().unwrap_or("unknown user")
            );
            SessionState::resolved(Some(user))
        }
        Ok(None) => {
            info!("User not authenticated");
            SessionState::resolved(None)
        }
        Err(err) => {
            error!("Failed to fetch user: {}", err);
            SessionState::resolved(None)
        }
    }
}

/// Start the session check in the background.
///
/// The receiver starts at `{user: None, is_loading: true}` and changes exactly
/// once, to the resolved state. There is no retry and no revalidation.
pub fn watch_session(client: ServiceClient) -> watch::Receiver<SessionState> {
    let (tx, rx) = watch::channel(SessionState::loading());
    tokio::spawn(async move {
        let state = check_session(&client).await;
        tx.send_replace(state);
    });
    rx
}
