use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{management::TokenManager, types::Token};

/// Login state of the one user this process serves.
///
/// One session per process: whoever logs in controls playback for everyone
/// using this instance.
#[derive(Debug, Default)]
pub struct Session {
    pending_state: Option<String>,
    tokens: Option<TokenManager>,
    user: Option<String>,
}

pub type SharedSession = Arc<Mutex<Session>>;

impl Session {
    pub fn shared() -> SharedSession {
        Arc::new(Mutex::new(Session::default()))
    }

    /// Remembers the `state` sent with the latest authorization URL.
    pub fn begin_login(&mut self, state: String) {
        self.pending_state = Some(state);
    }

    pub fn pending_state(&self) -> Option<&str> {
        self.pending_state.as_deref()
    }

    pub fn complete_login(&mut self, token: Token, user: String) {
        self.pending_state = None;
        self.tokens = Some(TokenManager::new(token));
        self.user = Some(user);
    }

    pub fn is_authenticated(&self) -> bool {
        self.tokens.is_some()
    }

    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    pub fn tokens(&self) -> Option<&TokenManager> {
        self.tokens.as_ref()
    }

    /// Stores a refreshed token, unless the user logged out in the meantime.
    pub fn update_tokens(&mut self, manager: TokenManager) {
        if self.tokens.is_some() {
            self.tokens = Some(manager);
        }
    }

    pub fn logout(&mut self) {
        *self = Session::default();
    }
}
