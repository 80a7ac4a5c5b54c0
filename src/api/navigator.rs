//! Login Navigation
//!
//! Side effect performed when the backend rejects the credential.

pub trait Navigator: Send + Sync {
    fn redirect_to_login(&self);
}

/// Full page navigation through `window.location`
pub struct BrowserNavigator {
    login_path: String,
}

impl BrowserNavigator {
    pub fn new(login_path: &str) -> Self {
        Self { login_path: login_path.to_string() }
    }
}

impl Navigator for BrowserNavigator {
    fn redirect_to_login(&self) {
        let Some(window) = web_sys::window() else {
            return;
        };
        if let Err(e) = window.location().set_href(&self.login_path) {
            log::error!("[AUTH] navigation to {} failed: {:?}", self.login_path, e);
        }
    }
}
