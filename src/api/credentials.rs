//! Credential Store
//!
//! Holds the bearer token. The browser implementation keeps it in a
//! site-wide cookie so it survives reloads.

use std::sync::Mutex;

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};
use wasm_bindgen::JsCast;

/// Read/write/delete one token string
pub trait CredentialStore: Send + Sync {
    fn get(&self) -> Option<String>;
    fn set(&self, token: &str);
    fn clear(&self);

    fn is_present(&self) -> bool {
        self.get().is_some()
    }
}

/// Characters not allowed raw in a cookie value
const COOKIE_VALUE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'%')
    .add(b',')
    .add(b';')
    .add(b'\\');

/// Token stored in `document.cookie`
pub struct CookieCredentialStore {
    name: String,
}

impl CookieCredentialStore {
    pub fn new(name: &str) -> Self {
        Self { name: name.to_string() }
    }

    fn document() -> Option<web_sys::HtmlDocument> {
        web_sys::window()?.document()?.dyn_into::<web_sys::HtmlDocument>().ok()
    }

    fn write(&self, cookie: &str) {
        let written = Self::document().map(|doc| doc.set_cookie(cookie));
        if !matches!(written, Some(Ok(()))) {
            log::error!("[AUTH] failed to write cookie {}", self.name);
        }
    }
}

impl CredentialStore for CookieCredentialStore {
    fn get(&self) -> Option<String> {
        let jar = Self::document()?.cookie().ok()?;
        find_cookie(&jar, &self.name)
    }

    fn set(&self, token: &str) {
        self.write(&set_cookie_string(&self.name, token));
    }

    fn clear(&self) {
        self.write(&expire_cookie_string(&self.name));
    }
}

/// Find and decode cookie `name` in a `document.cookie` string
pub fn find_cookie(jar: &str, name: &str) -> Option<String> {
    jar.split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| percent_decode_str(value).decode_utf8_lossy().into_owned())
        .filter(|value| !value.is_empty())
}

pub fn set_cookie_string(name: &str, value: &str) -> String {
    format!("{}={}; path=/", name, utf8_percent_encode(value, COOKIE_VALUE))
}

pub fn expire_cookie_string(name: &str) -> String {
    format!("{}=; path=/; expires=Thu, 01 Jan 1970 00:00:00 GMT", name)
}

/// Process-local store used off-browser
#[derive(Default)]
pub struct MemoryCredentialStore {
    token: Mutex<Option<String>>,
}

impl MemoryCredentialStore {
    pub fn new(token: Option<&str>) -> Self {
        Self { token: Mutex::new(token.map(str::to_string)) }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn get(&self) -> Option<String> {
        self.token.lock().ok()?.clone()
    }

    fn set(&self, token: &str) {
        if let Ok(mut slot) = self.token.lock() {
            *slot = Some(token.to_string());
        }
    }

    fn clear(&self) {
        if let Ok(mut slot) = self.token.lock() {
            *slot = None;
        }
    }
}
