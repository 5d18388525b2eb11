//! Session wiring: bearer-token cache, session lookup, credential exchange and
//! the destructive sign-out cleanup.

use std::cell::RefCell;

use gloo_console::{error, warn};
use gloo_net::http::Request;
use serde::Deserialize;
use thiserror::Error;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::RequestCredentials;

use crate::api::API_BASE_URL;

/// Session lookups are cached for five minutes to avoid one async lookup per
/// outgoing request. Expiry is evaluated lazily on the next `get`, never by a
/// timer.
pub const CACHE_DURATION_MS: f64 = 5.0 * 60.0 * 1000.0;

struct CacheEntry {
    token: Option<String>,
    stored_at_ms: f64,
}

/// Process-scoped token cache with an explicit lifecycle: starts empty, filled
/// lazily on the first authenticated request, invalidated on sign-out and
/// implicitly after the TTL. The clock is passed in so tests can fake it.
pub struct TokenCache {
    ttl_ms: f64,
    entry: RefCell<Option<CacheEntry>>,
}

impl TokenCache {
    pub const fn new(ttl_ms: f64) -> Self {
        Self {
            ttl_ms,
            entry: RefCell::new(None),
        }
    }

    /// `Some(token)` on a fresh hit (the inner option is the cached lookup
    /// result, which may legitimately be "no session"); `None` on miss or
    /// expiry.
    pub fn get(&self, now_ms: f64) -> Option<Option<String>> {
        let entry = self.entry.borrow();
        match entry.as_ref() {
            Some(e) if now_ms - e.stored_at_ms <= self.ttl_ms => Some(e.token.clone()),
            _ => None,
        }
    }

    pub fn put(&self, token: Option<String>, now_ms: f64) {
        *self.entry.borrow_mut() = Some(CacheEntry {
            token,
            stored_at_ms: now_ms,
        });
    }

    pub fn invalidate(&self) {
        *self.entry.borrow_mut() = None;
    }
}

thread_local! {
    static TOKEN_CACHE: TokenCache = TokenCache::new(CACHE_DURATION_MS);
}

#[derive(Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub id: i64,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub email: String,
    pub role: String,
    #[serde(default)]
    pub sucursales: Vec<String>,
    #[serde(default)]
    pub permissions: Vec<String>,
}

impl SessionUser {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

#[derive(Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user: SessionUser,
    pub access_token: String,
}

#[derive(Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginResponse {
    user: SessionUser,
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
}

#[derive(Debug, Error)]
pub enum LoginError {
    #[error("credenciales inválidas")]
    InvalidCredentials,
    #[error("error de red: {0}")]
    Network(#[from] gloo_net::Error),
}

/// Reads the current session from the auth layer. Any failure, including an
/// unauthorized response, is reported as "no session" so route guards can
/// redirect instead of crashing.
pub async fn fetch_session() -> Option<Session> {
    let url = format!("{}/auth/session", API_BASE_URL);
    let resp = Request::get(&url)
        .credentials(RequestCredentials::Include)
        .send()
        .await
        .ok()?;
    if !resp.ok() {
        return None;
    }
    resp.json::<Session>().await.ok()
}

/// Exchanges credentials for a session. The auth layer keeps the token in a
/// signed httpOnly cookie; on success the in-memory cache is primed so the
/// first API call does not need a second session lookup.
pub async fn login(email: &str, password: &str) -> Result<Session, LoginError> {
    let url = format!("{}/auth/login", API_BASE_URL);
    let body = serde_json::json!({ "email": email, "password": password });
    let resp = Request::post(&url)
        .credentials(RequestCredentials::Include)
        .json(&body)?
        .send()
        .await?;
    if !resp.ok() {
        return Err(LoginError::InvalidCredentials);
    }
    let data: LoginResponse = resp.json().await?;
    TOKEN_CACHE.with(|cache| cache.put(Some(data.access_token.clone()), js_sys::Date::now()));
    Ok(Session {
        user: data.user,
        access_token: data.access_token,
    })
}

/// Resolves the bearer token for an outgoing request, consulting the cache
/// first. A failed session lookup is cached as "no token" for the TTL.
pub async fn resolve_token() -> Option<String> {
    let now = js_sys::Date::now();
    if let Some(cached) = TOKEN_CACHE.with(|cache| cache.get(now)) {
        return cached;
    }
    let token = fetch_session().await.map(|s| s.access_token);
    TOKEN_CACHE.with(|cache| cache.put(token.clone(), now));
    token
}

pub fn invalidate_token_cache() {
    TOKEN_CACHE.with(|cache| cache.invalidate());
}

/// Cookies the auth layer may have written, expired under every plausible
/// path/domain combination.
pub const AUTH_COOKIES: [&str; 5] = [
    "negofinanzas.session-token",
    "negofinanzas.callback-url",
    "negofinanzas.csrf-token",
    "__Secure-negofinanzas.session-token",
    "__Host-negofinanzas.csrf-token",
];

const EXPIRED: &str = "expires=Thu, 01 Jan 1970 00:00:00 UTC";

pub fn expired_cookie_strings() -> Vec<String> {
    let mut out = Vec::with_capacity(AUTH_COOKIES.len() * 4);
    for name in AUTH_COOKIES {
        out.push(format!("{}=; {}; path=/;", name, EXPIRED));
        out.push(format!("{}=; {}; path=/; domain=localhost;", name, EXPIRED));
        out.push(format!("{}=; {}; path=/; domain=.localhost;", name, EXPIRED));
        out.push(format!("{}=; {}; path=/; secure;", name, EXPIRED));
    }
    out
}

fn clear_auth_cookies() {
    if let Some(window) = web_sys::window() {
        if let Some(document) = window.document() {
            if let Ok(html_doc) = document.dyn_into::<web_sys::HtmlDocument>() {
                for cookie in expired_cookie_strings() {
                    let _ = html_doc.set_cookie(&cookie);
                }
            }
        }
    }
}

fn clear_client_storage() {
    if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            let _ = storage.clear();
        }
        if let Ok(Some(storage)) = window.session_storage() {
            let _ = storage.clear();
        }
    }
}

async fn clear_cache_storage() {
    if let Some(window) = web_sys::window() {
        if let Ok(caches) = window.caches() {
            if let Ok(keys) = JsFuture::from(caches.keys()).await {
                for key in js_sys::Array::from(&keys).iter() {
                    if let Some(name) = key.as_string() {
                        let _ = JsFuture::from(caches.delete(&name)).await;
                    }
                }
            }
        }
    }
}

pub fn navigate_to_sign_in() {
    if let Some(window) = web_sys::window() {
        if window.location().set_href("/auth/signin").is_err() {
            error!("no se pudo navegar a /auth/signin");
        }
    }
}

/// Destructive, idempotent, best-effort sign-out. Every step tolerates failure;
/// the forced full navigation at the end always happens, so a broken step can
/// never strand the user in an authenticated-looking state.
pub async fn sign_out() {
    invalidate_token_cache();
    clear_auth_cookies();
    clear_client_storage();
    clear_cache_storage().await;

    let url = format!("{}/auth/logout", API_BASE_URL);
    if Request::post(&url)
        .credentials(RequestCredentials::Include)
        .send()
        .await
        .is_err()
    {
        warn!("fallo el logout remoto, se continúa con la navegación");
    }

    navigate_to_sign_in();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_starts_empty() {
        let cache = TokenCache::new(CACHE_DURATION_MS);
        assert!(cache.get(0.0).is_none());
    }

    #[test]
    fn cache_returns_fresh_entries_only() {
        let cache = TokenCache::new(CACHE_DURATION_MS);
        cache.put(Some("abc".to_string()), 1_000.0);

        assert_eq!(cache.get(1_000.0), Some(Some("abc".to_string())));
        assert_eq!(
            cache.get(1_000.0 + CACHE_DURATION_MS),
            Some(Some("abc".to_string()))
        );
        assert!(cache.get(1_000.0 + CACHE_DURATION_MS + 1.0).is_none());
    }

    #[test]
    fn cache_remembers_a_failed_lookup() {
        let cache = TokenCache::new(CACHE_DURATION_MS);
        cache.put(None, 50.0);
        // Fresh hit whose payload is "no session": callers must not retry the
        // lookup until the TTL passes.
        assert_eq!(cache.get(60.0), Some(None));
    }

    #[test]
    fn invalidate_is_immediate_and_idempotent() {
        let cache = TokenCache::new(CACHE_DURATION_MS);
        cache.put(Some("abc".to_string()), 0.0);
        cache.invalidate();
        assert!(cache.get(0.0).is_none());
        cache.invalidate();
        assert!(cache.get(0.0).is_none());
    }

    #[test]
    fn expired_cookies_cover_every_name_and_variant() {
        let strings = expired_cookie_strings();
        assert_eq!(strings.len(), AUTH_COOKIES.len() * 4);
        for name in AUTH_COOKIES {
            let for_name: Vec<_> = strings
                .iter()
                .filter(|s| s.starts_with(&format!("{}=;", name)))
                .collect();
            assert_eq!(for_name.len(), 4);
            assert!(for_name.iter().all(|s| s.contains("01 Jan 1970")));
            assert!(for_name.iter().any(|s| s.contains("domain=localhost")));
            assert!(for_name.iter().any(|s| s.contains("domain=.localhost")));
            assert!(for_name.iter().any(|s| s.contains("secure")));
        }
    }
}
