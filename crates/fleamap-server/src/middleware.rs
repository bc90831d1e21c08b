//! Request plumbing for the HTTP surface: request ids, bearer keys, and a
//! global request quota in front of the geocoding routes.

use std::{
    collections::HashSet,
    sync::{Arc, Mutex, PoisonError},
    time::{Duration, Instant},
};

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, header::RETRY_AFTER, HeaderMap, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
};
use fleamap_core::Environment;
use tracing::Instrument;
use uuid::Uuid;

use crate::api::ApiError;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Request ID stored as a request extension and echoed in response bodies.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

/// Accepted bearer keys. `None` means auth is off.
#[derive(Debug, Clone)]
pub struct AuthState {
    keys: Option<Arc<HashSet<String>>>,
}

impl AuthState {
    /// Reads `FLEAMAP_API_KEYS`; see [`AuthState::from_keys`].
    pub fn from_env(env: Environment) -> anyhow::Result<Self> {
        Self::from_keys(
            &std::env::var("FLEAMAP_API_KEYS").unwrap_or_default(),
            env,
        )
    }

    /// Parses a comma-separated key list. An empty list turns auth off in
    /// development and is a startup error anywhere else.
    pub fn from_keys(raw: &str, env: Environment) -> anyhow::Result<Self> {
        let keys: HashSet<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(ToOwned::to_owned)
            .collect();

        match (keys.is_empty(), env) {
            (false, _) => Ok(Self {
                keys: Some(Arc::new(keys)),
            }),
            (true, Environment::Development) => {
                tracing::warn!("FLEAMAP_API_KEYS is empty; geocoding routes are unauthenticated");
                Ok(Self::disabled())
            }
            (true, env) => anyhow::bail!("FLEAMAP_API_KEYS must list at least one key in {env}"),
        }
    }

    #[must_use]
    pub fn disabled() -> Self {
        Self { keys: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.keys.is_some()
    }

    fn admits(&self, headers: &HeaderMap) -> bool {
        let Some(keys) = &self.keys else {
            return true;
        };
        bearer_token(headers).is_some_and(|token| keys.contains(token))
    }
}

/// Request count inside the current window.
#[derive(Debug)]
struct Window {
    opened_at: Instant,
    used: usize,
}

impl Window {
    /// Counts one request at `now`, or returns how long until the window
    /// reopens.
    fn admit(&mut self, now: Instant, limit: usize, length: Duration) -> Result<(), Duration> {
        let age = now.saturating_duration_since(self.opened_at);
        if age >= length {
            self.opened_at = now;
            self.used = 0;
        }
        if self.used >= limit {
            return Err(length.saturating_sub(now.saturating_duration_since(self.opened_at)));
        }
        self.used += 1;
        Ok(())
    }
}

/// One fixed window shared by every protected route. Each geocoding request
/// can fan out into several Kakao calls, so this bounds provider quota use.
#[derive(Debug, Clone)]
pub struct RateLimitState {
    limit: usize,
    length: Duration,
    window: Arc<Mutex<Window>>,
}

impl RateLimitState {
    #[must_use]
    pub fn new(limit: usize, length: Duration) -> Self {
        Self {
            limit,
            length,
            window: Arc::new(Mutex::new(Window {
                opened_at: Instant::now(),
                used: 0,
            })),
        }
    }

    fn admit(&self) -> Result<(), Duration> {
        self.window
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .admit(Instant::now(), self.limit, self.length)
    }
}

fn current_request_id(req: &Request) -> String {
    req.extensions()
        .get::<RequestId>()
        .map(|id| id.0.clone())
        .unwrap_or_default()
}

/// Reuses the caller's `x-request-id` or mints a `UUIDv4`, stores it as a
/// [`RequestId`] extension, runs the handler inside a `request` span, and
/// echoes the id on the response.
pub async fn request_id(mut req: Request, next: Next) -> Response {
    let id = req
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map_or_else(|| Uuid::new_v4().to_string(), ToOwned::to_owned);
    let span = tracing::info_span!(
        "request",
        request_id = %id,
        method = %req.method(),
        path = %req.uri().path(),
    );
    req.extensions_mut().insert(RequestId(id.clone()));

    let mut res = next.run(req).instrument(span).await;
    if let Ok(value) = HeaderValue::from_str(&id) {
        res.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    res
}

pub async fn require_bearer_auth(
    State(auth): State<AuthState>,
    req: Request,
    next: Next,
) -> Response {
    if auth.admits(req.headers()) {
        return next.run(req).await;
    }
    tracing::debug!("bearer token missing or unknown");
    ApiError::new(
        current_request_id(&req),
        "unauthorized",
        "missing or invalid bearer token",
    )
    .into_response()
}

/// Rejects with 429 and `Retry-After` (whole seconds, at least 1) once the
/// window is spent.
pub async fn enforce_rate_limit(
    State(rate_limit): State<RateLimitState>,
    req: Request,
    next: Next,
) -> Response {
    match rate_limit.admit() {
        Ok(()) => next.run(req).await,
        Err(wait) => {
            let retry_after = wait.as_secs().max(1);
            tracing::warn!(retry_after, "rate limit exceeded");
            let mut res = ApiError::new(
                current_request_id(&req),
                "rate_limited",
                "rate limit exceeded",
            )
            .into_response();
            res.headers_mut()
                .insert(RETRY_AFTER, HeaderValue::from(retry_after));
            res
        }
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}
