//! Blocking JSON client for the news platform REST API.
//!
//! Every request carries the session's bearer token when one is stored.
//! Failures are classified into [`RepositoryError`] and passed through
//! [`intercept`] before being returned. Nothing is retried.

use std::sync::Arc;
use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::dto::api::{ApiErrorBody, ApiResponse};
use crate::repository::Params;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::routes::{Navigator, Route};
use crate::session::Session;

pub struct HttpClient {
    client: Client,
    base_url: String,
    session: Arc<Session>,
    navigator: Arc<dyn Navigator>,
}

impl HttpClient {
    pub fn new(
        base_url: &str,
        timeout: Duration,
        session: Arc<Session>,
        navigator: Arc<dyn Navigator>,
    ) -> RepositoryResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
            navigator,
        })
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    pub fn navigator(&self) -> &Arc<dyn Navigator> {
        &self.navigator
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &Params,
    ) -> RepositoryResult<ApiResponse<T>> {
        self.send(self.client.get(self.url(path)).query(params))
    }

    pub fn post<B, T>(&self, path: &str, body: &B) -> RepositoryResult<ApiResponse<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(self.client.post(self.url(path)).json(body))
    }

    pub fn put<B, T>(&self, path: &str, body: &B) -> RepositoryResult<ApiResponse<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(self.client.put(self.url(path)).json(body))
    }

    pub fn delete<T: DeserializeOwned>(&self, path: &str) -> RepositoryResult<ApiResponse<T>> {
        self.send(self.client.delete(self.url(path)))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.session.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> RepositoryResult<ApiResponse<T>> {
        let result = self
            .authorize(request)
            .send()
            .map_err(RepositoryError::from)
            .and_then(parse_response);

        if let Err(err) = &result {
            intercept(err, &self.session, self.navigator.as_ref());
        }
        result
    }
}

/// Turns a non-2xx response into a [`RepositoryError`], keeping the
/// `message` of the error body.
fn ensure_success(response: Response) -> RepositoryResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response
        .text()
        .ok()
        .and_then(|body| serde_json::from_str::<ApiErrorBody>(&body).ok())
        .and_then(|body| body.message);

    Err(RepositoryError::from_status(status.as_u16(), message))
}

fn parse_response<T: DeserializeOwned>(response: Response) -> RepositoryResult<ApiResponse<T>> {
    let response = ensure_success(response)?;
    let body = response.text()?;
    if body.trim().is_empty() {
        return Ok(ApiResponse::default());
    }
    Ok(serde_json::from_str(&body)?)
}

/// Reacts to a failed call.
///
/// A 401 outside the public views ends the session and sends the user to the
/// login view; on public views it is left to the caller. Other failures are
/// traced at debug level and left to the caller to report.
pub fn intercept(err: &RepositoryError, session: &Session, navigator: &dyn Navigator) {
    match err {
        RepositoryError::Unauthorized(_) => {
            let current = navigator.current();
            if current.is_public() {
                log::debug!("Unauthorized response on public view {current}");
            } else {
                log::warn!("Session rejected by the server on {current}, signing out");
                session.clear();
                navigator.navigate(Route::Login);
            }
        }
        RepositoryError::Forbidden(_) => log::debug!("Forbidden: access denied"),
        RepositoryError::NotFound(_) => log::debug!("Not found: resource does not exist"),
        RepositoryError::Server { status, .. } => log::debug!("Server error ({status})"),
        RepositoryError::Network(message) => {
            log::debug!("Network error: cannot reach the server: {message}")
        }
        other => log::debug!("Request failed: {other}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::History;
    use crate::session::test_support::admin_token;

    fn signed_in() -> Session {
        let session = Session::in_memory();
        session.login(&admin_token()).unwrap();
        session
    }

    #[test]
    fn unauthorized_on_protected_view_signs_out() {
        let session = signed_in();
        let history = History::new(Route::Admin);

        intercept(&RepositoryError::Unauthorized(None), &session, &history);

        assert!(session.token().is_none());
        assert_eq!(history.current(), Route::Login);
    }

    #[test]
    fn unauthorized_on_public_view_passes_through() {
        let session = signed_in();
        let history = History::new(Route::Login);

        intercept(
            &RepositoryError::Unauthorized(Some("Invalid email or password".into())),
            &session,
            &history,
        );

        assert!(session.token().is_some());
        assert_eq!(history.visited(), vec![Route::Login]);
    }

    #[test]
    fn forbidden_keeps_session_and_view() {
        let session = signed_in();
        let history = History::new(Route::Staff);

        intercept(&RepositoryError::Forbidden(None), &session, &history);
        intercept(&RepositoryError::from_status(500, None), &session, &history);

        assert!(session.token().is_some());
        assert_eq!(history.current(), Route::Staff);
    }

    mod capture {
        use std::cell::RefCell;

        use log::{Level, LevelFilter, Log, Metadata, Record};

        thread_local! {
            static LEVELS: RefCell<Vec<Level>> = const { RefCell::new(Vec::new()) };
        }

        struct Capture;

        impl Log for Capture {
            fn enabled(&self, _: &Metadata) -> bool {
                true
            }

            fn log(&self, record: &Record) {
                LEVELS.with(|levels| levels.borrow_mut().push(record.level()));
            }

            fn flush(&self) {}
        }

        static LOGGER: Capture = Capture;

        /// Levels of the records logged on this thread while `f` runs.
        pub fn levels_during(f: impl FnOnce()) -> Vec<Level> {
            let _ = log::set_logger(&LOGGER);
            log::set_max_level(LevelFilter::Trace);
            LEVELS.with(|levels| levels.borrow_mut().clear());
            f();
            LEVELS.with(|levels| levels.borrow_mut().drain(..).collect())
        }
    }

    #[test]
    fn failures_other_than_unauthorized_are_only_traced() {
        let session = signed_in();
        let history = History::new(Route::Staff);

        let levels = capture::levels_during(|| {
            intercept(&RepositoryError::Forbidden(None), &session, &history);
            intercept(&RepositoryError::NotFound(None), &session, &history);
            intercept(&RepositoryError::from_status(503, None), &session, &history);
            intercept(&RepositoryError::Network("timed out".into()), &session, &history);
        });

        assert_eq!(levels, vec![log::Level::Debug; 4]);
    }

    #[test]
    fn url_joins_base_and_path() {
        let client = HttpClient::new(
            "https://localhost:7044/api/",
            Duration::from_secs(10),
            Arc::new(Session::in_memory()),
            Arc::new(History::default()),
        )
        .unwrap();

        assert_eq!(
            client.url("/Categories/dropdown"),
            "https://localhost:7044/api/Categories/dropdown"
        );
    }
}
