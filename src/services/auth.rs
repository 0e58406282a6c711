//! Sign-in, sign-out and guarded navigation.

use crate::domain::account::Credentials;
use crate::forms::auth::LoginForm;
use crate::notice::{Notice, Notifier};
use crate::repository::AuthGateway;
use crate::routes::{self, Navigator, Route};
use crate::services::{ServiceError, ServiceResult};
use crate::session::Session;

const INVALID_CREDENTIALS: &str = "Invalid email or password. Please try again.";
const LOGIN_FAILED: &str = "Login failed";
const UNDECODABLE_TOKEN: &str = "Failed to decode user information";

/// Signs in and moves to the dashboard matching the account role.
///
/// Failures leave the session anonymous and carry the message to show next
/// to the form, which is the server's own text whenever it sent one.
pub fn login<R>(
    repo: &R,
    session: &Session,
    navigator: &dyn Navigator,
    notifier: &dyn Notifier,
    form: LoginForm,
) -> ServiceResult<Route>
where
    R: AuthGateway + ?Sized,
{
    let credentials = Credentials::try_from(form)?;

    let response = repo.login(&credentials).map_err(|err| {
        log::error!("Failed to sign in {}: {err}", credentials.email);
        ServiceError::Form(
            err.server_message()
                .unwrap_or(INVALID_CREDENTIALS)
                .to_string(),
        )
    })?;

    let token = match (&response.data, response.is_ok()) {
        (Some(token), true) if !token.is_empty() => token.clone(),
        _ => {
            let message = response.message().unwrap_or(LOGIN_FAILED).to_string();
            log::warn!("Sign-in rejected for {}: {message}", credentials.email);
            return Err(ServiceError::Form(message));
        }
    };

    let claims = session.login(&token).map_err(|err| {
        log::error!("Failed to decode token for {}: {err}", credentials.email);
        ServiceError::Form(UNDECODABLE_TOKEN.to_string())
    })?;

    let landing = routes::landing_for(&claims.role);
    navigator.navigate(landing);
    notifier.notify(Notice::success(format!("Welcome back, {}!", claims.email)));

    Ok(landing)
}

/// Ends the session and returns to the public homepage, where the logout
/// notice is shown once.
pub fn logout(session: &Session, navigator: &dyn Navigator) {
    session.logout();
    navigator.navigate(Route::Home);
}

/// Opens `route` if the session passes its guard, otherwise the redirect
/// target. Returns the view that was opened.
pub fn open(session: &Session, navigator: &dyn Navigator, route: Route) -> Route {
    let now = chrono::Utc::now().timestamp();
    let target = match routes::guard(session, route, now) {
        Ok(()) => route,
        Err(redirect) => {
            log::info!("Access to {route} denied, redirecting to {redirect}");
            redirect
        }
    };
    navigator.navigate(target);
    target
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::dto::api::ApiResponse;
    use crate::notice::NoticeQueue;
    use crate::repository::errors::{RepositoryError, RepositoryResult};
    use crate::routes::History;
    use crate::session::test_support::{admin_token, lecturer_token, staff_token};

    struct MockRepo {
        reply: RefCell<Option<RepositoryResult<ApiResponse<String>>>>,
        seen: RefCell<Vec<String>>,
    }

    impl MockRepo {
        fn replying(reply: RepositoryResult<ApiResponse<String>>) -> Self {
            Self {
                reply: RefCell::new(Some(reply)),
                seen: RefCell::new(Vec::new()),
            }
        }
    }

    impl AuthGateway for MockRepo {
        fn login(&self, credentials: &Credentials) -> RepositoryResult<ApiResponse<String>> {
            self.seen.borrow_mut().push(credentials.email.clone());
            self.reply
                .borrow_mut()
                .take()
                .unwrap_or_else(|| Err(RepositoryError::Unexpected("called twice".into())))
        }
    }

    fn form() -> LoginForm {
        LoginForm {
            email: "admin@news.io".into(),
            password: "secret".into(),
        }
    }

    #[test]
    fn admin_lands_on_admin_dashboard() {
        let repo = MockRepo::replying(Ok(ApiResponse::ok("Login successful", admin_token())));
        let session = Session::in_memory();
        let history = History::new(Route::Login);
        let notices = NoticeQueue::new();

        let landing = login(&repo, &session, &history, &notices, form()).unwrap();

        assert_eq!(landing, Route::Admin);
        assert_eq!(history.current(), Route::Admin);
        assert!(session.is_admin());
        assert_eq!(
            notices.drain(),
            vec![Notice::success("Welcome back, admin@news.io!")]
        );
    }

    #[test]
    fn staff_and_lecturer_landings() {
        let session = Session::in_memory();
        let history = History::new(Route::Login);
        let notices = NoticeQueue::new();

        let repo = MockRepo::replying(Ok(ApiResponse::ok("", staff_token())));
        assert_eq!(
            login(&repo, &session, &history, &notices, form()).unwrap(),
            Route::Staff
        );

        let repo = MockRepo::replying(Ok(ApiResponse::ok("", lecturer_token())));
        assert_eq!(
            login(&repo, &session, &history, &notices, form()).unwrap(),
            Route::Home
        );
    }

    #[test]
    fn invalid_credentials_show_server_message() {
        let repo = MockRepo::replying(Err(RepositoryError::from_status(
            401,
            Some("Email or password is incorrect".into()),
        )));
        let session = Session::in_memory();
        let history = History::new(Route::Login);
        let notices = NoticeQueue::new();

        let err = login(&repo, &session, &history, &notices, form()).unwrap_err();

        assert_eq!(err.user_message("sign in"), "Email or password is incorrect");
        assert!(session.token().is_none());
        assert_eq!(history.current(), Route::Login);
        assert!(notices.is_empty());
    }

    #[test]
    fn missing_fields_never_reach_the_server() {
        let repo = MockRepo::replying(Ok(ApiResponse::ok("", admin_token())));
        let session = Session::in_memory();
        let history = History::new(Route::Login);
        let notices = NoticeQueue::new();

        let err = login(
            &repo,
            &session,
            &history,
            &notices,
            LoginForm {
                email: "admin@news.io".into(),
                password: String::new(),
            },
        )
        .unwrap_err();

        assert_eq!(err.to_string(), "Password is required");
        assert!(repo.seen.borrow().is_empty());
    }

    #[test]
    fn non_ok_envelope_is_rejected() {
        let repo = MockRepo::replying(Ok(ApiResponse {
            message: "Account locked".into(),
            status_code: "BadRequest".into(),
            data: None,
        }));
        let session = Session::in_memory();
        let history = History::new(Route::Login);
        let notices = NoticeQueue::new();

        let err = login(&repo, &session, &history, &notices, form()).unwrap_err();
        assert_eq!(err.to_string(), "Account locked");
    }

    #[test]
    fn undecodable_token_is_reported() {
        let repo = MockRepo::replying(Ok(ApiResponse::ok("", "garbage".to_string())));
        let session = Session::in_memory();
        let history = History::new(Route::Login);
        let notices = NoticeQueue::new();

        let err = login(&repo, &session, &history, &notices, form()).unwrap_err();
        assert_eq!(err.to_string(), UNDECODABLE_TOKEN);
        assert!(session.token().is_none());
    }

    #[test]
    fn logout_returns_home_with_notice_armed() {
        let session = Session::in_memory();
        session.login(&admin_token()).unwrap();
        let history = History::new(Route::Admin);

        logout(&session, &history);

        assert_eq!(history.current(), Route::Home);
        assert!(session.take_logout_notice());
    }

    #[test]
    fn open_redirects_anonymous_users() {
        let session = Session::in_memory();
        let history = History::default();
        assert_eq!(open(&session, &history, Route::Staff), Route::Login);

        session.login(&staff_token()).unwrap();
        assert_eq!(open(&session, &history, Route::Staff), Route::Staff);
    }
}
