use std::env;
use std::sync::Arc;

use dotenvy::dotenv;

use newsdesk::domain::news::NewsArticleSummary;
use newsdesk::dto::home::HomeQuery;
use newsdesk::forms::auth::LoginForm;
use newsdesk::http::HttpClient;
use newsdesk::models::config::ClientConfig;
use newsdesk::notice::NoticeQueue;
use newsdesk::repository::NewsListQuery;
use newsdesk::repository::http::HttpRepository;
use newsdesk::routes::{History, Navigator, Route};
use newsdesk::services::{auth, home, news};
use newsdesk::session::{FileStore, MemoryStore, Session};
use newsdesk::view::ListViewModel;
use newsdesk::view::category_tree::flatten;

fn main() {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = match ClientConfig::load() {
        Ok(config) => config,
        Err(err) => {
            log::error!("Error loading client config: {err}");
            std::process::exit(1);
        }
    };

    let session = match &config.session_file {
        Some(path) => match FileStore::open(path) {
            Ok(store) => Session::new(store),
            Err(err) => {
                log::error!("Error opening session file {}: {err}", path.display());
                std::process::exit(1);
            }
        },
        None => Session::new(MemoryStore::new()),
    };
    let session = Arc::new(session);
    let history = Arc::new(History::new(Route::Home));
    let notices = Arc::new(NoticeQueue::new());

    let client = match HttpClient::new(
        &config.api_base_url,
        config.timeout(),
        session.clone(),
        history.clone(),
    ) {
        Ok(client) => client,
        Err(err) => {
            log::error!("Error building HTTP client: {err}");
            std::process::exit(1);
        }
    };
    let repo = HttpRepository::new(Arc::new(client));

    if let (Ok(email), Ok(password)) = (env::var("NEWSDESK_EMAIL"), env::var("NEWSDESK_PASSWORD")) {
        history.navigate(Route::Login);
        match auth::login(
            &repo,
            &session,
            history.as_ref(),
            notices.as_ref(),
            LoginForm { email, password },
        ) {
            Ok(landing) => println!("Signed in, landing on {landing}"),
            Err(err) => println!("Sign-in failed: {err}"),
        }
    }

    if history.current() != Route::Home {
        auth::open(&session, history.as_ref(), Route::Home);
    }
    let page = home::load_home(&repo, &session, notices.as_ref(), &HomeQuery::default());

    println!("Categories:");
    for entry in flatten(&page.categories, None) {
        println!("  {}", entry.label());
    }

    println!(
        "Latest news (page {} of {}):",
        page.news.page_number,
        page.news.total_pages.max(1)
    );
    for article in &page.news.items {
        println!(
            "  [{}] {} - {}",
            article.created_date.format("%Y-%m-%d"),
            article.title,
            article.headline
        );
    }

    if session.is_staff() {
        let mut mine: ListViewModel<NewsListQuery, NewsArticleSummary> =
            config.list_view("my news articles", NewsListQuery::mine(), notices.clone());
        mine.reload(&|query: &NewsListQuery| news::list_my_news(&repo, &session, query));

        println!("My articles ({} in total):", mine.result().total_count);
        for article in mine.items() {
            println!("  {} [{}]", article.title, article.status.label());
        }
    }

    for notice in notices.drain() {
        println!("{}: {}", notice.css_class(), notice.message);
    }
}
