//! Paginated, filtered list screens (accounts, categories, my news).
//!
//! A [`ListViewModel`] owns the query state of one screen and turns every
//! meaningful change into exactly one request through a [`ListSource`].
//! Requests carry a sequence number; a response that is not for the latest
//! request issued is dropped, so a slow stale response never overwrites a
//! newer one.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::notice::{Notice, Notifier};
use crate::pagination::{PageResult, PageSize, Pagination, Sort};
use crate::repository::ListQuery;
use crate::services::ServiceResult;
use crate::view::debounce::{Debouncer, SEARCH_DEBOUNCE};

/// Fetches one page for a query. Closures over a service call qualify.
pub trait ListSource<Q, T> {
    fn fetch(&self, query: &Q) -> ServiceResult<PageResult<T>>;
}

impl<Q, T, F> ListSource<Q, T> for F
where
    F: Fn(&Q) -> ServiceResult<PageResult<T>>,
{
    fn fetch(&self, query: &Q) -> ServiceResult<PageResult<T>> {
        self(query)
    }
}

/// An issued request, handed back to [`ListViewModel::complete`] with its
/// response.
#[derive(Debug, Clone, PartialEq)]
pub struct ReloadTicket<Q> {
    seq: u64,
    pub query: Q,
}

impl<Q> ReloadTicket<Q> {
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    /// The page asked for is past the last page; the page number was
    /// clamped and the list needs another load.
    PageClamped,
    Failed,
    /// Superseded by a later request, or the screen is gone.
    Stale,
}

pub struct ListViewModel<Q: ListQuery, T> {
    label: String,
    query: Q,
    search_term: String,
    page_number: usize,
    page_size: PageSize,
    sort: Option<Sort>,
    result: PageResult<T>,
    total_pages: Option<usize>,
    loading: bool,
    error: Option<String>,
    issued: u64,
    debouncer: Debouncer,
    notifier: Arc<dyn Notifier>,
    torn_down: bool,
}

impl<Q: ListQuery, T> ListViewModel<Q, T> {
    /// `label` names the listed entities in failure messages, e.g.
    /// "accounts" gives "Failed to load accounts".
    pub fn new(label: impl Into<String>, query: Q, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            label: label.into(),
            query,
            search_term: String::new(),
            page_number: 1,
            page_size: PageSize::default(),
            sort: None,
            result: PageResult::default(),
            total_pages: None,
            loading: false,
            error: None,
            issued: 0,
            debouncer: Debouncer::new(SEARCH_DEBOUNCE),
            notifier,
            torn_down: false,
        }
    }

    pub fn with_debounce(mut self, window: Duration) -> Self {
        self.debouncer = Debouncer::new(window);
        self
    }

    pub fn with_page_size(mut self, page_size: PageSize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn query(&self) -> &Q {
        &self.query
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn page_number(&self) -> usize {
        self.page_number
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    pub fn sort(&self) -> Option<&Sort> {
        self.sort.as_ref()
    }

    pub fn result(&self) -> &PageResult<T> {
        &self.result
    }

    pub fn items(&self) -> &[T] {
        &self.result.items
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Message of the last failed load, cleared by the next success.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_search_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// The request the current state maps to.
    pub fn request(&self) -> Q {
        let mut query = self.query.clone();
        query.set_search(Some(self.search_term.clone()));
        query.set_pagination(Pagination::new(self.page_number, self.page_size.get()));
        if let Some(sort) = &self.sort {
            query.set_sort(Some(sort.clone()));
        }
        query
    }

    /// Marks the list as loading and issues a new request.
    pub fn begin_reload(&mut self) -> ReloadTicket<Q> {
        self.issued += 1;
        self.loading = true;
        ReloadTicket {
            seq: self.issued,
            query: self.request(),
        }
    }

    /// Applies the response to `ticket`.
    ///
    /// A failed load keeps the rows already on screen.
    pub fn complete(
        &mut self,
        ticket: ReloadTicket<Q>,
        response: ServiceResult<PageResult<T>>,
    ) -> Completion {
        if self.torn_down || ticket.seq != self.issued {
            log::debug!(
                "Dropping stale {} response #{} (latest #{})",
                self.label,
                ticket.seq,
                self.issued
            );
            return Completion::Stale;
        }

        self.loading = false;

        match response {
            Ok(page) => {
                self.error = None;
                self.total_pages = Some(page.total_pages);
                let last = page.total_pages.max(1);
                self.result = page;
                if self.page_number > last {
                    self.page_number = last;
                    Completion::PageClamped
                } else {
                    Completion::Applied
                }
            }
            Err(err) => {
                let action = format!("load {}", self.label);
                log::error!("Failed to {action}: {err}");
                let message = err.user_message(&action);
                self.notifier.notify(Notice::error(message.clone()));
                self.error = Some(message);
                Completion::Failed
            }
        }
    }

    /// Issues one request and applies its response.
    pub fn reload<S>(&mut self, source: &S) -> Completion
    where
        S: ListSource<Q, T> + ?Sized,
    {
        let ticket = self.begin_reload();
        let response = source.fetch(&ticket.query);
        match self.complete(ticket, response) {
            Completion::PageClamped => {
                let ticket = self.begin_reload();
                let response = source.fetch(&ticket.query);
                self.complete(ticket, response)
            }
            other => other,
        }
    }

    /// Updates one filter. Reloads from the first page when the value
    /// changed; returns whether it did.
    pub fn set_filter<S>(&mut self, filter: Q::Filter, source: &S) -> bool
    where
        S: ListSource<Q, T> + ?Sized,
    {
        if !self.query.apply(filter) {
            return false;
        }
        self.page_number = 1;
        self.reload(source);
        true
    }

    /// Records the search text and (re)starts the quiet period. The search
    /// runs from [`ListViewModel::tick`].
    pub fn set_search_term(&mut self, term: impl Into<String>, now: Instant) {
        self.search_term = term.into();
        self.debouncer.schedule(now);
    }

    /// Runs the pending search once its quiet period is over.
    pub fn tick<S>(&mut self, now: Instant, source: &S) -> bool
    where
        S: ListSource<Q, T> + ?Sized,
    {
        if !self.debouncer.poll(now) {
            return false;
        }
        self.page_number = 1;
        self.reload(source);
        true
    }

    /// Moves to page `page`. Out-of-range pages are ignored.
    pub fn set_page<S>(&mut self, page: usize, source: &S) -> bool
    where
        S: ListSource<Q, T> + ?Sized,
    {
        if page < 1 {
            return false;
        }
        if let Some(total) = self.total_pages
            && page > total.max(1)
        {
            return false;
        }
        self.page_number = page;
        self.reload(source);
        true
    }

    pub fn set_page_size<S>(&mut self, page_size: PageSize, source: &S)
    where
        S: ListSource<Q, T> + ?Sized,
    {
        self.page_size = page_size;
        self.page_number = 1;
        self.reload(source);
    }

    pub fn set_sort<S>(&mut self, sort: Sort, source: &S)
    where
        S: ListSource<Q, T> + ?Sized,
    {
        self.sort = Some(sort);
        self.reload(source);
    }

    /// Cancels the pending search; responses arriving afterwards are
    /// dropped.
    pub fn teardown(&mut self) {
        self.debouncer.cancel();
        self.torn_down = true;
        self.loading = false;
    }
}

impl<Q: ListQuery, T> std::fmt::Debug for ListViewModel<Q, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListViewModel")
            .field("label", &self.label)
            .field("query", &self.query)
            .field("search_term", &self.search_term)
            .field("page_number", &self.page_number)
            .field("page_size", &self.page_size)
            .field("loading", &self.loading)
            .field("issued", &self.issued)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::domain::types::Role;
    use crate::notice::NoticeQueue;
    use crate::repository::errors::RepositoryError;
    use crate::repository::{AccountFilter, AccountListQuery};
    use crate::services::ServiceError;

    #[derive(Default)]
    struct FakeSource {
        requests: RefCell<Vec<AccountListQuery>>,
        total: usize,
        fail: bool,
    }

    impl ListSource<AccountListQuery, u32> for FakeSource {
        fn fetch(&self, query: &AccountListQuery) -> ServiceResult<PageResult<u32>> {
            self.requests.borrow_mut().push(query.clone());
            if self.fail {
                return Err(ServiceError::from(RepositoryError::Network("down".into())));
            }
            let pagination = query.pagination.unwrap_or(Pagination::new(1, 10));
            Ok(PageResult::new(
                vec![pagination.page as u32],
                pagination.page,
                pagination.per_page,
                self.total,
            ))
        }
    }

    fn view(notices: &Arc<NoticeQueue>) -> ListViewModel<AccountListQuery, u32> {
        ListViewModel::new("accounts", AccountListQuery::new(), notices.clone())
    }

    #[test]
    fn filter_change_resets_page_and_reloads_once() {
        let notices = Arc::new(NoticeQueue::new());
        let source = FakeSource {
            total: 45,
            ..Default::default()
        };
        let mut list = view(&notices);
        list.reload(&source);
        assert!(list.set_page(3, &source));

        assert!(list.set_filter(AccountFilter::Role(Some(Role::Staff)), &source));
        assert!(!list.set_filter(AccountFilter::Role(Some(Role::Staff)), &source));

        assert_eq!(list.page_number(), 1);
        assert_eq!(source.requests.borrow().len(), 3);
        assert_eq!(source.requests.borrow()[2].role, Some(Role::Staff));
    }

    #[test]
    fn out_of_range_pages_are_ignored() {
        let notices = Arc::new(NoticeQueue::new());
        let source = FakeSource {
            total: 25,
            ..Default::default()
        };
        let mut list = view(&notices);
        list.reload(&source);

        assert!(!list.set_page(0, &source));
        assert!(!list.set_page(4, &source));
        assert!(list.set_page(3, &source));
        assert_eq!(source.requests.borrow().len(), 2);
    }

    #[test]
    fn stale_response_is_dropped() {
        let notices = Arc::new(NoticeQueue::new());
        let mut list = view(&notices);

        let first = list.begin_reload();
        let second = list.begin_reload();

        assert_eq!(
            list.complete(second, Ok(PageResult::new(vec![2], 1, 10, 1))),
            Completion::Applied
        );
        assert_eq!(
            list.complete(first, Ok(PageResult::new(vec![1], 1, 10, 1))),
            Completion::Stale
        );
        assert_eq!(list.items(), &[2]);
        assert!(!list.is_loading());
    }

    #[test]
    fn failed_reload_keeps_rows() {
        let notices = Arc::new(NoticeQueue::new());
        let good = FakeSource {
            total: 3,
            ..Default::default()
        };
        let bad = FakeSource {
            fail: true,
            ..Default::default()
        };
        let mut list = view(&notices);

        list.reload(&good);
        assert_eq!(list.reload(&bad), Completion::Failed);

        assert_eq!(list.items(), &[1]);
        assert_eq!(list.error(), Some("Failed to load accounts"));
        assert_eq!(notices.drain(), vec![Notice::error("Failed to load accounts")]);
    }

    #[test]
    fn shrinking_list_clamps_the_page() {
        let notices = Arc::new(NoticeQueue::new());
        let mut list = view(&notices);

        let ticket = list.begin_reload();
        list.complete(ticket, Ok(PageResult::new(vec![], 1, 10, 50)));
        let source = FakeSource {
            total: 50,
            ..Default::default()
        };
        list.set_page(5, &source);

        let shrunk = FakeSource {
            total: 12,
            ..Default::default()
        };
        list.reload(&shrunk);

        assert_eq!(list.page_number(), 2);
        let pages: Vec<_> = shrunk
            .requests
            .borrow()
            .iter()
            .map(|q| q.pagination.unwrap().page)
            .collect();
        assert_eq!(pages, vec![5, 2]);
    }

    #[test]
    fn teardown_drops_in_flight_response() {
        let notices = Arc::new(NoticeQueue::new());
        let mut list = view(&notices);
        let ticket = list.begin_reload();

        list.set_search_term("x", Instant::now());
        list.teardown();

        assert!(!list.is_search_pending());
        assert_eq!(
            list.complete(ticket, Err(ServiceError::Unauthorized)),
            Completion::Stale
        );
        assert!(notices.is_empty());
    }
}
