//! Generic paginated, throttled query coordinator
//!
//! Owns the query parameters, the current page, the loading flag and the
//! result set for one domain. Fetches go through an injected [`QuerySource`].
//!
//! # Ordering
//!
//! Every issued fetch carries a [`Ticket`]. `generation` moves on every
//! params/page change, `serial` on every issue. A settlement is applied only
//! when it belongs to the latest issued fetch *and* that fetch was issued for
//! the current generation. Anything else is dropped on the floor, so a slow
//! response can never paint an older query over a newer one, throttle or no
//! throttle.
//!
//! ```text
//!  set_query_params / set_page / refresh
//!            │  generation += 1
//!            ▼
//!     Throttle::arm ──(deadline)──► issue ──spawn──► source.fetch
//!                                     │ serial += 1        │
//!                                     ▼                    ▼
//!                                 in_flight ◄──── settled_rx (Settled)
//!                                     │
//!                          apply: ticket == in_flight && generation current
//! ```

use super::throttle::Throttle;
use crate::github::{Credential, RemoteQueryError, PAGE_SIZE};
use futures::future::BoxFuture;
use std::fmt::Debug;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::AbortHandle;
use tokio::time::Instant;

/// Default throttle window
pub const DEFAULT_THROTTLE: Duration = Duration::from_millis(1000);

/// A remote capability plus the result mapper for its records
pub trait QuerySource: Send + Sync + 'static {
    /// Query parameters (search text, selected repository, ...)
    type Params: Clone + PartialEq + Debug + Send + 'static;
    /// Wire record as returned by the remote API
    type Raw: Send + 'static;
    /// View model the coordinator stores
    type Item;

    /// Short name used in log lines
    fn name(&self) -> &'static str;

    /// Start one fetch. The credential is passed per call, never captured
    /// by the source.
    fn fetch(
        &self,
        credential: &Credential,
        params: &Self::Params,
        page: u32,
    ) -> BoxFuture<'static, Result<Vec<Self::Raw>, RemoteQueryError>>;

    /// Result mapper: total, never fails
    fn map(raw: Self::Raw) -> Self::Item;
}

/// Identity of one issued fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    serial: u64,
    generation: u64,
}

/// A fetch that finished, successfully or not
#[derive(Debug)]
pub struct Settled<R> {
    ticket: Ticket,
    outcome: Result<Vec<R>, RemoteQueryError>,
}

/// What a single [`QueryCoordinator::advance`] step did
#[derive(Debug, Clone, PartialEq)]
pub enum Progress {
    /// The throttle window elapsed and a fetch went out
    Issued,
    /// The current fetch succeeded with this many items
    Loaded(usize),
    /// The current fetch failed; previous results are kept
    Failed(RemoteQueryError),
    /// A superseded or stale fetch settled and was ignored
    Discarded,
}

struct InFlight {
    ticket: Ticket,
    abort: AbortHandle,
}

/// Coordinator for one query domain
pub struct QueryCoordinator<S: QuerySource> {
    source: S,
    credential: Credential,
    params: S::Params,
    page: u32,
    results: Vec<S::Item>,
    last_error: Option<RemoteQueryError>,
    generation: u64,
    serial: u64,
    in_flight: Option<InFlight>,
    throttle: Throttle,
    settled_tx: mpsc::UnboundedSender<Settled<S::Raw>>,
    settled_rx: mpsc::UnboundedReceiver<Settled<S::Raw>>,
}

impl<S: QuerySource> QueryCoordinator<S> {
    /// Create a coordinator at page 1 and schedule the initial fetch
    pub fn new(source: S, credential: Credential, params: S::Params, window: Duration) -> Self {
        Self::with_page(source, credential, params, 1, window)
    }

    /// Create a coordinator that starts on `page` (clamped to 1)
    ///
    /// The initial fetch is for `page` itself, so jumping straight to a
    /// later page costs one request, not two.
    pub fn with_page(
        source: S,
        credential: Credential,
        params: S::Params,
        page: u32,
        window: Duration,
    ) -> Self {
        let (settled_tx, settled_rx) = mpsc::unbounded_channel();
        let mut coordinator = Self {
            source,
            credential,
            params,
            page: page.max(1),
            results: Vec::new(),
            last_error: None,
            generation: 0,
            serial: 0,
            in_flight: None,
            throttle: Throttle::new(window),
            settled_tx,
            settled_rx,
        };
        coordinator.trigger();
        coordinator
    }

    // ─────────────────────────────────────────────────────────────
    // State (read-only for views)
    // ─────────────────────────────────────────────────────────────

    pub fn params(&self) -> &S::Params {
        &self.params
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn results(&self) -> &[S::Item] {
        &self.results
    }

    /// True while the latest issued fetch has not settled
    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn last_error(&self) -> Option<&RemoteQueryError> {
        self.last_error.as_ref()
    }

    /// A full page is the only signal that another page may exist
    pub fn has_next_page(&self) -> bool {
        self.results.len() >= PAGE_SIZE as usize
    }

    pub fn has_previous_page(&self) -> bool {
        self.page > 1
    }

    /// Nothing scheduled and nothing in flight
    pub fn is_idle(&self) -> bool {
        !self.throttle.is_armed() && self.in_flight.is_none()
    }

    // ─────────────────────────────────────────────────────────────
    // Commands
    // ─────────────────────────────────────────────────────────────

    /// Replace the query and go back to page 1
    pub fn set_query_params(&mut self, params: S::Params) {
        tracing::debug!(source = self.source.name(), ?params, "Query params changed");
        self.params = params;
        self.page = 1;
        self.generation += 1;
        self.trigger();
    }

    /// Navigate to page `n`. `n < 1` and the current page are no-ops.
    pub fn set_page(&mut self, n: u32) {
        if n < 1 || n == self.page {
            return;
        }
        self.page = n;
        self.generation += 1;
        self.trigger();
    }

    pub fn previous_page(&mut self) {
        if self.page == 1 {
            return;
        }
        self.set_page(self.page - 1);
    }

    pub fn next_page(&mut self) {
        if !self.has_next_page() {
            return;
        }
        self.set_page(self.page + 1);
    }

    /// Re-run the current query (manual retry after an error)
    pub fn refresh(&mut self) {
        self.generation += 1;
        self.trigger();
    }

    /// Schedule a fetch through the throttle
    fn trigger(&mut self) {
        let now = Instant::now();
        self.throttle.arm(now);
        if self.throttle.take_due(now) {
            self.issue();
        }
    }

    /// Wait for the next thing to happen and apply it
    ///
    /// Either the throttle deadline passes (a fetch is issued) or a fetch
    /// settles. Cancellation-safe: dropping the future before it resolves
    /// loses nothing, so it can sit in a `tokio::select!` loop. Never resolves
    /// while [`is_idle`](Self::is_idle) is true.
    pub async fn advance(&mut self) -> Progress {
        loop {
            let deadline = self.throttle.deadline();
            tokio::select! {
                Some(settled) = self.settled_rx.recv() => return self.apply(settled),
                _ = sleep_until_armed(deadline) => {
                    if self.throttle.take_due(Instant::now()) {
                        self.issue();
                        return Progress::Issued;
                    }
                }
            }
        }
    }

    /// Issue one fetch for the params/page current right now
    fn issue(&mut self) {
        self.serial += 1;
        let ticket = Ticket {
            serial: self.serial,
            generation: self.generation,
        };

        // A superseded fetch would be discarded on arrival anyway
        if let Some(previous) = self.in_flight.take() {
            previous.abort.abort();
        }

        tracing::debug!(
            source = self.source.name(),
            params = ?self.params,
            page = self.page,
            serial = ticket.serial,
            "Issuing fetch"
        );

        let fetch = self
            .source
            .fetch(&self.credential, &self.params, self.page);
        let tx = self.settled_tx.clone();
        let handle = tokio::spawn(async move {
            let outcome = fetch.await;
            // Receiver lives as long as the coordinator
            let _ = tx.send(Settled { ticket, outcome });
        });

        self.in_flight = Some(InFlight {
            ticket,
            abort: handle.abort_handle(),
        });
    }

    fn apply(&mut self, settled: Settled<S::Raw>) -> Progress {
        let Settled { ticket, outcome } = settled;

        let is_latest = self
            .in_flight
            .as_ref()
            .is_some_and(|f| f.ticket == ticket);
        if !is_latest {
            tracing::debug!(
                source = self.source.name(),
                serial = ticket.serial,
                "Discarding superseded response"
            );
            return Progress::Discarded;
        }
        self.in_flight = None;

        if ticket.generation != self.generation {
            tracing::debug!(
                source = self.source.name(),
                serial = ticket.serial,
                "Discarding stale response (query moved on)"
            );
            return Progress::Discarded;
        }

        match outcome {
            Ok(raw) => {
                self.results = raw.into_iter().map(S::map).collect();
                self.last_error = None;
                tracing::info!(
                    source = self.source.name(),
                    page = self.page,
                    count = self.results.len(),
                    "Loaded {} {}",
                    self.results.len(),
                    self.source.name()
                );
                Progress::Loaded(self.results.len())
            }
            Err(e) => {
                tracing::warn!(source = self.source.name(), "Fetch failed: {}", e);
                self.last_error = Some(e.clone());
                Progress::Failed(e)
            }
        }
    }
}

impl<S: QuerySource> Drop for QueryCoordinator<S> {
    // Nobody is left to apply the result
    fn drop(&mut self) {
        if let Some(in_flight) = self.in_flight.take() {
            in_flight.abort.abort();
        }
    }
}

async fn sleep_until_armed(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use tokio::sync::oneshot;

    type Reply = Result<Vec<u32>, RemoteQueryError>;

    struct Call {
        params: String,
        page: u32,
        reply: Option<oneshot::Sender<Reply>>,
    }

    /// In-memory source whose responses the test releases by hand
    #[derive(Clone, Default)]
    struct ScriptedSource {
        calls: Arc<Mutex<Vec<Call>>>,
    }

    impl ScriptedSource {
        fn issued(&self) -> Vec<(String, u32)> {
            self.calls
                .lock()
                .unwrap()
                .iter()
                .map(|c| (c.params.clone(), c.page))
                .collect()
        }

        fn reply(&self, index: usize, reply: Reply) {
            let tx = self.calls.lock().unwrap()[index].reply.take().unwrap();
            let _ = tx.send(reply);
        }
    }

    impl QuerySource for ScriptedSource {
        type Params = String;
        type Raw = u32;
        type Item = String;

        fn name(&self) -> &'static str {
            "scripted"
        }

        fn fetch(
            &self,
            _credential: &Credential,
            params: &String,
            page: u32,
        ) -> BoxFuture<'static, Reply> {
            let (tx, rx) = oneshot::channel();
            self.calls.lock().unwrap().push(Call {
                params: params.clone(),
                page,
                reply: Some(tx),
            });
            Box::pin(async move {
                rx.await
                    .unwrap_or_else(|_| Err(RemoteQueryError::network("reply dropped")))
            })
        }

        fn map(raw: u32) -> String {
            format!("item-{raw}")
        }
    }

    fn full_page() -> Vec<u32> {
        (0..PAGE_SIZE).collect()
    }

    /// Coordinator whose initial fetch for "init" has already been issued
    /// and answered with `initial`
    async fn loaded(initial: Vec<u32>) -> (QueryCoordinator<ScriptedSource>, ScriptedSource) {
        let source = ScriptedSource::default();
        let mut coord = QueryCoordinator::new(
            source.clone(),
            Credential::anonymous(),
            "init".to_string(),
            DEFAULT_THROTTLE,
        );
        assert_eq!(coord.advance().await, Progress::Issued);
        let n = initial.len();
        source.reply(0, Ok(initial));
        assert_eq!(coord.advance().await, Progress::Loaded(n));
        (coord, source)
    }

    async fn settle(coord: &mut QueryCoordinator<ScriptedSource>) {
        while !coord.is_idle() {
            coord.advance().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_within_window_issues_one_fetch_with_last_params() {
        let (mut coord, source) = loaded(vec![1]).await;

        coord.set_query_params("r".into());
        tokio::time::advance(Duration::from_millis(200)).await;
        coord.set_query_params("re".into());
        tokio::time::advance(Duration::from_millis(300)).await;
        coord.set_query_params("rea".into());
        tokio::time::advance(Duration::from_millis(300)).await;
        coord.set_query_params("react".into());

        // Nothing goes out before the window closes
        assert_eq!(source.issued().len(), 1);
        assert!(!coord.is_loading());

        assert_eq!(coord.advance().await, Progress::Issued);
        assert_eq!(source.issued()[1..], [("react".to_string(), 1)]);
        assert!(coord.is_loading());
    }

    #[tokio::test(start_paused = true)]
    async fn test_consecutive_windows_each_issue_one_fetch() {
        let (mut coord, source) = loaded(vec![]).await;
        let start = Instant::now();

        coord.set_query_params("a".into());
        coord.set_query_params("ab".into());
        coord.advance().await;

        coord.set_query_params("abc".into());
        coord.set_query_params("abcd".into());
        coord.advance().await;

        assert!(Instant::now() - start >= Duration::from_millis(2000));
        assert_eq!(
            source.issued()[1..],
            [("ab".to_string(), 1), ("abcd".to_string(), 1)]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_previous_page_at_first_page_is_noop() {
        let (mut coord, source) = loaded(full_page()).await;

        coord.previous_page();
        coord.set_page(0);

        assert_eq!(coord.page(), 1);
        assert!(coord.is_idle());
        assert_eq!(source.issued().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_next_page_needs_a_full_page() {
        let (mut coord, source) = loaded(vec![1, 2, 3]).await;

        coord.next_page();
        assert_eq!(coord.page(), 1);
        assert!(coord.is_idle());
        assert_eq!(source.issued().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_paging_forward_and_back() {
        let (mut coord, source) = loaded(full_page()).await;

        coord.next_page();
        assert_eq!(coord.page(), 2);
        coord.advance().await;
        source.reply(1, Ok(vec![7, 8]));
        coord.advance().await;
        assert_eq!(coord.results(), ["item-7", "item-8"]);
        assert!(!coord.has_next_page());

        coord.previous_page();
        assert_eq!(coord.page(), 1);
        coord.advance().await;
        assert_eq!(source.issued()[2], ("init".to_string(), 1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_params_reset_page_to_one() {
        let (mut coord, source) = loaded(full_page()).await;
        coord.next_page();
        coord.advance().await;
        source.reply(1, Ok(full_page()));
        coord.advance().await;
        assert_eq!(coord.page(), 2);

        coord.set_query_params("other".into());
        assert_eq!(coord.page(), 1);
        coord.advance().await;
        assert_eq!(source.issued()[2], ("other".to_string(), 1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_response_never_overwrites_newer_query() {
        let (mut coord, source) = loaded(vec![0]).await;

        // Fetch A for q1 goes out
        coord.set_query_params("q1".into());
        coord.advance().await;
        assert!(coord.is_loading());

        // User moves on before A answers; B for q2 goes out
        coord.set_query_params("q2".into());
        coord.advance().await;
        assert_eq!(
            source.issued()[1..],
            [("q1".to_string(), 1), ("q2".to_string(), 1)]
        );

        // B answers first, then A
        source.reply(2, Ok(vec![2]));
        source.reply(1, Ok(vec![1]));
        settle(&mut coord).await;

        assert_eq!(coord.results(), ["item-2"]);
        assert!(!coord.is_loading());
    }

    #[tokio::test(start_paused = true)]
    async fn test_response_arriving_after_params_change_is_discarded() {
        let (mut coord, source) = loaded(vec![0]).await;

        coord.set_query_params("q1".into());
        coord.advance().await;

        // q2 is still waiting in the throttle slot when A lands
        coord.set_query_params("q2".into());
        source.reply(1, Ok(vec![1]));
        assert_eq!(coord.advance().await, Progress::Discarded);
        assert_eq!(coord.results(), ["item-0"]);
        assert!(!coord.is_loading(), "no fetch is in flight");

        assert_eq!(coord.advance().await, Progress::Issued);
        source.reply(2, Ok(vec![2]));
        assert_eq!(coord.advance().await, Progress::Loaded(1));
        assert_eq!(coord.results(), ["item-2"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_superseded_ticket_is_ignored() {
        let (mut coord, _source) = loaded(vec![0]).await;
        coord.refresh();
        coord.advance().await;
        let current = coord.in_flight.as_ref().unwrap().ticket;

        let old = Settled {
            ticket: Ticket {
                serial: current.serial - 1,
                generation: current.generation,
            },
            outcome: Ok(vec![99]),
        };
        assert_eq!(coord.apply(old), Progress::Discarded);
        assert!(coord.is_loading());
        assert_eq!(coord.results(), ["item-0"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_loading_flag_tracks_in_flight_fetch() {
        let source = ScriptedSource::default();
        let mut coord = QueryCoordinator::new(
            source.clone(),
            Credential::anonymous(),
            "q".to_string(),
            DEFAULT_THROTTLE,
        );

        // Scheduled but not issued yet
        assert!(!coord.is_loading());
        assert!(!coord.is_idle());

        coord.advance().await;
        assert!(coord.is_loading());

        source.reply(0, Ok(vec![1]));
        coord.advance().await;
        assert!(!coord.is_loading());
        assert!(coord.is_idle());
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_keeps_previous_results_and_records_error() {
        let (mut coord, source) = loaded(vec![4, 5]).await;

        coord.refresh();
        coord.advance().await;
        source.reply(1, Err(RemoteQueryError::RateLimited { reset_at: None }));
        let progress = coord.advance().await;

        assert!(matches!(progress, Progress::Failed(RemoteQueryError::RateLimited { .. })));
        assert_eq!(coord.results(), ["item-4", "item-5"]);
        assert!(!coord.is_loading());
        assert!(coord.last_error().is_some());

        // Next user action is the retry; success clears the error
        coord.refresh();
        coord.advance().await;
        source.reply(2, Ok(vec![6]));
        coord.advance().await;
        assert!(coord.last_error().is_none());
        assert_eq!(coord.results(), ["item-6"]);
    }

    #[tokio::test]
    async fn test_with_page_issues_only_the_requested_page() {
        let source = ScriptedSource::default();
        let mut coord = QueryCoordinator::with_page(
            source.clone(),
            Credential::anonymous(),
            "react".to_string(),
            3,
            Duration::ZERO,
        );
        assert_eq!(coord.page(), 3);
        assert!(coord.has_previous_page());
        assert_eq!(source.issued(), [("react".to_string(), 3)]);

        source.reply(0, Ok(vec![1]));
        settle(&mut coord).await;
        assert_eq!(coord.results(), ["item-1"]);
        assert_eq!(source.issued().len(), 1);
    }

    #[tokio::test]
    async fn test_with_page_zero_starts_at_first_page() {
        let source = ScriptedSource::default();
        let coord = QueryCoordinator::with_page(
            source.clone(),
            Credential::anonymous(),
            "react".to_string(),
            0,
            Duration::ZERO,
        );
        assert_eq!(coord.page(), 1);
        assert_eq!(source.issued(), [("react".to_string(), 1)]);
    }

    #[tokio::test]
    async fn test_zero_window_issues_immediately() {
        let source = ScriptedSource::default();
        let mut coord = QueryCoordinator::new(
            source.clone(),
            Credential::anonymous(),
            "now".to_string(),
            Duration::ZERO,
        );
        assert!(coord.is_loading());
        assert_eq!(source.issued(), [("now".to_string(), 1)]);

        coord.set_query_params("later".into());
        assert_eq!(source.issued().len(), 2);

        source.reply(1, Ok(vec![3]));
        settle(&mut coord).await;
        assert_eq!(coord.results(), ["item-3"]);
    }
}
