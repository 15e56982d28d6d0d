//! `controller` — run searches on a background worker and stream what they find.
//!
//! A [`SearchController`] owns one worker thread. The worker loads the dictionary once, then
//! executes [`SearchCommand`]s strictly in submission order. Commands travel over a bounded
//! queue of [`COMMAND_QUEUE_CAPACITY`] entries: [`SearchController::search`] returns as soon
//! as its command is queued, and blocks only while the queue is full.
//!
//! Everything the worker produces goes to a [`SearchListener`]:
//! - `on_result` once per discovered combination, while the search is still running;
//! - `on_status` for every lifecycle step (see [`StatusEvent`]).
//!
//! Listener methods are called **on the worker thread**, in order, one at a time. A listener
//! that must not run caller code there can forward into a channel instead; see
//! [`ChannelListener`]. Searches cannot be cancelled: [`SearchController::stop`] waits for
//! the running search and everything queued before it, then joins the worker.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use abanagram::controller::{ChannelListener, ControllerConfig, Notification, SearchController};
//! use abanagram::dictionary::WordSource;
//!
//! let (listener, notifications) = ChannelListener::new();
//! let config = ControllerConfig::new(vec![WordSource::inline("demo", "eat\ntea\nxyz\n")]);
//! let controller = SearchController::start(config, Arc::new(listener))?;
//!
//! controller.search("ate", 1)?;
//! controller.stop()?;
//!
//! let results: Vec<String> = notifications
//!     .try_iter()
//!     .filter_map(|n| match n {
//!         Notification::Result(text) => Some(text),
//!         Notification::Status(_) => None,
//!     })
//!     .collect();
//! assert_eq!(results, vec!["eat", "tea"]);
//! # Ok::<(), abanagram::errors::AnagramError>(())
//! ```

use crate::dictionary::{Dictionary, WordSource};
use crate::errors::AnagramError;
use crate::search::{find_anagrams, validate_max_words};
use instant::Instant;
use log::{debug, info, warn};
use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc;
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Maximum number of commands waiting for the worker.
pub const COMMAND_QUEUE_CAPACITY: usize = 10;

// ---------------------------------------------------------------------------
// Commands and notifications
// ---------------------------------------------------------------------------

/// A unit of work for the search worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchCommand {
    Search { query: String, max_words: usize },
    Stop,
}

impl SearchCommand {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            SearchCommand::Search { .. } => "SEARCH",
            SearchCommand::Stop => "STOP",
        }
    }
}

/// A lifecycle or progress update from the worker. `Display` gives the message text.
#[derive(Debug, Clone, PartialEq)]
pub enum StatusEvent {
    WorkerStarting,
    ReadingSource { name: String },
    SourceLoaded { name: String, accepted: usize, elapsed: Duration },
    SourceSkipped { name: String, reason: String },
    LoadFailed { reason: String },
    Ready { words: usize },
    CommandReceived { command: &'static str },
    SearchStarted { query: String, max_words: usize },
    SearchFinished { results: usize, elapsed: Duration },
    SearchAborted { query: String, reason: String },
    WorkerExiting,
    /// Sent from [`SearchController::stop`] after the worker has been joined.
    WorkerStopped,
}

impl StatusEvent {
    /// True for the events that end a search, successfully or not.
    #[must_use]
    pub fn is_done_searching(&self) -> bool {
        matches!(self, StatusEvent::SearchFinished { .. } | StatusEvent::SearchAborted { .. })
    }
}

impl fmt::Display for StatusEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusEvent::WorkerStarting => write!(f, "search worker starting"),
            StatusEvent::ReadingSource { name } => write!(f, "Reading input file {name} ..."),
            StatusEvent::SourceLoaded { name, accepted, elapsed } => {
                write!(f, "Read {accepted} words from {name} (took {:.1} sec)", elapsed.as_secs_f64())
            }
            StatusEvent::SourceSkipped { name, reason } => write!(f, "Skipping {name}: {reason}"),
            StatusEvent::LoadFailed { reason } => write!(f, "Loading words failed: {reason}"),
            StatusEvent::Ready { words } => write!(f, "{words} words read, waiting for command."),
            StatusEvent::CommandReceived { command } => write!(f, "Command received: {command}"),
            StatusEvent::SearchStarted { query, max_words } => {
                write!(f, "Starting search: {query} (max {max_words} words)")
            }
            StatusEvent::SearchFinished { elapsed, .. } => {
                write!(f, "Done searching (took {:.1} sec)", elapsed.as_secs_f64())
            }
            StatusEvent::SearchAborted { query, reason } => {
                write!(f, "Done searching: search for {query} aborted ({reason})")
            }
            StatusEvent::WorkerExiting => write!(f, "search worker exiting."),
            StatusEvent::WorkerStopped => write!(f, "Worker stopped."),
        }
    }
}

/// Receives everything the worker produces.
///
/// Both methods run on the worker thread; they must not call back into the controller
/// that owns the worker (`stop` would wait for itself).
pub trait SearchListener: Send + Sync {
    /// One discovered combination: entry texts joined by spaces, in discovery order.
    fn on_result(&self, text: &str);

    fn on_status(&self, status: &StatusEvent);
}

/// A listener made of two closures.
pub struct CallbackListener<R, S> {
    on_result: R,
    on_status: S,
}

impl<R, S> CallbackListener<R, S>
where
    R: Fn(&str) + Send + Sync,
    S: Fn(&StatusEvent) + Send + Sync,
{
    pub fn new(on_result: R, on_status: S) -> Self {
        Self { on_result, on_status }
    }
}

impl<R, S> SearchListener for CallbackListener<R, S>
where
    R: Fn(&str) + Send + Sync,
    S: Fn(&StatusEvent) + Send + Sync,
{
    fn on_result(&self, text: &str) {
        (self.on_result)(text);
    }

    fn on_status(&self, status: &StatusEvent) {
        (self.on_status)(status);
    }
}

/// One item on a [`ChannelListener`]'s channel.
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    Result(String),
    Status(StatusEvent),
}

/// Forwards results and status updates, in order, into a single unbounded channel.
pub struct ChannelListener {
    tx: mpsc::Sender<Notification>,
}

impl ChannelListener {
    #[must_use]
    pub fn new() -> (Self, mpsc::Receiver<Notification>) {
        let (tx, rx) = mpsc::channel();
        (Self { tx }, rx)
    }
}

impl SearchListener for ChannelListener {
    fn on_result(&self, text: &str) {
        // receiver gone means nobody is listening any more
        let _ = self.tx.send(Notification::Result(text.to_string()));
    }

    fn on_status(&self, status: &StatusEvent) {
        let _ = self.tx.send(Notification::Status(status.clone()));
    }
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// What the worker does when a word list cannot be read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SourceErrorPolicy {
    /// Report [`StatusEvent::LoadFailed`] and exit without accepting commands.
    #[default]
    Abort,
    /// Report [`StatusEvent::SourceSkipped`] and continue with the next source.
    Skip,
}

#[derive(Debug, Clone, Default)]
pub struct ControllerConfig {
    /// Word lists, loaded in this order.
    pub sources: Vec<WordSource>,
    pub on_source_error: SourceErrorPolicy,
}

impl ControllerConfig {
    #[must_use]
    pub fn new(sources: Vec<WordSource>) -> Self {
        Self { sources, on_source_error: SourceErrorPolicy::default() }
    }

    #[must_use]
    pub fn with_source_error_policy(mut self, policy: SourceErrorPolicy) -> Self {
        self.on_source_error = policy;
        self
    }
}

// ---------------------------------------------------------------------------
// SearchController
// ---------------------------------------------------------------------------

pub struct SearchController {
    commands: mpsc::SyncSender<SearchCommand>,
    worker: Mutex<Option<JoinHandle<()>>>,
    listener: Arc<dyn SearchListener>,
}

impl SearchController {
    /// Spawn the worker. It starts loading `config.sources` right away; commands submitted
    /// in the meantime wait in the queue.
    ///
    /// # Errors
    ///
    /// Returns [`AnagramError::WorkerSpawn`] if the thread cannot be created.
    pub fn start(config: ControllerConfig, listener: Arc<dyn SearchListener>) -> Result<Self, AnagramError> {
        let (commands, command_rx) = mpsc::sync_channel(COMMAND_QUEUE_CAPACITY);
        let worker_listener = Arc::clone(&listener);
        let handle = thread::Builder::new()
            .name("abanagram-search".into())
            .spawn(move || run_worker(&config, &command_rx, worker_listener.as_ref()))
            .map_err(AnagramError::WorkerSpawn)?;

        Ok(Self { commands, worker: Mutex::new(Some(handle)), listener })
    }

    /// Queue a search. Returns once the command is queued, not when the search is done.
    ///
    /// # Errors
    ///
    /// - [`AnagramError::InvalidMaxWords`] if `max_words` is 0 (nothing is queued).
    /// - [`AnagramError::WorkerUnavailable`] if the worker has exited.
    pub fn search(&self, query: impl Into<String>, max_words: usize) -> Result<(), AnagramError> {
        validate_max_words(max_words)?;
        self.submit(SearchCommand::Search { query: query.into(), max_words })
    }

    fn submit(&self, command: SearchCommand) -> Result<(), AnagramError> {
        debug!("queueing {command:?}");
        self.commands.send(command).map_err(|_| AnagramError::WorkerUnavailable)
    }

    /// Ask the worker to finish the queued work and exit, then wait for it.
    ///
    /// Safe to call repeatedly and from several threads; only the first call that finds a
    /// live worker joins it and reports [`StatusEvent::WorkerStopped`].
    ///
    /// # Errors
    ///
    /// Returns [`AnagramError::WorkerPanicked`] if the worker thread died with a panic.
    pub fn stop(&self) -> Result<(), AnagramError> {
        let mut worker = self.worker.lock().unwrap_or_else(PoisonError::into_inner);
        let Some(handle) = worker.take() else {
            return Ok(());
        };

        // fails only if the worker already exited, which join handles fine
        let _ = self.submit(SearchCommand::Stop);
        handle.join().map_err(|_| AnagramError::WorkerPanicked)?;
        drop(worker);

        self.listener.on_status(&StatusEvent::WorkerStopped);
        Ok(())
    }

    /// True until the worker thread has exited.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.worker
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for SearchController {
    fn drop(&mut self) {
        if let Err(e) = self.stop() {
            warn!("{}", e.display_detailed());
        }
    }
}

// ---------------------------------------------------------------------------
// Worker thread
// ---------------------------------------------------------------------------

fn run_worker(config: &ControllerConfig, commands: &mpsc::Receiver<SearchCommand>, listener: &dyn SearchListener) {
    listener.on_status(&StatusEvent::WorkerStarting);

    let dictionary = match load_dictionary(config, listener) {
        Ok(dictionary) => dictionary,
        Err(e) => {
            warn!("{}", e.display_detailed());
            listener.on_status(&StatusEvent::LoadFailed { reason: e.to_string() });
            listener.on_status(&StatusEvent::WorkerExiting);
            return;
        }
    };
    info!("search worker ready with {} words", dictionary.len());
    listener.on_status(&StatusEvent::Ready { words: dictionary.len() });

    while let Ok(command) = commands.recv() {
        listener.on_status(&StatusEvent::CommandReceived { command: command.name() });
        match command {
            SearchCommand::Search { query, max_words } => run_search(&dictionary, &query, max_words, listener),
            SearchCommand::Stop => break,
        }
    }

    debug!("search worker leaving command loop");
    listener.on_status(&StatusEvent::WorkerExiting);
}

fn load_dictionary(config: &ControllerConfig, listener: &dyn SearchListener) -> Result<Dictionary, AnagramError> {
    let mut dictionary = Dictionary::new();
    for source in &config.sources {
        let name = source.name();
        listener.on_status(&StatusEvent::ReadingSource { name: name.clone() });

        let t_load = Instant::now();
        match dictionary.load_source(source) {
            Ok(accepted) => {
                listener.on_status(&StatusEvent::SourceLoaded { name, accepted, elapsed: t_load.elapsed() });
            }
            Err(e) if config.on_source_error == SourceErrorPolicy::Skip => {
                warn!("{}", e.display_detailed());
                listener.on_status(&StatusEvent::SourceSkipped { name, reason: e.to_string() });
            }
            Err(e) => return Err(e),
        }
    }
    Ok(dictionary)
}

/// Run one search to completion. A panic inside the search (or inside the listener's
/// `on_result`) ends only this search.
fn run_search(dictionary: &Dictionary, query: &str, max_words: usize, listener: &dyn SearchListener) {
    listener.on_status(&StatusEvent::SearchStarted { query: query.to_string(), max_words });

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        find_anagrams(dictionary, query, max_words, |result| listener.on_result(&result.text()))
            .map(|summary| (summary.results.len(), summary.elapsed))
    }));

    let status = match outcome {
        Ok(Ok((results, elapsed))) => StatusEvent::SearchFinished { results, elapsed },
        Ok(Err(e)) => StatusEvent::SearchAborted { query: query.to_string(), reason: e.to_string() },
        Err(payload) => {
            let reason = panic_reason(payload.as_ref());
            let e = AnagramError::SearchAborted { query: query.to_string(), reason: reason.clone() };
            warn!("{}", e.display_detailed());
            StatusEvent::SearchAborted { query: query.to_string(), reason }
        }
    };
    listener.on_status(&status);
}

fn panic_reason(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const WAIT: Duration = Duration::from_secs(5);

    fn inline_config(contents: &str) -> ControllerConfig {
        ControllerConfig::new(vec![WordSource::inline("inline", contents)])
    }

    fn drain(rx: &mpsc::Receiver<Notification>) -> Vec<Notification> {
        rx.try_iter().collect()
    }

    fn results(notifications: &[Notification]) -> Vec<String> {
        notifications
            .iter()
            .filter_map(|n| match n {
                Notification::Result(text) => Some(text.clone()),
                Notification::Status(_) => None,
            })
            .collect()
    }

    fn statuses(notifications: &[Notification]) -> Vec<StatusEvent> {
        notifications
            .iter()
            .filter_map(|n| match n {
                Notification::Status(status) => Some(status.clone()),
                Notification::Result(_) => None,
            })
            .collect()
    }

    /// Wait on `rx` until a status matching `pred` shows up.
    fn wait_for_status(rx: &mpsc::Receiver<Notification>, pred: impl Fn(&StatusEvent) -> bool) -> StatusEvent {
        loop {
            match rx.recv_timeout(WAIT).expect("timed out waiting for status") {
                Notification::Status(status) if pred(&status) => return status,
                _ => {}
            }
        }
    }

    #[test]
    fn test_full_lifecycle() {
        let (listener, rx) = ChannelListener::new();
        let controller = SearchController::start(inline_config("eat\ntea\nate\nxyz\n"), Arc::new(listener)).unwrap();
        controller.search("eat", 1).unwrap();
        controller.stop().unwrap();

        let all = drain(&rx);
        assert_eq!(results(&all), vec!["eat", "tea", "ate"]);

        let statuses = statuses(&all);
        assert_eq!(statuses[0], StatusEvent::WorkerStarting);
        assert_eq!(statuses[1], StatusEvent::ReadingSource { name: "inline".to_string() });
        assert!(matches!(&statuses[2], StatusEvent::SourceLoaded { accepted: 4, .. }));
        assert_eq!(statuses[3], StatusEvent::Ready { words: 4 });
        assert_eq!(statuses[4], StatusEvent::CommandReceived { command: "SEARCH" });
        assert_eq!(statuses[5], StatusEvent::SearchStarted { query: "eat".to_string(), max_words: 1 });
        assert!(matches!(statuses[6], StatusEvent::SearchFinished { results: 3, .. }));
        assert_eq!(statuses[7], StatusEvent::CommandReceived { command: "STOP" });
        assert_eq!(statuses[8], StatusEvent::WorkerExiting);
        assert_eq!(statuses[9], StatusEvent::WorkerStopped);
        assert_eq!(statuses.len(), 10);
    }

    #[test]
    fn test_results_stream_between_start_and_done() {
        let (listener, rx) = ChannelListener::new();
        let controller = SearchController::start(inline_config("eat\ntea\n"), Arc::new(listener)).unwrap();
        controller.search("tea", 1).unwrap();
        controller.stop().unwrap();

        let all = drain(&rx);
        let started = all
            .iter()
            .position(|n| matches!(n, Notification::Status(StatusEvent::SearchStarted { .. })))
            .unwrap();
        let done = all
            .iter()
            .position(|n| matches!(n, Notification::Status(s) if s.is_done_searching()))
            .unwrap();
        let first_result = all.iter().position(|n| matches!(n, Notification::Result(_))).unwrap();
        assert!(started < first_result && first_result < done);
    }

    #[test]
    fn test_stop_drains_queue() {
        let (listener, rx) = ChannelListener::new();
        let controller = SearchController::start(inline_config("eat\ntea\n"), Arc::new(listener)).unwrap();
        controller.search("xyz", 1).unwrap();
        controller.stop().unwrap();

        let statuses = statuses(&drain(&rx));
        let done = statuses.iter().position(StatusEvent::is_done_searching).expect("search must finish");
        let stopped = statuses.iter().position(|s| *s == StatusEvent::WorkerStopped).unwrap();
        assert!(done < stopped);
        assert!(matches!(statuses[done], StatusEvent::SearchFinished { results: 0, .. }));
    }

    #[test]
    fn test_searches_run_in_submission_order() {
        let (listener, rx) = ChannelListener::new();
        let controller = SearchController::start(inline_config("eat\ntea\nrats\nstar\n"), Arc::new(listener)).unwrap();
        controller.search("arts", 1).unwrap();
        controller.search("ate", 1).unwrap();
        controller.stop().unwrap();

        assert_eq!(results(&drain(&rx)), vec!["rats", "star", "eat", "tea"]);
    }

    #[test]
    fn test_stop_is_idempotent() {
        let (listener, rx) = ChannelListener::new();
        let controller = SearchController::start(inline_config("eat\n"), Arc::new(listener)).unwrap();
        assert!(controller.stop().is_ok());
        assert!(controller.stop().is_ok());
        assert!(!controller.is_running());

        let stopped = statuses(&drain(&rx)).into_iter().filter(|s| *s == StatusEvent::WorkerStopped).count();
        assert_eq!(stopped, 1);
        assert!(matches!(controller.search("eat", 1), Err(AnagramError::WorkerUnavailable)));
    }

    #[test]
    fn test_invalid_max_words_rejected_at_submission() {
        let (listener, _rx) = ChannelListener::new();
        let controller = SearchController::start(inline_config("eat\n"), Arc::new(listener)).unwrap();
        assert!(matches!(controller.search("eat", 0), Err(AnagramError::InvalidMaxWords { max_words: 0 })));
        controller.stop().unwrap();
    }

    #[test]
    fn test_unreadable_source_aborts_by_default() {
        let (listener, rx) = ChannelListener::new();
        let config = ControllerConfig::new(vec![
            WordSource::inline("good", "eat\n"),
            WordSource::File(PathBuf::from("/definitely/not/here/words.txt")),
        ]);
        let controller = SearchController::start(config, Arc::new(listener)).unwrap();

        let failed = wait_for_status(&rx, |s| matches!(s, StatusEvent::LoadFailed { .. }));
        assert!(failed.to_string().contains("/definitely/not/here/words.txt"));
        wait_for_status(&rx, |s| *s == StatusEvent::WorkerExiting);

        // the worker has dropped its end of the queue once it exits
        let worker_gone = (0..50).any(|_| {
            if controller.search("eat", 1).is_err() {
                return true;
            }
            thread::sleep(Duration::from_millis(20));
            false
        });
        assert!(worker_gone);
        assert!(controller.stop().is_ok());
    }

    #[test]
    fn test_unreadable_source_can_be_skipped() {
        let (listener, rx) = ChannelListener::new();
        let config = ControllerConfig::new(vec![
            WordSource::File(PathBuf::from("/definitely/not/here/words.txt")),
            WordSource::inline("good", "eat\ntea\n"),
        ])
        .with_source_error_policy(SourceErrorPolicy::Skip);
        let controller = SearchController::start(config, Arc::new(listener)).unwrap();
        controller.search("tea", 1).unwrap();
        controller.stop().unwrap();

        let all = drain(&rx);
        let statuses = statuses(&all);
        assert!(statuses.iter().any(|s| matches!(s, StatusEvent::SourceSkipped { .. })));
        assert!(statuses.contains(&StatusEvent::Ready { words: 2 }));
        assert_eq!(results(&all), vec!["eat", "tea"]);
    }

    /// Panics on its first result, then behaves like a `ChannelListener`.
    struct PanickyListener {
        inner: ChannelListener,
        armed: Mutex<bool>,
    }

    impl SearchListener for PanickyListener {
        fn on_result(&self, text: &str) {
            let fire = std::mem::replace(&mut *self.armed.lock().unwrap(), false);
            if fire {
                panic!("listener exploded");
            }
            self.inner.on_result(text);
        }

        fn on_status(&self, status: &StatusEvent) {
            self.inner.on_status(status);
        }
    }

    #[test]
    fn test_panicking_search_is_reported_and_worker_survives() {
        let (inner, rx) = ChannelListener::new();
        let listener = PanickyListener { inner, armed: Mutex::new(true) };
        let controller = SearchController::start(inline_config("eat\ntea\n"), Arc::new(listener)).unwrap();
        controller.search("eat", 1).unwrap();
        controller.search("tea", 1).unwrap();
        controller.stop().unwrap();

        let all = drain(&rx);
        let statuses = statuses(&all);
        assert!(statuses.iter().any(|s| matches!(
            s,
            StatusEvent::SearchAborted { reason, .. } if reason == "listener exploded"
        )));
        assert!(statuses.iter().any(|s| matches!(s, StatusEvent::SearchFinished { results: 2, .. })));
        assert_eq!(results(&all), vec!["eat", "tea"]);
    }

    /// Blocks inside the first `on_result` until released.
    struct GateListener {
        inner: ChannelListener,
        entered: Mutex<Option<mpsc::Sender<()>>>,
        release: Mutex<Option<mpsc::Receiver<()>>>,
    }

    impl SearchListener for GateListener {
        fn on_result(&self, text: &str) {
            let release = self.release.lock().unwrap().take();
            if let Some(release) = release {
                if let Some(entered) = self.entered.lock().unwrap().take() {
                    entered.send(()).unwrap();
                }
                release.recv().unwrap();
            }
            self.inner.on_result(text);
        }

        fn on_status(&self, status: &StatusEvent) {
            self.inner.on_status(status);
        }
    }

    #[test]
    fn test_full_queue_blocks_submitter() {
        let (inner, rx) = ChannelListener::new();
        let (entered_tx, entered_rx) = mpsc::channel();
        let (release_tx, release_rx) = mpsc::channel();
        let listener = GateListener {
            inner,
            entered: Mutex::new(Some(entered_tx)),
            release: Mutex::new(Some(release_rx)),
        };
        let controller = Arc::new(SearchController::start(inline_config("eat\ntea\n"), Arc::new(listener)).unwrap());

        controller.search("eat", 1).unwrap();
        entered_rx.recv_timeout(WAIT).expect("worker should block in the first search");

        for _ in 0..COMMAND_QUEUE_CAPACITY {
            controller.search("xyz", 1).unwrap();
        }

        let (done_tx, done_rx) = mpsc::channel();
        let submitter = {
            let controller = Arc::clone(&controller);
            thread::spawn(move || {
                controller.search("tea", 1).unwrap();
                done_tx.send(()).unwrap();
            })
        };
        assert_eq!(
            done_rx.recv_timeout(Duration::from_millis(300)),
            Err(mpsc::RecvTimeoutError::Timeout),
            "submission beyond capacity must wait for the worker"
        );

        release_tx.send(()).unwrap();
        done_rx.recv_timeout(WAIT).expect("submission should go through once the worker dequeues");
        submitter.join().unwrap();
        controller.stop().unwrap();

        let all = drain(&rx);
        assert_eq!(results(&all), vec!["eat", "tea", "eat", "tea"]);
        let finished = statuses(&all).iter().filter(|s| s.is_done_searching()).count();
        assert_eq!(finished, COMMAND_QUEUE_CAPACITY + 2);
    }

    #[test]
    fn test_callback_listener() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let listener = {
            let results = Arc::clone(&seen);
            CallbackListener::new(move |text: &str| results.lock().unwrap().push(text.to_string()), |_: &StatusEvent| {})
        };
        let controller = SearchController::start(inline_config("listen\nsilent\n"), Arc::new(listener)).unwrap();
        controller.search("enlist", 1).unwrap();
        controller.stop().unwrap();
        assert_eq!(*seen.lock().unwrap(), vec!["listen", "silent"]);
    }

    #[test]
    fn test_status_messages() {
        assert_eq!(StatusEvent::Ready { words: 12 }.to_string(), "12 words read, waiting for command.");
        assert_eq!(
            StatusEvent::SearchStarted { query: "dormitory".into(), max_words: 2 }.to_string(),
            "Starting search: dormitory (max 2 words)"
        );
        let done = StatusEvent::SearchFinished { results: 3, elapsed: Duration::from_millis(1500) };
        assert_eq!(done.to_string(), "Done searching (took 1.5 sec)");
        assert!(done.to_string().starts_with("Done"));
        assert!(done.is_done_searching());
        let aborted = StatusEvent::SearchAborted { query: "x".into(), reason: "boom".into() };
        assert!(aborted.to_string().starts_with("Done"));
        assert!(!StatusEvent::WorkerStopped.is_done_searching());
        assert_eq!(SearchCommand::Stop.name(), "STOP");
    }
}
