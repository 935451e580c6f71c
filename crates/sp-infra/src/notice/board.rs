//! In-memory notice board.
//! 内存通知面板
//!
//! The toast sink. Holds the currently visible notices, keyed by their stable
//! id, and publishes every change on a broadcast channel for a view layer.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde::Serialize;
use tokio::sync::broadcast;
use tokio::time::{sleep_until, Duration, Instant};
use tracing::debug;

use sp_core::ports::NotifierPort;
use sp_core::{Notice, NoticeId};

/// Every notice closes on its own after this long.
pub const NOTICE_AUTO_CLOSE_MS: u64 = 5000;

const EVENT_CHANNEL_CAPACITY: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BoardEvent {
    Posted(Notice),
    /// A visible notice with the same id was updated in place.
    Replaced(Notice),
    Closed { id: NoticeId },
}

struct Entry {
    notice: Notice,
    seq: u64,
    // Insertion order; a replacement keeps its slot.
    order: u64,
}

#[derive(Default)]
struct Entries {
    by_id: HashMap<NoticeId, Entry>,
    next_seq: u64,
}

#[derive(Clone)]
pub struct NoticeBoard {
    entries: Arc<Mutex<Entries>>,
    events: broadcast::Sender<BoardEvent>,
    auto_close: Duration,
}

impl Default for NoticeBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl NoticeBoard {
    pub fn new() -> Self {
        Self::with_auto_close(Duration::from_millis(NOTICE_AUTO_CLOSE_MS))
    }

    pub fn with_auto_close(auto_close: Duration) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            entries: Arc::new(Mutex::new(Entries::default())),
            events,
            auto_close,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<BoardEvent> {
        self.events.subscribe()
    }

    /// Visible notices, oldest first.
    pub fn active(&self) -> Vec<Notice> {
        let entries = self.lock();
        let mut visible: Vec<&Entry> = entries.by_id.values().collect();
        visible.sort_by_key(|e| e.order);
        visible.into_iter().map(|e| e.notice.clone()).collect()
    }

    pub fn post(&self, notice: Notice) {
        let id = notice.id;
        let (event, seq) = {
            let mut entries = self.lock();
            entries.next_seq += 1;
            let seq = entries.next_seq;
            match entries.by_id.get_mut(&id) {
                Some(entry) => {
                    entry.notice = notice.clone();
                    entry.seq = seq;
                    (BoardEvent::Replaced(notice), seq)
                }
                None => {
                    entries.by_id.insert(
                        id,
                        Entry {
                            notice: notice.clone(),
                            seq,
                            order: seq,
                        },
                    );
                    (BoardEvent::Posted(notice), seq)
                }
            }
        };

        debug!(notice_id = %id, ?event, "notice posted");
        // No subscribers is fine.
        let _ = self.events.send(event);
        self.schedule_close(id, seq);
    }

    /// Close a notice. Returns whether it was visible.
    pub fn close(&self, id: NoticeId) -> bool {
        let removed = self.lock().by_id.remove(&id).is_some();
        if removed {
            debug!(notice_id = %id, "notice closed");
            let _ = self.events.send(BoardEvent::Closed { id });
        }
        removed
    }

    fn schedule_close(&self, id: NoticeId, seq: u64) {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            debug!(notice_id = %id, "no runtime, notice stays until closed");
            return;
        };

        let board = self.clone();
        let deadline = Instant::now() + self.auto_close;
        runtime.spawn(async move {
            sleep_until(deadline).await;
            // A newer post of the same id owns the close.
            let current = board.lock().by_id.get(&id).map(|e| e.seq);
            if current == Some(seq) {
                board.close(id);
            }
        });
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Entries> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl NotifierPort for NoticeBoard {
    fn notify(&self, notice: Notice) {
        self.post(notice);
    }
}
