//! In-memory store of classified articles for follow-up questions.
//!
//! Bounded by entry count (least recently used goes first) and by a per-entry
//! time-to-live counted from insertion. Ids removed either way are remembered
//! in a bounded tombstone set so lookups can tell `Evicted` from `Missing`.

use indexmap::{IndexMap, IndexSet};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};
use tracing::debug;

use crate::common::{Label, Verdict};

/// Everything a follow-up question needs about one classified article.
#[derive(Debug, Clone, PartialEq)]
pub struct ArticleContext {
    pub article_text: String,
    pub model_prediction: Label,
    pub model_confidence: f32,
    pub verification_reasoning: Option<String>,
    pub verification_prediction: Option<Verdict>,
}

/// Result of a store lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum ContextLookup {
    Found(Arc<ArticleContext>),
    /// The id was stored once but has expired or been pushed out
    Evicted,
    Missing,
}

/// Returned by [`ContextStore::put`] when the id is already live.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("context id {id} is already in use")]
pub struct ContextIdInUse {
    pub id: String,
}

struct Entry {
    context: Arc<ArticleContext>,
    inserted_at: Instant,
}

#[derive(Default)]
struct Inner {
    /// Least recently used first
    entries: IndexMap<String, Entry>,
    tombstones: IndexSet<String>,
}

pub struct ContextStore {
    inner: Mutex<Inner>,
    capacity: usize,
    ttl: Duration,
}

impl ContextStore {
    pub const DEFAULT_CAPACITY: usize = 1024;
    pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);

    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
            capacity: capacity.max(1),
            ttl,
        }
    }

    /// Associate `id` with `context`.
    ///
    /// Fails when `id` already maps to a live entry; ids are never reassigned
    /// while live. Expired or evicted ids may be reused.
    pub fn put(&self, id: &str, context: ArticleContext) -> Result<(), ContextIdInUse> {
        self.put_at(id, context, Instant::now())
    }

    pub fn get(&self, id: &str) -> ContextLookup {
        self.get_at(id, Instant::now())
    }

    /// Number of live and not-yet-purged entries.
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn put_at(&self, id: &str, context: ArticleContext, now: Instant) -> Result<(), ContextIdInUse> {
        let mut inner = self.lock();
        self.purge_expired(&mut inner, now);

        if inner.entries.contains_key(id) {
            return Err(ContextIdInUse { id: id.to_string() });
        }

        inner.tombstones.shift_remove(id);
        inner.entries.insert(
            id.to_string(),
            Entry {
                context: Arc::new(context),
                inserted_at: now,
            },
        );

        while inner.entries.len() > self.capacity {
            if let Some((evicted, _)) = inner.entries.shift_remove_index(0) {
                debug!(context_id = %evicted, "Context evicted (capacity)");
                self.bury(&mut inner, evicted);
            }
        }

        Ok(())
    }

    fn get_at(&self, id: &str, now: Instant) -> ContextLookup {
        let mut inner = self.lock();

        let Some(entry) = inner.entries.shift_remove(id) else {
            return if inner.tombstones.contains(id) {
                ContextLookup::Evicted
            } else {
                ContextLookup::Missing
            };
        };

        if self.is_expired(&entry, now) {
            debug!(context_id = %id, "Context evicted (expired)");
            self.bury(&mut inner, id.to_string());
            return ContextLookup::Evicted;
        }

        // Re-insert at the back: most recently used
        let context = entry.context.clone();
        inner.entries.insert(id.to_string(), entry);
        ContextLookup::Found(context)
    }

    fn is_expired(&self, entry: &Entry, now: Instant) -> bool {
        now.saturating_duration_since(entry.inserted_at) >= self.ttl
    }

    fn purge_expired(&self, inner: &mut Inner, now: Instant) {
        let expired: Vec<String> = inner
            .entries
            .iter()
            .filter(|(_, entry)| self.is_expired(entry, now))
            .map(|(id, _)| id.clone())
            .collect();

        for id in expired {
            inner.entries.shift_remove(&id);
            debug!(context_id = %id, "Context evicted (expired)");
            self.bury(inner, id);
        }
    }

    fn bury(&self, inner: &mut Inner, id: String) {
        inner.tombstones.insert(id);
        while inner.tombstones.len() > self.capacity {
            inner.tombstones.shift_remove_index(0);
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for ContextStore {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY, Self::DEFAULT_TTL)
    }
}
