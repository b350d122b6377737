use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::{Key, Meta, Object, Transport};

/// An in-process object store.
///
/// Clones share the same objects. Objects written through
/// [`Transport::set()`] are owned by the identity given to [`Self::new()`],
/// other parties write with [`Self::put()`].
#[derive(Clone)]
pub struct MemoryStore {
    owner: String,
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    /// In insertion order. Keys are unique.
    objects: Vec<Object>,
    watchers: Vec<(Key, UnboundedSender<Object>)>,
}

impl MemoryStore {
    pub fn new(owner: &str) -> Self {
        Self {
            owner: String::from(owner),
            inner: Arc::default(),
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Creates or replaces an object and notifies everyone watching its key.
    pub fn put(&self, object: Object) {
        let mut inner = self.inner.lock();
        // Receivers that were dropped are forgotten
        inner
            .watchers
            .retain(|(filter, tx)| !filter.matches(&object.key) || tx.send(object.clone()).is_ok());
        match inner.objects.iter_mut().find(|o| o.key == object.key) {
            Some(existing) => *existing = object,
            None => inner.objects.push(object),
        }
    }

    pub fn get(&self, key: &Key) -> Option<Object> {
        self.inner
            .lock()
            .objects
            .iter()
            .find(|o| &o.key == key)
            .cloned()
    }
}

#[async_trait]
impl Transport for MemoryStore {
    async fn watch(&self, filter: Key) -> anyhow::Result<UnboundedReceiver<Object>> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.inner.lock().watchers.push((filter, tx));
        Ok(rx)
    }

    async fn find(&self, filter: &Key) -> anyhow::Result<Vec<Object>> {
        Ok(self
            .inner
            .lock()
            .objects
            .iter()
            .filter(|o| filter.matches(&o.key))
            .cloned()
            .collect())
    }

    async fn set(&self, key: Key, value: String) -> anyhow::Result<()> {
        self.put(Object {
            key,
            meta: Meta::new(&self.owner),
            value,
        });
        Ok(())
    }
}
