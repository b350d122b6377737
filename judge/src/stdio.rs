use std::io::Write;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, trace, warn};

use crate::{Key, MemoryStore, Meta, Object, Transport};

/// Talks to the outside world through JSON lines.
///
/// Incoming objects are fed into a local [`MemoryStore`] by
/// [`forward_objects()`], and every object the referee sets is written as
/// one line to the output (stdout in the binary) before being stored locally.
pub struct StdioTransport<W> {
    store: MemoryStore,
    out: Mutex<W>,
}

impl StdioTransport<std::io::Stdout> {
    pub fn new(owner: &str) -> Self {
        Self::with_writer(MemoryStore::new(owner), std::io::stdout())
    }
}

impl<W: Write + Send> StdioTransport<W> {
    pub fn with_writer(store: MemoryStore, out: W) -> Self {
        Self {
            store,
            out: Mutex::new(out),
        }
    }

    pub fn store(&self) -> &MemoryStore {
        &self.store
    }
}

#[async_trait]
impl<W: Write + Send> Transport for StdioTransport<W> {
    async fn watch(&self, filter: Key) -> anyhow::Result<UnboundedReceiver<Object>> {
        self.store.watch(filter).await
    }

    async fn find(&self, filter: &Key) -> anyhow::Result<Vec<Object>> {
        self.store.find(filter).await
    }

    async fn set(&self, key: Key, value: String) -> anyhow::Result<()> {
        let object = Object {
            key,
            meta: Meta::new(self.store.owner()),
            value,
        };
        let mut line = serde_json::to_string(&object)?;
        trace!(key = %object.key, "Sending object");
        line.push('\n');
        {
            let mut out = self.out.lock();
            out.write_all(line.as_bytes())?;
            out.flush()?;
        }
        self.store.put(object);
        Ok(())
    }
}

/// Reads one JSON [`Object`] per line and puts it into the store, until the
/// input ends. Lines that are not valid objects are skipped.
pub async fn forward_objects<R: AsyncBufRead + Unpin>(
    store: MemoryStore,
    reader: R,
) -> std::io::Result<()> {
    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match serde_json::from_str::<Object>(line) {
            Ok(object) => {
                trace!(key = %object.key, owner = %object.meta.owner, "Received object");
                store.put(object);
            }
            Err(err) => warn!(error = %err, line, "Skipping line that is not an object"),
        }
    }
    debug!("Input closed");
    Ok(())
}
