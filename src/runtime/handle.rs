use std::sync::Arc;

use thiserror::Error;
use tokio::{
    sync::{broadcast, mpsc, oneshot},
    task::JoinHandle,
};
use tracing::{debug, info};

use crate::{
    area::{extractor, table::AreaLookupTable},
    ingest, parser,
    record::{NormalizedRecord, OutputEntry},
};

use super::events::IngestEvent;

/// Failure reported by [`IngestHandle`] calls.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// The runtime loop has stopped.
    #[error("ingest runtime channel closed")]
    ChannelClosed,
    /// A blocking parse/extract task panicked or was cancelled.
    #[error("extraction task failed: {0}")]
    Join(String),
}

/// Tuning knobs for [`spawn_ingest`].
#[derive(Debug, Clone)]
pub struct IngestConfig {
    /// Records handed to each blocking parse/extract task.
    pub chunk_size: usize,
    /// Pending commands before callers wait.
    pub command_queue_bound: usize,
    /// Broadcast buffer for [`IngestEvent`]s.
    pub event_capacity: usize,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            chunk_size: 256,
            command_queue_bound: 64,
            event_capacity: 1024,
        }
    }
}

/// Cloneable front end to the ingest runtime loop.
pub struct IngestHandle {
    cmd_tx: mpsc::Sender<Command>,
    events_tx: broadcast::Sender<IngestEvent>,
    table: Arc<AreaLookupTable>,
}

impl Clone for IngestHandle {
    fn clone(&self) -> Self {
        Self {
            cmd_tx: self.cmd_tx.clone(),
            events_tx: self.events_tx.clone(),
            table: Arc::clone(&self.table),
        }
    }
}

enum Command {
    IngestLog {
        log: String,
        spotter: String,
        resp: oneshot::Sender<Result<Vec<OutputEntry>, RuntimeError>>,
    },
    Normalize {
        raws: Vec<String>,
        resp: oneshot::Sender<Result<Vec<NormalizedRecord>, RuntimeError>>,
    },
    Extract {
        records: Vec<NormalizedRecord>,
        spotter: String,
        resp: oneshot::Sender<Result<Vec<OutputEntry>, RuntimeError>>,
    },
    Shutdown {
        resp: oneshot::Sender<()>,
    },
}

/// Starts the ingest loop on the current tokio runtime.
///
/// The loop owns a shared reference to `table` and serves commands one at a
/// time; within a command, records are processed in parallel chunks and
/// reassembled in input order.
pub fn spawn_ingest(table: Arc<AreaLookupTable>, config: IngestConfig) -> IngestHandle {
    let (cmd_tx, mut cmd_rx) = mpsc::channel::<Command>(config.command_queue_bound.max(1));
    let (events_tx, _) = broadcast::channel::<IngestEvent>(config.event_capacity.max(1));

    let events_tx_loop = events_tx.clone();
    let table_loop = Arc::clone(&table);

    tokio::spawn(async move {
        info!(
            regions = table_loop.regions().len(),
            tokens = table_loop.len(),
            chunk_size = config.chunk_size,
            "ingest runtime started"
        );
        while let Some(cmd) = cmd_rx.recv().await {
            let done = handle_command(cmd, &table_loop, &events_tx_loop, &config).await;
            if done {
                break;
            }
        }
        info!("ingest runtime stopped");
    });

    IngestHandle {
        cmd_tx,
        events_tx,
        table,
    }
}

impl IngestHandle {
    /// Subscribes to progress events.
    pub fn subscribe(&self) -> broadcast::Receiver<IngestEvent> {
        self.events_tx.subscribe()
    }

    /// Lookup table the runtime extracts against.
    pub fn table(&self) -> &AreaLookupTable {
        &self.table
    }

    /// Splits, normalizes, and extracts a whole log for `spotter`.
    pub async fn ingest_log(
        &self,
        log: impl Into<String>,
        spotter: impl Into<String>,
    ) -> Result<Vec<OutputEntry>, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::IngestLog {
                log: log.into(),
                spotter: spotter.into(),
                resp: tx,
            })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)?
    }

    /// Normalizes already-split raw records.
    pub async fn normalize(&self, raws: Vec<String>) -> Result<Vec<NormalizedRecord>, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::Normalize { raws, resp: tx })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)?
    }

    /// Extracts area entries from normalized records for `spotter`.
    pub async fn extract(
        &self,
        records: Vec<NormalizedRecord>,
        spotter: impl Into<String>,
    ) -> Result<Vec<OutputEntry>, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::Extract {
                records,
                spotter: spotter.into(),
                resp: tx,
            })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)?
    }

    /// Stops the loop after the commands queued before it.
    pub async fn shutdown(&self) -> Result<(), RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::Shutdown { resp: tx })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }
}

async fn handle_command(
    cmd: Command,
    table: &Arc<AreaLookupTable>,
    events_tx: &broadcast::Sender<IngestEvent>,
    config: &IngestConfig,
) -> bool {
    match cmd {
        Command::IngestLog { log, spotter, resp } => {
            let raws: Vec<String> = ingest::split_records(&log)
                .into_iter()
                .map(str::to_string)
                .collect();
            debug!(spotter = %spotter, records = raws.len(), "ingesting log");
            let res = match normalize_chunked(raws, config.chunk_size).await {
                Ok(records) => {
                    let _ = events_tx.send(IngestEvent::Normalized {
                        spotter: spotter.clone(),
                        records: records.len(),
                    });
                    extract_chunked(records, table, &spotter, config.chunk_size, events_tx).await
                }
                Err(err) => Err(err),
            };
            let _ = resp.send(res);
        }
        Command::Normalize { raws, resp } => {
            let _ = resp.send(normalize_chunked(raws, config.chunk_size).await);
        }
        Command::Extract {
            records,
            spotter,
            resp,
        } => {
            let res = extract_chunked(records, table, &spotter, config.chunk_size, events_tx).await;
            let _ = resp.send(res);
        }
        Command::Shutdown { resp } => {
            let _ = resp.send(());
            return true;
        }
    }

    false
}

async fn normalize_chunked(
    raws: Vec<String>,
    chunk_size: usize,
) -> Result<Vec<NormalizedRecord>, RuntimeError> {
    run_chunked(raws, chunk_size, |chunk: Vec<String>| parser::parse_all(chunk)).await
}

async fn extract_chunked(
    records: Vec<NormalizedRecord>,
    table: &Arc<AreaLookupTable>,
    spotter: &str,
    chunk_size: usize,
    events_tx: &broadcast::Sender<IngestEvent>,
) -> Result<Vec<OutputEntry>, RuntimeError> {
    let table = Arc::clone(table);
    let spotter_owned = spotter.to_string();
    let entries = run_chunked(records, chunk_size, move |chunk: Vec<NormalizedRecord>| {
        extractor::extract(&chunk, &table, &spotter_owned)
    })
    .await?;
    let _ = events_tx.send(IngestEvent::Extracted {
        spotter: spotter.to_string(),
        entries: entries.len(),
    });
    Ok(entries)
}

/// Runs `work` over `chunk_size` slices of `items` on the blocking pool and
/// concatenates the results in input order.
async fn run_chunked<T, R, F>(items: Vec<T>, chunk_size: usize, work: F) -> Result<Vec<R>, RuntimeError>
where
    T: Send + 'static,
    R: Send + 'static,
    F: Fn(Vec<T>) -> Vec<R> + Clone + Send + 'static,
{
    let chunk_size = chunk_size.max(1);
    let mut handles: Vec<JoinHandle<Vec<R>>> = Vec::with_capacity(items.len().div_ceil(chunk_size));
    let mut items = items.into_iter().peekable();
    while items.peek().is_some() {
        let chunk: Vec<T> = items.by_ref().take(chunk_size).collect();
        let work = work.clone();
        handles.push(tokio::task::spawn_blocking(move || work(chunk)));
    }

    let mut out = Vec::new();
    for handle in handles {
        let part = handle
            .await
            .map_err(|e| RuntimeError::Join(e.to_string()))?;
        out.extend(part);
    }
    Ok(out)
}
