//! Single-writer actor for serialized, transactional writes.
//!
//! SQLite allows only one writer at a time; instead of letting pool
//! connections race for the write lock, all mutations are funneled through
//! one background task that owns a dedicated connection. Every job runs
//! inside an `immediate_transaction`, which is what gives multi-statement
//! writes (notably the ledger replay commit) their all-or-nothing guarantee.

use super::DbPool;
use crate::errors::StorageError;
use diesel::{Connection, SqliteConnection};
use praxis_core::errors::{Error, Result};
use tokio::sync::{mpsc, oneshot};

/// A queued write. The transaction wrapper and the typed reply channel are
/// baked into the closure by [`WriteHandle::exec`], so the actor loop only
/// ever sees ready-to-run jobs.
type WriteJob = Box<dyn FnOnce(&mut SqliteConnection) + Send + 'static>;

/// Handle for sending jobs to the writer actor.
#[derive(Clone)]
pub struct WriteHandle {
    tx: mpsc::Sender<WriteJob>,
}

impl WriteHandle {
    /// Executes a database job on the writer actor's dedicated connection,
    /// wrapped in a single transaction. Fails with an error rather than
    /// panicking if the actor is gone.
    pub async fn exec<F, T>(&self, job: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.tx
            .send(Box::new(move |conn: &mut SqliteConnection| {
                // StorageError implements From<diesel::result::Error>, which
                // the transaction wrapper needs for rollback signaling; the
                // job's own core error is carried through intact.
                let result = conn
                    .immediate_transaction::<_, StorageError, _>(|c| {
                        job(c).map_err(StorageError::from)
                    })
                    .map_err(Error::from);

                // Ignore a dropped receiver; the caller may have been
                // cancelled.
                let _ = reply_tx.send(result);
            }))
            .await
            .map_err(|_| Error::Unexpected("database writer has shut down".to_string()))?;

        reply_rx
            .await
            .map_err(|_| Error::Unexpected("database writer dropped the reply".to_string()))?
    }
}

/// Spawns the writer actor and returns its handle.
///
/// The actor takes one connection from the pool and holds it for its whole
/// lifetime, processing jobs strictly in arrival order. It terminates when
/// the final `WriteHandle` is dropped.
pub fn spawn_writer(pool: DbPool) -> WriteHandle {
    let (tx, mut rx) = mpsc::channel::<WriteJob>(1024);

    tokio::spawn(async move {
        let mut conn = match pool.get() {
            Ok(conn) => conn,
            Err(e) => {
                // Pending exec calls observe the closed channel and error out.
                log::error!("Writer actor could not obtain a connection: {}", e);
                return;
            }
        };

        while let Some(job) = rx.recv().await {
            job(&mut *conn);
        }
    });

    WriteHandle { tx }
}
