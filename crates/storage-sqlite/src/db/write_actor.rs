use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use diesel::SqliteConnection;
use log::{debug, error};
use tokio::sync::{mpsc, oneshot};

use gastosmart_core::errors::{DatabaseError, Error, Result};

use super::{get_connection, DbPool};
use crate::errors::StorageError;

type Job<T> = Box<dyn FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static>;
type AnyBox = Box<dyn Any + Send + 'static>;
type Envelope = (Job<AnyBox>, oneshot::Sender<Result<AnyBox>>);

const QUEUE_DEPTH: usize = 1024;

/// Handle for sending jobs to the writer actor.
///
/// Every job runs inside its own `BEGIN IMMEDIATE` transaction on the actor's
/// dedicated connection, so jobs never interleave. A job that returns an
/// error is rolled back and the error is handed back unchanged. A job that
/// panics is rolled back too and reported as an internal error; the actor
/// keeps serving later jobs.
#[derive(Clone)]
pub struct WriteHandle {
    tx: mpsc::Sender<Envelope>,
}

impl WriteHandle {
    /// Executes `job` on the writer connection and waits for its result.
    pub async fn exec<F, T>(&self, job: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let (ret_tx, ret_rx) = oneshot::channel();

        self.tx
            .send((
                Box::new(move |c| job(c).map(|v| Box::new(v) as AnyBox)),
                ret_tx,
            ))
            .await
            .map_err(|_| writer_gone("the writer actor has stopped"))?;

        let boxed = ret_rx
            .await
            .map_err(|_| writer_gone("the writer actor dropped the reply"))??;

        boxed
            .downcast::<T>()
            .map(|v| *v)
            .map_err(|_| writer_gone("unexpected result type from the writer actor"))
    }
}

fn writer_gone(message: &str) -> Error {
    Error::Database(DatabaseError::Internal(message.to_string()))
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}

/// Runs `job` with panics turned into errors, so the surrounding
/// transaction rolls back instead of unwinding through the actor.
fn run_guarded(job: Job<AnyBox>, conn: &mut SqliteConnection) -> Result<AnyBox> {
    panic::catch_unwind(AssertUnwindSafe(|| job(conn))).unwrap_or_else(|payload| {
        let message = panic_message(payload.as_ref());
        error!("Write job panicked: {}", message);
        Err(Error::Unexpected(format!("write job panicked: {}", message)))
    })
}

/// Spawns the single database writer.
///
/// The actor holds one pooled connection for its whole lifetime and stops
/// once every [`WriteHandle`] has been dropped.
pub fn spawn_writer(pool: DbPool) -> Result<WriteHandle> {
    let mut conn = get_connection(&pool).map_err(|e| {
        error!("Writer actor could not acquire a connection: {}", e);
        e
    })?;
    let (tx, mut rx) = mpsc::channel::<Envelope>(QUEUE_DEPTH);

    tokio::spawn(async move {
        while let Some((job, reply_tx)) = rx.recv().await {
            let result: Result<AnyBox> = conn
                .immediate_transaction::<_, StorageError, _>(|c| {
                    run_guarded(job, c).map_err(StorageError::from)
                })
                .map_err(Error::from);

            // The caller may have gone away; nothing to do then.
            let _ = reply_tx.send(result);
        }
        debug!("Writer actor stopped");
    });

    Ok(WriteHandle { tx })
}
