//! Single-writer store worker.
//!
//! # Responsibility
//! - Own the only SQLite connection on a dedicated thread.
//! - Apply queued store commands one at a time, in arrival order.
//! - Hand out cloneable `StoreHandle`s usable from async handlers and from
//!   blocking console code alike.
//!
//! # Invariants
//! - No statement runs outside the worker thread.
//! - The worker exits once every `StoreHandle` has been dropped.

use crate::console::MenuBackend;
use crate::model::medicine::{Medicine, MedicineId};
use crate::repo::medicine_repo::{RepoError, SqliteMedicineRepository};
use crate::service::medicine_service::MedicineService;
use log::{error, info};
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::thread::JoinHandle;
use tokio::sync::{mpsc, oneshot};

const WORKER_THREAD_NAME: &str = "medstore-store";

pub type StoreResult<T> = Result<T, StoreError>;

/// Error returned by `StoreHandle` operations.
#[derive(Debug)]
pub enum StoreError {
    Repo(RepoError),
    /// The worker thread could not be started.
    Spawn(std::io::Error),
    /// The worker thread is gone; the command was not applied.
    WorkerStopped,
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "{err}"),
            Self::Spawn(err) => write!(f, "failed to start store worker: {err}"),
            Self::WorkerStopped => write!(f, "store worker is not running"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::Spawn(err) => Some(err),
            Self::WorkerStopped => None,
        }
    }
}

impl From<RepoError> for StoreError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

type Reply<T> = oneshot::Sender<StoreResult<T>>;

enum StoreCommand {
    List { reply: Reply<Vec<Medicine>> },
    Insert { medicine: Medicine, reply: Reply<MedicineId> },
    Update { medicine: Medicine, reply: Reply<usize> },
    Delete { id: MedicineId, reply: Reply<usize> },
}

/// Cloneable submission side of the store worker queue.
#[derive(Clone)]
pub struct StoreHandle {
    commands: mpsc::UnboundedSender<StoreCommand>,
}

/// Join side of the store worker thread.
pub struct StoreWorker {
    thread: JoinHandle<()>,
}

impl StoreWorker {
    /// Waits for the worker to drain its queue and exit.
    ///
    /// Only returns after every `StoreHandle` clone has been dropped.
    pub fn join(self) -> StoreResult<()> {
        self.thread.join().map_err(|_| StoreError::WorkerStopped)
    }
}

/// Moves `conn` onto a dedicated thread and returns a handle to it.
///
/// # Errors
/// - Returns `StoreError::Repo` when `conn` is not a fully migrated store.
/// - Returns `StoreError::Spawn` when the thread cannot be created.
pub fn spawn_store_worker(conn: Connection) -> StoreResult<(StoreHandle, StoreWorker)> {
    SqliteMedicineRepository::try_new(&conn)?;

    let (commands, queue) = mpsc::unbounded_channel();
    let thread = std::thread::Builder::new()
        .name(WORKER_THREAD_NAME.to_string())
        .spawn(move || run_worker(conn, queue))
        .map_err(StoreError::Spawn)?;

    Ok((StoreHandle { commands }, StoreWorker { thread }))
}

fn run_worker(conn: Connection, mut queue: mpsc::UnboundedReceiver<StoreCommand>) {
    info!("event=store_worker module=worker status=start");
    let service = MedicineService::new(SqliteMedicineRepository::new(&conn));

    while let Some(command) = queue.blocking_recv() {
        // A dropped reply receiver means the caller gave up; the write still stands.
        match command {
            StoreCommand::List { reply } => {
                let _ = reply.send(service.list_medicines().map_err(StoreError::from));
            }
            StoreCommand::Insert { medicine, reply } => {
                let _ = reply.send(service.insert_medicine(&medicine).map_err(StoreError::from));
            }
            StoreCommand::Update { medicine, reply } => {
                let _ = reply.send(service.update_medicine(&medicine).map_err(StoreError::from));
            }
            StoreCommand::Delete { id, reply } => {
                let _ = reply.send(service.delete_medicine(id).map_err(StoreError::from));
            }
        }
    }

    drop(service);
    if let Err((_, err)) = conn.close() {
        error!("event=store_worker module=worker status=error error_code=db_close_failed error={err}");
    }
    info!("event=store_worker module=worker status=stopped");
}

impl StoreHandle {
    pub async fn list_medicines(&self) -> StoreResult<Vec<Medicine>> {
        let reply = self.submit(|reply| StoreCommand::List { reply })?;
        reply.await.map_err(|_| StoreError::WorkerStopped)?
    }

    pub async fn insert_medicine(&self, medicine: Medicine) -> StoreResult<MedicineId> {
        let reply = self.submit(|reply| StoreCommand::Insert { medicine, reply })?;
        reply.await.map_err(|_| StoreError::WorkerStopped)?
    }

    pub async fn update_medicine(&self, medicine: Medicine) -> StoreResult<usize> {
        let reply = self.submit(|reply| StoreCommand::Update { medicine, reply })?;
        reply.await.map_err(|_| StoreError::WorkerStopped)?
    }

    pub async fn delete_medicine(&self, id: MedicineId) -> StoreResult<usize> {
        let reply = self.submit(|reply| StoreCommand::Delete { id, reply })?;
        reply.await.map_err(|_| StoreError::WorkerStopped)?
    }

    /// Blocking variant of `list_medicines`.
    ///
    /// Must not be called from inside an async context.
    pub fn list_medicines_blocking(&self) -> StoreResult<Vec<Medicine>> {
        let reply = self.submit(|reply| StoreCommand::List { reply })?;
        reply.blocking_recv().map_err(|_| StoreError::WorkerStopped)?
    }

    pub fn insert_medicine_blocking(&self, medicine: Medicine) -> StoreResult<MedicineId> {
        let reply = self.submit(|reply| StoreCommand::Insert { medicine, reply })?;
        reply.blocking_recv().map_err(|_| StoreError::WorkerStopped)?
    }

    pub fn update_medicine_blocking(&self, medicine: Medicine) -> StoreResult<usize> {
        let reply = self.submit(|reply| StoreCommand::Update { medicine, reply })?;
        reply.blocking_recv().map_err(|_| StoreError::WorkerStopped)?
    }

    pub fn delete_medicine_blocking(&self, id: MedicineId) -> StoreResult<usize> {
        let reply = self.submit(|reply| StoreCommand::Delete { id, reply })?;
        reply.blocking_recv().map_err(|_| StoreError::WorkerStopped)?
    }

    fn submit<T>(
        &self,
        command: impl FnOnce(Reply<T>) -> StoreCommand,
    ) -> StoreResult<oneshot::Receiver<StoreResult<T>>> {
        let (reply, receiver) = oneshot::channel();
        self.commands
            .send(command(reply))
            .map_err(|_| StoreError::WorkerStopped)?;
        Ok(receiver)
    }
}

/// Server-local console backend: menu actions go straight to the worker.
impl MenuBackend for StoreHandle {
    type Error = StoreError;

    fn insert(&self, medicine: &Medicine) -> Result<(), Self::Error> {
        self.insert_medicine_blocking(medicine.clone()).map(|_| ())
    }

    fn update(&self, medicine: &Medicine) -> Result<(), Self::Error> {
        self.update_medicine_blocking(medicine.clone()).map(|_| ())
    }

    fn delete(&self, id: MedicineId) -> Result<(), Self::Error> {
        self.delete_medicine_blocking(id).map(|_| ())
    }

    fn list(&self) -> Result<Vec<Medicine>, Self::Error> {
        self.list_medicines_blocking()
    }
}
