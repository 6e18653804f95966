//! Ticket store backed by files on local disk
//!
//! Layout under the storage root:
//!
//! ```text
//! tickets/<ticket-id>.yaml   one record per live ticket
//! plates/<sha256>.claim     plate and id of the ticket holding it
//! tmp/                       staging area for atomic publishes
//! ```
//!
//! Records and claims are written to `tmp/` first and then published with a
//! hard link, which fails if the target already exists. That gives both a
//! conditional put on the ticket id and a conditional put keyed by plate, and
//! readers never observe a half-written file.
//!
//! Claim files are named by the SHA-256 of the plate so any plate fits in a
//! file name. The claim repeats the plate, and a claim for a different plate
//! is ignored on read.

use super::repository::{StoreError, StoreResult, TicketStore};
use crate::core::{Ticket, TicketId};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, warn};
use uuid::Uuid;

const TICKETS_DIR: &str = "tickets";
const PLATES_DIR: &str = "plates";
const TMP_DIR: &str = "tmp";

/// Contents of a plate claim file
#[derive(Debug, Serialize, Deserialize)]
struct PlateClaim {
    plate: String,
    ticket_id: TicketId,
}

/// File-based ticket store
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `root`
    ///
    /// Directories are created by [`ensure_directories`](Self::ensure_directories).
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Create the storage directories if missing
    pub async fn ensure_directories(&self) -> StoreResult<()> {
        for dir in [TICKETS_DIR, PLATES_DIR, TMP_DIR] {
            let path = self.root.join(dir);
            fs::create_dir_all(&path)
                .await
                .map_err(|e| io_failure("create directory", &path, &e))?;
        }
        Ok(())
    }

    fn ticket_path(&self, id: &TicketId) -> PathBuf {
        self.root.join(TICKETS_DIR).join(format!("{id}.yaml"))
    }

    fn claim_path(&self, plate: &str) -> PathBuf {
        self.root
            .join(PLATES_DIR)
            .join(format!("{}.claim", hex::encode(Sha256::digest(plate.as_bytes()))))
    }

    /// Write `contents` to `target` only if `target` does not exist yet
    async fn publish_new(&self, target: &Path, contents: &[u8]) -> StoreResult<()> {
        let staging = self.root.join(TMP_DIR).join(Uuid::new_v4().to_string());
        fs::write(&staging, contents)
            .await
            .map_err(|e| io_failure("write", &staging, &e))?;

        let linked = fs::hard_link(&staging, target).await;
        if let Err(e) = fs::remove_file(&staging).await {
            warn!("Failed to remove staging file {}: {}", staging.display(), e);
        }

        match linked {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => Err(StoreError::AlreadyExists),
            Err(e) => Err(io_failure("publish", target, &e)),
        }
    }

    async fn read_ticket(&self, path: &Path) -> StoreResult<Option<Ticket>> {
        let contents = match fs::read_to_string(path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(io_failure("read", path, &e)),
        };
        serde_yaml::from_str(&contents)
            .map(Some)
            .map_err(|e| StoreError::Unavailable(format!("corrupt ticket file {}: {e}", path.display())))
    }

    async fn read_claim(&self, plate: &str) -> StoreResult<Option<TicketId>> {
        let path = self.claim_path(plate);
        let contents = match fs::read_to_string(&path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(io_failure("read", &path, &e)),
        };
        let claim: PlateClaim = serde_yaml::from_str(&contents)
            .map_err(|e| StoreError::Unavailable(format!("corrupt plate claim {}: {e}", path.display())))?;

        if claim.plate != plate {
            warn!("Plate claim {} belongs to another plate", path.display());
            return Ok(None);
        }
        Ok(Some(claim.ticket_id))
    }

    async fn remove_if_present(&self, path: &Path) -> StoreResult<()> {
        match fs::remove_file(path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_failure("remove", path, &e)),
        }
    }
}

#[async_trait]
impl TicketStore for FileStore {
    async fn find_by_plate(&self, plate: &str) -> StoreResult<Option<Ticket>> {
        match self.read_claim(plate).await? {
            // A claim without a record is a delete in progress
            Some(id) => self.get_by_id(&id).await,
            None => Ok(None),
        }
    }

    async fn insert(&self, ticket: &Ticket) -> StoreResult<()> {
        let record = serde_yaml::to_string(ticket).map_err(StoreError::unavailable)?;
        let ticket_path = self.ticket_path(&ticket.id);

        // Record first, then the plate claim, so every claim points at an
        // existing record.
        self.publish_new(&ticket_path, record.as_bytes()).await?;

        let claim = serde_yaml::to_string(&PlateClaim {
            plate: ticket.plate.clone(),
            ticket_id: ticket.id,
        })
        .map_err(StoreError::unavailable)?;
        let claim_path = self.claim_path(&ticket.plate);
        if let Err(e) = self.publish_new(&claim_path, claim.as_bytes()).await {
            self.remove_if_present(&ticket_path).await?;
            return Err(e);
        }

        debug!("Stored ticket {} at {}", ticket.id.short(), ticket_path.display());
        Ok(())
    }

    async fn get_by_id(&self, id: &TicketId) -> StoreResult<Option<Ticket>> {
        self.read_ticket(&self.ticket_path(id)).await
    }

    async fn delete_by_id(&self, id: &TicketId) -> StoreResult<()> {
        let ticket_path = self.ticket_path(id);
        let ticket = self
            .read_ticket(&ticket_path)
            .await?
            .ok_or(StoreError::NotFound)?;

        // Only one remover of the record can succeed
        match fs::remove_file(&ticket_path).await {
            Ok(()) => {},
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(StoreError::NotFound),
            Err(e) => return Err(io_failure("remove", &ticket_path, &e)),
        }

        if self.read_claim(&ticket.plate).await? == Some(*id) {
            self.remove_if_present(&self.claim_path(&ticket.plate)).await?;
        }

        debug!("Removed ticket {}", id.short());
        Ok(())
    }

    fn enforces_unique_plate(&self) -> bool {
        true
    }

    fn backend_name(&self) -> &'static str {
        "file"
    }
}

fn io_failure(action: &str, path: &Path, err: &std::io::Error) -> StoreError {
    StoreError::Unavailable(format!("failed to {action} {}: {err}", path.display()))
}
