//! Storage Façade
//!
//! The wallet persists through two host-supplied resources: an
//! append-only recovery log and a database. The core does not pick an
//! engine or a schema for either; the host implements [`StorageBackend`]
//! and the [`Storage`] façade owns the opened handles, enforces the
//! open/close ordering, and translates stored seconds-past-epoch stamps
//! into UTC timestamps at the boundary.

use std::time::SystemTime;

use chrono::{DateTime, Utc};
use tracing::debug;
use wbc_core::{Error, Result};

use crate::epoch::{epoch_to_utc, system_to_epoch};

/// A terms-of-service acceptance row as the database stores it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TermsRecord {
    /// The accepted terms text.
    pub text: String,
    /// Acceptance time, seconds past the webcash epoch.
    pub when: u64,
}

/// A terms-of-service acceptance with a broken-down UTC stamp.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TermsAcceptance {
    /// The accepted terms text.
    pub text: String,
    /// When the terms were accepted.
    pub when: DateTime<Utc>,
}

/// Host-provided persistence callbacks.
///
/// Handle types are opaque to the core. `open_log` and `open_db` are the
/// required operations; the closers default to dropping the handle, for
/// hosts whose resources need no explicit teardown. All times crossing
/// this trait are unsigned seconds past [`WC_EPOCH`](crate::WC_EPOCH).
pub trait StorageBackend {
    /// Opaque recovery-log handle.
    type Log;
    /// Opaque database handle.
    type Db;

    /// Open the append-only recovery log at `url`.
    fn open_log(&mut self, url: &str) -> Result<Self::Log>;

    /// Release a recovery log.
    fn close_log(&mut self, log: Self::Log) -> Result<()> {
        drop(log);
        Ok(())
    }

    /// Open the wallet database at `url`.
    fn open_db(&mut self, url: &str) -> Result<Self::Db>;

    /// Release a database.
    fn close_db(&mut self, db: Self::Db) -> Result<()> {
        drop(db);
        Ok(())
    }

    /// Whether any accepted terms-of-service row exists.
    fn any_terms(&self, db: &Self::Db) -> Result<bool>;

    /// Every accepted terms-of-service row.
    fn all_terms(&self, db: &Self::Db) -> Result<Vec<TermsRecord>>;

    /// When `terms` was accepted, or `None` if it never was.
    fn terms_accepted(&self, db: &Self::Db, terms: &str) -> Result<Option<u64>>;

    /// Record acceptance of `terms` at `when`.
    fn accept_terms(&mut self, db: &mut Self::Db, terms: &str, when: u64) -> Result<()>;
}

/// Owning façade over an opened [`StorageBackend`].
///
/// Holds the log and database handles for its lifetime and closes them,
/// database first, on [`Storage::close`] or drop.
pub struct Storage<B: StorageBackend> {
    backend: B,
    log: Option<B::Log>,
    db: Option<B::Db>,
}

impl<B: StorageBackend> Storage<B> {
    /// Open the recovery log, then the database.
    ///
    /// If the log opens but the database does not, the log is closed
    /// again before `Error::DbOpenFailed` is returned; a failed log open
    /// is `Error::LogOpenFailed` and leaves nothing behind.
    pub fn open(mut backend: B, log_url: &str, db_url: &str) -> Result<Self> {
        let log = backend
            .open_log(log_url)
            .map_err(|_| Error::LogOpenFailed)?;
        let db = match backend.open_db(db_url) {
            Ok(db) => db,
            Err(_) => {
                if let Err(err) = backend.close_log(log) {
                    debug!(?err, "failed to close recovery log after database open error");
                }
                return Err(Error::DbOpenFailed);
            }
        };
        Ok(Self {
            backend,
            log: Some(log),
            db: Some(db),
        })
    }

    /// Close the database and recovery log.
    ///
    /// Both closers run even if the first fails; the first error wins.
    pub fn close(mut self) -> Result<()> {
        self.release()
    }

    fn release(&mut self) -> Result<()> {
        let mut result = Ok(());
        if let Some(db) = self.db.take() {
            result = self.backend.close_db(db);
        }
        if let Some(log) = self.log.take() {
            let log_result = self.backend.close_log(log);
            if result.is_ok() {
                result = log_result;
            }
        }
        result
    }

    fn db(&self) -> Result<&B::Db> {
        self.db.as_ref().ok_or(Error::DbClosed)
    }

    /// Whether any terms of service have ever been accepted.
    pub fn have_accepted_terms(&self) -> Result<bool> {
        self.backend.any_terms(self.db()?)
    }

    /// Enumerate all accepted terms with UTC acceptance stamps.
    ///
    /// Any stored stamp that cannot be converted makes the whole
    /// enumeration fail with `Error::DbCorrupt`.
    pub fn enumerate_terms(&self) -> Result<Vec<TermsAcceptance>> {
        let rows = self.backend.all_terms(self.db()?)?;
        rows.into_iter()
            .map(|row| {
                let when = epoch_to_utc(row.when).map_err(|_| Error::DbCorrupt)?;
                Ok(TermsAcceptance {
                    text: row.text,
                    when,
                })
            })
            .collect()
    }

    /// When `terms` was accepted, if ever.
    pub fn are_terms_accepted(&self, terms: &str) -> Result<Option<DateTime<Utc>>> {
        match self.backend.terms_accepted(self.db()?, terms)? {
            Some(seconds) => Ok(Some(epoch_to_utc(seconds)?)),
            None => Ok(None),
        }
    }

    /// Record acceptance of `terms`.
    ///
    /// `now` defaults to the current system time. Times before the
    /// webcash epoch are rejected with `Error::InvalidArgument`.
    pub fn accept_terms(&mut self, terms: &str, now: Option<SystemTime>) -> Result<()> {
        let now = now.unwrap_or_else(SystemTime::now);
        let when = system_to_epoch(now)?;
        let db = self.db.as_mut().ok_or(Error::DbClosed)?;
        self.backend.accept_terms(db, terms, when)
    }
}

impl<B: StorageBackend> Drop for Storage<B> {
    fn drop(&mut self) {
        if let Err(err) = self.release() {
            debug!(?err, "storage teardown reported an error on drop");
        }
    }
}
