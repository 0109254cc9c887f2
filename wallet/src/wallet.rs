//! The Wallet Context
//!
//! A wallet owns exactly one storage, one server, and one UI façade,
//! taken at construction and released in reverse order. The
//! terms-of-service protocol lives here: fetch once, check storage,
//! prompt if needed, persist best-effort.

use std::time::SystemTime;

use chrono::{DateTime, Utc};
use tracing::warn;

use wbc_core::Result;

use crate::epoch::{epoch_to_utc, system_to_epoch};
use crate::server::{Server, ServerConnector};
use crate::storage::{Storage, StorageBackend};
use crate::ui::{Ui, UserInterface};

/// The outcome of a terms-of-service check.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TermsStatus {
    /// The terms text currently offered by the server.
    pub terms: String,
    /// Whether the user has accepted these terms.
    pub accepted: bool,
    /// Acceptance time; meaningful only when `accepted` is set.
    pub accepted_at: Option<DateTime<Utc>>,
}

struct TermsCache {
    text: String,
    accepted: bool,
    accepted_at: Option<DateTime<Utc>>,
}

/// A wallet: one storage, one server, one user interface.
pub struct Wallet<B: StorageBackend, C: ServerConnector, U: UserInterface> {
    // Field order is teardown order: interface, server, storage.
    ui: Ui<U>,
    server: Server<C>,
    storage: Storage<B>,
    terms: Option<TermsCache>,
}

impl<B: StorageBackend, C: ServerConnector, U: UserInterface> Wallet<B, C, U> {
    /// Assemble a wallet from its three façades, taking ownership.
    pub fn new(storage: Storage<B>, server: Server<C>, ui: Ui<U>) -> Self {
        Self {
            ui,
            server,
            storage,
            terms: None,
        }
    }

    /// The storage façade.
    pub fn storage(&self) -> &Storage<B> {
        &self.storage
    }

    /// The storage façade, mutably.
    pub fn storage_mut(&mut self) -> &mut Storage<B> {
        &mut self.storage
    }

    /// The server façade, mutably; connect through this before use.
    pub fn server_mut(&mut self) -> &mut Server<C> {
        &mut self.server
    }

    /// The UI façade, mutably; start it through this before use.
    pub fn ui_mut(&mut self) -> &mut Ui<U> {
        &mut self.ui
    }

    /// Release the three façades in reverse construction order.
    ///
    /// All three teardowns are attempted even when one fails; the first
    /// error is the one reported. Dropping a wallet performs the same
    /// teardown with errors logged instead of returned.
    pub fn close(self) -> Result<()> {
        let Self {
            mut ui,
            mut server,
            storage,
            terms: _,
        } = self;
        let mut result = ui.shutdown();
        let server_result = server.disconnect();
        if result.is_ok() {
            result = server_result;
        }
        let storage_result = storage.close();
        if result.is_ok() {
            result = storage_result;
        }
        result
    }

    /// Ensure the server's terms of service have been seen and accepted.
    ///
    /// Four steps, strictly in order:
    ///
    /// 1. If no terms text is cached, fetch it from the server and reset
    ///    the acceptance cache.
    /// 2. If not cached as accepted, ask storage whether this exact text
    ///    was accepted before.
    /// 3. If still not accepted, prompt through the UI. A fresh
    ///    acceptance is stamped with the current time and persisted
    ///    best-effort: a failed write is logged, not reported, and the
    ///    user is simply prompted again next time.
    /// 4. Report the text, the acceptance flag, and the acceptance time.
    ///
    /// Rejection is not sticky; calling again re-prompts.
    pub fn ensure_terms(&mut self) -> Result<TermsStatus> {
        if self.terms.is_none() {
            let text = self.server.get_terms()?;
            self.terms = Some(TermsCache {
                text,
                accepted: false,
                accepted_at: None,
            });
        }
        let cache = self.terms.as_mut().expect("terms cache was just populated");

        if !cache.accepted {
            if let Some(when) = self.storage.are_terms_accepted(&cache.text)? {
                cache.accepted = true;
                cache.accepted_at = Some(when);
            }
        }

        if !cache.accepted && self.ui.show_terms(&cache.text)? {
            let now = SystemTime::now();
            let seconds = system_to_epoch(now)?;
            cache.accepted = true;
            cache.accepted_at = Some(epoch_to_utc(seconds)?);
            if let Err(err) = self.storage.accept_terms(&cache.text, Some(now)) {
                warn!(?err, "failed to persist terms acceptance, will re-prompt next run");
            }
        }

        Ok(TermsStatus {
            terms: cache.text.clone(),
            accepted: cache.accepted,
            accepted_at: cache.accepted_at,
        })
    }
}
