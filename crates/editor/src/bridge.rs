// Persistence bridge: mediates between the session model and the two
// stores (local disk, remote HTTP).
//
// Every entry point captures the target document id and the fields to
// persist up front; results are applied back by that captured id, so a tab
// switch or close while an operation is in flight never writes into the
// wrong document. Nothing here retries: a failed save stays failed until
// the user clicks again.

use tracing::{info, warn};

use quire_common::protocol::SaveFileRequest;
use quire_common::types::{RemoteFile, User};

use crate::credentials::CredentialStore;
use crate::local::{DialogHost, TEXT_EXTENSION};
use crate::notify::{Notifier, Severity};
use crate::remote::RemoteStore;
use crate::session::{DocumentId, Session};

/// Outcome of the startup auth gate and of logout.
///
/// A missing or rejected token degrades to an anonymous editing session;
/// the front end may show a login entry point but is not forced anywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    SignedIn(User),
    Anonymous,
}

pub struct Bridge<H, R, N, C> {
    dialogs: H,
    remote: R,
    notifier: N,
    credentials: C,
}

impl<H, R, N, C> Bridge<H, R, N, C>
where
    H: DialogHost,
    R: RemoteStore,
    N: Notifier,
    C: CredentialStore,
{
    /// `credentials` must share its backing store with the one the remote
    /// client reads its bearer token from (the same keychain entry, or a
    /// clone of the same in-memory store). Otherwise a 401 cleared by the
    /// remote client stays invisible to `startup`.
    pub fn new(dialogs: H, remote: R, notifier: N, credentials: C) -> Self {
        Self { dialogs, remote, notifier, credentials }
    }

    // ── Local save ──────────────────────────────────────────────────

    /// Save a document to the local disk.
    ///
    /// Reuses the document's disk handle when one exists; otherwise prompts
    /// for a location. Dismissing the prompt is a silent no-op. On hosts
    /// without pickers the content goes out through the download fallback
    /// and no handle is ever attached.
    pub fn save_local(&mut self, session: &mut Session, id: DocumentId) {
        let Some(doc) = session.document(id) else {
            return;
        };
        let title = doc.title.clone();
        let content = doc.content.clone();
        let existing = doc.disk.clone();
        let suggested = format!("{title}.{TEXT_EXTENSION}");

        if !self.dialogs.supports_pickers() {
            match self.dialogs.save_fallback(&suggested, &content) {
                Ok(()) => self.notifier.notify(Severity::Success, "File downloaded!"),
                Err(error) => {
                    warn!(%error, %id, "fallback save failed");
                    self.notifier.notify(Severity::Error, "Failed to save locally");
                }
            }
            return;
        }

        let handle = match existing {
            Some(handle) => handle,
            None => match self.dialogs.prompt_save(&suggested) {
                Ok(Some(handle)) => handle,
                // User dismissed the dialog.
                Ok(None) => return,
                Err(error) => {
                    warn!(%error, %id, "save prompt failed");
                    self.notifier.notify(Severity::Error, "Failed to save locally");
                    return;
                }
            },
        };

        match self.dialogs.write_text(&handle, &content) {
            Ok(()) => {
                // First successful write establishes the handle (and the
                // handle-derived title); later writes leave the title alone.
                session.attach_disk_handle(id, handle);
                info!(%id, "saved document to disk");
                self.notifier.notify(Severity::Success, "File saved successfully!");
            }
            Err(error) => {
                warn!(%error, %id, "disk write failed");
                self.notifier.notify(Severity::Error, "Failed to save locally");
            }
        }
    }

    // ── Local open ──────────────────────────────────────────────────

    /// Open a local file into a new document and make it active.
    ///
    /// Cancellation is silent. Read failures propagate to the caller for
    /// logging; no document is created.
    pub fn open_local(&mut self, session: &mut Session) -> anyhow::Result<()> {
        if !self.dialogs.supports_pickers() {
            // Permanent environment limitation, not a one-off failure.
            self.notifier.alert("File dialogs are not available on this host");
            return Ok(());
        }

        let Some(handle) = self.dialogs.prompt_open()? else {
            return Ok(());
        };
        let content = self.dialogs.read_text(&handle)?;
        let title = handle.display_name();
        let id = session.adopt_document(title, content, Some(handle));
        info!(%id, "opened local file");
        Ok(())
    }

    // ── Remote store ────────────────────────────────────────────────

    /// Push a document's title and content to the remote store.
    ///
    /// The local copy stays the source of truth either way; the store does
    /// last-writer-wins on its side.
    pub async fn save_remote(&mut self, session: &Session, id: DocumentId) {
        let Some(doc) = session.document(id) else {
            return;
        };
        let request = SaveFileRequest { title: doc.title.clone(), content: doc.content.clone() };

        match self.remote.save_file(&request).await {
            Ok(saved) => {
                info!(%id, remote_id = %saved.id, "saved document to remote store");
                self.notifier.notify(Severity::Success, "File saved to Cloud!");
            }
            Err(error) => {
                warn!(%error, %id, "remote save failed");
                self.notifier.notify(Severity::Error, "Failed to save to Cloud");
            }
        }
    }

    /// Fetch the caller's stored documents for presentation.
    pub async fn list_remote(&mut self) -> Option<Vec<RemoteFile>> {
        match self.remote.list_files().await {
            Ok(files) => Some(files),
            Err(error) => {
                warn!(%error, "remote listing failed");
                self.notifier.notify(Severity::Error, "Failed to load stored files");
                None
            }
        }
    }

    /// Open a remote record as a new local document.
    ///
    /// The remote `_id` is deliberately not retained: re-saving the
    /// document later creates a second remote record.
    pub fn import_remote(&mut self, session: &mut Session, file: &RemoteFile) -> DocumentId {
        session.adopt_document(file.title.clone(), file.content.clone(), None)
    }

    /// Delete a remote record; on success drop it from the cached listing.
    pub async fn delete_remote(&mut self, listing: &mut Vec<RemoteFile>, id: &str) {
        match self.remote.delete_file(id).await {
            Ok(()) => {
                listing.retain(|file| file.id != id);
                self.notifier.notify(Severity::Success, "File deleted successfully");
            }
            Err(error) => {
                warn!(%error, %id, "remote delete failed");
                self.notifier.notify(Severity::Error, "Failed to delete file");
            }
        }
    }

    // ── Auth gate ───────────────────────────────────────────────────

    /// Validate any stored token at session start.
    ///
    /// A missing token skips the network entirely; a rejected one is
    /// cleared. Either way the session continues anonymously.
    pub async fn startup(&mut self) -> AuthState {
        let has_token = matches!(self.credentials.token(), Ok(Some(_)));
        if !has_token {
            return AuthState::Anonymous;
        }

        match self.remote.me().await {
            Ok(user) => {
                info!(user = %user.name, "signed in from stored token");
                AuthState::SignedIn(user)
            }
            Err(error) => {
                warn!(%error, "stored token rejected; continuing anonymously");
                if let Err(error) = self.credentials.clear() {
                    warn!(%error, "failed to clear rejected token");
                }
                AuthState::Anonymous
            }
        }
    }

    /// Best-effort remote logout; the local token is cleared regardless.
    pub async fn logout(&mut self) -> AuthState {
        if let Err(error) = self.remote.logout().await {
            warn!(%error, "remote logout failed; clearing local token anyway");
        }
        if let Err(error) = self.credentials.clear() {
            warn!(%error, "failed to clear token on logout");
        }
        AuthState::Anonymous
    }
}
