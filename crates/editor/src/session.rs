// In-memory session model: open documents, active selection, rename state.
//
// Every operation is total over the current state. A stale event handler
// may still reference an already-closed document, so missing ids degrade
// to no-ops instead of erroring.

use tracing::debug;

use crate::local::DiskHandle;

/// Session-local document identifier.
///
/// Ids are allocated from a per-session monotonic counter and never reused
/// after a close, which keeps them strictly increasing across the whole
/// session (not just the currently open set).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DocumentId(pub u32);

impl std::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// One open text buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: DocumentId,
    pub title: String,
    pub content: String,
    /// Present only after the document has been saved to, or opened from,
    /// the local disk. Absence means new, remote-imported, or last saved
    /// via the download fallback.
    pub disk: Option<DiskHandle>,
}

impl Document {
    pub fn stats(&self) -> DocumentStats {
        DocumentStats::of(&self.content)
    }
}

/// Status-bar style counters for a document body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentStats {
    pub chars: usize,
    pub words: usize,
    pub lines: usize,
}

impl DocumentStats {
    pub fn of(content: &str) -> Self {
        let trimmed = content.trim();
        Self {
            chars: content.chars().count(),
            words: if trimmed.is_empty() { 0 } else { trimmed.split_whitespace().count() },
            // An empty buffer still shows one line.
            lines: content.split('\n').count(),
        }
    }
}

/// In-progress inline rename: the target tab plus the draft text, discarded
/// on cancel and written back on commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleEdit {
    pub target: DocumentId,
    pub draft: String,
}

/// The set of open documents, in display order, plus transient UI state.
#[derive(Debug, Clone, Default)]
pub struct Session {
    documents: Vec<Document>,
    active: Option<DocumentId>,
    title_edit: Option<TitleEdit>,
    next_id: u32,
}

impl Session {
    /// An empty session: no documents, nothing active.
    pub fn new() -> Self {
        Self::default()
    }

    /// The original app's initial state: one welcome document, active.
    pub fn with_welcome() -> Self {
        let mut session = Self::new();
        let id = session.create_document();
        let doc = session.document_mut(id).expect("welcome document exists");
        doc.content =
            "Welcome to your new text editor!\n\nPress Ctrl+S to save this file.".to_string();
        session
    }

    // ── Queries ─────────────────────────────────────────────────────

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn active_id(&self) -> Option<DocumentId> {
        self.active
    }

    pub fn active_document(&self) -> Option<&Document> {
        self.active.and_then(|id| self.document(id))
    }

    pub fn document(&self, id: DocumentId) -> Option<&Document> {
        self.documents.iter().find(|doc| doc.id == id)
    }

    pub fn document_mut(&mut self, id: DocumentId) -> Option<&mut Document> {
        self.documents.iter_mut().find(|doc| doc.id == id)
    }

    pub fn title_edit(&self) -> Option<&TitleEdit> {
        self.title_edit.as_ref()
    }

    // ── Document lifecycle ──────────────────────────────────────────

    /// Open a fresh empty document titled `Document {id}` and make it
    /// active.
    pub fn create_document(&mut self) -> DocumentId {
        let id = self.allocate_id();
        self.documents.push(Document {
            id,
            title: format!("Document {id}"),
            content: String::new(),
            disk: None,
        });
        self.active = Some(id);
        debug!(%id, "created document");
        id
    }

    /// Open a document seeded from elsewhere (local file, remote record)
    /// and make it active.
    pub fn adopt_document(
        &mut self,
        title: impl Into<String>,
        content: impl Into<String>,
        disk: Option<DiskHandle>,
    ) -> DocumentId {
        let id = self.allocate_id();
        self.documents.push(Document { id, title: title.into(), content: content.into(), disk });
        self.active = Some(id);
        debug!(%id, "adopted document");
        id
    }

    /// Close a document. If it was active and others remain, the first
    /// remaining document in display order becomes active.
    pub fn close_document(&mut self, id: DocumentId) {
        let before = self.documents.len();
        self.documents.retain(|doc| doc.id != id);
        if self.documents.len() == before {
            return;
        }

        if self.title_edit.as_ref().is_some_and(|edit| edit.target == id) {
            self.title_edit = None;
        }
        if self.active == Some(id) {
            self.active = self.documents.first().map(|doc| doc.id);
        }
        debug!(%id, remaining = self.documents.len(), "closed document");
    }

    pub fn set_active(&mut self, id: DocumentId) {
        if self.document(id).is_some() {
            self.active = Some(id);
        }
    }

    /// Replace the whole content of a document (the editor pushes the full
    /// buffer on every change).
    pub fn update_content(&mut self, id: DocumentId, content: impl Into<String>) {
        if let Some(doc) = self.document_mut(id) {
            doc.content = content.into();
        }
    }

    // ── Inline rename ───────────────────────────────────────────────

    pub fn begin_rename(&mut self, id: DocumentId, current_title: impl Into<String>) {
        if self.document(id).is_some() {
            self.title_edit = Some(TitleEdit { target: id, draft: current_title.into() });
        }
    }

    /// Mutable access to the rename draft while editing.
    pub fn rename_draft_mut(&mut self) -> Option<&mut String> {
        self.title_edit.as_mut().map(|edit| &mut edit.draft)
    }

    /// Write the draft back to the document's title and leave rename mode.
    ///
    /// Both blur and Enter trigger this, so a second commit with no new
    /// `begin_rename` in between must be harmless.
    pub fn commit_rename(&mut self, id: DocumentId) {
        let Some(edit) = self.title_edit.take() else {
            return;
        };
        if edit.target != id {
            // Stale commit for a different tab; drop the draft.
            return;
        }
        if let Some(doc) = self.document_mut(id) {
            doc.title = edit.draft;
        }
    }

    pub fn cancel_rename(&mut self) {
        self.title_edit = None;
    }

    // ── Disk handles ────────────────────────────────────────────────

    /// Record where a document lives on disk after a successful save.
    ///
    /// The title is derived from the handle only on the first attach; later
    /// saves to the same location must not overwrite a user-chosen title.
    pub fn attach_disk_handle(&mut self, id: DocumentId, handle: DiskHandle) {
        if let Some(doc) = self.document_mut(id) {
            let first_attach = doc.disk.is_none();
            if first_attach {
                doc.title = handle.display_name();
            }
            doc.disk = Some(handle);
        }
    }

    fn allocate_id(&mut self) -> DocumentId {
        self.next_id += 1;
        DocumentId(self.next_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn handle(path: &str) -> DiskHandle {
        DiskHandle::from_path(Path::new(path))
    }

    // ── Id allocation ───────────────────────────────────────────────

    #[test]
    fn created_ids_are_strictly_increasing_and_unique() {
        let mut session = Session::new();
        let ids: Vec<_> = (0..5).map(|_| session.create_document()).collect();
        for pair in ids.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn ids_are_not_reused_after_close() {
        let mut session = Session::new();
        session.create_document();
        let second = session.create_document();
        session.close_document(second);

        let third = session.create_document();
        assert!(third > second, "closing the highest tab must not recycle its id");
    }

    #[test]
    fn fresh_document_gets_default_title_and_empty_body() {
        let mut session = Session::new();
        let id = session.create_document();
        let doc = session.document(id).unwrap();
        assert_eq!(doc.title, format!("Document {id}"));
        assert_eq!(doc.content, "");
        assert!(doc.disk.is_none());
    }

    // ── Active selection ────────────────────────────────────────────

    #[test]
    fn create_then_close_reverts_to_first_remaining() {
        let mut session = Session::new();
        let first = session.create_document();
        assert_eq!(session.document(first).unwrap().title, "Document 1");

        let second = session.create_document();
        assert_eq!(session.document(second).unwrap().title, "Document 2");
        assert_eq!(session.active_id(), Some(second));

        session.close_document(second);
        assert_eq!(session.active_id(), Some(first));
    }

    #[test]
    fn closing_a_background_tab_keeps_the_active_one() {
        let mut session = Session::new();
        let first = session.create_document();
        let second = session.create_document();
        session.set_active(second);

        session.close_document(first);
        assert_eq!(session.active_id(), Some(second));
    }

    #[test]
    fn closing_the_last_document_clears_active() {
        let mut session = Session::new();
        let only = session.create_document();
        session.close_document(only);
        assert!(session.is_empty());
        assert_eq!(session.active_id(), None);
    }

    #[test]
    fn close_falls_back_by_display_order_not_id() {
        let mut session = Session::new();
        let first = session.create_document();
        let second = session.create_document();
        let third = session.create_document();
        session.close_document(first);

        // Display order is now [second, third]; closing the active third
        // activates second, the first remaining by order.
        assert_eq!(session.active_id(), Some(third));
        session.close_document(third);
        assert_eq!(session.active_id(), Some(second));
    }

    #[test]
    fn missing_ids_are_no_ops() {
        let mut session = Session::new();
        let id = session.create_document();
        let ghost = DocumentId(99);

        session.set_active(ghost);
        session.update_content(ghost, "x");
        session.close_document(ghost);
        session.commit_rename(ghost);

        assert_eq!(session.active_id(), Some(id));
        assert_eq!(session.documents().len(), 1);
        assert_eq!(session.document(id).unwrap().content, "");
    }

    // ── Content ─────────────────────────────────────────────────────

    #[test]
    fn update_content_replaces_wholesale() {
        let mut session = Session::new();
        let id = session.create_document();
        session.update_content(id, "first");
        session.update_content(id, "second");
        assert_eq!(session.document(id).unwrap().content, "second");
    }

    // ── Rename ──────────────────────────────────────────────────────

    #[test]
    fn commit_rename_applies_the_draft() {
        let mut session = Session::new();
        let id = session.create_document();
        session.begin_rename(id, "Document 1");
        *session.rename_draft_mut().unwrap() = "Notes".to_string();
        session.commit_rename(id);

        assert_eq!(session.document(id).unwrap().title, "Notes");
        assert!(session.title_edit().is_none());
    }

    #[test]
    fn double_commit_is_idempotent() {
        let mut session = Session::new();
        let id = session.create_document();
        session.begin_rename(id, "Document 1");
        *session.rename_draft_mut().unwrap() = "Notes".to_string();

        // Blur and Enter can both fire the commit.
        session.commit_rename(id);
        session.commit_rename(id);
        assert_eq!(session.document(id).unwrap().title, "Notes");
    }

    #[test]
    fn cancel_rename_discards_the_draft() {
        let mut session = Session::new();
        let id = session.create_document();
        session.begin_rename(id, "Document 1");
        *session.rename_draft_mut().unwrap() = "Scratch".to_string();
        session.cancel_rename();
        session.commit_rename(id);

        assert_eq!(session.document(id).unwrap().title, "Document 1");
    }

    #[test]
    fn closing_the_renamed_tab_clears_edit_state() {
        let mut session = Session::new();
        session.create_document();
        let second = session.create_document();
        session.begin_rename(second, "Document 2");
        session.close_document(second);
        assert!(session.title_edit().is_none());
    }

    // ── Disk handles ────────────────────────────────────────────────

    #[test]
    fn first_attach_derives_title_from_handle() {
        let mut session = Session::new();
        let id = session.create_document();
        session.attach_disk_handle(id, handle("/tmp/meeting notes.txt"));

        let doc = session.document(id).unwrap();
        assert_eq!(doc.title, "meeting notes");
        assert!(doc.disk.is_some());
    }

    #[test]
    fn second_attach_keeps_the_existing_title() {
        let mut session = Session::new();
        let id = session.create_document();
        session.attach_disk_handle(id, handle("/tmp/a.txt"));
        session.attach_disk_handle(id, handle("/tmp/b.txt"));

        let doc = session.document(id).unwrap();
        assert_eq!(doc.title, "a", "re-saving must not re-derive the title");
        assert_eq!(doc.disk.as_ref().unwrap().display_name(), "b");
    }

    // ── Welcome seed & stats ────────────────────────────────────────

    #[test]
    fn welcome_session_matches_the_original_seed() {
        let session = Session::with_welcome();
        let doc = session.active_document().unwrap();
        assert_eq!(doc.id, DocumentId(1));
        assert_eq!(doc.title, "Document 1");
        assert!(doc.content.starts_with("Welcome to your new text editor!"));
    }

    #[test]
    fn stats_count_chars_words_and_lines() {
        let stats = DocumentStats::of("hello brave\nworld\n");
        assert_eq!(stats.chars, 18);
        assert_eq!(stats.words, 3);
        assert_eq!(stats.lines, 3);

        let empty = DocumentStats::of("");
        assert_eq!(empty.words, 0);
        assert_eq!(empty.lines, 1);
    }
}
