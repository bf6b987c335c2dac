// Local-disk persistence: file dialogs, disk handles, download fallback.
//
// The host's picker capability is abstracted behind `DialogHost` so the
// bridge can be driven by a mock in tests and by `HeadlessDialogs` on
// hosts without a display.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};

/// Accepted extension for everything Quire reads and writes locally.
pub const TEXT_EXTENSION: &str = "txt";

/// An opaque capability naming one writable location on the local disk.
///
/// Once a document holds a handle, later saves reuse it without
/// re-prompting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiskHandle {
    path: PathBuf,
}

impl DiskHandle {
    pub(crate) fn from_path(path: &Path) -> Self {
        Self { path: path.to_path_buf() }
    }

    /// File name with the extension stripped; used to derive a document
    /// title on first save or open.
    pub fn display_name(&self) -> String {
        self.path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.to_string_lossy().into_owned())
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }
}

/// The host environment's file-dialog and disk surface.
///
/// `prompt_save` / `prompt_open` return `Ok(None)` when the user dismisses
/// the dialog; cancellation is never an error.
pub trait DialogHost {
    /// Whether capability-based pickers exist on this host. When false,
    /// saves use `save_fallback` and opens are unavailable.
    fn supports_pickers(&self) -> bool;

    fn prompt_save(&mut self, suggested_name: &str) -> Result<Option<DiskHandle>>;

    fn prompt_open(&mut self) -> Result<Option<DiskHandle>>;

    /// Replace the handle's contents entirely (overwrite, not append).
    fn write_text(&mut self, handle: &DiskHandle, content: &str) -> Result<()>;

    fn read_text(&mut self, handle: &DiskHandle) -> Result<String>;

    /// Download-style save used when pickers are unavailable: drop the
    /// content into the host's downloads directory and forget about it.
    /// No handle is produced.
    fn save_fallback(&mut self, suggested_name: &str, content: &str) -> Result<()>;
}

// ── Native host ─────────────────────────────────────────────────────

/// Desktop host backed by `rfd` dialogs and `std::fs`.
pub struct NativeDialogs {
    fallback_dir: Option<PathBuf>,
}

impl NativeDialogs {
    pub fn new() -> Self {
        Self { fallback_dir: dirs::download_dir() }
    }

    pub fn with_fallback_dir(dir: PathBuf) -> Self {
        Self { fallback_dir: Some(dir) }
    }
}

impl Default for NativeDialogs {
    fn default() -> Self {
        Self::new()
    }
}

impl DialogHost for NativeDialogs {
    fn supports_pickers(&self) -> bool {
        true
    }

    fn prompt_save(&mut self, suggested_name: &str) -> Result<Option<DiskHandle>> {
        let picked = rfd::FileDialog::new()
            .add_filter("Text Files", &[TEXT_EXTENSION])
            .set_file_name(suggested_name)
            .save_file();
        Ok(picked.map(|path| DiskHandle::from_path(&path)))
    }

    fn prompt_open(&mut self) -> Result<Option<DiskHandle>> {
        let picked =
            rfd::FileDialog::new().add_filter("Text Files", &[TEXT_EXTENSION]).pick_file();
        Ok(picked.map(|path| DiskHandle::from_path(&path)))
    }

    fn write_text(&mut self, handle: &DiskHandle, content: &str) -> Result<()> {
        fs::write(handle.path(), content)
            .with_context(|| format!("failed to write `{}`", handle.path().display()))
    }

    fn read_text(&mut self, handle: &DiskHandle) -> Result<String> {
        fs::read_to_string(handle.path())
            .with_context(|| format!("failed to read `{}`", handle.path().display()))
    }

    fn save_fallback(&mut self, suggested_name: &str, content: &str) -> Result<()> {
        let dir = self
            .fallback_dir
            .as_ref()
            .ok_or_else(|| anyhow!("no downloads directory on this host"))?;
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create `{}`", dir.display()))?;
        let target = dir.join(suggested_name);
        fs::write(&target, content)
            .with_context(|| format!("failed to write `{}`", target.display()))
    }
}

// ── Headless host ───────────────────────────────────────────────────

/// Host without a display: no pickers, fallback saves only.
pub struct HeadlessDialogs {
    fallback_dir: PathBuf,
}

impl HeadlessDialogs {
    pub fn new(fallback_dir: PathBuf) -> Self {
        Self { fallback_dir }
    }
}

impl DialogHost for HeadlessDialogs {
    fn supports_pickers(&self) -> bool {
        false
    }

    fn prompt_save(&mut self, _suggested_name: &str) -> Result<Option<DiskHandle>> {
        Err(anyhow!("file pickers are not available on this host"))
    }

    fn prompt_open(&mut self) -> Result<Option<DiskHandle>> {
        Err(anyhow!("file pickers are not available on this host"))
    }

    fn write_text(&mut self, handle: &DiskHandle, content: &str) -> Result<()> {
        fs::write(handle.path(), content)
            .with_context(|| format!("failed to write `{}`", handle.path().display()))
    }

    fn read_text(&mut self, handle: &DiskHandle) -> Result<String> {
        fs::read_to_string(handle.path())
            .with_context(|| format!("failed to read `{}`", handle.path().display()))
    }

    fn save_fallback(&mut self, suggested_name: &str, content: &str) -> Result<()> {
        fs::create_dir_all(&self.fallback_dir)
            .with_context(|| format!("failed to create `{}`", self.fallback_dir.display()))?;
        let target = self.fallback_dir.join(suggested_name);
        fs::write(&target, content)
            .with_context(|| format!("failed to write `{}`", target.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_strips_the_extension() {
        let handle = DiskHandle::from_path(Path::new("/home/ada/notes/meeting notes.txt"));
        assert_eq!(handle.display_name(), "meeting notes");
    }

    #[test]
    fn display_name_without_extension_is_the_file_name() {
        let handle = DiskHandle::from_path(Path::new("/home/ada/TODO"));
        assert_eq!(handle.display_name(), "TODO");
    }

    #[test]
    fn write_then_read_round_trips_through_a_handle() {
        let dir = tempfile::tempdir().unwrap();
        let handle = DiskHandle::from_path(&dir.path().join("draft.txt"));
        let mut host = NativeDialogs::with_fallback_dir(dir.path().to_path_buf());

        host.write_text(&handle, "first").unwrap();
        host.write_text(&handle, "second").unwrap();
        assert_eq!(host.read_text(&handle).unwrap(), "second", "writes overwrite, not append");
    }

    #[test]
    fn fallback_save_lands_in_the_downloads_dir() {
        let dir = tempfile::tempdir().unwrap();
        let mut host = NativeDialogs::with_fallback_dir(dir.path().to_path_buf());

        host.save_fallback("Document 1.txt", "body").unwrap();
        let saved = fs::read_to_string(dir.path().join("Document 1.txt")).unwrap();
        assert_eq!(saved, "body");
    }

    #[test]
    fn headless_host_reports_pickers_unsupported() {
        let dir = tempfile::tempdir().unwrap();
        let mut host = HeadlessDialogs::new(dir.path().to_path_buf());

        assert!(!host.supports_pickers());
        assert!(host.prompt_save("x.txt").is_err());
        assert!(host.prompt_open().is_err());
        host.save_fallback("x.txt", "ok").unwrap();
    }
}
