//! Drop payload validation and slot state.
//!
//! Each drop zone is backed by a [`DropSlot`] holding at most one accepted
//! filesystem path. A payload is accepted only when it contains exactly one
//! item, the item exists, and its kind matches the slot. Acceptance returns
//! a [`SlotChanged`] event the controller consumes to recompute run
//! eligibility; rejection leaves the slot untouched.

use std::path::{Path, PathBuf};

/// The filesystem kind a slot accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlotKind {
    /// Regular files only.
    File,
    /// Directories only.
    Directory,
}

impl SlotKind {
    fn matches(self, path: &Path) -> bool {
        match self {
            SlotKind::File => path.is_file(),
            SlotKind::Directory => path.is_dir(),
        }
    }
}

/// Emitted when a slot accepts a dropped path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlotChanged {
    /// The newly accepted path.
    pub path: PathBuf,
}

/// Backing state for one drop zone.
#[derive(Clone, Debug)]
pub struct DropSlot {
    kind: SlotKind,
    path: Option<PathBuf>,
}

impl DropSlot {
    /// Create an empty slot accepting the given kind.
    pub fn new(kind: SlotKind) -> Self {
        Self { kind, path: None }
    }

    /// The accepted path, if any drop has succeeded so far.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// The kind this slot accepts.
    pub fn kind(&self) -> SlotKind {
        self.kind
    }

    /// Whether a payload would be accepted, without mutating the slot.
    ///
    /// Used to paint drop-zone feedback while a drag hovers the zone.
    pub fn would_accept(&self, payload: &[PathBuf]) -> bool {
        let [candidate] = payload else {
            return false;
        };
        candidate.exists() && self.kind.matches(candidate)
    }

    /// Validate a drop payload and store its path on success.
    ///
    /// Every attempt is validated independently; re-dropping the same path
    /// succeeds again and emits a fresh event.
    pub fn accept(&mut self, payload: &[PathBuf]) -> Option<SlotChanged> {
        if !self.would_accept(payload) {
            return None;
        }
        let path = payload[0].clone();
        self.path = Some(path.clone());
        Some(SlotChanged { path })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn touch(path: &Path) {
        std::fs::write(path, b"").unwrap();
    }

    #[test]
    fn rejects_multi_item_payloads() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("a.glo");
        let b = dir.path().join("b.glo");
        touch(&a);
        touch(&b);

        let mut slot = DropSlot::new(SlotKind::File);
        assert!(slot.accept(&[a, b]).is_none());
        assert!(slot.path().is_none());
    }

    #[test]
    fn rejects_empty_payloads() {
        let mut slot = DropSlot::new(SlotKind::File);
        assert!(slot.accept(&[]).is_none());
        assert!(slot.path().is_none());
    }

    #[test]
    fn rejects_missing_paths() {
        let dir = tempdir().unwrap();
        let ghost = dir.path().join("missing.glo");

        let mut slot = DropSlot::new(SlotKind::File);
        assert!(slot.accept(&[ghost]).is_none());
        assert!(slot.path().is_none());
    }

    #[test]
    fn rejects_kind_mismatch_both_ways() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("show.glo");
        touch(&file);

        let mut file_slot = DropSlot::new(SlotKind::File);
        assert!(file_slot.accept(&[dir.path().to_path_buf()]).is_none());

        let mut dir_slot = DropSlot::new(SlotKind::Directory);
        assert!(dir_slot.accept(&[file]).is_none());
        assert!(dir_slot.path().is_none());
    }

    #[test]
    fn accepts_matching_single_item() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("show.glo");
        touch(&file);

        let mut slot = DropSlot::new(SlotKind::File);
        let event = slot.accept(std::slice::from_ref(&file)).unwrap();
        assert_eq!(event.path, file);
        assert_eq!(slot.path(), Some(file.as_path()));
    }

    #[test]
    fn redropping_same_path_is_idempotent_but_notifies() {
        let dir = tempdir().unwrap();
        let mut slot = DropSlot::new(SlotKind::Directory);
        let payload = vec![dir.path().to_path_buf()];

        let first = slot.accept(&payload).unwrap();
        let second = slot.accept(&payload).unwrap();
        assert_eq!(first, second);
        assert_eq!(slot.path(), Some(dir.path()));
    }

    #[test]
    fn later_drop_overwrites_earlier_path() {
        let dir = tempdir().unwrap();
        let first = dir.path().join("first.glo");
        let second = dir.path().join("second.glo");
        touch(&first);
        touch(&second);

        let mut slot = DropSlot::new(SlotKind::File);
        slot.accept(std::slice::from_ref(&first)).unwrap();
        slot.accept(std::slice::from_ref(&second)).unwrap();
        assert_eq!(slot.path(), Some(second.as_path()));
    }
}
