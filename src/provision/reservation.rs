//! Claiming a unique folder in the external store.
use std::io;

use super::layout::ExternalStore;
use crate::config::validate_folder_name;
use crate::error::{PrivateFolderError, Result};
use crate::logging::Logger;
use crate::names::NameSource;
use crate::resources::helpers::fs::create_dir;
use crate::resources::probe;

/// Mode of the store root and of each reserved folder.
pub(super) const PRIVATE_MODE: u32 = 0o700;

/// Draw candidates from `names` until one is free in `store`, create its
/// folder, and return the name.
///
/// The store root is created first. Retries on collision are unbounded; a
/// finite source ends the loop with its own error.
///
/// # Errors
///
/// Returns an error if the store root cannot be prepared, the name source
/// fails or yields an invalid name, or creating the folder fails for a
/// reason other than it already existing.
pub fn reserve(store: &ExternalStore, names: &dyn NameSource, log: &Logger) -> Result<String> {
    create_dir(store.root(), PRIVATE_MODE, true)
        .map_err(PrivateFolderError::io("preparing external store", store.root()))?;

    loop {
        let candidate = names.candidate()?;
        validate_folder_name(&candidate)?;
        let target = store.folder(&candidate);

        if probe(&target)?.is_some() {
            log.debug(&format!("{candidate} is taken, drawing another name"));
            continue;
        }

        match create_dir(&target, PRIVATE_MODE, false) {
            Ok(()) => {
                log.debug(&format!("reserved {}", target.display()));
                return Ok(candidate);
            }
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                log.debug(&format!("{candidate} was claimed concurrently, retrying"));
            }
            Err(e) => {
                return Err(PrivateFolderError::io("creating external folder", &target)(e));
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::names::ScriptedNames;

    fn store_in(dir: &tempfile::TempDir) -> ExternalStore {
        ExternalStore::for_config_root(dir.path())
    }

    #[test]
    fn first_free_candidate_is_reserved() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let names = ScriptedNames::new(["a-b-c-d"]);

        let name = reserve(&store, &names, &Logger::new()).unwrap();

        assert_eq!(name, "a-b-c-d");
        assert!(store.folder("a-b-c-d").is_dir());
    }

    #[test]
    fn taken_candidates_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        std::fs::create_dir_all(store.folder("a-b-c-d")).unwrap();
        std::fs::write(store.folder("e-f-g-h"), "not a dir").unwrap();
        let names = ScriptedNames::new(["a-b-c-d", "e-f-g-h", "i-j-k-l"]);

        let name = reserve(&store, &names, &Logger::new()).unwrap();

        assert_eq!(name, "i-j-k-l");
        assert_eq!(names.remaining(), 0);
    }

    #[test]
    fn exhausted_source_stops_the_loop() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        std::fs::create_dir_all(store.folder("a-b-c-d")).unwrap();
        let names = ScriptedNames::new(["a-b-c-d"]);

        let err = reserve(&store, &names, &Logger::new()).unwrap_err();
        assert!(matches!(err, PrivateFolderError::NameSourceExhausted));
    }

    #[test]
    fn invalid_candidate_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let names = ScriptedNames::new(["../escape"]);

        let err = reserve(&store, &names, &Logger::new()).unwrap_err();
        assert!(matches!(err, PrivateFolderError::InvalidFolderName { .. }));
    }

    #[test]
    fn unusable_store_root_is_reported_once() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("private-folder"), "blocker").unwrap();
        let store = store_in(&dir);
        let names = ScriptedNames::new(["a-b-c-d", "e-f-g-h"]);

        let err = reserve(&store, &names, &Logger::new()).unwrap_err();

        assert!(
            err.to_string().starts_with("preparing external store"),
            "{err}"
        );
        assert_eq!(names.remaining(), 2);
    }

    #[cfg(unix)]
    #[test]
    fn reserved_folder_is_owner_only() {
        use std::os::unix::fs::PermissionsExt as _;

        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let name = reserve(&store, &ScriptedNames::new(["a-b-c-d"]), &Logger::new()).unwrap();

        let mode = std::fs::metadata(store.folder(&name))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o077, 0);
    }
}
