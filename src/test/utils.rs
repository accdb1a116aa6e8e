use tempfile::TempDir;

use crate::store::Stores;

/// Stores rooted in a fresh temp directory. Keep the TempDir binding alive
/// for the duration of the test or the files vanish under the stores.
pub fn temp_stores() -> (TempDir, Stores) {
    let dir = tempfile::tempdir().unwrap();
    let stores = Stores::open(dir.path());
    (dir, stores)
}
