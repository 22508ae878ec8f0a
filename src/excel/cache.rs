//! In-memory cache of parsed cutoff tables.
//!
//! `cached_cutoffs(path)` returns the table for `path`, parsing it only when
//! it is not cached yet or when the file's modification time changed since
//! the cached parse.

use std::collections::HashMap;
use std::error::Error;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};
use std::time::SystemTime;

use crate::models::CutoffTable;

struct Entry {
    modified: Option<SystemTime>,
    table: Arc<CutoffTable>,
}

static CUTOFF_CACHE: OnceLock<Mutex<HashMap<PathBuf, Entry>>> = OnceLock::new();

fn modified_time(path: &Path) -> Option<SystemTime> {
    std::fs::metadata(path).and_then(|m| m.modified()).ok()
}

pub fn cached_cutoffs<P: AsRef<Path>>(path: P) -> Result<Arc<CutoffTable>, Box<dyn Error>> {
    let path = path.as_ref();
    let cache = CUTOFF_CACHE.get_or_init(|| Mutex::new(HashMap::new()));
    let modified = modified_time(path);

    {
        let guard = cache.lock().map_err(|_| "cutoff cache mutex poisoned")?;
        if let Some(entry) = guard.get(path) {
            if modified.is_some() && entry.modified == modified {
                return Ok(Arc::clone(&entry.table));
            }
        }
    }

    // Parse outside the lock; two racing loads of the same file are harmless.
    let table = Arc::new(super::load_cutoffs(path)?);
    tracing::info!(path = %path.display(), rows = table.len(), "cutoff table loaded");

    let mut guard = cache.lock().map_err(|_| "cutoff cache mutex poisoned")?;
    guard.insert(
        path.to_path_buf(),
        Entry {
            modified,
            table: Arc::clone(&table),
        },
    );
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const HEADER: &str = "Institute,College Type,Location,Academic Program Name,Category,Opening Rank,Closing Rank,Round\n";

    #[test]
    fn reuses_table_until_file_changes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cutoffs.csv");
        {
            let mut f = std::fs::File::create(&path).unwrap();
            write!(f, "{}NIT A,NIT,X,Civil,OPEN,10,20,1\n", HEADER).unwrap();
        }

        let first = cached_cutoffs(&path).unwrap();
        let second = cached_cutoffs(&path).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.len(), 1);

        {
            let mut f = std::fs::File::create(&path).unwrap();
            write!(f, "{}NIT A,NIT,X,Civil,OPEN,10,20,1\nNIT B,NIT,Y,Civil,OPEN,30,40,1\n", HEADER).unwrap();
        }
        // Force a distinct mtime even on coarse-grained filesystems.
        let later = SystemTime::now() + std::time::Duration::from_secs(5);
        let f = std::fs::OpenOptions::new().write(true).open(&path).unwrap();
        f.set_modified(later).unwrap();

        let third = cached_cutoffs(&path).unwrap();
        assert_eq!(third.len(), 2);
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(cached_cutoffs(dir.path().join("nope.csv")).is_err());
    }
}
