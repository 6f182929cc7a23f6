//! Ledger persistence
//!
//! State is stored as pretty-printed JSON wrapped in a versioned envelope.
//! Writes go to a sibling temp file that is flushed and renamed into place,
//! so a crash never leaves a half-written state file behind.

use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;

use crate::errors::{MinterError, MinterResult};
use crate::ledger::Ledger;

/// Current on-disk format version
pub const STATE_VERSION: u16 = 2;

#[derive(Serialize)]
struct StoredLedgerRef<'a> {
    version: u16,
    ledger: &'a Ledger,
}

#[derive(Deserialize)]
struct StoredLedger {
    version: u16,
    ledger: Ledger,
}

fn storage_err(context: &str, path: &Path, err: impl std::fmt::Display) -> MinterError {
    MinterError::Storage(format!("{} {}: {}", context, path.display(), err))
}

fn write_synced(path: &Path, data: &[u8]) -> MinterResult<()> {
    let mut file = std::fs::File::create(path).map_err(|e| storage_err("cannot create", path, e))?;
    file.write_all(data)
        .and_then(|_| file.sync_all())
        .map_err(|e| storage_err("cannot write", path, e))
}

/// Write `ledger` to `path`, replacing any previous state
pub fn save_ledger(path: &Path, ledger: &Ledger) -> MinterResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| storage_err("cannot create", parent, e))?;
        }
    }

    let envelope = StoredLedgerRef {
        version: STATE_VERSION,
        ledger,
    };
    let data = serde_json::to_vec_pretty(&envelope).map_err(|e| storage_err("cannot encode", path, e))?;

    let temp_path = path.with_extension("json.tmp");
    let replaced = write_synced(&temp_path, &data)
        .and_then(|_| std::fs::rename(&temp_path, path).map_err(|e| storage_err("cannot replace", path, e)));
    if let Err(err) = replaced {
        let _ = std::fs::remove_file(&temp_path);
        tracing::warn!("Store: failed to save ledger to {}: {}", path.display(), err);
        return Err(err);
    }

    tracing::debug!(
        "Store: saved ledger to {} ({} tokens, {} events, {} bytes)",
        path.display(),
        ledger.all_tokens().len(),
        ledger.events().len(),
        data.len()
    );
    Ok(())
}

/// Read a ledger from `path` and re-check its invariants
pub fn load_ledger(path: &Path) -> MinterResult<Ledger> {
    let data = std::fs::read(path).map_err(|e| storage_err("cannot read", path, e))?;
    let stored: StoredLedger = serde_json::from_slice(&data).map_err(|e| storage_err("cannot decode", path, e))?;

    if stored.version != STATE_VERSION {
        return Err(storage_err(
            "unsupported state version in",
            path,
            format!("found {}, expected {}", stored.version, STATE_VERSION),
        ));
    }

    stored.ledger.verify_invariants().map_err(|e| {
        tracing::warn!("Store: state at {} failed verification: {}", path.display(), e);
        storage_err("inconsistent state in", path, e)
    })?;

    tracing::debug!("Store: loaded ledger from {}", path.display());
    Ok(stored.ledger)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MinterConfig;
    use crate::genesis::bootstrap;
    use lib_types::Address;

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("ledger.json");
        let ledger = bootstrap(Address::new([1u8; 32]), &MinterConfig::default()).unwrap();

        save_ledger(&path, &ledger).unwrap();
        assert!(!path.with_extension("json.tmp").exists());

        let loaded = load_ledger(&path).unwrap();
        assert_eq!(loaded.usdx_token(), ledger.usdx_token());
        assert_eq!(loaded.contract_address(), ledger.contract_address());
        assert_eq!(loaded.events(), ledger.events());
    }

    #[test]
    fn test_failed_replace_removes_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        // A non-empty directory where the state file should go makes the rename fail.
        let path = dir.path().join("ledger.json");
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join("occupied"), b"x").unwrap();
        let ledger = bootstrap(Address::new([1u8; 32]), &MinterConfig::default()).unwrap();

        match save_ledger(&path, &ledger) {
            Err(MinterError::Storage(msg)) => assert!(msg.contains("cannot replace")),
            other => panic!("expected storage error, got {:?}", other),
        }
        assert!(!path.with_extension("json.tmp").exists());
        assert!(path.join("occupied").exists());
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            load_ledger(&dir.path().join("absent.json")),
            Err(MinterError::Storage(_))
        ));
    }

    #[test]
    fn test_rejects_unknown_version() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.json");
        let ledger = bootstrap(Address::new([1u8; 32]), &MinterConfig::default()).unwrap();
        save_ledger(&path, &ledger).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let bumped = text.replacen(&format!("\"version\": {}", STATE_VERSION), "\"version\": 99", 1);
        std::fs::write(&path, bumped).unwrap();

        match load_ledger(&path) {
            Err(MinterError::Storage(msg)) => assert!(msg.contains("found 99")),
            other => panic!("expected storage error, got {:?}", other.map(|_| ())),
        }
    }
}
