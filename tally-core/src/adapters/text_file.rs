//! Plain-text balance file (`balance.txt` containing e.g. `1250.5`)

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use rust_decimal::Decimal;

use crate::domain::balance::{format_balance, parse_balance};
use crate::domain::result::Result;
use crate::ports::BalanceStore;

/// Default balance file name inside the data directory
pub const DEFAULT_BALANCE_FILE: &str = "balance.txt";

/// Balance stored as decimal text in a single file
#[derive(Debug, Clone)]
pub struct TextBalanceStore {
    path: PathBuf,
}

impl TextBalanceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl BalanceStore for TextBalanceStore {
    fn load(&self) -> Result<Option<Decimal>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        parse_balance(&text).map(Some)
    }

    fn save(&self, balance: Decimal) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, format_balance(balance))?;
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::result::Error;
    use std::str::FromStr;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_loads_as_none() {
        let dir = tempdir().unwrap();
        let store = TextBalanceStore::new(dir.path().join(DEFAULT_BALANCE_FILE));
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_save_writes_plain_text() {
        let dir = tempdir().unwrap();
        let store = TextBalanceStore::new(dir.path().join(DEFAULT_BALANCE_FILE));

        store.save(Decimal::from_str("1250.50").unwrap()).unwrap();

        let on_disk = fs::read_to_string(dir.path().join("balance.txt")).unwrap();
        assert_eq!(on_disk, "1250.5");
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let store = TextBalanceStore::new(dir.path().join(DEFAULT_BALANCE_FILE));
        let balance = Decimal::from_str("987.65").unwrap();

        store.save(balance).unwrap();
        assert_eq!(store.load().unwrap(), Some(balance));
    }

    #[test]
    fn test_save_overwrites() {
        let dir = tempdir().unwrap();
        let store = TextBalanceStore::new(dir.path().join(DEFAULT_BALANCE_FILE));

        store.save(Decimal::from(100)).unwrap();
        store.save(Decimal::from(5)).unwrap();

        let on_disk = fs::read_to_string(dir.path().join(DEFAULT_BALANCE_FILE)).unwrap();
        assert_eq!(on_disk, "5");
    }

    #[test]
    fn test_corrupt_file_is_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("balance.txt");
        fs::write(&path, "not a number").unwrap();

        let store = TextBalanceStore::new(&path);
        assert!(matches!(store.load().unwrap_err(), Error::Parse(_)));
    }

    #[test]
    fn test_save_creates_parent_directory() {
        let dir = tempdir().unwrap();
        let store = TextBalanceStore::new(dir.path().join("nested").join("balance.txt"));
        store.save(Decimal::ONE).unwrap();
        assert_eq!(store.load().unwrap(), Some(Decimal::ONE));
    }
}
