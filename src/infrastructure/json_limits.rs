use crate::domain::limits::ConcentrationLimitConfig;
use crate::domain::ports::LimitConfigStore;
use crate::error::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Limit configuration read from a JSON file.
///
/// The file is re-read on every listing, so edits reach the limit provider
/// on its next refresh without a restart. Expected shape:
///
/// ```json
/// [
///   { "jurisdiction": null, "threshold": "0.10" },
///   { "jurisdiction": "SP", "threshold": 0.2 }
/// ]
/// ```
#[derive(Debug, Clone)]
pub struct JsonLimitStore {
    path: PathBuf,
}

impl JsonLimitStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl LimitConfigStore for JsonLimitStore {
    async fn list_limits(&self) -> Result<Vec<ConcentrationLimitConfig>> {
        let bytes = tokio::fs::read(&self.path).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::jurisdiction::Jurisdiction;
    use crate::domain::limits::LimitScope;
    use crate::error::LedgerError;
    use rust_decimal_macros::dec;
    use std::io::Write;

    #[tokio::test]
    async fn test_reads_limits_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"[{{"jurisdiction": null, "threshold": "0.15"}}, {{"jurisdiction": "rs", "threshold": 0.3}}]"#
        )
        .unwrap();

        let store = JsonLimitStore::new(file.path());
        let limits = store.list_limits().await.unwrap();
        assert_eq!(limits.len(), 2);
        assert_eq!(limits[0].scope(), LimitScope::Default);
        assert_eq!(limits[0].threshold.value(), dec!(0.15));
        assert_eq!(limits[1].scope(), LimitScope::Jurisdiction(Jurisdiction::RS));
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonLimitStore::new(dir.path().join("absent.json"));
        assert!(matches!(
            store.list_limits().await,
            Err(LedgerError::IoError(_))
        ));
    }

    #[tokio::test]
    async fn test_invalid_threshold_is_json_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"[{{"jurisdiction": "SP", "threshold": 0}}]"#).unwrap();

        let store = JsonLimitStore::new(file.path());
        assert!(matches!(
            store.list_limits().await,
            Err(LedgerError::JsonError(_))
        ));
    }
}
