//! File-backed history of analysis reports
//!
//! The pipeline itself is pure; this store is the externally-owned history
//! the CLI reads and writes. Append-only except for explicit removal.

use crate::error::SellersolResult;
use crate::types::AnalysisReport;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_HISTORY_FILE: &str = "sellersol_history.json";

pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// All saved reports, oldest first. A missing file is an empty history.
    pub fn load(&self) -> SellersolResult<Vec<AnalysisReport>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let contents = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    pub fn append(&self, report: &AnalysisReport) -> SellersolResult<()> {
        let mut reports = self.load()?;
        reports.push(report.clone());
        self.save(&reports)
    }

    /// Remove the report at `index`, returning it if it existed.
    pub fn remove(&self, index: usize) -> SellersolResult<Option<AnalysisReport>> {
        let mut reports = self.load()?;
        if index >= reports.len() {
            return Ok(None);
        }
        let removed = reports.remove(index);
        self.save(&reports)?;
        Ok(Some(removed))
    }

    fn save(&self, reports: &[AnalysisReport]) -> SellersolResult<()> {
        fs::write(&self.path, serde_json::to_string_pretty(reports)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> HistoryStore {
        HistoryStore::new(dir.path().join("history.json"))
    }

    #[test]
    fn test_missing_file_is_empty_history() {
        let dir = TempDir::new().unwrap();
        assert!(store_in(&dir).load().unwrap().is_empty());
    }

    #[test]
    fn test_append_then_load() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store
            .append(&AnalysisReport::new("Shopee", "<p>a</p>", Vec::new()))
            .unwrap();
        store
            .append(&AnalysisReport::new("Tokopedia", "<p>b</p>", Vec::new()))
            .unwrap();

        let reports = store.load().unwrap();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].platform, "Shopee");
        assert_eq!(reports[1].platform, "Tokopedia");
    }

    #[test]
    fn test_remove_by_index() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store
            .append(&AnalysisReport::new("Shopee", "<p>a</p>", Vec::new()))
            .unwrap();

        let removed = store.remove(0).unwrap();
        assert_eq!(removed.map(|r| r.platform), Some("Shopee".to_string()));
        assert!(store.load().unwrap().is_empty());

        assert!(store.remove(5).unwrap().is_none());
    }
}
