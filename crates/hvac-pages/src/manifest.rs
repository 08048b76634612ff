/// Run manifest written next to the generated pages.
///
/// Lists every page written by the run with a SHA-256 digest of its HTML, so
/// a later run (or a reviewer) can tell which pages actually changed.
use std::path::{Path, PathBuf};

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::batch::{write_atomic, EntryFailure};
use crate::error::AppError;

pub const MANIFEST_FILE: &str = "manifest.json";

#[derive(Debug, Clone, Serialize)]
pub struct ManifestEntry {
    pub filename: String,
    pub sku_line: String,
    pub system_type: String,
    pub sha256: String,
}

impl ManifestEntry {
    pub fn new(filename: &str, sku_line: &str, system_type: &str, html: &str) -> Self {
        Self {
            filename: filename.to_string(),
            sku_line: sku_line.to_string(),
            system_type: system_type.to_string(),
            sha256: digest(html),
        }
    }
}

#[derive(Debug, Default, Serialize)]
pub struct Manifest {
    pub product_line: String,
    pub pages: Vec<ManifestEntry>,
    pub failures: Vec<EntryFailure>,
}

impl Manifest {
    pub fn write(&self, output_dir: &Path) -> Result<PathBuf, AppError> {
        let path = output_dir.join(MANIFEST_FILE);
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| AppError::Config(format!("failed to serialize manifest: {e}")))?;
        write_atomic(&path, json.as_bytes())?;
        Ok(path)
    }
}

pub fn digest(html: &str) -> String {
    let hash = Sha256::digest(html.as_bytes());
    format!("{:x}", hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digest_is_stable_hex() {
        let a = digest("<html></html>");
        assert_eq!(a.len(), 64);
        assert_eq!(a, digest("<html></html>"));
        assert_ne!(a, digest("<html> </html>"));
    }

    #[test]
    fn test_manifest_written_as_json() {
        let dir = tempfile::tempdir().expect("tempdir");
        let manifest = Manifest {
            product_line: "15.2".to_string(),
            pages: vec![ManifestEntry::new(
                "Goodman_R-32_GLXS5BA1810.html",
                "GLXS5BA1810",
                "Single_AC_Condenser",
                "<html></html>",
            )],
            failures: vec![EntryFailure {
                line: 3,
                skus: "XYZ1".to_string(),
                reason: "unknown category: XYZ1".to_string(),
            }],
        };
        let path = manifest.write(dir.path()).expect("writes");
        let parsed: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(path).expect("read")).expect("json");
        assert_eq!(parsed["pages"][0]["system_type"], "Single_AC_Condenser");
        assert_eq!(parsed["pages"][0]["sha256"].as_str().map(str::len), Some(64));
        assert_eq!(parsed["failures"][0]["line"], 3);
    }
}
