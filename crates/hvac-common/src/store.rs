/// Model-number keyed spec store with tolerant lookup.
///
/// Vendor SKU lists and the extracted spec tables do not always spell a model
/// the same way: order-code suffixes come and go, some product lines were
/// renamed, and a handful of SKUs carry plain typos. `SpecStore::get` walks a
/// fixed chain of rewrites before giving up.
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use crate::error::CommonError;
use crate::record::SpecRecord;
use crate::schema::normalize_record;

/// Coil families whose part numbers sometimes drop the trailing `A` of the
/// family code (`CHPT6030D3` for `CHPTA6030D3`).
const COIL_FAMILIES: &[&str] = &["CAPT", "CHPT"];

/// One substring rewrite applied to a requested model number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rewrite {
    pub from: String,
    pub to: String,
}

impl Rewrite {
    pub fn new(from: &str, to: &str) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
        }
    }
}

/// Known surface variants of model numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelAliases {
    /// Product-line prefixes that were renamed; matched at the start only.
    pub prefix_swaps: Vec<Rewrite>,
    /// Substring replacements for known typos in SKU lists.
    pub typo_corrections: Vec<Rewrite>,
}

impl Default for ModelAliases {
    fn default() -> Self {
        Self {
            prefix_swaps: vec![Rewrite::new("GSZV7SA", "GZV7SA")],
            typo_corrections: vec![
                Rewrite::new("AMST36CU13", "AMST36BU13"),
                Rewrite::new("CHPTA3626B3", "CHPTA3630B3"),
                Rewrite::new("AMST60CU13", "AMST60DU13"),
                Rewrite::new("AWST18SU1305", "AWST18SU1305A"),
                Rewrite::new("AWST24SU1305", "AWST24SU1305A"),
                Rewrite::new("AWST30SU1308", "AWST30LU1308A"),
                Rewrite::new("AWST30SU1310", "AWST30LU1310A"),
                Rewrite::new("AWST36SU1308", "AWST36LU1308A"),
                Rewrite::new("AWST36SU1310", "AWST36LU1310A"),
                Rewrite::new("CHPT6030D3", "CHPTA6030D3"),
            ],
        }
    }
}

/// Which rewrite produced the match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MatchStrategy {
    Exact,
    PrefixSwap,
    SuffixAdded,
    SuffixRemoved,
    TypoCorrection,
    Heuristic,
}

impl fmt::Display for MatchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MatchStrategy::Exact => "exact",
            MatchStrategy::PrefixSwap => "prefix_swap",
            MatchStrategy::SuffixAdded => "suffix_added",
            MatchStrategy::SuffixRemoved => "suffix_removed",
            MatchStrategy::TypoCorrection => "typo_correction",
            MatchStrategy::Heuristic => "heuristic",
        };
        f.write_str(s)
    }
}

/// A successful lookup. `record.model_number` is the model as requested, so
/// pages show the SKU the customer ordered rather than the table key.
#[derive(Debug, Clone)]
pub struct Resolved {
    pub requested: String,
    pub matched_key: String,
    pub strategy: MatchStrategy,
    pub record: SpecRecord,
}

#[derive(Debug, Default)]
pub struct SpecStore {
    records: HashMap<String, SpecRecord>,
    aliases: ModelAliases,
}

impl SpecStore {
    /// Load a spec table from disk.
    pub fn load(path: &Path, aliases: ModelAliases) -> Result<Self, CommonError> {
        let content = std::fs::read_to_string(path).map_err(|source| CommonError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let store = Self::from_json_str(&content, &path.display().to_string(), aliases)?;
        info!(path = %path.display(), models = store.len(), "spec table loaded");
        Ok(store)
    }

    /// Parse a spec table: a JSON object mapping model numbers to objects.
    pub fn from_json_str(
        content: &str,
        source: &str,
        aliases: ModelAliases,
    ) -> Result<Self, CommonError> {
        let malformed = |message: String| CommonError::MalformedSpecFile {
            path: source.to_string(),
            message,
        };

        let root: Value = serde_json::from_str(content).map_err(|e| malformed(e.to_string()))?;
        let Value::Object(entries) = root else {
            return Err(malformed("top level is not an object".to_string()));
        };

        let mut records = Vec::with_capacity(entries.len());
        for (key, value) in &entries {
            let Value::Object(raw) = value else {
                return Err(malformed(format!("entry {key} is not an object")));
            };
            records.push(normalize_record(key.trim(), raw));
        }

        Ok(Self::from_records(records, aliases))
    }

    /// Build a store from already-normalized records.
    pub fn from_records(records: impl IntoIterator<Item = SpecRecord>, aliases: ModelAliases) -> Self {
        let records = records
            .into_iter()
            .map(|r| (normalize_key(&r.model_number), r))
            .collect();
        Self { records, aliases }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Exact-key presence check; no fallback rewrites.
    pub fn contains(&self, model: &str) -> bool {
        self.records.contains_key(&normalize_key(model))
    }

    /// Resolve a requested model number through the fallback chain.
    pub fn get(&self, model: &str) -> Result<Resolved, CommonError> {
        let requested = model.trim();
        let key = normalize_key(requested);

        let (matched_key, strategy) = self
            .find(&key)
            .ok_or_else(|| CommonError::UnresolvedModel(requested.to_string()))?;

        if strategy != MatchStrategy::Exact {
            debug!(requested, matched = %matched_key, %strategy, "model resolved by fallback");
        }

        let mut record = self
            .records
            .get(&matched_key)
            .cloned()
            .ok_or_else(|| CommonError::UnresolvedModel(requested.to_string()))?;
        record.model_number = requested.to_string();
        Ok(Resolved {
            requested: requested.to_string(),
            matched_key,
            strategy,
            record,
        })
    }

    fn find(&self, key: &str) -> Option<(String, MatchStrategy)> {
        if self.records.contains_key(key) {
            return Some((key.to_string(), MatchStrategy::Exact));
        }

        for swap in &self.aliases.prefix_swaps {
            let from = swap.from.to_ascii_uppercase();
            if let Some(rest) = key.strip_prefix(&from) {
                let candidate = format!("{}{rest}", swap.to.to_ascii_uppercase());
                if let Some(hit) = self.with_suffix_variants(&candidate) {
                    return Some((hit, MatchStrategy::PrefixSwap));
                }
            }
        }

        let added = format!("{key}A");
        if self.records.contains_key(&added) {
            return Some((added, MatchStrategy::SuffixAdded));
        }

        if let Some(stripped) = key.strip_suffix('A') {
            if self.records.contains_key(stripped) {
                return Some((stripped.to_string(), MatchStrategy::SuffixRemoved));
            }
        }

        for typo in &self.aliases.typo_corrections {
            let from = typo.from.to_ascii_uppercase();
            if key.contains(&from) {
                let candidate = key.replacen(&from, &typo.to.to_ascii_uppercase(), 1);
                if let Some(hit) = self.with_suffix_variants(&candidate) {
                    return Some((hit, MatchStrategy::TypoCorrection));
                }
            }
        }

        for family in COIL_FAMILIES {
            let Some(rest) = key.strip_prefix(family) else {
                continue;
            };
            if rest.is_empty() || rest.starts_with('A') {
                continue;
            }
            let candidate = format!("{family}A{rest}");
            if let Some(hit) = self.with_suffix_variants(&candidate) {
                return Some((hit, MatchStrategy::Heuristic));
            }
        }

        None
    }

    /// The candidate itself, then with a trailing `A` added or removed.
    fn with_suffix_variants(&self, candidate: &str) -> Option<String> {
        if self.records.contains_key(candidate) {
            return Some(candidate.to_string());
        }
        let added = format!("{candidate}A");
        if self.records.contains_key(&added) {
            return Some(added);
        }
        candidate
            .strip_suffix('A')
            .filter(|s| self.records.contains_key(*s))
            .map(str::to_string)
    }
}

fn normalize_key(model: &str) -> String {
    model.trim().to_ascii_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn store(models: &[&str]) -> SpecStore {
        let records = models
            .iter()
            .map(|m| SpecRecord::new(*m).with("tonnage", 3.0));
        SpecStore::from_records(records, ModelAliases::default())
    }

    #[test]
    fn test_exact_match_is_case_insensitive() {
        let store = store(&["GLXS5BA3610"]);
        let resolved = store.get("  glxs5ba3610 ").expect("resolves");
        assert_eq!(resolved.strategy, MatchStrategy::Exact);
        assert_eq!(resolved.matched_key, "GLXS5BA3610");
        assert_eq!(resolved.record.model_number, "glxs5ba3610");
    }

    #[test]
    fn test_prefix_swap() {
        let store = store(&["GZV7SA3610"]);
        let resolved = store.get("GSZV7SA3610").expect("resolves");
        assert_eq!(resolved.strategy, MatchStrategy::PrefixSwap);
        assert_eq!(resolved.record.model_number, "GSZV7SA3610");
    }

    #[test]
    fn test_suffix_added_and_removed() {
        let store = store(&["AWST24SU1305A", "GR9S800603AN"]);
        assert_eq!(
            store.get("AWST24SU1305").expect("resolves").strategy,
            MatchStrategy::SuffixAdded
        );
        assert_eq!(
            store.get("GR9S800603ANA").expect("resolves").strategy,
            MatchStrategy::SuffixRemoved
        );
    }

    #[test]
    fn test_typo_correction() {
        let store = store(&["AMST36BU13", "AWST30LU1308A"]);
        let resolved = store.get("AMST36CU13").expect("resolves");
        assert_eq!(resolved.strategy, MatchStrategy::TypoCorrection);
        assert_eq!(resolved.matched_key, "AMST36BU13");
        let resolved = store.get("AWST30SU1308").expect("resolves");
        assert_eq!(resolved.matched_key, "AWST30LU1308A");
    }

    #[test]
    fn test_missing_coil_family_letter_resolves() {
        let aliases = ModelAliases {
            prefix_swaps: Vec::new(),
            typo_corrections: Vec::new(),
        };
        let bare = SpecStore::from_records([SpecRecord::new("CHPTA6030D3")], aliases);
        let resolved = bare.get("CHPT6030D3").expect("resolves");
        assert_eq!(resolved.matched_key, "CHPTA6030D3");
        assert_eq!(resolved.strategy, MatchStrategy::Heuristic);

        // The default table lists the same rewrite explicitly.
        let resolved = store(&["CHPTA6030D3"]).get("CHPT6030D3").expect("resolves");
        assert_eq!(resolved.strategy, MatchStrategy::TypoCorrection);
    }

    #[test]
    fn test_unresolved_model() {
        let store = store(&["GLXS5BA3610"]);
        let err = store.get("XYZ123").unwrap_err();
        assert!(matches!(err, CommonError::UnresolvedModel(m) if m == "XYZ123"));
    }

    #[test]
    fn test_load_normalizes_records() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        write!(
            file,
            r#"{{
                "GLXS5BA1810": {{ "model_number": "GLXS5BA1810", "nominal_capacity_tons": 1.5, "cooling_btu_h": 18000 }},
                "AMST24BU13": {{ "tonnage": 2, "weight_lb": 110 }}
            }}"#
        )
        .expect("write");

        let store = SpecStore::load(file.path(), ModelAliases::default()).expect("loads");
        assert_eq!(store.len(), 2);
        let ac = store.get("GLXS5BA1810").expect("resolves").record;
        assert_eq!(ac.tonnage(), Some(1.5));
        assert_eq!(ac.number("cooling_capacity_btuh"), Some(18000.0));
        let ah = store.get("AMST24BU13").expect("resolves").record;
        assert_eq!(ah.model_number, "AMST24BU13");
        assert_eq!(ah.number("shipping_weight_lb"), Some(110.0));
    }

    #[test]
    fn test_malformed_spec_files() {
        let err = SpecStore::from_json_str("{ not json", "specs.json", ModelAliases::default())
            .unwrap_err();
        assert!(matches!(err, CommonError::MalformedSpecFile { .. }));

        let err = SpecStore::from_json_str("[1, 2]", "specs.json", ModelAliases::default())
            .unwrap_err();
        assert!(matches!(err, CommonError::MalformedSpecFile { .. }));

        let err = SpecStore::from_json_str(r#"{"M1": 3}"#, "specs.json", ModelAliases::default())
            .unwrap_err();
        assert!(matches!(err, CommonError::MalformedSpecFile { .. }));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = SpecStore::load(&dir.path().join("nope.json"), ModelAliases::default())
            .unwrap_err();
        assert!(matches!(err, CommonError::Io { .. }));
    }
}
