/// SKU prefix classification.
///
/// Each SKU is matched against an ordered prefix table; the first matching
/// prefix decides the equipment category. Order matters where one prefix
/// extends another (`GRVT8006` before `GRVT80`).
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::{Category, SkuEntry, SystemType};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrefixRule {
    pub prefix: String,
    pub category: Category,
}

impl PrefixRule {
    pub fn new(prefix: &str, category: Category) -> Self {
        Self {
            prefix: prefix.to_ascii_uppercase(),
            category,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrefixTable(Vec<PrefixRule>);

impl PrefixTable {
    pub fn new(rules: Vec<PrefixRule>) -> Self {
        let rules = rules
            .into_iter()
            .map(|r| PrefixRule::new(&r.prefix, r.category))
            .collect();
        Self(rules)
    }

    pub fn rules(&self) -> &[PrefixRule] {
        &self.0
    }

    pub fn lookup(&self, sku: &str) -> Option<&PrefixRule> {
        let sku = sku.trim().to_ascii_uppercase();
        self.0.iter().find(|r| sku.starts_with(&r.prefix))
    }

    /// Rules that can never match because an earlier rule's prefix is a
    /// prefix of theirs.
    pub fn shadowed(&self) -> Vec<&PrefixRule> {
        self.0
            .iter()
            .enumerate()
            .filter(|(i, rule)| {
                self.0[..*i]
                    .iter()
                    .any(|earlier| rule.prefix.starts_with(&earlier.prefix))
            })
            .map(|(_, rule)| rule)
            .collect()
    }
}

impl Default for PrefixTable {
    fn default() -> Self {
        use Category::*;
        let rules = [
            // Solace 14.3
            ("S-GLXS4BA", AcCondenser),
            ("S-GLZS4BA", HpCondenser),
            ("S-AMST", AirHandlerStandard),
            ("S-AWST", AirHandlerWall),
            ("S-GR9S80", Furnace80Afue),
            ("S-GR9S92", Furnace92Afue),
            ("S-CAPTA", CoilUpflow),
            ("S-CHPTA", CoilHorizontal),
            ("S-HKTS", Thermostat),
            // condensers
            ("GLXS3", AcCondenser),
            ("GLZS3", HpCondenser),
            ("GLXS4", AcCondenser),
            ("GLZS4", HpCondenser),
            ("GLXS5", AcCondenser),
            ("GLZS5", HpCondenser),
            ("GXV6SS", AcCondenser),
            ("GZV6SA", HpCondenser),
            ("GLXT7CA", AcCondenser),
            ("GLZT7CA", HpCondenser),
            ("GZV7SA", HpCondenser),
            ("GSZV7SA", HpCondenser),
            // air handlers
            ("AMST", AirHandlerStandard),
            ("AWST", AirHandlerWall),
            ("AHVE", AirHandlerStandard),
            ("AMVT", AirHandlerStandard),
            // coils
            ("CAPTA", CoilUpflow),
            ("CHPTA", CoilHorizontal),
            ("CAPEA", CoilUpflow),
            ("CHPEA", CoilHorizontal),
            ("CAPT", CoilUpflow),
            ("CHPT", CoilHorizontal),
            // furnaces
            ("GR9S80", Furnace80Afue),
            ("GR9S92", Furnace92Afue),
            ("GR9S96", Furnace96Afue),
            ("GRVT8006", Furnace80Afue),
            ("GRVT8008", Furnace80Afue),
            ("GRVT8010", Furnace80Afue),
            ("GRVT9604", Furnace96Afue),
            ("GRVT9606", Furnace96Afue),
            ("GRVT9608", Furnace96Afue),
            ("GRVT9610", Furnace96Afue),
            ("GRVT9612", Furnace96Afue),
            ("GRVT80", Furnace80Afue),
            ("GRVT96", Furnace96Afue),
            // thermostats
            ("GTST", Thermostat),
            ("ATST", Thermostat),
            ("DTST", Thermostat),
        ];
        Self(
            rules
                .into_iter()
                .map(|(prefix, category)| PrefixRule::new(prefix, category))
                .collect(),
        )
    }
}

/// A SKU paired with its category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedSku {
    pub sku: String,
    pub category: Category,
}

#[derive(Debug, Clone, Default)]
pub struct Classifier {
    table: PrefixTable,
}

impl Classifier {
    pub fn new(table: PrefixTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &PrefixTable {
        &self.table
    }

    /// Total: SKUs matching no prefix are `Unknown`.
    pub fn classify(&self, sku: &str) -> Category {
        match self.table.lookup(sku) {
            Some(rule) => rule.category,
            None => {
                debug!(sku, "no prefix matched");
                Category::Unknown
            }
        }
    }

    pub fn system_type(&self, categories: &[Category]) -> SystemType {
        SystemType::from_categories(categories)
    }

    /// Classify every SKU of an entry, dropping thermostats.
    pub fn classify_entry(&self, entry: &SkuEntry) -> Vec<ClassifiedSku> {
        entry
            .skus
            .iter()
            .map(|sku| ClassifiedSku {
                sku: sku.clone(),
                category: self.classify(sku),
            })
            .filter(|c| c.category != Category::Thermostat)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_known_prefixes() {
        let classifier = Classifier::default();
        assert_eq!(classifier.classify("GLXS5BA1810"), Category::AcCondenser);
        assert_eq!(classifier.classify("glzs5ba3610"), Category::HpCondenser);
        assert_eq!(classifier.classify("GLXS4BA3010"), Category::AcCondenser);
        assert_eq!(classifier.classify("GLXS3BN2410"), Category::AcCondenser);
        assert_eq!(classifier.classify("  AWST24SU1305A "), Category::AirHandlerWall);
        assert_eq!(classifier.classify("S-AMST36BU13"), Category::AirHandlerStandard);
        assert_eq!(classifier.classify("GRVT960803CN"), Category::Furnace96Afue);
        assert_eq!(classifier.classify("GR9S920804BN"), Category::Furnace92Afue);
        assert_eq!(classifier.classify("CHPT6030D3"), Category::CoilHorizontal);
        assert_eq!(classifier.classify("S-HKTS-01"), Category::Thermostat);
    }

    #[test]
    fn test_classify_never_panics() {
        let classifier = Classifier::default();
        for sku in ["", " ", "ZZZ", "ÄÖÜ", "S-", "GRVT"] {
            assert_eq!(classifier.classify(sku), Category::Unknown);
        }
    }

    #[test]
    fn test_default_table_has_no_shadowed_rules() {
        assert!(PrefixTable::default().shadowed().is_empty());
    }

    #[test]
    fn test_shadowed_rule_detected() {
        let table = PrefixTable::new(vec![
            PrefixRule::new("GRVT80", Category::Furnace80Afue),
            PrefixRule::new("GRVT8006", Category::Furnace80Afue),
        ]);
        let shadowed = table.shadowed();
        assert_eq!(shadowed.len(), 1);
        assert_eq!(shadowed[0].prefix, "GRVT8006");
    }

    #[test]
    fn test_classify_entry_drops_thermostats() {
        let classifier = Classifier::default();
        let entry = SkuEntry {
            line: 1,
            raw: "GLXS5BA1810, GTST100, AMST24BU13".to_string(),
            skus: vec![
                "GLXS5BA1810".to_string(),
                "GTST100".to_string(),
                "AMST24BU13".to_string(),
            ],
        };
        let classified = classifier.classify_entry(&entry);
        let categories: Vec<Category> = classified.iter().map(|c| c.category).collect();
        assert_eq!(
            categories,
            vec![Category::AcCondenser, Category::AirHandlerStandard]
        );
        assert_eq!(classifier.system_type(&categories).label(), "AC_AirHandler");
    }

    #[test]
    fn test_prefix_table_deserializes_from_labels() {
        let table: PrefixTable =
            serde_json::from_str(r#"[{"prefix": "xyz", "category": "Coil_Upflow"}]"#)
                .expect("valid table");
        let table = PrefixTable::new(table.rules().to_vec());
        assert_eq!(
            Classifier::new(table).classify("XYZ123"),
            Category::CoilUpflow
        );
    }
}
