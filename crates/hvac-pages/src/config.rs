use std::path::{Path, PathBuf};

use clap::Parser;
use serde::Deserialize;

use hvac_common::error::CommonError;
use hvac_common::store::{ModelAliases, Rewrite};

use crate::classifier::PrefixTable;
use crate::error::AppError;
use crate::render::DEFAULT_COMPLIANCE_THRESHOLD;

/// Product lines with spec tables and SKU lists under the data root.
pub const KNOWN_PRODUCT_LINES: &[&str] =
    &["13.4", "14.3", "Solace_14.3", "15.2", "16.2", "17.2", "17.5"];

const REFRIGERANT: &str = "R-32";

/// Generate HVAC product description pages from spec tables and SKU lists.
#[derive(Debug, Parser)]
#[command(name = "hvac-pages", version)]
pub struct Cli {
    /// Product line: 13.4, 14.3, Solace_14.3, 15.2, 16.2, 17.2 or 17.5
    pub product_line: String,

    /// Directory holding one subdirectory per product line
    #[arg(long, env = "HVAC_DATA_ROOT", default_value = ".")]
    pub data_root: PathBuf,

    /// Spec table JSON (default: <dir>/Specs/<rating>_specs.json)
    #[arg(long)]
    pub specs: Option<PathBuf>,

    /// SKU list (default: <dir>/SKUS/SKUS)
    #[arg(long)]
    pub skus: Option<PathBuf>,

    /// Output directory (default: <dir>/Descriptions)
    #[arg(long, env = "HVAC_OUTPUT_DIR")]
    pub out: Option<PathBuf>,

    /// Catalog JSON overriding prefix table, model aliases and threshold
    #[arg(long, env = "HVAC_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// SEER2 rating below which pages say "Northern Regions Only"
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Run the full pipeline without writing files
    #[arg(long, conflicts_with = "validate_only")]
    pub dry_run: bool,

    /// Only check that every SKU resolves to a spec
    #[arg(long)]
    pub validate_only: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductLine {
    pub id: String,
    pub brand: String,
    pub rating: f64,
    pub refrigerant: String,
}

impl ProductLine {
    pub fn parse(id: &str) -> Result<Self, AppError> {
        if !KNOWN_PRODUCT_LINES.contains(&id) {
            return Err(AppError::Config(format!(
                "unknown product line '{id}' (expected one of {})",
                KNOWN_PRODUCT_LINES.join(", ")
            )));
        }
        let tail = id.rsplit('_').next().unwrap_or(id);
        let rating: f64 = tail
            .parse()
            .map_err(|_| AppError::Config(format!("product line '{id}' has no numeric rating")))?;
        let brand = if id.contains("Solace") { "Solace" } else { "Goodman" };
        Ok(Self {
            id: id.to_string(),
            brand: brand.to_string(),
            rating,
            refrigerant: REFRIGERANT.to_string(),
        })
    }

    /// `15.2_SEER2` for plain ratings, the id itself for branded lines.
    pub fn dir_name(&self) -> String {
        if self.id.contains('_') {
            self.id.clone()
        } else {
            format!("{}_SEER2", self.id)
        }
    }

    fn rating_tag(&self) -> &str {
        self.id.rsplit('_').next().unwrap_or(&self.id)
    }
}

/// Optional catalog overrides. Missing keys keep the built-in defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Catalog {
    pub prefix_table: Option<PrefixTable>,
    pub prefix_swaps: Option<Vec<Rewrite>>,
    pub typo_corrections: Option<Vec<Rewrite>>,
    pub compliance_threshold: Option<f64>,
}

impl Catalog {
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let content = std::fs::read_to_string(path).map_err(|source| {
            AppError::Common(CommonError::Io {
                path: path.to_path_buf(),
                source,
            })
        })?;
        serde_json::from_str(&content)
            .map_err(|e| AppError::Config(format!("invalid catalog {}: {e}", path.display())))
    }

    pub fn prefix_table(&self) -> PrefixTable {
        match &self.prefix_table {
            Some(table) => PrefixTable::new(table.rules().to_vec()),
            None => PrefixTable::default(),
        }
    }

    pub fn model_aliases(&self) -> ModelAliases {
        let defaults = ModelAliases::default();
        ModelAliases {
            prefix_swaps: self.prefix_swaps.clone().unwrap_or(defaults.prefix_swaps),
            typo_corrections: self
                .typo_corrections
                .clone()
                .unwrap_or(defaults.typo_corrections),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Generate,
    DryRun,
    ValidateOnly,
}

/// Fully resolved run configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub product_line: ProductLine,
    pub specs_path: PathBuf,
    pub skus_path: PathBuf,
    pub output_dir: PathBuf,
    pub catalog: Catalog,
    pub threshold: f64,
    pub mode: Mode,
}

impl Config {
    /// Assemble the configuration from parsed arguments.
    ///
    /// Explicit path flags win over the per-product-line layout under
    /// `--data-root`. The threshold comes from `--threshold`, then the catalog,
    /// then the built-in default.
    pub fn from_cli(cli: &Cli) -> Result<Self, AppError> {
        let product_line = ProductLine::parse(&cli.product_line)?;
        let base = cli.data_root.join(product_line.dir_name());

        let specs_path = cli.specs.clone().unwrap_or_else(|| {
            base.join("Specs")
                .join(format!("{}_specs.json", product_line.rating_tag()))
        });
        let skus_path = cli
            .skus
            .clone()
            .unwrap_or_else(|| base.join("SKUS").join("SKUS"));
        let output_dir = cli.out.clone().unwrap_or_else(|| base.join("Descriptions"));

        let catalog = match &cli.catalog {
            Some(path) => Catalog::load(path)?,
            None => Catalog::default(),
        };

        let threshold = cli
            .threshold
            .or(catalog.compliance_threshold)
            .unwrap_or(DEFAULT_COMPLIANCE_THRESHOLD);
        if !threshold.is_finite() || threshold <= 0.0 {
            return Err(AppError::Config(format!(
                "compliance threshold must be a positive number, got {threshold}"
            )));
        }

        let mode = if cli.validate_only {
            Mode::ValidateOnly
        } else if cli.dry_run {
            Mode::DryRun
        } else {
            Mode::Generate
        };

        Ok(Self {
            product_line,
            specs_path,
            skus_path,
            output_dir,
            catalog,
            threshold,
            mode,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::Classifier;
    use crate::model::Category;

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["hvac-pages"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).expect("valid arguments")
    }

    #[test]
    fn test_product_line_parsing() {
        let plain = ProductLine::parse("15.2").expect("known line");
        assert_eq!(plain.brand, "Goodman");
        assert_eq!(plain.rating, 15.2);
        assert_eq!(plain.refrigerant, "R-32");
        assert_eq!(plain.dir_name(), "15.2_SEER2");

        let solace = ProductLine::parse("Solace_14.3").expect("known line");
        assert_eq!(solace.brand, "Solace");
        assert_eq!(solace.rating, 14.3);
        assert_eq!(solace.dir_name(), "Solace_14.3");
    }

    #[test]
    fn test_unknown_product_line_is_config_error() {
        assert!(matches!(ProductLine::parse("18.0"), Err(AppError::Config(_))));
    }

    #[test]
    fn test_default_paths_follow_layout() {
        let config = Config::from_cli(&cli(&["Solace_14.3", "--data-root", "/data"])).expect("config");
        assert_eq!(
            config.specs_path,
            PathBuf::from("/data/Solace_14.3/Specs/14.3_specs.json")
        );
        assert_eq!(config.skus_path, PathBuf::from("/data/Solace_14.3/SKUS/SKUS"));
        assert_eq!(config.output_dir, PathBuf::from("/data/Solace_14.3/Descriptions"));
        assert_eq!(config.threshold, 14.3);
        assert_eq!(config.mode, Mode::Generate);
    }

    #[test]
    fn test_explicit_flags_override() {
        let config = Config::from_cli(&cli(&[
            "15.2",
            "--data-root",
            "/data",
            "--specs",
            "/tmp/specs.json",
            "--out",
            "/tmp/out",
            "--threshold",
            "15",
            "--dry-run",
        ]))
        .expect("config");
        assert_eq!(config.specs_path, PathBuf::from("/tmp/specs.json"));
        assert_eq!(config.skus_path, PathBuf::from("/data/15.2_SEER2/SKUS/SKUS"));
        assert_eq!(config.output_dir, PathBuf::from("/tmp/out"));
        assert_eq!(config.threshold, 15.0);
        assert_eq!(config.mode, Mode::DryRun);
    }

    #[test]
    fn test_dry_run_conflicts_with_validate_only() {
        assert!(Cli::try_parse_from(["hvac-pages", "15.2", "--dry-run", "--validate-only"]).is_err());
    }

    #[test]
    fn test_invalid_threshold_rejected() {
        let err = Config::from_cli(&cli(&["15.2", "--threshold", "0"])).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_catalog_overrides() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("catalog.json");
        std::fs::write(
            &path,
            r#"{
                "prefix_table": [{"prefix": "zx", "category": "HP_Condenser"}],
                "typo_corrections": [{"from": "ZX1", "to": "ZX2"}],
                "compliance_threshold": 15.0
            }"#,
        )
        .expect("write catalog");

        let config = Config::from_cli(&cli(&["15.2", "--catalog", path.to_str().expect("utf-8")]))
            .expect("config");
        assert_eq!(config.threshold, 15.0);

        let classifier = Classifier::new(config.catalog.prefix_table());
        assert_eq!(classifier.classify("ZX100"), Category::HpCondenser);
        assert_eq!(classifier.classify("GLXS5BA1810"), Category::Unknown);

        let aliases = config.catalog.model_aliases();
        assert_eq!(aliases.typo_corrections, vec![Rewrite::new("ZX1", "ZX2")]);
        assert_eq!(aliases.prefix_swaps, ModelAliases::default().prefix_swaps);
    }

    #[test]
    fn test_malformed_catalog_is_config_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("catalog.json");
        std::fs::write(&path, r#"{"unknown_key": 1}"#).expect("write catalog");
        assert!(matches!(Catalog::load(&path), Err(AppError::Config(_))));
    }
}
