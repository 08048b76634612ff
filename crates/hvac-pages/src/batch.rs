/// Batch driver: SKU list in, one HTML page per entry out.
///
/// Each entry goes through classify → resolve specs → render → write. A
/// failing entry is logged and skipped; it never aborts the batch. Only an
/// unreadable SKU list or an output directory that cannot be created is fatal.
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, warn};

use hvac_common::error::CommonError;
use hvac_common::record::SpecRecord;
use hvac_common::store::SpecStore;

use crate::classifier::{ClassifiedSku, Classifier};
use crate::content::{system_tonnage, Branding};
use crate::error::AppError;
use crate::format::format_tonnage;
use crate::manifest::{Manifest, ManifestEntry};
use crate::model::{Category, Condenser, RenderedPage, SkuEntry, SystemType};
use crate::parser::SkuListParser;
use crate::render::PageRenderer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Write,
    /// Everything except writing files.
    DryRun,
}

/// A skipped entry and why.
#[derive(Debug, Clone, Serialize)]
pub struct EntryFailure {
    pub line: usize,
    pub skus: String,
    pub reason: String,
}

#[derive(Debug, Default)]
pub struct BatchSummary {
    pub success: usize,
    pub failed: usize,
    pub pages: Vec<ManifestEntry>,
    pub failures: Vec<EntryFailure>,
    pub manifest: Option<PathBuf>,
}

impl BatchSummary {
    pub fn all_succeeded(&self) -> bool {
        self.failed == 0
    }
}

#[derive(Debug, Default)]
pub struct ValidationReport {
    pub entries: usize,
    pub rejected_lines: usize,
    /// Deduplicated and sorted.
    pub missing_models: Vec<String>,
    pub unknown_skus: Vec<String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.missing_models.is_empty() && self.rejected_lines == 0
    }
}

pub struct BatchDriver {
    product_line: String,
    rating: f64,
    classifier: Classifier,
    renderer: PageRenderer,
    parser: SkuListParser,
    mode: RunMode,
}

impl BatchDriver {
    pub fn new(
        product_line: &str,
        rating: f64,
        classifier: Classifier,
        renderer: PageRenderer,
        mode: RunMode,
    ) -> Result<Self, AppError> {
        Ok(Self {
            product_line: product_line.to_string(),
            rating,
            classifier,
            renderer,
            parser: SkuListParser::new()?,
            mode,
        })
    }

    fn read_entries(&self, sku_list_path: &Path) -> Result<(Vec<SkuEntry>, Vec<AppError>), AppError> {
        let content = std::fs::read_to_string(sku_list_path).map_err(|source| {
            AppError::Common(CommonError::Io {
                path: sku_list_path.to_path_buf(),
                source,
            })
        })?;
        let list = self.parser.parse(&content);
        info!(
            path = %sku_list_path.display(),
            entries = list.entries.len(),
            rejected = list.rejected.len(),
            "SKU list parsed"
        );
        Ok((list.entries, list.rejected))
    }

    /// Generate a page for every entry of the SKU list.
    pub fn run_all(
        &self,
        sku_list_path: &Path,
        store: &SpecStore,
        output_dir: &Path,
    ) -> Result<BatchSummary, AppError> {
        let (entries, rejected) = self.read_entries(sku_list_path)?;

        if self.mode == RunMode::Write {
            std::fs::create_dir_all(output_dir).map_err(|source| AppError::Io {
                path: output_dir.to_path_buf(),
                source,
            })?;
        }

        let mut summary = BatchSummary::default();
        for err in rejected {
            let line = match &err {
                AppError::Parse { line, .. } => *line,
                _ => 0,
            };
            summary.failed += 1;
            summary.failures.push(EntryFailure {
                line,
                skus: String::new(),
                reason: err.to_string(),
            });
        }

        for entry in &entries {
            let result = self
                .process_entry(entry, store)
                .and_then(|page| self.write_page(&page, output_dir).map(|()| page));

            match result {
                Ok(page) => {
                    info!(
                        line = entry.line,
                        file = %page.filename,
                        system_type = %page.system_type,
                        "page generated"
                    );
                    summary.success += 1;
                    summary.pages.push(ManifestEntry::new(
                        &page.filename,
                        &entry.raw,
                        &page.system_type.label(),
                        &page.html,
                    ));
                }
                Err(e) => {
                    warn!(line = entry.line, skus = %entry.raw, reason = %e, "entry skipped");
                    summary.failed += 1;
                    summary.failures.push(EntryFailure {
                        line: entry.line,
                        skus: entry.raw.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        if self.mode == RunMode::Write {
            let manifest = Manifest {
                product_line: self.product_line.clone(),
                pages: summary.pages.clone(),
                failures: summary.failures.clone(),
            };
            summary.manifest = Some(manifest.write(output_dir)?);
        }

        info!(
            success = summary.success,
            failed = summary.failed,
            dry_run = self.mode == RunMode::DryRun,
            "batch complete"
        );
        Ok(summary)
    }

    /// Classify, resolve and render one entry. Nothing is written.
    pub fn process_entry(&self, entry: &SkuEntry, store: &SpecStore) -> Result<RenderedPage, AppError> {
        let classified = self.classifier.classify_entry(entry);
        let categories: Vec<Category> = classified.iter().map(|c| c.category).collect();
        let system_type = self.classifier.system_type(&categories);
        debug!(line = entry.line, system_type = %system_type, "entry classified");

        if !system_type.is_renderable() {
            let unknown: Vec<&str> = classified
                .iter()
                .filter(|c| c.category == Category::Unknown)
                .map(|c| c.sku.as_str())
                .collect();
            if !unknown.is_empty() {
                return Err(AppError::UnknownCategory(unknown.join(", ")));
            }
            return Err(AppError::UnmappedCombination(system_type.label()));
        }

        let ordered = layout_order(&system_type, &classified)?;
        let models: Vec<String> = ordered.iter().map(|c| c.sku.clone()).collect();
        let specs = resolve_all(store, &models)?;

        let html = self.renderer.render(&system_type, &specs, self.rating, &models)?;

        let entry_models: Vec<String> = classified.iter().map(|c| c.sku.clone()).collect();
        let filename = filename(
            self.renderer.content().branding(),
            &system_type,
            &entry_models,
            system_tonnage(&specs),
        );

        Ok(RenderedPage {
            filename,
            html,
            system_type,
        })
    }

    fn write_page(&self, page: &RenderedPage, output_dir: &Path) -> Result<(), AppError> {
        if self.mode == RunMode::DryRun {
            debug!(file = %page.filename, bytes = page.html.len(), "dry run, not writing");
            return Ok(());
        }
        write_atomic(&output_dir.join(&page.filename), page.html.as_bytes())
    }

    /// Resolve every SKU of every entry without rendering.
    pub fn validate(&self, sku_list_path: &Path, store: &SpecStore) -> Result<ValidationReport, AppError> {
        let (entries, rejected) = self.read_entries(sku_list_path)?;
        let mut missing = BTreeSet::new();
        let mut unknown = BTreeSet::new();

        for entry in &entries {
            for classified in self.classifier.classify_entry(entry) {
                if classified.category == Category::Unknown {
                    unknown.insert(classified.sku.clone());
                }
                if store.get(&classified.sku).is_err() {
                    missing.insert(classified.sku);
                }
            }
        }

        let report = ValidationReport {
            entries: entries.len(),
            rejected_lines: rejected.len(),
            missing_models: missing.into_iter().collect(),
            unknown_skus: unknown.into_iter().collect(),
        };
        info!(
            entries = report.entries,
            missing = report.missing_models.len(),
            unknown = report.unknown_skus.len(),
            "validation complete"
        );
        Ok(report)
    }
}

/// Reorder an entry's SKUs to match the layout of its system type.
fn layout_order(
    system_type: &SystemType,
    classified: &[ClassifiedSku],
) -> Result<Vec<ClassifiedSku>, AppError> {
    let mut remaining: Vec<&ClassifiedSku> = classified.iter().collect();
    let mut ordered = Vec::with_capacity(classified.len());
    for category in system_type.categories() {
        let pos = remaining
            .iter()
            .position(|c| c.category == category)
            .ok_or_else(|| AppError::UnmappedCombination(system_type.label()))?;
        ordered.push(remaining.remove(pos).clone());
    }
    Ok(ordered)
}

/// Resolve all models, reporting every missing one together.
fn resolve_all(store: &SpecStore, models: &[String]) -> Result<Vec<SpecRecord>, AppError> {
    let mut specs = Vec::with_capacity(models.len());
    let mut missing = Vec::new();
    for model in models {
        match store.get(model) {
            Ok(resolved) => specs.push(resolved.record),
            Err(CommonError::UnresolvedModel(m)) => missing.push(m),
            Err(e) => return Err(e.into()),
        }
    }
    if !missing.is_empty() {
        return Err(CommonError::UnresolvedModel(missing.join(", ")).into());
    }
    Ok(specs)
}

/// Deterministic output filename for an entry.
pub fn filename(
    branding: &Branding,
    system_type: &SystemType,
    models: &[String],
    tonnage: Option<f64>,
) -> String {
    let Branding { brand, refrigerant } = branding;
    let joined = models.join("_");

    let stem = match system_type {
        SystemType::Single(_) => format!("{brand}_{refrigerant}_{joined}"),
        SystemType::CondenserAirHandler { condenser, .. } => {
            let size = tonnage
                .map(|t| format!("{}Ton_", format_tonnage(t)))
                .unwrap_or_default();
            format!("{brand}_{size}{refrigerant}_{}_System_{joined}", condenser.tag())
        }
        SystemType::CondenserFurnaceCoil {
            condenser,
            afue,
            orientation,
        } => {
            let kind = match condenser {
                Condenser::Ac => "AC",
                Condenser::Hp => "DualFuel",
            };
            format!(
                "{brand}_{refrigerant}_{kind}_{}_{}_System_{joined}",
                afue.tag(),
                orientation.label()
            )
        }
        _ => format!("{brand}_{refrigerant}_System_{joined}"),
    };

    format!("{}.html", sanitize(&stem))
}

fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '-'
            }
        })
        .collect()
}

/// Write through a sibling temp file and rename, so readers never see a
/// partial page.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), AppError> {
    let io_err = |source: std::io::Error| AppError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let tmp = path.with_file_name(format!(".{file_name}.tmp"));

    let result = std::fs::write(&tmp, contents).and_then(|()| std::fs::rename(&tmp, path));
    if let Err(source) = result {
        let _ = std::fs::remove_file(&tmp);
        return Err(io_err(source));
    }
    Ok(())
}
