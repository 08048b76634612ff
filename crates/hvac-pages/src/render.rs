/// HTML page rendering.
///
/// A single inline builder handles every renderable system type. The page is
/// assembled from shared pieces in a fixed order: head with styles, title,
/// intro, spec tables (tabbed when there is more than one component),
/// warranty cards, installation call-to-action with the DOE compliance badge,
/// and the tab script.
use hvac_common::record::{format_number, SpecRecord};

use crate::assets::{PAGE_CSS, TAB_SCRIPT};
use crate::content::{enrich, ContentAssembler};
use crate::error::AppError;
use crate::model::{Category, EquipmentKind, SpecRow, SystemType};

pub const DEFAULT_COMPLIANCE_THRESHOLD: f64 = 14.3;

/// DOE regional compliance wording for a SEER2 rating.
#[derive(Debug, Clone, Copy)]
pub struct ComplianceFooter {
    threshold: f64,
}

impl Default for ComplianceFooter {
    fn default() -> Self {
        Self::new(DEFAULT_COMPLIANCE_THRESHOLD)
    }
}

impl ComplianceFooter {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// `(headline, description)`. A rating equal to the threshold is
    /// compliant nationwide.
    pub fn text(&self, rating: f64) -> (&'static str, String) {
        let rating_text = format_number(rating);
        if rating < self.threshold {
            (
                "DOE Compliant for Northern Regions Only",
                format!(
                    "This {rating_text} SEER2 equipment meets Department of Energy efficiency \
                     requirements for residential HVAC installations in northern U.S. climate \
                     zones only"
                ),
            )
        } else {
            (
                "DOE Compliant Nationwide",
                format!(
                    "This {rating_text} SEER2 equipment meets Department of Energy efficiency \
                     requirements for residential HVAC installations across all U.S. climate zones"
                ),
            )
        }
    }
}

pub struct PageRenderer {
    content: ContentAssembler,
    compliance: ComplianceFooter,
}

/// One component's spec table.
struct Panel {
    kind: EquipmentKind,
    model: String,
    rows: Vec<SpecRow>,
}

impl PageRenderer {
    pub fn new(content: ContentAssembler, compliance: ComplianceFooter) -> Self {
        Self {
            content,
            compliance,
        }
    }

    pub fn content(&self) -> &ContentAssembler {
        &self.content
    }

    /// Render a complete page. `specs` and `model_numbers` are in the layout
    /// order of `system_type.categories()`.
    pub fn render(
        &self,
        system_type: &SystemType,
        specs: &[SpecRecord],
        rating: f64,
        model_numbers: &[String],
    ) -> Result<String, AppError> {
        if let SystemType::Single(Category::Thermostat) = system_type {
            return Err(AppError::MissingTemplate(system_type.label()));
        }
        if !system_type.is_renderable() {
            return Err(AppError::UnmappedCombination(system_type.label()));
        }
        if model_numbers.len() != specs.len() {
            return Err(AppError::UnmappedCombination(format!(
                "{} model numbers for {} specs",
                model_numbers.len(),
                specs.len()
            )));
        }
        let categories = system_type.categories();
        if categories.len() != specs.len() {
            return Err(AppError::UnmappedCombination(format!(
                "{} expects {} components, got {}",
                system_type.label(),
                categories.len(),
                specs.len()
            )));
        }

        let enriched: Vec<SpecRecord> = specs
            .iter()
            .zip(&categories)
            .map(|(spec, category)| enrich(spec, *category))
            .collect();

        let mut panels = Vec::with_capacity(enriched.len());
        for ((spec, category), model) in enriched.iter().zip(&categories).zip(model_numbers) {
            // Categories without a layout fall back to the record's own type.
            let (kind, rows) = match category.kind() {
                Some(kind) => (kind, self.content.rows_as(spec, kind)),
                None => {
                    let kind = spec
                        .equipment_type()
                        .and_then(EquipmentKind::from_equipment_type)
                        .ok_or_else(|| AppError::MissingTemplate(category.label().to_string()))?;
                    (kind, self.content.rows(spec))
                }
            };
            panels.push(Panel {
                kind,
                model: model.clone(),
                rows,
            });
        }

        let title = self.content.title(system_type, &enriched, rating);
        let intro = self.content.intro(system_type, &enriched, rating);

        let mut html = String::with_capacity(32 * 1024);
        html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
        html.push_str("<meta charset=\"UTF-8\">\n");
        html.push_str(
            "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
        );
        html.push_str(&format!("<title>{}</title>\n", html_escape(&title)));
        html.push_str(&format!("<style>{PAGE_CSS}</style>\n"));
        html.push_str("</head>\n<body>\n<div id=\"product-container\">\n");
        html.push_str(&format!("<h1>{}</h1>\n", html_escape(&title)));
        html.push_str(&format!(
            "<div class=\"intro-section\">\n<p>{}</p>\n</div>\n",
            html_escape(&intro)
        ));
        render_specs(&mut html, &panels);
        render_warranty(&mut html, &categories);
        self.render_cta(&mut html, rating);
        html.push_str("</div>\n");
        html.push_str(&format!("<script>{TAB_SCRIPT}</script>\n"));
        html.push_str("</body>\n</html>\n");

        Ok(html)
    }

    fn render_cta(&self, html: &mut String, rating: f64) {
        let (headline, description) = self.compliance.text(rating);
        html.push_str("<div class=\"cta-section\">\n<div class=\"cta-content\">\n");
        html.push_str("<h2>Professional Installation Required</h2>\n");
        html.push_str(
            "<p>Certified HVAC technician installation ensures optimal performance, safety \
             compliance, and full warranty protection.</p>\n</div>\n",
        );
        html.push_str("<div class=\"compliance-badge\">\n<div class=\"badge-icon\">✓</div>\n");
        html.push_str(&format!(
            "<div class=\"badge-content\">\n<h3>{}</h3>\n<p>{}</p>\n</div>\n</div>\n",
            html_escape(headline),
            html_escape(&description)
        ));
        html.push_str(
            "<p class=\"disclaimer\"><strong>Important:</strong> Check state and local codes and \
             ordinances before purchasing. Product availability and compliance requirements may \
             vary by region.</p>\n</div>\n",
        );
    }
}

fn render_specs(html: &mut String, panels: &[Panel]) {
    if let [panel] = panels {
        html.push_str("<div class=\"specs-section\">\n<h2>Specifications</h2>\n");
        render_table(html, panel);
        html.push_str("</div>\n");
        return;
    }

    html.push_str("<h2>Specifications</h2>\n<div class=\"tab-container\">\n");
    html.push_str("<div class=\"tab-buttons\">\n");
    for (i, panel) in panels.iter().enumerate() {
        let active = if i == 0 { " active" } else { "" };
        html.push_str(&format!(
            "<button class=\"tab-button{active}\" onclick=\"showTab(event, '{}')\">{}</button>\n",
            panel.kind.tab_id(),
            panel.kind.tab_label()
        ));
    }
    html.push_str("</div>\n");
    for (i, panel) in panels.iter().enumerate() {
        let active = if i == 0 { " active" } else { "" };
        html.push_str(&format!(
            "<div id=\"{}\" class=\"tab-content{active}\">\n",
            panel.kind.tab_id()
        ));
        render_table(html, panel);
        html.push_str("</div>\n");
    }
    html.push_str("</div>\n");
}

fn render_table(html: &mut String, panel: &Panel) {
    html.push_str(&format!(
        "<h3>{} &mdash; {} Specifications</h3>\n",
        panel.kind.tab_label(),
        html_escape(&panel.model)
    ));
    html.push_str("<table class=\"specs-table\">\n<thead>\n<tr><th>Specification</th><th>Value</th></tr>\n</thead>\n<tbody>\n");
    for row in &panel.rows {
        html.push_str(&format!(
            "<tr><td><strong>{}</strong></td><td>{}</td></tr>\n",
            html_escape(&row.label),
            html_escape(&row.value)
        ));
    }
    html.push_str("</tbody>\n</table>\n");
}

fn render_warranty(html: &mut String, categories: &[Category]) {
    let mut cards = vec![("10", "Year Parts Limited Warranty")];
    if categories.iter().any(|c| c.condenser().is_some()) {
        cards.push(("10", "Year Compressor Limited Warranty"));
    }
    if categories.iter().any(|c| c.afue().is_some()) {
        cards.push(("∞", "Lifetime Heat Exchanger Limited Warranty"));
    }

    html.push_str("<div class=\"warranty-section\">\n<h2>Comprehensive Warranty Protection</h2>\n");
    html.push_str("<div class=\"warranty-grid\">\n");
    for (years, label) in cards {
        html.push_str(&format!(
            "<div class=\"warranty-card\">\n<div class=\"warranty-years\">{years}</div>\n\
             <div class=\"warranty-label\">{label}</div>\n</div>\n"
        ));
    }
    html.push_str("</div>\n");
    html.push_str(
        "<p class=\"warranty-note\"><strong>Note:</strong> Warranty terms and conditions apply. \
         Unit must be registered within 60 days of installation for full coverage.</p>\n</div>\n",
    );
}

pub fn html_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
