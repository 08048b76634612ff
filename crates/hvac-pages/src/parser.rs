/// Parser for SKU list files.
///
/// The file is line oriented:
/// - One system per line: a comma-separated group of SKUs (`GLXS5BA1810, AMST24BU13`)
/// - Blank lines and `#` comments are ignored
/// - Spreadsheet header rows starting with `Part #` are ignored
///
/// Tokens that cannot be a part number (embedded whitespace, stray punctuation)
/// reject the whole line with a warning; the parser never panics.
use regex::Regex;
use tracing::warn;

use crate::error::AppError;
use crate::model::SkuEntry;

/// Result of parsing one SKU list: accepted entries plus rejected lines.
#[derive(Debug, Default)]
pub struct SkuList {
    pub entries: Vec<SkuEntry>,
    pub rejected: Vec<AppError>,
}

pub struct SkuListParser {
    header_re: Regex,
    token_re: Regex,
}

impl SkuListParser {
    pub fn new() -> Result<Self, AppError> {
        let compile = |pattern: &str| {
            Regex::new(pattern)
                .map_err(|e| AppError::Config(format!("invalid SKU pattern {pattern}: {e}")))
        };
        Ok(Self {
            header_re: compile(r"(?i)^part\s*#")?,
            token_re: compile(r"^[A-Za-z0-9][A-Za-z0-9./\-]*$")?,
        })
    }

    pub fn parse(&self, content: &str) -> SkuList {
        let mut list = SkuList::default();

        for (index, line) in content.lines().enumerate() {
            let line_number = index + 1;
            let trimmed = line.trim();

            if trimmed.is_empty() || trimmed.starts_with('#') || self.header_re.is_match(trimmed) {
                continue;
            }

            let skus: Vec<String> = trimmed
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect();

            if skus.is_empty() {
                continue;
            }

            if let Some(bad) = skus.iter().find(|s| !self.token_re.is_match(s)) {
                warn!(line_number, content = trimmed, token = %bad, "invalid SKU token, skipping line");
                list.rejected.push(AppError::Parse {
                    line: line_number,
                    message: format!("invalid SKU token '{bad}' in '{trimmed}'"),
                });
                continue;
            }

            list.entries.push(SkuEntry {
                line: line_number,
                raw: trimmed.to_string(),
                skus,
            });
        }

        list
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> SkuList {
        SkuListParser::new().expect("patterns compile").parse(content)
    }

    #[test]
    fn test_parse_skips_comments_headers_and_blanks() {
        let content = "\
Part #, Description
# condensers with air handlers

GLXS5BA1810, AMST24BU13
  GLXS5BA2410,AMST30BU13 ,
";
        let list = parse(content);
        assert!(list.rejected.is_empty());
        assert_eq!(list.entries.len(), 2);
        assert_eq!(list.entries[0].line, 4);
        assert_eq!(list.entries[0].skus, vec!["GLXS5BA1810", "AMST24BU13"]);
        assert_eq!(list.entries[1].skus, vec!["GLXS5BA2410", "AMST30BU13"]);
        assert_eq!(list.entries[1].raw, "GLXS5BA2410,AMST30BU13 ,");
    }

    #[test]
    fn test_parse_single_and_triple_groups() {
        let list = parse("GR9S800603AN\nGLZS5BA3610,GR9S920804BN,CAPTA3626B3\n");
        assert_eq!(list.entries.len(), 2);
        assert_eq!(list.entries[0].skus.len(), 1);
        assert_eq!(list.entries[1].skus.len(), 3);
    }

    #[test]
    fn test_invalid_token_rejects_line() {
        let list = parse("GLXS5BA1810 AMST24BU13\nGLXS5BA1810\n");
        assert_eq!(list.entries.len(), 1);
        assert_eq!(list.rejected.len(), 1);
        assert!(matches!(list.rejected[0], AppError::Parse { line: 1, .. }));
    }

    #[test]
    fn test_only_separators_is_ignored() {
        let list = parse(" , ,\n");
        assert!(list.entries.is_empty());
        assert!(list.rejected.is_empty());
    }
}
