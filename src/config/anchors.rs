//! Anchor and alias bookkeeping for experiment documents
//!
//! `serde_yaml` decides whether an alias is dangling. The scan lists anchors
//! and aliases for reports and names the alias behind a parser error.

use super::validate::ValidationError;

/// One `&name` or `*name` occurrence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchorSite {
    pub name: String,
    /// 1-based line number
    pub line: usize,
    /// 0-based byte column
    pub column: usize,
}

impl AnchorSite {
    fn precedes(&self, other: &AnchorSite) -> bool {
        (self.line, self.column) < (other.line, other.column)
    }
}

/// Anchors defined and aliases used by a document, in document order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnchorReport {
    pub anchors: Vec<AnchorSite>,
    pub aliases: Vec<AnchorSite>,
}

impl AnchorReport {
    /// Whether `name` is defined anywhere in the document
    pub fn is_defined(&self, name: &str) -> bool {
        self.anchors.iter().any(|a| a.name == name)
    }

    /// Aliases with no anchor of the same name defined before them
    pub fn dangling(&self) -> Vec<&AnchorSite> {
        self.aliases
            .iter()
            .filter(|alias| {
                !self
                    .anchors
                    .iter()
                    .any(|anchor| anchor.name == alias.name && anchor.precedes(alias))
            })
            .collect()
    }

    /// Anchors never referenced in this document.
    ///
    /// These are normal: sections are anchored so a larger config tree can reuse them.
    pub fn unused(&self) -> Vec<&AnchorSite> {
        self.anchors
            .iter()
            .filter(|anchor| !self.aliases.iter().any(|alias| alias.name == anchor.name))
            .collect()
    }
}

/// Collect every anchor and alias that starts a node
///
/// `&` and `*` inside plain or quoted scalars are text, not node properties.
/// Quoted and plain scalars may continue over several lines; block scalar
/// bodies are skipped.
pub fn scan_anchors(text: &str) -> AnchorReport {
    let mut scanner = Scanner::default();
    for (idx, line) in text.lines().enumerate() {
        scanner.scan_line(line, idx + 1);
    }
    scanner.report
}

/// Fail on the first alias that does not refer to an earlier anchor
///
/// The verdict comes from the YAML parser itself; the scanned report only
/// supplies names and positions.
pub fn check_anchors(text: &str) -> Result<AnchorReport, ValidationError> {
    let report = scan_anchors(text);
    match serde_yaml::from_str::<serde_yaml::Value>(text) {
        Err(err) if err.to_string().contains("unknown anchor") => {
            Err(dangling_alias(text, &err, &report))
        }
        // Other parse failures are reported by the loader
        _ => Ok(report),
    }
}

/// Name the alias at the parser's error location
fn dangling_alias(text: &str, err: &serde_yaml::Error, report: &AnchorReport) -> ValidationError {
    let line = err.location().map_or(0, |loc| loc.line());

    let from_text = err.location().and_then(|loc| {
        let src = text.lines().nth(loc.line().checked_sub(1)?)?;
        let from = loc.column().saturating_sub(1).min(src.len());
        let star = from + src.get(from..)?.find('*')?;
        let name: String = src[star + 1..].chars().take_while(|&c| is_name_char(c)).collect();
        (!name.is_empty()).then_some(name)
    });

    let dangling = report.dangling();
    let scanned = dangling
        .iter()
        .find(|alias| alias.line == line)
        .or_else(|| dangling.first());

    match (from_text, scanned) {
        (Some(name), _) => ValidationError::DanglingAlias { name, line },
        (None, Some(alias)) => ValidationError::DanglingAlias {
            name: alias.name.clone(),
            line: if line == 0 { alias.line } else { line },
        },
        (None, None) => ValidationError::DanglingAlias {
            name: String::new(),
            line,
        },
    }
}

fn is_name_char(c: char) -> bool {
    !c.is_whitespace() && !matches!(c, '[' | ']' | '{' | '}' | ',')
}

/// Line-by-line state carried across a document
#[derive(Default)]
struct Scanner {
    report: AnchorReport,
    /// Open quoted scalar
    quote: Option<char>,
    /// Nesting of `[` / `{`
    flow_depth: usize,
    /// Whether the next token inside a flow collection starts a node
    flow_expects_node: bool,
    /// Indent of the line that opened the current block scalar
    block_parent: Option<usize>,
    /// Column deeper lines must pass to continue the last plain scalar
    plain_parent: Option<usize>,
}

impl Scanner {
    fn scan_line(&mut self, line: &str, line_no: usize) {
        let content = line.trim_start();
        let indent = line.len() - content.len();
        let in_block_context = self.quote.is_none() && self.flow_depth == 0;

        if let Some(parent) = self.block_parent {
            if content.is_empty() || indent > parent {
                return;
            }
            self.block_parent = None;
        }

        if in_block_context {
            if let Some(parent) = self.plain_parent {
                if content.is_empty() || (indent > parent && !content.starts_with('#')) {
                    return;
                }
                self.plain_parent = None;
            }
            if line.starts_with('%') || is_marker(line, "...") {
                return;
            }
        }

        let skip = if in_block_context && is_marker(line, "---") { 3 } else { 0 };
        let mut expect_node = if self.flow_depth > 0 {
            self.flow_expects_node
        } else {
            self.quote.is_none()
        };
        let mut in_plain = false;
        let mut after_quote = false;
        let mut prev_blank = true;
        // Column of the key or `-` owning the current value
        let mut parent_col = indent;
        let mut scalar_start = indent;
        let mut opens_block = false;

        let mut chars = line.char_indices().skip(skip).peekable();
        while let Some((pos, c)) = chars.next() {
            if let Some(q) = self.quote {
                match (q, c) {
                    ('\'', '\'') => {
                        if matches!(chars.peek(), Some(&(_, '\''))) {
                            chars.next();
                        } else {
                            self.quote = None;
                            after_quote = true;
                        }
                    }
                    ('"', '\\') => {
                        chars.next();
                    }
                    ('"', '"') => {
                        self.quote = None;
                        after_quote = true;
                    }
                    _ => {}
                }
                prev_blank = false;
                continue;
            }

            if c.is_whitespace() {
                prev_blank = true;
                continue;
            }
            let next = chars.peek().map(|&(_, n)| n);
            let next_blank = next.map_or(true, char::is_whitespace);

            if c == '#' && prev_blank {
                break;
            }
            prev_blank = false;

            if self.flow_depth > 0 && matches!(c, ',' | ']' | '}') {
                if c == ',' {
                    expect_node = true;
                } else {
                    self.flow_depth -= 1;
                    expect_node = false;
                }
                in_plain = false;
                after_quote = false;
                continue;
            }

            if expect_node {
                match c {
                    '&' | '*' => {
                        if self.record(line, line_no, pos, c, &mut chars) {
                            // An anchor still precedes its node; an alias is the node
                            expect_node = c == '&';
                            continue;
                        }
                        expect_node = false;
                        in_plain = true;
                        scalar_start = pos;
                    }
                    '!' => {
                        while chars.next_if(|&(_, n)| !n.is_whitespace()).is_some() {}
                    }
                    '\'' | '"' => {
                        self.quote = Some(c);
                        expect_node = false;
                        scalar_start = pos;
                    }
                    '-' | '?' if next_blank => parent_col = pos,
                    '[' | '{' => self.flow_depth += 1,
                    '|' | '>' if self.flow_depth == 0 => {
                        opens_block = true;
                        break;
                    }
                    _ => {
                        expect_node = false;
                        in_plain = true;
                        scalar_start = pos;
                    }
                }
                continue;
            }

            let value_follows = next_blank
                || after_quote
                || (self.flow_depth > 0 && matches!(next, Some(',' | ']' | '}')));
            if c == ':' && value_follows {
                expect_node = true;
                in_plain = false;
                parent_col = scalar_start;
            }
            after_quote = false;
        }

        if opens_block {
            self.block_parent = Some(indent);
        } else if in_plain && self.flow_depth == 0 && self.quote.is_none() {
            self.plain_parent = Some(parent_col);
        }
        self.flow_expects_node = expect_node;
    }

    /// Record `&name` or `*name` starting at `pos`; false for a bare sigil
    fn record(
        &mut self,
        line: &str,
        line_no: usize,
        pos: usize,
        sigil: char,
        chars: &mut std::iter::Peekable<impl Iterator<Item = (usize, char)>>,
    ) -> bool {
        let start = pos + sigil.len_utf8();
        let mut end = start;
        while let Some((next_pos, next)) = chars.next_if(|&(_, n)| is_name_char(n)) {
            end = next_pos + next.len_utf8();
        }
        if end == start {
            return false;
        }

        let site = AnchorSite {
            name: line[start..end].to_string(),
            line: line_no,
            column: pos,
        };
        if sigil == '&' {
            self.report.anchors.push(site);
        } else {
            self.report.aliases.push(site);
        }
        true
    }
}

/// `---` or `...` at column 0, alone or followed by whitespace
fn is_marker(line: &str, marker: &str) -> bool {
    line.strip_prefix(marker)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with(char::is_whitespace))
}
