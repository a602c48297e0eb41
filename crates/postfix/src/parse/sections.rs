//! Module source reader (§4.1, first half): splits a `.postfix` file's text
//! into the five recognized sections, stripping comments and delimiter
//! lines before any section-specific parsing happens.

use crate::error::{Diagnostic, PResult, PostfixError};

/// One of the five section names a module file may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Vars,
    Labels,
    GlobVarList,
    Funcs,
    Code,
}

impl Section {
    fn from_marker(name: &str) -> Option<Self> {
        match name {
            "vars" => Some(Self::Vars),
            "labels" => Some(Self::Labels),
            "globVarList" => Some(Self::GlobVarList),
            "funcs" => Some(Self::Funcs),
            "code" => Some(Self::Code),
            _ => None,
        }
    }
}

/// The sectioned content of a module file: one line vector per section,
/// plus the 1-based source line the `.code(` marker appeared on.
#[derive(Debug, Default)]
pub struct SectionedSource {
    pub vars: Vec<String>,
    pub labels: Vec<String>,
    pub glob_var_list: Vec<String>,
    pub funcs: Vec<String>,
    pub code: Vec<String>,
    pub code_start_offset: usize,
}

/// Strips a trailing `// …` comment, respecting `"…"` string literals so a
/// `//` inside a quoted string is not mistaken for a comment marker.
fn strip_trailing_comment(line: &str) -> &str {
    let bytes = line.as_bytes();
    let mut in_quotes = false;
    let mut i = 0;
    while i + 1 < bytes.len() {
        match bytes[i] {
            b'"' => in_quotes = !in_quotes,
            b'/' if !in_quotes && bytes[i + 1] == b'/' => return line[..i].trim_end(),
            _ => {}
        }
        i += 1;
    }
    line
}

/// Reads `text` into a [`SectionedSource`], erroring if content appears
/// before any section marker has been seen.
pub fn read_sections(module: &str, text: &str) -> PResult<SectionedSource> {
    let mut out = SectionedSource::default();
    let mut current: Option<Section> = None;

    for (idx, raw_line) in text.lines().enumerate() {
        let line_no = idx + 1;
        let trimmed = raw_line.trim();

        if trimmed.is_empty() || trimmed.starts_with("//") {
            continue;
        }
        if trimmed == "(" || trimmed == ")" {
            continue;
        }
        if let Some(rest) = trimmed.strip_prefix('.') {
            let name = rest.trim_end_matches('(').trim();
            let section = Section::from_marker(name).ok_or_else(|| Diagnostic {
                error: PostfixError::Decl {
                    message: format!("unknown section '.{name}'"),
                },
                module: module.to_owned(),
                pc: 0,
                line: line_no,
            })?;
            if section == Section::Code {
                out.code_start_offset = line_no;
            }
            current = Some(section);
            continue;
        }

        let content = strip_trailing_comment(trimmed).trim();
        if content.is_empty() {
            continue;
        }
        match current {
            Some(Section::Vars) => out.vars.push(content.to_owned()),
            Some(Section::Labels) => out.labels.push(content.to_owned()),
            Some(Section::GlobVarList) => out.glob_var_list.push(content.to_owned()),
            Some(Section::Funcs) => out.funcs.push(content.to_owned()),
            Some(Section::Code) => out.code.push(content.to_owned()),
            None => {
                return Err(Diagnostic {
                    error: PostfixError::Decl {
                        message: format!("content '{content}' before any section marker"),
                    },
                    module: module.to_owned(),
                    pc: 0,
                    line: line_no,
                });
            }
        }
    }

    Ok(out)
}
