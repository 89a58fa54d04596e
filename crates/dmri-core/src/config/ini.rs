//! Parser for sectioned `key = value` configuration text.
//!
//! Accepted syntax:
//!
//! ```text
//! # full-line comment
//! ; also a comment
//! [DEFAULT]
//! data_dir = /data
//!
//! [preprocessing]
//! b0_threshold: 50
//! output = %(data_dir)s/out
//! description = first line
//!     continued line
//! ```
//!
//! Option names are lower-cased; section names are kept verbatim. The
//! first `=` or `:` on a line separates name from value. An indented line
//! directly after an option extends that option's value.

use super::configuration::{Configuration, Section, DEFAULT_SECTION};
use crate::error::{DmriError, Result};

/// Tracks the option a continuation line would extend.
struct OpenOption {
    indent: usize,
    index: usize,
}

/// Parses configuration text into a [`Configuration`].
pub(crate) fn parse(text: &str) -> Result<Configuration> {
    let mut config = Configuration::default();
    // None until the first header; Some(None) is the DEFAULT section.
    let mut current: Option<Option<usize>> = None;
    let mut open: Option<OpenOption> = None;

    for (idx, raw) in text.lines().enumerate() {
        let lineno = idx + 1;
        let trimmed = raw.trim();

        if trimmed.starts_with('#') || trimmed.starts_with(';') {
            continue;
        }
        if trimmed.is_empty() {
            open = None;
            continue;
        }

        let indent = raw.len() - raw.trim_start().len();

        if let (Some(section), Some(opt)) = (current, open.as_ref()) {
            if indent > opt.indent {
                let options = options_mut(&mut config, section);
                let value = &mut options[opt.index].1;
                value.push('\n');
                value.push_str(trimmed);
                continue;
            }
        }

        if let Some(name) = section_header(trimmed) {
            open = None;
            if name == DEFAULT_SECTION {
                current = Some(None);
                continue;
            }
            if config.has_section(name) {
                return Err(DmriError::config_parse(
                    lineno,
                    format!("section '{}' already exists", name),
                ));
            }
            config.sections.push(Section::new(name));
            current = Some(Some(config.sections.len() - 1));
            continue;
        }

        let section = current.ok_or_else(|| {
            DmriError::config_parse(lineno, format!("missing section header before '{}'", trimmed))
        })?;

        let (key, value) = split_option(trimmed)
            .ok_or_else(|| DmriError::config_parse(lineno, format!("expected 'key = value', got '{}'", trimmed)))?;

        let options = options_mut(&mut config, section);
        if options.iter().any(|(k, _)| *k == key) {
            return Err(DmriError::config_parse(
                lineno,
                format!("option '{}' already exists in this section", key),
            ));
        }
        options.push((key, value.to_string()));
        open = Some(OpenOption {
            indent,
            index: options.len() - 1,
        });
    }

    Ok(config)
}

fn options_mut(config: &mut Configuration, section: Option<usize>) -> &mut Vec<(String, String)> {
    match section {
        Some(i) => &mut config.sections[i].options,
        None => &mut config.defaults,
    }
}

/// `[name]` with a non-empty name; text after the last `]` is ignored.
fn section_header(line: &str) -> Option<&str> {
    let rest = line.strip_prefix('[')?;
    let end = rest.rfind(']')?;
    let name = &rest[..end];
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

/// Splits at the first delimiter; the key is lower-cased.
fn split_option(line: &str) -> Option<(String, &str)> {
    let pos = line.find(['=', ':'])?;
    let key = line[..pos].trim();
    if key.is_empty() {
        return None;
    }
    Some((key.to_lowercase(), line[pos + 1..].trim()))
}
