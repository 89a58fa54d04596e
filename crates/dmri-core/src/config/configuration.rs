//! Read-only sectioned configuration.

use super::ini;
use crate::error::{DmriError, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Name of the section whose options every other section inherits.
pub const DEFAULT_SECTION: &str = "DEFAULT";

/// Maximum nesting of `%(name)s` references.
pub const MAX_INTERPOLATION_DEPTH: usize = 10;

/// One named section, options kept in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Section {
    pub(crate) name: String,
    pub(crate) options: Vec<(String, String)>,
}

impl Section {
    pub(crate) fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            options: Vec::new(),
        }
    }

    /// Section name as written in the header.
    pub fn name(&self) -> &str {
        &self.name
    }

    fn lookup(&self, option: &str) -> Option<&str> {
        lookup(&self.options, option)
    }
}

/// Two-level mapping of section name to option name to string value.
///
/// Built by [`load_config`] or [`Configuration::from_str`] and never
/// modified afterwards. Option names are case-insensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Configuration {
    pub(crate) defaults: Vec<(String, String)>,
    pub(crate) sections: Vec<Section>,
}

impl FromStr for Configuration {
    type Err = DmriError;

    fn from_str(s: &str) -> Result<Self> {
        ini::parse(s)
    }
}

impl Configuration {
    /// True when there are neither sections nor defaults.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty() && self.defaults.is_empty()
    }

    /// Section names in file order, excluding `DEFAULT`.
    pub fn sections(&self) -> Vec<&str> {
        self.sections.iter().map(|s| s.name.as_str()).collect()
    }

    /// True if a section with this exact name exists. `DEFAULT` is never
    /// reported as a section.
    pub fn has_section(&self, section: &str) -> bool {
        self.section(section).is_some()
    }

    /// True if the option resolves in `section`, directly or via defaults.
    pub fn has_option(&self, section: &str, option: &str) -> bool {
        let option = option.to_lowercase();
        if section == DEFAULT_SECTION {
            return lookup(&self.defaults, &option).is_some();
        }
        match self.section(section) {
            Some(s) => s.lookup(&option).is_some() || lookup(&self.defaults, &option).is_some(),
            None => false,
        }
    }

    /// The `DEFAULT` options in file order.
    pub fn defaults(&self) -> &[(String, String)] {
        &self.defaults
    }

    /// Option names visible in `section`: its own, then inherited defaults.
    pub fn options(&self, section: &str) -> Result<Vec<&str>> {
        let own = self.section_options(section)?;
        let mut names: Vec<&str> = own.iter().map(|(k, _)| k.as_str()).collect();
        for (k, _) in &self.defaults {
            if !names.contains(&k.as_str()) {
                names.push(k);
            }
        }
        Ok(names)
    }

    /// `(name, interpolated value)` pairs visible in `section`.
    pub fn items(&self, section: &str) -> Result<Vec<(String, String)>> {
        self.options(section)?
            .into_iter()
            .map(|name| -> Result<(String, String)> {
                Ok((name.to_string(), self.get(section, name)?))
            })
            .collect()
    }

    /// Value without `%(name)s` expansion.
    pub fn get_raw(&self, section: &str, option: &str) -> Result<&str> {
        let option = option.to_lowercase();
        let own = self.section_options(section)?;
        lookup(own, &option)
            .or_else(|| lookup(&self.defaults, &option))
            .ok_or_else(|| DmriError::missing_option(section, option.as_str()))
    }

    /// Value with `%(name)s` references resolved against the same section
    /// and the defaults; `%%` yields a literal `%`.
    pub fn get(&self, section: &str, option: &str) -> Result<String> {
        let raw = self.get_raw(section, option)?;
        let mut out = String::with_capacity(raw.len());
        self.interpolate(section, option, raw, &mut out, 1)?;
        Ok(out)
    }

    /// Value parsed as a signed integer.
    pub fn get_int(&self, section: &str, option: &str) -> Result<i64> {
        let value = self.get(section, option)?;
        value
            .trim()
            .parse()
            .map_err(|e: std::num::ParseIntError| {
                DmriError::invalid_value(section, option, value.as_str(), e.to_string())
            })
    }

    /// Value parsed as a float.
    pub fn get_float(&self, section: &str, option: &str) -> Result<f64> {
        let value = self.get(section, option)?;
        value
            .trim()
            .parse()
            .map_err(|e: std::num::ParseFloatError| {
                DmriError::invalid_value(section, option, value.as_str(), e.to_string())
            })
    }

    /// Value parsed as a boolean: `1/yes/true/on` or `0/no/false/off`,
    /// case-insensitive.
    pub fn get_bool(&self, section: &str, option: &str) -> Result<bool> {
        let value = self.get(section, option)?;
        match value.trim().to_lowercase().as_str() {
            "1" | "yes" | "true" | "on" => Ok(true),
            "0" | "no" | "false" | "off" => Ok(false),
            _ => Err(DmriError::invalid_value(
                section,
                option,
                value.as_str(),
                "not a boolean",
            )),
        }
    }

    fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name == name)
    }

    fn section_options(&self, section: &str) -> Result<&[(String, String)]> {
        if section == DEFAULT_SECTION {
            return Ok(&[]);
        }
        self.section(section)
            .map(|s| s.options.as_slice())
            .ok_or_else(|| DmriError::missing_section(section))
    }

    fn interpolate(
        &self,
        section: &str,
        option: &str,
        raw: &str,
        out: &mut String,
        depth: usize,
    ) -> Result<()> {
        if depth > MAX_INTERPOLATION_DEPTH {
            return Err(DmriError::interpolation(
                section,
                option,
                format!("recursion limit {} exceeded", MAX_INTERPOLATION_DEPTH),
            ));
        }

        let mut rest = raw;
        while let Some(pos) = rest.find('%') {
            out.push_str(&rest[..pos]);
            rest = &rest[pos + 1..];
            if let Some(after) = rest.strip_prefix('%') {
                out.push('%');
                rest = after;
            } else if let Some(after) = rest.strip_prefix('(') {
                let close = after.find(")s").ok_or_else(|| {
                    DmriError::interpolation(section, option, format!("bad reference in '{}'", raw))
                })?;
                let name = after[..close].to_lowercase();
                if name.is_empty() {
                    return Err(DmriError::interpolation(
                        section,
                        option,
                        format!("empty reference in '{}'", raw),
                    ));
                }
                let referenced = self.get_raw(section, &name).map_err(|_| {
                    DmriError::interpolation(
                        section,
                        option,
                        format!("referenced option '{}' does not exist", name),
                    )
                })?;
                if referenced.contains('%') {
                    self.interpolate(section, option, referenced, out, depth + 1)?;
                } else {
                    out.push_str(referenced);
                }
                rest = &after[close + 2..];
            } else {
                return Err(DmriError::interpolation(
                    section,
                    option,
                    "'%' must be followed by '%' or '('",
                ));
            }
        }
        out.push_str(rest);
        Ok(())
    }
}

fn lookup<'a>(options: &'a [(String, String)], option: &str) -> Option<&'a str> {
    options
        .iter()
        .find(|(k, _)| k == option)
        .map(|(_, v)| v.as_str())
}

/// Loads a configuration file.
///
/// A file that does not exist yields an empty configuration; callers check
/// for the keys they require. No schema is applied.
///
/// # Errors
///
/// - [`DmriError::ConfigParse`] when the text is malformed.
/// - [`DmriError::Io`] for read failures other than a missing file.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Configuration> {
    let path = path.as_ref();
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "config file not found, using empty configuration");
            return Ok(Configuration::default());
        }
        Err(e) => return Err(DmriError::io(path, e)),
    };
    let config: Configuration = text.parse()?;
    debug!(
        path = %path.display(),
        sections = config.sections.len(),
        "configuration loaded"
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PIPELINE: &str = "\
[DEFAULT]
data_dir = /data/hardi
verbose = yes

[preprocessing]
b0_threshold = 50
mask_percentile = 20.0
output = %(data_dir)s/preprocessed

[tractography]
step_size = 0.5
seeds = %(count)s
count = 100000
label = 100%% sure
verbose = off
";

    fn pipeline() -> Configuration {
        PIPELINE.parse().unwrap()
    }

    #[test]
    fn test_defaults_are_inherited() {
        let config = pipeline();
        assert_eq!(config.sections(), vec!["preprocessing", "tractography"]);
        assert!(!config.has_section(DEFAULT_SECTION));
        assert!(config.has_option("preprocessing", "data_dir"));
        assert!(config.get_bool("preprocessing", "verbose").unwrap());
        assert!(!config.get_bool("tractography", "verbose").unwrap());
        assert_eq!(config.get(DEFAULT_SECTION, "data_dir").unwrap(), "/data/hardi");
    }

    #[test]
    fn test_interpolation() {
        let config = pipeline();
        assert_eq!(
            config.get("preprocessing", "output").unwrap(),
            "/data/hardi/preprocessed"
        );
        assert_eq!(config.get_raw("preprocessing", "output").unwrap(), "%(data_dir)s/preprocessed");
        assert_eq!(config.get_int("tractography", "seeds").unwrap(), 100_000);
        assert_eq!(config.get("tractography", "label").unwrap(), "100% sure");
    }

    #[test]
    fn test_interpolation_errors() {
        let config: Configuration = "[a]\nx = %(missing)s\ny = 50%\nz = %(z)s\n".parse().unwrap();
        assert!(matches!(config.get("a", "x"), Err(DmriError::Interpolation { .. })));
        assert!(matches!(config.get("a", "y"), Err(DmriError::Interpolation { .. })));
        assert!(matches!(config.get("a", "z"), Err(DmriError::Interpolation { .. })));
    }

    #[test]
    fn test_typed_getters() {
        let config = pipeline();
        assert_eq!(config.get_int("preprocessing", "b0_threshold").unwrap(), 50);
        assert_eq!(config.get_float("preprocessing", "mask_percentile").unwrap(), 20.0);
        assert_eq!(config.get_float("tractography", "step_size").unwrap(), 0.5);
        assert!(matches!(
            config.get_int("tractography", "step_size"),
            Err(DmriError::InvalidValue { .. })
        ));
        assert!(matches!(
            config.get_bool("preprocessing", "b0_threshold"),
            Err(DmriError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_missing_lookups() {
        let config = pipeline();
        assert!(matches!(
            config.get("connectivity", "atlas"),
            Err(DmriError::MissingSection { .. })
        ));
        assert!(matches!(
            config.get("preprocessing", "atlas"),
            Err(DmriError::MissingOption { .. })
        ));
        assert!(!config.has_option("connectivity", "data_dir"));
    }

    #[test]
    fn test_options_case_insensitive() {
        let config = pipeline();
        assert_eq!(config.get("preprocessing", "B0_Threshold").unwrap(), "50");
        assert!(config.has_option("tractography", "STEP_SIZE"));
    }

    #[test]
    fn test_options_and_items() {
        let config = pipeline();
        assert_eq!(
            config.options("preprocessing").unwrap(),
            vec!["b0_threshold", "mask_percentile", "output", "data_dir", "verbose"]
        );
        let items = config.items("preprocessing").unwrap();
        assert_eq!(items[2], ("output".to_string(), "/data/hardi/preprocessed".to_string()));
        assert_eq!(config.defaults().len(), 2);
    }

    #[test]
    fn test_empty_configuration() {
        let config = Configuration::default();
        assert!(config.is_empty());
        assert!(config.sections().is_empty());
        assert!(!pipeline().is_empty());
    }
}
