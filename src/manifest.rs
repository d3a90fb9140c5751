//! Reading a generated requirements manifest.
//!
//! Only used for reporting: the manifest file itself is published exactly as
//! the scanner wrote it.

use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::path::Path;
use std::sync::LazyLock;

use crate::error::Result;

/// `name`, optional extras, optional `==version`.
static REQUIREMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z0-9][A-Za-z0-9._-]*)(?:\[[^\]]*\])?\s*(?:==\s*([^\s;#]+))?").unwrap()
});

/// One package line of a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Requirement {
    /// Package name as written.
    pub name: String,
    /// Pinned version, when the line uses `==`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.version {
            Some(version) => write!(f, "{}=={}", self.name, version),
            None => write!(f, "{}", self.name),
        }
    }
}

/// Parsed manifest, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Manifest {
    /// Requirements in the order the scanner wrote them.
    pub requirements: Vec<Requirement>,
}

impl Manifest {
    /// Parse `requirements.txt` text.
    ///
    /// Blank lines, comments and option lines (`-r`, `--index-url`) are skipped.
    pub fn parse(content: &str) -> Self {
        let requirements = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#') && !line.starts_with('-'))
            .filter_map(|line| {
                let caps = REQUIREMENT.captures(line)?;
                Some(Requirement {
                    name: caps[1].to_string(),
                    version: caps.get(2).map(|m| m.as_str().to_string()),
                })
            })
            .collect();

        Self { requirements }
    }

    /// Read and parse a manifest file.
    ///
    /// Bytes that are not valid UTF-8 are replaced rather than rejected; the
    /// scanner decides the file's encoding.
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        Ok(Self::parse(&String::from_utf8_lossy(&bytes)))
    }

    /// Number of requirements.
    pub fn len(&self) -> usize {
        self.requirements.len()
    }

    /// Whether the manifest lists no packages.
    pub fn is_empty(&self) -> bool {
        self.requirements.is_empty()
    }
}
