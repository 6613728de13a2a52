//! Statistics headers in `.qc` comments.
//!
//! Optimizers annotate their output with comment blocks such as
//!
//! ```text
//! # Original:
//! #   Qubits: 11
//! #   H: 30
//! #   T: 119
//! #   cnot: 127
//! #   Depth: 210
//! #   T-depth: 91
//! # Result:
//! #   Qubits: 11
//! #   ...
//! ```
//!
//! A line `# <Label>:` opens a section and `# <key>: <value>` lines add
//! entries to it. A one-line summary such as
//! `# Result: 11 qubits, 30 H, depth 152` is read as a section too.

use std::fmt::Write as _;

use qctk_ir::{CircuitStats, GateFamily, StatsClaim};
use serde::{Deserialize, Serialize};

/// A single `key: value` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderEntry {
    pub key: String,
    pub value: String,
}

/// What a header key refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderKey {
    Qubits,
    Total,
    Depth,
    TDepth,
    Family(GateFamily),
}

impl HeaderKey {
    /// Classify a key. Case, spaces, dashes and underscores are ignored;
    /// `t-count` is an alias of the `T` family.
    pub fn classify(key: &str) -> Option<Self> {
        let norm: String = key
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_ascii_lowercase();
        match norm.as_str() {
            "qubits" | "qubit" => Some(HeaderKey::Qubits),
            "gates" | "total" | "gatecount" => Some(HeaderKey::Total),
            "depth" => Some(HeaderKey::Depth),
            "tdepth" => Some(HeaderKey::TDepth),
            "tcount" => Some(HeaderKey::Family(GateFamily::T)),
            other => GateFamily::from_name(other).map(HeaderKey::Family),
        }
    }
}

/// A labelled block of entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderSection {
    /// The label, without the trailing colon. Empty for entries that precede
    /// any label.
    pub label: String,
    pub entries: Vec<HeaderEntry>,
}

impl HeaderSection {
    /// Create an empty section.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            entries: vec![],
        }
    }

    /// A section describing `stats`, in the layout optimizers write.
    pub fn from_stats(label: impl Into<String>, stats: &CircuitStats) -> Self {
        let mut section = Self::new(label);
        section.push("Qubits", stats.num_qubits);
        for (family, count) in &stats.gate_counts {
            section.push(family.as_str(), count);
        }
        section.push("Depth", stats.depth);
        section.push("T-depth", stats.t_depth);
        section
    }

    /// Append an entry.
    pub fn push(&mut self, key: impl Into<String>, value: impl ToString) {
        self.entries.push(HeaderEntry {
            key: key.into(),
            value: value.to_string(),
        });
    }

    /// Look up an entry value by key, case-insensitively.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.key.eq_ignore_ascii_case(key))
            .map(|e| e.value.as_str())
    }

    /// The statistics this section claims. Unknown keys and non-numeric
    /// values are ignored.
    pub fn claim(&self) -> StatsClaim {
        let mut claim = StatsClaim::default();
        for entry in &self.entries {
            let (Some(key), Ok(value)) = (
                HeaderKey::classify(&entry.key),
                entry.value.trim().parse::<usize>(),
            ) else {
                continue;
            };
            match key {
                HeaderKey::Qubits => claim.qubits = Some(value),
                HeaderKey::Total => claim.total = Some(value),
                HeaderKey::Depth => claim.depth = Some(value),
                HeaderKey::TDepth => claim.t_depth = Some(value),
                HeaderKey::Family(family) => {
                    claim.gates.insert(family, value);
                }
            }
        }
        claim
    }

    /// Render as comment lines.
    pub fn render(&self) -> String {
        let mut out = String::new();
        if !self.label.is_empty() {
            let _ = writeln!(out, "# {}:", self.label);
        }
        for entry in &self.entries {
            let _ = writeln!(out, "#   {}: {}", entry.key, entry.value);
        }
        out
    }
}

/// The comment header of a `.qc` file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderStats {
    /// Sections in file order.
    pub sections: Vec<HeaderSection>,
    /// The comment lines as written, `#` included.
    pub raw: Vec<String>,
}

impl HeaderStats {
    /// Read the comment lines that precede `BEGIN`.
    pub fn parse(source: &str) -> Self {
        let mut header = HeaderStats::default();

        for line in source.lines() {
            let trimmed = line.trim();
            if trimmed
                .split_whitespace()
                .next()
                .is_some_and(|word| word.eq_ignore_ascii_case("begin"))
            {
                break;
            }
            let Some(comment) = trimmed.strip_prefix('#') else {
                continue;
            };
            header.raw.push(trimmed.to_string());

            let text = comment.trim();
            let Some((key, value)) = text.split_once(':') else {
                continue;
            };
            let (key, value) = (key.trim(), value.trim());
            if key.is_empty() {
                continue;
            }

            if value.is_empty() {
                header.sections.push(HeaderSection::new(key));
                continue;
            }
            if let Some(entries) = summary_entries(value) {
                let mut section = HeaderSection::new(key);
                for (key, count) in entries {
                    section.push(key, count);
                }
                header.sections.push(section);
                continue;
            }

            if header.sections.is_empty() {
                header.sections.push(HeaderSection::new(""));
            }
            if let Some(section) = header.sections.last_mut() {
                section.push(key, value);
            }
        }

        header
    }

    /// Find a section by label, case-insensitively.
    pub fn section(&self, label: &str) -> Option<&HeaderSection> {
        self.sections
            .iter()
            .find(|s| s.label.eq_ignore_ascii_case(label))
    }

    /// The last section that has entries.
    pub fn last(&self) -> Option<&HeaderSection> {
        self.sections.iter().rev().find(|s| !s.entries.is_empty())
    }

    /// The claim of the `Result` section, or of the last section.
    pub fn claim(&self) -> Option<StatsClaim> {
        self.section("Result")
            .or_else(|| self.last())
            .map(HeaderSection::claim)
    }

    /// Whether the header has no statistics sections.
    pub fn is_empty(&self) -> bool {
        self.sections.iter().all(|s| s.entries.is_empty())
    }

    /// Render every section as comment lines.
    pub fn render(&self) -> String {
        self.sections.iter().map(HeaderSection::render).collect()
    }
}

/// Split `11 qubits, 30 H, depth 152` into `(key, count)` pairs. Every
/// item must be a count and a known key, in either order.
fn summary_entries(value: &str) -> Option<Vec<(&str, usize)>> {
    let mut entries = vec![];
    for item in value.split(',') {
        let words: Vec<&str> = item.split_whitespace().collect();
        let (key, count) = match words.as_slice() {
            [first, second] => match (first.parse::<usize>(), second.parse::<usize>()) {
                (Ok(count), Err(_)) => (*second, count),
                (Err(_), Ok(count)) => (*first, count),
                _ => return None,
            },
            _ => return None,
        };
        HeaderKey::classify(key)?;
        entries.push((key, count));
    }
    Some(entries)
}
