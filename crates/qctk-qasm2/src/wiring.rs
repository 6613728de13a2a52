//! Wiring annotations in QASM comments.
//!
//! Routing tools record where each logical qubit starts and ends:
//!
//! ```text
//! // Initial wiring: [0, 1, 2, 3]
//! // Resulting wiring: [2, 1, 0, 3]
//! ```
//!
//! `Final wiring:` is accepted as a synonym of `Resulting wiring:`.

use qctk_ir::Wiring;

use crate::error::{ParseError, ParseResult};

/// Wirings found in comments, with the line they were read from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WiringComments {
    pub initial: Option<(usize, Wiring)>,
    pub final_: Option<(usize, Wiring)>,
}

impl WiringComments {
    /// Scan every `//` comment for wiring annotations.
    pub fn parse(source: &str) -> ParseResult<Self> {
        let mut found = Self::default();

        for (idx, text) in source.lines().enumerate() {
            let line = idx + 1;
            let Some((_, comment)) = text.split_once("//") else {
                continue;
            };
            let comment = comment.trim();
            let lower = comment.to_ascii_lowercase();

            let (slot, key_len) = if lower.starts_with("initial wiring") {
                (&mut found.initial, "initial wiring".len())
            } else if lower.starts_with("resulting wiring") {
                (&mut found.final_, "resulting wiring".len())
            } else if lower.starts_with("final wiring") {
                (&mut found.final_, "final wiring".len())
            } else {
                continue;
            };

            let Some(vector) = comment[key_len..].trim_start().strip_prefix(':') else {
                return Err(ParseError::InvalidWiring {
                    line,
                    message: "expected ':' after the label".into(),
                });
            };
            if slot.is_some() {
                return Err(ParseError::InvalidWiring {
                    line,
                    message: "wiring given twice".into(),
                });
            }
            *slot = Some((line, parse_vector(vector, line)?));
        }

        Ok(found)
    }

    /// Require every wiring to cover exactly `num_qubits` qubits.
    pub fn check_size(&self, num_qubits: usize) -> ParseResult<()> {
        for (line, wiring) in self.initial.iter().chain(self.final_.iter()) {
            if wiring.len() != num_qubits {
                return Err(ParseError::InvalidWiring {
                    line: *line,
                    message: format!(
                        "{} entries for a circuit of {num_qubits} qubits",
                        wiring.len()
                    ),
                });
            }
        }
        Ok(())
    }
}

/// Parse `[a, b, c]`. Brackets are optional; commas or spaces separate.
fn parse_vector(text: &str, line: usize) -> ParseResult<Wiring> {
    let text = text.trim();
    let inner = match (text.strip_prefix('['), text.ends_with(']')) {
        (Some(rest), true) => &rest[..rest.len() - 1],
        (None, false) => text,
        _ => {
            return Err(ParseError::InvalidWiring {
                line,
                message: format!("unbalanced brackets in '{text}'"),
            });
        }
    };

    let entries = inner
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<u32>().map_err(|_| ParseError::InvalidWiring {
                line,
                message: format!("'{s}' is not a qubit index"),
            })
        })
        .collect::<ParseResult<Vec<_>>>()?;

    Wiring::new(entries).map_err(|e| ParseError::InvalidWiring {
        line,
        message: e.to_string(),
    })
}
