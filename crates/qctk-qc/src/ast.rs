//! Syntax tree for `.qc` files.

/// A declaration directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    /// `.v`: the wires of the circuit, in order.
    Variables,
    /// `.i`: wires that carry inputs.
    Inputs,
    /// `.o`: wires that carry outputs.
    Outputs,
    /// `.c`: constant initial values.
    Constants,
    /// `.ol`: output labels.
    OutputLabels,
}

impl Directive {
    /// Look up a directive by its name without the dot.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "v" => Some(Directive::Variables),
            "i" => Some(Directive::Inputs),
            "o" => Some(Directive::Outputs),
            "c" => Some(Directive::Constants),
            "ol" => Some(Directive::OutputLabels),
            _ => None,
        }
    }

    /// The directive as written in a file.
    pub fn as_str(self) -> &'static str {
        match self {
            Directive::Variables => ".v",
            Directive::Inputs => ".i",
            Directive::Outputs => ".o",
            Directive::Constants => ".c",
            Directive::OutputLabels => ".ol",
        }
    }
}

/// One directive line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub directive: Directive,
    pub names: Vec<String>,
    pub line: usize,
}

/// One gate line in the `BEGIN…END` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateLine {
    pub mnemonic: String,
    pub args: Vec<String>,
    pub line: usize,
}

/// A parsed `.qc` file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    pub declarations: Vec<Declaration>,
    pub begin_line: usize,
    pub body: Vec<GateLine>,
}
