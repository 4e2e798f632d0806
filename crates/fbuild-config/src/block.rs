//! The closed set of configuration block kinds.

use crate::alias::Alias;
use crate::compiler::Compiler;
use crate::error::{ConfigError, ConfigResult};

/// One named configuration unit in the generated BFF file.
///
/// The set of block kinds the engine understands is fixed, so blocks are a
/// closed enum rather than an open trait: serialization matches exhaustively
/// and adding a kind is a compile-visible change.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigBlock {
    /// A `Compiler()` toolchain definition.
    Compiler(Compiler),
    /// An `Alias()` target grouping.
    Alias(Alias),
}

impl ConfigBlock {
    /// Renders this block as BFF text.
    ///
    /// Pure function of the block's current field values; serializing the
    /// same block twice yields byte-identical output.
    pub fn serialize(&self) -> String {
        let mut out = String::new();
        match self {
            ConfigBlock::Compiler(compiler) => compiler.serialize_into(&mut out),
            ConfigBlock::Alias(alias) => alias.serialize_into(&mut out),
        }
        out
    }

    /// Parsing BFF text back into a block always fails.
    ///
    /// See [`ConfigError::DeserializeUnsupported`].
    pub fn deserialize(_input: &str) -> ConfigResult<Self> {
        Err(ConfigError::DeserializeUnsupported)
    }

    /// The block's identity: the compiler alias or the alias name.
    pub fn identity(&self) -> &str {
        match self {
            ConfigBlock::Compiler(compiler) => compiler.alias(),
            ConfigBlock::Alias(alias) => alias.name(),
        }
    }
}

impl From<Compiler> for ConfigBlock {
    fn from(compiler: Compiler) -> Self {
        ConfigBlock::Compiler(compiler)
    }
}

impl From<Alias> for ConfigBlock {
    fn from(alias: Alias) -> Self {
        ConfigBlock::Alias(alias)
    }
}

/// Appends `render(current)` plus a newline, but only when it differs from
/// `render(baseline)`.
///
/// Comparison is exact rendered-string equality, not field-value equality:
/// two different values that render identically count as unchanged. That is
/// the contract, not an accident.
pub(crate) fn push_if_changed<T>(
    out: &mut String,
    current: &T,
    baseline: &T,
    render: impl Fn(&T) -> String,
) {
    let line = render(current);
    if line != render(baseline) {
        out.push_str(&line);
        out.push('\n');
    }
}

/// Renders a string list as a brace-delimited, comma-joined, quoted sequence.
pub(crate) fn quoted_list(items: &[String]) -> String {
    let inner = items
        .iter()
        .map(|item| format!("'{item}'"))
        .collect::<Vec<_>>()
        .join(", ");
    format!("{{ {inner} }}")
}
