//! The generated configuration file as an ordered collection of blocks.

use std::path::{Path, PathBuf};

use crate::block::ConfigBlock;
use crate::error::{ConfigError, ConfigResult};

/// The file name the engine looks for. The runner refuses any other name.
pub const CONFIG_FILE_NAME: &str = "FBuild.bff";

const BANNER: &str = "//-----------------------------//\n\
                      // This file is auto-generated //\n\
                      //-----------------------------//\n\n";

/// An ordered, append-only collection of configuration blocks.
///
/// Insertion order is serialization order and is significant: later blocks
/// may reference earlier aliases by name. The document has no internal
/// locking; it assumes a single writer during the build-up phase and becomes
/// read-only once rendered or saved.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigDocument {
    blocks: Vec<ConfigBlock>,
}

impl ConfigDocument {
    /// Creates an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loading an existing BFF file back into a document always fails.
    ///
    /// Same contract as [`ConfigBlock::deserialize`]: generated files are
    /// write-only from the model's point of view.
    pub fn load(_path: impl AsRef<Path>) -> ConfigResult<Self> {
        Err(ConfigError::DeserializeUnsupported)
    }

    /// Appends a block unconditionally.
    pub fn push(&mut self, block: impl Into<ConfigBlock>) {
        self.blocks.push(block.into());
    }

    /// Appends a block unless a structurally equal one is already present.
    ///
    /// Returns `false` and leaves the document unchanged on rejection.
    /// Equality is field-by-field; two distinct blocks that share a kind and
    /// identity are both kept.
    pub fn try_push(&mut self, block: impl Into<ConfigBlock>) -> bool {
        let block = block.into();
        if self.blocks.contains(&block) {
            return false;
        }
        self.blocks.push(block);
        true
    }

    /// The blocks in insertion order.
    pub fn blocks(&self) -> &[ConfigBlock] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Renders the whole document: the generated-file banner, then each
    /// block in insertion order followed by a blank line.
    pub fn render(&self) -> String {
        let mut out = String::from(BANNER);
        for block in &self.blocks {
            out.push_str(&block.serialize());
            out.push('\n');
        }
        out
    }

    /// Writes the rendered document as `FBuild.bff` inside `dir`.
    ///
    /// The document is rendered to memory first and written with a single
    /// bulk write, so a concurrent reader sees either the old file or the
    /// complete new one, never a truncated mix. Filesystem errors propagate
    /// unmodified.
    pub fn save_to_dir(&self, dir: impl AsRef<Path>) -> ConfigResult<PathBuf> {
        let path = dir.as_ref().join(CONFIG_FILE_NAME);
        std::fs::write(&path, self.render())?;
        tracing::debug!(
            path = %path.display(),
            blocks = self.blocks.len(),
            "wrote generated config"
        );
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Alias, Compiler};

    #[test]
    fn empty_document_is_just_the_banner() {
        let document = ConfigDocument::new();
        assert_eq!(document.render(), BANNER);
        assert!(document.is_empty());
    }

    #[test]
    fn blocks_render_in_insertion_order_with_blank_separators() {
        let mut document = ConfigDocument::new();
        document.push(Compiler::new("cc").with_executable("/usr/bin/cc"));
        document.push(Alias::new("all").with_targets(["cc"]));

        let text = document.render();
        assert!(text.starts_with(BANNER));

        let compiler_at = text.find("Compiler( 'cc' )").unwrap();
        let alias_at = text.find("Alias( 'all' )").unwrap();
        assert!(compiler_at < alias_at);
        assert!(text.contains("}\n\nAlias"));
        assert!(text.ends_with("}\n\n"));
    }

    #[test]
    fn try_push_rejects_structural_duplicates() {
        let mut document = ConfigDocument::new();
        assert!(document.try_push(Alias::new("all")));
        assert!(!document.try_push(Alias::new("all")));
        assert_eq!(document.len(), 1);

        // Same identity but different fields is not a duplicate.
        assert!(document.try_push(Alias::new("all").with_hidden(true)));
        assert_eq!(document.len(), 2);
    }

    #[test]
    fn save_writes_the_rendered_bytes_under_the_fixed_name() {
        let dir = tempfile::tempdir().unwrap();

        let mut document = ConfigDocument::new();
        document.push(Alias::new("all").with_targets(["everything"]));

        let path = document.save_to_dir(dir.path()).unwrap();
        assert_eq!(path.file_name().unwrap(), CONFIG_FILE_NAME);

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, document.render());
    }

    #[test]
    fn save_replaces_an_existing_file_completely() {
        let dir = tempfile::tempdir().unwrap();
        let stale = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&stale, "old content that is much longer than the replacement").unwrap();

        let document = ConfigDocument::new();
        let path = document.save_to_dir(dir.path()).unwrap();

        assert_eq!(path, stale);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), document.render());
    }

    #[test]
    fn load_is_unsupported_even_for_a_file_we_just_wrote() {
        let dir = tempfile::tempdir().unwrap();
        let path = ConfigDocument::new().save_to_dir(dir.path()).unwrap();

        let err = ConfigDocument::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::DeserializeUnsupported));
    }

    #[test]
    fn save_propagates_filesystem_errors() {
        let document = ConfigDocument::new();
        let err = document
            .save_to_dir("/nonexistent/directory/for/fbuild")
            .unwrap_err();
        assert!(matches!(err, crate::ConfigError::Io(_)));
    }
}
