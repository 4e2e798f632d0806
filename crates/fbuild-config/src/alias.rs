//! The `Alias()` block: a named grouping of build targets.

use crate::block::quoted_list;

/// An `Alias()` block.
///
/// Aliases name one or more previously defined nodes so they can be
/// referenced from other blocks or from the engine's command line. The
/// engine expects at least one target; that is not enforced here.
#[derive(Debug, Clone, PartialEq)]
pub struct Alias {
    name: String,
    /// The nodes this alias refers to, in order.
    pub targets: Vec<String>,
    /// Hides the alias from the engine's `-showtargets` listing.
    pub hidden: bool,
}

impl Alias {
    /// Creates an alias block with the given name and no targets.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            targets: Vec::new(),
            hidden: false,
        }
    }

    /// The block identity, fixed at construction.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sets the target list.
    pub fn with_targets<I, S>(mut self, targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.targets = targets.into_iter().map(Into::into).collect();
        self
    }

    /// Hides the alias from target listings.
    pub fn with_hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    // Targets and Hidden are always emitted; neither has a default-diff.
    pub(crate) fn serialize_into(&self, out: &mut String) {
        out.push_str(&format!("Alias( '{}' )\n", self.name));
        out.push_str("{\n");
        out.push_str(&format!("  .Targets = {}\n", quoted_list(&self.targets)));
        out.push_str(&format!("  .Hidden = {}\n", self.hidden));
        out.push_str("}\n");
    }
}
