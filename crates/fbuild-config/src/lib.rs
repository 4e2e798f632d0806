//! Typed configuration model for the FASTBuild engine.
//!
//! FASTBuild is driven by a single BFF text file (`FBuild.bff`). This crate
//! models that file as an ordered collection of typed configuration blocks
//! and renders it deterministically, emitting only the fields that differ
//! from the engine's own defaults so generated files stay small and
//! diff-friendly.
//!
//! Deserialization is intentionally unsupported: generated files are owned
//! by the generator, never parsed back. [`ConfigBlock::deserialize`] always
//! fails with [`ConfigError::DeserializeUnsupported`].
//!
//! # Example
//!
//! ```
//! use fbuild_config::{Alias, Compiler, CompilerFamily, ConfigDocument};
//!
//! let mut document = ConfigDocument::new();
//! document.push(
//!     Compiler::new("Compiler-Clang")
//!         .with_executable("/usr/bin/clang++")
//!         .with_family(CompilerFamily::Clang),
//! );
//! document.push(Alias::new("all").with_targets(["Compiler-Clang"]));
//!
//! let bff = document.render();
//! assert!(bff.starts_with("//"));
//! ```

mod alias;
mod block;
mod compiler;
mod document;
mod error;

pub use alias::Alias;
pub use block::ConfigBlock;
pub use compiler::{Compiler, CompilerFamily};
pub use document::{CONFIG_FILE_NAME, ConfigDocument};
pub use error::{ConfigError, ConfigResult};
