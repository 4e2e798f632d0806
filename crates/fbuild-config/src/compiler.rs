//! The `Compiler()` block: a toolchain definition.
//!
//! See <https://fastbuild.org/docs/functions/compiler.html> for the engine's
//! own documentation of each property.

use std::sync::LazyLock;

use crate::block::{push_if_changed, quoted_list};

/// Toolchain families the engine knows how to drive.
///
/// By default the engine detects the family from the executable name;
/// setting an explicit family covers renamed or custom toolchains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompilerFamily {
    /// Detect from the executable name.
    #[default]
    Auto,
    Msvc,
    Clang,
    Gcc,
    Snc,
    CodeWarriorWii,
    GreenHillsWiiU,
    CudaNvcc,
    QtRcc,
    Vbcc,
    OrbisWavePsslc,
    /// A tool the engine has no special handling for.
    Custom,
}

impl CompilerFamily {
    /// The BFF spelling of this family.
    ///
    /// Compound names map through a fixed hyphenated table; everything else
    /// is the lowercased variant name.
    pub fn as_bff_str(self) -> &'static str {
        match self {
            CompilerFamily::Auto => "auto",
            CompilerFamily::Msvc => "msvc",
            CompilerFamily::Clang => "clang",
            CompilerFamily::Gcc => "gcc",
            CompilerFamily::Snc => "snc",
            CompilerFamily::CodeWarriorWii => "codewarrior-wii",
            CompilerFamily::GreenHillsWiiU => "greenhills-wiiu",
            CompilerFamily::CudaNvcc => "cuda-nvcc",
            CompilerFamily::QtRcc => "qt-rcc",
            CompilerFamily::Vbcc => "vbcc",
            CompilerFamily::OrbisWavePsslc => "orbis-wave-psslc",
            CompilerFamily::Custom => "custom",
        }
    }
}

/// Baseline instance used purely as the default-diff comparison target.
/// It carries an empty identity and is never serialized as a usable block.
static BASELINE: LazyLock<Compiler> = LazyLock::new(|| Compiler::new(""));

/// A `Compiler()` block.
///
/// Every field has an engine-side default; serialization only emits the
/// fields whose rendering differs from the baseline instance.
#[derive(Debug, Clone, PartialEq)]
pub struct Compiler {
    alias: String,
    /// The primary compiler executable the engine invokes. Required by the
    /// engine; left empty it is simply not emitted.
    pub executable: String,
    /// Extra files mirrored to remote machines for distributed compilation.
    pub extra_files: Vec<String>,
    pub compiler_family: CompilerFamily,
    /// Distributed compilation can be disabled per compiler.
    pub allow_distribution: bool,
    /// Overrides the base path used when replicating the executable and its
    /// extra files on a remote host.
    pub executable_root_path: String,
    /// Treat the single input file as the only dependency, enabling
    /// distribution of tools the engine cannot introspect.
    pub simple_distribution_mode: bool,
    /// Environment variables set for remote compilation.
    pub custom_environment_variables: Vec<String>,
    /// Keep clang's `-frewrite-includes` behavior for preprocessed output.
    pub clang_rewrite_includes: bool,
    /// Work around the VS2012 preprocessed-enum alignment bug.
    pub vs2012_enum_bug_fix: bool,
    /// Overrides the environment for local compiles.
    pub environment: Vec<String>,
    /// Engine-side "Light Caching" cache-lookup mode.
    pub use_light_cache_experimental: bool,
}

impl Compiler {
    /// Creates a compiler block with the given alias and engine defaults for
    /// every field.
    pub fn new(alias: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            executable: String::new(),
            extra_files: Vec::new(),
            compiler_family: CompilerFamily::Auto,
            allow_distribution: true,
            executable_root_path: String::new(),
            simple_distribution_mode: true,
            custom_environment_variables: Vec::new(),
            clang_rewrite_includes: true,
            vs2012_enum_bug_fix: false,
            environment: Vec::new(),
            use_light_cache_experimental: false,
        }
    }

    /// The block identity, fixed at construction.
    pub fn alias(&self) -> &str {
        &self.alias
    }

    /// Sets the compiler executable path.
    pub fn with_executable(mut self, executable: impl Into<String>) -> Self {
        self.executable = executable.into();
        self
    }

    /// Sets the files mirrored for distributed compilation.
    pub fn with_extra_files<I, S>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_files = files.into_iter().map(Into::into).collect();
        self
    }

    /// Sets an explicit compiler family.
    pub fn with_family(mut self, family: CompilerFamily) -> Self {
        self.compiler_family = family;
        self
    }

    /// Enables or disables distributed compilation for this compiler.
    pub fn with_allow_distribution(mut self, allow: bool) -> Self {
        self.allow_distribution = allow;
        self
    }

    /// Overrides the remote replication root.
    pub fn with_executable_root_path(mut self, path: impl Into<String>) -> Self {
        self.executable_root_path = path.into();
        self
    }

    /// Sets simple distribution mode.
    pub fn with_simple_distribution_mode(mut self, simple: bool) -> Self {
        self.simple_distribution_mode = simple;
        self
    }

    /// Sets environment variables for remote compiles.
    pub fn with_custom_environment_variables<I, S>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.custom_environment_variables = vars.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the clang include-rewrite flag.
    pub fn with_clang_rewrite_includes(mut self, rewrite: bool) -> Self {
        self.clang_rewrite_includes = rewrite;
        self
    }

    /// Sets the VS2012 enum bugfix flag.
    pub fn with_vs2012_enum_bug_fix(mut self, fix: bool) -> Self {
        self.vs2012_enum_bug_fix = fix;
        self
    }

    /// Overrides the environment for local compiles.
    pub fn with_environment<I, S>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.environment = vars.into_iter().map(Into::into).collect();
        self
    }

    /// Enables the experimental light-cache mode.
    pub fn with_light_cache(mut self, enabled: bool) -> Self {
        self.use_light_cache_experimental = enabled;
        self
    }

    /// Field order here is the emission order and must stay stable.
    pub(crate) fn serialize_into(&self, out: &mut String) {
        let baseline = &*BASELINE;
        out.push_str(&format!("Compiler( '{}' )\n", self.alias));
        out.push_str("{\n");
        push_if_changed(out, self, baseline, |c| {
            format!("  .Executable = '{}'", c.executable)
        });
        push_if_changed(out, self, baseline, |c| {
            format!("  .ExtraFiles = {}", quoted_list(&c.extra_files))
        });
        push_if_changed(out, self, baseline, |c| {
            format!("  .CompilerFamily = '{}'", c.compiler_family.as_bff_str())
        });
        push_if_changed(out, self, baseline, |c| {
            format!("  .AllowDistribution = {}", c.allow_distribution)
        });
        push_if_changed(out, self, baseline, |c| {
            format!("  .ExecutableRootPath = '{}'", c.executable_root_path)
        });
        push_if_changed(out, self, baseline, |c| {
            format!("  .SimpleDistributionMode = {}", c.simple_distribution_mode)
        });
        push_if_changed(out, self, baseline, |c| {
            format!(
                "  .CustomEnvironmentVariables = {}",
                quoted_list(&c.custom_environment_variables)
            )
        });
        push_if_changed(out, self, baseline, |c| {
            format!("  .ClangRewriteIncludes = {}", c.clang_rewrite_includes)
        });
        push_if_changed(out, self, baseline, |c| {
            format!("  .VS2012EnumBugFix = {}", c.vs2012_enum_bug_fix)
        });
        push_if_changed(out, self, baseline, |c| {
            format!("  .Environment = {}", quoted_list(&c.environment))
        });
        push_if_changed(out, self, baseline, |c| {
            format!(
                "  .UseLightCache_Experimental = {}",
                c.use_light_cache_experimental
            )
        });
        out.push_str("}\n");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ConfigBlock;

    #[test]
    fn default_compiler_emits_no_field_lines() {
        let block: ConfigBlock = Compiler::new("cc").into();
        assert_eq!(block.serialize(), "Compiler( 'cc' )\n{\n}\n");
    }

    #[test]
    fn changed_fields_are_emitted_once_in_order() {
        let block: ConfigBlock = Compiler::new("Compiler-Clang")
            .with_executable("/usr/bin/clang++")
            .with_family(CompilerFamily::Clang)
            .with_allow_distribution(false)
            .into();

        let text = block.serialize();
        assert_eq!(
            text,
            "Compiler( 'Compiler-Clang' )\n\
             {\n\
             \x20 .Executable = '/usr/bin/clang++'\n\
             \x20 .CompilerFamily = 'clang'\n\
             \x20 .AllowDistribution = false\n\
             }\n"
        );
        assert_eq!(text.matches(".Executable").count(), 1);
    }

    #[test]
    fn booleans_render_lowercase() {
        let block: ConfigBlock = Compiler::new("cc").with_vs2012_enum_bug_fix(true).into();
        assert!(block.serialize().contains(".VS2012EnumBugFix = true"));
    }

    #[test]
    fn lists_render_comma_joined_and_quoted() {
        let block: ConfigBlock = Compiler::new("cc")
            .with_extra_files(["a.dll", "b.dll"])
            .into();
        assert!(
            block
                .serialize()
                .contains(".ExtraFiles = { 'a.dll', 'b.dll' }")
        );
    }

    #[test]
    fn family_translation_table() {
        let table = [
            (CompilerFamily::Auto, "auto"),
            (CompilerFamily::Msvc, "msvc"),
            (CompilerFamily::Clang, "clang"),
            (CompilerFamily::Gcc, "gcc"),
            (CompilerFamily::Snc, "snc"),
            (CompilerFamily::CodeWarriorWii, "codewarrior-wii"),
            (CompilerFamily::GreenHillsWiiU, "greenhills-wiiu"),
            (CompilerFamily::CudaNvcc, "cuda-nvcc"),
            (CompilerFamily::QtRcc, "qt-rcc"),
            (CompilerFamily::Vbcc, "vbcc"),
            (CompilerFamily::OrbisWavePsslc, "orbis-wave-psslc"),
            (CompilerFamily::Custom, "custom"),
        ];
        for (family, spelling) in table {
            assert_eq!(family.as_bff_str(), spelling);
        }
    }

    #[test]
    fn resetting_a_field_to_its_default_suppresses_it_again() {
        let compiler = Compiler::new("cc").with_executable("/usr/bin/cc");
        assert!(
            ConfigBlock::from(compiler.clone())
                .serialize()
                .contains(".Executable")
        );

        let reverted = compiler.with_executable("");
        assert!(
            !ConfigBlock::from(reverted)
                .serialize()
                .contains(".Executable")
        );
    }
}
