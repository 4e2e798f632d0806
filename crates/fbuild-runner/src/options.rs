//! One build invocation, described as data.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// How the engine uses its object cache for this invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheMode {
    /// No cache flag is passed.
    #[default]
    None,
    /// `-cacheread`: consume cache entries, never publish.
    Read,
    /// `-cachewrite`: publish cache entries, never consume.
    Write,
    /// `-cache`: read and write.
    ReadWrite,
}

/// Options for one engine invocation. Build it once, then hand it to
/// [`FBuildRunner`](crate::FBuildRunner); the runner never mutates it.
///
/// Field declaration order below is the exact order flags are emitted in,
/// which tooling that diffs invocation strings relies on.
///
/// No cross-field validation is performed: combinations the engine itself
/// documents as conflicting (`force_remote` alongside cache flags, for
/// instance) are passed through mechanically.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StartOptions {
    /// Path to the engine executable.
    pub executable: PathBuf,
    /// Path to the generated config file; must be named `FBuild.bff`.
    pub config_file: PathBuf,
    /// Object cache mode.
    pub cache_mode: CacheMode,
    /// `-cacheinfo`: emit cache usage diagnostics.
    pub cache_info: bool,
    /// `-cachetrim <n>`: trim the cache to `n` MiB. 0 means unset.
    pub cache_trim: u32,
    /// `-cacheverbose`: verbose cache interaction logging.
    pub cache_verbose: bool,
    /// `-clean`: force a clean build.
    pub clean: bool,
    /// `-compdb`: export a JSON compilation database instead of building.
    pub export_compilation_database: bool,
    /// `-dist`: enable distributed compilation.
    pub distributed: bool,
    /// `-distverbose`: verbose distributed-compilation logging.
    pub dist_verbose: bool,
    /// `-forceremote`: only build on remote workers.
    pub force_remote: bool,
    /// `-report`: generate a build report on completion.
    pub report: bool,
    /// `-showcmds`: print the commands passed to each tool.
    pub show_commands: bool,
    /// `-showtargets`: list non-hidden targets.
    pub show_targets: bool,
    /// `-showalltargets`: list all targets, hidden included.
    pub show_all_targets: bool,
    /// `-summary`: print a summary after the build.
    pub summary: bool,
    /// `-verbose`: detailed build output.
    pub verbose: bool,
}

impl StartOptions {
    /// Creates options for the given engine executable and config file with
    /// every toggle off.
    pub fn new(executable: impl Into<PathBuf>, config_file: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
            config_file: config_file.into(),
            ..Self::default()
        }
    }

    /// Synthesizes the engine's command line, one entry per argv token.
    ///
    /// Purely mechanical: each enabled toggle contributes its fixed flag in
    /// field-declaration order, disabled toggles contribute nothing, and no
    /// flag combination is validated.
    pub fn to_arguments(&self) -> Vec<String> {
        let mut args: Vec<String> = Vec::new();
        match self.cache_mode {
            CacheMode::None => {}
            CacheMode::Read => args.push("-cacheread".into()),
            CacheMode::Write => args.push("-cachewrite".into()),
            CacheMode::ReadWrite => args.push("-cache".into()),
        }
        if self.cache_info {
            args.push("-cacheinfo".into());
        }
        if self.cache_trim > 0 {
            args.push("-cachetrim".into());
            args.push(self.cache_trim.to_string());
        }
        if self.cache_verbose {
            args.push("-cacheverbose".into());
        }
        if self.clean {
            args.push("-clean".into());
        }
        if self.export_compilation_database {
            args.push("-compdb".into());
        }
        if self.distributed {
            args.push("-dist".into());
        }
        if self.dist_verbose {
            args.push("-distverbose".into());
        }
        if self.force_remote {
            args.push("-forceremote".into());
        }
        if self.report {
            args.push("-report".into());
        }
        if self.show_commands {
            args.push("-showcmds".into());
        }
        if self.show_targets {
            args.push("-showtargets".into());
        }
        if self.show_all_targets {
            args.push("-showalltargets".into());
        }
        if self.summary {
            args.push("-summary".into());
        }
        if self.verbose {
            args.push("-verbose".into());
        }
        args
    }
}
