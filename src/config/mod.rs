pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use args::*;

#[cfg(feature = "cli")]
mod args {
    use super::toml_config::{
        TomlConfig, DEFAULT_COMBINE_OUTPUT, DEFAULT_TOP_WORDS, MAX_RENAME_START,
    };
    use crate::domain::model::{
        AnalyzeSettings, CombineSettings, LogFormat, RenameSettings, ReportFormat,
    };
    use crate::utils::error::{Result, ToolboxError};
    use crate::utils::logger::LoggerOptions;
    use crate::utils::validation::{self, Validate};
    use clap::{Args, Parser, Subcommand};
    use std::path::PathBuf;

    #[derive(Debug, Clone, Parser)]
    #[command(name = "file-toolbox")]
    #[command(version, about = "A modular command-line toolbox for everyday file chores")]
    pub struct CliConfig {
        /// Enable verbose output
        #[arg(short, long, global = true)]
        pub verbose: bool,

        /// Path to a TOML configuration file (defaults to ./toolbox.toml when present)
        #[arg(short, long, global = true)]
        pub config: Option<PathBuf>,

        /// Show what would happen without touching any file
        #[arg(long, global = true)]
        pub dry_run: bool,

        /// Log CPU and memory usage for each phase
        #[arg(long, global = true)]
        pub monitor: bool,

        /// Log output format
        #[arg(long, global = true, value_enum)]
        pub log_format: Option<LogFormat>,

        #[command(subcommand)]
        pub command: Command,
    }

    #[derive(Debug, Clone, Subcommand)]
    pub enum Command {
        /// Batch rename files
        Rename(RenameArgs),

        /// Combine PDF files
        Combine(CombineArgs),

        /// Analyze a text file
        Analyze(AnalyzeArgs),
    }

    #[derive(Debug, Clone, Args)]
    pub struct RenameArgs {
        /// Directory containing the files to rename
        pub directory: PathBuf,

        /// Prefix to add to each file
        #[arg(long)]
        pub prefix: Option<String>,

        /// Suffix to add to each file (before the extension)
        #[arg(long)]
        pub suffix: Option<String>,

        /// Replace file names with sequential numbers
        #[arg(long)]
        pub numbered: bool,

        /// First number used with --numbered
        #[arg(long)]
        pub start: Option<usize>,

        /// Zero-pad numbers to this many digits
        #[arg(long)]
        pub pad: Option<usize>,
    }

    #[derive(Debug, Clone, Args)]
    pub struct CombineArgs {
        /// PDF files, or directories whose PDF files are combined in name order
        #[arg(required = true, num_args = 1..)]
        pub inputs: Vec<PathBuf>,

        /// Output PDF path
        #[arg(short, long)]
        pub output: Option<PathBuf>,

        /// Replace the output file if it already exists
        #[arg(long)]
        pub overwrite: bool,
    }

    #[derive(Debug, Clone, Args)]
    pub struct AnalyzeArgs {
        /// Text file to analyze
        pub file: PathBuf,

        /// Number of most frequent words to report
        #[arg(long)]
        pub top: Option<usize>,

        /// Report format
        #[arg(long, value_enum)]
        pub format: Option<ReportFormat>,

        /// Exclude common English stopwords from the word ranking
        #[arg(long)]
        pub stopwords: bool,

        /// Write the report to this file instead of stdout
        #[arg(short, long)]
        pub output: Option<PathBuf>,
    }

    impl CliConfig {
        pub fn logger_options(&self, file: &TomlConfig) -> LoggerOptions {
            LoggerOptions {
                verbose: self.verbose,
                format: self.log_format.or(file.log_format()).unwrap_or_default(),
                level: file.log_level().map(str::to_string),
            }
        }

        pub fn monitor_enabled(&self, file: &TomlConfig) -> bool {
            self.monitor || file.monitoring_enabled()
        }
    }

    // 優先順序：命令列 > 設定檔 > 預設值
    impl RenameArgs {
        pub fn resolve(&self, file: &TomlConfig) -> RenameSettings {
            let defaults = file.rename();
            RenameSettings {
                directory: self.directory.clone(),
                prefix: self.prefix.clone().or(defaults.prefix).unwrap_or_default(),
                suffix: self.suffix.clone().or(defaults.suffix).unwrap_or_default(),
                numbered: self.numbered || defaults.numbered.unwrap_or(false),
                start: self.start.or(defaults.start).unwrap_or(1),
                pad: self.pad.or(defaults.pad).unwrap_or(0),
            }
        }
    }

    impl CombineArgs {
        pub fn resolve(&self, file: &TomlConfig) -> CombineSettings {
            let defaults = file.combine();
            CombineSettings {
                inputs: self.inputs.clone(),
                output: self
                    .output
                    .clone()
                    .or(defaults.output)
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_COMBINE_OUTPUT)),
                overwrite: self.overwrite || defaults.overwrite.unwrap_or(false),
            }
        }
    }

    impl AnalyzeArgs {
        pub fn resolve(&self, file: &TomlConfig) -> AnalyzeSettings {
            let defaults = file.analyze();
            AnalyzeSettings {
                file: self.file.clone(),
                top: self.top.or(defaults.top).unwrap_or(DEFAULT_TOP_WORDS),
                format: self.format.or(defaults.format).unwrap_or_default(),
                exclude_stopwords: self.stopwords || defaults.exclude_stopwords.unwrap_or(false),
                extra_stopwords: defaults.extra_stopwords.unwrap_or_default(),
                output: self.output.clone(),
            }
        }
    }

    impl Validate for RenameSettings {
        fn validate(&self) -> Result<()> {
            validation::validate_path("directory", &self.directory)?;
            validation::validate_name_fragment("prefix", &self.prefix)?;
            validation::validate_name_fragment("suffix", &self.suffix)?;
            validation::validate_range("start", self.start, 0, MAX_RENAME_START)?;
            validation::validate_range("pad", self.pad, 0, 32)?;

            if !self.numbered && self.prefix.is_empty() && self.suffix.is_empty() {
                return Err(ToolboxError::NothingToDo {
                    message: "no prefix, suffix or numbering requested".to_string(),
                });
            }
            Ok(())
        }
    }

    impl Validate for CombineSettings {
        fn validate(&self) -> Result<()> {
            if self.inputs.is_empty() {
                return Err(ToolboxError::ValidationError {
                    message: "at least one input is required".to_string(),
                });
            }
            for input in &self.inputs {
                validation::validate_path("inputs", input)?;
            }
            validation::validate_path("output", &self.output)?;
            validation::validate_file_extensions("output", &[&self.output], &["pdf"])
        }
    }

    impl Validate for AnalyzeSettings {
        fn validate(&self) -> Result<()> {
            validation::validate_path("file", &self.file)?;
            validation::validate_range("top", self.top, 1, 1000)?;
            if let Some(output) = &self.output {
                validation::validate_path("output", output)?;
            }
            Ok(())
        }
    }

}
