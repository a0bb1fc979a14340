use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntryInfo {
    pub name: String,
    pub is_file: bool,
}

impl DirEntryInfo {
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_file: true,
        }
    }

    pub fn dir(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_file: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
    Csv,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameSettings {
    pub directory: PathBuf,
    pub prefix: String,
    pub suffix: String,
    pub numbered: bool,
    pub start: usize,
    pub pad: usize,
}

impl RenameSettings {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            prefix: String::new(),
            suffix: String::new(),
            numbered: false,
            start: 1,
            pad: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameOperation {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, Default)]
pub struct RenamePlan {
    pub directory: PathBuf,
    pub operations: Vec<RenameOperation>,
    pub unchanged: Vec<String>,
    pub skipped: Vec<String>,
    /// 目標名稱與其他來源重疊時，需先搬到暫存名稱
    pub needs_staging: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombineSettings {
    pub inputs: Vec<PathBuf>,
    pub output: PathBuf,
    pub overwrite: bool,
}

#[derive(Debug, Clone)]
pub struct CombinePlan {
    pub inputs: Vec<PathBuf>,
    pub output: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzeSettings {
    pub file: PathBuf,
    pub top: usize,
    pub format: ReportFormat,
    pub exclude_stopwords: bool,
    pub extra_stopwords: Vec<String>,
    pub output: Option<PathBuf>,
}

impl AnalyzeSettings {
    pub fn new(file: impl Into<PathBuf>) -> Self {
        Self {
            file: file.into(),
            top: 10,
            format: ReportFormat::Text,
            exclude_stopwords: false,
            extra_stopwords: Vec::new(),
            output: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AnalyzePlan {
    pub source: PathBuf,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordCount {
    pub word: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextReport {
    pub source: String,
    pub generated_at: DateTime<Utc>,
    pub bytes: usize,
    pub characters: usize,
    pub lines: usize,
    pub blank_lines: usize,
    pub words: usize,
    pub unique_words: usize,
    pub sentences: usize,
    pub paragraphs: usize,
    pub average_word_length: f64,
    pub longest_line: usize,
    pub top_words: Vec<WordCount>,
}

#[derive(Debug, Clone)]
pub struct Outcome {
    pub tool: &'static str,
    pub lines: Vec<String>,
    pub artifact: Option<PathBuf>,
    pub dry_run: bool,
}

impl Outcome {
    pub fn new(tool: &'static str, lines: Vec<String>) -> Self {
        Self {
            tool,
            lines,
            artifact: None,
            dry_run: false,
        }
    }

    pub fn with_artifact(mut self, artifact: PathBuf) -> Self {
        self.artifact = Some(artifact);
        self
    }

    pub fn dry_run(tool: &'static str, lines: Vec<String>) -> Self {
        Self {
            tool,
            lines,
            artifact: None,
            dry_run: true,
        }
    }
}
