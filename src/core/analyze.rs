use crate::domain::model::{
    AnalyzePlan, AnalyzeSettings, Outcome, ReportFormat, TextReport, WordCount,
};
use crate::domain::ports::{PlanDescription, Storage, Tool};
use crate::utils::error::{Result, ToolboxError};
use async_trait::async_trait;
use chrono::Utc;
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

const TOOL_NAME: &str = "analyze";

static WORD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\p{L}\p{N}]+(?:['’][\p{L}\p{N}]+)*").expect("word pattern is valid")
});

static SENTENCE_END_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]+(?:\s+|$)").expect("sentence pattern is valid"));

pub const STOPWORDS: &[&str] = &[
    "a", "about", "after", "all", "also", "an", "and", "any", "are", "as", "at", "be", "been",
    "but", "by", "can", "could", "do", "does", "for", "from", "had", "has", "have", "he", "her",
    "his", "how", "i", "if", "in", "into", "is", "it", "its", "it's", "more", "most", "no",
    "not", "of", "on", "one", "or", "other", "our", "she", "so", "some", "such", "than", "that",
    "the", "their", "them", "then", "there", "these", "they", "this", "to", "up", "us", "was",
    "we", "were", "what", "when", "which", "who", "will", "with", "would", "you", "your",
];

pub fn analyze_text(source: &str, text: &str, settings: &AnalyzeSettings) -> TextReport {
    let mut lines = 0;
    let mut blank_lines = 0;
    let mut paragraphs = 0;
    let mut longest_line = 0;
    let mut in_paragraph = false;

    for line in text.lines() {
        lines += 1;
        longest_line = longest_line.max(line.chars().count());
        if line.trim().is_empty() {
            blank_lines += 1;
            in_paragraph = false;
        } else if !in_paragraph {
            paragraphs += 1;
            in_paragraph = true;
        }
    }

    let words: Vec<String> = WORD_RE
        .find_iter(text)
        .map(|m| m.as_str().to_lowercase())
        .collect();
    let word_chars: usize = words.iter().map(|w| w.chars().count()).sum();

    let mut frequencies: HashMap<&str, usize> = HashMap::new();
    for word in &words {
        *frequencies.entry(word.as_str()).or_default() += 1;
    }
    let unique_words = frequencies.len();

    let excluded: HashSet<String> = if settings.exclude_stopwords {
        STOPWORDS
            .iter()
            .map(|w| w.to_string())
            .chain(settings.extra_stopwords.iter().map(|w| w.to_lowercase()))
            .collect()
    } else {
        HashSet::new()
    };

    let mut top_words: Vec<WordCount> = frequencies
        .into_iter()
        .filter(|(word, _)| !excluded.contains(*word))
        .map(|(word, count)| WordCount {
            word: word.to_string(),
            count,
        })
        .collect();
    top_words.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.word.cmp(&b.word)));
    top_words.truncate(settings.top);

    let sentences = SENTENCE_END_RE
        .split(text)
        .filter(|segment| WORD_RE.is_match(segment))
        .count();

    TextReport {
        source: source.to_string(),
        generated_at: Utc::now(),
        bytes: text.len(),
        characters: text.chars().count(),
        lines,
        blank_lines,
        words: words.len(),
        unique_words,
        sentences,
        paragraphs,
        average_word_length: if words.is_empty() {
            0.0
        } else {
            word_chars as f64 / words.len() as f64
        },
        longest_line,
        top_words,
    }
}

fn summary_rows(report: &TextReport) -> Vec<(&'static str, String)> {
    vec![
        ("bytes", report.bytes.to_string()),
        ("characters", report.characters.to_string()),
        ("lines", report.lines.to_string()),
        ("blank_lines", report.blank_lines.to_string()),
        ("words", report.words.to_string()),
        ("unique_words", report.unique_words.to_string()),
        ("sentences", report.sentences.to_string()),
        ("paragraphs", report.paragraphs.to_string()),
        (
            "average_word_length",
            format!("{:.2}", report.average_word_length),
        ),
        ("longest_line", report.longest_line.to_string()),
    ]
}

pub fn render_report(report: &TextReport, format: ReportFormat) -> Result<String> {
    match format {
        ReportFormat::Text => {
            let mut lines = vec![format!("File: {}", report.source)];
            for (key, value) in summary_rows(report) {
                lines.push(format!("{}: {}", key.replace('_', " "), value));
            }
            if !report.top_words.is_empty() {
                lines.push("top words:".to_string());
                for (rank, entry) in report.top_words.iter().enumerate() {
                    lines.push(format!("  {}. {} ({})", rank + 1, entry.word, entry.count));
                }
            }
            Ok(lines.join("\n"))
        }
        ReportFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        ReportFormat::Csv => {
            let mut writer = csv::Writer::from_writer(Vec::new());
            writer.write_record(["section", "key", "value"])?;
            for (key, value) in summary_rows(report) {
                writer.write_record(["summary", key, value.as_str()])?;
            }
            for entry in &report.top_words {
                writer.write_record([
                    "top_word",
                    entry.word.as_str(),
                    entry.count.to_string().as_str(),
                ])?;
            }
            let data = writer.into_inner().map_err(|e| ToolboxError::ProcessingError {
                message: format!("Failed to flush CSV report: {}", e),
            })?;
            String::from_utf8(data).map_err(|e| ToolboxError::ProcessingError {
                message: format!("CSV report is not valid UTF-8: {}", e),
            })
        }
    }
}

impl PlanDescription for AnalyzePlan {
    fn item_count(&self) -> usize {
        1
    }

    fn describe(&self) -> Vec<String> {
        vec![format!(
            "Would analyze '{}' ({} bytes)",
            self.source.display(),
            self.text.len()
        )]
    }
}

pub struct AnalyzeTool<S: Storage> {
    storage: S,
    settings: AnalyzeSettings,
}

impl<S: Storage> AnalyzeTool<S> {
    pub fn new(storage: S, settings: AnalyzeSettings) -> Self {
        Self { storage, settings }
    }
}

#[async_trait]
impl<S: Storage> Tool for AnalyzeTool<S> {
    type Plan = AnalyzePlan;

    fn name(&self) -> &'static str {
        TOOL_NAME
    }

    async fn plan(&self) -> Result<AnalyzePlan> {
        let source = self.settings.file.clone();
        let data = self.storage.read_file(&source).await?;
        let text = String::from_utf8(data).map_err(|_| ToolboxError::Encoding {
            path: source.display().to_string(),
        })?;
        if text.is_empty() {
            tracing::warn!("'{}' is empty", source.display());
        }
        Ok(AnalyzePlan { source, text })
    }

    async fn apply(&self, plan: AnalyzePlan) -> Result<Outcome> {
        let source = plan.source.display().to_string();
        let report = analyze_text(&source, &plan.text, &self.settings);
        tracing::debug!(
            "Analyzed '{}': {} words, {} lines",
            source,
            report.words,
            report.lines
        );
        let rendered = render_report(&report, self.settings.format)?;

        match &self.settings.output {
            Some(output) => {
                let mut data = rendered.into_bytes();
                if !data.ends_with(b"\n") {
                    data.push(b'\n');
                }
                self.storage.write_file(output, &data).await?;
                Ok(Outcome::new(
                    TOOL_NAME,
                    vec![format!("Report written to '{}'", output.display())],
                )
                .with_artifact(output.clone()))
            }
            None => Ok(Outcome::new(
                TOOL_NAME,
                rendered.lines().map(str::to_string).collect(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::mock_storage::MockStorage;
    use crate::core::ToolboxEngine;
    use std::path::PathBuf;

    const PASSAGE: &str = "Data science turns raw data into insight.\n\
Python is the language most data teams reach for!\n\
\n\
Why? Because Python's libraries make data work fast.\n";

    #[test]
    fn test_counts() {
        let report = analyze_text("passage.txt", PASSAGE, &AnalyzeSettings::new("passage.txt"));

        assert_eq!(report.bytes, PASSAGE.len());
        assert_eq!(report.lines, 4);
        assert_eq!(report.blank_lines, 1);
        assert_eq!(report.paragraphs, 2);
        assert_eq!(report.sentences, 4);
        assert_eq!(report.words, 24);
        assert_eq!(report.longest_line, 52);
        assert_eq!(
            report.top_words[0],
            WordCount {
                word: "data".to_string(),
                count: 4
            }
        );
        assert_eq!(report.top_words.len(), 10);
        assert_eq!(report.unique_words, 21);

        // 排行不截斷時，帶撇號的字仍是同一個字
        let mut settings = AnalyzeSettings::new("passage.txt");
        settings.top = 100;
        let report = analyze_text("passage.txt", PASSAGE, &settings);
        assert_eq!(report.top_words.len(), report.unique_words);
        assert!(report
            .top_words
            .iter()
            .any(|w| w.word == "python's" && w.count == 1));
    }

    #[test]
    fn test_apostrophes_join_words() {
        let text = "Don't stop. don't STOP, they'd say";
        let report = analyze_text("t.txt", text, &AnalyzeSettings::new("t.txt"));
        assert_eq!(report.words, 6);
        assert_eq!(report.unique_words, 4);
        let counts: Vec<(&str, usize)> = report
            .top_words
            .iter()
            .map(|w| (w.word.as_str(), w.count))
            .collect();
        assert_eq!(
            counts,
            vec![("don't", 2), ("stop", 2), ("say", 1), ("they'd", 1)]
        );

        let curly = analyze_text("t.txt", "It’s fine", &AnalyzeSettings::new("t.txt"));
        assert_eq!(curly.words, 2);
        assert!(curly.top_words.iter().any(|w| w.word == "it’s"));
    }

    #[test]
    fn test_stopwords_and_top_limit() {
        let text = "the the the cat and the dog and a bird";
        let mut settings = AnalyzeSettings::new("t.txt");
        settings.top = 2;
        let report = analyze_text("t.txt", text, &settings);
        assert_eq!(report.top_words.len(), 2);
        assert_eq!(report.top_words[0].word, "the");
        assert_eq!(report.top_words[1].word, "and");

        settings.exclude_stopwords = true;
        settings.extra_stopwords = vec!["Cat".to_string()];
        settings.top = 10;
        let report = analyze_text("t.txt", text, &settings);
        let words: Vec<&str> = report.top_words.iter().map(|w| w.word.as_str()).collect();
        assert_eq!(words, vec!["bird", "dog"]);
        // 停用字只影響排行，不影響總數
        assert_eq!(report.words, 10);
        assert_eq!(report.unique_words, 6);
    }

    #[test]
    fn test_empty_text() {
        let report = analyze_text("empty.txt", "", &AnalyzeSettings::new("empty.txt"));
        assert_eq!(report.words, 0);
        assert_eq!(report.lines, 0);
        assert_eq!(report.sentences, 0);
        assert_eq!(report.paragraphs, 0);
        assert_eq!(report.average_word_length, 0.0);
        assert!(report.top_words.is_empty());
    }

    #[test]
    fn test_render_csv_and_json() {
        let report = analyze_text("t.txt", "Hello hello world.", &AnalyzeSettings::new("t.txt"));

        let csv = render_report(&report, ReportFormat::Csv).unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("section,key,value"));
        assert!(csv.contains("summary,words,3"));
        assert!(csv.contains("top_word,hello,2"));

        let json = render_report(&report, ReportFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["words"], 3);
        assert_eq!(value["top_words"][0]["word"], "hello");

        let text = render_report(&report, ReportFormat::Text).unwrap();
        assert!(text.starts_with("File: t.txt"));
        assert!(text.contains("  1. hello (2)"));
    }

    #[tokio::test]
    async fn test_report_written_to_output() {
        let storage = MockStorage::new();
        storage.add_file("notes.txt", PASSAGE.as_bytes()).await;

        let mut settings = AnalyzeSettings::new("notes.txt");
        settings.format = ReportFormat::Json;
        settings.output = Some(PathBuf::from("reports/notes.json"));

        let tool = AnalyzeTool::new(storage.clone(), settings);
        let outcome = ToolboxEngine::new(tool).run().await.unwrap();

        assert_eq!(outcome.lines, vec!["Report written to 'reports/notes.json'"]);
        let data = storage.get_file("reports/notes.json").await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&data).unwrap();
        assert_eq!(value["source"], "notes.txt");
    }

    #[tokio::test]
    async fn test_non_utf8_input_is_rejected() {
        let storage = MockStorage::new();
        storage.add_file("blob.bin", &[0xff, 0xfe, 0x00]).await;

        let tool = AnalyzeTool::new(storage, AnalyzeSettings::new("blob.bin"));
        let result = ToolboxEngine::new(tool).run().await;
        assert!(matches!(result, Err(ToolboxError::Encoding { .. })));
    }
}
