use file_toolbox::domain::model::{AnalyzeSettings, ReportFormat};
use file_toolbox::{AnalyzeTool, LocalStorage, ToolboxEngine, ToolboxError};
use std::fs;
use tempfile::TempDir;

const PASSAGE: &str = "Data science is an interdisciplinary field that uses scientific methods \
to extract knowledge from data. Python has become the most popular language for data \
science because of its readable syntax and rich ecosystem.\n\n\
Libraries such as pandas and NumPy make it easy to clean and explore data.\n";

#[tokio::test]
async fn test_analyze_prose_passage_to_stdout_lines() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("passage.txt");
    fs::write(&file, PASSAGE).unwrap();

    let mut settings = AnalyzeSettings::new(&file);
    settings.exclude_stopwords = true;
    settings.top = 3;
    let tool = AnalyzeTool::new(LocalStorage::new("."), settings);
    let outcome = ToolboxEngine::new(tool).run().await.unwrap();

    assert!(outcome.artifact.is_none());
    assert!(outcome.lines[0].starts_with("File: "));
    assert!(outcome.lines.contains(&"lines: 3".to_string()));
    assert!(outcome.lines.contains(&"paragraphs: 2".to_string()));
    assert!(outcome.lines.contains(&"sentences: 3".to_string()));
    assert!(outcome.lines.contains(&"  1. data (4)".to_string()));
    assert!(outcome.lines.contains(&"  2. science (2)".to_string()));
}

#[tokio::test]
async fn test_analyze_writes_csv_report() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("passage.txt");
    fs::write(&file, PASSAGE).unwrap();
    let report_path = temp_dir.path().join("out").join("report.csv");

    let mut settings = AnalyzeSettings::new(&file);
    settings.format = ReportFormat::Csv;
    settings.output = Some(report_path.clone());
    let tool = AnalyzeTool::new(LocalStorage::new("."), settings);
    let outcome = ToolboxEngine::new(tool).run().await.unwrap();

    assert_eq!(outcome.artifact, Some(report_path.clone()));

    let mut reader = csv::Reader::from_path(&report_path).unwrap();
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    let words = rows
        .iter()
        .find(|row| &row[0] == "summary" && &row[1] == "words")
        .unwrap();
    assert_eq!(&words[2], "47");
    assert!(rows.iter().any(|row| &row[0] == "top_word" && &row[1] == "data"));
}

#[tokio::test]
async fn test_analyze_missing_and_binary_files() {
    let temp_dir = TempDir::new().unwrap();

    let settings = AnalyzeSettings::new(temp_dir.path().join("missing.txt"));
    let tool = AnalyzeTool::new(LocalStorage::new("."), settings);
    let result = ToolboxEngine::new(tool).run().await;
    assert!(matches!(result, Err(ToolboxError::FileNotFound { .. })));

    let binary = temp_dir.path().join("image.bin");
    fs::write(&binary, [0x89, 0x50, 0x4e, 0x47, 0xff, 0xd8]).unwrap();
    let tool = AnalyzeTool::new(LocalStorage::new("."), AnalyzeSettings::new(&binary));
    let result = ToolboxEngine::new(tool).run().await;
    assert!(matches!(result, Err(ToolboxError::Encoding { .. })));
}
