use file_toolbox::domain::model::RenameSettings;
use file_toolbox::{LocalStorage, RenameTool, ToolboxEngine, ToolboxError};
use std::fs;
use tempfile::TempDir;

fn names_in(dir: &std::path::Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().into_string().unwrap())
        .collect();
    names.sort();
    names
}

#[tokio::test]
async fn test_prefix_and_suffix_on_real_directory() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("beach.jpg"), "sand").unwrap();
    fs::write(temp_dir.path().join("notes.txt"), "todo").unwrap();
    fs::create_dir(temp_dir.path().join("raw")).unwrap();

    let settings = RenameSettings {
        prefix: "trip_".to_string(),
        suffix: "_2024".to_string(),
        ..RenameSettings::new(temp_dir.path())
    };
    let tool = RenameTool::new(LocalStorage::new("."), settings);
    let outcome = ToolboxEngine::new(tool).run().await.unwrap();

    assert_eq!(
        outcome.lines,
        vec![
            "Renamed 'beach.jpg' -> 'trip_beach_2024.jpg'",
            "Renamed 'notes.txt' -> 'trip_notes_2024.txt'",
        ]
    );
    assert_eq!(
        names_in(temp_dir.path()),
        vec!["raw", "trip_beach_2024.jpg", "trip_notes_2024.txt"]
    );
    assert_eq!(
        fs::read_to_string(temp_dir.path().join("trip_beach_2024.jpg")).unwrap(),
        "sand"
    );
}

#[tokio::test]
async fn test_numbered_rename_shifts_existing_numbers() {
    let temp_dir = TempDir::new().unwrap();
    for (name, content) in [("1.txt", "one"), ("2.txt", "two"), ("3.txt", "three")] {
        fs::write(temp_dir.path().join(name), content).unwrap();
    }

    let settings = RenameSettings {
        numbered: true,
        start: 2,
        ..RenameSettings::new(temp_dir.path())
    };
    let tool = RenameTool::new(LocalStorage::new("."), settings);
    ToolboxEngine::new(tool).run().await.unwrap();

    assert_eq!(names_in(temp_dir.path()), vec!["2.txt", "3.txt", "4.txt"]);
    assert_eq!(fs::read_to_string(temp_dir.path().join("2.txt")).unwrap(), "one");
    assert_eq!(fs::read_to_string(temp_dir.path().join("3.txt")).unwrap(), "two");
    assert_eq!(fs::read_to_string(temp_dir.path().join("4.txt")).unwrap(), "three");
}

#[tokio::test]
async fn test_conflict_leaves_directory_untouched() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("a.txt"), "a").unwrap();
    fs::create_dir(temp_dir.path().join("x_a.txt")).unwrap();

    let settings = RenameSettings {
        prefix: "x_".to_string(),
        ..RenameSettings::new(temp_dir.path())
    };
    let tool = RenameTool::new(LocalStorage::new("."), settings);
    let result = ToolboxEngine::new(tool).run().await;

    assert!(matches!(result, Err(ToolboxError::NameConflict { .. })));
    assert_eq!(names_in(temp_dir.path()), vec!["a.txt", "x_a.txt"]);
}

#[tokio::test]
async fn test_missing_directory_is_reported() {
    let temp_dir = TempDir::new().unwrap();
    let settings = RenameSettings {
        prefix: "x_".to_string(),
        ..RenameSettings::new(temp_dir.path().join("missing"))
    };
    let tool = RenameTool::new(LocalStorage::new("."), settings);
    let result = ToolboxEngine::new(tool).run().await;

    match result {
        Err(e @ ToolboxError::DirectoryNotFound { .. }) => {
            assert_eq!(e.severity().exit_code(), 1);
        }
        other => panic!("unexpected result: {:?}", other.map(|o| o.lines)),
    }
}
