//! Integration tests for File Search keyword search
//!
//! These tests verify end-to-end search behavior including:
//! - Path resolution against the base directory
//! - Case-sensitive and case-insensitive matching
//! - Line numbering and trimming
//! - File read failures

use assert_fs::prelude::*;
use filesearch::{search_content, Error, Searcher};
use predicates::prelude::*;

const SAMPLE: &str = "This is a test file.
It contains multiple lines.
The word TEST appears here.
JavaScript is awesome!
This line has the word test in lowercase.
Another line with JavaScript keyword.
Final line without the search term.";

/// Create a temp dir holding `sample.txt`
fn create_sample_dir() -> assert_fs::TempDir {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("sample.txt").write_str(SAMPLE).unwrap();
    temp
}

#[tokio::test]
async fn test_case_insensitive_search() {
    let temp = create_sample_dir();
    let searcher = Searcher::new(temp.path());

    let report = searcher.search("sample.txt", "test", false).await.unwrap();

    assert_eq!(report.total_matches, 3);
    let lines: Vec<usize> = report.matches.iter().map(|m| m.line_number).collect();
    assert_eq!(lines, vec![1, 3, 5]);
    assert_eq!(report.matches[1].content, "The word TEST appears here.");
}

#[tokio::test]
async fn test_case_sensitive_search() {
    let temp = create_sample_dir();
    let searcher = Searcher::new(temp.path());

    let report = searcher.search("sample.txt", "JavaScript", true).await.unwrap();
    let lines: Vec<usize> = report.matches.iter().map(|m| m.line_number).collect();
    assert_eq!(lines, vec![4, 6]);

    let report = searcher.search("sample.txt", "javascript", true).await.unwrap();
    assert_eq!(report.total_matches, 0);
}

#[tokio::test]
async fn test_no_matches() {
    let temp = create_sample_dir();
    let searcher = Searcher::new(temp.path());

    let report = searcher.search("sample.txt", "Python", false).await.unwrap();
    assert_eq!(report.total_matches, 0);
    assert!(report.matches.is_empty());
    assert_eq!(report.keyword, "Python");
}

#[tokio::test]
async fn test_keyword_case_is_preserved_in_report() {
    let temp = create_sample_dir();
    let searcher = Searcher::new(temp.path());

    let report = searcher.search("sample.txt", "TeSt", false).await.unwrap();
    assert_eq!(report.keyword, "TeSt");
    assert_eq!(report.total_matches, 3);
}

#[tokio::test]
async fn test_report_path_is_resolved() {
    let temp = create_sample_dir();
    temp.child("nested").create_dir_all().unwrap();
    let searcher = Searcher::new(temp.path().join("nested"));

    let report = searcher.search("../sample.txt", "awesome", false).await.unwrap();

    let expected = temp.path().join("sample.txt");
    assert_eq!(report.file_path, expected.to_string_lossy());
    assert!(std::path::Path::new(&report.file_path).is_absolute());
}

#[tokio::test]
async fn test_absolute_path_ignores_base_dir() {
    let temp = create_sample_dir();
    let other = assert_fs::TempDir::new().unwrap();
    let searcher = Searcher::new(other.path());

    let absolute = temp.child("sample.txt");
    let report = searcher
        .search(absolute.path().to_str().unwrap(), "Final", true)
        .await
        .unwrap();
    assert_eq!(report.total_matches, 1);
    assert_eq!(report.matches[0].line_number, 7);
}

#[tokio::test]
async fn test_missing_file_is_file_read_error() {
    let temp = create_sample_dir();
    let searcher = Searcher::new(temp.path());

    let err = searcher.search("nonexistent.txt", "test", false).await.unwrap_err();

    assert!(matches!(err, Error::FileRead { .. }));
    let message = err.to_string();
    assert!(predicate::str::starts_with("Error reading file").eval(message.as_str()));
    assert!(predicate::str::contains("nonexistent.txt").eval(message.as_str()));
}

#[tokio::test]
async fn test_every_match_contains_keyword() {
    let temp = create_sample_dir();
    let searcher = Searcher::new(temp.path());
    let lines: Vec<&str> = SAMPLE.split('\n').collect();

    for keyword in ["is", "line", "Java", "TEST", "e", "."] {
        for case_sensitive in [true, false] {
            let report = searcher.search("sample.txt", keyword, case_sensitive).await.unwrap();
            assert_eq!(report.total_matches, report.matches.len());

            for m in &report.matches {
                let line = lines[m.line_number - 1];
                if case_sensitive {
                    assert!(line.contains(keyword), "{line:?} lacks {keyword:?}");
                } else {
                    assert!(line.to_lowercase().contains(&keyword.to_lowercase()));
                }
            }
        }
    }
}

#[test]
fn test_case_insensitive_is_superset() {
    for keyword in ["test", "TEST", "JavaScript", "line", "x"] {
        let sensitive = search_content(SAMPLE, keyword, true);
        let insensitive = search_content(SAMPLE, keyword, false);
        for m in &sensitive {
            assert!(insensitive.contains(m), "{keyword}: line {} missing", m.line_number);
        }
    }
}

#[test]
fn test_present_keyword_always_matches() {
    for line in SAMPLE.lines() {
        let keyword = &line[..line.len().min(6)];
        assert!(!search_content(SAMPLE, keyword, true).is_empty());
    }
}

#[test]
fn test_empty_keyword_matches_all_lines() {
    let matches = search_content(SAMPLE, "", true);
    assert_eq!(matches.len(), SAMPLE.split('\n').count());

    let matches = search_content("x\n\n", "", false);
    assert_eq!(matches.len(), 3);
}
