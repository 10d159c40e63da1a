//! Integration tests for the mdoc binary

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn mdoc(args: &[&Path]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_mdoc"));
    cmd.env_remove("RUST_LOG");
    for arg in args {
        cmd.arg(arg);
    }
    cmd.output().expect("Failed to run mdoc")
}

fn copy_fixture(name: &str, dir: &Path) -> PathBuf {
    let target = dir.join(name);
    fs::copy(fixtures_dir().join(name), &target).expect("Failed to copy fixture");
    target
}

#[test]
fn test_markdown_to_json_and_back() {
    let dir = tempfile::tempdir().unwrap();
    let input = copy_fixture("guide.md", dir.path());
    let json = dir.path().join("guide.json");

    let output = mdoc(&[&input]);
    assert!(output.status.success(), "{:?}", output);

    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&json).unwrap()).unwrap();
    assert_eq!(value["frontMatter"], "title: Guide");
    assert_eq!(value["document"]["type"], "doc");
    assert_eq!(value["document"]["content"][0]["type"], "heading");

    let back = dir.path().join("back.md");
    let output = mdoc(&[&json, Path::new("-o"), &back]);
    assert!(output.status.success(), "{:?}", output);
    assert_eq!(
        fs::read_to_string(&back).unwrap(),
        fs::read_to_string(&input).unwrap()
    );
}

#[test]
fn test_pretty_json_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("page.md");
    fs::write(&input, "---\ntitle: Hi\n---\n\n# Hello\n\nWorld\n").unwrap();

    let output = mdoc(&[&input, Path::new("--pretty")]);
    assert!(output.status.success(), "{:?}", output);

    let content = fs::read_to_string(dir.path().join("page.json")).unwrap();
    insta::assert_snapshot!(content.trim_end(), @r#"
    {
      "frontMatter": "title: Hi",
      "document": {
        "type": "doc",
        "content": [
          {
            "type": "heading",
            "attrs": {
              "level": 1
            },
            "content": [
              {
                "type": "text",
                "text": "Hello"
              }
            ]
          },
          {
            "type": "paragraph",
            "content": [
              {
                "type": "text",
                "text": "World"
              }
            ]
          }
        ]
      }
    }
    "#);
}

#[test]
fn test_no_front_matter() {
    let dir = tempfile::tempdir().unwrap();
    let input = copy_fixture("guide.md", dir.path());
    let json = dir.path().join("out.json");

    let output = mdoc(&[&input, Path::new("-o"), &json, Path::new("--no-front-matter")]);
    assert!(output.status.success(), "{:?}", output);

    let content = fs::read_to_string(&json).unwrap();
    assert!(!content.contains("frontMatter"));
}

#[test]
fn test_pretty_from_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = copy_fixture("guide.md", dir.path());
    fs::write(dir.path().join("_mdoc.toml"), "[output]\npretty = true\n").unwrap();

    let output = mdoc(&[&input]);
    assert!(output.status.success(), "{:?}", output);

    let content = fs::read_to_string(dir.path().join("guide.json")).unwrap();
    assert!(content.starts_with("{\n  \"frontMatter\""));
}

#[test]
fn test_directory_conversion() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("src");
    fs::create_dir_all(src.join("nested")).unwrap();
    copy_fixture("guide.md", &src);
    fs::write(src.join("nested/page.markdown"), "Hello\n").unwrap();
    fs::write(src.join("ignored.txt"), "skip me").unwrap();
    let out = dir.path().join("out");

    let output = mdoc(&[&src, Path::new("-o"), &out, Path::new("-r")]);
    assert!(output.status.success(), "{:?}", output);

    assert!(out.join("guide.json").is_file());
    assert!(out.join("nested/page.json").is_file());
    assert!(!out.join("ignored.json").exists());
}

#[test]
fn test_directory_without_recursion_skips_subdirectories() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("src");
    fs::create_dir_all(src.join("nested")).unwrap();
    fs::write(src.join("nested/page.md"), "Hello\n").unwrap();
    let out = dir.path().join("out");

    let output = mdoc(&[&src, Path::new("-o"), &out]);
    assert!(output.status.success(), "{:?}", output);
    assert!(!out.join("nested/page.json").exists());
}

#[test]
fn test_directory_reports_failures() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("src");
    fs::create_dir_all(&src).unwrap();
    copy_fixture("guide.md", &src);
    copy_fixture("broken.json", &src);
    let out = dir.path().join("out");

    let output = mdoc(&[&src, Path::new("-o"), &out]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("broken.json"), "{}", stderr);
    assert!(stderr.contains("Converted 1 files, 1 failed"), "{}", stderr);
    assert!(out.join("guide.json").is_file());
}

#[test]
fn test_unsupported_input() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("notes.txt");
    fs::write(&input, "text").unwrap();

    let output = mdoc(&[&input]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Unsupported input file"));
}

#[test]
fn test_missing_input() {
    let dir = tempfile::tempdir().unwrap();
    let output = mdoc(&[&dir.path().join("missing.md")]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Input path does not exist"));
}

#[test]
fn test_init_writes_sample_config() {
    let dir = tempfile::tempdir().unwrap();

    let output = mdoc(&[Path::new("--init"), dir.path()]);
    assert!(output.status.success(), "{:?}", output);

    let content = fs::read_to_string(dir.path().join("_mdoc.toml")).unwrap();
    assert!(content.starts_with("#:schema"));
    assert!(content.contains("[output]"));

    // A second run refuses to overwrite
    let output = mdoc(&[Path::new("--init"), dir.path()]);
    assert!(!output.status.success());
}

#[test]
fn test_schema_output() {
    let output = mdoc(&[Path::new("--schema")]);
    assert!(output.status.success(), "{:?}", output);

    let schema: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(schema["title"], "Config");
}
