use std::fs;
use std::path::{Path, PathBuf};

pub const SAMPLE_PAIRS: &str = r#"[
  {"question": "What is QHSE?", "answer": "QHSE stands for Quality, Health, Safety and Environment."},
  {"question": "How do I open the Audit/Inspection Module?", "answer": "Use the Audit/Inspection Module from the main menu."},
  {"question": "Goodbye", "answer": "Goodbye! Have a great day!", "category": "smalltalk"}
]"#;

pub fn write_input(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("failed to write fixture");
    path
}

pub const SAMPLE_RESPONSES: &str = r#"{
  "hello": "Hello! How can I assist you today?",
  "what is qhse": "QHSE stands for Quality, Health, Safety, and Environment."
}"#;
