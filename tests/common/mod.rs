#![allow(dead_code)]

pub mod fixtures;
pub mod model;

use std::path::Path;
use std::process::{Command, Output};

const QAEMBED_VARS: &[&str] = &[
    "QAEMBED_ENCODER_PATH",
    "QAEMBED_NER_PATH",
    "QAEMBED_MAX_SEQ_LEN",
    "QAEMBED_POOLING",
    "QAEMBED_NORMALIZE",
    "QAEMBED_RESPONSES_PATH",
];

/// Runs the `qa-embed` binary with stub models and a quiet log filter.
pub fn run_qa_embed(dir: &Path, args: &[&str]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_qa-embed"));
    cmd.current_dir(dir).args(args).env("RUST_LOG", "off");
    for var in QAEMBED_VARS {
        cmd.env_remove(var);
    }
    cmd.output().expect("failed to spawn qa-embed")
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
