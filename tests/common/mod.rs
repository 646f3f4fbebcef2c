//! Shared sample directory for integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub struct SampleDir {
    _dir: TempDir,
    pub root: PathBuf,
}

impl SampleDir {
    pub fn path(&self, rel: &str) -> PathBuf {
        self.root.join(rel)
    }
}

/// Numbered filler lines; none contain "first", "Oppenheimer" or "Welcome"
fn filler(count: usize, tag: &str) -> Vec<String> {
    (1..=count).map(|n| format!("{tag} filler line {n}")).collect()
}

fn write_lines(path: &Path, lines: &[String]) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    let mut text = lines.join("\n");
    text.push('\n');
    fs::write(path, text).unwrap();
}

/// Build the sample tree:
///
/// ```text
/// SampleDirectory/
///   a.txt                         "first" on line 4
///   b.txt                         "first" on line 8
///   Oppenheimer/oppenheimer.txt   "Oppenheimer" on line 64, "first" on line 157
///   Subdirectory/EmptyDirectory/
///   Subdirectory/Subsubdirectory/textWithoutFirst.txt   "Welcome", no "first"
/// ```
pub fn sample_dir() -> SampleDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("SampleDirectory");

    let mut a = filler(6, "alpha");
    a[3] = "the first entry of a".to_string();
    write_lines(&root.join("a.txt"), &a);

    let mut b = filler(10, "beta");
    b[7] = "b mentions first here".to_string();
    write_lines(&root.join("b.txt"), &b);

    let mut opp = filler(200, "story");
    opp[63] = "J. Robert Oppenheimer directed the laboratory.".to_string();
    opp[156] = "It was the first test.".to_string();
    write_lines(&root.join("Oppenheimer/oppenheimer.txt"), &opp);

    fs::create_dir_all(root.join("Subdirectory/EmptyDirectory")).unwrap();

    let mut welcome = filler(3, "gamma");
    welcome[1] = "Welcome to the subdirectory".to_string();
    write_lines(
        &root.join("Subdirectory/Subsubdirectory/textWithoutFirst.txt"),
        &welcome,
    );

    SampleDir { _dir: dir, root }
}
