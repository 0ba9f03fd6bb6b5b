//! Interactive input-file picker for `claims score`.
//!
//! When no `--input` is given, list the `*.csv` files below the current
//! directory and let the user choose one by number or type a path.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use crate::error::AppError;

/// How many directory levels below `.` are searched.
const SEARCH_DEPTH: usize = 3;

/// Prompt on stdin/stdout for a feature CSV.
pub fn prompt_for_input_csv() -> Result<PathBuf, AppError> {
    let files = discover_csv_files(Path::new("."), SEARCH_DEPTH);
    if files.is_empty() {
        return Err(AppError::new(
            2,
            "No .csv files found here. Pass one with `claims score --input <file.csv>`.",
        ));
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    choose_from(&files, &mut stdin.lock(), &mut stdout)
}

/// Selection loop, split out so it can run against in-memory streams.
fn choose_from<R: BufRead, W: Write>(files: &[PathBuf], input: &mut R, out: &mut W) -> Result<PathBuf, AppError> {
    let io_err = |e: io::Error| AppError::new(2, format!("Terminal I/O failed: {e}"));

    writeln!(out, "Feature CSV files:").map_err(io_err)?;
    for (idx, path) in files.iter().enumerate() {
        writeln!(out, "{:>3}) {}", idx + 1, display_path(path)).map_err(io_err)?;
    }

    loop {
        write!(out, "Pick 1-{} or enter a path (q to quit): ", files.len()).map_err(io_err)?;
        out.flush().map_err(io_err)?;

        let mut line = String::new();
        if input.read_line(&mut line).map_err(io_err)? == 0 {
            return Err(AppError::new(2, "No selection made."));
        }

        let answer = line.trim();
        if answer.eq_ignore_ascii_case("q") {
            return Err(AppError::new(2, "Canceled."));
        }

        let candidate = match answer.parse::<usize>() {
            Ok(n) if (1..=files.len()).contains(&n) => files[n - 1].clone(),
            Ok(n) => {
                writeln!(out, "No file numbered {n}.").map_err(io_err)?;
                continue;
            }
            Err(_) => PathBuf::from(answer),
        };

        match check_csv_path(&candidate) {
            Ok(path) => return Ok(path),
            Err(err) => writeln!(out, "{err}").map_err(io_err)?,
        }
    }
}

/// The path must be an existing file with a `.csv` extension.
pub fn check_csv_path(path: &Path) -> Result<PathBuf, AppError> {
    if !path.is_file() {
        return Err(AppError::new(2, format!("Not a file: {}", path.display())));
    }
    if !has_csv_extension(path) {
        return Err(AppError::new(2, format!("Expected a .csv file, got {}", path.display())));
    }
    Ok(path.to_path_buf())
}

/// `*.csv` files under `root`, sorted by displayed path.
pub fn discover_csv_files(root: &Path, max_depth: usize) -> Vec<PathBuf> {
    let mut found = Vec::new();
    walk(root, max_depth, &mut found);
    found.sort_by_key(|p| display_path(p));
    found
}

fn walk(dir: &Path, depth_left: usize, found: &mut Vec<PathBuf>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        let Ok(kind) = entry.file_type() else {
            continue;
        };
        if kind.is_dir() {
            let name = path.file_name().and_then(|s| s.to_str()).unwrap_or("");
            if depth_left > 0 && !matches!(name, ".git" | "target") {
                walk(&path, depth_left - 1, found);
            }
        } else if kind.is_file() && has_csv_extension(&path) {
            found.push(path);
        }
    }
}

fn has_csv_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}

fn display_path(path: &Path) -> String {
    path.strip_prefix("./").unwrap_or(path).display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("claim_odds_picker_{name}_{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(dir.join("nested")).unwrap();
        dir
    }

    #[test]
    fn discovers_csv_files_recursively() {
        let dir = scratch_dir("walk");
        fs::write(dir.join("b.csv"), "x").unwrap();
        fs::write(dir.join("nested").join("a.CSV"), "x").unwrap();
        fs::write(dir.join("notes.txt"), "x").unwrap();

        let found = discover_csv_files(&dir, 2);
        let _ = fs::remove_dir_all(&dir);
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn picks_by_number_after_a_bad_answer() {
        let dir = scratch_dir("choose");
        let file = dir.join("rows.csv");
        fs::write(&file, "x").unwrap();

        let mut input = io::Cursor::new(b"9\n1\n".to_vec());
        let mut out = Vec::new();
        let picked = choose_from(&[file.clone()], &mut input, &mut out).unwrap();
        let _ = fs::remove_dir_all(&dir);

        assert_eq!(picked, file);
        assert!(String::from_utf8(out).unwrap().contains("No file numbered 9."));
    }

    #[test]
    fn quit_and_eof_cancel() {
        let files = [PathBuf::from("unused.csv")];
        let mut out = Vec::new();
        assert!(choose_from(&files, &mut io::Cursor::new(b"q\n".to_vec()), &mut out).is_err());
        assert!(choose_from(&files, &mut io::Cursor::new(Vec::new()), &mut out).is_err());
    }

    #[test]
    fn rejects_non_csv_paths() {
        let dir = scratch_dir("check");
        let txt = dir.join("rows.txt");
        fs::write(&txt, "x").unwrap();
        assert!(check_csv_path(&txt).is_err());
        assert!(check_csv_path(&dir).is_err());
        let _ = fs::remove_dir_all(&dir);
    }
}
