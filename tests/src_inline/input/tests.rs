use super::*;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use flate2::Compression;
use flate2::write::GzEncoder;

use super::matrix::{parse_header, parse_matrix_row, read_score_matrix, strip_quotes};
use super::records::{CompositeKey, parse_keyed_line, read_keyed_records};
use super::samples::{StepSample, parse_sample_line, read_step_samples};

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("rankplot_input_test_{}_{}", std::process::id(), id));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_file(path: &Path, contents: &str) {
    let mut f = BufWriter::new(File::create(path).unwrap());
    f.write_all(contents.as_bytes()).unwrap();
}

fn write_gz(path: &Path, contents: &str) {
    let mut enc = GzEncoder::new(File::create(path).unwrap(), Compression::default());
    enc.write_all(contents.as_bytes()).unwrap();
    enc.finish().unwrap();
}

#[test]
fn test_composite_key_joins_first_two_tokens() {
    let key = CompositeKey::new("geneA", "geneB");
    assert_eq!(key.as_str(), "geneA geneB");
    assert_ne!(key, CompositeKey::new("geneB", "geneA"));
}

#[test]
fn test_parse_keyed_line_tabs_and_spaces() {
    let rec = parse_keyed_line("A\tB   0.75\textra", 3).unwrap().unwrap();
    assert_eq!(rec.key, CompositeKey::new("A", "B"));
    assert_eq!(rec.value, "0.75");
    assert_eq!(rec.line, 3);
}

#[test]
fn test_parse_keyed_line_blank_is_skipped() {
    assert!(parse_keyed_line("   ", 1).unwrap().is_none());
    assert!(parse_keyed_line("", 1).unwrap().is_none());
}

#[test]
fn test_parse_keyed_line_too_few_fields() {
    let err = parse_keyed_line("A B", 7).unwrap_err();
    match err {
        InputError::Parse { line, .. } => assert_eq!(line, 7),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_label_and_score_parsing() {
    let rec = parse_keyed_line("A B 1", 1).unwrap().unwrap();
    assert_eq!(rec.parse_label().unwrap(), 1);
    assert_eq!(rec.parse_score().unwrap(), 1.0);

    let rec = parse_keyed_line("A B 0.5", 2).unwrap().unwrap();
    assert!(rec.parse_label().is_err());

    let rec = parse_keyed_line("A B nan", 3).unwrap().unwrap();
    assert!(rec.parse_score().is_err());
}

#[test]
fn test_read_keyed_records_plain_and_gz() {
    let dir = make_temp_dir();
    let plain = dir.join("scores.tsv");
    let gz = dir.join("scores.tsv.gz");
    let contents = "A\tB\t0.9\n\nA\tC\t0.2\n";
    write_file(&plain, contents);
    write_gz(&gz, contents);

    let a = read_keyed_records(&plain).unwrap();
    let b = read_keyed_records(&gz).unwrap();
    assert_eq!(a.len(), 2);
    assert_eq!(a, b);
    assert_eq!(a[1].line, 3);
}

#[test]
fn test_read_keyed_records_error_names_file() {
    let dir = make_temp_dir();
    let path = dir.join("broken.tsv");
    write_file(&path, "A B 1\nA\n");

    let err = read_keyed_records(&path).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("broken.tsv"), "{msg}");
    assert!(msg.contains("line 2"), "{msg}");
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = make_temp_dir();
    let err = read_keyed_records(&dir.join("absent.tsv")).unwrap_err();
    match err {
        InputError::File { source, .. } => assert!(matches!(*source, InputError::Io(_))),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_parse_sample_line() {
    let s = parse_sample_line("120 -3.5e2", 1).unwrap().unwrap();
    assert_eq!(
        s,
        StepSample {
            step: 120,
            value: -350.0
        }
    );
    assert!(parse_sample_line("-1 2.0", 1).is_err());
    assert!(parse_sample_line("10", 1).is_err());
    assert!(parse_sample_line("", 1).unwrap().is_none());
}

#[test]
fn test_read_step_samples() {
    let dir = make_temp_dir();
    let path = dir.join("run1.txt");
    write_file(&path, "0 -10.5\n5 -8.0\r\n9 -7.25 ignored\n");

    let samples = read_step_samples(&path).unwrap();
    assert_eq!(samples.len(), 3);
    assert_eq!(samples[2].step, 9);
    assert_eq!(samples[2].value, -7.25);
}

#[test]
fn test_strip_quotes_drops_one_quote_per_end() {
    assert_eq!(strip_quotes("\"geneA\""), "geneA");
    assert_eq!(strip_quotes("'geneB'"), "geneB");
    assert_eq!(strip_quotes("\"mixed'"), "mixed");
    assert_eq!(strip_quotes("\"\"twice\"\""), "\"twice\"");
    assert_eq!(strip_quotes("left\""), "left");
    assert_eq!(strip_quotes("in'side"), "in'side");
    assert_eq!(strip_quotes("\""), "");
}

#[test]
fn test_matrix_row_pairs_values_with_header_columns() {
    let columns = parse_header("\"c1\"\t'c2'\tc3");
    assert_eq!(columns, vec!["c1", "c2", "c3"]);

    let cells = parse_matrix_row("\"r1\"  0.5\t-1e-3", 4, &columns).unwrap();
    assert_eq!(cells.len(), 2);
    assert_eq!(cells[0].row, "r1");
    assert_eq!(cells[0].column, "c1");
    assert_eq!(cells[0].value, 0.5);
    assert_eq!(cells[1].column, "c2");
    assert_eq!(cells[1].raw, "-1e-3");
}

#[test]
fn test_matrix_row_errors_carry_line() {
    let columns = parse_header("c1 c2");
    match parse_matrix_row("r1 0.1 0.2 0.3", 9, &columns).unwrap_err() {
        InputError::Parse { line, message } => {
            assert_eq!(line, 9);
            assert!(message.contains("more values"));
        }
        other => panic!("unexpected error: {other}"),
    }
    match parse_matrix_row("r1 0.1 high", 10, &columns).unwrap_err() {
        InputError::Parse { line, .. } => assert_eq!(line, 10),
        other => panic!("unexpected error: {other}"),
    }
    assert!(parse_matrix_row("r1 nan", 11, &columns).is_err());
}

#[test]
fn test_read_score_matrix_row_major_skips_blank_lines() {
    let dir = make_temp_dir();
    let path = dir.join("matrix.txt");
    write_file(&path, "\nA B\n\"x\" 1 2\n\ny 3\n");
    let cells = read_score_matrix(&path).unwrap();
    let flat: Vec<(&str, &str, f64)> = cells
        .iter()
        .map(|c| (c.row.as_str(), c.column.as_str(), c.value))
        .collect();
    assert_eq!(flat, vec![("x", "A", 1.0), ("x", "B", 2.0), ("y", "A", 3.0)]);
}

#[test]
fn test_read_score_matrix_bad_value_names_file() {
    let dir = make_temp_dir();
    let path = dir.join("bad_matrix.txt");
    write_file(&path, "A B\nx 1 oops\n");
    let msg = read_score_matrix(&path).unwrap_err().to_string();
    assert!(msg.contains("bad_matrix.txt"));
    assert!(msg.contains("line 2"));
}

#[test]
fn test_read_score_matrix_empty_file() {
    let dir = make_temp_dir();
    let path = dir.join("empty_matrix.txt");
    write_file(&path, "");
    assert!(read_score_matrix(&path).unwrap().is_empty());
}
