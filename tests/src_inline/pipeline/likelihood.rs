use super::*;
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::config::RunGroup;

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("rankplot_likelihood_{}_{}", std::process::id(), id));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn group(dir: &Path, label: &str, runs: &[(&str, &str)]) -> RunGroup {
    let mut paths = Vec::new();
    for (name, contents) in runs {
        let path = dir.join(name);
        fs::write(&path, contents).unwrap();
        paths.push(path);
    }
    RunGroup {
        label: label.to_string(),
        paths,
    }
}

#[test]
fn test_group_curves_are_averaged_and_repaired() {
    let dir = make_temp_dir();
    let cfg = TrendConfig {
        groups: vec![
            group(&dir, "K2", &[("a1", "2 -4\n"), ("a2", "3 -6\n")]),
            group(&dir, "BDe", &[("b1", "0 -1\n4 -3\n")]),
        ],
        out_dir: dir.join("out"),
    };
    let curves = build_likelihood_curves(&cfg, 5).unwrap();
    assert_eq!(curves.len(), 2);
    assert_eq!(curves[0].runs, 2);
    assert_eq!(curves[0].dense, vec![-2.0, -2.0, -2.0, -5.0, -5.0]);
    assert_eq!(curves[1].dense, vec![-1.0, -1.0, -1.0, -1.0, -3.0]);

    let chart = run_likelihood(&cfg, 5).unwrap();
    let svg = fs::read_to_string(chart).unwrap();
    assert!(svg.contains("BDe"));
}

#[test]
fn test_all_zero_group_is_kept() {
    let dir = make_temp_dir();
    let cfg = TrendConfig {
        groups: vec![group(&dir, "flat", &[("z", "0 0\n")])],
        out_dir: dir.join("out"),
    };
    let curves = build_likelihood_curves(&cfg, 3).unwrap();
    assert_eq!(curves[0].dense, vec![0.0; 3]);
}

#[test]
fn test_step_outside_domain_names_file() {
    let dir = make_temp_dir();
    let cfg = TrendConfig {
        groups: vec![group(&dir, "K2", &[("long", "0 -1\n50 -2\n")])],
        out_dir: dir.join("out"),
    };
    let err = build_likelihood_curves(&cfg, 10).unwrap_err();
    match err {
        PipelineError::Series { path, source } => {
            assert!(path.ends_with("long"));
            assert_eq!(
                source,
                SeriesError::StepOutOfDomain {
                    step: 50,
                    domain: 10
                }
            );
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_single_run_group_gets_edges_repaired() {
    let dir = make_temp_dir();
    let cfg = TrendConfig {
        groups: vec![group(&dir, "solo", &[("s", "2 -4\n3 -6\n")])],
        out_dir: dir.join("out"),
    };
    let curves = build_likelihood_curves(&cfg, 5).unwrap();
    assert_eq!(curves[0].runs, 1);
    assert_eq!(curves[0].dense, vec![-4.0, -4.0, -4.0, -6.0, -6.0]);
}

#[test]
fn test_single_and_multi_run_groups_agree() {
    let dir = make_temp_dir();
    let run = "1 -3\n4 -1\n";
    let cfg = TrendConfig {
        groups: vec![
            group(&dir, "one", &[("one", run)]),
            group(&dir, "two", &[("two_a", run), ("two_b", run)]),
        ],
        out_dir: dir.join("out"),
    };
    let curves = build_likelihood_curves(&cfg, 6).unwrap();
    assert_eq!(curves[0].dense, curves[1].dense);
    assert_eq!(curves[1].runs, 2);
}
