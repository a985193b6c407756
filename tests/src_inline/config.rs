use super::*;

fn tokens(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_last_path_is_gold() {
    let (gold, sources) =
        parse_score_sources(&tokens(&["runs/a.txt", "runs/b.txt", "gold.txt"]), None).unwrap();
    assert_eq!(gold, PathBuf::from("gold.txt"));
    assert_eq!(sources.len(), 2);
    assert_eq!(sources[0].path, PathBuf::from("runs/a.txt"));
    assert_eq!(sources[0].alias, None);
    assert_eq!(sources[1].display_name(), "b.txt");
}

#[test]
fn test_alias_overrides_display_name() {
    let (_, sources) = parse_score_sources(
        &tokens(&["runs/a.txt", "as", "mcmc/K2", "runs/b.txt", "gold.txt"]),
        None,
    )
    .unwrap();
    assert_eq!(sources[0].alias.as_deref(), Some("mcmc/K2"));
    assert_eq!(sources[0].display_name(), "K2");
    assert_eq!(sources[1].display_name(), "b.txt");
}

#[test]
fn test_explicit_gold_keeps_every_path_as_source() {
    let (gold, sources) = parse_score_sources(
        &tokens(&["a.txt", "b.txt", "as", "B"]),
        Some(PathBuf::from("truth.tsv")),
    )
    .unwrap();
    assert_eq!(gold, PathBuf::from("truth.tsv"));
    assert_eq!(sources.len(), 2);
    assert_eq!(sources[1].display_name(), "B");
}

#[test]
fn test_source_list_errors() {
    assert_eq!(
        parse_score_sources(&tokens(&["gold.txt"]), None),
        Err(ConfigError::MissingSources)
    );
    assert_eq!(
        parse_score_sources(&tokens(&["as", "x", "gold.txt"]), None),
        Err(ConfigError::DanglingAlias(0))
    );
    assert_eq!(
        parse_score_sources(&tokens(&["a.txt", "gold.txt", "as"]), None),
        Err(ConfigError::MissingAlias(2))
    );
    assert_eq!(
        parse_score_sources(&tokens(&["a.txt", "gold.txt", "as", "G"]), None),
        Err(ConfigError::AliasedGold)
    );
    assert_eq!(
        parse_score_sources(&tokens(&["a.txt", "as", "A", "as", "B", "g.txt"]), None),
        Err(ConfigError::DanglingAlias(3))
    );
}

#[test]
fn test_run_groups() {
    let groups = parse_run_groups(&tokens(&[
        "k2/run1.txt",
        "k2/run2.txt",
        "as",
        "K2",
        "bde/run1.txt",
        "bde/run2.txt",
        "as",
        "BDe",
    ]))
    .unwrap();
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].label, "K2");
    assert_eq!(groups[0].paths.len(), 2);
    assert_eq!(groups[1].label, "BDe");
    assert_eq!(groups[1].paths[1], PathBuf::from("bde/run2.txt"));
}

#[test]
fn test_trailing_group_is_named_after_first_file() {
    let groups = parse_run_groups(&tokens(&["a.txt", "as", "A", "logs/b.txt", "logs/c.txt"])).unwrap();
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[1].label, "b.txt");
    assert_eq!(groups[1].paths.len(), 2);
}

#[test]
fn test_run_group_errors() {
    assert_eq!(parse_run_groups(&[]), Err(ConfigError::NoGroups));
    assert_eq!(
        parse_run_groups(&tokens(&["a.txt", "as", "A", "as", "B"])),
        Err(ConfigError::DanglingAlias(3))
    );
    assert_eq!(
        parse_run_groups(&tokens(&["a.txt", "as"])),
        Err(ConfigError::MissingAlias(1))
    );
}
