use std::path::PathBuf;

use thiserror::Error;

use crate::rank::AreaRule;
use crate::report::display_label;

/// Token that attaches a display alias to the preceding path.
pub const ALIAS_TOKEN: &str = "as";

pub const DEFAULT_DOMAIN: usize = 200_010;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("`as` at position {0} does not follow a path")]
    DanglingAlias(usize),
    #[error("`as` at position {0} is missing its alias")]
    MissingAlias(usize),
    #[error("need at least one score file and a gold file")]
    MissingSources,
    #[error("the gold file cannot carry an alias")]
    AliasedGold,
    #[error("no input files given")]
    NoGroups,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreSource {
    pub path: PathBuf,
    pub alias: Option<String>,
}

impl ScoreSource {
    pub fn display_name(&self) -> String {
        match &self.alias {
            Some(alias) => display_label(alias),
            None => display_label(&self.path.to_string_lossy()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvalConfig {
    pub gold_path: PathBuf,
    pub score_sources: Vec<ScoreSource>,
    pub annotate_auc: bool,
    pub area_rule: AreaRule,
    pub out_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunGroup {
    pub label: String,
    pub paths: Vec<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrendConfig {
    pub groups: Vec<RunGroup>,
    pub out_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeConfig {
    pub matrix_path: PathBuf,
    /// Edge list destination; stdout when unset.
    pub output: Option<PathBuf>,
}

/// Splits `path [as alias] ...` tokens into `(path, alias)` pairs.
fn parse_aliased(tokens: &[String]) -> Result<Vec<(String, Option<String>)>, ConfigError> {
    let mut out: Vec<(String, Option<String>)> = Vec::with_capacity(tokens.len());
    let mut i = 0usize;
    while i < tokens.len() {
        if tokens[i] == ALIAS_TOKEN {
            let alias = tokens.get(i + 1).ok_or(ConfigError::MissingAlias(i))?;
            let Some(last) = out.last_mut() else {
                return Err(ConfigError::DanglingAlias(i));
            };
            if last.1.is_some() {
                return Err(ConfigError::DanglingAlias(i));
            }
            last.1 = Some(alias.clone());
            i += 2;
            continue;
        }
        out.push((tokens[i].clone(), None));
        i += 1;
    }
    Ok(out)
}

/// Resolves the positional list of the `pr` command. Without an explicit gold
/// path the last listed path is the gold file.
pub fn parse_score_sources(
    tokens: &[String],
    gold: Option<PathBuf>,
) -> Result<(PathBuf, Vec<ScoreSource>), ConfigError> {
    let mut entries = parse_aliased(tokens)?;
    let gold_path = match gold {
        Some(path) => path,
        None => match entries.pop() {
            Some((_, Some(_))) => return Err(ConfigError::AliasedGold),
            Some((path, None)) => PathBuf::from(path),
            None => return Err(ConfigError::MissingSources),
        },
    };
    if entries.is_empty() {
        return Err(ConfigError::MissingSources);
    }
    let sources = entries
        .into_iter()
        .map(|(path, alias)| ScoreSource {
            path: PathBuf::from(path),
            alias,
        })
        .collect();
    Ok((gold_path, sources))
}

/// Groups run files: each `as <label>` closes the files listed since the
/// previous label. A trailing unlabeled group is named after its first file.
pub fn parse_run_groups(tokens: &[String]) -> Result<Vec<RunGroup>, ConfigError> {
    let mut groups = Vec::new();
    let mut pending: Vec<PathBuf> = Vec::new();
    let mut i = 0usize;
    while i < tokens.len() {
        if tokens[i] == ALIAS_TOKEN {
            let label = tokens.get(i + 1).ok_or(ConfigError::MissingAlias(i))?;
            if pending.is_empty() {
                return Err(ConfigError::DanglingAlias(i));
            }
            groups.push(RunGroup {
                label: label.clone(),
                paths: std::mem::take(&mut pending),
            });
            i += 2;
            continue;
        }
        pending.push(PathBuf::from(&tokens[i]));
        i += 1;
    }
    if !pending.is_empty() {
        let label = display_label(&pending[0].to_string_lossy());
        groups.push(RunGroup {
            label,
            paths: pending,
        });
    }
    if groups.is_empty() {
        return Err(ConfigError::NoGroups);
    }
    Ok(groups)
}

#[cfg(test)]
#[path = "../tests/src_inline/config.rs"]
mod tests;
