//! # Placeholder Substitution
//!
//! Command templates are plain strings containing `${name}` placeholders.
//! Resolution is purely textual: there are no conditionals, filters or
//! nested expressions, so the configured string is exactly what runs once
//! the values are in place.
//!
//! ## Tokenizing
//!
//! A template is split into an argument vector with shell-like quoting:
//! whitespace separates arguments, and single- or double-quoted segments
//! keep their whitespace and lose their quotes. Placeholders are substituted
//! inside each argument after splitting, so a value containing spaces (a
//! commit message, a path) always stays a single argument.
//!
//! ## Repeated keys
//!
//! A repeated parameter family is stored as indexed entries (`localFile.0`,
//! `localFile.1`, ...). [`SubstitutionMap::repeated_keys`] lists them and
//! [`SubstitutionMap::with_value`] binds the family's bare name to one entry
//! at a time.

use std::collections::BTreeMap;

use crate::error::{Error, Result};

/// Placeholder name to replacement value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubstitutionMap {
    values: BTreeMap<String, String>,
}

impl SubstitutionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a placeholder value, replacing any previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    /// Set every value whose name is not already present.
    pub fn insert_missing<'a, I>(&mut self, values: I)
    where
        I: IntoIterator<Item = (&'a String, &'a String)>,
    {
        for (name, value) in values {
            self.values
                .entry(name.clone())
                .or_insert_with(|| value.clone());
        }
    }

    /// Add `values` as the indexed family `prefix.0`, `prefix.1`, ...
    pub fn insert_indexed<I, S>(&mut self, prefix: &str, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for (index, value) in values.into_iter().enumerate() {
            self.insert(format!("{}.{}", prefix, index), value);
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Keys of the indexed family `prefix.<n>`, ordered by index.
    ///
    /// Entries whose suffix is not a number sort after the numbered ones.
    pub fn repeated_keys(&self, prefix: &str) -> Vec<String> {
        let child_prefix = format!("{}.", prefix);
        let mut keys: Vec<(Option<u64>, &String)> = self
            .values
            .keys()
            .filter_map(|key| {
                key.strip_prefix(&child_prefix)
                    .filter(|suffix| !suffix.is_empty())
                    .map(|suffix| (suffix.parse::<u64>().ok(), key))
            })
            .collect();
        keys.sort_by(|(a_index, a_key), (b_index, b_key)| match (a_index, b_index) {
            (Some(a), Some(b)) => a.cmp(b),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => a_key.cmp(b_key),
        });
        keys.into_iter().map(|(_, key)| key.clone()).collect()
    }

    /// A copy of this map with `name` bound to the value stored under `source_key`.
    pub fn with_value(&self, name: &str, source_key: &str) -> Self {
        let mut bound = self.clone();
        if let Some(value) = self.values.get(source_key) {
            bound.insert(name, value.clone());
        }
        bound
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SubstitutionMap {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = SubstitutionMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

/// Replace every `${name}` that has a value; unknown placeholders stay verbatim.
pub fn resolve(template: &str, substitutions: &SubstitutionMap) -> String {
    let mut result = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("${") {
        result.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find('}') {
            Some(end) => {
                let name = &after[..end];
                match substitutions.get(name) {
                    Some(value) => result.push_str(value),
                    None => result.push_str(&rest[start..start + 2 + end + 1]),
                }
                rest = &after[end + 1..];
            }
            None => {
                result.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    result.push_str(rest);
    result
}

/// Split a command line into arguments using shell-like quoting.
///
/// Fails on unbalanced quotes or when the line holds no arguments.
pub fn split_command_line(command: &str) -> Result<Vec<String>> {
    #[derive(PartialEq)]
    enum State {
        Normal,
        InSingle,
        InDouble,
    }

    let mut args = Vec::new();
    let mut current = String::new();
    let mut started = false;
    let mut state = State::Normal;

    for ch in command.chars() {
        match state {
            State::InSingle => {
                if ch == '\'' {
                    state = State::Normal;
                } else {
                    current.push(ch);
                }
            }
            State::InDouble => {
                if ch == '"' {
                    state = State::Normal;
                } else {
                    current.push(ch);
                }
            }
            State::Normal => match ch {
                '\'' => {
                    state = State::InSingle;
                    started = true;
                }
                '"' => {
                    state = State::InDouble;
                    started = true;
                }
                ' ' | '\t' | '\n' | '\r' => {
                    if started {
                        args.push(std::mem::take(&mut current));
                        started = false;
                    }
                }
                _ => {
                    current.push(ch);
                    started = true;
                }
            },
        }
    }

    if state != State::Normal {
        return Err(Error::CommandParse {
            command: command.to_string(),
            message: "unbalanced quotes".to_string(),
        });
    }
    if started {
        args.push(current);
    }
    if args.is_empty() {
        return Err(Error::CommandParse {
            command: command.to_string(),
            message: "no command to execute".to_string(),
        });
    }
    Ok(args)
}

/// Tokenize `template` and substitute placeholders in each argument.
pub fn resolve_command(template: &str, substitutions: &SubstitutionMap) -> Result<Vec<String>> {
    Ok(split_command_line(template)?
        .iter()
        .map(|arg| resolve(arg, substitutions))
        .collect())
}

/// Render an argument vector for logs and error messages.
///
/// Arguments containing whitespace or nothing at all are double-quoted.
pub fn display_command(argv: &[String]) -> String {
    argv.iter()
        .map(|arg| {
            if arg.is_empty() || arg.chars().any(char::is_whitespace) {
                format!("\"{}\"", arg)
            } else {
                arg.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> SubstitutionMap {
        pairs.iter().map(|(k, v)| (*k, *v)).collect()
    }

    #[test]
    fn test_resolve_known_placeholders() {
        let subs = map(&[("remoteRepo", "https://example.com/r.git"), ("localRepo", "/tmp/wc")]);
        assert_eq!(
            resolve("git clone ${remoteRepo} ${localRepo}", &subs),
            "git clone https://example.com/r.git /tmp/wc"
        );
    }

    #[test]
    fn test_resolve_unknown_placeholder_left_verbatim() {
        let subs = map(&[("localRepo", "/tmp/wc")]);
        assert_eq!(
            resolve("svn update -r ${revision} ${localRepo}", &subs),
            "svn update -r ${revision} /tmp/wc"
        );
    }

    #[test]
    fn test_resolve_unterminated_placeholder() {
        let subs = map(&[("a", "x")]);
        assert_eq!(resolve("echo ${a} ${a", &subs), "echo x ${a");
    }

    #[test]
    fn test_resolve_values_are_not_rescanned() {
        let subs = map(&[("a", "${b}"), ("b", "nope")]);
        assert_eq!(resolve("${a}", &subs), "${b}");
    }

    #[test]
    fn test_split_plain_and_quoted() {
        assert_eq!(
            split_command_line("echo -n \"test.connection\"").unwrap(),
            vec!["echo", "-n", "test.connection"]
        );
        assert_eq!(
            split_command_line("git commit -m 'two words'  --quiet").unwrap(),
            vec!["git", "commit", "-m", "two words", "--quiet"]
        );
    }

    #[test]
    fn test_split_keeps_newline_inside_quotes() {
        assert_eq!(
            split_command_line("printf \"r1 c1\nr2 c2\"").unwrap(),
            vec!["printf", "r1 c1\nr2 c2"]
        );
    }

    #[test]
    fn test_split_adjacent_segments_join() {
        assert_eq!(
            split_command_line("--message=\"a b\"c \"\"").unwrap(),
            vec!["--message=a bc", ""]
        );
    }

    #[test]
    fn test_split_errors() {
        assert!(matches!(
            split_command_line("echo \"open"),
            Err(Error::CommandParse { .. })
        ));
        let err = split_command_line("   ").unwrap_err();
        assert!(err.to_string().contains("no command to execute"));
    }

    #[test]
    fn test_resolve_command_keeps_values_whole() {
        let subs = map(&[("commitMessage", "commit message"), ("localRepo", "/tmp/my wc")]);
        assert_eq!(
            resolve_command("svn commit -m ${commitMessage} ${localRepo}", &subs).unwrap(),
            vec!["svn", "commit", "-m", "commit message", "/tmp/my wc"]
        );
    }

    #[test]
    fn test_repeated_keys() {
        let subs = map(&[
            ("file.0", "file0"),
            ("file.1", "file1"),
            ("file.2", "file2"),
            ("notfile", "notfile"),
        ]);
        assert_eq!(subs.repeated_keys("file"), vec!["file.0", "file.1", "file.2"]);
        assert!(subs.repeated_keys("localFile").is_empty());
    }

    #[test]
    fn test_repeated_keys_numeric_order() {
        let mut subs = SubstitutionMap::new();
        subs.insert_indexed("localFile", (0..12).map(|i| format!("f{}", i)));
        let keys = subs.repeated_keys("localFile");
        assert_eq!(keys.len(), 12);
        assert_eq!(keys[2], "localFile.2");
        assert_eq!(keys[10], "localFile.10");
    }

    #[test]
    fn test_with_value_binds_family_name() {
        let subs = map(&[("localFile.0", "a"), ("localFile.1", "b"), ("other", "c")]);
        let bound = subs.with_value("localFile", "localFile.1");
        assert_eq!(resolve("add ${localFile} ${other}", &bound), "add b c");
        // source map untouched
        assert_eq!(subs.get("localFile"), None);
    }

    #[test]
    fn test_insert_missing_keeps_existing() {
        let mut subs = map(&[("revision", "42")]);
        let extra: BTreeMap<String, String> = [
            ("revision".to_string(), "HEAD".to_string()),
            ("branch".to_string(), "main".to_string()),
        ]
        .into_iter()
        .collect();
        subs.insert_missing(&extra);
        assert_eq!(subs.get("revision"), Some("42"));
        assert_eq!(subs.get("branch"), Some("main"));
    }

    #[test]
    fn test_display_command() {
        let argv: Vec<String> = ["git", "commit", "-m", "two words", ""]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(display_command(&argv), "git commit -m \"two words\" \"\"");
    }
}
