//! Property-based tests for substitution, tokenizing and history parsing.
//!
//! These tests use proptest to generate random inputs and verify that
//! invariants hold for all possible inputs.

#[cfg(test)]
mod proptest_tests {
    use crate::history::parse_history;
    use crate::substitution::{resolve, resolve_command, split_command_line, SubstitutionMap};
    use proptest::prelude::*;

    // ============================================================================
    // resolve property tests
    // ============================================================================

    proptest! {
        /// Property: text without placeholders is returned unchanged
        #[test]
        fn resolve_without_placeholders_is_identity(input in "[^$]*") {
            let subs: SubstitutionMap = [("name", "value")].into_iter().collect();
            prop_assert_eq!(resolve(&input, &subs), input);
        }

        /// Property: an empty map never changes the template
        #[test]
        fn resolve_with_empty_map_is_identity(input in ".*") {
            prop_assert_eq!(resolve(&input, &SubstitutionMap::new()), input);
        }

        /// Property: a known placeholder is fully replaced
        #[test]
        fn resolve_replaces_known_placeholder(
            prefix in "[a-z ]{0,10}",
            value in "[a-zA-Z0-9 /._-]{0,20}",
            suffix in "[a-z ]{0,10}",
        ) {
            let subs: SubstitutionMap = [("localRepo", value.as_str())].into_iter().collect();
            let template = format!("{}${{localRepo}}{}", prefix, suffix);
            prop_assert_eq!(resolve(&template, &subs), format!("{}{}{}", prefix, value, suffix));
        }
    }

    // ============================================================================
    // split_command_line property tests
    // ============================================================================

    proptest! {
        /// Property: unquoted words separated by spaces split back into the same words
        #[test]
        fn split_plain_words(words in prop::collection::vec("[a-zA-Z0-9_./=-]{1,8}", 1..6)) {
            let line = words.join(" ");
            prop_assert_eq!(split_command_line(&line).unwrap(), words);
        }

        /// Property: a double-quoted argument survives as one argument
        #[test]
        fn split_double_quoted_is_single_argument(arg in "[a-zA-Z0-9 ]{1,20}") {
            let line = format!("echo \"{}\"", arg);
            let argv = split_command_line(&line).unwrap();
            prop_assert_eq!(argv.len(), 2);
            prop_assert_eq!(&argv[1], &arg);
        }

        /// Property: substituted values never change the argument count
        #[test]
        fn substitution_preserves_argument_count(value in "[a-zA-Z0-9 '\"]{0,20}") {
            let subs: SubstitutionMap = [("commitMessage", value.as_str())].into_iter().collect();
            let argv = resolve_command("vcs commit -m ${commitMessage}", &subs).unwrap();
            prop_assert_eq!(argv.len(), 4);
            prop_assert_eq!(&argv[3], &value);
        }
    }

    // ============================================================================
    // parse_history property tests
    // ============================================================================

    proptest! {
        /// Property: every "revision comment" line becomes exactly one item
        #[test]
        fn history_item_per_well_formed_line(
            lines in prop::collection::vec(("[a-f0-9]{1,8}", "[a-zA-Z0-9][a-zA-Z0-9 ]{0,15}"), 0..8)
        ) {
            let output = lines
                .iter()
                .map(|(rev, comment)| format!("{} {}", rev, comment))
                .collect::<Vec<_>>()
                .join("\n");
            let history = parse_history(&output);
            prop_assert_eq!(history.len(), lines.len());
            for (item, (rev, comment)) in history.iter().zip(lines.iter()) {
                prop_assert_eq!(&item.revision, rev);
                prop_assert_eq!(&item.comment, comment);
            }
        }

        /// Property: lines without whitespace never produce items
        #[test]
        fn history_single_words_are_dropped(words in prop::collection::vec("[a-z0-9]{1,10}", 0..5)) {
            prop_assert!(parse_history(&words.join("\n")).is_empty());
        }
    }
}
