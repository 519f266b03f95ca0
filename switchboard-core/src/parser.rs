//! Parser for command line arguments.
//!
//! Turns a flat argument list into an [`Invocation`]. Parsing never fails:
//! tokens that cannot be classified are dropped, and a key with no usable
//! value is read as a flag that is present.

use crate::invocation::Invocation;

/// Converts raw process arguments into an [`Invocation`].
pub trait ArgumentParser: Send + Sync {
    fn parse(&self, args: &[String]) -> Invocation;
}

/// The standard dash-prefixed key/value tokenizer.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultArgumentParser;

impl ArgumentParser for DefaultArgumentParser {
    fn parse(&self, args: &[String]) -> Invocation {
        parse_args(args)
    }
}

/// Parse a list of command line arguments
///
/// The first element is the command name. After it:
/// - `--key value` / `-k value`: parameter with the raw value
/// - `--key true` / `--key false`: flag with that value
/// - `--key` followed by another key or nothing: flag set to true
/// - anything else not consumed as a value is ignored
///
/// # Arguments
/// * `args` - List of command line arguments to parse
///
/// # Returns
/// * `Invocation` - Structured representation of the arguments
pub fn parse_args(args: &[String]) -> Invocation {
    let mut invocation = Invocation::new();

    let Some((command, rest)) = args.split_first() else {
        return invocation;
    };
    invocation.set_command(command);

    let mut i = 0;
    while i < rest.len() {
        let arg = &rest[i];

        let Some(key) = strip_dashes(arg) else {
            // Stray positional value
            i += 1;
            continue;
        };

        let lookahead = rest.get(i + 1).map(String::as_str).unwrap_or("");
        if classify(key, lookahead, &mut invocation) {
            i += 1; // Skip the value we just consumed
        }

        i += 1;
    }

    invocation
}

/// Strip the `--` or `-` prefix from a candidate key.
fn strip_dashes(arg: &str) -> Option<&str> {
    arg.strip_prefix("--").or_else(|| arg.strip_prefix('-'))
}

/// Record `key` according to its lookahead. Returns true if the lookahead was consumed.
fn classify(key: &str, lookahead: &str, invocation: &mut Invocation) -> bool {
    if lookahead.is_empty() || lookahead.starts_with('-') {
        // Next thing is another key or nothing: the flag is present
        invocation.put_flag(key, true);
        return false;
    }

    match lookahead.trim().to_lowercase().as_str() {
        "true" => invocation.put_flag(key, true),
        "false" => invocation.put_flag(key, false),
        _ => invocation.put_parameter(key, lookahead),
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Invocation {
        let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        parse_args(&args)
    }

    #[test]
    fn empty_arguments() {
        let invocation = parse(&[]);
        assert!(invocation.command().is_none());
        assert!(invocation.parameters().is_empty());
        assert!(invocation.flags().is_empty());
    }

    #[test]
    fn command_only() {
        let invocation = parse(&["  Doof "]);
        assert_eq!(invocation.command(), Some("doof"));
        assert!(invocation.parameters().is_empty());
        assert!(invocation.flags().is_empty());
    }

    mod parameters {
        use super::*;

        #[test]
        fn long_parameter() {
            let invocation = parse(&["doof", "--param", "works"]);
            assert_eq!(invocation.parameters().len(), 1);
            assert!(invocation.flags().is_empty());
            assert_eq!(invocation.parameter("param"), Some("works"));
        }

        #[test]
        fn short_parameter() {
            let invocation = parse(&["doof", "-p", "works"]);
            assert_eq!(invocation.parameter("p"), Some("works"));
        }

        #[test]
        fn two_parameters() {
            let invocation = parse(&["doof", "--param", "works", "-p2", "works2"]);
            assert_eq!(invocation.parameters().len(), 2);
            assert_eq!(invocation.parameter("param"), Some("works"));
            assert_eq!(invocation.parameter("p2"), Some("works2"));
        }

        #[test]
        fn value_case_is_preserved() {
            let invocation = parse(&["doof", "--Name", "World"]);
            assert_eq!(invocation.parameter("name"), Some("World"));
        }

        #[test]
        fn numeric_value() {
            let invocation = parse(&["doof", "--count", "42"]);
            assert_eq!(invocation.parameter("count"), Some("42"));
        }
    }

    mod flags {
        use super::*;

        #[test]
        fn bare_flag() {
            let invocation = parse(&["cmd", "--flag"]);
            assert_eq!(invocation.flag("flag"), Some(true));
            assert!(invocation.parameters().is_empty());
        }

        #[test]
        fn explicit_true_matches_bare_flag() {
            let bare = parse(&["cmd", "--flag"]);
            let explicit = parse(&["cmd", "--flag", "true"]);
            assert_eq!(bare.flags(), explicit.flags());
        }

        #[test]
        fn explicit_false() {
            let invocation = parse(&["cmd", "--flag", "false"]);
            assert_eq!(invocation.flag("flag"), Some(false));
            assert!(invocation.parameters().is_empty());
        }

        #[test]
        fn boolean_words_are_case_insensitive() {
            let invocation = parse(&["cmd", "-a", " TRUE ", "-b", "False"]);
            assert_eq!(invocation.flag("a"), Some(true));
            assert_eq!(invocation.flag("b"), Some(false));
        }

        #[test]
        fn flag_followed_by_key_is_not_consumed() {
            let invocation = parse(&["cmd", "-v", "--name", "x"]);
            assert_eq!(invocation.flag("v"), Some(true));
            assert_eq!(invocation.parameter("name"), Some("x"));
        }

        #[test]
        fn empty_lookahead_is_a_flag() {
            let invocation = parse(&["cmd", "--quiet", ""]);
            assert_eq!(invocation.flag("quiet"), Some(true));
        }

        #[test]
        fn lone_dash_is_an_empty_flag() {
            let invocation = parse(&["cmd", "-s", "-"]);
            assert_eq!(invocation.flag("s"), Some(true));
            assert_eq!(invocation.flag(""), Some(true));
            assert!(invocation.parameters().is_empty());
        }

        #[test]
        fn negative_number_reads_as_next_key() {
            let invocation = parse(&["cmd", "--offset", "-5"]);
            assert_eq!(invocation.flag("offset"), Some(true));
            assert_eq!(invocation.flag("5"), Some(true));
        }
    }

    #[test]
    fn parameter_and_flag_together() {
        let a = parse(&["cmd", "--param", "works", "--flag"]);
        let b = parse(&["cmd", "--flag", "--param", "works"]);

        for invocation in [a, b] {
            assert_eq!(invocation.parameters().len(), 1);
            assert_eq!(invocation.flags().len(), 1);
            assert_eq!(invocation.parameter("param"), Some("works"));
            assert_eq!(invocation.flag("flag"), Some(true));
        }
    }

    #[test]
    fn stray_positionals_are_ignored() {
        let invocation = parse(&["cmd", "loose", "--name", "x", "extra"]);
        assert_eq!(invocation.parameters().len(), 1);
        assert!(invocation.flags().is_empty());
        assert_eq!(invocation.parameter("name"), Some("x"));
    }

    #[test]
    fn later_classification_wins() {
        let invocation = parse(&["cmd", "--mode", "fast", "--mode"]);
        assert_eq!(invocation.parameter("mode"), None);
        assert_eq!(invocation.flag("mode"), Some(true));
    }
}
