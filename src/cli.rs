//! Command-line arguments and their mapping onto a [`RunConfig`].

use std::path::PathBuf;

use clap::Parser;

use crate::config::{Config, RunConfig};

const EXAMPLES: &str = "\
Examples:
  opml2feedlist feeds.opml
  opml2feedlist tech_feeds.opml my_feeds.txt
  opml2feedlist '*.opml' combined.txt
  opml2feedlist tech.opml news.opml linux.opml all_feeds.txt

If two or more paths are given and the last one does not end in .opml,
it is used as the output file. Otherwise output goes to feedlist.txt.";

/// Suffix that marks a trailing positional argument as an input, not the output.
const OPML_SUFFIX: &str = ".opml";

#[derive(Parser, Debug)]
#[command(
    name = "opml2feedlist",
    version,
    about = "Convert OPML subscription lists to a feedlist.txt for rssfeedz",
    after_help = EXAMPLES
)]
pub struct Args {
    /// OPML files or wildcard patterns (`*`, `?`), optionally followed by the output file
    #[arg(required = true, value_name = "INPUT")]
    pub paths: Vec<String>,

    /// Write bare URLs only: no titles, section markers or blank lines
    #[arg(long)]
    pub no_comments: bool,

    /// Skip feeds whose URL is not an absolute http(s) URL
    #[arg(long)]
    pub http_only: bool,

    /// Read defaults from this config file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl Args {
    /// Applies the output-path heuristic and layers flags over `config`.
    pub fn into_run_config(self, config: &Config) -> RunConfig {
        let (input_patterns, output) = split_output(self.paths);
        RunConfig {
            input_patterns,
            output_path: PathBuf::from(output.unwrap_or_else(|| config.output.clone())),
            add_comments: config.comments && !self.no_comments,
            http_only: config.http_only || self.http_only,
        }
    }
}

/// Splits the output path off the positional arguments.
///
/// With two or more positionals, the last one is the output unless it ends
/// in `.opml`. An output file actually named `something.opml` is therefore
/// read as an input; this matches what existing invocations rely on.
pub fn split_output(mut paths: Vec<String>) -> (Vec<String>, Option<String>) {
    let last_is_output =
        paths.len() >= 2 && paths.last().is_some_and(|last| !last.ends_with(OPML_SUFFIX));
    if last_is_output {
        let output = paths.pop();
        (paths, output)
    } else {
        (paths, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_config(argv: &[&str]) -> RunConfig {
        let mut full = vec!["opml2feedlist"];
        full.extend_from_slice(argv);
        Args::try_parse_from(full)
            .expect("arguments should parse")
            .into_run_config(&Config::default())
    }

    #[test]
    fn test_single_input_uses_default_output() {
        let run = run_config(&["feeds.opml"]);
        assert_eq!(run.input_patterns, ["feeds.opml"]);
        assert_eq!(run.output_path, PathBuf::from("feedlist.txt"));
        assert!(run.add_comments);
        assert!(!run.http_only);
    }

    #[test]
    fn test_single_non_opml_argument_is_input() {
        let run = run_config(&["out.txt"]);
        assert_eq!(run.input_patterns, ["out.txt"]);
        assert_eq!(run.output_path, PathBuf::from("feedlist.txt"));
    }

    #[test]
    fn test_trailing_non_opml_is_output() {
        let run = run_config(&["tech.opml", "news.opml", "all_feeds.txt"]);
        assert_eq!(run.input_patterns, ["tech.opml", "news.opml"]);
        assert_eq!(run.output_path, PathBuf::from("all_feeds.txt"));
    }

    #[test]
    fn test_trailing_opml_is_input() {
        let run = run_config(&["tech.opml", "result.opml"]);
        assert_eq!(run.input_patterns, ["tech.opml", "result.opml"]);
        assert_eq!(run.output_path, PathBuf::from("feedlist.txt"));
    }

    #[test]
    fn test_trailing_pattern_without_suffix_is_output() {
        let run = run_config(&["a.opml", "*.xml"]);
        assert_eq!(run.input_patterns, ["a.opml"]);
        assert_eq!(run.output_path, PathBuf::from("*.xml"));
    }

    #[test]
    fn test_no_comments_anywhere() {
        for argv in [
            ["--no-comments", "a.opml", "out.txt"],
            ["a.opml", "--no-comments", "out.txt"],
            ["a.opml", "out.txt", "--no-comments"],
        ] {
            let run = run_config(&argv);
            assert_eq!(run.input_patterns, ["a.opml"]);
            assert_eq!(run.output_path, PathBuf::from("out.txt"));
            assert!(!run.add_comments);
        }
    }

    #[test]
    fn test_no_comments_not_counted_as_positional() {
        let run = run_config(&["a.opml", "--no-comments"]);
        assert_eq!(run.input_patterns, ["a.opml"]);
        assert_eq!(run.output_path, PathBuf::from("feedlist.txt"));
    }

    #[test]
    fn test_missing_inputs_rejected() {
        assert!(Args::try_parse_from(["opml2feedlist"]).is_err());
        assert!(Args::try_parse_from(["opml2feedlist", "--no-comments"]).is_err());
    }

    #[test]
    fn test_config_supplies_defaults() {
        let config = Config {
            output: "custom.txt".to_string(),
            comments: false,
            http_only: true,
        };
        let run = Args::try_parse_from(["opml2feedlist", "a.opml"])
            .unwrap()
            .into_run_config(&config);
        assert_eq!(run.output_path, PathBuf::from("custom.txt"));
        assert!(!run.add_comments);
        assert!(run.http_only);
    }

    #[test]
    fn test_command_line_output_beats_config() {
        let config = Config {
            output: "custom.txt".to_string(),
            ..Config::default()
        };
        let run = Args::try_parse_from(["opml2feedlist", "a.opml", "mine.txt"])
            .unwrap()
            .into_run_config(&config);
        assert_eq!(run.output_path, PathBuf::from("mine.txt"));
    }

    #[test]
    fn test_config_flag_parsed() {
        let args =
            Args::try_parse_from(["opml2feedlist", "--config", "my.toml", "a.opml"]).unwrap();
        assert_eq!(args.config, Some(PathBuf::from("my.toml")));
        assert_eq!(args.paths, ["a.opml"]);
    }

    #[test]
    fn test_split_output_edge_cases() {
        assert_eq!(split_output(Vec::new()), (Vec::new(), None));
        assert_eq!(
            split_output(vec!["a.OPML".into(), "b.opml".into()]),
            (vec!["a.OPML".to_string(), "b.opml".to_string()], None)
        );
        // Suffix check is case-sensitive
        assert_eq!(
            split_output(vec!["a.opml".into(), "B.OPML".into()]),
            (vec!["a.opml".to_string()], Some("B.OPML".to_string()))
        );
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
