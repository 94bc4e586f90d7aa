//! Command-line interface definition.

use clap::{Parser, Subcommand};
use kikoeru_location::MediaKind;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "kikoeru", version, about)]
pub struct Cli {
    /// Configuration file (TOML, YAML or JSON)
    #[arg(short, long, global = true, env = "KIKOERU_CONFIG")]
    pub config: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Append path fragments to a base path or URL
    Join {
        /// Local path or absolute URL
        base: String,
        /// Fragments to append, in order; may contain `/` or `\`
        fragments: Vec<String>,
    },
    /// Resolve where a track is served from, using the configuration
    Locate {
        /// Resolve the download location instead of the stream location
        #[arg(long)]
        download: bool,
        root_folder: String,
        work_dir: String,
        /// Subfolder inside the work; pass "" for none
        subfolder: String,
        title: String,
    },
    /// Normalize a JSON array of raw work rows into API records
    Normalize {
        /// Reduce `updated_at` to a date
        #[arg(long)]
        date_only: bool,
        /// Input file; reads stdin when omitted
        input: Option<PathBuf>,
    },
}

/// Maps the `--download` flag onto the kind of access being resolved.
pub fn media_kind(download: bool) -> MediaKind {
    match download {
        true => MediaKind::Download,
        false => MediaKind::Stream,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use rstest::rstest;

    #[test]
    fn test_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_join_keeps_empty_fragments() {
        let cli = Cli::try_parse_from(["kikoeru", "join", "/media/stream/", "VoiceWork", "", "t4.mp3"]).unwrap();
        match cli.command {
            Command::Join { base, fragments } => {
                assert_eq!(base, "/media/stream/");
                assert_eq!(fragments, ["VoiceWork", "", "t4.mp3"]);
            },
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[rstest]
    #[case(&["kikoeru", "locate", "VoiceWork", "RJ1", "", "t.mp3"], MediaKind::Stream)]
    #[case(&["kikoeru", "locate", "--download", "VoiceWork", "RJ1", "", "t.mp3"], MediaKind::Download)]
    fn test_locate(#[case] args: &[&str], #[case] expected: MediaKind) {
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Command::Locate { download, subfolder, .. } => {
                assert_eq!(media_kind(download), expected);
                assert_eq!(subfolder, "");
            },
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_normalize_with_global_config() {
        let cli = Cli::try_parse_from(["kikoeru", "normalize", "--date-only", "rows.json", "-c", "kikoeru.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("kikoeru.toml")));
        assert!(matches!(
            cli.command,
            Command::Normalize { date_only: true, input: Some(_) }
        ));
    }

    #[test]
    fn test_locate_requires_all_coordinates() {
        assert!(Cli::try_parse_from(["kikoeru", "locate", "VoiceWork", "RJ1"]).is_err());
    }
}
