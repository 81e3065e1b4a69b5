use crate::models::DefaultTabVariant;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// WordPress mobile tooling for the My Site tab experiment and Jetpack Social settings
#[derive(Parser, Debug)]
#[command(name = "wpmobile")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Run in interactive mode
    #[arg(short, long)]
    pub interactive: bool,

    /// Directory holding settings.toml and prefs.toml
    #[arg(long, global = true, env = "WPMOBILE_CONFIG_DIR")]
    pub config_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// My Site default tab experiment
    Experiment {
        #[command(subcommand)]
        action: ExperimentAction,
    },

    /// Jetpack Social publish settings
    Social {
        #[command(subcommand)]
        action: SocialAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ExperimentAction {
    /// Show whether the experiment runs and which variant is assigned
    Status,

    /// Assign a variant if the experiment runs and none is assigned yet
    Check,

    /// Re-attach the experiment property to analytics
    Refresh,

    /// Replace the assigned variant
    Override {
        /// Variant to switch to
        #[arg(value_enum)]
        variant: DefaultTabVariant,
    },
}

#[derive(Subcommand, Debug)]
pub enum SocialAction {
    /// Render the Jetpack Social section for a set of connections
    Preview {
        /// TOML file with connections, share limit and message
        #[arg(short, long)]
        file: PathBuf,

        /// Treat the post as already published
        #[arg(long)]
        published: bool,

        /// Share message, replaces the one from the file
        #[arg(short, long)]
        message: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_experiment_override() {
        let cli = Cli::parse_from(["wpmobile", "experiment", "override", "site-menu"]);
        match cli.command {
            Some(Commands::Experiment {
                action: ExperimentAction::Override { variant },
            }) => assert_eq!(variant, DefaultTabVariant::SiteMenu),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_social_preview() {
        let cli = Cli::parse_from([
            "wpmobile",
            "--config-dir",
            "/tmp/wp",
            "social",
            "preview",
            "--file",
            "connections.toml",
            "--published",
        ]);

        assert_eq!(cli.config_dir, Some(PathBuf::from("/tmp/wp")));
        match cli.command {
            Some(Commands::Social {
                action: SocialAction::Preview { file, published, message },
            }) => {
                assert_eq!(file, PathBuf::from("connections.toml"));
                assert!(published);
                assert!(message.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_no_subcommand() {
        let cli = Cli::parse_from(["wpmobile", "-i"]);
        assert!(cli.interactive);
        assert!(cli.command.is_none());
    }
}
