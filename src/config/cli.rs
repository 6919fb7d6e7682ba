use crate::domain::model::{Action, ProjectName};
use crate::utils::error::Result;
use clap::{Args, Parser};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "projadm", version)]
#[command(about = "grok configuration management.")]
pub struct CliArgs {
    /// Enable debug prints
    #[arg(short = 'D', long)]
    pub debug: bool,

    /// OpenGrok instance base directory [default: /var/opengrok]
    #[arg(short, long)]
    pub base: Option<PathBuf>,

    /// OpenGrok read-only configuration file
    #[arg(short = 'R', long)]
    pub roconfig: Option<PathBuf>,

    /// uri of the webapp with context path [default: http://localhost:8080/source]
    #[arg(short = 'U', long)]
    pub uri: Option<String>,

    /// path to the ConfigMerge binary
    #[arg(short, long)]
    pub configmerge: Option<PathBuf>,

    /// Upload configuration at the end
    #[arg(short, long)]
    pub upload: bool,

    /// Do not run any commands or modify any config, just report. Usually implies the --debug option.
    #[arg(short, long)]
    pub noop: bool,

    /// TOML file with default settings
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Timeout in seconds for web application requests [default: 30]
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Emit log lines as JSON
    #[arg(long)]
    pub log_json: bool,

    #[command(flatten)]
    pub action: ActionArgs,
}

#[derive(Debug, Clone, Default, Args)]
#[group(multiple = false)]
pub struct ActionArgs {
    /// Add project (assumes its source is available under source root)
    #[arg(short, long, value_name = "project", num_args = 1..)]
    pub add: Vec<String>,

    /// Delete project and its data and source code
    #[arg(short, long, value_name = "project", num_args = 1..)]
    pub delete: Vec<String>,

    /// Refresh configuration. If read-only configuration is supplied, it is merged with current configuration.
    #[arg(short, long)]
    pub refresh: bool,
}

impl ActionArgs {
    /// `None` when no action was requested.
    pub fn to_action(&self) -> Result<Option<Action>> {
        let parse_all = |names: &[String]| -> Result<Vec<ProjectName>> {
            names.iter().map(|n| ProjectName::parse(n)).collect()
        };

        if !self.add.is_empty() {
            Ok(Some(Action::Add(parse_all(&self.add)?)))
        } else if !self.delete.is_empty() {
            Ok(Some(Action::Delete(parse_all(&self.delete)?)))
        } else if self.refresh {
            Ok(Some(Action::Refresh))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn test_parse_add_multiple_projects() {
        let args =
            CliArgs::try_parse_from(["projadm", "-b", "/srv/grok", "-a", "foo", "bar"]).unwrap();
        assert_eq!(args.base, Some(PathBuf::from("/srv/grok")));
        let action = args.action.to_action().unwrap().unwrap();
        assert_eq!(
            action,
            Action::Add(vec![
                ProjectName::parse("foo").unwrap(),
                ProjectName::parse("bar").unwrap()
            ])
        );
    }

    #[test]
    fn test_actions_are_mutually_exclusive() {
        assert!(CliArgs::try_parse_from(["projadm", "-a", "foo", "-r"]).is_err());
        assert!(CliArgs::try_parse_from(["projadm", "-a", "foo", "-d", "bar"]).is_err());
    }

    #[test]
    fn test_no_action() {
        let args = CliArgs::try_parse_from(["projadm", "-n", "-D"]).unwrap();
        assert!(args.noop);
        assert!(args.debug);
        assert_eq!(args.action.to_action().unwrap(), None);
    }

    #[test]
    fn test_invalid_project_name() {
        let args = CliArgs::try_parse_from(["projadm", "-d", "../etc"]).unwrap();
        assert!(args.action.to_action().is_err());
    }
}
