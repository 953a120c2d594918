//! Command dispatch: turns parsed arguments into archive requests

use std::io;

use clap::CommandFactory;
use tracing::{debug, instrument};

use crate::application::services::ArchiveService;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::output;
use crate::cli::CliResult;
use crate::config::{global_config_path, Settings};
use crate::domain::{ArchiveCommand, ArchiveRequest, ArgList};
use crate::infrastructure::di::ServiceContainer;

/// Execute the parsed CLI command.
pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let Some(command) = &cli.command else {
        return Ok(());
    };

    match command {
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        Commands::Config { command } => cmd_config(cli, command),
        Commands::List => {
            let container = container(cli)?;
            cmd_list(&container.archive_service()?)
        }
        archive => {
            let request = archive_request(cli, archive)?;
            let container = container(cli)?;
            cmd_archive(&container.archive_service()?, &request, cli.dry_run)
        }
    }
}

fn container(cli: &Cli) -> CliResult<ServiceContainer> {
    let settings = Settings::load(cli.config.as_deref())?;
    Ok(ServiceContainer::new(settings))
}

fn excludes(values: &[String]) -> Option<ArgList> {
    if values.is_empty() {
        None
    } else {
        Some(ArgList::from_values(values.to_vec()))
    }
}

/// Map an archive subcommand onto a request.
pub fn archive_request(cli: &Cli, command: &Commands) -> CliResult<ArchiveRequest> {
    let archive = match command {
        Commands::Tar {
            options,
            tarfile,
            sources,
        } => ArchiveCommand::Tar {
            options: options.trim_start_matches('-').to_string(),
            tarfile: tarfile.clone(),
            sources: ArgList::from_values(sources.clone()),
        },
        Commands::Gzip { sourcefile } => ArchiveCommand::Gzip {
            sourcefile: sourcefile.clone(),
        },
        Commands::Gunzip { gzipfile } => ArchiveCommand::Gunzip {
            gzipfile: gzipfile.clone(),
        },
        Commands::Zip { zipfile, sources } => ArchiveCommand::Zip {
            zipfile: zipfile.clone(),
            sources: ArgList::from_values(sources.clone()),
        },
        Commands::Unzip {
            zipfile,
            dest,
            excludes: ex,
        } => ArchiveCommand::Unzip {
            zipfile: zipfile.clone(),
            dest: dest.clone(),
            excludes: excludes(ex),
        },
        Commands::Rar { rarfile, sources } => ArchiveCommand::Rar {
            rarfile: rarfile.clone(),
            sources: ArgList::from_values(sources.clone()),
        },
        Commands::Unrar {
            rarfile,
            dest,
            excludes: ex,
        } => ArchiveCommand::Unrar {
            rarfile: rarfile.clone(),
            dest: dest.clone(),
            excludes: excludes(ex),
        },
        other => {
            return Err(crate::cli::CliError::Usage(format!(
                "not an archive command: {other:?}"
            )))
        }
    };

    Ok(ArchiveRequest::new(archive)
        .cwd(cli.cwd.clone())
        .template(cli.template.clone()))
}

#[instrument(skip(service))]
fn cmd_archive(service: &ArchiveService, request: &ArchiveRequest, dry_run: bool) -> CliResult<()> {
    if dry_run {
        output::info(&service.preview(request)?);
        return Ok(());
    }

    let lines = service.run(request)?;
    debug!("cmd_archive: {} output lines", lines.len());
    for line in lines {
        output::info(&line);
    }
    Ok(())
}

fn cmd_list(service: &ArchiveService) -> CliResult<()> {
    output::header("Archive operations");
    for entry in service.registry().entries() {
        let op = entry.operation;
        match &entry.binary {
            Some(binary) => output::success_detail(&format!(
                "{:<7} ({}) {}",
                op.name(),
                op.alias(),
                binary.display()
            )),
            None => output::failure(&format!(
                "{:<7} ({}) missing: {}",
                op.name(),
                op.alias(),
                op.required_binaries().join(" or ")
            )),
        }
    }
    Ok(())
}

fn cmd_config(cli: &Cli, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = Settings::load(cli.config.as_deref())?;
            output::info(&settings.to_toml()?);
        }
        ConfigCommands::Path => {
            match global_config_path() {
                Some(path) => {
                    let state = if path.exists() { "exists" } else { "not found" };
                    output::action("global", &format!("{} ({})", path.display(), state));
                }
                None => output::warning("no global config directory on this platform"),
            }
            if let Some(path) = &cli.config {
                output::action("explicit", &path.display());
            }
        }
    }
    Ok(())
}
