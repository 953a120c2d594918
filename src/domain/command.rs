//! Command line construction for archive operations.
//!
//! Every [`ArchiveCommand`] maps to exactly one shell command string.
//! Excludes are rendered differently per tool: `unzip` takes one joined
//! `-x` clause, `unrar` takes one `-x <name>` pair per exclude.

use std::path::Path;

use crate::domain::{ArchiveCommand, ArgList, DomainError, DomainResult};

/// Build the shell command line for `command`.
///
/// `unrar_binary` is the concrete unrar-or-rar binary resolved by the caller;
/// it is only consulted for [`ArchiveCommand::Unrar`].
pub fn build_command(
    command: &ArchiveCommand,
    unrar_binary: Option<&Path>,
) -> DomainResult<String> {
    let line = match command {
        ArchiveCommand::Tar {
            options,
            tarfile,
            sources,
        } => format!("tar -{} {} {}", options, tarfile, sources.joined()),
        ArchiveCommand::Gzip { sourcefile } => format!("gzip {}", sourcefile),
        ArchiveCommand::Gunzip { gzipfile } => format!("gunzip {}", gzipfile),
        ArchiveCommand::Zip { zipfile, sources } => {
            format!("zip {} {}", zipfile, sources.joined())
        }
        ArchiveCommand::Unzip {
            zipfile,
            dest,
            excludes,
        } => {
            let mut cmd = format!("unzip {} -d {}", zipfile, dest);
            if let Some(excludes) = non_empty(excludes) {
                cmd.push_str(&format!(" -x {}", excludes.joined()));
            }
            cmd
        }
        ArchiveCommand::Rar { rarfile, sources } => {
            format!("rar a -idp {} {}", rarfile, sources.joined())
        }
        ArchiveCommand::Unrar {
            rarfile,
            dest,
            excludes,
        } => {
            let binary =
                unrar_binary.ok_or_else(|| DomainError::BinaryNotResolved("unrar".into()))?;
            let mut args = vec![
                binary.display().to_string(),
                "x".to_string(),
                "-idp".to_string(),
                rarfile.clone(),
            ];
            if let Some(excludes) = non_empty(excludes) {
                for exclude in excludes.normalize() {
                    args.push("-x".to_string());
                    args.push(exclude);
                }
            }
            args.push(dest.clone());
            args.join(" ")
        }
    };
    Ok(line)
}

fn non_empty(excludes: &Option<ArgList>) -> Option<&ArgList> {
    excludes.as_ref().filter(|e| !e.is_empty())
}
