//! Tests for ShellExecutor and PathLocator

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Output;
use std::sync::{Arc, Mutex};

use tempfile::TempDir;

use rsarchive::infrastructure::template::{HostFacts, TemplateRenderer};
use rsarchive::infrastructure::traits::{
    BinaryLocator, CommandExecutor, CommandRunner, PathLocator, RealCommandRunner, ShellExecutor,
};
use rsarchive::infrastructure::InfraError;

fn renderer() -> TemplateRenderer {
    TemplateRenderer::new(
        HostFacts {
            id: "web01".into(),
            hostname: "web01".into(),
        },
        BTreeMap::from([("dest".to_string(), "/srv/out".to_string())]),
    )
}

type Invocation = (String, Vec<String>, Option<PathBuf>, Vec<(String, OsString)>);

/// Runner capturing invocations; answers with a fixed exit status.
struct CapturingRunner {
    seen: Mutex<Vec<Invocation>>,
    status: i32,
    stdout: &'static str,
}

impl CapturingRunner {
    fn new(status: i32, stdout: &'static str) -> Self {
        Self {
            seen: Mutex::new(vec![]),
            status,
            stdout,
        }
    }
}

#[cfg(unix)]
impl CommandRunner for CapturingRunner {
    fn run(
        &self,
        cmd: &str,
        args: &[&str],
        cwd: Option<&Path>,
        env: &[(&str, OsString)],
    ) -> io::Result<Output> {
        use std::os::unix::process::ExitStatusExt;

        self.seen.lock().unwrap().push((
            cmd.to_string(),
            args.iter().map(|a| a.to_string()).collect(),
            cwd.map(PathBuf::from),
            env.iter().map(|(k, v)| (k.to_string(), v.clone())).collect(),
        ));
        Ok(Output {
            // wait status: exit code lives in the high byte
            status: std::process::ExitStatus::from_raw(self.status << 8),
            stdout: self.stdout.as_bytes().to_vec(),
            stderr: b"tar: f1: Cannot stat\n".to_vec(),
        })
    }
}

#[cfg(unix)]
#[test]
fn given_template_when_execute_then_renders_before_running() {
    // Arrange
    let runner = Arc::new(CapturingRunner::new(0, "a\nb\n"));
    let executor = ShellExecutor::new(runner.clone(), renderer(), "sh");

    // Act
    let lines = executor
        .execute(
            "unzip /tmp/{{ host.id }}.zip -d {{ vars.dest }}",
            Some(Path::new("/tmp")),
            Some("jinja"),
        )
        .unwrap();

    // Assert
    assert_eq!(lines, vec!["a", "b"]);
    let seen = runner.seen.lock().unwrap();
    assert_eq!(seen[0].0, "sh");
    assert_eq!(
        seen[0].1,
        vec!["-c".to_string(), "unzip /tmp/web01.zip -d /srv/out".to_string()]
    );
    assert_eq!(seen[0].2.as_deref(), Some(Path::new("/tmp")));
}

#[cfg(unix)]
#[test]
fn given_no_template_when_execute_then_command_runs_verbatim() {
    let runner = Arc::new(CapturingRunner::new(0, ""));
    let executor = ShellExecutor::new(runner.clone(), renderer(), "bash");

    let lines = executor.execute("gzip {{ x }}", None, None).unwrap();

    assert!(lines.is_empty());
    let seen = runner.seen.lock().unwrap();
    assert_eq!(seen[0].1[1], "gzip {{ x }}");
    assert_eq!(seen[0].2, None);
    assert!(seen[0].3.is_empty());
}

#[cfg(unix)]
#[test]
fn given_search_path_when_execute_then_child_path_starts_with_it() {
    // Arrange
    let runner = Arc::new(CapturingRunner::new(0, ""));
    let executor = ShellExecutor::new(runner.clone(), renderer(), "sh")
        .with_search_path(vec![PathBuf::from("/opt/rar/bin"), PathBuf::from("/opt/zip")]);

    // Act
    executor.execute("rar a -idp /tmp/r.rar /tmp/a", None, None).unwrap();

    // Assert
    let seen = runner.seen.lock().unwrap();
    let (key, path) = &seen[0].3[0];
    assert_eq!(key, "PATH");
    let dirs: Vec<PathBuf> = std::env::split_paths(path).collect();
    assert_eq!(dirs[0], PathBuf::from("/opt/rar/bin"));
    assert_eq!(dirs[1], PathBuf::from("/opt/zip"));
    let inherited = std::env::var_os("PATH").unwrap_or_default();
    assert_eq!(dirs[2..].to_vec(), std::env::split_paths(&inherited).collect::<Vec<_>>());
}

#[cfg(unix)]
#[test]
fn given_nonzero_exit_when_execute_then_execution_error_with_stderr() {
    let runner = Arc::new(CapturingRunner::new(2, ""));
    let executor = ShellExecutor::new(runner, renderer(), "sh");

    let err = executor.execute("tar -cf /tmp/x.tar f1", None, None).unwrap_err();

    match err {
        InfraError::Execution {
            command,
            exit_code,
            stderr,
        } => {
            assert_eq!(command, "tar -cf /tmp/x.tar f1");
            assert_eq!(exit_code, Some(2));
            assert_eq!(stderr, "tar: f1: Cannot stat");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[cfg(unix)]
#[test]
fn given_unknown_engine_when_execute_then_fails_before_running() {
    let runner = Arc::new(CapturingRunner::new(0, ""));
    let executor = ShellExecutor::new(runner.clone(), renderer(), "sh");

    let err = executor.execute("gzip a", None, Some("mako")).unwrap_err();

    assert!(matches!(err, InfraError::UnknownTemplateEngine(_)));
    assert!(runner.seen.lock().unwrap().is_empty());
}

#[cfg(unix)]
#[test]
fn given_real_shell_when_execute_then_splits_stdout_into_lines() {
    let temp = TempDir::new().unwrap();
    let executor = ShellExecutor::new(Arc::new(RealCommandRunner), renderer(), "sh");

    let lines = executor
        .execute("printf 'one\\ntwo\\n'; pwd", Some(temp.path()), None)
        .unwrap();

    assert_eq!(lines[0], "one");
    assert_eq!(lines[1], "two");
    let cwd = PathBuf::from(&lines[2]).canonicalize().unwrap();
    assert_eq!(cwd, temp.path().canonicalize().unwrap());
}

// ============================================================
// PathLocator
// ============================================================

#[cfg(unix)]
fn fake_binary(dir: &Path, name: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    std::fs::write(&path, "#!/bin/sh\n").unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

#[cfg(unix)]
#[test]
fn given_search_path_when_lookup_then_finds_only_binaries_there() {
    let temp = TempDir::new().unwrap();
    let rar = fake_binary(temp.path(), "rar");
    let locator = PathLocator::new(vec![temp.path().to_path_buf()]);

    assert_eq!(locator.binary_path("rar"), Some(rar.clone()));
    assert_eq!(locator.binary_path("unrar"), None);
    assert_eq!(locator.first_available_binary(&["unrar", "rar"]), Some(rar));
}

#[cfg(unix)]
#[test]
fn given_both_binaries_when_first_available_then_prefers_first_name() {
    let temp = TempDir::new().unwrap();
    fake_binary(temp.path(), "rar");
    let unrar = fake_binary(temp.path(), "unrar");
    let locator = PathLocator::new(vec![temp.path().to_path_buf()]);

    assert_eq!(locator.first_available_binary(&["unrar", "rar"]), Some(unrar));
}

// ============================================================
// search_path end to end
// ============================================================

#[cfg(unix)]
#[test]
fn given_tool_only_on_search_path_when_run_through_container_then_shell_finds_it() {
    use std::os::unix::fs::PermissionsExt;

    use rsarchive::config::Settings;
    use rsarchive::infrastructure::di::ServiceContainer;

    // Arrange
    let temp = TempDir::new().unwrap();
    let rar = temp.path().join("rar");
    std::fs::write(&rar, "#!/bin/sh\necho \"fake-rar $@\"\n").unwrap();
    std::fs::set_permissions(&rar, std::fs::Permissions::from_mode(0o755)).unwrap();
    let settings = Settings {
        search_path: vec![temp.path().to_path_buf()],
        ..Settings::default()
    };
    let container = ServiceContainer::new(settings);
    let service = container.archive_service().unwrap();

    // Act
    let lines = service.rar("/tmp/r.rar", "/tmp/a", None).unwrap();

    // Assert
    assert_eq!(lines, vec!["fake-rar a -idp /tmp/r.rar /tmp/a"]);
}
