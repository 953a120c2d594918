//! Tests for build_command

use std::path::Path;

use rstest::rstest;

use rsarchive::domain::{build_command, ArchiveCommand, ArgList, DomainError};

fn build(command: ArchiveCommand) -> String {
    build_command(&command, Some(Path::new("/usr/bin/unrar"))).unwrap()
}

// ============================================================
// tar / gzip / zip / rar
// ============================================================

#[test]
fn given_delimited_sources_when_build_tar_then_splits_sources() {
    let cmd = build(ArchiveCommand::Tar {
        options: "cjvf".into(),
        tarfile: "/tmp/t.tar.bz2".into(),
        sources: "/tmp/f1,/tmp/f2".into(),
    });

    assert_eq!(cmd, "tar -cjvf /tmp/t.tar.bz2 /tmp/f1 /tmp/f2");
}

#[rstest]
#[case::list(ArgList::from(vec!["a", "b"]))]
#[case::delimited(ArgList::from("a, b"))]
#[case::padded(ArgList::from("  a ,b  "))]
fn given_equivalent_sources_when_build_zip_then_same_command(#[case] sources: ArgList) {
    let cmd = build(ArchiveCommand::Zip {
        zipfile: "/tmp/z.zip".into(),
        sources,
    });

    assert_eq!(cmd, "zip /tmp/z.zip a b");
}

#[rstest]
#[case("/tmp/src.txt", "gzip /tmp/src.txt")]
#[case("/var/log/{{ host.id }}.log", "gzip /var/log/{{ host.id }}.log")]
fn given_file_when_build_gzip_then_plain_command(#[case] file: &str, #[case] expected: &str) {
    let cmd = build(ArchiveCommand::Gzip {
        sourcefile: file.into(),
    });
    assert_eq!(cmd, expected);
}

#[test]
fn given_gzipfile_when_build_gunzip_then_plain_command() {
    let cmd = build(ArchiveCommand::Gunzip {
        gzipfile: "/tmp/src.txt.gz".into(),
    });
    assert_eq!(cmd, "gunzip /tmp/src.txt.gz");
}

#[rstest]
#[case(ArgList::from("/tmp/a"), "rar a -idp /tmp/r.rar /tmp/a")]
#[case(ArgList::from(vec!["/tmp/a", "/tmp/b"]), "rar a -idp /tmp/r.rar /tmp/a /tmp/b")]
fn given_any_sources_when_build_rar_then_fixed_flags(
    #[case] sources: ArgList,
    #[case] expected: &str,
) {
    let cmd = build(ArchiveCommand::Rar {
        rarfile: "/tmp/r.rar".into(),
        sources,
    });
    assert_eq!(cmd, expected);
}

// ============================================================
// unzip excludes
// ============================================================

#[rstest]
#[case::omitted(None)]
#[case::empty_list(Some(ArgList::List(vec![])))]
#[case::blank_string(Some(ArgList::from("  ")))]
fn given_no_excludes_when_build_unzip_then_omits_x_clause(#[case] excludes: Option<ArgList>) {
    let cmd = build(ArchiveCommand::Unzip {
        zipfile: "/tmp/z.zip".into(),
        dest: "/home/strongbad/".into(),
        excludes,
    });

    assert_eq!(cmd, "unzip /tmp/z.zip -d /home/strongbad/");
}

#[test]
fn given_excludes_when_build_unzip_then_single_joined_x_clause() {
    let cmd = build(ArchiveCommand::Unzip {
        zipfile: "/tmp/z.zip".into(),
        dest: "/home/strongbad/".into(),
        excludes: Some("file_1, file_2".into()),
    });

    assert_eq!(cmd, "unzip /tmp/z.zip -d /home/strongbad/ -x file_1 file_2");
    assert_eq!(cmd.matches(" -x ").count(), 1);
}

// ============================================================
// unrar excludes
// ============================================================

#[test]
fn given_excludes_when_build_unrar_then_one_x_pair_per_exclude_in_order() {
    let cmd = build(ArchiveCommand::Unrar {
        rarfile: "/tmp/r.rar".into(),
        dest: "/home/strongbad/".into(),
        excludes: Some("file_2,file_1, file_3".into()),
    });

    assert_eq!(
        cmd,
        "/usr/bin/unrar x -idp /tmp/r.rar -x file_2 -x file_1 -x file_3 /home/strongbad/"
    );
}

#[test]
fn given_no_excludes_when_build_unrar_then_dest_follows_rarfile() {
    let cmd = build(ArchiveCommand::Unrar {
        rarfile: "/tmp/r.rar".into(),
        dest: "/out".into(),
        excludes: None,
    });

    assert_eq!(cmd, "/usr/bin/unrar x -idp /tmp/r.rar /out");
}

#[test]
fn given_rar_fallback_binary_when_build_unrar_then_uses_it() {
    let cmd = build_command(
        &ArchiveCommand::Unrar {
            rarfile: "/tmp/r.rar".into(),
            dest: "/out".into(),
            excludes: None,
        },
        Some(Path::new("/opt/bin/rar")),
    )
    .unwrap();

    assert_eq!(cmd, "/opt/bin/rar x -idp /tmp/r.rar /out");
}

#[test]
fn given_no_binary_when_build_unrar_then_fails() {
    let err = build_command(
        &ArchiveCommand::Unrar {
            rarfile: "/tmp/r.rar".into(),
            dest: "/out".into(),
            excludes: None,
        },
        None,
    )
    .unwrap_err();

    assert_eq!(err, DomainError::BinaryNotResolved("unrar".into()));
}
