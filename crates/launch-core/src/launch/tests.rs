use super::*;
use crate::install_dir::{UNIX_SEPARATORS, WINDOWS_SEPARATORS};
use crate::profile::parse_profile;

const RUNTIME: &str = "./jre_linux-x86_64/bin/java";
const SUFFIX: &str = "-server -splash:splash.png -jar lionheart-pc-1.3.0.jar";

fn bundled() -> LaunchProfile {
    LaunchProfile::bundled().expect("bundled profile parses")
}

fn posix(invocation: &str) -> String {
    let install_dir = InstallDir::from_invocation(invocation, UNIX_SEPARATORS);
    derive_posix_command(&bundled(), &install_dir).expect("derive command")
}

#[test]
fn local_invocation_changes_into_data() {
    assert_eq!(
        posix("./LionheartRemake"),
        format!("cd data; {RUNTIME} {SUFFIX}")
    );
}

#[test]
fn absolute_invocation_changes_into_install_data() {
    assert_eq!(
        posix("/opt/games/lionheart/LionheartRemake"),
        format!("cd /opt/games/lionheart/data; {RUNTIME} {SUFFIX}")
    );
}

#[test]
fn bare_name_runs_from_local() {
    assert_eq!(posix("LionheartRemake"), posix("./LionheartRemake"));
}

#[test]
fn suffix_survives_hostile_install_dirs() {
    for invocation in [
        "/home/me/My Games/LionheartRemake",
        "/tmp/x;reboot/LionheartRemake",
        "/tmp/$(id)/LionheartRemake",
        "/tmp/it's/LionheartRemake",
    ] {
        let command = posix(invocation);
        assert!(command.ends_with(&format!("; {RUNTIME} {SUFFIX}")), "{command}");
        assert!(command.starts_with("cd '"), "{command}");
    }
}

#[test]
fn runtime_is_not_double_prefixed() {
    let contents = include_str!("../../profiles/lionheart.toml")
        .replace("jre_linux-${ARCH}/bin/java", "./jre_linux-${ARCH}/bin/java");
    let profile = parse_profile(&contents).expect("profile parses");
    let command = derive_posix_command(&profile, &InstallDir::current()).expect("derive");
    assert_eq!(command, format!("cd data; {RUNTIME} {SUFFIX}"));
}

#[test]
fn explicit_relative_can_be_disabled() {
    let contents = include_str!("../../profiles/lionheart.toml")
        .replace("explicit_relative = true", "explicit_relative = false");
    let profile = parse_profile(&contents).expect("profile parses");
    let command = derive_posix_command(&profile, &InstallDir::current()).expect("derive");
    assert_eq!(command, format!("cd data; jre_linux-x86_64/bin/java {SUFFIX}"));
}

#[test]
fn oversized_install_dir_is_rejected() {
    let huge = format!("/{}/LionheartRemake", "a".repeat(POSIX_MAX_COMMAND));
    let install_dir = InstallDir::from_invocation(&huge, UNIX_SEPARATORS);
    let err = derive_posix_command(&bundled(), &install_dir).expect_err("too long");
    assert!(matches!(err, LaunchError::CommandTooLong { .. }));
}

#[test]
fn dash_leading_install_dir_is_not_read_as_option() {
    assert_eq!(
        posix("-x/LionheartRemake"),
        format!("cd ./-x/data; {RUNTIME} {SUFFIX}")
    );
}

#[test]
fn oversized_windows_install_dir_is_rejected() {
    let huge = format!(r"C:\{}\Lionheart.exe", "a".repeat(WINDOWS_MAX_COMMAND));
    let install_dir = InstallDir::from_invocation(&huge, WINDOWS_SEPARATORS);
    let err = derive_windows_launch(&bundled(), &install_dir, Bitness::Bits64)
        .expect_err("too long");
    assert!(matches!(err, LaunchError::CommandTooLong { max: WINDOWS_MAX_COMMAND, .. }));
}

#[test]
fn posix_runtime_path_points_into_data() {
    let install_dir = InstallDir::from_invocation("/opt/lh/LionheartRemake", UNIX_SEPARATORS);
    assert_eq!(
        posix_runtime_path(&bundled(), &install_dir),
        PathBuf::from("/opt/lh/data/jre_linux-x86_64/bin/java")
    );
}

#[test]
fn windows_templates_differ_only_in_runtime() {
    let profile = bundled();
    let x64 = derive_windows_launch(&profile, &InstallDir::current(), Bitness::Bits64)
        .expect("64-bit launch");
    let x86 = derive_windows_launch(&profile, &InstallDir::current(), Bitness::Bits32)
        .expect("32-bit launch");

    assert_eq!(
        x64.command,
        format!("start \"\" /d data /b \"jre_windows-x86_64\\bin\\javaw.exe\" {SUFFIX}")
    );
    assert_eq!(
        x86.command,
        format!("start \"\" /d data /b \"jre_windows-x86\\bin\\java.exe\" {SUFFIX}")
    );
    assert_eq!(x64.plan.args(), x86.plan.args());
    assert_ne!(x64.plan.argv[0], x86.plan.argv[0]);
    assert_eq!(x64.plan.cwd, PathBuf::from(".").join("data"));
}

#[test]
fn windows_classpath_mode_names_entry_class() {
    let contents = include_str!("../../profiles/lionheart.toml")
        .replace("archive_mode = \"jar\"", "archive_mode = \"classpath\"");
    let profile = parse_profile(&contents).expect("profile parses");
    let launch = derive_windows_launch(&profile, &InstallDir::current(), Bitness::Bits64)
        .expect("classpath launch");
    assert!(launch.command.ends_with(
        "-cp lionheart-pc-1.3.0.jar com.b3dgs.lionheart.AppLionheartPc"
    ));
    assert_eq!(
        launch.plan.args().last().map(String::as_str),
        Some("com.b3dgs.lionheart.AppLionheartPc")
    );
}

#[test]
fn windows_install_dir_is_quoted_when_spaced() {
    let install_dir =
        InstallDir::from_invocation(r"C:\Program Files\Lionheart\Lionheart.exe", WINDOWS_SEPARATORS);
    let launch = derive_windows_launch(&bundled(), &install_dir, Bitness::Bits64)
        .expect("launch");
    assert!(launch
        .command
        .starts_with(r#"start "" /d "C:\Program Files\Lionheart\data" /b "#));
}
