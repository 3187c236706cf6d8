//! Checks on the feature set dependents get by default.

const MANIFEST: &str = include_str!("../Cargo.toml");

fn feature(name: &str) -> Option<&'static str> {
    MANIFEST
        .lines()
        .find(|line| line.split('=').next().map(str::trim) == Some(name))
        .and_then(|line| line.split_once('='))
        .map(|(_, value)| value.trim())
}

#[test]
fn no_features_enabled_by_default() {
    // The library is no_std unless a std-only feature is switched on.
    assert_eq!(feature("default"), Some("[]"));
}

#[test]
fn binary_dependencies_stay_behind_cli() {
    let cli = MANIFEST
        .split_once("cli = [")
        .and_then(|(_, rest)| rest.split_once(']'))
        .map(|(list, _)| list)
        .unwrap();
    for dependency in ["anyhow", "clap", "env_logger", "linux-embedded-hal"] {
        assert!(cli.contains(&format!("\"dep:{dependency}\"")), "{dependency}");
    }
}
