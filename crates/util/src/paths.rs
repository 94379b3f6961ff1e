use std::env;
use std::path::PathBuf;

use dirs_next::home_dir;

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    let trimmed = path.trim();
    let home = || home_dir().unwrap_or_else(|| PathBuf::from("~"));
    if trimmed == "~" {
        return home();
    }
    match trimmed.strip_prefix("~/").or_else(|| trimmed.strip_prefix("~\\")) {
        Some(rest) => home().join(rest),
        None => PathBuf::from(trimmed),
    }
}

/// Read a path override from `var`, ignoring unset or blank values.
pub fn config_path_from_env(var: &str) -> Option<PathBuf> {
    let raw = env::var(var).ok()?;
    if raw.trim().is_empty() {
        return None;
    }
    Some(expand_tilde(&raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_home_prefix() {
        let Some(home) = home_dir() else { return };
        assert_eq!(expand_tilde("~/pods/registration.json"), home.join("pods/registration.json"));
        assert_eq!(expand_tilde("~"), home);
    }

    #[test]
    fn keeps_absolute_paths() {
        assert_eq!(expand_tilde(" /etc/pods.json "), PathBuf::from("/etc/pods.json"));
    }

    #[test]
    fn env_override_skips_blank_values() {
        temp_env::with_var("POD_UTIL_TEST_PATH", Some("   "), || {
            assert_eq!(config_path_from_env("POD_UTIL_TEST_PATH"), None);
        });
        temp_env::with_var("POD_UTIL_TEST_PATH", Some("/tmp/pod.json"), || {
            assert_eq!(config_path_from_env("POD_UTIL_TEST_PATH"), Some(PathBuf::from("/tmp/pod.json")));
        });
    }
}
