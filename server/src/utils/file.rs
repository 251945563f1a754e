//! File path helpers

use std::path::PathBuf;

/// Turn a user-supplied path into an absolute path.
///
/// `~` and `~/...` resolve against the home directory; anything relative
/// resolves against the working directory. Used for `--config` and the
/// SQLite database location.
pub fn expand_path(path: &str) -> PathBuf {
    let path = path.trim();

    let expanded = match path {
        "" => PathBuf::from("."),
        "~" => dirs::home_dir().unwrap_or_else(|| PathBuf::from(path)),
        _ => match (path.strip_prefix("~/"), dirs::home_dir()) {
            (Some(rest), Some(home)) => home.join(rest),
            _ => PathBuf::from(path),
        },
    };

    if expanded.is_relative()
        && let Ok(cwd) = std::env::current_dir()
    {
        return cwd.join(expanded);
    }
    expanded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_path_absolute_unchanged() {
        assert_eq!(expand_path("/srv/busboard.db"), PathBuf::from("/srv/busboard.db"));
    }

    #[test]
    fn test_expand_path_bare_name() {
        let result = expand_path("busboard.db");
        assert!(result.is_absolute());
        assert_eq!(result, std::env::current_dir().unwrap().join("busboard.db"));
    }

    #[test]
    fn test_expand_path_trims_whitespace() {
        assert_eq!(expand_path("  /tmp/x.json "), PathBuf::from("/tmp/x.json"));
    }

    #[test]
    fn test_expand_path_tilde() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_path("~"), home);
            assert_eq!(expand_path("~/.busboard"), home.join(".busboard"));
        }
    }

    #[test]
    fn test_expand_path_empty_is_cwd() {
        let result = expand_path("");
        assert!(result.is_absolute());
        assert!(result.starts_with(std::env::current_dir().unwrap()));
    }
}
