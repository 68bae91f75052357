use std::path::{Path, PathBuf};

/// Last component of `path`, resolving `.`/`..` first; falls back to the
/// whole path for roots like `/`.
pub fn display_name(path: &Path) -> String {
    let resolved = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
    resolved
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| resolved.display().to_string())
}

/// Expand `~`, `$VAR` and `${VAR}`; unresolvable input is returned unchanged.
pub fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    shellexpand::full(raw.as_ref())
        .map(|s| PathBuf::from(s.into_owned()))
        .unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_nested_path_when_display_name_then_returns_last_component() {
        assert_eq!(display_name(Path::new("/definitely/not/here/docs")), "docs");
    }

    #[test]
    fn given_root_when_display_name_then_returns_whole_path() {
        assert_eq!(display_name(Path::new("/")), "/");
    }

    #[test]
    fn given_env_var_when_expand_path_then_variable_is_substituted() {
        std::env::set_var("TMTREE_TEST_DATA_DIR", "/data");
        let expanded = expand_path(Path::new("$TMTREE_TEST_DATA_DIR/papers.csv"));
        assert_eq!(expanded, PathBuf::from("/data/papers.csv"));
    }

    #[test]
    fn given_unknown_variable_when_expand_path_then_input_is_kept() {
        let raw = Path::new("$TMTREE_SURELY_UNSET_VARIABLE/x");
        assert_eq!(expand_path(raw), raw.to_path_buf());
    }
}
