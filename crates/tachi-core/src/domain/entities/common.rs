use std::fmt;
use std::path::{Component, Path, PathBuf};

use super::DomainError;

/// A filesystem path guaranteed to be relative.
///
/// Invariant: never absolute and never climbs above its base (no `..`,
/// root or drive components). Enforced at construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RelativePath(PathBuf);

impl RelativePath {
    pub fn try_new(path: impl Into<PathBuf>) -> Result<Self, DomainError> {
        let path = path.into();
        check_contained(&path)?;
        Ok(Self(path))
    }

    /// Join a segment, maintaining relative invariant.
    pub fn join(&self, segment: impl AsRef<Path>) -> Result<Self, DomainError> {
        let segment = segment.as_ref();
        check_contained(segment)?;
        Ok(Self(self.0.join(segment)))
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }
}

fn check_contained(path: &Path) -> Result<(), DomainError> {
    if path.is_absolute() {
        return Err(DomainError::AbsolutePathNotAllowed {
            path: path.display().to_string(),
        });
    }
    let escapes = path.components().any(|c| {
        matches!(
            c,
            Component::ParentDir | Component::RootDir | Component::Prefix(_)
        )
    });
    if escapes {
        return Err(DomainError::PathEscapesOutput {
            path: path.display().to_string(),
        });
    }
    Ok(())
}

impl AsRef<Path> for RelativePath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_absolute_paths() {
        assert!(RelativePath::try_new("/etc/passwd").is_err());
        assert!(RelativePath::try_new(".github/workflows").is_ok());
    }

    #[test]
    fn join_rejects_absolute_segment() {
        let base = RelativePath::try_new(".github").unwrap();
        assert!(base.join("/tmp").is_err());
        assert_eq!(
            base.join("workflows").unwrap().as_path(),
            Path::new(".github/workflows")
        );
    }

    #[test]
    fn parent_components_are_rejected() {
        assert!(matches!(
            RelativePath::try_new("../outside"),
            Err(DomainError::PathEscapesOutput { .. })
        ));

        let base = RelativePath::try_new("container-apps/configs").unwrap();
        assert!(matches!(
            base.join("../../../escaped.yaml"),
            Err(DomainError::PathEscapesOutput { .. })
        ));
        assert!(base.join("team/api.yaml").is_ok());
    }
}
