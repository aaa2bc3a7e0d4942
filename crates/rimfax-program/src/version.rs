//! Library version floor guard.

use crate::error::{ProgramError, ProgramResult};

/// Check that the installed library is at least `required`.
///
/// Scripts written against newer APIs call this once at startup so that
/// an old installation fails with a clear message instead of a confusing
/// one later on.
///
/// # Example
///
/// ```
/// rimfax_program::require_version("0.4.0").unwrap();
/// assert!(rimfax_program::require_version("99.0.0").is_err());
/// ```
pub fn require_version(required: &str) -> ProgramResult<()> {
    let current = env!("CARGO_PKG_VERSION");
    if parse_version(required)? > parse_version(current)? {
        return Err(ProgramError::VersionTooOld {
            required: required.to_string(),
        });
    }
    Ok(())
}

/// Parse `major.minor.patch`, with missing components read as zero.
fn parse_version(version: &str) -> ProgramResult<(u64, u64, u64)> {
    let mut components = [0u64; 3];
    for (i, part) in version.trim().split('.').enumerate() {
        if i >= components.len() {
            return Err(ProgramError::InvalidVersion(version.to_string()));
        }
        components[i] = part
            .parse()
            .map_err(|_| ProgramError::InvalidVersion(version.to_string()))?;
    }
    Ok((components[0], components[1], components[2]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_version_passes() {
        require_version("0.1.0").unwrap();
        require_version(env!("CARGO_PKG_VERSION")).unwrap();
    }

    #[test]
    fn test_future_version_fails_with_message() {
        let err = require_version("99.0.0").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Please use rimfax version 99.0.0 or greater."
        );
    }

    #[test]
    fn test_missing_components_read_as_zero() {
        assert_eq!(parse_version("0.4").unwrap(), (0, 4, 0));
        assert_eq!(parse_version("1").unwrap(), (1, 0, 0));
    }

    #[test]
    fn test_comparison_is_numeric() {
        // 0.10.0 is newer than 0.9.9, which string comparison gets wrong.
        assert!(parse_version("0.10.0").unwrap() > parse_version("0.9.9").unwrap());
    }

    #[test]
    fn test_invalid_version_strings() {
        assert!(matches!(
            parse_version("not-a-version"),
            Err(ProgramError::InvalidVersion(_))
        ));
        assert!(parse_version("1.2.3.4").is_err());
    }
}
