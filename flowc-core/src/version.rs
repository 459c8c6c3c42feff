use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize, Serializer};

/// A `MAJOR.MINOR.PATCH` project version.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct Version {
    major: u32,
    minor: u32,
    patch: u32,
}

impl Version {
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

/// New projects start at `0.1.0`.
impl Default for Version {
    fn default() -> Self {
        Self::new(0, 1, 0)
    }
}

impl TryFrom<String> for Version {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl Serialize for Version {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for Version {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || format!("invalid version '{}', expected 'X.Y.Z'", s);
        let component = |part: &str| part.parse::<u32>().map_err(|_| invalid());

        let (major, rest) = s.split_once('.').ok_or_else(invalid)?;
        let (minor, patch) = rest.split_once('.').ok_or_else(invalid)?;

        Ok(Self::new(
            component(major)?,
            component(minor)?,
            component(patch)?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_first_minor() {
        assert_eq!(Version::default().to_string(), "0.1.0");
    }

    #[test]
    fn test_parse() {
        assert_eq!("1.2.3".parse::<Version>().unwrap(), Version::new(1, 2, 3));
        assert_eq!(
            "10.20.30".parse::<Version>().unwrap(),
            Version::new(10, 20, 30)
        );
    }

    #[test]
    fn test_parse_invalid() {
        for input in ["", "1.2", "1.2.3.4", "a.b.c", "1.2.x", "1..3"] {
            assert!(input.parse::<Version>().is_err(), "accepted '{}'", input);
        }
    }

    #[test]
    fn test_ordering() {
        assert!(Version::new(0, 9, 9) < Version::new(1, 0, 0));
        assert!(Version::new(1, 2, 3) < Version::new(1, 10, 0));
    }

    #[test]
    fn test_toml_roundtrip() {
        #[derive(Serialize, Deserialize)]
        struct Project {
            version: Version,
        }

        let project: Project = toml::from_str(r#"version = "2.0.1""#).unwrap();
        assert_eq!(project.version, Version::new(2, 0, 1));
        assert_eq!(
            toml::to_string(&project).unwrap().trim(),
            r#"version = "2.0.1""#
        );
    }
}
