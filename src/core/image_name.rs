//! Parsing of docker image names into repository and tag.

use crate::core::error::{Result, ZypperDockerError};
use std::fmt;

const DEFAULT_TAG: &str = "latest";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageName {
    pub repo: String,
    pub tag: String,
}

impl ImageName {
    /// Splits `repo[:tag]`, defaulting the tag to `latest`.
    ///
    /// A colon before the last `/` belongs to a registry port
    /// (`registry:5000/suse/sles12`) and does not start a tag.
    pub fn parse(name: &str) -> Result<Self> {
        let name = name.trim();
        let last_slash = name.rfind('/').map_or(0, |i| i + 1);

        let (repo, tag) = match name[last_slash..].find(':') {
            Some(i) => {
                let split = last_slash + i;
                (&name[..split], &name[split + 1..])
            }
            None => (name, DEFAULT_TAG),
        };

        if repo.is_empty() || repo.ends_with('/') || tag.is_empty() {
            return Err(ZypperDockerError::invalid_image_name(name));
        }

        Ok(Self {
            repo: repo.to_string(),
            tag: tag.to_string(),
        })
    }
}

impl fmt::Display for ImageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.repo, self.tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_tag() {
        let name = ImageName::parse("suse/sles11sp3:1.0.0").unwrap();
        assert_eq!(name.repo, "suse/sles11sp3");
        assert_eq!(name.tag, "1.0.0");
    }

    #[test]
    fn test_parse_defaults_to_latest() {
        let name = ImageName::parse("suse/sles11sp3").unwrap();
        assert_eq!(name.repo, "suse/sles11sp3");
        assert_eq!(name.tag, "latest");
    }

    #[test]
    fn test_parse_registry_port() {
        let name = ImageName::parse("registry.local:5000/opensuse").unwrap();
        assert_eq!(name.repo, "registry.local:5000/opensuse");
        assert_eq!(name.tag, "latest");

        let name = ImageName::parse("registry.local:5000/opensuse:42.1").unwrap();
        assert_eq!(name.repo, "registry.local:5000/opensuse");
        assert_eq!(name.tag, "42.1");
    }

    #[test]
    fn test_parse_rejects_empty_parts() {
        assert!(ImageName::parse("").is_err());
        assert!(ImageName::parse(":tag").is_err());
        assert!(ImageName::parse("opensuse:").is_err());
    }

    #[test]
    fn test_display() {
        let name = ImageName::parse("opensuse").unwrap();
        assert_eq!(name.to_string(), "opensuse:latest");
    }
}
