use std::fmt;

use crate::routing::{Content, Directory};

/// A virtual-host root: a [`Directory`] whose name is the host name,
/// matched case-insensitively against the `Host:` header value.
pub struct Host {
    root: Directory,
}

impl Host {
    pub fn new(name: impl Into<String>) -> Self {
        Self { root: Directory::new(name) }
    }

    pub fn name(&self) -> &str {
        self.root.name()
    }

    pub(crate) fn matches(&self, name: &str, name_checksum: u32) -> bool {
        self.root.matches(name, name_checksum)
    }

    pub fn hook(&mut self, path: &str, content: Content) {
        self.root.hook(path, content);
    }

    pub fn find(&self, path: &str) -> Option<&Content> {
        self.root.find(path)
    }

    pub fn has(&self, path: &str) -> bool {
        self.root.has(path)
    }

    pub fn remove(&mut self, path: &str) -> bool {
        self.root.remove(path)
    }
}

impl fmt::Debug for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Host").field("name", &self.root.name()).field("root", &self.root).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checksum::checksum_ignore_case;

    #[test]
    fn host_names_match_case_insensitively() {
        let host = Host::new("Example.COM");
        let checksum = checksum_ignore_case(b"example.com");
        assert!(host.matches("example.com", checksum));
        assert!(host.matches("EXAMPLE.com", checksum));
    }

    #[test]
    fn behaves_as_a_directory_root() {
        let mut host = Host::new("example.com");
        host.hook("images/logo", Content::new("logo", |_| "png".to_owned()));

        assert!(host.has("Images/logo"));
        assert!(host.find("images/LOGO").is_none());
        assert!(host.remove("images/logo"));
        assert!(!host.has("images/logo"));
    }
}
