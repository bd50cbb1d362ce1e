use std::fmt;

use tracing::trace;

use crate::checksum::checksum_ignore_case;
use crate::routing::{Content, Host};

/// Name of the global namespace host.
///
/// Requests whose `Host:` header matches no registered virtual host, or
/// that carry no `Host:` header at all, are routed here.
pub const GLOBAL_NAMESPACE: &str = "";

/// The routing table: an owned, ordered collection of virtual hosts.
///
/// Index 0 always holds the global namespace host; it is created at
/// construction and cannot be removed through [`Router::remove_host`],
/// since its absence would break default routing.
pub struct Router {
    hosts: Vec<Host>,
}

impl Default for Router {
    fn default() -> Self {
        Self { hosts: vec![Host::new(GLOBAL_NAMESPACE)] }
    }
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    /// The global namespace host.
    pub fn global(&self) -> &Host {
        &self.hosts[0]
    }

    /// Registers `content` under `path` on the named virtual host,
    /// creating the host if it does not exist yet.
    pub fn hook(&mut self, hostname: &str, path: &str, content: Content) {
        let index = match self.position(hostname) {
            Some(index) => index,
            None => {
                self.hosts.push(Host::new(hostname));
                self.hosts.len() - 1
            }
        };
        self.hosts[index].hook(path, content);
    }

    pub fn find_host(&self, name: &str) -> Option<&Host> {
        self.position(name).map(|index| &self.hosts[index])
    }

    pub fn has_host(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Removes a virtual host and its entire subtree.
    ///
    /// The global namespace host is permanent; asking to remove it
    /// reports false.
    pub fn remove_host(&mut self, name: &str) -> bool {
        match self.position(name) {
            Some(0) | None => false,
            Some(index) => {
                self.hosts.remove(index);
                true
            }
        }
    }

    /// Removes the content at `path` on the named host. See
    /// [`crate::routing::Directory::remove`] for the matching rules.
    pub fn remove(&mut self, hostname: &str, path: &str) -> bool {
        match self.position(hostname) {
            Some(index) => self.hosts[index].remove(path),
            None => false,
        }
    }

    /// Looks up `path` in the global namespace.
    pub fn find(&self, path: &str) -> Option<&Content> {
        self.global().find(path)
    }

    /// Looks up `path` on the named host only.
    pub fn find_in(&self, hostname: &str, path: &str) -> Option<&Content> {
        self.find_host(hostname)?.find(path)
    }

    pub fn has(&self, hostname: &str, path: &str) -> bool {
        self.find_in(hostname, path).is_some()
    }

    /// Invokes the handler at `path` in the global namespace.
    pub fn execute(&self, path: &str, parameters: &str) -> Option<String> {
        self.find(path).map(|content| content.execute(parameters))
    }

    /// Invokes the handler at `path` on the named host.
    pub fn execute_in(&self, hostname: &str, path: &str, parameters: &str) -> Option<String> {
        self.find_in(hostname, path).map(|content| content.execute(parameters))
    }

    /// Request-time resolution: route through the named virtual host when
    /// one matches, falling back to the global namespace when the host is
    /// unknown, absent, or holds no matching content.
    pub(crate) fn resolve(&self, hostname: Option<&str>, path: &str) -> Option<&Content> {
        if let Some(name) = hostname {
            if let Some(host) = self.find_host(name) {
                if let Some(content) = host.find(path) {
                    return Some(content);
                }
                trace!(host = name, path, "no match on virtual host, trying global namespace");
            }
        }
        self.global().find(path)
    }

    fn position(&self, name: &str) -> Option<usize> {
        let name_checksum = checksum_ignore_case(name.as_bytes());
        self.hosts.iter().position(|host| host.matches(name, name_checksum))
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router").field("hosts", &self.hosts).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content(name: &str, text: &'static str) -> Content {
        Content::new(name, move |_| text.to_owned())
    }

    #[test]
    fn starts_with_the_global_namespace() {
        let router = Router::new();
        assert_eq!(router.global().name(), GLOBAL_NAMESPACE);
        assert!(router.has_host(GLOBAL_NAMESPACE));
    }

    #[test]
    fn global_host_cannot_be_removed() {
        let mut router = Router::new();
        assert!(!router.remove_host(GLOBAL_NAMESPACE));
        assert!(router.has_host(GLOBAL_NAMESPACE));
    }

    #[test]
    fn hook_creates_hosts_on_demand() {
        let mut router = Router::new();
        router.hook("example.com", "greet", content("greet", "hi"));

        assert!(router.has_host("example.com"));
        assert!(router.has_host("EXAMPLE.COM"));
        assert_eq!(router.execute_in("example.com", "greet", ""), Some("hi".to_owned()));
    }

    #[test]
    fn hooking_twice_reuses_the_host() {
        let mut router = Router::new();
        router.hook("example.com", "a", content("a", "1"));
        router.hook("Example.Com", "b", content("b", "2"));

        assert!(router.has("example.com", "a"));
        assert!(router.has("example.com", "b"));
        // still just the global host plus one virtual host
        assert_eq!(router.hosts.len(), 2);
    }

    #[test]
    fn empty_hostname_targets_the_global_namespace() {
        let mut router = Router::new();
        router.hook(GLOBAL_NAMESPACE, "greet", content("greet", "hello"));

        assert_eq!(router.execute("greet", ""), Some("hello".to_owned()));
        assert!(router.find("greet").is_some());
    }

    #[test]
    fn remove_host_drops_everything_hooked_there() {
        let mut router = Router::new();
        router.hook("example.com", "images/logo", content("logo", "png"));
        router.hook("example.com", "greet", content("greet", "hi"));

        assert!(router.remove_host("example.com"));
        assert!(!router.has_host("example.com"));
        assert!(router.find_in("example.com", "images/logo").is_none());
        assert!(router.find_in("example.com", "greet").is_none());
    }

    #[test]
    fn path_scoped_remove() {
        let mut router = Router::new();
        router.hook("example.com", "images/logo", content("logo", "png"));

        assert!(router.remove("example.com", "images/logo"));
        assert!(!router.has("example.com", "images/logo"));
        assert!(!router.remove("example.com", "images/logo"));
        assert!(!router.remove("nowhere.com", "images/logo"));
    }

    #[test]
    fn execute_on_missing_content_is_none() {
        let router = Router::new();
        assert_eq!(router.execute("ghost", ""), None);
        assert_eq!(router.execute_in("nowhere.com", "ghost", ""), None);
    }

    #[test]
    fn resolve_prefers_the_matching_virtual_host() {
        let mut router = Router::new();
        router.hook(GLOBAL_NAMESPACE, "page", content("page", "global"));
        router.hook("example.com", "page", content("page", "hosted"));

        let hit = router.resolve(Some("example.com"), "page").unwrap();
        assert_eq!(hit.execute(""), "hosted");
    }

    #[test]
    fn resolve_falls_back_to_global_for_unknown_hosts() {
        let mut router = Router::new();
        router.hook(GLOBAL_NAMESPACE, "page", content("page", "global"));

        let hit = router.resolve(Some("unknown.com"), "page").unwrap();
        assert_eq!(hit.execute(""), "global");

        let hit = router.resolve(None, "page").unwrap();
        assert_eq!(hit.execute(""), "global");
    }

    #[test]
    fn resolve_falls_back_to_global_on_a_host_miss() {
        let mut router = Router::new();
        router.hook(GLOBAL_NAMESPACE, "shared", content("shared", "global"));
        router.hook("example.com", "page", content("page", "hosted"));

        let hit = router.resolve(Some("example.com"), "shared").unwrap();
        assert_eq!(hit.execute(""), "global");
    }
}
