use std::fmt;

use crate::checksum::{checksum, checksum_ignore_case};
use crate::routing::Content;

/// An intermediate namespace node.
///
/// A directory exclusively owns its child directories and content leaves;
/// dropping it drops the whole subtree. Direct children obey two
/// uniqueness rules: no two child directories share a case-insensitive
/// name, and no two content entries share a case-sensitive name.
pub struct Directory {
    name: String,
    name_checksum: u32,
    directories: Vec<Directory>,
    content: Vec<Content>,
}

impl Directory {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let name_checksum = checksum_ignore_case(name.as_bytes());
        Self { name, name_checksum, directories: Vec::new(), content: Vec::new() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Case-insensitive name match, checksum-gated.
    pub(crate) fn matches(&self, name: &str, name_checksum: u32) -> bool {
        self.name_checksum == name_checksum && self.name.eq_ignore_ascii_case(name)
    }

    /// Attaches `content` under `path`.
    ///
    /// Leading and repeated slashes are ignored. Every path segment except
    /// the last is a directory, descended into or created as needed
    /// (case-insensitively); the content lands in the final directory's
    /// content collection under its own name. A path with no segments
    /// attaches the content directly to this node. Hooking a name that is
    /// already present replaces the previous entry.
    pub fn hook(&mut self, path: &str, content: Content) {
        let segs = segments(path);
        let mut node = self;
        if let Some((_leaf, dirs)) = segs.split_last() {
            for dir_name in dirs {
                node = node.child_or_create(dir_name);
            }
        }
        node.attach(content);
    }

    /// Looks up the content at `path`.
    ///
    /// Directory segments match case-insensitively, the final segment
    /// matches content names case-sensitively. A path with no segments
    /// looks up the content named `""`. `None` means "no such resource"
    /// and is a perfectly normal outcome.
    pub fn find(&self, path: &str) -> Option<&Content> {
        let segs = segments(path);
        let (leaf, dirs) = split_path(&segs);

        let mut node = self;
        for dir_name in dirs {
            let dir_checksum = checksum_ignore_case(dir_name.as_bytes());
            node = node.directories.iter().find(|dir| dir.matches(dir_name, dir_checksum))?;
        }

        let leaf_checksum = checksum(leaf.as_bytes());
        node.content.iter().find(|content| content.name_checksum() == leaf_checksum && content.name() == leaf)
    }

    pub fn has(&self, path: &str) -> bool {
        self.find(path).is_some()
    }

    /// Removes the content at `path`.
    ///
    /// The leaf name matches case-sensitively, like `find`. Directories
    /// left empty by the removal are pruned on the way back up. Returns
    /// false when nothing matched.
    pub fn remove(&mut self, path: &str) -> bool {
        let segs = segments(path);
        let (leaf, dirs) = split_path(&segs);
        self.remove_walk(dirs, leaf)
    }

    fn remove_walk(&mut self, dirs: &[&str], leaf: &str) -> bool {
        match dirs.split_first() {
            None => {
                let leaf_checksum = checksum(leaf.as_bytes());
                match self
                    .content
                    .iter()
                    .position(|content| content.name_checksum() == leaf_checksum && content.name() == leaf)
                {
                    Some(index) => {
                        self.content.remove(index);
                        true
                    }
                    None => false,
                }
            }
            Some((dir_name, rest)) => {
                let dir_checksum = checksum_ignore_case(dir_name.as_bytes());
                let Some(index) = self.directories.iter().position(|dir| dir.matches(dir_name, dir_checksum)) else {
                    return false;
                };
                let removed = self.directories[index].remove_walk(rest, leaf);
                if removed && self.directories[index].is_empty() {
                    self.directories.remove(index);
                }
                removed
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.directories.is_empty() && self.content.is_empty()
    }

    fn child_or_create(&mut self, name: &str) -> &mut Directory {
        let name_checksum = checksum_ignore_case(name.as_bytes());
        let index = match self.directories.iter().position(|dir| dir.matches(name, name_checksum)) {
            Some(index) => index,
            None => {
                self.directories.push(Directory::new(name));
                self.directories.len() - 1
            }
        };
        &mut self.directories[index]
    }

    fn attach(&mut self, content: Content) {
        match self
            .content
            .iter()
            .position(|existing| existing.name_checksum() == content.name_checksum() && existing.name() == content.name())
        {
            Some(index) => self.content[index] = content,
            None => self.content.push(content),
        }
    }
}

impl fmt::Debug for Directory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Directory")
            .field("name", &self.name)
            .field("directories", &self.directories)
            .field("content", &self.content)
            .finish_non_exhaustive()
    }
}

fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|segment| !segment.is_empty()).collect()
}

fn split_path<'a>(segs: &'a [&'a str]) -> (&'a str, &'a [&'a str]) {
    match segs.split_last() {
        Some((leaf, dirs)) => (leaf, dirs),
        None => ("", &[]),
    }
}
