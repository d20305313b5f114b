use globset::{Glob, GlobSet, GlobSetBuilder};

/// Entry names that are never listed nor served.
pub const DEFAULT_DENYLIST: &[&str] = &[
    ".git",
    "node_modules",
    ".DS_Store",
    "Thumbs.db",
    "desktop.ini",
    ".gitignore",
    ".dockerignore",
    ".env",
    "Dockerfile",
    "docker-compose.yml",
    "package.json",
    "package-lock.json",
    "server.js",
    "*.log",
];

/// Immutable set of glob patterns matched against single entry names.
///
/// A plain name like `.git` is a glob without metacharacters and therefore an
/// exact match.
#[derive(Debug, Clone)]
pub struct Denylist {
    patterns: Vec<String>,
    set: GlobSet,
}

impl Denylist {
    pub fn new<I, S>(patterns: I) -> Result<Self, globset::Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = GlobSetBuilder::new();
        let mut kept = Vec::new();
        for p in patterns {
            let p = p.as_ref().trim();
            if p.is_empty() {
                continue;
            }
            builder.add(Glob::new(p)?);
            kept.push(p.to_string());
        }
        Ok(Self { patterns: kept, set: builder.build()? })
    }

    /// A denylist that excludes nothing.
    pub fn empty() -> Self {
        Self { patterns: Vec::new(), set: GlobSet::empty() }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.set.is_match(name)
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }
}

impl Default for Denylist {
    fn default() -> Self {
        match Self::new(DEFAULT_DENYLIST) {
            Ok(d) => d,
            Err(e) => {
                // Built-in patterns are static; failing here is a programming error.
                panic!("invalid built-in denylist pattern: {}", e);
            }
        }
    }
}
