use globset::{Glob, GlobSet, GlobSetBuilder};

/// Exclusion patterns every session starts with.
pub const DEFAULT_PATTERNS: &[&str] = &[
    "node_modules",
    ".DS_Store",
    ".git",
    ".next",
    ".env",
    ".cache",
    ".bin",
    ".gradle",
    ".idea",
    ".vscode",
    "build",
    ".expo",
    "dist",
    "out",
    "target",
    "coverage",
    "yarn.lock",
    "package-lock.json",
    "pnpm-lock.yaml",
    "*.mp4",
    "*.mov",
    "*.avi",
    "*.wav",
    "*.psd",
    "*.ai",
    "*.log",
    "npm-debug.log*",
    "yarn-debug.log*",
    "yarn-error.log*",
    ".npm",
    ".yarn",
    ".settings",
    "*.swp",
    "*.swo",
    ".project",
    ".classpath",
    "Thumbs.db",
    "desktop.ini",
];

/// How patterns are compared against a path segment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MatchMode {
    /// Exact, case-sensitive string equality. Wildcards are plain characters.
    #[default]
    Literal,
    /// Literal equality, or a glob match of the pattern against the segment.
    Glob,
}

/// Ordered, de-duplicated set of exclusion patterns.
#[derive(Debug, Clone)]
pub struct PatternSet {
    patterns: Vec<String>,
    mode: MatchMode,
    globs: GlobSet,
}

impl Default for PatternSet {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl PatternSet {
    /// A set seeded with [`DEFAULT_PATTERNS`].
    pub fn with_defaults() -> Self {
        let mut set = Self::empty();
        set.patterns = DEFAULT_PATTERNS.iter().map(|p| p.to_string()).collect();
        set.recompile();
        set
    }

    pub fn empty() -> Self {
        Self {
            patterns: Vec::new(),
            mode: MatchMode::Literal,
            globs: GlobSet::empty(),
        }
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: MatchMode) {
        self.mode = mode;
        self.recompile();
    }

    /// Add comma-separated patterns. Whitespace is trimmed, empty entries and
    /// duplicates are dropped. Returns how many patterns were new.
    pub fn add(&mut self, input: &str) -> usize {
        let mut added = 0;
        for pattern in input.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            if !self.contains(pattern) {
                self.patterns.push(pattern.to_string());
                added += 1;
            }
        }
        if added > 0 {
            self.recompile();
        }
        added
    }

    /// Remove an exact pattern. Returns whether it was present.
    pub fn remove(&mut self, pattern: &str) -> bool {
        let before = self.patterns.len();
        self.patterns.retain(|p| p != pattern);
        let removed = self.patterns.len() != before;
        if removed {
            self.recompile();
        }
        removed
    }

    /// Whether `segment` is excluded by any pattern.
    pub fn matches(&self, segment: &str) -> bool {
        if self.patterns.iter().any(|p| p == segment) {
            return true;
        }
        self.mode == MatchMode::Glob && self.globs.is_match(segment)
    }

    /// Whether any segment of the path is excluded.
    pub fn excludes_any<'a>(&self, mut segments: impl Iterator<Item = &'a str>) -> bool {
        segments.any(|s| self.matches(s))
    }

    pub fn contains(&self, pattern: &str) -> bool {
        self.patterns.iter().any(|p| p == pattern)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Rebuild the glob matcher. Invalid globs are skipped and keep their
    /// literal meaning.
    fn recompile(&mut self) {
        if self.mode != MatchMode::Glob {
            self.globs = GlobSet::empty();
            return;
        }
        let mut builder = GlobSetBuilder::new();
        let mut invalid = Vec::new();
        for pattern in &self.patterns {
            match Glob::new(pattern) {
                Ok(g) => {
                    builder.add(g);
                }
                Err(_) => invalid.push(pattern.clone()),
            }
        }
        if !invalid.is_empty() {
            tracing::warn!(?invalid, "invalid glob pattern(s), matched literally");
        }
        self.globs = builder.build().unwrap_or_else(|e| {
            tracing::warn!("failed to build glob set: {}", e);
            GlobSet::empty()
        });
    }
}
