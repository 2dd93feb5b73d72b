//! Local sources: a directory on disk, or a list of paths.

use std::io::BufRead;
use std::path::Path;

use walkdir::WalkDir;

use crate::error::{Result, SourceError};
use crate::tree::{split_segments, Dataset, NodeKind, PathRecord};

/// One entry of a folder selection: a path whose first segment is the
/// selected directory's name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedEntry {
    pub full_path: String,
    pub is_file: bool,
}

impl SelectedEntry {
    pub fn file(full_path: impl Into<String>) -> Self {
        Self {
            full_path: full_path.into(),
            is_file: true,
        }
    }
}

/// How lines of a path list are laid out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListLayout {
    /// Paths are relative to a root with the given display name.
    Relative { root_name: String },
    /// The first segment of every path is the root's name.
    FullPaths,
}

/// Turn a folder selection into a dataset. The root name comes from the
/// first entry's first segment and is stripped from every path.
pub fn from_full_paths<I>(entries: I) -> Dataset
where
    I: IntoIterator<Item = SelectedEntry>,
{
    let mut root_name: Option<String> = None;
    let mut records = Vec::new();
    for entry in entries {
        let mut segments = split_segments(&entry.full_path);
        let Some(root) = segments.next() else {
            continue;
        };
        if root_name.is_none() {
            root_name = Some(root.to_string());
        }
        let rest = segments.collect::<Vec<_>>().join("/");
        records.push(if entry.is_file {
            PathRecord::file(rest)
        } else {
            PathRecord::dir(rest)
        });
    }
    Dataset::new(root_name.unwrap_or_default(), records)
}

/// Collect every non-directory entry under `dir`, the way a folder picker
/// would. Unreadable entries below the root are logged and skipped.
pub fn walk_dir(dir: &Path, follow_symlinks: bool) -> Result<Dataset> {
    let root_name = dir
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| dir.to_string_lossy().to_string());

    let mut records = Vec::new();
    let mut skipped = 0usize;
    for entry_result in WalkDir::new(dir).follow_links(follow_symlinks) {
        let entry = match entry_result {
            Ok(entry) => entry,
            Err(e) => {
                if e.depth() == 0 {
                    return Err(SourceError::Walk {
                        path: dir.display().to_string(),
                        message: e.to_string(),
                    });
                }
                tracing::warn!("skipping unreadable entry: {}", e);
                skipped += 1;
                continue;
            }
        };
        if entry.depth() == 0 || entry.file_type().is_dir() {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(dir) else {
            continue;
        };
        let path = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        records.push(PathRecord::file(path));
    }

    tracing::info!(
        root = %dir.display(),
        files = records.len(),
        skipped,
        "collected local files"
    );
    Ok(Dataset::new(root_name, records))
}

/// Read one path per line. Blank lines are ignored, a leading `./` is
/// dropped, and a trailing `/` marks a directory.
pub fn from_path_list<R: BufRead>(reader: R, layout: ListLayout) -> Result<Dataset> {
    let mut entries = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let line = line.trim_end_matches('\r').trim();
        if line.is_empty() {
            continue;
        }
        let path = line.strip_prefix("./").unwrap_or(line);
        entries.push(SelectedEntry {
            full_path: path.trim_end_matches('/').to_string(),
            is_file: !path.ends_with('/'),
        });
    }

    Ok(match layout {
        ListLayout::FullPaths => from_full_paths(entries),
        ListLayout::Relative { root_name } => Dataset::new(
            root_name,
            entries
                .into_iter()
                .map(|e| PathRecord {
                    kind: if e.is_file {
                        NodeKind::File
                    } else {
                        NodeKind::Directory
                    },
                    path: e.full_path,
                })
                .collect(),
        ),
    })
}
