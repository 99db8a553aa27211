/// One file's worth of staged changes: the raw `+`/`-` prefixed lines from
/// the diff, in input order. Duplicate filenames are not deduplicated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangedFile {
    pub filename: String,
    pub changes: Vec<String>,
}

/// How a configured ignore entry matches a filename. Entries beginning with
/// a dot match the file extension exactly; everything else is a plain
/// suffix match. Both are case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IgnoreRule {
    Extension(String),
    Suffix(String),
}

impl IgnoreRule {
    pub fn parse(entry: &str) -> Self {
        if entry.starts_with('.') {
            IgnoreRule::Extension(entry.to_string())
        } else {
            IgnoreRule::Suffix(entry.to_string())
        }
    }

    pub fn matches(&self, filename: &str) -> bool {
        match self {
            IgnoreRule::Extension(ext) => file_extension(filename) == ext.as_str(),
            IgnoreRule::Suffix(suffix) => filename.ends_with(suffix),
        }
    }
}

/// The extension including its dot, taken from the last component of the
/// path. A leading dot alone does not count, so dotfiles have no extension.
fn file_extension(filename: &str) -> &str {
    let basename = filename.rsplit('/').next().unwrap_or(filename);
    match basename.rfind('.') {
        Some(idx) if idx > 0 => &basename[idx..],
        _ => "",
    }
}

pub struct DiffParser;

impl DiffParser {
    /// Splits diff text into per-file records. A `diff --git` header opens a
    /// record (filename is the text after the first `" b/"`); `+`/`-` lines
    /// are appended verbatim; hunk headers, index lines and context are
    /// dropped. The last record is flushed at end of input.
    pub fn parse(diff: &str) -> Vec<ChangedFile> {
        let mut files = Vec::new();
        let mut current: Option<ChangedFile> = None;

        for line in diff.lines() {
            if line.starts_with("diff --git") {
                if let Some(file) = current.take() {
                    files.push(file);
                }
                let filename = line
                    .split_once(" b/")
                    .map(|(_, rest)| rest.to_string())
                    .unwrap_or_default();
                current = Some(ChangedFile {
                    filename,
                    changes: Vec::new(),
                });
            } else if let Some(file) = current.as_mut() {
                if line.starts_with('+') || line.starts_with('-') {
                    file.changes.push(line.to_string());
                }
            }
        }

        if let Some(file) = current {
            files.push(file);
        }

        files
    }

    /// Drops files matching any ignore rule. Idempotent and order-independent
    /// in the rules.
    pub fn filter_ignored(files: Vec<ChangedFile>, rules: &[IgnoreRule]) -> Vec<ChangedFile> {
        files
            .into_iter()
            .filter(|file| !rules.iter().any(|rule| rule.matches(&file.filename)))
            .collect()
    }
}
