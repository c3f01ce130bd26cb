use chrono::NaiveDate;
use std::fs;
use std::io;
use std::path::PathBuf;
use tracing::info;
use super::composer::Briefing;

pub const HISTORY_PREVIEW_CHARS: usize = 2000;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("cannot create briefing directory {path}: {source}")]
    CreateDir { path: PathBuf, source: io::Error },
    #[error("cannot write briefing {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
    #[error("cannot read briefing archive {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchivedBriefing {
    pub date: NaiveDate,
    pub path: PathBuf,
    pub preview: String,
}

/// One Markdown file per calendar day: `<dir>/YYYY-MM-DD.md`.
pub struct BriefingStore {
    dir: PathBuf,
}

impl BriefingStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, date: NaiveDate) -> PathBuf {
        self.dir.join(format!("{}.md", date.format("%Y-%m-%d")))
    }

    /// 同一天重复生成会覆盖旧文件
    pub fn save(&self, briefing: &Briefing) -> Result<PathBuf, StoreError> {
        fs::create_dir_all(&self.dir).map_err(|source| StoreError::CreateDir {
            path: self.dir.clone(),
            source,
        })?;

        let path = self.path_for(briefing.date);
        fs::write(&path, &briefing.rendered_text).map_err(|source| StoreError::Write {
            path: path.clone(),
            source,
        })?;

        info!("Briefing saved to {}", path.display());
        Ok(path)
    }

    /// Newest first, judged by the date in the file name.
    pub fn history(&self, limit: usize) -> Result<Vec<ArchivedBriefing>, StoreError> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => return Err(StoreError::Read { path: self.dir.clone(), source }),
        };

        let mut dated: Vec<(NaiveDate, PathBuf)> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.extension().map_or(false, |ext| ext == "md"))
            .filter_map(|path| {
                let stem = path.file_stem()?.to_str()?;
                let date = NaiveDate::parse_from_str(stem, "%Y-%m-%d").ok()?;
                Some((date, path))
            })
            .collect();

        dated.sort_by(|a, b| b.0.cmp(&a.0));
        dated.truncate(limit);

        dated
            .into_iter()
            .map(|(date, path)| {
                let text = fs::read_to_string(&path).map_err(|source| StoreError::Read {
                    path: path.clone(),
                    source,
                })?;
                let preview = text.chars().take(HISTORY_PREVIEW_CHARS).collect();
                Ok(ArchivedBriefing { date, path, preview })
            })
            .collect()
    }
}
