//! JSONファイルを使うストア実装

use super::{Comment, Item, ItemKind, MetadataStore, Source, StoreError, StoreResult};
use super::{FRAME_HANDLE_IN, FRAME_HANDLE_OUT};
use serde::{Deserialize, Serialize};
use shot_import_common::{
    normalize_task, valid_asset_type, valid_shot_type, valid_task, NamingPattern,
};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

/// ストアファイルの構造
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoreFile {
    /// バージョン（互換性チェック用）
    version: u32,
    /// プロジェクト → (名前 → 項目)
    projects: BTreeMap<String, BTreeMap<String, Item>>,
}

impl Default for StoreFile {
    fn default() -> Self {
        Self {
            version: JsonStore::CURRENT_VERSION,
            projects: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct JsonStore {
    path: Option<PathBuf>,
    data: StoreFile,
}

impl JsonStore {
    const CURRENT_VERSION: u32 = 1;

    /// 保存先を持たないストア
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// ストアファイルを読み込む（存在しなければ空）
    pub fn open(path: &Path) -> StoreResult<Self> {
        if !path.exists() {
            return Ok(Self {
                path: Some(path.to_path_buf()),
                data: StoreFile::default(),
            });
        }

        let reader = BufReader::new(File::open(path)?);
        let data: StoreFile = serde_json::from_reader(reader)?;
        if data.version != Self::CURRENT_VERSION {
            return Err(StoreError::UnsupportedVersion(data.version));
        }

        Ok(Self {
            path: Some(path.to_path_buf()),
            data,
        })
    }

    /// ストアファイルを保存（インメモリなら何もしない）
    pub fn save(&self) -> StoreResult<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, &self.data)?;
        Ok(())
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn projects(&self) -> impl Iterator<Item = &str> {
        self.data.projects.keys().map(String::as_str)
    }

    pub fn get(&self, project: &str, name: &str) -> Option<&Item> {
        self.data.projects.get(project)?.get(name)
    }

    /// 項目を登録する
    ///
    /// 名前はショット名かアセット名の形式であること。アセットタイプとタスクは
    /// 列挙値・タスク一覧で検証し、タスクは正式名で保存する。
    pub fn add_item<S: AsRef<str>>(
        &mut self,
        project: &str,
        name: &str,
        asset_type: Option<&str>,
        tasks: &[String],
        known_tasks: &[S],
    ) -> StoreResult<&Item> {
        let kind = ItemKind::detect(name).ok_or_else(|| shot_import_common::Error::Format {
            pattern: NamingPattern::ShotName.label(),
            value: name.to_string(),
        })?;
        if let Some(asset_type) = asset_type {
            valid_asset_type(asset_type)?;
        }
        for task in tasks {
            valid_task(task, known_tasks)?;
        }

        let items = self.data.projects.entry(project.to_string()).or_default();
        if items.contains_key(name) {
            return Err(StoreError::DuplicateItem {
                project: project.to_string(),
                name: name.to_string(),
            });
        }

        let mut item = Item::new(name, kind);
        item.asset_type = asset_type.unwrap_or_default().to_string();
        item.tasks = tasks.iter().map(|t| normalize_task(t)).collect();
        tracing::debug!(project, name, ?kind, "item registered");

        Ok(items.entry(name.to_string()).or_insert(item))
    }

    fn item_mut(&mut self, project: &str, name: &str) -> StoreResult<&mut Item> {
        let items = self
            .data
            .projects
            .get_mut(project)
            .ok_or_else(|| StoreError::ProjectNotFound(project.to_string()))?;
        items.get_mut(name).ok_or_else(|| StoreError::ItemNotFound {
            project: project.to_string(),
            name: name.to_string(),
        })
    }
}

impl MetadataStore for JsonStore {
    fn set_shot_type(&mut self, project: &str, name: &str, shot_type: &str) -> StoreResult<()> {
        valid_shot_type(shot_type)?;
        self.item_mut(project, name)?.shot_type = shot_type.to_string();
        Ok(())
    }

    fn set_note(
        &mut self,
        project: &str,
        name: &str,
        author: &str,
        note: &str,
        overwrite: bool,
    ) -> StoreResult<String> {
        let item = self.item_mut(project, name)?;
        if overwrite || item.note.is_empty() {
            item.note = note.to_string();
        } else {
            item.note = format!("{}\n{}", item.note, note);
        }
        item.note_author = author.to_string();
        tracing::debug!(project, name, author, overwrite, "note updated");
        Ok(item.note.clone())
    }

    fn add_comment(
        &mut self,
        project: &str,
        name: &str,
        author: &str,
        date: &str,
        text: &str,
    ) -> StoreResult<()> {
        self.item_mut(project, name)?.comments.push(Comment {
            date: date.to_string(),
            author: author.to_string(),
            text: text.to_string(),
        });
        Ok(())
    }

    fn add_source(
        &mut self,
        project: &str,
        name: &str,
        author: &str,
        title: &str,
        path: &str,
    ) -> StoreResult<()> {
        self.item_mut(project, name)?.sources.push(Source {
            author: author.to_string(),
            title: title.to_string(),
            path: path.to_string(),
        });
        Ok(())
    }

    fn set_deadline_3d(&mut self, project: &str, name: &str, date: &str) -> StoreResult<()> {
        self.item_mut(project, name)?.ddline_3d = date.to_string();
        Ok(())
    }

    fn set_deadline_2d(&mut self, project: &str, name: &str, date: &str) -> StoreResult<()> {
        self.item_mut(project, name)?.ddline_2d = date.to_string();
        Ok(())
    }

    fn set_findate(&mut self, project: &str, name: &str, date: &str) -> StoreResult<()> {
        self.item_mut(project, name)?.findate = date.to_string();
        Ok(())
    }

    fn set_finver(&mut self, project: &str, name: &str, version: &str) -> StoreResult<()> {
        self.item_mut(project, name)?.finver = version.to_string();
        Ok(())
    }

    fn set_tags(&mut self, project: &str, name: &str, tags: &[String]) -> StoreResult<()> {
        self.item_mut(project, name)?.tags = tags.to_vec();
        Ok(())
    }

    fn set_rnum(&mut self, project: &str, name: &str, rnum: &str) -> StoreResult<()> {
        self.item_mut(project, name)?.rnum = rnum.to_string();
        Ok(())
    }

    fn set_frame(&mut self, project: &str, name: &str, key: &str, frame: i32) -> StoreResult<()> {
        let item = self.item_mut(project, name)?;
        match key {
            FRAME_HANDLE_IN => item.handle_in = Some(frame),
            FRAME_HANDLE_OUT => item.handle_out = Some(frame),
            other => return Err(StoreError::InvalidFrameKey(other.to_string())),
        }
        Ok(())
    }

    fn set_just_timecode_in(
        &mut self,
        project: &str,
        name: &str,
        timecode: &str,
    ) -> StoreResult<()> {
        self.item_mut(project, name)?.just_timecode_in = timecode.to_string();
        Ok(())
    }
}
