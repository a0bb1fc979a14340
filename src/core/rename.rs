use crate::domain::model::{DirEntryInfo, Outcome, RenameOperation, RenamePlan, RenameSettings};
use crate::domain::ports::{PlanDescription, Storage, Tool};
use crate::utils::error::{Result, ToolboxError};
use async_trait::async_trait;
use std::collections::HashSet;

const TOOL_NAME: &str = "rename";

/// 拆出主檔名與副檔名（含點），開頭連續的點都屬於主檔名
pub fn split_name(name: &str) -> (&str, &str) {
    let leading = name.len() - name.trim_start_matches('.').len();
    match name[leading..].rfind('.') {
        Some(index) => name.split_at(leading + index),
        None => (name, ""),
    }
}

pub fn target_name(name: &str, number: usize, settings: &RenameSettings) -> String {
    let (stem, ext) = split_name(name);
    if settings.numbered {
        format!(
            "{}{:0width$}{}{}",
            settings.prefix,
            number,
            settings.suffix,
            ext,
            width = settings.pad
        )
    } else {
        format!("{}{}{}{}", settings.prefix, stem, settings.suffix, ext)
    }
}

pub fn plan_renames(entries: &[DirEntryInfo], settings: &RenameSettings) -> Result<RenamePlan> {
    let mut sorted: Vec<&DirEntryInfo> = entries.iter().collect();
    sorted.sort_by(|a, b| a.name.cmp(&b.name));

    let mut plan = RenamePlan {
        directory: settings.directory.clone(),
        ..Default::default()
    };

    // 只有一般檔案會編號
    let mut next = Some(settings.start);
    for entry in sorted {
        if !entry.is_file {
            plan.skipped.push(entry.name.clone());
            continue;
        }

        let number = if settings.numbered {
            let number = next.ok_or_else(|| ToolboxError::InvalidConfigValueError {
                field: "start".to_string(),
                value: settings.start.to_string(),
                reason: "numbering would overflow".to_string(),
            })?;
            next = number.checked_add(1);
            number
        } else {
            settings.start
        };
        let to = target_name(&entry.name, number, settings);

        if to == entry.name {
            plan.unchanged.push(entry.name.clone());
        } else {
            plan.operations.push(RenameOperation {
                from: entry.name.clone(),
                to,
            });
        }
    }

    let needs_staging = {
        let sources: HashSet<&str> = plan.operations.iter().map(|op| op.from.as_str()).collect();
        let existing: HashSet<&str> = entries.iter().map(|entry| entry.name.as_str()).collect();
        let mut targets = HashSet::new();

        for op in &plan.operations {
            if !targets.insert(op.to.as_str()) {
                return Err(ToolboxError::NameConflict {
                    target: op.to.clone(),
                    reason: "more than one file would be renamed to this name".to_string(),
                });
            }
            if existing.contains(op.to.as_str()) && !sources.contains(op.to.as_str()) {
                return Err(ToolboxError::NameConflict {
                    target: op.to.clone(),
                    reason: format!("'{}' already exists and is not being renamed", op.to),
                });
            }
        }

        plan.operations
            .iter()
            .any(|op| sources.contains(op.to.as_str()))
    };
    plan.needs_staging = needs_staging;

    Ok(plan)
}

impl PlanDescription for RenamePlan {
    fn item_count(&self) -> usize {
        self.operations.len()
    }

    fn describe(&self) -> Vec<String> {
        if self.operations.is_empty() {
            return vec![format!(
                "No files to rename in '{}'",
                self.directory.display()
            )];
        }
        self.operations
            .iter()
            .map(|op| format!("Would rename '{}' -> '{}'", op.from, op.to))
            .collect()
    }
}

pub struct RenameTool<S: Storage> {
    storage: S,
    settings: RenameSettings,
}

impl<S: Storage> RenameTool<S> {
    pub fn new(storage: S, settings: RenameSettings) -> Self {
        Self { storage, settings }
    }

    /// 為每個操作挑一個暫存名稱，避開現有檔案、來源與目標名稱
    async fn temp_names(&self, plan: &RenamePlan) -> Result<Vec<String>> {
        let mut reserved: HashSet<String> = plan
            .operations
            .iter()
            .flat_map(|op| [op.from.clone(), op.to.clone()])
            .collect();
        let mut names = Vec::with_capacity(plan.operations.len());
        let mut counter = 0usize;

        while names.len() < plan.operations.len() {
            let candidate = format!(".file-toolbox-{}.tmp", counter);
            counter += 1;
            if reserved.contains(&candidate)
                || self.storage.exists(&plan.directory.join(&candidate)).await?
            {
                continue;
            }
            reserved.insert(candidate.clone());
            names.push(candidate);
        }
        Ok(names)
    }
}

#[async_trait]
impl<S: Storage> Tool for RenameTool<S> {
    type Plan = RenamePlan;

    fn name(&self) -> &'static str {
        TOOL_NAME
    }

    async fn plan(&self) -> Result<RenamePlan> {
        let entries = self.storage.list_dir(&self.settings.directory).await?;
        tracing::debug!(
            "Found {} entries in '{}'",
            entries.len(),
            self.settings.directory.display()
        );

        let plan = plan_renames(&entries, &self.settings)?;
        for name in &plan.skipped {
            tracing::debug!("Skipping '{}' (not a regular file)", name);
        }
        if !plan.unchanged.is_empty() {
            tracing::debug!("{} file(s) already have their target name", plan.unchanged.len());
        }
        Ok(plan)
    }

    async fn apply(&self, plan: RenamePlan) -> Result<Outcome> {
        if plan.operations.is_empty() {
            return Ok(Outcome::new(TOOL_NAME, plan.describe()));
        }

        let dir = &plan.directory;
        let mut lines = Vec::with_capacity(plan.operations.len());

        if plan.needs_staging {
            // 先全部搬到暫存名稱，避免互換或鏈狀改名時覆蓋檔案
            tracing::debug!("Target names overlap sources, staging through temporary names");
            let temps = self.temp_names(&plan).await?;
            let mut staged = Vec::with_capacity(plan.operations.len());
            for (temp, op) in temps.into_iter().zip(&plan.operations) {
                self.storage
                    .rename(&dir.join(&op.from), &dir.join(&temp))
                    .await?;
                staged.push((temp, op));
            }
            for (temp, op) in staged {
                self.storage.rename(&dir.join(&temp), &dir.join(&op.to)).await?;
                tracing::debug!("Renamed '{}' -> '{}'", op.from, op.to);
                lines.push(format!("Renamed '{}' -> '{}'", op.from, op.to));
            }
        } else {
            for op in &plan.operations {
                self.storage
                    .rename(&dir.join(&op.from), &dir.join(&op.to))
                    .await?;
                tracing::debug!("Renamed '{}' -> '{}'", op.from, op.to);
                lines.push(format!("Renamed '{}' -> '{}'", op.from, op.to));
            }
        }

        Ok(Outcome::new(TOOL_NAME, lines))
    }
}
