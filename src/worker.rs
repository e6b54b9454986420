//! src/worker.rs
use crate::functions::{MapEmitter, Mapper};
use crate::master::MapTask;
use anyhow::Context;
use std::fs::File;
use std::io::{BufRead, BufReader};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct WorkerId(Uuid);

impl WorkerId {
    pub fn new() -> Self {
        WorkerId(Uuid::new_v4())
    }

    pub fn id(&self) -> Uuid {
        self.0
    }
}

impl Default for WorkerId {
    fn default() -> Self {
        Self::new()
    }
}

/// Line accounting for the map tasks of one worker.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MapStats {
    pub lines_read: u64,
    pub lines_skipped: u64,
}

impl MapStats {
    pub fn merge(&mut self, other: MapStats) {
        self.lines_read += other.lines_read;
        self.lines_skipped += other.lines_skipped;
    }
}

#[derive(Clone, Debug)]
pub struct Worker {
    id: WorkerId,
    map_tasks: Vec<MapTask>,
}

impl Default for Worker {
    fn default() -> Self {
        Self::new()
    }
}

impl Worker {
    pub fn new() -> Self {
        Self {
            id: WorkerId::new(),
            map_tasks: vec![],
        }
    }

    pub fn id(&self) -> &WorkerId {
        &self.id
    }

    pub fn assign_map(&mut self, task: MapTask) {
        self.map_tasks.push(task);
    }

    pub fn map_tasks(&self) -> &[MapTask] {
        &self.map_tasks
    }

    pub fn has_task(&self) -> bool {
        !self.map_tasks.is_empty()
    }

    /// Runs every assigned map task, feeding all output into `emitter`.
    ///
    /// Lines rejected by the mapper are skipped and counted; I/O failures
    /// abort the worker.
    pub fn run<M, E>(&self, mapper: &M, emitter: &mut E) -> Result<MapStats, anyhow::Error>
    where
        M: Mapper,
        E: MapEmitter<M::Key, M::Value>,
    {
        let mut stats = MapStats::default();
        for task in &self.map_tasks {
            let task_stats = run_task(task, mapper, emitter)
                .with_context(|| format!("Map task {} failed", task.task_id))?;
            if task_stats.lines_skipped > 0 {
                tracing::warn!(
                    task_id = %task.task_id,
                    split_id = %task.input_split.id(),
                    skipped = task_stats.lines_skipped,
                    read = task_stats.lines_read,
                    "Skipped unusable lines"
                );
            }
            stats.merge(task_stats);
        }
        Ok(stats)
    }
}

fn run_task<M, E>(task: &MapTask, mapper: &M, emitter: &mut E) -> Result<MapStats, anyhow::Error>
where
    M: Mapper,
    E: MapEmitter<M::Key, M::Value>,
{
    let path = task.input_split.path();
    let file = File::open(path)
        .with_context(|| format!("Failed to open input split {}", path.display()))?;
    let mut reader = BufReader::new(file);
    let mut stats = MapStats::default();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .context("Failed to read input split")?;
        if read == 0 {
            break;
        }
        stats.lines_read += 1;
        let line = String::from_utf8_lossy(&buf);
        if let Err(e) = mapper.map(stats.lines_read, &line, emitter) {
            tracing::debug!(
                task_id = %task.task_id,
                line_number = stats.lines_read,
                error = %e,
                "Skipping line"
            );
            stats.lines_skipped += 1;
        }
    }
    Ok(stats)
}
