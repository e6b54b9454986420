//! src/master.rs
use crate::file_splitter::InputSplit;
use crate::functions::{MapEmitter, Mapper};
use crate::worker::{MapStats, Worker, WorkerId};
use anyhow::Context;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TaskState {
    Idle,
    InProgress,
    Completed,
    Failed,
}

#[derive(Clone, Debug)]
pub struct MapTask {
    pub task_id: Uuid,
    pub state: TaskState,
    pub worker_id: Option<WorkerId>,
    pub input_split: InputSplit,
}

/// What one worker produced during a map phase.
#[derive(Debug)]
pub struct MapOutput<E> {
    pub worker_id: WorkerId,
    pub emitter: E,
    pub stats: MapStats,
}

#[derive(Debug)]
pub struct Master {
    workers: Vec<Worker>,
    map_tasks: Vec<MapTask>,
}

impl Master {
    pub fn new(workers: Vec<Worker>, input_splits: Vec<InputSplit>) -> Result<Self, anyhow::Error> {
        let map_tasks = input_splits
            .into_iter()
            .map(|input_split| MapTask {
                task_id: Uuid::new_v4(),
                state: TaskState::Idle,
                worker_id: None,
                input_split,
            })
            .collect();

        let mut master = Master { workers, map_tasks };
        master.assign_tasks()?;
        Ok(master)
    }

    /// Round-robin assignment of every map task.
    fn assign_tasks(&mut self) -> Result<(), anyhow::Error> {
        let num_workers = self.worker_count();
        if num_workers == 0 && !self.map_tasks.is_empty() {
            return Err(anyhow::anyhow!(
                "Cannot assign {} map tasks without workers",
                self.map_tasks.len()
            ));
        }

        for (curr_worker, task) in self.map_tasks.iter_mut().enumerate() {
            let worker = &mut self.workers[curr_worker % num_workers];
            task.worker_id = Some(worker.id().clone());
            task.state = TaskState::InProgress;
            worker.assign_map(task.clone());
        }
        Ok(())
    }

    pub fn workers(&self) -> &[Worker] {
        &self.workers
    }

    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }

    pub fn task_count(&self) -> usize {
        self.map_tasks.len()
    }

    pub fn map_tasks(&self) -> &[MapTask] {
        &self.map_tasks
    }

    fn set_worker_task_state(&mut self, worker_id: &WorkerId, state: TaskState) {
        for task in self
            .map_tasks
            .iter_mut()
            .filter(|task| task.worker_id.as_ref() == Some(worker_id))
        {
            task.state = state.clone();
        }
    }

    /// Runs every worker's tasks concurrently, each into its own emitter.
    ///
    /// Returns only once every worker has finished, so callers never observe
    /// partial output. Any worker failure fails the whole phase.
    #[tracing::instrument(
        name = "Run map phase",
        skip_all,
        fields(workers = self.worker_count(), tasks = self.task_count())
    )]
    pub async fn run_map_phase<M, E, F>(
        &mut self,
        mapper: Arc<M>,
        make_emitter: F,
    ) -> Result<Vec<MapOutput<E>>, anyhow::Error>
    where
        M: Mapper + Send + Sync + 'static,
        E: MapEmitter<M::Key, M::Value> + Send + 'static,
        F: Fn() -> E,
    {
        let mut handles = Vec::new();
        for worker in self.workers.iter().filter(|w| w.has_task()) {
            let worker = worker.clone();
            let mapper = Arc::clone(&mapper);
            let mut emitter = make_emitter();
            let worker_id = worker.id().clone();
            let handle = tokio::task::spawn_blocking(move || {
                let stats = worker.run(mapper.as_ref(), &mut emitter)?;
                Ok::<_, anyhow::Error>(MapOutput {
                    worker_id: worker.id().clone(),
                    emitter,
                    stats,
                })
            });
            handles.push((worker_id, handle));
        }

        let mut outputs = Vec::with_capacity(handles.len());
        let mut failure = None;
        for (worker_id, handle) in handles {
            let result = handle
                .await
                .context("Map worker panicked")
                .and_then(|result| result);
            match result {
                Ok(output) => {
                    self.set_worker_task_state(&worker_id, TaskState::Completed);
                    outputs.push(output);
                }
                Err(e) => {
                    tracing::error!(worker_id = %worker_id.id(), error = ?e, "Map worker failed");
                    self.set_worker_task_state(&worker_id, TaskState::Failed);
                    failure.get_or_insert(e);
                }
            }
        }

        match failure {
            Some(e) => Err(e),
            None => Ok(outputs),
        }
    }
}
