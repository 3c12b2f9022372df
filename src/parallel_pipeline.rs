// THEORY:
// Per-image extraction shares no state with any other image, so it parallelizes
// trivially. The `ParallelPipeline` keeps the sequential pipeline's contract and only
// changes how the images are sampled:
//
// 1.  A dispatcher task receives `ImageTask`s and hands them round-robin to a fixed
//     pool of worker tasks (one per configured worker, `num_cpus` by default).
// 2.  Each worker runs the decode and extraction on tokio's blocking pool, since
//     decoding is CPU-bound, and answers on the task's oneshot channel. A panic
//     inside the decoder only costs that image: it is reported as a decode failure
//     and skipped like any other unreadable file.
// 3.  The caller keeps the oneshot receivers in input order and awaits them all, so
//     results come back in file enumeration order no matter which worker finished
//     first. The same `build_report` fold as the sequential pipeline then runs,
//     which makes the two pipelines observably identical.

use crate::config::PipelineConfig;
use crate::core_modules::brightness::BrightnessAdjuster;
use crate::core_modules::dominant_color::DominantColorExtractor;
use crate::error::{HueError, Result};
use crate::pipeline::{ColorReport, ImageSample, build_report, sample_image};
use crate::selection::{self, EntityMatcher};
use futures::future::join_all;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinError;

pub struct ImageTask {
    pub path: PathBuf,
    pub result_sender: oneshot::Sender<Result<ImageSample>>,
}

pub struct WorkerPool {
    task_sender: mpsc::UnboundedSender<ImageTask>,
    workers: Vec<tokio::task::JoinHandle<()>>,
}

impl WorkerPool {
    /// Spawns the dispatcher and `worker_count` workers. Must be called inside a
    /// tokio runtime.
    pub fn new(extractor: DominantColorExtractor, top_n: usize, worker_count: usize) -> Self {
        let worker_count = worker_count.max(1);
        let (task_sender, mut task_receiver) = mpsc::unbounded_channel::<ImageTask>();
        let mut workers = Vec::with_capacity(worker_count);

        let (worker_senders, worker_receivers): (Vec<_>, Vec<_>) = (0..worker_count)
            .map(|_| mpsc::unbounded_channel::<ImageTask>())
            .unzip();

        // Spawn dispatcher
        tokio::spawn(async move {
            let mut worker_idx = 0;
            while let Some(task) = task_receiver.recv().await {
                let _ = worker_senders[worker_idx].send(task);
                worker_idx = (worker_idx + 1) % worker_count;
            }
        });

        // Spawn workers
        let extractor = Arc::new(extractor);
        for mut worker_receiver in worker_receivers {
            let worker_extractor = Arc::clone(&extractor);

            let worker = tokio::spawn(async move {
                while let Some(task) = worker_receiver.recv().await {
                    let outcome = Self::process_image_worker(&worker_extractor, top_n, task.path).await;
                    let _ = task.result_sender.send(outcome);
                }
            });

            workers.push(worker);
        }

        Self {
            task_sender,
            workers,
        }
    }

    async fn process_image_worker(
        extractor: &Arc<DominantColorExtractor>,
        top_n: usize,
        path: PathBuf,
    ) -> Result<ImageSample> {
        let extractor = Arc::clone(extractor);
        let task_path = path.clone();
        let joined =
            tokio::task::spawn_blocking(move || sample_image(&extractor, top_n, &task_path)).await;
        settle(&path, joined)
    }

    /// Queues one image and returns the receiver for its result.
    pub fn submit(&self, path: PathBuf) -> Result<oneshot::Receiver<Result<ImageSample>>> {
        let (result_sender, result_receiver) = oneshot::channel();
        self.task_sender
            .send(ImageTask {
                path,
                result_sender,
            })
            .map_err(|_| HueError::Worker("Failed to send task to worker pool".to_string()))?;
        Ok(result_receiver)
    }

    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }

    /// Closes the queue and waits for every worker to drain.
    pub async fn shutdown(self) {
        drop(self.task_sender);
        for worker in self.workers {
            let _ = worker.await;
        }
    }
}

/// Folds a finished blocking task into the image's outcome.
fn settle(
    path: &Path,
    joined: std::result::Result<Result<ImageSample>, JoinError>,
) -> Result<ImageSample> {
    match joined {
        Ok(outcome) => outcome,
        Err(e) if e.is_panic() => Err(HueError::decode(path, e)),
        Err(e) => Err(HueError::Worker(e.to_string())),
    }
}

pub struct ParallelPipeline {
    config: PipelineConfig,
    adjuster: BrightnessAdjuster,
    worker_pool: WorkerPool,
}

impl ParallelPipeline {
    /// Must be called inside a tokio runtime.
    pub fn new(config: PipelineConfig) -> Self {
        let worker_pool = WorkerPool::new(config.extractor(), config.top_n, config.workers);
        log::debug!("Started {} extraction worker(s)", worker_pool.worker_count());
        Self {
            adjuster: config.adjuster(),
            config,
            worker_pool,
        }
    }

    pub async fn run(&self, entity: &str, paths: &[PathBuf]) -> Result<ColorReport> {
        let mut receivers = Vec::with_capacity(paths.len());
        for path in paths {
            receivers.push(self.worker_pool.submit(path.clone())?);
        }

        let outcomes: Vec<Result<ImageSample>> = join_all(receivers)
            .await
            .into_iter()
            .map(|received| {
                received
                    .map_err(|_| HueError::Worker("Failed to receive result from worker".to_string()))
                    .and_then(|outcome| outcome)
            })
            .collect();

        build_report(&self.config, &self.adjuster, entity, outcomes)
    }

    pub async fn run_dir(&self, dir: &Path, entity: &str) -> Result<ColorReport> {
        let matcher = EntityMatcher::new(entity)?;
        let paths = selection::candidate_files(dir, &matcher)?;
        self.run(entity, &paths).await
    }

    pub async fn shutdown(self) {
        self.worker_pool.shutdown().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_modules::aggregator::Reduction;
    use crate::core_modules::image_source::save_rgb;
    use crate::core_modules::pixel::pixel::Pixel;
    use crate::pipeline::ColorPipeline;
    use tempfile::TempDir;

    fn write_solid(dir: &Path, name: &str, color: [u8; 3]) -> PathBuf {
        let path = dir.join(name);
        let buffer: Vec<u8> = color.iter().copied().cycle().take(16 * 16 * 3).collect();
        save_rgb(&path, 16, 16, &buffer).unwrap();
        path
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn matches_sequential_pipeline() {
        let dir = TempDir::new().unwrap();
        let broken = dir.path().join("game-broken.png");
        std::fs::write(&broken, b"nope").unwrap();
        let mut paths = vec![broken];
        for (i, color) in [[200, 0, 0], [0, 0, 200], [40, 50, 40], [44, 40, 81], [0, 0, 0]]
            .into_iter()
            .enumerate()
        {
            paths.push(write_solid(dir.path(), &format!("game-shot{i}.png"), color));
        }

        for reduction in [Reduction::Mean, Reduction::Brightest] {
            for brighten in [false, true] {
                let config = PipelineConfig {
                    reduction,
                    brighten,
                    workers: 3,
                    ..PipelineConfig::default()
                };
                let sequential = ColorPipeline::new(config.clone()).run("game", &paths).unwrap();
                let parallel = ParallelPipeline::new(config);
                let concurrent = parallel.run("game", &paths).await.unwrap();
                assert_eq!(concurrent, sequential);
                parallel.shutdown().await;
            }
        }
    }

    #[tokio::test]
    async fn end_to_end_mean_over_directory() {
        let dir = TempDir::new().unwrap();
        write_solid(dir.path(), "game-front.png", [200, 0, 0]);
        write_solid(dir.path(), "game-back.png", [0, 0, 200]);

        let config = PipelineConfig {
            reduction: Reduction::Mean,
            workers: 2,
            ..PipelineConfig::default()
        };
        let pipeline = ParallelPipeline::new(config);
        let report = pipeline.run_dir(dir.path(), "game").await.unwrap();
        assert_eq!(report.color, Pixel::new(100, 0, 100));
    }

    #[tokio::test]
    async fn empty_run_is_no_input() {
        let pipeline = ParallelPipeline::new(PipelineConfig {
            workers: 1,
            ..PipelineConfig::default()
        });
        assert!(matches!(
            pipeline.run("game", &[]).await,
            Err(HueError::NoInput { .. })
        ));
    }

    #[tokio::test]
    async fn decoder_panic_skips_only_that_image() {
        let path = PathBuf::from("game-cursed.png");
        let joined = tokio::task::spawn_blocking(|| -> Result<ImageSample> {
            panic!("decoder blew up")
        })
        .await;

        let err = settle(&path, joined).unwrap_err();
        assert!(matches!(err, HueError::Decode { .. }));
        assert!(err.is_recoverable());
        assert!(err.to_string().contains("game-cursed.png"));
    }
}
