//! Card thumbnails, fetched in the background and cached per URL for the session.

use crate::config::AppConfig;
use crate::data::http_client;
use egui::{ColorImage, TextureHandle, TextureOptions};
use reqwest::blocking::Client;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum ThumbnailError {
    #[error("image request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("image could not be decoded: {0}")]
    Decode(#[from] image::ImageError),
}

/// What a card can show for its photo right now.
#[derive(Clone)]
pub enum Thumbnail {
    Loading,
    Ready(TextureHandle),
    Unavailable,
}

enum Entry {
    Loading,
    Ready(TextureHandle),
    Failed,
}

/// Number of background threads fetching photos.
pub const THUMBNAIL_WORKERS: usize = 4;

/// A photo waiting for a worker.
struct Job {
    generation: u64,
    url: String,
}

/// Background fetch result, tagged with the cache generation that asked for it.
struct Fetched {
    generation: u64,
    url: String,
    result: Result<ColorImage, ThumbnailError>,
}

pub struct ThumbnailCache {
    entries: HashMap<String, Entry>,
    generation: Arc<AtomicU64>,
    jobs: Option<Sender<Job>>,
    rx: Receiver<Fetched>,
    workers: usize,
}

impl ThumbnailCache {
    pub fn new(config: &AppConfig) -> Self {
        let (tx, rx) = channel();
        let generation = Arc::new(AtomicU64::new(0));

        let client = match http_client(config) {
            Ok(client) => Some(client),
            Err(e) => {
                warn!(error = %e, "thumbnail client unavailable, photos disabled");
                None
            }
        };

        let mut workers = 0;
        let jobs = client.map(|client| {
            let (job_tx, job_rx) = channel::<Job>();
            let job_rx = Arc::new(Mutex::new(job_rx));
            for _ in 0..THUMBNAIL_WORKERS {
                spawn_worker(
                    client.clone(),
                    config.thumbnail_edge,
                    Arc::clone(&job_rx),
                    tx.clone(),
                    Arc::clone(&generation),
                );
                workers += 1;
            }
            job_tx
        });

        Self {
            entries: HashMap::new(),
            generation,
            jobs,
            rx,
            workers,
        }
    }

    /// Current thumbnail for `url`, queueing a fetch on first request.
    pub fn get(&mut self, url: &str) -> Thumbnail {
        if let Some(entry) = self.entries.get(url) {
            return match entry {
                Entry::Loading => Thumbnail::Loading,
                Entry::Ready(texture) => Thumbnail::Ready(texture.clone()),
                Entry::Failed => Thumbnail::Unavailable,
            };
        }

        let Some(jobs) = &self.jobs else {
            return Thumbnail::Unavailable;
        };

        let job = Job {
            generation: self.generation.load(Ordering::Relaxed),
            url: url.to_string(),
        };
        if jobs.send(job).is_err() {
            warn!(url, "thumbnail workers stopped");
            self.entries.insert(url.to_string(), Entry::Failed);
            return Thumbnail::Unavailable;
        }
        self.entries.insert(url.to_string(), Entry::Loading);
        Thumbnail::Loading
    }

    /// Turn finished fetches into textures.
    pub fn poll(&mut self, ctx: &egui::Context) {
        while let Ok(fetched) = self.rx.try_recv() {
            if fetched.generation != self.generation.load(Ordering::Relaxed) {
                continue;
            }
            let entry = match fetched.result {
                Ok(image) => {
                    debug!(url = %fetched.url, "thumbnail ready");
                    let texture = ctx.load_texture(
                        format!("thumb:{}", fetched.url),
                        image,
                        TextureOptions::LINEAR,
                    );
                    Entry::Ready(texture)
                }
                Err(e) => {
                    warn!(url = %fetched.url, error = %e, "thumbnail failed");
                    Entry::Failed
                }
            };
            self.entries.insert(fetched.url, entry);
        }
    }

    pub fn has_pending(&self) -> bool {
        self.entries.values().any(|e| matches!(e, Entry::Loading))
    }

    /// Forget every thumbnail. Queued fetches are skipped and results still in
    /// flight are ignored when they land.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.generation.fetch_add(1, Ordering::Relaxed);
    }

    pub fn worker_count(&self) -> usize {
        self.workers
    }
}

fn spawn_worker(
    client: Client,
    edge: u32,
    jobs: Arc<Mutex<Receiver<Job>>>,
    results: Sender<Fetched>,
    generation: Arc<AtomicU64>,
) {
    thread::spawn(move || loop {
        let job = {
            let Ok(jobs) = jobs.lock() else {
                return;
            };
            match jobs.recv() {
                Ok(job) => job,
                Err(_) => return, // Cache dropped
            }
        };

        if job.generation != generation.load(Ordering::Relaxed) {
            continue;
        }

        let result = fetch_thumbnail(&client, &job.url, edge);
        let fetched = Fetched {
            generation: job.generation,
            url: job.url,
            result,
        };
        if results.send(fetched).is_err() {
            return;
        }
    });
}

fn fetch_thumbnail(client: &Client, url: &str, edge: u32) -> Result<ColorImage, ThumbnailError> {
    let bytes = client.get(url).send()?.error_for_status()?.bytes()?;
    decode_thumbnail(&bytes, edge)
}

/// Decode an image and shrink it to fit an `edge` x `edge` box.
fn decode_thumbnail(bytes: &[u8], edge: u32) -> Result<ColorImage, ThumbnailError> {
    let rgba = image::load_from_memory(bytes)?.thumbnail(edge, edge).to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    Ok(ColorImage::from_rgba_unmultiplied(size, rgba.as_raw()))
}
