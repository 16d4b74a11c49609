//! Background image decoding for the three card textures.
//!
//! Decoding a phone photo takes long enough to drop frames, so a single
//! worker thread decodes requests in order and hands finished images back
//! to the frame loop over a channel. Until a result arrives the GPU slot
//! keeps its transparent-black placeholder.

use anyhow::{anyhow, Context, Result};
use card_shading::TextureImage;
use crossbeam_channel::{Receiver, Sender};
use std::path::{Path, PathBuf};
use std::thread::JoinHandle;

/// Longest texture side uploaded to the GPU; larger photos are downscaled.
pub const MAX_TEXTURE_SIDE: u32 = 4096;

/// Which card texture a request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureKind {
    /// The user's photo.
    Base,
    Holo,
    UltraRare,
}

impl TextureKind {
    pub const ALL: [TextureKind; 3] = [TextureKind::Base, TextureKind::Holo, TextureKind::UltraRare];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            TextureKind::Base => "Base",
            TextureKind::Holo => "Holo",
            TextureKind::UltraRare => "Ultra Rare",
        }
    }
}

/// Decodes an image file into an RGBA8 texture, downscaling oversized ones.
pub fn load_texture_image(path: &Path) -> Result<TextureImage> {
    let img = image::open(path).with_context(|| format!("decoding {}", path.display()))?;

    let img = if img.width() > MAX_TEXTURE_SIDE || img.height() > MAX_TEXTURE_SIDE {
        log::info!(
            "Downscaling {} from {}x{} to fit {}px",
            path.display(),
            img.width(),
            img.height(),
            MAX_TEXTURE_SIDE
        );
        img.resize(
            MAX_TEXTURE_SIDE,
            MAX_TEXTURE_SIDE,
            image::imageops::FilterType::Triangle,
        )
    } else {
        img
    };

    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(TextureImage::from_rgba8(width, height, rgba.into_raw())?)
}

struct LoadRequest {
    kind: TextureKind,
    path: PathBuf,
    generation: u64,
}

/// A finished decode, successful or not.
pub struct LoadedTexture {
    pub kind: TextureKind,
    pub path: PathBuf,
    pub result: Result<TextureImage>,
}

/// Owns the decoder thread. Dropping the loader closes the request channel
/// and lets the worker exit.
pub struct AssetLoader {
    requests: Option<Sender<LoadRequest>>,
    results: Receiver<(u64, LoadedTexture)>,
    /// Generation of the newest request per slot; older results are stale.
    latest: [u64; 3],
    /// Path of the newest request per slot that has not resolved yet.
    in_flight: [Option<PathBuf>; 3],
    next_generation: u64,
    worker: Option<JoinHandle<()>>,
}

impl AssetLoader {
    pub fn spawn() -> Result<Self> {
        let (req_tx, req_rx) = crossbeam_channel::unbounded::<LoadRequest>();
        let (res_tx, res_rx) = crossbeam_channel::unbounded();

        let worker = std::thread::Builder::new()
            .name("texture-loader".into())
            .spawn(move || {
                for req in req_rx.iter() {
                    log::debug!("Decoding {} texture from {}", req.kind.label(), req.path.display());
                    let result = load_texture_image(&req.path);
                    let loaded = LoadedTexture {
                        kind: req.kind,
                        path: req.path,
                        result,
                    };
                    if res_tx.send((req.generation, loaded)).is_err() {
                        break;
                    }
                }
            })
            .context("spawning texture loader thread")?;

        Ok(Self {
            requests: Some(req_tx),
            results: res_rx,
            latest: [0; 3],
            in_flight: [None, None, None],
            next_generation: 1,
            worker: Some(worker),
        })
    }

    /// Queues a decode. A newer request for the same slot supersedes any
    /// request still in flight.
    pub fn request(&mut self, kind: TextureKind, path: impl Into<PathBuf>) -> Result<()> {
        let path = path.into();
        let generation = self.next_generation;
        self.next_generation += 1;

        let sender = self
            .requests
            .as_ref()
            .ok_or_else(|| anyhow!("texture loader is shut down"))?;
        sender
            .send(LoadRequest {
                kind,
                path: path.clone(),
                generation,
            })
            .map_err(|_| anyhow!("texture loader thread has exited"))?;

        self.latest[kind.index()] = generation;
        self.in_flight[kind.index()] = Some(path);
        Ok(())
    }

    /// Path of the newest unresolved request for `kind`, if any.
    pub fn loading_path(&self, kind: TextureKind) -> Option<&Path> {
        self.in_flight[kind.index()].as_deref()
    }

    /// Drains finished decodes without blocking, dropping superseded ones.
    pub fn poll(&mut self) -> Vec<LoadedTexture> {
        let mut out = Vec::new();
        while let Ok((generation, loaded)) = self.results.try_recv() {
            let slot = loaded.kind.index();
            if generation != self.latest[slot] {
                log::debug!(
                    "Discarding superseded {} texture {}",
                    loaded.kind.label(),
                    loaded.path.display()
                );
                continue;
            }
            self.in_flight[slot] = None;
            out.push(loaded);
        }
        out
    }
}

impl Drop for AssetLoader {
    fn drop(&mut self) {
        // Closing the channel ends the worker's request loop.
        self.requests.take();
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                log::error!("Texture loader thread panicked");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    fn temp_png(name: &str, rgba: [u8; 4]) -> PathBuf {
        let path = std::env::temp_dir().join(format!("card_viewer_{}_{name}.png", std::process::id()));
        image::RgbaImage::from_pixel(3, 2, image::Rgba(rgba))
            .save(&path)
            .unwrap();
        path
    }

    fn wait_for(loader: &mut AssetLoader, kind: TextureKind) -> LoadedTexture {
        let deadline = Instant::now() + Duration::from_secs(10);
        loop {
            if let Some(done) = loader.poll().into_iter().find(|l| l.kind == kind) {
                return done;
            }
            assert!(Instant::now() < deadline, "timed out waiting for {kind:?}");
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn test_load_texture_image_reads_png() {
        let path = temp_png("direct", [10, 20, 30, 255]);
        let img = load_texture_image(&path).unwrap();
        assert_eq!((img.width(), img.height()), (3, 2));
        assert_eq!(img.pixel(2, 1), [10, 20, 30, 255]);
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_missing_file_reports_error() {
        let mut loader = AssetLoader::spawn().unwrap();
        loader
            .request(TextureKind::Holo, "/definitely/not/here.png")
            .unwrap();
        assert_eq!(
            loader.loading_path(TextureKind::Holo),
            Some(Path::new("/definitely/not/here.png"))
        );

        let done = wait_for(&mut loader, TextureKind::Holo);
        assert!(done.result.is_err());
        assert!(loader.loading_path(TextureKind::Holo).is_none());
    }

    #[test]
    fn test_newer_request_supersedes_older() {
        let path = temp_png("supersede", [200, 0, 0, 255]);
        let mut loader = AssetLoader::spawn().unwrap();

        loader.request(TextureKind::Base, "/missing/first.png").unwrap();
        loader.request(TextureKind::Base, &path).unwrap();
        assert_eq!(loader.loading_path(TextureKind::Base), Some(path.as_path()));

        let done = wait_for(&mut loader, TextureKind::Base);
        assert_eq!(done.path, path);
        assert_eq!(done.result.unwrap().pixel(0, 0), [200, 0, 0, 255]);
        std::fs::remove_file(path).ok();
    }
}
