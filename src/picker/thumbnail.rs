//! Lazy thumbnail loading and terminal preview rendering.
//!
//! Thumbnails are decoded with the `image` crate, downscaled, and rendered
//! as half-block cells with 24-bit ANSI colors (each text row carries two
//! pixel rows). Entries are memoized per path so they survive list mutation
//! from deletions; a configurable byte threshold gates decoding entirely.

use image::GenericImageView;
use image::imageops::FilterType;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Upper half block: foreground paints the top pixel, background the bottom.
const HALF_BLOCK: char = '▀';

/// One cached thumbnail slot.
#[derive(Debug, Clone)]
pub enum Thumbnail {
    /// Pre-rendered preview lines (ANSI colored).
    Ready(Vec<String>),
    /// File exceeded the size threshold; decoding was skipped.
    TooLarge,
    /// Decoding failed.
    Unavailable,
}

/// Path-keyed thumbnail cache.
#[derive(Debug, Default)]
pub struct ThumbnailCache {
    entries: HashMap<PathBuf, Thumbnail>,
}

impl ThumbnailCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the thumbnail for a path, decoding and rendering on first use.
    ///
    /// # Arguments
    /// * `path` - Image file to preview
    /// * `size_bytes` - File size, checked against `max_bytes` before decoding
    /// * `max_bytes` - Size threshold above which decoding is skipped
    /// * `cols` - Preview width in terminal cells
    /// * `rows` - Preview height in terminal cells
    pub fn get(
        &mut self,
        path: &Path,
        size_bytes: u64,
        max_bytes: u64,
        cols: usize,
        rows: usize,
    ) -> &Thumbnail {
        if !self.entries.contains_key(path) {
            let thumbnail = if size_bytes > max_bytes {
                log::debug!(
                    "Skipping thumbnail for {} ({size_bytes} bytes over {max_bytes} limit)",
                    path.display()
                );
                Thumbnail::TooLarge
            } else {
                render_half_blocks(path, cols, rows)
            };
            self.entries.insert(path.to_path_buf(), thumbnail);
        }
        &self.entries[path]
    }

    /// Drop the cached entry for a deleted file.
    pub fn evict(&mut self, path: &Path) {
        self.entries.remove(path);
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Decode an image and render it as half-block preview lines.
///
/// The image is fit inside `cols` x `rows * 2` pixels preserving aspect
/// ratio. Failures degrade to [`Thumbnail::Unavailable`].
fn render_half_blocks(path: &Path, cols: usize, rows: usize) -> Thumbnail {
    let image = match image::open(path) {
        Ok(image) => image,
        Err(err) => {
            log::debug!("Cannot decode {}: {err}", path.display());
            return Thumbnail::Unavailable;
        }
    };

    let scaled = image.resize(cols as u32, (rows * 2) as u32, FilterType::Triangle);
    let rgba = scaled.to_rgba8();
    let (width, height) = scaled.dimensions();

    let mut lines = Vec::with_capacity(rows);
    let mut y = 0;
    while y < height {
        let mut line = String::with_capacity(width as usize * 24);
        for x in 0..width {
            let top = rgba.get_pixel(x, y);
            let bottom = if y + 1 < height {
                *rgba.get_pixel(x, y + 1)
            } else {
                image::Rgba([0, 0, 0, 0])
            };
            line.push_str(&format!(
                "\x1b[38;2;{};{};{}m\x1b[48;2;{};{};{}m{HALF_BLOCK}",
                top[0], top[1], top[2], bottom[0], bottom[1], bottom[2]
            ));
        }
        line.push_str("\x1b[0m");
        lines.push(line);
        y += 2;
    }

    Thumbnail::Ready(lines)
}
