// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Animation frames and their undo history.
//!
//! A frame is one still of the flip-book: a raster layer holding the
//! committed strokes plus the stamps placed on top of it. Every frame owns
//! its own history of snapshots.

use super::stamp::Stamp;
use crate::io::media;
use image::RgbaImage;

/// Contents of one frame at a point in time.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// Drawn layer only, transparent where nothing is painted.
    pub drawings: RgbaImage,
    pub objects: Vec<Stamp>,
}

impl Snapshot {
    /// An empty snapshot of the given canvas size.
    pub fn blank(width: u32, height: u32) -> Self {
        Self {
            drawings: RgbaImage::new(width, height),
            objects: Vec::new(),
        }
    }
}

/// Drawn layer as kept in the history.
#[derive(Debug, Clone, PartialEq)]
enum StoredLayer {
    Png(Vec<u8>),
    /// Fallback when encoding fails
    Raw(RgbaImage),
}

impl StoredLayer {
    fn store(layer: &RgbaImage) -> Self {
        match media::encode_png(layer) {
            Ok(bytes) => StoredLayer::Png(bytes),
            Err(e) => {
                log::error!("Failed to compress undo entry, keeping it raw: {}", e);
                StoredLayer::Raw(layer.clone())
            }
        }
    }

    fn restore(&self) -> image::ImageResult<RgbaImage> {
        match self {
            StoredLayer::Png(bytes) => media::decode_png(bytes),
            StoredLayer::Raw(layer) => Ok(layer.clone()),
        }
    }

    fn byte_size(&self) -> usize {
        match self {
            StoredLayer::Png(bytes) => bytes.len(),
            StoredLayer::Raw(layer) => layer.as_raw().len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Entry {
    layer: StoredLayer,
    objects: Vec<Stamp>,
}

impl Entry {
    fn store(snapshot: &Snapshot) -> Self {
        Self {
            layer: StoredLayer::store(&snapshot.drawings),
            objects: snapshot.objects.clone(),
        }
    }
}

/// Per-frame undo history.
///
/// The top of the stack always equals the last committed state of the
/// frame, so the stack is never empty. Drawn layers are stored
/// PNG-compressed and only decoded again on undo.
#[derive(Debug, Clone)]
pub struct History {
    /// Committed states, oldest first
    entries: Vec<Entry>,
    /// Maximum history size
    max_size: usize,
}

impl History {
    pub fn new(initial: &Snapshot, max_size: usize) -> Self {
        Self {
            entries: vec![Entry::store(initial)],
            max_size: max_size.max(1),
        }
    }

    /// Commit a state. Returns false when it equals the current top.
    pub fn push(&mut self, snapshot: &Snapshot) -> bool {
        let entry = Entry::store(snapshot);
        if self.entries.last() == Some(&entry) {
            return false;
        }
        self.entries.push(entry);
        // Limit history size
        if self.entries.len() > self.max_size {
            self.entries.remove(0);
        }
        true
    }

    /// Step back one entry and return the state to restore.
    ///
    /// The first entry is never popped. An entry that fails to decode is
    /// left in place.
    pub fn undo(&mut self) -> Option<Snapshot> {
        let previous = self.entries.len().checked_sub(2).map(|i| &self.entries[i])?;
        let snapshot = match previous.layer.restore() {
            Ok(drawings) => Snapshot {
                drawings,
                objects: previous.objects.clone(),
            },
            Err(e) => {
                log::error!("Failed to restore undo entry: {}", e);
                return None;
            }
        };
        self.entries.pop();
        Some(snapshot)
    }

    pub fn can_undo(&self) -> bool {
        self.entries.len() > 1
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Memory held by the stored layers.
    pub fn byte_size(&self) -> usize {
        self.entries.iter().map(|entry| entry.layer.byte_size()).sum()
    }
}

/// One step of the animated sequence.
#[derive(Debug, Clone)]
pub struct Frame {
    pub drawings: RgbaImage,
    pub objects: Vec<Stamp>,
    pub history: History,
}

impl Frame {
    /// An empty frame with a one-entry history.
    pub fn blank(width: u32, height: u32, history_limit: usize) -> Self {
        Self::from_snapshot(Snapshot::blank(width, height), history_limit)
    }

    /// A frame starting from the given contents, with a fresh history.
    pub fn from_snapshot(snapshot: Snapshot, history_limit: usize) -> Self {
        Self {
            history: History::new(&snapshot, history_limit),
            drawings: snapshot.drawings,
            objects: snapshot.objects,
        }
    }

    /// Current contents of the frame.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            drawings: self.drawings.clone(),
            objects: self.objects.clone(),
        }
    }

    /// Record the current contents in the history.
    pub fn commit(&mut self) -> bool {
        let snapshot = self.snapshot();
        self.history.push(&snapshot)
    }

    /// Restore the previous committed state, strokes and stamps together.
    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(previous) => {
                self.drawings = previous.drawings;
                self.objects = previous.objects;
                true
            }
            None => false,
        }
    }

    /// Empty the drawn layer and remove all stamps.
    pub fn clear(&mut self) {
        let (width, height) = self.drawings.dimensions();
        self.drawings = RgbaImage::new(width, height);
        self.objects.clear();
    }
}
