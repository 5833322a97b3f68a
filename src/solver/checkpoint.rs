//! Persistence of intermediate and final orderings.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::Result;
use crate::models::{Length, PointId};

/// A snapshot of the tour handed to a [`CheckpointWriter`].
#[derive(Debug, Clone, Copy)]
pub struct Checkpoint<'c> {
    /// Accepted moves so far.
    pub iteration: usize,
    /// Verified tour length.
    pub length: Length,
    /// Cyclic ordering starting at point 0.
    pub order: &'c [PointId],
    /// `true` for the save made at termination.
    pub is_final: bool,
}

/// Receives verified orderings during and after a climb.
pub trait CheckpointWriter {
    /// Persists one checkpoint. An error aborts the climb.
    fn write(&mut self, checkpoint: &Checkpoint<'_>) -> Result<()>;
}

impl<W: CheckpointWriter + ?Sized> CheckpointWriter for &mut W {
    fn write(&mut self, checkpoint: &Checkpoint<'_>) -> Result<()> {
        (**self).write(checkpoint)
    }
}

/// Discards every checkpoint.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullWriter;

impl CheckpointWriter for NullWriter {
    fn write(&mut self, _checkpoint: &Checkpoint<'_>) -> Result<()> {
        Ok(())
    }
}

/// An owned copy of a [`Checkpoint`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedCheckpoint {
    pub iteration: usize,
    pub length: Length,
    pub order: Vec<PointId>,
    pub is_final: bool,
}

/// Keeps every checkpoint in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryWriter {
    /// Checkpoints in the order they were written.
    pub saved: Vec<SavedCheckpoint>,
}

impl MemoryWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recent checkpoint.
    pub fn last(&self) -> Option<&SavedCheckpoint> {
        self.saved.last()
    }
}

impl CheckpointWriter for MemoryWriter {
    fn write(&mut self, checkpoint: &Checkpoint<'_>) -> Result<()> {
        self.saved.push(SavedCheckpoint {
            iteration: checkpoint.iteration,
            length: checkpoint.length,
            order: checkpoint.order.to_vec(),
            is_final: checkpoint.is_final,
        });
        Ok(())
    }
}

/// Writes each checkpoint to `<dir>/<prefix>_<length>.txt`, one point id per line.
///
/// The directory is created on first write. Since lengths strictly decrease
/// during a climb, every checkpoint lands in its own file, except the final
/// save which rewrites the file of an equal-length checkpoint.
#[derive(Debug, Clone)]
pub struct FileWriter {
    dir: PathBuf,
    prefix: String,
}

impl FileWriter {
    pub fn new(dir: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            prefix: prefix.into(),
        }
    }

    /// Path the checkpoint of the given length is written to.
    pub fn path_for(&self, length: Length) -> PathBuf {
        self.dir.join(format!("{}_{}.txt", self.prefix, length))
    }

    fn write_order(path: &Path, order: &[PointId]) -> Result<()> {
        let mut out = BufWriter::new(File::create(path)?);
        for p in order {
            writeln!(out, "{p}")?;
        }
        out.flush()?;
        Ok(())
    }
}

impl CheckpointWriter for FileWriter {
    fn write(&mut self, checkpoint: &Checkpoint<'_>) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(checkpoint.length);
        Self::write_order(&path, checkpoint.order)?;
        debug!(
            event = "checkpoint_saved",
            path = %path.display(),
            length = checkpoint.length,
        );
        Ok(())
    }
}
