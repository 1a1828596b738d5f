use std::collections::VecDeque;

use super::{AnimationBatch, FractalError};
use crate::geometry::Triangle;

/// Outcome of one completed level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepReport {
    /// Depth after the step
    pub depth: u32,
    /// Triangles subdivided during the step
    pub processed: usize,
    /// Population queued for the next level (always 3 * processed)
    pub next_level: usize,
}

/// Breadth-first subdivision queue plus level bookkeeping.
///
/// Invariant: after `d` completed steps the queue holds exactly 3^d leaves,
/// and `current_remaining` equals the queue length between steps.
#[derive(Debug, Clone)]
pub struct LevelScheduler {
    queue: VecDeque<Triangle>,
    current_remaining: usize,
    next_count: usize,
    depth: u32,
}

impl LevelScheduler {
    pub fn new(seed: Triangle) -> Self {
        let mut scheduler = Self {
            queue: VecDeque::new(),
            current_remaining: 0,
            next_count: 0,
            depth: 0,
        };
        scheduler.reseed(seed);
        scheduler
    }

    /// Drop every leaf and start over from a single triangle at depth 0
    pub fn reseed(&mut self, seed: Triangle) {
        self.queue.clear();
        self.queue.push_back(seed);
        self.current_remaining = 1;
        self.next_count = 0;
        self.depth = 0;
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    pub fn current_remaining(&self) -> usize {
        self.current_remaining
    }

    pub fn next_count(&self) -> usize {
        self.next_count
    }

    /// Leaves in processing order
    pub fn leaves(&self) -> impl Iterator<Item = &Triangle> {
        self.queue.iter()
    }

    /// Subdivide the whole current level, feeding each center into `batch`.
    ///
    /// Fails without touching any state if the queue is shorter than the
    /// level population.
    pub fn begin_step(&mut self, batch: &mut AnimationBatch) -> Result<StepReport, FractalError> {
        let population = self.current_remaining;
        if self.queue.len() < population {
            return Err(FractalError::EmptySubdivisionQueue {
                requested: population,
                available: self.queue.len(),
            });
        }

        while self.current_remaining > 0 {
            self.subdivide_front(batch)?;
        }

        let next_level = self.next_count;
        self.current_remaining = next_level;
        self.next_count = 0;
        self.depth += 1;

        Ok(StepReport {
            depth: self.depth,
            processed: population,
            next_level,
        })
    }

    /// Pop the oldest leaf, queue its three corners at the tail
    fn subdivide_front(&mut self, batch: &mut AnimationBatch) -> Result<(), FractalError> {
        let parent = self
            .queue
            .pop_front()
            .ok_or(FractalError::EmptySubdivisionQueue {
                requested: self.current_remaining,
                available: 0,
            })?;

        let split = parent.subdivide();
        self.queue.extend(split.corners);
        batch.push(split.center);

        self.current_remaining -= 1;
        self.next_count += 3;
        Ok(())
    }
}
