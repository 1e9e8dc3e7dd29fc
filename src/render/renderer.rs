use std::collections::HashMap;
use std::time::Instant;

use log::{debug, warn};

use crate::color::QuantizedPalette;
use crate::error::{VizError, VizResult};
use crate::render::config::RenderConfig;
use crate::render::network::{Network, Neuron};
use crate::render::pixels::PixelBuffer;
use crate::render::surface::SurfaceProvider;

/// How one neuron's draw attempt ended.
#[derive(Debug)]
pub enum DrawOutcome {
    /// Pixel data was committed to the surface.
    Committed,
    /// The surface was missing; a retry has been scheduled.
    Deferred,
    /// The retry budget ran out before the surface appeared.
    Abandoned,
    /// The draw failed; the surface was left untouched.
    Failed(VizError),
}

#[derive(Debug)]
pub struct NeuronReport {
    pub id: String,
    pub outcome: DrawOutcome,
}

/// A draw whose surface could not be resolved yet.
///
/// Holds an owned snapshot of the activation data so a later retry never
/// reaches back into caller state.
#[derive(Debug)]
struct PendingDraw {
    samples: Vec<f64>,
    due: Instant,
    retries_used: u32,
}

/// Paints each neuron's activation grid onto its surface as a quantized
/// heat map.
///
/// Single-threaded and cooperative: `render` attempts every neuron once and
/// schedules a retry for each surface that does not exist yet. The caller
/// drives retries by calling `poll` when `next_due` says one is ready. A new
/// `render` for a neuron id supersedes any retry still pending for that id,
/// so the most recent activation data always wins.
pub struct CanvasRenderer {
    config: RenderConfig,
    pending: HashMap<String, PendingDraw>,
}

impl CanvasRenderer {
    pub fn new(config: RenderConfig) -> CanvasRenderer {
        CanvasRenderer { config, pending: HashMap::new() }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Attempts to draw every neuron in `network`, in order.
    ///
    /// Per-neuron failures are isolated: one neuron failing (or deferring)
    /// never blocks the others in the same pass.
    pub fn render(
        &mut self,
        network: &Network,
        palette: &QuantizedPalette,
        surfaces: &mut dyn SurfaceProvider,
    ) -> Vec<NeuronReport> {
        self.render_at(network, palette, surfaces, Instant::now())
    }

    /// Like `render`, with an explicit clock reading for retry scheduling.
    pub fn render_at(
        &mut self,
        network: &Network,
        palette: &QuantizedPalette,
        surfaces: &mut dyn SurfaceProvider,
        now: Instant,
    ) -> Vec<NeuronReport> {
        let mut reports = Vec::with_capacity(network.neurons.len());
        for neuron in network.iter() {
            // The newest data for an id always supersedes a pending retry;
            // two scheduled retries must never race for the same surface.
            self.pending.remove(&neuron.id);

            let samples = match self.snapshot(neuron) {
                Ok(samples) => samples,
                Err(err) => {
                    warn!("neuron {}: {}", neuron.id, err);
                    reports.push(NeuronReport {
                        id: neuron.id.clone(),
                        outcome: DrawOutcome::Failed(err),
                    });
                    continue;
                }
            };

            let outcome = match Self::attempt(&neuron.id, &samples, palette, self.config.fixed_alpha, surfaces) {
                Ok(()) => DrawOutcome::Committed,
                Err(VizError::SurfaceNotFound(_)) => {
                    debug!(
                        "neuron {}: surface missing, retrying in {}ms",
                        neuron.id, self.config.retry_delay_ms
                    );
                    self.pending.insert(neuron.id.clone(), PendingDraw {
                        samples,
                        due: now + self.config.retry_delay(),
                        retries_used: 0,
                    });
                    DrawOutcome::Deferred
                }
                Err(err) => {
                    warn!("neuron {}: {}", neuron.id, err);
                    DrawOutcome::Failed(err)
                }
            };
            reports.push(NeuronReport { id: neuron.id.clone(), outcome });
        }
        reports
    }

    /// Runs every pending retry whose delay has elapsed.
    pub fn poll(
        &mut self,
        palette: &QuantizedPalette,
        surfaces: &mut dyn SurfaceProvider,
    ) -> Vec<NeuronReport> {
        self.poll_at(palette, surfaces, Instant::now())
    }

    /// Like `poll`, with an explicit clock reading.
    ///
    /// A still-missing surface re-arms the retry for another delay, until
    /// `max_retries` (if set) runs out; then the draw is abandoned with a
    /// warning. Retries re-armed during this call only become due on a later
    /// call.
    pub fn poll_at(
        &mut self,
        palette: &QuantizedPalette,
        surfaces: &mut dyn SurfaceProvider,
        now: Instant,
    ) -> Vec<NeuronReport> {
        let due_ids: Vec<String> = self
            .pending
            .iter()
            .filter(|(_, draw)| draw.due <= now)
            .map(|(id, _)| id.clone())
            .collect();

        let mut reports = Vec::new();
        for id in due_ids {
            let mut draw = match self.pending.remove(&id) {
                Some(draw) => draw,
                None => continue,
            };
            match Self::attempt(&id, &draw.samples, palette, self.config.fixed_alpha, surfaces) {
                Ok(()) => {
                    reports.push(NeuronReport { id, outcome: DrawOutcome::Committed });
                }
                Err(VizError::SurfaceNotFound(_)) => {
                    draw.retries_used += 1;
                    let exhausted = self
                        .config
                        .max_retries
                        .map_or(false, |max| draw.retries_used >= max);
                    if exhausted {
                        warn!(
                            "neuron {}: surface never appeared after {} retries, giving up",
                            id, draw.retries_used
                        );
                        reports.push(NeuronReport { id, outcome: DrawOutcome::Abandoned });
                    } else {
                        draw.due = now + self.config.retry_delay();
                        self.pending.insert(id, draw);
                    }
                }
                Err(err) => {
                    warn!("neuron {}: {}", id, err);
                    reports.push(NeuronReport { id, outcome: DrawOutcome::Failed(err) });
                }
            }
        }
        reports
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Ids of neurons still waiting for their surface, sorted for stable
    /// reporting.
    pub fn pending_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.pending.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Earliest instant at which a pending retry becomes due, if any.
    pub fn next_due(&self) -> Option<Instant> {
        self.pending.values().map(|draw| draw.due).min()
    }

    /// Snapshots a neuron's buffer, checking the declared grid side up
    /// front when one was provided.
    fn snapshot(&self, neuron: &Neuron) -> VizResult<Vec<f64>> {
        let samples = neuron.outputs.samples()?;
        if let Some(side) = neuron.side_length {
            if samples.len() != side * side {
                return Err(VizError::DimensionMismatch {
                    expected: side * side,
                    actual: samples.len(),
                });
            }
        }
        Ok(samples)
    }

    /// One draw attempt: resolve the surface, check dimensions, quantize
    /// every sample into an RGBA pixel buffer, commit it whole.
    fn attempt(
        id: &str,
        samples: &[f64],
        palette: &QuantizedPalette,
        alpha: u8,
        surfaces: &mut dyn SurfaceProvider,
    ) -> VizResult<()> {
        let surface = surfaces
            .lookup(id)
            .ok_or_else(|| VizError::SurfaceNotFound(id.to_string()))?;

        let width = surface.width();
        let expected = width * width;
        if samples.len() != expected {
            return Err(VizError::DimensionMismatch { expected, actual: samples.len() });
        }

        let mut pixels = PixelBuffer::for_square(width);
        for &value in samples {
            pixels.push(palette.color_for(value), alpha);
        }
        surface.commit(&pixels);
        Ok(())
    }
}
