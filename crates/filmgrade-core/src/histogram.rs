//! Display histograms.
//!
//! Four 256-bucket histograms (luma plus red/green/blue) are accumulated
//! during the grading pass and peak-normalized for display. Accumulation
//! and the normalized result are separate types so the pixel pass can
//! merge per-row accumulators before normalizing once.

/// Number of histogram buckets per channel.
pub const HISTOGRAM_BUCKETS: usize = 256;

/// Raw bucket counts gathered during a pixel pass.
#[derive(Debug, Clone)]
pub struct HistogramAccum {
    /// Luma bucket counts (`round(0.299R + 0.587G + 0.114B)`).
    pub luma: [u32; HISTOGRAM_BUCKETS],
    /// Red bucket counts.
    pub red: [u32; HISTOGRAM_BUCKETS],
    /// Green bucket counts.
    pub green: [u32; HISTOGRAM_BUCKETS],
    /// Blue bucket counts.
    pub blue: [u32; HISTOGRAM_BUCKETS],
}

impl HistogramAccum {
    /// Creates an empty accumulator.
    pub fn new() -> Self {
        Self {
            luma: [0; HISTOGRAM_BUCKETS],
            red: [0; HISTOGRAM_BUCKETS],
            green: [0; HISTOGRAM_BUCKETS],
            blue: [0; HISTOGRAM_BUCKETS],
        }
    }

    /// Accumulates one graded pixel.
    #[inline]
    pub fn accumulate(&mut self, r: u8, g: u8, b: u8) {
        let luma = (0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32)
            .round()
            .clamp(0.0, 255.0) as usize;
        self.luma[luma] += 1;
        self.red[r as usize] += 1;
        self.green[g as usize] += 1;
        self.blue[b as usize] += 1;
    }

    /// Merges another accumulator into this one.
    pub fn merge(&mut self, other: &HistogramAccum) {
        for i in 0..HISTOGRAM_BUCKETS {
            self.luma[i] += other.luma[i];
            self.red[i] += other.red[i];
            self.green[i] += other.green[i];
            self.blue[i] += other.blue[i];
        }
    }

    /// Normalizes into display histograms.
    ///
    /// All four histograms are divided by the peak luma bucket count and
    /// capped at 1.0, so the tallest luma bucket lands exactly at 1.0 and
    /// every bucket stays in `[0, 1]`. An empty pass yields all zeros.
    pub fn normalize(&self) -> Histograms {
        let peak = self.luma.iter().copied().max().unwrap_or(0);
        if peak == 0 {
            return Histograms::empty();
        }
        let scale = 1.0 / peak as f32;
        let norm = |counts: &[u32; HISTOGRAM_BUCKETS]| {
            let mut out = [0.0f32; HISTOGRAM_BUCKETS];
            for (o, &c) in out.iter_mut().zip(counts.iter()) {
                *o = (c as f32 * scale).min(1.0);
            }
            out
        };
        Histograms {
            luma: norm(&self.luma),
            red: norm(&self.red),
            green: norm(&self.green),
            blue: norm(&self.blue),
        }
    }
}

impl Default for HistogramAccum {
    fn default() -> Self {
        Self::new()
    }
}

/// Peak-normalized histograms ready for display, values in `[0, 1]`.
#[derive(Debug, Clone)]
pub struct Histograms {
    /// Combined luma histogram.
    pub luma: [f32; HISTOGRAM_BUCKETS],
    /// Red channel histogram.
    pub red: [f32; HISTOGRAM_BUCKETS],
    /// Green channel histogram.
    pub green: [f32; HISTOGRAM_BUCKETS],
    /// Blue channel histogram.
    pub blue: [f32; HISTOGRAM_BUCKETS],
}

impl Histograms {
    /// All-zero histograms (no visible pixels).
    pub fn empty() -> Self {
        Self {
            luma: [0.0; HISTOGRAM_BUCKETS],
            red: [0.0; HISTOGRAM_BUCKETS],
            green: [0.0; HISTOGRAM_BUCKETS],
            blue: [0.0; HISTOGRAM_BUCKETS],
        }
    }
}
