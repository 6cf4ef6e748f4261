//! Terminal histogram command

use crate::HistogramArgs;
use anyhow::Result;
use filmgrade_core::HISTOGRAM_BUCKETS;
use filmgrade_ops::pipeline;

pub fn run(args: HistogramArgs, verbose: bool) -> Result<()> {
    let state = super::resolve_state(&args.adjust)?;
    let source = super::load_png(&args.input)?;

    if verbose {
        println!(
            "Histogram of {} ({}x{}, graded)",
            args.input.display(),
            source.width(),
            source.height()
        );
    }

    let (_, hist) = pipeline::grade_buffer(&source, &state);
    let cols = args.width.max(8);

    for (name, buckets) in [
        ("luma", &hist.luma),
        ("red", &hist.red),
        ("green", &hist.green),
        ("blue", &hist.blue),
    ] {
        println!("{name}:");
        print_channel(buckets, cols);
    }
    Ok(())
}

/// Renders 256 buckets as a fixed-width bar chart, one row per bin group.
fn print_channel(buckets: &[f32; HISTOGRAM_BUCKETS], cols: usize) {
    let per_row = HISTOGRAM_BUCKETS / 16;
    for row in 0..16 {
        let lo = row * per_row;
        let hi = lo + per_row;
        let level = buckets[lo..hi].iter().cloned().fold(0.0f32, f32::max);
        let filled = (level * cols as f32).round() as usize;
        println!(
            "  [{:3}-{:3}] {:bar_width$}",
            lo,
            hi - 1,
            "#".repeat(filled.min(cols)),
            bar_width = cols
        );
    }
}
