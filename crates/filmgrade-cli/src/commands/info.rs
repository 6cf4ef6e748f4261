//! LUT and preset inspection command

use crate::InfoArgs;
use anyhow::{bail, Context, Result};
use filmgrade_lut::cube;

pub fn run(args: InfoArgs, _verbose: bool) -> Result<()> {
    let ext = args
        .input
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        "cube" => cube_info(&args),
        "yaml" | "yml" => preset_info(&args),
        _ => bail!("unsupported file type: .{ext} (expected .cube or .yaml)"),
    }
}

fn cube_info(args: &InfoArgs) -> Result<()> {
    let lut = cube::read(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;

    let (mut lo, mut hi) = (f32::INFINITY, f32::NEG_INFINITY);
    for &v in lut.data() {
        lo = lo.min(v);
        hi = hi.max(v);
    }

    println!("{}", args.input.display());
    println!("  type:   3D LUT (.cube)");
    println!("  size:   {0}x{0}x{0}", lut.size());
    println!("  points: {}", lut.size().pow(3));
    println!("  range:  [{lo:.6}, {hi:.6}]");
    Ok(())
}

fn preset_info(args: &InfoArgs) -> Result<()> {
    let state = super::load_preset(&args.input)?;

    println!("{}", args.input.display());
    println!("  type:        grading preset");
    println!("  inverted:    {}", state.inverted);
    println!("  exposure:    {}", state.exposure);
    println!("  contrast:    {}", state.contrast);
    println!("  highlights:  {}", state.highlights);
    println!("  shadows:     {}", state.shadows);
    println!("  whites:      {}", state.whites);
    println!("  blacks:      {}", state.blacks);
    println!("  temp/tint:   {} / {}", state.temp, state.tint);
    println!(
        "  gains:       {} / {} / {}",
        state.red_gain, state.green_gain, state.blue_gain
    );
    println!(
        "  rotation:    {} deg (+{} deg orientation)",
        state.rotation,
        state.orientation.degrees()
    );
    println!("  crop:        {}", state.crop);
    for (name, curve) in [
        ("rgb", &state.curves.rgb),
        ("red", &state.curves.red),
        ("green", &state.curves.green),
        ("blue", &state.curves.blue),
    ] {
        if !curve.is_identity() {
            println!("  curve {:5}: {} points", name, curve.points().len());
        }
    }
    Ok(())
}
