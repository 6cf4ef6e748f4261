//! LUT baking command

use crate::BakeArgs;
use anyhow::{bail, Context, Result};
use filmgrade_ops::bake::export_cube;

pub fn run(args: BakeArgs, verbose: bool) -> Result<()> {
    if args.size < 2 || args.size > 129 {
        bail!("LUT size {} outside supported range [2, 129]", args.size);
    }
    let state = super::resolve_state(&args.adjust)?;

    export_cube(&state, args.size, &args.output)
        .with_context(|| format!("Failed to bake {}", args.output.display()))?;

    if verbose {
        println!(
            "Baked {0}x{0}x{0} LUT to {1}",
            args.size,
            args.output.display()
        );
    }
    Ok(())
}
