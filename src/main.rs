use std::fs::File;
use std::io::{self, BufWriter};

use anyhow::{Context, Result};
use clap::Parser;

use bitgfx::cli::Cli;
use bitgfx::config::{self, OutputFormat};
use bitgfx::graphics::{AsciiDisplay, Bitmap, Display, Pen, PngDisplay};
use bitgfx::{logging, scene};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let options = config::load_config(cli.config.as_deref())?;
    let options = cli.merge_into_options(options)?;

    logging::init(options.log_level)?;
    log::info!(
        "Rendering {} scene: {}x{} at {}",
        options.scene.name(),
        options.size.width,
        options.size.height,
        options.depth
    );

    let mut bmap = Bitmap::new(options.size, options.depth).context("Failed to create bitmap")?;
    bmap.set_pen(Pen::new(options.color, options.mode, options.thickness))
        .context("Invalid pen")?;
    scene::render(options.scene, &mut bmap)
        .with_context(|| format!("Failed to render {} scene", options.scene.name()))?;

    match options.format {
        OutputFormat::Ascii => match &options.output {
            Some(path) => {
                let file = File::create(path)
                    .with_context(|| format!("Failed to create {}", path.display()))?;
                AsciiDisplay::new(BufWriter::new(file)).show(&bmap)?;
            }
            None => AsciiDisplay::new(io::stdout().lock()).show(&bmap)?,
        },
        OutputFormat::Png => {
            let path = options
                .output
                .as_ref()
                .context("PNG output requires --output")?;
            PngDisplay::new(path)
                .show(&bmap)
                .with_context(|| format!("Failed to write {}", path.display()))?;
        }
    }

    log::info!("Done");
    Ok(())
}
