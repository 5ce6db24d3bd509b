use std::path::PathBuf;

use clap::Parser;
use glyphforge::kurbo::{BezPath, Point};
use glyphforge::{contour, degree, design, indent, slice, transform, ufo};
use glyphforge::{Axis, Degree, DesignParams, FontMetrics, OutlineError, SimplifyConfig};
use rayon::prelude::*;

#[derive(Parser)]
#[command(name = "glyphforge", about = "Outline edits on UFO glyphs")]
struct Cli {
    /// UFO to read glyphs from
    #[arg(short, long)]
    ufo: PathBuf,

    /// UFO to write to (defaults to the input)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Glyph names to process (repeatable)
    #[arg(short, long = "glyph", required = true)]
    glyphs: Vec<String>,

    /// Units per em
    #[arg(long, default_value = "1000")]
    upm: f64,

    /// Ascender in font units
    #[arg(long, default_value = "800")]
    ascender: f64,

    /// Descender in font units (typically negative)
    #[arg(long, default_value = "-200", allow_hyphen_values = true)]
    descender: f64,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand, Clone, Debug)]
enum Command {
    /// Reduce segment count while keeping the shape
    Simplify,
    /// Apply design sliders
    Design(DesignArgs),
    /// Mirror contours about their bounding-box center
    Flip {
        #[arg(value_enum)]
        axis: FlipAxis,
        /// Contour indices (all contours if omitted)
        #[arg(short, long, value_delimiter = ',')]
        contours: Vec<usize>,
    },
    /// Cut contours in two along a line
    Slice {
        /// Line start as "x,y"
        #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
        from: Point,
        /// Line end as "x,y"
        #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
        to: Point,
    },
    /// Turn contours into holes clipped to the filled area
    Indent {
        /// Contour indices to indent
        #[arg(short, long, value_delimiter = ',', required = true)]
        contours: Vec<usize>,
    },
    /// Convert every curve to one degree
    Degree {
        #[arg(value_enum)]
        target: DegreeArg,
    },
}

#[derive(clap::ValueEnum, Copy, Clone, Debug)]
enum FlipAxis {
    /// Mirror left/right
    Horizontal,
    /// Mirror top/bottom
    Vertical,
}

#[derive(clap::ValueEnum, Copy, Clone, Debug)]
enum DegreeArg {
    /// Quadratic curves (TrueType)
    Quad,
    /// Cubic curves (PostScript)
    Cubic,
}

#[derive(clap::Args, Clone, Debug, Default)]
struct DesignArgs {
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    weight: f64,
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    contrast: f64,
    #[arg(long, default_value = "0")]
    ink_trap: f64,
    #[arg(long, default_value = "0")]
    serif: f64,
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    width: f64,
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    optical_size: f64,
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    x_height: f64,
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    ascender_extend: f64,
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    descender_extend: f64,
    /// Italic angle in degrees
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    slant: f64,
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    overshoot: f64,
    /// Sidebearing shift in font units
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    spacing: f64,
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    roundness: f64,
}

impl From<&DesignArgs> for DesignParams {
    fn from(args: &DesignArgs) -> Self {
        DesignParams {
            weight: args.weight,
            contrast: args.contrast,
            ink_trap: args.ink_trap,
            serif: args.serif,
            width: args.width,
            optical_size: args.optical_size,
            x_height: args.x_height,
            ascender_extend: args.ascender_extend,
            descender_extend: args.descender_extend,
            slant: args.slant,
            overshoot: args.overshoot,
            spacing: args.spacing,
            roundness: args.roundness,
        }
    }
}

fn parse_point(s: &str) -> Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected \"x,y\", got \"{s}\""))?;
    let x: f64 = x.trim().parse().map_err(|e| format!("bad x: {e}"))?;
    let y: f64 = y.trim().parse().map_err(|e| format!("bad y: {e}"))?;
    Ok(Point::new(x, y))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();
    let metrics = FontMetrics {
        units_per_em: cli.upm,
        ascender: cli.ascender,
        descender: cli.descender,
    };

    // Header
    eprintln!();
    eprintln!("  glyphforge \u{00b7} {:?} \u{00b7} {} glyph(s)", cli.command, cli.glyphs.len());
    eprintln!();

    let mut font = norad::Font::load(&cli.ufo)?;
    let glyphs = cli
        .glyphs
        .iter()
        .map(|name| {
            font.default_layer()
                .get_glyph(name.as_str())
                .cloned()
                .ok_or_else(|| OutlineError::GlyphNotFound(name.clone()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    // Each glyph owns its outline, so they run independently.
    let processed = glyphs
        .into_par_iter()
        .map(|glyph| process(glyph, &cli.command, &metrics))
        .collect::<Result<Vec<_>, _>>()?;

    for (glyph, before, after) in processed {
        eprintln!("  {:<11} {} \u{2192} {} elements", glyph.name().as_str(), before, after);
        font.default_layer_mut().insert_glyph(glyph);
    }

    let output = cli.output.as_ref().unwrap_or(&cli.ufo);
    font.save(output)?;

    // Footer
    eprintln!();
    eprintln!("  \u{2713} {}", output.display());
    eprintln!();

    Ok(())
}

/// Run one command on a glyph; returns it with element counts before and after.
fn process(
    mut glyph: norad::Glyph,
    command: &Command,
    metrics: &FontMetrics,
) -> Result<(norad::Glyph, usize, usize), OutlineError> {
    let path = ufo::glyph_to_path(&glyph)?;
    let all: Vec<usize> = (0..contour::contour_count(&path)).collect();

    let edited: BezPath = match command {
        Command::Simplify => {
            glyphforge::simplify(&path, &SimplifyConfig::for_units_per_em(metrics.units_per_em))
        }
        Command::Design(args) => {
            let result = design::apply(&path, &DesignParams::from(args), metrics);
            glyph.width = (glyph.width + result.advance_delta).round().max(0.0);
            result.path
        }
        Command::Flip { axis, contours } => {
            let axis = match axis {
                FlipAxis::Horizontal => Axis::Horizontal,
                FlipAxis::Vertical => Axis::Vertical,
            };
            let selection = if contours.is_empty() { &all } else { contours };
            transform::flip(&path, selection, axis)
        }
        Command::Slice { from, to } => slice::slice(&path, (*from, *to)),
        Command::Indent { contours } => indent::indent(&path, contours),
        Command::Degree { target } => {
            let target = match target {
                DegreeArg::Quad => Degree::Quad,
                DegreeArg::Cubic => Degree::Cubic,
            };
            degree::path_to_degree(&path, target)
        }
    };
    log::debug!("{}: {:?} done", glyph.name().as_str(), command);

    let before = path.elements().len();
    let after = edited.elements().len();
    ufo::set_glyph_path(&mut glyph, &edited)?;
    Ok((glyph, before, after))
}
