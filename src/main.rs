use std::error::Error;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use island_generator::color::ColorGradient;
use island_generator::config::MapConfig;
use island_generator::labels;
use island_generator::landmass;
use island_generator::names::NamePool;
use island_generator::render;
use island_generator::terrain;

#[derive(Parser, Debug)]
#[command(name = "island_generator")]
#[command(about = "Generate labeled island maps from layered noise")]
struct Args {
    /// Side length of the square map in pixels
    #[arg(short, long, default_value = "1000")]
    size: usize,

    /// Output path for the rendered map
    #[arg(short, long, default_value = "map.png")]
    out: PathBuf,

    /// Random seed (uses a random seed if not specified)
    #[arg(long)]
    seed: Option<u64>,

    /// Also save a grayscale elevation preview to bw.png
    #[arg(long)]
    grayscale: bool,

    /// Newline-delimited island name list ('$' marks a label line break);
    /// defaults to the built-in list
    #[arg(long)]
    names: Option<PathBuf>,

    /// TTF font used for island labels
    #[arg(
        long,
        default_value = "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf"
    )]
    font: PathBuf,
}

fn main() {
    if let Err(e) = run(Args::parse()) {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let seed = args.seed.unwrap_or_else(rand::random);
    let cfg = MapConfig::new(args.size, seed)?;

    let mut pool = match &args.names {
        Some(path) => NamePool::from_file(path)
            .map_err(|e| format!("cannot read name list {}: {}", path.display(), e))?,
        None => NamePool::builtin(),
    };
    let font = render::load_font(&args.font)?;

    println!("Generating terrain with seed: {}", seed);
    println!("Map size: {}x{}", cfg.size, cfg.size);
    let elevation = terrain::synthesize(&cfg);

    let mut min_e = f64::MAX;
    let mut max_e = f64::MIN;
    for (_, _, &e) in elevation.iter() {
        if e < min_e {
            min_e = e;
        }
        if e > max_e {
            max_e = e;
        }
    }
    println!("Elevation range: {:.2} to {:.2}", min_e, max_e);

    if args.grayscale {
        println!("Saving grayscale elevation preview...");
        let preview = render::colorize(&elevation, &ColorGradient::grayscale());
        preview.save("bw.png")?;
    }

    println!("Coloring map...");
    let base = render::colorize(&elevation, &ColorGradient::terrain());

    println!("Detecting landmasses...");
    let mask = landmass::land_mask(&elevation, cfg.land_threshold);
    let landmasses = landmass::detect_landmasses(&mask);
    let land_cells: usize = landmasses.iter().map(|l| l.area()).sum();
    println!(
        "Found {} landmasses covering {} cells ({:.1}% of the map)",
        landmasses.len(),
        land_cells,
        100.0 * land_cells as f64 / cfg.area() as f64
    );

    println!("Planning labels...");
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let measure = render::line_measurer(&font);
    let placements = labels::plan_labels(&landmasses, &mut pool, &cfg, &mut rng, &measure)?;
    println!(
        "Labeling {} of {} landmasses",
        placements.len(),
        landmasses.len()
    );

    println!("Rendering labels...");
    let label_layer = render::draw_labels(cfg.size, &placements, &font);
    let combined = render::compose(base, &label_layer);

    combined.save(&args.out)?;
    println!("Saved map to {}", args.out.display());

    Ok(())
}
