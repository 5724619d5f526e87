use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use reference_maps::{process_directory, process_file, MapKind, ProcessOptions, ProcessResult};

#[derive(Parser)]
#[command(
    name = "reference-maps",
    about = "Derive depth, mask, and grain visual maps from reference images",
    version,
    after_help = "Simple usage: reference-maps <image>  (writes {name}_depth.png, {name}_mask.png,\n\
                  {name}_noise.png next to the input)\n\n\
                  NOTE: The maps are corner-sampling heuristics for centered subjects,\n\
                  not true segmentation or measured depth."
)]
#[allow(clippy::struct_excessive_bools)]
struct Cli {
    /// Input image file or directory
    input: String,

    /// Output directory (default: next to each input; required for directories)
    #[arg(short, long)]
    output: Option<String>,

    /// Generate only the depth map
    #[arg(long)]
    depth: bool,

    /// Generate only the mask map
    #[arg(long)]
    mask: bool,

    /// Generate only the noise map
    #[arg(long)]
    noise: bool,

    /// Seed the grain generator for reproducible noise maps
    #[arg(long)]
    seed: Option<u64>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Suppress all non-error output
    #[arg(short, long)]
    quiet: bool,
}

fn selected_kinds(cli: &Cli) -> Vec<MapKind> {
    let mut kinds = Vec::new();
    if cli.depth {
        kinds.push(MapKind::Depth);
    }
    if cli.mask {
        kinds.push(MapKind::Mask);
    }
    if cli.noise {
        kinds.push(MapKind::Noise);
    }
    if kinds.is_empty() {
        kinds = MapKind::ALL.to_vec();
    }
    kinds
}

fn main() {
    let cli = Cli::parse();

    let opts = ProcessOptions {
        kinds: selected_kinds(&cli),
        seed: cli.seed,
        verbose: cli.verbose,
        quiet: cli.quiet,
    };

    let input_path = Path::new(&cli.input);
    if !input_path.exists() {
        eprintln!("Error: Input path does not exist: {}", cli.input);
        process::exit(1);
    }

    if !opts.quiet {
        let names: Vec<&str> = opts.kinds.iter().map(|k| k.as_str()).collect();
        eprintln!("Generating {} map(s)", names.join(", "));
        if let Some(seed) = opts.seed {
            eprintln!("Grain seeded with {seed}");
        }
        eprintln!();
    }

    let results = if input_path.is_dir() {
        let output_dir = if let Some(o) = &cli.output {
            PathBuf::from(o)
        } else {
            eprintln!("Error: Output directory is required for batch processing");
            eprintln!("Usage: reference-maps <input_dir> -o <output_dir>");
            process::exit(1);
        };
        process_directory(input_path, &output_dir, &opts)
    } else {
        let output_dir = cli.output.as_ref().map(PathBuf::from);
        vec![process_file(input_path, output_dir.as_deref(), &opts)]
    };

    let mut success_count = 0u32;
    let mut fail_count = 0u32;

    for r in &results {
        print_result(r, &opts);
        if r.success {
            success_count += 1;
        } else {
            fail_count += 1;
        }
    }

    if results.len() > 1 && !opts.quiet {
        eprintln!();
        eprint!("[Summary] Processed: {success_count}");
        if fail_count > 0 {
            eprint!(", Failed: {fail_count}");
        }
        eprintln!(" (Total: {})", results.len());
    }

    if fail_count > 0 {
        process::exit(1);
    }
}

fn print_result(result: &ProcessResult, opts: &ProcessOptions) {
    if opts.quiet && result.success {
        return;
    }

    let filename = result.path.file_name().map_or_else(
        || result.path.display().to_string(),
        |f| f.to_string_lossy().to_string(),
    );

    if result.success {
        if !opts.quiet {
            eprintln!("[OK] {filename}: {}", result.message);
        }
    } else {
        eprintln!("[FAIL] {filename}: {}", result.message);
    }

    if opts.verbose {
        for out in &result.outputs {
            eprintln!("  -> {}", out.display());
        }
    }
}
