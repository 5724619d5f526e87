//! Generate all three visual maps for a single reference image.
//!
//! Usage:
//! ```sh
//! cargo run --example generate_maps -- style.png out/
//! ```

use std::env;
use std::path::Path;
use std::process;

use reference_maps::{process_file, ProcessOptions};

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        eprintln!("Usage: {} <input> <output_dir>", args[0]);
        process::exit(1);
    }

    let input = Path::new(&args[1]);
    let output_dir = Path::new(&args[2]);

    let opts = ProcessOptions::default();
    let result = process_file(input, Some(output_dir), &opts);

    if result.success {
        println!("Done: {}", result.message);
        for path in &result.outputs {
            println!("  {}", path.display());
        }
    } else {
        eprintln!("Error: {}", result.message);
        process::exit(1);
    }
}
