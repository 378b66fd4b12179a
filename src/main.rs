use std::env;
use std::fs;
use std::process;

use rand::rngs::StdRng;
use rand::SeedableRng;

use chordgen::GeneratorOptions;

fn usage() -> ! {
    eprintln!("Usage: chordgen <num-questions> [options.yaml] [--seed N] [--output file.json]");
    process::exit(1);
}

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        usage();
    }

    let num_qs: usize = match args[1].parse() {
        Ok(n) => n,
        Err(_) => {
            eprintln!("Error: '{}' is not a number of questions", args[1]);
            process::exit(1);
        }
    };

    let mut options_path: Option<&String> = None;
    let mut seed: Option<u64> = None;
    let mut output_path: Option<&String> = None;

    // Parse flags
    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--seed" => {
                let value = args.get(i + 1).unwrap_or_else(|| usage());
                seed = match value.parse() {
                    Ok(n) => Some(n),
                    Err(_) => {
                        eprintln!("Error: '{}' is not a valid seed", value);
                        process::exit(1);
                    }
                };
                i += 2;
            }
            "--output" => {
                output_path = Some(args.get(i + 1).unwrap_or_else(|| usage()));
                i += 2;
            }
            _ if options_path.is_none() => {
                options_path = Some(&args[i]);
                i += 1;
            }
            _ => usage(),
        }
    }

    // Read options file
    let options = match options_path {
        Some(path) => {
            let source = match fs::read_to_string(path) {
                Ok(content) => content,
                Err(e) => {
                    eprintln!("Error reading file '{}': {}", path, e);
                    process::exit(1);
                }
            };
            match serde_yaml::from_str(&source) {
                Ok(options) => options,
                Err(e) => {
                    eprintln!("Error parsing options '{}': {}", path, e);
                    process::exit(1);
                }
            }
        }
        None => GeneratorOptions::default(),
    };

    // Generate
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let chords = match chordgen::generate(num_qs, &options, &mut rng) {
        Ok(chords) => chords,
        Err(e) => {
            eprintln!("Generation error: {}", e);
            process::exit(1);
        }
    };

    let json = match serde_json::to_string_pretty(&chords) {
        Ok(json) => json,
        Err(e) => {
            eprintln!("Error serializing output: {}", e);
            process::exit(1);
        }
    };

    // Output
    match output_path {
        Some(path) => {
            if let Err(e) = fs::write(path, &json) {
                eprintln!("Error writing to '{}': {}", path, e);
                process::exit(1);
            }
            eprintln!("Wrote {} chords to {}", chords.len(), path);
        }
        None => {
            println!("{}", json);
        }
    }
}
