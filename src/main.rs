//! CLI for fileconv - local file format converter

use clap::{ArgAction, Parser};
use fileconv::format::{extension_of, supported_targets, CONVERSION_TABLE};
use fileconv::{CollisionPolicy, ConvertOptions, FileConverter};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input file path (opens the converter window when omitted)
    input: Option<PathBuf>,

    /// Target extension, e.g. `pdf` or `.png`
    #[arg(short = 't', long = "to")]
    to: Option<String>,

    /// List supported conversions (for INPUT only, if given)
    #[arg(long)]
    list: bool,

    /// Never overwrite an existing output; number the new one instead
    #[arg(long)]
    keep_existing: bool,

    /// Resolution for PDF to image conversion
    #[arg(long, default_value_t = 200.0)]
    dpi: f32,

    /// ffmpeg executable used for MP3 encoding
    #[arg(long, default_value = "ffmpeg")]
    ffmpeg: PathBuf,

    /// MP3 bitrate
    #[arg(long, default_value = "192k")]
    bitrate: String,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn print_table(input: Option<&PathBuf>) {
    match input {
        Some(path) => {
            let ext = extension_of(path);
            let targets = supported_targets(&ext);
            if targets.is_empty() {
                println!("No supported conversions for: {}", ext);
            }
            for target in targets {
                println!("{}", target);
            }
        }
        None => {
            for (source, targets) in CONVERSION_TABLE {
                let targets: Vec<&str> = targets.iter().map(|t| t.extension()).collect();
                println!("{} -> {}", source, targets.join(", "));
            }
        }
    }
}

#[cfg(feature = "gui")]
fn no_input(options: ConvertOptions) {
    if let Err(e) = fileconv::gui::run(options) {
        eprintln!("Error starting window: {}", e);
        std::process::exit(1);
    }
}

#[cfg(not(feature = "gui"))]
fn no_input(_options: ConvertOptions) {
    use clap::CommandFactory;
    let _ = Args::command().print_help();
    std::process::exit(2);
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if args.list {
        print_table(args.input.as_ref());
        return;
    }

    let options = ConvertOptions {
        dpi: args.dpi,
        ffmpeg: args.ffmpeg,
        mp3_bitrate: args.bitrate,
        collision: if args.keep_existing {
            CollisionPolicy::KeepExisting
        } else {
            CollisionPolicy::Overwrite
        },
        ..Default::default()
    };

    let Some(input) = args.input else {
        no_input(options);
        return;
    };

    // Same order as the window: the file is checked before the format.
    if !input.exists() {
        eprintln!("Error: {}", fileconv::Error::NoFile);
        std::process::exit(1);
    }

    let target = match args.to {
        Some(target) => target,
        None => {
            eprintln!("Error: {}", fileconv::Error::NoFormat);
            std::process::exit(1);
        }
    };

    let converter = FileConverter::new(options);
    match converter.convert(&input, &target) {
        Ok(outcome) => {
            for output in &outcome.outputs {
                println!("{}", output.display());
            }
        }
        Err(e) => {
            eprintln!("Error converting {}: {}", input.display(), e);
            std::process::exit(1);
        }
    }
}
