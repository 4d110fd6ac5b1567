mod ocr;
mod parser;
mod schema;
mod store;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::warn;

#[derive(Parser)]
#[command(name = "swimcard", about = "Workout card OCR extractor")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// OCR every card image in a folder, validate, write workouts JSON
    Run {
        /// Folder of card photos (.jpg / .png)
        #[arg(short, long, default_value = "./training_data")]
        dir: PathBuf,
        /// Output JSON path (overwritten)
        #[arg(short, long, default_value = "workouts.json")]
        output: PathBuf,
        /// Max images to process (default: all)
        #[arg(short = 'n', long)]
        limit: Option<usize>,
        /// Tesseract binary to invoke
        #[arg(long, default_value = "tesseract")]
        tesseract: String,
    },
    /// Parse one already-recognized text file and print the workout
    Text {
        /// Path to a raw OCR text dump
        file: PathBuf,
    },
    /// Parse a single set-item line and print the validated item
    Line {
        /// Raw line, e.g. "© 2X50 Drill 1:10"
        line: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            dir,
            output,
            limit,
            tesseract,
        } => run_batch(dir, output, limit, &tesseract).await,
        Commands::Text { file } => {
            let text = std::fs::read_to_string(&file)?;
            let workout = parser::parse_workout_text(&text)?;
            println!("{}", serde_json::to_string_pretty(&workout)?);
            Ok(())
        }
        Commands::Line { line } => {
            let item = parser::parse_set_item_line(&line)?;
            println!("{}", serde_json::to_string_pretty(&item)?);
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {:.1}s", elapsed.as_secs_f64());
    }

    result
}

struct RunStats {
    total: usize,
    ok: usize,
    ocr_errors: usize,
    invalid: usize,
}

impl RunStats {
    fn print(&self) {
        println!(
            "Processed {} images: {} ok, {} OCR errors, {} invalid.",
            self.total, self.ok, self.ocr_errors, self.invalid,
        );
    }
}

/// Sequential batch pipeline: one OCR call and one parse-and-validate cycle
/// per image. A failure only skips that image; the run always completes and
/// writes every validated workout.
async fn run_batch(
    dir: PathBuf,
    output: PathBuf,
    limit: Option<usize>,
    tesseract: &str,
) -> Result<()> {
    let mut images = ocr::list_images(&dir)?;
    if let Some(n) = limit {
        images.truncate(n);
    }
    if images.is_empty() {
        println!("No card images in {}.", dir.display());
        return Ok(());
    }
    println!("Processing {} card images...", images.len());

    let pb = ProgressBar::new(images.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40} {pos}/{len} ({per_sec}, eta {eta})")?
            .progress_chars("=> "),
    );

    let mut stats = RunStats {
        total: images.len(),
        ok: 0,
        ocr_errors: 0,
        invalid: 0,
    };
    let mut workouts = Vec::new();

    for image in &images {
        let text = match ocr::recognize(image, tesseract).await {
            Ok(text) => text,
            Err(e) => {
                warn!("OCR failed for {}: {:#}", image.display(), e);
                stats.ocr_errors += 1;
                pb.inc(1);
                continue;
            }
        };
        match parser::parse_workout_text(&text) {
            Ok(workout) => {
                workouts.push(workout);
                stats.ok += 1;
            }
            Err(e) => {
                warn!("Skipping {}: {}", image.display(), e);
                stats.invalid += 1;
            }
        }
        pb.inc(1);
    }

    pb.finish_and_clear();
    store::write_workouts(&output, &workouts)?;
    stats.print();
    println!("Wrote {} workouts to {}.", workouts.len(), output.display());
    Ok(())
}
