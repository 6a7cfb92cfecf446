//! CLI for capturing presentation slides to OCR text and cleaning the result.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

use slidecap_capture::browser::{BrowserSlideSource, DEFAULT_NEXT_SELECTOR};
use slidecap_capture::walker::DEFAULT_MAX_SLIDES;
use slidecap_capture::{OcrTextExtractor, SlideWalker, WalkConfig};
use slidecap_core::store::{read_map, write_map};
use slidecap_core::{TextCleaner, TextStore};
use slidecap_ocr::OcrEngine;

/// Capture web presentation slides via OCR and clean the extracted text.
#[derive(Parser, Debug)]
#[command(name = "slidecap")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Walk a presentation page slide by slide, OCR each slide, and
    /// append the text to the store
    Capture {
        /// URL of the presentation page
        url: String,

        /// Store key the extracted text is appended under
        label: String,

        /// Path of the extracted-text store file
        #[arg(long, default_value = "extracted_text.json")]
        store: PathBuf,

        /// Directory for per-slide screenshot artifacts
        #[arg(long, default_value = "screenshots")]
        screenshot_dir: PathBuf,

        /// Maximum number of slides to accept
        #[arg(long, default_value_t = DEFAULT_MAX_SLIDES)]
        max_slides: usize,

        /// CSS selector of the slide-advance control
        #[arg(long, default_value = DEFAULT_NEXT_SELECTOR)]
        next_selector: String,

        /// Tesseract language spec
        #[arg(long, default_value = "rus+eng")]
        lang: String,

        /// Non-default tessdata directory
        #[arg(long)]
        tessdata_dir: Option<PathBuf>,

        /// Pause after clicking "next", in milliseconds
        #[arg(long, default_value_t = 2000)]
        render_delay_ms: u64,
    },

    /// Clean the extracted store and derive the relevant-info file
    Clean {
        /// Extracted-text store file to read
        #[arg(long, default_value = "extracted_text.json")]
        input: PathBuf,

        /// Output file for cleaned text
        #[arg(long, default_value = "cleaned_extracted_text.json")]
        cleaned: PathBuf,

        /// Output file for sentence-like fragments
        #[arg(long, default_value = "relevant_info.json")]
        relevant: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    match cli.command {
        Command::Capture {
            url,
            label,
            store,
            screenshot_dir,
            max_slides,
            next_selector,
            lang,
            tessdata_dir,
            render_delay_ms,
        } => {
            if !OcrEngine::is_available() {
                bail!("tesseract not found; install tesseract-ocr and re-run");
            }

            std::fs::create_dir_all(&screenshot_dir).with_context(|| {
                format!("Failed to create screenshot directory {}", screenshot_dir.display())
            })?;

            let mut engine = OcrEngine::new().with_lang(lang);
            if let Some(dir) = tessdata_dir {
                engine = engine.with_tessdata_dir(dir);
            }
            let extractor = OcrTextExtractor::with_engine(engine);

            let mut source = BrowserSlideSource::open(&url)?
                .with_next_selector(next_selector)
                .with_render_delay(Duration::from_millis(render_delay_ms));

            log::debug!("Appending under '{}' into {}", label, store.display());

            let mut text_store = TextStore::new(&store);
            let config = WalkConfig::new(label.as_str())
                .with_screenshot_dir(&screenshot_dir)
                .with_max_slides(max_slides);

            let summary = SlideWalker::new(config).run(&mut source, &extractor, &mut text_store)?;

            println!(
                "Captured {} slides for '{}' ({})",
                summary.accepted, label, summary.reason
            );
            println!("Extracted text has been saved to {}", store.display());
        }

        Command::Clean { input, cleaned, relevant } => {
            let map = read_map(&input)
                .with_context(|| format!("Failed to read {}", input.display()))?;

            let cleaner = TextCleaner::new();
            let cleaned_map = cleaner.clean_store(&map);
            write_map(&cleaned, &cleaned_map)
                .with_context(|| format!("Failed to write {}", cleaned.display()))?;
            println!("Cleaned text has been saved to {}", cleaned.display());

            let relevant_map = cleaner.relevant_info(&cleaned_map);
            write_map(&relevant, &relevant_map)
                .with_context(|| format!("Failed to write {}", relevant.display()))?;
            println!("Relevant information has been saved to {}", relevant.display());
        }
    }

    Ok(())
}
