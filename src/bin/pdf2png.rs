//! CLI binary for edgequake-pdf2png.
//!
//! A thin shim over the library crate that maps CLI flags
//! to `ConversionConfig` and prints results.

use anyhow::{Context, Result};
use clap::Parser;
use edgequake_pdf2png::{
    convert_directory, inspect_directory, ConversionConfig, ConversionProgressCallback,
    ConversionReport, FailurePolicy, PlannedFile, ProgressCallback,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const COMPLETION_MESSAGE: &str = "All PDFs have been converted to PNGs and replaced.";

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress callback: one bar over the candidate files plus a log
/// line per finished or failed file.
struct CliProgressCallback {
    bar: ProgressBar,
}

impl CliProgressCallback {
    fn new() -> Arc<Self> {
        let bar = ProgressBar::new(0); // length set in on_conversion_start

        let spinner_style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);

        bar.set_style(spinner_style);
        bar.set_prefix("Scanning");
        bar.set_message("Looking for PDFs…");
        bar.enable_steady_tick(Duration::from_millis(80));

        Arc::new(Self { bar })
    }

    fn activate_bar(&self, total: usize) {
        let progress_style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  \
             [{bar:42.green/238}] {pos:>3}/{len} files  \
             ⏱ {elapsed_precise}  {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ")
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);

        self.bar.set_length(total as u64);
        self.bar.set_style(progress_style);
        self.bar.set_prefix("Converting");
    }
}

impl ConversionProgressCallback for CliProgressCallback {
    fn on_conversion_start(&self, total_files: usize) {
        self.activate_bar(total_files);
        if total_files > 0 {
            self.bar.println(format!(
                "{} {}",
                cyan("◆"),
                bold(&format!("Converting {total_files} PDF file(s)…"))
            ));
        }
    }

    fn on_file_start(&self, file_name: &str, total_pages: usize) {
        self.bar
            .set_message(format!("{file_name} (0/{total_pages} pages)"));
    }

    fn on_page_written(&self, file_name: &str, page_num: usize, total_pages: usize) {
        self.bar
            .set_message(format!("{file_name} ({page_num}/{total_pages} pages)"));
    }

    fn on_file_complete(&self, file_name: &str, pages_written: usize) {
        self.bar.println(format!(
            "  {} {:<40}  {}",
            green("✓"),
            file_name,
            dim(&format!("{pages_written} page(s)")),
        ));
        self.bar.inc(1);
    }

    fn on_file_error(&self, file_name: &str, error: &str) {
        // Truncate very long error messages to keep output tidy.
        let msg = if error.chars().count() > 80 {
            format!("{}\u{2026}", error.chars().take(79).collect::<String>())
        } else {
            error.to_string()
        };

        self.bar
            .println(format!("  {} {:<40}  {}", red("✗"), file_name, red(&msg)));
        self.bar.inc(1);
    }

    fn on_conversion_complete(&self, total_files: usize, converted: usize) {
        self.bar.finish_and_clear();
        let failed = total_files.saturating_sub(converted);

        if failed == 0 {
            eprintln!(
                "{} {} file(s) converted",
                green("✔"),
                bold(&converted.to_string())
            );
        } else {
            eprintln!(
                "{} {}/{} file(s) converted  ({} failed)",
                if converted == 0 { red("✘") } else { cyan("⚠") },
                bold(&converted.to_string()),
                total_files,
                red(&failed.to_string()),
            );
        }
    }
}

impl Drop for CliProgressCallback {
    fn drop(&mut self) {
        // An aborted run never reaches on_conversion_complete.
        if !self.bar.is_finished() {
            self.bar.finish_and_clear();
        }
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Convert every PDF in ./output (the default directory)
  pdf2png

  # Convert a specific directory
  pdf2png ~/scans

  # Render at 150 DPI instead of the default 72
  pdf2png --dpi 150 ~/scans

  # Keep going past broken PDFs and report them at the end
  pdf2png --keep-going ~/scans

  # Show what would be written, without touching anything
  pdf2png --inspect-only ~/scans

  # Machine-readable report
  pdf2png --json ~/scans > report.json

NAMING:
  report.pdf (1 page)   → report.png
  doc.pdf    (3 pages)  → doc.png, doc_page_2.png, doc_page_3.png

  Existing PNGs with those names are overwritten. Each PDF is deleted once
  all of its pages have been written. Subdirectories are not scanned.

ENVIRONMENT VARIABLES:
  PDFIUM_LIB_PATH         Path to libpdfium (file or containing directory)
  PDF2PNG_DIR             Directory to convert
  PDF2PNG_DPI             Render resolution
  RUST_LOG                Override the log filter (e.g. edgequake_pdf2png=debug)
"#;

/// Replace every PDF in a directory with PNG renderings of its pages.
#[derive(Parser, Debug)]
#[command(
    name = "pdf2png",
    version,
    about = "Replace every PDF in a directory with PNG renderings of its pages",
    long_about = "Render every page of each PDF directly inside DIRECTORY to PNG files in the \
same directory, then delete the PDF. Page 1 becomes <name>.png, page N becomes \
<name>_page_N.png. Existing PNGs are overwritten.",
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Directory containing the PDFs to convert.
    #[arg(env = "PDF2PNG_DIR", default_value = "output")]
    directory: PathBuf,

    /// Rendering DPI (36–600).
    #[arg(long, env = "PDF2PNG_DPI", default_value_t = edgequake_pdf2png::DEFAULT_DPI,
          value_parser = clap::value_parser!(u32).range(36..=600))]
    dpi: u32,

    /// Continue with the next PDF when one fails, then report all failures.
    #[arg(short, long, env = "PDF2PNG_KEEP_GOING")]
    keep_going: bool,

    /// List the PNGs each PDF would produce; write and delete nothing.
    #[arg(long)]
    inspect_only: bool,

    /// Print the conversion report (or inspection plan) as JSON.
    #[arg(long, env = "PDF2PNG_JSON")]
    json: bool,

    /// pdfium library file, or a directory containing it.
    #[arg(long, env = "PDFIUM_LIB_PATH")]
    pdfium_lib: Option<PathBuf>,

    /// Disable progress bar.
    #[arg(long, env = "PDF2PNG_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "PDF2PNG_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "PDF2PNG_QUIET")]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // Suppress INFO-level library logs when the progress bar is active;
    // the bar provides all the feedback that matters to the user.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json && !cli.inspect_only;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    let progress_cb: Option<ProgressCallback> = if show_progress {
        Some(CliProgressCallback::new() as Arc<dyn ConversionProgressCallback>)
    } else {
        None
    };

    let config = build_config(&cli, progress_cb)?;

    // ── Inspect-only mode ────────────────────────────────────────────────
    if cli.inspect_only {
        let plan = inspect_directory(&cli.directory, &config)
            .with_context(|| format!("Failed to inspect {}", cli.directory.display()))?;
        if cli.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&plan).context("Failed to serialise plan")?
            );
        } else {
            print_plan(&cli, &plan);
        }
        return Ok(());
    }

    // ── Run conversion ───────────────────────────────────────────────────
    let report = convert_directory(&cli.directory, &config).context("Conversion failed")?;

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("Failed to serialise report")?
        );
    } else if !cli.quiet && !show_progress {
        // Only print inline stats when the progress callback is disabled.
        eprintln!(
            "Converted {}/{} files ({} pages) in {}ms",
            report.stats.converted_files,
            report.stats.candidate_files,
            report.stats.pages_written,
            report.stats.total_duration_ms
        );
    }

    if !report.is_success() {
        print_failures(&report);
        anyhow::bail!(
            "{} of {} PDF file(s) failed to convert",
            report.stats.failed_files,
            report.stats.candidate_files
        );
    }

    if !cli.json {
        println!("{COMPLETION_MESSAGE}");
    }

    Ok(())
}

/// Map CLI args to `ConversionConfig`.
fn build_config(cli: &Cli, progress: Option<ProgressCallback>) -> Result<ConversionConfig> {
    let policy = if cli.keep_going {
        FailurePolicy::Continue
    } else {
        FailurePolicy::Abort
    };

    let mut builder = ConversionConfig::builder()
        .dpi(cli.dpi)
        .failure_policy(policy);

    if let Some(ref path) = cli.pdfium_lib {
        builder = builder.pdfium_library_path(path);
    }
    if let Some(cb) = progress {
        builder = builder.progress_callback(cb);
    }

    builder.build().context("Invalid configuration")
}

fn print_plan(cli: &Cli, plan: &[PlannedFile]) {
    if plan.is_empty() {
        println!("No PDFs found in {}", cli.directory.display());
        return;
    }
    for file in plan {
        match (&file.error, file.page_count) {
            (Some(err), _) => println!("{}  {}", file.source, red(&err.to_string())),
            (None, Some(pages)) => {
                println!("{}  ({} page(s))", file.source, pages);
                for output in &file.outputs {
                    println!("  → {output}");
                }
            }
            (None, None) => println!("{}", file.source),
        }
    }
}

fn print_failures(report: &ConversionReport) {
    for failed in report.failures() {
        if let edgequake_pdf2png::FileStatus::Failed { ref error } = failed.status {
            eprintln!("  {} {}: {}", red("✗"), failed.source, error);
            if !failed.outputs.is_empty() {
                eprintln!(
                    "    {}",
                    dim(&format!("left in place: {}", failed.outputs.join(", ")))
                );
            }
        }
    }
}
