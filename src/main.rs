// Tue Jan 13 2026 - Alex

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use layout_mapper::{
    config::{Config, OutputFormat},
    output::{Emitter, JsonEmitter, SourceEmitter, SourceRenderer},
    utils::{format_duration, pluralize, LoggingUtils},
    BindingSet, Denylist, Pipeline, PipelineReport,
};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Source,
    Json,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Source => OutputFormat::Source,
            Format::Json => OutputFormat::Json,
        }
    }
}

#[derive(Parser, Debug)]
#[command(author = "Alex")]
#[command(version = "1.0.0")]
#[command(about = "Maps raw foreign-memory bindings onto deduplicated wrapper types", long_about = None)]
struct Args {
    /// Binding manifest (JSON)
    #[arg(short, long)]
    manifest: Option<PathBuf>,

    #[arg(short, long)]
    output: Option<PathBuf>,

    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(long)]
    denylist: Option<PathBuf>,

    #[arg(short = 'j', long)]
    threads: Option<usize>,

    #[arg(long, value_enum)]
    format: Option<Format>,

    /// Resolve everything but write nothing
    #[arg(long)]
    dry_run: bool,

    #[arg(short, long)]
    verbose: bool,

    #[arg(long)]
    no_progress: bool,
}

fn main() {
    let args = Args::parse();
    LoggingUtils::init(args.verbose);

    if let Err(e) = run(args) {
        eprintln!("{} {:#}", "[!]".red(), e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let config = build_config(&args)?;

    println!("{}", "Layout Mapper".cyan().bold());
    println!("{}", "=".repeat(50).cyan());
    println!();

    let Some(manifest) = config.manifest.clone() else {
        bail!("no binding manifest given; pass --manifest or set it in the config file");
    };

    println!("{} Loading bindings: {}", "[*]".blue(), manifest.display());
    let bindings = BindingSet::load(&manifest).context("loading binding manifest")?;
    println!(
        "{} {} and {} loaded",
        "[+]".green(),
        pluralize(bindings.len(), "native type", "native types"),
        pluralize(bindings.constants().len(), "constant", "constants")
    );

    let denylist = Denylist::load(&config.denylist)
        .with_context(|| format!("loading denylist {}", config.denylist.display()))?;
    println!(
        "{} Denylist {} excludes {}",
        "[+]".green(),
        denylist.version,
        pluralize(denylist.len(), "type", "types")
    );

    let emitter: Box<dyn Emitter> = match config.output_format {
        OutputFormat::Source => Box::new(
            SourceEmitter::new(&config.output_dir)
                .with_renderer(SourceRenderer::new().with_header("Generated by layout-mapper. Do not edit.")),
        ),
        OutputFormat::Json => Box::new(JsonEmitter::new(&config.output_dir).with_pretty_print(config.pretty_json)),
    };

    println!("{} Running with {} worker threads", "[*]".blue(), config.max_threads);
    println!();

    let mut pipeline = Pipeline::new(&config, &bindings, &denylist, emitter.as_ref());
    if config.enable_progress_bars {
        let pb = ProgressBar::new(0);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        pipeline = pipeline.with_progress(pb);
    }

    let report = pipeline.run().context("translation failed")?;
    print_summary(&report, &config);

    if !report.emission.failures.is_empty() {
        bail!("{} models could not be emitted", report.emission.failures.len());
    }
    Ok(())
}

fn build_config(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load(path).with_context(|| format!("loading config {}", path.display()))?,
        None => Config::default(),
    };

    if let Some(manifest) = &args.manifest {
        config = config.with_manifest(manifest.clone());
    }
    if let Some(output) = &args.output {
        config = config.with_output_dir(output.clone());
    }
    if let Some(denylist) = &args.denylist {
        config = config.with_denylist(denylist.clone());
    }
    if let Some(threads) = args.threads {
        config = config.with_threads(threads);
    }
    if let Some(format) = args.format {
        config = config.with_output_format(format.into());
    }
    config.dry_run |= args.dry_run;
    config.enable_verbose_output |= args.verbose;
    config.enable_progress_bars &= !args.no_progress;

    config.validate().context("invalid configuration")?;
    Ok(config)
}

fn print_summary(report: &PipelineReport, config: &Config) {
    println!();
    println!("{}", "=".repeat(50).cyan());
    println!("{} {}", "[+]".green(), report.summary());
    println!(
        "  Struct bases: {}  aliases: {}",
        report.bases.to_string().green(),
        report.aliases.to_string().green()
    );
    println!("  Forwarded interface methods: {}", report.com_methods.to_string().green());
    println!("  Aggregated constants: {}", report.constants.to_string().green());

    if config.dry_run {
        println!("{} Dry run, nothing written", "[*]".blue());
    } else {
        println!(
            "{} Emitted {} to {}",
            "[+]".green(),
            pluralize(report.emission.emitted, "type", "types"),
            config.output_dir.display()
        );
    }

    if !report.diagnostics.is_empty() {
        println!(
            "{} {}",
            "[!]".yellow(),
            pluralize(report.diagnostics.len(), "diagnostic", "diagnostics")
        );
        if config.enable_verbose_output {
            for diagnostic in &report.diagnostics {
                println!("    {}", diagnostic);
            }
        }
    }
    for failure in &report.emission.failures {
        println!("{} {}: {}", "[!]".red(), failure.model, failure.error);
    }

    if report.is_clean() {
        println!("{} Finished in {}", "[+]".green(), format_duration(report.elapsed));
    } else {
        println!("{} Finished with warnings in {}", "[!]".yellow(), format_duration(report.elapsed));
    }
}
