//! md2wechat CLI - styled WeChat articles from documents
//!
//! Converts Markdown, HTML, plain text, RST, Word and RTF files into a
//! self-contained HTML page for the WeChat article editor.

use clap::Parser;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use md2wechat::{available_styles, styles, ConvertOptions, Converter, Format, SourceDocument};
use std::io::{self, Write};
use std::path::PathBuf;

/// Convert documents into styled WeChat articles
#[derive(Parser)]
#[command(
    name = "md2wechat",
    version,
    about = "Convert documents into styled WeChat articles",
    long_about = "md2wechat - converts Markdown, HTML, text, RST, Word and RTF files\n\
                  into self-contained HTML ready to paste into the WeChat editor."
)]
struct Cli {
    /// Input file path
    #[arg(required_unless_present_any = ["list_styles", "list_formats"])]
    input: Option<PathBuf>,

    /// Output file path (default: input with .html extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Article title
    #[arg(short, long)]
    title: Option<String>,

    /// Article subtitle
    #[arg(short, long)]
    subtitle: Option<String>,

    /// Stylesheet
    #[arg(long, default_value = md2wechat::DEFAULT_STYLE, value_parser = clap::builder::PossibleValuesParser::new(available_styles()))]
    style: String,

    /// List available styles and exit
    #[arg(long)]
    list_styles: bool,

    /// List supported input formats and exit
    #[arg(long)]
    list_formats: bool,

    /// HTML-escape the title and subtitle
    #[arg(long)]
    escape_title: bool,

    /// Print the intermediate Markdown instead of writing HTML
    #[arg(long)]
    markdown: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    if cli.list_styles {
        print_styles();
        return Ok(());
    }
    if cli.list_formats {
        print_formats();
        return Ok(());
    }

    let input = cli.input.ok_or("no input file given")?;

    let mut options = ConvertOptions::new()
        .with_style(cli.style)
        .with_escape_header(cli.escape_title);
    if let Some(title) = cli.title {
        options = options.with_title(title);
    }
    if let Some(subtitle) = cli.subtitle {
        options = options.with_subtitle(subtitle);
    }
    let converter = Converter::new(options);
    log::debug!("converting {} with {:?}", input.display(), converter.options());

    if cli.markdown {
        let source = SourceDocument::read(&input)?;
        let markdown = converter.to_markdown(&source)?;
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        writeln!(handle, "{}", markdown)?;
        return Ok(());
    }

    let pb = create_spinner("Converting document...");
    let report = converter.try_convert_file(&input, cli.output.as_deref());
    pb.finish_and_clear();

    let report = report.map_err(|e| {
        eprintln!(
            "{} Conversion failed: {}",
            "✗".red().bold(),
            input.display()
        );
        e
    })?;

    println!(
        "{} Converted {} ({}) to {}",
        "✓".green().bold(),
        input.display(),
        report.format.name(),
        report.output.display()
    );
    println!(
        "  {}: {}",
        "Style".bold(),
        report.document.style
    );
    if let Some(ref title) = report.document.title {
        println!("  {}: {}", "Title".bold(), title);
    }
    println!("  Paste the file's content into the WeChat editor.");

    Ok(())
}

fn print_styles() {
    println!("{}", "Available styles".cyan().bold());
    println!("{}", "─".repeat(40));
    for style in styles::all_styles() {
        println!("  {:<10} {}", style.id.bold(), style.description);
    }
}

fn print_formats() {
    println!("{}", "Supported formats".cyan().bold());
    println!("{}", "─".repeat(40));
    for format in Format::all_supported() {
        let extensions: Vec<String> = format
            .extensions()
            .iter()
            .map(|ext| format!(".{}", ext))
            .collect();
        println!(
            "  {:<12} {:<20} {}",
            format.name().bold(),
            extensions.join(", "),
            format.note()
        );
    }
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
        .template("{spinner:.blue} {msg}")
    {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}
