use clap::{Parser, Subcommand};
use retromagic::classify::{self, Test};
use retromagic::probe::Probe;
use retromagic::{
    list_archive, list_directory, CommandExtractor, DeferredRender, EntryOutcome, EntryParser,
    ExtractError, Extractor, Listing, ListingOptions, NoRender, Platform, SkipReason,
};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "retromagic", about = "Identify retro file formats and list archive contents")]
struct Cli {
    /// Log classification details (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Identify one or more files by content
    Identify {
        #[arg(required = true, num_args = 1..)]
        files: Vec<PathBuf>,
        /// Platform the files were filed under
        #[arg(short, long)]
        platform: Option<Platform>,
    },
    /// List a directory, or an archive extracted with --extract-with
    List {
        path: PathBuf,
        #[arg(short, long)]
        platform: Option<Platform>,
        /// Entries shown before the listing is truncated
        #[arg(long)]
        cap: Option<usize>,
        /// JSON file with listing options
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Print the listing as JSON
        #[arg(long)]
        json: bool,
        /// Print the selected readme and diz text
        #[arg(long)]
        readme: bool,
        /// Extractor run as PROGRAM [ARGS..] <archive> <dest>
        #[arg(long, num_args = 1.., allow_hyphen_values = true, value_name = "PROGRAM")]
        extract_with: Vec<String>,
    },
    /// Dump the first bytes of a file with its classification
    Probe {
        file: PathBuf,
        #[arg(short, long, default_value = "64")]
        bytes: usize,
    },
    /// Print the signature rules in priority order
    Signatures,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let level = if cli.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    match cli.command {

        // ── Identify ─────────────────────────────────────────────────────────
        Commands::Identify { files, platform } => {
            let mut options = ListingOptions::default();
            if let Some(p) = platform { options.platform = p; }
            for path in &files {
                let mut zero = 0;
                let name = path.display().to_string();
                match EntryParser::new(path, name.clone(), &options).parse(&mut zero) {
                    EntryOutcome::Emitted(e) => {
                        println!("{}: {:<18} {}", name, e.signature.name(), e.description);
                    }
                    EntryOutcome::Skipped(reason) => {
                        println!("{}: {}", name, skip_text(reason));
                    }
                }
            }
        }

        // ── List ─────────────────────────────────────────────────────────────
        Commands::List { path, platform, cap, config, json, readme, extract_with } => {
            let mut options = match config {
                Some(file) => ListingOptions::from_file(file)?,
                None       => ListingOptions::default(),
            };
            if let Some(p) = platform { options.platform = p; }
            if let Some(c) = cap { options.cap = c; }
            options.validate()?;

            let printer = PrintReadme;
            let render: &dyn DeferredRender = if readme && !json { &printer } else { &NoRender };
            let id = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();

            let listing = if path.is_dir() {
                let listing = list_directory(&path, &options)?;
                if let Some(c) = &listing.readme {
                    render.render(&id, &c.readme, c.diz.as_deref());
                }
                listing
            } else if let Some((program, args)) = extract_with.split_first() {
                let extractor = CommandExtractor::new(program).args(args);
                list_archive(&path, &id, &extractor, render, &options)?
            } else {
                list_archive(&path, &id, &NoExtractor, render, &options)?
            };
            print_listing(&listing, json)?;
        }

        // ── Probe ────────────────────────────────────────────────────────────
        Commands::Probe { file, bytes } => {
            let options = ListingOptions::default();
            let probe = Probe::read_path(&file, options.head_size, options.tail_size)?;
            let signature = classify::classify_sample(&probe.sample());
            println!("File:      {}", file.display());
            println!("Size:      {} B", probe.len());
            println!("Signature: {} ({})", signature.name(), signature.title());
            let head = &probe.head()[..bytes.min(probe.head().len())];
            for (row, chunk) in head.chunks(16).enumerate() {
                let hex_bytes: Vec<String> = chunk.iter().map(|b| hex::encode([*b])).collect();
                let ascii: String = chunk
                    .iter()
                    .map(|&b| if b.is_ascii_graphic() || b == b' ' { b as char } else { '.' })
                    .collect();
                println!("{:08x}  {:<47}  {}", row * 16, hex_bytes.join(" "), ascii);
            }
        }

        // ── Signatures ───────────────────────────────────────────────────────
        Commands::Signatures => {
            println!("{:>4}  {:<20} {:>7}  {:<6}  Title", "#", "Name", "Min", "Test");
            for (i, rule) in classify::rules().iter().enumerate() {
                let test = match rule.test {
                    Test::Head(_)   => "head",
                    Test::Sample(_) => "sample",
                };
                println!("{:>4}  {:<20} {:>7}  {:<6}  {}",
                    i + 1, rule.signature.name(), rule.min_len, test, rule.signature.title());
            }
        }
    }

    Ok(())
}

// ── helpers ──────────────────────────────────────────────────────────────────

/// Stands in for an extractor when none was configured; every upload is
/// listed as a single file.
struct NoExtractor;

impl Extractor for NoExtractor {
    fn extract(&self, _archive: &Path, _dest: &Path) -> Result<(), ExtractError> {
        Err(ExtractError::Unsupported("no extractor configured (use --extract-with)".into()))
    }
}

/// Prints the readme and diz text.
struct PrintReadme;

impl DeferredRender for PrintReadme {
    fn render(&self, id: &str, readme: &Path, diz: Option<&Path>) {
        for path in std::iter::once(readme).chain(diz) {
            match std::fs::read(path) {
                Ok(bytes) => {
                    println!("── {} : {} ──", id, path.file_name().unwrap_or_default().to_string_lossy());
                    println!("{}", String::from_utf8_lossy(&bytes));
                }
                Err(e) => eprintln!("cannot read {}: {}", path.display(), e),
            }
        }
    }
}

fn print_listing(listing: &Listing, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(listing)?);
        return Ok(());
    }
    print!("{listing}");
    println!(
        "{} of {} file(s) listed{}",
        listing.emitted,
        listing.total_files,
        if listing.is_truncated() { " (truncated)" } else { "" }
    );
    if let Some(c) = &listing.readme {
        println!("Readme: {}", c.readme.display());
        if let Some(diz) = &c.diz {
            println!("Diz:    {}", diz.display());
        }
    }
    Ok(())
}

fn skip_text(reason: SkipReason) -> String {
    match reason {
        SkipReason::Directory       => "directory".into(),
        SkipReason::ZeroByte        => "empty file".into(),
        SkipReason::Special         => "not a regular file".into(),
        SkipReason::Unreadable(k)   => format!("unreadable ({k})"),
    }
}
