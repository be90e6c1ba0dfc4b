//! latin-vocab - Latin dictionary extractor

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use latin_vocab::{
    Dictionary, ExtractConfig, Extraction, ParseConfig, WarningKind, find_stylesheet,
    load_dictionary_with_config, markup, read_markup,
};

#[derive(Parser)]
#[command(name = "latin-vocab")]
#[command(version, about = "Extract Latin vocabulary and paradigms from a dictionary export", long_about = None)]
#[command(after_help = "EXAMPLES:
    latin-vocab latin.html               List entries by header
    latin-vocab latin.html --json        Dump entries and paradigm tables as JSON
    latin-vocab latin.html --dump-tree   Show the parsed markup tree")]
struct Cli {
    /// Input file (HTML dictionary export)
    #[arg(value_name = "INPUT")]
    input: String,

    /// Print the dictionary as JSON
    #[arg(long)]
    json: bool,

    /// Print the parsed markup tree and exit
    #[arg(long)]
    dump_tree: bool,

    /// Skip entries under a header with this title (repeatable)
    #[arg(long = "skip-header", value_name = "NAME")]
    skip_headers: Vec<String>,

    /// Log pipeline progress
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only report errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(cli: &Cli) {
    let default = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<(), String> {
    let text = read_markup(&cli.input).map_err(|e| e.to_string())?;

    if cli.dump_tree {
        let doc = markup::parse_document(&text).map_err(|e| e.to_string())?;
        if let Some(root) = doc.root() {
            print!("{}", doc.pretty_print(root));
        }
        // Surface style problems even when only dumping
        find_stylesheet(&doc).map_err(|e| e.to_string())?;
        return Ok(());
    }

    let config = cli
        .skip_headers
        .iter()
        .fold(ExtractConfig::default(), |config, name| config.skip_header(name));
    let extraction = load_dictionary_with_config(&text, ParseConfig::default(), config)
        .map_err(|e| e.to_string())?;

    if cli.json {
        let json = serde_json::to_string_pretty(&extraction.dictionary).map_err(|e| e.to_string())?;
        println!("{json}");
    } else {
        print_dictionary(&extraction.dictionary);
    }

    if !cli.quiet {
        print_warning_summary(&extraction);
    }
    Ok(())
}

fn print_dictionary(dictionary: &Dictionary) {
    for (title, entries) in dictionary.iter() {
        let title = if title.is_empty() { "(untitled)" } else { title };
        println!("{title} ({} entries)", entries.len());
        for entry in entries {
            println!("  [{}] {}", entry.part_of_speech(), entry.clean_description());
        }
    }
    println!(
        "Total: {} entries under {} headers ({} verbs)",
        dictionary.entry_count(),
        dictionary.len(),
        dictionary.verbs().count()
    );
}

fn print_warning_summary(extraction: &Extraction) {
    if extraction.warnings.is_empty() {
        return;
    }
    eprintln!("{} warnings:", extraction.warnings.len());
    for kind in WarningKind::ALL {
        let count = extraction.warnings.iter().filter(|w| w.kind == kind).count();
        if count > 0 {
            eprintln!("  {}: {count}", kind.as_str());
        }
    }
}
