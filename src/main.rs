// src/main.rs
//
// linefold — soft-wrap remover for Markdown sources
//
// - Joins consecutive prose lines into one line, dropping the whitespace and
//   newline at each join.
// - Keeps verbatim: front matter (only when the document opens with `---`),
//   ``` fenced code, list items, blank lines, lines ending in `？` or `！`.
// - A document ending mid-paragraph gets no trailing newline.
//
// CLI:
//   linefold INPUT [OUTPUT]   OUTPUT defaults to INPUT (in place); `-` is stdin/stdout
//   --check                   exit 1 if folding would change INPUT, write nothing
//   -v / -q                   more / less logging (RUST_LOG overrides)

use anyhow::Context;
use clap::{ArgAction, Parser};
use linefold::{fold, fold_file, fold_stream, FoldSummary, Mode};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// CLI flags
#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Report whether INPUT is already folded instead of writing output
    #[arg(long, action = ArgAction::SetTrue)]
    check: bool,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, action = ArgAction::SetTrue, conflicts_with = "verbose")]
    quiet: bool,

    /// Input file, or `-` for stdin
    input: PathBuf,

    /// Output file, or `-` for stdout (default: overwrite input)
    #[arg(conflicts_with = "check")]
    output: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    match run(&cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(2)
        }
    }
}

fn init_logging(cli: &Cli) {
    let level = if cli.quiet {
        log::LevelFilter::Error
    } else {
        match cli.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn is_std_stream(path: &Path) -> bool {
    path.as_os_str() == "-"
}

fn run(cli: &Cli) -> anyhow::Result<ExitCode> {
    if cli.check {
        return check(&cli.input);
    }

    // Default: overwrite the input, unless it is stdin.
    let output = cli.output.as_deref().unwrap_or(cli.input.as_path());

    let summary = match (is_std_stream(&cli.input), is_std_stream(output)) {
        (true, true) => fold_stream(io::stdin().lock(), io::stdout().lock())
            .context("folding stdin to stdout")?,
        (true, false) => {
            let mut out = Vec::new();
            let summary = fold_stream(io::stdin().lock(), &mut out).context("reading stdin")?;
            fs::write(output, &out).with_context(|| format!("writing {}", output.display()))?;
            summary
        }
        (false, true) => {
            let src = fs::File::open(&cli.input)
                .with_context(|| format!("reading {}", cli.input.display()))?;
            fold_stream(io::BufReader::new(src), io::stdout().lock())
                .with_context(|| format!("folding {} to stdout", cli.input.display()))?
        }
        (false, false) => fold_file(&cli.input, output)?,
    };

    report(&cli.input, &summary);
    Ok(ExitCode::SUCCESS)
}

fn check(input: &Path) -> anyhow::Result<ExitCode> {
    let src = if is_std_stream(input) {
        let mut src = Vec::new();
        io::stdin().read_to_end(&mut src).context("reading stdin")?;
        src
    } else {
        fs::read(input).with_context(|| format!("reading {}", input.display()))?
    };

    let mut out = Vec::with_capacity(src.len());
    let end_mode = fold(&src, &mut out);
    warn_unclosed(input, end_mode);

    if out == src {
        log::info!("{}: already folded", input.display());
        Ok(ExitCode::SUCCESS)
    } else {
        println!("{}: would be folded", input.display());
        Ok(ExitCode::from(1))
    }
}

fn report(input: &Path, summary: &FoldSummary) {
    warn_unclosed(input, summary.end_mode);
    log::info!(
        "{}: {} lines read, {} line breaks joined",
        input.display(),
        summary.lines,
        summary.joined
    );
}

fn warn_unclosed(input: &Path, end_mode: Mode) {
    if end_mode.is_unclosed() {
        log::warn!(
            "{}: document ends inside an unclosed {}; copied it verbatim",
            input.display(),
            end_mode.describe()
        );
    }
}
