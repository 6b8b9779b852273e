use std::path::PathBuf;

use clap::Parser;
use indicatif::ProgressBar;
use onyx_gen::progress::stderr_bar;
use onyx_gen::{
    Alphabet, CharClass, DEFAULT_REPORT_EVERY, Error, ExclusionSet, GenerationMode, LengthRange,
    LineSink, RunConfig, generate,
};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "onyx", version)]
#[command(about = "Generate password candidates exhaustively or by random sampling")]
#[command(
    after_help = "Character classes: l = a-z, u = A-Z, d = 0-9, s = !@#$%^&*()-_=+[]{}|;:,.<>?/\n\
                  Exclusions: x = all-lower, y = all-upper, z = all-digits, w = no-symbols\n\n\
                  Example: onyx -a l/u/d/s -e x/z -l 8-12 -f passwords.txt -n 1000"
)]
struct Args {
    /// Character class codes separated by '/', e.g. l/u/d/s
    #[arg(short, long, default_value = "")]
    allowed: String,

    /// Extra literal characters appended to the alphabet
    #[arg(short, long, default_value = "")]
    chars: String,

    /// Exclusion codes or rule names separated by '/', e.g. x/z
    #[arg(short, long, default_value = "")]
    exclude: String,

    /// Candidate length or range, e.g. 8 or 8-16
    #[arg(short, long)]
    length: LengthRange,

    /// Output file; appended to unless --force is given
    #[arg(short, long)]
    file: PathBuf,

    /// Number of random candidates to write (default: every combination)
    #[arg(short = 'n', long)]
    count: Option<u64>,

    /// Overwrite the output file instead of appending
    #[arg(long)]
    force: bool,

    /// Written candidates between progress updates
    #[arg(long, env = "ONYX_REPORT_EVERY", default_value_t = DEFAULT_REPORT_EVERY)]
    report_every: u64,

    /// Disable progress bar
    #[arg(long)]
    no_progress: bool,

    /// Debug logging (overridden by RUST_LOG)
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let args = Args::parse();
    init_tracing(args.verbose);

    // Validate everything before touching the output file
    let alphabet = Alphabet::from_classes(&CharClass::parse_codes(&args.allowed), &args.chars)?;
    let mode = match args.count {
        Some(count) => GenerationMode::RandomSample(count),
        None => GenerationMode::Exhaustive,
    };
    let exclusions = ExclusionSet::parse_codes(&args.exclude);
    let config =
        RunConfig::new(alphabet, args.length, mode, exclusions)?.with_report_every(args.report_every)?;

    let sink = if args.force {
        LineSink::truncate(&args.file).await?
    } else {
        LineSink::append(&args.file).await?
    };

    println!(
        "Generating {} candidates ({}) into {:?}",
        config.total(),
        config.mode(),
        args.file
    );

    // Ctrl-C stops generation between candidates; the sink is still flushed
    let cancel = CancellationToken::new();
    let signal_task = tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        }
    });

    let bar = if args.no_progress { ProgressBar::hidden() } else { stderr_bar() };
    let result = generate(&config, sink, bar, &cancel).await;
    signal_task.abort();
    let summary = result?;

    if summary.interrupted {
        println!("Interrupted. {} passwords saved to {:?}", summary.written, args.file);
    } else {
        println!("Done. {} passwords saved to {:?}", summary.written, args.file);
    }
    Ok(())
}
