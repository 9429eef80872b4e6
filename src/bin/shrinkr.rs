//! Command-line front end for shrinkr.
//!
//! ```text
//! shrinkr shrink 'saved/*.html' --outpath shrunk
//! shrinkr exists saved/page.html
//! ```

use clap::{Parser, Subcommand};
use log::LevelFilter;
use shrinkr::batch;
use shrinkr::{dom, Error, Options, DEFAULT_MARKER_TAG, EXIT_SUCCESS, EXIT_USAGE};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Shrink saved web pages down to their <article> element
#[derive(Parser, Debug)]
#[command(name = "shrinkr", version, about, arg_required_else_help = true)]
struct Cli {
    /// More output: -v lists files and progress, -vv adds pruning details
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Remove everything around the article of each matching file
    ///
    /// References to other articles and similar overhead often take far more
    /// space than the article itself. The article, its ancestors and <head>
    /// are kept; all other content of <body> is dropped.
    Shrink {
        /// File name or glob pattern, e.g. 'saved/*.html'
        pattern: String,

        /// The name of the output file
        #[arg(long)]
        outfile: Option<String>,

        /// The path where the output file shall be written
        #[arg(long, default_value = "./", value_hint = clap::ValueHint::DirPath)]
        outpath: PathBuf,

        /// Suppress reporting of statistics
        #[arg(long)]
        nostats: bool,

        /// Report statistics as JSON
        #[arg(long, conflicts_with = "nostats")]
        json: bool,

        /// Process files in parallel
        #[arg(short, long)]
        parallel: bool,

        /// Tag name of the element to keep
        #[arg(long, default_value = DEFAULT_MARKER_TAG)]
        marker: String,
    },

    /// Check whether a document has an article element
    ///
    /// Run it on documents to decide whether shrinking them may work.
    Exists {
        /// The HTML file to inspect
        #[arg(value_hint = clap::ValueHint::FilePath)]
        filename: PathBuf,

        /// Tag name of the element to look for
        #[arg(long, default_value = DEFAULT_MARKER_TAG)]
        marker: String,
    },

    /// Print the version number of shrinkr
    Version,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = if err.use_stderr() { EXIT_USAGE } else { EXIT_SUCCESS };
            let _ = err.print();
            return ExitCode::from(code);
        }
    };
    init_logger(cli.verbose);

    let result = match cli.command {
        Commands::Shrink {
            pattern,
            outfile,
            outpath,
            nostats,
            json,
            parallel,
            marker,
        } => {
            let options = Options {
                marker_tag: marker,
                output_dir: outpath,
                output_name: outfile,
                report_stats: !nostats,
                parallel,
            };
            shrink(&pattern, &options, cli.verbose > 0, json)
        }
        Commands::Exists { filename, marker } => exists(&filename, &marker),
        Commands::Version => {
            println!("shrinkr v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("shrinkr: {err}");
            ExitCode::from(err.exit_code())
        }
    }
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .format_target(false)
        .parse_default_env()
        .init();
}

fn shrink(pattern: &str, options: &Options, list_files: bool, json: bool) -> Result<(), Error> {
    let files = batch::expand_pattern(pattern)?;
    if list_files {
        print_file_list(&files);
    }

    let mut outcome = batch::run_batch(&files, options);
    log::info!(
        "{} written, {} failed",
        outcome.processed.len(),
        outcome.failures.len()
    );

    if options.report_stats {
        let report = outcome.stats.report();
        if json {
            match serde_json::to_string_pretty(&report) {
                Ok(text) => println!("{text}"),
                Err(err) => log::error!("cannot serialize report: {err}"),
            }
        } else {
            println!("\n{report}");
        }
    }

    outcome.take_exit_error().map_or(Ok(()), Err)
}

fn print_file_list(files: &[PathBuf]) {
    println!("\n----------------\n{} files to process\n----------------", files.len());
    for file in files {
        println!("\t{}", file.display());
    }
    println!("----------------");
}

fn exists(filename: &Path, marker: &str) -> Result<(), Error> {
    log::info!("checking {} for <{marker}>", filename.display());
    let raw = std::fs::read(filename).map_err(|err| Error::io(filename, err))?;
    let doc = dom::parse_bytes(&raw)?;
    let found = shrinkr::has_marker(&doc, marker)?;
    println!("Document has {marker} element: {found}");
    Ok(())
}
