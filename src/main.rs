// External crates

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Error, Result};
use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use forumsift_rs::anonymize::{Anonymizer, DEFAULT_SALT};
use forumsift_rs::clean::{clean_tables, CleanConfig};
use forumsift_rs::io::{load_table, output_path, try_load_table, write_table};
use forumsift_rs::map_fxn::{PipelineProcessor, StepStats};
use forumsift_rs::utils::parse_config;

/*
Map Config layout:

text_field: optional default text column
pipeline: list with:
    [{name,
     kwargs: {arg1: val1, ...},
     step: optional label},
    ]

*/
/*============================================================
=                            ARGS                            =
============================================================*/

#[derive(Parser)]
#[clap(author, version, about = "Cleaning pipeline for forum comment/submission dumps", long_about = None)]
struct ArgParser {
    #[clap(subcommand)]
    command: Commands,

    #[arg(long, default_value_t = 0)]
    threads: usize,

    /// Debug-level logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Filter (and optionally anonymize) a comments dump and a submissions dump
    #[clap(arg_required_else_help = true)]
    Clean {
        #[arg(required = true, long)]
        comments_file: PathBuf,

        #[arg(required = true, long)]
        submissions_file: PathBuf,

        #[arg(long, default_value = "./filtered_data")]
        output_dir: PathBuf,

        /// YAML/JSON file with any CleanConfig fields; flags below override it
        #[arg(long)]
        config: Option<PathBuf>,

        #[arg(long)]
        min_score: Option<i64>,

        #[arg(long)]
        min_comment_words: Option<usize>,

        #[arg(long, num_args = 1..)]
        idioms: Option<Vec<String>>,

        #[arg(long)]
        filter_edited: bool,

        #[arg(long)]
        filter_language: bool,

        #[arg(long)]
        target_language: Option<String>,

        #[arg(long)]
        anonymize: bool,

        #[arg(long)]
        topic_filter: bool,

        #[arg(long, env = "FORUMSIFT_SALT")]
        salt: Option<String>,
    },

    /// Anonymize already-filtered dumps
    Anonymize {
        #[arg(long)]
        comments_file: Option<PathBuf>,

        #[arg(long)]
        submissions_file: Option<PathBuf>,

        #[arg(long, default_value = "./anonymized_data")]
        output_dir: PathBuf,

        #[arg(long, env = "FORUMSIFT_SALT")]
        salt: Option<String>,
    },

    /// Run any pipeline of registered stages over one table
    #[clap(arg_required_else_help = true)]
    Map {
        #[arg(required = true, long)]
        input: PathBuf,

        #[arg(required = true, long)]
        output: PathBuf,

        #[arg(required = true, long)]
        config: PathBuf,
    },
}

/*============================================================
=                            UTILITIES                       =
============================================================*/

fn print_step_stats(name: &str, start_time: Instant, stats: &[StepStats]) -> () {
    let total_docs = stats.first().map_or(0, |s| s.rows_in);
    let total_step_time = stats.iter().map(|s| s.nanos).sum::<u128>().max(1);
    let mut remaining_docs = total_docs;

    println!("Finished {} in {:?} seconds", name, start_time.elapsed().as_secs());
    println!("Processed {:?} total rows", total_docs);
    println!("-------------------------------------------");
    for (i, stat) in stats.iter().enumerate() {
        println!("Step {:?} | {}", i, stat.step);
        println!(
            "\t Spent {:.2}% of processing time in this step",
            stat.nanos as f64 / total_step_time as f64 * 100.0
        );
        let removed_in_this_step = stat.removed();
        let remaining_remove_pct =
            removed_in_this_step as f32 / f32::max(1.0, remaining_docs as f32) * 100.0;
        let total_remove_pct = removed_in_this_step as f32 / f32::max(1.0, total_docs as f32) * 100.0;
        remaining_docs = stat.rows_out;
        println!(
            "\t Removed {:?} rows | {:.2}% of remaining | {:.2}% of pool",
            removed_in_this_step, remaining_remove_pct, total_remove_pct
        );
    }

    println!("FINAL:");
    println!(
        "\t {:?} rows survived | {:.2}% of pool",
        remaining_docs,
        remaining_docs as f32 / f32::max(1.0, total_docs as f32) * 100.0
    );
}

fn extension_of(path: &Path) -> String {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    match name.split_once('.') {
        Some((_, ext)) => ext.to_string(),
        None => String::from("csv"),
    }
}

/*============================================================
=                            CLEAN                           =
============================================================*/

fn clean(
    comments_file: &PathBuf,
    submissions_file: &PathBuf,
    output_dir: &PathBuf,
    config: &CleanConfig,
) -> Result<(), Error> {
    let start_main = Instant::now();
    info!("Loading data...");
    let comments = load_table(comments_file);
    let submissions = load_table(submissions_file);

    let Some(output) = clean_tables(&comments, &submissions, config)? else {
        println!("No data loaded. Exiting.");
        return Ok(());
    };
    print_step_stats("comments", start_main, &output.comment_stats);
    print_step_stats("submissions", start_main, &output.submission_stats);

    let comments_out = output_path(comments_file, output_dir, "filtered")?;
    let submissions_out = output_path(submissions_file, output_dir, "filtered")?;
    write_table(&output.comments, &comments_out)?;
    write_table(&output.submissions, &submissions_out)?;
    println!("Filtered comments saved to {:?}", comments_out);
    println!("Filtered submissions saved to {:?}", submissions_out);
    Ok(())
}

/*============================================================
=                            ANONYMIZE                       =
============================================================*/

fn anonymize(
    comments_file: &Option<PathBuf>,
    submissions_file: &Option<PathBuf>,
    output_dir: &PathBuf,
    salt: &str,
) -> Result<(), Error> {
    let anonymizer = Anonymizer::new(salt);
    if let Some(path) = comments_file {
        let comments = try_load_table(path)?;
        let out = output_dir.join(format!("anonymized_comments.{}", extension_of(path)));
        write_table(&anonymizer.anonymize_comments(&comments), &out)?;
        println!("Anonymized comments saved to {:?}", out);
    }
    if let Some(path) = submissions_file {
        let submissions = try_load_table(path)?;
        let out = output_dir.join(format!("anonymized_submissions.{}", extension_of(path)));
        write_table(&anonymizer.anonymize_submissions(&submissions), &out)?;
        println!("Anonymized submissions saved to {:?}", out);
    }
    Ok(())
}

/*============================================================
=                            GENERAL MAP                     =
============================================================*/

fn gen_map(input: &PathBuf, output: &PathBuf, config: &PathBuf) -> Result<(), Error> {
    /* Generic mapping/filtration over one table.

    Applies the pipeline in the config to `input` and writes the surviving rows to `output`
    */
    let start_main = Instant::now();
    let json_config = parse_config(config)?;
    let processor = PipelineProcessor::new(&json_config)?;
    let table = try_load_table(input)?;

    let (table, stats) = processor.process(&table);
    write_table(&table, output)?;
    print_step_stats("map", start_main, &stats);
    Ok(())
}

/*============================================================
=                            MAIN                            =
============================================================*/

fn main() -> Result<(), Error> {
    let args = ArgParser::parse();
    let threads = args.threads;
    if threads != 0 {
        std::env::set_var("RAYON_NUM_THREADS", threads.to_string());
    }

    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match &args.command {
        Commands::Clean {
            comments_file,
            submissions_file,
            output_dir,
            config,
            min_score,
            min_comment_words,
            idioms,
            filter_edited,
            filter_language,
            target_language,
            anonymize,
            topic_filter,
            salt,
        } => {
            let mut clean_config = match config {
                Some(path) => CleanConfig::from_file(path)?,
                None => CleanConfig::default(),
            };
            if let Some(v) = min_score {
                clean_config.min_score = *v;
            }
            if let Some(v) = min_comment_words {
                clean_config.min_comment_words = *v;
            }
            if let Some(v) = idioms {
                clean_config.idioms = v.clone();
            }
            if let Some(v) = target_language {
                clean_config.target_language = v.clone();
            }
            if let Some(v) = salt {
                clean_config.salt = v.clone();
            }
            clean_config.filter_edited |= *filter_edited;
            clean_config.filter_language |= *filter_language;
            clean_config.anonymize |= *anonymize;
            clean_config.topic_filter |= *topic_filter;
            clean(comments_file, submissions_file, output_dir, &clean_config)
        }
        Commands::Anonymize {
            comments_file,
            submissions_file,
            output_dir,
            salt,
        } => {
            let salt = salt.clone().unwrap_or_else(|| DEFAULT_SALT.to_string());
            anonymize(comments_file, submissions_file, output_dir, &salt)
        }
        Commands::Map { input, output, config } => {
            gen_map(input, output, config).with_context(|| format!("Map over {:?} failed", input))
        }
    }
}
