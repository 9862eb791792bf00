// Copyright (c) 2024-2025 Fulcrum Genomics LLC
// SPDX-License-Identifier: MIT

//! ferro-overlap CLI
//!
//! Command-line interface for CDS coordinate extraction and gene overlap.

use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use ferro_overlap::cli::{
    batch_exit_code, is_local_path, output_error, output_feature, output_ids, output_overlap,
    OutputFormat,
};
use ferro_overlap::client::{EnaClient, UniprotClient};
use ferro_overlap::config::FerroConfig;
use ferro_overlap::sequence::write_fasta;
use ferro_overlap::source::{flanked_sequences, FeatureSource};
use ferro_overlap::{parse_file, FerroError, GenomicFeature, OverlapReport};
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "ferro-overlap")]
#[command(author, version, about = "CDS coordinate extraction and opposite-strand gene overlap")]
#[command(long_about = "Extract CDS coordinates from ENA XML and detect overlapping genes.

Examples:
  ferro-overlap parse data/ena/comp.xml
  ferro-overlap fetch AAC21905
  ferro-overlap overlap --left AAC21905 --right AAC21906
  ferro-overlap uniprot-ids P43699
  ferro-overlap sequences P43699 --extension 500 -o cds.fasta")]
struct Cli {
    /// Configuration file (default: .ferro-overlap.toml, then ~/.config/ferro/overlap.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short = 'f', long, global = true, default_value = "text", value_parser = ["text", "json"])]
    format: String,

    /// Log filter (e.g. warn, info, ferro_overlap=debug)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Skip TLS certificate verification for ENA/UniProt requests
    #[arg(long, global = true)]
    insecure: bool,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print (start, end, is_complement) for local ENA XML files
    Parse {
        /// ENA XML files
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Print (start, end, is_complement) for ENA accessions
    Fetch {
        /// ENA accessions (e.g. AAC21905)
        #[arg(required = true)]
        accessions: Vec<String>,
    },

    /// Count positions shared by two CDS features on opposite strands
    Overlap {
        /// Left feature: ENA XML file or accession
        #[arg(long)]
        left: String,

        /// Right feature: ENA XML file or accession
        #[arg(long)]
        right: String,
    },

    /// List genomic DNA protein sequence ids of a UniProt entry
    UniprotIds {
        /// UniProt accession (e.g. P43699)
        uniprot_id: String,

        /// Print EMBL id / protein id pairs instead
        #[arg(long)]
        embl: bool,
    },

    /// Write the CDS of every genomic DNA cross-reference of UniProt entries as FASTA
    Sequences {
        /// UniProt accessions (e.g. P43699)
        #[arg(required = true)]
        uniprot_ids: Vec<String>,

        /// Bases kept past the end of each CDS (before its start on the reverse strand)
        #[arg(long, default_value_t = 0)]
        extension: u64,

        /// Output FASTA file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_tracing(&cli.log_level) {
        eprintln!("{}", e);
        return ExitCode::from(2);
    }

    match run(cli) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("Error: {}", e.detailed_message());
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<u8, FerroError> {
    let format: OutputFormat = cli.format.parse().unwrap_or_default();
    let file_config = match &cli.config {
        Some(path) => FerroConfig::load_from_path(path)?,
        None => FerroConfig::load().unwrap_or_default(),
    };
    let client_config = file_config
        .merge_with_cli(cli.insecure, cli.timeout)
        .to_client_config();
    debug!(?client_config, "resolved client configuration");

    let stdout = io::stdout();
    let stderr = io::stderr();
    let mut out = stdout.lock();
    let mut err = stderr.lock();

    let code = match cli.command {
        Commands::Parse { files } => {
            let mut failed = 0;
            for file in &files {
                let input = file.display().to_string();
                match parse_file(file) {
                    Ok(feature) => output_feature(&mut out, &input, feature.as_ref(), format)?,
                    Err(e) => {
                        failed += 1;
                        output_error(&mut err, &input, &e, format)?;
                    }
                }
            }
            batch_exit_code(files.len(), failed)
        }
        Commands::Fetch { accessions } => {
            let client = EnaClient::new(&client_config)?;
            let results = ferro_overlap::extract_all(&client, &accessions);
            let mut failed = 0;
            for (accession, result) in &results {
                match result {
                    Ok(feature) => output_feature(&mut out, accession, feature.as_ref(), format)?,
                    Err(e) => {
                        failed += 1;
                        output_error(&mut err, accession, e, format)?;
                    }
                }
            }
            batch_exit_code(results.len(), failed)
        }
        Commands::Overlap { left, right } => {
            let client = EnaClient::new(&client_config)?;
            let left_feature = load_feature(&client, &left)?;
            let right_feature = load_feature(&client, &right)?;
            let report = OverlapReport::new(left, left_feature, right, right_feature);
            info!(overlap = report.overlap, "overlap computed");
            output_overlap(&mut out, &report, format)?;
            0
        }
        Commands::UniprotIds { uniprot_id, embl } => {
            let client = UniprotClient::new(&client_config)?;
            if embl {
                let pairs: Vec<String> = client
                    .get_embl_ids(&uniprot_id)?
                    .into_iter()
                    .map(|(embl_id, protein_id)| format!("{}\t{}", embl_id, protein_id))
                    .collect();
                output_ids(&mut out, &uniprot_id, &pairs, format)?;
            } else {
                let ids: Vec<String> = client.get_gen_dna_ids(&uniprot_id)?.into_iter().collect();
                output_ids(&mut out, &uniprot_id, &ids, format)?;
            }
            0
        }
        Commands::Sequences {
            uniprot_ids,
            extension,
            output,
        } => {
            let uniprot = UniprotClient::new(&client_config)?;
            let ena = EnaClient::new(&client_config)?;
            let mut records = Vec::new();
            let mut failed = 0;

            for uniprot_id in &uniprot_ids {
                info!(uniprot_id = %uniprot_id, "extracting sequences");
                let cross_refs = match uniprot.get_embl_ids(uniprot_id) {
                    Ok(cross_refs) => cross_refs,
                    Err(e) => {
                        failed += 1;
                        output_error(&mut err, uniprot_id, &e, format)?;
                        continue;
                    }
                };
                for (embl_id, result) in flanked_sequences(&ena, &cross_refs, extension) {
                    match result {
                        Ok(Some(record)) => records.push(record),
                        Ok(None) => debug!(embl_id = %embl_id, "no CDS sequence"),
                        Err(e) => output_error(&mut err, &embl_id, &e, format)?,
                    }
                }
            }

            match output {
                Some(path) => write_fasta(File::create(&path)?, &records)?,
                None => write_fasta(&mut out, &records)?,
            }
            batch_exit_code(uniprot_ids.len(), failed)
        }
    };

    out.flush()?;
    Ok(code as u8)
}

/// Read a feature from a local file if `arg` names one, else fetch it from ENA.
fn load_feature(client: &EnaClient, arg: &str) -> Result<Option<GenomicFeature>, FerroError> {
    if is_local_path(arg) {
        parse_file(arg)
    } else {
        client.feature(arg)
    }
}

fn init_tracing(level: &str) -> Result<(), Box<dyn std::error::Error>> {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter =
        EnvFilter::try_new(level).map_err(|e| format!("Invalid log level '{}': {}", level, e))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr))
        .init();

    Ok(())
}
