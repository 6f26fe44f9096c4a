use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use log::{info, warn};

use slabfit::config::SlabFitConfig;
use slabfit::io::cli::{Cli, QuoteMode};
use slabfit::io::output::{CombinedOutput, ExtEstimate, ExtGroupQuote, UniformOutput};
use slabfit::io::{read_config, read_job};
use slabfit::quote::{estimate_all_uniform, optimize_together};
use slabfit::{EPOCH, io};
use slabpack::io::ext_repr::ExtJob;
use slabpack::io::svg::slab_to_svg;

fn main() -> Result<()> {
    let args = Cli::parse();
    io::init_logger(args.log_level)?;

    let config = match args.config_file {
        None => {
            warn!("[MAIN] No config file provided, use --config-file to provide a custom config");
            SlabFitConfig::default()
        }
        Some(config_file) => read_config(&config_file)?,
    };

    info!("Successfully parsed SlabFitConfig: {config:?}");

    let input_file_stem = args
        .input_file
        .file_stem()
        .and_then(|s| s.to_str())
        .with_context(|| format!("invalid input file name: {}", args.input_file.display()))?;

    if !args.solution_folder.exists() {
        fs::create_dir_all(&args.solution_folder).with_context(|| {
            format!(
                "could not create solution folder: {}",
                args.solution_folder.display()
            )
        })?;
    }

    let job = read_job(args.input_file.as_path())?;
    info!(
        "[MAIN] job \"{}\": {} products, {} stocks",
        job.name,
        job.products.len(),
        job.stocks.len()
    );

    match args.mode {
        QuoteMode::Uniform => main_uniform(job, config, input_file_stem, &args.solution_folder)?,
        QuoteMode::Combined => main_combined(job, config, input_file_stem, &args.solution_folder)?,
    }

    info!("[MAIN] finished in {:.3}s", EPOCH.elapsed().as_secs_f64());
    Ok(())
}

fn main_uniform(job: ExtJob, config: SlabFitConfig, input_stem: &str, output_folder: &Path) -> Result<()> {
    let estimates = estimate_all_uniform(&job, &config);
    for (idx, estimate) in estimates.iter().enumerate() {
        if let Err(e) = estimate {
            warn!("[MAIN] product {idx} could not be estimated: {e:#}");
        }
    }

    let output = UniformOutput {
        estimates: estimates
            .iter()
            .enumerate()
            .map(|(idx, e)| ExtEstimate::new(idx, e))
            .collect(),
        job,
        config,
    };

    let solution_path = output_folder.join(format!("sol_{input_stem}.json"));
    io::write_json(&output, &solution_path)
}

fn main_combined(job: ExtJob, config: SlabFitConfig, input_stem: &str, output_folder: &Path) -> Result<()> {
    let quotes = optimize_together(&job, &config);

    for (stock_id, quote) in quotes.iter() {
        let Ok(quote) = quote else { continue };
        for slab in quote.result.slabs.iter() {
            let svg_path = output_folder.join(format!("sol_{input_stem}_{stock_id}_{}.svg", slab.idx));
            let svg = slab_to_svg(slab, quote.result.kerf, config.svg_draw_options, stock_id);

            io::write_svg(&svg, &svg_path)?;
        }
    }

    let output = CombinedOutput {
        groups: quotes
            .iter()
            .map(|(stock_id, quote)| ExtGroupQuote::new(stock_id, quote))
            .collect(),
        job,
        config,
    };

    let solution_path = output_folder.join(format!("sol_{input_stem}.json"));
    io::write_json(&output, &solution_path)
}
