use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use agro_leaf_rust_lib::config::Config;
use agro_leaf_rust_lib::crop_advice::{recommend_crop, SoilConditions};
use agro_leaf_rust_lib::image_io::get_image_files_in_dir;
use agro_leaf_rust_lib::output::write_diagnosis_csv;
use agro_leaf_rust_lib::pipeline::{process_file, process_files, DiagnosisReport};
use agro_leaf_rust_lib::ClassifierContext;

/// Command-line arguments
#[derive(Parser, Debug)]
#[clap(author, version, about = "AgroLeaf - Colour-based plant disease diagnosis")]
struct Args {
    /// Enable debug logging
    #[clap(short, long, global = true)]
    debug: bool,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Diagnose a leaf image or every image in a directory
    Diagnose {
        /// Path to input file or directory
        #[clap(short, long)]
        input: Option<String>,

        /// Path to output directory
        #[clap(short, long)]
        output: Option<String>,

        /// Path to configuration file
        #[clap(short, long, default_value = "config.toml")]
        config: String,

        /// Process files one after another
        #[clap(long)]
        sequential: bool,

        /// Print reports as JSON instead of a summary line
        #[clap(long)]
        json: bool,
    },

    /// Recommend a crop and fertilizer plan from soil readings
    Recommend {
        #[clap(long)]
        nitrogen: f64,
        #[clap(long)]
        phosphorus: f64,
        #[clap(long)]
        potassium: f64,
        /// Degrees Celsius
        #[clap(long)]
        temperature: f64,
        /// Percent relative humidity
        #[clap(long)]
        humidity: f64,
        #[clap(long)]
        ph: f64,
        /// Millimetres
        #[clap(long)]
        rainfall: f64,

        #[clap(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_filter = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();

    match args.command {
        Command::Diagnose { input, output, config, sequential, json } => {
            run_diagnose(input, output, &config, sequential, json)
        }
        Command::Recommend {
            nitrogen,
            phosphorus,
            potassium,
            temperature,
            humidity,
            ph,
            rainfall,
            json,
        } => {
            let conditions = SoilConditions {
                nitrogen,
                phosphorus,
                potassium,
                temperature,
                humidity,
                ph,
                rainfall,
            };
            run_recommend(&conditions, json)
        }
    }
}

fn run_diagnose(
    input: Option<String>,
    output: Option<String>,
    config_path: &str,
    sequential: bool,
    json: bool,
) -> Result<()> {
    let mut config = Config::load_or_default(config_path)
        .with_context(|| format!("Failed to load configuration from {}", config_path))?;

    // Override config with command-line arguments
    if let Some(input) = input {
        config.input_path = input;
    }
    if let Some(output) = output {
        config.output_base_dir = output;
    }
    if sequential {
        config.use_parallel = false;
    }

    config.validate()?;
    config.prepare_paths()?;

    let context = ClassifierContext::from_config(&config);
    let start_time = Instant::now();
    let input_path = PathBuf::from(&config.input_path);

    let reports: Vec<DiagnosisReport> = if input_path.is_file() {
        log::info!("Processing single file: {}", input_path.display());
        let report = process_file(&input_path, &context, &config)
            .with_context(|| format!("Failed to diagnose {}", input_path.display()))?;
        vec![report]
    } else if input_path.is_dir() {
        log::info!("Processing directory: {}", input_path.display());
        let files = get_image_files_in_dir(&input_path, &config.allowed_extensions)?;
        log::info!("Found {} image files", files.len());

        process_files(&files, &context, &config)
            .into_iter()
            .filter_map(|(path, result)| match result {
                Ok(report) => Some(report),
                Err(e) => {
                    log::error!("Error processing {}: {}", path.display(), e);
                    None
                }
            })
            .collect()
    } else {
        bail!("Input path does not exist: {}", input_path.display());
    };

    for report in &reports {
        if json {
            println!("{}", serde_json::to_string_pretty(report)?);
        } else {
            println!(
                "{}: {} ({:.2}%, severity {})",
                report.filename, report.disease, report.confidence, report.severity
            );
        }
    }

    let csv_path = write_diagnosis_csv(&reports, &config.output_base_dir)?;
    let degraded = reports.iter().filter(|r| r.is_degraded()).count();

    log::info!(
        "Diagnosed {} images ({} degraded) in {:.2} seconds, summary at {}",
        reports.len(),
        degraded,
        start_time.elapsed().as_secs_f64(),
        csv_path.display()
    );

    Ok(())
}

fn run_recommend(conditions: &SoilConditions, json: bool) -> Result<()> {
    let recommendation = recommend_crop(conditions);

    if json {
        println!("{}", serde_json::to_string_pretty(&recommendation)?);
        return Ok(());
    }

    let plan = &recommendation.fertilizer;
    println!("Recommended crop: {} ({:.0}%)", recommendation.crop, recommendation.confidence);
    println!("{}", recommendation.reason);
    println!();
    println!("Fertilizer:     {} (NPK {})", plan.primary_fertilizer, plan.npk_ratio);
    println!("Rate:           {}", plan.application_rate);
    println!("Timing:         {}", plan.timing);
    println!("Organic option: {}", plan.organic_alternative);
    println!("Micronutrients: {}", plan.micronutrients);
    println!("Notes:          {}", plan.notes);

    Ok(())
}
