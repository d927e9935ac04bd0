use rgb_denoiser::config;
use rgb_denoiser::image::io::{load_rgb_image, save_rgb_image};
use rgb_denoiser::median::{median_filter_rgb, median_filter_rgb_parallel};
use std::env;
use std::time::Instant;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let t_total = Instant::now();

    let mut args = env::args();
    let program = args.next().unwrap_or_else(|| "median_denoise".to_string());
    let args: Vec<String> = args.collect();
    let cli = config::parse_median_args(&program, &args)?;

    let input = load_rgb_image(&cli.input)?;

    let t_filter = Instant::now();
    let output = if cli.serial {
        median_filter_rgb(&input)
    } else {
        median_filter_rgb_parallel(&input)
    };
    let filter_s = t_filter.elapsed().as_secs_f64();

    save_rgb_image(&output, &cli.output)?;

    println!("Median pass completed in {filter_s:.4} seconds.");
    println!(
        "Total execution time {:.4} seconds.",
        t_total.elapsed().as_secs_f64()
    );
    Ok(())
}
