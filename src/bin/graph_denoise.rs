use rgb_denoiser::config;
use rgb_denoiser::image::io::{load_rgb_image, save_rgb_image, write_json_file};
use rgb_denoiser::DiffusionEngine;
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
    let program = args.next().unwrap_or_else(|| "graph_denoise".to_string());
    let args: Vec<String> = args.collect();
    let cli = config::parse_diffusion_args(&program, &args)?;

    let input = load_rgb_image(&cli.input)?;
    let engine = DiffusionEngine::new(cli.params, cli.options);
    let outcome = engine.run(&input)?;
    save_rgb_image(&outcome.image, &cli.output)?;

    if let Some(path) = &cli.report_path {
        write_json_file(path, &outcome.report)?;
    }

    let r = &outcome.report;
    println!(
        "Diffusion pass completed in {:.4} seconds ({} workers x {} threads, {} iterations).",
        r.filter_ms / 1000.0,
        r.workers,
        r.threads_per_worker.max(1),
        r.iterations
    );
    println!(
        "Total execution time {:.4} seconds.",
        t_total.elapsed().as_secs_f64()
    );
    Ok(())
}
