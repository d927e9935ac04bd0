use rgb_denoiser::config;
use rgb_denoiser::image::io::{load_rgb_image, save_rgb_image};
use rgb_denoiser::noise::salt_and_pepper;
use std::env;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let mut args = env::args();
    let program = args.next().unwrap_or_else(|| "add_noise".to_string());
    let args: Vec<String> = args.collect();
    let cli = config::parse_noise_args(&program, &args)?;

    let mut image = load_rgb_image(&cli.input)?;
    salt_and_pepper(&mut image, cli.probability, cli.seed);
    save_rgb_image(&image, &cli.output)?;

    println!("Salt-and-pepper noise added successfully.");
    Ok(())
}
