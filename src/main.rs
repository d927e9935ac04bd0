use rgb_denoiser::image::RgbImage;
use rgb_denoiser::{noise, DiffusionEngine, DiffusionParams, EngineOptions};

fn main() {
    // Demo stub: denoise a synthetic salt-and-pepper image and print timings
    let mut img = RgbImage::filled(640, 480, 128);
    noise::salt_and_pepper(&mut img, 0.05, 42);

    let engine = DiffusionEngine::new(DiffusionParams::new(0.5, 10), EngineOptions::default());
    match engine.run(&img) {
        Ok(outcome) => {
            let r = &outcome.report;
            println!(
                "{}x{} denoised in {:.3} ms ({} workers, {} iterations)",
                r.width, r.height, r.filter_ms, r.workers, r.iterations
            );
        }
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    }
}
