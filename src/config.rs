//! Command-line configuration for the denoising binaries.
//!
//! Positional arguments follow the classic filter-tool shape
//! (`<input> <output> ...`); optional flags select the execution strategy.
//! Numbers that fail to parse are configuration errors, never silently
//! replaced with defaults.
use std::path::PathBuf;
use std::thread;

use crate::engine::EngineOptions;
use crate::kernel::DiffusionParams;

/// Configuration of the diffusion CLI.
#[derive(Clone, Debug)]
pub struct DiffusionCli {
    pub input: PathBuf,
    pub output: PathBuf,
    pub params: DiffusionParams,
    pub options: EngineOptions,
    pub report_path: Option<PathBuf>,
}

/// Configuration of the median CLI.
#[derive(Clone, Debug)]
pub struct MedianCli {
    pub input: PathBuf,
    pub output: PathBuf,
    pub serial: bool,
}

/// Configuration of the noise-injection CLI.
#[derive(Clone, Debug)]
pub struct NoiseCli {
    pub input: PathBuf,
    pub output: PathBuf,
    pub probability: f32,
    pub seed: u64,
}

pub fn diffusion_usage(program: &str) -> String {
    format!(
        "Usage: {program} <input> <output> <alpha> <iterations> [--workers N] [--threads N] [--report FILE]"
    )
}

pub fn median_usage(program: &str) -> String {
    format!("Usage: {program} <input> <output> [--serial]")
}

pub fn noise_usage(program: &str) -> String {
    format!("Usage: {program} <input> <output> <probability> [--seed N]")
}

/// Parse the diffusion CLI arguments (`args` excludes the program name).
pub fn parse_diffusion_args(program: &str, args: &[String]) -> Result<DiffusionCli, String> {
    let (positional, flags) = split_flags(args)?;
    if positional.len() != 4 {
        return Err(diffusion_usage(program));
    }

    let alpha: f32 = positional[2]
        .parse()
        .map_err(|_| format!("Invalid alpha '{}': expected a number in (0, 1]", positional[2]))?;
    let iterations: usize = positional[3].parse().map_err(|_| {
        format!(
            "Invalid iteration count '{}': expected a positive integer",
            positional[3]
        )
    })?;

    let params = DiffusionParams::new(alpha, iterations);
    params.validate()?;

    let mut options = EngineOptions {
        workers: default_workers(),
        threads_per_worker: 0,
    };
    let mut report_path = None;
    for (flag, value) in flags {
        match flag.as_str() {
            "--workers" => options.workers = parse_count(&flag, &value)?,
            "--threads" => options.threads_per_worker = parse_count(&flag, &value)?,
            "--report" => report_path = Some(PathBuf::from(value)),
            other => return Err(format!("Unknown flag '{other}'\n{}", diffusion_usage(program))),
        }
    }
    options.validate()?;

    Ok(DiffusionCli {
        input: PathBuf::from(&positional[0]),
        output: PathBuf::from(&positional[1]),
        params,
        options,
        report_path,
    })
}

/// Parse the median CLI arguments.
pub fn parse_median_args(program: &str, args: &[String]) -> Result<MedianCli, String> {
    let mut serial = false;
    let mut positional = Vec::new();
    for arg in args {
        match arg.as_str() {
            "--serial" => serial = true,
            other if other.starts_with("--") => {
                return Err(format!("Unknown flag '{other}'\n{}", median_usage(program)))
            }
            _ => positional.push(arg.clone()),
        }
    }
    if positional.len() != 2 {
        return Err(median_usage(program));
    }
    Ok(MedianCli {
        input: PathBuf::from(&positional[0]),
        output: PathBuf::from(&positional[1]),
        serial,
    })
}

/// Parse the noise CLI arguments.
pub fn parse_noise_args(program: &str, args: &[String]) -> Result<NoiseCli, String> {
    let (positional, flags) = split_flags(args)?;
    if positional.len() != 3 {
        return Err(noise_usage(program));
    }
    let probability: f32 = positional[2].parse().map_err(|_| {
        format!(
            "Invalid probability '{}': expected a number in [0, 1]",
            positional[2]
        )
    })?;
    if !(0.0..=1.0).contains(&probability) {
        return Err(format!(
            "Noise probability must be between 0 and 1, got {probability}"
        ));
    }
    let mut seed = 0u64;
    for (flag, value) in flags {
        match flag.as_str() {
            "--seed" => {
                seed = value
                    .parse()
                    .map_err(|_| format!("Invalid seed '{value}': expected an integer"))?
            }
            other => return Err(format!("Unknown flag '{other}'\n{}", noise_usage(program))),
        }
    }
    Ok(NoiseCli {
        input: PathBuf::from(&positional[0]),
        output: PathBuf::from(&positional[1]),
        probability,
        seed,
    })
}

fn default_workers() -> usize {
    thread::available_parallelism().map(|n| n.get()).unwrap_or(1)
}

fn parse_count(flag: &str, value: &str) -> Result<usize, String> {
    value
        .parse()
        .map_err(|_| format!("Invalid value '{value}' for {flag}: expected a positive integer"))
}

/// Split `args` into positional arguments and `(--flag, value)` pairs.
fn split_flags(args: &[String]) -> Result<(Vec<String>, Vec<(String, String)>), String> {
    let mut positional = Vec::new();
    let mut flags = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg.starts_with("--") {
            let value = iter
                .next()
                .ok_or_else(|| format!("Flag '{arg}' expects a value"))?;
            flags.push((arg.clone(), value.clone()));
        } else {
            positional.push(arg.clone());
        }
    }
    Ok((positional, flags))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn diffusion_args_parse_positionals_and_flags() {
        let cli = parse_diffusion_args(
            "graph_denoise",
            &strings(&["in.png", "out.png", "0.5", "10", "--workers", "4", "--threads", "2"]),
        )
        .unwrap();
        assert_eq!(cli.params.alpha, 0.5);
        assert_eq!(cli.params.iterations, 10);
        assert_eq!(cli.options.workers, 4);
        assert_eq!(cli.options.threads_per_worker, 2);
    }

    #[test]
    fn unparsable_numbers_are_rejected_not_defaulted() {
        assert!(parse_diffusion_args(
            "graph_denoise",
            &strings(&["in.png", "out.png", "fast", "10"])
        )
        .is_err());
        assert!(parse_diffusion_args(
            "graph_denoise",
            &strings(&["in.png", "out.png", "0.5", "many"])
        )
        .is_err());
    }

    #[test]
    fn out_of_range_parameters_are_rejected() {
        assert!(parse_diffusion_args(
            "graph_denoise",
            &strings(&["in.png", "out.png", "1.5", "10"])
        )
        .is_err());
        assert!(parse_diffusion_args(
            "graph_denoise",
            &strings(&["in.png", "out.png", "0.5", "0"])
        )
        .is_err());
    }

    #[test]
    fn wrong_argument_count_yields_usage() {
        let err = parse_diffusion_args("graph_denoise", &strings(&["in.png"])).unwrap_err();
        assert!(err.starts_with("Usage:"));
    }

    #[test]
    fn median_args_accept_serial_flag() {
        let cli = parse_median_args("median_denoise", &strings(&["a.png", "b.png", "--serial"]))
            .unwrap();
        assert!(cli.serial);
    }

    #[test]
    fn noise_probability_is_range_checked() {
        assert!(parse_noise_args("add_noise", &strings(&["a.png", "b.png", "1.5"])).is_err());
        let cli =
            parse_noise_args("add_noise", &strings(&["a.png", "b.png", "0.1", "--seed", "9"]))
                .unwrap();
        assert_eq!(cli.seed, 9);
    }
}
