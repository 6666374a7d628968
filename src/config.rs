use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use galaxy_generator::{GalaxyError, GalaxyParameters, ParameterDomain};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("could not read parameter file {path:?}: {source}")]
    ReadParams {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("could not parse parameter file {path:?}: {source}")]
    ParseParams {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error(transparent)]
    Galaxy(#[from] GalaxyError),
}

/// Headless spiral galaxy generator. Reads parameter edits such as `count 2000` or
/// `inside_color #ff0000` from stdin, one per line, and regenerates once they settle.
#[derive(Parser, Debug, Clone)]
#[command(name = "spiral_galaxy")]
pub struct Cli {
    /// JSON parameter file; missing fields take their defaults
    #[arg(short, long)]
    pub params: Option<PathBuf>,

    /// Seed for the particle streams, random when omitted
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Quiet period after the last edit before regenerating
    #[arg(long, default_value_t = 250)]
    pub settle_ms: u64,

    /// Update loop frequency
    #[arg(long, default_value_t = 60.0)]
    pub tick_hz: f64,
}

impl Cli {
    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }

    pub fn tick(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.tick_hz.max(1.0))
    }

    pub fn load_parameters(&self) -> Result<GalaxyParameters, AppError> {
        let Some(path) = &self.params else {
            return Ok(GalaxyParameters::default());
        };
        let text = std::fs::read_to_string(path).map_err(|source| AppError::ReadParams {
            path: path.clone(),
            source,
        })?;
        parse_parameters(path, &text)
    }
}

/// Files are validated against the editor domain as written, never clamped.
fn parse_parameters(path: &Path, text: &str) -> Result<GalaxyParameters, AppError> {
    let params: GalaxyParameters =
        serde_json::from_str(text).map_err(|source| AppError::ParseParams {
            path: path.to_path_buf(),
            source,
        })?;
    params.validate(ParameterDomain::Editor)?;
    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_partial_file() {
        let params =
            parse_parameters(Path::new("galaxy.json"), r#"{ "branches": 5, "spin": -2.5 }"#)
                .unwrap();
        assert_eq!(params.branches, 5);
        assert_eq!(params.spin, -2.5);
        assert_eq!(params.count, GalaxyParameters::default().count);
    }

    #[test]
    fn rejects_out_of_domain_file() {
        let path = Path::new("galaxy.json");
        assert!(matches!(
            parse_parameters(path, r#"{ "branches": 0 }"#),
            Err(AppError::Galaxy(GalaxyError::InvalidParameter { field: "branches", .. }))
        ));
        assert!(matches!(
            parse_parameters(path, r#"{ "branches": "three" }"#),
            Err(AppError::ParseParams { .. })
        ));
    }

    #[test]
    fn missing_file_is_reported() {
        let cli = Cli::parse_from(["spiral_galaxy", "--params", "/nonexistent/galaxy.json"]);
        assert!(matches!(
            cli.load_parameters(),
            Err(AppError::ReadParams { .. })
        ));
    }

    #[test]
    fn cli_defaults() {
        let cli = Cli::parse_from(["spiral_galaxy"]);
        assert_eq!(cli.settle(), Duration::from_millis(250));
        assert_eq!(cli.seed, None);
        assert_eq!(cli.load_parameters().unwrap(), GalaxyParameters::default());
    }
}
