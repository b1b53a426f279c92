//! grava: generate CNC/laser pixel-art fabrication geometry from images.
//!
//! Reads an ordered list of variant configurations from a JSON array
//! and runs every configuration against every input image. Each
//! (configuration, image) pair yields one DXF document; the stick
//! variant additionally yields a cut-length manifest and logs the total
//! raw stick length for material estimation.
//!
//! One artifact's failure is reported and counted but never aborts the
//! remaining artifacts; the exit code is non-zero iff anything failed.
//!
//! # Usage
//!
//! ```text
//! grava --configuration variants.json input1.png input2.jpg
//! ```

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use grava_pipeline::{Configuration, Geometry, raster};

/// Generate CNC/laser pixel-art fabrication geometry (DXF) from images.
#[derive(Parser)]
#[command(name = "grava", version)]
struct Cli {
    /// Input images (PNG, JPEG, BMP, WebP).
    #[arg(required = true)]
    input_files: Vec<PathBuf>,

    /// Variant configuration file: a JSON array of configurations.
    #[arg(short, long, default_value = "configuration.json")]
    configuration: PathBuf,

    /// Directory for generated artifacts.
    ///
    /// Defaults to each input image's own directory.
    #[arg(short, long)]
    output_dir: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let configurations = match load_configurations_from(&cli.configuration) {
        Ok(configurations) => configurations,
        Err(msg) => {
            eprintln!("{msg}");
            return ExitCode::FAILURE;
        }
    };
    if configurations.is_empty() {
        eprintln!(
            "{} contains no configurations",
            cli.configuration.display(),
        );
        return ExitCode::FAILURE;
    }

    let mut failures = 0usize;
    for input in &cli.input_files {
        let bytes = match std::fs::read(input) {
            Ok(bytes) => bytes,
            Err(e) => {
                eprintln!("Error reading {}: {e}", input.display());
                failures += configurations.len();
                continue;
            }
        };

        for configuration in &configurations {
            if let Err(msg) = generate_artifact(
                input,
                &bytes,
                configuration,
                cli.output_dir.as_deref(),
            ) {
                eprintln!(
                    "Error generating {} variant for {}: {msg}",
                    configuration.variant,
                    input.display(),
                );
                failures += 1;
            }
        }
    }

    if failures > 0 {
        eprintln!("{failures} artifact(s) failed");
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Read and parse the configuration file.
fn load_configurations_from(path: &Path) -> Result<Vec<Configuration>, String> {
    let json = std::fs::read_to_string(path)
        .map_err(|e| format!("Error reading {}: {e}", path.display()))?;
    grava_pipeline::config::load_configurations(&json)
        .map_err(|e| format!("Error in {}: {e}", path.display()))
}

/// Destination path for one artifact: `<stem>_<suffix>.<extension>`
/// beside the input image, or inside `output_dir` when given.
fn artifact_path(
    input: &Path,
    output_dir: Option<&Path>,
    suffix: &str,
    extension: &str,
) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    let file_name = format!("{stem}_{suffix}.{extension}");

    let dir = output_dir.map_or_else(
        || {
            input
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."))
                .to_path_buf()
        },
        Path::to_path_buf,
    );
    dir.join(file_name)
}

/// Run the pipeline and serializers for one (configuration, image) pair.
fn generate_artifact(
    input: &Path,
    bytes: &[u8],
    configuration: &Configuration,
    output_dir: Option<&Path>,
) -> Result<(), String> {
    let variant = configuration.variant.to_string();
    eprintln!(
        "generating {variant} variant for {} ({}x{} pixels at {} mm)",
        input.display(),
        configuration.width,
        configuration.height,
        configuration.mm_per_pixel,
    );

    let grid =
        raster::prepare(bytes, configuration.dimensions()).map_err(|e| e.to_string())?;
    let geometry = grava_pipeline::build(&grid, configuration).map_err(|e| e.to_string())?;

    let dxf_path = artifact_path(input, output_dir, &variant, "dxf");
    let dxf = match &geometry {
        Geometry::Circles(discs) => grava_export::to_dxf_circles(discs, configuration),
        Geometry::Bands(rows) => grava_export::to_dxf_bands(rows, configuration),
        Geometry::Sticks(set) => {
            let carve_offset = configuration
                .stick
                .map_or(0.0, |stick| stick.radius_carve_offset);
            grava_export::to_dxf_sticks(&set.sticks, carve_offset, configuration)
        }
    };
    grava_export::write_atomic(&dxf_path, &dxf).map_err(|e| e.to_string())?;
    eprintln!(" - wrote {}", dxf_path.display());

    if let Geometry::Sticks(set) = &geometry {
        let manifest_path = artifact_path(input, output_dir, "stick_length", "txt");
        let manifest = grava_export::to_stick_manifest(&set.sticks);
        grava_export::write_atomic(&manifest_path, &manifest).map_err(|e| e.to_string())?;
        eprintln!(" - wrote {}", manifest_path.display());
        println!(
            "total stick length for {}: {:.0} mm",
            input.display(),
            set.total_raw_length,
        );
    }

    Ok(())
}
