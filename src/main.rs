//! `glkit` command line: merge shader fragments and inspect camera placement.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use glam::Vec3;
use glkit::camera::RoamCamera;
use glkit::error::GlkitError;
use glkit::options::Options;
use glkit::shader::{merge_stage_sources, validate_glsl, ShaderStage};

#[derive(Parser)]
#[command(name = "glkit", about = "Shader and camera utilities")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Merge shader fragments for one stage the way programs do on attach.
    Merge {
        /// Pipeline stage; inferred from the first file extension if omitted.
        #[arg(long, value_parser = parse_stage)]
        stage: Option<ShaderStage>,
        /// Check the merged source with naga.
        #[arg(long)]
        validate: bool,
        /// Fragments in attach order.
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Place a roaming camera and print its orientation.
    Orient {
        /// TOML options file providing the camera limits.
        #[arg(long)]
        options: Option<PathBuf>,
        /// Eye position as `x,y,z`.
        #[arg(long, value_parser = parse_vec3, allow_hyphen_values = true)]
        eye: Vec3,
        /// Look-at target as `x,y,z`.
        #[arg(long, value_parser = parse_vec3, allow_hyphen_values = true)]
        center: Vec3,
        /// Extra yaw in degrees applied after looking at the target.
        #[arg(long, allow_hyphen_values = true)]
        yaw: Option<f32>,
        /// Extra pitch in degrees applied after looking at the target.
        #[arg(long, allow_hyphen_values = true)]
        pitch: Option<f32>,
    },
}

fn parse_stage(value: &str) -> Result<ShaderStage, String> {
    ShaderStage::from_name(value).ok_or_else(|| format!("unknown shader stage '{value}'"))
}

fn parse_vec3(value: &str) -> Result<Vec3, String> {
    let parts = value
        .split(',')
        .map(|part| part.trim().parse::<f32>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| format!("invalid vector '{value}': {e}"))?;
    match parts.as_slice() {
        &[x, y, z] => Ok(Vec3::new(x, y, z)),
        _ => Err(format!("expected three components in '{value}'")),
    }
}

fn stage_from_extension(path: &Path) -> Option<ShaderStage> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(ShaderStage::from_name)
}

fn merge(
    stage: Option<ShaderStage>,
    validate: bool,
    files: &[PathBuf],
) -> Result<(), GlkitError> {
    let stage = stage
        .or_else(|| files.first().and_then(|path| stage_from_extension(path)))
        .unwrap_or(ShaderStage::Vertex);

    let mut merged: Option<String> = None;
    for path in files {
        let source = std::fs::read_to_string(path)?;
        log::debug!("read {} ({} bytes)", path.display(), source.len());
        merged = Some(match merged {
            Some(existing) => merge_stage_sources(&existing, &source),
            None => source,
        });
    }
    let merged = merged.unwrap_or_default();

    if validate {
        validate_glsl(stage, &merged)?;
        log::info!("merged {stage} shader passed validation");
    }

    let mut out = std::io::stdout().lock();
    writeln!(out, "{merged}")?;
    Ok(())
}

fn orient(
    options: Option<&Path>,
    eye: Vec3,
    center: Vec3,
    yaw: Option<f32>,
    pitch: Option<f32>,
) -> Result<(), GlkitError> {
    let options = options.map_or_else(|| Ok(Options::default()), Options::load)?;
    let mut camera = RoamCamera::from_options(&options.camera)?;

    camera.look_at(eye, center);
    if let Some(yaw) = yaw {
        camera.rotate_yaw(yaw);
    }
    if let Some(pitch) = pitch {
        camera.rotate_pitch(pitch);
    }

    let (yaw, pitch, roll) = camera.yaw_pitch_roll();
    let mut out = std::io::stdout().lock();
    writeln!(out, "yaw   {yaw:.3}")?;
    writeln!(out, "pitch {pitch:.3}")?;
    writeln!(out, "roll  {roll:.3}")?;
    for row in 0..4 {
        let row = camera.matrix().row(row);
        writeln!(
            out,
            "[{:9.4} {:9.4} {:9.4} {:9.4}]",
            row.x, row.y, row.z, row.w
        )?;
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Merge {
            stage,
            validate,
            files,
        } => merge(stage, validate, &files),
        Command::Orient {
            options,
            eye,
            center,
            yaw,
            pitch,
        } => orient(options.as_deref(), eye, center, yaw, pitch),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
