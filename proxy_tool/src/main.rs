//! Collision proxy tool
//!
//! Reads a robot scene file, builds collision proxies for the selected
//! visual objects and writes the resulting scene.

use anyhow::{bail, Context, Result};
use clap::{Arg, ArgAction, Command};
use std::path::{Path, PathBuf};

use collision_proxy::foundation::logging;
use collision_proxy::prelude::*;
use collision_proxy::scene::{load_scene, save_scene};

const DEFAULT_SHAPE: &str = "box";

#[derive(Debug)]
struct ToolConfig {
    scene_path: PathBuf,
    output_path: PathBuf,
    geometry_type: GeometryType,
    select: Vec<String>,
    proxy_config: ProxyConfig,
}

fn main() -> Result<()> {
    let matches = Command::new("proxy_tool")
        .about("Creates collision objects (box, cylinder, sphere, capsule) for visual objects of a robot scene")
        .arg(
            Arg::new("scene")
                .value_name("SCENE")
                .help("Scene file to read (.ron or .toml)")
                .required(true),
        )
        .arg(
            Arg::new("shape")
                .short('s')
                .long("shape")
                .value_name("KIND")
                .help("Collision geometry: box, cylinder, sphere, capsule or mesh")
                .default_value(DEFAULT_SHAPE),
        )
        .arg(
            Arg::new("select")
                .long("select")
                .value_name("NAME")
                .help("Select an object by name (repeatable); defaults to the selection stored in the scene")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Proxy settings (.ron or .toml)"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .help("Where to write the resulting scene (defaults to <scene>_collision.<ext>)"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Log sizing details")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    logging::init(if matches.get_flag("verbose") { "debug" } else { "info" });

    let scene_path = PathBuf::from(
        matches
            .get_one::<String>("scene")
            .context("Missing scene file")?,
    );
    let shape = matches
        .get_one::<String>("shape")
        .map_or(DEFAULT_SHAPE, String::as_str);
    let proxy_config = match matches.get_one::<String>("config") {
        Some(path) => ProxyConfig::load_from_file(path)
            .with_context(|| format!("Failed to load config {path}"))?,
        None => ProxyConfig::default(),
    };

    let config = ToolConfig {
        output_path: matches
            .get_one::<String>("output")
            .map_or_else(|| default_output(&scene_path), PathBuf::from),
        scene_path,
        geometry_type: shape.parse().context("Invalid --shape")?,
        select: matches
            .get_many::<String>("select")
            .map(|names| names.cloned().collect())
            .unwrap_or_default(),
        proxy_config,
    };

    run(&config)
}

fn run(config: &ToolConfig) -> Result<()> {
    log::info!("Loading scene {}", config.scene_path.display());
    let mut scene = load_scene(&config.scene_path)
        .with_context(|| format!("Failed to load scene {}", config.scene_path.display()))?;

    if !config.select.is_empty() {
        let ids = config
            .select
            .iter()
            .map(|name| {
                scene
                    .find_by_name(name)
                    .with_context(|| format!("No object named '{name}' in the scene"))
            })
            .collect::<Result<Vec<_>>>()?;
        scene.select_objects(&ids, true, Some(0));
    }

    let command = CreateCollisionObjects::new(config.geometry_type)
        .with_config(config.proxy_config.clone());
    let report = match command.run(&mut scene) {
        Ok(report) => report,
        Err(ProxyError::NotEnoughInputs) => {
            log::error!("CreateCollisions Error: {}", ProxyError::NotEnoughInputs);
            bail!("no visual objects selected");
        }
        Err(err) => return Err(err).context("Collision proxy generation failed"),
    };

    for record in &report.created {
        if let (Some(source), Some(proxy)) = (scene.get(record.source), scene.get(record.proxy)) {
            println!("{} -> {} ({})", source.name, proxy.name, report.geometry_type);
        }
    }
    for id in &report.unsupported {
        if let Some(source) = scene.get(*id) {
            println!("{}: {} not supported", source.name, report.geometry_type);
        }
    }

    save_scene(&scene, &config.output_path)
        .with_context(|| format!("Failed to write scene {}", config.output_path.display()))?;
    log::info!("Wrote {}", config.output_path.display());
    Ok(())
}

/// `robot.ron` becomes `robot_collision.ron`
fn default_output(scene_path: &Path) -> PathBuf {
    let stem = scene_path
        .file_stem()
        .map_or_else(|| "scene".to_string(), |stem| stem.to_string_lossy().into_owned());
    let extension = scene_path
        .extension()
        .map_or_else(|| "ron".to_string(), |ext| ext.to_string_lossy().into_owned());
    scene_path.with_file_name(format!("{stem}_collision.{extension}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_keeps_extension() {
        assert_eq!(
            default_output(Path::new("models/robot.toml")),
            PathBuf::from("models/robot_collision.toml")
        );
        assert_eq!(default_output(Path::new("robot")), PathBuf::from("robot_collision.ron"));
    }
}
