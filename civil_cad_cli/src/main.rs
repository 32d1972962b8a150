use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use cad_import::{read_point_file, ImportReport, PointFileFormat};
use civil_cad::{
    alignment::DesignCriteria,
    geometry::{convex_hull_edges, Point},
    items::Item,
    AlignmentPath, CurveType, ItemId, Scene, SceneConfig, SceneItem,
};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;

/// Headless driver for the civil CAD core.
#[derive(Parser)]
#[command(name = "civil_cad_cli", version)]
struct Cli {
    /// Scene configuration file (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum CurveArg {
    Circular,
    Clothoid,
}

impl From<CurveArg> for CurveType {
    fn from(arg: CurveArg) -> Self {
        match arg {
            CurveArg::Circular => CurveType::Circular,
            CurveArg::Clothoid => CurveType::Clothoid,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Import a point file into a point group.
    ImportPoints {
        input: PathBuf,
        #[arg(long, default_value = "pnezd")]
        format: PointFileFormat,
        /// Name of the point group
        #[arg(long)]
        name: Option<String>,
    },
    /// Build a surface from a point file and sample its elevation.
    Surface {
        input: PathBuf,
        #[arg(long, default_value = "csv")]
        format: PointFileFormat,
        /// Sample the surface at X Y (repeatable)
        #[arg(long, num_args = 2, value_names = ["X", "Y"], allow_negative_numbers = true)]
        at: Vec<f64>,
    },
    /// List the convex hull edges of a point file.
    Hull {
        input: PathBuf,
        #[arg(long, default_value = "pnezd")]
        format: PointFileFormat,
    },
    /// Build an alignment through the x,y vertices listed in a file.
    Alignment {
        input: PathBuf,
        /// Design speed for automatic curves
        #[arg(long)]
        speed: Option<f64>,
        #[arg(long, value_enum, default_value_t = CurveArg::Clothoid)]
        curve: CurveArg,
        /// Write the resulting path as JSON
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Print the curve design criteria for a design speed.
    DesignCriteria { speed: f64 },
    /// Sample a surface along an alignment.
    Profile {
        /// File of x,y alignment vertices
        alignment: PathBuf,
        /// Surface point file
        surface: PathBuf,
        #[arg(long, default_value = "csv")]
        format: PointFileFormat,
    },
}

#[derive(Serialize)]
struct ImportSummary<'a> {
    name: &'a str,
    points: usize,
    skipped: usize,
}

#[derive(Serialize)]
struct Sample {
    x: f64,
    y: f64,
    elevation: Option<f64>,
}

#[derive(Serialize)]
struct SurfaceSummary<'a> {
    name: &'a str,
    points: usize,
    triangles: usize,
    samples: Vec<Sample>,
}

#[derive(Serialize)]
struct AlignmentSummary<'a> {
    name: &'a str,
    segments: usize,
    length: f64,
}

#[derive(Serialize)]
struct ProfileRow {
    station: f64,
    elevation: f64,
}

fn init_logging() {
    if let Ok(path) = std::env::var("CIVIL_CAD_LOG") {
        match File::create(&path) {
            Ok(file) => {
                env_logger::Builder::from_default_env()
                    .target(env_logger::Target::Pipe(Box::new(file)))
                    .init();
            }
            Err(e) => {
                eprintln!("Failed to create log file {}: {}", path, e);
                env_logger::Builder::from_default_env().init();
            }
        }
    } else {
        env_logger::Builder::from_default_env().init();
    }
}

fn load_config(path: Option<&Path>) -> Result<SceneConfig, String> {
    match path {
        Some(p) => SceneConfig::from_json_file(p).map_err(|e| format!("Error reading {}: {}", p.display(), e)),
        None => Ok(SceneConfig::default()),
    }
}

fn read_points(path: &Path, format: PointFileFormat) -> Result<ImportReport, String> {
    let report = read_point_file(path, format).map_err(|e| format!("Error reading {}: {}", path.display(), e))?;
    for row in &report.skipped {
        eprintln!("Skipped line {}: {}", row.line, row.reason);
    }
    Ok(report)
}

/// Reads `x,y` (or whitespace separated) vertex pairs, one per line.
fn read_vertices(path: &Path) -> Result<Vec<Point>, String> {
    let text = fs::read_to_string(path).map_err(|e| format!("Error reading {}: {}", path.display(), e))?;
    let mut pts = Vec::new();
    for (i, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let fields: Vec<&str> = if line.contains(',') {
            line.split(',').map(str::trim).collect()
        } else {
            line.split_whitespace().collect()
        };
        let parsed: Option<Vec<f64>> = fields.iter().take(2).map(|f| f.parse().ok()).collect();
        match parsed.as_deref() {
            Some(&[x, y]) => pts.push(Point::new(x, y)),
            _ => return Err(format!("{} line {}: expected x,y", path.display(), i + 1)),
        }
    }
    Ok(pts)
}

fn polyline_path(vertices: &[Point]) -> Result<AlignmentPath, String> {
    let mut path = AlignmentPath::new();
    let Some((first, rest)) = vertices.split_first() else {
        return Err("alignment needs at least one vertex".to_string());
    };
    path.move_to(first.x, first.y).map_err(|e| e.to_string())?;
    for p in rest {
        path.line_to(p.x, p.y).map_err(|e| e.to_string())?;
    }
    Ok(path)
}

fn print_json<T: Serialize>(value: &T) -> Result<(), String> {
    let text = serde_json::to_string_pretty(value).map_err(|e| e.to_string())?;
    println!("{text}");
    Ok(())
}

/// Builds a surface by importing points and converting the group.
fn surface_scene(scene: &mut Scene, report: &ImportReport) -> Result<ItemId, String> {
    let group = scene.import_points(None, &report.records).map_err(|e| e.to_string())?;
    scene
        .convert_group_to_surface(group)
        .map_err(|e| format!("Cannot build surface: {e}"))
}

fn run(cli: Cli) -> Result<(), String> {
    let config = load_config(cli.config.as_deref())?;
    let mut scene = Scene::new(config, 800, 600);
    match cli.command {
        Commands::ImportPoints { input, format, name } => {
            let report = read_points(&input, format)?;
            let id = scene
                .import_points(name.as_deref(), &report.records)
                .map_err(|e| e.to_string())?;
            let group = scene.item(id).and_then(Item::as_point_group).ok_or("import failed")?;
            let name = item_name(&scene, id);
            let summary = ImportSummary {
                name: &name,
                points: group.len(),
                skipped: report.skipped.len(),
            };
            if cli.json {
                print_json(&summary)?;
            } else {
                println!(
                    "Imported {} points into '{}' ({} rows skipped)",
                    summary.points, summary.name, summary.skipped
                );
            }
        }
        Commands::Surface { input, format, at } => {
            let report = read_points(&input, format)?;
            let id = surface_scene(&mut scene, &report)?;
            let terrain = scene.item(id).and_then(Item::as_terrain).ok_or("conversion failed")?;
            let samples: Vec<Sample> = at
                .chunks_exact(2)
                .map(|xy| Sample {
                    x: xy[0],
                    y: xy[1],
                    elevation: terrain.elevation_at(xy[0], xy[1]),
                })
                .collect();
            let name = item_name(&scene, id);
            let summary = SurfaceSummary {
                name: &name,
                points: terrain.points().len(),
                triangles: terrain.triangles().len(),
                samples,
            };
            if cli.json {
                print_json(&summary)?;
            } else {
                println!(
                    "Surface '{}': {} points, {} triangles",
                    summary.name, summary.points, summary.triangles
                );
                for s in &summary.samples {
                    match s.elevation {
                        Some(z) => println!("Elevation at ({}, {}): {:.3}", s.x, s.y, z),
                        None => println!("Elevation at ({}, {}): outside surface", s.x, s.y),
                    }
                }
            }
        }
        Commands::Hull { input, format } => {
            let report = read_points(&input, format)?;
            let points = report.positions();
            let edges = convex_hull_edges(&points);
            if edges.is_empty() {
                return Err("Cannot build hull: points are collinear or fewer than 3".to_string());
            }
            if cli.json {
                print_json(&edges)?;
            } else {
                println!("Hull has {} edges", edges.len());
                for (a, b) in &edges {
                    println!(
                        "{} -> {}",
                        report.records[*a].point_number, report.records[*b].point_number
                    );
                }
            }
        }
        Commands::Alignment {
            input,
            speed,
            curve,
            output,
        } => {
            let vertices = read_vertices(&input)?;
            let path = polyline_path(&vertices)?;
            let id = scene.create_alignment(None, path).map_err(|e| e.to_string())?;
            if let Some(speed) = speed {
                scene
                    .generate_curves(id, speed, curve.into())
                    .map_err(|e| format!("Cannot generate curves: {e}"))?;
            }
            let alignment = scene.item(id).and_then(Item::as_alignment).ok_or("alignment failed")?;
            let path = alignment.path();
            if let Some(output) = output {
                let text = serde_json::to_string_pretty(path).map_err(|e| e.to_string())?;
                fs::write(&output, text).map_err(|e| format!("Error writing {}: {}", output.display(), e))?;
            }
            let name = item_name(&scene, id);
            let summary = AlignmentSummary {
                name: &name,
                segments: path.segment_count(),
                length: path.length(),
            };
            if cli.json {
                print_json(&summary)?;
            } else {
                println!(
                    "Alignment '{}': {} segments, length {:.3}",
                    summary.name, summary.segments, summary.length
                );
            }
        }
        Commands::DesignCriteria { speed } => {
            let c = DesignCriteria::for_speed(speed).map_err(|e| e.to_string())?;
            if cli.json {
                print_json(&c)?;
            } else {
                println!("Design speed: {}", c.speed);
                println!("Superelevation: {:.4}", c.superelevation);
                println!("Side friction: {:.4}", c.side_friction);
                println!("Minimum radius: {:.3}", c.min_radius);
                println!("Minimum spiral length: {:.3}", c.min_spiral_length);
            }
        }
        Commands::Profile {
            alignment,
            surface,
            format,
        } => {
            let vertices = read_vertices(&alignment)?;
            let path = polyline_path(&vertices)?;
            let report = read_points(&surface, format)?;
            let terrain_id = surface_scene(&mut scene, &report)?;
            let alignment_id = scene.create_alignment(None, path).map_err(|e| e.to_string())?;
            let terrain = scene
                .item(terrain_id)
                .and_then(Item::as_terrain)
                .ok_or("conversion failed")?;
            let item = scene
                .item(alignment_id)
                .and_then(Item::as_alignment)
                .ok_or("alignment failed")?;
            let ground = item.ground_profile(terrain);
            let rows: Vec<ProfileRow> = ground
                .iter()
                .map(|&(station, elevation)| ProfileRow { station, elevation })
                .collect();
            if cli.json {
                print_json(&rows)?;
            } else {
                println!("station,elevation");
                for r in &rows {
                    println!("{:.3},{:.3}", r.station, r.elevation);
                }
            }
        }
    }
    Ok(())
}

fn item_name(scene: &Scene, id: ItemId) -> String {
    scene.item(id).map(|i| i.name().to_string()).unwrap_or_default()
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
