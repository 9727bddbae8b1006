//! lsqa CLI - Landsat Level-2 QA band generation and dilation

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use lsqa_algorithms::classify::{class_band, pixel_band};
use lsqa_algorithms::morphology::{dilate_class_value, dilate_pixel_bit};
use lsqa_algorithms::qa::{PixelQaBit, QaClass};
use lsqa_core::io::{read_band, write_band, EnviHeader};
use lsqa_core::metadata::{append_band, BandDataType, BandMeta, SceneMetadata, SensorFamily};
use lsqa_core::raster::Raster;

// ─── CLI structure ──────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "lsqa")]
#[command(author, version, about = "Landsat Level-2 QA band tools", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show information about a scene
    Info {
        /// Scene metadata XML file
        #[arg(long)]
        xml: PathBuf,
    },
    /// Generate Level-2 QA bands from the Level-1 quality band
    Generate {
        #[command(subcommand)]
        band: GenerateCommands,
    },
    /// Dilate a class value or bit in an existing Level-2 QA band
    Dilate {
        #[command(subcommand)]
        target: DilateCommands,
    },
}

#[derive(Subcommand)]
enum GenerateCommands {
    /// Scalar class band (clear/water/shadow/snow/cloud/fill)
    ClassQa {
        /// Scene metadata XML file
        #[arg(long)]
        xml: PathBuf,
    },
    /// Bit-packed pixel QA band
    PixelQa {
        /// Scene metadata XML file
        #[arg(long)]
        xml: PathBuf,
    },
}

#[derive(Subcommand)]
enum DilateCommands {
    /// Dilate a class value in the class band
    Class {
        /// Scene metadata XML file
        #[arg(long)]
        xml: PathBuf,
        /// Class value to dilate (0=clear, 1=water, 2=cloud shadow, 3=snow, 4=cloud)
        #[arg(long)]
        class: u8,
        /// Search distance from the current pixel
        #[arg(long)]
        distance: usize,
    },
    /// Dilate a bit in the bit-packed pixel QA band
    Pixel {
        /// Scene metadata XML file
        #[arg(long)]
        xml: PathBuf,
        /// Bit to dilate (1=clear, 2=water, 3=cloud shadow, 4=snow, 5=cloud,
        /// 6-7=cloud confidence, 8-9=cirrus confidence, 10=terrain occlusion)
        #[arg(long)]
        bit: u8,
        /// Search distance from the current pixel
        #[arg(long)]
        distance: usize,
    },
}

// ─── Helpers ────────────────────────────────────────────────────────────

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");
}

fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

/// Band file paths in the scene XML are relative to the XML's directory
fn band_path(xml: &Path, band: &BandMeta) -> PathBuf {
    match xml.parent() {
        Some(dir) => dir.join(&band.file_name),
        None => PathBuf::from(&band.file_name),
    }
}

/// Output band file name derived from the XML name (scene.xml -> scene_<suffix>.img)
fn output_file_name(xml: &Path, suffix: &str) -> Result<String> {
    let stem = xml
        .file_stem()
        .and_then(|s| s.to_str())
        .context("Scene XML path has no file name")?;
    Ok(format!("{stem}_{suffix}.img"))
}

fn read_scene(xml: &Path) -> Result<SceneMetadata> {
    SceneMetadata::from_file(xml).context("Failed to parse the scene metadata")
}

/// Open and read the Level-1 quality band for a scene
fn read_level1(xml: &Path, scene: &SceneMetadata) -> Result<(Raster<u16>, SensorFamily)> {
    let family = scene
        .sensor_family()
        .context("Failed to resolve the sensor family")?;

    let band = scene
        .find_band("bqa_pixel", "qa")
        .context("Failed to locate the Level-1 quality band")?;
    band.require_data_type(BandDataType::Uint16)
        .context("Unexpected Level-1 quality band data type")?;
    scene
        .validate_against_reference(band)
        .context("Level-1 quality band does not match the reference band")?;

    let pb = spinner("Reading Level-1 quality band...");
    let raster = read_band::<u16, _>(band_path(xml, band), band.nlines, band.nsamps)
        .context("Failed to read the Level-1 quality band")?;
    pb.finish_and_clear();
    info!("Input: {} x {}", raster.cols(), raster.rows());

    Ok((raster, family))
}

/// Persist a freshly generated band: pixels first, then header, then metadata
fn publish_band<T: lsqa_core::RasterElement>(
    xml: &Path,
    raster: &Raster<T>,
    meta: &BandMeta,
) -> Result<()> {
    let pb = spinner("Writing output band...");
    let img = band_path(xml, meta);
    write_band(&img, raster).context("Failed to write the output band")?;
    EnviHeader::for_band::<T>(meta)
        .write(EnviHeader::path_for(&img))
        .context("Failed to write the ENVI header")?;
    append_band(xml, meta).context("Failed to append the band to the scene metadata")?;
    pb.finish_and_clear();
    Ok(())
}

fn done(name: &str, file: &str, elapsed: std::time::Duration) {
    println!("{} saved to: {}", name, file);
    println!("  Processing time: {:.2?}", elapsed);
}

fn parse_class(value: u8) -> Result<u8> {
    let class = QaClass::try_from(value).context("Invalid class value")?;
    if class == QaClass::Fill {
        anyhow::bail!("The fill class (255) cannot be dilated");
    }
    Ok(class.value())
}

fn parse_bit(value: u8) -> Result<PixelQaBit> {
    let bit = PixelQaBit::try_from(value).context("Invalid bit value")?;
    if bit == PixelQaBit::Fill {
        anyhow::bail!("The fill bit (0) cannot be dilated");
    }
    Ok(bit)
}

// ─── Main ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match cli.command {
        // ── Info ─────────────────────────────────────────────────────
        Commands::Info { xml } => {
            let scene = read_scene(&xml)?;
            println!("Scene: {}", xml.display());
            println!("Satellite: {}", scene.satellite());
            match scene.sensor_family() {
                Ok(family) => println!("Sensor family: {:?}", family),
                Err(_) => println!("Sensor family: unknown"),
            }
            println!("\nBands:");
            for band in scene.bands() {
                println!(
                    "  {:20} {:8} {:7} {:>6} x {:<6} {}",
                    band.name,
                    band.category,
                    band.data_type.to_string(),
                    band.nlines,
                    band.nsamps,
                    band.file_name
                );
            }
        }

        // ── Generate ─────────────────────────────────────────────────
        Commands::Generate { band } => match band {
            GenerateCommands::ClassQa { xml } => {
                let scene = read_scene(&xml)?;
                let (level1, family) = read_level1(&xml, &scene)?;
                let l1_meta = scene.find_band("bqa_pixel", "qa")?;

                let start = Instant::now();
                let classes =
                    class_band(&level1, family).context("Failed to generate the class band")?;
                let elapsed = start.elapsed();

                let meta = BandMeta {
                    product: "level2_qa".to_string(),
                    name: "class_based_qa".to_string(),
                    category: "qa".to_string(),
                    data_type: BandDataType::Uint8,
                    nlines: l1_meta.nlines,
                    nsamps: l1_meta.nsamps,
                    fill_value: Some(QaClass::Fill.value() as u32),
                    file_name: output_file_name(&xml, "class_based_qa")?,
                };
                publish_band(&xml, &classes, &meta)?;
                done("Class band", &meta.file_name, elapsed);
            }

            GenerateCommands::PixelQa { xml } => {
                let scene = read_scene(&xml)?;
                let (level1, family) = read_level1(&xml, &scene)?;
                let l1_meta = scene.find_band("bqa_pixel", "qa")?;

                let start = Instant::now();
                let qa =
                    pixel_band(&level1, family).context("Failed to generate the pixel QA band")?;
                let elapsed = start.elapsed();

                let meta = BandMeta {
                    product: "level2_qa".to_string(),
                    name: "pixel_qa".to_string(),
                    category: "qa".to_string(),
                    data_type: BandDataType::Uint16,
                    nlines: l1_meta.nlines,
                    nsamps: l1_meta.nsamps,
                    fill_value: Some(PixelQaBit::Fill.mask() as u32),
                    file_name: output_file_name(&xml, "pixel_qa")?,
                };
                publish_band(&xml, &qa, &meta)?;
                done("Pixel QA band", &meta.file_name, elapsed);
            }
        },

        // ── Dilate ───────────────────────────────────────────────────
        Commands::Dilate { target } => match target {
            DilateCommands::Class {
                xml,
                class,
                distance,
            } => {
                let search_value = parse_class(class)?;
                let scene = read_scene(&xml)?;
                let band = scene
                    .find_band("class_based_qa", "qa")
                    .context("Failed to locate the class band")?;
                band.require_data_type(BandDataType::Uint8)
                    .context("Unexpected class band data type")?;

                let pb = spinner("Reading class band...");
                let raster = read_band::<u8, _>(band_path(&xml, band), band.nlines, band.nsamps)
                    .context("Failed to read the class band")?;
                pb.finish_and_clear();
                info!("Input: {} x {}", raster.cols(), raster.rows());

                let start = Instant::now();
                let result = dilate_class_value(&raster, search_value, distance)
                    .context("Failed to dilate the class band")?;
                let elapsed = start.elapsed();

                let pb = spinner("Writing class band...");
                write_band(band_path(&xml, band), &result)
                    .context("Failed to write the class band")?;
                pb.finish_and_clear();
                done("Dilated class band", &band.file_name, elapsed);
            }

            DilateCommands::Pixel { xml, bit, distance } => {
                let search_bit = parse_bit(bit)?;
                let scene = read_scene(&xml)?;
                let band = scene
                    .find_band("pixel_qa", "qa")
                    .context("Failed to locate the pixel QA band")?;
                band.require_data_type(BandDataType::Uint16)
                    .context("Unexpected pixel QA band data type")?;

                let pb = spinner("Reading pixel QA band...");
                let raster = read_band::<u16, _>(band_path(&xml, band), band.nlines, band.nsamps)
                    .context("Failed to read the pixel QA band")?;
                pb.finish_and_clear();
                info!("Input: {} x {}", raster.cols(), raster.rows());

                let start = Instant::now();
                let result = dilate_pixel_bit(&raster, search_bit, distance)
                    .context("Failed to dilate the pixel QA band")?;
                let elapsed = start.elapsed();

                let pb = spinner("Writing pixel QA band...");
                write_band(band_path(&xml, band), &result)
                    .context("Failed to write the pixel QA band")?;
                pb.finish_and_clear();
                done("Dilated pixel QA band", &band.file_name, elapsed);
            }
        },
    }

    Ok(())
}
