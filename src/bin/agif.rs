use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

use agif::{Canvas, Container, FrameRate, Trigger, TriggerMap};

#[derive(Parser, Debug)]
#[command(name = "agif", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Pack images, WAV clips and triggers into a `.agif` container.
    Pack(PackArgs),
    /// Print a container's header, section sizes and triggers.
    Info(InfoArgs),
    /// Extract a container's frames and audio clips into a directory.
    Extract(ExtractArgs),
}

#[derive(Parser, Debug)]
struct PackArgs {
    /// Pack manifest JSON (canvas size, frame rate, file lists, triggers).
    #[arg(long)]
    manifest: PathBuf,

    /// Output `.agif` path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct InfoArgs {
    /// Input `.agif` path.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct ExtractArgs {
    /// Input `.agif` path.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Directory to write `frame_NNN.*` and `clip_NNN.wav` files into.
    #[arg(long)]
    out_dir: PathBuf,
}

/// Authoring inputs for `pack`, deserialized from the manifest JSON.
///
/// An explicit value instead of ambient state: everything the encoder needs
/// travels through this struct.
#[derive(serde::Deserialize, Debug)]
struct PackManifest {
    width: u32,
    height: u32,
    frame_rate: u32,
    /// Encoded image files, one per frame, already sized to the canvas.
    frames: Vec<PathBuf>,
    /// Canonical WAV files, copied into the container verbatim.
    #[serde(default)]
    audio_clips: Vec<PathBuf>,
    #[serde(default)]
    triggers: Vec<Trigger>,
    #[serde(rename = "loop", default = "default_loop")]
    looping: bool,
}

fn default_loop() -> bool {
    true
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Pack(args) => cmd_pack(args),
        Command::Info(args) => cmd_info(args),
        Command::Extract(args) => cmd_extract(args),
    }
}

fn cmd_pack(args: PackArgs) -> anyhow::Result<()> {
    let manifest_bytes = fs::read(&args.manifest)
        .with_context(|| format!("read manifest '{}'", args.manifest.display()))?;
    let manifest: PackManifest =
        serde_json::from_slice(&manifest_bytes).context("parse manifest JSON")?;

    let root = args.manifest.parent().unwrap_or_else(|| Path::new("."));
    let frames = read_all(root, &manifest.frames, "frame image")?;
    let audio_clips = read_all(root, &manifest.audio_clips, "audio clip")?;

    let mut triggers = TriggerMap::new(manifest.triggers);
    triggers.loop_playback = manifest.looping;

    let container = Container::new(
        Canvas::new(manifest.width, manifest.height)?,
        FrameRate::new(manifest.frame_rate)?,
        frames,
        audio_clips,
        triggers,
    )?;
    let bytes = container.encode()?;

    fs::write(&args.out, &bytes).with_context(|| format!("write '{}'", args.out.display()))?;
    println!(
        "packed {} frame(s), {} clip(s) -> {} ({} bytes)",
        container.header.num_frames,
        container.header.num_audio_clips,
        args.out.display(),
        bytes.len()
    );
    Ok(())
}

fn read_all(root: &Path, rel_paths: &[PathBuf], what: &str) -> anyhow::Result<Vec<Vec<u8>>> {
    rel_paths
        .iter()
        .map(|rel| {
            let path = root.join(rel);
            fs::read(&path).with_context(|| format!("read {what} '{}'", path.display()))
        })
        .collect()
}

fn cmd_info(args: InfoArgs) -> anyhow::Result<()> {
    let container = read_container(&args.in_path)?;
    let h = &container.header;

    println!("version      {}", h.version);
    println!("canvas       {}x{}", h.width, h.height);
    println!("frame rate   {} fps", h.frame_rate);
    println!("audio format {}", h.audio_format);

    for (idx, frame) in container.frames.iter().enumerate() {
        match agif::assets::decode_image_rgba8(frame) {
            Ok(img) => println!(
                "frame {idx:3}  {} byte(s), {}x{}",
                frame.len(),
                img.width,
                img.height
            ),
            Err(e) => println!("frame {idx:3}  {} byte(s), undecodable: {e}", frame.len()),
        }
    }
    for (idx, clip) in container.audio_clips.iter().enumerate() {
        println!("clip  {idx:3}  {} byte(s)", clip.len());
    }

    for t in &container.triggers.frame_triggers {
        println!("trigger    frame {} -> clip {}", t.frame, t.audio);
    }
    println!("loop flag  {}", container.triggers.loop_playback);
    Ok(())
}

fn cmd_extract(args: ExtractArgs) -> anyhow::Result<()> {
    let container = read_container(&args.in_path)?;
    fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create '{}'", args.out_dir.display()))?;

    for (idx, frame) in container.frames.iter().enumerate() {
        let ext = image::guess_format(frame)
            .ok()
            .and_then(|f| f.extensions_str().first().copied())
            .unwrap_or("bin");
        let path = args.out_dir.join(format!("frame_{idx:03}.{ext}"));
        fs::write(&path, frame).with_context(|| format!("write '{}'", path.display()))?;
    }
    for (idx, clip) in container.audio_clips.iter().enumerate() {
        let path = args.out_dir.join(format!("clip_{idx:03}.wav"));
        fs::write(&path, clip).with_context(|| format!("write '{}'", path.display()))?;
    }

    println!(
        "extracted {} frame(s) and {} clip(s) into {}",
        container.frames.len(),
        container.audio_clips.len(),
        args.out_dir.display()
    );
    Ok(())
}

fn read_container(path: &Path) -> anyhow::Result<Container> {
    let bytes = fs::read(path).with_context(|| format!("read container '{}'", path.display()))?;
    Ok(Container::decode(&bytes)?)
}
