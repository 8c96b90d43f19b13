//! Workspace build tasks, run as `cargo xtask <command>`.

use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

const WASM_TARGET: &str = "wasm32-unknown-unknown";
const STATIC_FILES: &[&str] = &["index.html", "style.css"];

#[derive(Parser)]
#[command(name = "xtask", about = "backdrop build tasks")]
struct Cli {
    #[command(subcommand)]
    command: Task,
}

#[derive(Subcommand)]
enum Task {
    /// Build the wasm bundle and page into `dist/`.
    Web {
        /// Optimized build.
        #[arg(long)]
        release: bool,
        /// Output directory, relative to the workspace root.
        #[arg(long, default_value = "dist")]
        out_dir: PathBuf,
    },
}

fn main() -> Result<()> {
    match Cli::parse().command {
        Task::Web { release, out_dir } => build_web(release, &out_dir),
    }
}

fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
}

fn run(command: &mut Command) -> Result<()> {
    let status = command
        .status()
        .with_context(|| format!("failed to spawn {command:?}"))?;
    if !status.success() {
        bail!("{command:?} exited with {status}");
    }
    Ok(())
}

fn build_web(release: bool, out_dir: &Path) -> Result<()> {
    let root = workspace_root();
    let profile = if release { "release" } else { "debug" };

    let mut cargo = Command::new(env!("CARGO"));
    let _ = cargo.current_dir(&root).args([
        "rustc",
        "--lib",
        "--target",
        WASM_TARGET,
        "--no-default-features",
        "--features",
        "web",
        "--crate-type",
        "cdylib",
    ]);
    if release {
        let _ = cargo.arg("--release");
    }
    run(&mut cargo).context("wasm build failed")?;

    let wasm = root
        .join("target")
        .join(WASM_TARGET)
        .join(profile)
        .join("backdrop.wasm");
    let out = root.join(out_dir);
    std::fs::create_dir_all(&out)
        .with_context(|| format!("creating {}", out.display()))?;

    run(Command::new("wasm-bindgen")
        .arg("--target")
        .arg("web")
        .arg("--no-typescript")
        .arg("--out-dir")
        .arg(&out)
        .arg(&wasm))
    .context("wasm-bindgen failed (is wasm-bindgen-cli installed?)")?;

    for file in STATIC_FILES {
        let from = root.join("web").join(file);
        let _ = std::fs::copy(&from, out.join(file))
            .with_context(|| format!("copying {}", from.display()))?;
    }

    println!("web bundle written to {}", out.display());
    Ok(())
}
