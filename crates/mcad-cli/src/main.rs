//! mcad CLI — BOM and export tool for assembly definitions.
//!
//! Loads a TOML assembly definition, finalises the tree, and prints the bill
//! of materials, dumps the tree, or writes per-node data/geometry files.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use mcad::{format_bom, Assembly, NodeKey};

mod config;

#[derive(Parser)]
#[command(name = "mcad")]
#[command(about = "Parametric mechanical part assemblies: BOM and export", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the bill of materials for an assembly definition
    Bom {
        /// Assembly definition file (.toml)
        file: PathBuf,
        /// Emit JSON records instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print the assembly tree with allocated identifiers
    Tree {
        /// Assembly definition file (.toml)
        file: PathBuf,
    },
    /// Write each node's parameter data to a directory
    SaveData {
        /// Assembly definition file (.toml)
        file: PathBuf,
        /// Output directory
        #[arg(short, long)]
        out: PathBuf,
    },
    /// Write each node's geometry document to a directory
    SaveComponents {
        /// Assembly definition file (.toml)
        file: PathBuf,
        /// Output directory
        #[arg(short, long)]
        out: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Bom { file, json } => {
            let mut asm = load_finalised(&file)?;
            let bom = asm.make_bom();
            if json {
                println!("{}", serde_json::to_string_pretty(&bom)?);
            } else {
                print!("{}", format_bom(&bom));
            }
        }
        Commands::Tree { file } => {
            let mut asm = load_finalised(&file)?;
            asm.assign_unique_ids();
            print_tree(&asm, asm.root(), 0);
        }
        Commands::SaveData { file, out } => {
            let mut asm = load_finalised(&file)?;
            asm.save_data(&out)?;
            log::info!("wrote parameter data to {}", out.display());
        }
        Commands::SaveComponents { file, out } => {
            let mut asm = load_finalised(&file)?;
            asm.save_components(&out)?;
            log::info!("wrote geometry documents to {}", out.display());
        }
    }

    Ok(())
}

fn load_finalised(file: &std::path::Path) -> Result<Assembly> {
    let mut asm = config::load(file)?;
    asm.finalise()?;
    Ok(asm)
}

fn print_tree(asm: &Assembly, key: NodeKey, depth: usize) {
    println!(
        "{}{} [{}]",
        "  ".repeat(depth),
        asm.name(key),
        asm.identifier(key)
    );
    for &child in asm.children(key) {
        print_tree(asm, child, depth + 1);
    }
}
