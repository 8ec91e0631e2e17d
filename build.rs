//! Build script rendering the `chunkframe(1)` manual page from the CLI
//! definition into Cargo's `OUT_DIR`.

use std::{env, fs, path::PathBuf};

use clap::CommandFactory;
use clap_mangen::Man;

#[path = "src/cli.rs"]
mod cli;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=src/cli.rs");

    let out_dir = PathBuf::from(env::var_os("OUT_DIR").ok_or("OUT_DIR not set by cargo")?);
    let page = out_dir.join("chunkframe.1");

    let mut buf: Vec<u8> = Vec::new();
    Man::new(cli::Cli::command()).render(&mut buf)?;
    fs::write(&page, buf)?;
    println!("cargo:rustc-env=CHUNKFRAME_MAN_PAGE={}", page.display());

    Ok(())
}
