//! extlib - libextism installer
#![allow(missing_docs)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::doc_markdown)]
//!
//! Installs the Extism shared library, static library, header and pkg-config
//! files from a GitHub release into a prefix, removes them again, and checks
//! that an installed library loads.
//!
//! # Directory Layout
//!
//! ```text
//! $prefix/
//! ├── lib/
//! │   ├── libextism.{so,dylib} | extism.dll
//! │   ├── libextism.a | extism.lib
//! │   └── pkgconfig/extism{,-static}.pc
//! └── include/extism.h
//! ```

pub mod cmd;
pub mod ui;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use extlib_core::catalog::DEFAULT_API_URL;
use extlib_schema::InstallLayout;
use extlib_schema::platform::{default_prefix, host_arch, host_os};

#[derive(Parser, Debug)]
#[command(name = "extlib")]
#[command(author, version, about = "Install and manage libextism", long_about = None)]
pub struct Cli {
    /// Show what would happen without writing anything
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Print verbose trace output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// GitHub token for release listing (raises the rate limit)
    #[arg(long, global = true, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// GitHub API endpoint
    #[arg(long, global = true, env = "EXTLIB_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Install libextism from a GitHub release
    Install(InstallArgs),

    /// Remove an installed libextism
    #[command(alias = "rm")]
    Uninstall {
        /// OS the installation was made for (decides library file names)
        #[arg(long, default_value = host_os())]
        os: String,

        #[command(flatten)]
        layout: LayoutArgs,
    },

    /// List available releases
    #[command(alias = "ls")]
    Versions {
        /// Only show releases whose tag equals one of these
        tags: Vec<String>,
    },

    /// Load the installed library and print its version
    Check,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Args, Debug)]
pub struct InstallArgs {
    /// Version to install: a tag prefix, `latest` or `git`; empty for the newest release
    #[arg(long, default_value = "")]
    pub version: String,

    /// Target OS (linux, darwin, windows)
    #[arg(long, default_value = host_os())]
    pub os: String,

    /// Target architecture (x86_64/amd64, aarch64/arm64)
    #[arg(long, default_value = host_arch())]
    pub arch: String,

    /// Target libc (gnu, musl); only meaningful on linux
    #[arg(long, default_value = "")]
    pub libc: String,

    /// Full target triplet, e.g. aarch64-unknown-linux-musl; overrides --os/--arch/--libc
    #[arg(long)]
    pub triplet: Option<String>,

    #[command(flatten)]
    pub layout: LayoutArgs,
}

/// Install location flags shared by `install` and `uninstall`.
#[derive(Args, Debug)]
pub struct LayoutArgs {
    /// Installation prefix
    #[arg(long, default_value = default_prefix(host_os()))]
    pub prefix: PathBuf,

    /// Library directory, relative to the prefix
    #[arg(long = "libdir", default_value = "lib")]
    pub lib_dir: PathBuf,

    /// Header directory, relative to the prefix
    #[arg(long = "includedir", default_value = "include")]
    pub include_dir: PathBuf,
}

impl LayoutArgs {
    pub fn layout(&self) -> InstallLayout {
        InstallLayout::new(&self.prefix, &self.lib_dir, &self.include_dir)
    }
}
