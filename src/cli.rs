// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// The flags follow the classic single-dash spelling of open directory tools:
//
//   opendir-tree -u example.test/pub -e jpg,png -t=false
//
// clap handles almost all of it. Two things need help:
// - boolean flags that default to true (-b, -t) take an optional `=false`
// - `-of` is two letters behind one dash, which clap would read as `-o -f`,
//   so normalize_args() rewrites it to `--only-files` before parsing
// =============================================================================

use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Result};
use clap::{ArgAction, Parser};

use crate::options::{split_list, CrawlOptions, DisplayOptions, GlyphRule, Limits, Mode};

#[derive(Parser, Debug)]
#[command(
    name = "opendir-tree",
    version,
    about = "Walk an HTTP open directory listing and print it as a tree",
    long_about = "opendir-tree fetches an auto-generated directory index (Apache, nginx, ...), \
                  follows every subdirectory it lists and prints what it finds as a tree of URLs. \
                  Output can be narrowed down by file extension or by substrings of the URL."
)]
pub struct Cli {
    /// URL of the index to walk; https:// is added when no scheme is given
    #[arg(short = 'u', long = "url", value_name = "URL")]
    pub url: String,

    /// Only list files with these extensions, e.g. -e jpg,png,gif
    #[arg(short = 'e', long = "extensions", value_name = "EXT,...")]
    pub extensions: Option<String>,

    /// Only list entries whose URL contains one of these, e.g. -m admin,login
    ///
    /// Matchers take precedence over -e.
    #[arg(short = 'm', long = "matchers", value_name = "TEXT,...")]
    pub matchers: Option<String>,

    /// Show the banner (-b=false to hide it)
    #[arg(
        short = 'b',
        long = "banner",
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        default_value_t = true,
        default_missing_value = "true"
    )]
    pub banner: bool,

    /// Draw tree glyphs (-t=false prints one bare URL per line)
    #[arg(
        short = 't',
        long = "tree",
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        default_value_t = true,
        default_missing_value = "true"
    )]
    pub tree: bool,

    /// Hide directory lines from the output (also accepted as -of)
    #[arg(
        long = "only-files",
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        default_value_t = false,
        default_missing_value = "true"
    )]
    pub only_files: bool,

    /// Directory mode: print directories (filtered by -m), never files
    #[arg(short = 'd', long = "directories")]
    pub directories: bool,

    /// File mode: never print directory lines, still walk into them
    #[arg(short = 'f', long = "files")]
    pub files: bool,

    /// Do not fetch directories deeper than this (0 = no limit)
    #[arg(long, value_name = "N", default_value_t = 0)]
    pub max_depth: usize,

    /// Maximum number of index pages fetched at the same time
    #[arg(long, value_name = "N", default_value_t = 16, value_parser = clap::value_parser!(u64).range(1..))]
    pub concurrency: u64,

    /// Per-request timeout in seconds (0 = wait forever)
    #[arg(long, value_name = "SECS", default_value_t = 30)]
    pub timeout: u64,

    /// Give the terminal glyph to the last entry of each listing even when
    /// that entry is filtered out
    #[arg(long)]
    pub listing_order_glyphs: bool,

    /// Write a JSON crawl report to this file
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,

    /// More logging on stderr (-v info, -vv debug)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Resolves the parsed flags into the immutable crawl configuration
    pub fn into_options(self) -> Result<CrawlOptions> {
        if self.url.trim().is_empty() {
            bail!("-u needs a URL");
        }

        let mut options = CrawlOptions::new(&self.url);

        if let Some(raw) = &self.extensions {
            options.extensions = split_list(raw, true);
        }
        if let Some(raw) = &self.matchers {
            options.matchers = split_list(raw, false);
        }

        options.mode = Mode::from_flags(self.directories, self.files);
        if self.listing_order_glyphs {
            options.glyphs = GlyphRule::Listing;
        }
        options.display = DisplayOptions {
            tree: self.tree,
            only_files: self.only_files,
        };
        options.limits = Limits {
            max_depth: (self.max_depth > 0).then_some(self.max_depth),
            concurrency: self.concurrency as usize,
            timeout: (self.timeout > 0).then(|| Duration::from_secs(self.timeout)),
        };
        options.banner = self.banner;

        Ok(options)
    }
}

/// Rewrites the single-dash spellings clap cannot parse on its own
///
///   -of        -> --only-files
///   -of=false  -> --only-files=false
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    args.into_iter()
        .map(Into::into)
        .map(|arg| match arg.to_str() {
            Some("-of") => OsString::from("--only-files"),
            Some(s) if s.starts_with("-of=") => OsString::from(format!("--only-files={}", &s[4..])),
            _ => arg,
        })
        .collect()
}

const BANNER: &str = "
 ┌─┐┌─┐┌─┐┌┐┌┌┬┐┬┬─┐   ┌┬┐┬─┐┌─┐┌─┐
 │ │├─┘├┤ │││ │││├┬┘─── │ ├┬┘├┤ ├┤
 └─┘┴  └─┘┘└┘─┴┘┴┴└─    ┴ ┴└─└─┘└─┘";

pub fn print_banner() {
    println!("{} v{}\n", BANNER, env!("CARGO_PKG_VERSION"));
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What does require_equals do?
//    - `-t=false` sets the value, a bare `-t` means true
//    - Without it, `-t -u x` would try to read "-u" as the value of -t
//
// 2. What is ArgAction::Count?
//    - Each -v adds one, so -vv gives 2
//
// 3. Why Option<String> for -e and -m?
//    - "not given" and "given" are different states; None means no filter
//
// 4. Why into_options(self) instead of using Cli everywhere?
//    - Cli is what the user typed, CrawlOptions is what the crawl needs
//    - Parsing and defaulting happen once, here, instead of in every task
// -----------------------------------------------------------------------------
