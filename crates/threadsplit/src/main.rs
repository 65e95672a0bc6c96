//! threadsplit - Turn long-form text into social media threads
//!
//! Usage:
//!   threadsplit post.md -p mastodon     Split a file for Mastodon
//!   cat post.md | threadsplit --json    Split stdin, print JSON
//!   threadsplit platforms               List platform profiles

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use thread_splitter::{
    character_cost, Attachment, AttachmentKind, Platform, PlatformProfile, SplitStrategy, Thread,
    ThreadSplitter,
};

mod config;

use config::{default_config_path, load_config, Config};

#[derive(Parser)]
#[command(name = "threadsplit")]
#[command(about = "Split long-form text into ready-to-post threads")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input file ("-" or omitted reads stdin)
    file: Option<PathBuf>,

    #[command(flatten)]
    split: SplitArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// List platform profiles
    Platforms {
        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Config file (defaults to the user config directory)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(Args, Debug, Default)]
struct SplitArgs {
    /// Target platform (x, threads, linkedin, reddit, mastodon, facebook)
    #[arg(short, long)]
    platform: Option<String>,

    /// Manual split offsets in characters, comma separated
    #[arg(long = "split-at", value_delimiter = ',', value_name = "N")]
    split_at: Vec<usize>,

    /// Attach an image (counts against the first post). Can be specified multiple times.
    #[arg(long = "image", value_name = "ID")]
    images: Vec<String>,

    /// Attach a video. Can be specified multiple times.
    #[arg(long = "video", value_name = "ID")]
    videos: Vec<String>,

    /// Attach an embed. Can be specified multiple times.
    #[arg(long = "embed", value_name = "ID")]
    embeds: Vec<String>,

    /// Never append an engagement line to short single posts
    #[arg(long = "no-optimize")]
    no_optimize: bool,

    /// Do not prefix n/total markers
    #[arg(long = "no-number")]
    no_number: bool,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Config file (defaults to the user config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Split inputs larger than the configured cap
    #[arg(long)]
    force: bool,

    /// Log strategy selection and packing details
    #[arg(short = 'v', long)]
    verbose: bool,
}

impl SplitArgs {
    fn attachments(&self) -> Vec<Attachment> {
        let images = self.images.iter().map(|id| Attachment::new(id, AttachmentKind::Image));
        let videos = self.videos.iter().map(|id| Attachment::new(id, AttachmentKind::Video));
        let embeds = self.embeds.iter().map(|id| Attachment::new(id, AttachmentKind::Embed));
        images.chain(videos).chain(embeds).collect()
    }
}

#[derive(Serialize)]
struct JsonThread<'a> {
    platform: Platform,
    strategy: SplitStrategy,
    posts: Vec<JsonPost<'a>>,
}

#[derive(Serialize)]
struct JsonPost<'a> {
    index: usize,
    text: &'a str,
    cost: usize,
    max_chars: usize,
}

#[derive(Serialize)]
struct JsonProfile {
    key: &'static str,
    name: &'static str,
    max_chars: usize,
    conversational: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.split.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    match cli.command {
        Some(Commands::Platforms { json, config }) => {
            let config = resolve_config(config.as_deref())?;
            print!("{}", render_platforms(&config, json)?);
            Ok(())
        }
        None => {
            let config = resolve_config(cli.split.config.as_deref())?;
            let text = read_input(cli.file.as_deref())?;
            cmd_split(&text, &cli.split, &config)
        }
    }
}

fn resolve_config(path: Option<&Path>) -> Result<Config> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => default_config_path()?,
    };
    load_config(&path)
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file: {}", path.display())),
        _ => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            Ok(text)
        }
    }
}

fn cmd_split(text: &str, args: &SplitArgs, config: &Config) -> Result<()> {
    let (profile, thread, attachments) = split_input(text, args, config)?;
    let output = if args.json {
        render_json(&thread, &profile, &attachments)?
    } else {
        render_plain(&thread)
    };
    println!("{output}");
    Ok(())
}

fn split_input(
    text: &str,
    args: &SplitArgs,
    config: &Config,
) -> Result<(PlatformProfile, Thread, Vec<Attachment>)> {
    let platform = match args.platform.as_deref() {
        Some(key) => key.parse::<Platform>()?,
        None => config.default_platform(),
    };
    let profile = config.profile_for(platform);

    let len = text.chars().count();
    let cap = config.max_input_chars();
    if len > cap {
        if !args.force {
            anyhow::bail!(
                "Input is {len} characters, over the {cap} character limit. Pass --force to split it anyway"
            );
        }
        tracing::warn!(len, cap, "input exceeds configured size cap; splitting anyway");
    }

    let splitter = ThreadSplitter::builder()
        .platform(profile)
        .optimize_length(config.optimize() && !args.no_optimize)
        .number_posts(config.number_posts() && !args.no_number)
        .build();

    let attachments = args.attachments();
    let thread = splitter
        .split(text, &attachments, &args.split_at)
        .context("Failed to split input")?;

    Ok((profile, thread, attachments))
}

fn render_plain(thread: &Thread) -> String {
    thread.posts.join("\n---\n")
}

fn render_json(
    thread: &Thread,
    profile: &PlatformProfile,
    attachments: &[Attachment],
) -> Result<String> {
    let posts = thread
        .posts
        .iter()
        .enumerate()
        .map(|(i, text)| {
            let attachments = if i == 0 { attachments } else { &[] };
            JsonPost {
                index: i + 1,
                text,
                cost: character_cost(text, profile, attachments),
                max_chars: profile.max_chars,
            }
        })
        .collect();

    let json = JsonThread {
        platform: thread.platform,
        strategy: thread.strategy,
        posts,
    };
    serde_json::to_string_pretty(&json).context("Failed to serialize thread")
}

fn render_platforms(config: &Config, json: bool) -> Result<String> {
    let profiles: Vec<PlatformProfile> = Platform::ALL
        .into_iter()
        .map(|platform| config.profile_for(platform))
        .collect();

    if json {
        let rows: Vec<JsonProfile> = profiles
            .iter()
            .map(|p| JsonProfile {
                key: p.platform.key(),
                name: p.name,
                max_chars: p.max_chars,
                conversational: p.conversational,
            })
            .collect();
        let mut out = serde_json::to_string_pretty(&rows).context("Failed to serialize profiles")?;
        out.push('\n');
        return Ok(out);
    }

    let mut out = format!("{:<10} {:<12} {:>9}  {}\n", "KEY", "NAME", "MAX", "NUMBERED");
    for p in &profiles {
        out.push_str(&format!(
            "{:<10} {:<12} {:>9}  {}\n",
            p.platform.key(),
            p.name,
            p.max_chars,
            if p.conversational { "yes" } else { "no" }
        ));
    }
    Ok(out)
}
