use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "cryptomatte", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the ID of each name.
    Hash(HashArgs),
    /// Check a manifest file for hash mismatches and collisions.
    Validate(ValidateArgs),
    /// Normalize a matte list, optionally expanding wildcards.
    Matte(MatteArgs),
}

#[derive(Parser, Debug)]
struct HashArgs {
    /// Names to hash.
    #[arg(required = true)]
    names: Vec<String>,

    /// Hash scheme.
    #[arg(long = "hash", value_enum, default_value_t = HashChoice::Murmur3)]
    hash: HashChoice,
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Manifest JSON file.
    #[arg(long)]
    manifest: PathBuf,

    /// Hash scheme the manifest was written with.
    #[arg(long = "hash", value_enum, default_value_t = HashChoice::Murmur3)]
    hash: HashChoice,
}

#[derive(Parser, Debug)]
struct MatteArgs {
    /// Matte list text.
    #[arg(long)]
    list: String,

    /// Manifest JSON file used for wildcard expansion.
    #[arg(long)]
    manifest: Option<PathBuf>,

    /// Expand wildcard tokens against the manifest.
    #[arg(long, requires = "manifest")]
    expand: bool,

    /// Print one `name<TAB>id<TAB>hex` line per token after the list.
    #[arg(long)]
    ids: bool,

    /// Treat `--list` as, and print, host-escaped text.
    #[arg(long)]
    host: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum HashChoice {
    Murmur3,
    Murmur3Clamped,
    Djb2Legacy,
}

impl From<HashChoice> for cryptomatte::HashVersion {
    fn from(choice: HashChoice) -> Self {
        match choice {
            HashChoice::Murmur3 => Self::Murmur3,
            HashChoice::Murmur3Clamped => Self::Murmur3Clamped,
            HashChoice::Djb2Legacy => Self::Djb2Legacy,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Hash(args) => cmd_hash(args),
        Command::Validate(args) => cmd_validate(args),
        Command::Matte(args) => cmd_matte(args),
    }
}

fn read_manifest(path: &Path) -> anyhow::Result<cryptomatte::ManifestIndex> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("read manifest '{}'", path.display()))?;
    let index = cryptomatte::ManifestIndex::from_json(&json)
        .with_context(|| format!("parse manifest '{}'", path.display()))?;
    Ok(index)
}

fn cmd_hash(args: HashArgs) -> anyhow::Result<()> {
    let version = args.hash.into();
    for name in &args.names {
        let id = cryptomatte::name_to_id_with(name, version);
        println!("{name}\t{id:e}\t{}", cryptomatte::id_to_hex(id));
    }
    Ok(())
}

fn cmd_validate(args: ValidateArgs) -> anyhow::Result<()> {
    let index = read_manifest(&args.manifest)?;
    let report = cryptomatte::validate_manifest_with(&index, args.hash.into());

    println!("names: {}", index.len());
    println!("mismatches: {}", report.errors.len());
    for e in &report.errors {
        println!("  {e}");
    }
    println!("collisions: {}", report.collisions.len());
    for c in &report.collisions {
        println!("  {c}");
    }

    anyhow::ensure!(
        report.is_clean(),
        "manifest '{}' is not clean",
        args.manifest.display()
    );
    Ok(())
}

fn cmd_matte(args: MatteArgs) -> anyhow::Result<()> {
    let mut list = if args.host {
        cryptomatte::MatteList::decode_host(&args.list)?
    } else {
        cryptomatte::MatteList::decode(&args.list)?
    };

    if args.expand
        && let Some(path) = &args.manifest
    {
        let index = read_manifest(path)?;
        list = list.expand_wildcards(index.names());
    }

    if args.host {
        println!("{}", list.encode_host());
    } else {
        println!("{}", list.encode());
    }

    if args.ids {
        for token in list.sorted() {
            let id = token.id();
            println!("{}\t{id:e}\t{}", token.raw(), cryptomatte::id_to_hex(id));
        }
    }
    Ok(())
}
