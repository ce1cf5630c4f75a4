//! CLI entry point for canopy

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use canopy::{OsFs, OutputConfig, SortKey, TreeError, TreeFormatter, TreeWalker, WalkerConfig};

/// Sort selected with `--sort`
#[derive(Debug, Clone, Copy, ValueEnum)]
enum SortBy {
    Name,
    Version,
    Size,
    Mtime,
    Ctime,
}

#[derive(Parser, Debug)]
#[command(name = "canopy")]
#[command(about = "List contents of directories in a tree-like format")]
#[command(version, disable_help_flag = true, disable_version_flag = true)]
struct Args {
    /// Directories to list
    #[arg(value_name = "DIR", default_value = ".")]
    dirs: Vec<PathBuf>,

    // Listing options
    /// All files are listed
    #[arg(short = 'a', long = "all")]
    all: bool,

    /// List directories only
    #[arg(short = 'd', long = "dir")]
    dir: bool,

    /// Print the full path prefix for each file
    #[arg(short = 'f', long = "full")]
    full: bool,

    /// Ignore case when pattern matching
    #[arg(long = "ignore-case")]
    ignore_case: bool,

    /// Turn off file/directory count at end of tree listing
    #[arg(long = "noreport")]
    noreport: bool,

    /// Follow symbolic links like directories
    #[arg(short = 'l', long = "follow")]
    follow: bool,

    /// Descend only LEVEL directories deep (0 for no limit)
    #[arg(short = 'L', long = "level", alias = "max-depth", default_value_t = 3)]
    level: usize,

    /// List only those files that match the pattern given
    #[arg(short = 'P', long = "pattern")]
    pattern: Option<String>,

    /// Do not list files that match the given pattern
    #[arg(short = 'I', long = "ignore")]
    ignore: Option<String>,

    /// Match directories against the patterns too
    #[arg(long = "matchdirs")]
    matchdirs: bool,

    /// Drop directories that end up empty
    #[arg(long = "prune")]
    prune: bool,

    /// Output to file instead of stdout
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    output: Option<PathBuf>,

    // File options
    /// Print first line of text/plain files
    #[arg(short = '1', long = "firstline")]
    firstline: bool,

    /// Print the size in bytes of each file
    #[arg(short = 's', long = "size")]
    size: bool,

    /// Print the size in a more human readable way
    #[arg(short = 'h', long = "human")]
    human: bool,

    /// Print the protections for each file
    #[arg(short = 'p', long = "protections")]
    protections: bool,

    /// Displays file owner or UID number
    #[arg(short = 'u', long = "owner")]
    owner: bool,

    /// Displays file group owner or GID number
    #[arg(short = 'g', long = "group")]
    group: bool,

    /// Quote filenames with double quotes
    #[arg(short = 'Q', long = "quote")]
    quote: bool,

    /// Print the date of last modification
    #[arg(short = 'D', long = "date")]
    date: bool,

    /// Print inode number of each file
    #[arg(long = "inodes")]
    inodes: bool,

    /// Print device ID number to which each file belongs
    #[arg(long = "device")]
    device: bool,

    // Sort options
    /// Leave files unsorted
    #[arg(short = 'U', long = "unsorted")]
    unsorted: bool,

    /// Sort files alphanumerically by version
    #[arg(short = 'v')]
    version_sort: bool,

    /// Sort files by last modification time
    #[arg(short = 't')]
    mtime_sort: bool,

    /// Sort files by last status change time
    #[arg(short = 'c')]
    ctime_sort: bool,

    /// Reverse the order of the sort
    #[arg(short = 'r', long = "reverse")]
    reverse: bool,

    /// List directories before files (-U disables)
    #[arg(long = "dirsfirst")]
    dirsfirst: bool,

    /// Select sort
    #[arg(long = "sort", value_enum)]
    sort: Option<SortBy>,

    // Graphics options
    /// Don't print indentation lines
    #[arg(short = 'i', long = "no-indent")]
    no_indent: bool,

    /// Turn colorization on always
    #[arg(short = 'C', long = "colorize")]
    colorize: bool,

    /// Print help
    #[arg(long = "help", action = ArgAction::Help)]
    help: Option<bool>,

    /// Print version
    #[arg(long = "version", action = ArgAction::Version)]
    version: Option<bool>,
}

impl Args {
    fn sort_key(&self) -> SortKey {
        let sort_is = |key: fn(SortBy) -> bool| self.sort.is_some_and(key);
        SortKey::from_flags(
            self.mtime_sort || sort_is(|s| matches!(s, SortBy::Mtime)),
            self.ctime_sort || sort_is(|s| matches!(s, SortBy::Ctime)),
            self.dirsfirst,
            self.version_sort || sort_is(|s| matches!(s, SortBy::Version)),
            sort_is(|s| matches!(s, SortBy::Size)),
        )
    }

    fn walker_config(&self) -> WalkerConfig {
        WalkerConfig {
            show_all: self.all,
            dirs_only: self.dir,
            full_path: self.full,
            ignore_case: self.ignore_case,
            follow_links: self.follow,
            max_depth: Some(self.level),
            pattern: self.pattern.clone(),
            ignore_pattern: self.ignore.clone(),
            match_dirs: self.matchdirs,
            prune: self.prune,
            sort: self.sort_key(),
            no_sort: self.unsorted,
            reverse: self.reverse,
        }
    }

    fn output_config(&self) -> OutputConfig {
        OutputConfig {
            contents: self.firstline,
            byte_size: self.size,
            human_size: self.human,
            mode: self.protections,
            uid: self.owner,
            gid: self.group,
            last_modified: self.date,
            quotes: self.quote,
            inodes: self.inodes,
            device: self.device,
            no_indent: self.no_indent,
            colorize: self.colorize,
            now: None,
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn open_output(path: Option<&PathBuf>) -> Result<Box<dyn Write>, TreeError> {
    match path {
        Some(path) => {
            let file = File::create(path).map_err(|source| TreeError::Output {
                path: path.clone(),
                source,
            })?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
    }
}

fn run(args: &Args) -> Result<(), TreeError> {
    let mut out = open_output(args.output.as_ref())?;
    let walker = TreeWalker::new(args.walker_config(), OsFs::new());
    let formatter = TreeFormatter::new(args.output_config(), &walker);

    let (mut dirs, mut files) = (0, 0);
    for dir in &args.dirs {
        let (root, (d, f)) = walker.walk(dir);
        dirs += d;
        files += f;
        formatter.write(&root, &mut out)?;
    }

    if !args.noreport {
        let mut footer = format!("\n{} directories", dirs);
        if !args.dir {
            footer.push_str(&format!(", {} files", files));
        }
        writeln!(out, "{}", footer)?;
    }
    out.flush()?;
    Ok(())
}

fn main() {
    let args = Args::parse();
    init_logging();

    if let Err(e) = run(&args) {
        eprintln!("canopy: \"{}\"", e);
        process::exit(1);
    }
}
