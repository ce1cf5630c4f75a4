//! Tree formatter
//!
//! This module provides `TreeFormatter` which renders a walked [`Node`] tree
//! as box-drawing text, one line per entry, with optional annotation blocks.

use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::SystemTime;

use chrono::{DateTime, Datelike, Local, TimeZone, Utc};
use tracing::debug;

use crate::error::short_message;
use crate::fs::Metadata;
use crate::tree::{Node, TreeWalker, absolute_path, dir_size, format_size};

use super::color::{AnsiColor, Colorize};
use super::config::OutputConfig;
use super::preview::{FileCommand, SniffMime, write_preview};
use super::utils::{branch_glyph, continuation_prefix, pad_left, pad_right};

const BYTE_SIZE_WIDTH: usize = 11;
const HUMAN_SIZE_WIDTH: usize = 4;
const OWNER_WIDTH: usize = 8;
const GROUP_WIDTH: usize = 4;

/// Formatter for walked trees.
///
/// Holds the walker so that symlinks can be followed (re-walked) while
/// rendering.
pub struct TreeFormatter<'a> {
    config: OutputConfig,
    walker: &'a TreeWalker,
    colorizer: Box<dyn Colorize>,
    sniffer: Box<dyn SniffMime>,
}

impl<'a> TreeFormatter<'a> {
    pub fn new(config: OutputConfig, walker: &'a TreeWalker) -> Self {
        Self {
            config,
            walker,
            colorizer: Box::new(AnsiColor::new()),
            sniffer: Box::new(FileCommand),
        }
    }

    /// Replace the colorizer used when `colorize` is enabled.
    pub fn with_colorizer(mut self, colorizer: impl Colorize + 'static) -> Self {
        self.colorizer = Box::new(colorizer);
        self
    }

    /// Replace the MIME sniffer used for content previews.
    pub fn with_mime_sniffer(mut self, sniffer: impl SniffMime + 'static) -> Self {
        self.sniffer = Box::new(sniffer);
        self
    }

    /// Render to a string. Non-UTF-8 bytes from previews are replaced.
    pub fn format(&self, node: &Node) -> String {
        let mut buf = Vec::new();
        // writing into a Vec can't fail
        let _ = self.write(node, &mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }

    /// Render `node` and its subtree to `out`.
    pub fn write(&self, node: &Node, out: &mut dyn Write) -> io::Result<()> {
        self.write_node(node, "", out)
    }

    fn write_node(&self, node: &Node, indent: &str, out: &mut dyn Write) -> io::Result<()> {
        if let Some(err) = node.error() {
            let message = err.to_string();
            return writeln!(
                out,
                "{} [{}]",
                self.plain_name(node),
                short_message(&message)
            );
        }

        let props = match node.metadata() {
            Some(meta) if meta.is_dir() => self.dir_props(node),
            Some(meta) => self.file_props(meta),
            None => Vec::new(),
        };
        if !props.is_empty() {
            write!(out, "[{}]  ", props.join(" "))?;
        }

        let mut name = self.plain_name(node);
        if self.config.quotes {
            name = format!("\"{}\"", name);
        }
        if self.config.colorize {
            name = self.colorizer.colorize(node, &name);
        }

        let mut followed = None;
        if node.mode().is_some_and(|m| m.is_symlink()) {
            followed = self.resolve_link(node, &mut name);
        }

        out.write_all(name.as_bytes())?;
        if self.config.contents {
            write_preview(out, node.path(), self.sniffer.as_ref())?;
        }
        writeln!(out)?;

        let children = followed.as_ref().map_or(node.children(), Node::children);
        let count = children.len();
        for (i, child) in children.iter().enumerate() {
            if self.config.no_indent {
                self.write_node(child, indent, out)?;
            } else {
                let is_last = i + 1 == count;
                write!(out, "{}{}", indent, branch_glyph(is_last))?;
                self.write_node(child, &continuation_prefix(indent, is_last), out)?;
            }
        }
        Ok(())
    }

    /// Full path for the root or in full-path mode, base name otherwise.
    fn plain_name(&self, node: &Node) -> String {
        if node.depth() == 0 || self.walker.config().full_path {
            node.path().display().to_string()
        } else {
            node.name().into_owned()
        }
    }

    /// Append ` -> target` to `name`, and walk the target when following links.
    ///
    /// Returns the walked target whose children are rendered in place of the
    /// link's (empty) children.
    fn resolve_link(&self, node: &Node, name: &mut String) -> Option<Node> {
        let link_text = fs::read_link(node.path())
            .map(|t| t.display().to_string())
            .unwrap_or_else(|_| node.path().display().to_string());
        let target = fs::canonicalize(node.path()).unwrap_or_else(|_| PathBuf::from(&link_text));
        let target_meta = self.walker.fs().stat(&target).ok();

        let shown = match &target_meta {
            Some(meta) if self.config.colorize => {
                let target_node = Node::detached(PathBuf::from(&link_text), meta.clone());
                self.colorizer.colorize(&target_node, &link_text)
            }
            _ => link_text,
        };
        name.push_str(" -> ");
        name.push_str(&shown);

        if !self.walker.config().follow_links || !target_meta.is_some_and(|m| m.is_dir()) {
            return None;
        }
        let abs = absolute_path(&target).ok()?;
        if node.visited().contains(&abs) {
            debug!(path = %node.path().display(), target = %target.display(), "not following recursive link");
            name.push_str(" [recursive, not followed]");
            return None;
        }

        let mut root = Node::rooted(target, node.visited().clone());
        self.walker.visit(&mut root);
        Some(root)
    }

    fn dir_props(&self, node: &Node) -> Vec<String> {
        let mut props = Vec::new();
        if self.config.show_size() {
            let (size, err) = dir_size(node, self.walker.config());
            if err.is_some() && size == 0 {
                props.push(" ".repeat(self.size_width()));
            } else {
                props.push(self.format_size_field(size));
            }
        }
        props
    }

    fn file_props(&self, meta: &Metadata) -> Vec<String> {
        let mut props = Vec::new();
        let stat = meta.stat.as_ref();

        if let Some(stat) = stat.filter(|_| self.config.inodes) {
            props.push(stat.inode.to_string());
        }
        if let Some(stat) = stat.filter(|_| self.config.device) {
            props.push(format!("{:3}", stat.device));
        }
        if self.config.mode {
            props.push(meta.mode.to_string());
        }
        if let Some(stat) = stat.filter(|_| self.config.uid) {
            let owner = stat.owner.clone().unwrap_or_else(|| stat.uid.to_string());
            props.push(pad_right(&owner, OWNER_WIDTH));
        }
        if let Some(stat) = stat.filter(|_| self.config.gid) {
            props.push(pad_right(&stat.gid.to_string(), GROUP_WIDTH));
        }
        if self.config.show_size() {
            props.push(self.format_size_field(meta.size));
        }
        if self.config.last_modified {
            props.push(self.format_modified(meta.modified));
        }
        props
    }

    fn size_width(&self) -> usize {
        if self.config.human_size {
            HUMAN_SIZE_WIDTH
        } else {
            BYTE_SIZE_WIDTH
        }
    }

    fn format_size_field(&self, size: u64) -> String {
        if self.config.human_size {
            pad_left(&format_size(size), HUMAN_SIZE_WIDTH)
        } else {
            pad_left(&size.to_string(), BYTE_SIZE_WIDTH)
        }
    }

    /// `Mon DD HH:MM` within the reference year, `Mon DD  YYYY` otherwise.
    ///
    /// Without an injected `now`, times are shown in the local zone with the
    /// offset in effect at that moment, as `ls` does.
    fn format_modified(&self, modified: SystemTime) -> String {
        match self.config.now {
            Some(now) => {
                let modified = DateTime::<Utc>::from(modified).with_timezone(&now.timezone());
                stamp(&modified, now.year())
            }
            None => stamp(&DateTime::<Local>::from(modified), Local::now().year()),
        }
    }
}

fn stamp<Tz: TimeZone>(time: &DateTime<Tz>, current_year: i32) -> String
where
    Tz::Offset: fmt::Display,
{
    let format = if time.year() == current_year {
        "%b %d %H:%M"
    } else {
        "%b %d  %Y"
    };
    time.format(format).to_string()
}

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::time::SystemTime;

    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    use super::*;
    use crate::fs::{MemoryFile, MemoryFs, OsFs, StatInfo};
    use crate::output::NoColor;
    use crate::tree::{SortKey, WalkerConfig};

    struct Case {
        name: &'static str,
        walker: WalkerConfig,
        expected: &'static str,
        counts: (usize, usize),
    }

    fn case(
        name: &'static str,
        walker: WalkerConfig,
        expected: &'static str,
        counts: (usize, usize),
    ) -> Case {
        Case {
            name,
            walker,
            expected,
            counts,
        }
    }

    fn pattern(p: &str) -> Option<String> {
        Some(p.to_string())
    }

    fn render(fs: MemoryFs, walker: WalkerConfig, output: OutputConfig) -> (String, (usize, usize)) {
        let walker = TreeWalker::new(walker, fs);
        let (root, counts) = walker.walk("root");
        let out = TreeFormatter::new(output, &walker)
            .with_colorizer(NoColor)
            .format(&root);
        (out, counts)
    }

    fn run_cases(fs: &MemoryFs, cases: Vec<Case>) {
        for case in cases {
            let (out, counts) = render(fs.clone(), case.walker, OutputConfig::default());
            assert_eq!(out, case.expected, "{}", case.name);
            assert_eq!(counts, case.counts, "{}", case.name);
        }
    }

    fn listing_fs() -> MemoryFs {
        MemoryFs::new().with(
            "root",
            MemoryFile::dir(
                "root",
                vec![
                    MemoryFile::file("a").size(50),
                    MemoryFile::file("b").size(50),
                    MemoryFile::dir(
                        "c",
                        vec![
                            MemoryFile::file("d").size(50),
                            MemoryFile::file("e").size(50),
                            MemoryFile::file(".f"),
                            MemoryFile::dir(
                                "g",
                                vec![MemoryFile::file("h").size(50), MemoryFile::file("i").size(50)],
                            ),
                            MemoryFile::file("k").size(50),
                        ],
                    ),
                    MemoryFile::file("j").size(50),
                ],
            ),
        )
    }

    #[test]
    fn test_listing() {
        let cases = vec![
            case(
                "basic",
                WalkerConfig::default(),
                "root
├── a
├── b
├── c
│   ├── d
│   ├── e
│   ├── g
│   │   ├── h
│   │   └── i
│   └── k
└── j
",
                (2, 8),
            ),
            case(
                "all",
                WalkerConfig {
                    show_all: true,
                    no_sort: true,
                    ..Default::default()
                },
                "root
├── a
├── b
├── c
│   ├── d
│   ├── e
│   ├── .f
│   ├── g
│   │   ├── h
│   │   └── i
│   └── k
└── j
",
                (2, 9),
            ),
            case(
                "dirs",
                WalkerConfig {
                    dirs_only: true,
                    ..Default::default()
                },
                "root
└── c
    └── g
",
                (2, 0),
            ),
            case(
                "full path",
                WalkerConfig {
                    full_path: true,
                    ..Default::default()
                },
                "root
├── root/a
├── root/b
├── root/c
│   ├── root/c/d
│   ├── root/c/e
│   ├── root/c/g
│   │   ├── root/c/g/h
│   │   └── root/c/g/i
│   └── root/c/k
└── root/j
",
                (2, 8),
            ),
            case(
                "depth limit",
                WalkerConfig {
                    max_depth: Some(1),
                    ..Default::default()
                },
                "root
├── a
├── b
├── c
└── j
",
                (1, 3),
            ),
            case(
                "pattern",
                WalkerConfig {
                    pattern: pattern("(a|e|i)"),
                    ..Default::default()
                },
                "root
├── a
└── c
    ├── e
    └── g
        └── i
",
                (2, 3),
            ),
            case(
                "pattern without matches",
                WalkerConfig {
                    pattern: pattern("(x)"),
                    ..Default::default()
                },
                "root
└── c
    └── g
",
                (2, 0),
            ),
            case(
                "ignore pattern",
                WalkerConfig {
                    ignore_pattern: pattern("(a|e|i)"),
                    ..Default::default()
                },
                "root
├── b
├── c
│   ├── d
│   ├── g
│   │   └── h
│   └── k
└── j
",
                (2, 5),
            ),
            case(
                "pattern ignoring case",
                WalkerConfig {
                    pattern: pattern("(A)"),
                    ignore_case: true,
                    ..Default::default()
                },
                "root
├── a
└── c
    └── g
",
                (2, 1),
            ),
            case(
                "pattern ignoring case with prune",
                WalkerConfig {
                    pattern: pattern("(A)"),
                    ignore_case: true,
                    prune: true,
                    ..Default::default()
                },
                "root
└── a
",
                (0, 1),
            ),
            case(
                "pattern with prune",
                WalkerConfig {
                    pattern: pattern("(d|e)"),
                    prune: true,
                    ..Default::default()
                },
                "root
└── c
    ├── d
    └── e
",
                (1, 2),
            ),
        ];
        run_cases(&listing_fs(), cases);
    }

    #[test]
    fn test_match_dirs() {
        let cases = vec![
            case(
                "directory match keeps immediate children",
                WalkerConfig {
                    pattern: pattern("(c)"),
                    match_dirs: true,
                    ..Default::default()
                },
                "root
└── c
    ├── d
    ├── e
    ├── g
    └── k
",
                (2, 3),
            ),
            case(
                "wildcard matches the full path",
                WalkerConfig {
                    pattern: pattern("(c.*)"),
                    match_dirs: true,
                    ..Default::default()
                },
                "root
└── c
    ├── d
    ├── e
    ├── g
    │   ├── h
    │   └── i
    └── k
",
                (2, 5),
            ),
            case(
                "wildcard with prune",
                WalkerConfig {
                    pattern: pattern("(c.*)"),
                    match_dirs: true,
                    prune: true,
                    ..Default::default()
                },
                "root
└── c
    ├── d
    ├── e
    ├── g
    │   ├── h
    │   └── i
    └── k
",
                (2, 5),
            ),
            case(
                "ignored directory drops its subtree",
                WalkerConfig {
                    ignore_pattern: pattern("(c)"),
                    match_dirs: true,
                    ..Default::default()
                },
                "root
├── a
├── b
└── j
",
                (0, 3),
            ),
            case(
                "ignored nested directory",
                WalkerConfig {
                    ignore_pattern: pattern("(g)"),
                    match_dirs: true,
                    ..Default::default()
                },
                "root
├── a
├── b
├── c
│   ├── d
│   ├── e
│   └── k
└── j
",
                (1, 6),
            ),
            case(
                "ignore with prune",
                WalkerConfig {
                    ignore_pattern: pattern("(a|e|i|h)"),
                    match_dirs: true,
                    prune: true,
                    ..Default::default()
                },
                "root
├── b
├── c
│   ├── d
│   └── k
└── j
",
                (1, 4),
            ),
        ];
        run_cases(&listing_fs(), cases);
    }

    fn date(y: i32, m: u32, d: u32) -> SystemTime {
        SystemTime::from(Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap())
    }

    #[test]
    fn test_sorting() {
        let stat = |ctime| StatInfo {
            ctime,
            ..Default::default()
        };
        let fs = MemoryFs::new().with(
            "root",
            MemoryFile::dir(
                "root",
                vec![
                    MemoryFile::file("b")
                        .size(11)
                        .modified(date(2015, 9, 1))
                        .stat(stat(1)),
                    MemoryFile::dir(
                        "c",
                        vec![MemoryFile::file("d").size(10).modified(date(2015, 10, 1))],
                    )
                    .size(10)
                    .modified(date(2015, 10, 1))
                    .stat(stat(2)),
                    MemoryFile::file("a")
                        .size(9)
                        .modified(date(2015, 8, 1))
                        .stat(stat(3)),
                ],
            ),
        );
        let sorted = |sort, reverse| WalkerConfig {
            sort,
            reverse,
            ..Default::default()
        };

        let cases = vec![
            case(
                "name",
                sorted(SortKey::Name, false),
                "root
├── a
├── b
└── c
    └── d
",
                (1, 3),
            ),
            case(
                "dirs first",
                sorted(SortKey::DirsFirst, false),
                "root
├── c
│   └── d
├── b
└── a
",
                (1, 3),
            ),
            case(
                "dirs first reversed",
                sorted(SortKey::DirsFirst, true),
                "root
├── b
├── a
└── c
    └── d
",
                (1, 3),
            ),
            case(
                "unsorted",
                WalkerConfig {
                    no_sort: true,
                    sort: SortKey::DirsFirst,
                    ..Default::default()
                },
                "root
├── b
├── c
│   └── d
└── a
",
                (1, 3),
            ),
            case(
                "size",
                sorted(SortKey::Size, false),
                "root
├── a
├── c
│   └── d
└── b
",
                (1, 3),
            ),
            case(
                "modification time",
                sorted(SortKey::ModTime, false),
                "root
├── a
├── b
└── c
    └── d
",
                (1, 3),
            ),
            case(
                "change time",
                sorted(SortKey::ChangeTime, false),
                "root
├── b
├── c
│   └── d
└── a
",
                (1, 3),
            ),
        ];
        run_cases(&fs, cases);
    }

    fn graphics_fs() -> MemoryFs {
        let stat = |gid| StatInfo {
            gid,
            uid: 1000,
            ..Default::default()
        };
        MemoryFs::new().with(
            "root",
            MemoryFile::dir(
                "root",
                vec![
                    MemoryFile::file("a")
                        .size(1500)
                        .modified(date(2015, 2, 11))
                        .stat(stat(1)),
                    MemoryFile::file("b")
                        .size(9999)
                        .perm(0o755)
                        .modified(date(2006, 1, 28))
                        .stat(stat(2)),
                    MemoryFile::file("c")
                        .size(1000)
                        .perm(0o666)
                        .modified(date(2015, 7, 12))
                        .stat(stat(1)),
                ],
            ),
        )
    }

    #[test]
    fn test_annotations() {
        let now = Utc
            .with_ymd_and_hms(2015, 1, 1, 0, 0, 0)
            .unwrap()
            .fixed_offset();
        let cases = vec![
            (
                "no indent",
                OutputConfig {
                    no_indent: true,
                    ..Default::default()
                },
                "root\na\nb\nc\n",
            ),
            (
                "quotes",
                OutputConfig {
                    quotes: true,
                    ..Default::default()
                },
                "\"root\"
├── \"a\"
├── \"b\"
└── \"c\"
",
            ),
            (
                "byte size",
                OutputConfig {
                    byte_size: true,
                    ..Default::default()
                },
                "[      12499]  root
├── [       1500]  a
├── [       9999]  b
└── [       1000]  c
",
            ),
            (
                "human size",
                OutputConfig {
                    human_size: true,
                    ..Default::default()
                },
                "[ 12K]  root
├── [1.5K]  a
├── [9.8K]  b
└── [1000]  c
",
            ),
            (
                "group",
                OutputConfig {
                    gid: true,
                    ..Default::default()
                },
                "root
├── [1   ]  a
├── [2   ]  b
└── [1   ]  c
",
            ),
            (
                "owner falls back to uid",
                OutputConfig {
                    uid: true,
                    ..Default::default()
                },
                "root
├── [1000    ]  a
├── [1000    ]  b
└── [1000    ]  c
",
            ),
            (
                "mode",
                OutputConfig {
                    mode: true,
                    ..Default::default()
                },
                "root
├── [-rw-r--r--]  a
├── [-rwxr-xr-x]  b
└── [-rw-rw-rw-]  c
",
            ),
            (
                "last modified",
                OutputConfig {
                    last_modified: true,
                    now: Some(now),
                    ..Default::default()
                },
                "root
├── [Feb 11 00:00]  a
├── [Jan 28  2006]  b
└── [Jul 12 00:00]  c
",
            ),
            (
                "combined in fixed order",
                OutputConfig {
                    mode: true,
                    gid: true,
                    byte_size: true,
                    ..Default::default()
                },
                "[      12499]  root
├── [-rw-r--r-- 1           1500]  a
├── [-rwxr-xr-x 2           9999]  b
└── [-rw-rw-rw- 1           1000]  c
",
            ),
        ];

        for (name, output, expected) in cases {
            let (out, counts) = render(graphics_fs(), WalkerConfig::default(), output);
            assert_eq!(out, expected, "{}", name);
            assert_eq!(counts, (0, 3), "{}", name);
        }
    }

    #[test]
    fn test_owner_name_is_used() {
        let fs = MemoryFs::new().with(
            "root",
            MemoryFile::dir(
                "root",
                vec![MemoryFile::file("a").stat(StatInfo {
                    uid: 1000,
                    owner: Some("alice".to_string()),
                    inode: 42,
                    ..Default::default()
                })],
            ),
        );
        let output = OutputConfig {
            uid: true,
            inodes: true,
            ..Default::default()
        };
        let (out, _) = render(fs, WalkerConfig::default(), output);
        assert_eq!(out, "root\n└── [42 alice   ]  a\n");
    }

    #[test]
    fn test_directory_size_blank_on_error() {
        let fs = MemoryFs::new()
            .with(
                "root",
                MemoryFile::dir(
                    "root",
                    vec![
                        MemoryFile::dir("locked", vec![MemoryFile::file("x").size(10)]),
                        MemoryFile::file("y").size(20),
                    ],
                ),
            )
            .fail_list("root/locked", "open root/locked: permission denied");
        let output = OutputConfig {
            byte_size: true,
            ..Default::default()
        };
        let (out, counts) = render(fs, WalkerConfig::default(), output);
        assert_eq!(
            out,
            "[         20]  root
├── locked [permission denied]
└── [         20]  y
"
        );
        assert_eq!(counts, (1, 1));
    }

    #[test]
    fn test_directory_size_blank_at_depth_limit() {
        let fs = MemoryFs::new().with(
            "root",
            MemoryFile::dir(
                "root",
                vec![MemoryFile::dir("sub", vec![MemoryFile::file("x").size(10)])],
            ),
        );
        let walker = WalkerConfig {
            max_depth: Some(1),
            ..Default::default()
        };
        let output = OutputConfig {
            human_size: true,
            ..Default::default()
        };
        let (out, _) = render(fs, walker, output);
        // the depth error bubbles up, so the empty root total is blank too
        assert_eq!(out, "[    ]  root\n└── [    ]  sub\n");
    }

    #[test]
    fn test_errors() {
        let fs = MemoryFs::new()
            .with(
                "root",
                MemoryFile::dir(
                    "root",
                    vec![
                        MemoryFile::file("a").size(50),
                        MemoryFile::file("b").size(50),
                        MemoryFile::file("j").size(50),
                        MemoryFile::file("bad").size(50),
                    ],
                ),
            )
            .fail_stat("root/bad", "stat failed");

        let cases = vec![
            case(
                "basic",
                WalkerConfig::default(),
                "root
├── a
├── b
├── j
└── bad [stat failed]
",
                (0, 3),
            ),
            case(
                "dirs",
                WalkerConfig {
                    dirs_only: true,
                    ..Default::default()
                },
                "root
└── bad [stat failed]
",
                (0, 0),
            ),
            case(
                "full path",
                WalkerConfig {
                    full_path: true,
                    ..Default::default()
                },
                "root
├── root/a
├── root/b
├── root/j
└── root/bad [stat failed]
",
                (0, 3),
            ),
            case(
                "pattern",
                WalkerConfig {
                    pattern: pattern("(a|e|i)"),
                    ..Default::default()
                },
                "root
├── a
└── bad [stat failed]
",
                (0, 1),
            ),
            case(
                "ignore pattern",
                WalkerConfig {
                    ignore_pattern: pattern("(a|e|i)"),
                    ..Default::default()
                },
                "root
├── b
├── j
└── bad [stat failed]
",
                (0, 2),
            ),
            case(
                "reverse",
                WalkerConfig {
                    reverse: true,
                    ..Default::default()
                },
                "root
├── bad [stat failed]
├── j
├── b
└── a
",
                (0, 3),
            ),
            case(
                "size",
                WalkerConfig {
                    sort: SortKey::Size,
                    ..Default::default()
                },
                "root
├── a
├── b
├── j
└── bad [stat failed]
",
                (0, 3),
            ),
        ];
        run_cases(&fs, cases);
    }

    #[test]
    fn test_root_error_has_no_children() {
        let fs = MemoryFs::new();
        let (out, counts) = render(fs, WalkerConfig::default(), OutputConfig::default());
        assert_eq!(out, "root [no such file or directory]\n");
        assert_eq!(counts, (0, 0));
    }

    #[test]
    fn test_count_matches_rendered_lines() {
        let dir = |name, children| MemoryFile::dir(name, children);
        let file = MemoryFile::file;
        let fs = MemoryFs::new().with(
            "root",
            dir(
                "root",
                vec![dir(
                    "a",
                    vec![
                        dir("b", vec![file("c")]),
                        dir("d", vec![dir("e", vec![file("f"), file("g")])]),
                        dir(
                            "h",
                            vec![
                                dir("i", vec![file("j")]),
                                dir("k", vec![file("l"), file("m")]),
                                file("n"),
                                file("o"),
                            ],
                        ),
                    ],
                )],
            ),
        );
        let (out, counts) = render(fs, WalkerConfig::default(), OutputConfig::default());
        assert_eq!(counts, (7, 8));
        assert_eq!(out.lines().count(), 1 + 7 + 8);
    }

    #[test]
    fn test_symlink_not_followed() {
        let fs = MemoryFs::new().with(
            "root",
            MemoryFile::dir("root", vec![MemoryFile::symlink("symlink")]),
        );
        let (out, counts) = render(fs, WalkerConfig::default(), OutputConfig::default());
        assert_eq!(out, "root\n└── symlink -> root/symlink\n");
        assert_eq!(counts, (0, 1));
    }

    struct Brackets;

    impl Colorize for Brackets {
        fn colorize(&self, _node: &Node, text: &str) -> String {
            format!("<{}>", text)
        }
    }

    #[test]
    fn test_colorize_applies_after_quotes() {
        let walker = TreeWalker::new(WalkerConfig::default(), graphics_fs());
        let (root, _) = walker.walk("root");
        let output = OutputConfig {
            colorize: true,
            quotes: true,
            ..Default::default()
        };
        let out = TreeFormatter::new(output, &walker)
            .with_colorizer(Brackets)
            .format(&root);
        assert_eq!(out, "<\"root\">\n├── <\"a\">\n├── <\"b\">\n└── <\"c\">\n");
    }

    #[test]
    fn test_colorize_off_ignores_colorizer() {
        let walker = TreeWalker::new(WalkerConfig::default(), graphics_fs());
        let (root, _) = walker.walk("root");
        let out = TreeFormatter::new(OutputConfig::default(), &walker)
            .with_colorizer(Brackets)
            .format(&root);
        assert_eq!(out, "root\n├── a\n├── b\n└── c\n");
    }

    #[cfg(unix)]
    mod on_disk {
        use std::os::unix::fs::symlink;

        use super::*;
        use crate::output::SniffMime;

        fn canonical_tempdir() -> (TempDir, PathBuf) {
            let dir = TempDir::new().unwrap();
            let root = dir.path().canonicalize().unwrap();
            (dir, root)
        }

        fn render_disk(root: &Path, walker: WalkerConfig, output: OutputConfig) -> String {
            let walker = TreeWalker::new(walker, OsFs::new());
            let (node, _) = walker.walk(root);
            TreeFormatter::new(output, &walker)
                .with_colorizer(NoColor)
                .with_mime_sniffer(PlainText)
                .format(&node)
        }

        struct PlainText;

        impl SniffMime for PlainText {
            fn mime_type(&self, path: &Path) -> Option<String> {
                let plain = path.extension().is_some_and(|e| e == "txt");
                Some(if plain { "text/plain" } else { "application/octet-stream" }.to_string())
            }
        }

        fn follow() -> WalkerConfig {
            WalkerConfig {
                follow_links: true,
                ..Default::default()
            }
        }

        #[test]
        fn test_recursive_link_is_not_followed() {
            let (_dir, root) = canonical_tempdir();
            std::fs::create_dir(root.join("sub")).unwrap();
            symlink(&root, root.join("sub").join("loop")).unwrap();

            let out = render_disk(&root, follow(), OutputConfig::default());
            let expected = format!(
                "{root}\n└── sub\n    └── loop -> {root} [recursive, not followed]\n",
                root = root.display()
            );
            assert_eq!(out, expected);
        }

        #[test]
        fn test_followed_link_renders_target_children() {
            let (_outside, target) = canonical_tempdir();
            std::fs::write(target.join("f"), "data").unwrap();
            std::fs::create_dir(target.join("nested")).unwrap();

            let (_dir, root) = canonical_tempdir();
            symlink(&target, root.join("link")).unwrap();

            let out = render_disk(&root, follow(), OutputConfig::default());
            let expected = format!(
                "{}\n└── link -> {}\n    ├── f\n    └── nested\n",
                root.display(),
                target.display()
            );
            assert_eq!(out, expected);

            let out = render_disk(&root, WalkerConfig::default(), OutputConfig::default());
            let expected = format!("{}\n└── link -> {}\n", root.display(), target.display());
            assert_eq!(out, expected);
        }

        #[test]
        fn test_broken_link_shows_its_text() {
            let (_dir, root) = canonical_tempdir();
            symlink("missing-target", root.join("dangling")).unwrap();

            let out = render_disk(&root, follow(), OutputConfig::default());
            assert_eq!(
                out,
                format!("{}\n└── dangling -> missing-target\n", root.display())
            );
        }

        #[test]
        fn test_content_preview() {
            let (_dir, root) = canonical_tempdir();
            std::fs::write(root.join("notes.txt"), "first line\nsecond\n").unwrap();
            std::fs::write(root.join("blob.bin"), [0u8, 1, 2]).unwrap();

            let output = OutputConfig {
                contents: true,
                ..Default::default()
            };
            let out = render_disk(&root, WalkerConfig::default(), output);
            assert_eq!(
                out,
                format!(
                    "{}\n├── blob.bin\n└── notes.txt => `first line`\n",
                    root.display()
                )
            );
        }
    }
}
