//! First-line previews of plain-text files

use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;
use std::process::Command;

use tracing::debug;

/// Maximum number of bytes read for a preview.
pub const PREVIEW_BYTES: usize = 60;

const TEXT_PLAIN: &str = "text/plain";

/// Reports the MIME type of a file.
pub trait SniffMime {
    fn mime_type(&self, path: &Path) -> Option<String>;
}

/// Asks `file(1)`, looking at the first 200 bytes only.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileCommand;

impl SniffMime for FileCommand {
    fn mime_type(&self, path: &Path) -> Option<String> {
        let output = Command::new("file")
            .args(["--mime-type", "--brief", "-P", "bytes=200"])
            .arg(path)
            .output();
        match output {
            Ok(out) if out.status.success() => {
                Some(String::from_utf8_lossy(&out.stdout).trim_end().to_string())
            }
            Ok(out) => {
                debug!(path = %path.display(), status = %out.status, "file command failed");
                None
            }
            Err(err) => {
                debug!(error = %err, "cannot run file command");
                None
            }
        }
    }
}

/// The first line of `path`, cut to the preview budget.
///
/// Returns the snippet and whether more text follows it. A read that fills
/// the whole budget without a line break drops its last byte to make room
/// for the ellipsis.
pub fn first_line(path: &Path) -> Option<(Vec<u8>, bool)> {
    let file = File::open(path).ok()?;
    let mut buf = Vec::with_capacity(PREVIEW_BYTES);
    file.take(PREVIEW_BYTES as u64).read_to_end(&mut buf).ok()?;
    if buf.is_empty() {
        return None;
    }

    if let Some(pos) = buf.iter().position(|&b| b == b'\n' || b == b'\r') {
        buf.truncate(pos);
    }
    let more = buf.len() == PREVIEW_BYTES;
    if more {
        buf.pop();
    }
    Some((buf, more))
}

/// Write `` => `snippet` `` for plain-text files; nothing otherwise.
pub fn write_preview(out: &mut dyn Write, path: &Path, sniffer: &dyn SniffMime) -> io::Result<()> {
    if sniffer.mime_type(path).as_deref() != Some(TEXT_PLAIN) {
        return Ok(());
    }
    let Some((snippet, more)) = first_line(path) else {
        return Ok(());
    };

    out.write_all(b" => `")?;
    out.write_all(&snippet)?;
    if more {
        out.write_all("…`".as_bytes())
    } else {
        out.write_all(b"`")
    }
}
