// src/stream.rs
//
// Reader/writer and file-to-file front ends for the fold engine.
//
// `fold_file` never writes the destination directly: output goes to a
// temporary file beside it and is renamed over the destination only after a
// successful flush. Folding a file onto itself is therefore safe, and an
// interrupted run leaves the old destination untouched.

use crate::error::{Error, Result};
use crate::fold::{FoldSummary, LineFolder};
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Folds every line of `reader` into `writer`, flushing it at the end.
pub fn fold_stream<R: BufRead, W: Write>(mut reader: R, writer: W) -> io::Result<FoldSummary> {
    let mut folder = LineFolder::new(writer);
    let mut line = Vec::new();
    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 {
            break;
        }
        folder.push_line(&line)?;
    }
    let (_, summary) = folder.finish()?;
    Ok(summary)
}

/// Folds `input` into `output`, replacing `output` atomically.
///
/// `output` keeps its permissions if it already exists, otherwise it gets
/// those of `input`.
pub fn fold_file(input: &Path, output: &Path) -> Result<FoldSummary> {
    let read_err = |source: io::Error| Error::Read {
        path: input.to_path_buf(),
        source,
    };
    let write_err = |source: io::Error| Error::Write {
        path: output.to_path_buf(),
        source,
    };

    let src = File::open(input).map_err(read_err)?;
    let permissions = match fs::metadata(output) {
        Ok(meta) => meta.permissions(),
        Err(_) => src.metadata().map_err(read_err)?.permissions(),
    };

    let dir = match output.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let tmp = tempfile::Builder::new()
        .prefix(".linefold-")
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(write_err)?;

    let mut folder = LineFolder::new(BufWriter::new(tmp));
    let mut reader = BufReader::new(src);
    let mut line = Vec::new();
    loop {
        line.clear();
        // Dropping `folder` on an early return deletes the temporary file.
        if reader.read_until(b'\n', &mut line).map_err(read_err)? == 0 {
            break;
        }
        folder.push_line(&line).map_err(write_err)?;
    }
    let (writer, summary) = folder.finish().map_err(write_err)?;
    let tmp = writer
        .into_inner()
        .map_err(|e| write_err(e.into_error()))?;

    tmp.as_file().set_permissions(permissions).map_err(write_err)?;
    tmp.persist(output).map_err(|e| write_err(e.error))?;

    log::debug!(
        "folded {} -> {}: {} lines, {} joined",
        input.display(),
        output.display(),
        summary.lines,
        summary.joined
    );
    Ok(summary)
}
