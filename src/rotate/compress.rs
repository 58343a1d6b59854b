//! Keeping many plain-text backups wastes disk; gzip reclaims most of it
//! while keeping the content readable with standard tools.

use super::backups::gz_sibling;
use crate::error::Error;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use flate2::Compression;
use flate2::write::GzEncoder;

/// Compresses `path` to `path.gz` and removes the original. Chunked copy so
/// the whole backup never sits in memory.
pub(super) fn compress_backup(path: &Path) -> Result<(), Error> {
    let input = File::open(path)?;
    let mut reader = BufReader::new(input);

    let gz_path = gz_sibling(path);
    let output = File::create(&gz_path)?;
    let writer = BufWriter::new(output);
    let mut encoder = GzEncoder::new(writer, Compression::default());

    let mut buffer = [0u8; 8192];
    loop {
        let n = reader.read(&mut buffer)?;
        if n == 0 {
            break;
        }
        encoder.write_all(&buffer[..n])?;
    }
    encoder.finish()?;

    // The .gz now holds all content; remove the original to free the space.
    fs::remove_file(path)?;
    Ok(())
}
