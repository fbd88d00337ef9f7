//! Serialization for integer grids
//!
//! Mixed text header + binary data format.
//!
//! ```text
//! \nGrid Version 1\n
//! w = W, h = H, c = C, nbytes = N\n
//! <raw i32 data, little-endian, N bytes>
//! \n
//! ```

use crate::error::{Error, Result};
use crate::grid::Grid;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Grid format version
const GRID_VERSION: i32 = 1;

/// Maximum value count for a serialized grid (2^29)
const MAX_GRID_VALUES: u64 = 1 << 29;

/// Maximum input size in bytes.
const MAX_INPUT_SIZE: u64 = 500_000_000;

impl Grid<i32> {
    /// Read a grid from a reader.
    pub fn read_from_reader(reader: &mut impl Read) -> Result<Self> {
        let mut buf = Vec::new();
        reader.take(MAX_INPUT_SIZE + 1).read_to_end(&mut buf)?;
        if buf.len() as u64 > MAX_INPUT_SIZE {
            return Err(Error::DecodeError(format!(
                "input too large: exceeds maximum allowed size of {MAX_INPUT_SIZE} bytes"
            )));
        }
        Self::read_from_bytes(&buf)
    }

    /// Read a grid from a file.
    pub fn read_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path.as_ref())?;
        Self::read_from_reader(&mut BufReader::new(file))
    }

    /// Read a grid from a byte slice.
    pub fn read_from_bytes(data: &[u8]) -> Result<Self> {
        let (w, h, c, nbytes, header_end) = parse_header(data)?;

        let nvalues = w as u64 * h as u64 * c as u64;
        if nvalues > MAX_GRID_VALUES {
            return Err(Error::DecodeError(format!(
                "grid too large: {nvalues} values exceeds maximum {MAX_GRID_VALUES}"
            )));
        }
        let expected_nbytes = nvalues * 4;
        if nbytes != expected_nbytes {
            return Err(Error::DecodeError(format!(
                "grid nbytes mismatch: header says {nbytes} but w*h*c*4 = {expected_nbytes}"
            )));
        }

        let binary_end = header_end + nbytes as usize;
        if data.len() < binary_end {
            return Err(Error::DecodeError(format!(
                "grid data truncated: need {binary_end} bytes but only have {}",
                data.len()
            )));
        }

        let values: Vec<i32> = data[header_end..binary_end]
            .chunks_exact(4)
            .map(|chunk| i32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
            .collect();

        Grid::from_data(w, h, c, values)
    }

    /// Write a grid to a writer.
    pub fn write_to_writer(&self, writer: &mut impl Write) -> Result<()> {
        let nbytes = self.data.len() as u64 * 4;
        writeln!(writer, "\nGrid Version {GRID_VERSION}")?;
        writeln!(
            writer,
            "w = {}, h = {}, c = {}, nbytes = {nbytes}",
            self.width, self.height, self.channels
        )?;

        for &val in &self.data {
            writer.write_all(&val.to_le_bytes())?;
        }

        writeln!(writer)?;
        Ok(())
    }

    /// Write a grid to a file.
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path.as_ref())?;
        let mut writer = BufWriter::new(file);
        self.write_to_writer(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Write a grid to a byte vector.
    pub fn write_to_bytes(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.write_to_writer(&mut buf)?;
        Ok(buf)
    }
}

/// Take one `\n`-terminated line starting at `pos`.
fn next_line(data: &[u8], pos: usize) -> Result<(&str, usize)> {
    let rest = data
        .get(pos..)
        .ok_or_else(|| Error::DecodeError("unexpected end of header".to_string()))?;
    let len = rest
        .iter()
        .position(|&b| b == b'\n')
        .ok_or_else(|| Error::DecodeError("unterminated header line".to_string()))?;
    let line = std::str::from_utf8(&rest[..len])
        .map_err(|_| Error::DecodeError("header is not valid UTF-8".to_string()))?;
    Ok((line, pos + len + 1))
}

fn parse_field<T: std::str::FromStr>(part: &str, key: &str) -> Result<T> {
    let value = part
        .trim()
        .strip_prefix(key)
        .and_then(|s| s.trim_start().strip_prefix('='))
        .ok_or_else(|| Error::DecodeError(format!("missing header field '{key}'")))?;
    value
        .trim()
        .parse()
        .map_err(|_| Error::DecodeError(format!("invalid value for header field '{key}'")))
}

/// Returns (w, h, c, nbytes, offset of binary payload).
fn parse_header(data: &[u8]) -> Result<(u32, u32, u32, u64, usize)> {
    let (blank, pos) = next_line(data, 0)?;
    if !blank.is_empty() {
        return Err(Error::DecodeError("missing leading newline".to_string()));
    }

    let (version_line, pos) = next_line(data, pos)?;
    let version: i32 = version_line
        .strip_prefix("Grid Version ")
        .and_then(|v| v.trim().parse().ok())
        .ok_or_else(|| Error::DecodeError("not a serialized grid".to_string()))?;
    if version != GRID_VERSION {
        return Err(Error::DecodeError(format!(
            "invalid grid version: {version}"
        )));
    }

    let (dims_line, pos) = next_line(data, pos)?;
    let parts: Vec<&str> = dims_line.split(',').collect();
    if parts.len() != 4 {
        return Err(Error::DecodeError(format!(
            "malformed dimension line: '{dims_line}'"
        )));
    }
    let w = parse_field(parts[0], "w")?;
    let h = parse_field(parts[1], "h")?;
    let c = parse_field(parts[2], "c")?;
    let nbytes = parse_field(parts[3], "nbytes")?;

    Ok((w, h, c, nbytes, pos))
}
