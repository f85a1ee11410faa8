//! Matrix Market reader/writer
//!
//! Reads `coordinate` files into a one-based [`MatrixDescription`], which the
//! CSR builder normalises. Supported fields are `real`, `double`, `integer`
//! and `pattern` (every value 1.0); supported symmetries are `general`,
//! `symmetric` and `skew-symmetric`, the latter two mirrored across the
//! diagonal on read.

use std::fmt::Display;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use log::info;
use num_traits::Num;

use crate::constants::{MATRIX_MARKET_BANNER, MATRIX_MARKET_MAX_RESERVE};
use crate::error::{Error, Result};
use crate::matrix::{CsrMatrix, CsrPayload, IndexBase, MatrixDescription};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Real,
    Pattern,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Symmetry {
    General,
    Symmetric,
    SkewSymmetric,
}

fn parse_error(line: usize, reason: impl Into<String>) -> Error {
    Error::Parse {
        line,
        reason: reason.into(),
    }
}

fn parse_banner(line_no: usize, line: &str) -> Result<(Field, Symmetry)> {
    let tokens: Vec<String> = line.split_whitespace().map(|t| t.to_ascii_lowercase()).collect();
    if tokens.len() != 5 || tokens[1] != "matrix" {
        return Err(parse_error(line_no, "Invalid Matrix Market banner"));
    }
    if tokens[2] != "coordinate" {
        return Err(parse_error(line_no, format!("Unsupported format '{}'", tokens[2])));
    }

    let field = match tokens[3].as_str() {
        "real" | "double" | "integer" => Field::Real,
        "pattern" => Field::Pattern,
        other => return Err(parse_error(line_no, format!("Unsupported field '{}'", other))),
    };
    let symmetry = match tokens[4].as_str() {
        "general" => Symmetry::General,
        "symmetric" => Symmetry::Symmetric,
        "skew-symmetric" => Symmetry::SkewSymmetric,
        other => return Err(parse_error(line_no, format!("Unsupported symmetry '{}'", other))),
    };

    Ok((field, symmetry))
}

fn parse_index(line_no: usize, token: Option<&str>, what: &str) -> Result<usize> {
    token
        .ok_or_else(|| parse_error(line_no, format!("Missing {}", what)))?
        .parse()
        .map_err(|_| parse_error(line_no, format!("Invalid {}", what)))
}

/// Matrix Market format reader/writer
pub struct MatrixMarketIO;

impl MatrixMarketIO {
    /// Parses Matrix Market text from any buffered reader
    pub fn parse<R: BufRead>(reader: R) -> Result<MatrixDescription<f64>> {
        let mut lines = reader.lines().enumerate().map(|(i, l)| (i + 1, l));

        let mut field = Field::Real;
        let mut symmetry = Symmetry::General;

        // Skip comments and read the size line
        let mut size_line = None;
        for (line_no, line) in lines.by_ref() {
            let line = line?;
            if line.starts_with(MATRIX_MARKET_BANNER) {
                (field, symmetry) = parse_banner(line_no, &line)?;
                continue;
            }
            if line.starts_with('%') || line.trim().is_empty() {
                continue;
            }
            size_line = Some((line_no, line));
            break;
        }

        let (size_no, size_line) = size_line.ok_or_else(|| parse_error(0, "Missing size line"))?;
        let mut parts = size_line.split_whitespace();
        let rows = parse_index(size_no, parts.next(), "number of rows")?;
        let cols = parse_index(size_no, parts.next(), "number of columns")?;
        let nnz = parse_index(size_no, parts.next(), "number of non-zeros")?;

        if rows.checked_mul(cols).is_some_and(|cells| nnz > cells) {
            return Err(parse_error(
                size_no,
                format!("{} non-zeros do not fit a {} × {} matrix", nnz, rows, cols),
            ));
        }

        let capacity = match symmetry {
            Symmetry::General => nnz,
            _ => nnz.saturating_mul(2),
        }
        .min(MATRIX_MARKET_MAX_RESERVE);
        let mut entries = Vec::new();
        entries
            .try_reserve(capacity)
            .map_err(|_| Error::Allocation { elements: capacity })?;
        let mut read = 0;

        for (line_no, line) in lines {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('%') {
                continue;
            }
            if read == nnz {
                return Err(parse_error(line_no, format!("More than {} entries", nnz)));
            }

            let mut parts = trimmed.split_whitespace();
            let row = parse_index(line_no, parts.next(), "row index")?;
            let col = parse_index(line_no, parts.next(), "column index")?;
            let value: f64 = match field {
                Field::Pattern => 1.0,
                Field::Real => parts
                    .next()
                    .ok_or_else(|| parse_error(line_no, "Missing value"))?
                    .parse()
                    .map_err(|_| parse_error(line_no, "Invalid value"))?,
            };

            entries.push((row, col, value));
            match symmetry {
                Symmetry::General => {}
                Symmetry::Symmetric if row != col => entries.push((col, row, value)),
                Symmetry::SkewSymmetric if row != col => entries.push((col, row, -value)),
                _ => {}
            }
            read += 1;
        }

        if read != nnz {
            return Err(parse_error(
                size_no,
                format!("Expected {} entries, found {}", nnz, read),
            ));
        }

        info!(
            "read Matrix Market matrix: {} × {}, {} stored entries ({} expanded)",
            rows,
            cols,
            nnz,
            entries.len()
        );

        Ok(MatrixDescription::new(rows, cols, entries).with_base(IndexBase::One))
    }

    /// Reads a matrix description from a Matrix Market file
    pub fn read_description<P: AsRef<Path>>(path: P) -> Result<MatrixDescription<f64>> {
        let file = File::open(path)?;
        Self::parse(BufReader::new(file))
    }

    /// Reads a Matrix Market file straight into CSR
    pub fn read_csr<P: AsRef<Path>>(path: P) -> Result<CsrMatrix<f64>> {
        let description = Self::read_description(path)?;
        CsrMatrix::from_description(&description, CsrPayload::Full)
    }

    /// Writes a CSR matrix as a general real coordinate file
    pub fn write_csr<P, T>(path: P, matrix: &CsrMatrix<T>) -> Result<()>
    where
        P: AsRef<Path>,
        T: Copy + Num + Display,
    {
        matrix.require_payload()?;
        let mut file = BufWriter::new(File::create(path)?);

        writeln!(file, "{} matrix coordinate real general", MATRIX_MARKET_BANNER)?;
        writeln!(file, "{} {} {}", matrix.meta.rows, matrix.meta.cols, matrix.nnz())?;

        for i in 0..matrix.meta.rows {
            for (col, val) in matrix.row_iter(i) {
                // Convert to 1-indexed
                writeln!(file, "{} {} {}", i + 1, col + 1, val)?;
            }
        }

        file.flush()?;
        Ok(())
    }
}
