use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use anyhow::{bail, Context, Result};
use ndarray::Array2;
use crate::drivers::AdjustedVector;
/// Saves a run of adjusted vectors as a headered CSV matrix, one vector per
/// row. The format is shared with the training pipeline: `rec` fits its
/// model from files written here by `save`.
pub fn save_matrix(path: &Path, vectors: &[AdjustedVector]) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    write_matrix(BufWriter::new(file), vectors)
        .with_context(|| format!("failed to write matrix to {}", path.display()))?;
    log::info!("saved {} vector(s) to {}", vectors.len(), path.display());
    Ok(())
}
pub fn write_matrix<W: Write>(mut writer: W, vectors: &[AdjustedVector]) -> Result<()> {
    let Some(first) = vectors.first() else {
        bail!("no vectors to save");
    };
    let width = first.values.len();
    let header: Vec<String> = (0..width).map(|i| format!("Ch{i}")).collect();
    writeln!(writer, "{}", header.join(","))?;
    for (row, vector) in vectors.iter().enumerate() {
        if vector.values.len() != width {
            bail!(
                "row {row} has {} channel(s), expected {width}",
                vector.values.len()
            );
        }
        let cells: Vec<String> = vector.values.iter().map(|v| format!("{v:.6}")).collect();
        writeln!(writer, "{}", cells.join(","))?;
    }
    writer.flush()?;
    Ok(())
}
/// Loads a matrix previously written by [`save_matrix`].
pub fn load_matrix(path: &Path) -> Result<Array2<f32>> {
    let file = File::open(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    read_matrix(BufReader::new(file))
        .with_context(|| format!("failed to parse matrix from {}", path.display()))
}
pub fn read_matrix<R: BufRead>(reader: R) -> Result<Array2<f32>> {
    let mut lines = reader.lines();
    let Some(header) = lines.next().transpose()? else {
        bail!("file is empty; expected a Ch0.. header line");
    };
    let width = header.split(',').count();
    let mut flat = Vec::new();
    let mut rows = 0usize;
    for (index, line) in lines.enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let cells: Vec<&str> = line.split(',').collect();
        if cells.len() != width {
            bail!(
                "line {}: expected {width} cell(s), found {}",
                index + 2,
                cells.len()
            );
        }
        for cell in cells {
            let value: f32 = cell
                .trim()
                .parse()
                .with_context(|| format!("line {}: bad number {cell:?}", index + 2))?;
            flat.push(value);
        }
        rows += 1;
    }
    if rows == 0 {
        bail!("file has a header but no data rows");
    }
    Array2::from_shape_vec((rows, width), flat).context("matrix shape mismatch")
}
