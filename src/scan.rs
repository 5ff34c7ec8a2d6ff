//! Binary pixel-mask scanning over a diagonal 2-D lattice.
//!
//! Reads a critical-region mask, flags every clear cell that borders the
//! critical region (8-adjacency), then subtracts a tumor mask so that only
//! border cells outside the tumor survive. Adjacency comes from a
//! diagonal-enabled [`Lattice`], which handles grid boundaries instead of
//! manual index checks; cell states live in [`Slot`] payloads.

use crate::graph::GraphError;
use crate::lattice::{Lattice, LatticeError, coordinate_name};
use crate::node::Slot;
use serde::Serialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

pub const SPECS_FILE: &str = "specs.txt";
pub const CRITICAL_FILE: &str = "critical_raw.txt";
pub const TUMOR_FILE: &str = "tumor_raw.txt";

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("missing {0} pixel resolution in specs file")]
    MissingResolution(&'static str),
    #[error("mask data ended early: expected {expected} values, found {found}")]
    UnexpectedEof { expected: usize, found: usize },
    #[error(transparent)]
    Lattice(#[from] LatticeError),
    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// Pixel grid dimensions parsed from a specs file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GridSpec {
    /// Vertical pixel resolution.
    pub rows: usize,
    /// Horizontal pixel resolution.
    pub cols: usize,
}

fn resolution_value(line: &str, label: &str) -> Option<usize> {
    let trimmed = line.trim();
    let mut chars = trimmed.chars();
    let first = chars.next()?;
    // The leading letter may be capitalized; the rest of the label may not.
    if !first.eq_ignore_ascii_case(&label.chars().next()?) {
        return None;
    }
    let rest = chars.as_str().strip_prefix(&label[1..])?;
    rest.trim().parse().ok()
}

impl GridSpec {
    /// Find the `vertical pixel resolution: N` and `horizontal pixel
    /// resolution: N` lines. Both are required.
    pub fn parse(text: &str) -> Result<GridSpec, ScanError> {
        let mut rows = None;
        let mut cols = None;
        for line in text.lines() {
            if let Some(value) = resolution_value(line, "vertical pixel resolution:") {
                rows = Some(value);
            }
            if let Some(value) = resolution_value(line, "horizontal pixel resolution:") {
                cols = Some(value);
            }
        }
        let rows = rows.ok_or(ScanError::MissingResolution("vertical"))?;
        let cols = cols.ok_or(ScanError::MissingResolution("horizontal"))?;
        Ok(GridSpec { rows, cols })
    }
}

/// State of one pixel during the scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Clear,
    Critical,
    /// A clear cell adjacent to the critical region; rendered as `X`.
    Border,
}

impl Cell {
    fn glyph(self) -> char {
        match self {
            Cell::Clear => '0',
            Cell::Critical => '1',
            Cell::Border => 'X',
        }
    }
}

/// Read `rows x cols` binary values, skipping everything that is not a `0`
/// or `1` (whitespace, separators). Running out of data is an error.
pub fn read_mask(text: &str, spec: &GridSpec) -> Result<Vec<Vec<u8>>, ScanError> {
    let expected = spec.rows * spec.cols;
    let mut values = text.chars().filter_map(|c| match c {
        '0' => Some(0u8),
        '1' => Some(1u8),
        _ => None,
    });

    let mut mask = vec![vec![0u8; spec.cols]; spec.rows];
    let mut found = 0;
    for row in mask.iter_mut() {
        for value in row.iter_mut() {
            match values.next() {
                Some(v) => {
                    *value = v;
                    found += 1;
                }
                None => return Err(ScanError::UnexpectedEof { expected, found }),
            }
        }
    }
    Ok(mask)
}

/// Render a binary mask, one row per line.
pub fn render_mask(mask: &[Vec<u8>]) -> String {
    let mut out = String::new();
    for row in mask {
        for value in row {
            out.push(if *value == 1 { '1' } else { '0' });
        }
        out.push('\n');
    }
    out
}

/// A critical-region scan in progress: one lattice node per pixel.
pub struct MaskScan {
    lattice: Lattice<Slot<Cell>>,
    spec: GridSpec,
}

impl MaskScan {
    pub fn new(spec: GridSpec, critical: &[Vec<u8>]) -> Result<Self, ScanError> {
        let mut lattice: Lattice<Slot<Cell>> = Lattice::build(&[spec.rows, spec.cols], true)?;
        for (i, row) in critical.iter().enumerate() {
            for (j, value) in row.iter().enumerate() {
                let cell = if *value == 1 {
                    Cell::Critical
                } else {
                    Cell::Clear
                };
                lattice
                    .get_node_mut(&coordinate_name(&[i, j]))?
                    .set_value(cell);
            }
        }
        Ok(MaskScan { lattice, spec })
    }

    pub fn spec(&self) -> GridSpec {
        self.spec
    }

    pub fn cell(&self, row: usize, col: usize) -> Result<Cell, ScanError> {
        let node = self.lattice.get_node(&coordinate_name(&[row, col]))?;
        Ok(node.value().copied().unwrap_or(Cell::Clear))
    }

    /// Mark every clear cell with at least one critical neighbor as a border
    /// cell. Corners and edges just have fewer lattice neighbors.
    pub fn mark_borders(&mut self) -> Result<(), ScanError> {
        let mut borders = Vec::new();
        for i in 0..self.spec.rows {
            for j in 0..self.spec.cols {
                if self.cell(i, j)? != Cell::Clear {
                    continue;
                }
                let name = coordinate_name(&[i, j]);
                for (neighbor, _) in self.lattice.neighbors_of(&name, None)? {
                    if self.lattice.get_node(&neighbor)?.value() == Some(&Cell::Critical) {
                        borders.push(name);
                        break;
                    }
                }
            }
        }
        for name in borders {
            self.lattice.get_node_mut(&name)?.set_value(Cell::Border);
        }
        Ok(())
    }

    /// Subtract the tumor mask. Clear and critical cells drop to 0; a border
    /// cell survives as 1 only where the tumor mask is 0.
    pub fn apply_tumor(&self, tumor: &[Vec<u8>]) -> Result<Vec<Vec<u8>>, ScanError> {
        let mut result = vec![vec![0u8; self.spec.cols]; self.spec.rows];
        for i in 0..self.spec.rows {
            for j in 0..self.spec.cols {
                result[i][j] = match self.cell(i, j)? {
                    Cell::Clear | Cell::Critical => 0,
                    Cell::Border => {
                        if tumor[i][j] == 1 {
                            0
                        } else {
                            1
                        }
                    }
                };
            }
        }
        Ok(result)
    }

    /// Current cell states, one row per line, border cells as `X`.
    pub fn render(&self) -> Result<String, ScanError> {
        let mut out = String::new();
        for i in 0..self.spec.rows {
            for j in 0..self.spec.cols {
                out.push(self.cell(i, j)?.glyph());
            }
            out.push('\n');
        }
        Ok(out)
    }
}

/// Every stage of a completed scan, pre-rendered for display.
#[derive(Debug, Serialize)]
pub struct ScanReport {
    pub spec: GridSpec,
    pub critical: String,
    pub bordered: String,
    pub tumor: String,
    pub result: String,
}

/// Run the whole pipeline on a folder holding `specs.txt`,
/// `critical_raw.txt` and `tumor_raw.txt`.
pub fn scan_folder(folder: &Path) -> Result<ScanReport, ScanError> {
    let spec = GridSpec::parse(&fs::read_to_string(folder.join(SPECS_FILE))?)?;
    let critical = read_mask(&fs::read_to_string(folder.join(CRITICAL_FILE))?, &spec)?;

    let mut scan = MaskScan::new(spec, &critical)?;
    let critical_render = scan.render()?;
    scan.mark_borders()?;
    let bordered = scan.render()?;

    let tumor = read_mask(&fs::read_to_string(folder.join(TUMOR_FILE))?, &spec)?;
    let result = scan.apply_tumor(&tumor)?;

    Ok(ScanReport {
        spec,
        critical: critical_render,
        bordered,
        tumor: render_mask(&tumor),
        result: render_mask(&result),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mask(rows: &[&str]) -> Vec<Vec<u8>> {
        rows.iter()
            .map(|row| row.bytes().map(|b| b - b'0').collect())
            .collect()
    }

    #[test]
    fn test_parse_spec() {
        let spec = GridSpec::parse(
            "Vertical pixel resolution: 4\nhorizontal pixel resolution: 6\n",
        )
        .unwrap();
        assert_eq!(spec, GridSpec { rows: 4, cols: 6 });
    }

    #[test]
    fn test_parse_spec_missing_resolution() {
        let err = GridSpec::parse("vertical pixel resolution: 4\n").unwrap_err();
        assert!(matches!(err, ScanError::MissingResolution("horizontal")));
    }

    #[test]
    fn test_read_mask_skips_filler() {
        let spec = GridSpec { rows: 2, cols: 2 };
        let mask = read_mask(" 0 1\n\n1  0 trailing", &spec).unwrap();
        assert_eq!(mask, vec![vec![0, 1], vec![1, 0]]);
    }

    #[test]
    fn test_read_mask_short_input() {
        let spec = GridSpec { rows: 2, cols: 2 };
        let err = read_mask("011", &spec).unwrap_err();
        assert!(matches!(
            err,
            ScanError::UnexpectedEof {
                expected: 4,
                found: 3
            }
        ));
    }

    #[test]
    fn test_mark_borders_eight_adjacency() {
        let spec = GridSpec { rows: 4, cols: 4 };
        let critical = mask(&["0000", "0110", "0110", "0000"]);
        let mut scan = MaskScan::new(spec, &critical).unwrap();
        scan.mark_borders().unwrap();

        // Everything around the 2x2 critical block is a border, including
        // the diagonal corners.
        assert_eq!(scan.render().unwrap(), "XXXX\nX11X\nX11X\nXXXX\n");
    }

    #[test]
    fn test_mark_borders_at_grid_edge() {
        let spec = GridSpec { rows: 2, cols: 3 };
        let critical = mask(&["100", "000"]);
        let mut scan = MaskScan::new(spec, &critical).unwrap();
        scan.mark_borders().unwrap();
        assert_eq!(scan.render().unwrap(), "1X0\nXX0\n");
    }

    #[test]
    fn test_apply_tumor_truth_table() {
        let spec = GridSpec { rows: 1, cols: 4 };
        // clear, critical, border (tumor), border (no tumor)
        let critical = mask(&["0100"]);
        let mut scan = MaskScan::new(spec, &critical).unwrap();
        scan.mark_borders().unwrap();
        assert_eq!(scan.render().unwrap(), "X1X0\n");

        let tumor = mask(&["1010"]);
        let result = scan.apply_tumor(&tumor).unwrap();
        assert_eq!(result, vec![vec![0, 0, 0, 0]]);

        let no_tumor = mask(&["0000"]);
        let result = scan.apply_tumor(&no_tumor).unwrap();
        assert_eq!(result, vec![vec![1, 0, 1, 0]]);
    }

    #[test]
    fn test_scan_folder_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(SPECS_FILE),
            "Vertical pixel resolution: 3\nHorizontal pixel resolution: 3\n",
        )
        .unwrap();
        std::fs::write(dir.path().join(CRITICAL_FILE), "000\n010\n000\n").unwrap();
        std::fs::write(dir.path().join(TUMOR_FILE), "111\n000\n000\n").unwrap();

        let report = scan_folder(dir.path()).unwrap();
        assert_eq!(report.critical, "000\n010\n000\n");
        assert_eq!(report.bordered, "XXX\nX1X\nXXX\n");
        assert_eq!(report.result, "000\n101\n111\n");
    }

    #[test]
    fn test_scan_folder_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            scan_folder(dir.path()).unwrap_err(),
            ScanError::Io(_)
        ));
    }
}
