use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use anyhow::{bail, Context, Result};
use tracing::debug;

use crate::common::Point;
use crate::grid::Grid;

/// Loads a benchmark-style map file: `type`, `height N`, `width M`, a `map`
/// marker, then one text row per grid row; `.` is passable, anything else blocked.
pub fn load(path: impl AsRef<Path>) -> Result<Grid> {
    let path = path.as_ref();
    let file =
        File::open(path).with_context(|| format!("cannot open map file {}", path.display()))?;
    parse(BufReader::new(file)).with_context(|| format!("malformed map file {}", path.display()))
}

pub fn parse(reader: impl BufRead) -> Result<Grid> {
    let mut lines = reader.lines();

    let _type = next_line(&mut lines, "type header")?;
    let rows = header_value(&next_line(&mut lines, "height header")?, "height")?;
    let columns = header_value(&next_line(&mut lines, "width header")?, "width")?;
    let marker = next_line(&mut lines, "map marker")?;
    if marker.trim() != "map" {
        bail!("expected map marker, found {marker:?}");
    }
    if columns == 0 || rows == 0 {
        bail!("map has zero dimension ({columns}x{rows})");
    }

    let mut grid = Grid::build(columns, rows);
    for y in 0..rows {
        let line = next_line(&mut lines, "terrain row")?;
        let row: Vec<char> = line.chars().collect();
        if row.len() != columns {
            bail!(
                "terrain row {} has {} cells, expected {}",
                y,
                row.len(),
                columns
            );
        }
        for (x, &glyph) in row.iter().enumerate() {
            if glyph != '.' {
                grid.set_passable(Point::new(x as i32, y as i32), false)?;
            }
        }
    }

    debug!("loaded {columns}x{rows} map");
    Ok(grid)
}

fn next_line(
    lines: &mut impl Iterator<Item = io::Result<String>>,
    what: &str,
) -> Result<String> {
    lines
        .next()
        .with_context(|| format!("map file ended early, expected {what}"))?
        .with_context(|| format!("read error at {what}"))
}

fn header_value(line: &str, name: &str) -> Result<usize> {
    let rest = line
        .strip_prefix(name)
        .with_context(|| format!("expected {name} header, found {line:?}"))?;
    rest.trim()
        .parse()
        .with_context(|| format!("bad {name} value in {line:?}"))
}
