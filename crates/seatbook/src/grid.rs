//! Cabin layout and the seat grid.
//!
//! A [`Layout`] is the configured shape of the cabin: one string per row using
//! the codes `F` (free), `R` (preset reservation), `X` (aisle) and `S`
//! (storage). A [`Grid`] is the live status of every cell.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::seat::{SeatId, SeatStatus};

/// What a layout says a cell starts as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    /// Bookable seat.
    Free,
    /// Bookable seat that starts out held.
    Reserved,
    /// Aisle.
    Aisle,
    /// Storage area.
    Storage,
}

impl CellKind {
    fn from_code(code: char) -> Option<Self> {
        match code.to_ascii_uppercase() {
            'F' => Some(Self::Free),
            'R' => Some(Self::Reserved),
            'X' => Some(Self::Aisle),
            'S' => Some(Self::Storage),
            _ => None,
        }
    }
}

/// A validated rectangular cabin layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    rows: Vec<Vec<CellKind>>,
}

impl Layout {
    /// Parse a layout from row strings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLayout`] if there are no rows, rows differ in
    /// width, a row is wider than 26 columns, or a code is unknown.
    pub fn parse<S: AsRef<str>>(rows: &[S]) -> Result<Self> {
        if rows.is_empty() {
            return Err(Error::invalid_layout("the cabin has no rows"));
        }

        let mut parsed = Vec::with_capacity(rows.len());
        for (index, row) in rows.iter().enumerate() {
            let row = row.as_ref().trim();
            let cells = row
                .chars()
                .filter(|c| !c.is_whitespace())
                .map(|code| {
                    CellKind::from_code(code).ok_or_else(|| {
                        Error::invalid_layout(format!(
                            "row {} has unknown cell code '{code}'",
                            index + 1
                        ))
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            parsed.push(cells);
        }

        let width = parsed[0].len();
        if width == 0 {
            return Err(Error::invalid_layout("row 1 is empty"));
        }
        if width > 26 {
            return Err(Error::invalid_layout(format!(
                "rows may have at most 26 columns, found {width}"
            )));
        }
        if let Some(index) = parsed.iter().position(|row| row.len() != width) {
            return Err(Error::invalid_layout(format!(
                "row {} has {} cells, expected {width}",
                index + 1,
                parsed[index].len()
            )));
        }

        Ok(Self { rows: parsed })
    }

    /// Number of rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns.
    #[must_use]
    pub fn columns(&self) -> usize {
        self.rows[0].len()
    }

    /// Every cell with its seat id, row-major.
    pub fn cells(&self) -> impl Iterator<Item = (SeatId, CellKind)> + '_ {
        self.rows.iter().enumerate().flat_map(|(r, row)| {
            row.iter().enumerate().filter_map(move |(c, kind)| {
                SeatId::from_indices(r, c).map(|seat| (seat, *kind))
            })
        })
    }
}

/// Live status of every cell in the cabin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Grid {
    cells: Vec<Vec<SeatStatus>>,
}

impl Grid {
    /// Build a grid from a layout.
    ///
    /// Preset reservations start `Free`; the ledger turns them into bookings.
    #[must_use]
    pub fn from_layout(layout: &Layout) -> Self {
        let cells = layout
            .rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|kind| match kind {
                        CellKind::Free | CellKind::Reserved => SeatStatus::Free,
                        CellKind::Aisle => SeatStatus::Aisle,
                        CellKind::Storage => SeatStatus::Storage,
                    })
                    .collect()
            })
            .collect();
        Self { cells }
    }

    /// Number of rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    /// Number of columns.
    #[must_use]
    pub fn columns(&self) -> usize {
        self.cells.first().map_or(0, Vec::len)
    }

    /// Whether the seat lies inside the grid.
    #[must_use]
    pub fn contains(&self, seat: &SeatId) -> bool {
        self.get(seat).is_some()
    }

    /// Status of a seat, or `None` if it is outside the grid.
    #[must_use]
    pub fn get(&self, seat: &SeatId) -> Option<&SeatStatus> {
        let row = seat.row_index()?;
        let column = seat.column_index()?;
        self.cells.get(row)?.get(column)
    }

    /// Replace the status of a seat, returning the previous status.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSeat`] if the seat is outside the grid.
    pub fn set(&mut self, seat: &SeatId, status: SeatStatus) -> Result<SeatStatus> {
        let cell = seat
            .row_index()
            .zip(seat.column_index())
            .and_then(|(row, column)| self.cells.get_mut(row)?.get_mut(column))
            .ok_or_else(|| Error::invalid_seat(seat.to_string()))?;
        Ok(std::mem::replace(cell, status))
    }

    /// Count seats that are free.
    #[must_use]
    pub fn count_free(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|status| **status == SeatStatus::Free)
            .count()
    }

    /// Every cell with its seat id, row-major.
    pub fn iter(&self) -> impl Iterator<Item = (SeatId, &SeatStatus)> + '_ {
        self.cells.iter().enumerate().flat_map(|(r, row)| {
            row.iter()
                .enumerate()
                .filter_map(move |(c, status)| SeatId::from_indices(r, c).map(|seat| (seat, status)))
        })
    }

    /// Status codes row by row, as strings like `"FFXFF"`.
    #[must_use]
    pub fn codes(&self) -> Vec<String> {
        self.cells
            .iter()
            .map(|row| row.iter().map(SeatStatus::code).collect())
            .collect()
    }

    /// Render the grid with letter column labels and 1-based row labels.
    ///
    /// ```text
    ///    A B C D E
    /// 1  F F X F F
    /// ```
    #[must_use]
    pub fn render(&self) -> String {
        let label_width = self.rows().to_string().len();
        let header: Vec<String> = (0..self.columns())
            .filter_map(|c| SeatId::from_indices(0, c).map(|seat| seat.column.to_string()))
            .collect();

        let mut out = format!("{:width$}  {}\n", "", header.join(" "), width = label_width);
        for (index, row) in self.codes().iter().enumerate() {
            let cells: Vec<String> = row.chars().map(String::from).collect();
            out.push_str(&format!(
                "{:<width$}  {}\n",
                index + 1,
                cells.join(" "),
                width = label_width
            ));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::BookingReference;

    fn sample_layout() -> Layout {
        Layout::parse(&["FFXFF", "FRXFS", "FFXRF"]).unwrap()
    }

    #[test]
    fn test_parse_sample_layout() {
        let layout = sample_layout();
        assert_eq!(layout.rows(), 3);
        assert_eq!(layout.columns(), 5);

        let reserved: Vec<_> = layout
            .cells()
            .filter(|(_, kind)| *kind == CellKind::Reserved)
            .map(|(seat, _)| seat.to_string())
            .collect();
        assert_eq!(reserved, vec!["2B", "3D"]);
    }

    #[test]
    fn test_parse_ignores_spaces_and_case() {
        let layout = Layout::parse(&["f f x", "F S X"]).unwrap();
        assert_eq!(layout.columns(), 3);
    }

    #[test]
    fn test_parse_rejects_empty() {
        let rows: [&str; 0] = [];
        assert!(matches!(
            Layout::parse(&rows),
            Err(Error::InvalidLayout { .. })
        ));
        assert!(Layout::parse(&[""]).is_err());
    }

    #[test]
    fn test_parse_rejects_ragged_rows() {
        let err = Layout::parse(&["FFF", "FF"]).unwrap_err();
        assert!(err.to_string().contains("row 2 has 2 cells"));
    }

    #[test]
    fn test_parse_rejects_unknown_code() {
        let err = Layout::parse(&["FFQ"]).unwrap_err();
        assert!(err.to_string().contains("'Q'"));
    }

    #[test]
    fn test_parse_rejects_wide_rows() {
        let row = "F".repeat(27);
        assert!(Layout::parse(&[row]).is_err());
        let row = "F".repeat(26);
        assert!(Layout::parse(&[row]).is_ok());
    }

    #[test]
    fn test_grid_from_layout() {
        let grid = Grid::from_layout(&sample_layout());
        assert_eq!(grid.rows(), 3);
        assert_eq!(grid.columns(), 5);
        // Preset reservations start free until the ledger seeds them.
        assert_eq!(grid.get(&SeatId::new(2, 'B')), Some(&SeatStatus::Free));
        assert_eq!(grid.get(&SeatId::new(1, 'C')), Some(&SeatStatus::Aisle));
        assert_eq!(grid.get(&SeatId::new(2, 'E')), Some(&SeatStatus::Storage));
        assert_eq!(grid.count_free(), 11);
    }

    #[test]
    fn test_get_out_of_bounds() {
        let grid = Grid::from_layout(&sample_layout());
        assert!(grid.get(&SeatId::new(4, 'A')).is_none());
        assert!(grid.get(&SeatId::new(1, 'F')).is_none());
        assert!(!grid.contains(&SeatId::new(9, 'Z')));
        assert!(grid.contains(&SeatId::new(3, 'E')));
    }

    #[test]
    fn test_set_returns_previous() {
        let mut grid = Grid::from_layout(&sample_layout());
        let reference = BookingReference::parse("AAAA1111").unwrap();
        let seat = SeatId::new(1, 'A');

        let previous = grid.set(&seat, SeatStatus::Reserved(reference.clone())).unwrap();
        assert_eq!(previous, SeatStatus::Free);
        assert_eq!(grid.get(&seat), Some(&SeatStatus::Reserved(reference)));
        assert_eq!(grid.count_free(), 10);

        assert!(grid.set(&SeatId::new(5, 'A'), SeatStatus::Free).is_err());
    }

    #[test]
    fn test_render() {
        let mut grid = Grid::from_layout(&sample_layout());
        let reference = BookingReference::parse("AAAA1111").unwrap();
        grid.set(&SeatId::new(2, 'B'), SeatStatus::Reserved(reference))
            .unwrap();

        let rendered = grid.render();
        let lines: Vec<_> = rendered.lines().collect();
        assert_eq!(lines[0], "   A B C D E");
        assert_eq!(lines[1], "1  F F X F F");
        assert_eq!(lines[2], "2  F R X F S");
        assert_eq!(lines[3], "3  F F X F F");
    }

    #[test]
    fn test_render_pads_wide_row_labels() {
        let rows = vec!["FF"; 10];
        let grid = Grid::from_layout(&Layout::parse(&rows).unwrap());
        let rendered = grid.render();
        let lines: Vec<_> = rendered.lines().collect();
        assert_eq!(lines[0], "    A B");
        assert_eq!(lines[1], "1   F F");
        assert_eq!(lines[10], "10  F F");
    }

    #[test]
    fn test_iter_is_row_major() {
        let grid = Grid::from_layout(&Layout::parse(&["FX", "SF"]).unwrap());
        let seats: Vec<_> = grid.iter().map(|(seat, _)| seat.to_string()).collect();
        assert_eq!(seats, vec!["1A", "1B", "2A", "2B"]);
    }
}
