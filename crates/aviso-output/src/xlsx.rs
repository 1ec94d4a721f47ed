//! Spreadsheet master sheet.
//!
//! The workbook is built from a polars frame holding the same header and rows
//! as the CSV output. The writer is behind the `xlsx` feature; without it
//! [`write_xlsx`] returns [`OutputError::XlsxUnavailable`].

use std::path::Path;

use aviso_model::HtsEntry;

use crate::error::{OutputError, Result};

/// Returns true when spreadsheet output was compiled in.
pub const fn xlsx_available() -> bool {
    cfg!(feature = "xlsx")
}

/// Fail with [`OutputError::XlsxUnavailable`] when the capability is missing.
pub fn ensure_xlsx_available() -> Result<()> {
    require_capability(xlsx_available())
}

fn require_capability(available: bool) -> Result<()> {
    if available {
        Ok(())
    } else {
        Err(OutputError::XlsxUnavailable)
    }
}

#[cfg(not(feature = "xlsx"))]
pub fn write_xlsx(_entries: &[HtsEntry], _path: &Path) -> Result<usize> {
    require_capability(false)?;
    Ok(0)
}


#[cfg(feature = "xlsx")]
pub use frame::{build_master_frame, write_xlsx};

#[cfg(feature = "xlsx")]
mod frame {
    use super::{HtsEntry, OutputError, Path, Result};

    use polars::prelude::{AnyValue, Column, DataFrame, IntoColumn, NamedFrom, Series};
    use rust_xlsxwriter::{Workbook, Worksheet, XlsxError};
    use tracing::info;

    use aviso_model::MASTER_SHEET_HEADER;

    use crate::common::ensure_parent_dir;

    /// Build the master sheet as a frame of string columns.
    pub fn build_master_frame(entries: &[HtsEntry]) -> Result<DataFrame> {
        let columns: Vec<Column> = MASTER_SHEET_HEADER
            .iter()
            .enumerate()
            .map(|(idx, name)| {
                let values: Vec<&str> = entries.iter().map(|entry| entry.to_row()[idx]).collect();
                Series::new((*name).into(), values).into_column()
            })
            .collect();
        DataFrame::new(columns).map_err(|err| OutputError::Frame {
            message: err.to_string(),
        })
    }

    /// Write a single-sheet workbook with a header row and no index column.
    pub fn write_xlsx(entries: &[HtsEntry], path: &Path) -> Result<usize> {
        let frame = build_master_frame(entries)?;
        ensure_parent_dir(path)?;

        let workbook_error = |err: XlsxError| OutputError::Workbook {
            path: path.to_path_buf(),
            message: err.to_string(),
        };
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        write_frame(worksheet, &frame).map_err(|err| match err {
            FrameWriteError::Frame(message) => OutputError::Frame { message },
            FrameWriteError::Xlsx(err) => workbook_error(err),
        })?;
        workbook.save(path).map_err(workbook_error)?;

        info!(path = %path.display(), rows = frame.height(), "xlsx written");
        Ok(frame.height())
    }

    enum FrameWriteError {
        Frame(String),
        Xlsx(XlsxError),
    }

    impl From<XlsxError> for FrameWriteError {
        fn from(err: XlsxError) -> Self {
            Self::Xlsx(err)
        }
    }

    fn write_frame(
        worksheet: &mut Worksheet,
        frame: &DataFrame,
    ) -> std::result::Result<(), FrameWriteError> {
        for (row_idx, row) in frame_cells(frame)?.iter().enumerate() {
            let row_num = u32::try_from(row_idx)
                .map_err(|_| FrameWriteError::Frame("too many rows".to_string()))?;
            for (col_idx, value) in row.iter().enumerate() {
                let col = u16::try_from(col_idx)
                    .map_err(|_| FrameWriteError::Frame("too many columns".to_string()))?;
                worksheet.write_string(row_num, col, value)?;
            }
        }
        Ok(())
    }

    /// Sheet contents row by row: the column names first, then one row per
    /// frame row.
    fn frame_cells(frame: &DataFrame) -> std::result::Result<Vec<Vec<String>>, FrameWriteError> {
        let columns = frame.get_columns();
        let mut cells = Vec::with_capacity(frame.height() + 1);
        cells.push(
            columns
                .iter()
                .map(|column| column.name().to_string())
                .collect(),
        );
        for row_idx in 0..frame.height() {
            let row = columns
                .iter()
                .map(|column| {
                    column
                        .get(row_idx)
                        .map(cell_text)
                        .map_err(|err| FrameWriteError::Frame(err.to_string()))
                })
                .collect::<std::result::Result<Vec<String>, FrameWriteError>>()?;
            cells.push(row);
        }
        Ok(cells)
    }

    fn cell_text(value: AnyValue<'_>) -> String {
        match value {
            AnyValue::Null => String::new(),
            AnyValue::String(s) => s.to_string(),
            AnyValue::StringOwned(s) => s.to_string(),
            other => other.to_string(),
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use aviso_model::{HtsDetail, Industry};

        fn entries() -> Vec<HtsEntry> {
            let industry = Industry::new("auto", "Automotive").with_sector("Manufacturing");
            vec![
                HtsEntry::new(
                    &industry,
                    HtsDetail {
                        code: "8703.23".to_string(),
                        requires_notice: true,
                        ..HtsDetail::default()
                    },
                ),
                HtsEntry::new(
                    &industry,
                    HtsDetail {
                        code: "8708.29".to_string(),
                        ..HtsDetail::default()
                    },
                ),
            ]
        }

        #[test]
        fn frame_matches_header_and_rows() {
            let frame = build_master_frame(&entries()).expect("build frame");
            let names: Vec<&str> = frame
                .get_column_names()
                .into_iter()
                .map(|name| name.as_str())
                .collect();

            assert_eq!(names, MASTER_SHEET_HEADER.to_vec());
            assert_eq!(frame.height(), 2);
            let labels = frame
                .column("requiere_aviso_automatico")
                .expect("label column");
            assert_eq!(cell_text(labels.get(0).expect("row 0")), "Sí");
            assert_eq!(cell_text(labels.get(1).expect("row 1")), "No");
        }

        #[test]
        fn sheet_cells_put_header_in_first_row() {
            let frame = build_master_frame(&entries()).expect("build frame");
            let Ok(cells) = frame_cells(&frame) else {
                panic!("frame cells");
            };

            assert_eq!(cells.len(), 3);
            assert_eq!(cells[0], MASTER_SHEET_HEADER.to_vec());
            assert_eq!(cells[1][3], "8703.23");
            assert_eq!(cells[1][5], "Sí");
            assert_eq!(cells[2][5], "No");
            assert_eq!(cells[2][9], "auto");
        }

        #[test]
        fn empty_entries_build_header_only_frame() {
            let frame = build_master_frame(&[]).expect("build frame");
            assert_eq!(frame.width(), MASTER_SHEET_HEADER.len());
            assert_eq!(frame.height(), 0);
        }
    }
}
