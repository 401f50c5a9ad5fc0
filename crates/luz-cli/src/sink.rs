//! XLSX report sink backed by rust_xlsxwriter.

use std::path::PathBuf;

use rust_xlsxwriter::{Format, Workbook, XlsxError};

use luz_core::error::ReportError;
use luz_core::report::{Cell, Report, TabularSink};

/// Writes the assembled report to a workbook on disk.
pub struct XlsxSink {
    path: PathBuf,
}

impl XlsxSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TabularSink for XlsxSink {
    fn write(&mut self, report: &Report) -> Result<(), ReportError> {
        let mut workbook = Workbook::new();
        let header_format = Format::new().set_bold();

        for sheet in &report.sheets {
            let worksheet = workbook.add_worksheet();
            worksheet.set_name(&sheet.name).map_err(sink_err)?;

            for (r, row) in sheet.rows.iter().enumerate() {
                let r = r as u32;
                for (c, cell) in row.iter().enumerate() {
                    let c = c as u16;
                    match cell {
                        Cell::Empty => {}
                        Cell::Text(v) => {
                            if r == 0 {
                                worksheet
                                    .write_string_with_format(r, c, v, &header_format)
                                    .map_err(sink_err)?;
                            } else {
                                worksheet.write_string(r, c, v).map_err(sink_err)?;
                            }
                        }
                        Cell::Number(v) => {
                            worksheet.write_number(r, c, *v).map_err(sink_err)?;
                        }
                        Cell::Date(d) => {
                            worksheet
                                .write_string(r, c, &d.format("%d/%m/%Y").to_string())
                                .map_err(sink_err)?;
                        }
                        Cell::Bool(b) => {
                            worksheet.write_boolean(r, c, *b).map_err(sink_err)?;
                        }
                    }
                }
            }
        }

        workbook.save(&self.path).map_err(sink_err)?;
        Ok(())
    }
}

fn sink_err(e: XlsxError) -> ReportError {
    ReportError::Sink(e.to_string())
}
