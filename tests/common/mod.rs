//! Shared fixtures: bank export workbooks built in memory

#![allow(dead_code)]

use rust_xlsxwriter::{Format, Workbook};

pub const AMOUNT: &str = "Сумма поступления / списания, руб";
pub const DATE: &str = "Дата поступления / списания";
pub const PERMIT: &str = "Разрешение на строительство";

/// A cell of a fixture sheet
#[derive(Debug, Clone)]
pub enum Value {
    Text(&'static str),
    Number(f64),
    /// Day serial written with a date number format
    Date(f64),
    Blank,
}

pub use Value::{Blank, Date, Number, Text};

/// A fixture sheet: name, header row, data rows
pub struct FixtureSheet {
    pub name: &'static str,
    pub header: Vec<&'static str>,
    pub rows: Vec<Vec<Value>>,
}

pub fn sheet(name: &'static str, header: &[&'static str], rows: Vec<Vec<Value>>) -> FixtureSheet {
    FixtureSheet {
        name,
        header: header.to_vec(),
        rows,
    }
}

/// Build an .xlsx export: six banner rows, then the header, then data
pub fn bank_export(sheets: &[FixtureSheet]) -> Vec<u8> {
    let mut workbook = Workbook::new();
    let date_format = Format::new().set_num_format("dd.mm.yyyy");

    for fixture in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(fixture.name).unwrap();
        worksheet
            .write_string(0, 0, "Выписка по счету эскроу")
            .unwrap();
        worksheet.write_string(2, 0, "ПАО Банк").unwrap();
        worksheet.write_string(4, 1, "Период выписки").unwrap();

        for (col, name) in fixture.header.iter().enumerate() {
            worksheet.write_string(6, col as u16, *name).unwrap();
        }

        for (idx, row) in fixture.rows.iter().enumerate() {
            let excel_row = 7 + idx as u32;
            for (col, value) in row.iter().enumerate() {
                let col = col as u16;
                match value {
                    Value::Text(s) => {
                        worksheet.write_string(excel_row, col, *s).unwrap();
                    }
                    Value::Number(n) => {
                        worksheet.write_number(excel_row, col, *n).unwrap();
                    }
                    Value::Date(serial) => {
                        worksheet
                            .write_number_with_format(excel_row, col, *serial, &date_format)
                            .unwrap();
                    }
                    Value::Blank => {}
                }
            }
        }
    }

    workbook.save_to_buffer().unwrap()
}
