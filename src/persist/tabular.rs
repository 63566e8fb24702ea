//! Comma-separated output with a byte-order mark for spreadsheet tools.

use std::io::{self, Write};

use crate::record::QuestionRecord;

/// Leading marker spreadsheet tools use to detect UTF-8.
const UTF8_BOM: &str = "\u{feff}";

const HEADER: [&str; 4] = ["id", "question", "answer", "game"];

fn needs_quotes(field: &str) -> bool {
    field.contains([',', '"', '\n', '\r'])
}

fn write_field<W: Write>(w: &mut W, field: &str) -> io::Result<()> {
    if needs_quotes(field) {
        write!(w, "\"{}\"", field.replace('"', "\"\""))
    } else {
        w.write_all(field.as_bytes())
    }
}

fn write_row<W: Write>(w: &mut W, row: &[&str]) -> io::Result<()> {
    for (index, cell) in row.iter().enumerate() {
        if index > 0 {
            w.write_all(b",")?;
        }
        write_field(w, cell)?;
    }
    w.write_all(b"\r\n")
}

/// Writes a BOM, the `id,question,answer,game` header and one row per record.
pub(crate) fn write_records<W: Write>(mut w: W, records: &[QuestionRecord]) -> io::Result<()> {
    w.write_all(UTF8_BOM.as_bytes())?;
    write_row(&mut w, &HEADER)?;
    for record in records {
        let id = record.id.to_string();
        write_row(
            &mut w,
            &[
                id.as_str(),
                record.question.as_str(),
                record.answer.as_str(),
                record.game.as_str(),
            ],
        )?;
    }
    w.flush()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn render(records: &[QuestionRecord]) -> String {
        let mut buf = Vec::new();
        write_records(&mut buf, records).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_write_records_header_and_bom() {
        let out = render(&[]);
        assert_eq!(out, "\u{feff}id,question,answer,game\r\n");
    }

    #[test]
    fn test_write_records_plain_row() {
        let record = QuestionRecord::new(7, "고래는 포유류다", "O", "꽁꽁").unwrap();
        let out = render(&[record]);
        assert!(out.ends_with("7,고래는 포유류다,O,꽁꽁\r\n"), "got: {out}");
    }

    #[test]
    fn test_write_records_quotes_special_fields() {
        let record = QuestionRecord::new(1, "say \"hi\"", "a\nb", "OX,XO").unwrap();
        let out = render(&[record]);
        assert!(
            out.ends_with("1,\"say \"\"hi\"\"\",\"a\nb\",\"OX,XO\"\r\n"),
            "got: {out}"
        );
    }
}
