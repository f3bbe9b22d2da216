//! Minimal RFC 4180 reader and writer.
//!
//! Fields containing a comma, quote, CR, or LF are written inside double
//! quotes with embedded quotes doubled. Records end with CRLF. The reader
//! accepts CRLF, LF, or bare CR record separators and a leading UTF-8 BOM.

use crate::error::{SeatingError, SeatingResult};

/// One parsed record and the physical line it started on (1-based).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub line: usize,
    pub fields: Vec<String>,
}

impl Record {
    pub fn is_blank(&self) -> bool {
        self.fields.iter().all(|f| f.trim().is_empty())
    }

    /// Field at `index`, or "" when the row is short.
    pub fn get(&self, index: usize) -> &str {
        self.fields.get(index).map_or("", String::as_str)
    }
}

pub fn needs_quoting(field: &str) -> bool {
    field.contains([',', '"', '\n', '\r'])
}

pub fn escape(field: &str) -> String {
    if needs_quoting(field) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Appends one record, terminated by CRLF.
pub fn write_record<S: AsRef<str>>(out: &mut String, fields: &[S]) {
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(&escape(field.as_ref()));
    }
    out.push_str("\r\n");
}

pub fn parse(text: &str) -> SeatingResult<Vec<Record>> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut records = Vec::new();
    let mut fields: Vec<String> = Vec::new();
    let mut field = String::new();

    let mut in_quotes = false;
    // Set after a quoted field closes: only a delimiter may follow.
    let mut after_quote = false;
    let mut record_started = false;

    let mut line = 1;
    let mut record_line = 1;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => {
                    in_quotes = false;
                    after_quote = true;
                }
                '\n' => {
                    line += 1;
                    field.push(c);
                }
                _ => field.push(c),
            }
            continue;
        }

        match c {
            ',' => {
                fields.push(std::mem::take(&mut field));
                after_quote = false;
                record_started = true;
            }
            '\r' | '\n' => {
                if c == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
                fields.push(std::mem::take(&mut field));
                records.push(Record {
                    line: record_line,
                    fields: std::mem::take(&mut fields),
                });
                after_quote = false;
                record_started = false;
                line += 1;
                record_line = line;
            }
            '"' if field.is_empty() && !after_quote => {
                in_quotes = true;
                record_started = true;
            }
            _ if after_quote => {
                return Err(SeatingError::MalformedCsv {
                    line,
                    reason: format!("unexpected '{}' after closing quote", c),
                });
            }
            _ => {
                field.push(c);
                record_started = true;
            }
        }
    }

    if in_quotes {
        return Err(SeatingError::MalformedCsv {
            line: record_line,
            reason: "unterminated quoted field".into(),
        });
    }
    if record_started {
        fields.push(field);
        records.push(Record {
            line: record_line,
            fields,
        });
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(text: &str) -> Vec<Vec<String>> {
        parse(text).unwrap().into_iter().map(|r| r.fields).collect()
    }

    #[test]
    fn plain_fields_are_not_quoted() {
        let mut out = String::new();
        write_record(&mut out, &["Ana", "Pop", ""]);
        assert_eq!(out, "Ana,Pop,\r\n");
    }

    #[test]
    fn special_characters_are_quoted() {
        assert_eq!(escape("Smith, Jr."), "\"Smith, Jr.\"");
        assert_eq!(escape("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape("line\nbreak"), "\"line\nbreak\"");
    }

    #[test]
    fn parses_quoted_fields_with_embedded_delimiters() {
        let rows = fields("a,\"b, c\",\"d \"\"e\"\"\"\r\nx,\"multi\nline\",z\r\n");
        assert_eq!(rows[0], vec!["a", "b, c", "d \"e\""]);
        assert_eq!(rows[1], vec!["x", "multi\nline", "z"]);
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn tracks_start_line_across_multiline_fields() {
        let records = parse("h\n\"one\ntwo\"\nlast\n").unwrap();
        assert_eq!(records.iter().map(|r| r.line).collect::<Vec<_>>(), vec![1, 2, 4]);
    }

    #[test]
    fn accepts_missing_final_newline_and_bom() {
        let rows = fields("\u{feff}a,b\nc,d");
        assert_eq!(rows, vec![vec!["a", "b"], vec!["c", "d"]]);
    }

    #[test]
    fn keeps_empty_trailing_field() {
        assert_eq!(fields("a,\n"), vec![vec!["a", ""]]);
    }

    #[test]
    fn empty_quoted_field() {
        assert_eq!(fields("\"\",b\n"), vec![vec!["", "b"]]);
    }

    #[test]
    fn rejects_unterminated_quote() {
        assert!(matches!(
            parse("a,\"open\n"),
            Err(SeatingError::MalformedCsv { line: 1, .. })
        ));
    }

    #[test]
    fn rejects_text_after_closing_quote() {
        assert!(parse("\"a\"b,c\n").is_err());
    }

    #[test]
    fn written_records_parse_back() {
        let original = vec!["O'Neil, \"Red\"", "two\r\nlines", "plain"];
        let mut out = String::new();
        write_record(&mut out, &original);
        assert_eq!(fields(&out), vec![original]);
    }
}
