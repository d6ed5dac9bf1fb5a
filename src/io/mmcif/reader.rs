use crate::io::{Format, error::Error};
use std::io::BufRead;

/// One mmCIF category: its attribute names (without the `_category.` prefix) and the
/// value rows, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Category {
    pub name: String,
    pub fields: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// Line on which each row starts.
    pub row_lines: Vec<usize>,
}

impl Category {
    pub fn field_index(&self, field: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.eq_ignore_ascii_case(field))
    }

    pub fn value(&self, row: usize, field: &str) -> Option<&str> {
        let column = self.field_index(field)?;
        self.rows.get(row)?.get(column).map(String::as_str)
    }

    pub fn line(&self, row: usize) -> Option<usize> {
        self.row_lines.get(row).copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Extracts a single category, in either loop or key-value form. Returns `None` when the
/// document does not contain it.
pub fn read_category<R: BufRead>(reader: R, category: &str) -> Result<Option<Category>, Error> {
    let lines = reader
        .lines()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| Error::Io { source: e })?;
    let prefix = format!("_{}.", category.trim_start_matches('_').to_ascii_lowercase());

    let mut result = Category {
        name: category.trim_start_matches('_').to_string(),
        ..Category::default()
    };
    let mut single_row: Vec<String> = Vec::new();
    let mut cursor = 0;

    while cursor < lines.len() {
        let trimmed = lines[cursor].trim();

        if trimmed.eq_ignore_ascii_case("loop_") {
            cursor += 1;
            let mut fields = Vec::new();
            while cursor < lines.len() && lines[cursor].trim_start().starts_with('_') {
                fields.push((cursor + 1, lines[cursor].trim().to_string()));
                cursor += 1;
            }
            let ours = fields
                .first()
                .is_some_and(|(_, f)| strip_field(f, &prefix).is_some());

            let start_line = cursor + 1;
            let mut values = Vec::new();
            let mut value_lines = Vec::new();
            while cursor < lines.len() && !ends_loop(&lines[cursor]) {
                let line_no = cursor + 1;
                collect_values(&lines, &mut cursor, &mut values)?;
                value_lines.resize(values.len(), line_no);
            }

            if ours {
                result.fields = fields
                    .iter()
                    .map(|(line_no, f)| {
                        strip_field(f, &prefix).map(str::to_string).ok_or_else(|| {
                            Error::parse(
                                Format::Mmcif,
                                *line_no,
                                format!("field '{f}' does not belong to loop {prefix}"),
                            )
                        })
                    })
                    .collect::<Result<_, _>>()?;
                if values.len() % fields.len() != 0 {
                    return Err(Error::parse(
                        Format::Mmcif,
                        start_line,
                        format!(
                            "{} values cannot fill rows of {} fields",
                            values.len(),
                            fields.len()
                        ),
                    ));
                }
                result.rows = values
                    .chunks(fields.len())
                    .map(<[String]>::to_vec)
                    .collect();
                result.row_lines = value_lines.iter().step_by(fields.len()).copied().collect();
                return Ok(Some(result));
            }
            continue;
        }

        if trimmed.to_ascii_lowercase().starts_with(&prefix) {
            let line_no = cursor + 1;
            let tokens = tokenize(trimmed);
            let field = tokens
                .first()
                .and_then(|token| strip_field(token, &prefix))
                .ok_or_else(|| Error::parse(Format::Mmcif, line_no, "malformed data item"))?
                .to_string();
            cursor += 1;
            let value = match tokens.get(1) {
                Some(value) => value.clone(),
                None => {
                    let mut values = Vec::new();
                    if cursor < lines.len() {
                        collect_values(&lines, &mut cursor, &mut values)?;
                    }
                    values.into_iter().next().ok_or_else(|| {
                        Error::parse(Format::Mmcif, line_no, format!("missing value for {field}"))
                    })?
                }
            };
            if result.row_lines.is_empty() {
                result.row_lines.push(line_no);
            }
            result.fields.push(field);
            single_row.push(value);
            continue;
        }

        cursor += 1;
    }

    if result.fields.is_empty() {
        return Ok(None);
    }
    result.rows.push(single_row);
    Ok(Some(result))
}

/// Attribute name of `field` when it carries the category `prefix`, compared without case.
fn strip_field<'a>(field: &'a str, prefix: &str) -> Option<&'a str> {
    let head = field.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix)
        .then(|| &field[prefix.len()..])
        .filter(|name| !name.is_empty())
}

fn ends_loop(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.starts_with('_')
        || trimmed.starts_with('#')
        || trimmed.eq_ignore_ascii_case("loop_")
        || trimmed.to_ascii_lowercase().starts_with("data_")
}

/// Consumes one logical line of values, which is either a `;`-delimited text block or an
/// ordinary whitespace-separated line.
fn collect_values(
    lines: &[String],
    cursor: &mut usize,
    values: &mut Vec<String>,
) -> Result<(), Error> {
    let line = &lines[*cursor];
    if let Some(first) = line.strip_prefix(';') {
        let opened_at = *cursor + 1;
        let mut text = first.to_string();
        *cursor += 1;
        loop {
            let Some(next) = lines.get(*cursor) else {
                return Err(Error::parse(
                    Format::Mmcif,
                    opened_at,
                    "unterminated text field",
                ));
            };
            *cursor += 1;
            if next.starts_with(';') {
                break;
            }
            if !text.is_empty() {
                text.push('\n');
            }
            text.push_str(next);
        }
        values.push(text.trim().to_string());
        return Ok(());
    }
    values.extend(tokenize(line));
    *cursor += 1;
    Ok(())
}

/// Splits a CIF line on whitespace, honoring single and double quotes. A quote closes only
/// when followed by whitespace or the end of the line.
fn tokenize(line: &str) -> Vec<String> {
    let chars: Vec<char> = line.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        if chars[i].is_whitespace() {
            i += 1;
            continue;
        }
        if chars[i] == '#' {
            break;
        }
        if chars[i] == '\'' || chars[i] == '"' {
            let quote = chars[i];
            let start = i + 1;
            let mut end = start;
            while end < chars.len()
                && !(chars[end] == quote
                    && chars.get(end + 1).is_none_or(|c| c.is_whitespace()))
            {
                end += 1;
            }
            tokens.push(chars[start..end.min(chars.len())].iter().collect());
            i = end + 1;
            continue;
        }
        let start = i;
        while i < chars.len() && !chars[i].is_whitespace() {
            i += 1;
        }
        tokens.push(chars[start..i].iter().collect());
    }
    tokens
}
