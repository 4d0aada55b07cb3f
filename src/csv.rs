//! Splitting and joining the comma separated cells of one PBS value.
//!
//! Quoting follows RFC 4180 with `\` as the escape character inside quoted
//! cells. Cells are never trimmed.

const DELIMITER: char = ',';
const QUOTE: char = '"';
const ESCAPE: char = '\\';

/// Split one line into its cells. Empty or whitespace-only input has no cells.
pub fn split_csv_line(line: &str) -> Vec<String> {
    if line.trim().is_empty() {
        return Vec::new();
    }

    let mut cells = Vec::new();
    let mut cell = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                ESCAPE => {
                    if let Some(escaped) = chars.next() {
                        cell.push(escaped);
                    }
                }
                QUOTE => in_quotes = false,
                _ => cell.push(c),
            }
        } else {
            match c {
                DELIMITER => cells.push(std::mem::take(&mut cell)),
                QUOTE if cell.is_empty() => in_quotes = true,
                _ => cell.push(c),
            }
        }
    }
    cells.push(cell);
    cells
}

/// Join cells so that [`split_csv_line`] gives them back unchanged
pub fn join_csv_line<S: AsRef<str>>(cells: &[S]) -> String {
    cells
        .iter()
        .map(|cell| quote_cell(cell.as_ref()))
        .collect::<Vec<_>>()
        .join(",")
}

fn quote_cell(cell: &str) -> String {
    let needs_quotes = cell.contains([DELIMITER, QUOTE, ESCAPE])
        || cell.starts_with(char::is_whitespace)
        || cell.ends_with(char::is_whitespace);
    if !needs_quotes {
        return cell.to_string();
    }

    let mut quoted = String::with_capacity(cell.len() + 2);
    quoted.push(QUOTE);
    for c in cell.chars() {
        if c == QUOTE || c == ESCAPE {
            quoted.push(ESCAPE);
        }
        quoted.push(c);
    }
    quoted.push(QUOTE);
    quoted
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("GRASS,POISON", vec!["GRASS", "POISON"])]
    #[case("A,,C,", vec!["A", "", "C", ""])]
    #[case("\"Hello, world\",2", vec!["Hello, world", "2"])]
    #[case(r#""say \"hi\"",x"#, vec![r#"say "hi""#, "x"])]
    #[case(r#""back\\slash""#, vec![r"back\slash"])]
    #[case(r#""a""b""#, vec![r#"a"b""#])]
    #[case(" padded ,x", vec![" padded ", "x"])]
    fn test_split_csv_line(#[case] line: &str, #[case] expected: Vec<&str>) {
        assert_eq!(split_csv_line(line), expected);
    }

    #[test]
    fn test_blank_line_has_no_cells() {
        assert!(split_csv_line("").is_empty());
        assert!(split_csv_line("   ").is_empty());
    }

    #[test]
    fn test_join_quotes_only_when_needed() {
        let cells = vec![
            "PLAIN".to_string(),
            "with, comma".to_string(),
            "a \"quote\"".to_string(),
            " lead".to_string(),
            String::new(),
        ];
        let line = join_csv_line(&cells);
        assert_eq!(line, r#"PLAIN,"with, comma","a \"quote\""," lead","#);
        assert_eq!(split_csv_line(&line), cells);
    }
}
