/// Normalizes raw recognizer output into trimmed, non-empty lines.
///
/// Control and zero-width characters are dropped, runs of whitespace inside
/// a line collapse to one space. Line structure is kept because the field
/// heuristics work line by line.
pub fn clean_text(raw: &str) -> String {
    raw.split(['\n', '\r'])
        .map(clean_line)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn clean_line(line: &str) -> String {
    let printable: String = line
        .chars()
        .map(|c| if c == '\t' { ' ' } else { c })
        .filter(|c| !is_noise(*c))
        .collect();

    printable.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn is_noise(c: char) -> bool {
    c.is_control() || matches!(c, '\u{200B}'..='\u{200D}' | '\u{FEFF}' | '\u{FFFD}')
}
