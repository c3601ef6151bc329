//! CSV header normalization.

use std::borrow::Cow;
use std::collections::HashSet;

/// Makes column names usable as DataFrame columns.
///
/// Blank names become `Unnamed: <index>` and repeated names get a numeric
/// suffix (`a`, `a.1`, `a.2`), skipping suffixes that are already taken.
pub fn unique_names<S: AsRef<str>>(raw: &[S]) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::with_capacity(raw.len());
    let mut names = Vec::with_capacity(raw.len());

    for (idx, name) in raw.iter().enumerate() {
        let name = name.as_ref();
        let base = if name.trim().is_empty() {
            format!("Unnamed: {idx}")
        } else {
            name.to_string()
        };

        let mut candidate = base.clone();
        let mut suffix = 1;
        while seen.contains(&candidate) {
            candidate = format!("{base}.{suffix}");
            suffix += 1;
        }
        seen.insert(candidate.clone());
        names.push(candidate);
    }

    names
}

/// Rewrites the header record of `text` when its names are blank or repeated.
///
/// Returns the text untouched when the header is already usable.
pub fn normalize_header_row(text: &str) -> Cow<'_, str> {
    let mut reader = ::csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());
    let mut record = ::csv::StringRecord::new();
    match reader.read_record(&mut record) {
        Ok(true) => {}
        _ => return Cow::Borrowed(text),
    }

    let raw: Vec<&str> = record.iter().collect();
    let names = unique_names(&raw);
    if names.iter().map(String::as_str).eq(raw.iter().copied()) {
        return Cow::Borrowed(text);
    }

    tracing::debug!(?raw, ?names, "renamed blank or duplicate header columns");

    let offset = usize::try_from(reader.position().byte())
        .unwrap_or(text.len())
        .min(text.len());
    let (consumed, body) = text.split_at(offset);
    // The reader stops between the `\r` and `\n` of a CRLF terminator.
    let body = if consumed.ends_with('\r') {
        body.strip_prefix('\n').unwrap_or(body)
    } else {
        body
    };
    let header = names
        .iter()
        .map(|name| quote_field(name))
        .collect::<Vec<_>>()
        .join(",");
    Cow::Owned(format!("{header}\n{body}"))
}

fn quote_field(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}
