use sheet_source::Cell;

/// Finds the column whose header contains one of the candidate fragments.
///
/// Headers are scanned left to right; for each header the candidates are
/// tried in priority order, so the leftmost matching header wins. Matching is
/// substring containment over the lower-cased, trimmed header. When nothing
/// matches, column 0 is returned so the caller still gets a usable table out
/// of a sheet with renamed headers.
pub fn resolve_column(headers: &[String], candidates: &[&str]) -> usize {
    for (idx, header) in headers.iter().enumerate() {
        let header = header.to_lowercase();
        let header = header.trim();
        for candidate in candidates {
            if header.contains(&candidate.to_lowercase()) {
                return idx;
            }
        }
    }
    0
}

/// Display strings of a header row, ready for `resolve_column`.
pub fn header_strings(row: &[Cell]) -> Vec<String> {
    row.iter().map(|cell| cell.display()).collect()
}
