/// Digits a raw identifier must carry before its row is accepted. Legacy
/// deployments used 10; the active-balance extractor takes the value from
/// settings instead, with this as the default.
pub const MIN_DOCUMENT_DIGITS: usize = 8;

const CPF_WIDTH: usize = 11;
const CNPJ_WIDTH: usize = 14;

/// Canonicalizes a tax identifier: digits only, left-zero-padded to 11 (CPF)
/// or 14 (CNPJ). The class is decided by the raw digit count: at most 11
/// digits is a CPF, anything longer a CNPJ.
///
/// Returns None when fewer than `min_digits` digits remain, which rejects
/// the row entirely.
pub fn normalize_document(raw: &str, min_digits: usize) -> Option<String> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if digits.len() < min_digits {
        return None;
    }
    let width = if digits.len() <= CPF_WIDTH {
        CPF_WIDTH
    } else {
        CNPJ_WIDTH
    };
    Some(format!("{digits:0>width$}"))
}
