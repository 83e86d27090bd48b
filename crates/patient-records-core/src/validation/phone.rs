//! Phone number validation (`DDD-DDD-DDDD`).

/// Check that a string is exactly three digits, three digits and four digits
/// separated by hyphens. No normalization is applied.
pub fn validate_phone(phone: &str) -> bool {
    let bytes = phone.as_bytes();
    bytes.len() == 12
        && bytes.iter().enumerate().all(|(i, b)| match i {
            3 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}
