//! Upload content sniffing.
//!
//! The extension a client claims must agree with the leading bytes of the file.

const OLE2: &[u8] = &[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];
const ZIP: &[u8] = &[0x50, 0x4B, 0x03, 0x04];
const PNG: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
const JPEG: &[u8] = &[0xFF, 0xD8, 0xFF];
const SEVEN_Z: &[u8] = &[0x37, 0x7A, 0xBC, 0xAF, 0x27, 0x1C];

/// Returns true when `data` starts with a signature valid for `extension`
/// (dot included, case-insensitive). Plain text formats are accepted as long as
/// they are valid UTF-8 in the sniffed prefix. Unknown extensions are rejected.
pub fn validate_magic_bytes(data: &[u8], extension: &str) -> bool {
    if data.is_empty() {
        return false;
    }

    match extension.to_ascii_lowercase().as_str() {
        ".png" => data.starts_with(PNG),
        ".jpg" | ".jpeg" => data.starts_with(JPEG),
        ".gif" => data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a"),
        ".webp" => data.len() >= 12 && &data[0..4] == b"RIFF" && &data[8..12] == b"WEBP",
        ".pdf" => data.starts_with(b"%PDF"),
        ".doc" | ".xls" | ".ppt" => data.starts_with(OLE2),
        ".docx" | ".xlsx" | ".pptx" | ".zip" => data.starts_with(ZIP),
        ".rar" => data.starts_with(b"Rar!"),
        ".7z" => data.starts_with(SEVEN_Z),
        ".txt" | ".md" | ".csv" => is_text_prefix(data),
        _ => false,
    }
}

/// MIME type served for a stored file.
pub fn content_type_for(extension: &str) -> &'static str {
    match extension.to_ascii_lowercase().as_str() {
        ".png" => "image/png",
        ".jpg" | ".jpeg" => "image/jpeg",
        ".gif" => "image/gif",
        ".webp" => "image/webp",
        ".pdf" => "application/pdf",
        ".doc" => "application/msword",
        ".xls" => "application/vnd.ms-excel",
        ".ppt" => "application/vnd.ms-powerpoint",
        ".docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        ".xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        ".pptx" => "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        ".zip" => "application/zip",
        ".rar" => "application/vnd.rar",
        ".7z" => "application/x-7z-compressed",
        ".txt" | ".md" => "text/plain; charset=utf-8",
        ".csv" => "text/csv; charset=utf-8",
        _ => "application/octet-stream",
    }
}

fn is_text_prefix(data: &[u8]) -> bool {
    match std::str::from_utf8(data) {
        Ok(_) => true,
        // a multi-byte character cut off at the end of the sniffed prefix
        Err(e) => e.error_len().is_none(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_png_magic() {
        assert!(validate_magic_bytes(PNG, ".png"));
        assert!(validate_magic_bytes(PNG, ".PNG"));
        assert!(!validate_magic_bytes(PNG, ".jpg"));
    }

    #[test]
    fn test_office_formats() {
        assert!(validate_magic_bytes(OLE2, ".doc"));
        assert!(validate_magic_bytes(ZIP, ".docx"));
        assert!(!validate_magic_bytes(OLE2, ".docx"));
    }

    #[test]
    fn test_pdf_magic() {
        assert!(validate_magic_bytes(b"%PDF-1.7", ".pdf"));
        assert!(!validate_magic_bytes(b"<html>", ".pdf"));
    }

    #[test]
    fn test_text_accepts_utf8_and_truncated_tail() {
        assert!(validate_magic_bytes("Tugas Bahasa Indonesia".as_bytes(), ".txt"));
        // "é" is 0xC3 0xA9; keep only the first byte
        assert!(validate_magic_bytes(&[b'a', 0xC3], ".txt"));
        assert!(!validate_magic_bytes(&[0xFF, 0xFE, 0x00, 0x80], ".txt"));
    }

    #[test]
    fn test_empty_and_unknown_rejected() {
        assert!(!validate_magic_bytes(&[], ".png"));
        assert!(!validate_magic_bytes(b"MZ\x90\x00", ".exe"));
    }

    #[test]
    fn test_content_type() {
        assert_eq!(content_type_for(".PDF"), "application/pdf");
        assert_eq!(content_type_for(".bin"), "application/octet-stream");
    }
}
