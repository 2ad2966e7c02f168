//! Seeded default document
//!
//! The catalog a fresh station starts with: five folders and six flash
//! designs with embedded SVG data-URI images. The document store falls
//! back to a copy of this whenever storage is absent, unparsable, or
//! holds no designs.

use super::models::{Design, Document, Folder, Settings};

const ANCHOR_SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="512" height="512"><rect width="100%" height="100%" fill="white"/><path d="M256 60c-22 0-40 18-40 40s18 40 40 40 40-18 40-40-18-40-40-40zm-16 96v132h-58c8 66 56 118 116 118s108-52 116-118h-58V156h-16v132h-84V156h-16zM144 316h52c10 44 50 76 60 76s50-32 60-76h52c-10 86-82 152-172 152s-162-66-172-152z" fill="black"/></svg>"#;
const SKULL_SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="512" height="512"><rect width="100%" height="100%" fill="white"/><path d="M256 64c-88 0-160 66-160 148 0 52 28 99 72 126v54c0 18 14 32 32 32h16v-48h32v48h32v-48h32v48h16c18 0 32-14 32-32v-54c44-27 72-74 72-126 0-82-72-148-160-148zm-72 156c-18 0-32-14-32-32s14-32 32-32 32 14 32 32-14 32-32 32zm144 0c-18 0-32-14-32-32s14-32 32-32 32 14 32 32-14 32-32 32z" fill="black"/></svg>"#;
const STAR_SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="512" height="512"><rect width="100%" height="100%" fill="white"/><path d="M256 72l54 110 122 18-88 86 21 122-109-58-109 58 21-122-88-86 122-18z" fill="black"/></svg>"#;
const DAGGER_SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="512" height="512"><rect width="100%" height="100%" fill="white"/><path d="M308 64l-52 52-52-52-36 36 52 52-156 156 96 96 156-156 52 52 36-36-52-52 52-52zM128 336l48 48-48 48-48-48z" fill="black"/></svg>"#;
const HEART_SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="512" height="512"><rect width="100%" height="100%" fill="white"/><path d="M256 448S64 336 64 208c0-58 46-104 104-104 40 0 74 22 88 54 14-32 48-54 88-54 58 0 104 46 104 104 0 128-192 240-192 240z" fill="black"/></svg>"#;
const ROSE_SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="512" height="512"><rect width="100%" height="100%" fill="white"/><path d="M256 72c-52 0-92 40-92 88 0 14 4 28 10 40-42 10-74 48-74 94 0 54 44 98 98 98 24 0 46-8 64-22 18 14 40 22 64 22 54 0 98-44 98-98 0-46-32-84-74-94 6-12 10-26 10-40 0-48-40-88-92-88zm-16 64c22 0 40 18 40 40s-18 40-40 40-40-18-40-40 18-40 40-40z" fill="black"/></svg>"#;

/// Percent-encode an SVG into a `data:` URI the way web image loaders
/// expect it: UTF-8 bytes escaped except for the URI-safe set, with
/// apostrophes escaped as well.
pub fn svg_data_uri(svg: &str) -> String {
    let mut encoded = String::with_capacity(svg.len() * 2);
    for byte in svg.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'('
            | b')' => encoded.push(byte as char),
            _ => {
                encoded.push('%');
                encoded.push_str(&format!("{:02X}", byte));
            }
        }
    }
    format!("data:image/svg+xml;charset=utf-8,{}", encoded)
}

fn preset_folder(id: i64, name: &str) -> Folder {
    Folder {
        id,
        name: name.to_string(),
    }
}

fn preset_design(id: i64, name: &str, svg: &str, folder_ids: Vec<i64>) -> Design {
    Design {
        id,
        name: name.to_string(),
        image_uri: Some(svg_data_uri(svg)),
        folder_id: folder_ids.first().copied(),
        folder_ids,
        used_in_session: false,
        used_globally: false,
    }
}

/// A fresh copy of the seeded document.
pub fn default_document() -> Document {
    Document {
        folders: vec![
            preset_folder(1, "Unsorted"),
            preset_folder(2, "Florals"),
            preset_folder(3, "Spooky"),
            preset_folder(4, "Cute"),
            preset_folder(5, "Traditional"),
        ],
        designs: vec![
            preset_design(101, "Anchor", ANCHOR_SVG, vec![5]),
            preset_design(102, "Skull", SKULL_SVG, vec![3]),
            preset_design(103, "Star", STAR_SVG, vec![]),
            preset_design(104, "Dagger", DAGGER_SVG, vec![3]),
            preset_design(105, "Heart", HEART_SVG, vec![4, 5]),
            preset_design(106, "Rose", ROSE_SVG, vec![2]),
        ],
        settings: Settings::default(),
        history: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_catalog_shape() {
        let doc = default_document();

        assert_eq!(doc.folders.len(), 5);
        assert_eq!(doc.folders[0].name, "Unsorted");
        assert_eq!(doc.designs.len(), 6);
        assert!(doc.history.is_empty());
    }

    #[test]
    fn test_seeded_document_is_already_normalized() {
        let mut doc = default_document();
        let original = doc.clone();

        doc.normalize();

        assert_eq!(doc, original);
    }

    #[test]
    fn test_star_is_unsorted_by_convention() {
        let doc = default_document();
        let star = doc.designs.iter().find(|d| d.name == "Star").unwrap();

        assert!(star.folder_ids.is_empty());
        assert_eq!(star.folder_id, None);
    }

    #[test]
    fn test_svg_data_uri_escapes_quotes() {
        let uri = svg_data_uri(r#"<svg a="b" c='d'/>"#);

        assert!(uri.starts_with("data:image/svg+xml;charset=utf-8,"));
        assert!(uri.contains("%22"));
        assert!(uri.contains("%27"));
        assert!(!uri.contains('"'));
        assert!(!uri.contains('\''));
    }
}
