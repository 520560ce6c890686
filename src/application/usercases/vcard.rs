use chrono::NaiveDate;

use crate::domain::value_objects::{clients::ClientModel, contacts::Contact};

/// Escapes a text value per vCard 3.0 rules: backslash, semicolon, comma and
/// newline. Backslash goes first so the other escapes are not re-escaped.
pub fn escape_vcard_text(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace(';', "\\;")
        .replace(',', "\\,")
        .replace("\r\n", "\\n")
        .replace('\n', "\\n")
}

/// Renders one vCard 3.0 entry, CRLF line endings, no trailing terminator.
pub fn render_vcard(
    name: &str,
    phone: &str,
    email: Option<&str>,
    notes: Option<&str>,
) -> String {
    let mut lines = vec![
        "BEGIN:VCARD".to_string(),
        "VERSION:3.0".to_string(),
        format!("FN:{}", escape_vcard_text(name)),
        format!("TEL;TYPE=CELL:{}", phone),
    ];

    if let Some(email) = email {
        lines.push(format!("EMAIL:{}", escape_vcard_text(email)));
    }
    if let Some(notes) = notes {
        lines.push(format!("NOTE:{}", escape_vcard_text(notes)));
    }

    lines.push("END:VCARD".to_string());
    lines.join("\r\n")
}

pub fn client_vcard(client: &ClientModel) -> String {
    render_vcard(
        &client.name,
        &client.phone,
        client.email.as_deref(),
        client.notes.as_deref(),
    )
}

pub fn contact_vcard(contact: &Contact) -> String {
    render_vcard(
        &contact.name,
        &contact.phone,
        contact.email.as_deref(),
        contact.notes.as_deref(),
    )
}

/// Joins vCards into one downloadable document, CRLF between entries and a
/// final CRLF terminator.
pub fn vcard_document(cards: &[String]) -> String {
    let mut document = cards.join("\r\n");
    document.push_str("\r\n");
    document
}

/// `<sanitized-name>.vcf` for a single-contact download.
pub fn single_export_filename(name: &str) -> String {
    let sanitized: String = name
        .trim()
        .chars()
        .filter_map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                Some(c)
            } else if c.is_whitespace() {
                Some('_')
            } else {
                None
            }
        })
        .collect();

    if sanitized.is_empty() {
        "contato.vcf".to_string()
    } else {
        format!("{}.vcf", sanitized)
    }
}

/// `contatos_<ISO-date>.vcf` for a bulk download.
pub fn bulk_export_filename(date: NaiveDate) -> String {
    format!("contatos_{}.vcf", date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn note_with_separators_is_escaped() {
        let card = render_vcard(
            "Ana",
            "5511912345678",
            None,
            Some("plano: top; renova dia 10, sempre"),
        );
        assert!(card.contains("NOTE:plano: top\\; renova dia 10\\, sempre"));
    }

    #[test]
    fn escaping_round_trips_through_a_standard_parser() {
        let original = "a;b,c\\d\ne";
        let escaped = escape_vcard_text(original);
        assert_eq!(escaped, "a\\;b\\,c\\\\d\\ne");

        // Standard vCard unescaping: \\ -> \, \; -> ;, \, -> ,, \n -> newline.
        let mut unescaped = String::new();
        let mut chars = escaped.chars();
        while let Some(c) = chars.next() {
            if c == '\\' {
                match chars.next() {
                    Some('n') => unescaped.push('\n'),
                    Some(other) => unescaped.push(other),
                    None => unescaped.push('\\'),
                }
            } else {
                unescaped.push(c);
            }
        }
        assert_eq!(unescaped, original);
    }

    #[test]
    fn vcard_uses_crlf_and_required_fields() {
        let card = render_vcard("Ana Souza", "5511912345678", Some("ana@example.com"), None);
        let lines: Vec<&str> = card.split("\r\n").collect();
        assert_eq!(lines.first(), Some(&"BEGIN:VCARD"));
        assert_eq!(lines.get(1), Some(&"VERSION:3.0"));
        assert!(lines.contains(&"FN:Ana Souza"));
        assert!(lines.contains(&"TEL;TYPE=CELL:5511912345678"));
        assert!(lines.contains(&"EMAIL:ana@example.com"));
        assert_eq!(lines.last(), Some(&"END:VCARD"));
        assert!(!card.contains('\n') || card.contains("\r\n"));
    }

    #[test]
    fn optional_fields_are_omitted() {
        let card = render_vcard("Ana", "5511912345678", None, None);
        assert!(!card.contains("EMAIL"));
        assert!(!card.contains("NOTE"));
    }

    #[test]
    fn document_joins_cards_with_crlf() {
        let cards = vec![
            render_vcard("A", "551", None, None),
            render_vcard("B", "552", None, None),
        ];
        let document = vcard_document(&cards);
        assert!(document.contains("END:VCARD\r\nBEGIN:VCARD"));
        assert!(document.ends_with("END:VCARD\r\n"));
    }

    #[test]
    fn filenames_are_sanitized() {
        assert_eq!(single_export_filename("Ana Souza"), "Ana_Souza.vcf");
        assert_eq!(single_export_filename("a/b:c"), "abc.vcf");
        assert_eq!(single_export_filename("  "), "contato.vcf");
    }

    #[test]
    fn bulk_filename_carries_iso_date() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 28).unwrap();
        assert_eq!(bulk_export_filename(date), "contatos_2026-08-28.vcf");
    }
}
