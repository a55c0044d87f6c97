// file: src/parser/email.rs
// description: sender, receiver and body extraction from a single email
// reference: line-prefix header heuristics

use super::patterns::HEADER_LINE;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmailFields {
    pub sender: String,
    pub receiver: String,
    pub body: String,
}

/// Never fails. Repeated `From:`/`To:` lines overwrite earlier ones and
/// `Subject:` lines are dropped from the body.
pub fn extract_email_fields(document: &str) -> EmailFields {
    let mut fields = EmailFields::default();
    let mut body = String::new();

    for line in document.lines() {
        match HEADER_LINE.captures(line) {
            Some(caps) => {
                let value = caps[2].trim().to_string();
                match caps[1].to_ascii_lowercase().as_str() {
                    "from" => fields.sender = value,
                    "to" => fields.receiver = value,
                    _ => {}
                }
            }
            None => {
                body.push_str(line.trim());
                body.push(' ');
            }
        }
    }

    fields.body = body.trim().to_string();
    fields
}
