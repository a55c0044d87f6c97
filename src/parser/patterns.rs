// file: src/parser/patterns.rs
// description: compiled regex patterns for email header extraction
// reference: https://docs.rs/regex

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Header lines are matched at column zero, case-insensitively.
    pub static ref HEADER_LINE: Regex = Regex::new(
        r"(?i)^(from|to|subject):(.*)$"
    ).expect("HEADER_LINE regex is valid");
}
