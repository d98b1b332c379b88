//! `key=value;` tag-list tokenizer shared by the SPF-family parsers.

/// One tag from a `key=value;` list. Names are lower-cased during
/// tokenization; values keep their original case (DKIM keys and report URIs
/// are case-sensitive).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
    pub value: String,
}

/// Tokenizes a TXT-record tag list.
///
/// Splits on `;`, trims whitespace around each tag, lower-cases tag names and
/// tolerates trailing semicolons. A token without `=` becomes a tag with an
/// empty value rather than a failure; whether that makes the record malformed
/// is the individual parser's call.
pub fn parse_tag_list(text: &str) -> Vec<Tag> {
    text.split(';')
        .map(str::trim)
        .filter(|tok| !tok.is_empty())
        .map(|tok| match tok.split_once('=') {
            Some((name, value)) => Tag {
                name: name.trim().to_ascii_lowercase(),
                value: value.trim().to_string(),
            },
            None => Tag {
                name: tok.to_ascii_lowercase(),
                value: String::new(),
            },
        })
        .collect()
}

/// Finds the first tag with the given (lower-case) name.
pub fn find_tag<'a>(tags: &'a [Tag], name: &str) -> Option<&'a Tag> {
    tags.iter().find(|t| t.name == name)
}
