use serde_yaml::Value;

use crate::error::ParseError;
use crate::types::frontmatter::AgentFrontmatter;

/// Largest definition file accepted, in bytes.
pub const MAX_FILE_SIZE: u64 = 1024 * 1024;

const DELIMITER: &str = "---";

/// Front-matter and body of one parsed definition document.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedAgentDefinition {
    pub frontmatter: AgentFrontmatter,
    pub body: String,
}

/// Parse a markdown agent definition into validated front-matter and body.
///
/// The document must open with a `---` line, followed by a YAML mapping and
/// a closing `---` line. Everything after the closing line is the body,
/// returned verbatim apart from line-ending normalization.
///
/// `byte_size` is the on-disk size reported by the runtime and is checked
/// before any parsing happens.
pub fn parse_agent_definition_markdown(
    content: &str,
    byte_size: u64,
) -> Result<ParsedAgentDefinition, ParseError> {
    if byte_size > MAX_FILE_SIZE {
        return Err(ParseError::TooLarge {
            size: byte_size,
            max: MAX_FILE_SIZE,
        });
    }

    let normalized = normalize(content);
    let (yaml, body) = split_frontmatter(&normalized)?;

    let value: Value = serde_yaml::from_str(yaml).map_err(ParseError::Yaml)?;
    match value {
        Value::Mapping(_) => {}
        Value::Null => return Err(ParseError::NotAMapping { found: "an empty block" }),
        Value::Sequence(_) => return Err(ParseError::NotAMapping { found: "a list" }),
        Value::Tagged(_) => return Err(ParseError::NotAMapping { found: "a tagged value" }),
        _ => return Err(ParseError::NotAMapping { found: "a scalar" }),
    }

    let frontmatter: AgentFrontmatter =
        serde_yaml::from_value(value).map_err(|e| ParseError::Schema(e.to_string()))?;

    if frontmatter.name.trim().is_empty() {
        return Err(ParseError::Schema("`name` must not be empty".into()));
    }

    Ok(ParsedAgentDefinition {
        frontmatter,
        body: body.to_string(),
    })
}

/// Serialize front-matter and body back into a definition document.
///
/// Only recognized keys are written.
pub fn render_agent_definition_markdown(
    frontmatter: &AgentFrontmatter,
    body: &str,
) -> Result<String, ParseError> {
    let yaml = serde_yaml::to_string(frontmatter).map_err(ParseError::Yaml)?;
    Ok(format!("{DELIMITER}\n{yaml}{DELIMITER}\n{body}"))
}

fn normalize(content: &str) -> String {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    content.replace("\r\n", "\n").replace('\r', "\n")
}

/// Split a normalized document into (front-matter YAML, body).
fn split_frontmatter(content: &str) -> Result<(&str, &str), ParseError> {
    let first = content
        .split_inclusive('\n')
        .next()
        .ok_or(ParseError::MissingOpeningDelimiter)?;
    if first.trim_end() != DELIMITER {
        return Err(ParseError::MissingOpeningDelimiter);
    }

    let rest = &content[first.len()..];
    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == DELIMITER {
            return Ok((&rest[..offset], &rest[offset + line.len()..]));
        }
        offset += line.len();
    }

    Err(ParseError::MissingClosingDelimiter)
}
