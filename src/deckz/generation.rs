//! # Generation Output Parsing
//!
//! The outline and layout generators answer with free text that should
//! contain one JSON object. This module pulls that object out and turns it
//! into core types; it never talks to a model itself.
//!
//! Accepted shapes:
//!
//! ```text
//! {"outlines": ["Intro", "Market", ...]}
//! {"layouts": [ {slide}, {slide}, ... ]}
//! ```
//!
//! The text may also be a chat completion envelope (`message.content` or
//! `choices[0].message.content`); the inner content is used in that case.

use crate::error::{DeckzError, Result};
use crate::model::Slide;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct OutlineResponse {
    outlines: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct LayoutResponse {
    layouts: Vec<Value>,
}

/// The span from the first `{` to the last `}`, inclusive.
pub fn extract_json_object(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    (end > start).then(|| &raw[start..=end])
}

/// Unwraps a chat completion envelope if `raw` is one.
pub fn message_content(raw: &str) -> Option<String> {
    let value: Value = serde_json::from_str(raw.trim()).ok()?;
    let content = value
        .pointer("/message/content")
        .or_else(|| value.pointer("/choices/0/message/content"))?;
    content.as_str().map(str::to_string)
}

fn payload<T: for<'de> Deserialize<'de>>(raw: &str, key: &str) -> Result<T> {
    let unwrapped = message_content(raw);
    let text = unwrapped.as_deref().unwrap_or(raw);
    if text.trim().is_empty() {
        return Err(DeckzError::Generation("empty response".to_string()));
    }

    let object = extract_json_object(text)
        .ok_or_else(|| DeckzError::Generation("no JSON object found in response".to_string()))?;
    let value: Value = serde_json::from_str(object)
        .map_err(|e| DeckzError::Generation(format!("malformed JSON: {}", e)))?;

    if !value.get(key).is_some_and(Value::is_array) {
        return Err(DeckzError::Generation(format!(
            "expected an object with a \"{}\" array",
            key
        )));
    }
    serde_json::from_value(value)
        .map_err(|e| DeckzError::Generation(format!("invalid {}: {}", key, e)))
}

pub fn parse_outlines(raw: &str) -> Result<Vec<String>> {
    let response: OutlineResponse = payload(raw, "outlines")?;
    Ok(response.outlines)
}

/// Malformed nodes inside a layout degrade in place (see
/// [`crate::model::Content`]); a layout that is not a slide object at all is
/// skipped and logged.
pub fn parse_layouts(raw: &str) -> Result<Vec<Slide>> {
    let response: LayoutResponse = payload(raw, "layouts")?;
    let slides = response
        .layouts
        .into_iter()
        .enumerate()
        .filter_map(|(position, layout)| match serde_json::from_value::<Slide>(layout) {
            Ok(slide) => Some(slide),
            Err(e) => {
                log::warn!("skipping generated layout {}: {}", position + 1, e);
                None
            }
        })
        .collect();
    Ok(slides)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ContentKind;

    #[test]
    fn outlines_inside_chatter() {
        let raw = "Sure! Here you go:\n```json\n{\"outlines\": [\"Intro\", \"Plan\"]}\n```\nEnjoy.";
        assert_eq!(parse_outlines(raw).unwrap(), vec!["Intro", "Plan"]);
    }

    #[test]
    fn outlines_inside_an_envelope() {
        let raw = r#"{"choices": [{"message": {"content": "{\"outlines\": [\"A\"]}"}}]}"#;
        assert_eq!(parse_outlines(raw).unwrap(), vec!["A"]);

        let ollama = r#"{"message": {"content": "text {\"outlines\": [\"B\"]} text"}}"#;
        assert_eq!(parse_outlines(ollama).unwrap(), vec!["B"]);
    }

    #[test]
    fn wrong_shapes_are_generation_errors() {
        for raw in [
            "",
            "no json here",
            "{\"outlines\": \"not a list\"}",
            "{\"something\": []}",
            "{broken",
        ] {
            assert!(
                matches!(parse_outlines(raw), Err(DeckzError::Generation(_))),
                "{:?}",
                raw
            );
        }
    }

    #[test]
    fn layouts_parse_into_slides() {
        let raw = r#"Here: {"layouts": [{
            "slideName": "Blank card",
            "type": "blank-card",
            "className": "p-8 mx-auto",
            "content": {
                "id": "c1", "type": "column", "name": "Column",
                "content": [
                    {"id": "t1", "type": "title", "name": "Title", "content": "", "placeholder": "Untitled"}
                ]
            }
        }]}"#;
        let slides = parse_layouts(raw).unwrap();
        assert_eq!(slides.len(), 1);
        assert_eq!(slides[0].layout, "blank-card");
        assert_eq!(slides[0].content.kind, ContentKind::Column);
        assert_eq!(slides[0].content.children()[0].kind, ContentKind::Title);
    }

    #[test]
    fn one_bad_node_does_not_sink_the_layouts() {
        let raw = r#"{"layouts": [
            {"slideName": "Mixed", "content": {"id": "c", "type": "column", "content": [
                {"id": "t", "type": "title", "content": "Kept"},
                {"id": "n", "type": "text", "content": null},
                {"id": "x", "content": "no type"},
                {"id": "tb", "type": "table", "content": [["a", 1]]}
            ]}},
            {"slideName": "Clean", "content": {"id": "p", "type": "paragraph", "content": "ok"}},
            "not a slide"
        ]}"#;
        let slides = parse_layouts(raw).unwrap();
        assert_eq!(slides.len(), 2);
        assert_eq!(slides[1].slide_name, "Clean");

        let children = slides[0].content.children();
        assert_eq!(children.len(), 4);
        assert_eq!(children[0].content.text(), Some("Kept"));
        assert_eq!(children[1].kind, ContentKind::Text);
        assert_eq!(children[1].content.shape(), crate::model::Shape::Empty);
        assert_eq!(children[2].kind, ContentKind::Unknown(String::new()));
        assert_eq!(
            children[3].content.grid(),
            Some(&[vec!["a".to_string(), "1".to_string()]][..])
        );

        use crate::dispatch::{render, Instruction, RenderMode};
        let rendered = render(&slides[0].content, RenderMode::Presenting);
        assert!(matches!(rendered.children()[0], Instruction::TextBlock { .. }));
        assert!(rendered.children()[1].is_empty());
        assert!(rendered.children()[2].is_empty());
        assert!(matches!(rendered.children()[3], Instruction::Table { .. }));
    }
}
