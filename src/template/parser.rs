//! Recursive descent template parser.
//!
//! Parses a template declaration into a [`Template`]. Uses the logos-based
//! tokenizer from [`crate::template::tokenizer`].
//!
//! Grammar:
//!
//! ```text
//! template := "slideshow" "{" item* "}"
//! item     := "slot" IdSelector ";"
//!           | "control" IdSelector StringLiteral Ident ";"
//! ```

use logos::Logos;

use crate::template::model::{ControlAction, ControlDef, Template};
use crate::template::tokenizer::Token;

/// Errors from template parsing and validation.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("unexpected token at position {position}: {message}")]
    UnexpectedToken { position: usize, message: String },
    #[error("unexpected end of input: {0}")]
    UnexpectedEof(String),
    #[error("template declares no slot")]
    MissingSlot,
    #[error("template declares more than one slot")]
    DuplicateSlot,
    #[error("duplicate id: #{0}")]
    DuplicateId(String),
    #[error("unknown control action: {0} (expected previous|next)")]
    UnknownAction(String),
}

/// A positioned token, for error reporting.
#[derive(Debug, Clone)]
struct PToken {
    token: Token,
    text: String,
    pos: usize,
}

fn tokenize(input: &str) -> Vec<PToken> {
    Token::lexer(input)
        .spanned()
        .filter_map(|(result, span)| result.ok().map(|token| (token, span)))
        .enumerate()
        .map(|(pos, (token, span))| PToken {
            text: input[span].to_string(),
            token,
            pos,
        })
        .collect()
}

/// Parse a template source string into a validated [`Template`].
pub fn parse_template(input: &str) -> Result<Template, TemplateError> {
    let mut parser = Parser {
        tokens: tokenize(input),
        cursor: 0,
    };

    parser.expect_keyword("slideshow")?;
    parser.expect(Token::BraceOpen, "expected '{'")?;

    let mut slot_id: Option<String> = None;
    let mut controls: Vec<ControlDef> = Vec::new();

    loop {
        let next = parser
            .peek()
            .ok_or_else(|| TemplateError::UnexpectedEof("expected '}' or item".to_string()))?;
        if next.token == Token::BraceClose {
            parser.advance();
            break;
        }
        match parser.expect_ident("expected 'slot' or 'control'")?.as_str() {
            "slot" => {
                let id = parser.expect_id_selector()?;
                parser.expect(Token::Semicolon, "expected ';' after slot")?;
                if slot_id.is_some() {
                    return Err(TemplateError::DuplicateSlot);
                }
                slot_id = Some(id);
            }
            "control" => {
                let id = parser.expect_id_selector()?;
                let label = parser.expect_string()?;
                let action = parse_action(&parser.expect_ident("expected control action")?)?;
                parser.expect(Token::Semicolon, "expected ';' after control")?;
                controls.push(ControlDef { id, label, action });
            }
            other => {
                return Err(TemplateError::UnexpectedToken {
                    position: parser.cursor.saturating_sub(1),
                    message: format!("expected 'slot' or 'control', got '{other}'"),
                });
            }
        }
    }

    if let Some(stray) = parser.peek() {
        return Err(TemplateError::UnexpectedToken {
            position: stray.pos,
            message: format!("trailing input after template: '{}'", stray.text),
        });
    }

    let slot_id = slot_id.ok_or(TemplateError::MissingSlot)?;
    check_unique_ids(&slot_id, &controls)?;

    Ok(Template { slot_id, controls })
}

fn parse_action(name: &str) -> Result<ControlAction, TemplateError> {
    match name {
        "previous" => Ok(ControlAction::Previous),
        "next" => Ok(ControlAction::Next),
        other => Err(TemplateError::UnknownAction(other.to_string())),
    }
}

fn check_unique_ids(slot_id: &str, controls: &[ControlDef]) -> Result<(), TemplateError> {
    let mut seen = vec![slot_id];
    for control in controls {
        if seen.contains(&control.id.as_str()) {
            return Err(TemplateError::DuplicateId(control.id.clone()));
        }
        seen.push(&control.id);
    }
    Ok(())
}

/// Recursive descent parser state.
struct Parser {
    tokens: Vec<PToken>,
    cursor: usize,
}

impl Parser {
    fn peek(&self) -> Option<&PToken> {
        self.tokens.get(self.cursor)
    }

    fn advance(&mut self) -> Option<&PToken> {
        let token = self.tokens.get(self.cursor);
        if token.is_some() {
            self.cursor += 1;
        }
        token
    }

    fn expect(&mut self, token: Token, message: &str) -> Result<(), TemplateError> {
        match self.advance() {
            Some(t) if t.token == token => Ok(()),
            Some(t) => Err(TemplateError::UnexpectedToken {
                position: t.pos,
                message: format!("{message}, got '{}'", t.text),
            }),
            None => Err(TemplateError::UnexpectedEof(message.to_string())),
        }
    }

    fn expect_ident(&mut self, message: &str) -> Result<String, TemplateError> {
        match self.advance() {
            Some(t) if t.token == Token::Ident => Ok(t.text.clone()),
            Some(t) => Err(TemplateError::UnexpectedToken {
                position: t.pos,
                message: format!("{message}, got '{}'", t.text),
            }),
            None => Err(TemplateError::UnexpectedEof(message.to_string())),
        }
    }

    fn expect_keyword(&mut self, keyword: &str) -> Result<(), TemplateError> {
        let ident = self.expect_ident(&format!("expected '{keyword}'"))?;
        if ident == keyword {
            Ok(())
        } else {
            Err(TemplateError::UnexpectedToken {
                position: self.cursor - 1,
                message: format!("expected '{keyword}', got '{ident}'"),
            })
        }
    }

    /// Consume an id selector and return the id without its leading `#`.
    fn expect_id_selector(&mut self) -> Result<String, TemplateError> {
        match self.advance() {
            Some(t) if t.token == Token::IdSelector => Ok(t.text[1..].to_string()),
            Some(t) => Err(TemplateError::UnexpectedToken {
                position: t.pos,
                message: format!("expected id selector, got '{}'", t.text),
            }),
            None => Err(TemplateError::UnexpectedEof("expected id selector".to_string())),
        }
    }

    /// Consume a string literal and return its content without quotes.
    fn expect_string(&mut self) -> Result<String, TemplateError> {
        match self.advance() {
            Some(t) if t.token == Token::StringLiteral => {
                Ok(t.text[1..t.text.len() - 1].to_string())
            }
            Some(t) => Err(TemplateError::UnexpectedToken {
                position: t.pos,
                message: format!("expected string literal, got '{}'", t.text),
            }),
            None => Err(TemplateError::UnexpectedEof("expected string literal".to_string())),
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const BASIC: &str = r#"
        slideshow {
            slot #slides;
            control #prev "<" previous;
            control #next ">" next;
        }
    "#;

    // ── Happy path ───────────────────────────────────────────────────

    #[test]
    fn parse_basic_template() {
        let t = parse_template(BASIC).unwrap();
        assert_eq!(t.slot_id, "slides");
        assert_eq!(t.controls.len(), 2);
        assert_eq!(t.controls[0].id, "prev");
        assert_eq!(t.controls[0].label, "<");
        assert_eq!(t.controls[0].action, ControlAction::Previous);
        assert_eq!(t.controls[1].id, "next");
        assert_eq!(t.controls[1].action, ControlAction::Next);
    }

    #[test]
    fn parse_slot_only() {
        let t = parse_template("slideshow { slot #slides; }").unwrap();
        assert_eq!(t.slot_id, "slides");
        assert!(t.controls.is_empty());
    }

    #[test]
    fn parse_with_comments() {
        let src = "slideshow { // structure\n slot #slides; // the panels\n }";
        let t = parse_template(src).unwrap();
        assert_eq!(t.slot_id, "slides");
    }

    #[test]
    fn parse_items_in_any_order() {
        let src = r#"slideshow { control #next ">" next; slot #slides; }"#;
        let t = parse_template(src).unwrap();
        assert_eq!(t.slot_id, "slides");
        assert_eq!(t.controls.len(), 1);
    }

    #[test]
    fn parse_label_with_spaces() {
        let src = r#"slideshow { slot #s; control #p "previous slide" previous; }"#;
        let t = parse_template(src).unwrap();
        assert_eq!(t.controls[0].label, "previous slide");
    }

    // ── Errors ───────────────────────────────────────────────────────

    #[test]
    fn missing_slideshow_keyword() {
        let err = parse_template("carousel { slot #s; }").unwrap_err();
        assert!(matches!(err, TemplateError::UnexpectedToken { .. }));
    }

    #[test]
    fn missing_brace() {
        let err = parse_template("slideshow slot #s;").unwrap_err();
        assert!(matches!(err, TemplateError::UnexpectedToken { .. }));
    }

    #[test]
    fn missing_slot() {
        let err = parse_template(r#"slideshow { control #n ">" next; }"#).unwrap_err();
        assert!(matches!(err, TemplateError::MissingSlot));
    }

    #[test]
    fn duplicate_slot() {
        let err = parse_template("slideshow { slot #a; slot #b; }").unwrap_err();
        assert!(matches!(err, TemplateError::DuplicateSlot));
    }

    #[test]
    fn duplicate_control_id() {
        let src = r#"slideshow { slot #s; control #x "<" previous; control #x ">" next; }"#;
        let err = parse_template(src).unwrap_err();
        assert!(matches!(err, TemplateError::DuplicateId(id) if id == "x"));
    }

    #[test]
    fn control_id_clashes_with_slot() {
        let src = r#"slideshow { slot #s; control #s "<" previous; }"#;
        let err = parse_template(src).unwrap_err();
        assert!(matches!(err, TemplateError::DuplicateId(id) if id == "s"));
    }

    #[test]
    fn unknown_action() {
        let src = r#"slideshow { slot #s; control #x "<" backwards; }"#;
        let err = parse_template(src).unwrap_err();
        assert!(matches!(err, TemplateError::UnknownAction(a) if a == "backwards"));
    }

    #[test]
    fn unknown_item_keyword() {
        let err = parse_template("slideshow { panel #s; }").unwrap_err();
        assert!(matches!(err, TemplateError::UnexpectedToken { .. }));
    }

    #[test]
    fn missing_semicolon() {
        let err = parse_template("slideshow { slot #s }").unwrap_err();
        assert!(matches!(err, TemplateError::UnexpectedToken { .. }));
    }

    #[test]
    fn unterminated_block() {
        let err = parse_template("slideshow { slot #s;").unwrap_err();
        assert!(matches!(err, TemplateError::UnexpectedEof(_)));
    }

    #[test]
    fn trailing_input() {
        let err = parse_template("slideshow { slot #s; } extra").unwrap_err();
        assert!(matches!(err, TemplateError::UnexpectedToken { .. }));
    }

    #[test]
    fn empty_input() {
        let err = parse_template("").unwrap_err();
        assert!(matches!(err, TemplateError::UnexpectedEof(_)));
    }

    #[test]
    fn error_messages_are_descriptive() {
        let err = parse_template("slideshow { slot slides; }").unwrap_err();
        let text = err.to_string();
        assert!(text.contains("id selector"));
    }
}
