//! Token types for the StoryScript DSL.
//!
//! Tokens are the output of the lexer and input to the parser.

use std::fmt;

/// A token from lexical analysis.
///
/// `text` carries the literal payload for identifiers, strings (already
/// unescaped), numbers, and comments; it is empty for structural tokens.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    /// 1-based source line.
    pub line: u32,
    /// 1-based source column.
    pub column: u32,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, line: u32, column: u32) -> Token {
        Token {
            kind,
            text: text.into(),
            line,
            column,
        }
    }
}

/// Token kinds for the StoryScript DSL.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TokenKind {
    // Block keywords
    Game,
    Characters,
    Inventory,
    Scene,
    Description,
    OnEnter,
    Hotspot,
    Look,
    Talk,
    Use,
    Dialogue,
    Choice,
    Trigger,
    Require,
    After,
    Cutscene,
    Puzzle,
    Solution,
    Hints,
    ActEnd,
    StateCheck,
    Track,
    End,

    // Statement / condition keywords
    If,
    Else,
    And,
    Or,
    Not,
    Has,
    At,
    Give,
    Set,
    Examine,

    // Punctuation
    Colon,
    Comma,
    /// `->`
    Arrow,
    LParen,
    RParen,
    LBracket,
    RBracket,
    /// `=`
    Assign,
    /// `==`
    EqEq,
    /// `!=`
    NotEq,
    /// `>` anywhere except the start of a line
    Greater,
    Less,
    GreaterEq,
    LessEq,
    /// `>` as the first token on a line, introducing a choice option
    ChoiceMarker,

    // Literals
    Str,
    Number,
    Ident,

    // Structural
    Indent,
    Dedent,
    Newline,
    Comment,
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/// Case-sensitive keyword table. Anything alphabetic not listed here lexes
/// as an identifier.
pub fn keyword_kind(word: &str) -> Option<TokenKind> {
    let kind = match word {
        "GAME" => TokenKind::Game,
        "CHARACTERS" => TokenKind::Characters,
        "INVENTORY" => TokenKind::Inventory,
        "SCENE" => TokenKind::Scene,
        "DESCRIPTION" => TokenKind::Description,
        "ON_ENTER" => TokenKind::OnEnter,
        "HOTSPOT" => TokenKind::Hotspot,
        "LOOK" => TokenKind::Look,
        "TALK" => TokenKind::Talk,
        "USE" => TokenKind::Use,
        "DIALOGUE" => TokenKind::Dialogue,
        "CHOICE" => TokenKind::Choice,
        "TRIGGER" => TokenKind::Trigger,
        "REQUIRE" => TokenKind::Require,
        "AFTER" => TokenKind::After,
        "CUTSCENE" => TokenKind::Cutscene,
        "PUZZLE" => TokenKind::Puzzle,
        "SOLUTION" => TokenKind::Solution,
        "HINTS" => TokenKind::Hints,
        "ACT_END" => TokenKind::ActEnd,
        "STATE_CHECK" => TokenKind::StateCheck,
        "TRACK" => TokenKind::Track,
        "END" => TokenKind::End,
        "IF" => TokenKind::If,
        "ELSE" => TokenKind::Else,
        "AND" => TokenKind::And,
        "OR" => TokenKind::Or,
        "NOT" => TokenKind::Not,
        "HAS" => TokenKind::Has,
        "AT" => TokenKind::At,
        "GIVE" => TokenKind::Give,
        "SET" => TokenKind::Set,
        "EXAMINE" => TokenKind::Examine,
        _ => return None,
    };
    Some(kind)
}
