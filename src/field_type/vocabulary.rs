//! Symbolic token vocabularies for enumerated settings.
//!
//! Clients see stable tokens (`SELECTION_BROWSE`); storage keeps integers or short
//! strings. A vocabulary maps one hash key in both directions. Values the vocabulary does
//! not know pass through unchanged on input; on output a vocabulary either keeps them or
//! substitutes a fallback token.

use serde_json::Value;
use tracing::warn;

/// Internal representation of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Internal {
    Int(i64),
    Str(&'static str),
}

impl Internal {
    fn matches(&self, value: &Value) -> bool {
        match self {
            Internal::Int(i) => value.as_i64() == Some(*i),
            Internal::Str(s) => value.as_str() == Some(*s),
        }
    }

    fn to_value(self) -> Value {
        match self {
            Internal::Int(i) => Value::from(i),
            Internal::Str(s) => Value::from(s),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnknownOut {
    Keep,
    Fallback(&'static str),
}

#[derive(Debug, Clone, Copy)]
pub struct Vocabulary {
    pub key: &'static str,
    pub entries: &'static [(&'static str, Internal)],
    pub unknown_out: UnknownOut,
}

impl Vocabulary {
    /// Replace the token under `key` by its internal value.
    pub fn to_internal(&self, hash: &mut Value) {
        let Some(slot) = hash.as_object_mut().and_then(|m| m.get_mut(self.key)) else {
            return;
        };
        let Some(token) = slot.as_str() else {
            return;
        };
        match self.entries.iter().find(|(t, _)| *t == token) {
            Some((_, internal)) => *slot = internal.to_value(),
            None => warn!(key = self.key, token = %token, "Unknown token left unchanged"),
        }
    }

    /// Replace the internal value under `key` by its token.
    pub fn to_token(&self, hash: &mut Value) {
        let Some(slot) = hash.as_object_mut().and_then(|m| m.get_mut(self.key)) else {
            return;
        };
        let token = self
            .entries
            .iter()
            .find(|(_, internal)| internal.matches(&*slot))
            .map(|(token, _)| *token);
        match (token, self.unknown_out) {
            (Some(token), _) | (None, UnknownOut::Fallback(token)) => *slot = Value::from(token),
            (None, UnknownOut::Keep) => {}
        }
    }
}

pub const AUTHOR_DEFAULT: Vocabulary = Vocabulary {
    key: "defaultAuthor",
    entries: &[
        ("DEFAULT_VALUE_EMPTY", Internal::Int(0)),
        ("DEFAULT_CURRENT_USER", Internal::Int(1)),
    ],
    unknown_out: UnknownOut::Fallback("DEFAULT_VALUE_EMPTY"),
};

pub const DATE_DEFAULT: Vocabulary = Vocabulary {
    key: "defaultType",
    entries: &[
        ("DEFAULT_EMPTY", Internal::Int(0)),
        ("DEFAULT_CURRENT_DATE", Internal::Int(1)),
    ],
    unknown_out: UnknownOut::Keep,
};

pub const TIME_DEFAULT: Vocabulary = Vocabulary {
    key: "defaultType",
    entries: &[
        ("DEFAULT_EMPTY", Internal::Int(0)),
        ("DEFAULT_CURRENT_TIME", Internal::Int(1)),
    ],
    unknown_out: UnknownOut::Keep,
};

pub const DATETIME_DEFAULT: Vocabulary = Vocabulary {
    key: "defaultType",
    entries: &[
        ("DEFAULT_EMPTY", Internal::Int(0)),
        ("DEFAULT_CURRENT_DATE", Internal::Int(1)),
        ("DEFAULT_CURRENT_DATE_ADJUSTED", Internal::Int(2)),
    ],
    unknown_out: UnknownOut::Keep,
};

pub const MEDIA_TYPE: Vocabulary = Vocabulary {
    key: "mediaType",
    entries: &[
        ("TYPE_FLASH", Internal::Str("flash")),
        ("TYPE_QUICKTIME", Internal::Str("quick_time")),
        ("TYPE_REALPLAYER", Internal::Str("real_player")),
        ("TYPE_SILVERLIGHT", Internal::Str("silverlight")),
        ("TYPE_WINDOWSMEDIA", Internal::Str("windows_media_player")),
        ("TYPE_HTML5_VIDEO", Internal::Str("html5_video")),
        ("TYPE_HTML5_AUDIO", Internal::Str("html5_audio")),
    ],
    unknown_out: UnknownOut::Keep,
};

pub const RELATION_SELECTION: Vocabulary = Vocabulary {
    key: "selectionMethod",
    entries: &[
        ("SELECTION_BROWSE", Internal::Int(0)),
        ("SELECTION_DROPDOWN", Internal::Int(1)),
    ],
    unknown_out: UnknownOut::Keep,
};

pub const RELATION_LIST_SELECTION: Vocabulary = Vocabulary {
    key: "selectionMethod",
    entries: &[
        ("SELECTION_BROWSE", Internal::Int(0)),
        ("SELECTION_DROPDOWN", Internal::Int(1)),
        ("SELECTION_LIST_WITH_RADIO_BUTTONS", Internal::Int(2)),
        ("SELECTION_LIST_WITH_CHECKBOXES", Internal::Int(3)),
        ("SELECTION_MULTIPLE_SELECTION_LIST", Internal::Int(4)),
        ("SELECTION_TEMPLATE_BASED_MULTIPLE", Internal::Int(5)),
        ("SELECTION_TEMPLATE_BASED_SINGLE", Internal::Int(6)),
    ],
    unknown_out: UnknownOut::Keep,
};
