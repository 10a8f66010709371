//! Record shapes and the mode that selects between them

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which record shape the dataset currently holds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    /// `{ prompt, completion }` pairs for instruction-tuned models
    #[default]
    Instruction,
    /// `{ text }` records for autocompleting models
    Autocomplete,
}

impl Mode {
    pub const ALL: [Mode; 2] = [Mode::Instruction, Mode::Autocomplete];

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Instruction => "instructions",
            Mode::Autocomplete => "autocomplete",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Mode::Instruction => "Instruction-tuned model",
            Mode::Autocomplete => "Autocompleting model",
        }
    }

    /// Fields of this mode's shape, in declaration order
    pub fn fields(self) -> &'static [Field] {
        match self {
            Mode::Instruction => &[Field::Prompt, Field::Completion],
            Mode::Autocomplete => &[Field::Text],
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown mode '{0}', expected 'instructions' or 'autocomplete'")]
pub struct ParseModeError(pub String);

impl FromStr for Mode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "instructions" | "instruction" => Ok(Mode::Instruction),
            "autocomplete" => Ok(Mode::Autocomplete),
            other => Err(ParseModeError(other.to_string())),
        }
    }
}

/// A single editable field of a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Prompt,
    Completion,
    Text,
}

impl Field {
    pub fn name(self) -> &'static str {
        match self {
            Field::Prompt => "prompt",
            Field::Completion => "completion",
            Field::Text => "text",
        }
    }

    pub fn mode(self) -> Mode {
        match self {
            Field::Prompt | Field::Completion => Mode::Instruction,
            Field::Text => Mode::Autocomplete,
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            Field::Prompt => "Enter prompt",
            Field::Completion => "Enter completion",
            Field::Text => "Enter text",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown field '{0}'")]
pub struct ParseFieldError(pub String);

impl FromStr for Field {
    type Err = ParseFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "prompt" => Ok(Field::Prompt),
            "completion" => Ok(Field::Completion),
            "text" => Ok(Field::Text),
            other => Err(ParseFieldError(other.to_string())),
        }
    }
}

/// One training-data entry.
///
/// Serializes untagged so the JSON object carries exactly the shape's fields,
/// in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Record {
    Instruction { prompt: String, completion: String },
    Autocomplete { text: String },
}

impl Record {
    pub fn blank(mode: Mode) -> Self {
        match mode {
            Mode::Instruction => Record::Instruction {
                prompt: String::new(),
                completion: String::new(),
            },
            Mode::Autocomplete => Record::Autocomplete {
                text: String::new(),
            },
        }
    }

    pub fn mode(&self) -> Mode {
        match self {
            Record::Instruction { .. } => Mode::Instruction,
            Record::Autocomplete { .. } => Mode::Autocomplete,
        }
    }

    /// Reshape into `mode`: fields shared by both shapes are copied, missing
    /// ones default to empty, the rest are dropped.
    pub fn coerce(&self, mode: Mode) -> Self {
        let mut next = Record::blank(mode);
        for field in mode.fields() {
            if let Some(value) = self.get(*field) {
                next.set(*field, value.to_string());
            }
        }
        next
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        match (self, field) {
            (Record::Instruction { prompt, .. }, Field::Prompt) => Some(prompt),
            (Record::Instruction { completion, .. }, Field::Completion) => Some(completion),
            (Record::Autocomplete { text }, Field::Text) => Some(text),
            _ => None,
        }
    }

    /// Replace a field in place. Returns `false` when the field does not
    /// belong to this record's shape.
    pub fn set(&mut self, field: Field, value: String) -> bool {
        let slot = match (self, field) {
            (Record::Instruction { prompt, .. }, Field::Prompt) => prompt,
            (Record::Instruction { completion, .. }, Field::Completion) => completion,
            (Record::Autocomplete { text }, Field::Text) => text,
            _ => return false,
        };
        *slot = value;
        true
    }
}
