use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Workflow stage a card sits in. The set is closed; columns are not
/// user-editable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnId {
    Ideation,
    NeedsEditing,
    ReadyReview,
    Approved,
    Scheduled,
    Posted,
}

impl ColumnId {
    pub const ALL: [ColumnId; 6] = [
        ColumnId::Ideation,
        ColumnId::NeedsEditing,
        ColumnId::ReadyReview,
        ColumnId::Approved,
        ColumnId::Scheduled,
        ColumnId::Posted,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ideation => "ideation",
            Self::NeedsEditing => "needs_editing",
            Self::ReadyReview => "ready_review",
            Self::Approved => "approved",
            Self::Scheduled => "scheduled",
            Self::Posted => "posted",
        }
    }

    /// Zero-based position of this column on the board.
    pub fn position(self) -> usize {
        self as usize
    }

    pub fn column(self) -> &'static Column {
        &COLUMNS[self.position()]
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColumnId {
    type Err = String;

    /// Accepts the column id (`needs_editing`), its display title
    /// (`Needs Editing`) or a kebab-case spelling, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect();
        match key.as_str() {
            "ideation" => Ok(Self::Ideation),
            "needsediting" => Ok(Self::NeedsEditing),
            "readyreview" | "readyforreview" => Ok(Self::ReadyReview),
            "approved" => Ok(Self::Approved),
            "scheduled" => Ok(Self::Scheduled),
            "posted" => Ok(Self::Posted),
            _ => Err(format!(
                "Invalid status: {}. Use: {}",
                s,
                ColumnId::ALL.map(ColumnId::as_str).join(", ")
            )),
        }
    }
}

/// Visual tag a front end uses to colour a column header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnTag {
    Slate,
    Amber,
    Sky,
    Emerald,
    Violet,
    Green,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Column {
    pub id: ColumnId,
    pub title: &'static str,
    pub tag: ColumnTag,
}

pub const COLUMNS: [Column; 6] = [
    Column {
        id: ColumnId::Ideation,
        title: "Ideation",
        tag: ColumnTag::Slate,
    },
    Column {
        id: ColumnId::NeedsEditing,
        title: "Needs Editing",
        tag: ColumnTag::Amber,
    },
    Column {
        id: ColumnId::ReadyReview,
        title: "Ready for Review",
        tag: ColumnTag::Sky,
    },
    Column {
        id: ColumnId::Approved,
        title: "Approved",
        tag: ColumnTag::Emerald,
    },
    Column {
        id: ColumnId::Scheduled,
        title: "Scheduled",
        tag: ColumnTag::Violet,
    },
    Column {
        id: ColumnId::Posted,
        title: "Posted",
        tag: ColumnTag::Green,
    },
];
