use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::column::ColumnId;
use crate::field_update::FieldUpdate;

pub type CardId = Uuid;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    #[serde(alias = "high")]
    High,
    #[default]
    #[serde(alias = "medium")]
    Medium,
    #[serde(alias = "low")]
    Low,
}

impl Priority {
    /// Sort rank inside a column: High comes first.
    pub fn rank(self) -> u8 {
        match self {
            Self::High => 0,
            Self::Medium => 1,
            Self::Low => 2,
        }
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            _ => Err(format!("Invalid priority: {}. Use: high, medium, low", s)),
        }
    }
}

/// Who is responsible for the next step on a card.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Owner {
    #[default]
    #[serde(alias = "creator", alias = "Symone")]
    Creator,
    #[serde(alias = "editor")]
    Editor,
}

impl FromStr for Owner {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "creator" => Ok(Self::Creator),
            "editor" => Ok(Self::Editor),
            _ => Err(format!("Invalid owner: {}. Use: creator, editor", s)),
        }
    }
}

/// Where a sequence is published.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    #[serde(alias = "ig")]
    Instagram,
    #[serde(alias = "tt")]
    TikTok,
    #[serde(alias = "yt")]
    YouTube,
    #[serde(alias = "tw")]
    Twitter,
}

impl Platform {
    pub fn label(self) -> &'static str {
        match self {
            Self::Instagram => "IG Stories",
            Self::TikTok => "TikTok",
            Self::YouTube => "YouTube",
            Self::Twitter => "Twitter/X",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ig" | "instagram" => Ok(Self::Instagram),
            "tt" | "tiktok" => Ok(Self::TikTok),
            "yt" | "youtube" => Ok(Self::YouTube),
            "tw" | "twitter" | "x" => Ok(Self::Twitter),
            _ => Err(format!(
                "Invalid platform: {}. Use: instagram, tiktok, youtube, twitter",
                s
            )),
        }
    }
}

/// One story sequence tracked on the board.
///
/// Optional text fields treat an empty string the same as absent, both when
/// deserializing and when updating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub title: String,
    #[serde(default, alias = "desc", deserialize_with = "non_empty")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "non_empty")]
    pub notes: Option<String>,
    #[serde(default, alias = "canvaUrl", deserialize_with = "non_empty")]
    pub design_url: Option<String>,
    /// Free-text due label or a `YYYY-MM-DD` date.
    #[serde(
        default,
        alias = "dueDate",
        alias = "dueLabel",
        deserialize_with = "non_empty"
    )]
    pub due: Option<String>,
    pub status: ColumnId,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default, alias = "assignee")]
    pub owner: Owner,
    #[serde(default, alias = "approvedBy", deserialize_with = "non_empty")]
    pub approved_by: Option<String>,
    #[serde(default)]
    pub platform: Option<Platform>,
    #[serde(default, deserialize_with = "non_empty")]
    pub slides: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(alias = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(alias = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

fn non_empty<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

impl Card {
    pub fn new(title: impl Into<String>, status: ColumnId) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: None,
            notes: None,
            design_url: None,
            due: None,
            status,
            priority: Priority::default(),
            owner: Owner::default(),
            approved_by: None,
            platform: None,
            slides: None,
            tags: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Advance `updated_at`. Edits always move it forward, even when two
    /// edits land inside one clock tick.
    pub fn touch(&mut self) {
        let floor = self.updated_at + Duration::microseconds(1);
        self.updated_at = Utc::now().max(floor);
    }

    pub fn move_to(&mut self, status: ColumnId) {
        self.status = status;
        self.touch();
    }

    pub fn update(&mut self, updates: CardUpdate) {
        if let Some(title) = updates.title {
            self.title = title;
        }
        if let Some(status) = updates.status {
            self.status = status;
        }
        if let Some(priority) = updates.priority {
            self.priority = priority;
        }
        if let Some(owner) = updates.owner {
            self.owner = owner;
        }
        if let Some(tags) = updates.tags {
            self.tags = tags
                .into_iter()
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect();
        }
        updates.description.non_blank().apply_to(&mut self.description);
        updates.notes.non_blank().apply_to(&mut self.notes);
        updates.design_url.non_blank().apply_to(&mut self.design_url);
        updates.due.non_blank().apply_to(&mut self.due);
        updates.approved_by.non_blank().apply_to(&mut self.approved_by);
        updates.slides.non_blank().apply_to(&mut self.slides);
        updates.platform.apply_to(&mut self.platform);
        self.touch();
    }

    /// Copy every editable field from `other`, keeping this card's identity
    /// and creation time.
    pub fn replace_fields(&mut self, other: Card) {
        let id = self.id;
        let created_at = self.created_at;
        let updated_at = self.updated_at;
        *self = other;
        self.id = id;
        self.created_at = created_at;
        self.updated_at = updated_at;
        self.touch();
    }

    /// The due field parsed as a calendar date, when it is one.
    pub fn due_date(&self) -> Option<NaiveDate> {
        self.due
            .as_deref()
            .and_then(|d| NaiveDate::parse_from_str(d.trim(), "%Y-%m-%d").ok())
    }

    pub fn is_posted(&self) -> bool {
        self.status == ColumnId::Posted
    }
}

/// Partial edit of a card, as submitted by the edit form.
#[derive(Debug, Clone, Default)]
pub struct CardUpdate {
    pub title: Option<String>,
    pub status: Option<ColumnId>,
    pub priority: Option<Priority>,
    pub owner: Option<Owner>,
    pub tags: Option<Vec<String>>,
    pub description: FieldUpdate<String>,
    pub notes: FieldUpdate<String>,
    pub design_url: FieldUpdate<String>,
    pub due: FieldUpdate<String>,
    pub approved_by: FieldUpdate<String>,
    pub platform: FieldUpdate<Platform>,
    pub slides: FieldUpdate<String>,
}

impl CardUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.status.is_none()
            && self.priority.is_none()
            && self.owner.is_none()
            && self.tags.is_none()
            && !self.description.is_change()
            && !self.notes.is_change()
            && !self.design_url.is_change()
            && !self.due.is_change()
            && !self.approved_by.is_change()
            && !self.platform.is_change()
            && !self.slides.is_change()
    }
}
