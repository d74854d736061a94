use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

/// Work-values sliders (1–5) captured during onboarding.
/// Missing sliders default to 3 individually.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ProfileValues {
    pub compensation: u8,
    pub impact: u8,
    pub flexibility: u8,
    pub stability: u8,
}

impl Default for ProfileValues {
    fn default() -> Self {
        Self {
            compensation: 3,
            impact: 3,
            flexibility: 3,
            stability: 3,
        }
    }
}

/// The student profile used for recommendations and prompt context.
/// Empty strings mean "not set".
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct UserProfile {
    pub name: String,
    pub year: String,
    pub major: String,
    pub interests: Vec<String>,
    pub values: ProfileValues,
    pub location_preferences: Vec<String>,
}

impl UserProfile {
    /// A profile counts as filled in once both class year and major are set.
    pub fn has_data(&self) -> bool {
        !self.year.is_empty() && !self.major.is_empty()
    }

    /// One-sentence description of the student for LLM prompts.
    pub fn describe(&self) -> String {
        let year = non_empty_or(&self.year, "college");
        let major = non_empty_or(&self.major, "undergraduate");
        let interests = if self.interests.is_empty() {
            "exploring options".to_string()
        } else {
            self.interests.join(", ")
        };
        format!("a {year} {major} student interested in {interests}")
    }
}

fn non_empty_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() {
        fallback
    } else {
        value
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct UserProfileRow {
    pub name: Option<String>,
    pub year: Option<String>,
    pub major: Option<String>,
    pub interests: Option<Vec<String>>,
    pub profile_values: Option<Value>,
    pub location_preferences: Option<Vec<String>>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserProfileRow> for UserProfile {
    fn from(row: UserProfileRow) -> Self {
        let values = row
            .profile_values
            .and_then(|v| serde_json::from_value::<ProfileValues>(v).ok())
            .unwrap_or_default();

        UserProfile {
            name: row.name.unwrap_or_default(),
            year: row.year.unwrap_or_default(),
            major: row.major.unwrap_or_default(),
            interests: row.interests.unwrap_or_default(),
            values,
            location_preferences: row.location_preferences.unwrap_or_default(),
        }
    }
}

/// Column values for an upsert; unset strings are stored as NULL.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileColumns {
    pub name: Option<String>,
    pub year: Option<String>,
    pub major: Option<String>,
    pub interests: Vec<String>,
    pub profile_values: Value,
    pub location_preferences: Vec<String>,
}

impl From<&UserProfile> for ProfileColumns {
    fn from(profile: &UserProfile) -> Self {
        let optional = |s: &str| (!s.is_empty()).then(|| s.to_string());
        ProfileColumns {
            name: optional(&profile.name),
            year: optional(&profile.year),
            major: optional(&profile.major),
            interests: profile.interests.clone(),
            profile_values: serde_json::to_value(profile.values).unwrap_or(Value::Null),
            location_preferences: profile.location_preferences.clone(),
        }
    }
}
