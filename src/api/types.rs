//! Catalog entities as served by the REST API.
//!
//! The hierarchy is strict: `Year` → `Formation` → `Module` → `CourseResource`.
//! Every level below `Year` is fetched with its parent's `Id`.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Identifier of a catalog entity.
///
/// The backend sends numeric ids, but route parameters arrive as text, so both
/// forms collapse into the same string-backed value.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(from = "RawId")]
pub struct Id(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Int(i64),
    Float(f64),
    Text(String),
}

impl From<RawId> for Id {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Int(n) => Id(n.to_string()),
            RawId::Float(f) => Id(f.to_string()),
            RawId::Text(s) => Id(s),
        }
    }
}

impl Id {
    /// Parse a route parameter. Blank input means "no identifier".
    pub fn parse(raw: &str) -> Option<Id> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Id(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Academic year grouping. Displayed in ascending `order`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Year {
    pub id: Id,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub order: i64,
}

/// Specialization track (filière) within a year.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Formation {
    pub id: Id,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub code: Option<String>,
}

impl Formation {
    /// Broad category badge guessed from the name.
    pub fn category(&self) -> &'static str {
        let name = self.name.to_lowercase();
        if name.contains("dev") || name.contains("full") {
            "Développement"
        } else if name.contains("sys") || name.contains("infra") {
            "Infrastructure"
        } else if name.contains("des") || name.contains("art") {
            "Design"
        } else {
            "Spécialisation"
        }
    }
}

/// Subject taught within a formation.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Module {
    pub id: Id,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub code: Option<String>,
}

/// A lesson, control or exam attached to a module.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CourseResource {
    pub id: Id,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub file_url: Option<String>,
}

impl CourseResource {
    /// Display label: title, then name, then a positional placeholder (1-based).
    pub fn label(&self, index: usize) -> String {
        non_blank(self.title.as_deref())
            .or_else(|| non_blank(self.name.as_deref()))
            .map(str::to_string)
            .unwrap_or_else(|| format!("Resource {}", index + 1))
    }

    /// The file link, if the resource has a usable one.
    pub fn file_url(&self) -> Option<&str> {
        non_blank(self.file_url.as_deref())
    }

    pub fn is_downloadable(&self) -> bool {
        self.file_url().is_some()
    }
}

/// Exams attached to a single course: `{ efm: [...], controls: [...] }`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct ExamSet {
    #[serde(default, deserialize_with = "null_as_default")]
    pub efm: Vec<CourseResource>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub controls: Vec<CourseResource>,
}

/// The three resource partitions offered for a module.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    #[default]
    Cours,
    Controls,
    Efm,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 3] = [
        ResourceKind::Cours,
        ResourceKind::Controls,
        ResourceKind::Efm,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ResourceKind::Cours => "cours",
            ResourceKind::Controls => "controls",
            ResourceKind::Efm => "efm",
        }
    }

    /// Short tab label.
    pub fn label(self) -> &'static str {
        match self {
            ResourceKind::Cours => "Cours",
            ResourceKind::Controls => "Controls",
            ResourceKind::Efm => "EFM",
        }
    }

    /// Page heading shown above the list.
    pub fn heading(self) -> &'static str {
        match self {
            ResourceKind::Cours => "Course Lessons",
            ResourceKind::Controls => "Controls & Tests",
            ResourceKind::Efm => "Exam Materials",
        }
    }

    pub fn blurb(self) -> &'static str {
        match self {
            ResourceKind::Cours => "Access and download your lessons and presentations.",
            ResourceKind::Controls => "Access and download your continuous assessments.",
            ResourceKind::Efm => "Access and download your final exams and regional.",
        }
    }

    /// Plural noun used by the empty state ("No Lessons Yet").
    pub fn empty_noun(self) -> &'static str {
        match self {
            ResourceKind::Cours => "Lessons",
            ResourceKind::Controls => "Controls",
            ResourceKind::Efm => "Exams",
        }
    }

    pub fn index(self) -> usize {
        match self {
            ResourceKind::Cours => 0,
            ResourceKind::Controls => 1,
            ResourceKind::Efm => 2,
        }
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Stable ascending sort by `order`; equal orders keep their arrival order.
pub fn sort_years(years: &mut [Year]) {
    years.sort_by_key(|year| year.order);
}

/// The backend sends `null` where a field is unknown; treat it like an absent one.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}
