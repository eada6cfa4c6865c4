use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Experience level a question is aimed at.
/// Declaration order is the canonical display order.
/// Catalogs key questions by the raw label, see [`Subsection`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Grade {
    Junior,
    JuniorPlus,
    Middle,
    MiddlePlus,
    Senior,
}

impl Grade {
    pub const ALL: [Grade; 5] = [
        Grade::Junior,
        Grade::JuniorPlus,
        Grade::Middle,
        Grade::MiddlePlus,
        Grade::Senior,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Grade::Junior => "Junior",
            Grade::JuniorPlus => "Junior+",
            Grade::Middle => "Middle",
            Grade::MiddlePlus => "Middle+",
            Grade::Senior => "Senior",
        }
    }

    /// Exact-label lookup. Anything outside the fixed set is `None`.
    pub fn from_label(label: &str) -> Option<Grade> {
        Grade::ALL.into_iter().find(|g| g.label() == label)
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Resource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

impl Resource {
    /// Display name, falling back to the raw URL.
    pub fn label(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.url)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Question {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub question: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interview_expected_answer: Option<String>,
    #[serde(default)]
    pub resources: Vec<Resource>,
}

/// A named group of questions keyed by grade label.
///
/// Keys stay raw strings so that labels outside [`Grade::ALL`] survive
/// loading; renderers simply never ask for them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Subsection {
    pub name: String,
    #[serde(default)]
    pub content: IndexMap<String, Vec<Question>>,
}

impl Subsection {
    /// Questions for one grade; an absent key is an empty slice.
    pub fn questions(&self, grade: Grade) -> &[Question] {
        self.content
            .get(grade.label())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Recognized grades holding at least one question, in canonical order.
    pub fn present_grades(&self) -> Vec<Grade> {
        Grade::ALL
            .into_iter()
            .filter(|g| !self.questions(*g).is_empty())
            .collect()
    }

    /// Every question under every key, recognized or not.
    pub fn all_questions(&self) -> impl Iterator<Item = &Question> {
        self.content.values().flatten()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Section {
    pub title: String,
    #[serde(default)]
    pub subsections: Vec<Subsection>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Sheet {
    pub name: String,
    #[serde(default)]
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Catalog {
    pub sheets: Vec<Sheet>,
}

/// Everything the detail modal shows for one question.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemDetail {
    pub id: i64,
    pub question: String,
    pub answer: Option<String>,
    pub interview_expected_answer: Option<String>,
    pub sheet: String,
    pub grade: String,
    pub section: String,
    pub subsection: String,
    pub resources: Vec<Resource>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(text: &str) -> Question {
        Question {
            id: None,
            question: text.to_string(),
            answer: None,
            interview_expected_answer: None,
            resources: vec![],
        }
    }

    #[test]
    fn test_grade_labels_round_trip_in_canonical_order() {
        let labels: Vec<_> = Grade::ALL.iter().map(|g| g.label()).collect();
        assert_eq!(labels, ["Junior", "Junior+", "Middle", "Middle+", "Senior"]);
        for grade in Grade::ALL {
            assert_eq!(Grade::from_label(grade.label()), Some(grade));
        }
    }

    #[test]
    fn test_grade_from_label_rejects_unknown_and_case_variants() {
        assert_eq!(Grade::from_label("Lead"), None);
        assert_eq!(Grade::from_label("junior"), None);
        assert_eq!(Grade::from_label(""), None);
    }

    #[test]
    fn test_present_grades_skips_unknown_and_empty_keys() {
        let mut content = IndexMap::new();
        content.insert("Senior".to_string(), vec![question("a")]);
        content.insert("Lead".to_string(), vec![question("b")]);
        content.insert("Middle".to_string(), vec![]);
        content.insert("Junior".to_string(), vec![question("c")]);
        let sub = Subsection {
            name: "x".to_string(),
            content,
        };

        assert_eq!(sub.present_grades(), vec![Grade::Junior, Grade::Senior]);
        assert!(sub.questions(Grade::MiddlePlus).is_empty());
        assert_eq!(sub.all_questions().count(), 3);
    }

    #[test]
    fn test_resource_label_falls_back_to_url() {
        let mut resource = Resource {
            id: None,
            name: None,
            url: "https://docs.python.org".to_string(),
            context: None,
        };
        assert_eq!(resource.label(), "https://docs.python.org");

        resource.name = Some("  ".to_string());
        assert_eq!(resource.label(), "https://docs.python.org");

        resource.name = Some("Python docs".to_string());
        assert_eq!(resource.label(), "Python docs");
    }

    #[test]
    fn test_subsection_content_keeps_insertion_order() {
        let raw = r#"{"name":"s","content":{"Senior":[],"Junior":[],"Middle":[]}}"#;
        let sub: Subsection = serde_json::from_str(raw).unwrap();
        let keys: Vec<_> = sub.content.keys().cloned().collect();
        assert_eq!(keys, ["Senior", "Junior", "Middle"]);
    }
}
