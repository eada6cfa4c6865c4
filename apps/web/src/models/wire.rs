//! JSON shapes of the catalog HTTP service (camelCase on the wire).
//!
//! Used both ways: `RemoteCatalog` decodes them, the JSON mirror routes
//! encode them from whatever source is configured.

use serde::{Deserialize, Serialize};

use crate::models::catalog::{ItemDetail, Question, Resource, Section, Subsection};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SheetsResponse {
    pub sheets: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ItemShort {
    pub id: i64,
    pub question: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GradeGroup {
    pub grade: String,
    #[serde(default)]
    pub items: Vec<ItemShort>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubsectionGroup {
    pub subsection: String,
    #[serde(default)]
    pub grades: Vec<GradeGroup>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SectionGroup {
    pub section: String,
    #[serde(default)]
    pub subsections: Vec<SubsectionGroup>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ItemsResponse {
    pub sheet: String,
    #[serde(default)]
    pub sections: Vec<SectionGroup>,
}

impl ItemsResponse {
    /// Groups a sheet's sections into the short wire form.
    /// Questions without an id cannot be addressed remotely and are left out.
    pub fn from_sections(sheet: &str, sections: &[Section]) -> Self {
        let sections = sections
            .iter()
            .map(|section| SectionGroup {
                section: section.title.clone(),
                subsections: section
                    .subsections
                    .iter()
                    .map(|sub| SubsectionGroup {
                        subsection: sub.name.clone(),
                        grades: sub
                            .content
                            .iter()
                            .map(|(grade, questions)| GradeGroup {
                                grade: grade.clone(),
                                items: questions
                                    .iter()
                                    .filter_map(|q| {
                                        q.id.map(|id| ItemShort {
                                            id,
                                            question: q.question.clone(),
                                        })
                                    })
                                    .collect(),
                            })
                            .collect(),
                    })
                    .collect(),
            })
            .collect();

        Self {
            sheet: sheet.to_string(),
            sections,
        }
    }

    /// Converts back into catalog sections. Repeated grade groups inside one
    /// subsection are merged under the first-seen key.
    pub fn into_sections(self) -> Vec<Section> {
        self.sections
            .into_iter()
            .map(|section| Section {
                title: section.section,
                subsections: section
                    .subsections
                    .into_iter()
                    .map(|sub| {
                        let mut subsection = Subsection {
                            name: sub.subsection,
                            content: Default::default(),
                        };
                        for group in sub.grades {
                            subsection
                                .content
                                .entry(group.grade)
                                .or_default()
                                .extend(group.items.into_iter().map(|item| Question {
                                    id: Some(item.id),
                                    question: item.question,
                                    answer: None,
                                    interview_expected_answer: None,
                                    resources: vec![],
                                }));
                        }
                        subsection
                    })
                    .collect(),
            })
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResourceResponse {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub context: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ItemDetailResponse {
    pub id: i64,
    pub question: String,
    #[serde(default)]
    pub answer: String,
    #[serde(default)]
    pub interview_expected_answer: String,
    #[serde(default)]
    pub sheet: String,
    #[serde(default)]
    pub grade: String,
    #[serde(default)]
    pub section: String,
    #[serde(default)]
    pub subsection: String,
    #[serde(default)]
    pub resources: Vec<ResourceResponse>,
}

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

impl From<ItemDetailResponse> for ItemDetail {
    fn from(r: ItemDetailResponse) -> Self {
        ItemDetail {
            id: r.id,
            question: r.question,
            answer: non_empty(r.answer),
            interview_expected_answer: non_empty(r.interview_expected_answer),
            sheet: r.sheet,
            grade: r.grade,
            section: r.section,
            subsection: r.subsection,
            resources: r
                .resources
                .into_iter()
                .map(|res| Resource {
                    id: res.id,
                    name: non_empty(res.name),
                    url: res.url,
                    context: non_empty(res.context),
                })
                .collect(),
        }
    }
}

impl From<&ItemDetail> for ItemDetailResponse {
    fn from(item: &ItemDetail) -> Self {
        ItemDetailResponse {
            id: item.id,
            question: item.question.clone(),
            answer: item.answer.clone().unwrap_or_default(),
            interview_expected_answer: item.interview_expected_answer.clone().unwrap_or_default(),
            sheet: item.sheet.clone(),
            grade: item.grade.clone(),
            section: item.section.clone(),
            subsection: item.subsection.clone(),
            resources: item
                .resources
                .iter()
                .map(|res| ResourceResponse {
                    id: res.id,
                    name: res.label().to_string(),
                    url: res.url.clone(),
                    context: res.context.clone().unwrap_or_default(),
                })
                .collect(),
        }
    }
}
