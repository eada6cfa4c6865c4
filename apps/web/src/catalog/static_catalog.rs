use std::collections::HashSet;
use std::path::Path;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::catalog::{CatalogError, CatalogSource};
use crate::models::catalog::{Catalog, Grade, ItemDetail, Question, Section};

const EMBEDDED_CATALOG: &str = include_str!("../../data/catalog.json");

/// Catalog held in memory for the lifetime of the process.
///
/// Questions without an id are numbered on load in traversal order
/// (sheet, section, subsection, grade key, question), skipping ids that the
/// data already uses, so the detail view can address every question.
#[derive(Debug, Clone)]
pub struct StaticCatalog {
    catalog: Catalog,
}

impl StaticCatalog {
    /// The catalog compiled into the binary.
    pub fn embedded() -> Result<Self, CatalogError> {
        Self::from_json(EMBEDDED_CATALOG)
    }

    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path)?;
        let catalog = Self::from_json(&raw)?;
        info!(
            "Loaded static catalog from {} ({} sheets)",
            path.display(),
            catalog.catalog.sheets.len()
        );
        Ok(catalog)
    }

    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog = serde_json::from_str(raw)
            .map_err(|e| CatalogError::InvalidCatalog(format!("catalog JSON: {e}")))?;
        Self::new(catalog)
    }

    pub fn new(mut catalog: Catalog) -> Result<Self, CatalogError> {
        validate(&catalog)?;
        assign_ids(&mut catalog)?;
        Ok(Self { catalog })
    }

    fn find(&self, id: i64) -> Option<ItemDetail> {
        for sheet in &self.catalog.sheets {
            for section in &sheet.sections {
                for sub in &section.subsections {
                    for (grade, questions) in &sub.content {
                        if let Some(q) = questions.iter().find(|q| q.id == Some(id)) {
                            return Some(ItemDetail {
                                id,
                                question: q.question.clone(),
                                answer: q.answer.clone(),
                                interview_expected_answer: q.interview_expected_answer.clone(),
                                sheet: sheet.name.clone(),
                                grade: grade.clone(),
                                section: section.title.clone(),
                                subsection: sub.name.clone(),
                                resources: q.resources.clone(),
                            });
                        }
                    }
                }
            }
        }
        None
    }
}

fn validate(catalog: &Catalog) -> Result<(), CatalogError> {
    let mut names = HashSet::new();
    for sheet in &catalog.sheets {
        if !names.insert(sheet.name.as_str()) {
            return Err(CatalogError::InvalidCatalog(format!(
                "duplicate sheet name '{}'",
                sheet.name
            )));
        }
        for section in &sheet.sections {
            for sub in &section.subsections {
                for (grade, questions) in &sub.content {
                    if Grade::from_label(grade).is_none() {
                        warn!(
                            sheet = %sheet.name,
                            subsection = %sub.name,
                            "ignoring questions under unknown grade '{grade}'"
                        );
                    }
                    if questions.iter().any(|q| q.question.trim().is_empty()) {
                        return Err(CatalogError::InvalidCatalog(format!(
                            "empty question text in {} / {} / {} / {}",
                            sheet.name, section.title, sub.name, grade
                        )));
                    }
                }
            }
        }
    }
    Ok(())
}

fn assign_ids(catalog: &mut Catalog) -> Result<(), CatalogError> {
    let mut used = HashSet::new();
    for q in questions_mut(catalog) {
        if let Some(id) = q.id {
            if !used.insert(id) {
                return Err(CatalogError::InvalidCatalog(format!(
                    "duplicate question id {id}"
                )));
            }
        }
    }

    let mut next = 1;
    for q in questions_mut(catalog) {
        if q.id.is_none() {
            while used.contains(&next) {
                next += 1;
            }
            q.id = Some(next);
            used.insert(next);
        }
    }
    Ok(())
}

fn questions_mut(
    catalog: &mut Catalog,
) -> impl Iterator<Item = &mut Question> {
    catalog
        .sheets
        .iter_mut()
        .flat_map(|sheet| sheet.sections.iter_mut())
        .flat_map(|section| section.subsections.iter_mut())
        .flat_map(|sub| sub.content.values_mut())
        .flat_map(|questions| questions.iter_mut())
}

#[async_trait]
impl CatalogSource for StaticCatalog {
    fn kind(&self) -> &'static str {
        "static"
    }

    async fn list_sheets(&self) -> Result<Vec<String>, CatalogError> {
        Ok(self.catalog.sheets.iter().map(|s| s.name.clone()).collect())
    }

    async fn sheet_sections(&self, sheet: &str) -> Result<Vec<Section>, CatalogError> {
        Ok(self
            .catalog
            .sheets
            .iter()
            .find(|s| s.name == sheet)
            .map(|s| s.sections.clone())
            .unwrap_or_default())
    }

    async fn item_detail(&self, id: i64) -> Result<ItemDetail, CatalogError> {
        self.find(id).ok_or(CatalogError::NotFound(id))
    }
}
