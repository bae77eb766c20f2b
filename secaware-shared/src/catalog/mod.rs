/// Training catalog: modules and their assessments
///
/// The catalog is static content shipped with the binary. It is parsed once at
/// startup from the embedded `catalog.json` definition and held as an immutable
/// in-process table, so every instance serves the same content and no storage
/// round-trip is needed for reads.
///
/// # Example
///
/// ```
/// use secaware_shared::catalog::Catalog;
///
/// let catalog = Catalog::builtin().unwrap();
/// let module = catalog.module("module-1").unwrap();
/// assert_eq!(module.order, 1);
///
/// // Questions served to clients never carry the answer key
/// let public = catalog.public_assessment("module-1").unwrap();
/// assert_eq!(public.questions.len(), 5);
/// ```

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::info;

/// Embedded catalog definition
const BUILTIN_CATALOG: &str = include_str!("catalog.json");

/// Maximum number of records returned by any list operation
pub const MAX_LIST_SIZE: usize = 100;

/// Errors raised while loading a catalog definition
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Definition is not valid JSON for the catalog schema
    #[error("Invalid catalog definition: {0}")]
    Parse(#[from] serde_json::Error),

    /// Two modules share an identifier
    #[error("Duplicate module id: {0}")]
    DuplicateModule(String),

    /// Two assessments share an identifier
    #[error("Duplicate assessment id: {0}")]
    DuplicateAssessment(String),

    /// An assessment points at a module that does not exist
    #[error("Assessment {assessment_id} references unknown module {module_id}")]
    UnknownModule {
        assessment_id: String,
        module_id: String,
    },

    /// A module has more than one assessment
    #[error("Module {0} has more than one assessment")]
    MultipleAssessments(String),

    /// Question ids collide inside one assessment
    #[error("Assessment {assessment_id} repeats question id {question_id}")]
    DuplicateQuestion {
        assessment_id: String,
        question_id: String,
    },
}

/// A unit of training content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    pub id: String,
    pub title: String,
    pub description: String,

    /// Presentation sequence (ascending)
    pub order: i32,

    /// Embeddable video URL
    pub video_url: String,

    /// Long-form markdown content
    pub content: String,

    /// Human-readable duration label, e.g. "45 mins"
    pub duration: String,
}

/// Question kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    /// Multiple choice
    Mcq,

    /// True / false
    TrueFalse,
}

/// A scored question, including its answer key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub question: String,
    #[serde(rename = "type")]
    pub kind: QuestionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    pub correct_answer: String,
}

/// The quiz bound to a single module
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assessment {
    pub id: String,
    pub module_id: String,
    pub questions: Vec<Question>,
}

/// Question as served to clients
///
/// Has no answer-key field at all, so an unscored question set can never leak
/// correct answers through serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicQuestion {
    pub id: String,
    pub question: String,
    #[serde(rename = "type")]
    pub kind: QuestionType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

/// Assessment as served to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicAssessment {
    pub id: String,
    pub module_id: String,
    pub questions: Vec<PublicQuestion>,
}

impl From<&Question> for PublicQuestion {
    fn from(q: &Question) -> Self {
        Self {
            id: q.id.clone(),
            question: q.question.clone(),
            kind: q.kind,
            options: q.options.clone(),
        }
    }
}

impl From<&Assessment> for PublicAssessment {
    fn from(a: &Assessment) -> Self {
        Self {
            id: a.id.clone(),
            module_id: a.module_id.clone(),
            questions: a.questions.iter().map(PublicQuestion::from).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CatalogDefinition {
    modules: Vec<Module>,
    assessments: Vec<Assessment>,
}

/// Immutable catalog of modules and assessments
#[derive(Debug, Clone)]
pub struct Catalog {
    /// Sorted by `order`
    modules: Vec<Module>,
    assessments: Vec<Assessment>,
}

impl Catalog {
    /// Loads the catalog embedded in the binary
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_CATALOG)
    }

    /// Parses and validates a catalog definition
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON does not match the schema, ids collide,
    /// or an assessment does not map one-to-one onto an existing module.
    pub fn from_json(definition: &str) -> Result<Self, CatalogError> {
        let def: CatalogDefinition = serde_json::from_str(definition)?;
        let catalog = Self::new(def.modules, def.assessments)?;

        info!(
            modules = catalog.modules.len(),
            assessments = catalog.assessments.len(),
            "Catalog loaded"
        );

        Ok(catalog)
    }

    /// Builds a catalog from already-parsed parts
    pub fn new(mut modules: Vec<Module>, assessments: Vec<Assessment>) -> Result<Self, CatalogError> {
        let mut module_ids = HashSet::new();
        for module in &modules {
            if !module_ids.insert(module.id.as_str()) {
                return Err(CatalogError::DuplicateModule(module.id.clone()));
            }
        }

        let mut assessment_ids = HashSet::new();
        let mut assessed_modules = HashSet::new();
        for assessment in &assessments {
            if !assessment_ids.insert(assessment.id.as_str()) {
                return Err(CatalogError::DuplicateAssessment(assessment.id.clone()));
            }
            if !module_ids.contains(assessment.module_id.as_str()) {
                return Err(CatalogError::UnknownModule {
                    assessment_id: assessment.id.clone(),
                    module_id: assessment.module_id.clone(),
                });
            }
            if !assessed_modules.insert(assessment.module_id.as_str()) {
                return Err(CatalogError::MultipleAssessments(assessment.module_id.clone()));
            }

            let mut question_ids = HashSet::new();
            for question in &assessment.questions {
                if !question_ids.insert(question.id.as_str()) {
                    return Err(CatalogError::DuplicateQuestion {
                        assessment_id: assessment.id.clone(),
                        question_id: question.id.clone(),
                    });
                }
            }
        }

        modules.sort_by_key(|m| m.order);

        Ok(Self {
            modules,
            assessments,
        })
    }

    /// Lists modules in presentation order, capped at [`MAX_LIST_SIZE`]
    pub fn modules(&self) -> &[Module] {
        let end = self.modules.len().min(MAX_LIST_SIZE);
        &self.modules[..end]
    }

    /// Total number of modules in the catalog
    pub fn module_count(&self) -> usize {
        self.modules.len()
    }

    /// Finds a module by id
    pub fn module(&self, module_id: &str) -> Option<&Module> {
        self.modules.iter().find(|m| m.id == module_id)
    }

    /// Finds the assessment (with answer keys) bound to a module
    ///
    /// Only for scoring. Use [`Catalog::public_assessment`] for anything
    /// that leaves the process.
    pub fn assessment(&self, module_id: &str) -> Option<&Assessment> {
        self.assessments.iter().find(|a| a.module_id == module_id)
    }

    /// Finds the assessment for a module with answer keys stripped
    pub fn public_assessment(&self, module_id: &str) -> Option<PublicAssessment> {
        self.assessment(module_id).map(PublicAssessment::from)
    }
}
