//! Model catalog
//!
//! Static, ordered list of selectable analysis models. Categories are only
//! used for grouping in the selector.

use serde::{Deserialize, Serialize};

/// Selectable analysis model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelDescriptor {
    /// Unique key sent with run requests
    pub id: String,
    /// Display name
    pub name: String,
    pub description: String,
    /// Grouping label
    pub category: String,
}

impl ModelDescriptor {
    pub fn new(id: &str, name: &str, description: &str, category: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            category: category.to_string(),
        }
    }
}

/// Models sharing a category, in catalog order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryGroup {
    pub category: String,
    pub models: Vec<ModelDescriptor>,
}

/// Immutable model catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelCatalog {
    models: Vec<ModelDescriptor>,
}

impl ModelCatalog {
    pub fn new(models: Vec<ModelDescriptor>) -> Self {
        Self { models }
    }

    /// Catalog shipped with the dashboard
    pub fn builtin() -> Self {
        Self::new(vec![
            ModelDescriptor::new(
                "text-analysis",
                "Text Analysis Model",
                "Analyzes text documents for sentiment, entities, and key topics.",
                "Text Processing",
            ),
            ModelDescriptor::new(
                "image-classification",
                "Image Classification",
                "Identifies objects and scenes in images with high accuracy.",
                "Computer Vision",
            ),
            ModelDescriptor::new(
                "data-clustering",
                "Data Clustering",
                "Groups similar data points to discover patterns.",
                "Data Analysis",
            ),
            ModelDescriptor::new(
                "sentiment-analysis",
                "Sentiment Analysis",
                "Determines the emotional tone behind text content.",
                "Text Processing",
            ),
            ModelDescriptor::new(
                "object-detection",
                "Object Detection",
                "Locates and identifies multiple objects in images with bounding boxes.",
                "Computer Vision",
            ),
        ])
    }

    /// Configured models, or the built-in catalog
    pub fn from_config(models: Option<&[ModelDescriptor]>) -> Self {
        match models {
            Some(models) => Self::new(models.to_vec()),
            None => Self::builtin(),
        }
    }

    pub fn list(&self) -> &[ModelDescriptor] {
        &self.models
    }

    pub fn find(&self, id: &str) -> Option<&ModelDescriptor> {
        self.models.iter().find(|m| m.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    pub fn grouped(&self) -> Vec<CategoryGroup> {
        group_by_category(&self.models)
    }
}

impl Default for ModelCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Group models by category, categories in first-seen order
pub fn group_by_category(models: &[ModelDescriptor]) -> Vec<CategoryGroup> {
    let mut groups: Vec<CategoryGroup> = Vec::new();
    for model in models {
        match groups.iter_mut().find(|g| g.category == model.category) {
            Some(group) => group.models.push(model.clone()),
            None => groups.push(CategoryGroup {
                category: model.category.clone(),
                models: vec![model.clone()],
            }),
        }
    }
    groups
}
