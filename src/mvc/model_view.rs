//! Uniform handler results.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;

/// Output data handed to a view. Key order is irrelevant.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Model(HashMap<String, Value>);

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a JSON value, replacing any previous one.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Serialize `value` and insert it. Nothing is stored when serialization fails.
    pub fn try_insert<T: Serialize>(
        &mut self,
        key: impl Into<String>,
        value: T,
    ) -> Result<(), serde_json::Error> {
        let value = serde_json::to_value(value)?;
        self.0.insert(key.into(), value);
        Ok(())
    }

    /// Builder form of [`Model::insert`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }
}

impl FromIterator<(String, Value)> for Model {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A view name plus the model to render with it.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelView {
    view_name: String,
    model: Model,
}

impl ModelView {
    pub fn new(view_name: impl Into<String>) -> Self {
        Self::with_model(view_name, Model::new())
    }

    pub fn with_model(view_name: impl Into<String>, model: Model) -> Self {
        Self {
            view_name: view_name.into(),
            model,
        }
    }

    pub fn view_name(&self) -> &str {
        &self.view_name
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut Model {
        &mut self.model
    }

    pub fn into_parts(self) -> (String, Model) {
        (self.view_name, self.model)
    }
}

/// What an adapter hands back to the dispatcher.
#[derive(Debug, Clone, PartialEq)]
pub enum HandlerOutcome {
    /// Resolve and render this view.
    Render(ModelView),
    /// The handler already wrote the response; skip rendering.
    AlreadyHandled,
}

impl From<ModelView> for HandlerOutcome {
    fn from(mv: ModelView) -> Self {
        HandlerOutcome::Render(mv)
    }
}
