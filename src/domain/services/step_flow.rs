//! Step Flow Service
//!
//! Generic engine for multi-step forms: ordered named steps, per-step
//! validation hooks, and persistence of in-progress data through the
//! key-value store port.

use crate::domain::ports::KeyValueStore;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

type Validator<T> = Box<dyn Fn(&T) -> Result<(), String> + Send + Sync>;

/// One named step with an optional validation hook.
struct Step<T> {
    name: String,
    validator: Option<Validator<T>>,
}

/// Persisted position and form data.
///
/// Validators are code, not data; only indices and the form payload
/// survive a round-trip.
#[derive(Serialize, Deserialize)]
struct SavedFlow<T> {
    current: usize,
    furthest: usize,
    data: T,
}

/// Multi-step form state machine.
///
/// The flow tracks the current step and the furthest step ever reached.
/// `next()` refuses to advance past a failing validator; `go_to()` only
/// jumps to steps already visited, so a form cannot skip ahead of its own
/// validation.
pub struct StepFlow<T> {
    steps: Vec<Step<T>>,
    current: usize,
    furthest: usize,
    data: T,
}

impl<T> StepFlow<T>
where
    T: Serialize + DeserializeOwned + Clone,
{
    /// Create an empty flow around the initial form data.
    pub fn new(data: T) -> Self {
        Self {
            steps: Vec::new(),
            current: 0,
            furthest: 0,
            data,
        }
    }

    /// Append a step without validation.
    pub fn step(self, name: &str) -> Self {
        self.push_step(name, None)
    }

    /// Append a step gated by a validation hook.
    pub fn step_with<F>(self, name: &str, validator: F) -> Self
    where
        F: Fn(&T) -> Result<(), String> + Send + Sync + 'static,
    {
        self.push_step(name, Some(Box::new(validator)))
    }

    fn push_step(mut self, name: &str, validator: Option<Validator<T>>) -> Self {
        self.steps.push(Step {
            name: name.to_string(),
            validator,
        });
        self
    }

    /// Number of steps in the flow.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Index of the current step; equals `len()` once the flow completed.
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Name of the current step, or None once the flow completed.
    pub fn current_step(&self) -> Option<&str> {
        self.steps.get(self.current).map(|s| s.name.as_str())
    }

    pub fn data(&self) -> &T {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut T {
        &mut self.data
    }

    /// Whether the flow advanced past its last step.
    pub fn is_complete(&self) -> bool {
        self.current >= self.steps.len()
    }

    /// Validate the current step and advance.
    ///
    /// A failing validator returns its message and leaves the position
    /// untouched. Advancing a completed flow is a no-op.
    pub fn next(&mut self) -> Result<(), String> {
        if self.is_complete() {
            return Ok(());
        }
        if let Some(validator) = &self.steps[self.current].validator {
            validator(&self.data)?;
        }
        self.current += 1;
        self.furthest = self.furthest.max(self.current);
        Ok(())
    }

    /// Move one step back, saturating at the first step.
    pub fn back(&mut self) {
        self.current = self.current.saturating_sub(1);
    }

    /// Jump to a step that was already reached.
    ///
    /// Returns false for indices beyond the furthest visited step or
    /// outside the flow.
    pub fn go_to(&mut self, index: usize) -> bool {
        if index < self.steps.len() && index <= self.furthest {
            self.current = index;
            true
        } else {
            false
        }
    }

    /// Completed-step percentage, 0 at the first step and 100 once done.
    pub fn progress(&self) -> u8 {
        if self.steps.is_empty() {
            return 100;
        }
        ((self.current * 100) / self.steps.len()) as u8
    }

    /// Persist position and form data under the given key.
    pub async fn save(&self, store: &dyn KeyValueStore, key: &str) {
        let saved = SavedFlow {
            current: self.current,
            furthest: self.furthest,
            data: self.data.clone(),
        };
        match serde_json::to_string(&saved) {
            Ok(json) => store.set(key, &json).await,
            Err(e) => tracing::warn!("step flow not persisted: {}", e),
        }
    }

    /// Recover position and form data persisted by `save`.
    ///
    /// A missing key leaves the flow untouched; a malformed or
    /// inconsistent payload is removed from the store and ignored.
    /// Returns whether anything was restored.
    pub async fn restore(&mut self, store: &dyn KeyValueStore, key: &str) -> bool {
        let raw = match store.get(key).await {
            Some(raw) => raw,
            None => return false,
        };

        let saved: SavedFlow<T> = match serde_json::from_str(&raw) {
            Ok(saved) => saved,
            Err(e) => {
                tracing::warn!("discarding malformed step flow state: {}", e);
                store.remove(key).await;
                return false;
            }
        };

        let out_of_range = saved.furthest > self.steps.len() || saved.current > saved.furthest;
        if out_of_range {
            store.remove(key).await;
            return false;
        }

        self.current = saved.current;
        self.furthest = saved.furthest;
        self.data = saved.data;
        true
    }
}
