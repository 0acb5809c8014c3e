//! Declarative step graph: start steps and listeners.

use super::error::FlowError;
use super::step::FlowStep;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// When a listener becomes eligible to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trigger {
    /// Every named step has completed.
    All(Vec<String>),
    /// At least one named step has completed. Fires once.
    Any(Vec<String>),
}

impl Trigger {
    pub fn all<I, T>(steps: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self::All(steps.into_iter().map(Into::into).collect())
    }

    pub fn any<I, T>(steps: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self::Any(steps.into_iter().map(Into::into).collect())
    }

    /// Shorthand for a listener on a single step.
    pub fn after(step: impl Into<String>) -> Self {
        Self::All(vec![step.into()])
    }

    pub fn sources(&self) -> &[String] {
        match self {
            Self::All(steps) | Self::Any(steps) => steps,
        }
    }

    pub fn is_any(&self) -> bool {
        matches!(self, Self::Any(_))
    }

    pub fn is_satisfied(&self, completed: &HashSet<String>) -> bool {
        match self {
            Self::All(steps) => steps.iter().all(|s| completed.contains(s)),
            Self::Any(steps) => steps.iter().any(|s| completed.contains(s)),
        }
    }
}

/// One registered step.
pub struct StepNode<S> {
    pub name: String,
    /// `None` for start steps.
    pub trigger: Option<Trigger>,
    pub step: Arc<dyn FlowStep<S>>,
}

impl<S> StepNode<S> {
    pub fn is_start(&self) -> bool {
        self.trigger.is_none()
    }
}

/// A flow's steps in registration order.
pub struct FlowGraph<S> {
    name: String,
    nodes: Vec<StepNode<S>>,
}

impl<S> FlowGraph<S> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nodes: Vec::new(),
        }
    }

    /// Register a step that runs as soon as the flow starts.
    pub fn start(mut self, name: impl Into<String>, step: impl FlowStep<S> + 'static) -> Self {
        self.nodes.push(StepNode {
            name: name.into(),
            trigger: None,
            step: Arc::new(step),
        });
        self
    }

    /// Register a step that runs once `trigger` is satisfied.
    pub fn listen(
        mut self,
        name: impl Into<String>,
        trigger: Trigger,
        step: impl FlowStep<S> + 'static,
    ) -> Self {
        self.nodes.push(StepNode {
            name: name.into(),
            trigger: Some(trigger),
            step: Arc::new(step),
        });
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn nodes(&self) -> &[StepNode<S>] {
        &self.nodes
    }

    pub fn step_names(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(|n| n.name.as_str())
    }

    /// Check the graph can run: unique names, at least one start step,
    /// only known step references and no cycles.
    pub fn validate(&self) -> Result<(), FlowError> {
        let invalid = |reason: String| FlowError::InvalidGraph {
            flow: self.name.clone(),
            reason,
        };

        if self.nodes.is_empty() {
            return Err(invalid("no steps registered".to_string()));
        }

        let mut seen = HashSet::new();
        for node in &self.nodes {
            if !seen.insert(node.name.as_str()) {
                return Err(invalid(format!("step '{}' is registered twice", node.name)));
            }
        }

        if !self.nodes.iter().any(StepNode::is_start) {
            return Err(invalid("no start step".to_string()));
        }

        for node in &self.nodes {
            let Some(trigger) = &node.trigger else {
                continue;
            };
            if trigger.sources().is_empty() {
                return Err(invalid(format!("step '{}' listens to nothing", node.name)));
            }
            if let Some(unknown) = trigger.sources().iter().find(|s| !seen.contains(s.as_str())) {
                return Err(invalid(format!(
                    "step '{}' listens to unknown step '{unknown}'",
                    node.name
                )));
            }
        }

        if let Some(step) = self.find_cycle() {
            return Err(invalid(format!("step '{step}' is part of a cycle")));
        }

        Ok(())
    }

    /// Kahn's algorithm; returns a step left over when a cycle exists.
    fn find_cycle(&self) -> Option<&str> {
        let mut in_degree: HashMap<&str, usize> = self
            .nodes
            .iter()
            .map(|n| (n.name.as_str(), n.trigger.as_ref().map_or(0, |t| t.sources().len())))
            .collect();

        let mut ready: Vec<&str> = in_degree
            .iter()
            .filter(|(_, degree)| **degree == 0)
            .map(|(name, _)| *name)
            .collect();
        let mut visited = 0;

        while let Some(done) = ready.pop() {
            visited += 1;
            for node in &self.nodes {
                let Some(trigger) = &node.trigger else {
                    continue;
                };
                let edges = trigger.sources().iter().filter(|s| *s == done).count();
                if edges == 0 {
                    continue;
                }
                if let Some(degree) = in_degree.get_mut(node.name.as_str()) {
                    *degree -= edges;
                    if *degree == 0 {
                        ready.push(node.name.as_str());
                    }
                }
            }
        }

        if visited == self.nodes.len() {
            return None;
        }
        self.nodes
            .iter()
            .map(|n| n.name.as_str())
            .find(|name| in_degree.get(name).is_some_and(|d| *d > 0))
    }
}
