//! Warning-carrying stage results.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Pipeline component that emitted a warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Component {
    Segmenter,
    Processor,
    Locator,
    Entry,
    Name,
    BirthPlace,
}

impl Component {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Segmenter => "segmenter",
            Self::Processor => "processor",
            Self::Locator => "locator",
            Self::Entry => "entry",
            Self::Name => "name",
            Self::BirthPlace => "birth_place",
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A soft failure: processing continued with degraded output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warning {
    pub component: Component,
    pub message: String,
}

impl Warning {
    pub fn new(component: Component, message: impl Into<String>) -> Self {
        Self {
            component,
            message: message.into(),
        }
    }

    /// Log the warning through `tracing` and return it for collection.
    pub fn emit(component: Component, message: impl Into<String>) -> Self {
        let warning = Self::new(component, message);
        tracing::warn!(component = %warning.component, "{}", warning.message);
        warning
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.component, self.message)
    }
}

/// Result of a stage that cannot fail but may degrade.
///
/// Fatal conditions are reported separately through `Result`, so a
/// `Result<Outcome<T>, E>` reads as ok / degraded / fatal.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Ok(T),
    Degraded { value: T, warnings: Vec<Warning> },
}

impl<T> Outcome<T> {
    /// `Ok` when `warnings` is empty, `Degraded` otherwise.
    pub fn new(value: T, warnings: Vec<Warning>) -> Self {
        if warnings.is_empty() {
            Self::Ok(value)
        } else {
            Self::Degraded { value, warnings }
        }
    }

    pub fn degraded(value: T, warning: Warning) -> Self {
        Self::Degraded {
            value,
            warnings: vec![warning],
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded { .. })
    }

    pub fn value(&self) -> &T {
        match self {
            Self::Ok(value) | Self::Degraded { value, .. } => value,
        }
    }

    pub fn warnings(&self) -> &[Warning] {
        match self {
            Self::Ok(_) => &[],
            Self::Degraded { warnings, .. } => warnings,
        }
    }

    pub fn into_value(self) -> T {
        self.into_parts().0
    }

    pub fn into_parts(self) -> (T, Vec<Warning>) {
        match self {
            Self::Ok(value) => (value, Vec::new()),
            Self::Degraded { value, warnings } => (value, warnings),
        }
    }

    /// Move the warnings into `sink` and return the value.
    pub fn collect_into(self, sink: &mut Vec<Warning>) -> T {
        let (value, warnings) = self.into_parts();
        sink.extend(warnings);
        value
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Self::Ok(value) => Outcome::Ok(f(value)),
            Self::Degraded { value, warnings } => Outcome::Degraded {
                value: f(value),
                warnings,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_without_warnings_is_ok() {
        let outcome = Outcome::new(3, Vec::new());
        assert_eq!(outcome, Outcome::Ok(3));
        assert!(!outcome.is_degraded());
    }

    #[test]
    fn test_collect_into() {
        let outcome = Outcome::degraded("x", Warning::new(Component::Locator, "oops"));
        let mut sink = Vec::new();
        let value = outcome.collect_into(&mut sink);
        assert_eq!(value, "x");
        assert_eq!(sink.len(), 1);
        assert_eq!(sink[0].to_string(), "[locator] oops");
    }

    #[test]
    fn test_map_keeps_warnings() {
        let outcome = Outcome::degraded(2, Warning::new(Component::Entry, "w")).map(|v| v * 10);
        assert_eq!(*outcome.value(), 20);
        assert_eq!(outcome.warnings().len(), 1);
    }
}
