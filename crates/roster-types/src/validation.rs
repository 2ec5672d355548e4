use serde::Serialize;

use crate::code::CodeEnum;

/// One rejected field. Each check reports at most one of these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub field: &'static str,
    pub message: String,
}

impl Violation {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Restricts a field to a subset of an enum's declared symbols.
///
/// The same enum can carry different allow-lists on different fields.
#[derive(Debug, Clone)]
pub struct AllowList<E: CodeEnum> {
    permitted: Vec<E>,
    message: &'static str,
}

impl<E: CodeEnum> AllowList<E> {
    /// Names not declared by `E` are ignored.
    pub fn of_names(names: &[&str], message: &'static str) -> Self {
        let permitted = E::ALL
            .iter()
            .copied()
            .filter(|symbol| names.contains(&symbol.name()))
            .collect();
        Self { permitted, message }
    }

    pub fn permits(&self, value: Option<E>) -> bool {
        value.is_some_and(|v| self.permitted.contains(&v))
    }

    pub fn check(&self, field: &'static str, value: Option<E>) -> Result<(), Violation> {
        if self.permits(value) {
            Ok(())
        } else {
            Err(Violation::new(field, self.message))
        }
    }
}

/// Inclusive character-count bounds for a text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthBounds {
    pub min: usize,
    pub max: usize,
}

impl LengthBounds {
    pub const fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    pub fn check(&self, field: &'static str, value: &str) -> Result<(), Violation> {
        let len = value.chars().count();
        if (self.min..=self.max).contains(&len) {
            Ok(())
        } else {
            Err(Violation::new(
                field,
                format!("length must be between {} and {}", self.min, self.max),
            ))
        }
    }
}
