use crate::error::{CsError, CsResult};

/// Identity of a CSP variable: a non-empty name, plus optional metadata.
///
/// Two variables are equal iff their names are equal; the description does
/// not participate in equality.
#[derive(Debug, Clone)]
pub struct Variable {
    name: String,
    description: Option<String>,
}

impl Variable {
    /// Builds a variable with no description.
    ///
    /// Fails with [`CsError::InvalidArgument`] if `name` is empty.
    pub fn new(name: impl Into<String>) -> CsResult<Self> {
        Self::with_description(name, None::<String>)
    }

    /// Builds a variable carrying the given description.
    ///
    /// Fails with [`CsError::InvalidArgument`] if `name` is empty.
    pub fn with_description(
        name: impl Into<String>,
        description: Option<impl Into<String>>,
    ) -> CsResult<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(CsError::InvalidArgument("variable name must not be empty"));
        }
        Ok(Self {
            name,
            description: description.map(Into::into),
        })
    }

    /// The variable's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The variable's optional description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

impl PartialEq for Variable {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Variable {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_name_is_rejected() {
        assert_eq!(
            Variable::new("").unwrap_err(),
            CsError::InvalidArgument("variable name must not be empty")
        );
    }

    #[test]
    fn equality_ignores_description() {
        let a = Variable::with_description("x", Some("first")).unwrap();
        let b = Variable::with_description("x", Some("second")).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn different_names_are_unequal() {
        let a = Variable::new("x").unwrap();
        let b = Variable::new("y").unwrap();
        assert_ne!(a, b);
    }
}
