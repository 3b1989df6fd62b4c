use std::fmt;

/// Generation error
///
/// Every variant is fatal for the whole generation run: no partial output
/// is considered valid, and retrying without changing the annotated input
/// cannot succeed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// More than one extractor claims the same annotation kind
    AmbiguousDialect {
        /// The contested annotation's qualified name
        annotation: String,
        /// Names of the claiming extractors
        extractors: Vec<String>,
    },
    /// Two members resolved to the identical final path
    DuplicateEndpoint {
        /// The resolved path both endpoints map to
        path: String,
    },
    /// A field's type cannot be rendered (nested array-of-array, or a map
    /// value that cannot be classified)
    UnsupportedTypeShape {
        type_name: String,
        field: String,
        detail: String,
    },
    /// A field type matches none of the classification rules
    UnknownFieldType { type_name: String, field: String },
    /// A named root type is absent from the type registry
    UnknownType { qualified_name: String },
    /// An annotation declares a verb that is not an HTTP method
    InvalidVerb { verb: String },
    /// A member declares more than one body parameter
    MultipleBodyParameters { member: String },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::AmbiguousDialect {
                annotation,
                extractors,
            } => {
                write!(
                    f,
                    "found more than one valid extractor for {annotation}: [{}]",
                    extractors.join(", ")
                )
            }
            Error::DuplicateEndpoint { path } => {
                write!(
                    f,
                    "multiple endpoints on the same resource is not supported: {path}"
                )
            }
            Error::UnsupportedTypeShape {
                type_name,
                field,
                detail,
            } => {
                write!(
                    f,
                    "unsupported type shape for field {type_name}.{field}: {detail}"
                )
            }
            Error::UnknownFieldType { type_name, field } => {
                write!(f, "failed to classify field type {type_name}.{field}")
            }
            Error::UnknownType { qualified_name } => {
                write!(f, "type {qualified_name} is not declared in the type registry")
            }
            Error::InvalidVerb { verb } => {
                write!(f, "'{verb}' is not a valid HTTP method")
            }
            Error::MultipleBodyParameters { member } => {
                write!(
                    f,
                    "member {member} declares more than one body parameter; only one is permitted"
                )
            }
        }
    }
}

impl std::error::Error for Error {}
