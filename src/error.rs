use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum HalError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    MalformedLink(#[from] MalformedLinkError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    UnknownEmbedded(#[from] UnknownEmbeddedPropertyError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Document(#[from] DocumentError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Property(#[from] PropertyError),
}

#[derive(Error, Debug, Diagnostic, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("Link `{rel}` is declared {declared} but its producer returned {produced}")]
    #[diagnostic(
        code(config::shape_mismatch),
        help("Use `link` for relations producing one href and `links` for relations producing a list.")
    )]
    ShapeMismatch {
        rel: String,
        declared: &'static str,
        produced: &'static str,
    },

    #[error("Link relation `{rel}` is declared more than once")]
    #[diagnostic(
        code(config::duplicate_relation),
        help("Each relation name may only be defined once per representer.")
    )]
    DuplicateRelation { rel: String },

    #[error("Nested property `{name}` is declared more than once")]
    #[diagnostic(code(config::duplicate_property))]
    DuplicateProperty { name: String },

    #[error("Property `{name}` collides with a reserved document key")]
    #[diagnostic(
        code(config::reserved_key),
        help("The links and embedded keys cannot be used as property names.")
    )]
    ReservedKey { name: String },

    #[error("The links key and the embedded key are both `{key}`")]
    #[diagnostic(
        code(config::conflicting_keys),
        help("Set `links_key` and `embedded_key` to different names.")
    )]
    ConflictingKeys { key: String },

    #[error("Option `{option}` must not be empty")]
    #[diagnostic(code(config::empty_key))]
    EmptyKey { option: &'static str },
}

#[derive(Error, Debug, Diagnostic, Clone, PartialEq, Eq)]
pub enum MalformedLinkError {
    #[error("Expected the links block to be an object, found {found}")]
    #[diagnostic(code(link::not_an_object))]
    NotAnObject { found: &'static str },

    #[error("Link `{rel}` has no `href`")]
    #[diagnostic(
        code(link::missing_href),
        help("Every link object must carry an `href` member.")
    )]
    MissingHref { rel: String },

    #[error("Link `{rel}` has an `href` that is {found}, not a string")]
    #[diagnostic(code(link::invalid_href))]
    InvalidHref { rel: String, found: &'static str },

    #[error("Link `{rel}` expected {expected}, found {found}")]
    #[diagnostic(code(link::invalid_shape))]
    InvalidShape {
        rel: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Attribute `{attr}` of link `{rel}` is {found}, links only carry scalar attributes")]
    #[diagnostic(code(link::invalid_attribute))]
    InvalidAttribute {
        rel: String,
        attr: String,
        found: &'static str,
    },
}

#[derive(Error, Debug, Diagnostic, Clone, PartialEq, Eq)]
#[error("Embedded property `{property}` is not declared as embedded")]
#[diagnostic(
    code(embedded::unknown_property),
    help("Declare the property as an embedded resource, or relax `unknown_embedded` to `warn` or `ignore`.")
)]
pub struct UnknownEmbeddedPropertyError {
    pub property: String,
}

#[derive(Error, Debug, Diagnostic)]
pub enum DocumentError {
    #[error("Expected {context} to be an object, found {found}")]
    #[diagnostic(code(document::not_an_object))]
    NotAnObject {
        context: String,
        found: &'static str,
    },

    #[error("Invalid JSON document")]
    #[diagnostic(code(document::json))]
    Json(#[from] serde_json::Error),
}

#[derive(Error, Debug, Diagnostic)]
pub enum PropertyError {
    #[error("Failed to map properties")]
    #[diagnostic(code(property::serde))]
    Serde(#[from] serde_json::Error),

    #[error("Expected properties to encode to an object, found {found}")]
    #[diagnostic(
        code(property::not_an_object),
        help("Only struct-like types can be represented as HAL resources.")
    )]
    NotAnObject { found: &'static str },

    #[error("{0}")]
    #[diagnostic(code(property::custom))]
    Custom(String),
}

#[derive(Error, Debug, Diagnostic)]
pub enum ConfigError {
    #[error("Invalid JSON options")]
    #[diagnostic(code(options::json))]
    Json(#[from] serde_json::Error),

    #[error("Invalid YAML options")]
    #[diagnostic(code(options::yaml))]
    Yaml(#[from] serde_yaml::Error),
}
