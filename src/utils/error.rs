use thiserror::Error;

#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)]
pub enum DataMapperError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("The profiles file '{path}' does not exist")]
    ProfilesFileNotFoundError { path: String },

    #[error("The profiles file '{path}' can not be read: {reason}")]
    ProfilesFileUnreadableError { path: String, reason: String },

    #[error("The profiles file '{path}' is malformed: {reason}")]
    ProfilesFileMalformedError { path: String, reason: String },

    #[error("No profile name given")]
    EmptyProfileNameError,

    #[error("The profile '{profile}' does not provide a database system")]
    MissingSystemError { profile: String },

    #[error("The database system '{system}' in profile '{profile}' is not supported")]
    UnsupportedSystemError { profile: String, system: String },

    #[error("There is no registered profile for the name '{name}'")]
    UnknownProfileError { name: String },

    #[error("There are no registered profiles")]
    NoProfilesRegisteredError,

    #[error("Invalid connection settings in profile '{profile}': {reason}")]
    InvalidProfileError { profile: String, reason: String },

    #[error("No database fields given")]
    EmptyFieldSetError,

    #[error("No field name given")]
    EmptyFieldNameError,

    #[error("The name '{name}' is not a valid identifier")]
    InvalidIdentifierError { name: String },

    #[error("Unknown database field '{field}'")]
    UnknownFieldError { field: String },

    #[error("The field '{field}' expects a {expected} value, got {actual}")]
    TypeMismatchError {
        field: String,
        expected: String,
        actual: String,
    },

    #[error("There is no registered mapper for the model '{model}'")]
    MapperNotFoundError { model: String },
}

pub type Result<T> = std::result::Result<T, DataMapperError>;
