use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArrayConfigError {
    #[error("missing required field `{field}` in {node}")]
    MissingRequiredField { field: String, node: String },
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("unknown array type: {0}")]
    UnknownType(String),
    #[error("read error: {0}")]
    Read(String),
    #[error("array is read-only: {0}")]
    ReadOnly(String),
    #[error("config not found: {0}")]
    NotFound(String),
    #[error("connection error: {0}")]
    ConnectionError(String),
    #[error("schema error: {0}")]
    SchemaError(String),
    #[error("query error: {0}")]
    QueryError(String),
    #[error("serialization error: {0}")]
    Serialization(String),
    #[error("io error: {0}")]
    Io(String),
}

impl ArrayConfigError {
    pub fn missing_field<F: Into<String>, N: Into<String>>(field: F, node: N) -> Self {
        ArrayConfigError::MissingRequiredField {
            field: field.into(),
            node: node.into(),
        }
    }

    pub fn invalid_config<T: Into<String>>(msg: T) -> Self {
        ArrayConfigError::InvalidConfig(msg.into())
    }

    pub fn unknown_type<T: Into<String>>(msg: T) -> Self {
        ArrayConfigError::UnknownType(msg.into())
    }

    pub fn read<T: Into<String>>(msg: T) -> Self {
        ArrayConfigError::Read(msg.into())
    }

    pub fn read_only<T: Into<String>>(msg: T) -> Self {
        ArrayConfigError::ReadOnly(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        ArrayConfigError::NotFound(msg.into())
    }

    pub fn connection<T: Into<String>>(msg: T) -> Self {
        ArrayConfigError::ConnectionError(msg.into())
    }

    pub fn schema<T: Into<String>>(msg: T) -> Self {
        ArrayConfigError::SchemaError(msg.into())
    }

    pub fn query<T: Into<String>>(msg: T) -> Self {
        ArrayConfigError::QueryError(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        ArrayConfigError::Serialization(msg.into())
    }

    pub fn io<T: Into<String>>(msg: T) -> Self {
        ArrayConfigError::Io(msg.into())
    }

    pub fn is_missing_field(&self) -> bool {
        matches!(self, ArrayConfigError::MissingRequiredField { .. })
    }
}
