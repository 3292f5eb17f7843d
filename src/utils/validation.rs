use crate::utils::error::{DataMapperError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_identifier(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(DataMapperError::EmptyFieldNameError);
    }

    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => {
            return Err(DataMapperError::InvalidIdentifierError {
                name: name.to_string(),
            })
        }
    }

    if chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        Ok(())
    } else {
        Err(DataMapperError::InvalidIdentifierError {
            name: name.to_string(),
        })
    }
}

pub fn validate_profile_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(DataMapperError::EmptyProfileNameError);
    }
    Ok(())
}
