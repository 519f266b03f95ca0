//! Binding of invocation values into command fields.
//!
//! Each declared field is resolved from the invocation (long name, then short
//! name, then default), coerced to its declared type and written through the
//! instance's accessors.

use tracing::debug;

use crate::command::Instance;
use crate::descriptor::{CommandDescriptor, FieldDescriptor, FieldKind, FieldValue, ValueType};
use crate::error::BindError;
use crate::invocation::Invocation;

/// Populate every declared field of `instance` from `invocation`.
///
/// Fields are processed in declaration order and each is assigned exactly
/// once. The first failing field aborts binding.
pub fn bind(
    instance: &mut dyn Instance,
    descriptor: &CommandDescriptor,
    invocation: &Invocation,
) -> Result<(), BindError> {
    for field in &descriptor.fields {
        let value = resolve(field, invocation)?;
        debug!(command = %descriptor.name, field = %field.name, ?value, "binding field");
        instance.assign(&field.name, value)?;
    }

    Ok(())
}

/// Resolve the value of a single field without assigning it.
pub fn resolve(field: &FieldDescriptor, invocation: &Invocation) -> Result<FieldValue, BindError> {
    match &field.kind {
        FieldKind::Flag { default } => {
            if field.value_type != ValueType::Bool {
                return Err(BindError::UnsupportedFieldType(field.name.clone()));
            }

            let value = invocation
                .flag(&field.name)
                .or_else(|| field.short().and_then(|s| invocation.flag(s)))
                .unwrap_or(*default);

            Ok(FieldValue::Bool(value))
        }
        FieldKind::Parameter { required, default } => {
            let supplied = invocation
                .parameter(&field.name)
                .or_else(|| field.short().and_then(|s| invocation.parameter(s)));

            match supplied {
                Some(raw) => coerce(field, raw),
                None if *required => Err(BindError::MissingRequiredParameter(field.name.clone())),
                None if default.is_empty() => empty_value(field),
                None => coerce(field, default),
            }
        }
    }
}

/// Convert a raw string into the field's declared type.
pub fn coerce(field: &FieldDescriptor, raw: &str) -> Result<FieldValue, BindError> {
    let invalid = || BindError::InvalidValueFormat {
        field: field.name.clone(),
        value: raw.to_string(),
    };

    match field.value_type {
        ValueType::String => Ok(FieldValue::Str(raw.to_string())),
        ValueType::Int => raw.parse().map(FieldValue::Int).map_err(|_| invalid()),
        ValueType::Long => raw.parse().map(FieldValue::Long).map_err(|_| invalid()),
        ValueType::Float => raw.parse().map(FieldValue::Float).map_err(|_| invalid()),
        ValueType::Double => raw.parse().map(FieldValue::Double).map_err(|_| invalid()),
        ValueType::Bool => Err(BindError::UnsupportedFieldType(field.name.clone())),
    }
}

/// Value used for a non-required parameter with neither input nor default.
fn empty_value(field: &FieldDescriptor) -> Result<FieldValue, BindError> {
    match field.value_type {
        ValueType::String => Ok(FieldValue::Str(String::new())),
        ValueType::Int => Ok(FieldValue::Int(0)),
        ValueType::Long => Ok(FieldValue::Long(0)),
        ValueType::Float => Ok(FieldValue::Float(0.0)),
        ValueType::Double => Ok(FieldValue::Double(0.0)),
        ValueType::Bool => Err(BindError::UnsupportedFieldType(field.name.clone())),
    }
}
