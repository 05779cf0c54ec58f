//! Validation des corps de requête: transforme les erreurs `validator` en
//! table champ -> messages, la forme renvoyée avec un 400.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::db::context::ReferenceEntity;

pub type FieldErrors = BTreeMap<String, Vec<String>>;

// decimal(10,2): 8 chiffres avant la virgule, 2 après
const DECIMAL_SCALE: u32 = 2;
const DECIMAL_INTEGRAL_LIMIT: i64 = 100_000_000;

pub fn validate_dto<T: Validate>(dto: &T) -> Result<(), FieldErrors> {
    dto.validate().map_err(|e| field_errors(&e))
}

/// Contraintes déclarées sur le modèle + précision des champs décimaux
pub fn validate_entity<E>(model: &E::Model) -> Result<(), FieldErrors>
where
    E: ReferenceEntity,
    E::Model: Validate,
{
    let mut errors = match model.validate() {
        Ok(()) => FieldErrors::new(),
        Err(e) => field_errors(&e),
    };
    for (field, json_name) in E::FIELD_RENAMES {
        if let Some(messages) = errors.remove(*field) {
            errors.insert(json_name.to_string(), messages);
        }
    }

    for (field, value) in E::decimals(model) {
        if let Some(value) = value {
            if !fits_decimal(&value) {
                errors.entry(field.to_string()).or_default().push(format!(
                    "The field {} must fit decimal(10,2).",
                    field
                ));
            }
        }
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

pub fn fits_decimal(value: &Decimal) -> bool {
    value.normalize().scale() <= DECIMAL_SCALE
        && value.abs().trunc() < Decimal::from(DECIMAL_INTEGRAL_LIMIT)
}

pub fn field_errors(errors: &ValidationErrors) -> FieldErrors {
    errors
        .field_errors()
        .iter()
        .map(|(field, errs)| {
            let name = camel_case(field);
            let messages = errs.iter().map(|e| message_for(&name, e)).collect();
            (name, messages)
        })
        .collect()
}

fn message_for(field: &str, error: &ValidationError) -> String {
    if let Some(message) = &error.message {
        return message.to_string();
    }

    let param = |key: &str| {
        error
            .params
            .get(key)
            .map(|v| v.to_string())
            .unwrap_or_else(|| "?".to_string())
    };

    match error.code.as_ref() {
        "length" => format!(
            "The field {} must be a string with a maximum length of {}.",
            field,
            param("max")
        ),
        "range" => format!(
            "The field {} must be between {} and {}.",
            field,
            param("min"),
            param("max")
        ),
        "email" => format!("The {} field is not a valid e-mail address.", field),
        _ => format!("The field {} is invalid.", field),
    }
}

// bid_type -> bidType, pour correspondre aux noms JSON
fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}
