//! Décimaux exposés en nombres JSON: `5` reste `5`, `12.5` reste `12.5`.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serializer;

pub fn decimal<S: Serializer>(value: &Option<Decimal>, serializer: S) -> Result<S::Ok, S::Error> {
    let Some(value) = value else {
        return serializer.serialize_none();
    };

    let value = value.normalize();
    if value.scale() == 0 {
        if let Some(n) = value.to_i64() {
            return serializer.serialize_i64(n);
        }
    }

    match value.to_f64() {
        Some(n) => serializer.serialize_f64(n),
        None => serializer.collect_str(&value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;
    use serde_json::json;
    use std::str::FromStr;

    #[derive(Serialize)]
    struct Row {
        #[serde(serialize_with = "decimal")]
        amount: Option<Decimal>,
    }

    fn render(amount: Option<&str>) -> serde_json::Value {
        let amount = amount.map(|a| Decimal::from_str(a).unwrap());
        serde_json::to_value(Row { amount }).unwrap()["amount"].clone()
    }

    #[test]
    fn test_numbers() {
        assert_eq!(render(Some("5")), json!(5));
        assert_eq!(render(Some("5.00")), json!(5));
        assert_eq!(render(Some("12.50")), json!(12.5));
        assert_eq!(render(Some("0.1")), json!(0.1));
        assert_eq!(render(Some("-3")), json!(-3));
        assert_eq!(render(None), json!(null));
    }
}
