//! Corps JSON liés sans tenir compte de la casse des clés:
//! `{"Account": "A"}` et `{"account": "A"}` remplissent le même champ.

use std::future::Future;
use std::pin::Pin;

use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest};
use serde::de::{self, DeserializeOwned, Deserializer, Visitor};
use serde_json::{Map, Value};

use crate::error::ApiError;
use crate::utils::validation::FieldErrors;

/// Extracteur JSON dont les clés sont rapprochées des noms de champs
/// sans tenir compte de la casse. Les erreurs de lecture suivent la
/// `JsonConfig` de l'application.
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

impl<T> JsonBody<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T: DeserializeOwned + 'static> FromRequest for JsonBody<T> {
    type Error = actix_web::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let extract = web::Json::<Value>::from_request(req, payload);

        Box::pin(async move {
            let web::Json(value) = extract.await?;
            bind(value)
                .map(JsonBody)
                .map_err(|errors| ApiError::Validation(errors).into())
        })
    }
}

/// Désérialise `value` en `T` après avoir renommé les clés qui ne
/// diffèrent d'un nom de champ que par la casse
pub fn bind<T: DeserializeOwned>(value: Value) -> Result<T, FieldErrors> {
    let value = match value {
        Value::Object(map) => Value::Object(match_field_names(map, field_names::<T>())),
        other => other,
    };

    serde_json::from_value(value).map_err(|e| {
        let mut errors = FieldErrors::new();
        errors.insert("body".to_string(), vec![e.to_string()]);
        errors
    })
}

fn match_field_names(map: Map<String, Value>, fields: &[&str]) -> Map<String, Value> {
    let mut matched = Map::with_capacity(map.len());
    let mut others = Vec::new();

    for (key, value) in map {
        if fields.contains(&key.as_str()) {
            matched.insert(key, value);
        } else {
            others.push((key, value));
        }
    }

    // Une clé exacte l'emporte sur une clé de casse différente
    for (key, value) in others {
        match fields.iter().find(|field| field.eq_ignore_ascii_case(&key)) {
            Some(field) => {
                if !matched.contains_key(*field) {
                    matched.insert(field.to_string(), value);
                }
            }
            None => {
                matched.insert(key, value);
            }
        }
    }

    matched
}

/// Noms JSON des champs de `T`, tels que déclarés par son `Deserialize`
/// (renommages serde compris). Vide si `T` n'est pas une structure.
pub fn field_names<T: DeserializeOwned>() -> &'static [&'static str] {
    let mut fields: &'static [&'static str] = &[];
    let _ = T::deserialize(FieldNames(&mut fields));
    fields
}

struct FieldNames<'a>(&'a mut &'static [&'static str]);

impl<'de> Deserializer<'de> for FieldNames<'_> {
    type Error = de::value::Error;

    fn deserialize_any<V: Visitor<'de>>(self, _visitor: V) -> Result<V::Value, Self::Error> {
        Err(de::Error::custom("not a struct"))
    }

    fn deserialize_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        fields: &'static [&'static str],
        _visitor: V,
    ) -> Result<V::Value, Self::Error> {
        *self.0 = fields;
        Err(de::Error::custom("field names captured"))
    }

    serde::forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf option unit unit_struct newtype_struct seq tuple
        tuple_struct map enum identifier ignored_any
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::dto::LoginRequest;
    use crate::models::trade;
    use rust_decimal::Decimal;
    use serde_json::json;

    #[test]
    fn test_field_names_follow_serde_renames() {
        let fields = field_names::<trade::Model>();
        assert!(fields.contains(&"tradeId"));
        assert!(fields.contains(&"type"));
        assert!(fields.contains(&"buyQuantity"));
        assert!(!fields.contains(&"tradeType"));
    }

    #[test]
    fn test_pascal_case_keys() {
        let trade: trade::Model =
            bind(json!({ "Account": "A", "Type": "T", "BuyQuantity": 5 })).unwrap();

        assert_eq!(trade.account, "A");
        assert_eq!(trade.trade_type, "T");
        assert_eq!(trade.buy_quantity, Some(Decimal::from(5)));
    }

    #[test]
    fn test_exact_key_wins() {
        let login: LoginRequest = bind(json!({
            "USERNAME": "shout",
            "username": "jane",
            "Password": "secret"
        }))
        .unwrap();

        assert_eq!(login.username, "jane");
        assert_eq!(login.password, "secret");
    }

    #[test]
    fn test_type_error_is_reported_on_body() {
        let errors = bind::<trade::Model>(json!({ "account": 12 })).unwrap_err();
        assert!(errors.contains_key("body"));
    }
}
