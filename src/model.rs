//! Request bodies for the upstream product API and their argument shapes.

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::schema::{Field, Shape};

/// Character length of a Bigblue product SKU (`XXXX-XXXXXX-XXXX`).
pub const SKU_LENGTH: usize = 16;

const SKU_DESCRIPTION: &str = "XXXX-XXXXXX-XXXX format product SKU";

/// Body of a `GetProduct` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetProductRequest {
    pub id: String,
}

/// Body of a `CreateProduct` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateProductRequest {
    pub product: Product,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    pub options: Vec<ProductOption>,
    pub barcode: String,
    pub value: Money,
    pub tariff_number: String,
    pub origin_country: String,
    pub customs_description: String,
    pub name_translations: Vec<NameTranslation>,
    pub track_lots: bool,
}

/// A variant attribute, e.g. `size = XL`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductOption {
    pub name: String,
    pub value: String,
}

/// Declared unit value. The amount is a decimal string as the API expects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    pub amount: String,
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameTranslation {
    pub language: String,
    pub name: String,
}

static GET_PRODUCT_SHAPE: LazyLock<Shape> = LazyLock::new(|| {
    Shape::object(vec![
        Field::new("id", Shape::string_of_length(SKU_LENGTH)).described(SKU_DESCRIPTION),
    ])
});

static CREATE_PRODUCT_SHAPE: LazyLock<Shape> = LazyLock::new(|| {
    let option = Shape::object(vec![
        Field::new("name", Shape::string()),
        Field::new("value", Shape::string()),
    ]);
    let money = Shape::object(vec![
        Field::new("amount", Shape::string()),
        Field::new("currency", Shape::string()),
    ]);
    let translation = Shape::object(vec![
        Field::new("language", Shape::string()),
        Field::new("name", Shape::string()),
    ]);

    let product = Shape::object(vec![
        Field::new("id", Shape::string_of_length(SKU_LENGTH)).described(SKU_DESCRIPTION),
        Field::new("name", Shape::string()).described("Name of the product"),
        Field::new("description", Shape::string()).described("Description of the product"),
        Field::new("options", Shape::array(option)),
        Field::new("barcode", Shape::string()),
        Field::new("value", money),
        Field::new("tariff_number", Shape::string()),
        Field::new("origin_country", Shape::string()),
        Field::new("customs_description", Shape::string()),
        Field::new("name_translations", Shape::array(translation)),
        Field::new("track_lots", Shape::Boolean),
    ]);

    Shape::object(vec![Field::new("product", product)])
});

/// Accepted arguments of the `get-product` tool.
pub fn get_product_shape() -> &'static Shape {
    &GET_PRODUCT_SHAPE
}

/// Accepted arguments of the `create-product` tool.
pub fn create_product_shape() -> &'static Shape {
    &CREATE_PRODUCT_SHAPE
}

#[cfg(test)]
pub(crate) mod fixtures {
    use serde_json::{Value, json};

    pub const SKU: &str = "ABCD-123456-WXYZ";

    pub fn product_json() -> Value {
        json!({
            "id": SKU,
            "name": "Linen shirt",
            "description": "Relaxed fit linen shirt",
            "options": [
                { "name": "size", "value": "M" },
                { "name": "color", "value": "sand" }
            ],
            "barcode": "3700000000017",
            "value": { "amount": "39.90", "currency": "EUR" },
            "tariff_number": "62052000",
            "origin_country": "PT",
            "customs_description": "Men's woven linen shirt",
            "name_translations": [
                { "language": "fr", "name": "Chemise en lin" }
            ],
            "track_lots": false
        })
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use crate::schema::validate;
    use serde_json::json;

    #[test]
    fn test_sku_shape() {
        assert!(validate(get_product_shape(), &json!({ "id": SKU })).is_ok());
        assert!(validate(get_product_shape(), &json!({ "id": "SHORT" })).is_err());
        assert!(validate(get_product_shape(), &json!({})).is_err());
    }

    #[test]
    fn test_product_fixture_is_valid() {
        let args = json!({ "product": product_json() });
        assert!(validate(create_product_shape(), &args).is_ok());

        let request: CreateProductRequest = serde_json::from_value(args).unwrap();
        assert_eq!(request.product.options.len(), 2);
        assert_eq!(request.product.value.currency, "EUR");
        assert!(!request.product.track_lots);
    }

    #[test]
    fn test_every_product_field_is_required() {
        let full = product_json();
        let keys: Vec<String> = full.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys.len(), 11);

        for key in keys {
            let mut product = full.clone();
            product.as_object_mut().unwrap().remove(&key);
            let err = validate(create_product_shape(), &json!({ "product": product }))
                .unwrap_err();
            assert_eq!(err.issues.len(), 1, "removing {key}");
            assert_eq!(err.issues[0].path, vec!["product".to_string(), key.clone()]);
            assert_eq!(err.issues[0].message, "Required");
        }
    }

    #[test]
    fn test_nested_issue_paths() {
        let mut product = product_json();
        product["value"]["amount"] = json!(39.9);
        product["name_translations"][0]
            .as_object_mut()
            .unwrap()
            .remove("language");

        let err = validate(create_product_shape(), &json!({ "product": product })).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid arguments: product.value.amount: Expected string, received number, \
             product.name_translations.0.language: Required"
        );
    }

    #[test]
    fn test_unknown_keys_are_dropped_on_narrowing() {
        let mut product = product_json();
        product["internal_note"] = json!("do not forward");

        let request: CreateProductRequest =
            serde_json::from_value(json!({ "product": product })).unwrap();
        let body = serde_json::to_value(&request).unwrap();
        assert!(body["product"].get("internal_note").is_none());
        assert_eq!(body["product"], product_json());
    }
}
