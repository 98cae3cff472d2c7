use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ingredient name -> quantity, in the order the meal listed them
pub type Ingredients = IndexMap<String, Quantity>;

/// A quantity as stored: free text ("2 cups") or a bare number
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Quantity {
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quantity::Number(n) => write!(f, "{n}"),
            Quantity::Text(s) => write!(f, "{s}"),
        }
    }
}

/// A named dish and what goes into it. Serialized with the `meal` key the
/// HTTP API and the catalog table use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    #[serde(rename = "meal")]
    pub name: String,
    pub ingredients: Ingredients,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn quantities_keep_their_json_shape() {
        let meal: Meal = serde_json::from_value(json!({
            "meal": "Pancakes",
            "ingredients": { "flour": "2 cups", "eggs": 3 }
        }))
        .unwrap();

        assert_eq!(
            meal.ingredients["flour"],
            Quantity::Text("2 cups".to_string())
        );
        assert_eq!(meal.ingredients["eggs"], Quantity::Number(3.into()));

        let back = serde_json::to_value(&meal).unwrap();
        assert_eq!(back["ingredients"]["flour"], json!("2 cups"));
        assert_eq!(back["ingredients"]["eggs"], json!(3));
    }

    #[test]
    fn ingredients_iterate_in_document_order() {
        let meal: Meal = serde_json::from_value(json!({
            "meal": "Omelette",
            "ingredients": { "milk": "1", "egg": "2", "salt": "pinch" }
        }))
        .unwrap();

        let keys: Vec<&str> = meal.ingredients.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["milk", "egg", "salt"]);
    }

    #[test]
    fn quantity_display_renders_naturally() {
        assert_eq!(Quantity::Text("a splash".to_string()).to_string(), "a splash");
        assert_eq!(Quantity::Number(12.into()).to_string(), "12");
    }
}
