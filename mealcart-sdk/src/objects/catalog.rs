//! Catalog API request and response types.
//!
//! Field names follow the remote food database (`idMeal`, `strMeal`,
//! `strMealThumb`). Any other field in a record is ignored; in particular
//! the catalog carries no pricing information.

use serde::{Deserialize, Serialize};

use super::null_as_default;

/// A single meal as returned by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MealRecord {
    #[serde(rename = "idMeal")]
    pub id: String,
    #[serde(rename = "strMeal")]
    pub name: String,
    #[serde(rename = "strMealThumb", default, deserialize_with = "null_as_default")]
    pub thumbnail: String,
}

/// Envelope shared by the `search.php` and `lookup.php` endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealsResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub meals: Vec<MealRecord>,
}

/// Query string for `GET search.php`. An empty term lists every meal.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SearchQuery<'a> {
    #[serde(rename = "s")]
    pub term: &'a str,
}

/// Query string for `GET lookup.php`.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct LookupQuery<'a> {
    #[serde(rename = "i")]
    pub id: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_search_response() {
        let json = r#"{
            "meals": [
                {
                    "idMeal": "52772",
                    "strMeal": "Teriyaki Chicken Casserole",
                    "strMealThumb": "https://www.themealdb.com/images/media/meals/wvpsxx1468256321.jpg",
                    "strCategory": "Chicken",
                    "strArea": "Japanese"
                }
            ]
        }"#;
        let response: MealsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.meals.len(), 1);
        assert_eq!(response.meals[0].id, "52772");
        assert_eq!(response.meals[0].name, "Teriyaki Chicken Casserole");
    }

    #[test]
    fn test_null_meals_is_empty() {
        let response: MealsResponse = serde_json::from_str(r#"{"meals": null}"#).unwrap();
        assert!(response.meals.is_empty());

        let response: MealsResponse = serde_json::from_str("{}").unwrap();
        assert!(response.meals.is_empty());
    }

    #[test]
    fn test_null_thumbnail_is_empty() {
        let json = r#"{"meals": [{"idMeal": "1", "strMeal": "Soup", "strMealThumb": null}]}"#;
        let response: MealsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.meals[0].thumbnail, "");
    }

    #[test]
    fn test_missing_id_is_rejected() {
        let json = r#"{"meals": [{"strMeal": "Soup"}]}"#;
        assert!(serde_json::from_str::<MealsResponse>(json).is_err());
    }
}
