//! Static lookup data served by the invoicing API.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Response envelope used by every API resource.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

/// A country as listed in the static data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Country {
    pub id: u32,
    pub name: String,
    /// Remaining attributes (ISO codes, currency symbol, ...) passed through as-is.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Recurring invoice frequency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frequency {
    pub id: u32,
    pub name: String,
}

/// Lookup tables returned by `GET static`.
///
/// Tables the API leaves `null` deserialize as empty lists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StaticData {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub countries: Vec<Country>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub frequencies: Vec<Frequency>,
    /// Remaining tables (currencies, languages, payment terms, ...).
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_static_envelope() {
        let body = json!({
            "data": {
                "industries": null,
                "currencies": null,
                "countries": [{"name": "Spain", "id": 1}],
                "frequencies": [
                    {"id": 1, "name": "Weekly"},
                    {"id": 4, "name": "Monthly"}
                ],
                "invoiceDesigns": null
            }
        });
        let envelope: Envelope<StaticData> = serde_json::from_value(body).unwrap();
        let data = envelope.data;

        assert_eq!(data.countries.len(), 1);
        assert_eq!(data.countries[0].name, "Spain");
        assert_eq!(data.frequencies[1].name, "Monthly");
        assert!(data.other.contains_key("currencies"));
    }

    #[test]
    fn test_null_tables_are_empty() {
        let data: StaticData =
            serde_json::from_value(json!({"countries": null, "frequencies": null})).unwrap();
        assert!(data.countries.is_empty());
        assert!(data.frequencies.is_empty());
    }

    #[test]
    fn test_country_keeps_extra_attributes() {
        let country: Country = serde_json::from_value(json!({
            "id": 724,
            "name": "Spain",
            "iso_3166_2": "ES"
        }))
        .unwrap();
        let back = serde_json::to_value(&country).unwrap();
        assert_eq!(back["iso_3166_2"], json!("ES"));
    }
}
