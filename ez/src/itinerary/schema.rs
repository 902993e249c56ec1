//! Output schema handed to the generative service
//!
//! Written in the Gemini `responseSchema` dialect (upper-case type names,
//! explicit `required` lists). Field names match the serde wire names in
//! [`super::types`].

use serde_json::{Value, json};

/// Name under which the schema is registered with providers that need one
pub const SCHEMA_NAME: &str = "itinerary";

fn string() -> Value {
    json!({ "type": "STRING" })
}

fn described(description: &str) -> Value {
    json!({ "type": "STRING", "description": description })
}

fn activity_list() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "time": string(),
                "activity": string(),
                "location": string(),
            },
            "required": ["time", "activity", "location"],
        },
    })
}

/// The full itinerary schema
pub fn itinerary_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "tripTitle": described("A catchy title for the trip"),
            "summary": described("A brief inspiring summary of the trip"),
            "budget": {
                "type": "OBJECT",
                "properties": {
                    "stay": string(),
                    "travel": string(),
                    "food": string(),
                    "sightseeing": string(),
                    "buffer": string(),
                    "totalEstimate": string(),
                },
                "required": ["stay", "travel", "food", "sightseeing", "buffer", "totalEstimate"],
            },
            "transport": {
                "type": "OBJECT",
                "properties": {
                    "mode": described("Primary mode of transport to destination"),
                    "options": described("Specific details (e.g., flight route)"),
                    "duration": string(),
                    "approxCost": string(),
                },
                "required": ["mode", "options", "duration", "approxCost"],
            },
            "accommodation": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": string(),
                        "type": string(),
                        "approxCost": string(),
                        "whyRecommended": string(),
                    },
                    "required": ["name", "type", "approxCost", "whyRecommended"],
                },
            },
            "days": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "day": { "type": "INTEGER" },
                        "theme": described("Theme of the day"),
                        "morning": activity_list(),
                        "afternoon": activity_list(),
                        "evening": activity_list(),
                        "localTips": string(),
                    },
                    "required": ["day", "theme", "morning", "afternoon", "evening", "localTips"],
                },
            },
            "practicalTips": {
                "type": "OBJECT",
                "properties": {
                    "weather": string(),
                    "safety": string(),
                    "packing": string(),
                },
                "required": ["weather", "safety", "packing"],
            },
        },
        "required": ["tripTitle", "summary", "budget", "transport", "accommodation", "days", "practicalTips"],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Every `required` entry must name a declared property
    fn assert_required_declared(schema: &Value, path: &str) {
        if let Some(props) = schema.get("properties").and_then(Value::as_object) {
            let required = schema["required"].as_array().expect("object schemas list required fields");
            for name in required {
                let name = name.as_str().unwrap();
                assert!(props.contains_key(name), "{}: required '{}' is not declared", path, name);
            }
            assert_eq!(required.len(), props.len(), "{}: every property is required", path);
            for (name, prop) in props {
                assert_required_declared(prop, &format!("{}.{}", path, name));
            }
        }
        if let Some(items) = schema.get("items") {
            assert_required_declared(items, &format!("{}[]", path));
        }
    }

    #[test]
    fn test_schema_required_lists_are_consistent() {
        assert_required_declared(&itinerary_schema(), "$");
    }

    #[test]
    fn test_schema_top_level_shape() {
        let schema = itinerary_schema();
        assert_eq!(schema["type"], "OBJECT");
        assert_eq!(schema["properties"]["days"]["type"], "ARRAY");
        assert_eq!(schema["properties"]["days"]["items"]["properties"]["day"]["type"], "INTEGER");
        assert_eq!(
            schema["properties"]["days"]["items"]["properties"]["morning"]["items"]["required"],
            json!(["time", "activity", "location"])
        );
    }
}
