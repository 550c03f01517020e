//! Prompts, JSON schemas and tool definitions shared by all providers

use serde_json::{json, Map, Value};

/// Longest description / interesting_fact stored in the database
pub const MAX_STRING_LENGTH: usize = 250;

/// Fields cut to [`MAX_STRING_LENGTH`] before validation
const TRUNCATED_FIELDS: [&str; 2] = ["description", "interesting_fact"];

pub const IDENTITY_PROMPT: &str = "Who is answering this question? Response should be in the \
     form of 'Model Provider: {model_provider} | Model Name: {model_name}'";

pub const COUNTRY_SYSTEM_PROMPT: &str = "You are a helpful AI geography teacher knowledgeable on \
     world geography, continents and countries. Always respond with valid JSON.";

pub const CITY_SYSTEM_PROMPT: &str = "You are a helpful AI geography teacher knowledgeable on \
     world geography, continents, countries, and cities. Always respond with valid JSON.";

pub const CONTINENT_SYSTEM_PROMPT: &str = "You are a helpful AI geography teacher knowledgeable on \
     world geography, continents and countries. Respond with accurate geographic data in the \
     exact JSON format requested. When asked about a continent, provide data for the entire \
     continental region including all sovereign nations within it.";

/// `(name, json type, description)`
///
/// `gdp_per_capita` is requested for context but not stored.
pub const COUNTRY_FIELDS: [(&str, &str, Option<&str>); 22] = [
    ("description", "string", Some("MUST be under 250 characters")),
    ("interesting_fact", "string", Some("MUST be under 250 characters")),
    ("area_sq_mile", "number", Some("area in square miles")),
    ("area_sq_km", "number", Some("area in square km")),
    ("population", "integer", None),
    ("ppp", "number", Some("purchasing power parity in $")),
    ("life_expectancy", "number", Some("in years")),
    ("travel_risk_level", "string", Some("US advisory level")),
    ("global_peace_index_score", "number", Some("IEP score")),
    ("global_peace_index_rank", "integer", Some("IEP rank")),
    ("happiness_index_score", "number", Some("Oxford score")),
    ("happiness_index_rank", "integer", Some("Oxford rank")),
    ("gdp", "number", Some("in $")),
    ("gdp_growth_rate", "number", Some("in %")),
    ("inflation_rate", "number", Some("in %")),
    ("unemployment_rate", "number", Some("in %")),
    ("govt_debt", "number", Some("in % of GDP")),
    ("credit_rating", "string", Some("S&P rating")),
    ("poverty_rate", "number", Some("in %")),
    ("gini_coefficient", "number", Some("income inequality")),
    ("military_spending", "number", Some("in % of GDP")),
    ("gdp_per_capita", "number", Some("GDP per capita in $")),
];

/// `(name, json type, description, required)`
pub const CITY_FIELDS: [(&str, &str, Option<&str>, bool); 12] = [
    ("name", "string", None, true),
    ("is_capital", "boolean", None, true),
    ("description", "string", Some("MUST be under 250 characters"), true),
    ("interesting_fact", "string", Some("MUST be under 250 characters"), true),
    ("area_sq_mile", "number", None, true),
    ("area_sq_km", "number", None, true),
    ("population", "integer", None, true),
    ("sci_score", "number or null", Some("EIU Safe Cities Index"), false),
    ("sci_rank", "integer or null", Some("EIU Safe Cities Index rank"), false),
    ("numbeo_si", "number or null", Some("Numbeo Safety Index 0-100"), false),
    ("numbeo_ci", "number or null", Some("Numbeo Crime Index 0-100"), false),
    ("airport_code", "string", Some("3-letter IATA code"), true),
];

fn field_line(name: &str, json_type: &str, desc: Option<&str>) -> String {
    match desc {
        Some(desc) => format!("- {}: {} ({})", name, json_type, desc),
        None => format!("- {}: {}", name, json_type),
    }
}

pub fn country_user_prompt(country: &str) -> String {
    let fields = COUNTRY_FIELDS
        .iter()
        .map(|(name, ty, desc)| field_line(name, ty, *desc))
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "Provide information about the country {} as a JSON object with these exact fields:\n{}",
        country, fields
    )
}

pub fn cities_user_prompt(country: &str) -> String {
    let fields = CITY_FIELDS
        .iter()
        .map(|(name, ty, desc, _)| field_line(name, ty, *desc))
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "List up to 5 most populous cities in {}. Return a JSON object with a 'cities' array. \
         Each city should have these fields:\n{}",
        country, fields
    )
}

pub fn continent_user_prompt(continent: &str) -> String {
    format!(
        "Please provide the information on the continent of {} in JSON format with these fields:\n\
         - description: less than 250 characters\n\
         - area_sq_mile: total area in square miles (number)\n\
         - area_sq_km: total area in square km (number)\n\
         - population: total population of all countries (integer)\n\
         - num_country: total number of sovereign nations in the continental region (integer)",
        continent
    )
}

fn property(name: &str, json_type: &str, desc: Option<&str>, include_max_length: bool) -> Value {
    let mut prop = Map::new();

    match json_type.strip_suffix(" or null") {
        Some(base) => {
            prop.insert("type".into(), json!([base, "null"]));
        }
        None => {
            prop.insert("type".into(), json!(json_type));
            if json_type == "string" && include_max_length && TRUNCATED_FIELDS.contains(&name) {
                prop.insert("maxLength".into(), json!(MAX_STRING_LENGTH));
            }
        }
    }

    if let Some(desc) = desc {
        prop.insert("description".into(), json!(desc));
    }
    Value::Object(prop)
}

/// Country object schema; every field is required
///
/// Providers that reject `maxLength` (Cohere) pass `include_max_length = false`.
pub fn country_json_schema(include_max_length: bool) -> Value {
    let mut properties = Map::new();
    for (name, ty, desc) in COUNTRY_FIELDS {
        properties.insert(name.to_string(), property(name, ty, desc, include_max_length));
    }
    let required: Vec<&str> = COUNTRY_FIELDS.iter().map(|(name, _, _)| *name).collect();

    json!({
        "type": "object",
        "properties": properties,
        "required": required,
    })
}

/// Schema for a single city
pub fn city_json_schema(include_max_length: bool) -> Value {
    let mut properties = Map::new();
    let mut required = Vec::new();
    for (name, ty, desc, is_required) in CITY_FIELDS {
        properties.insert(name.to_string(), property(name, ty, desc, include_max_length));
        if is_required {
            required.push(name);
        }
    }

    json!({
        "type": "object",
        "properties": properties,
        "required": required,
    })
}

/// `{"cities": [city, ...]}` schema
pub fn cities_json_schema(include_max_length: bool) -> Value {
    json!({
        "type": "object",
        "required": ["cities"],
        "properties": {
            "cities": {
                "type": "array",
                "items": city_json_schema(include_max_length),
            },
        },
    })
}

pub const COUNTRY_TOOL_NAME: &str = "record_country_info";
pub const CITIES_TOOL_NAME: &str = "record_cities_info";

pub fn country_tool() -> Value {
    json!({
        "name": COUNTRY_TOOL_NAME,
        "description": "Records structured information about a country",
        "input_schema": country_json_schema(true),
    })
}

pub fn cities_tool() -> Value {
    json!({
        "name": CITIES_TOOL_NAME,
        "description": "Records structured information about cities in a country",
        "input_schema": {
            "type": "object",
            "properties": {
                "cities": {
                    "type": "array",
                    "items": city_json_schema(true),
                    "description": "List of up to 5 most populous cities",
                },
            },
            "required": ["cities"],
        },
    })
}

/// Cut over-long description / interesting_fact strings to 247 chars + "..."
///
/// Models ignore length instructions often enough that this runs before
/// every validation.
pub fn truncate_long_strings(object: &mut Map<String, Value>) {
    for field in TRUNCATED_FIELDS {
        if let Some(Value::String(text)) = object.get_mut(field) {
            if text.chars().count() > MAX_STRING_LENGTH {
                let mut cut: String = text.chars().take(MAX_STRING_LENGTH - 3).collect();
                cut.push_str("...");
                *text = cut;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_country_prompt_lists_every_field() {
        let prompt = country_user_prompt("Kenya");
        assert!(prompt.starts_with("Provide information about the country Kenya as a JSON object"));
        assert!(prompt.contains("- population: integer\n"));
        assert!(prompt.contains("- credit_rating: string (S&P rating)"));
        assert!(prompt.ends_with("- gdp_per_capita: number (GDP per capita in $)"));
        assert_eq!(prompt.lines().filter(|l| l.starts_with("- ")).count(), 22);
    }

    #[test]
    fn test_cities_prompt() {
        let prompt = cities_user_prompt("Japan");
        assert!(prompt.starts_with("List up to 5 most populous cities in Japan."));
        assert!(prompt.contains("- sci_rank: integer or null (EIU Safe Cities Index rank)"));
    }

    #[test]
    fn test_country_schema_max_length_switch() {
        let with = country_json_schema(true);
        assert_eq!(with["properties"]["description"]["maxLength"], 250);
        assert!(with["properties"]["credit_rating"].get("maxLength").is_none());
        assert_eq!(with["required"].as_array().unwrap().len(), 22);

        let without = country_json_schema(false);
        assert!(without["properties"]["description"].get("maxLength").is_none());
    }

    #[test]
    fn test_city_schema_nullable_and_required() {
        let schema = city_json_schema(true);
        assert_eq!(schema["properties"]["sci_score"]["type"], json!(["number", "null"]));
        assert_eq!(schema["properties"]["is_capital"]["type"], "boolean");

        let required = schema["required"].as_array().unwrap();
        assert!(required.contains(&json!("airport_code")));
        assert!(!required.contains(&json!("numbeo_si")));
    }

    #[test]
    fn test_tools() {
        assert_eq!(country_tool()["name"], "record_country_info");
        assert_eq!(
            cities_tool()["input_schema"]["properties"]["cities"]["type"],
            "array"
        );
    }

    #[test]
    fn test_truncate_long_strings() {
        let mut object = Map::new();
        object.insert("description".into(), json!("é".repeat(300)));
        object.insert("interesting_fact".into(), json!("short"));
        object.insert("credit_rating".into(), json!("x".repeat(300)));

        truncate_long_strings(&mut object);

        let description = object["description"].as_str().unwrap();
        assert_eq!(description.chars().count(), 250);
        assert!(description.ends_with("..."));
        assert_eq!(object["interesting_fact"], "short");
        assert_eq!(object["credit_rating"].as_str().unwrap().len(), 300);
    }
}
