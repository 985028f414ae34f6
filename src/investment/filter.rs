//! Listing parsing, range filtering, projection, and sorting.

use std::cmp::Ordering;

use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::models::{InvestmentOptions, ProjectsData};

/// A flat property candidate (project fields plus property fields).
pub type Listing = Map<String, Value>;

/// Fields copied from a retained candidate into the filter output.
pub const PROJECTED_FIELDS: [&str; 26] = [
    "projectID",
    "projectName",
    "propertyDeveloper",
    "location",
    "description",
    "purpose",
    "start_date",
    "completion_date",
    "facilities",
    "no_of_installments",
    "no_of_properties",
    "percentage_sold",
    "propertyID",
    "no_of_rooms",
    "total_area_sqmeter",
    "no_of_bathrooms",
    "price",
    "interior_sqmeter",
    "balcony_terrace_sqmeter",
    "rooftop_sqmeter",
    "total_living_space_sqmeter",
    "payment_plan",
    "VAT",
    "stamp_duty",
    "title_deed_transfer",
    "lawyer_fees",
];

pub const MEDIA_FIELD: &str = "ImageURL OR VideoURL";

#[derive(Debug, thiserror::Error)]
pub enum ListingError {
    #[error("Failed to parse projects data: {0}")]
    Malformed(String),

    #[error("projects data entry {0} is not an object")]
    NotARecord(usize),

    #[error("property is missing field '{0}'")]
    MissingField(String),

    #[error("property field '{field}' is not a number: {value}")]
    NotNumeric { field: String, value: Value },

    #[error("property field '{0}' must be non-zero")]
    Zero(String),
}

/// Decode the candidate collection and flatten nested property types.
pub fn parse_listings(data: &ProjectsData) -> Result<Vec<Listing>, ListingError> {
    let entries = match data {
        ProjectsData::Inline(entries) => entries.clone(),
        ProjectsData::Serialized(raw) => parse_serialized(raw)?,
    };

    let mut listings = Vec::with_capacity(entries.len());
    for (position, entry) in entries.into_iter().enumerate() {
        let Value::Object(record) = entry else {
            return Err(ListingError::NotARecord(position));
        };
        expand_property_types(record, &mut listings);
    }
    Ok(listings)
}

// Payloads sometimes arrive with single-quoted strings; retry once with them
// swapped for double quotes.
fn parse_serialized(raw: &str) -> Result<Vec<Value>, ListingError> {
    serde_json::from_str(raw).or_else(|_| {
        serde_json::from_str(&raw.replace('\'', "\""))
            .map_err(|e| ListingError::Malformed(e.to_string()))
    })
}

fn expand_property_types(mut record: Listing, out: &mut Vec<Listing>) {
    let Some(Value::Array(property_types)) = record.remove("property_types") else {
        out.push(record);
        return;
    };

    for property in property_types {
        match property {
            Value::Object(fields) => {
                let mut listing = record.clone();
                listing.extend(fields);
                out.push(listing);
            }
            other => debug!(entry = %other, "Skipping non-object property type"),
        }
    }
}

/// A bound of zero is treated the same as an absent bound.
fn active(bound: Option<f64>) -> Option<f64> {
    bound.filter(|b| b.abs() > 0.0)
}

pub fn number(listing: &Listing, field: &str) -> Result<f64, ListingError> {
    let value = listing
        .get(field)
        .ok_or_else(|| ListingError::MissingField(field.to_string()))?;
    value.as_f64().ok_or_else(|| ListingError::NotNumeric {
        field: field.to_string(),
        value: value.clone(),
    })
}

fn within(
    listing: &Listing,
    field: &str,
    min: Option<f64>,
    max: Option<f64>,
) -> Result<bool, ListingError> {
    let (min, max) = (active(min), active(max));
    if min.is_none() && max.is_none() {
        return Ok(true);
    }
    let value = number(listing, field)?;
    Ok(min.is_none_or(|min| value >= min) && max.is_none_or(|max| value <= max))
}

fn matches(listing: &Listing, options: &InvestmentOptions) -> Result<bool, ListingError> {
    let in_ranges = within(listing, "price", options.budget_min, options.budget_max)?
        && within(listing, "total_area_sqmeter", options.size_min, options.size_max)?
        && within(listing, "no_of_rooms", options.bedrooms_min, options.bedrooms_max)?
        && within(listing, "no_of_bathrooms", options.bathrooms_min, options.bathrooms_max)?;
    if !in_ranges {
        return Ok(false);
    }

    let Some(wanted) = options.property_type.as_deref().filter(|t| !t.is_empty()) else {
        return Ok(true);
    };
    let kind = listing
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| ListingError::MissingField("type".to_string()))?;
    Ok(kind.to_lowercase() == wanted.to_lowercase())
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Copy the fixed output field set; `None` if any of it is missing.
fn project(listing: &Listing) -> Option<Listing> {
    let mut out = Listing::new();
    for field in PROJECTED_FIELDS {
        match listing.get(field) {
            Some(value) => {
                out.insert(field.to_string(), value.clone());
            }
            None => {
                warn!(
                    property = ?listing.get("propertyID"),
                    field,
                    "Skipping property with incomplete data"
                );
                return None;
            }
        }
    }

    let media = listing
        .get("ImageURL")
        .filter(|v| is_truthy(v))
        .or_else(|| listing.get("VideoURL"))
        .cloned()
        .unwrap_or(Value::Null);
    out.insert(MEDIA_FIELD.to_string(), media);
    Some(out)
}

fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

/// Natural ordering: numbers numerically, strings lexically, otherwise by type.
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            let (x, y) = (x.as_f64().unwrap_or(f64::NAN), y.as_f64().unwrap_or(f64::NAN));
            x.total_cmp(&y)
        }
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

/// Apply `options` to the supplied listings.
///
/// An empty result is not an error.
pub fn filter_investment_options(options: &InvestmentOptions) -> Result<Vec<Listing>, ListingError> {
    let listings = parse_listings(&options.projects_data)?;

    let mut filtered = Vec::new();
    for listing in &listings {
        if matches(listing, options)? {
            if let Some(projected) = project(listing) {
                filtered.push(projected);
            }
        }
    }

    if let Some(key) = options.sort_by.as_deref() {
        if filtered.first().is_some_and(|first| first.contains_key(key)) {
            // `sort_by` is stable: equal keys keep their input order.
            filtered.sort_by(|a, b| {
                compare_values(
                    a.get(key).unwrap_or(&Value::Null),
                    b.get(key).unwrap_or(&Value::Null),
                )
            });
        }
    }

    debug!(
        candidates = listings.len(),
        retained = filtered.len(),
        "Filtered investment options"
    );
    Ok(filtered)
}
