use serde_json::{Value, json};

use super::filter::{Listing, ListingError, number};
use super::format::{Amount, display_raw, euro, join_list};

const FEE_FIELDS: [&str; 4] = ["VAT", "stamp_duty", "title_deed_transfer", "lawyer_fees"];

/// Developers whose record counts as excellent regardless of sales.
const TRUSTED_DEVELOPERS: [&str; 1] = ["Dovec"];

fn get<'a>(listing: &'a Listing, field: &str) -> Result<&'a Value, ListingError> {
    listing
        .get(field)
        .ok_or_else(|| ListingError::MissingField(field.to_string()))
}

fn amount(listing: &Listing, field: &str) -> Result<Amount, ListingError> {
    let value = get(listing, field)?;
    Amount::from_json(value).ok_or_else(|| ListingError::NotNumeric {
        field: field.to_string(),
        value: value.clone(),
    })
}

/// One row of the cost comparison for a filtered property.
pub fn comparison_entry(listing: &Listing) -> Result<Value, ListingError> {
    let price = amount(listing, "price")?;
    let area = number(listing, "total_area_sqmeter")?;
    if area.abs() <= f64::EPSILON {
        return Err(ListingError::Zero("total_area_sqmeter".to_string()));
    }

    let mut fees = Amount {
        value: 0.0,
        integral: true,
    };
    for field in FEE_FIELDS {
        fees = fees + amount(listing, field)?;
    }

    let developer = display_raw(get(listing, "propertyDeveloper")?);
    let track_record = if number(listing, "percentage_sold")? >= 70.0
        || TRUSTED_DEVELOPERS.contains(&developer.as_str())
    {
        "Excellent"
    } else {
        "Good"
    };

    Ok(json!({
        "propertyID": get(listing, "propertyID")?,
        "projectName": get(listing, "projectName")?,
        "Property": get(listing, "purpose")?,
        "Location": get(listing, "location")?,
        "Price per Square Meter": format!("€{:.0}", price.value / area),
        "Total Price": euro(price),
        "Additional Fees": euro(fees),
        "Total Cost Including Fees": euro(price + fees),
        "Total Area (sqm)": get(listing, "total_area_sqmeter")?,
        "Number of Rooms": format!(
            "{} bedrooms, {} bathrooms",
            display_raw(get(listing, "no_of_rooms")?),
            display_raw(get(listing, "no_of_bathrooms")?)
        ),
        "Facilities and Amenities": join_list(get(listing, "facilities")?),
        "Estimated Completion Date": get(listing, "completion_date")?,
        "Developer Track Record": track_record,
    }))
}

/// `{"properties": [...]}`, or the no-match message for an empty input.
pub fn cost_comparison(filtered: &[Listing]) -> Result<Value, ListingError> {
    if filtered.is_empty() {
        return Ok(no_properties_found());
    }
    let rows = filtered
        .iter()
        .map(comparison_entry)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(json!({ "properties": rows }))
}

pub fn no_properties_found() -> Value {
    json!({ "message": "No properties found matching the criteria." })
}
