use serde_json::{Value, json};

use super::filter::{Listing, number};
use super::format::join_list;

/// Gallery shown for every property until per-project media is available.
pub const GALLERY: [&str; 4] = [
    "https://static.tildacdn.com/stor3335-6430-4635-a664-303033613461/19958823.jpg",
    "https://optim.tildacdn.one/tild3831-3338-4936-b035-626534353538/-/format/webp/90156560.jpeg",
    "https://optim.tildacdn.com/stor3830-3761-4335-b033-396166663233/-/format/webp/93188055.jpg",
    "https://optim.tildacdn.com/stor3465-3132-4464-b562-636266383936/-/format/webp/44491027.jpg",
];

/// Virtual tour URL for developers that publish one.
pub fn virtual_tour(developer: &str) -> &'static str {
    match developer {
        "Dovec Construction" => "https://360.dovecconstruction.com/",
        "Noyanlar Construction" => "https://360.noyanlar.com/",
        _ => "",
    }
}

fn field(listing: &Listing, name: &str) -> Value {
    listing.get(name).cloned().unwrap_or(Value::Null)
}

pub fn detail_entry(listing: &Listing) -> Value {
    let developer = listing
        .get("propertyDeveloper")
        .and_then(Value::as_str)
        .unwrap_or_default();

    let price_per_sqm = match (
        number(listing, "price"),
        number(listing, "total_living_space_sqmeter"),
    ) {
        (Ok(price), Ok(space)) if space.abs() > 0.0 => json!(price / space),
        _ => Value::Null,
    };

    json!({
        "propertyID": field(listing, "propertyID"),
        "Project Name": field(listing, "projectName"),
        "Property Developer": field(listing, "propertyDeveloper"),
        "Location": field(listing, "location"),
        "Purpose": field(listing, "purpose"),
        "Completion Date": field(listing, "completion_date"),
        "Facilities": listing.get("facilities").map(join_list).unwrap_or_default(),
        "ImageURL": GALLERY,
        "360 view": virtual_tour(developer),
        "Number of Rooms": field(listing, "no_of_rooms"),
        "Number of Bathrooms": field(listing, "no_of_bathrooms"),
        "Interior Area (sqm)": field(listing, "interior_sqmeter"),
        "Balcony/Terrace Area (sqm)": field(listing, "balcony_terrace_sqmeter"),
        "Rooftop Area (sqm)": field(listing, "rooftop_sqmeter"),
        "Total Living Space (sqm)": field(listing, "total_living_space_sqmeter"),
        "Price": field(listing, "price"),
        "Price Per Square Meter": price_per_sqm,
        "Installment Payment Plan": field(listing, "payment_plan"),
    })
}

pub fn property_details(filtered: &[Listing]) -> Value {
    let details: Vec<Value> = filtered.iter().map(detail_entry).collect();
    json!({ "property_details": details })
}
