//! Record definitions and tool parameters for the investment tools.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::tools::ToolParams;
use crate::tools::schema::{Definition, FieldDef, FieldType, PrimitiveKind, RecordDef};

const fn field(
    name: &'static str,
    title: &'static str,
    description: &'static str,
    ty: FieldType,
    required: bool,
) -> FieldDef {
    FieldDef {
        name,
        title,
        description,
        ty,
        required,
    }
}

const STRING: FieldType = FieldType::Scalar(PrimitiveKind::String);
const INTEGER: FieldType = FieldType::Scalar(PrimitiveKind::Integer);
const NUMBER: FieldType = FieldType::Scalar(PrimitiveKind::Number);

/// One property type offered inside a project.
pub static PROPERTY: RecordDef = RecordDef {
    name: "PropertySchema",
    fields: &[
        field("propertyID", "Property ID", "Unique identifier for the property", STRING, true),
        field("no_of_rooms", "Number of Rooms", "Number of rooms in the property", INTEGER, true),
        field("type", "Property Type", "Type of the property (e.g., Apartment, Villa)", STRING, true),
        field(
            "total_area_sqmeter",
            "Total Area (sq meter)",
            "Total area of the property in square meters",
            NUMBER,
            true,
        ),
        field(
            "no_of_bathrooms",
            "Number of Bathrooms",
            "Number of bathrooms in the property",
            NUMBER,
            true,
        ),
        field("price", "Price", "Price of the property in the local currency", NUMBER, true),
    ],
};

/// A development project and the property types it offers.
pub static PROJECT: RecordDef = RecordDef {
    name: "ProjectSchema",
    fields: &[
        field("projectID", "Project ID", "Unique identifier for the project", STRING, true),
        field("projectName", "Project Name", "Name of the project", STRING, true),
        field(
            "propertyDeveloper",
            "Property Developer",
            "Name of the property developer",
            STRING,
            true,
        ),
        field("location", "Location", "Location of the project", STRING, true),
        field("description", "Description", "Brief description of the project", STRING, true),
        field(
            "purpose",
            "Purpose",
            "Purpose of the project (e.g., Residential, Commercial)",
            STRING,
            true,
        ),
        field("start_date", "Start Date", "Start date of the project", STRING, true),
        field(
            "completion_date",
            "Completion Date",
            "Estimated completion date of the project",
            STRING,
            true,
        ),
        field(
            "facilities",
            "Facilities",
            "List of facilities available in the project",
            FieldType::List(Definition::Primitive(PrimitiveKind::String)),
            true,
        ),
        field(
            "no_of_installments",
            "Number of Installments",
            "Number of payment installments available",
            INTEGER,
            true,
        ),
        field(
            "no_of_properties",
            "Number of Properties",
            "Total number of properties in the project",
            INTEGER,
            true,
        ),
        field("percentage_sold", "Percentage Sold", "Percentage of properties sold", NUMBER, true),
        field(
            "property_types",
            "Property Types",
            "List of property types available in the project",
            FieldType::List(Definition::Record(&PROPERTY)),
            true,
        ),
        field(
            "image_url",
            "Image URLs",
            "URLs of images related to the project",
            FieldType::List(Definition::Primitive(PrimitiveKind::Array)),
            true,
        ),
    ],
};

/// Input record shared by all investment tools.
pub static INVESTMENT_OPTIONS: RecordDef = RecordDef {
    name: "InvestmentOptionsSchema",
    fields: &[
        field("budget_min", "Minimum Budget", "Minimum budget for property investment", INTEGER, false),
        field("budget_max", "Maximum Budget", "Maximum budget for property investment", INTEGER, true),
        field("location", "Location", "Location preference for property investment", STRING, false),
        field("size_min", "Minimum Size", "Minimum property size in square meters", INTEGER, false),
        field("size_max", "Maximum Size", "Maximum property size in square meters", INTEGER, false),
        field("bedrooms_min", "Minimum Bedrooms", "Minimum number of bedrooms", INTEGER, false),
        field("bedrooms_max", "Maximum Bedrooms", "Maximum number of bedrooms", INTEGER, false),
        field("bathrooms_min", "Minimum Bathrooms", "Minimum number of bathrooms", NUMBER, false),
        field("bathrooms_max", "Maximum Bathrooms", "Maximum number of bathrooms", NUMBER, false),
        field("family_size", "Family Size", "Number of family members", INTEGER, false),
        field(
            "property_type",
            "Property Type",
            "Type of property (e.g., house, apartment)",
            STRING,
            false,
        ),
        field(
            "sort_by",
            "Sort By",
            "Sort the results by a specific field (e.g., price, size)",
            STRING,
            false,
        ),
        field(
            "projects_data",
            "Projects Data",
            "List of projects data",
            FieldType::List(Definition::Record(&PROJECT)),
            true,
        ),
    ],
};

/// Candidate listings, either JSON-encoded in a string or inline.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ProjectsData {
    Serialized(String),
    Inline(Vec<Value>),
}

/// Search criteria. Absent and zero bounds both mean "no constraint".
#[derive(Debug, Clone, Deserialize)]
pub struct InvestmentOptions {
    #[serde(default, deserialize_with = "lenient_number")]
    pub budget_min: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub budget_max: Option<f64>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub size_min: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub size_max: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub bedrooms_min: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub bedrooms_max: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub bathrooms_min: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub bathrooms_max: Option<f64>,
    #[serde(default)]
    pub family_size: Option<u32>,
    #[serde(default)]
    pub property_type: Option<String>,
    #[serde(default)]
    pub sort_by: Option<String>,
    pub projects_data: ProjectsData,
}

impl InvestmentOptions {
    /// Options with only the required fields set.
    pub fn new(budget_max: f64, projects_data: ProjectsData) -> Self {
        Self {
            budget_min: None,
            budget_max: Some(budget_max),
            location: None,
            size_min: None,
            size_max: None,
            bedrooms_min: None,
            bedrooms_max: None,
            bathrooms_min: None,
            bathrooms_max: None,
            family_size: None,
            property_type: None,
            sort_by: None,
            projects_data,
        }
    }
}

impl ToolParams for InvestmentOptions {
    fn validate(&self) -> Result<(), String> {
        let lower_bounds = [
            ("size_min", self.size_min),
            ("bedrooms_min", self.bedrooms_min),
            ("bathrooms_min", self.bathrooms_min),
        ];
        for (name, value) in lower_bounds {
            if value.is_some_and(|v| v < 0.0) {
                return Err(format!("{name}: must be greater than or equal to 0"));
            }
        }
        Ok(())
    }
}

/// Accepts `null`, a JSON number, or a numeric string.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Number(n)) => Ok(Some(n)),
        Some(Raw::Text(s)) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("invalid number: {s:?}"))),
    }
}
