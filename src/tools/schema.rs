//! Declarative record definitions and the schema flattener.
//!
//! Record types are described by hand-authored `static` [`RecordDef`] values.
//! [`SchemaFlattener`] walks that definition graph and produces the simplified
//! [`ParameterSchema`] advertised to clients. Only list fields whose title is in
//! the flattener's expandable set are expanded; every other field collapses to a
//! `{title, type}` leaf.

use std::collections::{BTreeMap, HashSet};

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Titles of list fields expanded by [`SchemaFlattener::default`].
pub const DEFAULT_EXPANDABLE_TITLES: [&str; 2] = ["Projects Data", "Property Types"];

/// Primitive JSON type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    String,
    Integer,
    Number,
    Boolean,
    Array,
    Object,
}

impl PrimitiveKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Array => "array",
            Self::Object => "object",
        }
    }
}

/// A structured record type with named, typed fields.
#[derive(Debug)]
pub struct RecordDef {
    pub name: &'static str,
    pub fields: &'static [FieldDef],
}

impl RecordDef {
    /// Names of the required fields, in declaration order.
    pub fn required_fields(&self) -> Vec<String> {
        self.fields
            .iter()
            .filter(|f| f.required)
            .map(|f| f.name.to_string())
            .collect()
    }
}

#[derive(Debug)]
pub struct FieldDef {
    pub name: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub ty: FieldType,
    pub required: bool,
}

#[derive(Debug, Clone, Copy)]
pub enum FieldType {
    Scalar(PrimitiveKind),
    Record(&'static RecordDef),
    List(Definition<'static>),
}

impl FieldType {
    /// JSON type reported for a non-expanded field.
    pub fn kind(self) -> PrimitiveKind {
        match self {
            Self::Scalar(kind) => kind,
            Self::Record(_) => PrimitiveKind::Object,
            Self::List(_) => PrimitiveKind::Array,
        }
    }
}

/// Anything the flattener can be pointed at.
#[derive(Debug, Clone, Copy)]
pub enum Definition<'a> {
    Record(&'a RecordDef),
    Primitive(PrimitiveKind),
}

pub type Properties = BTreeMap<String, ParameterSchema>;

/// Simplified schema tree handed to clients.
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterSchema {
    /// Object-rooted tool input schema.
    Object {
        properties: Properties,
        required: Vec<String>,
    },
    /// Bare field map of a flattened record (used as array `items`).
    Record(Properties),
    Array {
        title: String,
        description: String,
        items: Box<ParameterSchema>,
    },
    Leaf {
        title: String,
        kind: PrimitiveKind,
    },
    Scalar {
        kind: PrimitiveKind,
    },
    /// Terminal marker replacing a cyclic branch.
    Recursive {
        name: String,
    },
}

impl ParameterSchema {
    pub fn properties(&self) -> Option<&Properties> {
        match self {
            Self::Object { properties, .. } | Self::Record(properties) => Some(properties),
            _ => None,
        }
    }

    pub fn required(&self) -> &[String] {
        match self {
            Self::Object { required, .. } => required,
            _ => &[],
        }
    }
}

impl Serialize for ParameterSchema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Object {
                properties,
                required,
            } => {
                let mut map = serializer.serialize_map(Some(4))?;
                map.serialize_entry("type", "object")?;
                map.serialize_entry("default", &serde_json::Map::new())?;
                map.serialize_entry("properties", properties)?;
                map.serialize_entry("required", required)?;
                map.end()
            }
            Self::Record(properties) => properties.serialize(serializer),
            Self::Array {
                title,
                description,
                items,
            } => {
                let mut map = serializer.serialize_map(Some(4))?;
                map.serialize_entry("title", title)?;
                map.serialize_entry("type", "array")?;
                map.serialize_entry("description", description)?;
                map.serialize_entry("items", items)?;
                map.end()
            }
            Self::Leaf { title, kind } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("title", title)?;
                map.serialize_entry("type", kind.as_str())?;
                map.end()
            }
            Self::Scalar { kind } => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("type", kind.as_str())?;
                map.end()
            }
            Self::Recursive { name } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", "object")?;
                map.serialize_entry("description", &format!("recursive reference to {name}"))?;
                map.end()
            }
        }
    }
}

/// Recursion guard keyed by definition address.
type Visited = HashSet<*const RecordDef>;

/// Converts record definitions into [`ParameterSchema`] trees.
#[derive(Debug, Clone)]
pub struct SchemaFlattener {
    expandable: HashSet<String>,
}

impl Default for SchemaFlattener {
    fn default() -> Self {
        Self::new(DEFAULT_EXPANDABLE_TITLES)
    }
}

impl SchemaFlattener {
    pub fn new<I, S>(expandable_titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            expandable: expandable_titles.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_expandable(&self, title: &str) -> bool {
        self.expandable.contains(title)
    }

    /// Flatten a definition starting from an empty visited set.
    pub fn flatten(&self, definition: Definition<'_>) -> ParameterSchema {
        self.flatten_with(definition, Visited::new())
    }

    /// Object-rooted schema for a tool's parameter record.
    pub fn object_schema(&self, record: &RecordDef) -> ParameterSchema {
        let properties = match self.flatten(Definition::Record(record)) {
            ParameterSchema::Record(properties) => properties,
            _ => Properties::new(),
        };
        ParameterSchema::Object {
            properties,
            required: record.required_fields(),
        }
    }

    // `visited` is owned: each call extends its own copy, so sibling fields
    // only ever see the definitions on their own ancestor path.
    fn flatten_with(&self, definition: Definition<'_>, mut visited: Visited) -> ParameterSchema {
        let record = match definition {
            Definition::Primitive(kind) => return ParameterSchema::Scalar { kind },
            Definition::Record(record) => record,
        };

        if !visited.insert(std::ptr::from_ref(record)) {
            return ParameterSchema::Recursive {
                name: record.name.to_string(),
            };
        }

        let properties = record
            .fields
            .iter()
            .map(|field| (field.name.to_string(), self.flatten_field(field, &visited)))
            .collect();
        ParameterSchema::Record(properties)
    }

    fn flatten_field(&self, field: &FieldDef, visited: &Visited) -> ParameterSchema {
        match field.ty {
            FieldType::List(element) if self.is_expandable(field.title) => ParameterSchema::Array {
                title: field.title.to_string(),
                description: field.description.to_string(),
                items: Box::new(self.flatten_with(element, visited.clone())),
            },
            ty => ParameterSchema::Leaf {
                title: field.title.to_string(),
                kind: ty.kind(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    static LEAF: RecordDef = RecordDef {
        name: "Leaf",
        fields: &[FieldDef {
            name: "id",
            title: "Id",
            description: "Identifier",
            ty: FieldType::Scalar(PrimitiveKind::String),
            required: true,
        }],
    };

    static TREE: RecordDef = RecordDef {
        name: "Tree",
        fields: &[
            FieldDef {
                name: "label",
                title: "Label",
                description: "Node label",
                ty: FieldType::Scalar(PrimitiveKind::String),
                required: true,
            },
            FieldDef {
                name: "children",
                title: "Children",
                description: "Child nodes",
                ty: FieldType::List(Definition::Record(&TREE)),
                required: false,
            },
        ],
    };

    // Mutual recursion: Ping -> Pong -> Ping.
    static PING: RecordDef = RecordDef {
        name: "Ping",
        fields: &[FieldDef {
            name: "pongs",
            title: "Pongs",
            description: "Pong list",
            ty: FieldType::List(Definition::Record(&PONG)),
            required: false,
        }],
    };

    static PONG: RecordDef = RecordDef {
        name: "Pong",
        fields: &[FieldDef {
            name: "pings",
            title: "Pings",
            description: "Ping list",
            ty: FieldType::List(Definition::Record(&PING)),
            required: false,
        }],
    };

    static SIBLINGS: RecordDef = RecordDef {
        name: "Siblings",
        fields: &[
            FieldDef {
                name: "left",
                title: "Left",
                description: "Left leaves",
                ty: FieldType::List(Definition::Record(&LEAF)),
                required: true,
            },
            FieldDef {
                name: "right",
                title: "Right",
                description: "Right leaves",
                ty: FieldType::List(Definition::Record(&LEAF)),
                required: false,
            },
            FieldDef {
                name: "tags",
                title: "Tags",
                description: "Free-form tags",
                ty: FieldType::List(Definition::Primitive(PrimitiveKind::String)),
                required: false,
            },
            FieldDef {
                name: "owner",
                title: "Owner",
                description: "Nested record",
                ty: FieldType::Record(&LEAF),
                required: false,
            },
        ],
    };

    #[test]
    fn test_primitive_definition() {
        let flattener = SchemaFlattener::default();
        let schema = flattener.flatten(Definition::Primitive(PrimitiveKind::Number));
        assert_eq!(serde_json::to_value(&schema).unwrap(), json!({ "type": "number" }));
    }

    #[test]
    fn test_non_expandable_fields_collapse_to_leaves() {
        let flattener = SchemaFlattener::default();
        let schema = flattener.object_schema(&SIBLINGS);
        assert_eq!(
            serde_json::to_value(&schema).unwrap(),
            json!({
                "type": "object",
                "default": {},
                "properties": {
                    "left": { "title": "Left", "type": "array" },
                    "right": { "title": "Right", "type": "array" },
                    "tags": { "title": "Tags", "type": "array" },
                    "owner": { "title": "Owner", "type": "object" }
                },
                "required": ["left"]
            })
        );
    }

    #[test]
    fn test_sibling_branches_expand_independently() {
        let flattener = SchemaFlattener::new(["Left", "Right", "Tags"]);
        let value = serde_json::to_value(flattener.object_schema(&SIBLINGS)).unwrap();
        let expected_items = json!({ "id": { "title": "Id", "type": "string" } });

        assert_eq!(value["properties"]["left"]["items"], expected_items);
        assert_eq!(value["properties"]["right"]["items"], expected_items);
        assert_eq!(value["properties"]["right"]["description"], "Right leaves");
        assert_eq!(value["properties"]["tags"]["items"], json!({ "type": "string" }));
    }

    #[test]
    fn test_self_reference_terminates_with_marker() {
        let flattener = SchemaFlattener::new(["Children"]);
        let value = serde_json::to_value(flattener.object_schema(&TREE)).unwrap();

        assert_eq!(
            value["properties"]["children"]["items"],
            json!({ "type": "object", "description": "recursive reference to Tree" })
        );
        assert_eq!(value["required"], json!(["label"]));
    }

    #[test]
    fn test_mutual_reference_terminates_with_marker() {
        let flattener = SchemaFlattener::new(["Pongs", "Pings"]);
        let value = serde_json::to_value(flattener.flatten(Definition::Record(&PING))).unwrap();

        assert_eq!(
            value["pongs"]["items"]["pings"]["items"],
            json!({ "type": "object", "description": "recursive reference to Ping" })
        );
    }

    #[test]
    fn test_flatten_is_deterministic() {
        let flattener = SchemaFlattener::new(["Children", "Left", "Right"]);
        assert_eq!(flattener.object_schema(&TREE), flattener.object_schema(&TREE));
        assert_eq!(
            serde_json::to_string(&flattener.object_schema(&SIBLINGS)).unwrap(),
            serde_json::to_string(&flattener.object_schema(&SIBLINGS)).unwrap()
        );
    }

    #[test]
    fn test_required_is_subset_of_properties() {
        let flattener = SchemaFlattener::default();
        for record in [&LEAF, &TREE, &SIBLINGS] {
            let schema = flattener.object_schema(record);
            let properties = schema.properties().unwrap();
            assert!(schema.required().iter().all(|name| properties.contains_key(name)));
        }
    }
}
