use super::SourceAlias;

/// Each projection field is defined by
/// 1. a definition
/// 1. an alias
/// 1. an output type
///
/// by example `select r."Name" as name`
///  * `r."Name"` is the definition
///  * `name` is the field name
///  * the type here is the same as the input type (text)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectionField {
    /// Output name of the field.
    pub name: String,

    /// Field definition, any SQL expression.
    pub definition: String,

    /// SQL type of the output data.
    pub output_type: String,
}

impl ProjectionField {
    /// [ProjectionField] constructor
    pub fn new(name: &str, definition: &str, output_type: &str) -> Self {
        Self {
            name: name.to_string(),
            definition: definition.to_string(),
            output_type: output_type.to_string(),
        }
    }
}

/// Ordered list of the fields a query returns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Projection {
    fields: Vec<ProjectionField>,
}

impl Projection {
    /// Create a projection from a `&[(name, definition, output_type)]` list
    pub fn from(fields: &[(&str, &str, &str)]) -> Self {
        let mut projection = Self::default();
        for (name, definition, output_type) in fields {
            projection.add_field(name, definition, output_type);
        }

        projection
    }

    /// Append a field
    pub fn add_field(&mut self, name: &str, definition: &str, output_type: &str) {
        self.fields.push(ProjectionField::new(name, definition, output_type));
    }

    /// The fields, in order
    pub fn get_fields(&self) -> &[ProjectionField] {
        &self.fields
    }

    /// Turn the projection into a string suitable for use in SQL queries
    pub fn expand(&self, aliases: SourceAlias) -> String {
        let fields = self
            .fields
            .iter()
            .map(|field| format!("{} as {}", field.definition, field.name))
            .collect::<Vec<_>>()
            .join(", ");

        aliases.apply(&fields)
    }
}
