use std::collections::{BTreeMap, HashSet};
use std::rc::Rc;

use strum_macros::{Display, EnumString};

use crate::{Error, Result};

/// What a declared field may hold.
///
/// Only the two reference kinds take part in graph discovery; everything
/// else is `Scalar` and is only ever read for labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display)]
#[strum(serialize_all = "snake_case")]
pub enum FieldKind {
    /// A single nested object (or nothing)
    Reference,
    /// An ordered sequence of nested objects
    ReferenceList,
    /// Text, numbers and anything else that is not an object
    Scalar,
}

impl FieldKind {
    pub fn is_relationship(&self) -> bool {
        matches!(self, FieldKind::Reference | FieldKind::ReferenceList)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDecl {
    pub name: String,
    pub kind: FieldKind,
}

impl FieldDecl {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// Declared field layout of one node type, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSchema {
    node_type: String,
    fields: Vec<FieldDecl>,
}

impl TypeSchema {
    pub fn new(node_type: impl Into<String>, fields: Vec<FieldDecl>) -> Result<Self> {
        let node_type = node_type.into();
        if node_type.is_empty() {
            return Err(Error::invalid_configuration("node type must not be empty")
                .with_operation("schema::new"));
        }

        let mut seen = HashSet::new();
        for field in &fields {
            if field.name.is_empty() || !seen.insert(field.name.as_str()) {
                return Err(Error::invalid_configuration(format!(
                    "field '{}' is empty or declared twice",
                    field.name
                ))
                .with_operation("schema::new")
                .with_context("node_type", node_type.clone()));
            }
        }

        Ok(Self { node_type, fields })
    }

    pub fn node_type(&self) -> &str {
        &self.node_type
    }

    pub fn fields(&self) -> &[FieldDecl] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldDecl> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Reference and reference-list fields, in declaration order.
    pub fn relationship_fields(&self) -> impl Iterator<Item = &FieldDecl> {
        self.fields.iter().filter(|f| f.kind.is_relationship())
    }
}

/// Registry of node types known to the in-memory model.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    types: BTreeMap<String, Rc<TypeSchema>>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, schema: TypeSchema) -> Result<()> {
        if self.types.contains_key(schema.node_type()) {
            return Err(Error::invalid_configuration(format!(
                "node type '{}' registered twice",
                schema.node_type()
            ))
            .with_operation("schema::register"));
        }
        self.types
            .insert(schema.node_type().to_string(), Rc::new(schema));
        Ok(())
    }

    pub fn get(&self, node_type: &str) -> Option<&Rc<TypeSchema>> {
        self.types.get(node_type)
    }

    pub fn contains(&self, node_type: &str) -> bool {
        self.types.contains_key(node_type)
    }

    pub fn node_types(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// The CRIPT data model node types and their declared fields.
    pub fn cript() -> Self {
        use FieldKind::{Reference as R, ReferenceList as L, Scalar as S};

        let table: &[(&str, &[(&str, FieldKind)])] = &[
            (
                "Project",
                &[
                    ("name", S),
                    ("collection", L),
                    ("material", L),
                    ("member", L),
                    ("admin", L),
                    ("notes", S),
                ],
            ),
            (
                "Collection",
                &[
                    ("name", S),
                    ("experiment", L),
                    ("inventory", L),
                    ("doi", S),
                    ("citation", L),
                    ("member", L),
                    ("admin", L),
                    ("notes", S),
                ],
            ),
            (
                "Experiment",
                &[
                    ("name", S),
                    ("process", L),
                    ("computation", L),
                    ("computation_process", L),
                    ("data", L),
                    ("funding", S),
                    ("citation", L),
                    ("notes", S),
                ],
            ),
            ("Inventory", &[("name", S), ("material", L), ("notes", S)]),
            (
                "Material",
                &[
                    ("name", S),
                    ("identifiers", S),
                    ("component", L),
                    ("process", R),
                    ("property", L),
                    ("parent_material", R),
                    ("computational_forcefield", R),
                    ("keyword", S),
                    ("notes", S),
                ],
            ),
            (
                "Property",
                &[
                    ("key", S),
                    ("type", S),
                    ("value", S),
                    ("unit", S),
                    ("uncertainty", S),
                    ("uncertainty_type", S),
                    ("component", L),
                    ("structure", S),
                    ("method", S),
                    ("sample_preparation", R),
                    ("condition", L),
                    ("data", L),
                    ("computation", L),
                    ("citation", L),
                    ("notes", S),
                ],
            ),
            (
                "Process",
                &[
                    ("name", S),
                    ("type", S),
                    ("description", S),
                    ("ingredient", L),
                    ("equipment", L),
                    ("product", L),
                    ("waste", L),
                    ("prerequisite_process", L),
                    ("condition", L),
                    ("property", L),
                    ("keyword", S),
                    ("citation", L),
                    ("notes", S),
                ],
            ),
            ("Ingredient", &[("material", R), ("quantity", L), ("keyword", S)]),
            (
                "Quantity",
                &[
                    ("key", S),
                    ("value", S),
                    ("unit", S),
                    ("uncertainty", S),
                    ("uncertainty_type", S),
                ],
            ),
            (
                "Condition",
                &[
                    ("key", S),
                    ("type", S),
                    ("descriptor", S),
                    ("value", S),
                    ("unit", S),
                    ("uncertainty", S),
                    ("uncertainty_type", S),
                    ("set_id", S),
                    ("measurement_id", S),
                    ("material", L),
                    ("data", L),
                ],
            ),
            ("Parameter", &[("key", S), ("value", S), ("unit", S)]),
            (
                "Computation",
                &[
                    ("name", S),
                    ("type", S),
                    ("input_data", L),
                    ("output_data", L),
                    ("software_configuration", L),
                    ("condition", L),
                    ("prerequisite_computation", R),
                    ("citation", L),
                    ("notes", S),
                ],
            ),
            (
                "ComputationProcess",
                &[
                    ("name", S),
                    ("type", S),
                    ("input_data", L),
                    ("output_data", L),
                    ("ingredient", L),
                    ("software_configuration", L),
                    ("condition", L),
                    ("property", L),
                    ("citation", L),
                    ("notes", S),
                ],
            ),
            (
                "ComputationalForcefield",
                &[
                    ("key", S),
                    ("building_block", S),
                    ("coarse_grained_mapping", S),
                    ("implicit_solvent", S),
                    ("source", S),
                    ("description", S),
                    ("data", L),
                    ("citation", L),
                ],
            ),
            (
                "Data",
                &[
                    ("name", S),
                    ("type", S),
                    ("file", L),
                    ("sample_preparation", R),
                    ("computation", L),
                    ("computation_process", R),
                    ("material", L),
                    ("process", L),
                    ("citation", L),
                    ("notes", S),
                ],
            ),
            (
                "File",
                &[
                    ("name", S),
                    ("source", S),
                    ("type", S),
                    ("extension", S),
                    ("data_dictionary", S),
                ],
            ),
            (
                "Equipment",
                &[
                    ("key", S),
                    ("description", S),
                    ("condition", L),
                    ("file", L),
                    ("citation", L),
                ],
            ),
            ("Citation", &[("type", S), ("reference", R)]),
            (
                "Reference",
                &[
                    ("type", S),
                    ("title", S),
                    ("author", S),
                    ("journal", S),
                    ("publisher", S),
                    ("year", S),
                    ("volume", S),
                    ("issue", S),
                    ("pages", S),
                    ("doi", S),
                    ("issn", S),
                    ("arxiv_id", S),
                    ("pmid", S),
                    ("website", S),
                ],
            ),
            ("Software", &[("name", S), ("version", S), ("source", S)]),
            (
                "SoftwareConfiguration",
                &[
                    ("software", R),
                    ("algorithm", L),
                    ("notes", S),
                    ("citation", L),
                ],
            ),
            (
                "Algorithm",
                &[("key", S), ("type", S), ("parameter", L), ("citation", R)],
            ),
            ("User", &[("username", S), ("email", S), ("orcid", S)]),
            ("Group", &[("name", S), ("notes", S)]),
        ];

        let mut registry = Self::new();
        for (node_type, fields) in table {
            let fields = fields
                .iter()
                .map(|(name, kind)| FieldDecl::new(*name, *kind))
                .collect();
            let schema = TypeSchema::new(*node_type, fields)
                .expect("built-in schema table is well-formed");
            registry
                .register(schema)
                .expect("built-in schema table has unique node types");
        }
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_relationship_fields_keep_declaration_order() {
        let registry = SchemaRegistry::cript();
        let material = registry.get("Material").unwrap();
        let names: Vec<&str> = material
            .relationship_fields()
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(
            names,
            vec![
                "component",
                "process",
                "property",
                "parent_material",
                "computational_forcefield"
            ]
        );
    }

    #[test]
    fn test_cript_registry_has_all_colored_types() {
        let registry = SchemaRegistry::cript();
        for node_type in [
            "Group",
            "User",
            "Project",
            "Collection",
            "Experiment",
            "Inventory",
            "Material",
            "Process",
            "Data",
            "Computation",
            "ComputationProcess",
            "Reference",
            "Software",
        ] {
            assert!(registry.contains(node_type), "missing {node_type}");
        }
        assert_eq!(registry.len(), 24);
    }

    #[test]
    fn test_project_has_no_key_field() {
        let registry = SchemaRegistry::cript();
        assert!(registry.get("Project").unwrap().field("key").is_none());
        assert!(registry.get("Property").unwrap().field("key").is_some());
    }

    #[test]
    fn test_duplicate_field_rejected() {
        let err = TypeSchema::new(
            "Widget",
            vec![
                FieldDecl::new("part", FieldKind::Reference),
                FieldDecl::new("part", FieldKind::Scalar),
            ],
        )
        .unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::InvalidConfiguration);
        assert_eq!(err.context_value("node_type"), Some("Widget"));
    }

    #[test]
    fn test_empty_node_type_rejected() {
        let err =
            TypeSchema::new("", vec![FieldDecl::new("name", FieldKind::Scalar)]).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::InvalidConfiguration);
        assert_eq!(err.operation(), "schema::new");
    }

    #[test]
    fn test_empty_field_name_rejected() {
        let err =
            TypeSchema::new("Widget", vec![FieldDecl::new("", FieldKind::Scalar)]).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::InvalidConfiguration);
        assert_eq!(err.context_value("node_type"), Some("Widget"));
    }

    #[test]
    fn test_duplicate_type_rejected() {
        let mut registry = SchemaRegistry::new();
        registry
            .register(TypeSchema::new("Widget", vec![]).unwrap())
            .unwrap();
        let err = registry
            .register(TypeSchema::new("Widget", vec![]).unwrap())
            .unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::InvalidConfiguration);
    }

    #[test]
    fn test_field_kind_parse() {
        assert_eq!(
            "reference_list".parse::<FieldKind>().unwrap(),
            FieldKind::ReferenceList
        );
        assert_eq!(FieldKind::Scalar.to_string(), "scalar");
        assert!(!FieldKind::Scalar.is_relationship());
    }
}
