use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Structural kind of an annotated element
///
/// Determines whether a match is eligible to own members (a type) or to
/// become a member itself (a method). Supplied by the host integration,
/// never inferred by the tree builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    Type,
    Method,
}

/// A type-level element (a resource class in the annotated source)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeElement {
    /// Simple name, e.g. `ItemResource`
    pub simple_name: String,
    /// Qualified name, e.g. `sample.ItemResource`
    pub qualified_name: String,
}

/// A method-level element (an endpoint method in the annotated source)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodElement {
    /// Simple name, e.g. `getItems`
    pub simple_name: String,
    /// Qualified name of the enclosing type
    pub enclosing_type: String,
    /// Declared return type
    #[serde(default = "TypeRef::unit")]
    pub return_type: TypeRef,
    /// Formal parameters in declaration order
    #[serde(default)]
    pub parameters: Vec<ParamDecl>,
}

/// An annotated source element, either a type or a method
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Element {
    Type(TypeElement),
    Method(MethodElement),
}

impl Element {
    pub fn kind(&self) -> ElementKind {
        match self {
            Element::Type(_) => ElementKind::Type,
            Element::Method(_) => ElementKind::Method,
        }
    }

    pub fn simple_name(&self) -> &str {
        match self {
            Element::Type(t) => &t.simple_name,
            Element::Method(m) => &m.simple_name,
        }
    }
}

/// A resolved annotation instance
///
/// The descriptor is a closed set of variants the extractor interprets
/// directly; the core never resolves an annotation class by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    /// Qualified annotation kind, e.g. `web.mapping.Route`
    pub name: String,
    #[serde(flatten)]
    pub descriptor: Descriptor,
}

/// Closed set of annotation attribute shapes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Descriptor {
    /// Route mapping attributes (paths, verbs, media types)
    Mapping(MappingAttrs),
    /// Marker annotation with no attributes (e.g. a resource marker)
    Marker,
}

/// Attributes of a route-mapping annotation
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MappingAttrs {
    /// Declared path aliases; empty means "/"
    #[serde(default)]
    pub paths: Vec<String>,
    /// Declared HTTP verbs, e.g. `["GET", "POST"]`
    #[serde(default)]
    pub methods: Vec<String>,
    #[serde(default)]
    pub produces: Vec<String>,
    #[serde(default)]
    pub consumes: Vec<String>,
}

/// A formal method parameter together with its REST binding annotation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamDecl {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeRef,
    /// How the parameter binds to the request; unbound parameters are
    /// ignored by extraction
    #[serde(default)]
    pub binding: Option<Binding>,
}

/// REST binding declared on a method parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Binding {
    /// Path variable; `name` overrides the declared parameter name
    Path {
        #[serde(default)]
        name: Option<String>,
    },
    /// Query parameter with optional default value
    Query {
        #[serde(default)]
        name: Option<String>,
        #[serde(default = "default_true")]
        required: bool,
        #[serde(default)]
        default: Option<String>,
    },
    /// Request body payload
    Body,
}

fn default_true() -> bool {
    true
}

/// Reference to a semantic type, closed over the shapes the generator
/// understands
///
/// `Named` resolves through the [`TypeRegistry`]; that indirection is what
/// allows self-referential and mutually-referential type graphs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeRef {
    String,
    Number,
    Boolean,
    /// Native array of `item`
    Array { item: Box<TypeRef> },
    /// Anything assignable to the collection capability
    Collection { item: Box<TypeRef> },
    /// String-keyed map of `value`
    Map { value: Box<TypeRef> },
    /// Declared object type, looked up by qualified name
    Named { name: String },
    /// No value (void returns)
    Unit,
}

impl TypeRef {
    pub fn named(name: impl Into<String>) -> Self {
        TypeRef::Named { name: name.into() }
    }

    pub fn unit() -> Self {
        TypeRef::Unit
    }
}

/// A declared object type in the data model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDecl {
    /// Simple name used in emitted output, e.g. `Item`
    pub name: String,
    pub qualified_name: String,
    #[serde(default)]
    pub fields: Vec<FieldDecl>,
}

/// A field of a declared object type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDecl {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeRef,
}

/// Lookup table of declared object types, keyed by qualified name
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    decls: HashMap<String, TypeDecl>,
}

impl TypeRegistry {
    pub fn new(decls: impl IntoIterator<Item = TypeDecl>) -> Self {
        Self {
            decls: decls
                .into_iter()
                .map(|d| (d.qualified_name.clone(), d))
                .collect(),
        }
    }

    pub fn get(&self, qualified_name: &str) -> Option<&TypeDecl> {
        self.decls.get(qualified_name)
    }

    pub fn len(&self) -> usize {
        self.decls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }
}

/// A resolved endpoint parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Parameter {
    Path(PathParameter),
    Query(QueryParameter),
    Body(BodyParameter),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathParameter {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryParameter {
    pub name: String,
    pub required: bool,
    pub default_value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyParameter {
    pub name: String,
    pub ty: TypeRef,
}

impl Parameter {
    pub fn name(&self) -> &str {
        match self {
            Parameter::Path(p) => &p.name,
            Parameter::Query(q) => &q.name,
            Parameter::Body(b) => &b.name,
        }
    }

    /// Path and body parameters are always required
    pub fn required(&self) -> bool {
        match self {
            Parameter::Path(_) | Parameter::Body(_) => true,
            Parameter::Query(q) => q.required,
        }
    }
}
