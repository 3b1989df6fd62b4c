mod common;

use common::{
    field, marker, method_match, param, path_binding, query_binding, registry_of, route,
    type_decl, type_match,
};
use jsrest::dialect::{MappingExtractor, ROUTE_ANNOTATION};
use jsrest::error::Error;
use jsrest::extractor::{Extractor, ExtractorRegistry};
use jsrest::model::{Annotation, Descriptor, Parameter, TypeRef};
use jsrest::pipeline::generate;
use jsrest::tree::{AnnotationMatch, MemberNode, OwnerNode};
use http::Method;

fn mapping_registry() -> ExtractorRegistry {
    let mut registry = ExtractorRegistry::new();
    registry.register(Box::new(MappingExtractor));
    registry
}

#[test]
fn test_single_endpoint_generates_both_modules() {
    let matches = vec![
        type_match("ItemResource", "sample.ItemResource", route(&["/items"], &[])),
        method_match(
            "getItems",
            "sample.ItemResource",
            TypeRef::Collection {
                item: Box::new(TypeRef::named("sample.Item")),
            },
            vec![],
            route(&["/"], &["GET"]),
        ),
    ];
    let types = registry_of(vec![type_decl(
        "Item",
        "sample.Item",
        vec![field("label", TypeRef::String)],
    )]);

    let outputs = generate(&mapping_registry(), &types, matches).unwrap();
    assert_eq!(outputs.len(), 1);
    assert_eq!(outputs[0].dialect, "mapping");
    assert!(outputs[0].modules.types_module.contains("function Item(label) {"));
    assert!(outputs[0]
        .modules
        .client_module
        .contains("items: function () {"));
    assert!(outputs[0].modules.client_module.contains("method: 'get'"));
}

#[test]
fn test_pathless_owner_uses_member_paths() {
    let matches = vec![
        type_match("ItemResource", "sample.ItemResource", marker()),
        method_match(
            "getItems",
            "sample.ItemResource",
            TypeRef::named("sample.Item"),
            vec![],
            route(&["/items"], &["GET"]),
        ),
    ];
    let types = registry_of(vec![type_decl(
        "Item",
        "sample.Item",
        vec![field("name", TypeRef::String)],
    )]);

    let outputs = generate(&mapping_registry(), &types, matches).unwrap();
    let client = &outputs[0].modules.client_module;
    assert!(client.contains("items: function () {"));
    assert!(client.contains("fetch(config.baseURL + '/items', {"));
    let types_module = &outputs[0].modules.types_module;
    assert!(types_module.contains("this.name = typeof name !== 'undefined' ? name : null;"));
    assert!(types_module.contains("Item.prototype.hasName = function () {"));
}

#[test]
fn test_multi_verb_path_parameter_endpoint() {
    let matches = vec![
        type_match("ItemResource", "sample.ItemResource", route(&["/items"], &[])),
        method_match(
            "item",
            "sample.ItemResource",
            TypeRef::unit(),
            vec![param("id", TypeRef::String, path_binding())],
            route(&["/{id}"], &["GET", "POST"]),
        ),
    ];
    let outputs = generate(&mapping_registry(), &registry_of(vec![]), matches).unwrap();
    let client = &outputs[0].modules.client_module;
    assert!(client.contains("items: {"));
    assert!(client.contains("getItems: function (id) {"));
    assert!(client.contains("postItems: function (id) {"));
}

#[test]
fn test_cyclic_type_graph_emits_each_type_once() {
    let matches = vec![
        type_match("OrderResource", "sample.OrderResource", route(&["/orders"], &[])),
        method_match(
            "getOrders",
            "sample.OrderResource",
            TypeRef::named("sample.Order"),
            vec![],
            route(&["/"], &["GET"]),
        ),
    ];
    let types = registry_of(vec![
        type_decl(
            "Order",
            "sample.Order",
            vec![field("customer", TypeRef::named("sample.Customer"))],
        ),
        type_decl(
            "Customer",
            "sample.Customer",
            vec![field(
                "orders",
                TypeRef::Collection {
                    item: Box::new(TypeRef::named("sample.Order")),
                },
            )],
        ),
    ]);

    let outputs = generate(&mapping_registry(), &types, matches).unwrap();
    let module = &outputs[0].modules.types_module;
    assert_eq!(module.matches("function Order(").count(), 1);
    assert_eq!(module.matches("function Customer(").count(), 1);
}

#[test]
fn test_query_default_reaches_the_wire() {
    let matches = vec![
        type_match("ItemResource", "sample.ItemResource", route(&["/items"], &[])),
        method_match(
            "getItems",
            "sample.ItemResource",
            TypeRef::unit(),
            vec![param("limit", TypeRef::String, query_binding(Some("50")))],
            route(&["/"], &["GET"]),
        ),
    ];
    let outputs = generate(&mapping_registry(), &registry_of(vec![]), matches).unwrap();
    assert!(outputs[0]
        .modules
        .client_module
        .contains("limit: parameters.limit || '50'"));
}

#[test]
fn test_generation_is_deterministic() {
    let matches = || {
        vec![
            type_match("ItemResource", "sample.ItemResource", route(&["/items"], &[])),
            method_match(
                "getItems",
                "sample.ItemResource",
                TypeRef::named("sample.Item"),
                vec![],
                route(&["/"], &["GET"]),
            ),
            method_match(
                "getDetails",
                "sample.ItemResource",
                TypeRef::named("sample.Detail"),
                vec![],
                route(&["/details"], &["GET"]),
            ),
        ]
    };
    let types = || {
        registry_of(vec![
            type_decl("Item", "sample.Item", vec![field("label", TypeRef::String)]),
            type_decl(
                "Detail",
                "sample.Detail",
                vec![field("body", TypeRef::String)],
            ),
        ])
    };

    let first = generate(&mapping_registry(), &types(), matches()).unwrap();
    let second = generate(&mapping_registry(), &types(), matches()).unwrap();
    assert_eq!(
        first[0].modules.types_module,
        second[0].modules.types_module
    );
    assert_eq!(
        first[0].modules.client_module,
        second[0].modules.client_module
    );
}

#[test]
fn test_unclaimed_annotations_are_skipped() {
    let matches = vec![type_match(
        "ItemResource",
        "sample.ItemResource",
        Annotation {
            name: "some.other.Dialect".to_string(),
            descriptor: Descriptor::Marker,
        },
    )];
    let outputs = generate(&mapping_registry(), &registry_of(vec![]), matches).unwrap();
    assert!(outputs.is_empty());
}

/// A second dialect claiming the same annotation kind as the bundled one
struct RivalExtractor;

impl Extractor for RivalExtractor {
    fn name(&self) -> &'static str {
        "rival"
    }

    fn can_handle(&self, annotation_name: &str) -> bool {
        annotation_name == ROUTE_ANNOTATION
    }

    fn extract_full_paths(&self, _: &OwnerNode, _: &MemberNode) -> Result<Vec<String>, Error> {
        Ok(vec![])
    }

    fn extract_methods(&self, _: &OwnerNode, _: &MemberNode) -> Result<Vec<Method>, Error> {
        Ok(vec![])
    }

    fn extract_produces(&self, _: &OwnerNode, _: &MemberNode) -> Result<Vec<String>, Error> {
        Ok(vec![])
    }

    fn extract_consumes(&self, _: &OwnerNode, _: &MemberNode) -> Result<Vec<String>, Error> {
        Ok(vec![])
    }

    fn extract_parameters(&self, _: &MemberNode) -> Result<Vec<Parameter>, Error> {
        Ok(vec![])
    }
}

#[test]
fn test_ambiguous_dialect_aborts_the_run() {
    let mut registry = mapping_registry();
    registry.register(Box::new(RivalExtractor));

    let matches: Vec<AnnotationMatch> = vec![type_match(
        "ItemResource",
        "sample.ItemResource",
        route(&["/items"], &[]),
    )];
    let err = generate(&registry, &registry_of(vec![]), matches).unwrap_err();
    match err.downcast_ref::<Error>() {
        Some(Error::AmbiguousDialect {
            annotation,
            extractors,
        }) => {
            assert_eq!(annotation, ROUTE_ANNOTATION);
            assert_eq!(extractors, &vec!["mapping".to_string(), "rival".to_string()]);
        }
        other => panic!("expected AmbiguousDialect, got {other:?}"),
    }
}
