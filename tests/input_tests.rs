use jsrest::dialect::MappingExtractor;
use jsrest::extractor::ExtractorRegistry;
use jsrest::input::load_description;
use jsrest::pipeline::generate;
use std::io::Write;

const DESCRIPTION_YAML: &str = r#"
resources:
  - name: ItemResource
    qualified_name: sample.ItemResource
    annotations:
      - name: web.mapping.Route
        shape: mapping
        paths: ["/items"]
    methods:
      - name: getItems
        return_type: { kind: collection, item: { kind: named, name: sample.Item } }
        annotations:
          - name: web.mapping.Route
            shape: mapping
            methods: ["GET"]
types:
  - name: Item
    qualified_name: sample.Item
    fields:
      - name: label
        type: { kind: string }
"#;

const DESCRIPTION_JSON: &str = r#"{
  "resources": [
    {
      "name": "ItemResource",
      "qualified_name": "sample.ItemResource",
      "annotations": [
        { "name": "web.mapping.Route", "shape": "mapping", "paths": ["/items"] }
      ],
      "methods": [
        {
          "name": "getItems",
          "annotations": [
            { "name": "web.mapping.Route", "shape": "mapping", "methods": ["GET"] }
          ]
        }
      ]
    }
  ]
}"#;

fn write_temp(content: &str, suffix: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_yaml_description_drives_the_pipeline() {
    let file = write_temp(DESCRIPTION_YAML, ".yaml");
    let description = load_description(file.path()).unwrap();
    assert_eq!(description.resources.len(), 1);
    assert_eq!(description.types.len(), 1);

    let mut registry = ExtractorRegistry::new();
    registry.register(Box::new(MappingExtractor));
    let outputs = generate(
        &registry,
        &description.type_registry(),
        description.matches(),
    )
    .unwrap();
    assert_eq!(outputs.len(), 1);
    assert!(outputs[0].modules.types_module.contains("function Item(label) {"));
    assert!(outputs[0].modules.client_module.contains("items: function () {"));
}

#[test]
fn test_json_description_loads_by_extension() {
    let file = write_temp(DESCRIPTION_JSON, ".json");
    let description = load_description(file.path()).unwrap();
    assert_eq!(description.resources.len(), 1);
    // no types block: methods with object returns would fail later, this
    // one returns unit by default
    assert!(description.types.is_empty());
    assert_eq!(description.matches().len(), 2);
}

#[test]
fn test_missing_description_file_errors() {
    let err = load_description(std::path::Path::new("/nonexistent/api.yaml")).unwrap_err();
    assert!(err.to_string().contains("/nonexistent/api.yaml"));
}
