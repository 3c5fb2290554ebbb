use std::sync::Arc;

use arrayconfig::{
    Array, ArrayConfig, ArrayConfigError, ArrayKind, ArrayRecipe, ConfigFields,
    ConstantArrayConfig, DummyArrayConfig,
};

fn source() -> DummyArrayConfig {
    DummyArrayConfig::new("raw").with_shape(vec![10, 10])
}

#[test]
fn test_default_constant_is_one() {
    let config = ConstantArrayConfig::new(source());
    assert_eq!(config.constant(), 1);
    assert_eq!(config.source_array_config(), &ArrayConfig::from(source()));
}

#[test]
fn test_explicit_constant_is_kept() {
    let config = ConstantArrayConfig::builder()
        .source_array_config(source())
        .constant(7)
        .build()
        .expect("config");
    assert_eq!(config.constant(), 7);
    assert_eq!(config.source_array_config().name(), "raw");
}

#[test]
fn test_missing_source_is_rejected() {
    let err = ConstantArrayConfig::builder().constant(7).build().unwrap_err();
    assert!(err.is_missing_field());
    assert!(matches!(
        err,
        ArrayConfigError::MissingRequiredField { ref field, .. } if field == "source_array_config"
    ));
}

#[test]
fn test_missing_constant_uses_default() {
    let config = ConstantArrayConfig::builder()
        .source_array_config(source())
        .build()
        .expect("config");
    assert_eq!(config.constant(), 1);
}

#[test]
fn test_repeated_reads_are_stable() {
    let config = ConstantArrayConfig::new(source()).with_constant(7);
    let first = (config.constant(), config.source_array_config().clone());
    for _ in 0..3 {
        assert_eq!(config.constant(), first.0);
        assert_eq!(config.source_array_config(), &first.1);
    }
    let copy = config.clone();
    assert_eq!(copy, config);
}

fn recipe_summary<R: ArrayRecipe>(recipe: &R) -> (String, ArrayKind, usize) {
    (
        recipe.name().to_string(),
        recipe.kind(),
        recipe.source_configs().len(),
    )
}

fn materialize(recipe: &dyn ArrayRecipe) -> Arc<dyn Array> {
    recipe.create_array().expect("array")
}

#[test]
fn test_usable_as_array_recipe() {
    let config = ConstantArrayConfig::new(source()).with_name("mask");
    assert_eq!(
        recipe_summary(&config),
        ("mask".to_string(), ArrayKind::Constant, 1)
    );

    let wrapped: ArrayConfig = config.clone().into();
    assert_eq!(recipe_summary(&wrapped), recipe_summary(&config));

    let array = materialize(&config);
    assert_eq!(array.name(), "mask");
    assert_eq!(array.shape(), &[10, 10]);
}

#[test]
fn test_nested_constant_configs() {
    let inner = ConstantArrayConfig::new(source()).with_constant(3);
    let outer = ConstantArrayConfig::new(inner).with_constant(9);
    assert_eq!(outer.name(), "raw_constant_constant");
    assert!(outer.verify_tree().is_ok());
    let array = outer.create_array().expect("array");
    let data = array.read_all().expect("data");
    assert_eq!(data.min_max(), Some((9.0, 9.0)));
}

#[test]
fn test_field_help_metadata() {
    let fields = ConstantArrayConfig::fields();
    let source = fields
        .iter()
        .find(|f| f.name == "source_array_config")
        .expect("source field");
    assert!(source.required);
    assert_eq!(
        source.help_text,
        "The Array that you want to copy and fill with ones."
    );
    let constant = ConstantArrayConfig::field("constant").expect("constant field");
    assert!(!constant.required);
    assert_eq!(constant.default, Some("1"));
    assert_eq!(
        constant.help_text,
        "The constant value to fill the array with."
    );
}

#[test]
fn test_serialization_keeps_fields() {
    let config: ArrayConfig = ConstantArrayConfig::new(source())
        .with_constant(4)
        .with_name("mask")
        .into();
    let json = config.to_json().expect("json");
    assert_eq!(json["type"], "constant");
    assert_eq!(json["name"], "mask");
    assert_eq!(json["constant"], 4);
    assert_eq!(json["source_array_config"]["type"], "dummy");
    let back: ArrayConfig = serde_json::from_value(json).expect("deserialize");
    assert_eq!(back, config);
}
