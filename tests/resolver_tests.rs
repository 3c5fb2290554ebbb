use std::sync::Arc;

use arrayconfig::{
    Array, ArrayConfig, ArrayConfigError, ArrayResolver, ConstantArrayConfig, DummyArrayConfig,
    ResolverMetrics,
};

fn raw() -> DummyArrayConfig {
    DummyArrayConfig::new("raw").with_shape(vec![10, 10])
}

#[test]
fn test_resolve_constant_tree() -> Result<(), ArrayConfigError> {
    let resolver = ArrayResolver::new();
    let config: ArrayConfig = ConstantArrayConfig::new(raw()).with_constant(5).into();
    let array = resolver.resolve(&config)?;
    let data = array.read_all()?;
    assert_eq!(data.shape(), &[10, 10]);
    assert_eq!(data.min_max(), Some((5.0, 5.0)));
    assert_eq!(resolver.cached_count(), 2);
    assert!(resolver.cached("raw").is_some());
    Ok(())
}

#[test]
fn test_sources_are_shared() -> Result<(), ArrayConfigError> {
    let resolver = ArrayResolver::new();
    let ones: ArrayConfig = ConstantArrayConfig::new(raw()).with_name("ones").into();
    let fives: ArrayConfig = ConstantArrayConfig::new(raw())
        .with_name("fives")
        .with_constant(5)
        .into();
    resolver.resolve(&ones)?;
    resolver.resolve(&fives)?;

    let source = resolver.resolve(&raw().into())?;
    let cached = resolver.cached("raw").expect("cached source");
    assert!(Arc::ptr_eq(&source, &cached));
    assert_eq!(
        resolver.metrics_snapshot(),
        ResolverMetrics {
            cache_hits: 2,
            cache_misses: 3,
            arrays_created: 3,
        }
    );
    Ok(())
}

#[test]
fn test_conflicting_definition_is_rejected() -> Result<(), ArrayConfigError> {
    let resolver = ArrayResolver::new();
    resolver.resolve(&raw().into())?;
    let other: ArrayConfig = DummyArrayConfig::new("raw").with_shape(vec![3]).into();
    assert!(matches!(
        resolver.resolve(&other),
        Err(ArrayConfigError::InvalidConfig(_))
    ));
    assert!(resolver.evict("raw"));
    let array = resolver.resolve(&other)?;
    assert_eq!(array.shape(), &[3]);
    Ok(())
}

#[test]
fn test_tree_reusing_a_name_is_rejected() -> Result<(), ArrayConfigError> {
    let resolver = ArrayResolver::new();
    let shadowing: ArrayConfig = ConstantArrayConfig::new(raw()).with_name("raw").into();
    assert!(matches!(
        resolver.resolve(&shadowing),
        Err(ArrayConfigError::InvalidConfig(_))
    ));

    let source = resolver.resolve(&raw().into())?;
    assert_eq!(source.shape(), &[10, 10]);
    assert_eq!(resolver.cached_count(), 1);
    let cached = resolver.cached("raw").expect("cached source");
    assert!(Arc::ptr_eq(&source, &cached));
    Ok(())
}

#[test]
fn test_reset_metrics_and_clear() -> Result<(), ArrayConfigError> {
    let resolver = ArrayResolver::new();
    resolver.resolve(&raw().into())?;
    resolver.reset_metrics();
    assert_eq!(resolver.metrics_snapshot(), ResolverMetrics::default());
    resolver.clear();
    assert_eq!(resolver.cached_count(), 0);
    Ok(())
}

#[test]
fn test_resolver_shared_across_threads() {
    let resolver = Arc::new(ArrayResolver::new());
    let config: ArrayConfig = ConstantArrayConfig::new(raw()).with_constant(2).into();
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let resolver = Arc::clone(&resolver);
            let config = config.clone();
            std::thread::spawn(move || {
                let array = resolver.resolve(&config).expect("resolve");
                array.read_all().expect("read").min_max()
            })
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().expect("join"), Some((2.0, 2.0)));
    }
}
