use arrayconfig::{
    Array, ArrayConfig, ArrayRecipe, ArrayResolver, ConfigStore, ConstantArrayConfig,
    DummyArrayConfig, Roi, metadata::render_help,
};

fn main() {
    if let Err(err) = run() {
        eprintln!("mask_from_source error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    print!("{}", render_help(arrayconfig::ArrayKind::Constant));

    let raw = DummyArrayConfig::new("raw").with_shape(vec![10, 10]);
    let mask: ArrayConfig = ConstantArrayConfig::builder()
        .name("mask")
        .source_array_config(raw)
        .constant(5)
        .build()?
        .into();
    println!("config: {}", mask.to_json()?);

    let store = ConfigStore::open_in_memory()?;
    store.store_array_config(&mask)?;
    let loaded = store.retrieve_array_config(mask.name())?;

    let resolver = ArrayResolver::new();
    let array = resolver.resolve(&loaded)?;
    let corner = array.read(&Roi::new(vec![0, 0], vec![2, 3])?)?;
    println!(
        "array {} shape={:?} dtype={} corner={:?}",
        array.name(),
        array.shape(),
        array.dtype(),
        corner.as_int().map(|data| data.iter().copied().collect::<Vec<_>>())
    );
    Ok(())
}
