use std::{env, error::Error, process};

use arrayconfig::{
    Array, ArrayConfigError, ArrayKind, ArrayRecipe, ArrayResolver, ConfigStore,
    cli::CommandLineConfig,
    config::ArrayConfig,
    load_array_config_file,
    metadata::render_help,
    validate::{run_strict_config_checks, walk_configs},
};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.iter().any(|arg| arg == "--help" || arg == "-h") {
        println!("{}", CommandLineConfig::help());
        return;
    }
    let arg_refs: Vec<&str> = args.iter().map(|s| s.as_str()).collect();
    let config = match CommandLineConfig::from_args(&arg_refs) {
        Ok(cfg) => cfg,
        Err(err) => {
            eprintln!("error: {err}");
            process::exit(2);
        }
    };

    if let Err(err) = run_command(&config) {
        eprintln!("command failed: {err}");
        process::exit(1);
    }
}

fn run_command(config: &CommandLineConfig) -> Result<(), Box<dyn Error>> {
    match config.command.as_str() {
        "fields" => fields(config.command_args.first().map(|s| s.as_str())),
        "validate" => {
            let array_config = load_array_config_file(config.arg("a file")?)?;
            let report = run_strict_config_checks(&array_config)?;
            println!(
                "valid: name={} nodes={} depth={}",
                array_config.name(),
                report.total_nodes,
                report.max_depth
            );
            Ok(())
        }
        "describe" => {
            let array_config = load_array_config_file(config.arg("a file")?)?;
            describe(&array_config)
        }
        "read" => {
            let array_config = load_array_config_file(config.arg("a file")?)?;
            let array = ArrayResolver::new().resolve(&array_config)?;
            let data = array.read_all()?;
            match data.min_max() {
                Some((min, max)) => println!(
                    "name={} shape={:?} dtype={} min={min} max={max}",
                    array.name(),
                    data.shape(),
                    data.dtype()
                ),
                None => println!(
                    "name={} shape={:?} dtype={} empty",
                    array.name(),
                    data.shape(),
                    data.dtype()
                ),
            }
            Ok(())
        }
        "store" => {
            let store = open_store(config)?;
            let array_config = load_array_config_file(config.arg("a file")?)?;
            store.store_array_config(&array_config)?;
            println!("stored {}", array_config.name());
            Ok(())
        }
        "list" => {
            let store = open_store(config)?;
            for name in store.retrieve_array_config_names()? {
                println!("{name}");
            }
            Ok(())
        }
        "show" => {
            let store = open_store(config)?;
            let array_config = store.retrieve_array_config(config.arg("a name")?)?;
            println!("{}", array_config.to_json_string()?);
            Ok(())
        }
        "delete" => {
            let store = open_store(config)?;
            let name = config.arg("a name")?;
            store.delete_array_config(name)?;
            println!("deleted {name}");
            Ok(())
        }
        other => Err(format!("unknown command {other}").into()),
    }
}

fn fields(kind: Option<&str>) -> Result<(), Box<dyn Error>> {
    match kind {
        Some(name) => {
            let kind = ArrayKind::parse(name).ok_or_else(|| ArrayConfigError::unknown_type(name))?;
            print!("{}", render_help(kind));
        }
        None => {
            for kind in ArrayKind::all() {
                print!("{}", render_help(*kind));
            }
        }
    }
    Ok(())
}

fn describe(array_config: &ArrayConfig) -> Result<(), Box<dyn Error>> {
    let resolver = ArrayResolver::new();
    let mut nodes = Vec::new();
    walk_configs(array_config, &mut |node, depth| nodes.push((node, depth)));
    for (node, depth) in nodes {
        let array = resolver.resolve(node)?;
        println!(
            "{}{} [{}] shape={:?} axes={:?} voxel_size={:?} dtype={} writable={}",
            "  ".repeat(depth - 1),
            array.name(),
            node.kind().as_str(),
            array.shape(),
            array.axes(),
            array.voxel_size(),
            array.dtype(),
            array.writable()
        );
    }
    Ok(())
}

fn open_store(config: &CommandLineConfig) -> Result<ConfigStore, Box<dyn Error>> {
    let path = config
        .database
        .as_deref()
        .ok_or_else(|| format!("{} requires --db", config.command))?;
    Ok(ConfigStore::open(path)?)
}
