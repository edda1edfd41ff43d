use anyhow::Result;
use convergencia::io::inspect;

pub fn run(_cli: &crate::cli::Cli, args: &crate::cli::InspectArgs) -> Result<()> {
    let info = inspect(&args.shapefile)?;

    println!("File: {}", info.path.display());
    println!("Number of records: {}", info.features);
    match &info.crs {
        Some(crs) => println!("Reference system: {crs}"),
        None => println!("Reference system: unknown (no recognised .prj)"),
    }

    println!("Geometry mix:");
    for (shape_type, count) in &info.shape_types {
        println!("  - {shape_type}: {count}");
    }

    println!("Attribute columns:");
    for (name, kind) in &info.fields {
        println!("  - {name} ({kind})");
    }

    Ok(())
}
