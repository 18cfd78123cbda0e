use crate::json_schema;

pub fn run(name: Option<String>) -> anyhow::Result<()> {
    match name {
        Some(name) => {
            let schema = json_schema::get_schema(&name).ok_or_else(|| {
                anyhow::anyhow!(
                    "unknown schema: {name} (available: {})",
                    json_schema::schema_names().join(", ")
                )
            })?;
            println!("{}", serde_json::to_string_pretty(&schema)?);
        }
        None => {
            let schemas = json_schema::all_schemas();
            println!("{}", serde_json::to_string_pretty(&schemas)?);
        }
    }
    Ok(())
}
