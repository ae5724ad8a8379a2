use std::fs;

/// `(table, key)` pairs that `Config` reads as strings.
const STRING_KEYS: [(&str, &str); 4] = [
    ("paths", "static_dir"),
    ("paths", "content_dir"),
    ("paths", "output_dir"),
    ("pages", "extension"),
];

fn main() {
    // Validate default config at compile time
    let config_path = "src/default_config.toml";
    println!("cargo:rerun-if-changed={}", config_path);

    let content = fs::read_to_string(config_path).expect("Failed to read default_config.toml");

    let table = match content.parse::<toml::Table>() {
        Ok(table) => table,
        Err(e) => panic!("Invalid default_config.toml: {}", e),
    };

    for (section, key) in STRING_KEYS {
        let value = table
            .get(section)
            .and_then(toml::Value::as_table)
            .and_then(|section| section.get(key));
        match value {
            Some(toml::Value::String(_)) | None => {}
            Some(other) => panic!(
                "default_config.toml: [{section}] {key} must be a string, found {}",
                other.type_str()
            ),
        }
    }

    for (name, value) in &table {
        if !value.is_table() {
            panic!("default_config.toml: `{name}` must be a table");
        }
    }
}
